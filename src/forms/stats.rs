use serde::Deserialize;

use crate::domain::stats::{RangeKey, StatsFilters};
use crate::forms::{FormError, parse_optional_id};

/// Raw query string of the stats endpoint. Ids stay strings so blank values
/// can be told apart from malformed ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQueryForm {
    pub range: Option<String>,
    pub owner_id: Option<String>,
    pub company_id: Option<String>,
    pub contact_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsRequest {
    pub range: RangeKey,
    pub filters: StatsFilters,
}

impl StatsQueryForm {
    /// Parses the filter ids shared by the stats and deal listing endpoints.
    pub fn filters(&self) -> Result<StatsFilters, FormError> {
        Ok(StatsFilters {
            owner_id: parse_optional_id(self.owner_id.as_deref(), "ownerId")?,
            company_id: parse_optional_id(self.company_id.as_deref(), "companyId")?,
            contact_id: parse_optional_id(self.contact_id.as_deref(), "contactId")?,
        })
    }
}

impl TryFrom<StatsQueryForm> for StatsRequest {
    type Error = FormError;

    fn try_from(form: StatsQueryForm) -> Result<Self, Self::Error> {
        Ok(Self {
            range: RangeKey::parse_or_default(form.range.as_deref()),
            filters: form.filters()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CompanyId, ManagerId};

    #[test]
    fn defaults_to_this_month_without_filters() {
        let request = StatsRequest::try_from(StatsQueryForm::default()).unwrap();
        assert_eq!(request.range, RangeKey::ThisMonth);
        assert_eq!(request.filters, StatsFilters::default());
    }

    #[test]
    fn parses_filters_and_ignores_blank_ones() {
        let form = StatsQueryForm {
            range: Some("this_year".to_string()),
            owner_id: Some("3".to_string()),
            company_id: Some("".to_string()),
            contact_id: None,
        };
        let request = StatsRequest::try_from(form).unwrap();
        assert_eq!(request.range, RangeKey::ThisYear);
        assert_eq!(request.filters.owner_id, Some(ManagerId::new(3).unwrap()));
        assert_eq!(request.filters.company_id, None::<CompanyId>);
    }

    #[test]
    fn rejects_non_numeric_filter() {
        let form = StatsQueryForm {
            contact_id: Some("x1".to_string()),
            ..StatsQueryForm::default()
        };
        assert!(matches!(
            StatsRequest::try_from(form),
            Err(FormError::InvalidId("contactId"))
        ));
    }
}
