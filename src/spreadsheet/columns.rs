//! Header-to-field mapping tables.

use crate::spreadsheet::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealField {
    DealName,
    Company,
    Contact,
    Stage,
    Amount,
    Owner,
    Activity,
    Tags,
    CloseDate,
    Priority,
    Notes,
}

/// Recognised deal headers, compared case-insensitively after trimming.
pub const DEAL_COLUMNS: &[(&str, DealField)] = &[
    ("deal name", DealField::DealName),
    ("name", DealField::DealName),
    ("company", DealField::Company),
    ("contact", DealField::Contact),
    ("stage", DealField::Stage),
    ("amount", DealField::Amount),
    ("owner", DealField::Owner),
    ("activity", DealField::Activity),
    ("tags", DealField::Tags),
    ("close date", DealField::CloseDate),
    ("priority", DealField::Priority),
    ("notes", DealField::Notes),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    FullName,
    Industry,
    Email,
    Phone,
    Website,
    Status,
}

pub const COMPANY_COLUMNS: &[(&str, CompanyField)] = &[
    ("company name", CompanyField::FullName),
    ("full name", CompanyField::FullName),
    ("name", CompanyField::FullName),
    ("industry", CompanyField::Industry),
    ("email", CompanyField::Email),
    ("phone", CompanyField::Phone),
    ("website", CompanyField::Website),
    ("status", CompanyField::Status),
];

/// Column index to field for every recognised header. When two headers map
/// to the same field the leftmost wins; unknown headers are ignored.
pub fn map_columns<F: Copy + PartialEq>(header: &Row, table: &[(&str, F)]) -> Vec<(usize, F)> {
    let mut mapping: Vec<(usize, F)> = Vec::new();
    for (index, title) in header.iter().enumerate() {
        let Some(title) = title.as_deref() else {
            continue;
        };
        let normalized = title.trim().to_lowercase();
        let field = table
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, field)| *field);
        match field {
            Some(field) if !mapping.iter().any(|(_, mapped)| *mapped == field) => {
                mapping.push((index, field));
            }
            _ => {}
        }
    }
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(titles: &[&str]) -> Row {
        titles
            .iter()
            .map(|title| (!title.is_empty()).then(|| title.to_string()))
            .collect()
    }

    #[test]
    fn headers_match_case_insensitively() {
        let mapping = map_columns(
            &header(&[" Deal Name ", "AMOUNT", "Unknown", "close date"]),
            DEAL_COLUMNS,
        );
        assert_eq!(
            mapping,
            vec![
                (0, DealField::DealName),
                (1, DealField::Amount),
                (3, DealField::CloseDate)
            ]
        );
    }

    #[test]
    fn first_alias_wins() {
        let mapping = map_columns(&header(&["Name", "", "Company Name"]), COMPANY_COLUMNS);
        assert_eq!(mapping, vec![(0, CompanyField::FullName)]);
    }
}
