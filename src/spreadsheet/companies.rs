//! Company rows: import parsing, export and the import template.

use crate::domain::company::{Company, DEFAULT_INDUSTRY, DEFAULT_STATUS};
use crate::spreadsheet::columns::{COMPANY_COLUMNS, CompanyField, map_columns};
use crate::spreadsheet::writer::{CellValue, write_sheet};
use crate::spreadsheet::{ParsedSheet, Row, SpreadsheetError, cell, display_row};

pub const TEMPLATE_SHEET_NAME: &str = "Company Template";
pub const TEMPLATE_FILE_NAME: &str = "company-import-template.xlsx";
pub const EXPORT_FILE_NAME: &str = "companies.xlsx";

/// Company as read from one spreadsheet row, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRow {
    pub row: usize,
    pub full_name: String,
    pub industry: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub status: String,
}

pub fn parse_company_rows(rows: &[Row]) -> Result<ParsedSheet<CompanyRow>, SpreadsheetError> {
    let (header, data) = rows.split_first().ok_or(SpreadsheetError::TooFewRows)?;
    let mapping = map_columns(header, COMPANY_COLUMNS);
    if !mapping
        .iter()
        .any(|(_, field)| *field == CompanyField::FullName)
    {
        return Err(SpreadsheetError::MissingColumns("Company Name".to_string()));
    }

    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (offset, row) in data.iter().enumerate() {
        let row_number = display_row(offset + 1);
        let mut full_name = None;
        let mut company = CompanyRow {
            row: row_number,
            full_name: String::new(),
            industry: DEFAULT_INDUSTRY.to_string(),
            email: None,
            phone: None,
            website: None,
            status: DEFAULT_STATUS.to_string(),
        };
        let mut has_data = false;

        for (index, field) in &mapping {
            let Some(value) = cell(row, *index) else {
                continue;
            };
            has_data = true;
            let value = value.to_string();
            match field {
                CompanyField::FullName => full_name = Some(value),
                CompanyField::Industry => company.industry = value,
                CompanyField::Email => company.email = Some(value),
                CompanyField::Phone => company.phone = Some(value),
                CompanyField::Website => company.website = Some(value),
                CompanyField::Status => company.status = value,
            }
        }

        if !has_data {
            continue;
        }
        match full_name {
            Some(name) => {
                company.full_name = name;
                records.push(company);
            }
            None => warnings.push(format!(
                "Row {row_number}: Missing required field 'Company Name'"
            )),
        }
    }

    if records.is_empty() {
        return Err(SpreadsheetError::NoValidRows {
            entity: "company",
            warnings,
        });
    }

    Ok(ParsedSheet { records, warnings })
}

/// Exportable company column, addressed by its camelCase key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyColumn {
    Id,
    FullName,
    Industry,
    Email,
    Phone,
    Website,
    Status,
    CreatedAt,
}

impl CompanyColumn {
    pub const ALL: &'static [CompanyColumn] = &[
        CompanyColumn::Id,
        CompanyColumn::FullName,
        CompanyColumn::Industry,
        CompanyColumn::Email,
        CompanyColumn::Phone,
        CompanyColumn::Website,
        CompanyColumn::Status,
        CompanyColumn::CreatedAt,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CompanyColumn::Id => "id",
            CompanyColumn::FullName => "fullName",
            CompanyColumn::Industry => "industry",
            CompanyColumn::Email => "email",
            CompanyColumn::Phone => "phone",
            CompanyColumn::Website => "website",
            CompanyColumn::Status => "status",
            CompanyColumn::CreatedAt => "createdAt",
        }
    }

    fn header(self) -> (&'static str, f64) {
        match self {
            CompanyColumn::Id => ("ID", 8.0),
            CompanyColumn::FullName => ("Company Name", 25.0),
            CompanyColumn::Industry => ("Industry", 20.0),
            CompanyColumn::Email => ("Email", 30.0),
            CompanyColumn::Phone => ("Phone", 18.0),
            CompanyColumn::Website => ("Website", 30.0),
            CompanyColumn::Status => ("Status", 12.0),
            CompanyColumn::CreatedAt => ("Created At", 20.0),
        }
    }

    fn value(self, company: &Company) -> CellValue {
        match self {
            CompanyColumn::Id => CellValue::Number(f64::from(company.id.get())),
            CompanyColumn::FullName => CellValue::Text(company.full_name.to_string()),
            CompanyColumn::Industry => CellValue::Text(company.industry.to_string()),
            CompanyColumn::Email => company.email.as_ref().map(|email| email.as_str()).into(),
            CompanyColumn::Phone => company.phone.as_ref().map(|phone| phone.as_str()).into(),
            CompanyColumn::Website => company.website.as_ref().map(|url| url.as_str()).into(),
            CompanyColumn::Status => CellValue::Text(company.status.to_string()),
            CompanyColumn::CreatedAt => {
                CellValue::Text(company.created_at.format("%Y-%m-%d %H:%M").to_string())
            }
        }
    }

    /// Resolves requested keys, keeping their order; `None` selects all.
    pub fn select(keys: Option<&[String]>) -> Result<Vec<CompanyColumn>, SpreadsheetError> {
        let Some(keys) = keys else {
            return Ok(Self::ALL.to_vec());
        };
        keys.iter()
            .map(|key| {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|column| column.key().eq_ignore_ascii_case(key.trim()))
                    .ok_or_else(|| SpreadsheetError::UnknownColumn(key.clone()))
            })
            .collect()
    }
}

pub fn export_companies(
    companies: &[Company],
    columns: &[CompanyColumn],
) -> Result<Vec<u8>, SpreadsheetError> {
    let headers: Vec<(&str, f64)> = columns.iter().map(|column| column.header()).collect();
    let rows: Vec<Vec<CellValue>> = companies
        .iter()
        .map(|company| columns.iter().map(|column| column.value(company)).collect())
        .collect();

    Ok(write_sheet("Companies", &headers, &rows)?)
}

const COMPANY_TEMPLATE_COLUMNS: &[(&str, f64)] = &[
    ("Company Name", 25.0),
    ("Industry", 20.0),
    ("Email", 30.0),
    ("Phone", 18.0),
    ("Website", 30.0),
    ("Status", 12.0),
];

pub fn company_template() -> Result<Vec<u8>, SpreadsheetError> {
    let example = vec![
        CellValue::Text("Acme Corp".to_string()),
        CellValue::Text("Technology".to_string()),
        CellValue::Text("info@acme.com".to_string()),
        CellValue::Text("+1 415 555 0100".to_string()),
        CellValue::Text("https://acme.com".to_string()),
        CellValue::Text(DEFAULT_STATUS.to_string()),
    ];
    Ok(write_sheet(
        TEMPLATE_SHEET_NAME,
        COMPANY_TEMPLATE_COLUMNS,
        &[example],
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells
            .iter()
            .map(|value| (!value.is_empty()).then(|| value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_industry_and_status() {
        let rows = vec![
            row(&["Company Name", "Industry", "Status", "Email"]),
            row(&["Acme Corp", "", "", "info@acme.com"]),
            row(&["", "Retail", "", ""]),
        ];
        let parsed = parse_company_rows(&rows).unwrap();
        assert_eq!(parsed.records.len(), 1);
        let acme = &parsed.records[0];
        assert_eq!(acme.industry, "Unknown Industry");
        assert_eq!(acme.status, "Active");
        assert_eq!(acme.email.as_deref(), Some("info@acme.com"));
        assert_eq!(
            parsed.warnings,
            vec!["Row 3: Missing required field 'Company Name'".to_string()]
        );
    }

    #[test]
    fn full_name_alias_is_accepted() {
        let rows = vec![row(&["Full Name"]), row(&["Globex"])];
        assert_eq!(parse_company_rows(&rows).unwrap().records[0].full_name, "Globex");
    }

    #[test]
    fn column_selection_follows_request_order() {
        let keys = vec!["email".to_string(), "fullName".to_string()];
        assert_eq!(
            CompanyColumn::select(Some(&keys)).unwrap(),
            vec![CompanyColumn::Email, CompanyColumn::FullName]
        );
        assert_eq!(CompanyColumn::select(None).unwrap().len(), CompanyColumn::ALL.len());
        let unknown = vec!["revenue".to_string()];
        assert!(matches!(
            CompanyColumn::select(Some(&unknown)),
            Err(SpreadsheetError::UnknownColumn(_))
        ));
    }

    #[test]
    fn export_writes_workbook() {
        let bytes = export_companies(&[], CompanyColumn::ALL).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(company_template().unwrap().starts_with(b"PK"));
    }
}
