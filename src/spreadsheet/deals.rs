//! Deal rows: import parsing, export and the import template.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::deal::{Deal, DealStage};
use crate::domain::types::split_list;
use crate::spreadsheet::columns::{DEAL_COLUMNS, DealField, map_columns};
use crate::spreadsheet::writer::{CellValue, write_sheet};
use crate::spreadsheet::{ParsedSheet, Row, SpreadsheetError, cell, display_row};

pub const TEMPLATE_SHEET_NAME: &str = "Deal Template";
pub const TEMPLATE_FILE_NAME: &str = "deal-import-template.xlsx";
pub const EXPORT_FILE_NAME: &str = "deals.xlsx";

/// Deal as read from one spreadsheet row. Company, contact and owner are
/// names; resolving them is left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct DealRow {
    pub row: usize,
    pub deal_name: String,
    pub company: Option<String>,
    pub contact: Option<String>,
    pub stage: DealStage,
    pub amount: f64,
    pub owner: Option<String>,
    pub activity: Option<String>,
    pub tags: Vec<String>,
    pub close_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub notes: Option<String>,
}

impl DealRow {
    fn empty(row: usize) -> Self {
        Self {
            row,
            deal_name: String::new(),
            company: None,
            contact: None,
            stage: DealStage::New,
            amount: 0.0,
            owner: None,
            activity: None,
            tags: Vec::new(),
            close_date: None,
            priority: None,
            notes: None,
        }
    }
}

/// Maps rows (header first) onto [`DealRow`]s.
pub fn parse_deal_rows(rows: &[Row]) -> Result<ParsedSheet<DealRow>, SpreadsheetError> {
    let (header, data) = rows.split_first().ok_or(SpreadsheetError::TooFewRows)?;
    let mapping = map_columns(header, DEAL_COLUMNS);
    if !mapping.iter().any(|(_, field)| *field == DealField::DealName) {
        return Err(SpreadsheetError::MissingColumns("Deal Name".to_string()));
    }

    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (offset, row) in data.iter().enumerate() {
        let row_number = display_row(offset + 1);
        let mut deal = DealRow::empty(row_number);
        let mut has_data = false;

        for (index, field) in &mapping {
            let Some(value) = cell(row, *index) else {
                continue;
            };
            has_data = true;

            match field {
                DealField::DealName => deal.deal_name = value.to_string(),
                DealField::Company => deal.company = Some(value.to_string()),
                DealField::Contact => deal.contact = Some(value.to_string()),
                DealField::Owner => deal.owner = Some(value.to_string()),
                DealField::Activity => deal.activity = Some(value.to_string()),
                DealField::Priority => deal.priority = Some(value.to_string()),
                DealField::Notes => deal.notes = Some(value.to_string()),
                DealField::Tags => deal.tags = split_list(value),
                DealField::Stage => match value.parse::<DealStage>() {
                    Ok(stage) => deal.stage = stage,
                    Err(_) => warnings.push(format!(
                        "Row {row_number}: Invalid stage '{value}', defaulted to 'New'"
                    )),
                },
                DealField::Amount => match parse_amount(value) {
                    Some(amount) => deal.amount = amount,
                    None => warnings.push(format!(
                        "Row {row_number}: Invalid amount '{value}', defaulted to 0"
                    )),
                },
                DealField::CloseDate => match parse_date(value) {
                    Some(date) => deal.close_date = Some(date),
                    None => warnings.push(format!(
                        "Row {row_number}: Invalid date format '{value}'"
                    )),
                },
            }
        }

        if !has_data {
            continue;
        }
        if deal.deal_name.is_empty() {
            warnings.push(format!(
                "Row {row_number}: Missing required field 'Deal Name'"
            ));
            continue;
        }
        records.push(deal);
    }

    if records.is_empty() {
        return Err(SpreadsheetError::NoValidRows {
            entity: "deal",
            warnings,
        });
    }

    Ok(ParsedSheet { records, warnings })
}

/// Keeps digits, `.` and `-` only; negative or unparsable amounts are
/// rejected.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}

/// Accepts ISO dates and datetimes plus `YYYY/MM/DD`, `MM/DD/YYYY` and
/// `DD.MM.YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

const DEAL_TEMPLATE_COLUMNS: &[(&str, f64)] = &[
    ("Deal Name", 25.0),
    ("Company", 20.0),
    ("Contact", 20.0),
    ("Stage", 15.0),
    ("Amount", 15.0),
    ("Owner", 15.0),
    ("Activity", 20.0),
    ("Tags", 30.0),
    ("Close Date", 12.0),
    ("Priority", 12.0),
    ("Notes", 40.0),
];

/// Workbook with the importable headers and one example deal.
pub fn deal_template() -> Result<Vec<u8>, SpreadsheetError> {
    let example = vec![
        CellValue::Text("Enterprise Software License".to_string()),
        CellValue::Text("Acme Corp".to_string()),
        CellValue::Text("John Smith".to_string()),
        CellValue::Text(DealStage::Proposal.to_string()),
        CellValue::Number(50000.0),
        CellValue::Text("Sales Rep".to_string()),
        CellValue::Text("Proposal sent".to_string()),
        CellValue::Text("Enterprise, Software".to_string()),
        CellValue::Text("2024-02-15".to_string()),
        CellValue::Text("High".to_string()),
        CellValue::Text("Large enterprise deal with good potential".to_string()),
    ];
    Ok(write_sheet(
        TEMPLATE_SHEET_NAME,
        DEAL_TEMPLATE_COLUMNS,
        &[example],
    )?)
}

/// Deal joined with the display names of its relations.
pub struct DealExportRow<'a> {
    pub deal: &'a Deal,
    pub company: Option<&'a str>,
    pub contact: Option<&'a str>,
    pub owner: Option<&'a str>,
}

const DEAL_EXPORT_COLUMNS: &[(&str, f64)] = &[
    ("Deal Name", 25.0),
    ("Company", 20.0),
    ("Contact", 20.0),
    ("Stage", 15.0),
    ("Amount", 15.0),
    ("Currency", 10.0),
    ("Owner", 15.0),
    ("Activity", 20.0),
    ("Tags", 30.0),
    ("Close Date", 12.0),
    ("Priority", 12.0),
    ("Notes", 40.0),
    ("Created At", 20.0),
];

pub fn export_deals(rows: &[DealExportRow<'_>]) -> Result<Vec<u8>, SpreadsheetError> {
    let cells: Vec<Vec<CellValue>> = rows
        .iter()
        .map(|row| {
            let deal = row.deal;
            vec![
                CellValue::Text(deal.deal_name.to_string()),
                row.company.into(),
                row.contact.into(),
                CellValue::Text(deal.stage.to_string()),
                CellValue::Number(deal.amount.get()),
                CellValue::Text(deal.currency.to_string()),
                row.owner.into(),
                deal.activity.as_deref().into(),
                CellValue::Text(deal.tags.join(", ")),
                deal.close_date
                    .map_or(CellValue::Empty, |date| CellValue::Text(date.to_string())),
                deal.priority.as_deref().into(),
                deal.notes.as_ref().map(|notes| notes.as_str()).into(),
                CellValue::Text(deal.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ]
        })
        .collect();

    Ok(write_sheet("Deals", DEAL_EXPORT_COLUMNS, &cells)?)
}
