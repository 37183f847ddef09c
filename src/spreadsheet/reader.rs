//! Flattens uploaded xlsx/xls/csv files into [`Row`]s.

use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xls, Xlsx};

use crate::spreadsheet::{Row, SpreadsheetError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Xls,
    Csv,
}

impl SheetFormat {
    /// Picks the format from the uploaded file name.
    pub fn from_file_name(file_name: &str) -> Result<Self, SpreadsheetError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_ascii_lowercase())
            .ok_or(SpreadsheetError::UnsupportedFormat)?;
        match extension.as_str() {
            "xlsx" | "xlsm" => Ok(SheetFormat::Xlsx),
            "xls" => Ok(SheetFormat::Xls),
            "csv" => Ok(SheetFormat::Csv),
            _ => Err(SpreadsheetError::UnsupportedFormat),
        }
    }
}

/// Reads the first worksheet. At least a header row and one data row are
/// required.
pub fn read_rows(bytes: &[u8], format: SheetFormat) -> Result<Vec<Row>, SpreadsheetError> {
    let rows = match format {
        SheetFormat::Xlsx => read_workbook::<Xlsx<_>>(bytes)?,
        SheetFormat::Xls => read_workbook::<Xls<_>>(bytes)?,
        SheetFormat::Csv => read_csv(bytes)?,
    };
    if rows.len() < 2 {
        return Err(SpreadsheetError::TooFewRows);
    }
    Ok(rows)
}

fn read_workbook<'a, R>(bytes: &'a [u8]) -> Result<Vec<Row>, SpreadsheetError>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: std::fmt::Display,
{
    let mut workbook =
        R::new(Cursor::new(bytes)).map_err(|e| SpreadsheetError::Read(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)?
        .map_err(|e| SpreadsheetError::Read(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn read_csv(bytes: &[u8]) -> Result<Vec<Row>, SpreadsheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    reader
        .records()
        .map(|record| {
            let record = record.map_err(|e| SpreadsheetError::Read(e.to_string()))?;
            Ok(record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()))
                .collect())
        })
        .collect()
}

/// Renders a cell the way it reads in the sheet: whole numbers without a
/// fraction, dates as ISO strings.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(value) => {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            Some(format!("{}", *value as i64))
        }
        Data::Float(value) => Some(value.to_string()),
        Data::Bool(value) => Some(value.to_string()),
        Data::DateTime(_) => cell.as_datetime().map(|datetime| {
            if datetime.time() == chrono::NaiveTime::MIN {
                datetime.date().to_string()
            } else {
                datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
            }
        }),
        Data::DateTimeIso(value) | Data::DurationIso(value) => Some(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(SheetFormat::from_file_name("deals.XLSX").unwrap(), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::from_file_name("old.xls").unwrap(), SheetFormat::Xls);
        assert_eq!(SheetFormat::from_file_name("a.b.csv").unwrap(), SheetFormat::Csv);
        assert!(SheetFormat::from_file_name("notes.txt").is_err());
        assert!(SheetFormat::from_file_name("README").is_err());
    }

    #[test]
    fn csv_rows_keep_empty_cells_as_none() {
        let rows = read_rows(b"Deal Name,Amount\nRenewal, \n,42\n", SheetFormat::Csv).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![Some("Renewal".to_string()), None]);
        assert_eq!(rows[2], vec![None, Some("42".to_string())]);
    }

    #[test]
    fn header_only_file_is_rejected() {
        assert!(matches!(
            read_rows(b"Deal Name,Amount\n", SheetFormat::Csv),
            Err(SpreadsheetError::TooFewRows)
        ));
    }

    #[test]
    fn numeric_cells_render_without_trailing_fraction() {
        assert_eq!(cell_text(&Data::Float(50000.0)), Some("50000".to_string()));
        assert_eq!(cell_text(&Data::Float(12.5)), Some("12.5".to_string()));
        assert_eq!(cell_text(&Data::String("  ".to_string())), None);
        assert_eq!(cell_text(&Data::Empty), None);
    }
}
