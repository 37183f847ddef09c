use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub(crate) enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(CellValue::Empty, |text| CellValue::Text(text.to_string()))
    }
}

/// Writes a single-sheet workbook with a bold header row and fixed column
/// widths, returning the `.xlsx` bytes.
pub(crate) fn write_sheet(
    sheet_name: &str,
    columns: &[(&str, f64)],
    rows: &[Vec<CellValue>],
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, (title, width)) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *title, &header_format)?;
        worksheet.set_column_width(col, *width)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_number = index as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            let col = col as u16;
            match value {
                CellValue::Text(text) => {
                    worksheet.write_string(row_number, col, text)?;
                }
                CellValue::Number(number) => {
                    worksheet.write_number(row_number, col, *number)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    workbook.save_to_buffer()
}
