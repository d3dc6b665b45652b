//! Spreadsheet output: the substituted renderer text is read as CSV and written to a
//! single worksheet, header row in bold.

use crate::error::Result;
use rust_xlsxwriter::{Format, Workbook};

/// Picks the most frequent of the common separators in the header line.
pub fn detect_delimiter(header_line: &str) -> u8 {
    [b',', b';', b'\t', b'|']
        .iter()
        .max_by_key(|&&d| header_line.matches(d as char).count())
        .copied()
        .unwrap_or(b',')
}

/// Excel limits sheet names to 31 characters and forbids `[]:*?/\`.
pub fn sheet_name(title: &str) -> String {
    let name: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let name = name.trim().trim_matches('\'').to_string();
    if name.is_empty() {
        "Sheet1".to_string()
    } else {
        name
    }
}

pub fn render(text: &str, title: &str) -> Result<Vec<u8>> {
    let header_line = text.lines().next().unwrap_or_default();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(detect_delimiter(header_line))
        .from_reader(text.as_bytes());

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(title))?;

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let row = row as u32;
        for (col, value) in record.iter().enumerate() {
            let col = col as u16;
            if row == 0 {
                worksheet.write_string_with_format(row, col, value, &header_format)?;
                continue;
            }
            match value.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => {
                    worksheet.write_number(row, col, number)?;
                }
                _ => {
                    worksheet.write_string(row, col, value)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
