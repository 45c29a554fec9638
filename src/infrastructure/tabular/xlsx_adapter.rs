use std::io::Cursor;

use async_trait::async_trait;
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use rust_xlsxwriter::Workbook;

use crate::application::ports::{TableCodecError, TableReader, TableWriter};
use crate::domain::{CellValue, DataTable};

/// Spreadsheet codec: reads `.xlsx`/`.xls` (sheet one, first row is the
/// header) via calamine, writes `.xlsx` via rust_xlsxwriter.
pub struct XlsxAdapter;

impl XlsxAdapter {
    fn cell_from_data(data: &Data) -> CellValue {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Integer(*i),
            // Spreadsheets store all numbers as floats; fold integral
            // values back to integers.
            Data::Float(f) => {
                if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    CellValue::Integer(*f as i64)
                } else {
                    CellValue::Float(*f)
                }
            }
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Empty,
        }
    }
}

#[async_trait]
impl TableReader for XlsxAdapter {
    async fn read_table(&self, data: &[u8]) -> Result<DataTable, TableCodecError> {
        let cursor = Cursor::new(data.to_vec());
        let mut workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| TableCodecError::Malformed(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| TableCodecError::Malformed("workbook has no sheets".to_string()))?
            .map_err(|e| TableCodecError::Malformed(e.to_string()))?;

        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| Self::cell_from_data(cell).coerce_text())
                .collect(),
            None => Vec::new(),
        };

        let mut table = DataTable::new(headers);
        for row in rows {
            let cells = row.iter().map(Self::cell_from_data).collect();
            table
                .push_row(cells)
                .map_err(|e| TableCodecError::Malformed(e.to_string()))?;
        }
        Ok(table)
    }
}

#[async_trait]
impl TableWriter for XlsxAdapter {
    async fn write_table(&self, table: &DataTable) -> Result<Vec<u8>, TableCodecError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, name) in table.columns().iter().enumerate() {
            worksheet
                .write_string(0, col as u16, name)
                .map_err(|e| TableCodecError::WriteFailed(e.to_string()))?;
        }

        for (i, row) in table.rows().enumerate() {
            let row_idx = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col_idx = col as u16;
                let result = match cell {
                    CellValue::Empty => continue,
                    CellValue::Text(s) => worksheet.write_string(row_idx, col_idx, s),
                    CellValue::Integer(v) => worksheet.write_number(row_idx, col_idx, *v as f64),
                    CellValue::Float(v) => worksheet.write_number(row_idx, col_idx, *v),
                    CellValue::Bool(b) => worksheet.write_boolean(row_idx, col_idx, *b),
                };
                result.map_err(|e| TableCodecError::WriteFailed(e.to_string()))?;
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| TableCodecError::WriteFailed(e.to_string()))
    }
}
