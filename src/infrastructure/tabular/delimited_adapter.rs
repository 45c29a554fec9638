use async_trait::async_trait;

use crate::application::ports::{TableCodecError, TableReader, TableWriter};
use crate::domain::{CellValue, DataTable};

/// CSV / TSV codec. The first record is the header row; every field is
/// kept as text so values round-trip byte for byte.
pub struct DelimitedAdapter {
    delimiter: u8,
}

impl DelimitedAdapter {
    pub fn comma() -> Self {
        Self { delimiter: b',' }
    }

    pub fn tab() -> Self {
        Self { delimiter: b'\t' }
    }
}

#[async_trait]
impl TableReader for DelimitedAdapter {
    async fn read_table(&self, data: &[u8]) -> Result<DataTable, TableCodecError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_reader(data);

        let headers = reader
            .headers()
            .map_err(|e| TableCodecError::Malformed(e.to_string()))?
            .iter()
            .map(String::from)
            .collect();

        let mut table = DataTable::new(headers);
        for record in reader.records() {
            let record = record.map_err(|e| TableCodecError::Malformed(e.to_string()))?;
            let row = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect();
            table
                .push_row(row)
                .map_err(|e| TableCodecError::Malformed(e.to_string()))?;
        }
        Ok(table)
    }
}

#[async_trait]
impl TableWriter for DelimitedAdapter {
    async fn write_table(&self, table: &DataTable) -> Result<Vec<u8>, TableCodecError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        writer
            .write_record(table.columns())
            .map_err(|e| TableCodecError::WriteFailed(e.to_string()))?;
        for row in table.rows() {
            let record: Vec<String> = row.iter().map(CellValue::coerce_text).collect();
            writer
                .write_record(&record)
                .map_err(|e| TableCodecError::WriteFailed(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| TableCodecError::WriteFailed(e.to_string()))
    }
}
