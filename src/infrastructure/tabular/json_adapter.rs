use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::application::ports::{TableCodecError, TableReader, TableWriter};
use crate::domain::{CellValue, DataTable};

/// Record-oriented JSON codec: a top-level array with one object per
/// row, the shape `df.to_json(orient="records")` produces.
pub struct JsonAdapter;

impl JsonAdapter {
    fn cell_from_value(value: &Value) -> CellValue {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else {
                    CellValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => CellValue::Text(s.clone()),
            // Nested structures are kept as their JSON text.
            other => CellValue::Text(other.to_string()),
        }
    }

    fn value_from_cell(cell: &CellValue) -> Value {
        match cell {
            CellValue::Empty => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Integer(i) => Value::from(*i),
            CellValue::Float(f) => Value::from(*f),
            CellValue::Text(s) => Value::String(s.clone()),
        }
    }
}

#[async_trait]
impl TableReader for JsonAdapter {
    async fn read_table(&self, data: &[u8]) -> Result<DataTable, TableCodecError> {
        let root: Value = serde_json::from_slice(data)
            .map_err(|e| TableCodecError::Malformed(e.to_string()))?;
        let records = root
            .as_array()
            .ok_or_else(|| TableCodecError::Malformed("expected a top-level array".to_string()))?;

        // Column set is the union of keys, in first-seen order.
        let mut columns: Vec<String> = Vec::new();
        let mut objects = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let object = record
                .as_object()
                .ok_or_else(|| TableCodecError::Malformed(format!("row {i} is not an object")))?;
            for key in object.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
            objects.push(object);
        }

        let mut table = DataTable::new(columns);
        for object in objects {
            let row = table
                .columns()
                .iter()
                .map(|column| {
                    object
                        .get(column)
                        .map(Self::cell_from_value)
                        .unwrap_or(CellValue::Empty)
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
impl TableWriter for JsonAdapter {
    async fn write_table(&self, table: &DataTable) -> Result<Vec<u8>, TableCodecError> {
        let records: Vec<Value> = table
            .rows()
            .map(|row| {
                let mut object = Map::new();
                for (column, cell) in table.columns().iter().zip(row) {
                    object.insert(column.clone(), Self::value_from_cell(cell));
                }
                Value::Object(object)
            })
            .collect();

        serde_json::to_vec_pretty(&records).map_err(|e| TableCodecError::WriteFailed(e.to_string()))
    }
}
