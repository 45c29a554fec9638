use categorizer::application::ports::{TableCodecError, TableReader, TableWriter};
use categorizer::domain::{CellValue, DataTable, OutputFormat, SourceFormat};
use categorizer::infrastructure::tabular::{
    CodecFactory, DelimitedAdapter, JsonAdapter, XlsxAdapter,
};

fn text_table() -> DataTable {
    let mut table = DataTable::new(vec!["Description".to_string(), "Note".to_string()]);
    table
        .push_row(vec![
            CellValue::Text("café au lait ☕".to_string()),
            CellValue::Text("4.50".to_string()),
        ])
        .unwrap();
    table
        .push_row(vec![
            CellValue::Text("rent".to_string()),
            CellValue::Empty,
        ])
        .unwrap();
    table
}

fn typed_table() -> DataTable {
    let mut table = DataTable::new(vec![
        "Description".to_string(),
        "Amount".to_string(),
        "Recurring".to_string(),
        "Count".to_string(),
    ]);
    table
        .push_row(vec![
            CellValue::Text("café au lait ☕".to_string()),
            CellValue::Float(4.5),
            CellValue::Bool(true),
            CellValue::Integer(3),
        ])
        .unwrap();
    table
        .push_row(vec![
            CellValue::Text("rent".to_string()),
            CellValue::Float(950.25),
            CellValue::Bool(false),
            CellValue::Empty,
        ])
        .unwrap();
    table
}

#[tokio::test]
async fn given_csv_codec_when_round_tripping_then_table_is_preserved() {
    let codec = DelimitedAdapter::comma();
    let table = text_table();

    let bytes = codec.write_table(&table).await.unwrap();
    let parsed = codec.read_table(&bytes).await.unwrap();

    assert_eq!(parsed, table);
}

#[tokio::test]
async fn given_tsv_codec_when_round_tripping_then_table_is_preserved() {
    let codec = DelimitedAdapter::tab();
    let table = text_table();

    let bytes = codec.write_table(&table).await.unwrap();
    let parsed = codec.read_table(&bytes).await.unwrap();

    assert_eq!(parsed, table);
}

#[tokio::test]
async fn given_json_codec_when_round_tripping_then_types_and_blanks_are_preserved() {
    let codec = JsonAdapter;
    let table = typed_table();

    let bytes = codec.write_table(&table).await.unwrap();
    let parsed = codec.read_table(&bytes).await.unwrap();

    assert_eq!(parsed, table);
}

#[tokio::test]
async fn given_xlsx_codec_when_round_tripping_then_types_and_blanks_are_preserved() {
    let codec = XlsxAdapter;
    let table = typed_table();

    let bytes = codec.write_table(&table).await.unwrap();
    let parsed = codec.read_table(&bytes).await.unwrap();

    assert_eq!(parsed, table);
}

#[tokio::test]
async fn given_csv_with_blank_fields_when_reading_then_cells_are_empty() {
    let data = b"Description,Amount\ncoffee shop,4.50\n,10.00\n";
    let table = DelimitedAdapter::comma().read_table(data).await.unwrap();

    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.cell(1, 0), &CellValue::Empty);
    assert_eq!(table.cell(0, 1), &CellValue::Text("4.50".to_string()));
}

#[tokio::test]
async fn given_ragged_csv_when_reading_then_fails_as_malformed() {
    let data = b"a,b\n1,2,3\n";
    let result = DelimitedAdapter::comma().read_table(data).await;
    assert!(matches!(result, Err(TableCodecError::Malformed(_))));
}

#[tokio::test]
async fn given_json_records_with_uneven_keys_when_reading_then_columns_are_the_union() {
    let data = br#"[
        {"Description": "coffee", "Amount": 4.5},
        {"Description": "rent", "Supplier": "ACME"}
    ]"#;
    let table = JsonAdapter.read_table(data).await.unwrap();

    assert_eq!(
        table.columns(),
        &["Description".to_string(), "Amount".to_string(), "Supplier".to_string()]
    );
    assert_eq!(table.cell(0, 2), &CellValue::Empty);
    assert_eq!(table.cell(1, 1), &CellValue::Empty);
}

#[tokio::test]
async fn given_top_level_json_object_when_reading_then_fails_as_malformed() {
    let result = JsonAdapter.read_table(br#"{"Description": "x"}"#).await;
    assert!(matches!(result, Err(TableCodecError::Malformed(_))));
}

#[tokio::test]
async fn given_non_object_json_row_when_reading_then_fails_as_malformed() {
    let result = JsonAdapter.read_table(br#"[1, 2, 3]"#).await;
    assert!(matches!(result, Err(TableCodecError::Malformed(_))));
}

#[tokio::test]
async fn given_json_writer_when_serializing_then_every_row_is_an_object_with_all_keys() {
    let bytes = JsonAdapter.write_table(&typed_table()).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    for record in records {
        let object = record.as_object().unwrap();
        let keys: Vec<&String> = object.keys().collect();
        assert_eq!(keys, vec!["Description", "Amount", "Recurring", "Count"]);
    }
    assert!(records[1].as_object().unwrap()["Count"].is_null());
}

#[tokio::test]
async fn given_factory_codecs_when_round_tripping_then_writer_output_parses_back() {
    let table = text_table();
    for (output, source) in [
        (OutputFormat::Csv, SourceFormat::Csv),
        (OutputFormat::Excel, SourceFormat::Xlsx),
        (OutputFormat::Json, SourceFormat::Json),
    ] {
        let bytes = CodecFactory::writer_for(output)
            .write_table(&table)
            .await
            .unwrap();
        let parsed = CodecFactory::reader_for(source)
            .read_table(&bytes)
            .await
            .unwrap();
        assert_eq!(parsed, table, "round trip failed for {:?}", source);
    }
}
