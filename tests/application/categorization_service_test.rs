use std::collections::HashMap;
use std::sync::Arc;

use categorizer::application::ports::{
    Classifier, ClassifierError, LabelDecoder, LabelDecoderError,
};
use categorizer::application::services::{CategorizationError, CategorizationService};
use categorizer::domain::{
    COL_DATE, COL_FLAG, COL_MAJOR, COL_MINOR, CellValue, DataTable,
};

struct MockClassifier {
    mapping: HashMap<String, usize>,
}

#[async_trait::async_trait]
impl Classifier for MockClassifier {
    async fn predict_batch(&self, texts: &[String]) -> Result<Vec<usize>, ClassifierError> {
        Ok(texts
            .iter()
            .map(|t| self.mapping.get(t).copied().unwrap_or(0))
            .collect())
    }
}

struct MockDecoder {
    classes: Vec<String>,
}

#[async_trait::async_trait]
impl LabelDecoder for MockDecoder {
    async fn decode_batch(&self, ids: &[usize]) -> Result<Vec<String>, LabelDecoderError> {
        ids.iter()
            .map(|&id| {
                self.classes
                    .get(id)
                    .cloned()
                    .ok_or(LabelDecoderError::UnknownId(id))
            })
            .collect()
    }
}

struct MiscountingClassifier;

#[async_trait::async_trait]
impl Classifier for MiscountingClassifier {
    async fn predict_batch(&self, _texts: &[String]) -> Result<Vec<usize>, ClassifierError> {
        Ok(vec![0])
    }
}

fn ready_service() -> CategorizationService<MockClassifier, MockDecoder> {
    let classifier = MockClassifier {
        mapping: HashMap::from([("coffee shop".to_string(), 0), ("".to_string(), 1)]),
    };
    let decoder = MockDecoder {
        classes: vec![
            "NS | Food | Dining".to_string(),
            "S | Other | Misc".to_string(),
        ],
    };
    CategorizationService::new(Arc::new(classifier), Arc::new(decoder))
}

fn expense_table() -> DataTable {
    let mut table = DataTable::new(vec!["Description".to_string(), "Amount".to_string()]);
    table
        .push_row(vec![
            CellValue::Text("coffee shop".to_string()),
            CellValue::Float(4.5),
        ])
        .unwrap();
    table
        .push_row(vec![CellValue::Empty, CellValue::Float(10.0)])
        .unwrap();
    table
}

#[tokio::test]
async fn given_degraded_service_when_categorizing_then_fails_without_touching_table() {
    let service: CategorizationService<MockClassifier, MockDecoder> =
        CategorizationService::degraded();
    assert!(!service.is_ready());

    let mut table = expense_table();
    let original = table.clone();
    let result = service.categorize(&mut table, "Description").await;

    assert!(matches!(result, Err(CategorizationError::ModelNotReady)));
    assert_eq!(table, original);
}

#[tokio::test]
async fn given_missing_description_column_when_categorizing_then_fails_with_column_not_found() {
    let service = ready_service();
    let mut table = expense_table();
    let result = service.categorize(&mut table, "Libellé").await;
    assert!(matches!(result, Err(CategorizationError::Table(_))));
}

#[tokio::test]
async fn given_blank_prediction_cells_when_categorizing_then_derived_columns_are_filled() {
    let service = ready_service();
    let mut table = expense_table();

    service.categorize(&mut table, "Description").await.unwrap();

    let flag = table.column_index(COL_FLAG).unwrap();
    let major = table.column_index(COL_MAJOR).unwrap();
    let minor = table.column_index(COL_MINOR).unwrap();
    let date = table.column_index(COL_DATE).unwrap();

    assert_eq!(table.cell(0, flag), &CellValue::Text("NS".to_string()));
    assert_eq!(table.cell(0, major), &CellValue::Text("Food".to_string()));
    assert_eq!(table.cell(0, minor), &CellValue::Text("Dining".to_string()));

    // The blank description is classified on its own normalized value.
    assert_eq!(table.cell(1, flag), &CellValue::Text("S".to_string()));
    assert_eq!(table.cell(1, major), &CellValue::Text("Other".to_string()));

    let date_text = table.cell(0, date).coerce_text();
    assert!(chrono::NaiveDate::parse_from_str(&date_text, "%d-%m-%Y").is_ok());
}

#[tokio::test]
async fn given_prefilled_cells_when_categorizing_then_manual_values_are_preserved() {
    let service = ready_service();
    let mut table = DataTable::new(vec![
        "Description".to_string(),
        COL_MAJOR.to_string(),
    ]);
    table
        .push_row(vec![
            CellValue::Text("coffee shop".to_string()),
            CellValue::Text("Groceries".to_string()),
        ])
        .unwrap();

    service.categorize(&mut table, "Description").await.unwrap();

    let major = table.column_index(COL_MAJOR).unwrap();
    assert_eq!(table.cell(0, major), &CellValue::Text("Groceries".to_string()));
}

#[tokio::test]
async fn given_already_categorized_table_when_categorizing_again_then_nothing_changes() {
    let service = ready_service();
    let mut table = expense_table();

    service.categorize(&mut table, "Description").await.unwrap();
    let after_first = table.clone();
    service.categorize(&mut table, "Description").await.unwrap();

    assert_eq!(table, after_first);
}

#[tokio::test]
async fn given_unnormalized_description_when_categorizing_then_column_is_normalized_in_place() {
    let service = ready_service();
    let mut table = DataTable::new(vec!["Description".to_string()]);
    table
        .push_row(vec![CellValue::Text("  Coffee SHOP  ".to_string())])
        .unwrap();

    service.categorize(&mut table, "Description").await.unwrap();

    let idx = table.column_index("Description").unwrap();
    assert_eq!(table.cell(0, idx), &CellValue::Text("coffee shop".to_string()));
}

#[tokio::test]
async fn given_malformed_compound_label_when_categorizing_then_whole_batch_fails() {
    let classifier = MockClassifier {
        mapping: HashMap::new(),
    };
    let decoder = MockDecoder {
        classes: vec!["Food only".to_string()],
    };
    let service = CategorizationService::new(Arc::new(classifier), Arc::new(decoder));

    let mut table = expense_table();
    let result = service.categorize(&mut table, "Description").await;

    assert!(matches!(result, Err(CategorizationError::Label(_))));
    assert!(!table.has_column(COL_FLAG));
}

#[tokio::test]
async fn given_unknown_label_id_when_categorizing_then_fails_with_decoding_error() {
    let classifier = MockClassifier {
        mapping: HashMap::from([("coffee shop".to_string(), 7)]),
    };
    let decoder = MockDecoder {
        classes: vec!["NS | Food | Dining".to_string()],
    };
    let service = CategorizationService::new(Arc::new(classifier), Arc::new(decoder));

    let mut table = expense_table();
    let result = service.categorize(&mut table, "Description").await;

    assert!(matches!(result, Err(CategorizationError::Decoding(_))));
}

#[tokio::test]
async fn given_classifier_returning_wrong_count_when_categorizing_then_fails_with_mismatch() {
    let decoder = MockDecoder {
        classes: vec!["NS | Food | Dining".to_string()],
    };
    let service = CategorizationService::new(Arc::new(MiscountingClassifier), Arc::new(decoder));

    let mut table = expense_table();
    let result = service.categorize(&mut table, "Description").await;

    assert!(matches!(
        result,
        Err(CategorizationError::PredictionMismatch {
            expected: 2,
            got: 1
        })
    ));
}
