use categorizer::domain::{CategoryError, CategoryLabel};

#[test]
fn given_well_formed_compound_when_parsing_then_splits_into_three_segments() {
    let label = CategoryLabel::parse("NS | Food | Dining").unwrap();
    assert_eq!(label.flag, "NS");
    assert_eq!(label.major, "Food");
    assert_eq!(label.minor, "Dining");
}

#[test]
fn given_multibyte_segments_when_parsing_then_values_survive_intact() {
    let label = CategoryLabel::parse("NS | Café | Dîner").unwrap();
    assert_eq!(label.major, "Café");
    assert_eq!(label.minor, "Dîner");
}

#[test]
fn given_one_separator_when_parsing_then_fails_with_segment_count() {
    assert_eq!(
        CategoryLabel::parse("NS | Food"),
        Err(CategoryError::MalformedLabel {
            label: "NS | Food".to_string(),
            parts: 2
        })
    );
}

#[test]
fn given_three_separators_when_parsing_then_fails_instead_of_truncating() {
    assert_eq!(
        CategoryLabel::parse("NS | Food | Dining | Extra"),
        Err(CategoryError::MalformedLabel {
            label: "NS | Food | Dining | Extra".to_string(),
            parts: 4
        })
    );
}

#[test]
fn given_plain_string_when_parsing_then_fails() {
    assert!(CategoryLabel::parse("Food").is_err());
}

#[test]
fn given_parsed_label_when_rebuilding_compound_then_round_trips() {
    let compound = "S | Housing | Rent";
    let label = CategoryLabel::parse(compound).unwrap();
    assert_eq!(label.compound(), compound);
}
