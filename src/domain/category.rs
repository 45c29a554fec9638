/// Column names the predictor writes into a table.
pub const COL_FLAG: &str = "S/NS";
pub const COL_MAJOR: &str = "Major Category";
pub const COL_MINOR: &str = "Minor Category";
pub const COL_DATE: &str = "Date";

pub const PREDICTION_COLUMNS: [&str; 4] = [COL_FLAG, COL_MAJOR, COL_MINOR, COL_DATE];

/// Separator used inside a compound label string.
pub const LABEL_SEPARATOR: &str = " | ";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CategoryError {
    #[error("malformed compound label {label:?}: expected 3 segments, found {parts}")]
    MalformedLabel { label: String, parts: usize },
}

/// The three category dimensions encoded in one compound label string,
/// e.g. `"NS | Food | Dining"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLabel {
    pub flag: String,
    pub major: String,
    pub minor: String,
}

impl CategoryLabel {
    /// Parse a compound label. The shape is exactly three segments joined
    /// by `" | "`; anything else fails rather than silently truncating.
    pub fn parse(compound: &str) -> Result<Self, CategoryError> {
        let parts: Vec<&str> = compound.split(LABEL_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(CategoryError::MalformedLabel {
                label: compound.to_string(),
                parts: parts.len(),
            });
        }
        Ok(Self {
            flag: parts[0].to_string(),
            major: parts[1].to_string(),
            minor: parts[2].to_string(),
        })
    }

    pub fn compound(&self) -> String {
        [self.flag.as_str(), self.major.as_str(), self.minor.as_str()].join(LABEL_SEPARATOR)
    }
}

/// Derived values for one row: the decoded label plus the processing
/// date, formatted `DD-MM-YYYY`.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: CategoryLabel,
    pub date: String,
}
