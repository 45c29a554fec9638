/// Upload format, decided by file extension before any row is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Xlsx,
    Json,
}

impl SourceFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit_once('.').map(|(_, e)| e.to_lowercase())?;
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "txt" => Some(Self::Tsv),
            "xlsx" | "xls" => Some(Self::Xlsx),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Requested download format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Excel,
    Csv,
    Json,
}

impl OutputFormat {
    /// Unknown tokens fall back to Excel, matching the form's default.
    pub fn from_token(token: &str) -> Self {
        match token {
            "csv" => Self::Csv,
            "json" => Self::Json,
            _ => Self::Excel,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}
