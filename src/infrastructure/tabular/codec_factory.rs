use std::sync::Arc;

use crate::application::ports::{TableReader, TableWriter};
use crate::domain::{OutputFormat, SourceFormat};

use super::delimited_adapter::DelimitedAdapter;
use super::json_adapter::JsonAdapter;
use super::xlsx_adapter::XlsxAdapter;

/// Maps a resolved format to its codec. Extension validation happens
/// earlier, in the handler, so construction is infallible.
pub struct CodecFactory;

impl CodecFactory {
    pub fn reader_for(format: SourceFormat) -> Arc<dyn TableReader> {
        match format {
            SourceFormat::Csv => Arc::new(DelimitedAdapter::comma()),
            SourceFormat::Tsv => Arc::new(DelimitedAdapter::tab()),
            SourceFormat::Xlsx => Arc::new(XlsxAdapter),
            SourceFormat::Json => Arc::new(JsonAdapter),
        }
    }

    pub fn writer_for(format: OutputFormat) -> Arc<dyn TableWriter> {
        match format {
            OutputFormat::Excel => Arc::new(XlsxAdapter),
            OutputFormat::Csv => Arc::new(DelimitedAdapter::comma()),
            OutputFormat::Json => Arc::new(JsonAdapter),
        }
    }
}
