mod codec_factory;
mod delimited_adapter;
mod json_adapter;
mod xlsx_adapter;

pub use codec_factory::CodecFactory;
pub use delimited_adapter::DelimitedAdapter;
pub use json_adapter::JsonAdapter;
pub use xlsx_adapter::XlsxAdapter;
