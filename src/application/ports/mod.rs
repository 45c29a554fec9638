mod classifier;
mod label_decoder;
mod table_codec;

pub use classifier::{Classifier, ClassifierError};
pub use label_decoder::{LabelDecoder, LabelDecoderError};
pub use table_codec::{TableCodecError, TableReader, TableWriter};
