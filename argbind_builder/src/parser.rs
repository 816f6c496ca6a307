mod base;
mod error;
mod interface;
mod printer;
mod tokenizer;

pub(crate) use base::*;
pub use error::*;
pub(crate) use interface::*;
pub(crate) use printer::*;
pub use tokenizer::*;
