pub mod config;
pub mod error;

pub use config::{QuoteStyle, ReportPolicy, TokenizerOptions, Untokenizable};
pub use error::TokenizerError;
