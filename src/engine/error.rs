use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenizerError {
    /// The builder was finalized without an input stream.
    #[error("no input stream was supplied to the tokenizer")]
    MissingInput,

    #[error("invalid value '{value}' for option '{option}' (expected one of: {expected})")]
    InvalidOption {
        option: String,
        value: String,
        expected: &'static str,
    },

    /// `next_token` was called after the last token had been produced.
    #[error("token stream is exhausted")]
    Exhausted,

    #[error("I/O error while reading input: {0}")]
    Io(#[from] io::Error),
}

impl TokenizerError {
    pub fn invalid_option(option: &str, value: &str, expected: &'static str) -> Self {
        TokenizerError::InvalidOption {
            option: option.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_message() {
        let err = TokenizerError::invalid_option("quotes", "fancy", "latex, ascii");
        assert_eq!(
            err.to_string(),
            "invalid value 'fancy' for option 'quotes' (expected one of: latex, ascii)"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated");
        let err: TokenizerError = io_err.into();
        assert!(matches!(err, TokenizerError::Io(_)));
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_exhausted_is_distinct_from_missing_input() {
        assert_ne!(
            TokenizerError::Exhausted.to_string(),
            TokenizerError::MissingInput.to_string()
        );
    }
}
