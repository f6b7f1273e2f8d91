//! Penn Treebank style tokenizer and detokenizer.
//!
//! ```
//! use ptbtok::tokenize_text;
//!
//! let words: Vec<String> = tokenize_text("I can't go.").into_iter().map(|t| t.text).collect();
//! assert_eq!(words, ["I", "ca", "n't", "go", "."]);
//! ```

pub mod engine;
pub mod input;
pub mod lexer;
pub mod logging;
pub mod untok;

pub use engine::{QuoteStyle, TokenizerError, TokenizerOptions};
pub use lexer::{
    tokenize_text, tokenize_text_with, CoreTokenFactory, PtbTokenizer, Token, TokenFactory,
    TokenParts, TokenizerBuilder, WordFactory,
};
pub use untok::{ptb_to_text, untokenize};
