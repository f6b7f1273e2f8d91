pub mod abbrev;
pub mod americanize;
pub mod normalizer;
pub mod rules;
pub mod scanner;
pub mod token;
pub mod tokenizer;

pub use americanize::americanize;
pub use token::{CoreTokenFactory, Token, TokenFactory, TokenParts, WordFactory};
pub use tokenizer::{tokenize_text, tokenize_text_with, PtbTokenizer, TokenizerBuilder};
