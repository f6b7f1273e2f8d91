use std::collections::VecDeque;
use std::io::Read;

use tracing::debug;

use crate::engine::{TokenizerError, TokenizerOptions};
use crate::input::Source;
use crate::lexer::normalizer::Normalizer;
use crate::lexer::scanner::Scanner;
use crate::lexer::token::{CoreTokenFactory, Token, TokenFactory, TokenParts};

/// Penn Treebank tokenizer over a character stream.
///
/// Tokens are produced lazily, one lexeme ahead of the caller. Use
/// [`PtbTokenizer::builder`] to construct one, then either pull with
/// [`has_next`](Self::has_next)/[`next_token`](Self::next_token), iterate,
/// or collect everything with [`tokenize`](Self::tokenize).
#[derive(Debug)]
pub struct PtbTokenizer<F: TokenFactory = CoreTokenFactory> {
    scanner: Scanner,
    normalizer: Normalizer,
    factory: F,
    invertible: bool,
    pending: VecDeque<TokenParts>,
    error: Option<TokenizerError>,
    finished: bool,
}

impl PtbTokenizer<CoreTokenFactory> {
    pub fn builder() -> TokenizerBuilder<CoreTokenFactory> {
        TokenizerBuilder::new()
    }
}

impl<F: TokenFactory> PtbTokenizer<F> {
    pub fn new(source: Source, factory: F, options: TokenizerOptions) -> Self {
        debug!(?options, "tokenizer created");
        Self {
            invertible: options.invertible,
            normalizer: Normalizer::new(options.clone()),
            scanner: Scanner::new(source, options),
            factory,
            pending: VecDeque::new(),
            error: None,
            finished: false,
        }
    }

    /// True while a token (or a pending read error) remains.
    pub fn has_next(&mut self) -> bool {
        if self.pending.is_empty() {
            self.refill();
        }
        !self.pending.is_empty() || self.error.is_some()
    }

    /// The next token. After the last one this returns
    /// [`TokenizerError::Exhausted`]; a read error is returned once, in
    /// place of the token that could not be read.
    pub fn next_token(&mut self) -> Result<F::Token, TokenizerError> {
        if self.pending.is_empty() {
            self.refill();
        }
        if let Some(parts) = self.pending.pop_front() {
            return Ok(self.factory.make_token(parts));
        }
        match self.error.take() {
            Some(err) => {
                self.finished = true;
                Err(err)
            }
            None => Err(TokenizerError::Exhausted),
        }
    }

    /// Drains the stream into a vector, stopping at the first read error.
    pub fn tokenize(mut self) -> Result<Vec<F::Token>, TokenizerError> {
        let mut tokens = Vec::new();
        while self.has_next() {
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    fn refill(&mut self) {
        if self.finished || self.error.is_some() {
            return;
        }
        let lexeme = match self.scanner.next_lexeme() {
            Ok(Some(lexeme)) => lexeme,
            Ok(None) => {
                self.finished = true;
                return;
            }
            Err(err) => {
                self.error = Some(err.into());
                return;
            }
        };

        let pieces = self.normalizer.normalize(&lexeme);
        let after = match self.scanner.skip_whitespace() {
            Ok(whitespace) => whitespace.to_string(),
            Err(err) => {
                self.error = Some(err.into());
                String::new()
            }
        };

        let last = pieces.len().saturating_sub(1);
        for (i, piece) in pieces.into_iter().enumerate() {
            let (original_text, before, after) = if self.invertible {
                let before = if i == 0 { lexeme.before.clone() } else { String::new() };
                let after = if i == last { after.clone() } else { String::new() };
                (Some(piece.original), Some(before), Some(after))
            } else {
                (None, None, None)
            };
            self.pending.push_back(TokenParts {
                text: piece.text,
                original_text,
                before,
                after,
                begin: piece.begin,
                end: piece.end,
            });
        }
    }
}

impl<F: TokenFactory> Iterator for PtbTokenizer<F> {
    type Item = Result<F::Token, TokenizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            Some(self.next_token())
        } else {
            None
        }
    }
}

/// Assembles a [`PtbTokenizer`] from an input, options and a token factory.
pub struct TokenizerBuilder<F: TokenFactory = CoreTokenFactory> {
    source: Option<Source>,
    options: TokenizerOptions,
    factory: F,
}

impl TokenizerBuilder<CoreTokenFactory> {
    pub fn new() -> Self {
        Self {
            source: None,
            options: TokenizerOptions::default(),
            factory: CoreTokenFactory,
        }
    }
}

impl Default for TokenizerBuilder<CoreTokenFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TokenFactory> TokenizerBuilder<F> {
    pub fn text(mut self, text: &str) -> Self {
        self.source = Some(Source::from_text(text));
        self
    }

    pub fn reader<R: Read + 'static>(mut self, reader: R) -> Self {
        self.source = Some(Source::from_reader(reader));
        self
    }

    pub fn source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    pub fn options(mut self, options: TokenizerOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses an option string; see [`TokenizerOptions::parse`].
    pub fn option_string(self, text: &str) -> Result<Self, TokenizerError> {
        Ok(self.options(TokenizerOptions::parse(text)?))
    }

    pub fn factory<G: TokenFactory>(self, factory: G) -> TokenizerBuilder<G> {
        TokenizerBuilder {
            source: self.source,
            options: self.options,
            factory,
        }
    }

    pub fn build(self) -> Result<PtbTokenizer<F>, TokenizerError> {
        let source = self.source.ok_or(TokenizerError::MissingInput)?;
        Ok(PtbTokenizer::new(source, self.factory, self.options))
    }
}

/// Tokenizes in-memory text with default options.
pub fn tokenize_text(text: &str) -> Vec<Token> {
    tokenize_text_with(text, TokenizerOptions::default())
}

/// Tokenizes in-memory text. Reading from memory cannot fail, so every
/// item of the stream is a token.
pub fn tokenize_text_with(text: &str, options: TokenizerOptions) -> Vec<Token> {
    PtbTokenizer::new(Source::from_text(text), CoreTokenFactory, options)
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::WordFactory;
    use std::io::{self, Cursor};

    fn words(text: &str) -> Vec<String> {
        PtbTokenizer::builder()
            .text(text)
            .factory(WordFactory)
            .build()
            .unwrap()
            .tokenize()
            .unwrap()
    }

    #[test]
    fn test_simple_sentence() {
        assert_eq!(words("This is a sentence."), vec!["This", "is", "a", "sentence", "."]);
    }

    #[test]
    fn test_build_without_input_fails() {
        let result = PtbTokenizer::builder().build();
        assert!(matches!(result, Err(TokenizerError::MissingInput)));
    }

    #[test]
    fn test_exhausted_after_last_token() {
        let mut tokenizer = PtbTokenizer::builder().text("Hi").build().unwrap();
        assert!(tokenizer.has_next());
        assert_eq!(tokenizer.next_token().unwrap().text, "Hi");
        assert!(!tokenizer.has_next());
        assert!(matches!(tokenizer.next_token(), Err(TokenizerError::Exhausted)));
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(words("").is_empty());
        assert!(words("   \n\t ").is_empty());
    }

    #[test]
    fn test_closure_factory() {
        let tokens = PtbTokenizer::builder()
            .text("a b")
            .factory(|parts: TokenParts| (parts.text, parts.begin, parts.end))
            .build()
            .unwrap()
            .tokenize()
            .unwrap();
        assert_eq!(tokens, vec![("a".to_string(), 0, 1), ("b".to_string(), 2, 3)]);
    }

    #[test]
    fn test_non_invertible_leaves_whitespace_empty() {
        let tokens = tokenize_text(" word ");
        assert_eq!(tokens[0].before, None);
        assert_eq!(tokens[0].original_text, None);
        assert_eq!((tokens[0].begin, tokens[0].end), (1, 5));
    }

    #[test]
    fn test_split_pieces_share_whitespace_correctly() {
        let options = TokenizerOptions::parse("invertible").unwrap();
        let tokens = tokenize_text_with(" it's ", options);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].before.as_deref(), Some(" "));
        assert_eq!(tokens[0].after.as_deref(), Some(""));
        assert_eq!(tokens[1].before.as_deref(), Some(""));
        assert_eq!(tokens[1].after.as_deref(), Some(" "));
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "disk went away"));
            }
            self.served = true;
            let line = b"first line\n";
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    #[test]
    fn test_read_error_is_reported_once() {
        let mut tokenizer = PtbTokenizer::builder()
            .reader(FailingReader { served: false })
            .build()
            .unwrap();
        let results: Vec<_> = tokenizer.by_ref().collect();
        assert!(matches!(results.last(), Some(Err(TokenizerError::Io(_)))));
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_reader_input() {
        let tokens = PtbTokenizer::builder()
            .reader(Cursor::new("Hello,\nworld!\n"))
            .factory(WordFactory)
            .build()
            .unwrap()
            .tokenize()
            .unwrap();
        assert_eq!(tokens, vec!["Hello", ",", "world", "!"]);
    }
}
