/// Everything the tokenizer knows about one token, handed to a [`TokenFactory`].
///
/// `original_text`, `before` and `after` are only filled in invertible mode.
/// `begin`/`end` are half-open offsets into the source, counted in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParts {
    pub text: String,
    pub original_text: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub begin: usize,
    pub end: usize,
}

/// Token value produced by [`CoreTokenFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Canonical Treebank form (e.g. "-LRB-", "``", "colorful")
    pub text: String,
    /// Verbatim source text (invertible mode)
    pub original_text: Option<String>,
    /// Whitespace preceding the token (invertible mode)
    pub before: Option<String>,
    /// Whitespace following the token (invertible mode); equals the next token's `before`
    pub after: Option<String>,
    pub begin: usize,
    pub end: usize,
}

impl Token {
    /// Original text if tracked, else the canonical text.
    pub fn original(&self) -> &str {
        self.original_text.as_deref().unwrap_or(&self.text)
    }
}

impl From<TokenParts> for Token {
    fn from(parts: TokenParts) -> Self {
        Token {
            text: parts.text,
            original_text: parts.original_text,
            before: parts.before,
            after: parts.after,
            begin: parts.begin,
            end: parts.end,
        }
    }
}

/// Converts the tokenizer's internal view of a token into the caller's type.
///
/// Any `Fn(TokenParts) -> T` closure is a factory, so callers can write
/// `builder.factory(|parts: TokenParts| (parts.text, parts.begin))`.
pub trait TokenFactory {
    type Token;

    fn make_token(&self, parts: TokenParts) -> Self::Token;
}

impl<F, T> TokenFactory for F
where
    F: Fn(TokenParts) -> T,
{
    type Token = T;

    fn make_token(&self, parts: TokenParts) -> T {
        self(parts)
    }
}

/// Builds full [`Token`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreTokenFactory;

impl TokenFactory for CoreTokenFactory {
    type Token = Token;

    fn make_token(&self, parts: TokenParts) -> Token {
        Token::from(parts)
    }
}

/// Keeps only the canonical text.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordFactory;

impl TokenFactory for WordFactory {
    type Token = String;

    fn make_token(&self, parts: TokenParts) -> String {
        parts.text
    }
}
