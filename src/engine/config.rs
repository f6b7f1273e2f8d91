// Configuration for the tokenizer
// Resolved once at construction; defaults follow the Penn Treebank 3 conventions

use std::str::FromStr;

use tracing::debug;

use crate::engine::error::TokenizerError;

/// How quote characters are rendered in token text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// `` and '' for double quotes, ` and ' for single quotes
    #[default]
    Latex,
    /// " and '
    Ascii,
    /// Curly quotes: “ ” ‘ ’
    Unicode,
    /// Leave the source character untouched
    Original,
}

impl QuoteStyle {
    const EXPECTED: &'static str = "latex, ascii, unicode, original";

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "latex" => Some(QuoteStyle::Latex),
            "ascii" => Some(QuoteStyle::Ascii),
            "unicode" => Some(QuoteStyle::Unicode),
            "original" | "no" => Some(QuoteStyle::Original),
            _ => None,
        }
    }
}

/// Policy for characters no rule can sensibly tokenize (control characters, U+FFFD).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Untokenizable {
    /// Which occurrences are reported through `tracing::warn!`
    pub report: ReportPolicy,
    /// Keep the character as a one-character token, or delete it
    pub keep: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPolicy {
    None,
    First,
    All,
}

impl Default for Untokenizable {
    fn default() -> Self {
        Self {
            report: ReportPolicy::First,
            keep: true,
        }
    }
}

impl Untokenizable {
    const EXPECTED: &'static str =
        "noneDelete, firstDelete, allDelete, noneKeep, firstKeep, allKeep";

    fn parse(value: &str) -> Option<Self> {
        let (report, keep) = match value {
            "noneDelete" => (ReportPolicy::None, false),
            "firstDelete" => (ReportPolicy::First, false),
            "allDelete" => (ReportPolicy::All, false),
            "noneKeep" => (ReportPolicy::None, true),
            "firstKeep" => (ReportPolicy::First, true),
            "allKeep" => (ReportPolicy::All, true),
            _ => return None,
        };
        Some(Self { report, keep })
    }
}

/// Tokenizer options. Every field maps to one entry of the option string
/// accepted by [`TokenizerOptions::parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizerOptions {
    /// Track original text, surrounding whitespace and offsets (default false)
    pub invertible: bool,

    /// Emit line breaks as `*NL*` tokens (default false)
    pub tokenize_newlines: bool,

    /// Strict Treebank-3 handling of sentence-final abbreviations (default false)
    pub strict_treebank3: bool,

    /// British to American spelling in token text (default true)
    pub americanize: bool,

    /// ( ) to -LRB- -RRB- (default true)
    pub normalize_parentheses: bool,
    /// [ ] { } to -LSB- -RSB- -LCB- -RCB- (default true)
    pub normalize_other_brackets: bool,

    /// &amp; and friends decoded in token text (default true)
    pub normalize_ampersand_entity: bool,
    /// £ to #, other currency signs to $, ¢ to cents (default true)
    pub normalize_currency: bool,
    /// ½ to 1/2 (default true)
    pub normalize_fractions: bool,

    pub ptb3_ellipsis: bool,   // default true: … to ...
    pub unicode_ellipsis: bool, // default false: ... to …
    pub ptb3_dashes: bool,     // default true: en/em dashes to --

    /// gonna, wanna, gimme, gotta, lemme, cannot split in two (default true)
    pub split_assimilations: bool,

    /// / to \/ and * to \* as in the original Treebank release (default false)
    pub escape_forward_slash_asterisk: bool,

    /// Pass tag-like lines such as <P> or </HEADLINE> through as single tokens (default true)
    pub sgml_tags: bool,

    pub quotes: QuoteStyle,
    pub untokenizable: Untokenizable,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            invertible: false,
            tokenize_newlines: false,
            strict_treebank3: false,
            americanize: true,
            normalize_parentheses: true,
            normalize_other_brackets: true,
            normalize_ampersand_entity: true,
            normalize_currency: true,
            normalize_fractions: true,
            ptb3_ellipsis: true,
            unicode_ellipsis: false,
            ptb3_dashes: true,
            split_assimilations: true,
            escape_forward_slash_asterisk: false,
            sgml_tags: true,
            quotes: QuoteStyle::Latex,
            untokenizable: Untokenizable::default(),
        }
    }
}

impl TokenizerOptions {
    fn set_ptb3_escaping(&mut self, on: bool) {
        self.americanize = on;
        self.normalize_parentheses = on;
        self.normalize_other_brackets = on;
        self.normalize_ampersand_entity = on;
        self.normalize_currency = on;
        self.normalize_fractions = on;
        self.ptb3_ellipsis = on;
        self.ptb3_dashes = on;
        self.quotes = if on {
            QuoteStyle::Latex
        } else {
            QuoteStyle::Original
        };
    }

    /// Parses a comma-separated option string such as
    /// `"invertible,strictTreebank3,quotes=ascii,americanize=false"`.
    ///
    /// A bare name means `true`. Unknown names are ignored; an unknown value
    /// for an enum-typed option is an error. Entries apply left to right, so
    /// `ptb3Escaping=false,americanize` re-enables americanization.
    pub fn parse(text: &str) -> Result<Self, TokenizerError> {
        let mut options = Self::default();
        for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, value) = match entry.split_once('=') {
                Some((name, value)) => (name.trim(), Some(value.trim())),
                None => (entry, None),
            };
            options.apply(name, value)?;
        }
        Ok(options)
    }

    fn apply(&mut self, name: &str, value: Option<&str>) -> Result<(), TokenizerError> {
        let flag = value.map_or(true, |v| v.eq_ignore_ascii_case("true"));
        match name {
            "invertible" => self.invertible = flag,
            "tokenizeNLs" => self.tokenize_newlines = flag,
            "strictTreebank3" => self.strict_treebank3 = flag,
            "americanize" => self.americanize = flag,
            "normalizeParentheses" => self.normalize_parentheses = flag,
            "normalizeOtherBrackets" => self.normalize_other_brackets = flag,
            "normalizeAmpersandEntity" => self.normalize_ampersand_entity = flag,
            "normalizeCurrency" => self.normalize_currency = flag,
            "normalizeFractions" => self.normalize_fractions = flag,
            "ptb3Ellipsis" => self.ptb3_ellipsis = flag,
            "unicodeEllipsis" => self.unicode_ellipsis = flag,
            "ptb3Dashes" => self.ptb3_dashes = flag,
            "splitAssimilations" => self.split_assimilations = flag,
            "escapeForwardSlashAsterisk" => self.escape_forward_slash_asterisk = flag,
            "sgmlTags" => self.sgml_tags = flag,
            "ptb3Escaping" => self.set_ptb3_escaping(flag),
            "latexQuotes" => self.set_quote_flag(QuoteStyle::Latex, flag),
            "asciiQuotes" => self.set_quote_flag(QuoteStyle::Ascii, flag),
            "unicodeQuotes" => self.set_quote_flag(QuoteStyle::Unicode, flag),
            "quotes" => {
                let value = value.unwrap_or_default();
                self.quotes = QuoteStyle::parse(value).ok_or_else(|| {
                    TokenizerError::invalid_option(name, value, QuoteStyle::EXPECTED)
                })?;
            }
            "untokenizable" => {
                let value = value.unwrap_or_default();
                self.untokenizable = Untokenizable::parse(value).ok_or_else(|| {
                    TokenizerError::invalid_option(name, value, Untokenizable::EXPECTED)
                })?;
            }
            _ => debug!(option = name, "ignoring unknown tokenizer option"),
        }
        Ok(())
    }

    fn set_quote_flag(&mut self, style: QuoteStyle, on: bool) {
        if on {
            self.quotes = style;
        } else if self.quotes == style {
            self.quotes = QuoteStyle::Original;
        }
    }
}

impl FromStr for TokenizerOptions {
    type Err = TokenizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_gives_defaults() {
        assert_eq!(TokenizerOptions::parse("").unwrap(), TokenizerOptions::default());
    }

    #[test]
    fn test_bare_names_enable_flags() {
        let options = TokenizerOptions::parse("invertible, strictTreebank3").unwrap();
        assert!(options.invertible);
        assert!(options.strict_treebank3);
        assert!(!options.tokenize_newlines);
    }

    #[test]
    fn test_explicit_false() {
        let options = TokenizerOptions::parse("americanize=false").unwrap();
        assert!(!options.americanize);
    }

    #[test]
    fn test_unknown_flags_are_ignored() {
        let options = TokenizerOptions::parse("invertible,noSuchOption,alsoUnknown=3").unwrap();
        assert!(options.invertible);
    }

    #[test]
    fn test_quote_style_values() {
        let options = TokenizerOptions::parse("quotes=ascii").unwrap();
        assert_eq!(options.quotes, QuoteStyle::Ascii);
        let options = TokenizerOptions::parse("unicodeQuotes").unwrap();
        assert_eq!(options.quotes, QuoteStyle::Unicode);
    }

    #[test]
    fn test_bad_enum_value_is_rejected() {
        let result = TokenizerOptions::parse("quotes=fancy");
        assert!(matches!(
            result,
            Err(TokenizerError::InvalidOption { ref option, .. }) if option == "quotes"
        ));
        assert!(TokenizerOptions::parse("untokenizable=sometimes").is_err());
    }

    #[test]
    fn test_untokenizable_policy() {
        let options = TokenizerOptions::parse("untokenizable=allDelete").unwrap();
        assert_eq!(options.untokenizable.report, ReportPolicy::All);
        assert!(!options.untokenizable.keep);
    }

    #[test]
    fn test_ptb3_escaping_off_then_back_on_for_one_flag() {
        let options = TokenizerOptions::parse("ptb3Escaping=false,americanize").unwrap();
        assert!(options.americanize);
        assert!(!options.normalize_parentheses);
        assert_eq!(options.quotes, QuoteStyle::Original);
    }

    #[test]
    fn test_from_str() {
        let options: TokenizerOptions = "tokenizeNLs".parse().unwrap();
        assert!(options.tokenize_newlines);
    }
}
