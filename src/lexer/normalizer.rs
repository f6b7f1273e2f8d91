use crate::engine::{QuoteStyle, TokenizerOptions};
use crate::lexer::americanize::americanize;
use crate::lexer::rules::{self, is_apostrophe, Action, QuoteDirection, Rule};
use crate::lexer::scanner::Lexeme;

/// One output token before whitespace is attached.
///
/// The `original` fields of the pieces cut from a lexeme concatenate back
/// to the lexeme's text, and their offsets tile its span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub text: String,
    pub original: String,
    pub begin: usize,
    pub end: usize,
}

const VULGAR_FRACTIONS: &[(char, &str)] = &[
    ('\u{BC}', "1/4"),
    ('\u{BD}', "1/2"),
    ('\u{BE}', "3/4"),
    ('\u{2150}', "1/7"),
    ('\u{2151}', "1/9"),
    ('\u{2152}', "1/10"),
    ('\u{2153}', "1/3"),
    ('\u{2154}', "2/3"),
    ('\u{2155}', "1/5"),
    ('\u{2156}', "2/5"),
    ('\u{2157}', "3/5"),
    ('\u{2158}', "4/5"),
    ('\u{2159}', "1/6"),
    ('\u{215A}', "5/6"),
    ('\u{215B}', "1/8"),
    ('\u{215C}', "3/8"),
    ('\u{215D}', "5/8"),
    ('\u{215E}', "7/8"),
];

/// Turns lexemes into Treebank-form pieces according to the options.
#[derive(Debug, Clone)]
pub struct Normalizer {
    options: TokenizerOptions,
}

impl Normalizer {
    pub fn new(options: TokenizerOptions) -> Self {
        Self { options }
    }

    pub fn normalize(&self, lexeme: &Lexeme) -> Vec<Piece> {
        match &lexeme.action {
            Action::Split(cuts) => self.split(lexeme, cuts),
            Action::SentenceFinal => self.sentence_final(lexeme),
            Action::Quote(direction) => vec![Piece {
                text: self.quote(&lexeme.text, *direction),
                original: lexeme.text.clone(),
                begin: lexeme.begin,
                end: lexeme.end,
            }],
            Action::Emit | Action::Untokenizable => vec![Piece {
                text: self.canonical(lexeme.rule, &lexeme.text),
                original: lexeme.text.clone(),
                begin: lexeme.begin,
                end: lexeme.end,
            }],
        }
    }

    fn split(&self, lexeme: &Lexeme, cuts: &[usize]) -> Vec<Piece> {
        let mut pieces = Vec::with_capacity(cuts.len() + 1);
        let mut start = 0;
        let mut begin = lexeme.begin;
        for &cut in cuts.iter().chain(std::iter::once(&lexeme.text.len())) {
            let original = &lexeme.text[start..cut];
            let end = begin + original.chars().count();
            pieces.push(Piece {
                text: self.word(original),
                original: original.to_string(),
                begin,
                end,
            });
            start = cut;
            begin = end;
        }
        pieces
    }

    /// "Corp." at a sentence end: "Corp." (or "Corp" when strict) plus ".".
    fn sentence_final(&self, lexeme: &Lexeme) -> Vec<Piece> {
        let stem = &lexeme.text[..lexeme.text.len() - 1];
        // U.S. keeps its period even under strict Treebank 3
        let text = if self.options.strict_treebank3 && stem != "U.S" {
            stem.to_string()
        } else {
            lexeme.text.clone()
        };
        vec![
            Piece {
                text,
                original: stem.to_string(),
                begin: lexeme.begin,
                end: lexeme.end - 1,
            },
            Piece {
                text: ".".to_string(),
                original: ".".to_string(),
                begin: lexeme.end - 1,
                end: lexeme.end,
            },
        ]
    }

    fn canonical(&self, rule: Rule, text: &str) -> String {
        let options = &self.options;
        match rule {
            Rule::Word => self.word(text),
            Rule::Contraction | Rule::LeadingApostrophe => self.apostrophes(text),
            Rule::AmpersandWord if options.normalize_ampersand_entity => text.replace("&amp;", "&"),
            Rule::Bracket | Rule::Smiley | Rule::AsianSmiley => self.escape_brackets(text),
            Rule::Dashes => self.dashes(text),
            Rule::SoftHyphen => "-".to_string(),
            Rule::Ellipsis => self.ellipsis(text),
            Rule::Currency if options.normalize_currency => normalize_currency(text),
            Rule::Fraction => self.fraction(text),
            Rule::Entity if options.normalize_ampersand_entity => decode_entity(text),
            Rule::Url | Rule::Email | Rule::Symbol => self.escape_slash_asterisk(text),
            Rule::Newline => "*NL*".to_string(),
            _ => text.to_string(),
        }
    }

    fn word(&self, text: &str) -> String {
        let joined: String = text
            .chars()
            .filter(|&c| c != '\u{AD}' && !rules::is_joiner(c))
            .collect();
        let word = if self.options.americanize {
            americanize(&joined).into_owned()
        } else {
            joined
        };
        self.apostrophes(&word)
    }

    fn apostrophes(&self, text: &str) -> String {
        match self.options.quotes {
            QuoteStyle::Latex | QuoteStyle::Ascii => text
                .chars()
                .map(|c| if is_apostrophe(c) { '\'' } else { c })
                .collect(),
            QuoteStyle::Unicode | QuoteStyle::Original => text.to_string(),
        }
    }

    fn bracket(&self, c: char) -> Option<&'static str> {
        let parens = self.options.normalize_parentheses;
        let others = self.options.normalize_other_brackets;
        match c {
            '(' if parens => Some("-LRB-"),
            ')' if parens => Some("-RRB-"),
            '[' if others => Some("-LSB-"),
            ']' if others => Some("-RSB-"),
            '{' if others => Some("-LCB-"),
            '}' if others => Some("-RCB-"),
            _ => None,
        }
    }

    /// Brackets inside emoticons are escaped too: ";-)" becomes ";--RRB-".
    fn escape_brackets(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match self.bracket(c) {
                Some(escaped) => out.push_str(escaped),
                None => out.push(c),
            }
        }
        out
    }

    fn dashes(&self, text: &str) -> String {
        if text == "-" {
            text.to_string()
        } else if text.starts_with('-') || self.options.ptb3_dashes {
            "--".to_string()
        } else {
            text.to_string()
        }
    }

    fn ellipsis(&self, text: &str) -> String {
        if self.options.unicode_ellipsis {
            "\u{2026}".to_string()
        } else if text.starts_with('.') || self.options.ptb3_ellipsis {
            "...".to_string()
        } else {
            text.to_string()
        }
    }

    fn fraction(&self, text: &str) -> String {
        let text = if self.options.normalize_fractions {
            let mut out = String::new();
            for c in text.chars() {
                match VULGAR_FRACTIONS.iter().find(|(v, _)| *v == c) {
                    Some((_, ascii)) => out.push_str(ascii),
                    None if c == '\u{2044}' => out.push('/'),
                    None => out.push(c),
                }
            }
            out
        } else {
            text.to_string()
        };
        self.escape_slash_asterisk(&text)
    }

    fn escape_slash_asterisk(&self, text: &str) -> String {
        if !self.options.escape_forward_slash_asterisk {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c == '/' || c == '*' {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    fn quote(&self, text: &str, direction: QuoteDirection) -> String {
        let double = matches!(
            text,
            "\"" | "``" | "''" | "\u{201C}" | "\u{201D}" | "\u{201E}"
        );
        let open = direction == QuoteDirection::Open;
        let rendered = match (self.options.quotes, double, open) {
            (QuoteStyle::Original, _, _) => return text.to_string(),
            (QuoteStyle::Latex, true, true) => "``",
            (QuoteStyle::Latex, true, false) => "''",
            (QuoteStyle::Latex, false, true) => "`",
            (QuoteStyle::Latex, false, false) => "'",
            (QuoteStyle::Ascii, true, _) => "\"",
            (QuoteStyle::Ascii, false, _) => "'",
            (QuoteStyle::Unicode, true, true) => "\u{201C}",
            (QuoteStyle::Unicode, true, false) => "\u{201D}",
            (QuoteStyle::Unicode, false, true) => "\u{2018}",
            (QuoteStyle::Unicode, false, false) => "\u{2019}",
        };
        rendered.to_string()
    }
}

/// £ to #, ¢ to cents, any other single currency sign to $.
fn normalize_currency(text: &str) -> String {
    match text {
        "\u{A3}" => "#".to_string(),
        "\u{A2}" => "cents".to_string(),
        _ if text.ends_with('$') => text.to_string(),
        _ => "$".to_string(),
    }
}

/// Entities that would decode to whitespace or an untokenizable character
/// stay as written, so the token keeps visible text.
fn decode_entity(text: &str) -> String {
    let name = &text[1..text.len() - 1];
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{A0}'),
        _ => {
            let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => name.strip_prefix('#').and_then(|dec| dec.parse().ok()),
            };
            code.and_then(char::from_u32)
        }
    };
    match decoded {
        Some(c) if !c.is_whitespace() && !rules::is_untokenizable(c) => c.to_string(),
        _ => text.to_string(),
    }
}
