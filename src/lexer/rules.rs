//! The lexical rule table.
//!
//! Every rule is tried at the cursor; the longest match wins and ties go to
//! the rule listed first in [`PRECEDENCE`]. Patterns are anchored regexes.
//! Conditions on the text after a match (what the `regex` crate cannot
//! express as lookahead) are checked in code against the buffered remainder.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::engine::TokenizerOptions;
use crate::lexer::abbrev::{self, AbbrevClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    SgmlTag,
    Url,
    Email,
    Escape,
    AsianSmiley,
    Smiley,
    Abbreviation,
    Contraction,
    LeadingApostrophe,
    Currency,
    Number,
    Fraction,
    Acronym,
    AmpersandWord,
    Word,
    Ellipsis,
    Dashes,
    SoftHyphen,
    Quote,
    Bracket,
    SentencePunct,
    Entity,
    Symbol,
    /// Line break under `tokenizeNLs`; produced by the scanner, never matched here
    Newline,
}

pub const PRECEDENCE: [Rule; 23] = [
    Rule::SgmlTag,
    Rule::Url,
    Rule::Email,
    Rule::Escape,
    Rule::AsianSmiley,
    Rule::Smiley,
    Rule::Abbreviation,
    Rule::Contraction,
    Rule::LeadingApostrophe,
    Rule::Currency,
    Rule::Number,
    Rule::Fraction,
    Rule::Acronym,
    Rule::AmpersandWord,
    Rule::Word,
    Rule::Ellipsis,
    Rule::Dashes,
    Rule::SoftHyphen,
    Rule::Quote,
    Rule::Bracket,
    Rule::SentencePunct,
    Rule::Entity,
    Rule::Symbol,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteDirection {
    Open,
    Close,
}

/// What the normalizer does with a matched lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// One token
    Emit,
    /// Several tokens, cut at these byte offsets into the lexeme
    Split(Vec<usize>),
    /// Abbreviation ending a sentence: the period is repeated as its own token
    SentenceFinal,
    Quote(QuoteDirection),
    /// A character no rule covers (control character, U+FFFD)
    Untokenizable,
}

/// What a rule may look at besides the text under the cursor.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    /// Character just before the cursor, whitespace included
    pub prev: Option<char>,
    /// The remainder passed to [`match_at`] runs to the end of the input
    pub at_end_of_input: bool,
    pub options: &'a TokenizerOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: Rule,
    /// Matched length in bytes
    pub len: usize,
    pub action: Action,
}

lazy_static! {
    static ref SGML_TAG: Regex = Regex::new(r"^</?[A-Za-z!?][^<>\r\n]*>").unwrap();
    static ref URL: Regex = Regex::new(
        r#"^(?:(?:https?|ftp)://|www\.)[^\s<>"]*[^\s<>".,;:!?'\x{2019})\]}]"#
    )
    .unwrap();
    static ref EMAIL: Regex = Regex::new(r"^[\w.+-]+@[\w-]+(?:\.[\w-]+)+").unwrap();
    static ref ESCAPE: Regex = Regex::new(r"^-(?:LRB|RRB|LSB|RSB|LCB|RCB)-").unwrap();
    static ref ASIAN_SMILEY: Regex = Regex::new(
        r"^(?:[\^x=~<>]\.[\^x=~<>]|[\-\^x=~<>']_[\-\^x=~<>']|\([\-\^x=~<>'][_.]?[\-\^x=~<>']\))"
    )
    .unwrap();
    static ref SMILEY: Regex = Regex::new(r"^[<>]?[:;=][\-o\*']?[()DPdpO\\{@|\[\]]").unwrap();
    static ref CONTRACTION: Regex = Regex::new(r"^['\x{2019}](?i:s|m|d|re|ve|ll)").unwrap();
    static ref LEADING_APOSTROPHE: Regex = Regex::new(
        r"^['\x{2019}](?i:cause|em|til|tis|twas|round|n['\x{2019}]|[0-9]{2}s?)"
    )
    .unwrap();
    static ref CURRENCY: Regex = Regex::new(
        r"^(?:[A-Z]{1,3}\$|[$\x{A3}\x{20AC}\x{A5}\x{A2}\x{20A4}\x{20A9}\x{20AA}\x{20AB}\x{20B9}\x{20BD}\x{20BA}\x{20B4}\x{20A6}\x{20B1}\x{E3F}])"
    )
    .unwrap();
    static ref NUMBER: Regex = Regex::new(
        r"^(?:[0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4}|\d+(?:[.:,\x{66B}\x{66C}]\d+)*|\.\d+)"
    )
    .unwrap();
    static ref FRACTION: Regex = Regex::new(
        r"^(?:\d{1,4}[/\x{2044}]\d{1,4}|[\x{BC}-\x{BE}\x{2150}-\x{215E}])"
    )
    .unwrap();
    static ref ACRONYM: Regex = Regex::new(r"^[A-Za-z](?:\.[A-Za-z])+").unwrap();
    static ref AMPERSAND_WORD: Regex = Regex::new(r"^\p{Lu}+(?:&(?:amp;)?\p{Lu}+)+").unwrap();
    static ref WORD: Regex = {
        let seg = r"[\p{L}\p{M}\p{N}]+(?:[\x{AD}\x{200C}\x{200D}\x{2060}]+[\p{L}\p{M}\p{N}]+)*";
        let part = format!(r"{seg}(?:['\x{{2019}}]{seg})*");
        Regex::new(&format!(r"^{part}(?:-{part})*")).unwrap()
    };
    static ref ELLIPSIS: Regex = Regex::new(r"^(?:\.{3,}|\x{2026}+)").unwrap();
    static ref DASHES: Regex = Regex::new(r"^(?:-{2,}|[\x{2013}\x{2014}\x{2015}]+|-)").unwrap();
    static ref SOFT_HYPHEN: Regex = Regex::new(r"^\x{AD}+").unwrap();
    static ref QUOTE: Regex = Regex::new(
        r#"^(?:``|''|[`"'\x{201C}\x{201D}\x{2018}\x{2019}\x{201E}\x{201A}])"#
    )
    .unwrap();
    static ref BRACKET: Regex = Regex::new(r"^[()\[\]{}]").unwrap();
    static ref SENTENCE_PUNCT: Regex = Regex::new(r"^[?!]+").unwrap();
    static ref ENTITY: Regex = Regex::new(
        r"^&(?:amp|lt|gt|quot|apos|nbsp|#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6});"
    )
    .unwrap();
}

/// Informal forms split after their third letter: "gon na", "can not".
pub(crate) const ASSIMILATIONS: [&str; 6] =
    ["gonna", "wanna", "gotta", "gimme", "lemme", "cannot"];
pub(crate) const ASSIMILATION_CUT: usize = 3;

/// Clitics split off the end of a word, compared lower-cased.
pub(crate) const CLITICS: [&str; 6] = ["s", "m", "d", "re", "ve", "ll"];
pub(crate) const NEGATION: &str = "n't";

/// Characters after which a straight quote opens.
const QUOTE_OPENERS: &str = "([{`\u{201C}\u{2018}\u{AB}";

pub fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Zero-width marks that join the letters on either side and never print.
pub fn is_joiner(c: char) -> bool {
    matches!(c, '\u{200C}' | '\u{200D}' | '\u{2060}')
}

/// Control characters other than whitespace, and the replacement character.
pub fn is_untokenizable(c: char) -> bool {
    (c.is_control() && !c.is_whitespace()) || c == '\u{FFFD}'
}

/// Longest rule match at the start of `rest`, or `None` when `rest` is empty.
pub fn match_at(rest: &str, ctx: &MatchContext) -> Option<RuleMatch> {
    let mut best: Option<RuleMatch> = None;
    for rule in PRECEDENCE {
        let Some((len, action)) = rule.try_match(rest, ctx) else {
            continue;
        };
        if len > 0 && best.as_ref().map_or(true, |b| len > b.len) {
            best = Some(RuleMatch { rule, len, action });
        }
    }
    best
}

impl Rule {
    fn pattern(self) -> Option<&'static Regex> {
        let re: &'static Regex = match self {
            Rule::SgmlTag => &*SGML_TAG,
            Rule::Url => &*URL,
            Rule::Email => &*EMAIL,
            Rule::Escape => &*ESCAPE,
            Rule::AsianSmiley => &*ASIAN_SMILEY,
            Rule::Smiley => &*SMILEY,
            Rule::Contraction => &*CONTRACTION,
            Rule::LeadingApostrophe => &*LEADING_APOSTROPHE,
            Rule::Currency => &*CURRENCY,
            Rule::Number => &*NUMBER,
            Rule::Fraction => &*FRACTION,
            Rule::Acronym => &*ACRONYM,
            Rule::AmpersandWord => &*AMPERSAND_WORD,
            Rule::Word => &*WORD,
            Rule::Ellipsis => &*ELLIPSIS,
            Rule::Dashes => &*DASHES,
            Rule::SoftHyphen => &*SOFT_HYPHEN,
            Rule::Quote => &*QUOTE,
            Rule::Bracket => &*BRACKET,
            Rule::SentencePunct => &*SENTENCE_PUNCT,
            Rule::Entity => &*ENTITY,
            Rule::Abbreviation | Rule::Symbol | Rule::Newline => return None,
        };
        Some(re)
    }

    /// Matched byte length and action if this rule accepts the start of `rest`.
    pub fn try_match(self, rest: &str, ctx: &MatchContext) -> Option<(usize, Action)> {
        match self {
            Rule::Abbreviation => return match_abbreviation(rest, ctx),
            Rule::Symbol => return match_symbol(rest),
            Rule::Newline => return None,
            Rule::SgmlTag if !ctx.options.sgml_tags => return None,
            _ => {}
        }

        let len = self.pattern()?.find(rest)?.end();
        let next = rest[len..].chars().next();
        let action = match self {
            Rule::Smiley | Rule::Fraction if next.is_some_and(char::is_alphanumeric) => {
                return None
            }
            Rule::Fraction if next == Some('/') => return None,
            Rule::Contraction | Rule::LeadingApostrophe if next.is_some_and(char::is_alphanumeric) => {
                return None
            }
            Rule::Word => word_action(&rest[..len], ctx.options),
            Rule::Quote => Action::Quote(quote_direction(&rest[..len], &rest[len..], ctx.prev)),
            _ => Action::Emit,
        };
        Some((len, action))
    }
}

fn match_symbol(rest: &str) -> Option<(usize, Action)> {
    let grapheme = rest.graphemes(true).next()?;
    let action = match grapheme.chars().next() {
        Some(c) if is_untokenizable(c) => Action::Untokenizable,
        _ => Action::Emit,
    };
    Some((grapheme.len(), action))
}

/// Byte offsets just past each period in a run like "U.S." or "Ph.D.".
fn period_ends(rest: &str) -> Vec<usize> {
    let bytes = rest.as_bytes();
    let mut ends = Vec::new();
    let mut i = 0;
    loop {
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
            i += 1;
        }
        if i == start || i >= bytes.len() || bytes[i] != b'.' {
            break;
        }
        i += 1;
        ends.push(i);
    }
    ends
}

fn match_abbreviation(rest: &str, ctx: &MatchContext) -> Option<(usize, Action)> {
    for end in period_ends(rest).into_iter().rev() {
        let stem = &rest[..end - 1];
        let following = &rest[end..];
        // "etc..." keeps its dots together as an ellipsis
        if following.starts_with("..") {
            continue;
        }
        let Some(class) = abbrev::classify(stem) else {
            continue;
        };
        match class {
            AbbrevClass::BeforeNumber => {
                let mut chars = following.chars();
                let next = match chars.next() {
                    Some(c) if c.is_whitespace() => chars.next(),
                    other => other,
                };
                if next.is_some_and(|c| c.is_ascii_digit()) {
                    return Some((end, Action::Emit));
                }
            }
            AbbrevClass::NeverFinal if abbrev::is_single_letter(stem) => {
                let spaced = following.starts_with(char::is_whitespace);
                if spaced && !following.trim_start().is_empty() {
                    return Some((end, Action::Emit));
                }
            }
            AbbrevClass::NeverFinal => return Some((end, Action::Emit)),
            AbbrevClass::SentenceFinal => {
                let action = if is_sentence_end(following, ctx.at_end_of_input)
                    && !abbrev::runs_into_limited(stem, following)
                {
                    Action::SentenceFinal
                } else {
                    Action::Emit
                };
                return Some((end, action));
            }
        }
    }
    None
}

/// End of input, or whitespace followed by an uppercase letter, a tag, or end of input.
fn is_sentence_end(following: &str, at_end_of_input: bool) -> bool {
    match following.chars().next() {
        None => at_end_of_input,
        Some(c) if !c.is_whitespace() => false,
        Some(_) => match following.trim_start().chars().next() {
            None => at_end_of_input,
            Some(next) => next.is_uppercase() || next == '<',
        },
    }
}

fn word_action(word: &str, options: &TokenizerOptions) -> Action {
    let cut = if options.split_assimilations {
        assimilation_cut(word)
    } else {
        None
    };
    match cut.or_else(|| negation_cut(word)).or_else(|| clitic_cut(word)) {
        Some(cut) => Action::Split(vec![cut]),
        None => Action::Emit,
    }
}

fn assimilation_cut(word: &str) -> Option<usize> {
    let lower = word.to_ascii_lowercase();
    (word.is_ascii() && ASSIMILATIONS.contains(&lower.as_str())).then_some(ASSIMILATION_CUT)
}

/// "can't" splits before the n: "ca" + "n't".
fn negation_cut(word: &str) -> Option<usize> {
    let (n_at, _) = word.char_indices().rev().nth(2)?;
    let before = word[..n_at].chars().next_back()?;
    let tail = word[n_at..].to_lowercase().replace('\u{2019}', "'");
    (tail == NEGATION && before.is_alphabetic()).then_some(n_at)
}

/// "it's" splits at the apostrophe: "it" + "'s".
fn clitic_cut(word: &str) -> Option<usize> {
    let (at, apostrophe) = word.char_indices().rev().find(|&(_, c)| is_apostrophe(c))?;
    if at == 0 {
        return None;
    }
    let suffix = word[at + apostrophe.len_utf8()..].to_lowercase();
    CLITICS.contains(&suffix.as_str()).then_some(at)
}

fn quote_direction(quote: &str, following: &str, prev: Option<char>) -> QuoteDirection {
    match quote {
        "``" | "`" | "\u{201C}" | "\u{2018}" | "\u{201E}" | "\u{201A}" => QuoteDirection::Open,
        "\u{201D}" | "\u{2019}" => QuoteDirection::Close,
        _ => {
            let after_opener = prev.map_or(true, |c| c.is_whitespace() || QUOTE_OPENERS.contains(c));
            let has_content = following.chars().next().is_some_and(|c| !c.is_whitespace());
            if after_opener && has_content {
                QuoteDirection::Open
            } else {
                QuoteDirection::Close
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(rest: &str) -> RuleMatch {
        matched_after(rest, None)
    }

    fn matched_after(rest: &str, prev: Option<char>) -> RuleMatch {
        let options = TokenizerOptions::default();
        let ctx = MatchContext {
            prev,
            at_end_of_input: true,
            options: &options,
        };
        match_at(rest, &ctx).unwrap()
    }

    fn lexeme(rest: &str) -> (Rule, &str) {
        let m = matched(rest);
        (m.rule, &rest[..m.len])
    }

    #[test]
    fn test_empty_input_has_no_match() {
        let options = TokenizerOptions::default();
        let ctx = MatchContext {
            prev: None,
            at_end_of_input: true,
            options: &options,
        };
        assert_eq!(match_at("", &ctx), None);
    }

    #[test]
    fn test_longest_match_wins() {
        assert_eq!(lexeme("84km away"), (Rule::Word, "84km"));
        assert_eq!(lexeme("4:45pm"), (Rule::Number, "4:45"));
        assert_eq!(lexeme("US$170"), (Rule::Currency, "US$"));
        assert_eq!(lexeme("1/2 cup"), (Rule::Fraction, "1/2"));
    }

    #[test]
    fn test_tie_goes_to_earlier_rule() {
        assert_eq!(lexeme("1990 was"), (Rule::Number, "1990"));
    }

    #[test]
    fn test_words_keep_internal_hyphens_and_soft_hyphens() {
        assert_eq!(lexeme("Sydney-based firm"), (Rule::Word, "Sydney-based"));
        assert_eq!(lexeme("ship\u{AD}ping "), (Rule::Word, "ship\u{AD}ping"));
        assert_eq!(lexeme("ship\u{200D}ping "), (Rule::Word, "ship\u{200D}ping"));
        assert_eq!(lexeme("ship\u{200C}ping "), (Rule::Word, "ship\u{200C}ping"));
        assert_eq!(lexeme("ship\u{2060} "), (Rule::Word, "ship"));
        assert_eq!(lexeme("a- b"), (Rule::Word, "a"));
    }

    #[test]
    fn test_word_splits() {
        assert_eq!(matched("can't").action, Action::Split(vec![2]));
        assert_eq!(matched("it's").action, Action::Split(vec![2]));
        assert_eq!(matched("should've").action, Action::Split(vec![6]));
        assert_eq!(matched("Gimme").action, Action::Split(vec![3]));
        assert_eq!(matched("o'clock").action, Action::Emit);
        assert_eq!(matched("n't").action, Action::Emit);
    }

    #[test]
    fn test_assimilations_can_be_disabled() {
        let options = TokenizerOptions {
            split_assimilations: false,
            ..TokenizerOptions::default()
        };
        let ctx = MatchContext {
            prev: None,
            at_end_of_input: true,
            options: &options,
        };
        assert_eq!(match_at("gonna", &ctx).unwrap().action, Action::Emit);
    }

    #[test]
    fn test_abbreviation_classes() {
        assert_eq!(lexeme("Mr. Smith"), (Rule::Abbreviation, "Mr."));
        assert_eq!(lexeme("No. 24"), (Rule::Abbreviation, "No."));
        assert_eq!(lexeme("no.47"), (Rule::Abbreviation, "no."));
        assert_eq!(lexeme("No. I like"), (Rule::Word, "No"));
        assert_eq!(lexeme("B. A. or"), (Rule::Abbreviation, "B."));
        assert_eq!(lexeme("B.S. or"), (Rule::Abbreviation, "B.S."));
        assert_eq!(lexeme("Ph.D (x"), (Rule::Abbreviation, "Ph."));
        assert_eq!(lexeme("U.S insurance"), (Rule::Acronym, "U.S"));
        assert_eq!(lexeme("etc..."), (Rule::Word, "etc"));
    }

    #[test]
    fn test_sentence_final_abbreviation() {
        assert_eq!(matched("Corp. \n</HEADLINE>").action, Action::SentenceFinal);
        assert_eq!(matched("Corp.").action, Action::SentenceFinal);
        assert_eq!(matched("Corp., Chevron").action, Action::Emit);
        assert_eq!(matched("Corp. and").action, Action::Emit);
        assert_eq!(matched("Pty. Ltd. went").action, Action::Emit);
        assert_eq!(matched("U.S..)").action, Action::Emit);
    }

    #[test]
    fn test_sentence_end_needs_complete_input() {
        assert!(is_sentence_end("", true));
        assert!(!is_sentence_end("", false));
        assert!(is_sentence_end("  The", false));
        assert!(!is_sentence_end("  the", false));
    }

    #[test]
    fn test_smileys() {
        assert_eq!(lexeme(";-) but"), (Rule::Smiley, ";-)"));
        assert_eq!(lexeme(":(."), (Rule::Smiley, ":("));
        assert_eq!(lexeme("^_^ but"), (Rule::AsianSmiley, "^_^"));
        assert_eq!(lexeme("(x.x)!"), (Rule::AsianSmiley, "(x.x)"));
        assert_ne!(matched(":(see").rule, Rule::Smiley);
    }

    #[test]
    fn test_standalone_contractions() {
        assert_eq!(lexeme("'s dog"), (Rule::Contraction, "'s"));
        assert_eq!(lexeme("'cause I"), (Rule::LeadingApostrophe, "'cause"));
        assert_eq!(lexeme("'n' me"), (Rule::LeadingApostrophe, "'n'"));
        assert_eq!(lexeme("'sup"), (Rule::Quote, "'"));
    }

    #[test]
    fn test_quote_direction() {
        assert_eq!(matched("\"John").action, Action::Quote(QuoteDirection::Open));
        assert_eq!(
            matched_after("\" Jane", Some(',')).action,
            Action::Quote(QuoteDirection::Close)
        );
        assert_eq!(
            matched_after("'' .", Some('T')).action,
            Action::Quote(QuoteDirection::Close)
        );
        assert_eq!(
            matched_after("`paid", Some(' ')).action,
            Action::Quote(QuoteDirection::Open)
        );
        assert_eq!(
            matched_after("\u{201D}", Some(' ')).action,
            Action::Quote(QuoteDirection::Close)
        );
    }

    #[test]
    fn test_tags_urls_and_entities() {
        assert_eq!(lexeme("</HEADLINE>\n"), (Rule::SgmlTag, "</HEADLINE>"));
        assert_eq!(lexeme("http://nlp.stanford.edu/."), (Rule::Url, "http://nlp.stanford.edu/"));
        assert_eq!(lexeme("jane@example.com."), (Rule::Email, "jane@example.com"));
        assert_eq!(lexeme("&amp; more"), (Rule::Entity, "&amp;"));
        assert_eq!(lexeme("AT&T''"), (Rule::AmpersandWord, "AT&T"));
    }

    #[test]
    fn test_dashes_and_ellipses() {
        assert_eq!(lexeme("--- think"), (Rule::Dashes, "---"));
        assert_eq!(lexeme("\u{2013} ca."), (Rule::Dashes, "\u{2013}"));
        assert_eq!(lexeme("-owned"), (Rule::Dashes, "-"));
        assert_eq!(lexeme("....,"), (Rule::Ellipsis, "...."));
        assert_eq!(lexeme("-LRB- x"), (Rule::Escape, "-LRB-"));
    }

    #[test]
    fn test_symbol_fallback_takes_one_grapheme() {
        assert_eq!(lexeme("#$%"), (Rule::Symbol, "#"));
        assert_eq!(lexeme("e\u{301}\u{301}!").0, Rule::Word);
        assert_eq!(matched("\u{1}x").action, Action::Untokenizable);
        assert_eq!(matched("\u{FFFD}").action, Action::Untokenizable);
    }
}
