use std::io;

use tracing::{trace, warn};

use crate::engine::{ReportPolicy, TokenizerOptions};
use crate::input::Source;
use crate::lexer::rules::{self, Action, MatchContext, Rule};

/// One rule match, with the whitespace run that preceded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub rule: Rule,
    pub action: Action,
    /// Source text exactly as matched
    pub text: String,
    /// Char offsets, half-open
    pub begin: usize,
    pub end: usize,
    pub before: String,
}

/// Walks a [`Source`] and cuts it into lexemes.
///
/// Whitespace between lexemes is collected rather than dropped so the
/// emitter can hand it out as `before`/`after`. Deleted untokenizable
/// characters are folded into that whitespace, which keeps the
/// concatenation of everything handed out equal to the input.
#[derive(Debug)]
pub struct Scanner {
    source: Source,
    options: TokenizerOptions,
    /// Chars consumed so far
    offset: usize,
    prev: Option<char>,
    whitespace: String,
    reported_untokenizable: bool,
}

impl Scanner {
    pub fn new(source: Source, options: TokenizerOptions) -> Self {
        Self {
            source,
            options,
            offset: 0,
            prev: None,
            whitespace: String::new(),
            reported_untokenizable: false,
        }
    }

    /// Consumes whitespace at the cursor and returns the pending run.
    ///
    /// Calling it repeatedly is harmless; the run is handed to the next
    /// lexeme as its `before`.
    pub fn skip_whitespace(&mut self) -> io::Result<&str> {
        loop {
            self.source.fill()?;
            let rest = self.source.rest();
            let mut bytes = 0;
            let mut deleted = Vec::new();
            for c in rest.chars() {
                if is_separator(c, &self.options) {
                    self.whitespace.push(c);
                } else if !self.options.untokenizable.keep && rules::is_untokenizable(c) {
                    self.whitespace.push(c);
                    deleted.push((self.offset, c));
                } else {
                    break;
                }
                self.offset += 1;
                self.prev = Some(c);
                bytes += c.len_utf8();
            }
            let consumed_all = bytes == rest.len();
            self.source.advance(bytes);

            for (offset, c) in deleted {
                self.report_untokenizable(c, offset, "deleting");
            }
            if bytes == 0 || !consumed_all || self.source.at_end_of_input() {
                break;
            }
        }
        Ok(&self.whitespace)
    }

    pub fn has_next(&mut self) -> io::Result<bool> {
        self.skip_whitespace()?;
        Ok(!self.source.is_exhausted())
    }

    pub fn next_lexeme(&mut self) -> io::Result<Option<Lexeme>> {
        self.skip_whitespace()?;
        let rest = self.source.rest();

        let found = match newline_len(rest) {
            Some(len) if self.options.tokenize_newlines => Some((Rule::Newline, len, Action::Emit)),
            _ => {
                let ctx = MatchContext {
                    prev: self.prev,
                    at_end_of_input: self.source.at_end_of_input(),
                    options: &self.options,
                };
                rules::match_at(rest, &ctx).map(|m| (m.rule, m.len, m.action))
            }
        };
        let Some((rule, len, action)) = found else {
            return Ok(None);
        };

        let text = rest[..len].to_string();
        let begin = self.offset;
        let end = begin + text.chars().count();
        self.offset = end;
        self.prev = text.chars().last();
        self.source.advance(len);

        if action == Action::Untokenizable {
            if let Some(c) = text.chars().next() {
                self.report_untokenizable(c, begin, "keeping");
            }
        }
        trace!(?rule, text = %text, begin, end, "lexeme");

        Ok(Some(Lexeme {
            rule,
            action,
            text,
            begin,
            end,
            before: std::mem::take(&mut self.whitespace),
        }))
    }

    fn report_untokenizable(&mut self, c: char, offset: usize, disposition: &str) {
        let report = match self.options.untokenizable.report {
            ReportPolicy::None => false,
            ReportPolicy::First => !self.reported_untokenizable,
            ReportPolicy::All => true,
        };
        self.reported_untokenizable = true;
        if report {
            warn!(
                character = %c.escape_unicode(),
                offset,
                "untokenizable character, {disposition} it"
            );
        }
    }
}

/// Whitespace the scanner skips. Line breaks are tokens under `tokenizeNLs`.
fn is_separator(c: char, options: &TokenizerOptions) -> bool {
    if options.tokenize_newlines && is_newline(c) {
        return false;
    }
    c.is_whitespace() || matches!(c, '\u{200B}' | '\u{FEFF}') || rules::is_joiner(c)
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Byte length of a line break at the start of `rest`, treating "\r\n" as one.
fn newline_len(rest: &str) -> Option<usize> {
    if rest.starts_with("\r\n") {
        return Some(2);
    }
    rest.chars().next().filter(|&c| is_newline(c)).map(char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scan(text: &str, options: TokenizerOptions) -> Vec<Lexeme> {
        let mut scanner = Scanner::new(Source::from_text(text), options);
        let mut lexemes = Vec::new();
        while let Some(lexeme) = scanner.next_lexeme().unwrap() {
            lexemes.push(lexeme);
        }
        lexemes
    }

    fn texts(lexemes: &[Lexeme]) -> Vec<&str> {
        lexemes.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_lexemes_carry_preceding_whitespace() {
        let lexemes = scan("  This is  it.", TokenizerOptions::default());
        assert_eq!(texts(&lexemes), vec!["This", "is", "it", "."]);
        assert_eq!(lexemes[0].before, "  ");
        assert_eq!(lexemes[2].before, "  ");
        assert_eq!(lexemes[3].before, "");
        assert_eq!((lexemes[2].begin, lexemes[2].end), (11, 13));
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        let lexemes = scan("caf\u{e9} ok", TokenizerOptions::default());
        assert_eq!((lexemes[1].begin, lexemes[1].end), (5, 7));
    }

    #[test]
    fn test_trailing_whitespace_is_left_for_skip() {
        let mut scanner = Scanner::new(Source::from_text("end.  \n"), TokenizerOptions::default());
        while scanner.next_lexeme().unwrap().is_some() {}
        assert_eq!(scanner.skip_whitespace().unwrap(), "  \n");
        assert!(!scanner.has_next().unwrap());
    }

    #[test]
    fn test_newline_tokens() {
        let options = TokenizerOptions {
            tokenize_newlines: true,
            ..TokenizerOptions::default()
        };
        let lexemes = scan("a\r\nb\n", options);
        assert_eq!(texts(&lexemes), vec!["a", "\r\n", "b", "\n"]);
        assert_eq!(lexemes[1].rule, Rule::Newline);
    }

    #[test]
    fn test_deleted_untokenizable_becomes_whitespace() {
        let options = TokenizerOptions::parse("untokenizable=noneDelete").unwrap();
        let lexemes = scan("a\u{1}b", options);
        assert_eq!(texts(&lexemes), vec!["a", "b"]);
        assert_eq!(lexemes[1].before, "\u{1}");
    }

    #[test]
    fn test_stray_joiners_fold_into_whitespace() {
        let lexemes = scan("\u{2060}ship\u{200D} x", TokenizerOptions::default());
        assert_eq!(texts(&lexemes), vec!["ship", "x"]);
        assert_eq!(lexemes[0].before, "\u{2060}");
        assert_eq!(lexemes[1].before, "\u{200D} ");
        assert_eq!((lexemes[0].begin, lexemes[0].end), (1, 5));
    }

    #[test]
    fn test_kept_untokenizable_is_a_lexeme() {
        let lexemes = scan("a\u{1}b", TokenizerOptions::default());
        assert_eq!(texts(&lexemes), vec!["a", "\u{1}", "b"]);
        assert_eq!(lexemes[1].action, Action::Untokenizable);
    }

    #[test]
    fn test_streaming_matches_in_memory() {
        let text = "Kemper Corp. \n\n</HEADLINE>\n<P>\nU.S insurance\n";
        let from_text = scan(text, TokenizerOptions::default());
        let mut scanner = Scanner::new(
            Source::from_reader(Cursor::new(text.to_string())),
            TokenizerOptions::default(),
        );
        let mut streamed = Vec::new();
        while let Some(lexeme) = scanner.next_lexeme().unwrap() {
            streamed.push(lexeme);
        }
        assert_eq!(streamed, from_text);
        assert_eq!(streamed[1].action, Action::SentenceFinal);
    }
}
