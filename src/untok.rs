//! Heuristic detokenizer: Treebank tokens back to running text.
//!
//! Spacing is decided token by token from the previous and current token.
//! The result is readable text, not a byte-exact inverse; use invertible
//! tokenization when the exact source is needed.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::lexer::rules;

const ESCAPES: [(&str, &str); 6] = [
    ("-LRB-", "("),
    ("-RRB-", ")"),
    ("-LSB-", "["),
    ("-RSB-", "]"),
    ("-LCB-", "{"),
    ("-RCB-", "}"),
];

const OPENING: &[&str] = &[
    "-LRB-", "-LSB-", "-LCB-", "(", "[", "{", "``", "`", "\u{201C}", "\u{2018}",
];

const CLOSING: &[&str] = &[
    "-RRB-", "-RSB-", "-RCB-", ")", "]", "}", "''", "'", "\u{201D}", "\u{2019}",
];

const NEWLINE_TOKEN: &str = "*NL*";

lazy_static! {
    /// First half of a split informal form to its second half.
    static ref ASSIMILATIONS: HashMap<&'static str, &'static str> = rules::ASSIMILATIONS
        .iter()
        .map(|&form| form.split_at(rules::ASSIMILATION_CUT))
        .collect();
}

/// Detokenizes a space-separated line of Treebank tokens.
pub fn ptb_to_text(tokenized: &str) -> String {
    let tokens: Vec<&str> = tokenized.split_whitespace().collect();
    untokenize(&tokens)
}

pub fn untokenize<S: AsRef<str>>(tokens: &[S]) -> String {
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    let in_chain = hyphen_chains(&tokens);

    let mut out = String::new();
    for (i, &token) in tokens.iter().enumerate() {
        if token == NEWLINE_TOKEN {
            let trimmed = out.trim_end_matches(' ').len();
            out.truncate(trimmed);
            out.push('\n');
            continue;
        }
        let glued = match i.checked_sub(1).map(|p| tokens[p]) {
            None | Some(NEWLINE_TOKEN) => true,
            Some(prev) => in_chain[i] || attaches_left(prev, token) || opens_right(prev, token),
        };
        if !glued {
            out.push(' ');
        }
        out.push_str(surface(token));
    }
    out
}

/// Running-text form of a token.
fn surface(token: &str) -> &str {
    if let Some((_, bracket)) = ESCAPES.iter().find(|(escape, _)| *escape == token) {
        return bracket;
    }
    match token {
        "``" | "''" | "\u{201C}" | "\u{201D}" => "\"",
        "`" | "\u{2018}" | "\u{2019}" => "'",
        _ => token,
    }
}

/// No space between `prev` and `token` because `token` leans left.
fn attaches_left(prev: &str, token: &str) -> bool {
    if token.chars().all(|c| ".,!?;:%".contains(c)) {
        return true;
    }
    if CLOSING.contains(&token) {
        return true;
    }
    let lower = token.to_lowercase().replace('\u{2019}', "'");
    let is_clitic = lower
        .strip_prefix('\'')
        .is_some_and(|suffix| rules::CLITICS.contains(&suffix));
    if is_clitic || lower == rules::NEGATION {
        return true;
    }
    ASSIMILATIONS
        .get(prev.to_lowercase().as_str())
        .is_some_and(|second| *second == lower)
}

/// No space between `prev` and `token` because `prev` leans right.
fn opens_right(prev: &str, token: &str) -> bool {
    if OPENING.contains(&prev) {
        return true;
    }
    is_currency(prev) && token.starts_with(|c: char| c.is_ascii_digit())
}

fn is_currency(token: &str) -> bool {
    token.ends_with('$') || matches!(token, "#" | "\u{A3}" | "\u{20AC}" | "\u{A5}")
}

fn is_chain_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

/// Marks tokens of `w - w - w` runs (two or more hyphens) to be glued to
/// their predecessor. A lone ` - ` between two words is left spaced.
fn hyphen_chains(tokens: &[&str]) -> Vec<bool> {
    let mut glued = vec![false; tokens.len()];
    let mut i = 0;
    while i < tokens.len() {
        if !is_chain_word(tokens[i]) {
            i += 1;
            continue;
        }
        let mut j = i;
        let mut hyphens = 0;
        while j + 2 < tokens.len() && tokens[j + 1] == "-" && is_chain_word(tokens[j + 2]) {
            j += 2;
            hyphens += 1;
        }
        if hyphens >= 2 {
            for flag in &mut glued[i + 1..=j] {
                *flag = true;
            }
        }
        i = j + 1;
    }
    glued
}
