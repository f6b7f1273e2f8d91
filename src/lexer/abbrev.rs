//! Abbreviation tables.
//!
//! Stems are stored without their final period. Three classes decide what
//! happens to the period:
//!
//! - [`AbbrevClass::SentenceFinal`]: words that often end a sentence
//!   (`Corp.`, `Jan.`, `etc.`, `U.S.`). At a sentence end the period is also
//!   emitted as its own token.
//! - [`AbbrevClass::NeverFinal`]: titles and similar words normally followed
//!   by a name (`Mr.`, `Dr.`, `vs.`, single letters). Always one token.
//! - [`AbbrevClass::BeforeNumber`]: only an abbreviation when a number follows
//!   (`No. 24`, `ca. 1300`, `fig. 3`).

use std::collections::HashSet;

use lazy_static::lazy_static;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbbrevClass {
    SentenceFinal,
    NeverFinal,
    BeforeNumber,
}

const MONTHS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "Jun", "Jul", "Aug", "Sep", "Sept", "Oct", "Nov", "Dec",
];

const DAYS: &[&str] = &["Mon", "Tue", "Tues", "Wed", "Thu", "Thurs", "Fri"];

const STATES: &[&str] = &[
    "Ala", "Ariz", "Ark", "Calif", "Colo", "Conn", "Del", "Fla", "Ga", "Ida", "Ill", "Ind", "Kan",
    "Ky", "La", "Md", "Mass", "Mich", "Minn", "Miss", "Mo", "Mont", "Neb", "Nebr", "Nev", "Okla",
    "Ore", "Pa", "Penn", "Tenn", "Tex", "Va", "Vt", "Wash", "Wis", "Wyo",
];

const COMPANY: &[&str] = &[
    "Inc", "Co", "Cos", "Corp", "Pty", "Pte", "Ptys", "Ltd", "Plc", "Bancorp", "Dept", "Bhd",
    "Assn", "Univ", "Intl", "Sys",
];

const POST_NAME: &[&str] = &["Jr", "Sr", "Bros", "Blvd", "Rd", "Esq", "Ph.D", "Ed.D"];

const MISC_FINAL: &[&str] = &["etc", "al", "seq", "tel", "est", "ext", "sq"];

const TITLES: &[&str] = &[
    "Mr", "Mrs", "Ms", "Messrs", "Dr", "Drs", "Prof", "Profs", "Sen", "Sens", "Rep", "Reps",
    "Gov", "Govs", "Atty", "Attys", "Lt", "Col", "Gen", "Adm", "Rev", "Maj", "Sgt", "Cpl", "Pvt",
    "Capt", "Cmdr", "Comdr", "Lieut", "Brig", "Pfc", "Spc", "Supt", "Supts", "Det", "Hon",
    "Pres", "Mt", "St", "Ste", "Ave", "MM", "Mme", "Mmes", "Mlle", "Mlles", "Ph",
];

const MISC_NEVER_FINAL: &[&str] = &[
    "vs", "Alex", "Cie", "a.k.a", "TREAS", "Invt", "Elec", "Natl", "Mfg", "Mtg",
];

/// Compared lower-cased.
const BEFORE_NUMBER: &[&str] = &[
    "ca", "fig", "figs", "prop", "no", "nos", "art", "bldg", "pp", "op", "vol", "vols",
];

/// Company words that run straight into "Ltd"/"Limited" without ending a sentence.
const BEFORE_LIMITED: &[&str] = &["pty", "pte", "ptys", "co"];

lazy_static! {
    static ref SENTENCE_FINAL_SET: HashSet<&'static str> = MONTHS
        .iter()
        .chain(DAYS)
        .chain(STATES)
        .chain(COMPANY)
        .chain(POST_NAME)
        .chain(MISC_FINAL)
        .copied()
        .collect();
    static ref NEVER_FINAL_SET: HashSet<&'static str> =
        TITLES.iter().chain(MISC_NEVER_FINAL).copied().collect();
    static ref BEFORE_NUMBER_SET: HashSet<&'static str> = BEFORE_NUMBER.iter().copied().collect();
}

/// Class of an abbreviation stem (text before the final period), if it is one.
pub fn classify(stem: &str) -> Option<AbbrevClass> {
    if BEFORE_NUMBER_SET.contains(stem.to_ascii_lowercase().as_str()) {
        Some(AbbrevClass::BeforeNumber)
    } else if NEVER_FINAL_SET.contains(stem) || is_single_letter(stem) {
        Some(AbbrevClass::NeverFinal)
    } else if SENTENCE_FINAL_SET.contains(stem) || is_acronym(stem) {
        Some(AbbrevClass::SentenceFinal)
    } else {
        None
    }
}

pub fn is_single_letter(stem: &str) -> bool {
    let mut chars = stem.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

/// Letters joined by single periods: "U.S", "e.g", "N.Y".
pub fn is_acronym(stem: &str) -> bool {
    let parts: Vec<&str> = stem.split('.').collect();
    parts.len() >= 2 && parts.iter().all(|part| is_single_letter(part))
}

/// "Pty. Ltd.", "Co. Limited": the period belongs to the company name only.
pub fn runs_into_limited(stem: &str, following: &str) -> bool {
    if !BEFORE_LIMITED.contains(&stem.to_ascii_lowercase().as_str()) {
        return false;
    }
    let next = following.trim_start().to_ascii_lowercase();
    next.starts_with("ltd") || next.starts_with("lim")
}
