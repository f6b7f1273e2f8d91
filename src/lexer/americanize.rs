//! British to American spelling.
//!
//! A lookup table covers irregular words; a handful of patterns handle the
//! productive cases (-our, haem-, -aemia, programme). Only lowercase and
//! Capitalized words of four or more letters are touched; the initial
//! capital is kept.

use std::borrow::Cow;
use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

const MIN_LENGTH: usize = 4;

const SPELLINGS: &[(&str, &str)] = &[
    ("aeroplane", "airplane"),
    ("aeroplanes", "airplanes"),
    ("ageing", "aging"),
    ("aluminium", "aluminum"),
    ("analogue", "analog"),
    ("analyse", "analyze"),
    ("analysed", "analyzed"),
    ("analysing", "analyzing"),
    ("apologise", "apologize"),
    ("apologised", "apologized"),
    ("calibre", "caliber"),
    ("cancelled", "canceled"),
    ("cancelling", "canceling"),
    ("catalogue", "catalog"),
    ("catalogues", "catalogs"),
    ("centre", "center"),
    ("centred", "centered"),
    ("centres", "centers"),
    ("cheque", "check"),
    ("cheques", "checks"),
    ("civilisation", "civilization"),
    ("criticise", "criticize"),
    ("criticised", "criticized"),
    ("defence", "defense"),
    ("emphasise", "emphasize"),
    ("emphasised", "emphasized"),
    ("enrol", "enroll"),
    ("fibre", "fiber"),
    ("fibres", "fibers"),
    ("fulfil", "fulfill"),
    ("globalisation", "globalization"),
    ("grey", "gray"),
    ("jewellery", "jewelry"),
    ("labelled", "labeled"),
    ("labelling", "labeling"),
    ("licence", "license"),
    ("litre", "liter"),
    ("litres", "liters"),
    ("manoeuvre", "maneuver"),
    ("manoeuvres", "maneuvers"),
    ("maximise", "maximize"),
    ("metre", "meter"),
    ("metres", "meters"),
    ("minimise", "minimize"),
    ("modelling", "modeling"),
    ("mould", "mold"),
    ("moustache", "mustache"),
    ("odour", "odor"),
    ("odours", "odors"),
    ("offence", "offense"),
    ("organisation", "organization"),
    ("organisations", "organizations"),
    ("organise", "organize"),
    ("organised", "organized"),
    ("organising", "organizing"),
    ("paralyse", "paralyze"),
    ("plough", "plow"),
    ("pretence", "pretense"),
    ("pyjamas", "pajamas"),
    ("realise", "realize"),
    ("realised", "realized"),
    ("realising", "realizing"),
    ("recognise", "recognize"),
    ("recognised", "recognized"),
    ("sceptic", "skeptic"),
    ("sceptical", "skeptical"),
    ("skilful", "skillful"),
    ("smoulder", "smolder"),
    ("sombre", "somber"),
    ("specialise", "specialize"),
    ("specialised", "specialized"),
    ("spectre", "specter"),
    ("summarise", "summarize"),
    ("theatre", "theater"),
    ("theatres", "theaters"),
    ("traveller", "traveler"),
    ("travellers", "travelers"),
    ("travelled", "traveled"),
    ("travelling", "traveling"),
    ("tyre", "tire"),
    ("tyres", "tires"),
];

/// Words ending in -our whose American spelling is the same.
const OUR_EXCEPTIONS: &[&str] = &[
    "glamour", "detour", "devour", "contour", "paramour", "troubadour", "velour",
];

lazy_static! {
    static ref TABLE: HashMap<&'static str, &'static str> = SPELLINGS.iter().copied().collect();
    static ref PATTERNS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"haem(at)?o").unwrap(), "hem${1}o"),
        (Regex::new(r"aemia$").unwrap(), "emia"),
        (Regex::new(r"leukaem").unwrap(), "leukem"),
        (Regex::new(r"^programme(s?)$").unwrap(), "program$1"),
    ];
    static ref OUR: Regex = Regex::new(
        r"^([a-z]{3,})our(s|ed|ing|ful|fully|less|able|ably|al|ite|ites|er|ers|ist|ists)?$"
    )
    .unwrap();
}

/// American spelling of `word`, borrowed unchanged when no rule applies.
pub fn americanize(word: &str) -> Cow<'_, str> {
    if word.chars().count() < MIN_LENGTH {
        return Cow::Borrowed(word);
    }

    let mut chars = word.chars();
    let capitalized = match chars.next() {
        Some(first) if first.is_uppercase() => {
            if !chars.all(|c| c.is_lowercase()) {
                return Cow::Borrowed(word);
            }
            true
        }
        Some(_) if word.chars().all(|c| c.is_lowercase()) => false,
        _ => return Cow::Borrowed(word),
    };

    let lower = word.to_lowercase();
    let Some(american) = americanize_lowercase(&lower) else {
        return Cow::Borrowed(word);
    };

    if capitalized {
        Cow::Owned(capitalize(&american))
    } else {
        Cow::Owned(american)
    }
}

fn americanize_lowercase(word: &str) -> Option<String> {
    if let Some(american) = TABLE.get(word) {
        return Some((*american).to_string());
    }

    if let Some(caps) = OUR.captures(word) {
        let stem = &caps[1];
        if !OUR_EXCEPTIONS.contains(&format!("{stem}our").as_str()) {
            let suffix = caps.get(2).map_or("", |m| m.as_str());
            return Some(format!("{stem}or{suffix}"));
        }
    }

    let mut changed: Option<String> = None;
    for (pattern, replacement) in PATTERNS.iter() {
        let current = changed.as_deref().unwrap_or(word);
        if pattern.is_match(current) {
            changed = Some(pattern.replace_all(current, *replacement).into_owned());
        }
    }
    changed
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
