//! GEDCOM date values.
//!
//! Handles the common subset: an optional qualifier (`ABT`, `EST`, `CAL`,
//! `BEF`, `AFT`, `BET … AND …`, `FROM … TO …`, `INT`) followed by
//! day-month-year, month-year or a bare year. Anything else keeps its
//! original text with no numeric fields.

use famgraph::{DateRange, DateValue};
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,4})(?:/\d{1,4})?$").expect("valid year regex"));
static CALENDAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@#D[^@]*@").expect("valid calendar escape regex"));
static PHRASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)?").expect("valid date phrase regex"));

const MONTHS: [(&str, &str); 12] = [
    ("JAN", "JANUARY"),
    ("FEB", "FEBRUARY"),
    ("MAR", "MARCH"),
    ("APR", "APRIL"),
    ("MAY", "MAY"),
    ("JUN", "JUNE"),
    ("JUL", "JULY"),
    ("AUG", "AUGUST"),
    ("SEP", "SEPTEMBER"),
    ("OCT", "OCTOBER"),
    ("NOV", "NOVEMBER"),
    ("DEC", "DECEMBER"),
];

/// Calendar date components: (day, month, year).
type Components = (Option<u8>, Option<u8>, i32);

/// Parse a GEDCOM `DATE` value. Never fails.
pub fn parse_date(raw: &str) -> DateValue {
    let original = raw.trim();
    let mut date = DateValue::unparsed(original);

    let upper = original.to_uppercase();
    let without_calendar = CALENDAR_RE.replace_all(&upper, " ");
    let cleaned = PHRASE_RE.replace_all(&without_calendar, " ");
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .map(|t| t.trim_end_matches('.'))
        .filter(|t| !t.is_empty())
        .collect();

    let Some((&first, rest)) = tokens.split_first() else {
        return date;
    };

    let (start, end) = match first {
        "ABT" | "ABOUT" | "EST" | "CAL" | "CIRCA" | "C" => {
            date.approximate = true;
            (rest, None)
        }
        "BEF" | "BEFORE" => {
            date.range = DateRange::Before;
            (rest, None)
        }
        "AFT" | "AFTER" => {
            date.range = DateRange::After;
            (rest, None)
        }
        "BET" | "BETWEEN" => {
            date.range = DateRange::Between;
            split_at_word(rest, "AND")
        }
        "FROM" => {
            let (from, to) = split_at_word(rest, "TO");
            date.range = if to.is_some() {
                DateRange::Between
            } else {
                DateRange::After
            };
            (from, to)
        }
        "TO" => {
            date.range = DateRange::Before;
            (rest, None)
        }
        "INT" => (rest, None),
        _ => (tokens.as_slice(), None),
    };

    let Some((day, month, year)) = parse_components(start) else {
        return DateValue::unparsed(original);
    };

    date.day = day;
    date.month = month;
    date.year = Some(year);
    date.end_year = end.and_then(parse_components).map(|(_, _, y)| y);
    date
}

/// Split `tokens` around the first `word`.
fn split_at_word<'a, 'b>(tokens: &'a [&'b str], word: &str) -> (&'a [&'b str], Option<&'a [&'b str]>) {
    match tokens.iter().position(|t| *t == word) {
        Some(pos) => (&tokens[..pos], Some(&tokens[pos + 1..])),
        None => (tokens, None),
    }
}

fn parse_components(tokens: &[&str]) -> Option<Components> {
    // Trailing era marker
    let (tokens, bc) = match tokens.split_last() {
        Some((&"BC" | &"B.C" | &"BCE", rest)) => (rest, true),
        _ => (tokens, false),
    };

    let (day, month, year) = match tokens {
        [year] => (None, None, parse_year(year)?),
        [month, year] => (None, Some(parse_month(month)?), parse_year(year)?),
        [day, month, year] => {
            let day: u8 = day.parse().ok()?;
            if !(1..=31).contains(&day) {
                return None;
            }
            (Some(day), Some(parse_month(month)?), parse_year(year)?)
        }
        _ => return None,
    };

    Some((day, month, if bc { -year } else { year }))
}

fn parse_year(token: &str) -> Option<i32> {
    let caps = YEAR_RE.captures(token)?;
    caps.get(1)?.as_str().parse().ok()
}

fn parse_month(token: &str) -> Option<u8> {
    MONTHS
        .iter()
        .position(|(short, long)| token == *short || token == *long)
        .map(|index| index as u8 + 1)
}
