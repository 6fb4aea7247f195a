//! Variation expansion for search tokens
//!
//! Given one normalized token, produces every textual variant that should be
//! considered equivalent for matching: synonyms, truncated dictionary terms,
//! gauge-notation padding, decimal-separator forms, and unit-suffix stripping.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::synonyms::SynonymData;

/// Gauge notation: S8, S08, S10...
static GAUGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^S(0)?(\d+)$").unwrap());

/// Number followed by a millimeter suffix: 2.5MM, 2,5MM, 4MM
static UNIT_MM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+(?:[.,]\d+)?)MM$").unwrap());

/// All known variations for a token. Always contains the normalized token
/// itself, so a token never expands to nothing.
pub fn expand(data: &SynonymData, token: &str) -> HashSet<String> {
    let normalized = token.trim().to_uppercase();
    let mut variations = HashSet::new();
    variations.insert(normalized.clone());

    if normalized.is_empty() {
        return variations;
    }

    // 1. Exact synonym match
    if let Some(terms) = data.lookup(&normalized) {
        variations.extend(terms.iter().cloned());
    }

    // 2. Partial match: a truncated token reaches the dictionary entries it
    //    prefixes (MONOFAS -> MONOFASICO and its synonyms)
    if normalized.len() >= 3 {
        for key in data.keys_with_prefix(&normalized) {
            variations.insert(key.to_string());
            if let Some(terms) = data.lookup(key) {
                variations.extend(terms.iter().cloned());
            }
        }
    }

    // 3. Gauge notation: S8 <-> S08. Multi-digit gauges stay unpadded (S10
    //    never becomes S010).
    if let Some(caps) = GAUGE_RE.captures(&normalized) {
        let digits = &caps[2];
        if digits.len() == 1 {
            variations.insert(format!("S{digits}"));
            variations.insert(format!("S0{digits}"));
        } else {
            variations.insert(format!("S{digits}"));
        }
    }

    // 4. Decimal separators: 2.5 <-> 2,5
    if normalized.contains('.') || normalized.contains(',') {
        let (with_dot, with_comma) = decimal_variants(&normalized);
        variations.insert(with_dot);
        variations.insert(with_comma);
    }

    // 5. A bare integer also matches its decimal spellings: 10 -> 10,0 / 10.0
    if is_pure_integer(&normalized) {
        variations.insert(format!("{normalized},0"));
        variations.insert(format!("{normalized}.0"));
    }

    // 6. Unit suffix: 2.5MM matches products labeled 2.5 or 2,5; 4MM also
    //    matches 4,0 and 4.0
    if let Some(caps) = UNIT_MM_RE.captures(&normalized) {
        let number = caps[1].to_string();
        let (with_dot, with_comma) = decimal_variants(&number);
        if is_pure_integer(&number) {
            variations.insert(format!("{number},0"));
            variations.insert(format!("{number}.0"));
        }
        variations.insert(number);
        variations.insert(with_dot);
        variations.insert(with_comma);
    }

    variations
}

/// Both separator spellings of a numeric string
fn decimal_variants(value: &str) -> (String, String) {
    (value.replacen(',', ".", 1), value.replacen('.', ",", 1))
}

fn is_pure_integer(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
