//! Query planning: tokenize, expand, build the candidate filter
//!
//! Turns a free-text query into a structured predicate (conjunction of
//! per-token disjunctions) for the store, plus the full variation set the
//! relevance scorer consumes afterwards.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::synonyms::SynonymData;
use super::variations::expand;
use crate::store::{Field, Predicate};

/// Short connective words dropped during tokenization
pub const STOPWORDS: &[&str] = &[
    "DE", "DA", "DO", "PARA", "COM", "EM", "P/", "O", "A", "OS", "AS",
];

/// Digit-quote-digit measurements: 2'5 means 2,5
static QUOTED_DECIMAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)\s*'\s*(\d)").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Everything the listing path needs to run one search
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// Conjunction of per-token clauses to constrain the candidate pool
    pub filter: Predicate,
    /// Normalized full query plus every token's expansion, for scoring
    pub full_query_variations: HashSet<String>,
    /// Set when the entire query is a lone product code
    pub exact_code: Option<i64>,
    /// Uppercased, sanitized query text
    pub normalized_query: String,
    /// Tokens that survived stopword removal
    pub tokens: Vec<String>,
}

/// Sanitize raw query text: uppercase, fold typographic apostrophes, read
/// digit'digit as a decimal comma, strip quotes, collapse whitespace.
pub fn normalize_query(input: &str) -> String {
    let mut normalized = input.to_uppercase().trim().to_string();
    normalized = normalized.replace(['\u{2019}', '\u{00B4}', '`'], "'");
    normalized = QUOTED_DECIMAL_RE.replace_all(&normalized, "$1,$2").into_owned();
    normalized = normalized.replace('"', "");
    normalized = normalized.replace('\'', " ");
    WHITESPACE_RE.replace_all(&normalized, " ").trim().to_string()
}

/// Build the query plan for a free-text search
pub fn plan(data: &SynonymData, query: &str) -> QueryPlan {
    let normalized_query = normalize_query(query);

    let tokens: Vec<String> = normalized_query
        .split_whitespace()
        .filter(|t| !STOPWORDS.contains(t))
        .map(|t| t.to_string())
        .collect();

    let mut clauses: Vec<Predicate> = Vec::new();
    let mut full_query_variations: HashSet<String> = HashSet::new();

    if !normalized_query.is_empty() {
        full_query_variations.insert(normalized_query.clone());
    }

    if tokens.is_empty() {
        // Pure-stopword or symbol-only query: match the whole string
        // literally, no expansion
        if !normalized_query.is_empty() {
            clauses.push(Predicate::Contains(Field::Name, normalized_query.clone()));
        }
    } else {
        for token in &tokens {
            let variations = expand(data, token);
            clauses.push(token_clause(&variations));
            full_query_variations.extend(variations);
        }
    }

    // A lone product-code search must hit the code even when the token would
    // otherwise only be matched textually
    let exact_code = if tokens.len() <= 1 {
        parse_code(normalized_query.trim())
    } else {
        None
    };
    if let Some(code) = exact_code {
        clauses.push(Predicate::CodeEquals(code));
    }

    QueryPlan {
        filter: Predicate::all(clauses),
        full_query_variations,
        exact_code,
        normalized_query,
        tokens,
    }
}

/// One token's disjunction: name/brand contain a variant, category starts
/// with a variant, or the code equals a numeric variant.
fn token_clause(variations: &HashSet<String>) -> Predicate {
    // Sorted for a deterministic clause layout
    let mut terms: Vec<&String> = variations.iter().collect();
    terms.sort();

    let mut ors: Vec<Predicate> = Vec::new();
    for term in terms {
        ors.push(Predicate::Contains(Field::Name, term.clone()));
        ors.push(Predicate::Contains(Field::Brand, term.clone()));
        ors.push(Predicate::StartsWith(Field::Category, term.clone()));
        if let Some(code) = parse_code(term) {
            ors.push(Predicate::CodeEquals(code));
        }
    }
    Predicate::any(ors)
}

/// Strict integer parse: the text must round-trip, so "08" or "20A" never
/// count as codes
fn parse_code(term: &str) -> Option<i64> {
    term.parse::<i64>().ok().filter(|c| c.to_string() == term)
}
