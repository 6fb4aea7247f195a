//! Relevance scoring and ranking for the fetched candidate pool
//!
//! Three additive bonuses, evaluated independently per candidate:
//! exact full-query match (+200), variant prefix (+100, at most once),
//! variant word hit (+50, at most once). Pools past a size threshold score
//! in parallel.

use std::cmp::Ordering;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

use crate::types::{Product, ScoredProduct};

/// Pool size above which scoring runs on rayon
const PARALLEL_SCORE_THRESHOLD: usize = 1000;

/// Delimiters that split a product name into words
static WORD_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-/.]+").unwrap());

/// Score one candidate name against the query's variation set.
/// A missing name scores 0; it never errors.
pub fn score_name(name: &str, variations: &HashSet<String>, full_query: &str) -> u32 {
    let upper = name.to_uppercase();
    if upper.is_empty() {
        return 0;
    }

    let mut score = 0;

    if upper == full_query {
        score += 200;
    }

    if variations.iter().any(|v| upper.starts_with(v.as_str())) {
        score += 100;
    }

    let words: HashSet<&str> = WORD_SPLIT_RE.split(&upper).filter(|w| !w.is_empty()).collect();
    if variations.iter().any(|v| words.contains(v.as_str())) {
        score += 50;
    }

    score
}

/// Score, sort, and return the whole pool.
///
/// Ordering is score descending, ties broken by case-insensitive name
/// ascending; identical inputs always produce identical output, which the
/// page slicing depends on.
pub fn rank(
    pool: Vec<Product>,
    variations: &HashSet<String>,
    full_query: &str,
) -> Vec<ScoredProduct> {
    let mut scored: Vec<ScoredProduct> = if pool.len() > PARALLEL_SCORE_THRESHOLD {
        pool.into_par_iter()
            .map(|product| {
                let score = score_name(&product.name, variations, full_query);
                ScoredProduct { product, score }
            })
            .collect()
    } else {
        pool.into_iter()
            .map(|product| {
                let score = score_name(&product.name, variations, full_query);
                ScoredProduct { product, score }
            })
            .collect()
    };

    scored.sort_by(compare);
    scored
}

fn compare(a: &ScoredProduct, b: &ScoredProduct) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.product.name.to_uppercase().cmp(&b.product.name.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variations(terms: &[&str]) -> HashSet<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    fn named(name: &str) -> Product {
        Product::new(format!("id-{name}"), 1, name.to_string())
    }

    #[test]
    fn test_exact_match_bonus() {
        let vars = variations(&["CABO"]);
        assert_eq!(score_name("CABO", &vars, "CABO"), 350); // exact + prefix + word
        assert_eq!(score_name("cabo", &vars, "CABO"), 350); // compared uppercased
    }

    #[test]
    fn test_prefix_bonus_applies_once() {
        // Two variants both prefix the name; the bonus is still 100
        let vars = variations(&["CABO", "CABO FLEX"]);
        assert_eq!(score_name("CABO FLEXIVEL 2,5", &vars, "X"), 150); // prefix + word "CABO"
    }

    #[test]
    fn test_word_bonus_splits_on_delimiters() {
        let vars = variations(&["FLEX"]);
        // FLEX appears as a word only when a delimiter separates it
        assert_eq!(score_name("CABO-FLEX 2,5", &vars, "X"), 50);
        assert_eq!(score_name("CABO/FLEX", &vars, "X"), 50);
        assert_eq!(score_name("CABO.FLEX", &vars, "X"), 50);
        assert_eq!(score_name("CABO FLEXIVEL", &vars, "X"), 0);
    }

    #[test]
    fn test_empty_name_scores_zero() {
        let vars = variations(&["CABO"]);
        assert_eq!(score_name("", &vars, "CABO"), 0);
    }

    #[test]
    fn test_score_bounds() {
        let allowed: HashSet<u32> = [0, 50, 100, 150, 200, 250, 300, 350].into_iter().collect();
        let vars = variations(&["CABO", "FIO", "2,5"]);
        for name in [
            "CABO", "CABO 2,5", "FIO RIGIDO", "TOMADA", "", "X CABO", "CABO-FIO",
        ] {
            let score = score_name(name, &vars, "CABO");
            assert!(allowed.contains(&score), "unexpected score {score} for {name:?}");
        }
    }

    #[test]
    fn test_exact_match_dominates() {
        let vars = variations(&["CABO"]);
        let ranked = rank(
            vec![named("CABO FLEXIVEL"), named("CABO")],
            &vars,
            "CABO",
        );
        assert_eq!(ranked[0].product.name, "CABO");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_tie_break_is_name_ascending() {
        let vars = variations(&["CABO"]);
        let ranked = rank(
            vec![named("CABO ZZ"), named("cabo aa"), named("CABO MM")],
            &vars,
            "X",
        );
        let names: Vec<&str> = ranked.iter().map(|s| s.product.name.as_str()).collect();
        assert_eq!(names, vec!["cabo aa", "CABO MM", "CABO ZZ"]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let vars = variations(&["CABO", "FIO"]);
        let pool = vec![
            named("FIO 1,5"),
            named("CABO 2,5"),
            named("CABO"),
            named("TOMADA CABO"),
        ];
        let first = rank(pool.clone(), &vars, "CABO");
        let second = rank(pool, &vars, "CABO");
        let names = |v: &[ScoredProduct]| {
            v.iter().map(|s| s.product.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn test_large_pool_parallel_path_keeps_order() {
        let vars = variations(&["CABO"]);
        let mut pool: Vec<Product> = (0..1500)
            .map(|i| named(&format!("TOMADA {i:04}")))
            .collect();
        pool.push(named("CABO"));

        let ranked = rank(pool, &vars, "CABO");
        assert_eq!(ranked[0].product.name, "CABO");
        assert_eq!(ranked[0].score, 350);
        // The rest are zero-score, alphabetical
        assert_eq!(ranked[1].product.name, "TOMADA 0000");
        assert_eq!(ranked.last().unwrap().product.name, "TOMADA 1499");
    }
}
