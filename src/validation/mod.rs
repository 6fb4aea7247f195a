//! Validation for admin-supplied synonym dictionaries
//!
//! Reload is all-or-nothing: a table that fails validation is rejected
//! before any index state changes.

use std::collections::HashMap;

/// Check a raw synonym table before building an index from it.
/// Rejects blank terms, empty synonym lists, and blank synonym values.
pub fn validate_synonym_table(raw: &HashMap<String, Vec<String>>) -> Result<(), String> {
    for (term, synonyms) in raw {
        if term.trim().is_empty() {
            return Err("Synonym term must not be blank".to_string());
        }
        if synonyms.is_empty() {
            return Err(format!("Term '{}' has an empty synonym list", term));
        }
        for synonym in synonyms {
            if synonym.trim().is_empty() {
                return Err(format!("Term '{}' has a blank synonym value", term));
            }
        }
    }
    Ok(())
}
