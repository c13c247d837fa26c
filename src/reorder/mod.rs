//! Reorder mapping.
//!
//! Between preview and merge the user hands back a rearranged list of
//! page keys. This module validates that list as a strict permutation
//! of the known preview set: same length, every key known, no key twice.
//! Anything else is a [`DeckError::Mapping`] and no document is built.

use std::collections::HashSet;

use crate::error::{DeckError, Result};
use crate::preview::PageKey;

/// Parse a list of `"<source>:<page>"` tokens into page keys.
///
/// Fails on the first malformed token; the error names it.
pub fn parse_order(tokens: &[String]) -> Result<Vec<PageKey>> {
    tokens.iter().map(|t| t.parse::<PageKey>()).collect()
}

/// Validate `requested` as a permutation of `known` and return it as the
/// merge selection.
///
/// The returned order is exactly the requested order. `known` is the
/// full preview set in its original order; it is only consulted for
/// membership, never for ordering.
///
/// # Errors
///
/// Returns [`DeckError::Mapping`] when the two sets differ in length,
/// when a requested key was never previewed, or when a key appears more
/// than once.
pub fn apply(known: &[PageKey], requested: &[PageKey]) -> Result<Vec<PageKey>> {
    if requested.len() != known.len() {
        return Err(DeckError::mapping(format!(
            "order lists {} pages but {} were previewed",
            requested.len(),
            known.len()
        )));
    }

    let known_set: HashSet<PageKey> = known.iter().copied().collect();
    let mut seen = HashSet::with_capacity(requested.len());

    for key in requested {
        if !known_set.contains(key) {
            return Err(DeckError::mapping(format!("unknown page key '{key}'")));
        }
        if !seen.insert(*key) {
            return Err(DeckError::mapping(format!("page key '{key}' appears twice")));
        }
    }

    Ok(requested.to_vec())
}
