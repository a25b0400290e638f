//! Column resolution
//!
//! Two matching strategies:
//! - `ExactAlias`: normalized exact match, candidate order dominates column
//!   order. Used for counting across differently named sheets.
//! - `Fragment`: case-insensitive substring of a text header, first column
//!   wins. Used on the one well-known helper layout.

use super::{normalize, normalize_str};
use crate::types::{CellValue, ColumnRole, ColumnMapping};

/// How to match a role against header labels
#[derive(Debug, Clone, Copy)]
pub enum ResolveStrategy<'a> {
    ExactAlias(&'a [String]),
    Fragment(&'a str),
}

/// Resolve a column (1-based) with the given strategy
pub fn resolve(headers: &[CellValue], strategy: ResolveStrategy<'_>) -> Option<usize> {
    match strategy {
        ResolveStrategy::ExactAlias(candidates) => resolve_exact(headers, candidates),
        ResolveStrategy::Fragment(fragment) => resolve_fragment(headers, fragment),
    }
}

/// Try candidates in priority order; the first candidate that matches any
/// header wins, at its leftmost column.
pub fn resolve_exact<S: AsRef<str>>(headers: &[CellValue], candidates: &[S]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(normalize).collect();
    candidates.iter().find_map(|candidate| {
        let wanted = normalize_str(candidate.as_ref());
        normalized
            .iter()
            .position(|h| *h == wanted)
            .map(|idx| idx + 1)
    })
}

/// First text header containing `fragment`, case-insensitively
pub fn resolve_fragment(headers: &[CellValue], fragment: &str) -> Option<usize> {
    let fragment = fragment.to_lowercase();
    headers
        .iter()
        .position(|h| {
            h.as_text()
                .is_some_and(|text| text.to_lowercase().contains(&fragment))
        })
        .map(|idx| idx + 1)
}

/// Resolve every role that has a configured fragment. Roles without one map
/// to `None`.
pub fn resolve_fragments<F>(headers: &[CellValue], fragment_for: F) -> ColumnMapping
where
    F: Fn(ColumnRole) -> Option<String>,
{
    ColumnRole::ALL
        .iter()
        .map(|&role| {
            let col = fragment_for(role)
                .and_then(|f| resolve(headers, ResolveStrategy::Fragment(&f)));
            (role, col)
        })
        .collect()
}
