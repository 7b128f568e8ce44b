//! Per-entity extraction: read the input tables, cross-reference rows by
//! their integer keys and produce in-memory records ready for insertion.

pub mod ability;
pub mod moves;
pub mod pokemon;
pub mod types;
pub mod version;

/// External ids above this cutoff are placeholder entries (shadow types,
/// mega evolutions, special forms) and never appear in the output.
pub const PLACEHOLDER_CUTOFF: i64 = 10_000;

/// Version group whose flavor text is treated as authoritative. Older
/// groups are incomplete and excluded from effect joins.
pub const CANONICAL_VERSION_GROUP: i64 = 16;

/// Placeholder filtering is a per-row predicate rather than a stop-on-first:
/// the input files are usually sorted with placeholders trailing, but that
/// ordering is not a validated contract.
pub(crate) fn is_placeholder(id: i64) -> bool {
    id > PLACEHOLDER_CUTOFF
}
