//! Removal of placeholder parts (connectors, mounting holes, test points).

use super::fields::NAME;
use super::ComponentRecord;

/// Keep only records with a non-empty `Name` field.
///
/// Returns the retained records and the number removed.
pub fn retain_physical(records: Vec<ComponentRecord>) -> (Vec<ComponentRecord>, usize) {
    let before = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|r| r.text(NAME).is_some_and(|n| !n.is_empty()))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}
