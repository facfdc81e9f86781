//! Footprint library/part split.

use super::fields::{FOOTPRINT, FOOTPRINT_LIB, FOOTPRINT_PART};
use super::ComponentRecord;

/// Split `library:part` into its two halves. A footprint without a library
/// prefix yields an empty library.
pub fn split_footprint(footprint: &str) -> (&str, &str) {
    match footprint.split_once(':') {
        Some((lib, part)) => (lib, part),
        None => ("", footprint),
    }
}

/// Add `Footprint-lib` and `Footprint-part` to every record.
pub fn split_footprints(records: &mut [ComponentRecord]) {
    for record in records.iter_mut() {
        let footprint = record.text(FOOTPRINT).unwrap_or("").to_string();
        let (lib, part) = split_footprint(&footprint);
        record.set(FOOTPRINT_LIB, lib);
        record.set(FOOTPRINT_PART, part);
    }
}
