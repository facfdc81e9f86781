//! Grouping of identical components into BOM lines.

use std::collections::HashMap;

use tracing::debug;

use super::fields::{DESIGNATOR, QUANTITY};
use super::natural::sort_designators;
use super::{ComponentRecord, GroupKey};

/// Collapse records that are identical except for the `ignored` fields.
///
/// The first record of each group keeps its field values; every later
/// member only contributes its designator and its quantity. Raw records
/// carry no `Quantity` and count as one placement each, while records that
/// already went through grouping contribute their stored quantity, so
/// running this on its own output changes nothing but the group order.
///
/// Groups are sorted by their joined designator string (in grouping order),
/// then each designator list is rewritten in natural order.
pub fn deduplicate(records: Vec<ComponentRecord>, ignored: &[&str]) -> Vec<ComponentRecord> {
    let total = records.len();
    let mut groups: Vec<ComponentRecord> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for mut record in records {
        let weight = placements(&record);
        let key = record.group_key(ignored);

        match index.get(&key) {
            Some(&i) => {
                let group = &mut groups[i];
                debug_assert!(group.is_equivalent(&record, ignored));

                let designators = format!("{} {}", group.designator(), record.designator());
                let quantity = group.quantity() + weight;
                group.set(DESIGNATOR, designators);
                group.set(QUANTITY, quantity);
            }
            None => {
                record.set(QUANTITY, weight);
                index.insert(key, groups.len());
                groups.push(record);
            }
        }
    }

    groups.sort_by(|a, b| a.designator().cmp(b.designator()));

    for group in &mut groups {
        let sorted = sort_designators(group.designator());
        group.set(DESIGNATOR, sorted);
    }

    debug!(total, unique = groups.len(), "grouped components");
    groups
}

fn placements(record: &ComponentRecord) -> u32 {
    match record.quantity() {
        0 => 1,
        n => n,
    }
}
