//! DMX address allocation.
//!
//! A universe holds 512 channels. The auto-patcher walks fixtures in
//! collection order, starts each one at its currently assigned universe,
//! and packs it at the first address where its whole footprint still
//! fits, advancing to the next universe when the current one runs out.
//! Addresses are 1-based.

use std::collections::BTreeMap;

use stagerig_core::error::PatchError;
use stagerig_core::units::DMX_UNIVERSE_SIZE;
use tracing::warn;

use crate::item::Item;

/// Reassigns the address of every fixture, in collection order.
///
/// Bars are skipped; the collection is never reordered or sorted. Each
/// fixture starts at its currently assigned universe (default 1) and
/// takes the next free address there, advancing universe by universe
/// until its footprint fits. A footprint wider than a whole universe
/// still gets address 1 of a fresh universe so the plan stays editable;
/// it is reported by [`validate_patch`].
pub fn auto_patch(items: &mut [Item]) {
    // Next free address per universe, 1-based.
    let mut cursor: BTreeMap<u16, u16> = BTreeMap::new();

    for item in items.iter_mut().filter(|i| i.is_fixture()) {
        let need = item.channel_count();
        let mut universe = item.universe.unwrap_or(1).max(1);

        if need > DMX_UNIVERSE_SIZE {
            warn!(
                uid = %item.uid,
                channels = need,
                "fixture footprint exceeds a whole universe"
            );
            let u = next_empty_universe(&cursor, universe);
            item.universe = Some(u);
            item.address = Some(1);
            cursor.insert(u, DMX_UNIVERSE_SIZE + 1);
            continue;
        }

        loop {
            let next = *cursor.get(&universe).unwrap_or(&1);
            if next + need - 1 <= DMX_UNIVERSE_SIZE {
                item.universe = Some(universe);
                item.address = Some(next);
                cursor.insert(universe, next + need);
                break;
            }
            universe += 1;
        }
    }
}

fn next_empty_universe(cursor: &BTreeMap<u16, u16>, from: u16) -> u16 {
    let mut u = from;
    while cursor.get(&u).copied().unwrap_or(1) > 1 {
        u += 1;
    }
    u
}

/// Checks the current patch for footprints crossing the universe boundary
/// and for overlapping fixtures within a universe.
///
/// Returns every problem found, not just the first. Fixtures without an
/// address are ignored.
pub fn validate_patch(items: &[Item]) -> Vec<PatchError> {
    let mut errors = Vec::new();

    // (universe, start, end, uid) per addressed fixture.
    let mut spans: Vec<(u16, u32, u32, &str)> = Vec::new();
    for item in items.iter().filter(|i| i.is_fixture()) {
        let (Some(universe), Some(address)) = (item.universe, item.address) else {
            continue;
        };
        let need = item.channel_count();
        let start = address as u32;
        let end = start + need as u32 - 1;
        if need > DMX_UNIVERSE_SIZE {
            errors.push(PatchError::ChannelsExceedUniverse {
                uid: item.uid.clone(),
                channels: need,
            });
        } else if address < 1 || end > DMX_UNIVERSE_SIZE as u32 {
            errors.push(PatchError::AddressOutOfRange {
                uid: item.uid.clone(),
                universe,
                address,
                channels: need,
            });
        }
        spans.push((universe, start, end, &item.uid));
    }

    spans.sort_by_key(|&(u, start, _, _)| (u, start));
    for pair in spans.windows(2) {
        let (u1, _, end1, uid1) = pair[0];
        let (u2, start2, _, uid2) = pair[1];
        if u1 == u2 && start2 <= end1 {
            errors.push(PatchError::Overlap {
                universe: u1,
                first: uid1.to_string(),
                second: uid2.to_string(),
            });
        }
    }

    errors
}

/// Sorted list of universes referenced by at least one fixture.
pub fn universes_in_use(items: &[Item]) -> Vec<u16> {
    let mut universes: Vec<u16> = items
        .iter()
        .filter(|i| i.is_fixture())
        .filter_map(|i| i.universe)
        .collect();
    universes.sort_unstable();
    universes.dedup();
    universes
}
