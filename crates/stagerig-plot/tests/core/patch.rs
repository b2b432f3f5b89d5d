use stagerig_core::error::PatchError;
use stagerig_plot::patch::{auto_patch, universes_in_use, validate_patch};
use stagerig_plot::Item;

fn fixture_with_channels(number: u32, channels: u16) -> Item {
    let catalog = stagerig_core::fixture_catalog();
    let mut item = Item::fixture(&catalog[0], 0.0, 0.0, number);
    item.channels = Some(channels);
    item
}

fn addresses(items: &[Item]) -> Vec<(u16, u16)> {
    items
        .iter()
        .filter(|i| i.is_fixture())
        .map(|i| (i.universe.unwrap(), i.address.unwrap()))
        .collect()
}

#[test]
fn packs_sequentially_and_overflows_to_next_universe() {
    let mut items = vec![
        fixture_with_channels(1, 4),
        fixture_with_channels(2, 500),
        fixture_with_channels(3, 10),
    ];
    auto_patch(&mut items);
    assert_eq!(addresses(&items), vec![(1, 1), (1, 5), (2, 1)]);
}

#[test]
fn patches_in_collection_order_regardless_of_numbers() {
    // Display numbers [3,1,2]; addresses still follow collection order.
    let mut items = vec![
        fixture_with_channels(3, 8),
        fixture_with_channels(1, 8),
        fixture_with_channels(2, 8),
    ];
    auto_patch(&mut items);
    assert_eq!(addresses(&items), vec![(1, 1), (1, 9), (1, 17)]);
}

#[test]
fn preassigned_universe_seeds_the_search() {
    let mut items = vec![fixture_with_channels(1, 4), fixture_with_channels(2, 4)];
    items[0].universe = Some(2);
    auto_patch(&mut items);
    // The first fixture stays in its universe; the second packs from 1.
    assert_eq!(addresses(&items), vec![(2, 1), (1, 1)]);
}

#[test]
fn missing_universe_defaults_to_one() {
    let mut items = vec![fixture_with_channels(1, 6)];
    items[0].universe = None;
    auto_patch(&mut items);
    assert_eq!(addresses(&items), vec![(1, 1)]);
}

#[test]
fn zero_channel_fixture_still_takes_one_slot() {
    let mut items = vec![fixture_with_channels(1, 0), fixture_with_channels(2, 3)];
    auto_patch(&mut items);
    assert_eq!(addresses(&items), vec![(1, 1), (1, 2)]);
}

#[test]
fn bars_are_left_untouched() {
    let mut items = vec![Item::bar(0.0, 0.0), fixture_with_channels(1, 6)];
    auto_patch(&mut items);
    assert_eq!(items[0].universe, None);
    assert_eq!(items[0].address, None);
    assert_eq!(items[1].universe, Some(1));
}

#[test]
fn repatching_is_idempotent() {
    let mut items = vec![
        fixture_with_channels(1, 12),
        fixture_with_channels(2, 300),
        fixture_with_channels(3, 300),
    ];
    auto_patch(&mut items);
    let first = addresses(&items);
    auto_patch(&mut items);
    assert_eq!(addresses(&items), first);
}

#[test]
fn auto_patch_result_always_validates() {
    let mut items: Vec<Item> = (1..=40)
        .map(|n| fixture_with_channels(n, (n as u16 * 37) % 90 + 1))
        .collect();
    auto_patch(&mut items);
    assert!(validate_patch(&items).is_empty());
}

#[test]
fn oversized_footprint_gets_its_own_universe_and_is_reported() {
    let mut items = vec![
        fixture_with_channels(1, 4),
        fixture_with_channels(2, 600),
        fixture_with_channels(3, 4),
    ];
    auto_patch(&mut items);

    let (u_wide, a_wide) = (items[1].universe.unwrap(), items[1].address.unwrap());
    assert_eq!(a_wide, 1);
    // Nothing else shares the oversized fixture's universe.
    for (i, item) in items.iter().enumerate() {
        if i != 1 {
            assert_ne!(item.universe.unwrap(), u_wide);
        }
    }

    let errors = validate_patch(&items);
    assert!(errors
        .iter()
        .any(|e| matches!(e, PatchError::ChannelsExceedUniverse { channels: 600, .. })));
}

#[test]
fn validate_finds_overlaps_and_out_of_range() {
    let mut a = fixture_with_channels(1, 10);
    a.universe = Some(1);
    a.address = Some(5);
    let mut b = fixture_with_channels(2, 10);
    b.universe = Some(1);
    b.address = Some(8);
    let mut c = fixture_with_channels(3, 16);
    c.universe = Some(2);
    c.address = Some(510);

    let errors = validate_patch(&[a, b, c]);
    assert!(errors.iter().any(|e| matches!(e, PatchError::Overlap { universe: 1, .. })));
    assert!(errors
        .iter()
        .any(|e| matches!(e, PatchError::AddressOutOfRange { universe: 2, address: 510, .. })));
}

#[test]
fn universes_in_use_is_sorted_and_deduped() {
    let mut items = vec![
        fixture_with_channels(1, 1),
        fixture_with_channels(2, 1),
        fixture_with_channels(3, 1),
    ];
    items[0].universe = Some(3);
    items[1].universe = Some(1);
    items[2].universe = Some(3);
    assert_eq!(universes_in_use(&items), vec![1, 3]);
}
