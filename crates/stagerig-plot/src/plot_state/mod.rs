//! Central document state for a lighting plan.
//!
//! `PlotState` owns the placed items, the plan title, fixture groups and
//! the transient editor state (selection, clipboard). Operations are split
//! across submodules: item placement and movement in `items`, the one-slot
//! clipboard in `clipboard`, file round-trips in `file_io`.

mod clipboard;
mod file_io;
mod items;

use std::collections::BTreeMap;

use stagerig_core::catalog::channels_from_mode;

use crate::item::{Group, Item};
use crate::patch;

/// Partial update applied to an item. `None` fields are left alone;
/// `marker` uses a nested `Option` so it can be both set and cleared.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub mode: Option<String>,
    pub rotation: Option<f64>,
    pub power_w: Option<f64>,
    pub marker: Option<Option<u32>>,
}

/// One line of the equipment count: identical fixtures collapsed together.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentLine {
    pub name: String,
    pub mode: Option<String>,
    pub count: usize,
    pub total_power_w: f64,
}

/// The editable lighting plan.
#[derive(Debug, Clone, Default)]
pub struct PlotState {
    pub items: Vec<Item>,
    pub title: String,
    pub groups: Vec<Group>,
    /// Uid of the selected item, if any.
    pub selected: Option<String>,
    pub(crate) clipboard: Option<Item>,
}

impl PlotState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            title: "Untitled plot".to_string(),
            groups: Vec::new(),
            selected: None,
            clipboard: None,
        }
    }

    pub fn find(&self, uid: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.uid == uid)
    }

    pub fn find_mut(&mut self, uid: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.uid == uid)
    }

    pub fn select(&mut self, uid: Option<&str>) {
        self.selected = uid.map(str::to_string);
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected.as_deref().and_then(|uid| self.find(uid))
    }

    /// Lowest unused display number: one past the current maximum.
    pub fn next_fixture_number(&self) -> u32 {
        self.items
            .iter()
            .filter_map(|i| i.number)
            .max()
            .map_or(1, |n| n + 1)
    }

    /// Reassigns display numbers densely as 1..N.
    ///
    /// Fixtures keep their relative order (by current number, unnumbered
    /// last), so removing fixture 2 of [1,2,3,4] yields [1,2,3]. Running
    /// it twice changes nothing.
    pub fn renumber_fixtures(&mut self) {
        let mut order: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, i)| i.is_fixture())
            .map(|(idx, _)| idx)
            .collect();
        order.sort_by_key(|&idx| self.items[idx].number.map_or(u32::MAX, |n| n));
        for (seq, idx) in order.into_iter().enumerate() {
            self.items[idx].number = Some(seq as u32 + 1);
        }
    }

    /// Repacks every fixture's DMX address. See [`patch::auto_patch`].
    pub fn auto_patch(&mut self) {
        patch::auto_patch(&mut self.items);
    }

    pub fn universes_in_use(&self) -> Vec<u16> {
        patch::universes_in_use(&self.items)
    }

    /// Renames a fixture's operating mode, recomputing its DMX footprint.
    pub fn set_mode(&mut self, uid: &str, mode: &str) {
        if let Some(item) = self.find_mut(uid) {
            if item.is_fixture() {
                item.mode = Some(mode.to_string());
                item.channels = Some(channels_from_mode(mode));
            }
        }
    }

    /// Merges a partial update into an item. A mode change goes through
    /// the same footprint recomputation as [`set_mode`](Self::set_mode).
    pub fn update_item(&mut self, uid: &str, update: ItemUpdate) {
        if let Some(mode) = update.mode {
            self.set_mode(uid, &mode);
        }
        if let Some(rotation) = update.rotation {
            // Rotating a bar has to re-seat its fixtures.
            if self.find(uid).is_some_and(Item::is_bar) {
                self.rotate_bar(uid, rotation);
            } else if let Some(item) = self.find_mut(uid) {
                item.rotation = rotation;
            }
        }
        let Some(item) = self.find_mut(uid) else {
            return;
        };
        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(power_w) = update.power_w {
            item.power_w = Some(power_w);
        }
        if let Some(marker) = update.marker {
            item.marker = marker;
        }
    }

    /// Total connected load over all fixtures, in watts.
    pub fn total_power_w(&self) -> f64 {
        self.items.iter().filter_map(|i| i.power_w).sum()
    }

    /// Equipment count grouped by fixture name and mode, bars excluded.
    /// Rows come out sorted by name then mode.
    pub fn equipment_summary(&self) -> Vec<EquipmentLine> {
        let mut lines: BTreeMap<(String, Option<String>), (usize, f64)> = BTreeMap::new();
        for item in self.items.iter().filter(|i| i.is_fixture()) {
            let entry = lines
                .entry((item.name.clone(), item.mode.clone()))
                .or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += item.power_w.unwrap_or(0.0);
        }
        lines
            .into_iter()
            .map(|((name, mode), (count, total_power_w))| EquipmentLine {
                name,
                mode,
                count,
                total_power_w,
            })
            .collect()
    }

    /// Number of bars in the plan.
    pub fn bar_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_bar()).count()
    }

    pub fn add_group(&mut self, name: impl Into<String>) -> String {
        let group = Group::new(name);
        let id = group.id.clone();
        self.groups.push(group);
        id
    }

    /// Removes a group and detaches its members.
    pub fn remove_group(&mut self, group_id: &str) {
        self.groups.retain(|g| g.id != group_id);
        for item in &mut self.items {
            if item.group_id.as_deref() == Some(group_id) {
                item.group_id = None;
            }
        }
    }

    /// Puts an item into a group, or takes it out of any group.
    pub fn assign_group(&mut self, uid: &str, group_id: Option<&str>) {
        let valid = group_id.map_or(true, |id| self.groups.iter().any(|g| g.id == id));
        if !valid {
            return;
        }
        if let Some(item) = self.find_mut(uid) {
            item.group_id = group_id.map(str::to_string);
        }
    }

    /// Every member of a group, in draw order.
    pub fn group_members(&self, group_id: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| i.group_id.as_deref() == Some(group_id))
            .collect()
    }
}
