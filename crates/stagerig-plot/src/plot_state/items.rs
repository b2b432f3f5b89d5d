//! Placement, movement and removal of items.

use stagerig_core::catalog::FixtureType;
use stagerig_core::Point;

use crate::item::Item;
use crate::rig::{find_bar_near, snap_to_bar, BarFrame};

use super::PlotState;

impl PlotState {
    /// Places a new bar at the given position and selects it.
    pub fn add_bar(&mut self, x: f64, y: f64) -> String {
        let bar = Item::bar(x, y);
        let uid = bar.uid.clone();
        self.items.push(bar);
        self.selected = Some(uid.clone());
        uid
    }

    /// Places a new fixture at the drop point and selects it.
    ///
    /// If the drop lands near a bar the fixture snaps onto it immediately
    /// and records the attachment; otherwise it sits free at the drop
    /// point. The fixture gets the next display number.
    pub fn add_fixture(&mut self, fixture_type: &FixtureType, x: f64, y: f64) -> String {
        let number = self.next_fixture_number();
        let mut fixture = Item::fixture(fixture_type, x, y, number);

        if let Some(bar) = find_bar_near(self.items.iter(), Point::new(x, y)) {
            let snap = snap_to_bar(bar, Point::new(x, y));
            fixture.x = snap.position.x;
            fixture.y = snap.position.y;
            fixture.connected_to = Some(bar.uid.clone());
        }

        let uid = fixture.uid.clone();
        self.items.push(fixture);
        self.selected = Some(uid.clone());
        uid
    }

    /// Moves an item to a new world position.
    ///
    /// Fixtures snap live: near a bar the position is replaced by the
    /// nearest attachment station and the connection recorded; away from
    /// every bar the fixture moves freely and detaches. Bars translate
    /// rigidly, carrying their attached fixtures by the same delta so
    /// stations are preserved exactly.
    pub fn move_item(&mut self, uid: &str, to: Point) {
        let Some(idx) = self.items.iter().position(|i| i.uid == uid) else {
            return;
        };

        if self.items[idx].is_bar() {
            let dx = to.x - self.items[idx].x;
            let dy = to.y - self.items[idx].y;
            self.items[idx].x = to.x;
            self.items[idx].y = to.y;
            for item in &mut self.items {
                if item.connected_to.as_deref() == Some(uid) {
                    item.x += dx;
                    item.y += dy;
                }
            }
            return;
        }

        let nearby = find_bar_near(self.items.iter(), to)
            .map(|bar| (bar.uid.clone(), snap_to_bar(bar, to)));
        let item = &mut self.items[idx];
        match nearby {
            Some((bar_uid, snap)) => {
                item.x = snap.position.x;
                item.y = snap.position.y;
                item.connected_to = Some(bar_uid);
            }
            None => {
                item.x = to.x;
                item.y = to.y;
                item.connected_to = None;
            }
        }
    }

    /// Rotates a bar, re-seating its attached fixtures.
    ///
    /// Each fixture's offset is read in the bar's old frame, carried into
    /// the new frame, and then snapped again, so fixtures end up on valid
    /// stations of the rotated bar rather than floating at stale world
    /// positions.
    pub fn rotate_bar(&mut self, uid: &str, rotation_deg: f64) {
        let Some(idx) = self.items.iter().position(|i| i.uid == uid && i.is_bar()) else {
            return;
        };

        let old_frame = BarFrame::of(&self.items[idx]);
        self.items[idx].rotation = rotation_deg;
        let bar = self.items[idx].clone();
        let new_frame = BarFrame::of(&bar);

        for item in &mut self.items {
            if item.connected_to.as_deref() != Some(uid) {
                continue;
            }
            let local = old_frame.to_local(item.position());
            let carried = new_frame.to_world(local);
            let snap = snap_to_bar(&bar, carried);
            item.x = snap.position.x;
            item.y = snap.position.y;
        }
    }

    /// Removes an item by uid.
    ///
    /// Removing a bar leaves its fixtures in place but detached. Removing
    /// a fixture closes the gap in the display numbering.
    pub fn remove_item(&mut self, uid: &str) {
        let Some(idx) = self.items.iter().position(|i| i.uid == uid) else {
            return;
        };
        let removed = self.items.remove(idx);

        if removed.is_bar() {
            for item in &mut self.items {
                if item.connected_to.as_deref() == Some(uid) {
                    item.connected_to = None;
                }
            }
        } else {
            self.renumber_fixtures();
        }

        if self.selected.as_deref() == Some(uid) {
            self.selected = None;
        }
    }

    pub fn remove_selected(&mut self) {
        if let Some(uid) = self.selected.clone() {
            self.remove_item(&uid);
        }
    }

    /// Moves an item to the bottom of the draw order.
    pub fn send_to_back(&mut self, uid: &str) {
        if let Some(idx) = self.items.iter().position(|i| i.uid == uid) {
            let item = self.items.remove(idx);
            self.items.insert(0, item);
        }
    }
}
