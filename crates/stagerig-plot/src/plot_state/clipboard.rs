//! One-slot clipboard for plan items.

use stagerig_core::units::PASTE_OFFSET_PX;

use crate::item::new_uid;

use super::PlotState;

impl PlotState {
    /// Copies the selected item into the clipboard slot.
    pub fn copy_selected(&mut self) {
        self.clipboard = self.selected_item().cloned();
    }

    /// Copies the selected item, then removes it from the plan.
    pub fn cut_selected(&mut self) {
        self.copy_selected();
        self.remove_selected();
    }

    /// Pastes the clipboard item as a new item, offset from the original.
    ///
    /// The paste gets a fresh uid, a fixture gets the next display number,
    /// and any bar attachment is dropped since the offset position is no
    /// longer a station. Pasting again offsets again from the same source.
    /// Returns the new uid, or `None` when the clipboard is empty.
    pub fn paste(&mut self) -> Option<String> {
        let mut item = self.clipboard.clone()?;
        item.uid = new_uid();
        item.x += PASTE_OFFSET_PX;
        item.y += PASTE_OFFSET_PX;
        item.connected_to = None;
        if item.is_fixture() {
            item.number = Some(self.next_fixture_number());
        }

        let uid = item.uid.clone();
        self.items.push(item);
        self.selected = Some(uid.clone());
        Some(uid)
    }

    pub fn clipboard_is_empty(&self) -> bool {
        self.clipboard.is_none()
    }
}
