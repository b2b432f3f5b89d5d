//! Placed items: fixtures and hanging bars.

use serde::{Deserialize, Serialize};
use stagerig_core::catalog::{channels_from_mode, FixtureType};
use stagerig_core::Point;
use uuid::Uuid;

/// What a placed item is: the structural bar kind, or a fixture type drawn
/// from the catalog.
///
/// Serialized as a plain string (`"bar"` or the catalog id) so plan files
/// stay readable and imports from older files keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    Bar,
    Fixture(String),
}

impl From<String> for ItemKind {
    fn from(s: String) -> Self {
        if s == "bar" {
            ItemKind::Bar
        } else {
            ItemKind::Fixture(s)
        }
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Bar => "bar".to_string(),
            ItemKind::Fixture(id) => id,
        }
    }
}

impl Default for ItemKind {
    fn default() -> Self {
        ItemKind::Fixture(String::new())
    }
}

fn one() -> f64 {
    1.0
}

/// One object placed on the stage canvas.
///
/// Bars never carry DMX identity (`mode`/`channels`/`universe`/`address`)
/// or a display `number`; those fields stay `None`. Import is deliberately
/// permissive: every field except `uid` has a default so partially formed
/// items from hand-edited plans round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque unique id, generated at creation, stable for the item's life.
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Rotation in degrees. Any real value is accepted.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
    /// Selected operating mode, fixtures only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// DMX footprint derived from `mode`, fixtures only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universe: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<u16>,
    /// Power draw in watts, fixtures only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_w: Option<f64>,
    /// Dense 1..N display number over all fixtures; `None` for bars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Optional label override for the patch sheet sequence column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<u32>,
    /// Uid of the bar this fixture is attached to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl Item {
    /// Creates a new bar at the given canvas position.
    pub fn bar(x: f64, y: f64) -> Self {
        Self {
            uid: new_uid(),
            kind: ItemKind::Bar,
            name: "Bar".to_string(),
            x,
            y,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            mode: None,
            channels: None,
            universe: None,
            address: None,
            power_w: None,
            number: None,
            marker: None,
            connected_to: None,
            group_id: None,
        }
    }

    /// Creates a new fixture of the given catalog type.
    pub fn fixture(fixture_type: &FixtureType, x: f64, y: f64, number: u32) -> Self {
        Self {
            uid: new_uid(),
            kind: ItemKind::Fixture(fixture_type.id.clone()),
            name: fixture_type.name.clone(),
            x,
            y,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            mode: Some(fixture_type.default_mode.clone()),
            channels: Some(channels_from_mode(&fixture_type.default_mode)),
            universe: Some(1),
            address: Some(1),
            power_w: Some(fixture_type.power_w),
            number: Some(number),
            marker: None,
            connected_to: None,
            group_id: None,
        }
    }

    pub fn is_bar(&self) -> bool {
        self.kind == ItemKind::Bar
    }

    pub fn is_fixture(&self) -> bool {
        !self.is_bar()
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// DMX footprint; never zero.
    pub fn channel_count(&self) -> u16 {
        self.channels.unwrap_or(1).max(1)
    }

    /// Catalog id for fixtures, `None` for bars.
    pub fn fixture_type_id(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Bar => None,
            ItemKind::Fixture(id) => Some(id.as_str()),
        }
    }
}

/// A named fixture group. Fixtures reference it by `group_id`; the group
/// owns nothing beyond its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_uid(),
            name: name.into(),
        }
    }
}

/// Generates a fresh opaque item/group id.
pub fn new_uid() -> String {
    Uuid::new_v4().to_string()
}
