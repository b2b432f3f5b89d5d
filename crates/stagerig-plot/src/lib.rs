//! Plot document for stagerig.
//!
//! Everything above the core primitives lives here: the placed-item
//! model, the bar snap engine, the DMX auto-patcher, the editable
//! `PlotState` container, and the exporters (JSON plan files, CSV patch
//! sheets, raster images, the printable rider).

pub mod font_manager;
pub mod icons;
pub mod item;
pub mod patch;
pub mod patch_report;
pub mod plot_state;
pub mod render;
pub mod rider;
pub mod rig;
pub mod serialization;

pub use icons::{load_icon_set, IconSet};
pub use item::{new_uid, Group, Item, ItemKind};
pub use patch::{auto_patch, universes_in_use, validate_patch};
pub use plot_state::{EquipmentLine, ItemUpdate, PlotState};
pub use render::{export_image, render_stage, ExportFormat};
pub use rider::render_rider;
pub use rig::{find_bar_near, is_near_bar, snap_to_bar, BarFrame, Side, SnapResult};
pub use serialization::PlotFile;
