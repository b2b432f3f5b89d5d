//! # Stagerig Core
//!
//! Foundation crate for the stagerig workspace: shared geometry primitives,
//! stage/DMX units and constants, the static fixture catalog, and the error
//! taxonomy used by every other crate.
//!
//! ## Components
//!
//! - **Geometry**: the [`Point`] type used for all canvas coordinates
//! - **Units**: meters-to-pixels conversion and the fixed layout constants
//!   (bar length, snap spacing, icon footprint, DMX universe size)
//! - **Catalog**: the built-in fixture-type registry with operating modes
//!   and icon references
//! - **Errors**: `thiserror` enums for import, patch and export failures

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod units;

pub use catalog::{channels_from_mode, fixture_catalog, FixtureType, IconRef};
pub use error::{Error, ExportError, ImportError, PatchError, Result};
pub use geometry::Point;
