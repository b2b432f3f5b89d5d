//! # stagerig
//!
//! Stage lighting plot editor: place fixtures and hanging bars on a
//! canvas, snap fixtures onto bars, auto-patch DMX addresses, and export
//! the plan as JSON, a CSV patch sheet, a raster image or a printable
//! rider.
//!
//! The workspace is organized as:
//!
//! 1. **stagerig-core** - geometry primitives, units, the fixture catalog
//!    and the error taxonomy
//! 2. **stagerig-plot** - the plot document: snap engine, auto-patcher,
//!    state container and exporters
//! 3. **stagerig** - the command line binary

pub use stagerig_core::{
    channels_from_mode, fixture_catalog, Error, ExportError, FixtureType, IconRef, ImportError,
    PatchError, Point, Result,
};
pub use stagerig_plot::{
    render_rider, ExportFormat, Group, IconSet, Item, ItemKind, PlotFile, PlotState,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Console output with RUST_LOG environment variable support, INFO by
/// default.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
