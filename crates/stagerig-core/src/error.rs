//! Error handling for stagerig.
//!
//! Provides error types for the layers of the application:
//! - Import errors (plan files, patch sheets)
//! - Patch errors (DMX address validation)
//! - Export errors (icon loading, rasterization, encoding)
//!
//! All error types use `thiserror` for ergonomic error handling. Failures
//! are always scoped to a single operation; no error here is fatal to the
//! process and none of them triggers an automatic retry.

use thiserror::Error;

/// Import error type
///
/// Raised while reading a plan file or re-parsing an exported patch sheet.
/// An import failure aborts the operation and leaves the in-memory plot
/// untouched.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The file is not valid JSON / CSV for the expected format
    #[error("Malformed plan at {context}: {reason}")]
    Malformed {
        /// Where parsing failed (field, row or file description).
        context: String,
        /// Why parsing failed.
        reason: String,
    },

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Patch error type
///
/// Represents violations of the DMX addressing invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// A single fixture needs more channels than one universe holds
    #[error("Fixture {uid} needs {channels} channels, more than one universe holds")]
    ChannelsExceedUniverse {
        /// The fixture's uid.
        uid: String,
        /// The channel count requested by its mode.
        channels: u16,
    },

    /// A fixture's footprint runs past the end of its universe
    #[error("Fixture {uid} at {universe}.{address} with {channels} channels runs past address 512")]
    AddressOutOfRange {
        /// The fixture's uid.
        uid: String,
        /// The assigned universe.
        universe: u16,
        /// The assigned start address.
        address: u16,
        /// The channel count.
        channels: u16,
    },

    /// Two fixtures occupy overlapping address ranges in one universe
    #[error("Fixtures {first} and {second} overlap in universe {universe}")]
    Overlap {
        /// The universe in which the overlap occurs.
        universe: u16,
        /// Uid of the earlier fixture.
        first: String,
        /// Uid of the later fixture.
        second: String,
    },
}

/// Export error type
///
/// Raised while producing image or report output. Icon loading is an
/// all-or-nothing barrier: one aggregate error carries every failed icon
/// and no partial export is produced.
#[derive(Error, Debug)]
pub enum ExportError {
    /// One or more fixture icons failed to load or rasterize
    #[error("Failed to load icons: {}", failures.join(", "))]
    IconLoad {
        /// Description of each icon that failed.
        failures: Vec<String>,
    },

    /// Rasterization failure (allocation, invalid dimensions)
    #[error("Raster error: {reason}")]
    Raster {
        /// Why rasterization failed.
        reason: String,
    },

    /// Image encoding failure
    #[error("Encode error: {reason}")]
    Encode {
        /// Why encoding failed.
        reason: String,
    },
}

/// Main error type for stagerig
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Patch error
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an import error
    pub fn is_import_error(&self) -> bool {
        matches!(self, Error::Import(_))
    }

    /// Check if this is a patch error
    pub fn is_patch_error(&self) -> bool {
        matches!(self, Error::Patch(_))
    }

    /// Check if this is an export error
    pub fn is_export_error(&self) -> bool {
        matches!(self, Error::Export(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
