#![forbid(unsafe_code)]

//! Folio public facade crate.
//!
//! Re-exports the section model, placement engine, drag session and editor
//! from the internal crates, and offers a prelude for hosts embedding the
//! section editor.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use folio_core::geometry::{PointerPosition, Rect, VerticalHalf};
#[cfg(feature = "tracing-json")]
pub use folio_core::{LoggingInitError, init_json_logging};

// --- Layout re-exports -----------------------------------------------------

pub use folio_layout::{
    Area, AreaConfig, AreaConfigPatch, LayoutDecodeError, LayoutStructure, LayoutStructurePatch,
    OrderingIssue, OrderingReport, Placement, ResponsiveConfig, ResponsivePatch, Section,
    SectionConfig, SectionDecodeError, SectionId, SectionKind, SectionWithPlacement,
    calculate_adjusted_index, decorate_with_placement, group_by_area, merge, move_section,
    ordering_report, repair_ordering, sections_from_json, strip_placement,
};

// --- Widget re-exports -----------------------------------------------------

pub use folio_widgets::{
    DataTransfer, DataTransferError, DragCancelReason, DragEffect, DragPayload, DragPhase,
    DragSession, DragSessionConfig, DragTransition, MemoryTransfer, SectionDragEvent,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use folio_runtime::{Editor, EditorConfig, EditorHooks};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Folio hosts.
#[derive(Debug)]
pub enum Error {
    /// A saved section list could not be decoded.
    Sections(SectionDecodeError),
    /// A layout structure or patch could not be decoded.
    Layout(LayoutDecodeError),
    /// The host refused a drag payload write.
    Transfer(DataTransferError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sections(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sections(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Transfer(err) => Some(err),
        }
    }
}

impl From<SectionDecodeError> for Error {
    fn from(err: SectionDecodeError) -> Self {
        Self::Sections(err)
    }
}

impl From<LayoutDecodeError> for Error {
    fn from(err: LayoutDecodeError) -> Self {
        Self::Layout(err)
    }
}

impl From<DataTransferError> for Error {
    fn from(err: DataTransferError) -> Self {
        Self::Transfer(err)
    }
}

/// Standard result type for Folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build an editor from stored JSON: the template layout, the section list
/// and, if the user has customized the layout before, their patch.
#[cfg(feature = "runtime")]
pub fn load_editor(
    layout_json: &str,
    sections_json: &str,
    patch_json: Option<&str>,
) -> Result<Editor> {
    let base = LayoutStructure::from_json(layout_json)?;
    let sections = sections_from_json(sections_json)?;
    let patch = patch_json
        .map(LayoutStructurePatch::from_json)
        .transpose()?
        .unwrap_or_default();
    Ok(Editor::new(base, sections).with_patch(patch))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Area, DataTransfer, DragCancelReason, DragSession, Error, LayoutStructure,
        LayoutStructurePatch, MemoryTransfer, PointerPosition, Rect, Result, Section, SectionKind,
        merge, move_section,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{Editor, EditorConfig, EditorHooks};

    pub use crate::{core, layout, widgets};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use folio_core as core;
pub use folio_layout as layout;
#[cfg(feature = "runtime")]
pub use folio_runtime as runtime;
pub use folio_widgets as widgets;
