#![forbid(unsafe_code)]

//! Native drag payload channel.
//!
//! Browsers carry a small typed payload alongside a drag gesture. The section
//! editor writes the dragged section's id into it on drag start and reads it
//! back on drop when the in-memory session has lost the dragged item (for
//! example when the drag started in another frame).
//!
//! The channel is best effort on both ends: [`DataTransfer::set_data`] may be
//! refused and [`DataTransfer::get_data`] may come back empty. Neither is
//! treated as an error by the drag session.
//!
//! ## Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Write refused | Payload locked outside `dragstart` | Effect records `payload_attached: false` |
//! | Type not offered | Drag came from outside the editor | In-memory item, else ignored |

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Payload type used for section ids.
pub const SECTION_DRAG_TYPE: &str = "application/x-folio-section";

// ---------------------------------------------------------------------------
// DragPayload
// ---------------------------------------------------------------------------

/// Data carried by the native drag channel.
///
/// ```
/// # use folio_widgets::drag::{DragPayload, SECTION_DRAG_TYPE};
/// let payload = DragPayload::section_id(SECTION_DRAG_TYPE, "hero");
/// assert_eq!(payload.drag_type, "application/x-folio-section");
/// assert_eq!(payload.as_text(), Some("hero"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    /// MIME-like type identifier.
    pub drag_type: String,
    /// Raw serialized data.
    pub data: Vec<u8>,
}

impl DragPayload {
    #[must_use]
    pub fn new(drag_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            drag_type: drag_type.into(),
            data,
        }
    }

    /// Payload naming one section.
    #[must_use]
    pub fn section_id(drag_type: impl Into<String>, id: &str) -> Self {
        Self::new(drag_type, id.as_bytes().to_vec())
    }

    /// Attempt to decode the data as a UTF-8 string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

// ---------------------------------------------------------------------------
// DataTransfer
// ---------------------------------------------------------------------------

/// Why a payload write was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataTransferError {
    /// The host only accepts writes while the drag is starting.
    ReadOnly,
    /// The host does not carry this payload type.
    UnsupportedType { drag_type: String },
}

impl fmt::Display for DataTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "drag payload is read-only"),
            Self::UnsupportedType { drag_type } => {
                write!(f, "drag payload type {drag_type:?} is not supported")
            }
        }
    }
}

impl std::error::Error for DataTransferError {}

/// Host-provided drag payload store.
pub trait DataTransfer {
    /// Attach a payload, replacing any payload of the same type.
    fn set_data(&mut self, payload: DragPayload) -> Result<(), DataTransferError>;

    /// Read the payload of `drag_type`, if the host offers one.
    fn get_data(&self, drag_type: &str) -> Option<DragPayload>;
}

/// In-memory [`DataTransfer`] for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransfer {
    payloads: BTreeMap<String, DragPayload>,
    read_only: bool,
}

impl MemoryTransfer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transfer that refuses every write, like a browser payload outside
    /// `dragstart`.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            payloads: BTreeMap::new(),
            read_only: true,
        }
    }

    /// Pre-seed a payload regardless of the read-only flag.
    #[must_use]
    pub fn with_payload(mut self, payload: DragPayload) -> Self {
        self.payloads.insert(payload.drag_type.clone(), payload);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn clear(&mut self) {
        self.payloads.clear();
    }
}

impl DataTransfer for MemoryTransfer {
    fn set_data(&mut self, payload: DragPayload) -> Result<(), DataTransferError> {
        if self.read_only {
            return Err(DataTransferError::ReadOnly);
        }
        self.payloads.insert(payload.drag_type.clone(), payload);
        Ok(())
    }

    fn get_data(&self, drag_type: &str) -> Option<DragPayload> {
        self.payloads.get(drag_type).cloned()
    }
}

/// A transfer with nothing in it. Used when the host has no payload channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransfer;

impl DataTransfer for NoTransfer {
    fn set_data(&mut self, payload: DragPayload) -> Result<(), DataTransferError> {
        Err(DataTransferError::UnsupportedType {
            drag_type: payload.drag_type,
        })
    }

    fn get_data(&self, _drag_type: &str) -> Option<DragPayload> {
        None
    }
}
