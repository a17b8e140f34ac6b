#![forbid(unsafe_code)]

//! Interactive pieces of the section editor.
//!
//! - [`drag`] - the native payload channel ([`DataTransfer`]) and an in-memory
//!   implementation
//! - [`session`] - [`DragSession`], the state machine that turns hover and
//!   drop events into placement engine calls

pub mod drag;
pub mod session;

pub use drag::{
    DataTransfer, DataTransferError, DragPayload, MemoryTransfer, NoTransfer, SECTION_DRAG_TYPE,
};
pub use session::{
    DragCancelReason, DragEffect, DragNoopReason, DragOutcome, DragPhase, DragSession,
    DragSessionConfig, DragTransition, SectionDragEvent,
};
