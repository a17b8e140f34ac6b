#![forbid(unsafe_code)]

//! Runtime for the Folio section editor.
//!
//! The [`Editor`] owns the section list, the user's layout patch and the one
//! drag session, and reports every change through [`EditorHooks`].

pub mod editor;

pub use editor::{Editor, EditorConfig, EditorHooks, OnLayoutChange, OnSectionsChange};
