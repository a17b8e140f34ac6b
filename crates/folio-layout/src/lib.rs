#![forbid(unsafe_code)]

//! Section model, placement engine and layout structure merging.
//!
//! - [`section`] - [`Section`], [`Area`] and the JSON ingestion helper
//! - [`placement`] - derived placed/unplaced view and per-area grouping
//! - [`engine`] - [`move_section`] and the other pure list updates
//! - [`structure`] - [`LayoutStructure`], patches and [`merge`]
//!
//! Every operation takes the current value by reference and returns a new one.
//!
//! ```ignore
//! use folio_layout::{Area, calculate_adjusted_index, move_section};
//!
//! let index = calculate_adjusted_index(&sections, "about", Area::Main, Some(3));
//! let sections = move_section(&sections, "about", Area::Main, index);
//! ```

pub mod engine;
pub mod placement;
pub mod section;
pub mod structure;

pub use engine::{
    OrderingIssue, OrderingReport, calculate_adjusted_index, move_section, ordering_report,
    repair_ordering, set_section_enabled, unplace,
};
pub use placement::{
    SectionWithPlacement, decorate_with_placement, group_by_area, placed, position_in_area,
    sections_in_area, strip_placement, unplaced,
};
pub use section::{
    Area, Placement, Section, SectionConfig, SectionDecodeError, SectionId, SectionKind,
    sections_from_json,
};
pub use structure::{
    AreaConfig, AreaConfigPatch, Areas, LayoutDecodeError, LayoutStructure,
    LayoutStructurePatch, ResponsiveConfig, ResponsivePatch, merge,
};
