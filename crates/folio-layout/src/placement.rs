//! Derived placement view over a section list.
//!
//! The store keeps plain [`Section`] records. Editors that render an
//! "available sections" pool next to the page decorate the list with its
//! [`Placement`] on the way in and strip it again on the way out. Both
//! projections preserve count and order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::section::{Area, Placement, Section};

/// A section together with its derived placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionWithPlacement {
    #[serde(flatten)]
    pub section: Section,
    pub placement: Placement,
}

impl SectionWithPlacement {
    /// Decorate one section.
    #[must_use]
    pub fn new(section: Section) -> Self {
        let placement = section.placement();
        Self { section, placement }
    }
}

impl From<Section> for SectionWithPlacement {
    fn from(section: Section) -> Self {
        Self::new(section)
    }
}

/// Attach the derived placement to every section.
#[must_use]
pub fn decorate_with_placement(sections: &[Section]) -> Vec<SectionWithPlacement> {
    sections
        .iter()
        .cloned()
        .map(SectionWithPlacement::new)
        .collect()
}

/// Drop the derived placement, returning the stored representation.
#[must_use]
pub fn strip_placement(sections: Vec<SectionWithPlacement>) -> Vec<Section> {
    sections.into_iter().map(|s| s.section).collect()
}

/// Partition sections by area.
///
/// Every area key is present, possibly with an empty list. Sections keep their
/// input order inside each bucket; callers sort by `order` when iterating.
#[must_use]
pub fn group_by_area(sections: &[Section]) -> BTreeMap<Area, Vec<Section>> {
    let mut groups: BTreeMap<Area, Vec<Section>> =
        Area::ALL.into_iter().map(|area| (area, Vec::new())).collect();
    for section in sections {
        groups.entry(section.area).or_default().push(section.clone());
    }
    groups
}

/// Sections of one area sorted by `order`.
///
/// The sort is stable, so duplicated orders keep their input order.
#[must_use]
pub fn sections_in_area(sections: &[Section], area: Area) -> Vec<&Section> {
    let mut in_area: Vec<&Section> = sections.iter().filter(|s| s.area == area).collect();
    in_area.sort_by_key(|s| s.order);
    in_area
}

/// Position of a section within its area's order-sorted list.
#[must_use]
pub fn position_in_area(sections: &[Section], id: &str, area: Area) -> Option<usize> {
    sections_in_area(sections, area)
        .iter()
        .position(|s| s.id == *id)
}

/// Sections rendered in the page.
pub fn placed(sections: &[Section]) -> impl Iterator<Item = &Section> {
    sections
        .iter()
        .filter(|s| s.placement() == Placement::Placed)
}

/// Sections waiting in the pool (floating or disabled).
pub fn unplaced(sections: &[Section]) -> impl Iterator<Item = &Section> {
    sections
        .iter()
        .filter(|s| s.placement() == Placement::Unplaced)
}
