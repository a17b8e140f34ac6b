//! Placement engine: relocating sections while keeping per-area ordering.
//!
//! All operations are pure. They take the current list by reference and return
//! a new list; the caller swaps its stored list in one assignment.
//!
//! # Ordering invariant
//!
//! For every rendered area, the `order` values of the sections in that area
//! are exactly `1..=N`. The floating pool is exempt: unplaced sections carry
//! `order = 0`. [`ordering_report`] checks the invariant and
//! [`repair_ordering`] re-establishes it for lists loaded from storage.
//!
//! # Locality
//!
//! [`move_section`] renumbers the target area only. The area the section left
//! keeps its previous orders, so it may contain a gap until the next move into
//! it or a [`repair_ordering`] pass. [`unplace`] is the exception: it compacts
//! the vacated area because the section leaves the page entirely.
//!
//! # Failure Modes
//!
//! | Input | Behavior |
//! |-------|----------|
//! | Unknown section id | List returned unchanged |
//! | Insert index past the end | Clamped to append |
//! | `None` insert index | Append |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::placement::{position_in_area, sections_in_area};
use crate::section::{Area, Section};

fn order_value(order: usize) -> u32 {
    u32::try_from(order).unwrap_or(u32::MAX)
}

fn order_for_index(index: usize) -> u32 {
    order_value(index + 1)
}

/// Move `dragged_id` into `target_area` at `insert_index`.
///
/// `insert_index` indexes the target area's order-sorted list *after* the
/// dragged section has been removed from it; `None` appends. The moved section
/// becomes enabled and the whole target area is renumbered `1..=N`. Sections in
/// every other area are returned untouched.
#[must_use]
pub fn move_section(
    sections: &[Section],
    dragged_id: &str,
    target_area: Area,
    insert_index: Option<usize>,
) -> Vec<Section> {
    let Some(dragged_pos) = sections.iter().position(|s| s.id == *dragged_id) else {
        folio_core::debug!(dragged_id, "move ignored: unknown section");
        return sections.to_vec();
    };

    let mut dragged = sections[dragged_pos].clone();
    let (mut target, mut result): (Vec<Section>, Vec<Section>) = sections
        .iter()
        .enumerate()
        .filter(|(pos, _)| *pos != dragged_pos)
        .map(|(_, s)| s.clone())
        .partition(|s| s.area == target_area);
    target.sort_by_key(|s| s.order);

    let index = insert_index.map_or(target.len(), |i| i.min(target.len()));
    folio_core::trace!(
        dragged_id,
        from = %dragged.area,
        to = %target_area,
        requested = ?insert_index,
        index,
        "move section"
    );

    dragged.area = target_area;
    dragged.enabled = true;
    target.insert(index, dragged);
    for (i, section) in target.iter_mut().enumerate() {
        section.order = order_for_index(i);
    }

    result.extend(target);
    result
}

/// Convert a raw hover index into the index [`move_section`] expects.
///
/// Hover indices are computed against the area's list *including* the dragged
/// section. When the dragged section already sits in `target_area` ahead of the
/// hover slot, removing it shifts every later slot up by one, so the index is
/// decremented. In every other case the hover index is returned unchanged.
#[must_use]
pub fn calculate_adjusted_index(
    sections: &[Section],
    dragged_id: &str,
    target_area: Area,
    hover_index: Option<usize>,
) -> Option<usize> {
    let hover = hover_index?;
    match position_in_area(sections, dragged_id, target_area) {
        Some(current) if current < hover => Some(hover - 1),
        _ => Some(hover),
    }
}

/// Show or hide a section without moving it.
#[must_use]
pub fn set_section_enabled(sections: &[Section], id: &str, enabled: bool) -> Vec<Section> {
    sections
        .iter()
        .map(|s| {
            if s.id == *id {
                Section {
                    enabled,
                    ..s.clone()
                }
            } else {
                s.clone()
            }
        })
        .collect()
}

/// Return a section to the floating pool without deleting it.
///
/// The section becomes `floating`, disabled and `order = 0`. The area it left
/// is renumbered so its remaining sections stay contiguous.
#[must_use]
pub fn unplace(sections: &[Section], id: &str) -> Vec<Section> {
    let Some(pos) = sections.iter().position(|s| s.id == *id) else {
        folio_core::debug!(id, "unplace ignored: unknown section");
        return sections.to_vec();
    };

    let mut result = sections.to_vec();
    let vacated = result[pos].area;
    let section = &mut result[pos];
    section.area = Area::Floating;
    section.enabled = false;
    section.order = 0;

    if vacated.is_rendered() {
        renumber_area(&mut result, vacated);
    }
    result
}

/// Renumber every rendered area to `1..=N`.
///
/// Relative order is kept; ties keep their input order, and sections with
/// `order = 0` (never ranked) go last. The floating pool is left as is.
#[must_use]
pub fn repair_ordering(sections: &[Section]) -> Vec<Section> {
    let mut result = sections.to_vec();
    for area in Area::ALL.into_iter().filter(|area| area.is_rendered()) {
        renumber_area(&mut result, area);
    }
    result
}

fn renumber_area(sections: &mut [Section], area: Area) {
    let mut slots: Vec<usize> = sections
        .iter()
        .enumerate()
        .filter(|(_, s)| s.area == area)
        .map(|(pos, _)| pos)
        .collect();
    slots.sort_by_key(|&pos| (sections[pos].order == 0, sections[pos].order, pos));
    for (rank, pos) in slots.into_iter().enumerate() {
        sections[pos].order = order_for_index(rank);
    }
}

/// One violation of the per-area ordering invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum OrderingIssue {
    /// Two or more sections share an order value.
    Duplicate {
        area: Area,
        order: u32,
        count: usize,
    },
    /// An order value in `1..=N` is not used by any section.
    Missing {
        area: Area,
        order: u32,
    },
    /// An order value is 0 or greater than the number of sections in the area.
    OutOfRange {
        area: Area,
        order: u32,
        len: usize,
    },
}

/// Result of checking the ordering invariant across all rendered areas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingReport {
    pub issues: Vec<OrderingIssue>,
}

impl OrderingReport {
    /// True when every rendered area is numbered `1..=N`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues found in one area.
    pub fn issues_in(&self, area: Area) -> impl Iterator<Item = &OrderingIssue> {
        self.issues.iter().filter(move |issue| match issue {
            OrderingIssue::Duplicate { area: a, .. }
            | OrderingIssue::Missing { area: a, .. }
            | OrderingIssue::OutOfRange { area: a, .. } => *a == area,
        })
    }
}

/// Check the ordering invariant for every rendered area.
#[must_use]
pub fn ordering_report(sections: &[Section]) -> OrderingReport {
    let mut issues = Vec::new();
    for area in Area::ALL.into_iter().filter(|area| area.is_rendered()) {
        let in_area = sections_in_area(sections, area);
        let len = in_area.len();
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for section in &in_area {
            *counts.entry(section.order).or_default() += 1;
        }

        for (&order, &count) in &counts {
            if order == 0 || order as usize > len {
                issues.push(OrderingIssue::OutOfRange { area, order, len });
            } else if count > 1 {
                issues.push(OrderingIssue::Duplicate { area, order, count });
            }
        }
        for order in (1..=len).map(order_value) {
            if !counts.contains_key(&order) {
                issues.push(OrderingIssue::Missing { area, order });
            }
        }
    }
    OrderingReport { issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionKind;
    use proptest::prelude::*;

    fn s(id: &str, area: Area, order: u32) -> Section {
        Section::new(id, SectionKind::Custom, id.to_uppercase(), area, order)
    }

    fn ids_in(sections: &[Section], area: Area) -> Vec<(String, u32)> {
        sections_in_area(sections, area)
            .into_iter()
            .map(|s| (s.id.to_string(), s.order))
            .collect()
    }

    fn pairs(items: &[(&str, u32)]) -> Vec<(String, u32)> {
        items.iter().map(|(id, o)| (id.to_string(), *o)).collect()
    }

    fn three() -> Vec<Section> {
        vec![
            s("1", Area::Main, 1),
            s("2", Area::Main, 2),
            s("3", Area::Header, 1),
        ]
    }

    #[test]
    fn cross_area_move_inserts_at_index() {
        let moved = move_section(&three(), "3", Area::Main, Some(1));
        assert_eq!(
            ids_in(&moved, Area::Main),
            pairs(&[("1", 1), ("3", 2), ("2", 3)])
        );
        assert!(ids_in(&moved, Area::Header).is_empty());
    }

    #[test]
    fn cross_area_move_to_front() {
        let moved = move_section(&three(), "3", Area::Main, Some(0));
        assert_eq!(
            ids_in(&moved, Area::Main),
            pairs(&[("3", 1), ("1", 2), ("2", 3)])
        );
        assert!(ids_in(&moved, Area::Header).is_empty());
    }

    #[test]
    fn none_index_appends() {
        let moved = move_section(&three(), "3", Area::Main, None);
        assert_eq!(
            ids_in(&moved, Area::Main),
            pairs(&[("1", 1), ("2", 2), ("3", 3)])
        );
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let moved = move_section(&three(), "3", Area::Main, Some(99));
        assert_eq!(
            ids_in(&moved, Area::Main),
            pairs(&[("1", 1), ("2", 2), ("3", 3)])
        );
    }

    #[test]
    fn unknown_id_is_noop() {
        let sections = three();
        assert_eq!(
            move_section(&sections, "nope", Area::Footer, Some(0)),
            sections
        );
    }

    #[test]
    fn moved_section_becomes_enabled() {
        let mut sections = three();
        sections[2].enabled = false;
        let moved = move_section(&sections, "3", Area::Footer, None);
        let three = moved.iter().find(|s| s.id == *"3").expect("still present");
        assert!(three.enabled);
        assert_eq!(three.area, Area::Footer);
        assert_eq!(three.order, 1);
    }

    #[test]
    fn other_areas_keep_their_orders() {
        let sections = vec![
            s("a", Area::Main, 1),
            s("b", Area::Main, 2),
            s("c", Area::Main, 3),
            s("f", Area::Footer, 1),
        ];
        let moved = move_section(&sections, "b", Area::Footer, Some(0));
        // Source area keeps its gap; only the target is renumbered.
        assert_eq!(
            ids_in(&moved, Area::Main),
            pairs(&[("a", 1), ("c", 3)])
        );
        assert_eq!(ids_in(&moved, Area::Footer), pairs(&[("b", 1), ("f", 2)]));
    }

    #[test]
    fn same_area_move_down_uses_adjusted_index() {
        let sections = vec![
            s("a", Area::Main, 1),
            s("b", Area::Main, 2),
            s("c", Area::Main, 3),
        ];
        // Hovering the bottom half of "c" gives raw index 3.
        let index = calculate_adjusted_index(&sections, "a", Area::Main, Some(3));
        assert_eq!(index, Some(2));
        let moved = move_section(&sections, "a", Area::Main, index);
        assert_eq!(
            ids_in(&moved, Area::Main),
            pairs(&[("b", 1), ("c", 2), ("a", 3)])
        );
    }

    #[test]
    fn same_area_move_up_keeps_index() {
        let sections = vec![
            s("a", Area::Main, 1),
            s("b", Area::Main, 2),
            s("c", Area::Main, 3),
        ];
        let index = calculate_adjusted_index(&sections, "c", Area::Main, Some(0));
        assert_eq!(index, Some(0));
        let moved = move_section(&sections, "c", Area::Main, index);
        assert_eq!(
            ids_in(&moved, Area::Main),
            pairs(&[("c", 1), ("a", 2), ("b", 3)])
        );
    }

    #[test]
    fn adjusted_index_passthrough_cases() {
        let sections = three();
        assert_eq!(
            calculate_adjusted_index(&sections, "1", Area::Main, None),
            None
        );
        assert_eq!(
            calculate_adjusted_index(&sections, "3", Area::Main, Some(2)),
            Some(2)
        );
        assert_eq!(
            calculate_adjusted_index(&sections, "missing", Area::Main, Some(1)),
            Some(1)
        );
        assert_eq!(
            calculate_adjusted_index(&sections, "2", Area::Main, Some(1)),
            Some(1)
        );
    }

    #[test]
    fn set_section_enabled_flips_only_the_flag() {
        let sections = three();
        let toggled = set_section_enabled(&sections, "2", false);
        assert!(!toggled[1].enabled);
        assert_eq!(toggled[1].area, Area::Main);
        assert_eq!(toggled[1].order, 2);
        assert_eq!(toggled[0], sections[0]);
        assert_eq!(set_section_enabled(&sections, "zzz", false), sections);
    }

    #[test]
    fn unplace_moves_to_pool_and_compacts_source() {
        let sections = vec![
            s("a", Area::Main, 1),
            s("b", Area::Main, 2),
            s("c", Area::Main, 3),
        ];
        let result = unplace(&sections, "a");
        let a = &result[0];
        assert_eq!(a.area, Area::Floating);
        assert!(!a.enabled);
        assert_eq!(a.order, 0);
        assert_eq!(ids_in(&result, Area::Main), pairs(&[("b", 1), ("c", 2)]));
        assert!(ordering_report(&result).is_valid());
        assert_eq!(result.len(), sections.len());
    }

    #[test]
    fn unplace_unknown_is_noop() {
        let sections = three();
        assert_eq!(unplace(&sections, "ghost"), sections);
    }

    #[test]
    fn report_flags_gaps_duplicates_and_zero() {
        let sections = vec![
            s("a", Area::Main, 1),
            s("b", Area::Main, 1),
            s("c", Area::Footer, 0),
            s("d", Area::Header, 1),
            s("e", Area::Header, 3),
            s("pool", Area::Floating, 0),
        ];
        let report = ordering_report(&sections);
        assert!(!report.is_valid());
        assert_eq!(
            report.issues_in(Area::Main).cloned().collect::<Vec<_>>(),
            vec![
                OrderingIssue::Duplicate {
                    area: Area::Main,
                    order: 1,
                    count: 2
                },
                OrderingIssue::Missing {
                    area: Area::Main,
                    order: 2
                },
            ]
        );
        assert_eq!(
            report.issues_in(Area::Footer).cloned().collect::<Vec<_>>(),
            vec![
                OrderingIssue::OutOfRange {
                    area: Area::Footer,
                    order: 0,
                    len: 1
                },
                OrderingIssue::Missing {
                    area: Area::Footer,
                    order: 1
                },
            ]
        );
        assert_eq!(
            report.issues_in(Area::Header).cloned().collect::<Vec<_>>(),
            vec![
                OrderingIssue::OutOfRange {
                    area: Area::Header,
                    order: 3,
                    len: 2
                },
                OrderingIssue::Missing {
                    area: Area::Header,
                    order: 2
                },
            ]
        );
        assert_eq!(report.issues_in(Area::Floating).count(), 0);
    }

    #[test]
    fn repair_renumbers_rendered_areas() {
        let sections = vec![
            s("a", Area::Main, 7),
            s("b", Area::Main, 0),
            s("c", Area::Main, 3),
            s("d", Area::Main, 3),
            s("pool", Area::Floating, 0),
        ];
        let repaired = repair_ordering(&sections);
        assert!(ordering_report(&repaired).is_valid());
        assert_eq!(
            ids_in(&repaired, Area::Main),
            pairs(&[("c", 1), ("d", 2), ("a", 3), ("b", 4)])
        );
        assert_eq!(repaired[4].order, 0);
    }

    fn arb_sections() -> impl Strategy<Value = Vec<Section>> {
        proptest::collection::vec(0usize..Area::ALL.len(), 1..12).prop_map(|areas| {
            let raw: Vec<Section> = areas
                .into_iter()
                .enumerate()
                .map(|(i, a)| s(&format!("s{i}"), Area::ALL[a], 0))
                .collect();
            repair_ordering(&raw)
        })
    }

    proptest! {
        #[test]
        fn move_conserves_sections(
            sections in arb_sections(),
            pick in any::<prop::sample::Index>(),
            target in 0usize..Area::ALL.len(),
            index in proptest::option::of(0usize..16),
        ) {
            let id = sections[pick.index(sections.len())].id.clone();
            let moved = move_section(&sections, id.as_str(), Area::ALL[target], index);
            prop_assert_eq!(moved.len(), sections.len());
            let mut before: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
            let mut after: Vec<&str> = moved.iter().map(|s| s.id.as_str()).collect();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn move_renumbers_target_contiguously(
            sections in arb_sections(),
            pick in any::<prop::sample::Index>(),
            target in 0usize..Area::ALL.len(),
            index in proptest::option::of(0usize..16),
        ) {
            let area = Area::ALL[target];
            let id = sections[pick.index(sections.len())].id.clone();
            let moved = move_section(&sections, id.as_str(), area, index);
            let orders: Vec<u32> = sections_in_area(&moved, area).iter().map(|s| s.order).collect();
            let expected: Vec<u32> = (1..=orders.len()).map(order_value).collect();
            prop_assert_eq!(orders, expected);
        }

        #[test]
        fn self_move_is_idempotent(
            sections in arb_sections(),
            pick in any::<prop::sample::Index>(),
        ) {
            let original = &sections[pick.index(sections.len())];
            prop_assume!(original.area.is_rendered());
            let k = position_in_area(&sections, original.id.as_str(), original.area)
                .expect("section is in its own area");
            let moved = move_section(&sections, original.id.as_str(), original.area, Some(k));
            for section in &sections {
                let after = moved.iter().find(|m| m.id == section.id).expect("conserved");
                prop_assert_eq!(after, section);
            }
        }

        #[test]
        fn unplace_keeps_rendered_areas_valid(
            sections in arb_sections(),
            pick in any::<prop::sample::Index>(),
        ) {
            let id = sections[pick.index(sections.len())].id.clone();
            let result = unplace(&sections, id.as_str());
            prop_assert!(ordering_report(&result).is_valid());
        }
    }
}
