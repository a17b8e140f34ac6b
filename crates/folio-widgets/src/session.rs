#![forbid(unsafe_code)]

//! Section drag session.
//!
//! A [`DragSession`] accumulates what the host reports while the user drags a
//! section row: which section is in flight, which area the pointer is over,
//! and the insertion slot derived from the hovered row. On drop it turns that
//! into a [`move_section`] call and hands the new list back to the owner.
//!
//! ```text
//! Idle -> Dragging -> HoveringArea <-> HoveringRow
//!   ^         |              |              |
//!   +---------+--------------+--------------+  (drop / cancel)
//! ```
//!
//! Every call returns a [`DragTransition`] with the phase before and after and
//! an explicit effect, including a [`DragNoopReason`] when the call was
//! ignored. Hover events are last-write-wins snapshots; nothing is queued.
//!
//! ## Invariants
//!
//! 1. `drag_over_index` is only set together with `drag_over_area`.
//! 2. Hover fields are only set while a section is in flight.
//! 3. Drop and cancel always leave the session idle.
//! 4. Cancel never produces a section list.

use serde::{Deserialize, Serialize};

use folio_core::geometry::{PointerPosition, Rect, VerticalHalf};
use folio_layout::{
    Area, Section, SectionId, calculate_adjusted_index, move_section, position_in_area,
};

use crate::drag::{DataTransfer, DragPayload, SECTION_DRAG_TYPE};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Drag session settings. Missing fields decode to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSessionConfig {
    /// Payload type used to carry the dragged section id (default:
    /// [`SECTION_DRAG_TYPE`]).
    pub payload_type: String,
    /// Drop with `index = None` (append) when the drop area differs from the
    /// area of the last hovered row (default: false, the last hover index is
    /// always passed through).
    pub append_on_area_mismatch: bool,
}

impl Default for DragSessionConfig {
    fn default() -> Self {
        Self {
            payload_type: SECTION_DRAG_TYPE.to_owned(),
            append_on_area_mismatch: false,
        }
    }
}

impl DragSessionConfig {
    #[must_use]
    pub fn with_payload_type(mut self, payload_type: impl Into<String>) -> Self {
        self.payload_type = payload_type.into();
        self
    }

    #[must_use]
    pub fn with_append_on_area_mismatch(mut self, append: bool) -> Self {
        self.append_on_area_mismatch = append;
        self
    }
}

// ---------------------------------------------------------------------------
// Events and transitions
// ---------------------------------------------------------------------------

/// Where the session is in the gesture. Derived from the stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    Idle,
    Dragging,
    HoveringArea,
    HoveringRow,
}

/// Why a drag ended without a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragCancelReason {
    /// The host reported drag end and no drop happened.
    DragEnd,
    EscapeKey,
    Blur,
    Programmatic,
}

/// Explicit diagnostics for calls that were safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    /// The hovered row's section is not in the list.
    HoveredRowMissing,
    /// Drop without an in-flight section or a readable payload.
    UnresolvedDraggedId,
}

/// Observable effect of one session call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        section_id: SectionId,
        payload_attached: bool,
    },
    AreaHovered {
        area: Area,
    },
    RowHovered {
        area: Area,
        index: usize,
        half: VerticalHalf,
    },
    RowLeft,
    Dropped {
        section_id: SectionId,
        area: Area,
        /// Index passed to [`move_section`]; `None` appends.
        index: Option<usize>,
    },
    Canceled {
        section_id: Option<SectionId>,
        reason: DragCancelReason,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// One session step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

/// A transition plus the new section list when the step was a drop.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    pub transition: DragTransition,
    pub sections: Option<Vec<Section>>,
}

impl DragOutcome {
    fn without_sections(transition: DragTransition) -> Self {
        Self {
            transition,
            sections: None,
        }
    }
}

/// Raw drag events as a host reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SectionDragEvent {
    DragStart {
        section: Section,
    },
    DragOverArea {
        area: Area,
    },
    DragOverRow {
        section_id: SectionId,
        pointer: PointerPosition,
        row: Rect,
    },
    DragLeaveRow,
    Drop {
        area: Area,
    },
    DragEnd,
    Cancel {
        reason: DragCancelReason,
    },
}

// ---------------------------------------------------------------------------
// DragSession
// ---------------------------------------------------------------------------

/// Transient state of one in-progress section drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSession {
    dragged_item: Option<Section>,
    drag_over_area: Option<Area>,
    drag_over_index: Option<usize>,
    config: DragSessionConfig,
    transition_counter: u64,
}

impl DragSession {
    #[must_use]
    pub fn new(config: DragSessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &DragSessionConfig {
        &self.config
    }

    #[must_use]
    pub fn dragged_item(&self) -> Option<&Section> {
        self.dragged_item.as_ref()
    }

    #[must_use]
    pub const fn drag_over_area(&self) -> Option<Area> {
        self.drag_over_area
    }

    #[must_use]
    pub const fn drag_over_index(&self) -> Option<usize> {
        self.drag_over_index
    }

    /// Number of transitions emitted so far.
    #[must_use]
    pub const fn transition_count(&self) -> u64 {
        self.transition_counter
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.dragged_item.is_none() {
            return DragPhase::Idle;
        }
        match (self.drag_over_area, self.drag_over_index) {
            (_, Some(_)) => DragPhase::HoveringRow,
            (Some(_), None) => DragPhase::HoveringArea,
            (None, None) => DragPhase::Dragging,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.dragged_item.is_some()
    }

    /// Start dragging `section`, replacing any drag already in flight.
    ///
    /// The section id is also written to `transfer`; a refused write is
    /// recorded in the effect and otherwise ignored.
    pub fn begin_drag(
        &mut self,
        section: &Section,
        transfer: &mut dyn DataTransfer,
    ) -> DragTransition {
        let from = self.phase();
        let payload =
            DragPayload::section_id(self.config.payload_type.clone(), section.id.as_str());
        let payload_attached = match transfer.set_data(payload) {
            Ok(()) => true,
            Err(_err) => {
                folio_core::debug!(
                    section_id = %section.id,
                    error = %_err,
                    "drag payload not attached"
                );
                false
            }
        };

        self.dragged_item = Some(section.clone());
        self.drag_over_area = None;
        self.drag_over_index = None;
        self.finish(
            from,
            DragEffect::Started {
                section_id: section.id.clone(),
                payload_attached,
            },
        )
    }

    /// The pointer entered `area` (outside any row).
    pub fn hover_area(&mut self, area: Area) -> DragTransition {
        let from = self.phase();
        if !self.is_active() {
            return self.finish(from, noop(DragNoopReason::IdleWithoutActiveDrag));
        }
        self.drag_over_area = Some(area);
        self.drag_over_index = None;
        self.finish(from, DragEffect::AreaHovered { area })
    }

    /// The pointer moved over the row of section `row_id`.
    ///
    /// The upper half of the row targets the slot before it, the lower half
    /// the slot after it. Slots index the area's order-sorted list including
    /// the dragged section; the drop adjusts for its removal.
    pub fn hover_row(
        &mut self,
        row_id: &str,
        pointer: PointerPosition,
        row: Rect,
        sections: &[Section],
    ) -> DragTransition {
        let from = self.phase();
        if !self.is_active() {
            return self.finish(from, noop(DragNoopReason::IdleWithoutActiveDrag));
        }
        let Some(area) = sections.iter().find(|s| s.id == *row_id).map(|s| s.area) else {
            return self.finish(from, noop(DragNoopReason::HoveredRowMissing));
        };
        let Some(position) = position_in_area(sections, row_id, area) else {
            return self.finish(from, noop(DragNoopReason::HoveredRowMissing));
        };

        let half = row.vertical_half(pointer);
        let index = match half {
            VerticalHalf::Top => position,
            VerticalHalf::Bottom => position + 1,
        };
        folio_core::trace!(row_id, %area, index, ?half, "row hovered");
        self.drag_over_area = Some(area);
        self.drag_over_index = Some(index);
        self.finish(from, DragEffect::RowHovered { area, index, half })
    }

    /// The pointer left a row. Only the index is cleared.
    pub fn leave_row(&mut self) -> DragTransition {
        let from = self.phase();
        if !self.is_active() {
            return self.finish(from, noop(DragNoopReason::IdleWithoutActiveDrag));
        }
        self.drag_over_index = None;
        self.finish(from, DragEffect::RowLeft)
    }

    /// Drop onto `area`.
    ///
    /// The dragged id comes from the in-flight section, else from the payload
    /// in `transfer`. With no id the session resets and nothing moves. The
    /// last hover index is passed through as recorded, unless
    /// [`DragSessionConfig::append_on_area_mismatch`] is set and the row was
    /// hovered in another area.
    pub fn drop(
        &mut self,
        area: Area,
        sections: &[Section],
        transfer: &dyn DataTransfer,
    ) -> DragOutcome {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("section_drop", %area, sections = sections.len());
        #[cfg(feature = "tracing")]
        let _guard = span.enter();

        let from = self.phase();
        let dragged_id = self.dragged_item.as_ref().map(|s| s.id.clone()).or_else(|| {
            transfer
                .get_data(&self.config.payload_type)
                .and_then(|payload| payload.as_text().map(SectionId::from))
        });
        let mismatched = self.drag_over_area != Some(area);
        let hover_index = if self.config.append_on_area_mismatch && mismatched {
            None
        } else {
            self.drag_over_index
        };
        self.reset();

        let Some(section_id) = dragged_id else {
            folio_core::debug!(%area, "drop ignored: no dragged section");
            return DragOutcome::without_sections(
                self.finish(from, noop(DragNoopReason::UnresolvedDraggedId)),
            );
        };

        let index = calculate_adjusted_index(sections, section_id.as_str(), area, hover_index);
        let moved = move_section(sections, section_id.as_str(), area, index);
        folio_core::debug!(
            section_id = %section_id,
            %area,
            ?hover_index,
            ?index,
            "section dropped"
        );

        DragOutcome {
            transition: self.finish(
                from,
                DragEffect::Dropped {
                    section_id,
                    area,
                    index,
                },
            ),
            sections: Some(moved),
        }
    }

    /// Abandon the drag without touching any section. Safe in every phase.
    pub fn cancel(&mut self, reason: DragCancelReason) -> DragTransition {
        let from = self.phase();
        if !self.is_active() {
            self.reset();
            return self.finish(from, noop(DragNoopReason::IdleWithoutActiveDrag));
        }
        let section_id = self.dragged_item.as_ref().map(|s| s.id.clone());
        self.reset();
        self.finish(from, DragEffect::Canceled { section_id, reason })
    }

    /// Feed one raw host event.
    pub fn apply_event(
        &mut self,
        event: &SectionDragEvent,
        sections: &[Section],
        transfer: &mut dyn DataTransfer,
    ) -> DragOutcome {
        match event {
            SectionDragEvent::DragStart { section } => {
                DragOutcome::without_sections(self.begin_drag(section, transfer))
            }
            SectionDragEvent::DragOverArea { area } => {
                DragOutcome::without_sections(self.hover_area(*area))
            }
            SectionDragEvent::DragOverRow {
                section_id,
                pointer,
                row,
            } => DragOutcome::without_sections(self.hover_row(
                section_id.as_str(),
                *pointer,
                *row,
                sections,
            )),
            SectionDragEvent::DragLeaveRow => DragOutcome::without_sections(self.leave_row()),
            SectionDragEvent::Drop { area } => self.drop(*area, sections, transfer),
            SectionDragEvent::DragEnd => {
                DragOutcome::without_sections(self.cancel(DragCancelReason::DragEnd))
            }
            SectionDragEvent::Cancel { reason } => {
                DragOutcome::without_sections(self.cancel(*reason))
            }
        }
    }

    fn reset(&mut self) {
        self.dragged_item = None;
        self.drag_over_area = None;
        self.drag_over_index = None;
    }

    fn finish(&mut self, from: DragPhase, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase(),
            effect,
        }
    }
}

fn noop(reason: DragNoopReason) -> DragEffect {
    DragEffect::Noop { reason }
}
