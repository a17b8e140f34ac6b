#![forbid(unsafe_code)]

//! Section editor.
//!
//! [`Editor`] is the single writer of the section list and the layout patch.
//! Every update computes a new value with the pure engine functions, swaps it
//! in with one assignment and then notifies the host through [`EditorHooks`].
//! Hooks are synchronous and fire after every successful change; the editor
//! does not compare against the previous value first.
//!
//! # Example
//!
//! ```ignore
//! use folio_runtime::{Editor, EditorHooks};
//!
//! let hooks = EditorHooks::new()
//!     .on_sections_change(|sections| save("sections", sections))
//!     .on_layout_change(|patch| save("layout", patch));
//!
//! let mut editor = Editor::new(template_layout, template_sections).with_hooks(hooks);
//! editor.set_area_enabled(Area::SidebarRight, false);
//! ```

use serde::{Deserialize, Serialize};

use folio_core::geometry::{PointerPosition, Rect};
use folio_layout::{
    Area, LayoutStructure, LayoutStructurePatch, OrderingReport, Section, SectionWithPlacement,
    decorate_with_placement, merge, ordering_report, repair_ordering, set_section_enabled,
    unplace,
};
use folio_widgets::{
    DataTransfer, DragCancelReason, DragEffect, DragOutcome, DragSession, DragSessionConfig,
    DragTransition, SectionDragEvent,
};

// =============================================================================
// Configuration
// =============================================================================

/// Editor settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub drag: DragSessionConfig,
    /// Emit `tracing` events under the `folio.editor` target (default: false).
    pub emit_tracing: bool,
}

impl EditorConfig {
    #[must_use]
    pub fn with_drag(mut self, drag: DragSessionConfig) -> Self {
        self.drag = drag;
        self
    }

    #[must_use]
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.emit_tracing = enabled;
        self
    }
}

// =============================================================================
// Hooks
// =============================================================================

/// Callback type for section list changes.
pub type OnSectionsChange = Box<dyn Fn(&[Section]) + Send + Sync>;
/// Callback type for layout patch changes.
pub type OnLayoutChange = Box<dyn Fn(&LayoutStructurePatch) + Send + Sync>;

/// Host callbacks fired after the editor swaps in a new value.
#[derive(Default)]
pub struct EditorHooks {
    on_sections_change: Option<OnSectionsChange>,
    on_layout_change: Option<OnLayoutChange>,
}

impl std::fmt::Debug for EditorHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorHooks")
            .field("on_sections_change", &self.on_sections_change.is_some())
            .field("on_layout_change", &self.on_layout_change.is_some())
            .finish()
    }
}

impl EditorHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set callback for section list changes (drop, toggle, unplace).
    #[must_use]
    pub fn on_sections_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[Section]) + Send + Sync + 'static,
    {
        self.on_sections_change = Some(Box::new(callback));
        self
    }

    /// Set callback for layout patch changes (area toggle).
    #[must_use]
    pub fn on_layout_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&LayoutStructurePatch) + Send + Sync + 'static,
    {
        self.on_layout_change = Some(Box::new(callback));
        self
    }

    pub fn has_sections_change(&self) -> bool {
        self.on_sections_change.is_some()
    }

    pub fn has_layout_change(&self) -> bool {
        self.on_layout_change.is_some()
    }

    fn fire_sections_change(&self, sections: &[Section]) {
        if let Some(ref cb) = self.on_sections_change {
            cb(sections);
        }
    }

    fn fire_layout_change(&self, patch: &LayoutStructurePatch) {
        if let Some(ref cb) = self.on_layout_change {
            cb(patch);
        }
    }
}

// =============================================================================
// Editor
// =============================================================================

/// Owner of the section list, the layout patch and the drag session.
#[derive(Debug)]
pub struct Editor {
    base: LayoutStructure,
    patch: LayoutStructurePatch,
    sections: Vec<Section>,
    session: DragSession,
    hooks: EditorHooks,
    emit_tracing: bool,
}

impl Editor {
    /// Create an editor over a template's layout and sections with the
    /// default [`EditorConfig`].
    #[must_use]
    pub fn new(base: LayoutStructure, sections: Vec<Section>) -> Self {
        Self::with_settings(base, sections, EditorConfig::default())
    }

    /// Create an editor with explicit settings.
    ///
    /// Saved section lists can carry stale orders; every rendered area is
    /// renumbered `1..=N` on the way in.
    #[must_use]
    pub fn with_settings(
        base: LayoutStructure,
        sections: Vec<Section>,
        config: EditorConfig,
    ) -> Self {
        let report = ordering_report(&sections);
        let sections = if report.is_valid() {
            sections
        } else {
            if config.emit_tracing {
                tracing::debug!(
                    target: "folio.editor",
                    issues = report.issues.len(),
                    "section_ordering_repaired"
                );
            }
            repair_ordering(&sections)
        };
        Self {
            base,
            patch: LayoutStructurePatch::default(),
            sections,
            session: DragSession::new(config.drag),
            hooks: EditorHooks::default(),
            emit_tracing: config.emit_tracing,
        }
    }

    /// Start from a previously saved customization.
    #[must_use]
    pub fn with_patch(mut self, patch: LayoutStructurePatch) -> Self {
        self.patch = patch;
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: EditorHooks) -> Self {
        self.hooks = hooks;
        self
    }

    // ---- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The list as shown by an editor with an "available sections" pool.
    #[must_use]
    pub fn sections_with_placement(&self) -> Vec<SectionWithPlacement> {
        decorate_with_placement(&self.sections)
    }

    #[must_use]
    pub fn base_layout(&self) -> &LayoutStructure {
        &self.base
    }

    #[must_use]
    pub fn patch(&self) -> &LayoutStructurePatch {
        &self.patch
    }

    /// Base layout with the user's patch applied.
    #[must_use]
    pub fn effective_layout(&self) -> LayoutStructure {
        merge(&self.base, Some(&self.patch))
    }

    #[must_use]
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    #[must_use]
    pub fn ordering_report(&self) -> OrderingReport {
        ordering_report(&self.sections)
    }

    // ---- Drag gesture -------------------------------------------------------

    /// Start dragging section `id`. Returns `None` for an unknown id.
    pub fn begin_drag(
        &mut self,
        id: &str,
        transfer: &mut dyn DataTransfer,
    ) -> Option<DragTransition> {
        let section = self.sections.iter().find(|s| s.id == *id)?.clone();
        Some(self.session.begin_drag(&section, transfer))
    }

    pub fn hover_area(&mut self, area: Area) -> DragTransition {
        self.session.hover_area(area)
    }

    pub fn hover_row(
        &mut self,
        row_id: &str,
        pointer: PointerPosition,
        row: Rect,
    ) -> DragTransition {
        self.session.hover_row(row_id, pointer, row, &self.sections)
    }

    pub fn leave_row(&mut self) -> DragTransition {
        self.session.leave_row()
    }

    /// Drop onto `area`, swapping in the moved list when the drop resolved.
    pub fn drop(&mut self, area: Area, transfer: &dyn DataTransfer) -> DragTransition {
        let outcome = self.session.drop(area, &self.sections, transfer);
        self.apply_outcome(outcome)
    }

    pub fn cancel(&mut self, reason: DragCancelReason) -> DragTransition {
        let transition = self.session.cancel(reason);
        if self.emit_tracing {
            if let DragEffect::Canceled { section_id, reason } = &transition.effect {
                tracing::debug!(
                    target: "folio.editor",
                    section_id = ?section_id,
                    reason = ?reason,
                    "drag_canceled"
                );
            }
        }
        transition
    }

    /// Feed one raw host drag event.
    pub fn handle_event(
        &mut self,
        event: &SectionDragEvent,
        transfer: &mut dyn DataTransfer,
    ) -> DragTransition {
        match event {
            SectionDragEvent::DragEnd => self.cancel(DragCancelReason::DragEnd),
            SectionDragEvent::Cancel { reason } => self.cancel(*reason),
            _ => {
                let outcome = self.session.apply_event(event, &self.sections, transfer);
                self.apply_outcome(outcome)
            }
        }
    }

    fn apply_outcome(&mut self, outcome: DragOutcome) -> DragTransition {
        let DragOutcome {
            transition,
            sections,
        } = outcome;
        if let Some(sections) = sections {
            if self.emit_tracing {
                if let DragEffect::Dropped {
                    section_id,
                    area,
                    index,
                } = &transition.effect
                {
                    tracing::info!(
                        target: "folio.editor",
                        transition_id = transition.transition_id,
                        section_id = %section_id,
                        area = %area,
                        index = ?index,
                        "section_moved"
                    );
                }
            }
            self.replace_sections(sections);
        }
        transition
    }

    // ---- Direct updates -----------------------------------------------------

    /// Show or hide section `id`. Returns false for an unknown id.
    pub fn set_section_enabled(&mut self, id: &str, enabled: bool) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.emit_tracing {
            tracing::info!(target: "folio.editor", section_id = id, enabled, "section_toggled");
        }
        let next = set_section_enabled(&self.sections, id, enabled);
        self.replace_sections(next);
        true
    }

    /// Return section `id` to the floating pool. Returns false for an unknown id.
    pub fn unplace(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.emit_tracing {
            tracing::info!(target: "folio.editor", section_id = id, "section_unplaced");
        }
        let next = unplace(&self.sections, id);
        self.replace_sections(next);
        true
    }

    /// Toggle an area in the user's patch.
    pub fn set_area_enabled(&mut self, area: Area, enabled: bool) {
        if self.emit_tracing {
            tracing::info!(target: "folio.editor", area = %area, enabled, "area_toggled");
        }
        self.patch = self.patch.with_area_enabled(area, enabled);
        self.hooks.fire_layout_change(&self.patch);
    }

    fn contains(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == *id)
    }

    fn replace_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
        self.hooks.fire_sections_change(&self.sections);
    }
}
