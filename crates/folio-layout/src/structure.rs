//! Layout structure and patch merging.
//!
//! A template ships a complete [`LayoutStructure`]. The user's customization is
//! stored as a [`LayoutStructurePatch`] in which every field is optional.
//! [`merge`] overlays the patch on the base: patch values win field by field,
//! base values fill everything the patch leaves out.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::section::Area;

// ---------------------------------------------------------------------------
// Area configuration
// ---------------------------------------------------------------------------

/// Per-area settings. Only `enabled` has meaning here; the rest are rendering
/// hints passed through to the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

impl AreaConfig {
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    #[must_use]
    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = Some(sticky);
        self
    }
}

/// Partial [`AreaConfig`]; `None` fields keep the base value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

impl AreaConfigPatch {
    /// Overlay this patch on `base`.
    #[must_use]
    pub fn apply_to(&self, base: &AreaConfig) -> AreaConfig {
        AreaConfig {
            enabled: self.enabled.unwrap_or(base.enabled),
            width: self.width.clone().or_else(|| base.width.clone()),
            sticky: self.sticky.or(base.sticky),
            background: self.background.clone().or_else(|| base.background.clone()),
            padding: self.padding.clone().or_else(|| base.padding.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Areas
// ---------------------------------------------------------------------------

/// One value per area. Every key is always present; keys missing from the
/// input deserialize to `T::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    rename_all = "kebab-case",
    default,
    bound(
        serialize = "T: Serialize",
        deserialize = "T: Deserialize<'de> + Default"
    )
)]
pub struct Areas<T> {
    pub header: T,
    pub sidebar_left: T,
    pub sidebar_right: T,
    pub main: T,
    pub footer: T,
    pub floating: T,
}

impl<T: Default> Default for Areas<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Areas<T> {
    /// Build a value for every area.
    pub fn from_fn(mut f: impl FnMut(Area) -> T) -> Self {
        Self {
            header: f(Area::Header),
            sidebar_left: f(Area::SidebarLeft),
            sidebar_right: f(Area::SidebarRight),
            main: f(Area::Main),
            footer: f(Area::Footer),
            floating: f(Area::Floating),
        }
    }

    #[must_use]
    pub fn get(&self, area: Area) -> &T {
        match area {
            Area::Header => &self.header,
            Area::SidebarLeft => &self.sidebar_left,
            Area::SidebarRight => &self.sidebar_right,
            Area::Main => &self.main,
            Area::Footer => &self.footer,
            Area::Floating => &self.floating,
        }
    }

    pub fn get_mut(&mut self, area: Area) -> &mut T {
        match area {
            Area::Header => &mut self.header,
            Area::SidebarLeft => &mut self.sidebar_left,
            Area::SidebarRight => &mut self.sidebar_right,
            Area::Main => &mut self.main,
            Area::Footer => &mut self.footer,
            Area::Floating => &mut self.floating,
        }
    }

    /// Iterate in page order.
    pub fn iter(&self) -> impl Iterator<Item = (Area, &T)> {
        Area::ALL.into_iter().map(move |area| (area, self.get(area)))
    }
}

impl<T> Index<Area> for Areas<T> {
    type Output = T;

    fn index(&self, area: Area) -> &T {
        self.get(area)
    }
}

impl<T> IndexMut<Area> for Areas<T> {
    fn index_mut(&mut self, area: Area) -> &mut T {
        self.get_mut(area)
    }
}

// ---------------------------------------------------------------------------
// Responsive behavior
// ---------------------------------------------------------------------------

/// How the layout collapses on narrow viewports. Values are opaque mode names
/// such as `"stack"` or `"hide-sidebars"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveConfig {
    pub mobile: String,
    pub tablet: String,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            mobile: "stack".to_owned(),
            tablet: "stack".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponsivePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<String>,
}

// ---------------------------------------------------------------------------
// Structure and patch
// ---------------------------------------------------------------------------

/// Complete description of a page layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutStructure {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub areas: Areas<AreaConfig>,
    #[serde(default)]
    pub responsive: ResponsiveConfig,
}

impl LayoutStructure {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_area(mut self, area: Area, config: AreaConfig) -> Self {
        self.areas[area] = config;
        self
    }

    /// Copy of this structure with one area toggled.
    #[must_use]
    pub fn with_area_enabled(&self, area: Area, enabled: bool) -> Self {
        let mut next = self.clone();
        next.areas[area].enabled = enabled;
        next
    }

    /// Decode a full structure from JSON.
    pub fn from_json(json: &str) -> Result<Self, LayoutDecodeError> {
        serde_json::from_str(json).map_err(LayoutDecodeError)
    }
}

/// A user's partial customization of a [`LayoutStructure`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutStructurePatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub areas: BTreeMap<Area, AreaConfigPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive: Option<ResponsivePatch>,
}

impl LayoutStructurePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.areas.is_empty() && self.responsive.is_none()
    }

    /// Copy of this patch that also sets `enabled` for `area`. Other patched
    /// fields of the area are kept.
    #[must_use]
    pub fn with_area_enabled(&self, area: Area, enabled: bool) -> Self {
        let mut next = self.clone();
        next.areas.entry(area).or_default().enabled = Some(enabled);
        next
    }

    /// Decode a stored customization.
    pub fn from_json(json: &str) -> Result<Self, LayoutDecodeError> {
        serde_json::from_str(json).map_err(LayoutDecodeError)
    }
}

/// Overlay `patch` on `base`.
///
/// `merge(base, None)` returns a copy of `base`. A responsive patch only
/// replaces the fields it sets.
#[must_use]
pub fn merge(base: &LayoutStructure, patch: Option<&LayoutStructurePatch>) -> LayoutStructure {
    let Some(patch) = patch else {
        return base.clone();
    };

    let areas = Areas::from_fn(|area| match patch.areas.get(&area) {
        Some(area_patch) => area_patch.apply_to(&base.areas[area]),
        None => base.areas[area].clone(),
    });

    let responsive = match &patch.responsive {
        Some(r) => ResponsiveConfig {
            mobile: r
                .mobile
                .clone()
                .unwrap_or_else(|| base.responsive.mobile.clone()),
            tablet: r
                .tablet
                .clone()
                .unwrap_or_else(|| base.responsive.tablet.clone()),
        },
        None => base.responsive.clone(),
    };

    LayoutStructure {
        kind: patch.kind.clone().unwrap_or_else(|| base.kind.clone()),
        areas,
        responsive,
    }
}

/// Failure to decode a layout structure or patch from JSON.
#[derive(Debug)]
pub struct LayoutDecodeError(serde_json::Error);

impl fmt::Display for LayoutDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid layout structure: {}", self.0)
    }
}

impl std::error::Error for LayoutDecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
