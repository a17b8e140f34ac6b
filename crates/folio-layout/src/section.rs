//! Section and area data model.
//!
//! A [`Section`] is one content block of a portfolio page. It lives in exactly
//! one [`Area`] and carries a 1-based `order` among its area-mates. Only the
//! placement engine assigns `order`; hosts treat it as read-only.
//!
//! Deserialization fills the structurally required defaults for records saved
//! by older editors: a missing `type` becomes [`SectionKind::Custom`], missing
//! `icon`/`order`/`config` take their empty values and `enabled` defaults to
//! `true`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a section.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SectionId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Closed set of section kinds a template can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    About,
    Projects,
    Skills,
    Experience,
    Education,
    Contact,
    Testimonials,
    Blog,
    Gallery,
    #[default]
    Custom,
}

/// One of the six fixed layout regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Area {
    Header,
    SidebarLeft,
    SidebarRight,
    Main,
    Footer,
    /// Holding pool for sections that are not rendered in the page.
    Floating,
}

impl Area {
    /// Every area, in page order.
    pub const ALL: [Area; 6] = [
        Area::Header,
        Area::SidebarLeft,
        Area::SidebarRight,
        Area::Main,
        Area::Footer,
        Area::Floating,
    ];

    /// Wire name, as used in JSON and drag payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::SidebarLeft => "sidebar-left",
            Self::SidebarRight => "sidebar-right",
            Self::Main => "main",
            Self::Footer => "footer",
            Self::Floating => "floating",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.as_str() == raw)
    }

    /// Whether sections in this area are rendered in the page.
    #[must_use]
    pub const fn is_rendered(self) -> bool {
        !matches!(self, Self::Floating)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering options for a section. Opaque to the placement engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Column hint as saved by the template: a count, `"auto"` or anything
    /// else the renderer understands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    /// Template-specific keys carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Derived location status of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Rendered in one of the page areas.
    Placed,
    /// Held in the floating pool or disabled.
    Unplaced,
}

impl Placement {
    /// Placement is a pure function of `(area, enabled)`.
    #[must_use]
    pub const fn derive(area: Area, enabled: bool) -> Self {
        if enabled && area.is_rendered() {
            Self::Placed
        } else {
            Self::Unplaced
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// A content block of the portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    #[serde(rename = "type", default)]
    pub kind: SectionKind,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub area: Area,
    /// 1-based rank among sections sharing `area`; 0 in the floating pool.
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub config: SectionConfig,
}

impl Section {
    /// Create an enabled section with empty icon and config.
    #[must_use]
    pub fn new(
        id: impl Into<SectionId>,
        kind: SectionKind,
        name: impl Into<String>,
        area: Area,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            icon: String::new(),
            enabled: true,
            area,
            order,
            config: SectionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: SectionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement::derive(self.area, self.enabled)
    }
}

/// Failure to decode a section list from JSON.
#[derive(Debug)]
pub struct SectionDecodeError(serde_json::Error);

impl fmt::Display for SectionDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid section list: {}", self.0)
    }
}

impl std::error::Error for SectionDecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Decode a section list saved by a template or a previous editing session.
pub fn sections_from_json(json: &str) -> Result<Vec<Section>, SectionDecodeError> {
    serde_json::from_str(json).map_err(SectionDecodeError)
}
