use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Connector drawing style between a manager card and a report card.
///
/// Angled connectors need extra vertical room for the elbow, so the per-level
/// spacing differs between the two styles (see [`ChartConfig::line_depth_y`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Straight,
    #[default]
    Angle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

/// One CSS-like style value. Numbers are emitted with a `px` suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Px(f64),
    Raw(String),
}

impl StyleValue {
    pub fn css_text(&self) -> String {
        match self {
            StyleValue::Px(v) => {
                if v.fract() == 0.0 {
                    format!("{}px", *v as i64)
                } else {
                    format!("{v}px")
                }
            }
            StyleValue::Raw(s) => s.clone(),
        }
    }
}

/// Ordered property -> value map applied to the mount element.
pub type StyleMap = IndexMap<String, StyleValue>;

fn default_style() -> StyleMap {
    let mut style = StyleMap::new();
    style.insert("cursor".to_string(), StyleValue::Raw("move".to_string()));
    style.insert("height".to_string(), StyleValue::Raw("100%".to_string()));
    style.insert("width".to_string(), StyleValue::Raw("100%".to_string()));
    style
}

/// Allowed zoom scale range. Discrete zoom steps landing outside the range
/// are rejected as no-ops; hosts clamp continuous gestures to the same range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleExtent {
    pub min: f64,
    pub max: f64,
}

impl ScaleExtent {
    pub fn contains(&self, scale: f64) -> bool {
        scale >= self.min && scale <= self.max
    }
}

impl Default for ScaleExtent {
    fn default() -> Self {
        Self { min: 0.4, max: 2.0 }
    }
}

/// Fully-resolved, immutable chart configuration. Built from
/// [`ChartOptions::resolve`]; components take it by reference and never
/// mutate it.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Mount-point selector for the host surface.
    pub id: String,
    pub line_type: LineType,
    pub margin: Margin,
    pub animation_duration_ms: f64,
    pub node_width: f64,
    pub node_height: f64,
    pub node_spacing: f64,
    pub node_padding_x: f64,
    pub node_padding_y: f64,
    pub node_border_radius: f64,
    pub avatar_width: f64,
    pub background_color: String,
    pub border_color: String,
    pub name_color: String,
    pub title_color: String,
    pub department_color: String,
    pub reports_color: String,
    pub line_color: String,
    pub style: StyleMap,
    pub class_name: Option<String>,
    pub should_resize: bool,
    pub has_department: bool,
    pub zoom_in_id: Option<String>,
    pub zoom_out_id: Option<String>,
    pub zoom_extent_id: Option<String>,
    pub scale_extent: ScaleExtent,
}

impl ChartConfig {
    /// Fixed per-level vertical spacing. Angled connectors reserve extra room
    /// for the elbow.
    pub fn line_depth_y(&self) -> f64 {
        match self.line_type {
            LineType::Angle => self.node_height + 80.0,
            LineType::Straight => self.node_height + 60.0,
        }
    }

    /// Horizontal space one node reserves in the tidy-tree walk.
    pub fn node_size_x(&self) -> f64 {
        self.node_width + self.node_spacing
    }

    /// Pixel width available to wrapped card text.
    pub fn wrap_width(&self) -> f64 {
        self.node_width - self.node_padding_x * 2.0
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            line_type: LineType::default(),
            margin: Margin::default(),
            animation_duration_ms: 350.0,
            node_width: 240.0,
            node_height: 120.0,
            node_spacing: 12.0,
            node_padding_x: 16.0,
            node_padding_y: 16.0,
            node_border_radius: 4.0,
            avatar_width: 48.0,
            background_color: "#fff".to_string(),
            border_color: "#e6e8e9".to_string(),
            name_color: "#332212".to_string(),
            title_color: "#332212".to_string(),
            department_color: "#89827B".to_string(),
            reports_color: "#92A0AD".to_string(),
            line_color: "#951b81".to_string(),
            style: default_style(),
            class_name: None,
            should_resize: true,
            has_department: true,
            zoom_in_id: None,
            zoom_out_id: None,
            zoom_extent_id: None,
            scale_extent: ScaleExtent::default(),
        }
    }
}

/// Caller-facing overrides. Every field is optional; [`resolve`] merges them
/// over the defaults field by field, so the set of recognized keys is exactly
/// what is enumerated here.
///
/// [`resolve`]: ChartOptions::resolve
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChartOptions {
    pub id: Option<String>,
    pub line_type: Option<LineType>,
    pub margin: Option<Margin>,
    pub animation_duration_ms: Option<f64>,
    pub node_width: Option<f64>,
    pub node_height: Option<f64>,
    pub node_spacing: Option<f64>,
    pub node_padding_x: Option<f64>,
    pub node_padding_y: Option<f64>,
    pub node_border_radius: Option<f64>,
    pub avatar_width: Option<f64>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub name_color: Option<String>,
    pub title_color: Option<String>,
    pub department_color: Option<String>,
    pub reports_color: Option<String>,
    pub line_color: Option<String>,
    pub style: Option<StyleMap>,
    pub class_name: Option<String>,
    pub should_resize: Option<bool>,
    pub has_department: Option<bool>,
    pub zoom_in_id: Option<String>,
    pub zoom_out_id: Option<String>,
    pub zoom_extent_id: Option<String>,
    pub scale_extent: Option<ScaleExtent>,
}

impl ChartOptions {
    /// Merges the overrides over the defaults. Only `id` has no default: a
    /// missing or empty selector fails with
    /// [`crate::Error::MissingRootSelector`].
    pub fn resolve(self) -> crate::Result<ChartConfig> {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(crate::Error::MissingRootSelector),
        };
        let defaults = ChartConfig::default();
        Ok(ChartConfig {
            id,
            line_type: self.line_type.unwrap_or(defaults.line_type),
            margin: self.margin.unwrap_or(defaults.margin),
            animation_duration_ms: self
                .animation_duration_ms
                .unwrap_or(defaults.animation_duration_ms),
            node_width: self.node_width.unwrap_or(defaults.node_width),
            node_height: self.node_height.unwrap_or(defaults.node_height),
            node_spacing: self.node_spacing.unwrap_or(defaults.node_spacing),
            node_padding_x: self.node_padding_x.unwrap_or(defaults.node_padding_x),
            node_padding_y: self.node_padding_y.unwrap_or(defaults.node_padding_y),
            node_border_radius: self.node_border_radius.unwrap_or(defaults.node_border_radius),
            avatar_width: self.avatar_width.unwrap_or(defaults.avatar_width),
            background_color: self.background_color.unwrap_or(defaults.background_color),
            border_color: self.border_color.unwrap_or(defaults.border_color),
            name_color: self.name_color.unwrap_or(defaults.name_color),
            title_color: self.title_color.unwrap_or(defaults.title_color),
            department_color: self.department_color.unwrap_or(defaults.department_color),
            reports_color: self.reports_color.unwrap_or(defaults.reports_color),
            line_color: self.line_color.unwrap_or(defaults.line_color),
            style: self.style.unwrap_or(defaults.style),
            class_name: self.class_name,
            should_resize: self.should_resize.unwrap_or(defaults.should_resize),
            has_department: self.has_department.unwrap_or(defaults.has_department),
            zoom_in_id: self.zoom_in_id,
            zoom_out_id: self.zoom_out_id,
            zoom_extent_id: self.zoom_extent_id,
            scale_extent: self.scale_extent.unwrap_or(defaults.scale_extent),
        })
    }
}
