//! The person card template.
//!
//! Geometry is fixed relative to the card's top-left anchor: avatar centered
//! at the top, name under the avatar, then title, then the optional
//! department line, with the report-count badge hanging below the card box.
//! All coordinates are local to the card group; the reconciler positions the
//! group itself.

use orgchart_core::{ChartConfig, Person};

use crate::text::{TextMeasurer, TextStyle, wrap_text};

#[derive(Debug, Clone, PartialEq)]
pub struct CardRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvatarSlot {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub href: Option<String>,
    /// Radius of the circular clip the image is masked to.
    pub clip_radius: f64,
}

/// One block of centered, wrapped text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f64,
    pub y: f64,
    pub lines: Vec<String>,
    pub font_size: f64,
    pub font_weight: u32,
    pub color: String,
    pub line_height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportsBadge {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub label: String,
    pub fill: String,
    pub text_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub shadow: CardRect,
    pub frame: CardRect,
    pub avatar: AvatarSlot,
    pub name: TextBlock,
    pub title: TextBlock,
    pub department: Option<TextBlock>,
    /// `None` when the person has no reports.
    pub reports: Option<ReportsBadge>,
    pub link: Option<String>,
}

fn text_block(
    text: &str,
    x: f64,
    y: f64,
    font_size: f64,
    font_weight: u32,
    color: &str,
    config: &ChartConfig,
    measurer: &dyn TextMeasurer,
) -> TextBlock {
    let style = TextStyle {
        font_family: None,
        font_size,
        font_weight: Some(font_weight.to_string()),
    };
    TextBlock {
        x,
        y,
        lines: wrap_text(text, &style, measurer, config.wrap_width()),
        font_size,
        font_weight,
        color: color.to_string(),
        line_height: font_size * 1.2,
    }
}

/// Computes the card template for one person.
pub fn compute_card(
    person: &Person,
    config: &ChartConfig,
    measurer: &dyn TextMeasurer,
) -> CardLayout {
    let width = config.node_width;
    let box_height = config.node_height + 15.0;
    let box_top = config.avatar_width / 2.0;
    let center_x = width / 2.0;
    let font_size = 14.0;

    let frame = CardRect {
        x: 0.0,
        y: box_top,
        width,
        height: box_height,
        corner_radius: config.node_border_radius,
    };

    let avatar = AvatarSlot {
        x: center_x - config.avatar_width / 2.0,
        y: 0.0,
        size: config.avatar_width,
        href: person.avatar.clone(),
        clip_radius: config.avatar_width / 2.0,
    };

    let name_y = config.node_padding_y + config.avatar_width + 8.0;
    let name = text_block(
        &person.name,
        center_x,
        name_y,
        font_size,
        700,
        &config.name_color,
        config,
        measurer,
    );

    // The title baseline sits one line below its slot, the department two.
    let title_y = name_y + config.node_padding_y * 1.4 + font_size;
    let title = text_block(
        &person.title,
        center_x,
        title_y,
        font_size,
        400,
        &config.title_color,
        config,
        measurer,
    );

    let department = match (&person.department, config.has_department) {
        (Some(department), true) => {
            let department_y = name_y
                + config.node_padding_y * (1.4 + 1.3)
                + font_size * 2.0;
            Some(text_block(
                department,
                center_x,
                department_y,
                font_size,
                400,
                &config.department_color,
                config,
                measurer,
            ))
        }
        _ => None,
    };

    let reports = (person.total_reports > 0).then(|| {
        let badge_anchor_y = box_height + config.node_padding_y;
        ReportsBadge {
            cx: center_x,
            cy: badge_anchor_y + 10.0,
            radius: 12.0,
            label: person.total_reports.to_string(),
            fill: config.line_color.clone(),
            text_y: badge_anchor_y + 4.0 + 13.0 * 0.9,
        }
    });

    CardLayout {
        shadow: frame.clone(),
        frame,
        avatar,
        name,
        title,
        department,
        reports,
        link: person.link.clone(),
    }
}
