//! Connector geometry between a manager card and a report card.

use orgchart_core::{ChartConfig, LineType};

use crate::model::LayoutPoint;

/// Bottom edge of the card's visual box relative to its `y` anchor.
pub fn card_bottom_offset(config: &ChartConfig) -> f64 {
    config.avatar_width / 2.0 + config.node_height + 15.0
}

/// Computes the connector polyline from a parent card to a child card, both
/// given by their top-left anchors.
///
/// `Straight` runs directly from the parent's bottom-center to the child's
/// top-center. `Angle` elbows through the midpoint of the inter-level gap,
/// which is why the angled line style reserves extra vertical spacing.
pub fn link_points(source: LayoutPoint, target: LayoutPoint, config: &ChartConfig) -> Vec<LayoutPoint> {
    let half_width = config.node_width / 2.0;
    let from = LayoutPoint::new(source.x + half_width, source.y + card_bottom_offset(config));
    let to = LayoutPoint::new(target.x + half_width, target.y);

    match config.line_type {
        LineType::Straight => vec![from, to],
        LineType::Angle => {
            let elbow_y = (from.y + to.y) / 2.0;
            vec![
                from,
                LayoutPoint::new(from.x, elbow_y),
                LayoutPoint::new(to.x, elbow_y),
                to,
            ]
        }
    }
}
