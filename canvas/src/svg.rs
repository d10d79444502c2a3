//! SVG export of a drawing.
//!
//! The canvas is sized to the union bounding box of every entity plus a
//! margin on each side, and every shape is shifted so the box minimum lands
//! at `(margin, margin)`. A white background rect sits underneath.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use crate::entity::Entity;
use crate::geom::{Aabb, Point, Vector};

/// Render `entities` as a standalone SVG document.
///
/// An empty drawing exports as a `2 * margin` square.
#[must_use]
pub fn export_svg(entities: &[Entity], margin: f64) -> String {
    let bbox = entities
        .iter()
        .filter_map(Entity::bounding_box)
        .reduce(|acc, b| acc.union(&b))
        .unwrap_or(Aabb::from_corners(Point::origin(), Point::origin()));
    let offset = Vector::new(margin - bbox.xmin, margin - bbox.ymin);

    let svg = svg_document(&bbox, margin, entities.iter().filter_map(|e| e.svg_fragment(offset)));
    tracing::debug!(entities = entities.len(), bytes = svg.len(), "svg exported");
    svg
}

/// Wrap already-translated fragments in an `<svg>` sized to `bbox` plus
/// `margin`, normalizing each fragment's dimension attributes.
fn svg_document(bbox: &Aabb, margin: f64, fragments: impl IntoIterator<Item = String>) -> String {
    let width = bbox.width() + 2.0 * margin;
    let height = bbox.height() + 2.0 * margin;
    let mut svg = format!(
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg"><rect x="0" y="0" width="{width}" height="{height}" fill="white" />"#
    );
    for fragment in fragments {
        svg.push_str(&normalize_dimension_attributes(&fragment));
    }
    svg.push_str("</svg>");
    svg
}

/// Quote bare numeric `width=` and `height=` attribute values.
///
/// `<rect width=12 height=3.5/>` becomes `<rect width="12" height="3.5"/>`.
/// Already quoted values are left alone.
#[must_use]
pub fn normalize_dimension_attributes(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len() + 8);
    let mut rest = fragment;
    while let Some((pos, name)) = next_dimension_attr(rest) {
        let after_name = pos + name.len();
        out.push_str(&rest[..after_name]);
        rest = &rest[after_name..];

        let value_len = rest
            .char_indices()
            .find(|&(_, c)| !(c.is_ascii_digit() || c == '.' || c == '-' || c == 'e' || c == 'E' || c == '+'))
            .map_or(rest.len(), |(i, _)| i);
        if value_len == 0 {
            continue;
        }
        out.push('"');
        out.push_str(&rest[..value_len]);
        out.push('"');
        rest = &rest[value_len..];
    }
    out.push_str(rest);
    out
}

/// Earliest `width=` or `height=` that starts an attribute name.
fn next_dimension_attr(s: &str) -> Option<(usize, &'static str)> {
    let mut best: Option<(usize, &'static str)> = None;
    for name in ["width=", "height="] {
        let mut from = 0;
        while let Some(found) = s[from..].find(name) {
            let pos = from + found;
            let boundary = s[..pos].chars().next_back().is_none_or(|c| c.is_whitespace());
            if boundary {
                if best.is_none_or(|(b, _)| pos < b) {
                    best = Some((pos, name));
                }
                break;
            }
            from = pos + name.len();
        }
    }
    best
}
