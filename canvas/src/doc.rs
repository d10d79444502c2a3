//! Document model: the ordered entity store and its JSON representation.
//!
//! The store is a plain ordered sequence; insertion order is draw order and
//! history snapshots are clones of the sequence. Persisted drawings are a JSON
//! array of entity objects:
//!
//! ```json
//! { "id": "…uuid…", "type": "rectangle", "lineColor": "#fff", "lineWidth": 1,
//!   "shapeData": { "xmin": 0, "ymin": 0, "xmax": 10, "ymax": 10 } }
//! ```
//!
//! Loading is fault-isolated per entry: a bad entry is reported as an
//! [`EntityLoadError`] and the rest of the batch still loads.
//!
//! Ids are opaque strings on the wire. A UUID string is kept as is; any
//! other non-empty id maps to a name-based (v5) UUID, so the same foreign id
//! always loads to the same entity id.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::consts::{DEFAULT_LINE_COLOR, DEFAULT_LINE_WIDTH};
use crate::construct::Draft;
use crate::entity::{Entity, EntityId, EntityKind};
use crate::geom::{Aabb, Circle, Point, Segment};

/// Why a single persisted entry was skipped.
#[derive(Debug, thiserror::Error)]
pub enum EntityLoadError {
    #[error("entry is not a valid entity object: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("entity id is empty")]
    EmptyId,
    #[error("unknown entity type `{0}`")]
    UnknownType(String),
    #[error("malformed shape data for {kind}: {source}")]
    MalformedShape {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("non-finite coordinate in {0} shape data")]
    NonFinite(&'static str),
    #[error("degenerate {0} shape")]
    Degenerate(&'static str),
}

/// Why a whole document could not be read.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a JSON array of entities")]
    NotAnArray,
}

/// An entry that failed to load, with its position in the source array.
#[derive(Debug)]
pub struct SkippedEntry {
    pub index: usize,
    pub error: EntityLoadError,
}

/// Result of loading a document: the entities that parsed and the ones that did not.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub entities: Vec<Entity>,
    pub skipped: Vec<SkippedEntry>,
}

// =============================================================
// Wire types
// =============================================================

fn default_line_color() -> String {
    DEFAULT_LINE_COLOR.to_owned()
}

fn default_line_width() -> f64 {
    DEFAULT_LINE_WIDTH
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntity {
    id: String,
    #[serde(rename = "type")]
    entity_type: String,
    #[serde(default = "default_line_color")]
    line_color: String,
    #[serde(default = "default_line_width")]
    line_width: f64,
    shape_data: Value,
}

#[derive(Deserialize)]
struct PointData {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct LineData {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

#[derive(Deserialize)]
struct RectangleData {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

#[derive(Deserialize)]
struct CircleData {
    cx: f64,
    cy: f64,
    r: f64,
}

fn shape_data<T: for<'de> Deserialize<'de>>(kind: &'static str, value: Value) -> Result<T, EntityLoadError> {
    serde_json::from_value(value).map_err(|source| EntityLoadError::MalformedShape { kind, source })
}

fn entity_id(raw: &str) -> Result<EntityId, EntityLoadError> {
    if raw.trim().is_empty() {
        return Err(EntityLoadError::EmptyId);
    }
    Ok(Uuid::parse_str(raw).unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes())))
}

fn finite(kind: &'static str, values: &[f64]) -> Result<(), EntityLoadError> {
    if values.iter().all(|v| v.is_finite()) { Ok(()) } else { Err(EntityLoadError::NonFinite(kind)) }
}

impl Entity {
    /// Persisted form of a committed entity.
    ///
    /// `None` for selection rectangles and for entities without a payload.
    #[must_use]
    pub fn to_json(&self) -> Option<Value> {
        let shape_data = match &self.kind {
            EntityKind::Point(p) => json!({ "x": p.x, "y": p.y }),
            EntityKind::Line(d) => {
                let s = d.payload()?;
                json!({ "x1": s.start.x, "y1": s.start.y, "x2": s.end.x, "y2": s.end.y })
            }
            EntityKind::Rectangle(d) => {
                let b = d.payload()?;
                json!({ "xmin": b.xmin, "ymin": b.ymin, "xmax": b.xmax, "ymax": b.ymax })
            }
            EntityKind::Circle(d) => {
                let c = d.payload()?;
                json!({ "cx": c.center.x, "cy": c.center.y, "r": c.radius })
            }
            EntityKind::SelectionRectangle(_) => return None,
        };
        Some(json!({
            "id": self.id.to_string(),
            "type": self.entity_type().as_str(),
            "lineColor": self.line_color,
            "lineWidth": self.line_width,
            "shapeData": shape_data,
        }))
    }

    /// Rebuild a committed entity from its persisted form.
    ///
    /// # Errors
    ///
    /// Returns an [`EntityLoadError`] when the entry is not an entity object,
    /// names an unknown type, or carries malformed or degenerate shape data.
    pub fn from_json(value: &Value) -> Result<Self, EntityLoadError> {
        let raw: JsonEntity = serde_json::from_value(value.clone()).map_err(EntityLoadError::Malformed)?;
        let id = entity_id(&raw.id)?;
        let kind = match raw.entity_type.as_str() {
            "point" => {
                let d: PointData = shape_data("point", raw.shape_data)?;
                finite("point", &[d.x, d.y])?;
                EntityKind::Point(Point::new(d.x, d.y))
            }
            "line" => {
                let d: LineData = shape_data("line", raw.shape_data)?;
                finite("line", &[d.x1, d.y1, d.x2, d.y2])?;
                let seg = Segment::new(Point::new(d.x1, d.y1), Point::new(d.x2, d.y2));
                if seg.is_degenerate() {
                    return Err(EntityLoadError::Degenerate("line"));
                }
                EntityKind::Line(Draft::finished(seg.start, seg))
            }
            "rectangle" => {
                let d: RectangleData = shape_data("rectangle", raw.shape_data)?;
                finite("rectangle", &[d.xmin, d.ymin, d.xmax, d.ymax])?;
                let rect = Aabb::from_corners(Point::new(d.xmin, d.ymin), Point::new(d.xmax, d.ymax));
                if rect.is_degenerate() {
                    return Err(EntityLoadError::Degenerate("rectangle"));
                }
                EntityKind::Rectangle(Draft::finished(rect.min(), rect))
            }
            "circle" => {
                let d: CircleData = shape_data("circle", raw.shape_data)?;
                finite("circle", &[d.cx, d.cy, d.r])?;
                let circle = Circle::new(Point::new(d.cx, d.cy), d.r);
                if d.r < 0.0 || circle.is_degenerate() {
                    return Err(EntityLoadError::Degenerate("circle"));
                }
                EntityKind::Circle(Draft::finished(circle.center, circle))
            }
            other => return Err(EntityLoadError::UnknownType(other.to_owned())),
        };
        Ok(Self { id, line_color: raw.line_color, line_width: raw.line_width, kind })
    }
}

/// Load every entry of a JSON array, skipping and reporting bad ones.
///
/// # Errors
///
/// Returns [`DocumentError::NotAnArray`] when `value` is not an array.
pub fn load_entities(value: &Value) -> Result<LoadReport, DocumentError> {
    let Value::Array(entries) = value else {
        return Err(DocumentError::NotAnArray);
    };
    let mut report = LoadReport::default();
    let mut seen: HashSet<EntityId> = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        match Entity::from_json(entry) {
            Ok(mut entity) => {
                // Keep ids unique within the store.
                if !seen.insert(entity.id) {
                    entity.id = Uuid::new_v4();
                    seen.insert(entity.id);
                }
                report.entities.push(entity);
            }
            Err(error) => {
                tracing::warn!(index, %error, "skipping persisted entity");
                report.skipped.push(SkippedEntry { index, error });
            }
        }
    }
    tracing::debug!(loaded = report.entities.len(), skipped = report.skipped.len(), "entities loaded");
    Ok(report)
}

/// Parse and load a JSON document string.
///
/// # Errors
///
/// Returns a [`DocumentError`] if the text is not JSON or not an array.
pub fn load_entities_str(json: &str) -> Result<LoadReport, DocumentError> {
    let value: Value = serde_json::from_str(json)?;
    load_entities(&value)
}

// =============================================================
// Store
// =============================================================

/// Ordered in-memory store of committed entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocStore {
    entities: Vec<Entity>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { entities: Vec::new() }
    }

    /// Append an entity at the top of the draw order.
    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by id, returning it if it was present.
    pub fn remove(&mut self, id: &EntityId) -> Option<Entity> {
        let pos = self.entities.iter().position(|e| &e.id == id)?;
        Some(self.entities.remove(pos))
    }

    /// Remove every entity whose id is in `ids`. Returns how many were removed.
    pub fn remove_all(&mut self, ids: &HashSet<EntityId>) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !ids.contains(&e.id));
        before - self.entities.len()
    }

    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Entities in draw order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// A clone of the sequence for history.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    /// Replace the whole sequence (history restore or document load).
    pub fn replace(&mut self, entities: Vec<Entity>) {
        self.entities = entities;
    }

    /// Union of every entity's bounding box, `None` for an empty drawing.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.entities
            .iter()
            .filter_map(Entity::bounding_box)
            .reduce(|acc, b| acc.union(&b))
    }

    /// The persisted JSON array.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.entities.iter().filter_map(Entity::to_json).collect())
    }

    /// Number of entities currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the store contains no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
