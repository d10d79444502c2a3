//! Input model: tools, modifier keys, mouse buttons, and UI state.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `UiState` is the persistent state the renderer reads (active tool,
//! selected and highlighted ids, angle step). `InputState` tracks the one
//! gesture that spans several events, middle-button panning.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashSet;

use crate::consts::DEFAULT_ANGLE_STEP_DEG;
use crate::doc::DocStore;
use crate::entity::{Entity, EntityId};
use crate::geom::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Place a single point.
    Point,
    /// Draw chained line segments (default).
    #[default]
    Line,
    /// Draw an axis-aligned rectangle from two corners.
    Rectangle,
    /// Draw a circle from its center and a rim point.
    Circle,
    /// Click or drag to select.
    Select,
    /// Remove the entity under the cursor.
    Eraser,
}

impl Tool {
    /// Whether this tool constructs new entities.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Point | Self::Line | Self::Rectangle | Self::Circle)
    }

    /// Tool bound to a single-letter keyboard shortcut.
    #[must_use]
    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key {
            "p" => Some(Self::Point),
            "l" => Some(Self::Line),
            "r" => Some(Self::Rectangle),
            "c" => Some(Self::Circle),
            "s" => Some(Self::Select),
            "e" => Some(Self::Eraser),
            _ => None,
        }
    }

    /// A fresh entity for a multi-click drawing tool. `None` for tools that
    /// do not construct, and for [`Tool::Point`], which commits on the click.
    #[must_use]
    pub fn new_entity(self) -> Option<Entity> {
        match self {
            Self::Line => Some(Entity::line()),
            Self::Rectangle => Some(Entity::rectangle()),
            Self::Circle => Some(Entity::circle()),
            Self::Point | Self::Select | Self::Eraser => None,
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button; drives the active tool.
    Primary,
    /// Middle mouse button; pans while held.
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Case-insensitive comparison, so `"Z"` with shift still reads as `"z"`.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down = zoom out).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    pub tool: Tool,
    pub selected_ids: HashSet<EntityId>,
    pub highlighted_ids: HashSet<EntityId>,
    /// Angular step between angle guides, in degrees.
    pub angle_step_deg: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            selected_ids: HashSet::new(),
            highlighted_ids: HashSet::new(),
            angle_step_deg: DEFAULT_ANGLE_STEP_DEG,
        }
    }
}

impl UiState {
    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
        self.highlighted_ids.clear();
    }

    /// Drop ids that no longer name an entity in `doc`.
    pub fn prune(&mut self, doc: &DocStore) {
        self.selected_ids.retain(|id| doc.contains(id));
        self.highlighted_ids.retain(|id| doc.contains(id));
    }
}

/// Gesture tracked across pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Middle button held; the view follows the pointer.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
}
