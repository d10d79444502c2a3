//! Selection rules for clicks and selection rectangles.
//!
//! Selection state is a set of entity ids owned by [`crate::input::UiState`].
//! Functions here only mutate that set.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashSet;

use crate::entity::{Entity, EntityId, SelectionMode};
use crate::geom::Aabb;
use crate::input::Modifiers;

/// How a click or a rectangle match changes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRule {
    /// Ctrl held: flip membership.
    Toggle,
    /// Shift held: add without removing anything.
    Add,
    /// No modifier: the hit becomes the whole selection.
    Replace,
}

impl SelectionRule {
    /// Ctrl wins over shift when both are held.
    #[must_use]
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.ctrl {
            Self::Toggle
        } else if modifiers.shift {
            Self::Add
        } else {
            Self::Replace
        }
    }
}

/// Apply a click on a single entity.
pub fn select_entity(selected: &mut HashSet<EntityId>, id: EntityId, rule: SelectionRule) {
    match rule {
        SelectionRule::Replace => {
            selected.clear();
            selected.insert(id);
        }
        SelectionRule::Add => {
            selected.insert(id);
        }
        SelectionRule::Toggle => {
            if !selected.remove(&id) {
                selected.insert(id);
            }
        }
    }
}

/// Whether `entity` is picked by a selection box in `mode`.
#[must_use]
pub fn matches(entity: &Entity, selection: &Aabb, mode: SelectionMode) -> bool {
    match mode {
        SelectionMode::Containment => entity.is_contained_in_box(selection),
        SelectionMode::Intersection => entity.is_contained_in_box(selection) || entity.intersects_with_box(selection),
    }
}

/// Apply a finished selection rectangle to every entity.
///
/// Matching entities follow `rule`. Non-matching entities are deselected only
/// under [`SelectionRule::Replace`]. Returns the number of matches; an
/// unfinished rectangle matches nothing and leaves the selection untouched.
pub fn apply_selection_rectangle(
    selected: &mut HashSet<EntityId>,
    entities: &[Entity],
    rectangle: &Entity,
    rule: SelectionRule,
) -> usize {
    let (Some(mode), Some(bounds)) = (rectangle.selection_mode(), rectangle.bounding_box()) else {
        return 0;
    };

    let mut matched = 0;
    for entity in entities {
        if matches(entity, &bounds, mode) {
            matched += 1;
            match rule {
                SelectionRule::Toggle => {
                    if !selected.remove(&entity.id) {
                        selected.insert(entity.id);
                    }
                }
                SelectionRule::Add | SelectionRule::Replace => {
                    selected.insert(entity.id);
                }
            }
        } else if rule == SelectionRule::Replace {
            selected.remove(&entity.id);
        }
    }
    tracing::debug!(matched, ?mode, ?rule, "selection rectangle applied");
    matched
}
