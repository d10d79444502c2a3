use super::*;
use crate::entity::EntityType;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_line() {
    assert_eq!(Tool::default(), Tool::Line);
}

#[test]
fn drawing_tools() {
    for tool in [Tool::Point, Tool::Line, Tool::Rectangle, Tool::Circle] {
        assert!(tool.is_drawing(), "{tool:?}");
    }
    assert!(!Tool::Select.is_drawing());
    assert!(!Tool::Eraser.is_drawing());
}

#[test]
fn shortcuts_map_to_tools() {
    assert_eq!(Tool::from_shortcut("l"), Some(Tool::Line));
    assert_eq!(Tool::from_shortcut("r"), Some(Tool::Rectangle));
    assert_eq!(Tool::from_shortcut("c"), Some(Tool::Circle));
    assert_eq!(Tool::from_shortcut("s"), Some(Tool::Select));
    assert_eq!(Tool::from_shortcut("p"), Some(Tool::Point));
    assert_eq!(Tool::from_shortcut("e"), Some(Tool::Eraser));
    assert_eq!(Tool::from_shortcut("x"), None);
    assert_eq!(Tool::from_shortcut("Escape"), None);
}

#[test]
fn new_entity_matches_tool() {
    assert_eq!(Tool::Line.new_entity().unwrap().entity_type(), EntityType::Line);
    assert_eq!(Tool::Rectangle.new_entity().unwrap().entity_type(), EntityType::Rectangle);
    assert_eq!(Tool::Circle.new_entity().unwrap().entity_type(), EntityType::Circle);
    assert!(Tool::Point.new_entity().is_none());
    assert!(Tool::Select.new_entity().is_none());
    assert!(Tool::Eraser.new_entity().is_none());
}

// =============================================================
// Modifiers / Key
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
}

#[test]
fn key_compare_ignores_case() {
    assert!(Key::new("Z").is("z"));
    assert!(Key::new("Escape").is("escape"));
    assert!(!Key::new("Delete").is("Backspace"));
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_defaults() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Line);
    assert!(ui.selected_ids.is_empty());
    assert!(ui.highlighted_ids.is_empty());
    assert!((ui.angle_step_deg - DEFAULT_ANGLE_STEP_DEG).abs() < f64::EPSILON);
}

#[test]
fn prune_drops_missing_ids() {
    let kept = Entity::point(Point::new(0.0, 0.0));
    let gone = Entity::point(Point::new(1.0, 0.0));
    let mut doc = DocStore::new();
    doc.push(kept.clone());

    let mut ui = UiState::default();
    ui.selected_ids.extend([kept.id, gone.id]);
    ui.highlighted_ids.insert(gone.id);
    ui.prune(&doc);
    assert_eq!(ui.selected_ids, HashSet::from([kept.id]));
    assert!(ui.highlighted_ids.is_empty());
}

#[test]
fn clear_selection_clears_both_sets() {
    let e = Entity::point(Point::new(0.0, 0.0));
    let mut ui = UiState::default();
    ui.selected_ids.insert(e.id);
    ui.highlighted_ids.insert(e.id);
    ui.clear_selection();
    assert!(ui.selected_ids.is_empty());
    assert!(ui.highlighted_ids.is_empty());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}
