use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::{ConfigError, EngineConfig};
use crate::consts::MIN_ANGLE_STEP_DEG;
use crate::doc::{DocStore, DocumentError, SkippedEntry, load_entities_str};
use crate::entity::{Entity, EntityId, EntityKind};
use crate::geom::Point;
use crate::history::History;
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::proximity::find_closest_entity_within;
use crate::render::{self, Scene};
use crate::selection::{SelectionRule, apply_selection_rectangle, select_entity};
use crate::snap::{DrawHelpers, HoverTracker, draw_helpers, resolve_click};
use crate::svg;
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A construction finished and the entity joined the drawing.
    EntityCommitted { id: EntityId },
    /// Entities were removed by Delete or the eraser.
    EntitiesDeleted { ids: Vec<EntityId> },
    SelectionChanged,
    /// Undo, redo, or a document load replaced the whole sequence.
    DocumentRestored,
    ToolChanged(Tool),
    RenderNeeded,
}

/// Turns host frame timestamps into per-frame deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Milliseconds since the previous tick. The first tick, a clock that
    /// goes backwards, or a non-finite timestamp yields `0`.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let elapsed = self.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_ms = Some(now_ms);
        elapsed
    }
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: DocStore,
    pub viewport: Viewport,
    pub ui: UiState,
    pub input: InputState,
    pub config: EngineConfig,
    /// The entity under construction, not yet part of `doc`.
    pub active: Option<Entity>,
    pub helpers: DrawHelpers,
    pub hover: HoverTracker,
    pub history: History,
    pub clock: FrameClock,
    pub mouse_screen: Point,
    pub mouse_world: Point,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails [`EngineConfig::validate`].
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let ui = UiState { angle_step_deg: config.angle_step_deg, ..UiState::default() };
        Self {
            doc: DocStore::new(),
            viewport: Viewport::default(),
            ui,
            input: InputState::default(),
            config,
            active: None,
            helpers: DrawHelpers::default(),
            hover: HoverTracker::new(config.hover_dwell_ms),
            history: History::new(config.history_limit),
            clock: FrameClock::default(),
            mouse_screen: Point::origin(),
            mouse_world: Point::origin(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Tool / settings ---

    /// Switch tools. Drops any construction in progress, hover tracking, and the selection.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        self.active = None;
        self.hover.clear();
        self.ui.clear_selection();
        self.refresh_helpers();
        tracing::debug!(?tool, "tool changed");
        vec![Action::ToolChanged(tool), Action::RenderNeeded]
    }

    /// Change the angle-guide step. Steps outside `[MIN_ANGLE_STEP_DEG, 360]`
    /// are ignored.
    pub fn set_angle_step(&mut self, degrees: f64) {
        if (MIN_ANGLE_STEP_DEG..=360.0).contains(&degrees) {
            self.ui.angle_step_deg = degrees;
            self.refresh_helpers();
        } else {
            tracing::debug!(degrees, "angle step out of range");
        }
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.track_mouse(screen_pt);
        if button == Button::Middle {
            self.input = InputState::Panning { last_screen: screen_pt };
        }
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if let InputState::Panning { last_screen } = self.input {
            self.viewport.pan_by_screen_delta(screen_pt - last_screen);
            self.input = InputState::Panning { last_screen: screen_pt };
        }
        self.track_mouse(screen_pt);
        self.update_highlight();
        vec![Action::RenderNeeded]
    }

    /// Tools act on release of the primary button; releasing the middle button ends a pan.
    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.track_mouse(screen_pt);
        match button {
            Button::Middle => {
                self.input = InputState::Idle;
                Vec::new()
            }
            Button::Secondary => Vec::new(),
            Button::Primary => {
                // Select and eraser act on the raw pointer.
                let click = if self.ui.tool.is_drawing() {
                    resolve_click(&self.helpers, self.mouse_world, self.snap_radius())
                } else {
                    self.mouse_world
                };
                let mut actions = match self.ui.tool {
                    Tool::Point => self.commit(Entity::point(click)),
                    Tool::Line | Tool::Rectangle | Tool::Circle => self.draw_click(click),
                    Tool::Select => self.select_click(click, modifiers),
                    Tool::Eraser => self.erase_at(click),
                };
                self.refresh_helpers();
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    /// Zoom around the cursor. A zero vertical delta does nothing.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if delta.dy == 0.0 {
            return Vec::new();
        }
        self.viewport.zoom_at(screen_pt, delta.dy, self.config.zoom_multiplier);
        self.track_mouse(screen_pt);
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is("Escape") {
            return self.cancel();
        }
        if key.is("Delete") {
            return self.delete_selected();
        }
        if modifiers.ctrl && key.is("z") {
            return if modifiers.shift { self.redo() } else { self.undo() };
        }
        if modifiers.ctrl || modifiers.meta || modifiers.alt {
            return Vec::new();
        }
        match Tool::from_shortcut(&key.0) {
            Some(tool) => self.set_tool(tool),
            None => Vec::new(),
        }
    }

    /// Advance one animation frame: age hovered snap points by the frame
    /// delta and refresh highlight and snap helpers.
    pub fn on_frame(&mut self, timestamp_ms: f64) {
        let elapsed = self.clock.tick(timestamp_ms);
        let radius = self.snap_radius();
        self.update_highlight();
        self.hover.track(self.helpers.entity_snap_point, self.mouse_world, radius, elapsed);
        self.refresh_helpers();
    }

    // --- Editing ---

    /// Cancel the construction in progress and clear selection and highlight.
    pub fn cancel(&mut self) -> Vec<Action> {
        self.active = None;
        self.hover.clear();
        self.ui.clear_selection();
        self.refresh_helpers();
        vec![Action::SelectionChanged, Action::RenderNeeded]
    }

    /// Remove every selected entity as one undoable step.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if self.ui.selected_ids.is_empty() {
            return Vec::new();
        }
        let ids: Vec<EntityId> = self
            .doc
            .entities()
            .iter()
            .map(|e| e.id)
            .filter(|id| self.ui.selected_ids.contains(id))
            .collect();
        self.history.push(self.doc.snapshot());
        self.doc.remove_all(&self.ui.selected_ids);
        self.ui.selected_ids.clear();
        self.ui.prune(&self.doc);
        self.refresh_helpers();
        tracing::debug!(count = ids.len(), "entities deleted");
        vec![Action::EntitiesDeleted { ids }, Action::RenderNeeded]
    }

    pub fn undo(&mut self) -> Vec<Action> {
        let Some(previous) = self.history.undo(self.doc.snapshot()) else {
            return Vec::new();
        };
        self.restore(previous)
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let Some(next) = self.history.redo(self.doc.snapshot()) else {
            return Vec::new();
        };
        self.restore(next)
    }

    // --- Persistence ---

    /// Replace the drawing with a persisted JSON array. Bad entries are
    /// skipped and returned; history and selection start fresh.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the text is not a JSON array.
    pub fn load_json(&mut self, json: &str) -> Result<Vec<SkippedEntry>, DocumentError> {
        let report = load_entities_str(json)?;
        self.doc.replace(report.entities);
        self.history.clear();
        self.active = None;
        self.hover.clear();
        self.ui.clear_selection();
        self.refresh_helpers();
        Ok(report.skipped)
    }

    /// The drawing as a persisted JSON array.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.doc.to_json().to_string()
    }

    #[must_use]
    pub fn export_svg(&self) -> String {
        svg::export_svg(self.doc.entities(), self.config.svg_margin)
    }

    // --- Queries ---

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        self.doc.entities()
    }

    #[must_use]
    pub fn active_entity(&self) -> Option<&Entity> {
        self.active.as_ref()
    }

    /// Everything the renderer needs for one frame.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            doc: &self.doc,
            active: self.active.as_ref(),
            helpers: &self.helpers,
            hovered: self.hover.hovered(),
            ui: &self.ui,
            viewport: &self.viewport,
            mouse_world: self.mouse_world,
        }
    }

    // --- Internals ---

    fn snap_radius(&self) -> f64 {
        self.viewport.screen_dist_to_world(self.config.snap_distance_px)
    }

    fn highlight_radius(&self) -> f64 {
        self.viewport.screen_dist_to_world(self.config.highlight_distance_px)
    }

    fn track_mouse(&mut self, screen_pt: Point) {
        self.mouse_screen = screen_pt;
        self.mouse_world = self.viewport.screen_to_world(screen_pt);
        self.refresh_helpers();
    }

    /// Anchors for angle guides: the active construction's first point while
    /// it has no shape yet, plus every eligible hovered snap point.
    fn guide_anchors(&self) -> Vec<Point> {
        let mut anchors: Vec<Point> = self
            .active
            .as_ref()
            .filter(|e| !e.is_complete())
            .and_then(Entity::first_point)
            .into_iter()
            .collect();
        anchors.extend(self.hover.eligible().into_iter().map(|sp| sp.point));
        anchors
    }

    fn refresh_helpers(&mut self) {
        if !self.ui.tool.is_drawing() {
            self.helpers = DrawHelpers::default();
            return;
        }
        let eligible = self.hover.eligible();
        self.helpers = draw_helpers(
            self.doc.entities(),
            &self.guide_anchors(),
            &eligible,
            self.mouse_world,
            self.ui.angle_step_deg,
            self.snap_radius(),
        );
    }

    fn update_highlight(&mut self) {
        self.ui.highlighted_ids.clear();
        if self.ui.tool != Tool::Select {
            return;
        }
        if let Some(hit) = find_closest_entity_within(self.mouse_world, self.doc.entities(), self.highlight_radius()) {
            self.ui.highlighted_ids.insert(hit.entity.id);
        }
    }

    fn commit(&mut self, entity: Entity) -> Vec<Action> {
        let id = entity.id;
        tracing::debug!(%id, kind = ?entity.entity_type(), "entity committed");
        self.history.push(self.doc.snapshot());
        self.doc.push(entity);
        self.hover.clear();
        vec![Action::EntityCommitted { id }]
    }

    fn draw_click(&mut self, click: Point) -> Vec<Action> {
        let Some(mut entity) = self.active.take().or_else(|| self.ui.tool.new_entity()) else {
            return Vec::new();
        };
        if !entity.send(click) {
            self.active = Some(entity);
            return Vec::new();
        }
        // Lines chain: the next segment starts where this one ended.
        let next = matches!(entity.kind, EntityKind::Line(_)).then(|| Entity::line_from(click));
        let actions = self.commit(entity);
        self.active = next;
        actions
    }

    fn select_click(&mut self, click: Point, modifiers: Modifiers) -> Vec<Action> {
        self.ui.highlighted_ids.clear();
        let rule = SelectionRule::from_modifiers(modifiers);
        let dragging = self
            .active
            .as_ref()
            .is_some_and(|e| matches!(e.kind, EntityKind::SelectionRectangle(_)));

        if !dragging {
            let hit = find_closest_entity_within(self.mouse_world, self.doc.entities(), self.highlight_radius())
                .map(|hit| hit.entity.id);
            if let Some(id) = hit {
                select_entity(&mut self.ui.selected_ids, id, rule);
                tracing::debug!(%id, ?rule, "entity clicked");
                return vec![Action::SelectionChanged];
            }
        }

        let mut rectangle = match self.active.take() {
            Some(e) if matches!(e.kind, EntityKind::SelectionRectangle(_)) => e,
            _ => Entity::selection_rectangle(),
        };
        if rectangle.send(click) {
            apply_selection_rectangle(&mut self.ui.selected_ids, self.doc.entities(), &rectangle, rule);
            vec![Action::SelectionChanged]
        } else {
            self.active = Some(rectangle);
            Vec::new()
        }
    }

    fn erase_at(&mut self, click: Point) -> Vec<Action> {
        let Some(id) = find_closest_entity_within(click, self.doc.entities(), self.highlight_radius()).map(|hit| hit.entity.id)
        else {
            return Vec::new();
        };
        self.history.push(self.doc.snapshot());
        self.doc.remove(&id);
        self.ui.prune(&self.doc);
        tracing::debug!(%id, "entity erased");
        vec![Action::EntitiesDeleted { ids: vec![id] }]
    }

    fn restore(&mut self, entities: Vec<Entity>) -> Vec<Action> {
        self.doc.replace(entities);
        self.ui.prune(&self.doc);
        self.refresh_helpers();
        vec![Action::DocumentRestored, Action::RenderNeeded]
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    /// # Errors
    ///
    /// See [`EngineCore::with_config`].
    pub fn with_config(canvas: HtmlCanvasElement, config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self { canvas, core: EngineCore::with_config(config)? })
    }

    // --- Delegated inputs ---

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    pub fn set_angle_step(&mut self, degrees: f64) {
        self.core.set_angle_step(degrees);
    }

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    /// One animation frame: tick the core, then draw.
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.core.on_frame(timestamp_ms);
        self.render();
    }

    /// Draw the current state to the canvas. Failures are logged, never raised.
    pub fn render(&self) {
        let result = self.context().and_then(|ctx| {
            render::draw(
                &ctx,
                &self.core.scene(),
                self.core.viewport_width,
                self.core.viewport_height,
                self.core.dpr,
            )
        });
        if let Err(err) = result {
            tracing::warn!(?err, "render failed");
        }
    }

    fn context(&self) -> Result<CanvasRenderingContext2d, JsValue> {
        self.canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)
    }

    // --- Delegated persistence / queries ---

    /// # Errors
    ///
    /// See [`EngineCore::load_json`].
    pub fn load_json(&mut self, json: &str) -> Result<Vec<SkippedEntry>, DocumentError> {
        self.core.load_json(json)
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        self.core.to_json()
    }

    #[must_use]
    pub fn export_svg(&self) -> String {
        self.core.export_svg()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport
    }
}
