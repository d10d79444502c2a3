//! Geometric interaction engine for the 2D drawing canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the drawing: turning raw DOM input events into entity
//! construction, snapping clicks to significant points and angle guides,
//! maintaining the pan/zoom viewport, selection, undo/redo, and rendering.
//! The host JavaScript layer only wires DOM events and animation frames to
//! the engine and stores the JSON or SVG strings it produces.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`geom`] | Points, vectors, boxes, segments, circles and their algebra |
//! | [`entity`] | Entity variants and their shared queries |
//! | [`construct`] | Two-click construction protocol |
//! | [`viewport`] | Pan/zoom and screen/world conversion |
//! | [`proximity`] | Closest-entity and closest-snap-point search |
//! | [`snap`] | Angle guides, snap candidates, hover dwell tracking |
//! | [`selection`] | Click and rectangle selection rules |
//! | [`history`] | Undo/redo snapshot stacks |
//! | [`doc`] | Ordered entity store and JSON persistence |
//! | [`svg`] | SVG export |
//! | [`input`] | Tools, modifiers, keys and UI state |
//! | [`render`] | Canvas 2D drawing |
//! | [`config`] | Runtime tunables |
//! | [`consts`] | Shared numeric constants (distances, dwell time, limits) |

pub mod config;
pub mod construct;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod entity;
pub mod geom;
pub mod history;
pub mod input;
pub mod proximity;
pub mod render;
pub mod selection;
pub mod snap;
pub mod svg;
pub mod viewport;
