//! Multi-click construction protocol.
//!
//! Every drawing tool builds its entity from a stream of world-space clicks.
//! The protocol has two states, [`Construction::Empty`] and
//! [`Construction::Anchored`], and one pure transition,
//! [`Construction::send`]. A [`Draft`] pairs that state with the payload it
//! eventually produces, so an entity can be drawn as a preview while it is
//! still anchored.

#[cfg(test)]
#[path = "construct_test.rs"]
mod construct_test;

use crate::geom::Point;

/// State of a two-click construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Construction {
    /// No click received yet.
    #[default]
    Empty,
    /// The first click has been received and anchors the shape.
    Anchored(Point),
}

/// Result of feeding one click into a [`Construction`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// The click became the anchor; more input is needed.
    Anchored,
    /// The click completed the shape. Carries the anchor and the final click.
    Complete { anchor: Point, point: Point },
}

impl Construction {
    /// Feed a click and return the next state plus what happened.
    ///
    /// Completion leaves the state anchored so the first point stays queryable.
    #[must_use]
    pub fn send(self, point: Point) -> (Construction, Step) {
        match self {
            Construction::Empty => (Construction::Anchored(point), Step::Anchored),
            Construction::Anchored(anchor) => (self, Step::Complete { anchor, point }),
        }
    }

    /// The anchor point, if one has been received.
    #[must_use]
    pub fn anchor(self) -> Option<Point> {
        match self {
            Construction::Empty => None,
            Construction::Anchored(p) => Some(p),
        }
    }
}

/// An in-progress or finished payload built by a [`Construction`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draft<T> {
    state: Construction,
    payload: Option<T>,
}

impl<T> Default for Draft<T> {
    fn default() -> Self {
        Self { state: Construction::Empty, payload: None }
    }
}

impl<T: Copy> Draft<T> {
    /// A draft awaiting its first click.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A draft anchored at `anchor` with no payload yet.
    #[must_use]
    pub fn anchored(anchor: Point) -> Self {
        Self { state: Construction::Anchored(anchor), payload: None }
    }

    /// An already finished draft, e.g. reconstructed from persisted data.
    #[must_use]
    pub fn finished(anchor: Point, payload: T) -> Self {
        Self { state: Construction::Anchored(anchor), payload: Some(payload) }
    }

    /// Feed a click. `build` turns `(anchor, point)` into the payload and
    /// returns `None` when the result would be degenerate, in which case the
    /// click is ignored and the draft stays anchored.
    ///
    /// Returns `true` once the draft is complete.
    pub fn send(&mut self, point: Point, build: impl FnOnce(Point, Point) -> Option<T>) -> bool {
        if self.payload.is_some() {
            return true;
        }
        let (next, step) = self.state.send(point);
        match step {
            Step::Anchored => {
                self.state = next;
                false
            }
            Step::Complete { anchor, point } => match build(anchor, point) {
                Some(payload) => {
                    self.state = next;
                    self.payload = Some(payload);
                    true
                }
                None => false,
            },
        }
    }

    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.state.anchor()
    }

    #[must_use]
    pub fn payload(&self) -> Option<T> {
        self.payload
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.payload.is_some()
    }
}
