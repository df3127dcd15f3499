//! Drag-gesture translation: one swipe per touch sequence.

use serde::{Deserialize, Serialize};

use crate::config::GestureConfig;

/// Axis along which a swiper reacts to drags.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionAxis {
    X,
    Y,
    #[default]
    None,
}

/// Advance requested by a gesture.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Prev,
}

/// Tracks one touch sequence from start to end.
#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    cfg: GestureConfig,
    origin: (f32, f32),
    locked: bool,
}

impl GestureTracker {
    pub fn new(cfg: GestureConfig) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn start(&mut self, x: f32, y: f32) {
        self.origin = (x, y);
        self.locked = false;
    }

    /// Classify a move. Returns a direction at most once per gesture: when
    /// the main-axis offset dominates the cross axis by more than the
    /// threshold. Dragging towards positive main offsets means `Prev`.
    pub fn movement(&mut self, axis: MotionAxis, x: f32, y: f32) -> Option<Direction> {
        if self.locked {
            return None;
        }
        let (dx, dy) = (x - self.origin.0, y - self.origin.1);
        let (main, cross) = match axis {
            MotionAxis::X => (dx, dy),
            MotionAxis::Y => (dy, dx),
            MotionAxis::None => return None,
        };
        if main.abs() - cross.abs() <= self.cfg.threshold {
            return None;
        }
        self.locked = true;
        Some(if main > 0.0 {
            Direction::Prev
        } else {
            Direction::Next
        })
    }

    pub fn end(&mut self) {
        self.origin = (0.0, 0.0);
        self.locked = false;
    }
}
