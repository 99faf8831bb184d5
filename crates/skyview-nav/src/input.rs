//! Touch and mouse unification.
//!
//! Both modalities are reduced to the same start/move/end calls on a
//! [`GestureTracker`]. Touch only ever reports moves and ends for an active
//! contact, so mouse moves and releases are dropped unless the button is held.

use serde::{Deserialize, Serialize};

use crate::gesture::{GestureTracker, SwipeDirection};

/// Physical source of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Touch,
    Mouse,
}

/// Touchstart/mousedown, touchmove/mousemove, touchend/mouseup, mouseleave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Start,
    Move,
    End,
    /// Pointer left the widget. Ends a held mouse gesture like a release.
    Leave,
}

/// A normalized pointer event. For touch, `x`/`y` belong to the first contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub modality: Modality,
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
    /// Monotonic milliseconds
    pub timestamp_ms: u64,
}

impl PointerEvent {
    pub fn new(modality: Modality, phase: PointerPhase, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            modality,
            phase,
            x,
            y,
            timestamp_ms,
        }
    }

    pub fn touch(phase: PointerPhase, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(Modality::Touch, phase, x, y, timestamp_ms)
    }

    pub fn mouse(phase: PointerPhase, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(Modality::Mouse, phase, x, y, timestamp_ms)
    }
}

/// Gate in front of the tracker that holds the mouse-button state.
#[derive(Debug, Clone, Default)]
pub struct PointerInput {
    mouse_down: bool,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the mouse button is held on the widget.
    pub fn is_dragging(&self) -> bool {
        self.mouse_down
    }

    /// Feed one event to the tracker.
    ///
    /// Returns the classification when the event completed a gesture, `None`
    /// for starts, moves and ignored events.
    pub fn dispatch(
        &mut self,
        event: PointerEvent,
        tracker: &mut GestureTracker,
    ) -> Option<SwipeDirection> {
        let PointerEvent {
            modality,
            phase,
            x,
            y,
            timestamp_ms,
        } = event;

        match (modality, phase) {
            (Modality::Mouse, PointerPhase::Start) => {
                self.mouse_down = true;
                tracker.on_gesture_start(x, y, timestamp_ms);
                None
            }
            (Modality::Mouse, _) if !self.mouse_down => {
                tracing::trace!(?phase, "Mouse event without button held; ignoring");
                None
            }
            (Modality::Mouse, PointerPhase::Move) => {
                tracker.on_gesture_move(x, y, timestamp_ms);
                None
            }
            (Modality::Mouse, PointerPhase::End | PointerPhase::Leave) => {
                self.mouse_down = false;
                Some(tracker.on_gesture_end(x, y, timestamp_ms))
            }
            (Modality::Touch, PointerPhase::Start) => {
                tracker.on_gesture_start(x, y, timestamp_ms);
                None
            }
            (Modality::Touch, PointerPhase::Move) => {
                tracker.on_gesture_move(x, y, timestamp_ms);
                None
            }
            (Modality::Touch, PointerPhase::End) => {
                // The tracker holds a single sample; a held drag ends with it.
                self.mouse_down = false;
                Some(tracker.on_gesture_end(x, y, timestamp_ms))
            }
            // Touch contacts cannot leave without ending.
            (Modality::Touch, PointerPhase::Leave) => None,
        }
    }
}
