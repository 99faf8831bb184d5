//! Swipe classification.
//!
//! A gesture is a start/end pair of pointer positions. Classification happens
//! once, at the end, against the full start-to-end displacement and elapsed
//! time. Move events are accepted but never change the outcome.

use serde::{Deserialize, Serialize};

use crate::error::NavConfigError;

pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 50.0;
pub const DEFAULT_MAX_PERPENDICULAR_DRIFT: f64 = 100.0;
pub const DEFAULT_MAX_DURATION_MS: u64 = 500;

/// Outcome of a completed gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
    #[default]
    None,
}

impl SwipeDirection {
    pub fn is_swipe(self) -> bool {
        !matches!(self, SwipeDirection::None)
    }
}

/// Limits a gesture must satisfy to count as a swipe. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeThresholds {
    /// Minimum horizontal travel in pixels
    pub distance_threshold: f64,
    /// Maximum vertical travel in pixels
    pub max_perpendicular_drift: f64,
    /// Maximum time between start and end
    pub max_duration_ms: u64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            max_perpendicular_drift: DEFAULT_MAX_PERPENDICULAR_DRIFT,
            max_duration_ms: DEFAULT_MAX_DURATION_MS,
        }
    }
}

impl SwipeThresholds {
    pub fn new(
        distance_threshold: f64,
        max_perpendicular_drift: f64,
        max_duration_ms: u64,
    ) -> Result<Self, NavConfigError> {
        let thresholds = Self {
            distance_threshold,
            max_perpendicular_drift,
            max_duration_ms,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), NavConfigError> {
        check_distance("distance_threshold", self.distance_threshold)?;
        check_distance("max_perpendicular_drift", self.max_perpendicular_drift)?;
        if self.max_duration_ms == 0 {
            return Err(NavConfigError::ZeroDuration);
        }
        Ok(())
    }
}

fn check_distance(field: &'static str, value: f64) -> Result<(), NavConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(NavConfigError::InvalidDistance { field, value })
    }
}

/// Where and when a gesture began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub start_x: f64,
    pub start_y: f64,
    pub start_time_ms: u64,
}

impl GestureSample {
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            start_x: x,
            start_y: y,
            start_time_ms: timestamp_ms,
        }
    }

    /// Measure the gesture against its release point.
    pub fn resolve(&self, x: f64, y: f64, timestamp_ms: u64) -> GestureResult {
        GestureResult {
            delta_x: x - self.start_x,
            delta_y: y - self.start_y,
            // A release stamped before the start counts as instantaneous.
            elapsed_ms: timestamp_ms.saturating_sub(self.start_time_ms),
        }
    }
}

/// Displacement and duration of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureResult {
    pub delta_x: f64,
    pub delta_y: f64,
    pub elapsed_ms: u64,
}

impl GestureResult {
    pub fn classify(&self, limits: &SwipeThresholds) -> SwipeDirection {
        if !self.delta_x.is_finite() || !self.delta_y.is_finite() {
            return SwipeDirection::None;
        }
        if self.elapsed_ms > limits.max_duration_ms {
            return SwipeDirection::None;
        }
        if self.delta_x.abs() < limits.distance_threshold {
            return SwipeDirection::None;
        }
        if self.delta_y.abs() > limits.max_perpendicular_drift {
            return SwipeDirection::None;
        }

        if self.delta_x < 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        }
    }
}

/// Tracks at most one in-flight gesture and classifies it on release.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    limits: SwipeThresholds,
    sample: Option<GestureSample>,
}

impl GestureTracker {
    pub fn new(limits: SwipeThresholds) -> Result<Self, NavConfigError> {
        limits.validate()?;
        Ok(Self {
            limits,
            sample: None,
        })
    }

    pub fn thresholds(&self) -> &SwipeThresholds {
        &self.limits
    }

    /// True between a start and its matching end.
    pub fn is_tracking(&self) -> bool {
        self.sample.is_some()
    }

    /// Begin a gesture. Any unfinished gesture is discarded.
    pub fn on_gesture_start(&mut self, x: f64, y: f64, timestamp_ms: u64) {
        if self.sample.is_some() {
            tracing::trace!("Gesture restarted before release; dropping previous sample");
        }
        self.sample = Some(GestureSample::new(x, y, timestamp_ms));
    }

    /// Intermediate position. Reserved for live drag feedback; classification
    /// only looks at the end point.
    pub fn on_gesture_move(&mut self, x: f64, y: f64, timestamp_ms: u64) {
        tracing::trace!(x, y, timestamp_ms, "Gesture move");
    }

    /// Finish the current gesture and classify it.
    ///
    /// Returns `SwipeDirection::None` when no gesture is in flight, including
    /// a second end without a new start.
    pub fn on_gesture_end(&mut self, x: f64, y: f64, timestamp_ms: u64) -> SwipeDirection {
        let Some(sample) = self.sample.take() else {
            tracing::debug!("Gesture end without a start; ignoring");
            return SwipeDirection::None;
        };

        let result = sample.resolve(x, y, timestamp_ms);
        let direction = result.classify(&self.limits);
        tracing::debug!(
            delta_x = result.delta_x,
            delta_y = result.delta_y,
            elapsed_ms = result.elapsed_ms,
            ?direction,
            "Gesture classified"
        );
        direction
    }
}
