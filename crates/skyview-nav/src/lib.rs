//! Gesture-driven view navigation for SkyView
//!
//! Turns touch and mouse input into left/right swipes and keeps a bounded
//! view index that a renderer follows.

pub mod error;
pub mod gesture;
pub mod input;
pub mod navigation;

pub use error::NavConfigError;
pub use gesture::{GestureResult, GestureSample, GestureTracker, SwipeDirection, SwipeThresholds};
pub use input::{Modality, PointerEvent, PointerInput, PointerPhase};
pub use navigation::{IndexListener, NavigationController, NavigationState};

use serde::{Deserialize, Serialize};

/// Navigation settings as they appear in the config file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationSettings {
    /// Number of pages in the widget
    pub total_views: usize,
    /// Page shown on startup
    #[serde(default)]
    pub initial_view: usize,
    #[serde(flatten)]
    pub swipe: SwipeThresholds,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            total_views: 3,
            initial_view: 0,
            swipe: SwipeThresholds::default(),
        }
    }
}

impl NavigationSettings {
    pub fn validate(&self) -> Result<(), NavConfigError> {
        NavigationState::new(self.total_views, self.initial_view)?;
        self.swipe.validate()
    }
}

/// Tracker, input gate and controller wired together.
#[derive(Debug)]
pub struct SwipeNavigation {
    tracker: GestureTracker,
    input: PointerInput,
    controller: NavigationController,
}

impl SwipeNavigation {
    pub fn new(
        settings: NavigationSettings,
        on_index_changed: impl FnMut(usize) + 'static,
    ) -> Result<Self, NavConfigError> {
        let tracker = GestureTracker::new(settings.swipe)?;
        let controller = NavigationController::with_initial_index(
            settings.total_views,
            settings.initial_view,
            on_index_changed,
        )?;
        Ok(Self {
            tracker,
            input: PointerInput::new(),
            controller,
        })
    }

    /// Route a pointer event; completed swipes move the view.
    ///
    /// Returns the classification if the event ended a gesture.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<SwipeDirection> {
        let direction = self.input.dispatch(event, &mut self.tracker)?;
        self.controller.handle_swipe(direction);
        Some(direction)
    }

    pub fn go_to_view(&mut self, index: usize) -> bool {
        self.controller.go_to_view(index)
    }

    pub fn current_index(&self) -> usize {
        self.controller.current_index()
    }

    pub fn total_views(&self) -> usize {
        self.controller.total_views()
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }
}
