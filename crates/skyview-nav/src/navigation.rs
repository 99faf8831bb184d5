//! Bounded view index driven by swipes and direct jumps.

use crate::error::NavConfigError;
use crate::gesture::SwipeDirection;

/// Callback invoked with the new index whenever it changes.
pub type IndexListener = Box<dyn FnMut(usize)>;

/// Current view and the number of views. `current < total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    current: usize,
    total: usize,
}

impl NavigationState {
    pub fn new(total: usize, initial: usize) -> Result<Self, NavConfigError> {
        if total == 0 {
            return Err(NavConfigError::NoViews);
        }
        if initial >= total {
            return Err(NavConfigError::InitialViewOutOfRange {
                index: initial,
                total,
            });
        }
        Ok(Self {
            current: initial,
            total,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.total
    }

    /// Index a swipe would land on. Swiping left reveals the next view.
    fn after_swipe(&self, direction: SwipeDirection) -> usize {
        match direction {
            SwipeDirection::Left if !self.is_last() => self.current + 1,
            SwipeDirection::Right if !self.is_first() => self.current - 1,
            _ => self.current,
        }
    }
}

/// Owns the view index and tells a single listener about changes.
pub struct NavigationController {
    state: NavigationState,
    on_index_changed: IndexListener,
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl NavigationController {
    /// Start on the first view.
    pub fn new(
        total_views: usize,
        on_index_changed: impl FnMut(usize) + 'static,
    ) -> Result<Self, NavConfigError> {
        Self::with_initial_index(total_views, 0, on_index_changed)
    }

    pub fn with_initial_index(
        total_views: usize,
        initial_index: usize,
        on_index_changed: impl FnMut(usize) + 'static,
    ) -> Result<Self, NavConfigError> {
        Ok(Self {
            state: NavigationState::new(total_views, initial_index)?,
            on_index_changed: Box::new(on_index_changed),
        })
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current
    }

    pub fn total_views(&self) -> usize {
        self.state.total
    }

    /// Move one view in response to a swipe. Swipes past either end are absorbed.
    ///
    /// Returns true if the index changed.
    pub fn handle_swipe(&mut self, direction: SwipeDirection) -> bool {
        let next = self.state.after_swipe(direction);
        if next == self.state.current {
            tracing::debug!(?direction, index = next, "Swipe absorbed");
            return false;
        }
        self.commit(next);
        true
    }

    /// Jump to a view, e.g. from an indicator dot.
    ///
    /// Out-of-range and same-index requests are ignored. Returns true if the
    /// index changed.
    pub fn go_to_view(&mut self, index: usize) -> bool {
        if index >= self.state.total {
            tracing::debug!(index, total = self.state.total, "Ignoring out-of-range view");
            return false;
        }
        if index == self.state.current {
            return false;
        }
        self.commit(index);
        true
    }

    fn commit(&mut self, index: usize) {
        tracing::debug!(from = self.state.current, to = index, "View changed");
        self.state.current = index;
        (self.on_index_changed)(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(total: usize, initial: usize) -> (NavigationController, Rc<RefCell<Vec<usize>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let controller =
            NavigationController::with_initial_index(total, initial, move |i| sink.borrow_mut().push(i))
                .unwrap();
        (controller, calls)
    }

    #[test]
    fn test_left_advances_and_notifies() {
        let (mut nav, calls) = recording(3, 0);
        assert!(nav.handle_swipe(SwipeDirection::Left));
        assert_eq!(nav.current_index(), 1);
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[test]
    fn test_right_retreats_and_notifies() {
        let (mut nav, calls) = recording(3, 2);
        assert!(nav.handle_swipe(SwipeDirection::Right));
        assert_eq!(nav.current_index(), 1);
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[test]
    fn test_left_at_last_view_is_absorbed() {
        let (mut nav, calls) = recording(3, 2);
        assert!(!nav.handle_swipe(SwipeDirection::Left));
        assert_eq!(nav.current_index(), 2);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_right_at_first_view_is_absorbed() {
        let (mut nav, calls) = recording(3, 0);
        assert!(!nav.handle_swipe(SwipeDirection::Right));
        assert_eq!(nav.current_index(), 0);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_none_direction_is_noop() {
        let (mut nav, calls) = recording(3, 1);
        assert!(!nav.handle_swipe(SwipeDirection::None));
        assert_eq!(nav.current_index(), 1);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_go_to_view_notifies_once() {
        let (mut nav, calls) = recording(3, 0);
        assert!(nav.go_to_view(2));
        assert!(!nav.go_to_view(2));
        assert_eq!(nav.current_index(), 2);
        assert_eq!(*calls.borrow(), vec![2]);
    }

    #[test]
    fn test_go_to_view_out_of_range_is_ignored() {
        let (mut nav, calls) = recording(3, 1);
        assert!(!nav.go_to_view(3));
        assert!(!nav.go_to_view(usize::MAX));
        assert_eq!(nav.current_index(), 1);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_single_view_never_moves() {
        let (mut nav, calls) = recording(1, 0);
        assert!(!nav.handle_swipe(SwipeDirection::Left));
        assert!(!nav.handle_swipe(SwipeDirection::Right));
        assert!(!nav.go_to_view(0));
        assert!(calls.borrow().is_empty());
        assert!(nav.state().is_first() && nav.state().is_last());
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            NavigationController::new(0, |_| {}).unwrap_err(),
            NavConfigError::NoViews
        );
        assert_eq!(
            NavigationController::with_initial_index(3, 3, |_| {}).unwrap_err(),
            NavConfigError::InitialViewOutOfRange { index: 3, total: 3 }
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Swipe(SwipeDirection),
            GoTo(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::Swipe(SwipeDirection::Left)),
                Just(Op::Swipe(SwipeDirection::Right)),
                Just(Op::Swipe(SwipeDirection::None)),
                (0usize..16).prop_map(Op::GoTo),
            ]
        }

        proptest! {
            #[test]
            fn index_stays_in_bounds(
                total in 1usize..8,
                seed in 0usize..8,
                ops in proptest::collection::vec(op(), 0..64),
            ) {
                let initial = seed % total;
                let (mut nav, calls) = recording(total, initial);
                let mut previous = nav.current_index();
                for op in ops {
                    let changed = match op {
                        Op::Swipe(direction) => nav.handle_swipe(direction),
                        Op::GoTo(index) => nav.go_to_view(index),
                    };
                    let current = nav.current_index();
                    prop_assert!(current < total);
                    prop_assert_eq!(changed, current != previous);
                    previous = current;
                }
                // One notification per actual change, each in range.
                prop_assert!(calls.borrow().iter().all(|&i| i < total));
            }
        }
    }
}
