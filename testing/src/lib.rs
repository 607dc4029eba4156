//! # Feature Boundaries Testing
//!
//! Testing utilities for reducers built with Feature Boundaries.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: effect assertions, including cancellation
//! - [`mocks`]: deterministic environment implementations
//! - [`diagnostics`]: capture of routing warnings
//!
//! ## Example
//!
//! ```ignore
//! use feature_boundaries_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(ChecklistReducer.core())
//!     .with_env(test_environment())
//!     .given_state(ChecklistState::default())
//!     .when_action(ChecklistAction::view(ChecklistView::AddTapped))
//!     .then_state(|state| assert_eq!(state.rows.len(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use feature_boundaries_core::environment::Clock;

pub mod diagnostics;
pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use feature_boundaries_testing::mocks::FixedClock;
    /// use feature_boundaries_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

// Re-export commonly used items
pub use diagnostics::{CapturedEvent, WarningCapture};
pub use mocks::{test_clock, FixedClock};
pub use reducer_test::{assertions, ReducerTest};
