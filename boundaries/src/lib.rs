//! # Feature Boundaries
//!
//! A convention for splitting a feature's actions into three boundaries, and
//! the helpers that make composing features along it short:
//!
//! - **View**: events coming from the UI
//! - **Internal**: the feature's private traffic, including its children's actions
//! - **Delegate**: notifications addressed to whoever embeds the feature
//!
//! ## Core Components
//!
//! - [`FeatureAction`] / [`ActionBoundary`]: the three-boundary action contract,
//!   with `#[derive(FeatureAction)]`
//! - [`BoundingReducer`]: one handler per boundary; internal and delegate
//!   default to no-ops. [`Bounded`] turns it into a [`Reducer`]
//! - [`FeatureReducerExt`], [`scope_internal`], [`scope_case_internal`]:
//!   compose children nested under the parent's internal boundary
//! - [`FeatureStoreExt`]: scope stores to the view boundary or to a child
//!
//! ## Example
//!
//! ```
//! use feature_boundaries::{BoundingReducer, FeatureAction};
//! use feature_boundaries_core::{smallvec, Effect, Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, FeatureAction)]
//! enum CounterAction {
//!     View(CounterView),
//!     Internal(()),
//!     Delegate(()),
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterView {
//!     IncrementTapped,
//! }
//!
//! struct Counter;
//!
//! impl BoundingReducer for Counter {
//!     type State = i32;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce_view(&self, state: &mut i32, action: CounterView, _env: &()) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterView::IncrementTapped => *state += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let reducer = Counter.core();
//! let mut count = 0;
//! let _ = reducer.reduce(&mut count, CounterAction::view(CounterView::IncrementTapped), &());
//! let _ = reducer.reduce(&mut count, CounterAction::internal(()), &());
//! assert_eq!(count, 1);
//! ```

extern crate self as feature_boundaries;

pub mod action;
pub mod compose;
pub mod reducer;
pub mod store;

pub use action::{ActionBoundary, FeatureAction};
pub use compose::{internal_case_path, scope_case_internal, scope_internal, FeatureReducerExt};
pub use reducer::{Bounded, BoundingReducer, ComposedBoundingReducer};
pub use store::{FeatureStoreExt, ViewOnlyStore};

/// `#[derive(FeatureAction)]`
pub use feature_boundaries_macros::FeatureAction;

pub use feature_boundaries_core::Reducer;
