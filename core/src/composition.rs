//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **[`Scope`]**: Run a child reducer on a field of parent state
//! - **[`ScopeCase`]**: Run a child reducer on one case of an enum parent state
//! - **[`IfLet`]**: Run a child on optional state, before the parent
//! - **[`IfCaseLet`]**: Run a child on one case of an enum state, before the parent
//! - **[`ForEach`]**: Run an element reducer on one element of an [`IdentifiedVec`](crate::identified::IdentifiedVec), before the parent
//!
//! The `IfLet`, `IfCaseLet`, and `ForEach` operators are built with
//! [`ReducerExt`] on the parent reducer. They always run the child first so the
//! child can react to an action before the parent removes its state, and they
//! cancel the child's in-flight effects when its state disappears or is
//! replaced by another instance.
//!
//! An action addressed to child state that is not there is an application
//! logic inconsistency, not an error: it is reported with `tracing::warn!` on
//! the [`ROUTING_TARGET`] target and dropped.
//!
//! # Examples
//!
//! ## Combining Reducers
//!
//! ```
//! use feature_boundaries_core::{Effect, Reducer, smallvec, SmallVec};
//! use feature_boundaries_core::composition::combine_reducers;
//!
//! #[derive(Clone)]
//! struct AppState {
//!     counter: i32,
//!     logged: bool,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     Increment,
//!     Log,
//! }
//!
//! struct CounterReducer;
//! struct LoggingReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = AppState;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
//!         if matches!(action, AppAction::Increment) {
//!             state.counter += 1;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! impl Reducer for LoggingReducer {
//!     type State = AppState;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
//!         if matches!(action, AppAction::Log) {
//!             state.logged = true;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(LoggingReducer)]);
//!
//! let mut state = AppState { counter: 0, logged: false };
//! let _ = combined.reduce(&mut state, AppAction::Increment, &());
//! assert_eq!(state.counter, 1);
//! ```

use crate::effect::Effect;
use crate::identified::{Identifiable, IdentifiedVec};
use crate::paths::{CaseLens, CasePath, Lens};
use crate::reducer::Reducer;
use smallvec::SmallVec;

mod for_each;
mod if_let;
mod scope;

pub use for_each::ForEach;
pub use if_let::{IfCaseLet, IfLet};
pub use scope::{Scope, ScopeCase};

/// `tracing` target for child actions that could not be delivered
pub const ROUTING_TARGET: &str = "feature_boundaries::routing";

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
/// This is useful when you want to split reducer logic across multiple implementations.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
/// - `E`: The environment type
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer {
        reducers: reducers.into(),
    }
}

type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`]. Cloning shares the underlying reducers.
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: std::sync::Arc<[BoxedReducer<S, A, E>]>,
}

impl<S, A, E> Clone for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    fn clone(&self) -> Self {
        Self {
            reducers: std::sync::Arc::clone(&self.reducers),
        }
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in self.reducers.iter() {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// A reducer that does nothing
///
/// The child of an ephemeral [`IfLet`]: the child state has no logic of its
/// own and only exists until the next action addressed to it.
pub struct EmptyReducer<S, A, E> {
    _phantom: std::marker::PhantomData<fn() -> (S, A, E)>,
}

impl<S, A, E> EmptyReducer<S, A, E> {
    /// Create an empty reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, A, E> Default for EmptyReducer<S, A, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A, E> Clone for EmptyReducer<S, A, E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S, A, E> Reducer for EmptyReducer<S, A, E> {
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, _state: &mut S, _action: A, _env: &E) -> SmallVec<[Effect<A>; 4]> {
        SmallVec::new()
    }
}

/// Builders for child-before-parent composition
///
/// Implemented for every [`Reducer`]; the receiver is the parent's own logic.
pub trait ReducerExt: Reducer + Sized {
    /// Embed a child reducer that works on an optional field of parent state
    ///
    /// For a child action, the child runs first when its state is present
    /// (warning and skipping it otherwise), then the parent runs. If the
    /// child state was present and is `None` after the parent ran, the
    /// child's in-flight effects are cancelled. Chain
    /// [`IfLet::identified_by`] to cancel them on replacement as well.
    fn if_let<C, F>(
        self,
        state: Lens<Self::State, Option<C::State>>,
        action: CasePath<Self::Action, C::Action>,
        child: F,
    ) -> IfLet<Self, C>
    where
        C: Reducer<Environment = Self::Environment>,
        F: FnOnce() -> C,
    {
        IfLet::new(self, state, action, child(), false)
    }

    /// Embed optional state with no logic of its own (alerts, dialogs)
    ///
    /// Any action addressed to it sets the state to `None` before the parent
    /// runs, so the parent only has to react to the choice that was made.
    fn if_let_ephemeral<CS, CA>(
        self,
        state: Lens<Self::State, Option<CS>>,
        action: CasePath<Self::Action, CA>,
    ) -> IfLet<Self, EmptyReducer<CS, CA, Self::Environment>> {
        IfLet::new(self, state, action, EmptyReducer::new(), true)
    }

    /// Embed an element reducer that works on elements of a collection
    ///
    /// An element action addressed to an id that is not in the collection is
    /// reported and dropped; the parent still runs.
    fn for_each<C, F>(
        self,
        state: Lens<Self::State, IdentifiedVec<C::State>>,
        action: CasePath<Self::Action, (<C::State as Identifiable>::Id, C::Action)>,
        element: F,
    ) -> ForEach<Self, C>
    where
        C: Reducer<Environment = Self::Environment>,
        C::State: Identifiable,
        F: FnOnce() -> C,
    {
        ForEach::new(self, state, action, element())
    }

    /// Embed a child reducer that works on one case of an enum parent state
    ///
    /// Like [`ReducerExt::if_let`] with "state is in the case" in place of
    /// "state is `Some`".
    fn if_case_let<C, F>(
        self,
        state: CaseLens<Self::State, C::State>,
        action: CasePath<Self::Action, C::Action>,
        child: F,
    ) -> IfCaseLet<Self, C>
    where
        C: Reducer<Environment = Self::Environment>,
        F: FnOnce() -> C,
    {
        IfCaseLet::new(self, state, action, child())
    }
}

impl<R: Reducer> ReducerExt for R {}

/// Lift child effects into the parent action type, dropping no-ops
fn lift<P, C, F>(effects: SmallVec<[Effect<C>; 4]>, embed: F) -> impl Iterator<Item = Effect<P>>
where
    P: Send + 'static,
    C: Send + 'static,
    F: Fn(C) -> P + Clone + Send + Sync + 'static,
{
    effects
        .into_iter()
        .filter(|effect| !effect.is_none())
        .map(move |effect| effect.map(embed.clone()))
}

fn embedding<P, C>(path: CasePath<P, C>) -> impl Fn(C) -> P + Clone + Send + Sync + 'static
where
    P: 'static,
    C: 'static,
{
    move |action| path.embed(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Clone, Default)]
    struct TestState {
        counter: i32,
        name: String,
    }

    #[derive(Clone)]
    enum TestAction {
        Increment,
        Decrement,
        SetName(String),
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.counter += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.counter -= 1;
                    smallvec![Effect::None]
                },
                TestAction::SetName(_) => smallvec![Effect::None],
            }
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if let TestAction::SetName(name) = action {
                state.name = name;
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn test_combine_reducers() {
        let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(NameReducer)]);

        let mut state = TestState::default();

        let _ = combined.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 1);

        let _ = combined.reduce(&mut state, TestAction::SetName("Alice".to_string()), &());
        assert_eq!(state.name, "Alice");

        let _ = combined.clone().reduce(&mut state, TestAction::Decrement, &());
        assert_eq!(state.counter, 0);
        assert_eq!(state.name, "Alice");
    }

    #[test]
    fn empty_reducer_produces_nothing() {
        let mut state = TestState::default();
        let effects = EmptyReducer::<TestState, TestAction, ()>::new().reduce(
            &mut state,
            TestAction::Increment,
            &(),
        );
        assert!(effects.is_empty());
        assert_eq!(state.counter, 0);
    }
}
