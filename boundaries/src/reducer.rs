//! Reducers that handle each boundary separately

use crate::action::{ActionBoundary, FeatureAction};
use feature_boundaries_core::{Effect, Reducer, SmallVec};

/// A reducer with one handler per action boundary
///
/// Only [`reduce_view`](Self::reduce_view) is required. Internal and delegate
/// actions are ignored unless their handlers are overridden: no state change,
/// no effect.
///
/// Use [`core`](Self::core) to obtain the framework [`Reducer`].
pub trait BoundingReducer {
    /// State this reducer operates on
    type State;
    /// Action type, split into three boundaries
    type Action: FeatureAction;
    /// Injected dependencies
    type Environment;

    /// Handle an event from the UI
    fn reduce_view(
        &self,
        state: &mut Self::State,
        action: <Self::Action as FeatureAction>::ViewAction,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]>;

    /// Handle an internal action; ignored by default
    fn reduce_internal(
        &self,
        _state: &mut Self::State,
        _action: <Self::Action as FeatureAction>::InternalAction,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        SmallVec::new()
    }

    /// Handle a delegate action; ignored by default
    ///
    /// A feature usually sends delegate actions rather than handling them;
    /// the parent reacts to them through its own internal handler.
    fn reduce_delegate(
        &self,
        _state: &mut Self::State,
        _action: <Self::Action as FeatureAction>::DelegateAction,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        SmallVec::new()
    }

    /// Route `action` to the handler of its boundary
    ///
    /// Boundaries are tried in the order view, internal, delegate; exactly
    /// one handler runs.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action.into_boundary() {
            ActionBoundary::View(action) => self.reduce_view(state, action, env),
            ActionBoundary::Internal(action) => self.reduce_internal(state, action, env),
            ActionBoundary::Delegate(action) => self.reduce_delegate(state, action, env),
        }
    }

    /// The feature's core reducer
    fn core(self) -> Bounded<Self>
    where
        Self: Sized,
    {
        Bounded::new(self)
    }
}

/// Adapts a [`BoundingReducer`] to the framework [`Reducer`] trait
#[derive(Clone, Debug, Default)]
pub struct Bounded<R>(R);

impl<R> Bounded<R> {
    /// Wrap a bounding reducer
    pub const fn new(reducer: R) -> Self {
        Self(reducer)
    }

    /// The wrapped reducer
    pub const fn inner(&self) -> &R {
        &self.0
    }

    /// Unwrap
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: BoundingReducer> Reducer for Bounded<R> {
    type State = R::State;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.0.reduce(state, action, env)
    }
}

/// A feature whose full behavior is its core composed with children
///
/// [`body`](Self::body) builds that composition, usually by starting from
/// `self.clone().core()` and chaining the helpers of
/// [`FeatureReducerExt`](crate::FeatureReducerExt). Store the result once
/// rather than rebuilding it per action.
pub trait ComposedBoundingReducer: BoundingReducer {
    /// The composed reducer
    type Body: Reducer<State = Self::State, Action = Self::Action, Environment = Self::Environment>;

    /// Build the composed reducer
    fn body(&self) -> Self::Body;
}
