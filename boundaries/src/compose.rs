//! Composing child features under the parent's internal boundary
//!
//! A parent embeds a child by giving it a case of its internal action:
//!
//! ```ignore
//! enum ListInternal {
//!     Row(RowId, RowAction),
//!     Detail(DetailAction),
//! }
//! ```
//!
//! Addressing the child then takes two steps, `ListAction::Internal` and then
//! `ListInternal::Row`. The helpers here take only the second step, a path
//! from the internal payload to the child action, and prepend the first. They
//! otherwise behave exactly like the framework operators they build.

use crate::action::FeatureAction;
use feature_boundaries_core::composition::{
    EmptyReducer, ForEach, IfCaseLet, IfLet, ReducerExt, Scope, ScopeCase,
};
use feature_boundaries_core::identified::{Identifiable, IdentifiedVec};
use feature_boundaries_core::paths::{CaseLens, CasePath, Lens};
use feature_boundaries_core::Reducer;

type Internal<A> = <A as FeatureAction>::InternalAction;

/// Extend a path into a feature's internal payload to a path into the
/// feature's action
#[must_use]
pub fn internal_case_path<A, C>(path: &CasePath<Internal<A>, C>) -> CasePath<A, C>
where
    A: FeatureAction + 'static,
    Internal<A>: Clone + 'static,
    C: 'static,
{
    A::internal_path().appending(path)
}

/// Run `child` on a field of the parent state, for child actions nested under
/// the parent's internal boundary
///
/// Combine the result with the parent's core reducer, usually with
/// [`combine_reducers`](feature_boundaries_core::composition::combine_reducers).
#[must_use]
pub fn scope_internal<S, A, C, F>(
    state: Lens<S, C::State>,
    action: &CasePath<Internal<A>, C::Action>,
    child: F,
) -> Scope<S, A, C>
where
    A: FeatureAction + 'static,
    Internal<A>: Clone + 'static,
    C: Reducer,
    C::Action: 'static,
    F: FnOnce() -> C,
{
    Scope::new(state, internal_case_path(action), child())
}

/// Run `child` on one case of an enum parent state, for child actions nested
/// under the parent's internal boundary
///
/// If the state is in another case when a child action arrives, the action
/// is dropped with a warning.
#[must_use]
pub fn scope_case_internal<S, A, C, F>(
    state: CaseLens<S, C::State>,
    action: &CasePath<Internal<A>, C::Action>,
    child: F,
) -> ScopeCase<S, A, C>
where
    A: FeatureAction + 'static,
    Internal<A>: Clone + 'static,
    C: Reducer,
    C::Action: 'static,
    F: FnOnce() -> C,
{
    ScopeCase::new(state, internal_case_path(action), child())
}

/// Child-before-parent composition addressed through the internal boundary
///
/// Implemented for every [`Reducer`] whose action is a [`FeatureAction`].
/// Each method is the [`ReducerExt`] operator of the same name with the
/// parent's internal case prepended to `action`.
pub trait FeatureReducerExt: Reducer + Sized
where
    Self::Action: FeatureAction + 'static,
    Internal<Self::Action>: Clone + 'static,
{
    /// [`ReducerExt::if_let`] for a child nested under the internal boundary
    ///
    /// The child runs before the parent; if the parent clears the child
    /// state, the child's in-flight effects are cancelled.
    fn if_let_internal<C, F>(
        self,
        state: Lens<Self::State, Option<C::State>>,
        action: &CasePath<Internal<Self::Action>, C::Action>,
        child: F,
    ) -> IfLet<Self, C>
    where
        C: Reducer<Environment = Self::Environment>,
        C::Action: 'static,
        F: FnOnce() -> C,
    {
        self.if_let(state, internal_case_path(action), child)
    }

    /// [`ReducerExt::if_let_ephemeral`] for state nested under the internal
    /// boundary
    fn if_let_ephemeral_internal<CS, CA>(
        self,
        state: Lens<Self::State, Option<CS>>,
        action: &CasePath<Internal<Self::Action>, CA>,
    ) -> IfLet<Self, EmptyReducer<CS, CA, Self::Environment>>
    where
        CA: 'static,
    {
        self.if_let_ephemeral(state, internal_case_path(action))
    }

    /// [`ReducerExt::for_each`] for element actions nested under the internal
    /// boundary
    fn for_each_internal<C, F>(
        self,
        state: Lens<Self::State, IdentifiedVec<C::State>>,
        action: &CasePath<Internal<Self::Action>, (<C::State as Identifiable>::Id, C::Action)>,
        element: F,
    ) -> ForEach<Self, C>
    where
        C: Reducer<Environment = Self::Environment>,
        C::State: Identifiable,
        <C::State as Identifiable>::Id: 'static,
        C::Action: 'static,
        F: FnOnce() -> C,
    {
        self.for_each(state, internal_case_path(action), element)
    }

    /// [`ReducerExt::if_case_let`] for a child nested under the internal
    /// boundary
    fn if_case_let_internal<C, F>(
        self,
        state: CaseLens<Self::State, C::State>,
        action: &CasePath<Internal<Self::Action>, C::Action>,
        child: F,
    ) -> IfCaseLet<Self, C>
    where
        C: Reducer<Environment = Self::Environment>,
        C::Action: 'static,
        F: FnOnce() -> C,
    {
        self.if_case_let(state, internal_case_path(action), child)
    }
}

impl<R> FeatureReducerExt for R
where
    R: Reducer,
    R::Action: FeatureAction + 'static,
    Internal<R::Action>: Clone + 'static,
{
}
