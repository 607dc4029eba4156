//! Store scoping along the action boundaries

use crate::action::FeatureAction;
use crate::compose::internal_case_path;
use feature_boundaries_core::paths::CasePath;
use feature_boundaries_core::Reducer;
use feature_boundaries_runtime::{ScopedStore, Store};

/// A store that only accepts a feature's view actions
///
/// This is what a view layer should hold: it can read the whole state but
/// cannot send internal or delegate actions.
pub type ViewOnlyStore<S, A> = ScopedStore<S, <A as FeatureAction>::ViewAction>;

/// Scoping helpers for stores whose action is a [`FeatureAction`]
pub trait FeatureStoreExt<S, A: FeatureAction> {
    /// Restrict the store to view actions
    #[must_use]
    fn view_scope(&self) -> ViewOnlyStore<S, A>
    where
        S: Clone + Send + 'static,
        A::ViewAction: Send + 'static;

    /// Scope the store to a child nested under the internal boundary
    ///
    /// Actions sent to the child store are embedded with `action` and then
    /// wrapped as internal actions.
    #[must_use]
    fn scope_internal<CS, CA, F>(&self, to_child_state: F, action: &CasePath<A::InternalAction, CA>) -> ScopedStore<CS, CA>
    where
        F: Fn(&S) -> CS + Send + Sync + 'static,
        CS: Send + 'static,
        CA: Send + 'static,
        A: 'static,
        A::InternalAction: Clone + 'static;
}

impl<S, A, E, R> FeatureStoreExt<S, A> for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: FeatureAction + Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    fn view_scope(&self) -> ViewOnlyStore<S, A>
    where
        S: Clone + Send + 'static,
        A::ViewAction: Send + 'static,
    {
        self.scope(S::clone, A::view)
    }

    fn scope_internal<CS, CA, F>(&self, to_child_state: F, action: &CasePath<A::InternalAction, CA>) -> ScopedStore<CS, CA>
    where
        F: Fn(&S) -> CS + Send + Sync + 'static,
        CS: Send + 'static,
        CA: Send + 'static,
        A: 'static,
        A::InternalAction: Clone + 'static,
    {
        let path = internal_case_path(action);
        self.scope(to_child_state, move |child| path.embed(child))
    }
}

impl<S, A> FeatureStoreExt<S, A> for ScopedStore<S, A>
where
    S: Send + 'static,
    A: FeatureAction + Send + 'static,
{
    fn view_scope(&self) -> ViewOnlyStore<S, A>
    where
        S: Clone + Send + 'static,
        A::ViewAction: Send + 'static,
    {
        self.scope(|state| state, A::view)
    }

    fn scope_internal<CS, CA, F>(&self, to_child_state: F, action: &CasePath<A::InternalAction, CA>) -> ScopedStore<CS, CA>
    where
        F: Fn(&S) -> CS + Send + Sync + 'static,
        CS: Send + 'static,
        CA: Send + 'static,
        A: 'static,
        A::InternalAction: Clone + 'static,
    {
        let path = internal_case_path(action);
        self.scope(move |state: S| to_child_state(&state), move |child| path.embed(child))
    }
}
