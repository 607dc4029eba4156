//! Standalone scoping of a child reducer into a parent domain

use super::{embedding, lift, ROUTING_TARGET};
use crate::effect::Effect;
use crate::paths::{CaseLens, CasePath, Lens};
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Runs a child reducer on a field of parent state
///
/// Actions that extract through `action` are reduced by the child against
/// the field addressed by `state`; the child's effects are embedded back
/// into the parent action type. Every other action is ignored.
///
/// # Example
///
/// ```
/// use feature_boundaries_core::composition::Scope;
/// use feature_boundaries_core::{case_path, lens, smallvec, Effect, Reducer, SmallVec};
///
/// #[derive(Clone, Default)]
/// struct CounterState {
///     count: i32,
/// }
///
/// #[derive(Clone)]
/// enum CounterAction {
///     Increment,
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = CounterState;
///     type Action = CounterAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut CounterState, _action: CounterAction, _env: &()) -> SmallVec<[Effect<CounterAction>; 4]> {
///         state.count += 1;
///         smallvec![Effect::None]
///     }
/// }
///
/// #[derive(Default)]
/// struct AppState {
///     counter: CounterState,
/// }
///
/// #[derive(Clone)]
/// enum AppAction {
///     Counter(CounterAction),
/// }
///
/// let scoped = Scope::new(lens!(AppState, counter), case_path!(AppAction::Counter), CounterReducer);
///
/// let mut state = AppState::default();
/// let effects = scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
/// assert_eq!(state.counter.count, 1);
/// assert!(effects.is_empty());
/// ```
pub struct Scope<S, A, C: Reducer> {
    state: Lens<S, C::State>,
    action: CasePath<A, C::Action>,
    child: C,
}

impl<S, A, C: Reducer> Scope<S, A, C> {
    /// Scope `child` to the field `state` and the action case `action`
    #[must_use]
    pub const fn new(state: Lens<S, C::State>, action: CasePath<A, C::Action>, child: C) -> Self {
        Self {
            state,
            action,
            child,
        }
    }
}

impl<S, A, C> Reducer for Scope<S, A, C>
where
    A: Send + 'static,
    C: Reducer,
    C::Action: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = C::Environment;

    fn reduce(&self, state: &mut S, action: A, env: &C::Environment) -> SmallVec<[Effect<A>; 4]> {
        let Some(child_action) = self.action.extract(&action) else {
            return SmallVec::new();
        };

        let effects = self
            .child
            .reduce(self.state.get_mut(state), child_action, env);
        lift(effects, embedding(self.action.clone())).collect()
    }
}

/// Runs a child reducer on one case of an enum parent state
///
/// The standalone counterpart of [`IfCaseLet`](super::IfCaseLet): it is
/// combined with the parent rather than wrapping it. When a child action
/// arrives while the state is in a different case (because an earlier
/// reducer already switched it), the action cannot be delivered: a warning is
/// logged on [`ROUTING_TARGET`] and nothing is mutated.
pub struct ScopeCase<S, A, C: Reducer> {
    state: CaseLens<S, C::State>,
    action: CasePath<A, C::Action>,
    child: C,
}

impl<S, A, C: Reducer> ScopeCase<S, A, C> {
    /// Scope `child` to the state case `state` and the action case `action`
    #[must_use]
    pub const fn new(state: CaseLens<S, C::State>, action: CasePath<A, C::Action>, child: C) -> Self {
        Self {
            state,
            action,
            child,
        }
    }
}

impl<S, A, C> Reducer for ScopeCase<S, A, C>
where
    A: Send + 'static,
    C: Reducer,
    C::Action: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = C::Environment;

    fn reduce(&self, state: &mut S, action: A, env: &C::Environment) -> SmallVec<[Effect<A>; 4]> {
        let Some(child_action) = self.action.extract(&action) else {
            return SmallVec::new();
        };

        let Some(child_state) = self.state.extract_mut(state) else {
            tracing::warn!(
                target: ROUTING_TARGET,
                action = std::any::type_name::<C::Action>(),
                case = std::any::type_name::<C::State>(),
                "ScopeCase received an action while state was in a different case; dropping it"
            );
            return SmallVec::new();
        };

        let effects = self.child.reduce(child_state, child_action, env);
        lift(effects, embedding(self.action.clone())).collect()
    }
}
