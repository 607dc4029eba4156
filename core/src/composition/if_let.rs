//! Optional and enum-case child state, reduced before the parent

use super::{embedding, lift, ROUTING_TARGET};
use crate::effect::{Effect, EffectId};
use crate::paths::{CaseLens, CasePath, Lens};
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// A parent reducer with a child embedded in optional state
///
/// Built with [`ReducerExt::if_let`](super::ReducerExt::if_let) or
/// [`ReducerExt::if_let_ephemeral`](super::ReducerExt::if_let_ephemeral).
///
/// For an action that extracts to a child action:
/// 1. if the child state is `Some`, the child reduces it; otherwise a warning
///    is logged and the child is skipped
/// 2. in ephemeral mode the child state is set to `None`
/// 3. the parent reduces the original action
///
/// Child effects run in a private cancellable group. Whenever the child state
/// goes from `Some` to `None` across the parent's reduction (for any action),
/// an [`Effect::Cancel`] for that group is appended. With
/// [`identified_by`](IfLet::identified_by), replacing the child with an
/// instance of a different identity cancels the group too.
pub struct IfLet<P: Reducer, C: Reducer, K = ()> {
    parent: P,
    child: C,
    state: Lens<P::State, Option<C::State>>,
    action: CasePath<P::Action, C::Action>,
    identity: fn(&C::State) -> K,
    id: EffectId,
    ephemeral: bool,
}

/// Identity of a child that does not say which instance it is
fn anonymous<T>(_: &T) {}

impl<P, C> IfLet<P, C>
where
    P: Reducer,
    C: Reducer<Environment = P::Environment>,
{
    pub(super) fn new(
        parent: P,
        state: Lens<P::State, Option<C::State>>,
        action: CasePath<P::Action, C::Action>,
        child: C,
        ephemeral: bool,
    ) -> Self {
        Self {
            parent,
            child,
            state,
            action,
            identity: anonymous::<C::State>,
            id: EffectId::unique("if_let"),
            ephemeral,
        }
    }
}

impl<P, C, K> IfLet<P, C, K>
where
    P: Reducer,
    C: Reducer<Environment = P::Environment>,
{
    /// Treat child states with different `identity` values as different instances
    ///
    /// When the parent swaps the child for one with another identity, the old
    /// instance's effects are cancelled as if it had been dismissed.
    #[must_use]
    pub fn identified_by<Id: PartialEq>(self, identity: fn(&C::State) -> Id) -> IfLet<P, C, Id> {
        IfLet {
            parent: self.parent,
            child: self.child,
            state: self.state,
            action: self.action,
            identity,
            id: self.id,
            ephemeral: self.ephemeral,
        }
    }

    /// The group the child's effects are registered under
    #[must_use]
    pub const fn effect_id(&self) -> &EffectId {
        &self.id
    }
}

impl<P, C, K> Reducer for IfLet<P, C, K>
where
    P: Reducer,
    P::Action: Send + 'static,
    C: Reducer<Environment = P::Environment>,
    C::Action: Send + 'static,
    K: PartialEq,
{
    type State = P::State;
    type Action = P::Action;
    type Environment = P::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut effects = SmallVec::new();

        if let Some(child_action) = self.action.extract(&action) {
            match self.state.get_mut(state) {
                Some(child_state) => {
                    let child_effects = self.child.reduce(child_state, child_action, env);
                    effects.extend(
                        lift(child_effects, embedding(self.action.clone()))
                            .map(|effect| effect.cancellable(self.id.clone())),
                    );
                },
                None => tracing::warn!(
                    target: ROUTING_TARGET,
                    action = std::any::type_name::<C::Action>(),
                    state = std::any::type_name::<C::State>(),
                    "IfLet received a child action while child state was None; dropping it"
                ),
            }

            if self.ephemeral {
                self.state.set(state, None);
            }
        }

        let before = self.state.get(state).as_ref().map(self.identity);
        effects.extend(self.parent.reduce(state, action, env));
        let after = self.state.get(state).as_ref().map(self.identity);

        if before.is_some() && before != after {
            if after.is_some() {
                tracing::debug!(id = %self.id, "child state replaced, cancelling its effects");
            } else {
                tracing::debug!(id = %self.id, "child state dismissed, cancelling its effects");
            }
            effects.push(Effect::Cancel(self.id.clone()));
        }

        effects
    }
}

/// A parent reducer with a child embedded in one case of an enum state
///
/// Built with [`ReducerExt::if_case_let`](super::ReducerExt::if_case_let).
/// Behaves like [`IfLet`] where "the state is in the child's case" replaces
/// "the state is `Some`": the child runs first, the parent second, and the
/// child's effects are cancelled when the parent moves the state to another
/// case, or, with [`identified_by`](IfCaseLet::identified_by), re-enters the
/// case with a payload of a different identity.
pub struct IfCaseLet<P: Reducer, C: Reducer, K = ()> {
    parent: P,
    child: C,
    state: CaseLens<P::State, C::State>,
    action: CasePath<P::Action, C::Action>,
    identity: fn(&C::State) -> K,
    id: EffectId,
}

impl<P, C> IfCaseLet<P, C>
where
    P: Reducer,
    C: Reducer<Environment = P::Environment>,
{
    pub(super) fn new(
        parent: P,
        state: CaseLens<P::State, C::State>,
        action: CasePath<P::Action, C::Action>,
        child: C,
    ) -> Self {
        Self {
            parent,
            child,
            state,
            action,
            identity: anonymous::<C::State>,
            id: EffectId::unique("if_case_let"),
        }
    }
}

impl<P, C, K> IfCaseLet<P, C, K>
where
    P: Reducer,
    C: Reducer<Environment = P::Environment>,
{
    /// Treat case payloads with different `identity` values as different instances
    #[must_use]
    pub fn identified_by<Id: PartialEq>(self, identity: fn(&C::State) -> Id) -> IfCaseLet<P, C, Id> {
        IfCaseLet {
            parent: self.parent,
            child: self.child,
            state: self.state,
            action: self.action,
            identity,
            id: self.id,
        }
    }

    /// The group the child's effects are registered under
    #[must_use]
    pub const fn effect_id(&self) -> &EffectId {
        &self.id
    }
}

impl<P, C, K> Reducer for IfCaseLet<P, C, K>
where
    P: Reducer,
    P::Action: Send + 'static,
    C: Reducer<Environment = P::Environment>,
    C::Action: Send + 'static,
    K: PartialEq,
{
    type State = P::State;
    type Action = P::Action;
    type Environment = P::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut effects = SmallVec::new();

        if let Some(child_action) = self.action.extract(&action) {
            match self.state.extract_mut(state) {
                Some(child_state) => {
                    let child_effects = self.child.reduce(child_state, child_action, env);
                    effects.extend(
                        lift(child_effects, embedding(self.action.clone()))
                            .map(|effect| effect.cancellable(self.id.clone())),
                    );
                },
                None => tracing::warn!(
                    target: ROUTING_TARGET,
                    action = std::any::type_name::<C::Action>(),
                    case = std::any::type_name::<C::State>(),
                    "IfCaseLet received a child action while state was in a different case; dropping it"
                ),
            }
        }

        let before = self.state.extract(state).map(self.identity);
        effects.extend(self.parent.reduce(state, action, env));
        let after = self.state.extract(state).map(self.identity);

        if before.is_some() && before != after {
            if after.is_some() {
                tracing::debug!(id = %self.id, "child case re-entered, cancelling its effects");
            } else {
                tracing::debug!(id = %self.id, "state left the child case, cancelling its effects");
            }
            effects.push(Effect::Cancel(self.id.clone()));
        }

        effects
    }
}
