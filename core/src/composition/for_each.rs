//! Identity-keyed collections of child state, reduced before the parent

use super::{lift, ROUTING_TARGET};
use crate::effect::{Effect, EffectId};
use crate::identified::{Identifiable, IdentifiedVec};
use crate::paths::{CasePath, Lens};
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::collections::HashSet;

type ElementId<C> = <<C as Reducer>::State as Identifiable>::Id;

/// A parent reducer with an element reducer embedded over a collection
///
/// Built with [`ReducerExt::for_each`](super::ReducerExt::for_each).
///
/// Element actions carry the id of the element they are addressed to. The
/// element reducer runs first, on that element only; if no element has that
/// id (it was removed earlier in the same dispatch, or never existed), a
/// warning naming the id is logged and the element reducer is skipped. The
/// parent then reduces the original action.
///
/// Each element's effects run in their own cancellable group, derived from
/// this operator's id and the element id. Any element that leaves the
/// collection during the dispatch has its group cancelled: removed, replaced
/// by a push with the same id, removed and pushed again, or re-keyed by the
/// element reducer. If the parent replaces the collection wholesale, the
/// groups of all elements are cancelled.
pub struct ForEach<P: Reducer, C: Reducer>
where
    C::State: Identifiable,
{
    parent: P,
    element: C,
    state: Lens<P::State, IdentifiedVec<C::State>>,
    action: CasePath<P::Action, (ElementId<C>, C::Action)>,
    id: EffectId,
}

impl<P, C> ForEach<P, C>
where
    P: Reducer,
    C: Reducer<Environment = P::Environment>,
    C::State: Identifiable,
{
    pub(super) fn new(
        parent: P,
        state: Lens<P::State, IdentifiedVec<C::State>>,
        action: CasePath<P::Action, (ElementId<C>, C::Action)>,
        element: C,
    ) -> Self {
        Self {
            parent,
            element,
            state,
            action,
            id: EffectId::unique("for_each"),
        }
    }

    /// The group the effects of element `id` are registered under
    #[must_use]
    pub fn effect_id(&self, id: &ElementId<C>) -> EffectId {
        self.id.child(id)
    }
}

impl<P, C> Reducer for ForEach<P, C>
where
    P: Reducer,
    P::Action: Send + 'static,
    C: Reducer<Environment = P::Environment>,
    C::Action: Send + 'static,
    C::State: Identifiable,
    ElementId<C>: Send + Sync + 'static,
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
        self.state.get_mut(state).track_departures();

        if let Some((element_id, element_action)) = self.action.extract(&action) {
            match self.state.get_mut(state).get_mut(&element_id) {
                Some(mut element) => {
                    let element_effects = self.element.reduce(&mut element, element_action, env);
                    let group = self.effect_id(&element_id);
                    let path = self.action.clone();
                    let embed = move |child| path.embed((element_id.clone(), child));
                    effects.extend(
                        lift(element_effects, embed)
                            .map(|effect| effect.cancellable(group.clone())),
                    );
                },
                None => tracing::warn!(
                    target: ROUTING_TARGET,
                    id = ?element_id,
                    action = std::any::type_name::<C::Action>(),
                    "ForEach received an action for an element that is not in the collection; dropping it"
                ),
            }
        }

        effects.extend(self.parent.reduce(state, action, env));

        match self.state.get_mut(state).take_departures() {
            Some(departed) => {
                let mut seen = HashSet::new();
                for id in departed {
                    if seen.insert(id.clone()) {
                        tracing::debug!(id = ?id, "element left the collection, cancelling its effects");
                        effects.push(Effect::Cancel(self.effect_id(&id)));
                    }
                }
            },
            None => {
                tracing::debug!(id = %self.id, "collection replaced, cancelling every element's effects");
                effects.push(Effect::Cancel(self.id.clone()));
            },
        }

        effects
    }
}
