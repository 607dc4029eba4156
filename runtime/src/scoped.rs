//! Stores narrowed to a child feature's state and actions.
//!
//! A [`ScopedStore`] does not own anything. It forwards every action, embedded
//! into the parent's action type, to the store it was scoped from, and reads
//! state through a projection of the parent's state. Scoping a scoped store
//! composes both functions.

use crate::{EffectHandle, StoreError};
use futures::future::BoxFuture;
use std::sync::Arc;

type SendFn<A> = Arc<dyn Fn(A) -> BoxFuture<'static, Result<EffectHandle, StoreError>> + Send + Sync>;
type ReadFn<S> = Arc<dyn Fn() -> BoxFuture<'static, S> + Send + Sync>;

/// A view of a [`Store`](crate::Store) typed by a child's state `S` and
/// action `A`
///
/// Created with [`Store::scope`](crate::Store::scope) or [`ScopedStore::scope`].
pub struct ScopedStore<S, A> {
    send: SendFn<A>,
    read: ReadFn<S>,
}

impl<S, A> ScopedStore<S, A>
where
    S: Send + 'static,
    A: Send + 'static,
{
    pub(crate) fn new(send: SendFn<A>, read: ReadFn<S>) -> Self {
        Self { send, read }
    }

    /// Embed `action` and send it to the underlying store
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the underlying store is
    /// shutting down.
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        (self.send)(action).await
    }

    /// Read the projected state via a closure
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = (self.read)().await;
        f(&state)
    }

    /// Narrow further
    #[must_use]
    pub fn scope<CS, CA, F, G>(&self, to_child_state: F, embed: G) -> ScopedStore<CS, CA>
    where
        F: Fn(S) -> CS + Send + Sync + 'static,
        G: Fn(CA) -> A + Send + Sync + 'static,
        CS: Send + 'static,
        CA: Send + 'static,
    {
        let send = Arc::clone(&self.send);
        let read = Arc::clone(&self.read);
        let project = Arc::new(to_child_state);

        ScopedStore::new(
            Arc::new(move |action: CA| send(embed(action))),
            Arc::new(move || -> BoxFuture<'static, CS> {
                let read = Arc::clone(&read);
                let project = Arc::clone(&project);
                Box::pin(async move { project(read().await) })
            }),
        )
    }
}

impl<S, A> Clone for ScopedStore<S, A> {
    fn clone(&self) -> Self {
        Self {
            send: Arc::clone(&self.send),
            read: Arc::clone(&self.read),
        }
    }
}

impl<S, A> std::fmt::Debug for ScopedStore<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedStore")
            .field("state", &std::any::type_name::<S>())
            .field("action", &std::any::type_name::<A>())
            .finish_non_exhaustive()
    }
}
