//! Integration tests for Store action broadcasting
//!
//! Effect-produced actions are broadcast to observers before they are fed
//! back, which is what lets callers wait for a specific result action.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use feature_boundaries_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use feature_boundaries_runtime::{Store, StoreConfig, StoreError};
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum SyncAction {
    /// Start syncing a list with a correlation id
    Start { id: u64 },
    /// One page of the list arrived
    PageLoaded { id: u64, page: u32 },
    /// Terminal action
    Finished { id: u64 },
    /// Never produced by the reducer
    Failed { id: u64 },
    Touch,
    Touched { value: u32 },
}

#[derive(Debug, Clone, Default)]
struct SyncState {
    touches: u32,
    pages: Vec<u32>,
}

struct SyncReducer;

impl Reducer for SyncReducer {
    type State = SyncState;
    type Action = SyncAction;
    type Environment = ();

    fn reduce(&self, state: &mut SyncState, action: SyncAction, _env: &()) -> SmallVec<[Effect<SyncAction>; 4]> {
        match action {
            SyncAction::Start { id } => smallvec![Effect::Future(Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Some(SyncAction::PageLoaded { id, page: 1 })
            }))],
            SyncAction::PageLoaded { id, page } => {
                state.pages.push(page);
                if page < 3 {
                    smallvec![Effect::Future(Box::pin(async move {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        Some(SyncAction::PageLoaded { id, page: page + 1 })
                    }))]
                } else {
                    smallvec![Effect::Future(Box::pin(async move { Some(SyncAction::Finished { id }) }))]
                }
            },
            SyncAction::Touch => {
                state.touches += 1;
                let value = state.touches;
                smallvec![Effect::Future(Box::pin(async move { Some(SyncAction::Touched { value }) }))]
            },
            SyncAction::Finished { .. } | SyncAction::Failed { .. } | SyncAction::Touched { .. } => {
                smallvec![Effect::None]
            },
        }
    }
}

fn store() -> Store<SyncState, SyncAction, (), SyncReducer> {
    Store::new(SyncState::default(), SyncReducer, ())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn send_and_wait_for_immediate_result() {
    let store = store();

    let result = store
        .send_and_wait_for(
            SyncAction::Touch,
            |action| matches!(action, SyncAction::Touched { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, SyncAction::Touched { value: 1 });
}

#[tokio::test]
async fn send_and_wait_for_multi_step_flow() {
    let store = store();

    let result = store
        .send_and_wait_for(
            SyncAction::Start { id: 42 },
            |action| matches!(action, SyncAction::Finished { id: 42 }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, SyncAction::Finished { id: 42 });
    assert_eq!(store.state(|s| s.pages.clone()).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn send_and_wait_for_times_out() {
    let store = store();

    let result = store
        .send_and_wait_for(
            SyncAction::Start { id: 99 },
            |action| matches!(action, SyncAction::Failed { id: 99 }),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}

#[tokio::test]
async fn concurrent_waiters_filter_by_correlation_id() {
    let store = store();
    let mut handles = vec![];

    for id in 1..=4 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    SyncAction::Start { id },
                    move |action| matches!(action, SyncAction::Finished { id: done } if *done == id),
                    Duration::from_secs(2),
                )
                .await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let id = u64::try_from(i).unwrap() + 1;
        let result = handle.await.expect("task panicked").unwrap();
        assert_eq!(result, SyncAction::Finished { id });
    }

    assert_eq!(store.state(|s| s.pages.len()).await, 12);
}

#[tokio::test]
async fn subscribers_see_effect_actions_in_order() {
    let store = store();
    let mut rx = store.subscribe_actions();

    let mut handle = store.send(SyncAction::Start { id: 7 }).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let mut received = Vec::new();
    while let Ok(action) = rx.try_recv() {
        received.push(action);
    }

    // The first handle only covers the first page; keep reading until done.
    while !received.contains(&SyncAction::Finished { id: 7 }) {
        received.push(tokio::time::timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap());
    }

    assert_eq!(
        received,
        vec![
            SyncAction::PageLoaded { id: 7, page: 1 },
            SyncAction::PageLoaded { id: 7, page: 2 },
            SyncAction::PageLoaded { id: 7, page: 3 },
            SyncAction::Finished { id: 7 },
        ]
    );
}

#[tokio::test]
async fn direct_sends_are_not_broadcast() {
    let store = store();
    let mut rx = store.subscribe_actions();

    store
        .send_and_wait_for(
            SyncAction::Touch,
            |action| matches!(action, SyncAction::Touched { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(rx.recv().await.unwrap(), SyncAction::Touched { value: 1 });
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn lagging_subscriber_skips_old_actions() {
    let store = Store::with_config(
        SyncState::default(),
        SyncReducer,
        (),
        StoreConfig::default().with_broadcast_capacity(4),
    );
    let mut rx = store.subscribe_actions();

    for _ in 0..20 {
        let mut handle = store.send(SyncAction::Touch).await.unwrap();
        handle.wait().await;
    }

    let mut received = 0;
    let mut lagged = false;
    loop {
        match rx.try_recv() {
            Ok(_) => received += 1,
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => lagged = true,
            Err(_) => break,
        }
    }

    assert!(lagged, "expected subscriber to lag");
    assert_eq!(received, 4);
}
