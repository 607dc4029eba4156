//! Checklist demo binary
//!
//! Scripts a short session against a store and prints what each child did.
//! Set `STORE_BROADCAST_CAPACITY` / `STORE_SHUTDOWN_TIMEOUT_MS` to tune the
//! store and `METRICS_ADDR` to install the Prometheus recorder.

use anyhow::Context;
use checklist::{
    ChecklistAction, ChecklistEnvironment, ChecklistInternal, ChecklistReducer, ChecklistState, ChecklistView,
    EditorAction, PromptAction, RowAction, SearchAction,
};
use feature_boundaries::{ComposedBoundingReducer, FeatureAction, FeatureStoreExt};
use feature_boundaries_core::case_path;
use feature_boundaries_runtime::metrics::MetricsServer;
use feature_boundaries_runtime::{Store, StoreConfig};
use feature_boundaries_testing::test_clock;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "checklist=debug,feature_boundaries_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let metrics = match std::env::var("METRICS_ADDR") {
        Ok(addr) => {
            let addr: SocketAddr = addr.parse().context("METRICS_ADDR is not a socket address")?;
            let mut server = MetricsServer::new(addr);
            server.start()?;
            Some(server)
        },
        Err(_) => None,
    };

    let config = StoreConfig::from_env()?;
    let env = ChecklistEnvironment::new(test_clock())
        .with_sync_delay(Duration::from_millis(30))
        .with_autosave_delay(Duration::from_millis(60));
    let store = Store::with_config(ChecklistState::default(), ChecklistReducer.body(), env, config);

    let mut delegates = store.subscribe_actions();
    tokio::spawn(async move {
        while let Ok(action) = delegates.recv().await {
            if let Some(delegate) = action.delegate_action() {
                tracing::info!(?delegate, "checklist reported to its parent");
            }
        }
    });

    println!("=== Checklist: Feature Boundaries ===\n");

    // The UI holds a store that only accepts view actions.
    let ui = store.view_scope();
    for title in ["Oat milk", "Eggs", "Milk chocolate"] {
        ui.send(ChecklistView::AddRow(title.to_string())).await?;
    }
    println!("Added {} rows", store.state(|s| s.rows.len()).await);

    // Rows are driven through a child store scoped under the internal boundary.
    let rows = store.scope_internal(|s: &ChecklistState| s.rows.clone(), &case_path!(ChecklistInternal::Row(id, action)));
    rows.send((2, RowAction::Toggle)).await?;
    tokio::time::sleep(Duration::from_millis(60)).await;
    let eggs = store.state(|s| s.rows.get(&2).map(|row| (row.done, row.synced))).await;
    println!("Eggs (done, synced): {eggs:?}");

    // Rename through the editor; saving closes it and cancels its pending autosave.
    ui.send(ChecklistView::EditTapped(1)).await?;
    let editor = store.scope_internal(|s: &ChecklistState| s.editor.clone(), &case_path!(ChecklistInternal::Editor));
    editor.send(EditorAction::Typed("Oat milk (2L)".into())).await?;
    editor.send(EditorAction::Save).await?.wait().await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    println!(
        "Row 1 is now {:?}, editor open: {}",
        store.state(|s| s.rows.get(&1).map(|row| row.title.clone())).await,
        editor.state(Option::is_some).await
    );

    // A late autosave addressed to the closed editor is dropped with a warning.
    store
        .send(ChecklistAction::internal(ChecklistInternal::Editor(EditorAction::Autosave)))
        .await?;

    ui.send(ChecklistView::SearchTapped).await?;
    store
        .send(ChecklistAction::internal(ChecklistInternal::Search(SearchAction::QueryChanged("milk".into()))))
        .await?;
    println!("Search: {:?}", store.state(|s| s.mode.clone()).await);
    ui.send(ChecklistView::SearchClosed).await?;

    ui.send(ChecklistView::ClearCompletedTapped).await?;
    println!("Prompt: {:?}", store.state(|s| s.prompt).await);
    store
        .send(ChecklistAction::internal(ChecklistInternal::Prompt(PromptAction::Clear)))
        .await?
        .wait()
        .await;
    println!("Remaining rows: {:?}", store.state(|s| s.rows.ids().collect::<Vec<_>>()).await);

    // Eggs is gone; its row actions have nowhere to go.
    rows.send((2, RowAction::Toggle)).await?;

    store.shutdown_with_default_timeout().await?;

    if let Some(scrape) = metrics.as_ref().and_then(|server| server.render()) {
        println!("\n--- metrics ---\n{scrape}");
    }

    println!("\n=== Done ===");
    Ok(())
}
