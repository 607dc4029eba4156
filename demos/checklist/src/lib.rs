//! Checklist demo for Feature Boundaries
//!
//! A checklist whose children cover each way a child can be embedded:
//!
//! - rows in an identity-keyed collection (`for_each_internal`)
//! - an optional rename sheet with an autosave timer (`if_let_internal`)
//! - a confirmation prompt dismissed by its own answer (`if_let_ephemeral_internal`)
//! - a search field that only exists in one case of the screen mode
//!   (`scope_internal` over a `ScopeCase`)
//!
//! # Quick Start
//!
//! ```no_run
//! use checklist::{ChecklistAction, ChecklistEnvironment, ChecklistReducer, ChecklistState, ChecklistView};
//! use feature_boundaries::{ComposedBoundingReducer, FeatureAction};
//! use feature_boundaries_core::environment::SystemClock;
//! use feature_boundaries_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = ChecklistEnvironment::new(SystemClock);
//! let store = Store::new(ChecklistState::default(), ChecklistReducer.body(), env);
//!
//! store.send(ChecklistAction::view(ChecklistView::AddRow("Buy milk".into()))).await?;
//!
//! let rows = store.state(|s| s.rows.len()).await;
//! println!("Rows: {rows}");
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod types;

pub use reducer::{ChecklistEnvironment, ChecklistReducer, EditorReducer, RowReducer, SearchReducer};
pub use types::{
    ChecklistAction, ChecklistDelegate, ChecklistInternal, ChecklistState, ChecklistView, ClearPrompt, Editor,
    EditorAction, Mode, PromptAction, Row, RowAction, RowId, Search, SearchAction,
};
