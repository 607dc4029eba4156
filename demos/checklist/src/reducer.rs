//! Reducers of the checklist and its children

use crate::types::{
    ChecklistAction, ChecklistDelegate, ChecklistInternal, ChecklistState, ChecklistView, ClearPrompt, Editor,
    EditorAction, Mode, PromptAction, Row, RowAction, Search, SearchAction,
};
use feature_boundaries::{scope_internal, BoundingReducer, ComposedBoundingReducer, FeatureAction, FeatureReducerExt};
use feature_boundaries_core::composition::{combine_reducers, CombinedReducer, ScopeCase};
use feature_boundaries_core::environment::Clock;
use feature_boundaries_core::paths::CasePath;
use feature_boundaries_core::{async_effect, case_lens, case_path, delay, lens, smallvec, Effect, Reducer, SmallVec};
use std::sync::Arc;
use std::time::Duration;

/// Dependencies of the checklist
#[derive(Clone)]
pub struct ChecklistEnvironment {
    /// Timestamps new rows
    pub clock: Arc<dyn Clock>,
    /// Round trip of a row change to the backend
    pub sync_delay: Duration,
    /// Idle time before the editor autosaves
    pub autosave_delay: Duration,
}

impl ChecklistEnvironment {
    /// Environment with default delays
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
            sync_delay: Duration::from_millis(50),
            autosave_delay: Duration::from_millis(200),
        }
    }

    /// Override the backend round trip
    #[must_use]
    pub const fn with_sync_delay(mut self, delay: Duration) -> Self {
        self.sync_delay = delay;
        self
    }

    /// Override the autosave idle time
    #[must_use]
    pub const fn with_autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay = delay;
        self
    }
}

/// Reduces one row; every change is pushed to the backend
#[derive(Clone, Copy, Debug, Default)]
pub struct RowReducer;

impl Reducer for RowReducer {
    type State = Row;
    type Action = RowAction;
    type Environment = ChecklistEnvironment;

    fn reduce(&self, row: &mut Row, action: RowAction, env: &ChecklistEnvironment) -> SmallVec<[Effect<RowAction>; 4]> {
        match action {
            RowAction::Toggle => row.done = !row.done,
            RowAction::Rename(title) => row.title = title,
            RowAction::Synced => {
                row.synced = true;
                return smallvec![Effect::None];
            },
        }

        row.synced = false;
        smallvec![delay! {
            duration: env.sync_delay,
            action: RowAction::Synced
        }]
    }
}

/// Reduces the rename sheet
#[derive(Clone, Copy, Debug, Default)]
pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = Editor;
    type Action = EditorAction;
    type Environment = ChecklistEnvironment;

    fn reduce(
        &self,
        editor: &mut Editor,
        action: EditorAction,
        env: &ChecklistEnvironment,
    ) -> SmallVec<[Effect<EditorAction>; 4]> {
        match action {
            EditorAction::Typed(draft) => {
                editor.draft = draft;
                editor.dirty = true;
                smallvec![delay! {
                    duration: env.autosave_delay,
                    action: EditorAction::Autosave
                }]
            },
            EditorAction::Autosave => {
                if editor.dirty {
                    editor.dirty = false;
                    editor.autosaves += 1;
                }
                smallvec![Effect::None]
            },
            // Closing is up to the checklist.
            EditorAction::Save | EditorAction::Discard => smallvec![Effect::None],
        }
    }
}

/// Reduces the search field
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = Search;
    type Action = SearchAction;
    type Environment = ChecklistEnvironment;

    fn reduce(&self, search: &mut Search, action: SearchAction, _env: &ChecklistEnvironment) -> SmallVec<[Effect<SearchAction>; 4]> {
        match action {
            SearchAction::QueryChanged(query) => search.query = query,
        }
        smallvec![Effect::None]
    }
}

/// The checklist's own logic
///
/// Children are attached in [`ComposedBoundingReducer::body`]; run
/// `ChecklistReducer.body()` in a store.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChecklistReducer;

impl BoundingReducer for ChecklistReducer {
    type State = ChecklistState;
    type Action = ChecklistAction;
    type Environment = ChecklistEnvironment;

    fn reduce_view(
        &self,
        state: &mut ChecklistState,
        action: ChecklistView,
        env: &ChecklistEnvironment,
    ) -> SmallVec<[Effect<ChecklistAction>; 4]> {
        match action {
            ChecklistView::AddRow(title) => {
                let id = state.allocate_id();
                state.rows.push(Row::new(id, title, env.clock.now()));
                state.refresh_search();
            },
            ChecklistView::EditTapped(id) => match state.rows.get(&id) {
                Some(row) => state.editor = Some(Editor::new(id, row.title.clone())),
                None => tracing::debug!(id, "edit tapped for a row that is gone"),
            },
            ChecklistView::SearchTapped => {
                state.mode = Mode::Searching(Search::default());
                state.refresh_search();
            },
            ChecklistView::SearchClosed => state.mode = Mode::Browsing,
            ChecklistView::ClearCompletedTapped => {
                let completed = state.completed_count();
                if completed > 0 {
                    state.prompt = Some(ClearPrompt { completed });
                }
            },
        }
        smallvec![Effect::None]
    }

    fn reduce_internal(
        &self,
        state: &mut ChecklistState,
        action: ChecklistInternal,
        _env: &ChecklistEnvironment,
    ) -> SmallVec<[Effect<ChecklistAction>; 4]> {
        match action {
            ChecklistInternal::Row(_, RowAction::Toggle) if state.all_done() => {
                smallvec![notify(ChecklistDelegate::AllDone)]
            },
            ChecklistInternal::Row(_, RowAction::Rename(_)) => {
                state.refresh_search();
                smallvec![Effect::None]
            },
            ChecklistInternal::Editor(EditorAction::Save) => {
                // The editor has already seen Save; commit its draft through the row.
                let Some(editor) = state.editor.take() else {
                    return smallvec![Effect::None];
                };
                let rename = ChecklistAction::internal(ChecklistInternal::Row(editor.row, RowAction::Rename(editor.draft)));
                smallvec![async_effect! { Some(rename) }]
            },
            ChecklistInternal::Editor(EditorAction::Discard) => {
                state.editor = None;
                smallvec![Effect::None]
            },
            ChecklistInternal::Search(_) => {
                state.refresh_search();
                smallvec![Effect::None]
            },
            ChecklistInternal::Prompt(PromptAction::Clear) => {
                let before = state.rows.len();
                state.rows.retain(|row| !row.done);
                state.refresh_search();
                smallvec![notify(ChecklistDelegate::Cleared(before - state.rows.len()))]
            },
            ChecklistInternal::Row(..) | ChecklistInternal::Editor(_) | ChecklistInternal::Prompt(PromptAction::Keep) => {
                smallvec![Effect::None]
            },
        }
    }
}

impl ComposedBoundingReducer for ChecklistReducer {
    type Body = CombinedReducer<ChecklistState, ChecklistAction, ChecklistEnvironment>;

    fn body(&self) -> Self::Body {
        let search = scope_internal::<ChecklistState, ChecklistAction, _, _>(
            lens!(ChecklistState, mode),
            &case_path!(ChecklistInternal::Search),
            || ScopeCase::new(case_lens!(Mode::Searching), CasePath::identity(), SearchReducer),
        );

        let checklist = self
            .core()
            .for_each_internal(
                lens!(ChecklistState, rows),
                &case_path!(ChecklistInternal::Row(id, action)),
                || RowReducer,
            )
            .if_let_internal(lens!(ChecklistState, editor), &case_path!(ChecklistInternal::Editor), || EditorReducer)
            .if_let_ephemeral_internal(lens!(ChecklistState, prompt), &case_path!(ChecklistInternal::Prompt));

        combine_reducers(vec![Box::new(search), Box::new(checklist)])
    }
}

fn notify(delegate: ChecklistDelegate) -> Effect<ChecklistAction> {
    async_effect! { Some(ChecklistAction::delegate(delegate)) }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use feature_boundaries_testing::{assertions, test_clock, ReducerTest};

    fn env() -> ChecklistEnvironment {
        ChecklistEnvironment::new(test_clock())
    }

    fn add(title: &str) -> ChecklistAction {
        ChecklistAction::view(ChecklistView::AddRow(title.to_string()))
    }

    fn row(id: u32, action: RowAction) -> ChecklistAction {
        ChecklistAction::internal(ChecklistInternal::Row(id, action))
    }

    #[test]
    fn rows_get_sequential_ids_and_the_clock_time() {
        ReducerTest::new(ChecklistReducer.body())
            .with_env(env())
            .given_state(ChecklistState::default())
            .when_actions([add("milk"), add("eggs")])
            .then_state(|state| {
                assert_eq!(state.rows.ids().collect::<Vec<_>>(), vec![1, 2]);
                assert_eq!(state.rows.get(&2).unwrap().created_at, test_clock().now());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn row_changes_schedule_a_sync() {
        ReducerTest::new(RowReducer)
            .with_env(env())
            .given_state(Row::new(1, "milk", test_clock().now()))
            .when_action(RowAction::Toggle)
            .then_state(|row| {
                assert!(row.done);
                assert!(!row.synced);
            })
            .then_effects(|effects| assert!(matches!(effects, [Effect::Delay { .. }])))
            .run();
    }

    #[test]
    fn checking_off_the_last_row_notifies_the_parent() {
        ReducerTest::new(ChecklistReducer.body())
            .with_env(env())
            .given_state(ChecklistState::default())
            .when_actions([add("milk"), row(1, RowAction::Toggle)])
            .then_state(|state| assert!(state.all_done()))
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn editing_a_missing_row_opens_nothing() {
        ReducerTest::new(ChecklistReducer.core())
            .with_env(env())
            .given_state(ChecklistState::default())
            .when_action(ChecklistAction::view(ChecklistView::EditTapped(9)))
            .then_state(|state| assert!(state.editor.is_none()))
            .run();
    }

    #[test]
    fn search_counts_matches_after_the_query_changes() {
        ReducerTest::new(ChecklistReducer.body())
            .with_env(env())
            .given_state(ChecklistState::default())
            .when_actions([
                add("Oat milk"),
                add("Eggs"),
                add("Milk chocolate"),
                ChecklistAction::view(ChecklistView::SearchTapped),
                ChecklistAction::internal(ChecklistInternal::Search(SearchAction::QueryChanged("milk".into()))),
            ])
            .then_state(|state| {
                assert_eq!(
                    state.mode,
                    Mode::Searching(Search {
                        query: "milk".into(),
                        matches: 2,
                    })
                );
            })
            .run();
    }

    #[test]
    fn clear_prompt_only_opens_with_completed_rows() {
        ReducerTest::new(ChecklistReducer.core())
            .with_env(env())
            .given_state(ChecklistState::default())
            .when_actions([add("milk"), ChecklistAction::view(ChecklistView::ClearCompletedTapped)])
            .then_state(|state| assert!(state.prompt.is_none()))
            .run();
    }

    #[test]
    fn clearing_removes_completed_rows_and_closes_the_prompt() {
        ReducerTest::new(ChecklistReducer.body())
            .with_env(env())
            .given_state(ChecklistState::default())
            .when_actions([
                add("milk"),
                add("eggs"),
                row(1, RowAction::Toggle),
                ChecklistAction::view(ChecklistView::ClearCompletedTapped),
                ChecklistAction::internal(ChecklistInternal::Prompt(PromptAction::Clear)),
            ])
            .then_state(|state| {
                assert!(state.prompt.is_none());
                assert_eq!(state.rows.ids().collect::<Vec<_>>(), vec![2]);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }
}
