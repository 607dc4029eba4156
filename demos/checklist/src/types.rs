//! State and actions of the checklist feature and its children
//!
//! The checklist owns four children:
//!
//! - one [`Row`] per item, kept in an [`IdentifiedVec`]
//! - an optional [`Editor`] for renaming a row
//! - an optional [`ClearPrompt`] asking whether to clear completed rows
//! - a [`Search`] that only exists while the [`Mode`] is `Searching`
//!
//! Child actions travel under [`ChecklistInternal`]; the UI only sends
//! [`ChecklistView`] actions, and the checklist reports to whoever embeds it
//! with [`ChecklistDelegate`] actions.

use chrono::{DateTime, Utc};
use feature_boundaries::FeatureAction;
use feature_boundaries_core::identified::{Identifiable, IdentifiedVec};

/// Identifier of a row
pub type RowId = u32;

// ============================================================================
// Rows
// ============================================================================

/// One checklist item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Row identifier, unique within the checklist
    pub id: RowId,
    /// What to do
    pub title: String,
    /// Whether it is done
    pub done: bool,
    /// Whether the last change was pushed to the backend
    pub synced: bool,
    /// When the row was added
    pub created_at: DateTime<Utc>,
}

impl Row {
    /// A new, unsynced row
    #[must_use]
    pub fn new(id: RowId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
            synced: false,
            created_at,
        }
    }

    /// Case-insensitive title match
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

impl Identifiable for Row {
    type Id = RowId;

    fn id(&self) -> RowId {
        self.id
    }
}

/// Actions of a single row
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowAction {
    /// Flip `done`
    Toggle,
    /// Replace the title
    Rename(String),
    /// The backend acknowledged the last change
    Synced,
}

// ============================================================================
// Editor
// ============================================================================

/// Rename sheet for one row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Editor {
    /// The row being renamed
    pub row: RowId,
    /// Title as typed so far
    pub draft: String,
    /// Typed since the last autosave
    pub dirty: bool,
    /// Autosaves performed
    pub autosaves: u32,
}

impl Editor {
    /// Start editing `row`, whose title is `title`
    #[must_use]
    pub fn new(row: RowId, title: impl Into<String>) -> Self {
        Self {
            row,
            draft: title.into(),
            dirty: false,
            autosaves: 0,
        }
    }
}

/// Actions of the editor
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorAction {
    /// The draft changed
    Typed(String),
    /// Autosave timer fired
    Autosave,
    /// Commit the draft and close
    Save,
    /// Close without committing
    Discard,
}

// ============================================================================
// Search
// ============================================================================

/// Search over row titles
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Search {
    /// Current query
    pub query: String,
    /// Rows whose title matches `query`
    pub matches: usize,
}

/// Actions of the search field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchAction {
    /// The query changed
    QueryChanged(String),
}

/// What the checklist screen is showing
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// The plain list
    #[default]
    Browsing,
    /// The list filtered by a search
    Searching(Search),
}

// ============================================================================
// Prompt
// ============================================================================

/// "Clear completed rows?" alert
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearPrompt {
    /// Rows that would be cleared
    pub completed: usize,
}

/// Answers to the clear prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptAction {
    /// Remove completed rows
    Clear,
    /// Keep them
    Keep,
}

// ============================================================================
// Checklist
// ============================================================================

/// Checklist state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChecklistState {
    /// Items, in display order
    pub rows: IdentifiedVec<Row>,
    /// Open rename sheet
    pub editor: Option<Editor>,
    /// Open clear prompt
    pub prompt: Option<ClearPrompt>,
    /// Browsing or searching
    pub mode: Mode,
    next_id: RowId,
}

impl ChecklistState {
    /// Rows marked done
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.rows.iter().filter(|row| row.done).count()
    }

    /// Whether every row is done (false for an empty list)
    #[must_use]
    pub fn all_done(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|row| row.done)
    }

    pub(crate) const fn allocate_id(&mut self) -> RowId {
        self.next_id += 1;
        self.next_id
    }

    /// Recount search matches after the rows or the query changed
    pub(crate) fn refresh_search(&mut self) {
        if let Mode::Searching(search) = &mut self.mode {
            search.matches = self.rows.iter().filter(|row| row.matches(&search.query)).count();
        }
    }
}

/// Every action the checklist handles
#[derive(Clone, Debug, PartialEq, FeatureAction)]
pub enum ChecklistAction {
    /// From the UI
    View(ChecklistView),
    /// From children and effects
    Internal(ChecklistInternal),
    /// To the embedding feature
    Delegate(ChecklistDelegate),
}

/// What the user did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChecklistView {
    /// Add a row with this title
    AddRow(String),
    /// Open the editor for a row
    EditTapped(RowId),
    /// Enter search mode
    SearchTapped,
    /// Leave search mode
    SearchClosed,
    /// Ask to clear completed rows
    ClearCompletedTapped,
}

/// Child actions, addressed to the child they belong to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChecklistInternal {
    /// For the row with this id
    Row(RowId, RowAction),
    /// For the editor
    Editor(EditorAction),
    /// For the search field
    Search(SearchAction),
    /// For the clear prompt
    Prompt(PromptAction),
}

/// Notifications for the embedding feature
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChecklistDelegate {
    /// The last open row was checked off
    AllDone,
    /// Completed rows were cleared
    Cleared(usize),
}
