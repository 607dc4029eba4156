//! Tests for #[derive(FeatureAction)]

#![allow(clippy::unwrap_used)]

use feature_boundaries::{ActionBoundary, FeatureAction};

#[derive(Clone, Debug, PartialEq)]
enum RowView {
    Tapped,
}

#[derive(Clone, Debug, PartialEq)]
enum RowInternal {
    Loaded(String),
}

#[derive(Clone, Debug, PartialEq)]
enum RowDelegate {
    Removed,
}

#[derive(Clone, Debug, PartialEq, FeatureAction)]
enum RowAction {
    View(RowView),
    Internal(RowInternal),
    Delegate(RowDelegate),
}

#[derive(Clone, Debug, PartialEq, FeatureAction)]
enum MarkedAction {
    #[delegate]
    Parent(bool),
    #[view]
    Ui(u8),
    #[internal]
    Private(String),
}

/// Attributes win over conventional names.
#[derive(Clone, Debug, PartialEq, FeatureAction)]
enum SwappedAction {
    #[view]
    Internal(u8),
    #[internal]
    View(u16),
    Delegate(u32),
}

#[derive(Clone, Debug, PartialEq, FeatureAction)]
enum GenericAction<T: Clone> {
    View(T),
    Internal(Vec<T>),
    Delegate(()),
}

#[test]
fn named_variants_are_detected() {
    assert_eq!(RowAction::view(RowView::Tapped), RowAction::View(RowView::Tapped));
    assert_eq!(RowAction::delegate(RowDelegate::Removed), RowAction::Delegate(RowDelegate::Removed));

    let loaded = RowAction::internal(RowInternal::Loaded("a".into()));
    assert!(loaded.is_internal());
    assert_eq!(loaded.internal_action(), Some(&RowInternal::Loaded("a".into())));
    assert_eq!(
        loaded.into_boundary(),
        ActionBoundary::Internal(RowInternal::Loaded("a".into()))
    );
}

#[test]
fn attributes_select_variants() {
    assert_eq!(MarkedAction::view(3), MarkedAction::Ui(3));
    assert_eq!(MarkedAction::internal("x".into()), MarkedAction::Private("x".into()));
    assert_eq!(MarkedAction::delegate(true), MarkedAction::Parent(true));

    assert!(MarkedAction::Parent(false).is_delegate());
    assert_eq!(MarkedAction::Ui(9).as_boundary(), ActionBoundary::View(&9));
}

#[test]
fn attributes_override_names() {
    assert_eq!(SwappedAction::view(1), SwappedAction::Internal(1));
    assert_eq!(SwappedAction::internal(2), SwappedAction::View(2));
    assert!(SwappedAction::Internal(1).is_view());
    assert!(SwappedAction::Delegate(3).is_delegate());
}

#[test]
fn generic_enums_are_supported() {
    let action = GenericAction::<char>::internal(vec!['a', 'b']);
    assert_eq!(action.internal_action().map(Vec::len), Some(2));
    assert!(GenericAction::<char>::view('z').is_view());
}

#[test]
fn derived_paths_append_child_paths() {
    let loaded = RowAction::internal_path().appending(&feature_boundaries_core::case_path!(RowInternal::Loaded));

    assert_eq!(
        loaded.embed("row".into()),
        RowAction::Internal(RowInternal::Loaded("row".into()))
    );
    assert_eq!(loaded.extract(&RowAction::View(RowView::Tapped)), None);
}
