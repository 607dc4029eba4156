//! The three-boundary action contract

use feature_boundaries_core::paths::CasePath;

/// Which boundary an action belongs to, with its payload
///
/// Also usable directly as a feature's action type: it implements
/// [`FeatureAction`] with `V`, `I`, and `D` as the payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionBoundary<V, I, D> {
    /// Event originating from the UI
    View(V),
    /// Private to the feature's own logic, including child actions
    Internal(I),
    /// Notification for the embedding parent
    Delegate(D),
}

/// An action type partitioned into view, internal, and delegate boundaries
///
/// Exactly one boundary is active per value. Implement it with
/// `#[derive(FeatureAction)]` on an enum with three single-payload variants.
pub trait FeatureAction: Sized {
    /// Payload of the view boundary
    type ViewAction;
    /// Payload of the internal boundary
    type InternalAction;
    /// Payload of the delegate boundary
    type DelegateAction;

    /// Construct a view action
    fn view(action: Self::ViewAction) -> Self;

    /// Construct an internal action
    fn internal(action: Self::InternalAction) -> Self;

    /// Construct a delegate action
    fn delegate(action: Self::DelegateAction) -> Self;

    /// Decompose into the active boundary
    fn into_boundary(self) -> ActionBoundary<Self::ViewAction, Self::InternalAction, Self::DelegateAction>;

    /// Borrowing decomposition
    fn as_boundary(&self) -> ActionBoundary<&Self::ViewAction, &Self::InternalAction, &Self::DelegateAction>;

    /// Whether this is a view action
    fn is_view(&self) -> bool {
        self.view_action().is_some()
    }

    /// Whether this is an internal action
    fn is_internal(&self) -> bool {
        self.internal_action().is_some()
    }

    /// Whether this is a delegate action
    fn is_delegate(&self) -> bool {
        self.delegate_action().is_some()
    }

    /// The view payload, if this is a view action
    fn view_action(&self) -> Option<&Self::ViewAction> {
        match self.as_boundary() {
            ActionBoundary::View(action) => Some(action),
            ActionBoundary::Internal(_) | ActionBoundary::Delegate(_) => None,
        }
    }

    /// The internal payload, if this is an internal action
    fn internal_action(&self) -> Option<&Self::InternalAction> {
        match self.as_boundary() {
            ActionBoundary::Internal(action) => Some(action),
            ActionBoundary::View(_) | ActionBoundary::Delegate(_) => None,
        }
    }

    /// The delegate payload, if this is a delegate action
    fn delegate_action(&self) -> Option<&Self::DelegateAction> {
        match self.as_boundary() {
            ActionBoundary::Delegate(action) => Some(action),
            ActionBoundary::View(_) | ActionBoundary::Internal(_) => None,
        }
    }

    /// Case path to the view payload
    #[must_use]
    fn view_path() -> CasePath<Self, Self::ViewAction>
    where
        Self: 'static,
        Self::ViewAction: Clone,
    {
        CasePath::new(Self::view, |action: &Self| action.view_action().cloned())
    }

    /// Case path to the internal payload
    ///
    /// Child paths are appended to it to address an action nested under the
    /// internal boundary:
    ///
    /// ```ignore
    /// let row = ListAction::internal_path().appending(&case_path!(ListInternal::Row(id, action)));
    /// ```
    #[must_use]
    fn internal_path() -> CasePath<Self, Self::InternalAction>
    where
        Self: 'static,
        Self::InternalAction: Clone,
    {
        CasePath::new(Self::internal, |action: &Self| action.internal_action().cloned())
    }

    /// Case path to the delegate payload
    #[must_use]
    fn delegate_path() -> CasePath<Self, Self::DelegateAction>
    where
        Self: 'static,
        Self::DelegateAction: Clone,
    {
        CasePath::new(Self::delegate, |action: &Self| action.delegate_action().cloned())
    }
}

impl<V, I, D> FeatureAction for ActionBoundary<V, I, D> {
    type ViewAction = V;
    type InternalAction = I;
    type DelegateAction = D;

    fn view(action: V) -> Self {
        Self::View(action)
    }

    fn internal(action: I) -> Self {
        Self::Internal(action)
    }

    fn delegate(action: D) -> Self {
        Self::Delegate(action)
    }

    fn into_boundary(self) -> ActionBoundary<V, I, D> {
        self
    }

    fn as_boundary(&self) -> ActionBoundary<&V, &I, &D> {
        match self {
            Self::View(action) => ActionBoundary::View(action),
            Self::Internal(action) => ActionBoundary::Internal(action),
            Self::Delegate(action) => ActionBoundary::Delegate(action),
        }
    }
}
