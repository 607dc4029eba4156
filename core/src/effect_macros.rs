//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block evaluates to `Option<Action>`; `Some` is fed back into the store.
///
/// # Example
///
/// ```
/// use feature_boundaries_core::{async_effect, Effect};
///
/// #[derive(Debug)]
/// enum SearchAction {
///     ResultsLoaded(Vec<String>),
/// }
///
/// let query = String::from("milk");
/// let effect: Effect<SearchAction> = async_effect! {
///     Some(SearchAction::ResultsLoaded(vec![query]))
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```
/// use feature_boundaries_core::{delay, Effect};
/// use std::time::Duration;
///
/// #[derive(Debug)]
/// enum TimerAction {
///     Tick,
/// }
///
/// let effect = delay! {
///     duration: Duration::from_secs(1),
///     action: TimerAction::Tick
/// };
/// assert!(matches!(effect, Effect::Delay { .. }));
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
