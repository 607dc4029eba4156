//! # Feature Boundaries Core
//!
//! Reducer, effect, and composition primitives that the Feature Boundaries
//! convention is layered on.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution), cancellable by [`EffectId`]
//! - **Environment**: Injected dependencies via traits
//!
//! Parent/child composition is expressed with explicit accessors rather than
//! key paths: a [`paths::Lens`] addresses a field of state, a
//! [`paths::CaseLens`] addresses one case of an enum state, and a
//! [`paths::CasePath`] embeds and extracts one case of an action enum.
//!
//! ## Example
//!
//! ```
//! use feature_boundaries_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let _ = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

pub use effect::{Effect, EffectId};
pub use reducer::Reducer;

/// Reducer composition: combining, scoping, optional/collection/case children
pub mod composition;

/// Declarative macros for effect construction
pub mod effect_macros;

/// Ordered, identity-keyed collections of child state
pub mod identified;

/// Explicit accessors into state fields, state cases, and action cases
pub mod paths;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// Parent and child reducers composed with [`crate::composition`] share the
    /// same `Environment` type.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable and cancellable.
pub mod effect {
    use serde::{Deserialize, Serialize};
    use std::borrow::Cow;
    use std::future::Future;
    use std::hash::{DefaultHasher, Hash, Hasher};
    use std::pin::Pin;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    /// Correlation key for a group of in-flight effects
    ///
    /// Every task the runtime spawns while executing
    /// [`Effect::Cancellable`] is registered under its id, and
    /// [`Effect::Cancel`] aborts all of them at once, along with the tasks of
    /// every id derived from it with [`child`](EffectId::child).
    ///
    /// # Example
    ///
    /// ```
    /// use feature_boundaries_core::effect::EffectId;
    ///
    /// let search = EffectId::new("search");
    /// let rows = EffectId::unique("rows");
    /// let row = rows.child(&42_u32);
    /// assert_eq!(search.name(), "search");
    /// assert!(row.to_string().ends_with("/42"));
    /// assert!(row.is_within(&rows));
    /// assert_ne!(row, rows.child(&42_u64));
    /// ```
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct EffectId {
        name: Cow<'static, str>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        path: Vec<ChildKey>,
    }

    /// One step below a named id
    ///
    /// Two keys are equal only if their types, hashes, and `Debug` text agree.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    struct ChildKey {
        label: String,
        digest: u64,
    }

    impl EffectId {
        /// Create an id from a static name
        #[must_use]
        pub const fn new(name: &'static str) -> Self {
            Self {
                name: Cow::Borrowed(name),
                path: Vec::new(),
            }
        }

        /// Create an id that no other call to `unique` will ever return
        ///
        /// Used by composition operators that need a private effect group.
        #[must_use]
        pub fn unique(prefix: &str) -> Self {
            static NEXT: AtomicU64 = AtomicU64::new(0);
            let n = NEXT.fetch_add(1, Ordering::Relaxed);
            Self {
                name: Cow::Owned(format!("{prefix}#{n}")),
                path: Vec::new(),
            }
        }

        /// Derive a nested id for one element of a keyed group
        #[must_use]
        pub fn child<K: Hash + std::fmt::Debug + ?Sized>(&self, key: &K) -> Self {
            let mut hasher = DefaultHasher::new();
            std::any::type_name::<K>().hash(&mut hasher);
            key.hash(&mut hasher);

            let mut path = self.path.clone();
            path.push(ChildKey {
                label: format!("{key:?}"),
                digest: hasher.finish(),
            });
            Self {
                name: self.name.clone(),
                path,
            }
        }

        /// The name this id was created with, shared by all of its children
        #[must_use]
        pub fn name(&self) -> &str {
            &self.name
        }

        /// Returns true if this id is `group` or was derived from it
        #[must_use]
        pub fn is_within(&self, group: &EffectId) -> bool {
            self.name == group.name && self.path.starts_with(&group.path)
        }
    }

    impl std::fmt::Display for EffectId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.name)?;
            for key in &self.path {
                write!(f, "/{}", key.label)?;
            }
            Ok(())
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts, debouncing)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Run `effect` as part of the cancellable group `id`
        Cancellable {
            /// Group the spawned work is registered under
            id: EffectId,
            /// The wrapped effect
            effect: Box<Effect<Action>>,
        },

        /// Abort every in-flight effect registered under the id
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Abort every in-flight effect in the group `id`
        #[must_use]
        pub const fn cancel(id: EffectId) -> Effect<Action> {
            Effect::Cancel(id)
        }

        /// Mark this effect as part of the cancellable group `id`
        ///
        /// `Effect::None` and `Effect::Cancel` stay as they are: neither
        /// spawns work that could be cancelled.
        #[must_use]
        pub fn cancellable(self, id: EffectId) -> Effect<Action> {
            match self {
                Effect::None => Effect::None,
                Effect::Cancel(target) => Effect::Cancel(target),
                effect => Effect::Cancellable {
                    id,
                    effect: Box::new(effect),
                },
            }
        }

        /// Returns true if this effect does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    effects.iter().all(Effect::is_none)
                },
                Effect::Cancellable { effect, .. } => effect.is_none(),
                Effect::Delay { .. } | Effect::Future(_) | Effect::Cancel(_) => false,
            }
        }

        /// Transform every action this effect can produce
        ///
        /// Used when a child reducer runs inside a parent domain: the child's
        /// effects are lifted into the parent's action type.
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            Action: Send + 'static,
            B: Send + 'static,
            F: Fn(Action) -> B + Clone + Send + Sync + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => {
                    Effect::Parallel(effects.into_iter().map(|e| e.map(f.clone())).collect())
                },
                Effect::Sequential(effects) => {
                    Effect::Sequential(effects.into_iter().map(|e| e.map(f.clone())).collect())
                },
                Effect::Delay { duration, action } => Effect::Delay {
                    duration,
                    action: Box::new(f(*action)),
                },
                Effect::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(f) })),
                Effect::Cancellable { id, effect } => Effect::Cancellable {
                    id,
                    effect: Box::new(effect.map(f)),
                },
                Effect::Cancel(id) => Effect::Cancel(id),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use feature_boundaries_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let _now = clock.now();
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
