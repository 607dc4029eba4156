//! Explicit accessors for composing parent and child domains
//!
//! - [`Lens`]: a field of state (`get` + `get_mut`)
//! - [`CaseLens`]: one case of an enum state (`extract` + `extract_mut` + `embed`)
//! - [`CasePath`]: one case of an action enum (`embed` + `extract`)
//!
//! The [`lens!`](crate::lens), [`case_lens!`](crate::case_lens), and
//! [`case_path!`](crate::case_path) macros build them from a type and a
//! field or variant name.
//!
//! # Example
//!
//! ```
//! use feature_boundaries_core::{case_path, lens};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum ChildAction {
//!     Tapped,
//! }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum ParentAction {
//!     Child(ChildAction),
//!     Other,
//! }
//!
//! struct ParentState {
//!     count: u32,
//! }
//!
//! let path = case_path!(ParentAction::Child);
//! assert_eq!(path.embed(ChildAction::Tapped), ParentAction::Child(ChildAction::Tapped));
//! assert_eq!(path.extract(&ParentAction::Other), None);
//!
//! let count = lens!(ParentState, count);
//! let mut state = ParentState { count: 1 };
//! *count.get_mut(&mut state) += 1;
//! assert_eq!(*count.get(&state), 2);
//! ```

use std::sync::Arc;

/// Writable accessor from `Root` to one of its fields
pub struct Lens<Root, Value> {
    get: fn(&Root) -> &Value,
    get_mut: fn(&mut Root) -> &mut Value,
}

impl<Root, Value> Lens<Root, Value> {
    /// Create a lens from a getter and a mutable getter
    #[must_use]
    pub const fn new(get: fn(&Root) -> &Value, get_mut: fn(&mut Root) -> &mut Value) -> Self {
        Self { get, get_mut }
    }

    /// Borrow the field
    pub fn get<'a>(&self, root: &'a Root) -> &'a Value {
        (self.get)(root)
    }

    /// Mutably borrow the field
    pub fn get_mut<'a>(&self, root: &'a mut Root) -> &'a mut Value {
        (self.get_mut)(root)
    }

    /// Replace the field, returning the previous value
    pub fn set(&self, root: &mut Root, value: Value) -> Value {
        std::mem::replace(self.get_mut(root), value)
    }
}

impl<Root, Value> Clone for Lens<Root, Value> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Root, Value> Copy for Lens<Root, Value> {}

impl<Root, Value> std::fmt::Debug for Lens<Root, Value> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lens<{}, {}>",
            std::any::type_name::<Root>(),
            std::any::type_name::<Value>()
        )
    }
}

/// Accessor from an enum state to the payload of one of its cases
pub struct CaseLens<Root, Value> {
    extract: fn(&Root) -> Option<&Value>,
    extract_mut: fn(&mut Root) -> Option<&mut Value>,
    embed: fn(Value) -> Root,
}

impl<Root, Value> CaseLens<Root, Value> {
    /// Create a case lens
    #[must_use]
    pub const fn new(
        extract: fn(&Root) -> Option<&Value>,
        extract_mut: fn(&mut Root) -> Option<&mut Value>,
        embed: fn(Value) -> Root,
    ) -> Self {
        Self {
            extract,
            extract_mut,
            embed,
        }
    }

    /// Borrow the payload if `root` is currently in this case
    pub fn extract<'a>(&self, root: &'a Root) -> Option<&'a Value> {
        (self.extract)(root)
    }

    /// Mutably borrow the payload if `root` is currently in this case
    pub fn extract_mut<'a>(&self, root: &'a mut Root) -> Option<&'a mut Value> {
        (self.extract_mut)(root)
    }

    /// Wrap a payload in this case
    pub fn embed(&self, value: Value) -> Root {
        (self.embed)(value)
    }

    /// Returns true if `root` is currently in this case
    pub fn matches(&self, root: &Root) -> bool {
        self.extract(root).is_some()
    }
}

impl<Root, Value> Clone for CaseLens<Root, Value> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Root, Value> Copy for CaseLens<Root, Value> {}

impl<Root, Value> std::fmt::Debug for CaseLens<Root, Value> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CaseLens<{}, {}>",
            std::any::type_name::<Root>(),
            std::any::type_name::<Value>()
        )
    }
}

type Embed<Root, Value> = Arc<dyn Fn(Value) -> Root + Send + Sync>;
type Extract<Root, Value> = Arc<dyn Fn(&Root) -> Option<Value> + Send + Sync>;

/// Bidirectional accessor between an action enum and one of its cases
///
/// `embed` wraps a payload in the case; `extract` returns a copy of the
/// payload when the action is in the case. Paths compose with
/// [`CasePath::appending`], which is how a child action nested two levels
/// deep (for example `Parent::Internal(ParentInternal::Child(..))`) is
/// addressed with a single path.
pub struct CasePath<Root, Value> {
    embed: Embed<Root, Value>,
    extract: Extract<Root, Value>,
}

impl<Root, Value> CasePath<Root, Value> {
    /// Create a case path from an embedding and an extraction
    pub fn new<E, X>(embed: E, extract: X) -> Self
    where
        E: Fn(Value) -> Root + Send + Sync + 'static,
        X: Fn(&Root) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            embed: Arc::new(embed),
            extract: Arc::new(extract),
        }
    }

    /// Wrap a payload in this case
    pub fn embed(&self, value: Value) -> Root {
        (self.embed)(value)
    }

    /// Extract the payload if `root` is in this case
    pub fn extract(&self, root: &Root) -> Option<Value> {
        (self.extract)(root)
    }

    /// Extend this path with a path into the payload
    #[must_use]
    pub fn appending<Child>(&self, path: &CasePath<Value, Child>) -> CasePath<Root, Child>
    where
        Root: 'static,
        Value: 'static,
        Child: 'static,
    {
        let (outer_embed, inner_embed) = (Arc::clone(&self.embed), Arc::clone(&path.embed));
        let (outer_extract, inner_extract) =
            (Arc::clone(&self.extract), Arc::clone(&path.extract));

        CasePath::new(
            move |child| outer_embed(inner_embed(child)),
            move |root: &Root| outer_extract(root).and_then(|value| inner_extract(&value)),
        )
    }
}

impl<Root: Clone + 'static> CasePath<Root, Root> {
    /// The path that embeds and extracts every value unchanged
    #[must_use]
    pub fn identity() -> Self {
        CasePath::new(|value| value, |root: &Root| Some(root.clone()))
    }
}

impl<Root, Value> Clone for CasePath<Root, Value> {
    fn clone(&self) -> Self {
        Self {
            embed: Arc::clone(&self.embed),
            extract: Arc::clone(&self.extract),
        }
    }
}

impl<Root, Value> std::fmt::Debug for CasePath<Root, Value> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CasePath<{}, {}>",
            std::any::type_name::<Root>(),
            std::any::type_name::<Value>()
        )
    }
}

/// Build a [`Lens`] from a type and a (possibly nested) field name
///
/// ```
/// use feature_boundaries_core::lens;
///
/// struct Inner { value: i32 }
/// struct Outer { inner: Inner }
///
/// let value = lens!(Outer, inner.value);
/// let outer = Outer { inner: Inner { value: 3 } };
/// assert_eq!(*value.get(&outer), 3);
/// ```
#[macro_export]
macro_rules! lens {
    ($root:ty, $($field:ident).+) => {
        $crate::paths::Lens::new(
            |root: &$root| &root.$($field).+,
            |root: &mut $root| &mut root.$($field).+,
        )
    };
}

/// Build a [`CaseLens`] for a single-payload variant of an enum state
///
/// ```
/// use feature_boundaries_core::case_lens;
///
/// enum Session {
///     LoggedIn(String),
///     LoggedOut,
/// }
///
/// let logged_in = case_lens!(Session::LoggedIn);
/// assert!(logged_in.matches(&Session::LoggedIn("ada".into())));
/// assert!(!logged_in.matches(&Session::LoggedOut));
/// ```
#[macro_export]
macro_rules! case_lens {
    ($root:ident :: $variant:ident) => {
        $crate::paths::CaseLens::new(
            |root: &$root| match root {
                $root::$variant(value) => ::std::option::Option::Some(value),
                #[allow(unreachable_patterns)]
                _ => ::std::option::Option::None,
            },
            |root: &mut $root| match root {
                $root::$variant(value) => ::std::option::Option::Some(value),
                #[allow(unreachable_patterns)]
                _ => ::std::option::Option::None,
            },
            $root::$variant,
        )
    };
}

/// Build a [`CasePath`] for a variant of an action enum
///
/// Single-payload variants produce `CasePath<Enum, Payload>`; two-field
/// variants, written with binding names, produce `CasePath<Enum, (A, B)>`,
/// which is the shape identity-keyed collections route on.
///
/// ```
/// use feature_boundaries_core::case_path;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum RowAction { Toggle }
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum ListAction {
///     Row(u32, RowAction),
///     Clear,
/// }
///
/// let row = case_path!(ListAction::Row(id, action));
/// assert_eq!(row.extract(&ListAction::Row(7, RowAction::Toggle)), Some((7, RowAction::Toggle)));
/// assert_eq!(row.embed((1, RowAction::Toggle)), ListAction::Row(1, RowAction::Toggle));
/// assert_eq!(row.extract(&ListAction::Clear), None);
/// ```
#[macro_export]
macro_rules! case_path {
    ($root:ident :: $variant:ident ( $first:ident , $second:ident )) => {
        $crate::paths::CasePath::new(
            |($first, $second)| $root::$variant($first, $second),
            |root: &$root| match root {
                $root::$variant($first, $second) => ::std::option::Option::Some((
                    ::std::clone::Clone::clone($first),
                    ::std::clone::Clone::clone($second),
                )),
                #[allow(unreachable_patterns)]
                _ => ::std::option::Option::None,
            },
        )
    };
    ($root:ident :: $variant:ident) => {
        $crate::paths::CasePath::new($root::$variant, |root: &$root| match root {
            $root::$variant(value) => {
                ::std::option::Option::Some(::std::clone::Clone::clone(value))
            },
            #[allow(unreachable_patterns)]
            _ => ::std::option::Option::None,
        })
    };
}
