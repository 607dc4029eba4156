//! Ordered collections addressed by element identity
//!
//! [`IdentifiedVec`] keeps insertion order like a `Vec` and answers lookups by
//! id like a `HashMap`. It is the collection [`ForEach`](crate::composition::ForEach)
//! routes element actions into: an action names its element by id, never by
//! position, so removing an earlier element cannot redirect it to a neighbour.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

/// A value with a stable identity
pub trait Identifiable {
    /// The identity type
    type Id: Eq + Hash + Clone + Debug;

    /// The identity of this value
    fn id(&self) -> Self::Id;
}

/// Insertion-ordered collection with O(1) lookup by id
///
/// Ids are unique: pushing an element whose id is already present replaces
/// the existing element in place.
///
/// While an operator is tracking departures, every element that leaves the
/// collection (removed, cleared, replaced by a push, or re-keyed through
/// [`get_mut`](IdentifiedVec::get_mut)) has its id recorded so that its
/// effects can be cancelled. The record is not part of the value: it is
/// ignored by equality, `Debug`, and serialization.
///
/// # Example
///
/// ```
/// use feature_boundaries_core::identified::{Identifiable, IdentifiedVec};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Row { id: u32, title: &'static str }
///
/// impl Identifiable for Row {
///     type Id = u32;
///     fn id(&self) -> u32 { self.id }
/// }
///
/// let mut rows = IdentifiedVec::new();
/// rows.push(Row { id: 1, title: "milk" });
/// rows.push(Row { id: 2, title: "eggs" });
/// rows.remove(&1);
///
/// assert_eq!(rows.get(&2).map(|r| r.title), Some("eggs"));
/// assert_eq!(rows.ids().collect::<Vec<_>>(), vec![2]);
/// ```
#[derive(Clone)]
pub struct IdentifiedVec<T: Identifiable> {
    elements: Vec<T>,
    index: HashMap<T::Id, usize>,
    departed: Option<Vec<T::Id>>,
}

impl<T: Identifiable> IdentifiedVec<T> {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            index: HashMap::new(),
            departed: None,
        }
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if there are no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true if an element with this id is present
    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.index.contains_key(id)
    }

    /// Borrow the element with this id
    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.index
            .get(id)
            .and_then(|&position| self.elements.get(position))
    }

    /// Mutably borrow the element with this id
    ///
    /// If the element's id changes through the borrow, the collection is
    /// re-keyed when the guard drops. The element keeps its position; another
    /// element already holding the new id is dropped.
    pub fn get_mut(&mut self, id: &T::Id) -> Option<ElementMut<'_, T>> {
        let position = *self.index.get(id)?;
        Some(ElementMut {
            collection: self,
            position,
            original_id: id.clone(),
        })
    }

    /// Position of the element with this id
    #[must_use]
    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Append an element, or replace the element that has the same id
    ///
    /// Returns the replaced element, if any.
    pub fn push(&mut self, element: T) -> Option<T> {
        let id = element.id();
        if let Some(&position) = self.index.get(&id) {
            self.depart(id);
            return Some(std::mem::replace(&mut self.elements[position], element));
        }
        self.index.insert(id, self.elements.len());
        self.elements.push(element);
        None
    }

    /// Remove and return the element with this id, keeping the order of the rest
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let position = self.index.remove(id)?;
        let removed = self.elements.remove(position);
        for later in &self.elements[position..] {
            if let Some(slot) = self.index.get_mut(&later.id()) {
                *slot -= 1;
            }
        }
        self.depart(id.clone());
        Some(removed)
    }

    /// Keep only the elements for which `keep` returns true
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        match self.departed.as_mut() {
            Some(departed) => self.elements.retain(|element| {
                let kept = keep(element);
                if !kept {
                    departed.push(element.id());
                }
                kept
            }),
            None => self.elements.retain(keep),
        }
        self.reindex();
    }

    /// Remove every element
    pub fn clear(&mut self) {
        if let Some(departed) = self.departed.as_mut() {
            departed.extend(self.elements.iter().map(Identifiable::id));
        }
        self.elements.clear();
        self.index.clear();
    }

    /// Iterate over elements in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Iterate over ids in order
    pub fn ids(&self) -> impl Iterator<Item = T::Id> + '_ {
        self.elements.iter().map(Identifiable::id)
    }

    /// Borrow the elements as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Start recording departures, discarding anything recorded so far
    pub(crate) fn track_departures(&mut self) {
        self.departed.get_or_insert_with(Vec::new).clear();
    }

    /// Ids that left since [`track_departures`](Self::track_departures)
    ///
    /// `None` if this collection was not tracking, which means it replaced
    /// the tracked one wholesale.
    pub(crate) fn take_departures(&mut self) -> Option<Vec<T::Id>> {
        self.departed.as_mut().map(std::mem::take)
    }

    fn depart(&mut self, id: T::Id) {
        if let Some(departed) = self.departed.as_mut() {
            departed.push(id);
        }
    }

    fn rekey(&mut self, position: usize, old: T::Id) {
        self.index.remove(&old);
        self.depart(old);
        let new = self.elements[position].id();
        if let Some(&clash) = self.index.get(&new) {
            self.elements.remove(clash);
            self.depart(new);
        }
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .elements
            .iter()
            .enumerate()
            .map(|(position, element)| (element.id(), position))
            .collect();
    }
}

/// Mutable borrow of one element of an [`IdentifiedVec`]
///
/// Returned by [`IdentifiedVec::get_mut`].
pub struct ElementMut<'a, T: Identifiable> {
    collection: &'a mut IdentifiedVec<T>,
    position: usize,
    original_id: T::Id,
}

impl<T: Identifiable> Deref for ElementMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.collection.elements[self.position]
    }
}

impl<T: Identifiable> DerefMut for ElementMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.collection.elements[self.position]
    }
}

impl<T: Identifiable> Drop for ElementMut<'_, T> {
    fn drop(&mut self) {
        if self.collection.elements[self.position].id() != self.original_id {
            let old = self.original_id.clone();
            self.collection.rekey(self.position, old);
        }
    }
}

impl<T: Identifiable + Debug> Debug for ElementMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&**self, f)
    }
}

impl<T: Identifiable> Default for IdentifiedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable + Debug> Debug for IdentifiedVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.elements).finish()
    }
}

impl<T: Identifiable + PartialEq> PartialEq for IdentifiedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Identifiable + Eq> Eq for IdentifiedVec<T> {}

impl<T: Identifiable> FromIterator<T> for IdentifiedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for element in iter {
            collection.push(element);
        }
        collection
    }
}

impl<T: Identifiable> Extend<T> for IdentifiedVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

impl<T: Identifiable> IntoIterator for IdentifiedVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T: Identifiable> IntoIterator for &'a IdentifiedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Identifiable + Serialize> Serialize for IdentifiedVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.elements)
    }
}

impl<'de, T: Identifiable + Deserialize<'de>> Deserialize<'de> for IdentifiedVec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from_iter)
    }
}
