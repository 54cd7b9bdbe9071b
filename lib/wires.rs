//! Ordered sets of wire (qubit/site) labels.

use std::{
    hash::BuildHasherDefault,
    ops::{ Deref, Range },
};
use indexmap::IndexSet;
use itertools::Itertools;
use rustc_hash::FxHasher;
use crate::error::{ Error, Result };

/// A single wire label.
pub type Wire = usize;

type WireSet = IndexSet<Wire, BuildHasherDefault<FxHasher>>;

/// An ordered collection of unique wire labels.
///
/// Insertion order is preserved and significant: two `Wires` are equal only if
/// they hold the same labels in the same order. The backing [`IndexSet`] can be
/// accessed through [`Deref`].
#[derive(Clone, Debug, Default)]
pub struct Wires(WireSet);

impl Deref for Wires {
    type Target = IndexSet<Wire, BuildHasherDefault<FxHasher>>;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl PartialEq for Wires {
    fn eq(&self, other: &Self) -> bool { self.0.iter().eq(other.0.iter()) }
}

impl Eq for Wires { }

impl FromIterator<Wire> for Wires {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = Wire>
    {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a Wires> for Wires {
    /// Union of all wires, in first-seen order.
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = &'a Wires>
    {
        Self(iter.into_iter().flat_map(|w| w.iter().copied()).collect())
    }
}

impl From<Wire> for Wires {
    fn from(wire: Wire) -> Self { std::iter::once(wire).collect() }
}

impl From<Vec<Wire>> for Wires {
    fn from(wires: Vec<Wire>) -> Self { wires.into_iter().collect() }
}

impl From<&[Wire]> for Wires {
    fn from(wires: &[Wire]) -> Self { wires.iter().copied().collect() }
}

impl<const N: usize> From<[Wire; N]> for Wires {
    fn from(wires: [Wire; N]) -> Self { wires.into_iter().collect() }
}

impl From<Range<Wire>> for Wires {
    fn from(wires: Range<Wire>) -> Self { wires.collect() }
}

impl<'a> IntoIterator for &'a Wires {
    type Item = &'a Wire;
    type IntoIter = indexmap::set::Iter<'a, Wire>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl Wires {
    /// Collect wires, failing on the first repeated label instead of silently
    /// merging it.
    pub fn try_unique<I>(wires: I) -> Result<Self>
    where I: IntoIterator<Item = Wire>
    {
        let mut set = WireSet::default();
        for w in wires.into_iter() {
            if !set.insert(w) { return Err(Error::DuplicateWire(w)); }
        }
        Ok(Self(set))
    }

    /// Return `true` if every wire in `other` is also in `self`.
    pub fn contains_wires(&self, other: &Wires) -> bool {
        other.iter().all(|w| self.contains(w))
    }

    /// Return the wires of `self` not present in `other`, in `self`'s order.
    pub fn difference(&self, other: &Wires) -> Wires {
        self.iter().copied().filter(|w| !other.contains(w)).collect()
    }

    /// Return the first-seen union of `self` and `other`.
    pub fn union(&self, other: &Wires) -> Wires {
        [self, other].into_iter().collect()
    }

    /// Return the list of positions of `self`'s wires in `order`, or `None` if
    /// any is missing.
    pub fn positions_in(&self, order: &Wires) -> Option<Vec<usize>> {
        self.iter().map(|w| order.get_index_of(w)).collect()
    }

    /// Return the same wires in ascending label order.
    pub fn sorted(&self) -> Wires {
        self.iter().copied().sorted().collect()
    }

    pub fn to_vec(&self) -> Vec<Wire> { self.0.iter().copied().collect() }
}
