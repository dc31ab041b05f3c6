//! Wire labels.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Label of a single wire (subsystem) in a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Wire(pub u32);

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for Wire {
    fn from(id: u32) -> Self {
        Wire(id)
    }
}

impl From<usize> for Wire {
    fn from(id: usize) -> Self {
        Wire(u32::try_from(id).expect("Wire overflow: exceeds u32::MAX"))
    }
}

impl From<i32> for Wire {
    fn from(id: i32) -> Self {
        Wire(u32::try_from(id).expect("Wire labels must be non-negative"))
    }
}

/// Mapping from old wire labels to new ones, used by `map_wires`.
pub type WireMap = FxHashMap<Wire, Wire>;

/// Build a [`WireMap`] from `(from, to)` pairs.
pub fn wire_map<A, B>(pairs: impl IntoIterator<Item = (A, B)>) -> WireMap
where
    A: Into<Wire>,
    B: Into<Wire>,
{
    pairs
        .into_iter()
        .map(|(a, b)| (a.into(), b.into()))
        .collect()
}

/// An ordered collection of unique wire labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Wire>")]
pub struct Wires(Vec<Wire>);

impl TryFrom<Vec<Wire>> for Wires {
    type Error = IrError;

    fn try_from(wires: Vec<Wire>) -> IrResult<Self> {
        Wires::new(wires)
    }
}

impl Wires {
    /// Create a wire collection; labels must be unique.
    pub fn new<W: Into<Wire>>(wires: impl IntoIterator<Item = W>) -> IrResult<Self> {
        let mut v: Vec<Wire> = Vec::new();
        for w in wires {
            let w = w.into();
            if v.contains(&w) {
                return Err(IrError::DuplicateWire(w));
            }
            v.push(w);
        }
        Ok(Self(v))
    }

    /// Wires `0..n`.
    pub fn range(n: usize) -> Self {
        Self((0..n).map(Wire::from).collect())
    }

    /// A single wire.
    pub fn single(wire: impl Into<Wire>) -> Self {
        Self(vec![wire.into()])
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self(vec![])
    }

    /// Number of wires.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no wires.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the labels in order.
    pub fn iter(&self) -> impl Iterator<Item = Wire> + '_ {
        self.0.iter().copied()
    }

    /// The labels as a slice.
    pub fn as_slice(&self) -> &[Wire] {
        &self.0
    }

    /// The label at position `i`.
    pub fn get(&self, i: usize) -> Option<Wire> {
        self.0.get(i).copied()
    }

    /// True if `wire` is part of the collection.
    pub fn contains(&self, wire: Wire) -> bool {
        self.0.contains(&wire)
    }

    /// Position of `wire`, if present.
    pub fn index_of(&self, wire: Wire) -> Option<usize> {
        self.0.iter().position(|w| *w == wire)
    }

    /// The wires at the given positions.
    pub fn subset(&self, indices: &[usize]) -> IrResult<Wires> {
        Wires::new(indices.iter().filter_map(|&i| self.get(i)))
    }

    /// Combine two collections, keeping the first occurrence of each label.
    pub fn union(&self, other: &Wires) -> Wires {
        let mut v = self.0.clone();
        for w in other.iter() {
            if !v.contains(&w) {
                v.push(w);
            }
        }
        Wires(v)
    }

    /// True if the two collections share at least one label.
    pub fn overlaps(&self, other: &Wires) -> bool {
        self.iter().any(|w| other.contains(w))
    }

    /// Relabel every wire present in `map`; other wires are kept as they are.
    ///
    /// Mapping two labels onto the same target is an error.
    pub fn map(&self, map: &WireMap) -> IrResult<Wires> {
        Wires::new(self.iter().map(|w| map.get(&w).copied().unwrap_or(w)))
    }
}

impl fmt::Display for Wires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{w}")?;
        }
        write!(f, "]")
    }
}

impl<'a> IntoIterator for &'a Wires {
    type Item = Wire;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Wire>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl From<Wire> for Wires {
    fn from(w: Wire) -> Self {
        Wires(vec![w])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_rejected() {
        assert!(matches!(
            Wires::new([0u32, 1, 0]),
            Err(IrError::DuplicateWire(Wire(0)))
        ));
    }

    #[test]
    fn test_union_keeps_order() {
        let a = Wires::new([2u32, 0]).unwrap();
        let b = Wires::new([0u32, 5, 2, 1]).unwrap();
        let u = a.union(&b);
        assert_eq!(u.as_slice(), &[Wire(2), Wire(0), Wire(5), Wire(1)]);
    }

    #[test]
    fn test_map_keeps_unmapped() {
        let w = Wires::range(3);
        let m = wire_map([(0u32, 10u32), (2, 12)]);
        assert_eq!(
            w.map(&m).unwrap().as_slice(),
            &[Wire(10), Wire(1), Wire(12)]
        );
    }

    #[test]
    fn test_subset() {
        let w = Wires::new([4u32, 7, 9]).unwrap();
        assert_eq!(w.subset(&[2, 0]).unwrap().as_slice(), &[Wire(9), Wire(4)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Wires::range(3).to_string(), "[0, 1, 2]");
    }

    #[test]
    fn test_wire_respects_width() {
        assert_eq!(format!("{:>3}|", Wire(7)), "  7|");
        assert_eq!(format!("{:<3}|", Wire(12)), "12 |");
    }
}
