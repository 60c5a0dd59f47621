//! Core value types: vertices, ambient sets, and Li–Cai generators.
//!
//! A Li–Cai generator `L(i, J)` is the group element
//! `g_{j1} ⋯ g_{jk} · g_i · g_{jk} ⋯ g_{j1}` (with `i` omitted from the
//! closing run) of the commutator subgroup `RC'_Γ` of the right-angled
//! Coxeter group on Γ, parametrized by a vertex `i` and an ambient vertex
//! subset `J ∋ i`. Generators are pure values: constructed once, never
//! mutated.
//!
//! # Citations
//! - Cai, "On products in a real moment-angle manifold", J. Math. Soc. Japan (2017)
//! - Panov & Veryovkin, "Polyhedral products and commutator subgroups of
//!   right-angled Artin and Coxeter groups", Sbornik: Mathematics (2016)
//! - Davis, "The Geometry and Topology of Coxeter Groups" (2008)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a graph vertex.
///
/// Uses a transparent `u32` wrapper for efficient comparison and hashing.
/// Vertex labels are totally ordered; the rewriting engine leans on this
/// order for its `min`/`max` component queries.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Vertex(u32);

impl Vertex {
    /// Creates a vertex from a raw label.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw label.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finite set of vertices in canonical (sorted, deduplicated) form.
///
/// Equality and hashing are order-independent because the representation
/// is canonicalized at construction: two ambient sets built from the same
/// vertices in any order are identical values.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct AmbientSet {
    /// Sorted, deduplicated vertex labels.
    vertices: Vec<Vertex>,
}

impl AmbientSet {
    /// Builds an ambient set from any collection of vertices.
    ///
    /// Duplicates are dropped; the input order is irrelevant.
    pub fn new<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = Vertex>,
    {
        let mut vertices: Vec<Vertex> = vertices.into_iter().collect();
        vertices.sort();
        vertices.dedup();
        Self { vertices }
    }

    /// Number of vertices in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Membership test.
    #[inline]
    pub fn contains(&self, v: Vertex) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }

    /// Minimum-labelled vertex, or `None` if the set is empty.
    #[inline]
    pub fn min(&self) -> Option<Vertex> {
        self.vertices.first().copied()
    }

    /// Maximum-labelled vertex, or `None` if the set is empty.
    #[inline]
    pub fn max(&self) -> Option<Vertex> {
        self.vertices.last().copied()
    }

    /// Returns a copy of this set with `v` removed.
    ///
    /// If `v` is not a member, the copy is identical.
    pub fn without(&self, v: Vertex) -> Self {
        let vertices = self
            .vertices
            .iter()
            .copied()
            .filter(|&u| u != v)
            .collect();
        Self { vertices }
    }

    /// Iterates the vertices in ascending label order.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Vertex> + '_ {
        self.vertices.iter().copied()
    }

    /// The vertices as a sorted slice.
    #[inline]
    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl FromIterator<Vertex> for AmbientSet {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for AmbientSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.vertices {
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

/// Error type for generator construction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenError {
    /// The distinguished vertex is not a member of the ambient set.
    ElemOutsideAmbient(Vertex),
    /// The ambient set is empty.
    EmptyAmbient,
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::ElemOutsideAmbient(v) => {
                write!(f, "vertex {} is not in the ambient set", v)
            }
            GenError::EmptyAmbient => write!(f, "ambient set is empty"),
        }
    }
}

impl std::error::Error for GenError {}

/// A Li–Cai generator `L(i, J)` or its inverse.
///
/// `L(3, {1,3,5,8})` is the element `g1 g3 g5 g8 · g3 · g8 g5 g1` of
/// `RC'_Γ`; it is stored as `elem = 3`, `ambient = {1,3,5,8}`,
/// `inverted = false`. The inverse carries `inverted = true`.
///
/// # Invariants
/// - `elem ∈ ambient`.
/// - `ambient` is non-empty.
///
/// Both are enforced at construction; a `Generator` is immutable after.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Generator {
    elem: Vertex,
    ambient: AmbientSet,
    inverted: bool,
}

impl Generator {
    /// Creates a generator from its components.
    ///
    /// Fails with [`GenError::ElemOutsideAmbient`] if `elem ∉ ambient`,
    /// and with [`GenError::EmptyAmbient`] if the ambient set is empty.
    pub fn new(elem: Vertex, ambient: AmbientSet, inverted: bool) -> Result<Self, GenError> {
        if ambient.is_empty() {
            return Err(GenError::EmptyAmbient);
        }
        if !ambient.contains(elem) {
            return Err(GenError::ElemOutsideAmbient(elem));
        }
        Ok(Self {
            elem,
            ambient,
            inverted,
        })
    }

    /// Creates a signed copy of an existing generator.
    ///
    /// Copies `elem` and `ambient`, overriding the sign. The source
    /// generator already satisfies the invariants, so this cannot fail.
    pub fn with_sign(other: &Generator, inverted: bool) -> Self {
        Self {
            elem: other.elem,
            ambient: other.ambient.clone(),
            inverted,
        }
    }

    /// The same generator with the opposite sign.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self::with_sign(self, !self.inverted)
    }

    /// The distinguished vertex `i`.
    #[inline]
    pub fn elem(&self) -> Vertex {
        self.elem
    }

    /// The ambient set `J`.
    #[inline]
    pub fn ambient(&self) -> &AmbientSet {
        &self.ambient
    }

    /// Whether this is the inverse `L(i, J)⁻¹`.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Whether `other` is exactly the inverse of `self`.
    ///
    /// This is the cancellation test used by free reduction.
    #[inline]
    pub fn is_inverse_of(&self, other: &Generator) -> bool {
        self.elem == other.elem
            && self.inverted != other.inverted
            && self.ambient == other.ambient
    }
}

impl fmt::Display for Generator {
    /// `L(3, {1,3,5,8})` displays as `(3<1358)`; its inverse as `(3<1358)^-1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}<{})", self.elem, self.ambient)?;
        if self.inverted {
            write!(f, "^-1")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vs(labels: &[u32]) -> AmbientSet {
        labels.iter().map(|&l| Vertex::new(l)).collect()
    }

    #[test]
    fn ambient_set_is_order_independent() {
        let a = vs(&[3, 1, 8, 5]);
        let b = vs(&[1, 3, 5, 8]);
        assert_eq!(a, b);
        assert_eq!(a.min(), Some(Vertex::new(1)));
        assert_eq!(a.max(), Some(Vertex::new(8)));
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn ambient_set_dedups() {
        let a = vs(&[2, 2, 7, 2]);
        assert_eq!(a.len(), 2);
        assert!(a.contains(Vertex::new(7)));
    }

    #[test]
    fn without_removes_one_vertex() {
        let a = vs(&[1, 2, 3]);
        let b = a.without(Vertex::new(2));
        assert_eq!(b, vs(&[1, 3]));
        // Removing a non-member leaves the set unchanged.
        assert_eq!(a.without(Vertex::new(9)), a);
    }

    #[test]
    fn generator_requires_elem_in_ambient() {
        let err = Generator::new(Vertex::new(4), vs(&[1, 2, 3]), false);
        assert_eq!(err, Err(GenError::ElemOutsideAmbient(Vertex::new(4))));
        let err = Generator::new(Vertex::new(1), vs(&[]), false);
        assert_eq!(err, Err(GenError::EmptyAmbient));
    }

    /// Generators compare by (elem, ambient-as-set, sign); the ambient
    /// set's build order is irrelevant.
    #[test]
    fn generator_structural_equality() {
        let a = Generator::new(Vertex::new(3), vs(&[8, 1, 5, 3]), false).unwrap();
        let b = Generator::new(Vertex::new(3), vs(&[1, 3, 5, 8]), false).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, a.inverse());
        assert!(a.is_inverse_of(&a.inverse()));
        assert!(!a.is_inverse_of(&b));
    }

    #[test]
    fn signed_copy_overrides_sign() {
        let a = Generator::new(Vertex::new(2), vs(&[2, 4]), false).unwrap();
        let b = Generator::with_sign(&a, true);
        assert_eq!(b, a.inverse());
        assert_eq!(a, b.inverse());
    }

    #[test]
    fn display_form() {
        let a = Generator::new(Vertex::new(3), vs(&[1, 3, 5, 8]), false).unwrap();
        assert_eq!(a.to_string(), "(3<1358)");
        assert_eq!(a.inverse().to_string(), "(3<1358)^-1");
    }
}
