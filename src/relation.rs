//! Relations associated to closed walks.
//!
//! A closed walk `(c1, …, ck, c1)` through distinct vertices of Γ, read
//! against an ambient set `J` containing all of them, determines a raw
//! relator of exactly `2k` letters: for each consecutive pair `(c, c')`
//! (wrapping last→first) the word picks up `L(c', J∖{c}) · L(c, J∖{c'})⁻¹`.
//! Canonicalizing the raw word through the distinguishing engine yields
//! the canonical relator.

use crate::core::{AmbientSet, GenError, Generator, Vertex};
use crate::graph::SimpleGraph;
use crate::rewrite::{Distinguisher, RewriteError};
use crate::word::Word;
use std::collections::HashSet;
use std::fmt;

/// Error type for relation construction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationError {
    /// The walk has no vertices.
    EmptyPath,
    /// A vertex occurs twice in the walk.
    DuplicateVertex(Vertex),
    /// A walk vertex is missing from the ambient set.
    OutsideAmbient(Vertex),
    /// A letter of the raw word failed to construct.
    Invalid(GenError),
    /// Canonicalization failed.
    Rewrite(RewriteError),
}

impl fmt::Display for RelationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationError::EmptyPath => write!(f, "closed walk has no vertices"),
            RelationError::DuplicateVertex(v) => {
                write!(f, "vertex {} repeats in the closed walk", v)
            }
            RelationError::OutsideAmbient(v) => {
                write!(f, "walk vertex {} is outside the ambient set", v)
            }
            RelationError::Invalid(e) => write!(f, "invalid letter: {}", e),
            RelationError::Rewrite(e) => write!(f, "canonicalization failed: {}", e),
        }
    }
}

impl std::error::Error for RelationError {}

impl From<GenError> for RelationError {
    fn from(e: GenError) -> Self {
        RelationError::Invalid(e)
    }
}

impl From<RewriteError> for RelationError {
    fn from(e: RewriteError) -> Self {
        RelationError::Rewrite(e)
    }
}

/// Builds the raw relator of the closed walk `path` in the ambient set.
///
/// The walk is an ordered sequence of *distinct* vertices read as a
/// cycle. For a genuine cycle (three or more vertices) the result has
/// exactly `2 · path.len()` letters: free reduction never fires between
/// them because consecutive letters differ in their distinguished vertex.
/// A two-vertex walk collapses to the empty word (its wrap-around pair is
/// the inverse of its forward pair), and a one-vertex walk is rejected as
/// [`RelationError::Invalid`] since `L(c, J∖{c})` is not a generator.
pub fn path_relation(path: &[Vertex], ambient: &AmbientSet) -> Result<Word, RelationError> {
    if path.is_empty() {
        return Err(RelationError::EmptyPath);
    }
    let mut seen: HashSet<Vertex> = HashSet::with_capacity(path.len());
    for &v in path {
        if !seen.insert(v) {
            return Err(RelationError::DuplicateVertex(v));
        }
        if !ambient.contains(v) {
            return Err(RelationError::OutsideAmbient(v));
        }
    }

    let mut word = Word::empty();
    for k in 0..path.len() {
        let c = path[k];
        let c_next = path[(k + 1) % path.len()];
        word.push(Generator::new(c_next, ambient.without(c), false)?);
        word.push(Generator::new(c, ambient.without(c_next), true)?);
    }
    Ok(word)
}

/// The canonical relator of the closed walk: the raw word canonicalized
/// against Γ restricted to the ambient set.
pub fn reduced_path_relation(
    graph: &SimpleGraph,
    path: &[Vertex],
    ambient: &AmbientSet,
) -> Result<Word, RelationError> {
    let mut engine = Distinguisher::new(graph);
    engine.reduced_path_relation(path, ambient)
}

impl<'a> Distinguisher<'a> {
    /// [`reduced_path_relation`] on this engine, reusing its memo table.
    ///
    /// Useful when several relators are computed over the same graph.
    pub fn reduced_path_relation(
        &mut self,
        path: &[Vertex],
        ambient: &AmbientSet,
    ) -> Result<Word, RelationError> {
        let raw = path_relation(path, ambient)?;
        Ok(self.reduce_word(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(label: u32) -> Vertex {
        Vertex::new(label)
    }

    fn set(labels: &[u32]) -> AmbientSet {
        labels.iter().map(|&l| Vertex::new(l)).collect()
    }

    /// A k-vertex closed walk yields exactly 2k raw letters.
    #[test]
    fn raw_relation_has_two_k_letters() {
        let ambient = set(&[1, 2, 3, 4, 5]);
        for k in 3..=5usize {
            let path: Vec<Vertex> = (1..=k as u32).map(Vertex::new).collect();
            let raw = path_relation(&path, &ambient).unwrap();
            assert_eq!(raw.len(), 2 * k);
        }
    }

    /// Degenerate walks: a 2-vertex walk cancels itself away, and a
    /// 1-vertex walk cannot even form its letters.
    #[test]
    fn degenerate_walks() {
        let ambient = set(&[1, 2, 3]);
        let two = path_relation(&[v(1), v(2)], &ambient).unwrap();
        assert!(two.is_empty());
        assert!(matches!(
            path_relation(&[v(1)], &ambient),
            Err(RelationError::Invalid(_))
        ));
    }

    #[test]
    fn raw_relation_letter_shape() {
        let ambient = set(&[1, 2, 3]);
        let raw = path_relation(&[v(1), v(2), v(3)], &ambient).unwrap();
        let expected = [
            Generator::new(v(2), set(&[2, 3]), false).unwrap(),
            Generator::new(v(1), set(&[1, 3]), true).unwrap(),
            Generator::new(v(3), set(&[1, 3]), false).unwrap(),
            Generator::new(v(2), set(&[1, 2]), true).unwrap(),
            Generator::new(v(1), set(&[1, 2]), false).unwrap(),
            Generator::new(v(3), set(&[2, 3]), true).unwrap(),
        ];
        assert_eq!(raw.letters(), &expected);
    }

    #[test]
    fn rejects_malformed_walks() {
        let ambient = set(&[1, 2, 3]);
        assert_eq!(
            path_relation(&[], &ambient),
            Err(RelationError::EmptyPath)
        );
        assert_eq!(
            path_relation(&[v(1), v(2), v(1)], &ambient),
            Err(RelationError::DuplicateVertex(v(1)))
        );
        assert_eq!(
            path_relation(&[v(1), v(7)], &ambient),
            Err(RelationError::OutsideAmbient(v(7)))
        );
    }

    /// The square relator: canonicalizing the raw 8-letter word of the
    /// 4-gon yields the commutator
    /// `L(2,{2,4}) · L(1,{1,3})⁻¹ · L(2,{2,4})⁻¹ · L(1,{1,3})`.
    #[test]
    fn square_relator_is_a_commutator() {
        let square = SimpleGraph::cycle(4);
        let ambient = set(&[1, 2, 3, 4]);
        let path: Vec<Vertex> = (1..=4).map(Vertex::new).collect();

        let relator = reduced_path_relation(&square, &path, &ambient).unwrap();
        let a = Generator::new(v(2), set(&[2, 4]), false).unwrap();
        let b = Generator::new(v(1), set(&[1, 3]), false).unwrap();
        let expected: Word = [a.clone(), b.inverse(), a.inverse(), b]
            .into_iter()
            .collect();
        assert_eq!(relator, expected);
        assert_eq!(relator.len(), 4);
    }

    #[test]
    fn engine_memo_is_shared_across_relators() {
        let square = SimpleGraph::cycle(4);
        let ambient = set(&[1, 2, 3, 4]);
        let path: Vec<Vertex> = (1..=4).map(Vertex::new).collect();

        let mut engine = Distinguisher::new(&square);
        let first = engine.reduced_path_relation(&path, &ambient).unwrap();
        let steps_after_first = engine.steps();
        let second = engine.reduced_path_relation(&path, &ambient).unwrap();
        assert_eq!(first, second);
        // Every letter of the second pass is a memo hit.
        assert_eq!(engine.steps(), steps_after_first);
    }
}
