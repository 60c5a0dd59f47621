//! Triviality oracle over atomic Coxeter letters.
//!
//! Every Li–Cai generator expands to a word in the involutive generators
//! `g_v` of the right-angled Coxeter group `RC_Γ`, one atomic letter per
//! vertex. Two atomic letters commute iff their vertices are adjacent in
//! Γ, and each squares to the identity; [`simplify`] greedily cancels
//! pairs of equal letters separated only by letters commuting with them.
//!
//! The cancellation is *sound but not complete*: an empty result proves
//! the word trivial, a non-empty result proves nothing (this particular
//! cancellation order may simply have missed). Tits solved the word
//! problem for Coxeter groups by exactly such deletion moves; the greedy
//! scan here is a best-effort oracle, not a decision procedure.
//!
//! # Citations
//! - Tits, "Le problème des mots dans les groupes de Coxeter" (1969)
//! - Davis, "The Geometry and Topology of Coxeter Groups", Chapter 3 (2008)

use crate::core::{Generator, Vertex};
use crate::graph::SimpleGraph;
use crate::word::Word;

/// Expands a generator into atomic Coxeter letters.
///
/// For non-inverted `L(i, J)` with `J = {j1 < j2 < … < jk}` the encoding
/// is the palindromic bracketing around `i`:
/// `j1 j2 … jk · i · (jk … j2 j1 with i omitted)`: ambient ascending,
/// the distinguished vertex again, then the ambient minus `i` descending.
/// An inverted generator encodes as the reverse of its inverse (atomic
/// letters are involutions, so reversal is inversion).
pub fn encode(gen: &Generator) -> Vec<Vertex> {
    if gen.is_inverted() {
        let mut letters = encode(&gen.inverse());
        letters.reverse();
        return letters;
    }
    let ambient = gen.ambient();
    let elem = gen.elem();

    let mut letters = Vec::with_capacity(2 * ambient.len());
    letters.extend(ambient.iter());
    letters.push(elem);
    letters.extend(ambient.iter().rev().filter(|&v| v != elem));
    letters
}

/// Concatenated encoding of a whole word, in letter order.
pub fn encode_word(word: &Word) -> Vec<Vertex> {
    word.letters().iter().flat_map(encode).collect()
}

/// Greedy cancellation of commuting pairs.
///
/// Repeatedly scans for two occurrences of the same letter with only
/// letters adjacent to it (in Γ) strictly between them, deletes both, and
/// restarts the scan just left of the deletion site so nests like
/// `abcddcba` unwind without a full rescan. Terminates when no such pair
/// remains.
pub fn simplify(letters: &[Vertex], graph: &SimpleGraph) -> Vec<Vertex> {
    let mut s: Vec<Vertex> = letters.to_vec();
    let mut shift = 0usize;
    let mut updated = true;
    while updated && !s.is_empty() {
        updated = false;
        let n = s.len();
        for t in 0..n {
            let i = (t + shift) % n;
            let lt = s[i];
            let Some(offset) = s[i + 1..].iter().position(|&o| o == lt) else {
                continue;
            };
            let next = i + 1 + offset;
            if s[i + 1..next].iter().all(|&o| graph.has_edge(lt, o)) {
                s.remove(next);
                s.remove(i);
                updated = true;
                // Resume just left of the deletion site.
                shift = if i == 0 { s.len().saturating_sub(1) } else { i - 1 };
                break;
            }
        }
    }
    s
}

/// True iff the cancellation fully reduces the encoded word.
///
/// An empty post-cancellation string proves `word` is a relation of
/// `RC_Γ`; a `false` only means this cancellation order found no proof.
pub fn is_relation(word: &Word, graph: &SimpleGraph) -> bool {
    simplify(&encode_word(word), graph).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AmbientSet;

    fn v(label: u32) -> Vertex {
        Vertex::new(label)
    }

    fn letters(labels: &[u32]) -> Vec<Vertex> {
        labels.iter().map(|&l| Vertex::new(l)).collect()
    }

    fn gen(elem: u32, ambient: &[u32], inverted: bool) -> Generator {
        let set: AmbientSet = ambient.iter().map(|&l| Vertex::new(l)).collect();
        Generator::new(v(elem), set, inverted).unwrap()
    }

    /// `L(3, {1,3,5,8})` is `g1 g3 g5 g8 · g3 · g8 g5 g1`.
    #[test]
    fn encode_is_a_palindromic_bracketing() {
        let k = gen(3, &[1, 3, 5, 8], false);
        assert_eq!(encode(&k), letters(&[1, 3, 5, 8, 3, 8, 5, 1]));
        assert_eq!(encode(&k.inverse()), letters(&[1, 5, 8, 3, 8, 5, 3, 1]));
    }

    #[test]
    fn encode_word_concatenates() {
        let word: Word = [gen(2, &[2, 4], false), gen(1, &[1, 3], true)]
            .into_iter()
            .collect();
        assert_eq!(encode_word(&word), letters(&[2, 4, 2, 4, 3, 1, 3, 1]));
    }

    /// Involution: `g v v g` cancels even with no edges at all.
    #[test]
    fn simplify_cancels_adjacent_duplicates() {
        let empty = SimpleGraph::new();
        assert_eq!(
            simplify(&letters(&[1, 2, 2, 1]), &empty),
            Vec::<Vertex>::new()
        );
    }

    /// `g1 g2 g1 g2` cancels iff 1 and 2 commute, i.e. are adjacent.
    #[test]
    fn simplify_commutes_across_adjacent_letters_only() {
        let mut with_edge = SimpleGraph::new();
        with_edge.add_edge(v(1), v(2));
        assert!(simplify(&letters(&[1, 2, 1, 2]), &with_edge).is_empty());

        let mut without_edge = SimpleGraph::new();
        without_edge.add_vertex(v(1));
        without_edge.add_vertex(v(2));
        assert_eq!(
            simplify(&letters(&[1, 2, 1, 2]), &without_edge),
            letters(&[1, 2, 1, 2])
        );
    }

    /// The nested shape from the scan-restart optimization.
    #[test]
    fn simplify_unwinds_nested_palindromes() {
        let empty = SimpleGraph::new();
        assert!(simplify(&letters(&[1, 2, 3, 4, 4, 3, 2, 1]), &empty).is_empty());
    }

    /// A single generator is never a relation, and the empty word always is.
    #[test]
    fn is_relation_basics() {
        let square = SimpleGraph::cycle(4);
        assert!(is_relation(&Word::empty(), &square));
        let single = Word::one_letter(gen(2, &[2, 4], false));
        assert!(!is_relation(&single, &square));
    }

    /// `L(i, J) · L(i, J)⁻¹` encodes to a palindrome that fully cancels
    /// whatever the graph.
    #[test]
    fn generator_times_inverse_is_a_relation() {
        let mut graph = SimpleGraph::new();
        graph.add_vertex(v(1));
        graph.add_vertex(v(2));
        graph.add_vertex(v(3));
        // Build the unreduced concatenation by hand; Word::push would
        // cancel the two letters before they reach the oracle.
        let k = gen(2, &[1, 2, 3], false);
        let mut encoded = encode(&k);
        encoded.extend(encode(&k.inverse()));
        assert!(simplify(&encoded, &graph).is_empty());
    }
}
