//! Relator: canonical relations between Li–Cai generators of right-angled
//! Coxeter groups.
//!
//! Given a finite simple graph Γ and a simplicial loop in Γ, this crate
//! computes the canonical relator `Red(R(l))` among the Li–Cai generators
//! `L(i, J)` of the commutator subgroup `RC'_Γ` of the right-angled
//! Coxeter group on Γ, providing:
//! - a rewriting engine that canonicalizes any generator into a freely
//!   reduced word of *distinguished* generators, driven by graph
//!   connectivity and the shift relation;
//! - a relation builder turning closed walks into canonical relators;
//! - a sound-but-incomplete triviality oracle over atomic Coxeter letters.
//!
//! # Mathematical Foundations
//!
//! For an m-gon, `RC'_Γ` is the fundamental group of a closed surface of
//! genus `g(m) = 1 + (m-4)·2^(m-3)`, and the computed presentation is a
//! one-relator presentation whose relator has length exactly
//! `4·g(m) = 4 + (m-4)·2^(m-1)`. The crate was built to verify that claim
//! empirically; the regression tests pin it for small m.
//!
//! # References
//!
//! - Cai, "On products in a real moment-angle manifold", J. Math. Soc. Japan (2017)
//! - Panov & Veryovkin, "Polyhedral products and commutator subgroups of
//!   right-angled Artin and Coxeter groups", Sbornik: Mathematics (2016)
//! - Davis, "The Geometry and Topology of Coxeter Groups" (2008)
//! - Tits, "Le problème des mots dans les groupes de Coxeter" (1969)
//!
//! # Example
//!
//! ```
//! use relator::prelude::*;
//!
//! // The square: the canonical relator of the 4-gon is a commutator.
//! let graph = SimpleGraph::cycle(4);
//! let ambient: AmbientSet = (1..=4).map(Vertex::new).collect();
//! let path: Vec<Vertex> = (1..=4).map(Vertex::new).collect();
//!
//! let relator = reduced_path_relation(&graph, &path, &ambient).unwrap();
//! assert_eq!(relator.len(), 4);
//! assert!(is_relation(&relator, &graph));
//! ```

pub mod cache;
pub mod core;
pub mod fingerprint;
pub mod graph;
pub mod relation;
pub mod rewrite;
pub mod verify;
pub mod word;

pub use crate::cache::{CacheError, RelatorCache};
pub use crate::core::{AmbientSet, GenError, Generator, Vertex};
pub use crate::fingerprint::{graph_fingerprint, Canonicalizable, HashValue};
pub use crate::graph::{GraphError, SimpleGraph, Subgraph};
pub use crate::relation::{path_relation, reduced_path_relation, RelationError};
pub use crate::rewrite::{
    is_distinguished, make_distinguished, reduce_word, shift, Distinguisher, RewriteError,
    DEFAULT_WORK_BUDGET,
};
pub use crate::verify::{encode, encode_word, is_relation, simplify};
pub use crate::word::Word;

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::cache::{CacheError, RelatorCache};
    pub use crate::core::{AmbientSet, GenError, Generator, Vertex};
    pub use crate::fingerprint::{graph_fingerprint, Canonicalizable, HashValue};
    pub use crate::graph::{GraphError, SimpleGraph, Subgraph};
    pub use crate::relation::{path_relation, reduced_path_relation, RelationError};
    pub use crate::rewrite::{
        is_distinguished, make_distinguished, reduce_word, shift, Distinguisher, RewriteError,
        DEFAULT_WORK_BUDGET,
    };
    pub use crate::verify::{encode, encode_word, is_relation, simplify};
    pub use crate::word::Word;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    /// Closed-form expected relator length for the m-gon: `4 + (m-4)·2^(m-1)`.
    fn expected_length(m: u32) -> usize {
        4 + (m as usize - 4) * (1usize << (m - 1))
    }

    fn polygon_relator(m: u32) -> Word {
        let graph = SimpleGraph::cycle(m);
        let ambient: AmbientSet = (1..=m).map(Vertex::new).collect();
        let path: Vec<Vertex> = (1..=m).map(Vertex::new).collect();
        reduced_path_relation(&graph, &path, &ambient).unwrap()
    }

    /// The raw m-gon relation always has 2m letters before reduction.
    #[test]
    fn raw_polygon_relation_length() {
        for m in [4u32, 5, 6, 8] {
            let ambient: AmbientSet = (1..=m).map(Vertex::new).collect();
            let path: Vec<Vertex> = (1..=m).map(Vertex::new).collect();
            let raw = path_relation(&path, &ambient).unwrap();
            assert_eq!(raw.len(), 2 * m as usize);
        }
    }

    /// The square relator: length 4, and the triviality oracle confirms it
    /// is a relation of `RC_Γ`.
    #[test]
    fn square_relator() {
        let relator = polygon_relator(4);
        assert_eq!(relator.len(), expected_length(4));
        assert_eq!(relator.len(), 4);
        assert!(relator.is_freely_reduced());

        let graph = SimpleGraph::cycle(4);
        assert!(is_relation(&relator, &graph));
    }

    /// Pentagon and hexagon relators match the closed form: 20 and 68.
    #[test]
    fn small_polygon_relator_lengths() {
        assert_eq!(polygon_relator(5).len(), expected_length(5));
        assert_eq!(polygon_relator(6).len(), expected_length(6));
    }

    /// The 8-gon relator has length 4 + 4·2⁷ = 516.
    #[test]
    fn octagon_relator_length() {
        let relator = polygon_relator(8);
        assert_eq!(relator.len(), 516);
        assert!(relator.is_freely_reduced());
    }

    /// The 12-gon relator has length 4 + 8·2¹¹ = 16388. Slower than the
    /// rest of the suite, so opt-in.
    #[test]
    #[ignore = "large polygon; run with --ignored"]
    fn twelve_gon_relator_length() {
        let relator = polygon_relator(12);
        assert_eq!(relator.len(), 16388);
    }

    /// Every letter of a canonical relator is a distinguished generator,
    /// so re-canonicalizing the relator reproduces it unchanged.
    #[test]
    fn polygon_relator_is_canonical() {
        let graph = SimpleGraph::cycle(6);
        let relator = polygon_relator(6);
        for letter in relator.letters() {
            assert!(is_distinguished(letter, &graph.full_view()));
        }
        let again = reduce_word(&relator, &graph).unwrap();
        assert_eq!(again, relator);
    }

    /// One engine serving several polygon relators, with its memo exported
    /// and replayed through the cache layer.
    #[test]
    fn relator_cache_round_trip_through_engine() {
        let graph = SimpleGraph::cycle(5);
        let ambient: AmbientSet = (1..=5).map(Vertex::new).collect();
        let path: Vec<Vertex> = (1..=5).map(Vertex::new).collect();

        let mut engine = Distinguisher::new(&graph);
        let relator = engine.reduced_path_relation(&path, &ambient).unwrap();
        let cache = engine.export_cache();

        let bytes = cache.to_cbor().unwrap();
        let reloaded = RelatorCache::from_cbor(&bytes).unwrap();

        let mut seeded = Distinguisher::new(&graph);
        seeded.seed_from_cache(&reloaded).unwrap();
        let replayed = seeded.reduced_path_relation(&path, &ambient).unwrap();
        assert_eq!(replayed, relator);
    }
}
