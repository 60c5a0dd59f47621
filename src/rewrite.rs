//! The distinguishing engine: canonicalization of Li–Cai generators.
//!
//! Any generator `L(i, J)` rewrites to a unique freely reduced word in
//! *distinguished* generators, the canonical-form representatives picked
//! out by a connectivity test on Γ restricted to J. The engine drives the
//! recursion with a fixed algebraic identity (the shift relation)
//!
//! `L(i, J) = L(j, J) · L(i, J∖{j}) · L(j, J∖{i})⁻¹`
//!
//! valid for every `j ∈ J`, `j ≠ i`; progress comes from choosing a pivot
//! `j` along a geodesic. Each recursive branch either strictly shrinks the
//! ambient set, terminates through the max-vertex or edge shortcut, or
//! reaches an already-distinguished generator, so the recursion is bounded
//! by graph size; an explicit work budget guards against defects anyway.
//!
//! # Citations
//! - Panov & Veryovkin, "Polyhedral products and commutator subgroups of
//!   right-angled Artin and Coxeter groups", Sbornik: Mathematics (2016)
//! - Cai, "On products in a real moment-angle manifold", J. Math. Soc. Japan (2017)

use crate::cache::{CacheError, RelatorCache};
use crate::core::{GenError, Generator, Vertex};
use crate::fingerprint::graph_fingerprint;
use crate::graph::{GraphError, SimpleGraph, Subgraph};
use crate::word::Word;
use std::collections::HashMap;
use std::fmt;

/// Default work budget for a single engine.
///
/// Far above anything the polygon use case needs; hitting it signals a
/// defect or an adversarial input, not normal operation.
pub const DEFAULT_WORK_BUDGET: usize = 1 << 26;

/// Error type for canonicalization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteError {
    /// A connectivity query failed (disconnected or unknown vertex).
    Graph(GraphError),
    /// A rewriting step produced an invalid generator.
    Invalid(GenError),
    /// The work budget was exhausted before the recursion bottomed out.
    BudgetExhausted(usize),
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::Graph(e) => write!(f, "graph query failed: {}", e),
            RewriteError::Invalid(e) => write!(f, "invalid generator: {}", e),
            RewriteError::BudgetExhausted(budget) => {
                write!(f, "work budget of {} steps exhausted", budget)
            }
        }
    }
}

impl std::error::Error for RewriteError {}

impl From<GraphError> for RewriteError {
    fn from(e: GraphError) -> Self {
        RewriteError::Graph(e)
    }
}

impl From<GenError> for RewriteError {
    fn from(e: GenError) -> Self {
        RewriteError::Invalid(e)
    }
}

/// Tests whether `gen` is distinguished with respect to `view`.
///
/// With `g` = the view restricted to the generator's ambient set `J` and
/// `maxel = max(J)`: true iff the distinguished vertex and `maxel` lie in
/// *different* connected components of `g`, and the distinguished vertex
/// is the minimum of its own component.
pub fn is_distinguished(gen: &Generator, view: &Subgraph<'_>) -> bool {
    let g = view.restrict(gen.ambient());
    let elem = gen.elem();
    let maxel = gen
        .ambient()
        .max()
        .expect("ambient set is non-empty by construction");

    if g.same_component(elem, maxel) {
        return false;
    }
    match g.min_in_component(elem) {
        Ok(min) => min == elem,
        Err(_) => false,
    }
}

/// Applies the shift relation to `gen` at pivot `j`.
///
/// For non-inverted `L(i, J)` this is the 3-letter word
/// `L(j, J) · L(i, J∖{j}) · L(j, J∖{i})⁻¹`; for an inverted generator it
/// is the inverse of the shift of the inverse. Requires `j ∈ J`, `j ≠ i`.
pub fn shift(gen: &Generator, j: Vertex) -> Result<Word, RewriteError> {
    if gen.is_inverted() {
        return Ok(shift(&gen.inverse(), j)?.inverse());
    }
    let i = gen.elem();
    let ambient = gen.ambient();

    let mut word = Word::empty();
    word.push(Generator::new(j, ambient.clone(), false)?);
    word.push(Generator::new(i, ambient.without(j), false)?);
    word.push(Generator::new(j, ambient.without(i), true)?);
    Ok(word)
}

/// The rewriting engine for one ambient graph Γ.
///
/// Holds the graph, a memo table of already-canonicalized generators, and
/// the work budget. Memoization is sound because Γ is fixed for the
/// lifetime of the engine: the canonical word of a generator depends only
/// on the generator (whose ambient set names the relevant subgraph) and Γ.
#[derive(Debug)]
pub struct Distinguisher<'a> {
    graph: &'a SimpleGraph,
    memo: HashMap<Generator, Word>,
    budget: usize,
    steps: usize,
}

impl<'a> Distinguisher<'a> {
    /// Creates an engine with the default work budget.
    pub fn new(graph: &'a SimpleGraph) -> Self {
        Self::with_budget(graph, DEFAULT_WORK_BUDGET)
    }

    /// Creates an engine with an explicit work budget.
    pub fn with_budget(graph: &'a SimpleGraph, budget: usize) -> Self {
        Self {
            graph,
            memo: HashMap::new(),
            budget,
            steps: 0,
        }
    }

    /// Rewriting steps spent so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of memoized generators.
    #[inline]
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Computes the canonical word `Red(L(i, J))` of distinguished
    /// generators equal to `gen` in `RC'_Γ`.
    pub fn make_distinguished(&mut self, gen: &Generator) -> Result<Word, RewriteError> {
        if let Some(word) = self.memo.get(gen) {
            return Ok(word.clone());
        }
        let word = self.rewrite(gen)?;
        self.memo.insert(gen.clone(), word.clone());
        Ok(word)
    }

    /// Canonicalizes every letter of `word` and concatenates the results
    /// with free reduction, in letter order.
    pub fn reduce_word(&mut self, word: &Word) -> Result<Word, RewriteError> {
        let mut reduced = Word::empty();
        for letter in word.letters() {
            let canonical = self.make_distinguished(letter)?;
            reduced.concat(&canonical);
        }
        Ok(reduced)
    }

    /// One case analysis of the recursion.
    fn rewrite(&mut self, gen: &Generator) -> Result<Word, RewriteError> {
        self.debit()?;

        // An inverse canonicalizes to the inverse of the canonical form.
        if gen.is_inverted() {
            return Ok(self.make_distinguished(&gen.inverse())?.inverse());
        }

        let view = self.graph.induced(gen.ambient().clone());
        if is_distinguished(gen, &view) {
            return Ok(Word::one_letter(gen.clone()));
        }

        let elem = gen.elem();
        let maxel = gen
            .ambient()
            .max()
            .expect("ambient set is non-empty by construction");

        // L(max(J), J) = 1 holds identically.
        if elem == maxel {
            return Ok(Word::empty());
        }

        // Dropping a vertex adjacent to the maximum never changes the
        // value: L(i, J) = L(i, J∖{max(J)}).
        if view.has_edge(elem, maxel) {
            let trimmed = Generator::new(elem, gen.ambient().without(maxel), false)?;
            return self.make_distinguished(&trimmed);
        }

        // Pivot along a geodesic: toward max(J) when reachable, otherwise
        // toward the minimum of the distinguished vertex's own component.
        let pivot = if view.same_component(elem, maxel) {
            view.first_step(elem, maxel)?
        } else {
            let target = view.min_in_component(elem)?;
            view.first_step(elem, target)?
        };

        let shifted = shift(gen, pivot)?;
        self.reduce_word(&shifted)
    }

    fn debit(&mut self) -> Result<(), RewriteError> {
        if self.steps >= self.budget {
            return Err(RewriteError::BudgetExhausted(self.budget));
        }
        self.steps += 1;
        Ok(())
    }

    /// Seeds the memo table from a persisted cache.
    ///
    /// Fails with [`CacheError::GraphMismatch`] if the cache was computed
    /// for a different graph.
    pub fn seed_from_cache(&mut self, cache: &RelatorCache) -> Result<(), CacheError> {
        if cache.graph_fingerprint() != graph_fingerprint(self.graph) {
            return Err(CacheError::GraphMismatch);
        }
        for (gen, word) in cache.entries() {
            self.memo.insert(gen.clone(), word.clone());
        }
        Ok(())
    }

    /// Exports the memo table as a persistable cache.
    pub fn export_cache(&self) -> RelatorCache {
        let mut cache = RelatorCache::for_graph(self.graph);
        for (gen, word) in &self.memo {
            cache.insert(gen.clone(), word.clone());
        }
        cache
    }
}

/// Canonicalizes a single generator against `graph` with a fresh engine.
pub fn make_distinguished(gen: &Generator, graph: &SimpleGraph) -> Result<Word, RewriteError> {
    Distinguisher::new(graph).make_distinguished(gen)
}

/// Reduces a whole word against `graph` with a fresh engine.
pub fn reduce_word(word: &Word, graph: &SimpleGraph) -> Result<Word, RewriteError> {
    Distinguisher::new(graph).reduce_word(word)
}
