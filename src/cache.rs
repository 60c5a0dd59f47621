//! Persistence for memoized canonical words.
//!
//! Computing the canonical relator for larger polygons revisits the same
//! generators many times across runs; a [`RelatorCache`] stores the memo
//! table of a [`Distinguisher`](crate::rewrite::Distinguisher) in CBOR so
//! a later run can resume where an earlier one stopped. Every cache is
//! keyed by the fingerprint of the graph it was computed for, and seeding
//! an engine from a cache with a different fingerprint is refused:
//! canonical words are meaningless against any other graph.
//!
//! # Citations
//! - CBOR: RFC 8949 (2020)

use crate::core::Generator;
use crate::fingerprint::{graph_fingerprint, HashValue};
use crate::graph::SimpleGraph;
use crate::word::Word;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Error type for cache persistence failures.
#[derive(Debug)]
pub enum CacheError {
    /// The cache was computed for a different graph.
    GraphMismatch,
    /// CBOR encoding or decoding failed.
    Encode(serde_cbor::Error),
    /// Reading or writing the cache file failed.
    Io(std::io::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::GraphMismatch => {
                write!(f, "cache was computed for a different graph")
            }
            CacheError::Encode(e) => write!(f, "cache serialization failed: {}", e),
            CacheError::Io(e) => write!(f, "cache file access failed: {}", e),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::GraphMismatch => None,
            CacheError::Encode(e) => Some(e),
            CacheError::Io(e) => Some(e),
        }
    }
}

impl From<serde_cbor::Error> for CacheError {
    fn from(e: serde_cbor::Error) -> Self {
        CacheError::Encode(e)
    }
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::Io(e)
    }
}

/// A persistable memo table of canonical words, bound to one graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatorCache {
    /// Fingerprint of the graph the entries were computed against.
    graph_fp: HashValue,
    /// Generator → canonical word.
    entries: HashMap<Generator, Word>,
}

impl RelatorCache {
    /// Creates an empty cache bound to `graph`.
    pub fn for_graph(graph: &SimpleGraph) -> Self {
        Self {
            graph_fp: graph_fingerprint(graph),
            entries: HashMap::new(),
        }
    }

    /// The fingerprint of the graph this cache belongs to.
    #[inline]
    pub fn graph_fingerprint(&self) -> HashValue {
        self.graph_fp
    }

    /// Looks up the canonical word of a generator.
    #[inline]
    pub fn get(&self, gen: &Generator) -> Option<&Word> {
        self.entries.get(gen)
    }

    /// Stores a canonical word.
    pub fn insert(&mut self, gen: Generator, word: Word) {
        self.entries.insert(gen, word);
    }

    /// Iterates all entries.
    pub fn entries(&self) -> impl Iterator<Item = (&Generator, &Word)> {
        self.entries.iter()
    }

    /// Number of cached generators.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all entries, keeping the graph binding.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serializes the cache to CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, CacheError> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// Deserializes a cache from CBOR bytes.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, CacheError> {
        Ok(serde_cbor::from_slice(bytes)?)
    }

    /// Saves the cache to a file in CBOR format.
    pub fn save_to_file(&self, path: &Path) -> Result<(), CacheError> {
        let bytes = self.to_cbor()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Loads a cache from a CBOR file.
    pub fn load_from_file(path: &Path) -> Result<Self, CacheError> {
        let bytes = std::fs::read(path)?;
        Self::from_cbor(&bytes)
    }
}
