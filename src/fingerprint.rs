//! Deterministic fingerprinting of graphs, generators, and words.
//!
//! Provides canonical-byte encodings and domain-separated, length-prefixed
//! SHA-256 hashing. Fingerprints are stable across runs and across build
//! orders: all encodings go through sorted canonical forms, so the same
//! labeled graph assembled edge-by-edge in any order hashes identically.
//! The relator cache uses graph fingerprints to refuse replaying memoized
//! words against a different graph.
//!
//! # Citations
//! - SHA-256: NIST FIPS 180-4 (2015)
//! - Domain separation & length prefixing: Bernstein et al., "How to hash
//!   into elliptic curves" (2009)

use crate::core::{AmbientSet, Generator, Vertex};
use crate::graph::SimpleGraph;
use crate::word::Word;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Domain tag for graph fingerprints.
pub const DOMAIN_GRAPH_V0: &[u8] = b"GRAPH_V0";
/// Domain tag for generator fingerprints.
pub const DOMAIN_GEN_V0: &[u8] = b"GEN_V0";
/// Domain tag for word fingerprints.
pub const DOMAIN_WORD_V0: &[u8] = b"WORD_V0";

/// A 256-bit hash value.
///
/// Wraps a byte array for type safety.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HashValue(pub [u8; 32]);

impl HashValue {
    /// Creates a zero hash (all zeros).
    #[inline]
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Creates a hash from a raw byte array.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw byte array.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Computes SHA-256 of the given data with domain separation.
    ///
    /// The digest input is `b"RLT:" || domain || b":v1" || len_le64 || data`,
    /// where the length prefix is a 64-bit little-endian byte count.
    pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"RLT:");
        hasher.update(domain);
        hasher.update(b":v1");
        let len = data.len() as u64;
        hasher.update(len.to_le_bytes());
        hasher.update(data);
        Self(hasher.finalize().into())
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Show first 4 bytes in hex for readability
        write!(
            f,
            "HashValue({:02x}{:02x}{:02x}{:02x}…)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Types with a deterministic canonical byte representation.
pub trait Canonicalizable {
    /// Serialize to canonical bytes.
    fn to_canonical_bytes(&self) -> Vec<u8>;

    /// Compute the domain-separated hash of the canonical bytes.
    fn fingerprint(&self, domain: &[u8]) -> HashValue {
        HashValue::hash_with_domain(domain, &self.to_canonical_bytes())
    }
}

impl Canonicalizable for Vertex {
    fn to_canonical_bytes(&self) -> Vec<u8> {
        self.as_u32().to_le_bytes().to_vec()
    }
}

impl Canonicalizable for AmbientSet {
    /// Length prefix followed by the sorted labels.
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + 4 * self.len());
        out.extend_from_slice(&(self.len() as u64).to_le_bytes());
        for v in self.iter() {
            out.extend_from_slice(&v.as_u32().to_le_bytes());
        }
        out
    }
}

impl Canonicalizable for Generator {
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = self.elem().to_canonical_bytes();
        out.extend_from_slice(&self.ambient().to_canonical_bytes());
        out.push(self.is_inverted() as u8);
        out
    }
}

impl Canonicalizable for Word {
    /// Letter count followed by each letter's (self-delimiting) bytes.
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.len() as u64).to_le_bytes());
        for letter in self.letters() {
            out.extend_from_slice(&letter.to_canonical_bytes());
        }
        out
    }
}

impl Canonicalizable for SimpleGraph {
    /// Sorted vertex list, then the sorted list of edges as `(a, b)` pairs
    /// with `a < b`. Independent of insertion order by construction.
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let vertices = self.vertices_sorted();
        let mut edges: Vec<(Vertex, Vertex)> = Vec::new();
        for &a in &vertices {
            for b in self.neighbors_sorted(a) {
                if a < b {
                    edges.push((a, b));
                }
            }
        }
        edges.sort();

        let mut out = Vec::with_capacity(16 + 4 * vertices.len() + 8 * edges.len());
        out.extend_from_slice(&(vertices.len() as u64).to_le_bytes());
        for v in &vertices {
            out.extend_from_slice(&v.as_u32().to_le_bytes());
        }
        out.extend_from_slice(&(edges.len() as u64).to_le_bytes());
        for (a, b) in &edges {
            out.extend_from_slice(&a.as_u32().to_le_bytes());
            out.extend_from_slice(&b.as_u32().to_le_bytes());
        }
        out
    }
}

/// Fingerprint of a graph under [`DOMAIN_GRAPH_V0`].
pub fn graph_fingerprint(graph: &SimpleGraph) -> HashValue {
    graph.fingerprint(DOMAIN_GRAPH_V0)
}
