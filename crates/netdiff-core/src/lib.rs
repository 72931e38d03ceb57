#![deny(missing_docs)]

//! Core data types shared by the netdiff crates: node identifiers, attribute
//! values, graph directedness, the canonical error type and the deterministic
//! RNG handle used by every stochastic rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod attrs;
pub mod errors;
pub mod rng;

pub use attrs::{AttrValue, Attrs};
pub use errors::{DiffusionError, ErrorInfo};
pub use rng::{derive_substream_seed, RngHandle};

/// Opaque identifier for a node in an attributed graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates an identifier from any string-like value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Whether a graph (or a model's view of it) is directed or undirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Directedness {
    /// Edges have an orientation (`'d'`).
    #[serde(rename = "d")]
    Directed,
    /// Edges are symmetric (`'u'`).
    #[serde(rename = "u")]
    Undirected,
}

impl Directedness {
    /// Returns the single-letter flag used in model descriptors.
    pub fn flag(&self) -> char {
        match self {
            Directedness::Directed => 'd',
            Directedness::Undirected => 'u',
        }
    }

    /// Returns true for [`Directedness::Directed`].
    pub fn is_directed(&self) -> bool {
        matches!(self, Directedness::Directed)
    }
}

impl FromStr for Directedness {
    type Err = DiffusionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "d" | "directed" => Ok(Directedness::Directed),
            "u" | "undirected" => Ok(Directedness::Undirected),
            other => Err(DiffusionError::Config(
                ErrorInfo::new("unknown-directedness", "expected 'd' or 'u'")
                    .with_context("value", other),
            )),
        }
    }
}
