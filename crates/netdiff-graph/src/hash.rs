use netdiff_core::{AttrValue, Attrs};
use sha2::{Digest, Sha256};

use crate::graph::AttrGraph;

/// Computes a structural hash of the graph and all of its attributes.
///
/// Nodes and edges are sorted before hashing so the digest does not depend on
/// insertion order; undirected edges are normalised to `(min, max)`.
/// Floats are hashed by bit pattern.
pub fn canonical_hash(graph: &AttrGraph) -> String {
    let mut hasher = Sha256::new();
    if graph.is_directed() {
        hasher.update(b"directed");
    } else {
        hasher.update(b"undirected");
    }

    let mut nodes: Vec<_> = graph.nodes_with_attrs().collect();
    nodes.sort_by(|a, b| a.0.cmp(b.0));
    hasher.update((nodes.len() as u64).to_le_bytes());
    for (id, attrs) in nodes {
        update_str(id.as_str(), &mut hasher);
        update_attrs(attrs, &mut hasher);
    }

    let mut edges: Vec<_> = graph
        .edges()
        .map(|(source, target, attrs)| {
            if !graph.is_directed() && target < source {
                (target, source, attrs)
            } else {
                (source, target, attrs)
            }
        })
        .collect();
    edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    hasher.update((edges.len() as u64).to_le_bytes());
    for (source, target, attrs) in edges {
        update_str(source.as_str(), &mut hasher);
        update_str(target.as_str(), &mut hasher);
        update_attrs(attrs, &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn update_attrs(attrs: &Attrs, hasher: &mut Sha256) {
    hasher.update((attrs.len() as u64).to_le_bytes());
    for (key, value) in attrs {
        update_str(key, hasher);
        match value {
            AttrValue::Bool(flag) => {
                hasher.update(b"b");
                hasher.update([u8::from(*flag)]);
            }
            AttrValue::Int(v) => {
                hasher.update(b"i");
                hasher.update(v.to_le_bytes());
            }
            AttrValue::Float(v) => {
                hasher.update(b"f");
                hasher.update(v.to_bits().to_le_bytes());
            }
            AttrValue::Point([x, y]) => {
                hasher.update(b"p");
                hasher.update(x.to_bits().to_le_bytes());
                hasher.update(y.to_bits().to_le_bytes());
            }
            AttrValue::Text(text) => {
                hasher.update(b"s");
                update_str(text, hasher);
            }
        }
    }
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
