//! Leaf-path extraction from a classified schema tree
//!
//! Produces the ordered, deduplicated set of addressable destination
//! paths. Terminal marker keys truncate a branch at their parent, and the
//! first marker met at a nesting level settles that branch; list items
//! are visited under their parent's own path (no index segment).

use std::collections::HashSet;

use super::schema::{SchemaNode, TERMINAL_MARKERS};
use super::types::MetadataPath;

/// Extract every addressable leaf path of a schema tree
///
/// The result is stable across calls with identical input: child maps
/// iterate in key order and first-seen order is preserved through
/// deduplication.
pub fn leaf_paths(root: &SchemaNode) -> Vec<MetadataPath> {
    let mut raw = Vec::new();
    walk(root, &MetadataPath::new(), &mut raw);

    let mut seen = HashSet::new();
    raw.into_iter().filter(|path| seen.insert(path.clone())).collect()
}

fn walk(node: &SchemaNode, prefix: &MetadataPath, out: &mut Vec<MetadataPath>) {
    match node {
        SchemaNode::Container(children) => {
            for (key, child) in children {
                let path = prefix.child(key);
                match child {
                    SchemaNode::Container(_) | SchemaNode::List(_) => {
                        let mut sub = Vec::new();
                        walk(child, &path, &mut sub);
                        truncate_at_marker(sub, out);
                    }
                    _ => out.push(path),
                }
            }
        }
        SchemaNode::List(items) => {
            for item in items {
                match item {
                    SchemaNode::Container(_) => {
                        let mut sub = Vec::new();
                        walk(item, prefix, &mut sub);
                        truncate_at_marker(sub, out);
                    }
                    _ => out.push(prefix.clone()),
                }
            }
        }
        _ => {
            if !prefix.is_empty() {
                out.push(prefix.clone());
            }
        }
    }
}

/// Re-emit a child's paths, collapsing the branch to the marker's parent
/// at the first path that ends in a terminal marker
fn truncate_at_marker(sub: Vec<MetadataPath>, out: &mut Vec<MetadataPath>) {
    for path in sub {
        match path.last() {
            Some(segment) if TERMINAL_MARKERS.contains(&segment) => {
                out.push(path.parent());
                break;
            }
            _ => out.push(path),
        }
    }
}
