use serde_json::Value;
use std::collections::BTreeSet;

// Extended by copy on each descent, never shared between sibling branches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visited(BTreeSet<String>);

impl Visited {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pointer: &str) -> bool {
        self.0.contains(pointer)
    }

    pub fn with(&self, pointer: &str) -> Visited {
        let mut next = self.0.clone();
        next.insert(pointer.to_string());
        Visited(next)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn resolve<'a>(node: &'a Value, document: &'a Value, visited: Visited) -> &'a Value {
    resolve_tracked(node, document, visited).0
}

pub fn resolve_tracked<'a>(
    node: &'a Value,
    document: &'a Value,
    visited: Visited,
) -> (&'a Value, Visited) {
    let Value::Object(map) = node else {
        return (node, visited);
    };
    let Some(Value::String(reference)) = map.get("$ref") else {
        return (node, visited);
    };
    let Some(pointer) = reference.strip_prefix("#/") else {
        tracing::debug!(reference = %reference, "skipping reference outside the document");
        return (node, visited);
    };
    if visited.contains(reference) {
        tracing::debug!(reference = %reference, "pointer cycle, leaving node unresolved");
        return (node, visited);
    }
    let visited = visited.with(reference);
    match lookup(document, pointer) {
        Some(target) => resolve_tracked(target, document, visited),
        None => {
            tracing::debug!(reference = %reference, "unresolvable pointer");
            (node, visited)
        }
    }
}

fn lookup<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    pointer
        .split('/')
        .try_fold(document, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            _ => None,
        })
}
