use crate::error::SynthesisError;
use crate::flatten::flatten_ref;
use indexmap::{IndexMap, IndexSet};
use mirror_types::TypeRef;
use std::collections::VecDeque;

/// FIFO queue of declarations awaiting synthesis.
///
/// Every type is enqueued at most once: `known` remembers each flattened
/// name ever pushed together with the declaration it stands for, which also
/// exposes two declarations that flatten to the same identifier.
#[derive(Debug, Default)]
pub struct Worklist {
    queue: VecDeque<(String, TypeRef)>,
    known: IndexMap<String, TypeRef>,
    visited: IndexSet<String>,
}

impl Worklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue the declaration behind `type_ref` and return its mirror name.
    pub fn push(&mut self, type_ref: &TypeRef) -> Result<String, SynthesisError> {
        let origin = type_ref.origin();
        let flat = flatten_ref(&origin);

        match self.known.get(&flat) {
            Some(existing) if *existing != origin => Err(SynthesisError::NameCollision {
                flat,
                first: existing.qualified_name(),
                second: origin.qualified_name(),
            }),
            Some(_) => Ok(flat),
            None => {
                tracing::debug!(name = %flat, origin = %origin, "queued declaration");
                self.known.insert(flat.clone(), origin.clone());
                self.queue.push_back((flat.clone(), origin));
                Ok(flat)
            }
        }
    }

    pub fn pop(&mut self) -> Option<(String, TypeRef)> {
        while let Some((flat, type_ref)) = self.queue.pop_front() {
            if !self.visited.contains(&flat) {
                return Some((flat, type_ref));
            }
        }
        None
    }

    pub fn mark_visited(&mut self, flat: &str) {
        self.visited.insert(flat.to_string());
    }

    /// Mirror name of a declaration that has been pushed, if any.
    pub fn known_name(&self, type_ref: &TypeRef) -> Option<String> {
        let flat = flatten_ref(type_ref);
        match self.known.get(&flat) {
            Some(existing) if *existing == type_ref.origin() => Some(flat),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
