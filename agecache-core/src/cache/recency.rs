//! Recency ordering for cache keys
//!
//! Keys are kept in a circular doubly linked list stored inside a `HashMap`.
//! Each node names its neighbours by key rather than by pointer, so moving a
//! key to the front or dropping the tail is a handful of map lookups.
//!
//! The ends of the list point at themselves: the head's `toward_head` is the
//! head, the tail's `toward_tail` is the tail. A single key is a self-loop.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Link record for one tracked key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyNode<K> {
    /// Neighbour one step closer to the most recently used end
    pub toward_head: K,
    /// Neighbour one step closer to the least recently used end
    pub toward_tail: K,
    /// Time of the last touch
    pub last_touched: Instant,
}

/// Most-recently-used to least-recently-used ordering of keys
#[derive(Debug, Clone)]
pub struct RecencyIndex<K> {
    nodes: HashMap<K, RecencyNode<K>>,
    head: Option<K>,
    tail: Option<K>,
}

impl<K> Default for RecencyIndex<K> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            head: None,
            tail: None,
        }
    }
}

impl<K: Eq + Hash + Clone> RecencyIndex<K> {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with room for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Record that `key` was used at `at`, moving it to the head.
    pub fn touch(&mut self, key: K, at: Instant) {
        let (Some(head), Some(tail)) = (self.head.clone(), self.tail.clone()) else {
            self.nodes.insert(
                key.clone(),
                RecencyNode {
                    toward_head: key.clone(),
                    toward_tail: key.clone(),
                    last_touched: at,
                },
            );
            self.head = Some(key.clone());
            self.tail = Some(key);
            return;
        };

        if key == head {
            if let Some(node) = self.nodes.get_mut(&key) {
                node.last_touched = at;
            }
            return;
        }

        let links = self
            .nodes
            .get(&key)
            .map(|node| (node.toward_head.clone(), node.toward_tail.clone()));

        match links {
            // Fresh key, nothing to unlink
            None => {}
            Some((toward_head, _)) if key == tail => {
                if let Some(node) = self.nodes.get_mut(&toward_head) {
                    node.toward_tail = toward_head.clone();
                }
                self.tail = Some(toward_head);
            }
            Some((toward_head, toward_tail)) => {
                if let Some(node) = self.nodes.get_mut(&toward_head) {
                    node.toward_tail = toward_tail.clone();
                }
                if let Some(node) = self.nodes.get_mut(&toward_tail) {
                    node.toward_head = toward_head;
                }
            }
        }

        self.push_head(key, head, at);
    }

    /// Link `key` in front of `old_head`. `key` must already be unlinked.
    fn push_head(&mut self, key: K, old_head: K, at: Instant) {
        if let Some(node) = self.nodes.get_mut(&old_head) {
            node.toward_head = key.clone();
        }
        self.nodes.insert(
            key.clone(),
            RecencyNode {
                toward_head: key.clone(),
                toward_tail: old_head,
                last_touched: at,
            },
        );
        self.head = Some(key);
    }

    /// Remove and return the least recently used key.
    ///
    /// Returns `None` and leaves the index untouched when it is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let oldest = self.tail.take()?;

        match self.nodes.remove(&oldest) {
            Some(node) if !self.nodes.is_empty() => {
                let new_tail = node.toward_head;
                if let Some(new_tail_node) = self.nodes.get_mut(&new_tail) {
                    new_tail_node.toward_tail = new_tail.clone();
                }
                self.tail = Some(new_tail);
            }
            _ => self.head = None,
        }

        Some(oldest)
    }

    /// Time elapsed between the oldest touch and `now`; zero when empty.
    pub fn age_since(&self, now: Instant) -> Duration {
        self.tail
            .as_ref()
            .and_then(|tail| self.nodes.get(tail))
            .map(|node| now.saturating_duration_since(node.last_touched))
            .unwrap_or(Duration::ZERO)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    /// Most recently used key
    pub fn head(&self) -> Option<&K> {
        self.head.as_ref()
    }

    /// Least recently used key
    pub fn tail(&self) -> Option<&K> {
        self.tail.as_ref()
    }

    pub fn node(&self, key: &K) -> Option<&RecencyNode<K>> {
        self.nodes.get(key)
    }

    pub fn last_touched(&self, key: &K) -> Option<Instant> {
        self.nodes.get(key).map(|node| node.last_touched)
    }

    /// Walk from head to tail, collecting keys with their touch times.
    ///
    /// The walk is capped at `len()` steps so a corrupted chain cannot loop.
    pub fn entries_by_recency(&self) -> Vec<(K, Instant)> {
        let mut entries = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.head.clone();

        while let Some(key) = cursor {
            if entries.len() == self.nodes.len() {
                break;
            }
            let Some(node) = self.nodes.get(&key) else {
                break;
            };
            cursor = (node.toward_tail != key).then(|| node.toward_tail.clone());
            entries.push((key, node.last_touched));
        }

        entries
    }

    /// Head to tail key order
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.entries_by_recency()
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }
}
