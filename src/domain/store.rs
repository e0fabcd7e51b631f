use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::domain::entities::Keyed;
use crate::domain::error::{DomainError, DomainResult};

/// Node of the search tree, living in the store's arena.
#[derive(Debug)]
pub struct StoreNode<T> {
    /// Ordering key, captured from the entry at insertion
    pub key: String,
    /// The stored record, never inspected beyond its key
    pub entry: T,
    /// Subtree with keys strictly less than `key`
    pub left: Option<Index>,
    /// Subtree with keys greater than or equal to `key`
    pub right: Option<Index>,
}

impl<T> StoreNode<T> {
    fn new(key: String, entry: T) -> Self {
        Self {
            key,
            entry,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Observable lifecycle of a store. There is no way back to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Empty,
    Populated,
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreState::Empty => write!(f, "empty"),
            StoreState::Populated => write!(f, "populated"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Unbalanced binary search tree over keyed entries.
///
/// Nodes live in a generational arena and refer to their children by index,
/// so ownership stays with the store and there are no back-references.
/// The shape is purely a function of insertion order: no rebalancing happens,
/// and sorted input degenerates into a chain. Both insertion and traversal are
/// iterative, so such a chain costs time but never stack.
///
/// Equal keys always descend right. Entries with equal keys therefore come out
/// adjacent to each other, but their relative order is not part of the contract.
#[derive(Debug)]
pub struct OrderedEntryStore<T> {
    /// Arena storage for all nodes
    arena: Arena<StoreNode<T>>,
    /// Index of the root node, None for an empty store
    root: Option<Index>,
}

impl<T> Default for OrderedEntryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> OrderedEntryStore<T> {
    /// Inserts an entry and returns the index of its new node.
    ///
    /// Keys are compared with plain `str` ordering: byte-wise, case-sensitive,
    /// no locale. Fails with [`DomainError::InvalidEntry`] when the entry has no
    /// key; the store is left untouched in that case.
    #[instrument(level = "trace", skip(self, entry))]
    pub fn insert(&mut self, entry: T) -> DomainResult<Index> {
        let key = entry.key().ok_or_else(DomainError::missing_key)?.to_owned();

        let Some(mut current) = self.root else {
            let idx = self.arena.insert(StoreNode::new(key, entry));
            self.root = Some(idx);
            trace!("inserted root");
            return Ok(idx);
        };

        let mut depth = 1usize;
        let (parent, side) = loop {
            let node = &self.arena[current];
            let (next, side) = if key.as_str() < node.key.as_str() {
                (node.left, Side::Left)
            } else {
                (node.right, Side::Right)
            };
            match next {
                Some(child) => {
                    current = child;
                    depth += 1;
                }
                None => break (current, side),
            }
        };

        let idx = self.arena.insert(StoreNode::new(key, entry));
        let parent_node = &mut self.arena[parent];
        match side {
            Side::Left => parent_node.left = Some(idx),
            Side::Right => parent_node.right = Some(idx),
        }
        trace!(depth, ?side, "attached node");
        Ok(idx)
    }

    /// Builds a store from a batch of entries, inserted in iteration order.
    ///
    /// The first entry without a key aborts the load.
    #[instrument(level = "debug", skip(entries))]
    pub fn from_entries<I>(entries: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut store = Self::new();
        for (position, entry) in entries.into_iter().enumerate() {
            store.insert(entry).map_err(|e| match e {
                DomainError::InvalidEntry { reason } => DomainError::InvalidEntry {
                    reason: format!("record {}: {}", position + 1, reason),
                },
            })?;
        }
        debug!(len = store.len(), height = store.height(), "bulk load complete");
        Ok(store)
    }
}

impl<T> OrderedEntryStore<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn state(&self) -> StoreState {
        if self.is_empty() {
            StoreState::Empty
        } else {
            StoreState::Populated
        }
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&StoreNode<T>> {
        self.arena.get(idx)
    }

    /// In-order walk over `(index, node)` pairs.
    pub fn iter_nodes(&self) -> InOrderIterator<'_, T> {
        InOrderIterator::new(self)
    }

    /// Entries in non-decreasing key order.
    pub fn iter(&self) -> Entries<'_, T> {
        Entries {
            inner: self.iter_nodes(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter_nodes().map(|(_, node)| node.key.as_str())
    }

    /// Collects the in-order traversal.
    ///
    /// Repeated calls on an unchanged store return the same sequence; an empty
    /// store yields an empty one.
    #[instrument(level = "debug", skip(self))]
    pub fn produce_ordered(&self) -> Vec<&T> {
        let ordered: Vec<&T> = self.iter().collect();
        debug!(count = ordered.len(), "produced ordered sequence");
        ordered
    }

    /// Callback form of the in-order traversal.
    pub fn in_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        for entry in self.iter() {
            visit(entry);
        }
    }

    /// Number of levels, 0 for an empty store.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, level)) = stack.pop() {
            height = height.max(level);
            let node = &self.arena[idx];
            stack.extend(node.left.map(|l| (l, level + 1)));
            stack.extend(node.right.map(|r| (r, level + 1)));
        }
        height
    }
}

impl<'a, T> IntoIterator for &'a OrderedEntryStore<T> {
    type Item = &'a T;
    type IntoIter = Entries<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Explicit-stack in-order traversal, O(height) extra space.
pub struct InOrderIterator<'a, T> {
    store: &'a OrderedEntryStore<T>,
    stack: Vec<Index>,
    current: Option<Index>,
    remaining: usize,
}

impl<'a, T> InOrderIterator<'a, T> {
    fn new(store: &'a OrderedEntryStore<T>) -> Self {
        Self {
            store,
            stack: Vec::new(),
            current: store.root(),
            remaining: store.len(),
        }
    }
}

impl<'a, T> Iterator for InOrderIterator<'a, T> {
    type Item = (Index, &'a StoreNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        // Descend to the leftmost unvisited node
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = store.arena[idx].left;
        }
        let idx = self.stack.pop()?;
        let node = &store.arena[idx];
        self.current = node.right;
        self.remaining -= 1;
        Some((idx, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for InOrderIterator<'_, T> {}

/// In-order iterator over the stored entries.
pub struct Entries<'a, T> {
    inner: InOrderIterator<'a, T>,
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, node)| &node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Entries<'_, T> {}
