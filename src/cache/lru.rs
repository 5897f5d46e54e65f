//! LRU Map Module
//!
//! Key/value map that keeps its entries ordered by recency of use.

use std::collections::HashMap;

// == Node ==
/// A slot in the arena-backed doubly-linked list.
#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Map ==
/// Hash index over an arena-allocated doubly-linked list.
///
/// Entries are ordered where:
/// - Front (head) = Least recently used, next eviction candidate
/// - Back (tail) = Most recently used
///
/// Slot indices serve as pointers and freed slots are recycled through a
/// free list, so insert, touch, remove and pop are all O(1).
#[derive(Debug)]
pub struct LruMap<V> {
    slots: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<V> Default for LruMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LruMap<V> {
    // == Constructor ==
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates a new empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            index: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    // == Length ==
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is present without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Insert ==
    /// Inserts or replaces a value and marks the key as most recently used.
    ///
    /// Returns the previous value if the key was already present.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        if let Some(&idx) = self.index.get(&key) {
            let previous = self
                .slot_mut(idx)
                .map(|node| std::mem::replace(&mut node.value, value));
            self.unlink(idx);
            self.link_back(idx);
            return previous;
        }

        let node = Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.link_back(idx);
        self.index.insert(key, idx);
        None
    }

    // == Get ==
    /// Returns the value for `key` and marks it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.unlink(idx);
        self.link_back(idx);
        self.slot(idx).map(|node| &node.value)
    }

    // == Peek ==
    /// Returns the value for `key` without changing its recency.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.slot(idx).map(|node| &node.value)
    }

    // == Remove ==
    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.release(idx).map(|node| node.value)
    }

    // == Pop LRU ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the map is empty.
    pub fn pop_lru(&mut self) -> Option<(String, V)> {
        let idx = self.head?;
        let node = self.release(idx)?;
        self.index.remove(&node.key);
        Some((node.key, node.value))
    }

    // == Retain ==
    /// Removes every entry for which `keep` returns false.
    ///
    /// Surviving entries keep their relative order. Returns the number of
    /// entries removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str, &V) -> bool,
    {
        let doomed: Vec<String> = self
            .iter()
            .filter(|(key, value)| !keep(key, value))
            .map(|(key, _)| key.to_string())
            .collect();

        for key in &doomed {
            self.remove(key);
        }
        doomed.len()
    }

    // == Iter ==
    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            map: self,
            cursor: self.head,
        }
    }

    // == Internal Linking ==
    fn slot(&self, idx: usize) -> Option<&Node<V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, idx: usize) -> Option<&mut Node<V>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Detaches a node from its neighbours, leaving it in its slot.
    fn unlink(&mut self, idx: usize) {
        let Some((prev, next)) = self.slot(idx).map(|node| (node.prev, node.next)) else {
            return;
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.slot_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(node) = self.slot_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.slot_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Appends a detached node at the most recently used end.
    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.slot_mut(idx) {
            node.prev = old_tail;
            node.next = None;
        }

        match old_tail {
            Some(t) => {
                if let Some(node) = self.slot_mut(t) {
                    node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    /// Unlinks a node and returns its slot to the free list.
    ///
    /// The caller is responsible for the key index.
    fn release(&mut self, idx: usize) -> Option<Node<V>> {
        self.unlink(idx);
        let node = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);
        Some(node)
    }
}

// == Iterator ==
/// Iterator over an [`LruMap`] in recency order, oldest first.
pub struct Iter<'a, V> {
    map: &'a LruMap<V>,
    cursor: Option<usize>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.map.slot(self.cursor?)?;
        self.cursor = node.next;
        Some((node.key.as_str(), &node.value))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(map: &LruMap<u32>) -> Vec<String> {
        map.iter().map(|(k, _)| k.to_string()).collect()
    }

    fn filled(names: &[&str]) -> LruMap<u32> {
        let mut map = LruMap::new();
        for (i, name) in names.iter().enumerate() {
            map.insert(name.to_string(), i as u32);
        }
        map
    }

    #[test]
    fn test_lru_new() {
        let map: LruMap<u32> = LruMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert!(map.iter().next().is_none());
    }

    #[test]
    fn test_insert_orders_oldest_first() {
        let map = filled(&["key1", "key2", "key3"]);

        assert_eq!(map.len(), 3);
        assert_eq!(keys(&map), vec!["key1", "key2", "key3"]);
        assert_eq!(map.iter().next(), Some(("key1", &0)));
    }

    #[test]
    fn test_insert_existing_replaces_and_moves_to_back() {
        let mut map = filled(&["key1", "key2", "key3"]);

        let previous = map.insert("key1".to_string(), 42);

        assert_eq!(previous, Some(0));
        assert_eq!(map.len(), 3);
        assert_eq!(keys(&map), vec!["key2", "key3", "key1"]);
        assert_eq!(map.peek("key1"), Some(&42));
    }

    #[test]
    fn test_get_moves_to_back() {
        let mut map = filled(&["a", "b", "c"]);

        assert_eq!(map.get("a"), Some(&0));
        assert_eq!(keys(&map), vec!["b", "c", "a"]);

        // Already most recent: order unchanged
        assert_eq!(map.get("a"), Some(&0));
        assert_eq!(keys(&map), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_peek_does_not_reorder() {
        let mut map = filled(&["a", "b"]);

        assert_eq!(map.peek("a"), Some(&0));
        assert_eq!(map.pop_lru(), Some(("a".to_string(), 0)));
    }

    #[test]
    fn test_pop_lru_drains_in_order() {
        let mut map = filled(&["a", "b", "c"]);

        // touch(a), touch(c), touch(b) leaves a as oldest
        map.get("a");
        map.get("c");
        map.get("b");

        assert_eq!(map.pop_lru(), Some(("a".to_string(), 0)));
        assert_eq!(map.pop_lru(), Some(("c".to_string(), 2)));
        assert_eq!(map.pop_lru(), Some(("b".to_string(), 1)));
        assert_eq!(map.pop_lru(), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove_middle_head_and_tail() {
        let mut map = filled(&["a", "b", "c", "d"]);

        assert_eq!(map.remove("b"), Some(1));
        assert_eq!(keys(&map), vec!["a", "c", "d"]);

        assert_eq!(map.remove("a"), Some(0));
        assert_eq!(keys(&map), vec!["c", "d"]);

        assert_eq!(map.remove("d"), Some(3));
        assert_eq!(keys(&map), vec!["c"]);

        assert_eq!(map.remove("nonexistent"), None);
        assert!(!map.contains("b"));
        assert!(map.contains("c"));
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut map = LruMap::with_capacity(2);
        for round in 0..100u32 {
            map.insert(format!("k{}", round), round);
            if map.len() > 2 {
                map.pop_lru();
            }
        }

        assert_eq!(map.len(), 2);
        assert!(map.slots.len() <= 3);
        assert_eq!(keys(&map), vec!["k98", "k99"]);
    }

    #[test]
    fn test_retain_preserves_survivor_order() {
        let mut map = filled(&["a", "b", "c", "d", "e"]);
        map.get("b");

        let removed = map.retain(|_, value| value % 2 == 0);

        // Odd values were b (1) and d (3)
        assert_eq!(removed, 2);
        assert_eq!(keys(&map), vec!["a", "c", "e"]);

        map.insert("f".to_string(), 5);
        assert_eq!(keys(&map), vec!["a", "c", "e", "f"]);
    }

    #[test]
    fn test_single_entry_head_equals_tail() {
        let mut map = LruMap::new();
        map.insert("only".to_string(), 1u32);
        map.get("only");
        map.insert("only".to_string(), 2);

        assert_eq!(map.len(), 1);
        assert_eq!(map.pop_lru(), Some(("only".to_string(), 2)));
        assert!(map.is_empty());
        assert!(map.pop_lru().is_none());
    }
}
