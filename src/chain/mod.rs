use crate::entry;

/// One bucket's contents: an owned, singly linked sequence of entries
/// kept in insertion order.
///
/// Every node exclusively owns its successor, and the chain owns its head,
/// so dropping or rebuilding a chain can never leave a node shared or
/// dangling.
pub struct Chain {
    head: Option<Box<ChainNode>>,
    len: usize,
}

impl Chain {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends a new entry at the tail, preserving insertion order.
    ///
    /// Walks the ownership links to reach the tail; chains stay short while
    /// the table's resize policy is active.
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let tail = Box::new(ChainNode {
            entry: entry!(key, value),
            next: None,
        });

        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(tail);
        self.len += 1;
    }

    /// Removes the head entry and returns its value,
    /// or `None` if the chain is empty.
    pub fn shift(&mut self) -> Option<String> {
        self.pop_entry().map(|entry| entry.value)
    }

    /// Whether any entry's *value* equals `value`.
    ///
    /// A single pass from head to tail; terminates at the tail.
    pub fn contains(&self, value: &str) -> bool {
        self.iter().any(|entry| entry.value == value)
    }

    /// Consumes the chain and rebuilds a new one from every entry whose
    /// *key* satisfies `predicate`, in the original order.
    pub fn filter<P>(self, predicate: P) -> Chain
    where
        P: Fn(&str) -> bool,
    {
        let mut kept = Chain::new();
        for entry in self {
            if predicate(&entry.key) {
                kept.push(entry.key, entry.value);
            }
        }
        kept
    }

    /// Finds the entry stored under `key`, comparing key fields.
    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.iter().find(|entry| entry.key == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.iter_mut().find(|entry| entry.key == key)
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            current: self.head.as_deref(),
            len: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            len: self.len,
            current: self.head.as_deref_mut(),
        }
    }

    // [private]

    fn pop_entry(&mut self) -> Option<Entry> {
        match self.head.take() {
            None => None,
            Some(node) => {
                self.head = node.next;
                self.len -= 1;
                Some(node.entry)
            }
        }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Chain {
    fn drop(&mut self) {
        // Unlink before dropping each box so a long chain cannot
        // recurse through nested node drops
        let mut curr = self.head.take();
        while let Some(mut node) = curr {
            curr = node.next.take();
        }
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl IntoIterator for Chain {
    type Item = <IterOwn as Iterator>::Item;
    type IntoIter = IterOwn;

    fn into_iter(self) -> Self::IntoIter {
        IterOwn(self)
    }
}

struct ChainNode {
    entry: Entry,
    next: Option<Box<ChainNode>>,
}

/// A key/value pair owned by the chain node that holds it.
pub struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
}

impl Entry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}
impl Eq for Entry {}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {}>", self.key, self.value)
    }
}

// [iterators]

pub struct Iter<'a> {
    current: Option<&'a ChainNode>,
    len: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        match self.current.take() {
            None => None,
            Some(node) => {
                self.current = node.next.as_deref();
                Some(&node.entry)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

pub struct IterMut<'a> {
    current: Option<&'a mut ChainNode>,
    len: usize,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = &'a mut Entry;

    fn next(&mut self) -> Option<Self::Item> {
        match self.current.take() {
            None => None,
            Some(node) => {
                self.current = node.next.as_deref_mut();
                Some(&mut node.entry)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

pub struct IterOwn(Chain);

impl Iterator for IterOwn {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

#[cfg(test)]
mod tests {
    use super::Chain;
    use crate::entry;

    #[test]
    fn push_keeps_insertion_order() {
        let mut chain = Chain::new();

        for i in 0..10 {
            let k = format!("key{i}");
            let v = format!("value{i}");
            chain.push(k, v);
        }

        assert_eq!(chain.len(), 10);

        for (i, e) in chain.iter().enumerate() {
            let k = format!("key{i}");
            let v = format!("value{i}");
            assert_eq!(e, &entry!(k, v));
        }

        for (i, e) in chain.into_iter().enumerate() {
            let k = format!("key{i}");
            let v = format!("value{i}");
            assert_eq!(e, entry!(k, v));
        }
    }

    #[test]
    fn shift() {
        let mut chain = Chain::new();

        // Check empty chain behaves right
        assert!(chain.shift().is_none());

        chain.push("k1", "v1");
        chain.push("k2", "v2");
        chain.push("k3", "v3");

        // Head comes off first
        assert_eq!(chain.shift().as_deref(), Some("v1"));
        assert_eq!(chain.shift().as_deref(), Some("v2"));

        // Push some more just to make sure nothing's corrupted
        chain.push("k4", "v4");

        assert_eq!(chain.shift().as_deref(), Some("v3"));
        assert_eq!(chain.shift().as_deref(), Some("v4"));

        // Check exhaustion
        assert!(chain.shift().is_none());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn contains_scans_the_whole_chain() {
        let mut chain = Chain::new();
        assert!(!chain.contains("v1"));

        chain.push("k1", "v1");
        chain.push("k2", "v2");
        chain.push("k3", "v3");

        // Match at head, middle and tail
        assert!(chain.contains("v1"));
        assert!(chain.contains("v2"));
        assert!(chain.contains("v3"));
        assert!(!chain.contains("v4"));
        assert!(!chain.contains("k1"));
    }

    #[test]
    fn filter_rebuilds_in_order() {
        let mut chain = Chain::new();
        chain.push("keep1", "a");
        chain.push("drop", "b");
        chain.push("keep2", "c");
        chain.push("keep3", "d");

        let kept = chain.filter(|key| key != "drop");

        assert_eq!(kept.len(), 3);
        let entries: Vec<_> = kept.iter().collect();
        assert_eq!(entries[0], &entry!("keep1", "a"));
        assert_eq!(entries[1], &entry!("keep2", "c"));
        assert_eq!(entries[2], &entry!("keep3", "d"));
    }

    #[test]
    fn filter_can_empty_a_chain() {
        let mut chain = Chain::new();
        chain.push("k1", "v1");
        chain.push("k2", "v2");

        let kept = chain.filter(|_| false);
        assert!(kept.is_empty());
        assert_eq!(kept.len(), 0);
    }

    #[test]
    fn find_compares_key_fields() {
        let mut chain = Chain::new();
        chain.push("k1", "v1");
        chain.push("k2", "v2");

        assert_eq!(chain.find("k2"), Some(&entry!("k2", "v2")));
        assert_eq!(chain.find("v2"), None);

        let e = chain.find_mut("k1").unwrap();
        e.value = "patched".into();
        assert_eq!(chain.find("k1"), Some(&entry!("k1", "patched")));
    }
}
