//! Open-addressing hash table keyed by values
//!
//! Linear probing with tombstones. Storage doubles once the load factor
//! would pass 2/3, and rehashing on growth drops accumulated tombstones.
//! Lookups compare by content, so any value kind can serve as a key.

use crate::error::{Error, Result};
use crate::value::Value;

/// Smallest bucket count a non-empty table allocates.
pub const MIN_CAPACITY: usize = 8;

#[derive(Clone)]
struct Entry {
    hash: u64,
    key: Value,
    value: Value,
}

#[derive(Clone)]
enum Bucket {
    Empty,
    Tombstone,
    Occupied(Entry),
}

enum Placement {
    Existing(usize),
    Open(usize),
}

/// An unordered key-to-value mapping over content-compared keys.
#[derive(Clone)]
pub struct Table {
    buckets: Vec<Bucket>,
    len: usize,
}

impl Table {
    /// Create an empty table with the minimum bucket count.
    pub fn new() -> Table {
        Table {
            buckets: vec![Bucket::Empty; MIN_CAPACITY],
            len: 0,
        }
    }

    /// Create an empty table with exactly `capacity` buckets.
    ///
    /// A zero-bucket table is legal; the first insert allocates.
    pub fn with_capacity(capacity: usize) -> Table {
        Table {
            buckets: vec![Bucket::Empty; capacity],
            len: 0,
        }
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets in the current storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Map `key` to `value`, replacing the value of an existing entry.
    ///
    /// The table grows first whenever the insert would push the load factor
    /// past 2/3, so the probe below always finds a slot.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<()> {
        if self.buckets.is_empty() || 3 * (self.len + 1) > 2 * self.buckets.len() {
            self.grow()?;
        }
        let hash = key.hash_code();
        match self.locate(hash, &key) {
            Placement::Existing(idx) => match &mut self.buckets[idx] {
                Bucket::Occupied(entry) => entry.value = value,
                _ => unreachable!("locate returned an occupied index without a live entry"),
            },
            Placement::Open(idx) => {
                self.buckets[idx] = Bucket::Occupied(Entry { hash, key, value });
                self.len += 1;
            }
        }
        Ok(())
    }

    /// Borrow the value mapped to `key`.
    pub fn get(&self, key: &Value) -> Result<&Value> {
        let idx = self.find(key.hash_code(), key).ok_or(Error::NotFound)?;
        match &self.buckets[idx] {
            Bucket::Occupied(entry) => Ok(&entry.value),
            _ => Err(Error::NotFound),
        }
    }

    /// Remove the entry for `key` and return its value.
    ///
    /// The vacated bucket becomes a tombstone so probe chains through it
    /// stay intact.
    pub fn remove(&mut self, key: &Value) -> Result<Value> {
        let idx = self.find(key.hash_code(), key).ok_or(Error::NotFound)?;
        match std::mem::replace(&mut self.buckets[idx], Bucket::Tombstone) {
            Bucket::Occupied(entry) => {
                self.len -= 1;
                Ok(entry.value)
            }
            _ => unreachable!("find returned an index without a live entry"),
        }
    }

    /// Whether an entry for `key` exists.
    pub fn contains(&self, key: &Value) -> bool {
        self.find(key.hash_code(), key).is_some()
    }

    /// Iterate over `(key, value)` pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.buckets.iter().filter_map(|bucket| match bucket {
            Bucket::Occupied(entry) => Some((&entry.key, &entry.value)),
            _ => None,
        })
    }

    /// Probe for the bucket holding `key`.
    ///
    /// Tombstones are stepped over; only a genuinely empty bucket ends the
    /// search, because the sought entry may live past any tombstone.
    fn find(&self, hash: u64, key: &Value) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        let cap = self.buckets.len();
        let mut idx = (hash % cap as u64) as usize;
        for _ in 0..cap {
            match &self.buckets[idx] {
                Bucket::Empty => return None,
                Bucket::Tombstone => {}
                Bucket::Occupied(entry) => {
                    if entry.hash == hash && entry.key.compare(key).is_equal() {
                        return Some(idx);
                    }
                }
            }
            idx = (idx + 1) % cap;
        }
        None
    }

    /// Probe for where `key` lives or should be placed.
    ///
    /// The whole chain up to the terminating empty bucket is scanned before
    /// a remembered tombstone is reused, so a key past a tombstone cannot be
    /// inserted twice.
    fn locate(&self, hash: u64, key: &Value) -> Placement {
        let cap = self.buckets.len();
        let mut reusable = None;
        let mut idx = (hash % cap as u64) as usize;
        for _ in 0..cap {
            match &self.buckets[idx] {
                Bucket::Empty => return Placement::Open(reusable.unwrap_or(idx)),
                Bucket::Tombstone => {
                    if reusable.is_none() {
                        reusable = Some(idx);
                    }
                }
                Bucket::Occupied(entry) => {
                    if entry.hash == hash && entry.key.compare(key).is_equal() {
                        return Placement::Existing(idx);
                    }
                }
            }
            idx = (idx + 1) % cap;
        }
        match reusable {
            Some(idx) => Placement::Open(idx),
            None => panic!("hash table probe found no open bucket; load factor invariant violated"),
        }
    }

    /// Double the bucket count and rehash every live entry.
    ///
    /// Entries keep their stored hashes; tombstones are not carried over.
    fn grow(&mut self) -> Result<()> {
        let doubled = self
            .buckets
            .len()
            .checked_mul(2)
            .ok_or(Error::AllocationFailure)?;
        let target = MIN_CAPACITY.max(doubled);
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(target)
            .map_err(|_| Error::AllocationFailure)?;
        fresh.resize(target, Bucket::Empty);
        for bucket in std::mem::replace(&mut self.buckets, fresh) {
            if let Bucket::Occupied(entry) = bucket {
                let mut idx = (entry.hash % target as u64) as usize;
                while !matches!(self.buckets[idx], Bucket::Empty) {
                    idx = (idx + 1) % target;
                }
                self.buckets[idx] = Bucket::Occupied(entry);
            }
        }
        Ok(())
    }
}

impl Default for Table {
    fn default() -> Table {
        Table::new()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Table) -> bool {
        self.len == other.len
            && self.iter().all(|(key, value)| {
                other
                    .get(key)
                    .is_ok_and(|found| value.compare(found).is_equal())
            })
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(len: {}, cap: {}) {}", self.len, self.buckets.len(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_table(range: std::ops::Range<u32>) -> Table {
        let mut table = Table::new();
        for i in range {
            table
                .insert(Value::number(i as f64), Value::number(i as f64))
                .unwrap();
        }
        table
    }

    #[test]
    fn test_new_starts_at_minimum_capacity() {
        let table = Table::new();
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.capacity(), MIN_CAPACITY);
    }

    #[test]
    fn test_insert_and_get() {
        let table = number_table(0..10);
        assert_eq!(table.len(), 10);
        for i in 0..10 {
            assert_eq!(
                table.get(&Value::number(i as f64)).unwrap(),
                &Value::number(i as f64)
            );
        }
        assert_eq!(table.get(&Value::number(11.0)), Err(Error::NotFound));
    }

    #[test]
    fn test_remove() {
        let mut table = number_table(0..10);
        for i in 0..10 {
            let removed = table.remove(&Value::number(i as f64)).unwrap();
            assert_eq!(removed, Value::number(i as f64));
        }
        assert!(table.is_empty());
        assert_eq!(table.remove(&Value::number(0.0)), Err(Error::NotFound));
    }

    #[test]
    fn test_duplicate_insert_replaces_value() {
        let mut table = Table::new();
        let key = Value::text("color");
        table.insert(key.clone(), Value::text("red")).unwrap();
        table.insert(key.clone(), Value::text("blue")).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&key).unwrap(), &Value::text("blue"));
    }

    #[test]
    fn test_growth_preserves_entries() {
        let table = number_table(0..100);
        assert_eq!(table.len(), 100);
        assert!(table.capacity() > MIN_CAPACITY);
        // load factor stays at or below 2/3
        assert!(3 * table.len() <= 2 * table.capacity());
        for i in 0..100 {
            assert!(table.contains(&Value::number(i as f64)));
        }
    }

    #[test]
    fn test_tombstones_keep_probe_chains_intact() {
        let mut table = number_table(0..200);
        let grown = table.capacity();
        for i in (0..200).step_by(2) {
            table.remove(&Value::number(i as f64)).unwrap();
        }
        assert_eq!(table.len(), 100);
        for i in (1..200).step_by(2) {
            assert!(table.contains(&Value::number(i as f64)));
        }
        // reinserts land in tombstoned buckets, not fresh storage
        for i in (0..200).step_by(2) {
            table
                .insert(Value::number(i as f64), Value::number(i as f64))
                .unwrap();
        }
        assert_eq!(table.len(), 200);
        assert_eq!(table.capacity(), grown);
        for i in 0..200 {
            assert!(table.contains(&Value::number(i as f64)));
        }
    }

    #[test]
    fn test_with_capacity_zero_allocates_on_first_insert() {
        let mut table = Table::with_capacity(0);
        assert_eq!(table.capacity(), 0);
        assert_eq!(table.get(&Value::number(1.0)), Err(Error::NotFound));
        table.insert(Value::number(1.0), Value::text("one")).unwrap();
        assert_eq!(table.capacity(), MIN_CAPACITY);
        assert_eq!(table.get(&Value::number(1.0)).unwrap(), &Value::text("one"));
    }

    #[test]
    fn test_composite_keys_compare_by_content() {
        let mut list_key = crate::runtime::list::List::new();
        list_key.push(Value::number(1.0)).unwrap();
        list_key.push(Value::number(2.0)).unwrap();

        let mut table = Table::new();
        table
            .insert(Value::List(list_key.clone()), Value::text("pair"))
            .unwrap();

        // a separately built but equal list retrieves the same entry
        let mut probe = crate::runtime::list::List::new();
        probe.push(Value::number(1.0)).unwrap();
        probe.push(Value::number(2.0)).unwrap();
        assert_eq!(
            table.get(&Value::List(probe)).unwrap(),
            &Value::text("pair")
        );
    }

    #[test]
    fn test_mixed_key_kinds() {
        let mut table = Table::new();
        table.insert(Value::Nothing, Value::number(0.0)).unwrap();
        table.insert(Value::boolean(true), Value::number(1.0)).unwrap();
        table.insert(Value::text("two"), Value::number(2.0)).unwrap();
        table.insert(Value::number(3.0), Value::number(3.0)).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(&Value::Nothing).unwrap(), &Value::number(0.0));
        assert_eq!(
            table.get(&Value::boolean(true)).unwrap(),
            &Value::number(1.0)
        );
        assert_eq!(table.get(&Value::text("two")).unwrap(), &Value::number(2.0));
    }

    #[test]
    fn test_signed_zero_keys_share_an_entry() {
        let mut table = Table::new();
        table.insert(Value::number(0.0), Value::text("plus")).unwrap();
        table.insert(Value::number(-0.0), Value::text("minus")).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&Value::number(0.0)).unwrap(), &Value::text("minus"));
    }

    #[test]
    fn test_eq_ignores_insertion_order() {
        let mut forward = Table::new();
        let mut backward = Table::new();
        for i in 0..20 {
            forward
                .insert(Value::number(i as f64), Value::number(i as f64))
                .unwrap();
        }
        for i in (0..20).rev() {
            backward
                .insert(Value::number(i as f64), Value::number(i as f64))
                .unwrap();
        }
        assert_eq!(forward, backward);
        backward.remove(&Value::number(7.0)).unwrap();
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_display_and_debug() {
        let mut table = Table::new();
        table.insert(Value::number(1.0), Value::text("one")).unwrap();
        assert_eq!(table.to_string(), "{1.0: \"one\"}");
        assert_eq!(format!("{:?}", table), "(len: 1, cap: 8) {1.0: \"one\"}");
        assert_eq!(Table::new().to_string(), "{}");
    }
}
