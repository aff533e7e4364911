//! Growable ordered sequence of values
//!
//! Backs the list kind. Storage doubles when full, never below
//! [`MIN_CAPACITY`], and every growth path reports allocation failure
//! instead of aborting.

use crate::error::{Error, Result};
use crate::value::Value;

/// Smallest capacity a non-empty list allocates.
pub const MIN_CAPACITY: usize = 8;

/// An ordered, index-addressed sequence of values.
#[derive(Clone, PartialEq)]
pub struct List {
    items: Vec<Value>,
}

impl List {
    /// Create an empty list. No storage is allocated until the first insert.
    pub const fn new() -> List {
        List { items: Vec::new() }
    }

    /// Create an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> List {
        List {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements the current storage can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Insert `value` at `index`, shifting later elements up.
    ///
    /// `index` may equal the current length, which appends. The list grows
    /// before the insert when its storage is full.
    pub fn insert(&mut self, index: usize, value: Value) -> Result<()> {
        if index > self.items.len() {
            return Err(Error::OutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        self.grow_if_full()?;
        self.items.insert(index, value);
        Ok(())
    }

    /// Append `value` at the end.
    pub fn push(&mut self, value: Value) -> Result<()> {
        self.insert(self.items.len(), value)
    }

    /// Remove and return the last element, if any.
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }

    /// Borrow the element at `index`.
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.items.get(index).ok_or(Error::OutOfBounds {
            index,
            len: self.items.len(),
        })
    }

    /// Remove and return the element at `index`, shifting later elements down.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        if index >= self.items.len() {
            return Err(Error::OutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Resize the storage to hold exactly `capacity` elements.
    ///
    /// Fails when `capacity` is below the current length.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity < self.items.len() {
            return Err(Error::InvalidArgument("capacity below current length"));
        }
        if capacity <= self.items.capacity() {
            self.items.shrink_to(capacity);
        } else {
            self.items
                .try_reserve_exact(capacity - self.items.len())
                .map_err(|_| Error::AllocationFailure)?;
        }
        Ok(())
    }

    /// Copy the half-open range `[start, end)` into a new list.
    pub fn slice(&self, start: usize, end: usize) -> Result<List> {
        if start > end {
            return Err(Error::InvalidArgument("slice start exceeds end"));
        }
        if end > self.items.len() {
            return Err(Error::OutOfBounds {
                index: end,
                len: self.items.len(),
            });
        }
        Ok(List {
            items: self.items[start..end].to_vec(),
        })
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    fn grow_if_full(&mut self) -> Result<()> {
        if self.items.len() < self.items.capacity() {
            return Ok(());
        }
        let target = if self.items.capacity() == 0 {
            MIN_CAPACITY
        } else {
            self.items
                .capacity()
                .checked_mul(2)
                .ok_or(Error::AllocationFailure)?
        };
        self.items
            .try_reserve_exact(target - self.items.len())
            .map_err(|_| Error::AllocationFailure)
    }
}

impl Default for List {
    fn default() -> List {
        List::new()
    }
}

impl std::fmt::Display for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

impl std::fmt::Debug for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(len: {}, cap: {}) {}",
            self.items.len(),
            self.items.capacity(),
            self
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_list(values: &[f64]) -> List {
        let mut list = List::new();
        for &n in values {
            list.push(Value::number(n)).unwrap();
        }
        list
    }

    #[test]
    fn test_front_inserts_reverse_order() {
        let mut list = List::new();
        for i in 0..10 {
            list.insert(0, Value::number(i as f64)).unwrap();
        }
        assert_eq!(list.len(), 10);
        for i in 0..10 {
            assert_eq!(list.get(i).unwrap(), &Value::number((9 - i) as f64));
        }
    }

    #[test]
    fn test_back_inserts_keep_order() {
        let mut list = List::new();
        for i in 0..10 {
            list.insert(list.len(), Value::number(i as f64)).unwrap();
        }
        for i in 0..10 {
            assert_eq!(list.get(i).unwrap(), &Value::number(i as f64));
        }
    }

    #[test]
    fn test_insert_past_len_fails() {
        let mut list = number_list(&[1.0, 2.0]);
        assert_eq!(
            list.insert(3, Value::number(9.0)),
            Err(Error::OutOfBounds { index: 3, len: 2 })
        );
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_get_and_remove_bounds() {
        let mut list = number_list(&[1.0, 2.0, 3.0]);
        assert_eq!(list.get(3), Err(Error::OutOfBounds { index: 3, len: 3 }));
        assert_eq!(list.remove(1).unwrap(), Value::number(2.0));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap(), &Value::number(3.0));
        assert_eq!(
            list.remove(2),
            Err(Error::OutOfBounds { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_growth_doubles_from_minimum() {
        let mut list = List::new();
        assert_eq!(list.capacity(), 0);
        list.push(Value::number(0.0)).unwrap();
        assert_eq!(list.capacity(), MIN_CAPACITY);
        for i in 1..9 {
            list.push(Value::number(i as f64)).unwrap();
        }
        assert_eq!(list.capacity(), MIN_CAPACITY * 2);
        assert_eq!(list.len(), 9);
    }

    #[test]
    fn test_set_capacity() {
        let mut list = number_list(&[1.0, 2.0, 3.0]);
        list.set_capacity(32).unwrap();
        assert!(list.capacity() >= 32);
        list.set_capacity(3).unwrap();
        assert_eq!(list.capacity(), 3);
        assert_eq!(
            list.set_capacity(2),
            Err(Error::InvalidArgument("capacity below current length"))
        );
    }

    #[test]
    fn test_slice() {
        let list = number_list(&[0.0, 1.0, 2.0, 3.0]);
        let mid = list.slice(1, 3).unwrap();
        assert_eq!(mid.len(), 2);
        assert_eq!(mid.get(0).unwrap(), &Value::number(1.0));
        assert_eq!(mid.get(1).unwrap(), &Value::number(2.0));
        assert!(list.slice(4, 4).unwrap().is_empty());
        assert!(matches!(list.slice(3, 2), Err(Error::InvalidArgument(_))));
        assert_eq!(
            list.slice(0, 5),
            Err(Error::OutOfBounds { index: 5, len: 4 })
        );
    }

    #[test]
    fn test_pop() {
        let mut list = number_list(&[1.0, 2.0]);
        assert_eq!(list.pop(), Some(Value::number(2.0)));
        assert_eq!(list.pop(), Some(Value::number(1.0)));
        assert_eq!(list.pop(), None);
    }

    #[test]
    fn test_display_and_debug() {
        let list = number_list(&[1.0, 2.0]);
        assert_eq!(list.to_string(), "[1.0, 2.0]");
        assert_eq!(format!("{:?}", list), "(len: 2, cap: 8) [1.0, 2.0]");
        assert_eq!(List::new().to_string(), "[]");
    }
}
