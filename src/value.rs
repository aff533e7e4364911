//! Runtime value representation
//!
//! Value is a closed set of variants sharing one uniform operation surface.
//! Operations a variant does not support fail with a typed error instead of
//! being dispatched blindly, and comparison/hashing share one content-based
//! contract so any value can key a table.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hasher;

use crate::context::Op;
use crate::error::{Error, Result};
use crate::runtime::list::List;
use crate::runtime::table::Table;
use crate::runtime::text;

/// The closed set of value kinds.
///
/// `Function` and `Custom` are reserved: they have descriptors and names but
/// no constructible payload and no supported operations.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Nothing = 0,
    Boolean,
    Number,
    Text,
    List,
    Table,
    Function,
    Custom,
}

impl Kind {
    /// Number of kinds, reserved ones included.
    pub const COUNT: usize = 8;

    /// Lowercase kind name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Nothing => "nothing",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::Text => "text",
            Kind::List => "list",
            Kind::Table => "table",
            Kind::Function => "function",
            Kind::Custom => "custom",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of comparing two values.
///
/// `Identical` means the two references are the same object; `Equal` means
/// distinct objects with the same content. Only Numbers and Texts order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrdering {
    Identical,
    Equal,
    Less,
    Greater,
    Unordered,
}

impl ValueOrdering {
    /// Whether the outcome means both operands hold the same content.
    #[inline]
    pub const fn is_equal(self) -> bool {
        matches!(self, ValueOrdering::Identical | ValueOrdering::Equal)
    }
}

/// A dynamically-typed runtime value.
///
/// Composite variants own their payloads outright; dropping a value drops
/// everything it contains.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nothing,
    Boolean(bool),
    Number(f64),
    Text(String),
    List(List),
    Table(Table),
}

impl Value {
    // Constructors

    /// Create the absent value.
    #[inline]
    pub const fn nothing() -> Value {
        Value::Nothing
    }

    /// Create a boolean value.
    #[inline]
    pub const fn boolean(b: bool) -> Value {
        Value::Boolean(b)
    }

    /// Create a number value.
    #[inline]
    pub const fn number(n: f64) -> Value {
        Value::Number(n)
    }

    /// Create a text value.
    #[inline]
    pub fn text(content: impl Into<String>) -> Value {
        Value::Text(content.into())
    }

    /// Wrap a list.
    #[inline]
    pub fn list(list: List) -> Value {
        Value::List(list)
    }

    /// Wrap a table.
    #[inline]
    pub fn table(table: Table) -> Value {
        Value::Table(table)
    }

    // Type checking

    /// The kind of this value.
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Nothing => Kind::Nothing,
            Value::Boolean(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::Text(_) => Kind::Text,
            Value::List(_) => Kind::List,
            Value::Table(_) => Kind::Table,
        }
    }

    #[inline]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    #[inline]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    pub const fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    #[inline]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[inline]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    // Payload extraction

    /// Get the boolean payload, `None` if not a boolean.
    #[inline]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the number payload, `None` if not a number.
    #[inline]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the text payload, `None` if not a text.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Borrow the list payload, `None` if not a list.
    #[inline]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Mutably borrow the list payload, `None` if not a list.
    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Borrow the table payload, `None` if not a table.
    #[inline]
    pub const fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Mutably borrow the table payload, `None` if not a table.
    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    // Comparison and hashing

    /// Compare two values. Total: every pairing has an outcome.
    ///
    /// The same referent compares `Identical` before any content is looked
    /// at. Numbers and Texts order; Booleans, Lists and Tables only answer
    /// equal or not; everything else, NaN pairings included, is `Unordered`.
    pub fn compare(&self, other: &Value) -> ValueOrdering {
        if std::ptr::eq(self, other) {
            return ValueOrdering::Identical;
        }
        match (self, other) {
            (Value::Nothing, Value::Nothing) => ValueOrdering::Equal,
            (Value::Boolean(a), Value::Boolean(b)) => {
                if a == b {
                    ValueOrdering::Equal
                } else {
                    ValueOrdering::Unordered
                }
            }
            (Value::Number(a), Value::Number(b)) => match a.partial_cmp(b) {
                Some(Ordering::Less) => ValueOrdering::Less,
                Some(Ordering::Equal) => ValueOrdering::Equal,
                Some(Ordering::Greater) => ValueOrdering::Greater,
                None => ValueOrdering::Unordered,
            },
            (Value::Text(a), Value::Text(b)) => match a.cmp(b) {
                Ordering::Less => ValueOrdering::Less,
                Ordering::Equal => ValueOrdering::Equal,
                Ordering::Greater => ValueOrdering::Greater,
            },
            (Value::List(a), Value::List(b)) => {
                if a == b {
                    ValueOrdering::Equal
                } else {
                    ValueOrdering::Unordered
                }
            }
            (Value::Table(a), Value::Table(b)) => {
                if a == b {
                    ValueOrdering::Equal
                } else {
                    ValueOrdering::Unordered
                }
            }
            _ => ValueOrdering::Unordered,
        }
    }

    /// Content hash, coherent with [`compare`](Value::compare): values that
    /// compare equal hash equal.
    ///
    /// Recursive over composites. Table entries are folded with a wrapping
    /// sum, so two tables holding the same entries hash equal regardless of
    /// insertion order. `-0.0` hashes as `0.0` and every NaN hashes to one
    /// canonical value.
    pub fn hash_code(&self) -> u64 {
        let mut hasher = ahash::AHasher::default();
        self.hash_into(&mut hasher);
        hasher.finish()
    }

    fn hash_into(&self, hasher: &mut ahash::AHasher) {
        hasher.write_u8(self.kind() as u8);
        match self {
            Value::Nothing => {}
            Value::Boolean(b) => hasher.write_u8(*b as u8),
            Value::Number(n) => hasher.write_u64(canonical_number_bits(*n)),
            Value::Text(t) => {
                hasher.write_usize(t.len());
                hasher.write(t.as_bytes());
            }
            Value::List(list) => {
                hasher.write_usize(list.len());
                for item in list.iter() {
                    hasher.write_u64(item.hash_code());
                }
            }
            Value::Table(table) => {
                hasher.write_usize(table.len());
                hasher.write_u64(table_content_hash(table));
            }
        }
    }

    // Arithmetic (numbers)

    /// Add two numbers into a new number.
    pub fn add(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_operands(other, Op::Add)?;
        Ok(Value::Number(a + b))
    }

    /// Subtract `other` from `self` into a new number.
    pub fn sub(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_operands(other, Op::Sub)?;
        Ok(Value::Number(a - b))
    }

    /// Multiply two numbers into a new number.
    pub fn mul(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_operands(other, Op::Mul)?;
        Ok(Value::Number(a * b))
    }

    /// Divide `self` by `other` into a new number.
    ///
    /// A zero divisor is refused rather than producing an infinity.
    pub fn div(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_operands(other, Op::Div)?;
        if b == 0.0 {
            return Err(Error::InvalidArgument("division by zero"));
        }
        Ok(Value::Number(a / b))
    }

    fn numeric_operands(&self, other: &Value, op: Op) -> Result<(f64, f64)> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            (Value::Number(_), _) => Err(Error::InvalidArgument(
                "arithmetic operand must be a number",
            )),
            _ => Err(Error::Unsupported {
                kind: self.kind(),
                op,
            }),
        }
    }

    // Boolean logic

    /// Logical negation.
    pub fn not(&self) -> Result<bool> {
        Ok(!self.boolean_operand(Op::Not)?)
    }

    /// Logical conjunction with another boolean.
    pub fn and(&self, other: &Value) -> Result<bool> {
        let a = self.boolean_operand(Op::And)?;
        match other {
            Value::Boolean(b) => Ok(a && *b),
            _ => Err(Error::InvalidArgument("logic operand must be a boolean")),
        }
    }

    /// Logical disjunction with another boolean.
    pub fn or(&self, other: &Value) -> Result<bool> {
        let a = self.boolean_operand(Op::Or)?;
        match other {
            Value::Boolean(b) => Ok(a || *b),
            _ => Err(Error::InvalidArgument("logic operand must be a boolean")),
        }
    }

    /// The truth of a boolean. Only booleans answer; no other variant is
    /// coerced.
    pub fn truthiness(&self) -> Result<bool> {
        self.boolean_operand(Op::Truthiness)
    }

    fn boolean_operand(&self, op: Op) -> Result<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(Error::Unsupported {
                kind: self.kind(),
                op,
            }),
        }
    }

    // Container dispatch

    /// Element count for containers, byte length for text.
    pub fn len(&self) -> Result<usize> {
        match self {
            Value::Text(t) => Ok(t.len()),
            Value::List(list) => Ok(list.len()),
            Value::Table(table) => Ok(table.len()),
            _ => Err(Error::Unsupported {
                kind: self.kind(),
                op: Op::Len,
            }),
        }
    }

    /// Allocated capacity of a list or table.
    pub fn capacity(&self) -> Result<usize> {
        match self {
            Value::List(list) => Ok(list.capacity()),
            Value::Table(table) => Ok(table.capacity()),
            _ => Err(Error::Unsupported {
                kind: self.kind(),
                op: Op::Cap,
            }),
        }
    }

    /// Copy the half-open range `[start, end)` of a text or list into a new
    /// value of the same kind.
    pub fn slice(&self, start: usize, end: usize) -> Result<Value> {
        match self {
            Value::Text(t) => Ok(Value::Text(text::slice(t, start, end)?.to_string())),
            Value::List(list) => Ok(Value::List(list.slice(start, end)?)),
            _ => Err(Error::Unsupported {
                kind: self.kind(),
                op: Op::Slice,
            }),
        }
    }

    /// Insert into a list at `index`, taking ownership of `value`.
    pub fn insert(&mut self, index: usize, value: Value) -> Result<()> {
        match self {
            Value::List(list) => list.insert(index, value),
            _ => Err(Error::Unsupported {
                kind: self.kind(),
                op: Op::Insert,
            }),
        }
    }

    /// Borrow a list element by index.
    pub fn get(&self, index: usize) -> Result<&Value> {
        match self {
            Value::List(list) => list.get(index),
            _ => Err(Error::Unsupported {
                kind: self.kind(),
                op: Op::Get,
            }),
        }
    }

    /// Remove a list element by index, returning ownership.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        match self {
            Value::List(list) => list.remove(index),
            _ => Err(Error::Unsupported {
                kind: self.kind(),
                op: Op::Remove,
            }),
        }
    }

    // Output

    /// Write the canonical textual form to any byte sink.
    pub fn write_to<W: std::io::Write>(&self, sink: &mut W, newline: bool) -> std::io::Result<()> {
        if newline {
            writeln!(sink, "{}", self)
        } else {
            write!(sink, "{}", self)
        }
    }
}

impl Default for Value {
    fn default() -> Value {
        Value::Nothing
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => f.write_str("null"),
            Value::Boolean(true) => f.write_str("true"),
            Value::Boolean(false) => f.write_str("false"),
            Value::Number(n) => {
                let mut buffer = ryu::Buffer::new();
                f.write_str(buffer.format(*n))
            }
            Value::Text(t) => text::escape_into(f, t),
            Value::List(list) => write!(f, "{}", list),
            Value::Table(table) => write!(f, "{}", table),
        }
    }
}

fn canonical_number_bits(n: f64) -> u64 {
    if n == 0.0 {
        // collapses -0.0, which compares equal to 0.0
        0.0f64.to_bits()
    } else if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

fn table_content_hash(table: &Table) -> u64 {
    let mut sum: u64 = 0;
    for (key, value) in table.iter() {
        let mut pair = ahash::AHasher::default();
        pair.write_u64(key.hash_code());
        pair.write_u64(value.hash_code());
        sum = sum.wrapping_add(pair.finish());
    }
    sum
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Value {
        Value::List(list)
    }
}

impl From<Table> for Value {
    fn from(table: Table) -> Value {
        Value::Table(table)
    }
}
