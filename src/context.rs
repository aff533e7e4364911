//! Type registry and parse dispatch
//!
//! The Context owns one descriptor per kind: which operations the kind
//! supports and how its literals parse. It is constructed explicitly and
//! passed where needed; there is no global registry.

use crate::error::{Error, Result};
use crate::parse;
use crate::value::{Kind, Value};

/// Every operation a value can be asked to perform.
///
/// `Call` is reserved along with the `Function` kind; no current kind
/// supports it.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Compare = 0,
    Print,
    Parse,
    Len,
    Cap,
    Insert,
    Get,
    Slice,
    Remove,
    Add,
    Sub,
    Mul,
    Div,
    Not,
    And,
    Or,
    Truthiness,
    Call,
}

impl Op {
    /// Lowercase operation name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Op::Compare => "compare",
            Op::Print => "print",
            Op::Parse => "parse",
            Op::Len => "len",
            Op::Cap => "cap",
            Op::Insert => "insert",
            Op::Get => "get",
            Op::Slice => "slice",
            Op::Remove => "remove",
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::Div => "div",
            Op::Not => "not",
            Op::And => "and",
            Op::Or => "or",
            Op::Truthiness => "truthiness",
            Op::Call => "call",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of operations, one bit per [`Op`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpSet(u32);

impl OpSet {
    /// The set supporting nothing.
    pub const EMPTY: OpSet = OpSet(0);

    /// Build a set from a list of operations.
    pub const fn of(ops: &[Op]) -> OpSet {
        let mut mask = 0u32;
        let mut i = 0;
        while i < ops.len() {
            mask |= 1 << ops[i] as u32;
            i += 1;
        }
        OpSet(mask)
    }

    /// Whether `op` is in the set.
    #[inline]
    pub const fn contains(self, op: Op) -> bool {
        self.0 & (1 << op as u32) != 0
    }
}

const NOTHING_OPS: OpSet = OpSet::of(&[Op::Compare, Op::Print, Op::Parse]);
const BOOLEAN_OPS: OpSet = OpSet::of(&[
    Op::Compare,
    Op::Print,
    Op::Parse,
    Op::Not,
    Op::And,
    Op::Or,
    Op::Truthiness,
]);
const NUMBER_OPS: OpSet = OpSet::of(&[
    Op::Compare,
    Op::Print,
    Op::Parse,
    Op::Add,
    Op::Sub,
    Op::Mul,
    Op::Div,
]);
const TEXT_OPS: OpSet = OpSet::of(&[Op::Compare, Op::Print, Op::Parse, Op::Len, Op::Slice]);
const LIST_OPS: OpSet = OpSet::of(&[
    Op::Compare,
    Op::Print,
    Op::Len,
    Op::Cap,
    Op::Insert,
    Op::Get,
    Op::Slice,
    Op::Remove,
]);
const TABLE_OPS: OpSet = OpSet::of(&[Op::Compare, Op::Print, Op::Len, Op::Cap]);

/// Descriptor for one kind: its identity and supported operations.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    kind: Kind,
    ops: OpSet,
}

impl TypeInfo {
    /// The kind this descriptor describes.
    #[inline]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// The kind's diagnostic name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Whether the kind supports `op`, without performing it.
    #[inline]
    pub const fn supports(&self, op: Op) -> bool {
        self.ops.contains(op)
    }
}

/// The registry of kind descriptors and the entry point for parsing.
pub struct Context {
    types: [TypeInfo; Kind::COUNT],
}

impl Context {
    /// Create a context with descriptors for every kind.
    ///
    /// The reserved `Function` and `Custom` kinds are registered with empty
    /// capability sets.
    pub fn new() -> Context {
        Context {
            types: [
                TypeInfo { kind: Kind::Nothing, ops: NOTHING_OPS },
                TypeInfo { kind: Kind::Boolean, ops: BOOLEAN_OPS },
                TypeInfo { kind: Kind::Number, ops: NUMBER_OPS },
                TypeInfo { kind: Kind::Text, ops: TEXT_OPS },
                TypeInfo { kind: Kind::List, ops: LIST_OPS },
                TypeInfo { kind: Kind::Table, ops: TABLE_OPS },
                TypeInfo { kind: Kind::Function, ops: OpSet::EMPTY },
                TypeInfo { kind: Kind::Custom, ops: OpSet::EMPTY },
            ],
        }
    }

    /// The descriptor for `kind`.
    #[inline]
    pub fn type_info(&self, kind: Kind) -> &TypeInfo {
        &self.types[kind as usize]
    }

    /// Whether `kind` supports `op`.
    #[inline]
    pub fn supports(&self, kind: Kind, op: Op) -> bool {
        self.type_info(kind).supports(op)
    }

    /// Parse a literal of a specific kind from the front of `input`.
    ///
    /// # Returns
    /// The parsed value and the number of bytes consumed. Trailing input is
    /// left for the caller.
    pub fn parse_as(&self, kind: Kind, input: &str) -> Result<(Value, usize)> {
        match kind {
            Kind::Nothing => parse::nothing(input),
            Kind::Boolean => parse::boolean(input),
            Kind::Number => parse::number(input),
            Kind::Text => parse::text(input),
            _ => Err(Error::Unsupported {
                kind,
                op: Op::Parse,
            }),
        }
    }

    /// Parse a literal of any parseable kind, detected from its first
    /// characters: `"` starts a text, the keywords start their kinds, and
    /// anything else is tried as a number.
    pub fn parse(&self, input: &str) -> Result<(Value, usize)> {
        if input.starts_with('"') {
            parse::text(input)
        } else if input.starts_with("null") {
            parse::nothing(input)
        } else if input.starts_with("true") || input.starts_with("false") {
            parse::boolean(input)
        } else {
            parse::number(input)
        }
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::new()
    }
}
