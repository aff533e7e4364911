//! Valet - an embeddable dynamically-typed value runtime
//!
//! Valet models a small closed set of value kinds - nothing, booleans,
//! numbers, texts, lists and tables - behind one uniform operation surface.
//! Asking a value for an operation its kind does not support fails with a
//! typed error instead of being dispatched blindly. Lists are growable
//! sequences; tables are open-addressing hash tables that accept any value
//! as a key, because comparison and hashing share one content-based
//! contract.
//!
//! # Example
//! ```
//! use valet::{Context, Value};
//!
//! let ctx = Context::new();
//! let (value, consumed) = ctx.parse("\"hello\"").unwrap();
//! assert_eq!(value, Value::text("hello"));
//! assert_eq!(consumed, 7);
//!
//! let mut table = valet::Table::new();
//! table.insert(Value::text("greeting"), value).unwrap();
//! assert_eq!(
//!     table.get(&Value::text("greeting")).unwrap(),
//!     &Value::text("hello"),
//! );
//! ```

// Core modules
pub mod context;
pub mod error;
pub mod value;

// Container support
pub mod runtime;

// Literal scanners
mod parse;

// Re-export main types
pub use context::{Context, Op, OpSet, TypeInfo};
pub use error::{Error, Result};
pub use runtime::list::List;
pub use runtime::table::Table;
pub use value::{Kind, Value, ValueOrdering};
