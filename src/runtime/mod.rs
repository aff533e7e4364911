//! Runtime support
//!
//! Backing stores for the composite kinds:
//! - List storage (growable sequence)
//! - Table storage (open-addressing hash table)
//! - Text helpers (escape rendering, boundary-checked slicing)

pub mod list;
pub mod table;
pub(crate) mod text;

pub use list::List;
pub use table::Table;
