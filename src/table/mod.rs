//! Variable Table Module
//!
//! The primary store: variable name → current value.
//!
//! ## Responsibilities
//! - Point lookups, unconditional upserts, unconditional deletes
//! - Many concurrent readers, exclusive writers (internal RwLock)
//!
//! The table has no transactional behavior of its own; composite consistency
//! with the value index and the command log is the Engine's responsibility.

mod vars;

pub use vars::VariableTable;
