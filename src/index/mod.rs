//! Value Index Module
//!
//! Reference-counting index: value → number of variables currently holding it.
//!
//! ## Responsibilities
//! - O(1) answer to "how many variables equal V" (never a table scan)
//! - Entries are deleted when their count reaches zero, never stored at 0
//!
//! The index is a derived view of the variable table. The Engine updates it
//! in the same transaction as every table mutation; it is never recomputed
//! by scanning.

mod counts;

pub use counts::ValueIndex;
