//! Data models
//!
//! Resources exposed by the reservation API. The client never holds an
//! authoritative copy; lists are reloaded after every mutation.
//! All IDs are opaque strings.

pub mod dining_table;
pub mod reservation;
pub mod restaurant;

// Re-exports
pub use dining_table::*;
pub use reservation::*;
pub use restaurant::*;
