//! Catalog loading and normalization for card files.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
