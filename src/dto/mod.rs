//! Wire-shape structs returned by the HTTP layer.

pub mod products;
pub mod responses;
