//! Roster user directory library
//!
//! Fetches a list of users from a JSON endpoint and derives the filtered,
//! sorted and paginated view a table front-end displays.

pub mod error;
pub mod model;
pub mod query;
pub mod source;
pub mod table;

mod client;
#[cfg(test)]
mod fixtures;

pub use client::*;
