//! Client-side query over the fetched user list.
//!
//! Everything here works on plain data and has no I/O, so it can be unit
//! tested without a terminal or a network.
//!
//! # Types
//!
//! - [`TextFilter`] - Case-insensitive substring match on name or email
//! - [`SortMode`] - Unsorted, ascending or descending by name
//! - [`Page`] - One page of the derived list with pagination info
//! - [`TransformCache`] - Memoized filter + sort keyed on its inputs

mod filter;
mod order;
mod page;
mod transform;

pub use filter::TextFilter;
pub use order::compare_names;
pub use order::SortMode;
pub use page::page_count;
pub use page::paginate;
pub use page::Page;
pub use page::PAGE_SIZE;
pub use transform::transform;
pub use transform::TransformCache;
