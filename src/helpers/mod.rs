//! Helper functions for building page fragments
//!
//! Dates, HTML escaping and links, pagination controls and sidebar lists.

mod date;
mod html;
mod list;
mod pagination;

pub use date::*;
pub use html::*;
pub use list::*;
pub use pagination::*;
