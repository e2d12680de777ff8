//! State module for tracking discovery progress
//!
//! # Components
//!
//! - `PageState`: whether a listing page is queued or already visited
//! - `Frontier`: the worklist and visited set owned by one discovery run

mod frontier;
mod page_state;

pub use frontier::Frontier;
pub use page_state::PageState;
