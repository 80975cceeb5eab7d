//! Pure feed pipeline for the blog client: ordering, search, pagination
//! and expansion state over a fetched batch of posts. Everything here is
//! synchronous; fetching lives in `feed-client`.

pub mod display;
pub mod expansion;
pub mod filter;
pub mod pagination;
pub mod post;
pub mod state;

pub use display::{format_relative_age, needs_truncation, truncate, TruncationPolicy};
pub use expansion::ExpansionTracker;
pub use filter::filter_posts;
pub use pagination::{page_slice, total_pages, DEFAULT_PAGE_SIZE};
pub use post::{order_by_published, Post};
pub use state::{EmptyReason, FeedState};
