//! PDF merge operations.
//!
//! - [`concat`]: full merge, every page of every input in order
//! - [`half_page`]: top half of one document over the bottom half of another
//! - [`document`]: the output document both operations build into
//! - [`pages`]: page geometry and page tree lookups
//!
//! Most callers only need [`merge_all`], [`merge_half_pages`] or [`Merger`].

pub mod concat;
pub mod document;
pub mod half_page;
pub mod merger;
pub mod pages;

pub use merger::{MergeResult, MergeStatistics, Merger, merge_all, merge_half_pages};
