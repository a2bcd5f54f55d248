//! Shared test utilities for the contour-mapper workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic image generators
//! - Numbered tile catalogs, in memory and on disk
//! - Buffer comparison macros
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{gradient_image, numbered_catalog};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro asserting two pixel buffers are identical, reporting the first
/// differing pixel.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_buffers_eq;
///
/// assert_buffers_eq!(rendered, expected);
/// ```
#[macro_export]
macro_rules! assert_buffers_eq {
    ($left:expr, $right:expr) => {{
        let left = &$left;
        let right = &$right;
        assert_eq!(left.width(), right.width(), "buffer widths differ");
        assert_eq!(left.height(), right.height(), "buffer heights differ");

        for y in 0..left.height() {
            for x in 0..left.width() {
                let l = left.pixel(x, y);
                let r = right.pixel(x, y);
                if l != r {
                    panic!(
                        "buffers differ at ({}, {}): left {:?}, right {:?}",
                        x, y, l, r
                    );
                }
            }
        }
    }};
}
