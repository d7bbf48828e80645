//! seedseg - Color region labeling for Rust
//!
//! Splits a raster image into connected regions of similar color by seed
//! fill: every region grows from its first pixel in scan order and admits
//! neighbors whose color stays within a threshold of that seed.
//!
//! # Overview
//!
//! - Image containers for 1 to 32 bpp gray, RGB and RGBA data
//! - Seed-fill labeling with 4/8-way connectivity and pluggable color metrics
//! - Component sizes, bounds and statistics
//! - Pseudo-color rendering and serialization of label maps
//!
//! # Example
//!
//! ```
//! use seedseg::{Pix, PixelDepth};
//! use seedseg::region::seedfill_segmentation_simple;
//!
//! let pix = Pix::new(64, 48, PixelDepth::Bit32).unwrap();
//! let result = seedfill_segmentation_simple(&pix, 20.0).unwrap();
//! assert_eq!(result.max_label, 1);
//! assert_eq!(result.labels.dimensions(), (64, 48));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use seedseg_core::*;

// Re-export the labeling crate as a module to avoid name conflicts
pub use seedseg_region as region;
