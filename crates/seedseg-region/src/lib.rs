//! seedseg-region - Color region labeling
//!
//! This crate labels connected regions of similar color:
//!
//! - **Seed-fill labeling** - Region growing against each region's seed color
//! - **Connectivity and color distance** - 4/8-way neighborhoods, Euclidean,
//!   Manhattan and Chebyshev metrics
//! - **Label analysis** - Component sizes, bounds and statistics
//! - **Colorization** - Seeded pseudo-color rendering of label maps
//!
//! # Examples
//!
//! ## Labeling a color image
//!
//! ```
//! use seedseg_region::{ConnectivityType, SeedFillOptions, seedfill_segmentation};
//! use seedseg_core::{Pix, PixelDepth};
//!
//! let pix = Pix::new(8, 4, PixelDepth::Bit32).unwrap();
//! let mut pix_mut = pix.try_into_mut().unwrap();
//!
//! // Paint the right half red
//! for y in 0..4 {
//!     for x in 4..8 {
//!         pix_mut.set_rgb(x, y, 255, 0, 0).unwrap();
//!     }
//! }
//! let pix: Pix = pix_mut.into();
//!
//! let options = SeedFillOptions::new(10.0).with_connectivity(ConnectivityType::EightWay);
//! let result = seedfill_segmentation(&pix, &options).unwrap();
//! assert_eq!(result.max_label, 2);
//! assert_eq!(result.labels.get_label(7, 3), Some(2));
//! ```
//!
//! ## Measuring components
//!
//! ```
//! use seedseg_region::{get_component_sizes, seedfill_segmentation_simple};
//! use seedseg_core::{Pix, PixelDepth};
//!
//! let pix = Pix::new(5, 5, PixelDepth::Bit8).unwrap();
//! let result = seedfill_segmentation_simple(&pix, 0.0).unwrap();
//! assert_eq!(get_component_sizes(&result.labels), vec![25]);
//! ```

pub mod colorize;
pub mod connectivity;
pub mod distance;
pub mod error;
pub mod label;
pub mod seedfill;

// Re-export core types
pub use seedseg_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export neighborhood and metric types
pub use connectivity::ConnectivityType;
pub use distance::{Channels, ColorDistance};

// Re-export seedfill types and functions
pub use seedfill::{
    DEFAULT_THRESHOLD, FrontierOrder, SeedFillLabels, SeedFillOptions, pix_count_color_regions,
    seedfill_segmentation, seedfill_segmentation_simple,
};

// Re-export label types and functions
pub use label::{ComponentStats, get_component_bounds, get_component_sizes, get_component_stats};

// Re-export colorize functions
pub use colorize::{MIN_CHANNEL_VALUE, colorize_labels, random_label_colors};
