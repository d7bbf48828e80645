//! Seed-fill labeling of color images
//!
//! Implements connected component labeling by color-similarity region
//! growing, after M. E. Celebi, "A Simple and Efficient Algorithm for
//! Connected Component Labeling in Color Images".
//!
//! Pixels are scanned in row-major order. Each pixel that is still
//! unlabeled starts a new region: it becomes the region's seed, and the
//! region grows through an explicit frontier, admitting every unlabeled
//! neighbor whose color lies within `threshold` of the *seed* color.
//! Once the frontier drains the scan resumes.
//!
//! Every pixel enters the frontier at most once, so labeling runs in
//! O(width * height) time. The frontier lives on the heap and is bounded
//! by the image size, never by call-stack depth.
//!
//! The frontier order (FIFO or LIFO) only changes the traversal shape
//! inside a region. Membership depends on the seed-relative distance test
//! alone, so both orders produce the same label map.

use crate::connectivity::ConnectivityType;
use crate::distance::ColorDistance;
use crate::error::{RegionError, RegionResult};
use log::{debug, trace};
use seedseg_core::{LabelMap, Pix};
use std::collections::VecDeque;

/// Default similarity threshold.
pub const DEFAULT_THRESHOLD: f64 = 20.0;

/// Order in which frontier pixels are expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierOrder {
    /// Queue: breadth-first growth
    #[default]
    Fifo,
    /// Stack: depth-first growth
    Lifo,
}

impl FrontierOrder {
    #[inline]
    fn pop(self, frontier: &mut VecDeque<(u32, u32)>) -> Option<(u32, u32)> {
        match self {
            FrontierOrder::Fifo => frontier.pop_front(),
            FrontierOrder::Lifo => frontier.pop_back(),
        }
    }
}

/// Options for seed-fill labeling
#[derive(Debug, Clone, PartialEq)]
pub struct SeedFillOptions {
    /// Maximum color distance between a pixel and its region's seed
    pub threshold: f64,
    /// Connectivity type (4-way or 8-way)
    pub connectivity: ConnectivityType,
    /// Color distance metric
    pub distance: ColorDistance,
    /// Frontier expansion order
    pub frontier: FrontierOrder,
}

impl Default for SeedFillOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            connectivity: ConnectivityType::FourWay,
            distance: ColorDistance::Euclidean,
            frontier: FrontierOrder::Fifo,
        }
    }
}

impl SeedFillOptions {
    /// Create new options with the specified threshold
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the color distance metric
    pub fn with_distance(mut self, distance: ColorDistance) -> Self {
        self.distance = distance;
        self
    }

    /// Set the frontier order
    pub fn with_frontier(mut self, frontier: FrontierOrder) -> Self {
        self.frontier = frontier;
        self
    }

    /// Check the options
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidThreshold`] if the threshold is
    /// negative, NaN or infinite. Negative values are not clamped.
    pub fn validate(&self) -> RegionResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RegionError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Result of seed-fill labeling
#[derive(Debug, Clone, PartialEq)]
pub struct SeedFillLabels {
    /// Label of every pixel, in `1..=max_label`
    pub labels: LabelMap,
    /// Number of regions found
    pub max_label: u32,
    /// Seed pixel of each region, indexed by `label - 1`
    pub seeds: Vec<(u32, u32)>,
}

impl SeedFillLabels {
    /// Seed pixel of `label`, or `None` if no such region exists.
    pub fn seed(&self, label: u32) -> Option<(u32, u32)> {
        let idx = label.checked_sub(1)? as usize;
        self.seeds.get(idx).copied()
    }

    /// Split into the label map and the region count.
    pub fn into_parts(self) -> (LabelMap, u32) {
        (self.labels, self.max_label)
    }
}

/// Label color-homogeneous connected regions by seed fill
///
/// # Arguments
///
/// * `pix` - Input image of any depth; 32 bpp images use 3 or 4 channels
///   according to their spp
/// * `options` - Threshold, connectivity, distance metric and frontier order
///
/// # Returns
///
/// The label map, the number of regions and each region's seed. An image
/// with zero width or height yields an empty map and `max_label == 0`.
///
/// # Errors
///
/// Returns [`RegionError::InvalidThreshold`] for a negative or non-finite
/// threshold.
///
/// # Examples
///
/// ```
/// use seedseg_core::{Pix, PixelDepth};
/// use seedseg_region::{SeedFillOptions, seedfill_segmentation};
///
/// let mut pm = Pix::new(3, 1, PixelDepth::Bit8).unwrap().to_mut();
/// pm.set_pixel(1, 0, 10).unwrap();
/// pm.set_pixel(2, 0, 255).unwrap();
/// let pix: Pix = pm.into();
///
/// let result = seedfill_segmentation(&pix, &SeedFillOptions::new(15.0)).unwrap();
/// assert_eq!(result.max_label, 2);
/// assert_eq!(result.labels.row(0), &[1, 1, 2]);
/// ```
pub fn seedfill_segmentation(pix: &Pix, options: &SeedFillOptions) -> RegionResult<SeedFillLabels> {
    options.validate()?;

    let width = pix.width();
    let height = pix.height();
    let mut labels = LabelMap::new(width, height);
    let mut seeds = Vec::new();

    if pix.is_empty() {
        debug!("seedfill: empty {}x{} image, nothing to label", width, height);
        return Ok(SeedFillLabels {
            labels,
            max_label: 0,
            seeds,
        });
    }

    let threshold = options.threshold;
    let metric = options.distance;
    let offsets = options.connectivity.offsets();
    let mut frontier: VecDeque<(u32, u32)> = VecDeque::new();
    let mut max_label = 0u32;

    for y in 0..height {
        for x in 0..width {
            if labels.get_label_unchecked(x, y) != 0 {
                continue;
            }

            max_label = max_label.checked_add(1).ok_or_else(|| {
                RegionError::InvalidParameters("region count exceeds u32::MAX".to_string())
            })?;
            labels.set_label_unchecked(x, y, max_label);
            seeds.push((x, y));
            let seed_color = pix.get_channels_unchecked(x, y);
            let mut area = 1usize;

            frontier.push_back((x, y));
            while let Some((cx, cy)) = options.frontier.pop(&mut frontier) {
                for &(dx, dy) in offsets {
                    let (Some(nx), Some(ny)) = (cx.checked_add_signed(dx), cy.checked_add_signed(dy))
                    else {
                        continue;
                    };
                    if nx >= width || ny >= height || labels.get_label_unchecked(nx, ny) != 0 {
                        continue;
                    }
                    let color = pix.get_channels_unchecked(nx, ny);
                    if metric.within(&color, &seed_color, threshold) {
                        labels.set_label_unchecked(nx, ny, max_label);
                        frontier.push_back((nx, ny));
                        area += 1;
                    }
                }
            }

            trace!("seedfill: region {} seeded at ({}, {}), {} pixels", max_label, x, y, area);
        }
    }

    debug!(
        "seedfill: {}x{} image, {} channel(s), threshold {}: {} regions",
        width,
        height,
        pix.num_channels(),
        threshold,
        max_label
    );

    Ok(SeedFillLabels {
        labels,
        max_label,
        seeds,
    })
}

/// Seed-fill labeling with default connectivity, metric and frontier
pub fn seedfill_segmentation_simple(pix: &Pix, threshold: f64) -> RegionResult<SeedFillLabels> {
    seedfill_segmentation(pix, &SeedFillOptions::new(threshold))
}

/// Count color regions without keeping the label map
pub fn pix_count_color_regions(pix: &Pix, options: &SeedFillOptions) -> RegionResult<u32> {
    seedfill_segmentation(pix, options).map(|result| result.max_label)
}
