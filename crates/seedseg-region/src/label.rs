//! Label map analysis
//!
//! Per-component measurements over a [`LabelMap`]. Label `0` is treated as
//! unlabeled and ignored everywhere.
//!
//! [`get_component_sizes`] and [`get_component_bounds`] return dense vectors
//! indexed by `label - 1` and sized by the largest label present, so a label
//! with no cells reports a size of 0 and an empty box. Dense output is only
//! produced while the largest label does not exceed the number of cells,
//! which always holds for seed-fill output. Sparser maps fall back to one
//! entry per present label, in increasing label order.

use seedseg_core::{Box, LabelMap};
use std::collections::HashMap;

/// Whether a dense `label - 1` index fits in the map's own cell count
fn is_dense(labels: &LabelMap) -> bool {
    labels.max_label() as usize <= labels.len()
}

/// Get pixel count for each component
///
/// # Returns
///
/// A vector of pixel counts. The index corresponds to (label - 1) when the
/// labels are dense, see the module docs.
pub fn get_component_sizes(labels: &LabelMap) -> Vec<u32> {
    if !is_dense(labels) {
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for &label in labels.data() {
            if label > 0 {
                *counts.entry(label).or_insert(0) += 1;
            }
        }
        let mut label_counts: Vec<(u32, u32)> = counts.into_iter().collect();
        label_counts.sort_by_key(|(label, _)| *label);
        return label_counts.into_iter().map(|(_, count)| count).collect();
    }

    let mut sizes = vec![0u32; labels.max_label() as usize];
    for &label in labels.data() {
        if label > 0 {
            sizes[label as usize - 1] += 1;
        }
    }
    sizes
}

/// Inclusive corner accumulator.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl Extent {
    fn at(x: i32, y: i32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn add(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn to_box(self) -> Box {
        Box::from_inclusive_corners(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Get bounding boxes for all components
///
/// # Returns
///
/// A vector of bounding boxes. The index corresponds to (label - 1) when the
/// labels are dense, see the module docs.
pub fn get_component_bounds(labels: &LabelMap) -> Vec<Box> {
    if !is_dense(labels) {
        let mut extents: HashMap<u32, Extent> = HashMap::new();
        for y in 0..labels.height() {
            for (x, &label) in labels.row(y).iter().enumerate() {
                if label == 0 {
                    continue;
                }
                let (x, y) = (x as i32, y as i32);
                extents
                    .entry(label)
                    .or_insert_with(|| Extent::at(x, y))
                    .add(x, y);
            }
        }
        let mut label_bounds: Vec<(u32, Extent)> = extents.into_iter().collect();
        label_bounds.sort_by_key(|(label, _)| *label);
        return label_bounds
            .into_iter()
            .map(|(_, extent)| extent.to_box())
            .collect();
    }

    let mut extents: Vec<Option<Extent>> = vec![None; labels.max_label() as usize];

    for y in 0..labels.height() {
        for (x, &label) in labels.row(y).iter().enumerate() {
            if label == 0 {
                continue;
            }
            let (x, y) = (x as i32, y as i32);
            extents[label as usize - 1]
                .get_or_insert_with(|| Extent::at(x, y))
                .add(x, y);
        }
    }

    extents
        .into_iter()
        .map(|extent| extent.map(Extent::to_box).unwrap_or_default())
        .collect()
}

/// Component statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    /// Component label
    pub label: u32,
    /// Bounding box
    pub bounds: Box,
    /// Number of pixels
    pub pixel_count: u32,
    /// Centroid X coordinate
    pub centroid_x: f64,
    /// Centroid Y coordinate
    pub centroid_y: f64,
}

/// Get detailed statistics for all components
///
/// Only labels that own at least one cell are reported, in increasing
/// label order.
pub fn get_component_stats(labels: &LabelMap) -> Vec<ComponentStats> {
    struct Accum {
        count: u32,
        sum_x: u64,
        sum_y: u64,
        extent: Extent,
    }

    let mut accums: HashMap<u32, Accum> = HashMap::new();

    for y in 0..labels.height() {
        for (x, &label) in labels.row(y).iter().enumerate() {
            if label == 0 {
                continue;
            }
            let acc = accums.entry(label).or_insert_with(|| Accum {
                count: 0,
                sum_x: 0,
                sum_y: 0,
                extent: Extent::at(x as i32, y as i32),
            });
            acc.count += 1;
            acc.sum_x += x as u64;
            acc.sum_y += u64::from(y);
            acc.extent.add(x as i32, y as i32);
        }
    }

    let mut stats: Vec<ComponentStats> = accums
        .into_iter()
        .map(|(label, acc)| ComponentStats {
            label,
            bounds: acc.extent.to_box(),
            pixel_count: acc.count,
            centroid_x: acc.sum_x as f64 / f64::from(acc.count),
            centroid_y: acc.sum_y as f64 / f64::from(acc.count),
        })
        .collect();
    stats.sort_by_key(|s| s.label);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_map(width: u32, height: u32, data: &[u32]) -> LabelMap {
        LabelMap::from_data(width, height, data.to_vec()).unwrap()
    }

    #[test]
    fn test_get_component_sizes() {
        #[rustfmt::skip]
        let labels = label_map(4, 2, &[
            1, 1, 2, 2,
            3, 1, 2, 4,
        ]);
        assert_eq!(get_component_sizes(&labels), vec![3, 3, 1, 1]);
    }

    #[test]
    fn test_sizes_with_gaps_and_unlabeled() {
        let labels = label_map(3, 1, &[0, 3, 3]);
        assert_eq!(get_component_sizes(&labels), vec![0, 0, 2]);
    }

    #[test]
    fn test_get_component_bounds() {
        #[rustfmt::skip]
        let labels = label_map(4, 3, &[
            1, 1, 1, 2,
            2, 1, 2, 2,
            2, 2, 2, 2,
        ]);
        let bounds = get_component_bounds(&labels);
        assert_eq!(bounds.len(), 2);
        assert_eq!(bounds[0], Box::new_unchecked(0, 0, 3, 2));
        assert_eq!(bounds[1], Box::new_unchecked(0, 0, 4, 3));
    }

    #[test]
    fn test_bounds_missing_label_is_empty_box() {
        let labels = label_map(2, 1, &[2, 2]);
        let bounds = get_component_bounds(&labels);
        assert!(bounds[0].is_empty());
        assert_eq!(bounds[1], Box::new_unchecked(0, 0, 2, 1));
    }

    #[test]
    fn test_get_component_stats() {
        // L-shape for label 1, single pixel for label 3, label 2 absent
        #[rustfmt::skip]
        let labels = label_map(3, 2, &[
            1, 0, 1,
            0, 1, 3,
        ]);
        let stats = get_component_stats(&labels);
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].label, 1);
        assert_eq!(stats[0].pixel_count, 3);
        assert_eq!(stats[0].bounds, Box::new_unchecked(0, 0, 3, 2));
        assert!((stats[0].centroid_x - 1.0).abs() < 1e-9);
        assert!((stats[0].centroid_y - 1.0 / 3.0).abs() < 1e-9);

        assert_eq!(stats[1].label, 3);
        assert_eq!(stats[1].pixel_count, 1);
        assert_eq!(stats[1].centroid_x, 2.0);
        assert_eq!(stats[1].centroid_y, 1.0);
    }

    #[test]
    fn test_sparse_huge_label() {
        let labels = label_map(3, 1, &[1, 3_000_000_000, 1]);
        assert_eq!(get_component_sizes(&labels), vec![2, 1]);

        let bounds = get_component_bounds(&labels);
        assert_eq!(
            bounds,
            vec![Box::new_unchecked(0, 0, 3, 1), Box::new_unchecked(1, 0, 1, 1)]
        );

        let stats = get_component_stats(&labels);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].label, 1);
        assert_eq!(stats[1].label, 3_000_000_000);
        assert_eq!(stats[1].pixel_count, 1);
        assert_eq!(stats[1].centroid_x, 1.0);
    }

    #[test]
    fn test_dense_at_cell_count() {
        // Largest label equal to the cell count keeps the dense layout
        let labels = label_map(2, 1, &[2, 2]);
        assert_eq!(get_component_sizes(&labels), vec![0, 2]);
        assert_eq!(get_component_bounds(&labels).len(), 2);
    }

    #[test]
    fn test_empty_map() {
        let labels = LabelMap::new(0, 7);
        assert!(get_component_sizes(&labels).is_empty());
        assert!(get_component_bounds(&labels).is_empty());
        assert!(get_component_stats(&labels).is_empty());

        let unlabeled = LabelMap::new(3, 3);
        assert!(get_component_sizes(&unlabeled).is_empty());
        assert!(get_component_stats(&unlabeled).is_empty());
    }
}
