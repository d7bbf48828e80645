//! LabelMap - Per-pixel region labels
//!
//! `LabelMap` is a 2D array of `u32` labels with the same geometry as the
//! image it was computed from. Label `0` means "unlabeled"; region labels
//! start at `1`.
//!
//! See [`serial`] for serialization support.
//!
//! # Examples
//!
//! ```
//! use seedseg_core::LabelMap;
//!
//! let mut labels = LabelMap::new(4, 3);
//! assert_eq!(labels.get_label(2, 1), Some(0));
//!
//! labels.set_label(2, 1, 7).unwrap();
//! assert_eq!(labels.get_label(2, 1), Some(7));
//! assert_eq!(labels.max_label(), 7);
//! ```

pub mod serial;

use crate::error::{Error, Result};

/// Label grid
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The label at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Label data (row-major, no padding)
    data: Vec<u32>,
}

impl LabelMap {
    /// Create a new LabelMap with every cell unlabeled (0).
    ///
    /// Zero width or height gives an empty map.
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        LabelMap {
            width,
            height,
            data: vec![0u32; size],
        }
    }

    /// Create a LabelMap from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "label data length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(LabelMap {
            width,
            height,
            data,
        })
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the map has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get the label at (x, y), or `None` if out of bounds.
    pub fn get_label(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.index(x, y)])
    }

    /// Set the label at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinates are outside the map.
    pub fn set_label(&mut self, x: u32, y: u32, label: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x.min(self.width), y.min(self.height)),
                len: self.data.len(),
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = label;
        Ok(())
    }

    /// Get the label at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get_label_unchecked(&self, x: u32, y: u32) -> u32 {
        self.data[self.index(x, y)]
    }

    /// Set the label at (x, y) without bounds checking
    #[inline]
    pub fn set_label_unchecked(&mut self, x: u32, y: u32, label: u32) {
        let idx = self.index(x, y);
        self.data[idx] = label;
    }

    /// Get raw access to the label data
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Get mutable raw access to the label data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Get one row of labels
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u32] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Reset every cell to unlabeled.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Largest label present, 0 for an empty or fully unlabeled map.
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Number of cells still holding label 0.
    pub fn count_unlabeled(&self) -> usize {
        self.data.iter().filter(|&&l| l == 0).count()
    }
}
