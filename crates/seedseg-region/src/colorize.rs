//! Label colorization
//!
//! Renders a [`LabelMap`] as an RGB image so regions can be inspected by
//! eye. Each label gets a pseudo-random color drawn from a seeded
//! generator, so the same seed always gives the same palette.

use crate::error::{RegionError, RegionResult};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seedseg_core::{LabelMap, Pix, PixelDepth, color};

/// Smallest channel value in a generated palette.
///
/// Keeps every region visibly distinct from the black background.
pub const MIN_CHANNEL_VALUE: u8 = 16;

/// Generate one color per label
///
/// Entry `i` is the color of label `i + 1`. Each channel is uniform in
/// `[MIN_CHANNEL_VALUE, 255]`.
pub fn random_label_colors(max_label: u32, seed: u64) -> Vec<(u8, u8, u8)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..max_label)
        .map(|_| {
            (
                rng.random_range(MIN_CHANNEL_VALUE..=u8::MAX),
                rng.random_range(MIN_CHANNEL_VALUE..=u8::MAX),
                rng.random_range(MIN_CHANNEL_VALUE..=u8::MAX),
            )
        })
        .collect()
}

/// Paint every cell with the color of its label
///
/// # Arguments
///
/// * `labels` - Label map, labels in `0..=max_label`
/// * `max_label` - Number of regions
/// * `seed` - Palette seed, see [`random_label_colors`]
///
/// # Returns
///
/// A 32 bpp RGB image of the same size. Label 0 is painted black.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if a cell holds a label
/// greater than `max_label`.
pub fn colorize_labels(labels: &LabelMap, max_label: u32, seed: u64) -> RegionResult<Pix> {
    let (width, height) = labels.dimensions();
    let palette = random_label_colors(max_label, seed);

    let mut out = Pix::new(width, height, PixelDepth::Bit32)?
        .try_into_mut()
        .unwrap_or_else(|p| p.to_mut());

    for y in 0..height {
        let row = labels.row(y);
        let line = out.row_data_mut(y);
        for (word, &label) in line.iter_mut().zip(row) {
            *word = match label {
                0 => color::compose_rgb(0, 0, 0),
                l => {
                    let (r, g, b) = palette.get(l as usize - 1).copied().ok_or_else(|| {
                        RegionError::InvalidParameters(format!(
                            "label {} exceeds max_label {}",
                            l, max_label
                        ))
                    })?;
                    color::compose_rgb(r, g, b)
                }
            };
        }
    }

    debug!(
        "colorize: {}x{} label map, {} colors, seed {}",
        width, height, max_label, seed
    );
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_range_and_length() {
        let colors = random_label_colors(500, 7);
        assert_eq!(colors.len(), 500);
        for &(r, g, b) in &colors {
            assert!(r >= MIN_CHANNEL_VALUE);
            assert!(g >= MIN_CHANNEL_VALUE);
            assert!(b >= MIN_CHANNEL_VALUE);
        }
        assert!(random_label_colors(0, 7).is_empty());
    }

    #[test]
    fn test_palette_deterministic() {
        assert_eq!(random_label_colors(32, 99), random_label_colors(32, 99));
        assert_ne!(random_label_colors(32, 1), random_label_colors(32, 2));
    }

    #[test]
    fn test_colorize_labels() {
        let labels = LabelMap::from_data(3, 1, vec![0, 1, 2]).unwrap();
        let pix = colorize_labels(&labels, 2, 5).unwrap();
        let palette = random_label_colors(2, 5);

        assert_eq!(pix.depth(), PixelDepth::Bit32);
        assert_eq!(pix.spp(), 3);
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
        assert_eq!(pix.get_rgb(1, 0), Some(palette[0]));
        assert_eq!(pix.get_rgb(2, 0), Some(palette[1]));
    }

    #[test]
    fn test_same_label_same_color() {
        let labels = LabelMap::from_data(2, 2, vec![1, 1, 2, 1]).unwrap();
        let pix = colorize_labels(&labels, 2, 0).unwrap();
        assert_eq!(pix.get_rgb(0, 0), pix.get_rgb(1, 0));
        assert_eq!(pix.get_rgb(0, 0), pix.get_rgb(1, 1));
    }

    #[test]
    fn test_label_above_max_rejected() {
        let labels = LabelMap::from_data(2, 1, vec![1, 3]).unwrap();
        let err = colorize_labels(&labels, 2, 0).unwrap_err();
        assert!(matches!(err, RegionError::InvalidParameters(_)));
    }

    #[test]
    fn test_empty_map() {
        let labels = LabelMap::new(4, 0);
        let pix = colorize_labels(&labels, 0, 0).unwrap();
        assert_eq!((pix.width(), pix.height()), (4, 0));
        assert!(pix.is_empty());
    }
}
