//! Color distance metrics
//!
//! A metric compares two channel vectors as returned by
//! [`Pix::get_channels_unchecked`]. Unused channel slots are zero in both
//! vectors, so every metric can walk all [`MAX_CHANNELS`] slots.
//!
//! All metrics are symmetric and return zero exactly when the vectors are
//! equal.

use seedseg_core::{MAX_CHANNELS, Pix};

/// Channel samples of one pixel.
pub type Channels = [u32; MAX_CHANNELS];

/// Distance between two colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDistance {
    /// `sqrt(sum((a - b)^2))`
    #[default]
    Euclidean,
    /// `sum(|a - b|)`
    Manhattan,
    /// `max(|a - b|)`
    Chebyshev,
}

impl ColorDistance {
    /// Distance between two channel vectors.
    #[inline]
    pub fn distance(self, a: &Channels, b: &Channels) -> f64 {
        let diffs = a.iter().zip(b.iter()).map(|(&p, &q)| p.abs_diff(q) as u64);
        match self {
            ColorDistance::Euclidean => (diffs.map(|d| d * d).sum::<u64>() as f64).sqrt(),
            ColorDistance::Manhattan => diffs.sum::<u64>() as f64,
            ColorDistance::Chebyshev => diffs.max().unwrap_or(0) as f64,
        }
    }

    /// True when `distance(a, b) <= threshold`.
    #[inline]
    pub fn within(self, a: &Channels, b: &Channels, threshold: f64) -> bool {
        self.distance(a, b) <= threshold
    }

    /// Largest distance this metric can produce for `channels` samples of
    /// `bits_per_channel` bits each.
    ///
    /// Computed with [`ColorDistance::distance`] itself, so a threshold equal
    /// to this value admits every pair of colors.
    pub fn max_distance(self, channels: usize, bits_per_channel: u32) -> f64 {
        let top = if bits_per_channel >= 32 {
            u32::MAX
        } else {
            (1u32 << bits_per_channel) - 1
        };
        let mut hi = [0u32; MAX_CHANNELS];
        hi.iter_mut()
            .take(channels.min(MAX_CHANNELS))
            .for_each(|c| *c = top);
        self.distance(&[0; MAX_CHANNELS], &hi)
    }

    /// Largest distance this metric can produce between two pixels of `pix`.
    pub fn max_distance_for(self, pix: &Pix) -> f64 {
        self.max_distance(pix.num_channels(), pix.depth().bits_per_channel())
    }
}
