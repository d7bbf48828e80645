//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels,
//! plus the packed-word helpers they are built on.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in a 1-bit image, pixel 0 occupies bit 31 (MSB) of the first word.

use super::{MAX_CHANNELS, Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

#[inline]
fn get_packed(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit1 => get_data_bit(line, x),
        PixelDepth::Bit2 => get_data_dibit(line, x),
        PixelDepth::Bit4 => get_data_qbit(line, x),
        PixelDepth::Bit8 => get_data_byte(line, x),
        PixelDepth::Bit16 => get_data_two_bytes(line, x),
        PixelDepth::Bit32 => get_data_four_bytes(line, x),
    }
}

#[inline]
fn set_packed(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    match depth {
        PixelDepth::Bit1 => set_data_bit(line, x, val),
        PixelDepth::Bit2 => set_data_dibit(line, x, val),
        PixelDepth::Bit4 => set_data_qbit(line, x, val),
        PixelDepth::Bit8 => set_data_byte(line, x, val),
        PixelDepth::Bit16 => set_data_two_bytes(line, x, val),
        PixelDepth::Bit32 => set_data_four_bytes(line, x, val),
    }
}

/// Split a raw pixel value into channel samples.
///
/// Unused trailing slots are zero, so two sample arrays from the same
/// image can be compared slot by slot.
#[inline]
fn split_channels(val: u32, depth: PixelDepth, spp: u32) -> [u32; MAX_CHANNELS] {
    match depth {
        PixelDepth::Bit32 => {
            let alpha = if spp == 4 {
                color::alpha(val) as u32
            } else {
                0
            };
            [
                color::red(val) as u32,
                color::green(val) as u32,
                color::blue(val) as u32,
                alpha,
            ]
        }
        _ => [val, 0, 0, 0],
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_packed(self.row_data(y), x, self.depth())
    }

    /// Get the channel samples at (x, y) without bounds checking.
    ///
    /// Gray images fill slot 0 only. RGB images fill slots 0..3 and RGBA
    /// images all four; the remaining slots are zero.
    #[inline]
    pub fn get_channels_unchecked(&self, x: u32, y: u32) -> [u32; MAX_CHANNELS] {
        split_channels(self.get_pixel_unchecked(x, y), self.depth(), self.spp())
    }

    /// Get the channel samples at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_channels(&self, x: u32, y: u32) -> Option<[u32; MAX_CHANNELS]> {
        self.get_pixel(x, y)
            .map(|val| split_channels(val, self.depth(), self.spp()))
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Get RGBA values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgba)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_packed(self.row_data(y), x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the image depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        set_packed(self.row_data_mut(y), x, depth, val & depth.max_value());
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }

    /// Set an RGBA pixel at (x, y).
    ///
    /// Only valid for 32-bit images with spp=4.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 || self.spp() != 4 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }
}

/// Get a 1-bit pixel value.
///
/// Pixels are packed MSB to LSB within each 32-bit word.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel value.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 5) as usize];
    let shift = 31 - (x & 31);
    *word = (*word & !(1 << shift)) | ((val & 1) << shift);
}

/// Get a 2-bit pixel value.
#[inline]
pub fn get_data_dibit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 4) as usize] >> (2 * (15 - (x & 15)))) & 3
}

/// Set a 2-bit pixel value.
#[inline]
pub fn set_data_dibit(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 4) as usize];
    let shift = 2 * (15 - (x & 15));
    *word = (*word & !(3 << shift)) | ((val & 3) << shift);
}

/// Get a 4-bit pixel value.
#[inline]
pub fn get_data_qbit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 3) as usize] >> (4 * (7 - (x & 7)))) & 0xf
}

/// Set a 4-bit pixel value.
#[inline]
pub fn set_data_qbit(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 3) as usize];
    let shift = 4 * (7 - (x & 7));
    *word = (*word & !(0xf << shift)) | ((val & 0xf) << shift);
}

/// Get an 8-bit pixel value.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    (line[(x >> 2) as usize] >> (8 * (3 - (x & 3)))) & 0xff
}

/// Set an 8-bit pixel value.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 2) as usize];
    let shift = 8 * (3 - (x & 3));
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}

/// Get a 16-bit pixel value.
#[inline]
pub fn get_data_two_bytes(line: &[u32], x: u32) -> u32 {
    (line[(x >> 1) as usize] >> (16 * (1 - (x & 1)))) & 0xffff
}

/// Set a 16-bit pixel value.
#[inline]
pub fn set_data_two_bytes(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 1) as usize];
    let shift = 16 * (1 - (x & 1));
    *word = (*word & !(0xffff << shift)) | ((val & 0xffff) << shift);
}

/// Get a 32-bit pixel value.
#[inline]
pub fn get_data_four_bytes(line: &[u32], x: u32) -> u32 {
    line[x as usize]
}

/// Set a 32-bit pixel value.
#[inline]
pub fn set_data_four_bytes(line: &mut [u32], x: u32, val: u32) {
    line[x as usize] = val;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_roundtrip_all_depths() {
        for depth in [
            PixelDepth::Bit1,
            PixelDepth::Bit2,
            PixelDepth::Bit4,
            PixelDepth::Bit8,
            PixelDepth::Bit16,
            PixelDepth::Bit32,
        ] {
            let mut pm = Pix::new(37, 3, depth).unwrap().to_mut();
            let max = depth.max_value();
            for x in 0..37 {
                pm.set_pixel(x, 1, x.wrapping_mul(2_654_435_761) & max)
                    .unwrap();
            }
            let pix: Pix = pm.into();
            for x in 0..37 {
                assert_eq!(
                    pix.get_pixel(x, 1),
                    Some(x.wrapping_mul(2_654_435_761) & max),
                    "depth {:?} x {}",
                    depth,
                    x
                );
                assert_eq!(pix.get_pixel(x, 0), Some(0));
                assert_eq!(pix.get_pixel(x, 2), Some(0));
            }
        }
    }

    #[test]
    fn test_msb_packing() {
        let mut pm = Pix::new(8, 1, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(0, 0, 0xab).unwrap();
        pm.set_pixel(3, 0, 0x01).unwrap();
        assert_eq!(pm.data()[0], 0xab00_0001);

        let mut pm = Pix::new(32, 1, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(0, 0, 1).unwrap();
        assert_eq!(pm.data()[0], 0x8000_0000);
    }

    #[test]
    fn test_out_of_bounds() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.get_pixel(4, 0), None);
        assert_eq!(pix.get_channels(0, 4), None);

        let mut pm = pix.to_mut();
        assert!(pm.set_pixel(0, 9, 1).is_err());
    }

    #[test]
    fn test_channels_gray_and_rgb() {
        let mut gray = Pix::new(2, 1, PixelDepth::Bit16).unwrap().to_mut();
        gray.set_pixel(1, 0, 40_000).unwrap();
        let gray: Pix = gray.into();
        assert_eq!(gray.get_channels_unchecked(1, 0), [40_000, 0, 0, 0]);

        let mut rgb = Pix::new(2, 1, PixelDepth::Bit32).unwrap().to_mut();
        rgb.set_rgb(0, 0, 10, 20, 30).unwrap();
        let rgb: Pix = rgb.into();
        // alpha is not a channel for spp == 3
        assert_eq!(rgb.get_channels_unchecked(0, 0), [10, 20, 30, 0]);
        assert_eq!(rgb.get_rgb(0, 0), Some((10, 20, 30)));
    }

    #[test]
    fn test_channels_rgba() {
        let mut pm = Pix::new(1, 1, PixelDepth::Bit32).unwrap().to_mut();
        assert!(pm.set_rgba(0, 0, 1, 2, 3, 4).is_err());
        pm.set_spp(4).unwrap();
        pm.set_rgba(0, 0, 1, 2, 3, 4).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.get_channels(0, 0), Some([1, 2, 3, 4]));
        assert_eq!(pix.get_rgba(0, 0), Some((1, 2, 3, 4)));
    }

    #[test]
    fn test_set_rgb_requires_32bpp() {
        let mut pm = Pix::new(2, 2, PixelDepth::Bit8).unwrap().to_mut();
        assert!(pm.set_rgb(0, 0, 1, 2, 3).is_err());
    }
}
