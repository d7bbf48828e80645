//! Label colorization regression test
//!
//! Colorizes seed-fill results and checks that the rendering is a faithful
//! picture of the label map: one color per label, black for unlabeled
//! cells, deterministic for a fixed seed.

use seedseg_core::{LabelMap, Pix, PixelDepth};
use seedseg_region::{
    MIN_CHANNEL_VALUE, colorize_labels, random_label_colors, seedfill_segmentation_simple,
};
use seedseg_test::RegParams;

fn bands(width: u32, height: u32) -> Pix {
    let mut pm = Pix::new(width, height, PixelDepth::Bit32)
        .unwrap()
        .try_into_mut()
        .unwrap();
    for y in 0..height {
        for x in 0..width {
            let v = ((x / 3) * 60) as u8;
            pm.set_rgb(x, y, v, 255 - v, 128).unwrap();
        }
    }
    pm.into()
}

#[test]
fn colorize_reg() {
    let mut rp = RegParams::new("colorize");

    // --- Test 1: palette ---
    let palette = random_label_colors(64, 42);
    rp.compare_values(64.0, palette.len() as f64, 0.0);
    let in_range = palette
        .iter()
        .all(|&(r, g, b)| r >= MIN_CHANNEL_VALUE && g >= MIN_CHANNEL_VALUE && b >= MIN_CHANNEL_VALUE);
    rp.compare_values(1.0, if in_range { 1.0 } else { 0.0 }, 0.0);
    let same = palette == random_label_colors(64, 42);
    rp.compare_values(1.0, if same { 1.0 } else { 0.0 }, 0.0);

    // --- Test 2: rendering of a labeled image ---
    let pix = bands(12, 4);
    let result = seedfill_segmentation_simple(&pix, 10.0).unwrap();
    rp.compare_values(4.0, result.max_label as f64, 0.0);

    let colored = colorize_labels(&result.labels, result.max_label, 42).unwrap();
    rp.compare_values(12.0, colored.width() as f64, 0.0);
    rp.compare_values(4.0, colored.height() as f64, 0.0);
    rp.compare_values(32.0, colored.depth().bits() as f64, 0.0);

    let palette = random_label_colors(result.max_label, 42);
    let mut faithful = true;
    for y in 0..4 {
        for x in 0..12 {
            let label = result.labels.get_label(x, y).unwrap();
            if colored.get_rgb(x, y) != Some(palette[label as usize - 1]) {
                faithful = false;
            }
        }
    }
    rp.compare_values(1.0, if faithful { 1.0 } else { 0.0 }, 0.0);

    // Same seed, same image
    let again = colorize_labels(&result.labels, result.max_label, 42).unwrap();
    rp.compare_pix(&colored, &again);

    // --- Test 3: unlabeled cells and bad labels ---
    let partial = LabelMap::from_data(2, 2, vec![0, 1, 1, 0]).unwrap();
    let colored = colorize_labels(&partial, 1, 7).unwrap();
    rp.compare_values(1.0, if colored.get_rgb(0, 0) == Some((0, 0, 0)) { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if colored.get_rgb(1, 0) != Some((0, 0, 0)) { 1.0 } else { 0.0 }, 0.0);

    let too_high = colorize_labels(&partial, 0, 7);
    rp.compare_values(1.0, if too_high.is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "colorize regression test failed");
}
