//! Integration tests for the LUT grading path.
//!
//! Exercises CPU-side logic only — no actual GPU required.

use lutplay_color::{sample_pos, tile_coords, HaldLut, LUT_IMAGE_SIZE, TILE_GRID, TILE_SIZE};
use lutplay_core::ImageBuffer;

/// Build a channel-inverting grade by remapping the identity image.
fn inverted_lut() -> HaldLut {
    let identity = HaldLut::identity();
    let mut image = ImageBuffer::new(LUT_IMAGE_SIZE, LUT_IMAGE_SIZE);
    for y in 0..LUT_IMAGE_SIZE {
        for x in 0..LUT_IMAGE_SIZE {
            let [r, g, b, a] = identity.image().pixel(x, y);
            image.set_pixel(x, y, [255 - r, 255 - g, 255 - b, a]);
        }
    }
    HaldLut::from_image(image).unwrap()
}

#[test]
fn custom_grade_applies_through_the_packed_encoding() {
    let lut = inverted_lut();
    let tolerance = 8.0 / 255.0;

    for &(r, g, b) in &[
        (0.0, 0.0, 0.0),
        (1.0, 1.0, 1.0),
        (0.2, 0.5, 0.8),
        (0.75, 0.25, 0.5),
    ] {
        let out = lut.apply([r, g, b]);
        assert!((out[0] - (1.0 - r)).abs() <= tolerance, "red {r} -> {}", out[0]);
        assert!((out[1] - (1.0 - g)).abs() <= tolerance, "green {g} -> {}", out[1]);
        assert!((out[2] - (1.0 - b)).abs() <= tolerance, "blue {b} -> {}", out[2]);
    }
}

#[test]
fn grade_swap_changes_output_for_the_same_input() {
    let identity = HaldLut::identity();
    let inverted = inverted_lut();

    let input = [0.9, 0.2, 0.4];
    let plain = identity.apply(input);
    let graded = inverted.apply(input);

    assert!((plain[0] - graded[0]).abs() > 0.5);
    assert!((graded[1] - 0.8).abs() <= 8.0 / 255.0);
}

#[test]
fn every_sample_lands_in_the_tile_its_red_level_selects() {
    // The addressing math and the packed identity image must agree: the texel
    // each input samples carries that input's own quantized color.
    let lut = HaldLut::identity();
    let tile_extent = 1.0 / TILE_GRID as f32;

    for level in 0..64u32 {
        let r = (level * 4) as f32 / 255.0;
        let pos = sample_pos([r, 0.5, 0.5]);
        let (row, col) = tile_coords((r * 255.0).round());

        assert!(pos.x >= col && pos.x < col + tile_extent, "level {level}");
        assert!(pos.y >= row && pos.y < row + tile_extent, "level {level}");

        let out = lut.apply([r, 0.5, 0.5]);
        assert!((out[0] - r).abs() <= 8.0 / 255.0, "level {level}");
    }
}

#[test]
fn packed_image_has_expected_geometry() {
    let lut = HaldLut::identity();
    let image = lut.image();
    assert_eq!(image.width(), LUT_IMAGE_SIZE);
    assert_eq!(image.height(), LUT_IMAGE_SIZE);
    assert_eq!(LUT_IMAGE_SIZE, TILE_GRID * TILE_SIZE);

    // First tile, last tile: red encodes the tile index across the grid.
    assert_eq!(image.pixel(0, 0)[0], 0);
    assert_eq!(image.pixel(LUT_IMAGE_SIZE - 1, LUT_IMAGE_SIZE - 1)[0], 255);
}
