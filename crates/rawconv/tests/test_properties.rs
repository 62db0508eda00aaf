/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Checks over many random inputs instead of fixed files

use nanorand::{Rng, WyRand};
use rawconv::decoder::decode;
use rawconv::infer::infer_dimensions;
use rawconv::layout::ChannelLayout;

fn reference_side(length: usize, layout: ChannelLayout) -> usize {
    // plain float formula, exact for the lengths used here
    ((length as f64) / (layout.bytes_per_pixel() as f64))
        .sqrt()
        .floor() as usize
}

#[test]
fn inferred_sides_are_equal_and_match_formula() {
    let mut rand = WyRand::new_seed(1);

    for _ in 0..2000 {
        let length = rand.generate_range(0_usize..5_000_000);

        for layout in ChannelLayout::ALL {
            let (width, height) = infer_dimensions(length, layout);

            assert_eq!(width, height);
            assert_eq!(width, reference_side(length, layout), "{length} {layout}");
        }
    }
}

#[test]
fn output_always_has_width_times_height_quads() {
    let mut rand = WyRand::new_seed(2);

    for _ in 0..300 {
        let width = rand.generate_range(0_usize..40);
        let height = rand.generate_range(0_usize..40);
        let mut bytes = vec![0_u8; rand.generate_range(0_usize..8000)];
        rand.fill(&mut bytes);

        for layout in ChannelLayout::ALL {
            let pixels = decode(&bytes, layout, width, height);

            assert_eq!(pixels.pixel_count(), width * height);
            assert_eq!(pixels.as_bytes().len(), width * height * 4);
        }
    }
}

#[test]
fn alpha_is_opaque_unless_read_from_input() {
    let mut rand = WyRand::new_seed(3);

    for _ in 0..300 {
        let width = rand.generate_range(1_usize..32);
        let height = rand.generate_range(1_usize..32);
        let mut bytes = vec![0_u8; rand.generate_range(0_usize..5000)];
        rand.fill(&mut bytes);

        for layout in [ChannelLayout::Grayscale, ChannelLayout::RGB] {
            let pixels = decode(&bytes, layout, width, height);
            assert!(pixels.pixels().iter().all(|p| p[3] == 255));
        }

        let pixels = decode(&bytes, ChannelLayout::RGBA, width, height);
        for (i, pixel) in pixels.pixels().iter().enumerate() {
            let expected = bytes.get(i * 4 + 3).copied().unwrap_or(255);
            assert_eq!(pixel[3], expected);
        }
    }
}

#[test]
fn channels_come_from_their_offsets() {
    let mut rand = WyRand::new_seed(4);
    let mut bytes = vec![0_u8; 1000];
    rand.fill(&mut bytes);

    for layout in ChannelLayout::ALL {
        let bpp = layout.bytes_per_pixel();
        let pixels = decode(&bytes, layout, 20, 20);

        for (i, pixel) in pixels.pixels().iter().enumerate() {
            let at = |k: usize| bytes.get(i * bpp + k).copied().unwrap_or(0);

            match layout {
                ChannelLayout::Grayscale => assert_eq!(pixel[..3], [at(0); 3]),
                _ => assert_eq!(pixel[..3], [at(0), at(1), at(2)])
            }
        }
    }
}

#[test]
fn decoding_is_deterministic() {
    let mut rand = WyRand::new_seed(5);
    let mut bytes = vec![0_u8; 777];
    rand.fill(&mut bytes);

    for layout in ChannelLayout::ALL {
        let first = decode(&bytes, layout, 17, 13);
        let second = decode(&bytes, layout, 17, 13);

        assert_eq!(first, second);
    }
}
