/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Dimension guessing for headerless buffers
//!
//! Raw dumps carry no width or height, so the best we can do without
//! more information is assume a square image. The result is only a
//! starting point, callers are expected to let users correct it.
use log::trace;

use crate::layout::ChannelLayout;

/// Propose `(width, height)` for a raw buffer of `length` bytes
///
/// Both sides are `floor(sqrt(length / bytes_per_pixel))`. Trailing bytes
/// that do not make up a whole pixel, or a whole square, are simply not
/// covered by the suggestion.
///
/// # Example
/// ```
/// use rawconv::infer::infer_dimensions;
/// use rawconv::layout::ChannelLayout;
///
/// assert_eq!(infer_dimensions(100, ChannelLayout::Grayscale), (10, 10));
/// assert_eq!(infer_dimensions(100, ChannelLayout::RGBA), (5, 5));
/// assert_eq!(infer_dimensions(0, ChannelLayout::RGB), (0, 0));
/// ```
pub fn infer_dimensions(length: usize, layout: ChannelLayout) -> (usize, usize) {
    let side = square_side(length, layout.bytes_per_pixel());

    trace!("Inferred {side}x{side} for {length} bytes of {layout}");

    (side, side)
}

/// Largest `side` such that `side * side * bpp <= length`
///
/// This is the integer floor of `sqrt(length / bpp)`. The float estimate
/// can be off by one for large lengths, so it is corrected exactly.
fn square_side(length: usize, bpp: usize) -> usize {
    let fits = |side: usize| {
        side.checked_mul(side)
            .and_then(|area| area.checked_mul(bpp))
            .is_some_and(|needed| needed <= length)
    };

    let mut side = ((length as f64) / (bpp as f64)).sqrt() as usize;

    while side > 0 && !fits(side) {
        side -= 1;
    }
    while fits(side + 1) {
        side += 1;
    }
    side
}
