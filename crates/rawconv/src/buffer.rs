/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The canonical decoded image
use std::fmt::{Debug, Formatter};

use bytemuck::cast_slice;

/// Number of bytes in one RGBA quad
pub const RGBA_COMPONENTS: usize = 4;

/// A decoded image, `width * height` RGBA quads in row-major order
///
/// The buffer keeps the dimensions it was decoded with, so it can
/// never be handed to an encoder with a different width or height.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct PixelBuffer {
    width:  usize,
    height: usize,
    data:   Vec<u8>
}

impl PixelBuffer {
    /// Wrap already interleaved RGBA data
    ///
    /// Only the decoder constructs buffers, and it always allocates
    /// exactly `width * height * 4` bytes.
    pub(crate) fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> PixelBuffer {
        debug_assert_eq!(data.len(), width * height * RGBA_COMPONENTS);

        PixelBuffer {
            width,
            height,
            data
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of RGBA quads
    pub fn pixel_count(&self) -> usize {
        self.data.len() / RGBA_COMPONENTS
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw interleaved bytes, `R,G,B,A,R,G,B,A...`
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The buffer viewed as quads
    pub fn pixels(&self) -> &[[u8; 4]] {
        cast_slice(&self.data)
    }

    /// Quad at column `x`, row `y`, or `None` outside the image
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels().get(y * self.width + x).copied()
    }
}

impl Debug for PixelBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}
