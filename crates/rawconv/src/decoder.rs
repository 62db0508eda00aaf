/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Raw bytes to RGBA
//!
//! The decoder maps pixel `i` to the bytes starting at
//! `i * bytes_per_pixel` and normalizes every layout into RGBA quads.
//!
//! Decoding is total. The buffer may be shorter than the dimensions
//! need, in which case missing colour bytes read as `0` and a missing
//! alpha byte reads as `255`. Nothing here returns an error for short input.
use log::debug;

use crate::buffer::{PixelBuffer, RGBA_COMPONENTS};
use crate::errors::RawConvErrors;
use crate::layout::ChannelLayout;

/// Alpha written for layouts without an alpha byte, or when it is missing
const OPAQUE: u8 = 255;

/// A layout plus explicit dimensions, everything needed to decode a buffer
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DecodeRequest {
    pub layout: ChannelLayout,
    pub width:  usize,
    pub height: usize
}

impl DecodeRequest {
    pub const fn new(layout: ChannelLayout, width: usize, height: usize) -> DecodeRequest {
        DecodeRequest {
            layout,
            width,
            height
        }
    }

    /// Number of pixels the output will contain, saturating on overflow
    pub const fn pixel_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Bytes of input that decode without any padding, saturating on overflow
    pub const fn required_bytes(&self) -> usize {
        self.pixel_count()
            .saturating_mul(self.layout.bytes_per_pixel())
    }

    /// Size of the RGBA output in bytes, `None` if it cannot be addressed
    pub fn output_len(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(RGBA_COMPONENTS)
    }

    /// Decode `bytes` with this request
    pub fn decode(&self, bytes: &[u8]) -> PixelBuffer {
        decode(bytes, self.layout, self.width, self.height)
    }
}

/// Decode `bytes` into a freshly allocated RGBA buffer
///
/// # Panics
/// Like any allocation, if `width * height * 4` overflows `usize`.
/// Callers taking dimensions from users should bound them first.
pub fn decode(bytes: &[u8], layout: ChannelLayout, width: usize, height: usize) -> PixelBuffer {
    let request = DecodeRequest::new(layout, width, height);
    let length = request
        .output_len()
        .unwrap_or_else(|| panic!("{width}x{height} RGBA buffer does not fit in memory"));

    let mut data = vec![0; length];
    fill_rgba(bytes, layout, &mut data);

    debug!(
        "Decoded {width}x{height} {layout} image from {} bytes ({} needed)",
        bytes.len(),
        request.required_bytes()
    );
    PixelBuffer::from_rgba(width, height, data)
}

/// Decode `bytes` into a caller provided RGBA slice
///
/// `output` must be exactly `width * height * 4` bytes.
pub fn decode_into(
    bytes: &[u8], layout: ChannelLayout, width: usize, height: usize, output: &mut [u8]
) -> Result<(), RawConvErrors> {
    let expected = DecodeRequest::new(layout, width, height)
        .output_len()
        .ok_or(RawConvErrors::GenericStr("Output dimensions overflow usize"))?;

    if output.len() != expected {
        return Err(RawConvErrors::BufferTooSmall(expected, output.len()));
    }
    fill_rgba(bytes, layout, output);

    Ok(())
}

fn fill_rgba(bytes: &[u8], layout: ChannelLayout, output: &mut [u8]) {
    let bpp = layout.bytes_per_pixel();
    let pixel_count = output.len() / RGBA_COMPONENTS;
    // pixels whose bytes are all inside the input
    let complete = (bytes.len() / bpp).min(pixel_count);

    let (head, tail) = output.split_at_mut(complete * RGBA_COMPONENTS);

    match layout {
        ChannelLayout::Grayscale => {
            for (out, &value) in head.chunks_exact_mut(RGBA_COMPONENTS).zip(bytes) {
                out.copy_from_slice(&[value, value, value, OPAQUE]);
            }
        }
        ChannelLayout::RGB => {
            for (out, rgb) in head
                .chunks_exact_mut(RGBA_COMPONENTS)
                .zip(bytes.chunks_exact(3))
            {
                out[..3].copy_from_slice(rgb);
                out[3] = OPAQUE;
            }
        }
        ChannelLayout::RGBA => {
            head.copy_from_slice(&bytes[..complete * RGBA_COMPONENTS]);
        }
    }

    for (i, out) in tail.chunks_exact_mut(RGBA_COMPONENTS).enumerate() {
        let offset = (complete + i) * bpp;
        out.copy_from_slice(&padded_pixel(bytes, layout, offset));
    }
}

/// Build one quad whose source bytes may run past the end of `bytes`
fn padded_pixel(bytes: &[u8], layout: ChannelLayout, offset: usize) -> [u8; 4] {
    let channel = |k: usize| bytes.get(offset + k).copied();

    match layout {
        ChannelLayout::Grayscale => {
            let value = channel(0).unwrap_or(0);
            [value, value, value, OPAQUE]
        }
        ChannelLayout::RGB => [
            channel(0).unwrap_or(0),
            channel(1).unwrap_or(0),
            channel(2).unwrap_or(0),
            OPAQUE
        ],
        ChannelLayout::RGBA => [
            channel(0).unwrap_or(0),
            channel(1).unwrap_or(0),
            channel(2).unwrap_or(0),
            channel(3).unwrap_or(OPAQUE)
        ]
    }
}
