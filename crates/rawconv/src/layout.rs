/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Supported raw channel layouts
//!
//! A layout states how the bytes of a single pixel are arranged in the
//! headerless input. Every layout stores 8 bits per channel.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use zune_core::colorspace::ColorSpace;

use crate::errors::RawConvErrors;

/// Byte arrangement of one pixel in the raw input
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ChannelLayout {
    /// One byte per pixel, replicated into R, G and B
    #[default]
    Grayscale,
    /// Three bytes per pixel, in R,G,B order
    RGB,
    /// Four bytes per pixel, in R,G,B,A order
    RGBA
}

impl ChannelLayout {
    /// Every layout, in the order collaborators present them
    pub const ALL: [ChannelLayout; 3] = [
        ChannelLayout::Grayscale,
        ChannelLayout::RGB,
        ChannelLayout::RGBA
    ];

    /// Number of bytes a single pixel occupies in the raw input
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ChannelLayout::Grayscale => 1,
            ChannelLayout::RGB => 3,
            ChannelLayout::RGBA => 4
        }
    }

    /// The zune colorspace holding the same channels
    pub const fn colorspace(self) -> ColorSpace {
        match self {
            ChannelLayout::Grayscale => ColorSpace::Luma,
            ChannelLayout::RGB => ColorSpace::RGB,
            ChannelLayout::RGBA => ColorSpace::RGBA
        }
    }

    /// Whether the raw input carries its own alpha byte
    pub const fn has_alpha(self) -> bool {
        matches!(self, ChannelLayout::RGBA)
    }

    /// Lower case name, as accepted by [`ChannelLayout::from_str`]
    pub const fn name(self) -> &'static str {
        match self {
            ChannelLayout::Grayscale => "grayscale",
            ChannelLayout::RGB => "rgb",
            ChannelLayout::RGBA => "rgba"
        }
    }

    /// Label shown next to a layout picker
    pub const fn description(self) -> &'static str {
        match self {
            ChannelLayout::Grayscale => "Grayscale (1 byte per pixel)",
            ChannelLayout::RGB => "RGB (3 bytes per pixel)",
            ChannelLayout::RGBA => "RGBA (4 bytes per pixel)"
        }
    }
}

impl FromStr for ChannelLayout {
    type Err = RawConvErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grayscale" | "gray" | "luma" => Ok(ChannelLayout::Grayscale),
            "rgb" => Ok(ChannelLayout::RGB),
            "rgba" => Ok(ChannelLayout::RGBA),
            _ => Err(RawConvErrors::UnknownLayout(s.to_string()))
        }
    }
}

impl Display for ChannelLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
