/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Serializing decoded buffers into standard image formats
//!
//! Two targets are supported
//!
//! - PNG, lossless, via `zune-png`. Decoding the output gives back the
//!   exact RGBA quads.
//! - JPEG, lossy, via `jpeg-encoder`. JPEG has no alpha channel so the
//!   alpha of each quad is dropped.
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use log::debug;
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::options::EncoderOptions;

use crate::buffer::PixelBuffer;
use crate::errors::RawConvErrors;

/// JPEG quality used for every lossy export, the zune encoder default
pub const JPEG_QUALITY: u8 = 80;

/// Output formats an image can be exported to
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExportFormat {
    /// Portable Network Graphics, lossless
    PNG,
    /// Joint Photographic Experts Group, lossy
    JPEG
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::PNG, ExportFormat::JPEG];

    /// File extension for exported files, without the dot
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::PNG => "png",
            ExportFormat::JPEG => "jpg"
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::PNG => "image/png",
            ExportFormat::JPEG => "image/jpeg"
        }
    }

    pub const fn is_lossless(self) -> bool {
        matches!(self, ExportFormat::PNG)
    }

    /// The encoder responsible for this format
    pub fn encoder(self) -> Box<dyn EncoderTrait> {
        match self {
            ExportFormat::PNG => Box::new(PngExporter::new()),
            ExportFormat::JPEG => Box::new(JpegExporter::new())
        }
    }
}

impl FromStr for ExportFormat {
    type Err = RawConvErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "lossless" => Ok(ExportFormat::PNG),
            "jpg" | "jpeg" | "lossy" => Ok(ExportFormat::JPEG),
            _ => Err(RawConvErrors::UnknownFormat(s.to_string()))
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encapsulates an image encoder
pub trait EncoderTrait {
    /// Name of the encoder, used in logs
    fn name(&self) -> &'static str;

    /// The format this encoder produces
    fn format(&self) -> ExportFormat;

    /// Encode a buffer with its own dimensions
    fn encode_inner(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, RawConvErrors>;

    /// Encode a buffer, refusing images with no pixels
    fn encode(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, RawConvErrors> {
        let (width, height) = pixels.dimensions();

        if pixels.is_empty() {
            return Err(RawConvErrors::EncodeErrors(format!(
                "{}: cannot encode an image with zero width or height ({width}x{height})",
                self.name()
            )));
        }
        let data = self.encode_inner(pixels)?;

        debug!(
            "{} produced {} bytes for a {width}x{height} image",
            self.name(),
            data.len()
        );
        Ok(data)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> PngExporter {
        PngExporter
    }
}

impl EncoderTrait for PngExporter {
    fn name(&self) -> &'static str {
        "PNG encoder"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::PNG
    }

    fn encode_inner(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, RawConvErrors> {
        let (width, height) = pixels.dimensions();
        let options = EncoderOptions::new(width, height, ColorSpace::RGBA, BitDepth::Eight);

        let mut encoder = zune_png::PngEncoder::new(pixels.as_bytes(), options);

        Ok(encoder.encode())
    }
}

#[derive(Copy, Clone, Debug)]
pub struct JpegExporter {
    quality: u8
}

impl JpegExporter {
    pub fn new() -> JpegExporter {
        JpegExporter {
            quality: JPEG_QUALITY
        }
    }
}

impl Default for JpegExporter {
    fn default() -> Self {
        JpegExporter::new()
    }
}

impl EncoderTrait for JpegExporter {
    fn name(&self) -> &'static str {
        "JPEG encoder"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::JPEG
    }

    fn encode_inner(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, RawConvErrors> {
        let (width, height) = pixels.dimensions();
        let to_u16 = |value: usize, what: &str| {
            u16::try_from(value).map_err(|_| {
                RawConvErrors::EncodeErrors(format!(
                    "jpeg: {what} {value} is larger than the maximum of {}",
                    u16::MAX
                ))
            })
        };
        let width = to_u16(width, "width")?;
        let height = to_u16(height, "height")?;

        let mut sink = Vec::new();
        let encoder = jpeg_encoder::Encoder::new(&mut sink, self.quality);

        encoder.encode(
            pixels.as_bytes(),
            width,
            height,
            jpeg_encoder::ColorType::Rgba
        )?;

        Ok(sink)
    }
}

/// An encoded image together with the name it should be saved as
#[derive(Clone, Eq, PartialEq)]
pub struct ExportedImage {
    pub format:    ExportFormat,
    pub file_name: String,
    pub data:      Vec<u8>
}

impl Debug for ExportedImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedImage")
            .field("format", &self.format)
            .field("file_name", &self.file_name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Encode `pixels` to `format`, naming the result after `original_name`
pub fn export(
    pixels: &PixelBuffer, original_name: &str, format: ExportFormat
) -> Result<ExportedImage, RawConvErrors> {
    let encoder = format.encoder();
    let data = encoder.encode(pixels)?;

    Ok(ExportedImage {
        format: encoder.format(),
        file_name: suggested_file_name(original_name, format),
        data
    })
}

/// Replace the last extension of `original_name` with the one for `format`
///
/// Only a trailing `.ext` where `ext` has no `.` or `/` counts as an
/// extension, names without one get the new extension appended.
///
/// ```
/// use rawconv::export::{suggested_file_name, ExportFormat};
///
/// assert_eq!(suggested_file_name("scan.raw", ExportFormat::PNG), "scan.png");
/// assert_eq!(suggested_file_name("a.tar.gz", ExportFormat::JPEG), "a.tar.jpg");
/// assert_eq!(suggested_file_name("dump", ExportFormat::PNG), "dump.png");
/// ```
pub fn suggested_file_name(original_name: &str, format: ExportFormat) -> String {
    let stem = match original_name.rfind('.') {
        Some(dot) if is_extension(&original_name[dot + 1..]) => &original_name[..dot],
        _ => original_name
    };
    format!("{stem}.{}", format.extension())
}

fn is_extension(candidate: &str) -> bool {
    !candidate.is_empty() && !candidate.contains('/')
}

#[cfg(test)]
mod tests {
    use crate::decoder::decode;
    use crate::errors::RawConvErrors;
    use crate::export::{export, suggested_file_name, ExportFormat};
    use crate::layout::ChannelLayout;

    #[test]
    fn file_names() {
        let png = ExportFormat::PNG;

        assert_eq!(suggested_file_name("scan.raw", png), "scan.png");
        assert_eq!(suggested_file_name("a.tar.gz", png), "a.tar.png");
        assert_eq!(suggested_file_name("noext", png), "noext.png");
        assert_eq!(suggested_file_name("dir.d/file", png), "dir.d/file.png");
        assert_eq!(suggested_file_name("trailing.", png), "trailing..png");
        assert_eq!(suggested_file_name(".raw", png), ".png");
        assert_eq!(suggested_file_name("", ExportFormat::JPEG), ".jpg");
    }

    #[test]
    fn parse_formats() {
        assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::PNG);
        assert_eq!("lossless".parse::<ExportFormat>().unwrap(), ExportFormat::PNG);
        assert_eq!("jpeg".parse::<ExportFormat>().unwrap(), ExportFormat::JPEG);
        assert_eq!("jpg".parse::<ExportFormat>().unwrap(), ExportFormat::JPEG);
        assert_eq!("lossy".parse::<ExportFormat>().unwrap(), ExportFormat::JPEG);
        assert!("gif".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn encoders_report_their_format() {
        for format in ExportFormat::ALL {
            assert_eq!(format.encoder().format(), format);
        }
    }

    #[test]
    fn empty_images_are_refused() {
        let pixels = decode(&[1, 2, 3], ChannelLayout::RGB, 0, 0);

        for format in ExportFormat::ALL {
            let err = export(&pixels, "x.raw", format).unwrap_err();
            assert!(matches!(err, RawConvErrors::EncodeErrors(_)));
        }
    }

    #[test]
    fn png_starts_with_signature() {
        let pixels = decode(&[0; 16], ChannelLayout::Grayscale, 4, 4);
        let exported = export(&pixels, "zeros.raw", ExportFormat::PNG).unwrap();

        assert_eq!(exported.file_name, "zeros.png");
        assert_eq!(&exported.data[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn jpeg_has_soi_and_eoi() {
        let pixels = decode(&[128; 64 * 3], ChannelLayout::RGB, 8, 8);
        let exported = export(&pixels, "grey.bin", ExportFormat::JPEG).unwrap();

        assert_eq!(exported.file_name, "grey.jpg");
        assert_eq!(&exported.data[..2], &[0xFF, 0xD8]);
        assert_eq!(&exported.data[exported.data.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn jpeg_rejects_oversized_width() {
        let pixels = decode(&[], ChannelLayout::Grayscale, 70_000, 1);
        let err = export(&pixels, "wide.raw", ExportFormat::JPEG).unwrap_err();

        assert!(matches!(err, RawConvErrors::EncodeErrors(_)));
    }
}
