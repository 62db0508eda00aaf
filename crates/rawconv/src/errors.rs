/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during raw conversion
//!
//! Short or oddly sized inputs are never errors, they are padded by the
//! decoder. What remains is parsing collaborator input, codec failures
//! and i/o.
use std::fmt::{Debug, Display, Formatter};

/// All possible raw conversion errors
pub enum RawConvErrors {
    /// A layout name that is not `grayscale`, `rgb` or `rgba`
    UnknownLayout(String),
    /// An export format name that is not one of `png`, `jpg` and friends
    UnknownFormat(String),
    /// Output buffer size mismatch, expected, found
    BufferTooSmall(usize, usize),
    /// The image codec refused the buffer
    EncodeErrors(String),
    IoErrors(std::io::Error),
    GenericString(String),
    GenericStr(&'static str)
}

impl Debug for RawConvErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLayout(name) => {
                writeln!(
                    f,
                    "Unknown layout {name:?}, supported layouts are grayscale, rgb and rgba"
                )
            }
            Self::UnknownFormat(name) => {
                writeln!(
                    f,
                    "Unknown export format {name:?}, supported formats are png and jpg"
                )
            }
            Self::BufferTooSmall(expected, found) => {
                writeln!(
                    f,
                    "Output buffer has wrong size, expected {expected} bytes but found {found}"
                )
            }
            Self::EncodeErrors(err) => writeln!(f, "Encoding failed: {err}"),
            Self::IoErrors(err) => writeln!(f, "I/O error: {err}"),
            Self::GenericString(err) => writeln!(f, "{err}"),
            Self::GenericStr(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for RawConvErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // debug output already reads as a sentence, drop the trailing newline
        let message = format!("{self:?}");
        write!(f, "{}", message.trim_end())
    }
}

impl std::error::Error for RawConvErrors {}

impl From<std::io::Error> for RawConvErrors {
    fn from(from: std::io::Error) -> Self {
        RawConvErrors::IoErrors(from)
    }
}

impl From<jpeg_encoder::EncodingError> for RawConvErrors {
    fn from(from: jpeg_encoder::EncodingError) -> Self {
        RawConvErrors::EncodeErrors(format!("jpeg: {from:?}"))
    }
}

impl From<String> for RawConvErrors {
    fn from(s: String) -> RawConvErrors {
        RawConvErrors::GenericString(s)
    }
}

impl From<&'static str> for RawConvErrors {
    fn from(s: &'static str) -> RawConvErrors {
        RawConvErrors::GenericStr(s)
    }
}
