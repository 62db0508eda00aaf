/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Headerless raw image conversion
//!
//! This crate turns a raw pixel dump, a file with no header at all, into
//! an image that can be viewed and saved.
//!
//! The pipeline is
//!
//! 1. [`infer`] guesses square dimensions from the file size and a [`layout`]
//! 2. [`decoder`] maps the bytes to RGBA quads, padding short input
//! 3. [`export`] encodes the quads as png or jpeg
//!
//! [`session`] strings these together and tracks what the user changed.
//!
//! # Example
//! ```
//! use rawconv::export::ExportFormat;
//! use rawconv::session::{Event, Reaction, Session};
//!
//! let (session, _) = Session::new().load("gradient.raw", (0..=255).collect());
//! assert_eq!(session.dimensions(), (16, 16));
//!
//! let (_, reaction) = session.apply(Event::ExportRequested(ExportFormat::PNG));
//! if let Reaction::Exported(image) = reaction {
//!     assert_eq!(image.file_name, "gradient.png");
//! }
//! ```
pub mod buffer;
pub mod decoder;
pub mod errors;
pub mod export;
pub mod infer;
pub mod layout;
mod serde;
pub mod session;

pub use buffer::PixelBuffer;
pub use errors::RawConvErrors;
pub use export::ExportFormat;
pub use layout::ChannelLayout;
pub use session::{Event, Reaction, Session};
