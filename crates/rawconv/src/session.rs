/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversion session and the events that drive it
//!
//! A [`Session`] holds the loaded raw file, the chosen layout, the
//! current dimensions and the buffer decoded from them. Collaborators
//! feed it [`Event`]s through [`Session::apply`], which consumes the
//! session and returns the next one together with a [`Reaction`].
//!
//! | Event            | Re-infers dimensions | Re-decodes |
//! |------------------|----------------------|------------|
//! | `FileSelected`   | yes                  | yes        |
//! | `LayoutChanged`  | yes, with a file     | yes        |
//! | `WidthEdited`    | no                   | yes        |
//! | `HeightEdited`   | no                   | yes        |
//! | `ExportRequested`| no                   | no         |
//!
//! # Reads
//! Reading a file is the only step that may finish later than it was
//! started. Each read is announced with [`Event::ReadRequested`], which
//! hands out a [`ReadTicket`]. Only the completion carrying the latest
//! ticket is accepted, older ones are ignored.
use std::fmt::{Debug, Formatter};

use log::{debug, info, trace, warn};

use crate::buffer::PixelBuffer;
use crate::decoder::{decode, DecodeRequest};
use crate::errors::RawConvErrors;
use crate::export::{export, ExportFormat, ExportedImage};
use crate::infer::infer_dimensions;
use crate::layout::ChannelLayout;

/// Limits a session applies before decoding
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SessionOptions {
    /// Widths above this are kept but not decoded
    ///
    /// - Default value: 16384
    pub max_width:  usize,
    /// Heights above this are kept but not decoded
    ///
    /// - Default value: 16384
    pub max_height: usize
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            max_width:  1 << 14,
            max_height: 1 << 14
        }
    }
}

impl SessionOptions {
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }
}

/// Identifies one file read
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ReadTicket {
    generation: u64
}

impl ReadTicket {
    /// Rebuild a ticket from a generation that crossed a boundary,
    /// e.g. a javascript callback
    pub const fn from_generation(generation: u64) -> ReadTicket {
        ReadTicket { generation }
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Contents of a finished read
#[derive(Clone)]
pub struct LoadedFile {
    pub ticket: ReadTicket,
    pub name:   String,
    pub bytes:  Vec<u8>
}

impl Debug for LoadedFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFile")
            .field("ticket", &self.ticket.generation)
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// A loaded raw file
#[derive(Clone, Eq, PartialEq)]
pub struct RawAsset {
    name:  String,
    bytes: Vec<u8>
}

impl Debug for RawAsset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawAsset")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl RawAsset {
    pub fn new(name: String, bytes: Vec<u8>) -> RawAsset {
        RawAsset { name, bytes }
    }

    /// The file name supplied with the bytes
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Everything a collaborator can tell a session
#[derive(Clone, Debug)]
pub enum Event {
    /// A file read is about to start
    ReadRequested,
    /// A file read finished
    FileSelected(LoadedFile),
    LayoutChanged(ChannelLayout),
    WidthEdited(usize),
    HeightEdited(usize),
    ExportRequested(ExportFormat)
}

/// What a session did with an event
#[derive(Debug)]
pub enum Reaction {
    /// State changed and was decoded again when a file is loaded
    ///
    /// Dimensions over the session limits leave no cached buffer,
    /// check [`Session::pixels`].
    Updated,
    /// A read may start, complete it with this ticket
    ReadPending(ReadTicket),
    /// The event carried a stale read and was dropped
    Ignored,
    Exported(ExportedImage),
    /// The codec refused the buffer
    ExportFailed(RawConvErrors),
    /// Export was requested with no decoded image
    NothingToExport
}

/// The current conversion state
#[derive(Clone, Debug, Default)]
pub struct Session {
    options:      SessionOptions,
    asset:        Option<RawAsset>,
    layout:       ChannelLayout,
    width:        usize,
    height:       usize,
    pixels:       Option<PixelBuffer>,
    // last ticket handed out
    generation:   u64,
    // ticket still waiting for its bytes
    pending_read: Option<u64>
}

impl Session {
    /// Create an empty session with default limits
    pub fn new() -> Session {
        Session::default()
    }

    pub fn new_with_options(options: SessionOptions) -> Session {
        Session {
            options,
            ..Default::default()
        }
    }

    pub const fn options(&self) -> SessionOptions {
        self.options
    }

    pub const fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Current `(width, height)`, either inferred or edited
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn asset(&self) -> Option<&RawAsset> {
        self.asset.as_ref()
    }

    /// The most recently decoded buffer
    ///
    /// `None` before any file was loaded, or when the current dimensions
    /// exceed the session limits.
    pub fn pixels(&self) -> Option<&PixelBuffer> {
        self.pixels.as_ref()
    }

    /// The request the next decode will use
    pub const fn decode_request(&self) -> DecodeRequest {
        DecodeRequest::new(self.layout, self.width, self.height)
    }

    /// Run one event to completion
    pub fn apply(mut self, event: Event) -> (Session, Reaction) {
        trace!("Session event {event:?}");

        let reaction = match event {
            Event::ReadRequested => Reaction::ReadPending(self.begin_read()),
            Event::FileSelected(file) => self.file_selected(file),
            Event::LayoutChanged(layout) => {
                self.layout = layout;
                if self.asset.is_some() {
                    self.infer();
                    self.redecode();
                }
                Reaction::Updated
            }
            Event::WidthEdited(width) => {
                self.width = width;
                if self.asset.is_some() {
                    self.redecode();
                }
                Reaction::Updated
            }
            Event::HeightEdited(height) => {
                self.height = height;
                if self.asset.is_some() {
                    self.redecode();
                }
                Reaction::Updated
            }
            Event::ExportRequested(format) => self.export(format)
        };
        (self, reaction)
    }

    /// Request a read and complete it immediately
    ///
    /// For collaborators whose reads are synchronous.
    pub fn load(self, name: impl Into<String>, bytes: Vec<u8>) -> (Session, Reaction) {
        let (session, reaction) = self.apply(Event::ReadRequested);

        let Reaction::ReadPending(ticket) = reaction else {
            return (session, reaction);
        };
        session.apply(Event::FileSelected(LoadedFile {
            ticket,
            name: name.into(),
            bytes
        }))
    }

    /// A serializable description of the current state
    pub fn summary(&self) -> SessionSummary {
        let request = self.decode_request();
        let byte_length = self.asset.as_ref().map_or(0, RawAsset::len);
        let required = request.required_bytes();

        SessionSummary {
            file_name: self.asset.as_ref().map(|a| a.name().to_string()),
            byte_length,
            layout: self.layout,
            width: self.width,
            height: self.height,
            required_bytes: required,
            padded_bytes: required.saturating_sub(byte_length),
            unused_bytes: byte_length.saturating_sub(required)
        }
    }

    fn begin_read(&mut self) -> ReadTicket {
        self.generation += 1;
        self.pending_read = Some(self.generation);

        ReadTicket::from_generation(self.generation)
    }

    fn file_selected(&mut self, file: LoadedFile) -> Reaction {
        if self.pending_read != Some(file.ticket.generation()) {
            debug!(
                "Dropping read {} of {:?}, latest read is {}",
                file.ticket.generation(),
                file.name,
                self.generation
            );
            return Reaction::Ignored;
        }
        self.pending_read = None;

        info!("Loaded {:?}, {} bytes", file.name, file.bytes.len());

        self.asset = Some(RawAsset::new(file.name, file.bytes));
        self.infer();
        self.redecode();

        Reaction::Updated
    }

    fn infer(&mut self) {
        let length = self.asset.as_ref().map_or(0, RawAsset::len);
        let (width, height) = infer_dimensions(length, self.layout);

        info!("Suggested dimensions {width}x{height} for {}", self.layout);

        self.width = width;
        self.height = height;
    }

    fn redecode(&mut self) {
        let Some(asset) = &self.asset else {
            self.pixels = None;
            return;
        };
        if self.width > self.options.max_width || self.height > self.options.max_height {
            warn!(
                "Not decoding {}x{}, limits are {}x{}",
                self.width, self.height, self.options.max_width, self.options.max_height
            );
            self.pixels = None;
            return;
        }
        self.pixels = Some(decode(asset.bytes(), self.layout, self.width, self.height));
    }

    fn export(&self, format: ExportFormat) -> Reaction {
        let (Some(asset), Some(pixels)) = (&self.asset, &self.pixels) else {
            debug!("Export to {format} requested with nothing decoded");
            return Reaction::NothingToExport;
        };

        match export(pixels, asset.name(), format) {
            Ok(image) => {
                info!("Exported {:?}, {} bytes", image.file_name, image.data.len());
                Reaction::Exported(image)
            }
            Err(err) => Reaction::ExportFailed(err)
        }
    }
}

/// Snapshot of a session, for printing
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionSummary {
    pub file_name:      Option<String>,
    pub byte_length:    usize,
    pub layout:         ChannelLayout,
    pub width:          usize,
    pub height:         usize,
    /// Bytes the current dimensions need
    pub required_bytes: usize,
    /// Bytes the decoder had to make up
    pub padded_bytes:   usize,
    /// Input bytes past the last decoded pixel
    pub unused_bytes:   usize
}
