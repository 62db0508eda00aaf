/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{debug, info};
use rawconv::buffer::RGBA_COMPONENTS;
use rawconv::export::ExportedImage;
use rawconv::session::{Event, LoadedFile, Reaction, ReadTicket, Session};
use wasm_bindgen::prelude::*;

use crate::enums::{WasmExportFormat, WasmLayout};
use crate::utils::set_panic_hook;

pub mod enums;
mod utils;

#[wasm_bindgen(start)]
pub fn setup() {
    wasm_logger::init(wasm_logger::Config::default());
    set_panic_hook();
    info!("rawconv-wasm is live");
}

/// Convert a number typed into a dimension field
///
/// Negative, fractional and non-finite values come straight from the page,
/// they become the nearest usable dimension.
fn to_dimension(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value.floor() as usize
    } else {
        0
    }
}

/// A conversion session exposed to javascript
#[wasm_bindgen]
#[derive(Default)]
pub struct RawSession {
    session: Session
}

#[wasm_bindgen]
impl RawSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RawSession {
        RawSession::default()
    }

    fn apply(&mut self, event: Event) -> Reaction {
        let session = std::mem::take(&mut self.session);
        let (session, reaction) = session.apply(event);
        self.session = session;
        reaction
    }

    /// Announce a file read, pass the returned ticket to `file_loaded`
    ///
    /// Tickets are truncated to 32 bits for javascript.
    pub fn begin_read(&mut self) -> u32 {
        match self.apply(Event::ReadRequested) {
            Reaction::ReadPending(ticket) => ticket.generation() as u32,
            _ => 0
        }
    }

    /// Hand over the bytes of a finished read
    ///
    /// Returns false when a newer read was started in the meantime,
    /// the bytes are then dropped.
    pub fn file_loaded(&mut self, ticket: u32, name: String, bytes: Vec<u8>) -> bool {
        let file = LoadedFile {
            ticket: ReadTicket::from_generation(u64::from(ticket)),
            name,
            bytes
        };
        let accepted = matches!(self.apply(Event::FileSelected(file)), Reaction::Updated);

        if !accepted {
            debug!("Discarded stale read {ticket}");
        }
        accepted
    }

    pub fn set_layout(&mut self, layout: WasmLayout) {
        self.apply(Event::LayoutChanged(layout.to_layout()));
    }

    pub fn layout(&self) -> WasmLayout {
        WasmLayout::from_layout(self.session.layout())
    }

    pub fn set_width(&mut self, width: f64) {
        self.apply(Event::WidthEdited(to_dimension(width)));
    }

    pub fn set_height(&mut self, height: f64) {
        self.apply(Event::HeightEdited(to_dimension(height)));
    }

    pub fn width(&self) -> usize {
        self.session.dimensions().0
    }

    pub fn height(&self) -> usize {
        self.session.dimensions().1
    }

    /// True when there is a decoded image with at least one pixel
    pub fn has_image(&self) -> bool {
        self.session.pixels().is_some_and(|p| !p.is_empty())
    }

    /// Copy of the decoded RGBA buffer, ready for `ImageData`
    pub fn rgba(&self) -> Option<Vec<u8>> {
        self.session.pixels().map(|p| p.as_bytes().to_vec())
    }

    /// Copy the decoded RGBA buffer into `out_pixel`
    ///
    /// `out_pixel` must hold `width * height * 4` bytes.
    pub fn flatten_rgba(&self, out_pixel: &mut [u8]) -> Result<(), JsError> {
        let pixels = self
            .session
            .pixels()
            .ok_or_else(|| JsError::new("No image decoded"))?;

        if out_pixel.len() != pixels.pixel_count() * RGBA_COMPONENTS {
            return Err(JsError::new(&format!(
                "Expected a buffer of {} bytes but found {}",
                pixels.pixel_count() * RGBA_COMPONENTS,
                out_pixel.len()
            )));
        }
        out_pixel.copy_from_slice(pixels.as_bytes());
        Ok(())
    }

    /// Encode the current image, `undefined` when nothing is loaded
    pub fn export_image(&mut self, format: WasmExportFormat) -> Result<Option<ExportedFile>, JsError> {
        match self.apply(Event::ExportRequested(format.to_format())) {
            Reaction::Exported(image) => Ok(Some(ExportedFile { image })),
            Reaction::ExportFailed(err) => Err(JsError::new(&err.to_string())),
            _ => Ok(None)
        }
    }
}

/// An encoded image ready for download
#[wasm_bindgen]
pub struct ExportedFile {
    image: ExportedImage
}

#[wasm_bindgen]
impl ExportedFile {
    pub fn data(&self) -> Vec<u8> {
        self.image.data.clone()
    }

    pub fn file_name(&self) -> String {
        self.image.file_name.clone()
    }

    pub fn mime_type(&self) -> String {
        self.image.format.mime_type().to_string()
    }

    pub fn format(&self) -> WasmExportFormat {
        WasmExportFormat::from_format(self.image.format)
    }
}
