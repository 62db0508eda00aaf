/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::upper_case_acronyms)]

use rawconv::export::ExportFormat;
use rawconv::layout::ChannelLayout;
use wasm_bindgen::prelude::wasm_bindgen;

/// A 1 to 1 mapping of supported raw layouts
/// but with the `wasm_bindgen` attribute.
#[wasm_bindgen(js_name=Layout)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WasmLayout {
    Grayscale,
    RGB,
    RGBA
}

impl WasmLayout {
    pub fn from_layout(layout: ChannelLayout) -> WasmLayout {
        match layout {
            ChannelLayout::Grayscale => Self::Grayscale,
            ChannelLayout::RGB => Self::RGB,
            ChannelLayout::RGBA => Self::RGBA
        }
    }
    pub fn to_layout(self) -> ChannelLayout {
        match self {
            WasmLayout::Grayscale => ChannelLayout::Grayscale,
            WasmLayout::RGB => ChannelLayout::RGB,
            WasmLayout::RGBA => ChannelLayout::RGBA
        }
    }
}

/// A one-to-one mapping of the export formats
/// but with a `wasm_bindgen` attribute
#[wasm_bindgen(js_name=ExportFormat)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WasmExportFormat {
    /// Lossless
    PNG,
    /// Lossy
    JPEG
}

impl WasmExportFormat {
    pub fn from_format(format: ExportFormat) -> WasmExportFormat {
        match format {
            ExportFormat::PNG => Self::PNG,
            ExportFormat::JPEG => Self::JPEG
        }
    }
    pub fn to_format(self) -> ExportFormat {
        match self {
            WasmExportFormat::PNG => ExportFormat::PNG,
            WasmExportFormat::JPEG => ExportFormat::JPEG
        }
    }
}

#[cfg(test)]
mod tests {
    use rawconv::export::ExportFormat;
    use rawconv::layout::ChannelLayout;

    use crate::enums::{WasmExportFormat, WasmLayout};

    #[test]
    fn mappings_round_trip() {
        for layout in ChannelLayout::ALL {
            assert_eq!(WasmLayout::from_layout(layout).to_layout(), layout);
        }
        for format in ExportFormat::ALL {
            assert_eq!(WasmExportFormat::from_format(format).to_format(), format);
        }
    }
}
