/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde-support")]

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::export::ExportFormat;
use crate::layout::ChannelLayout;
use crate::session::SessionSummary;

impl Serialize for SessionSummary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        const STRUCT_FIELDS: usize = 8;
        let mut state = serializer.serialize_struct("SessionSummary", STRUCT_FIELDS)?;

        state.serialize_field("file", &self.file_name)?;
        state.serialize_field("size", &self.byte_length)?;
        state.serialize_field("layout", &self.layout)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("required_bytes", &self.required_bytes)?;
        state.serialize_field("padded_bytes", &self.padded_bytes)?;
        state.serialize_field("unused_bytes", &self.unused_bytes)?;

        state.end()
    }
}

impl Serialize for ChannelLayout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(self.name())
    }
}

impl Serialize for ExportFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(self.extension())
    }
}
