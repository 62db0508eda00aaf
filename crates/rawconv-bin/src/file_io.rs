/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use rawconv::errors::RawConvErrors;
use rawconv::export::ExportedImage;

/// Read a whole raw file and the name used for its exports
pub fn read_raw_file(path: &OsStr) -> Result<(String, Vec<u8>), RawConvErrors> {
    let path = Path::new(path);
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let bytes = fs::read(path)?;
    debug!("Read {} bytes from {:?}", bytes.len(), path);

    Ok((name, bytes))
}

/// Where `image` will be written inside `out_dir`
pub fn output_path(out_dir: &Path, image: &ExportedImage) -> PathBuf {
    out_dir.join(&image.file_name)
}

/// Write an encoded image, refusing to replace files unless allowed
pub fn write_exported(
    out_dir: &Path, image: &ExportedImage, override_files: bool
) -> Result<PathBuf, RawConvErrors> {
    let path = output_path(out_dir, image);

    let mut open_options = OpenOptions::new();
    open_options.write(true);

    if override_files {
        open_options.create(true).truncate(true);
    } else {
        open_options.create_new(true);
    }
    let file = open_options.open(&path).map_err(|err| match err.kind() {
        ErrorKind::AlreadyExists => RawConvErrors::GenericString(format!(
            "Output file {path:?} exists, pass --yes to overwrite it"
        )),
        _ => RawConvErrors::from(err)
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(&image.data)?;
    writer.flush()?;

    info!("Wrote {} bytes to {:?}", image.data.len(), path);

    Ok(path)
}
