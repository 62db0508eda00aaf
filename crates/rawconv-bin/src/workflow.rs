/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsStr;
use std::fs;

use clap::ArgMatches;
use log::{debug, info, warn};
use rawconv::errors::RawConvErrors;
use rawconv::session::{Event, LoadedFile, Reaction, Session};

use crate::cmd_parsers::global_options::CmdOptions;
use crate::file_io::{read_raw_file, write_exported};
use crate::probe_files::print_summary;

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), RawConvErrors> {
    info!("Creating conversions from input");

    if !cmd_opts.probe {
        fs::create_dir_all(&cmd_opts.out_dir)?;
    }
    let inputs = args
        .get_raw("in")
        .ok_or(RawConvErrors::GenericStr("No input files"))?;

    for in_file in inputs {
        convert_file(in_file, cmd_opts)?;
    }
    Ok(())
}

/// Drive one fresh session through the events the flags describe
fn convert_file(in_file: &OsStr, cmd_opts: &CmdOptions) -> Result<(), RawConvErrors> {
    let session = Session::new_with_options(cmd_opts.session);
    let (session, _) = session.apply(Event::LayoutChanged(cmd_opts.layout));

    let (session, reaction) = session.apply(Event::ReadRequested);
    let Reaction::ReadPending(ticket) = reaction else {
        return Err(RawConvErrors::GenericStr("Session refused to start a read"));
    };
    let (name, bytes) = read_raw_file(in_file)?;
    let (mut session, _) = session.apply(Event::FileSelected(LoadedFile {
        ticket,
        name,
        bytes
    }));

    if let Some(width) = cmd_opts.width {
        debug!("Overriding width with {width}");
        session = session.apply(Event::WidthEdited(width)).0;
    }
    if let Some(height) = cmd_opts.height {
        debug!("Overriding height with {height}");
        session = session.apply(Event::HeightEdited(height)).0;
    }

    let summary = session.summary();
    if summary.padded_bytes > 0 {
        warn!(
            "{:?} is {} bytes short of {}x{} {}, missing bytes are padded",
            in_file, summary.padded_bytes, summary.width, summary.height, summary.layout
        );
    }

    if cmd_opts.probe {
        return print_summary(&session, &cmd_opts.formats);
    }

    for format in &cmd_opts.formats {
        if !format.is_lossless() && cmd_opts.layout.has_alpha() {
            warn!("{format} has no alpha channel, alpha of {:?} is dropped", in_file);
        }
        let (next, reaction) = session.apply(Event::ExportRequested(*format));
        session = next;

        match reaction {
            Reaction::Exported(image) => {
                write_exported(&cmd_opts.out_dir, &image, cmd_opts.override_files)?;
            }
            Reaction::ExportFailed(err) => return Err(err),
            Reaction::NothingToExport => {
                let (width, height) = session.dimensions();
                let limits = session.options();

                return Err(RawConvErrors::GenericString(format!(
                    "{in_file:?}: {width}x{height} exceeds the decode limits of {}x{}",
                    limits.max_width, limits.max_height
                )));
            }
            Reaction::Updated | Reaction::ReadPending(_) | Reaction::Ignored => {
                return Err(RawConvErrors::GenericStr("Session did not run the export"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use rawconv::errors::RawConvErrors;
    use rawconv::export::ExportFormat;

    use crate::cmd_args::create_cmd_args;
    use crate::cmd_parsers::global_options::{parse_options, CmdOptions};
    use crate::workflow::{convert_file, create_and_exec_workflow_from_cmd};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rawconv-workflow-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_input(dir: &Path, name: &str, length: usize) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, (0..length).map(|i| i as u8).collect::<Vec<u8>>()).unwrap();
        path
    }

    /// Width and height from the IHDR chunk
    fn png_dimensions(data: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes(data[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(data[20..24].try_into().unwrap());
        (width, height)
    }

    fn options_for(out_dir: &Path) -> CmdOptions {
        let mut options = CmdOptions::new();
        options.out_dir = out_dir.to_path_buf();
        options.formats = vec![ExportFormat::PNG, ExportFormat::JPEG];
        options
    }

    #[test]
    fn writes_every_requested_format() {
        let dir = scratch_dir("formats");
        let input = write_input(&dir, "dump.raw", 100);
        let out_dir = dir.join("out");
        fs::create_dir_all(&out_dir).unwrap();

        convert_file(input.as_os_str(), &options_for(&out_dir)).unwrap();

        let png = fs::read(out_dir.join("dump.png")).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(png_dimensions(&png), (10, 10));

        let jpeg = fs::read(out_dir.join("dump.jpg")).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn overrides_are_applied_after_inference() {
        let dir = scratch_dir("overrides");
        let input = write_input(&dir, "wide.raw", 100);

        let mut options = options_for(&dir);
        options.formats = vec![ExportFormat::PNG];
        options.width = Some(20);
        options.height = Some(5);

        convert_file(input.as_os_str(), &options).unwrap();

        let png = fs::read(dir.join("wide.png")).unwrap();
        assert_eq!(png_dimensions(&png), (20, 5));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn exceeding_limits_fails_without_writing() {
        let dir = scratch_dir("limits");
        let input = write_input(&dir, "big.raw", 100);

        let mut options = options_for(&dir);
        options.session = options.session.set_max_width(8);

        let err = convert_file(input.as_os_str(), &options).unwrap_err();

        assert!(matches!(err, RawConvErrors::GenericString(_)));
        assert!(err.to_string().contains("10x10"));
        assert!(!dir.join("big.png").exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn codec_errors_fail_the_conversion() {
        let dir = scratch_dir("codec");
        let input = write_input(&dir, "flat.raw", 16);

        let mut options = options_for(&dir);
        options.width = Some(0);

        let err = convert_file(input.as_os_str(), &options).unwrap_err();

        assert!(matches!(err, RawConvErrors::EncodeErrors(_)));
        assert!(!dir.join("flat.png").exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn probing_writes_nothing() {
        let dir = scratch_dir("probe");
        let input = write_input(&dir, "probe.raw", 64);
        let out_dir = dir.join("never-created");

        let matches = create_cmd_args()
            .try_get_matches_from([
                "rawconv",
                "-i",
                input.to_str().unwrap(),
                "-o",
                out_dir.to_str().unwrap(),
                "--probe"
            ])
            .unwrap();
        let options = parse_options(&matches);

        create_and_exec_workflow_from_cmd(&matches, &options).unwrap();
        assert!(!out_dir.exists());

        fs::remove_dir_all(dir).unwrap();
    }
}
