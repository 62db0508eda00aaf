/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::ArgMatches;
use log::{info, Level};
use rawconv::export::ExportFormat;
use rawconv::layout::ChannelLayout;
use rawconv::session::SessionOptions;

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub out_dir:        PathBuf,
    pub layout:         ChannelLayout,
    pub width:          Option<usize>,
    pub height:         Option<usize>,
    pub formats:        Vec<ExportFormat>,
    pub session:        SessionOptions,
    pub probe:          bool,
    pub override_files: bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        CmdOptions {
            out_dir:        PathBuf::from("."),
            layout:         ChannelLayout::default(),
            width:          None,
            height:         None,
            formats:        vec![ExportFormat::PNG],
            session:        SessionOptions::default(),
            probe:          false,
            override_files: false
        }
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if let Some(dir) = options.get_one::<String>("out-dir") {
        cmd_options.out_dir = PathBuf::from(dir);
    }
    if let Some(layout) = options.get_one::<ChannelLayout>("layout") {
        info!("Treating input as {}", layout.description());
        cmd_options.layout = *layout;
    }
    cmd_options.width = options.get_one::<usize>("width").copied();
    cmd_options.height = options.get_one::<usize>("height").copied();

    if let Some(formats) = options.get_many::<ExportFormat>("format") {
        let mut unique = Vec::new();
        for format in formats.copied() {
            if !unique.contains(&format) {
                unique.push(format);
            }
        }
        cmd_options.formats = unique;
    }

    if let Some(width) = options.get_one::<usize>("max-width") {
        cmd_options.session = cmd_options.session.set_max_width(*width);
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        cmd_options.session = cmd_options.session.set_max_height(*height);
    }

    if options.value_source("probe") == Some(ValueSource::CommandLine) {
        info!("Probing inputs, nothing will be written");
        cmd_options.probe = true;
    }
    if options.value_source("all-yes") == Some(ValueSource::CommandLine) {
        info!("Setting all commands to yes");
        cmd_options.override_files = true;
    }
    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("warn") {
        Level::Warn
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

#[cfg(test)]
mod tests {
    use rawconv::export::ExportFormat;
    use rawconv::layout::ChannelLayout;

    use crate::cmd_args::create_cmd_args;
    use crate::cmd_parsers::global_options::parse_options;

    #[test]
    fn flags_map_to_options() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "rawconv", "-i", "a.raw", "-o", "out", "-l", "rgb", "-f", "jpg", "--height", "9",
                "--max-width", "100", "--probe", "-y"
            ])
            .unwrap();
        let options = parse_options(&matches);

        assert_eq!(options.out_dir.to_str(), Some("out"));
        assert_eq!(options.layout, ChannelLayout::RGB);
        assert_eq!(options.width, None);
        assert_eq!(options.height, Some(9));
        assert_eq!(options.formats, vec![ExportFormat::JPEG]);
        assert_eq!(options.session.max_width, 100);
        assert_eq!(options.session.max_height, 1 << 14);
        assert!(options.probe);
        assert!(options.override_files);
    }

    #[test]
    fn defaults_do_not_probe_or_overwrite() {
        let matches = create_cmd_args()
            .try_get_matches_from(["rawconv", "-i", "a.raw"])
            .unwrap();
        let options = parse_options(&matches);

        assert!(!options.probe);
        assert!(!options.override_files);
        assert_eq!(options.formats, vec![ExportFormat::PNG]);
    }
}
