/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};
use rawconv::export::ExportFormat;
use rawconv::layout::ChannelLayout;

fn parse_layout(value: &str) -> Result<ChannelLayout, String> {
    value.parse::<ChannelLayout>().map_err(|e| e.to_string())
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    value.parse::<ExportFormat>().map_err(|e| e.to_string())
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("rawconv")
        .about("Convert headerless raw pixel dumps to png or jpeg")
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Raw file to read pixels from")
            .action(ArgAction::Append)
            .required(true))
        .arg(Arg::new("out-dir")
            .short('o')
            .long("out-dir")
            .help("Directory exported images are written to")
            .default_value("."))
        .arg(Arg::new("layout")
            .short('l')
            .long("layout")
            .help("Byte arrangement of one pixel")
            .long_help("Byte arrangement of one pixel.\n\
                        grayscale: 1 byte per pixel\n\
                        rgb: 3 bytes per pixel, in R,G,B order\n\
                        rgba: 4 bytes per pixel, in R,G,B,A order")
            .value_parser(parse_layout)
            .default_value("grayscale"))
        .arg(Arg::new("width")
            .long("width")
            .help_heading("DIMENSIONS")
            .help("Override the inferred width")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("height")
            .long("height")
            .help_heading("DIMENSIONS")
            .help("Override the inferred height")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("DIMENSIONS")
            .help("Largest width that will be decoded")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("DIMENSIONS")
            .help("Largest height that will be decoded")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("format")
            .short('f')
            .long("format")
            .help("Output format, png (lossless) or jpg (lossy). Can be repeated")
            .action(ArgAction::Append)
            .value_parser(parse_format)
            .default_value("png"))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help("Print what would be decoded as json and exit without writing"))
        .arg(Arg::new("all-yes")
            .short('y')
            .long("yes")
            .action(ArgAction::SetTrue)
            .help("Overwrite existing output files"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about each conversion step"))
}

#[cfg(test)]
mod tests {
    use rawconv::export::ExportFormat;
    use rawconv::layout::ChannelLayout;

    use crate::cmd_args::create_cmd_args;

    #[test]
    fn command_is_well_formed() {
        create_cmd_args().debug_assert();
    }

    #[test]
    fn defaults() {
        let matches = create_cmd_args()
            .try_get_matches_from(["rawconv", "-i", "a.raw"])
            .unwrap();

        assert_eq!(
            *matches.get_one::<ChannelLayout>("layout").unwrap(),
            ChannelLayout::Grayscale
        );
        let formats: Vec<ExportFormat> = matches
            .get_many::<ExportFormat>("format")
            .unwrap()
            .copied()
            .collect();
        assert_eq!(formats, vec![ExportFormat::PNG]);
        assert!(matches.get_one::<usize>("width").is_none());
    }

    #[test]
    fn repeated_formats_and_overrides() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "rawconv", "-i", "a.raw", "-i", "b.raw", "-l", "rgba", "-f", "png", "-f", "jpeg",
                "--width", "640", "--height", "480"
            ])
            .unwrap();

        assert_eq!(matches.get_raw("in").unwrap().count(), 2);
        assert_eq!(
            *matches.get_one::<ChannelLayout>("layout").unwrap(),
            ChannelLayout::RGBA
        );
        assert_eq!(matches.get_many::<ExportFormat>("format").unwrap().count(), 2);
        assert_eq!(*matches.get_one::<usize>("width").unwrap(), 640);
        assert_eq!(*matches.get_one::<usize>("height").unwrap(), 480);
    }

    #[test]
    fn unknown_layout_is_rejected() {
        let result = create_cmd_args().try_get_matches_from(["rawconv", "-i", "a.raw", "-l", "cmyk"]);

        assert!(result.is_err());
    }
}
