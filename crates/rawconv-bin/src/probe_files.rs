/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use rawconv::errors::RawConvErrors;
use rawconv::export::{suggested_file_name, ExportFormat};
use rawconv::session::Session;
use serde_json::{json, Value};

/// What probing a session reports, the summary plus the files an export would write
fn probe_report(session: &Session, formats: &[ExportFormat]) -> Value {
    let summary = session.summary();
    let outputs: Vec<String> = match &summary.file_name {
        Some(name) => formats
            .iter()
            .map(|format| suggested_file_name(name, *format))
            .collect(),
        None => Vec::new()
    };

    json!({
        "summary": summary,
        "formats": formats,
        "outputs": outputs
    })
}

/// Print what a session would decode to standard output
pub fn print_summary(session: &Session, formats: &[ExportFormat]) -> Result<(), RawConvErrors> {
    let json = serde_json::to_string_pretty(&probe_report(session, formats))
        .map_err(|e| RawConvErrors::GenericString(format!("Could not serialize summary: {e}")))?;

    println!("{json}");
    Ok(())
}
