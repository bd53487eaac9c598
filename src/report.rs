/*
    satscan
    https://github.com/satscan/satscan

    Copyright 2025 satscan contributors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    src/report.rs

    Render a ScanReport as an aligned, fixed-column text table.
*/

use std::io::Write;

use strum::IntoEnumIterator;

use crate::{peripheral::Peripheral, scan::ScanReport};

pub const TOOL_NAME: &str = "Saturn Peripheral Scanner";

pub const COL_TITLE: usize = 50;
pub const COL_VERSION: usize = 8;
pub const COL_CODES: usize = 18;
pub const COL_PERIPHERALS: usize = 55;
/// Width of the horizontal rules.
pub const RULE_WIDTH: usize = 180;

const TRUNCATION_MARKER: &str = "...";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Replace control characters with U+FFFD so a value can never break a row across lines.
pub fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { char::REPLACEMENT_CHARACTER } else { c })
        .collect()
}

/// Pad `text` to `width` characters, or truncate it with a trailing marker if it is longer.
/// The result is always exactly `width` characters for widths of at least the marker length.
/// Control characters are replaced first.
pub fn fit(text: &str, width: usize) -> String {
    let text = single_line(text);
    if text.chars().count() > width {
        let keep = width.saturating_sub(TRUNCATION_MARKER.len());
        let mut fitted: String = text.chars().take(keep).collect();
        fitted.push_str(TRUNCATION_MARKER);
        fitted
    }
    else {
        format!("{:<width$}", text, width = width)
    }
}

fn column_header() -> String {
    format!(
        "{:<ct$} | {:<cv$} | {:<cc$} | {:<cp$} | Source Filename",
        "Game_Title (0x60)",
        "Version",
        "Peripheral_Codes",
        "Supported Peripherals",
        ct = COL_TITLE,
        cv = COL_VERSION,
        cc = COL_CODES,
        cp = COL_PERIPHERALS,
    )
}

/// Render the full report text: banner, legend, column header, one row per record, and a list
/// of skipped images if there were any. Every line, including the last, ends with a newline.
pub fn render(report: &ScanReport) -> String {
    let mut lines = vec![
        format!("# {} v{}", TOOL_NAME, env!("CARGO_PKG_VERSION")),
        format!("# Generated: {}", report.generated().format(TIMESTAMP_FORMAT)),
        format!("# Total files scanned: {}", report.files_scanned()),
        "#".to_string(),
        "# Peripheral Code Reference:".to_string(),
    ];

    lines.extend(Peripheral::iter().map(|p| format!("#   {} = {}", p.code(), p.name())));
    lines.push("#".to_string());
    lines.push(
        "# Format: Game_Title (0x60) | Version (0x2A) | Peripheral_Codes (0x50) | Supported Peripherals | Source Filename"
            .to_string(),
    );
    lines.push(format!("#{}", "=".repeat(RULE_WIDTH - 1)));
    lines.push(String::new());
    lines.push(column_header());
    lines.push("-".repeat(RULE_WIDTH));

    for record in report.records() {
        lines.push(format!(
            "{} | {} | {} | {} | {}",
            fit(&record.title, COL_TITLE),
            fit(&record.version, COL_VERSION),
            fit(&record.raw_codes, COL_CODES),
            fit(&record.peripherals_joined(), COL_PERIPHERALS),
            single_line(&record.source_filename)
        ));
    }

    if !report.skipped().is_empty() {
        lines.push("-".repeat(RULE_WIDTH));
        lines.push(format!("# Skipped: {} file(s)", report.skipped().len()));
        for skip in report.skipped() {
            lines.push(format!(
                "#   {}: {}",
                single_line(&skip.source_filename),
                single_line(&skip.reason.to_string())
            ));
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Render the report into a Write implementor.
pub fn write_report<T: Write>(report: &ScanReport, out: &mut T) -> Result<(), std::io::Error> {
    out.write_all(render(report).as_bytes())?;
    out.flush()
}
