/*
    satscan - satscan_cli
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
*/
use std::{fs::File, io::BufWriter, path::Path};

use crate::args::GlobalOptions;
use anyhow::{Context, Error};
use satscan::{
    discovery::discover_images,
    report::{render, write_report},
    HeaderLocator,
    LocatorOptions,
    Peripheral,
    ScanError,
    ScanRecord,
    Scanner,
};

pub mod args;

pub(crate) fn run(global: &GlobalOptions, params: &args::ScanParams) -> Result<(), Error> {
    let required_code = if params.any_code {
        None
    }
    else {
        Some(Peripheral::RomCartridge.code())
    };
    let options = LocatorOptions::default()
        .required_code(required_code)
        .require_magic(params.require_magic);
    let mut scanner = Scanner::new(HeaderLocator::new(options));

    for path in &params.paths {
        if path.is_dir() {
            let images = discover_images(path, !params.no_recurse)
                .with_context(|| format!("Failed to list directory {}", path.display()))?;
            global.loud(|| println!("Found {} image(s) in {}", images.len(), path.display()));
            for image in images {
                scan_one(global, &mut scanner, &image);
            }
        }
        else if path.is_file() {
            scan_one(global, &mut scanner, path);
        }
        else {
            let line = progress_line(
                path,
                scanner.skip(path, ScanError::UnreadableFile("Path does not exist".to_string())),
            );
            global.loud(|| println!("{}", line));
        }
    }

    let report = scanner.finish();
    if report.files_scanned() == 0 {
        global.loud(|| println!("No files found to scan."));
        return Ok(());
    }

    if params.stdout {
        print!("{}", render(&report));
    }

    let file = File::create(&params.out_file)
        .with_context(|| format!("Failed to create report file {}", params.out_file.display()))?;
    let mut writer = BufWriter::new(file);
    write_report(&report, &mut writer)
        .with_context(|| format!("Failed to write report file {}", params.out_file.display()))?;

    global.loud(|| {
        println!(
            "Summary: {} successful, {} skipped",
            report.records().len(),
            report.skipped().len()
        );
        println!("Results written to: {}", params.out_file.display());
    });
    Ok(())
}

fn scan_one(global: &GlobalOptions, scanner: &mut Scanner, path: &Path) {
    let line = progress_line(path, scanner.scan_file(path));
    global.loud(|| println!("{}", line));
}

fn progress_line(path: &Path, outcome: Result<&ScanRecord, &ScanError>) -> String {
    match outcome {
        Ok(record) => format!(
            "  {}: {} {} [{}]",
            path.display(),
            record.title,
            record.version,
            record.raw_codes
        ),
        Err(reason) => format!("  {}: skipped ({})", path.display(), reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::args::ScanParams;
    use std::fs;

    fn params(out_file: &Path, paths: Vec<std::path::PathBuf>) -> ScanParams {
        ScanParams {
            out_file: out_file.to_path_buf(),
            no_recurse: false,
            stdout: false,
            any_code: false,
            require_magic: false,
            paths,
        }
    }

    fn image(codes: &[u8]) -> Vec<u8> {
        let mut image = vec![0u8; 0x800];
        image[..16].copy_from_slice(b"SEGA SEGASATURN ");
        image[0x2A..0x30].copy_from_slice(b"V1.000");
        image[0x50..0x60].fill(b' ');
        image[0x50..0x50 + codes.len()].copy_from_slice(codes);
        image[0x60..0x60 + 9].copy_from_slice(b"CLI GAME ");
        image
    }

    #[test]
    fn run_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let games = dir.path().join("games");
        fs::create_dir(&games).unwrap();
        fs::write(games.join("good.iso"), image(b"JR")).unwrap();
        fs::write(games.join("bad.bin"), vec![0u8; 16]).unwrap();
        let out_file = dir.path().join("report.txt");

        let global = GlobalOptions { silent: true };
        run(&global, &params(&out_file, vec![games, dir.path().join("missing")])).unwrap();

        let text = fs::read_to_string(&out_file).unwrap();
        assert!(text.contains("# Total files scanned: 3"));
        assert!(text.lines().any(|l| l.starts_with("CLI GAME") && l.ends_with(" | good.iso")));
        assert!(text.contains("# Skipped: 2 file(s)"));
        assert!(text.contains("#   missing: Unable to read file: Path does not exist"));
    }

    #[test]
    fn run_any_code_relaxes_locator() {
        let dir = tempfile::tempdir().unwrap();
        let disc = dir.path().join("pad_only.iso");
        fs::write(&disc, image(b"J")).unwrap();
        let out_file = dir.path().join("report.txt");
        let global = GlobalOptions { silent: true };

        run(&global, &params(&out_file, vec![disc.clone()])).unwrap();
        let strict = fs::read_to_string(&out_file).unwrap();
        assert!(strict.contains("# Skipped: 1 file(s)"));

        let mut relaxed = params(&out_file, vec![disc]);
        relaxed.any_code = true;
        run(&global, &relaxed).unwrap();
        let relaxed = fs::read_to_string(&out_file).unwrap();
        assert!(!relaxed.contains("# Skipped:"));
        assert!(relaxed.lines().any(|l| l.contains("| Control Pad ")));
    }

    #[test]
    fn progress_line_for_missing_path() {
        let mut scanner = Scanner::default();
        let missing = Path::new("games/missing.iso");
        let line = progress_line(
            missing,
            scanner.skip(missing, ScanError::UnreadableFile("Path does not exist".to_string())),
        );
        assert_eq!(
            line,
            format!(
                "  {}: skipped (Unable to read file: Path does not exist)",
                missing.display()
            )
        );
        assert_eq!(scanner.skipped().len(), 1);
    }

    #[test]
    fn progress_line_for_record() {
        let mut scanner = Scanner::default();
        let path = Path::new("good.iso");
        let line = progress_line(path, scanner.scan_bytes(path, &image(b"JR")));
        assert_eq!(line, "  good.iso: CLI GAME V1.000 [JR]");
    }
}
