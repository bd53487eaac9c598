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

use std::{
    fmt::{Display, Formatter},
    io::Write,
    path::PathBuf,
};

use crate::scan::args::{scan_parser, ScanParams};
use bpaf::*;

#[derive(Clone, Debug)]
pub(crate) enum Command {
    Version,
    Scan(ScanParams),
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Version => write!(f, "version"),
            Command::Scan(_) => write!(f, "scan"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct AppParams {
    pub global:  GlobalOptions,
    pub command: Command,
}

#[derive(Debug)]
pub struct GlobalOptions {
    pub silent: bool,
}

impl GlobalOptions {
    pub fn loud<F: FnMut()>(&self, mut f: F) {
        if !self.silent {
            f();
            let _ = std::io::stdout().flush();
        }
    }
}

pub fn global_options_parser() -> impl Parser<GlobalOptions> {
    let silent = long("silent")
        .help("Suppress all output except required output")
        .switch(); // Switch returns a bool, true if the flag is present

    construct!(GlobalOptions { silent })
}

pub(crate) fn out_file_parser() -> impl Parser<PathBuf> {
    long("out_file")
        .short('o')
        .argument::<PathBuf>("OUTPUT_FILE")
        .help("Path to the report file to write")
        .fallback(PathBuf::from(DEFAULT_REPORT_FILE))
}

pub(crate) const DEFAULT_REPORT_FILE: &str = "satscan_report.txt";

pub(crate) fn command_parser() -> impl Parser<AppParams> {
    let global = global_options_parser();

    let version = pure(Command::Version)
        .to_options()
        .command("version")
        .help("Display version information and exit");

    let scan = construct!(Command::Scan(scan_parser()))
        .to_options()
        .command("scan")
        .help("Scan disc images and write a peripheral support report");

    let command = construct!([version, scan]);

    construct!(AppParams { global, command })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppParams {
        command_parser().to_options().run_inner(args).unwrap()
    }

    #[test]
    fn parse_scan_defaults() {
        let params = parse(&["scan", "games"]);
        assert!(!params.global.silent);
        match params.command {
            Command::Scan(scan) => {
                assert_eq!(scan.paths, vec![PathBuf::from("games")]);
                assert_eq!(scan.out_file, PathBuf::from(DEFAULT_REPORT_FILE));
                assert!(!scan.no_recurse);
                assert!(!scan.stdout);
                assert!(!scan.any_code);
                assert!(!scan.require_magic);
            }
            other => panic!("unexpected command {}", other),
        }
    }

    #[test]
    fn parse_scan_options() {
        let params = parse(&[
            "--silent",
            "scan",
            "-o",
            "out.txt",
            "--no_recurse",
            "--any_code",
            "--require_magic",
            "a.iso",
            "b.bin",
        ]);
        assert!(params.global.silent);
        match params.command {
            Command::Scan(scan) => {
                assert_eq!(scan.paths, vec![PathBuf::from("a.iso"), PathBuf::from("b.bin")]);
                assert_eq!(scan.out_file, PathBuf::from("out.txt"));
                assert!(scan.no_recurse);
                assert!(scan.any_code);
                assert!(scan.require_magic);
            }
            other => panic!("unexpected command {}", other),
        }
    }

    #[test]
    fn parse_scan_requires_path() {
        assert!(command_parser().to_options().run_inner(&["scan"]).is_err());
    }

    #[test]
    fn parse_version() {
        assert!(matches!(parse(&["version"]).command, Command::Version));
    }
}
