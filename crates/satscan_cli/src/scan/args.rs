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
use crate::args::out_file_parser;

use bpaf::{construct, long, positional, Parser};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub(crate) struct ScanParams {
    pub(crate) out_file: PathBuf,
    pub(crate) no_recurse: bool,
    pub(crate) stdout: bool,
    pub(crate) any_code: bool,
    pub(crate) require_magic: bool,
    pub(crate) paths: Vec<PathBuf>,
}

fn no_recurse_parser() -> impl Parser<bool> {
    long("no_recurse")
        .help("Only scan the top level of each directory")
        .switch()
}

fn stdout_parser() -> impl Parser<bool> {
    long("stdout")
        .help("Also print the report to standard output")
        .switch()
}

fn any_code_parser() -> impl Parser<bool> {
    long("any_code")
        .help("Accept a peripheral field without the ROM Cartridge (R) code when locating the header")
        .switch()
}

fn require_magic_parser() -> impl Parser<bool> {
    long("require_magic")
        .help("Require the SEGA SEGASATURN hardware id when locating the header")
        .switch()
}

fn paths_parser() -> impl Parser<Vec<PathBuf>> {
    positional::<PathBuf>("PATH")
        .help("Disc image file(s) or directories to scan")
        .some("At least one PATH must be specified")
}

pub(crate) fn scan_parser() -> impl Parser<ScanParams> {
    let out_file = out_file_parser();
    let no_recurse = no_recurse_parser();
    let stdout = stdout_parser();
    let any_code = any_code_parser();
    let require_magic = require_magic_parser();
    let paths = paths_parser();

    construct!(ScanParams {
        out_file,
        no_recurse,
        stdout,
        any_code,
        require_magic,
        paths
    })
}
