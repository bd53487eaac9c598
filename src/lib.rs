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

    src/lib.rs

    satscan locates the System ID header in Sega Saturn disc images, decodes
    the title, version and peripheral support fields, and renders an aligned
    report over a batch of images.
*/

pub mod discovery;
pub mod header;
pub mod locate;
pub mod peripheral;
pub mod report;
pub mod scan;

use thiserror::Error;

/// Size of the user data area of a CD-ROM Mode 1 sector.
pub const SECTOR_SIZE_MODE1: usize = 2048;
/// Size of a raw CD-ROM sector including sync, header, EDC and ECC.
pub const SECTOR_SIZE_RAW: usize = 2352;
/// Offset of the user data within a raw Mode 1 sector (12 sync bytes + 4 header bytes).
pub const RAW_SECTOR_DATA_OFFSET: usize = 16;

/// Errors that cause a single disc image to be skipped. None of these abort a batch scan.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Image too small to contain a header ({size} bytes, {required} required)")]
    ImageTooSmall { size: usize, required: usize },
    #[error("No plausible Saturn header found")]
    HeaderNotFound,
    #[error("Header field range {offset:#X}+{len} exceeds image size of {size} bytes")]
    FieldDecodeError { offset: usize, len: usize, size: usize },
    #[error("Unable to read file: {0}")]
    UnreadableFile(String),
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::UnreadableFile(err.to_string())
    }
}

pub use crate::header::{decode, DiscHeader, HEADER_LEN};
pub use crate::locate::{locate, HeaderLayout, HeaderLocator, LocatorOptions};
pub use crate::peripheral::{expand, Peripheral};
pub use crate::report::render;
pub use crate::scan::{ScanRecord, ScanReport, Scanner, SkippedImage};

pub mod prelude {
    pub use crate::{
        discovery::{discover_images, is_disc_image},
        header::{decode, DiscHeader},
        locate::{locate, HeaderLayout, HeaderLocator, LocatorOptions},
        peripheral::{expand, Peripheral},
        report::render,
        scan::{ScanRecord, ScanReport, Scanner, SkippedImage},
        ScanError,
    };
}
