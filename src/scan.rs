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

    src/scan.rs

    Combine header location, field decoding and code expansion into one
    record per image, and accumulate records into a report. A failure on one
    image is recorded as a skip and never stops the batch.
*/

use std::{fs::File, io::Read, path::Path};

use chrono::{DateTime, Local};

use crate::{header::decode, locate::HeaderLocator, ScanError};

/// The decoded result for a single disc image.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanRecord {
    pub source_filename: String,
    pub title: String,
    pub version: String,
    pub raw_codes: String,
    /// One name per code in `raw_codes`, in the same order. Duplicates are kept.
    pub peripheral_names: Vec<String>,
    pub layout: String,
    pub base_offset: usize,
    pub product_number: String,
    pub area_codes: String,
}

impl ScanRecord {
    /// Build a record using the default layouts and plausibility rules.
    pub fn build(path: impl AsRef<Path>, image: &[u8]) -> Result<Self, ScanError> {
        ScanRecord::build_with(&HeaderLocator::default(), path, image)
    }

    pub fn build_with(locator: &HeaderLocator, path: impl AsRef<Path>, image: &[u8]) -> Result<Self, ScanError> {
        let layout = locator.locate(image)?;
        let header = decode(image, layout.base_offset)?;
        let peripheral_names = header.peripherals();

        Ok(ScanRecord {
            source_filename: source_filename(path.as_ref()),
            title: header.title,
            version: header.version,
            raw_codes: header.peripheral_codes,
            peripheral_names,
            layout: layout.name.to_string(),
            base_offset: layout.base_offset,
            product_number: header.product_number,
            area_codes: header.area_codes,
        })
    }

    /// The expanded peripheral names as a single comma-separated string.
    pub fn peripherals_joined(&self) -> String {
        self.peripheral_names.join(", ")
    }
}

/// An image that could not be decoded, and why.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedImage {
    pub source_filename: String,
    pub reason: ScanError,
}

/// The ordered result of a batch scan.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct ScanReport {
    records: Vec<ScanRecord>,
    skipped: Vec<SkippedImage>,
    generated: DateTime<Local>,
}

impl ScanReport {
    pub fn new(records: Vec<ScanRecord>, skipped: Vec<SkippedImage>, generated: DateTime<Local>) -> Self {
        ScanReport {
            records,
            skipped,
            generated,
        }
    }

    /// Successfully decoded images, in discovery order.
    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    /// Images that were skipped, in discovery order.
    pub fn skipped(&self) -> &[SkippedImage] {
        &self.skipped
    }

    /// Total number of images scanned, whether decoded or skipped.
    pub fn files_scanned(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    pub fn generated(&self) -> DateTime<Local> {
        self.generated
    }
}

/// Accumulates scan results over a sequence of images.
#[derive(Default)]
pub struct Scanner {
    locator: HeaderLocator,
    records: Vec<ScanRecord>,
    skipped: Vec<SkippedImage>,
}

impl Scanner {
    pub fn new(locator: HeaderLocator) -> Self {
        Scanner {
            locator,
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Scan an image already held in memory.
    pub fn scan_bytes(&mut self, path: impl AsRef<Path>, image: &[u8]) -> Result<&ScanRecord, &ScanError> {
        let path = path.as_ref();
        match ScanRecord::build_with(&self.locator, path, image) {
            Ok(record) => {
                log::debug!(
                    "scan_bytes(): {}: \"{}\" {} [{}]",
                    record.source_filename,
                    record.title,
                    record.version,
                    record.raw_codes
                );
                let index = self.records.len();
                self.records.push(record);
                Ok(&self.records[index])
            }
            Err(e) => self.skip(path, e),
        }
    }

    /// Read a source to its end and scan the result. A read error skips the image.
    pub fn scan_source<R: Read>(&mut self, path: impl AsRef<Path>, mut source: R) -> Result<&ScanRecord, &ScanError> {
        let mut image = Vec::new();
        match source.read_to_end(&mut image) {
            Ok(_) => self.scan_bytes(path, &image),
            Err(e) => self.skip(path.as_ref(), e.into()),
        }
    }

    /// Open, read and scan a file. The file is closed before this returns.
    pub fn scan_file(&mut self, path: impl AsRef<Path>) -> Result<&ScanRecord, &ScanError> {
        let path = path.as_ref();
        match read_image(path) {
            Ok(image) => self.scan_bytes(path, &image),
            Err(e) => self.skip(path, e),
        }
    }

    /// Record a skip for an image that could not be scanned at all, such as a missing path.
    pub fn skip(&mut self, path: impl AsRef<Path>, reason: ScanError) -> Result<&ScanRecord, &ScanError> {
        let source_filename = source_filename(path.as_ref());
        log::warn!("Skipping {}: {}", source_filename, reason);
        let index = self.skipped.len();
        self.skipped.push(SkippedImage {
            source_filename,
            reason,
        });
        Err(&self.skipped[index].reason)
    }

    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn skipped(&self) -> &[SkippedImage] {
        &self.skipped
    }

    /// Finish the batch, stamping the report with the current local time.
    pub fn finish(self) -> ScanReport {
        self.finish_at(Local::now())
    }

    pub fn finish_at(self, generated: DateTime<Local>) -> ScanReport {
        ScanReport::new(self.records, self.skipped, generated)
    }
}

fn read_image(path: &Path) -> Result<Vec<u8>, ScanError> {
    let mut file = File::open(path)?;
    let mut image = Vec::new();
    file.read_to_end(&mut image)?;
    Ok(image)
}

fn source_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
