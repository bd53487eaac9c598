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

    src/header.rs

    Decoding of the Saturn System ID block (the first 0xD0 bytes of IP.BIN).
*/

use std::io::{Cursor, Seek, SeekFrom};

use binrw::{binrw, BinRead};

use crate::{peripheral::expand, ScanError};

/// Hardware identifier present at the start of every retail System ID block.
pub const SATURN_MAGIC: &[u8; 16] = b"SEGA SEGASATURN ";

pub const PRODUCT_NUMBER_OFFSET: usize = 0x20;
pub const VERSION_OFFSET: usize = 0x2A;
pub const VERSION_LEN: usize = 6;
pub const AREA_CODES_OFFSET: usize = 0x40;
pub const PERIPHERAL_OFFSET: usize = 0x50;
pub const PERIPHERAL_LEN: usize = 16;
pub const TITLE_OFFSET: usize = 0x60;
pub const TITLE_LEN: usize = 112;
/// Total span of the decoded block, ending with the title field.
pub const HEADER_LEN: usize = TITLE_OFFSET + TITLE_LEN;

#[derive(Debug)]
#[binrw]
#[brw(big)]
struct SystemIdBlock {
    hardware_id: [u8; 16],
    maker_id: [u8; 16],
    product_number: [u8; 10],
    version: [u8; 6],
    release_date: [u8; 8],
    device_info: [u8; 8],
    area_codes: [u8; 16],
    peripherals: [u8; 16],
    title: [u8; 112],
}

/// The decoded text fields of a System ID block.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscHeader {
    pub base_offset: usize,
    pub hardware_id: String,
    pub maker_id: String,
    pub product_number: String,
    pub version: String,
    pub release_date: String,
    pub device_info: String,
    pub area_codes: String,
    /// The meaningful code string, with trailing padding removed.
    pub peripheral_codes: String,
    pub title: String,
}

impl DiscHeader {
    pub fn has_saturn_magic(&self) -> bool {
        self.hardware_id == "SEGA SEGASATURN"
    }

    /// Expand the peripheral codes into display names, in declaration order.
    pub fn peripherals(&self) -> Vec<String> {
        expand(&self.peripheral_codes)
    }
}

/// Strip the space and NUL padding used by fixed-width header fields.
pub(crate) fn trim_padding(text: &str) -> &str {
    text.trim_end_matches([' ', '\0'])
}

/// Decode a fixed-width field byte-for-byte as Latin-1. This cannot fail; every byte maps to a char.
pub(crate) fn latin1_field(bytes: &[u8]) -> String {
    let text: String = bytes.iter().map(|&b| b as char).collect();
    trim_padding(&text).to_string()
}

/// Decode the title field. Invalid UTF-8 sequences become U+FFFD rather than failing the image.
fn title_field(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}

/// Decode the System ID block starting at `base_offset` within `image`.
/// Only fails if the block would extend past the end of the image.
pub fn decode(image: &[u8], base_offset: usize) -> Result<DiscHeader, ScanError> {
    let out_of_range = ScanError::FieldDecodeError {
        offset: base_offset,
        len:    HEADER_LEN,
        size:   image.len(),
    };

    match base_offset.checked_add(HEADER_LEN) {
        Some(end) if end <= image.len() => {}
        _ => return Err(out_of_range),
    }

    let mut cursor = Cursor::new(image);
    cursor.seek(SeekFrom::Start(base_offset as u64))?;
    let block = SystemIdBlock::read(&mut cursor).map_err(|e| {
        log::error!("decode(): Failed to read System ID block at {:#X}: {}", base_offset, e);
        out_of_range
    })?;

    let header = DiscHeader {
        base_offset,
        hardware_id: latin1_field(&block.hardware_id),
        maker_id: latin1_field(&block.maker_id),
        product_number: latin1_field(&block.product_number),
        version: latin1_field(&block.version),
        release_date: latin1_field(&block.release_date),
        device_info: latin1_field(&block.device_info),
        area_codes: latin1_field(&block.area_codes),
        peripheral_codes: latin1_field(&block.peripherals),
        title: title_field(&block.title),
    };

    log::trace!(
        "decode(): {:#X}: title: \"{}\" version: \"{}\" codes: \"{}\"",
        base_offset,
        header.title,
        header.version,
        header.peripheral_codes
    );
    Ok(header)
}
