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

    tests/common/mod.rs

    Common support routines for tests
*/
#![allow(dead_code)]

use satscan::header::{PERIPHERAL_LEN, PERIPHERAL_OFFSET, SATURN_MAGIC, TITLE_LEN, TITLE_OFFSET, VERSION_LEN, VERSION_OFFSET};
use satscan::{SECTOR_SIZE_MODE1, SECTOR_SIZE_RAW};

/// CD-ROM sync pattern that begins every raw sector.
pub const SYNC_PATTERN: [u8; 12] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];

fn put_padded(image: &mut [u8], offset: usize, width: usize, value: &[u8]) {
    let field = &mut image[offset..offset + width];
    field.fill(b' ');
    field[..value.len()].copy_from_slice(value);
}

/// Build a System ID block with the given fields, space padded like a mastered disc.
pub fn system_id(title: &str, version: &str, codes: &str) -> Vec<u8> {
    let mut block = vec![b' '; TITLE_OFFSET + TITLE_LEN];
    block[..16].copy_from_slice(SATURN_MAGIC);
    put_padded(&mut block, 0x10, 16, b"SEGA ENTERPRISES");
    put_padded(&mut block, 0x20, 10, b"GS-9001");
    put_padded(&mut block, VERSION_OFFSET, VERSION_LEN, version.as_bytes());
    put_padded(&mut block, 0x30, 8, b"19941122");
    put_padded(&mut block, 0x38, 8, b"CD-1/1");
    put_padded(&mut block, 0x40, 16, b"JTUE");
    put_padded(&mut block, PERIPHERAL_OFFSET, PERIPHERAL_LEN, codes.as_bytes());
    put_padded(&mut block, TITLE_OFFSET, TITLE_LEN, title.as_bytes());
    block
}

/// A cooked 2048 byte/sector image of `sectors` sectors with the block at offset 0.
pub fn iso_image(title: &str, version: &str, codes: &str, sectors: usize) -> Vec<u8> {
    let mut image = vec![0u8; SECTOR_SIZE_MODE1 * sectors];
    let block = system_id(title, version, codes);
    image[..block.len()].copy_from_slice(&block);
    image
}

/// A raw 2352 byte/sector image of `sectors` sectors with the block in the first sector's user data.
pub fn raw_image(title: &str, version: &str, codes: &str, sectors: usize) -> Vec<u8> {
    let mut image = vec![0u8; SECTOR_SIZE_RAW * sectors];
    for sector in image.chunks_mut(SECTOR_SIZE_RAW) {
        sector[..SYNC_PATTERN.len()].copy_from_slice(&SYNC_PATTERN);
        // Mode 1
        sector[15] = 0x01;
    }
    let block = system_id(title, version, codes);
    image[16..16 + block.len()].copy_from_slice(&block);
    image
}
