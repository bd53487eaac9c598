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

    src/locate.rs

    Locate the System ID block within a disc image.

    Images are not byte-identical across dumps: a 2048 byte/sector ISO carries
    the block at the first byte, while a 2352 byte/sector raw image prefixes
    each sector with 16 bytes of sync and header. Rather than trusting a single
    offset, each known layout is probed in order and the first whose
    peripheral field looks like a real code string is selected.
*/

use crate::{
    header::{latin1_field, HEADER_LEN, PERIPHERAL_LEN, PERIPHERAL_OFFSET, SATURN_MAGIC},
    peripheral::{is_known_code, Peripheral},
    ScanError,
    RAW_SECTOR_DATA_OFFSET,
};

/// A known placement of the System ID block within an image.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeaderLayout {
    pub name: &'static str,
    pub base_offset: usize,
}

impl HeaderLayout {
    /// Cooked 2048 byte/sector image; the block starts at the first byte.
    pub const NOMINAL: HeaderLayout = HeaderLayout::new("ISO/2048", 0);
    /// Raw 2352 byte/sector image; the block follows the sync pattern and sector header.
    pub const SHIFTED: HeaderLayout = HeaderLayout::new("RAW/2352", RAW_SECTOR_DATA_OFFSET);

    pub const fn new(name: &'static str, base_offset: usize) -> Self {
        HeaderLayout { name, base_offset }
    }
}

/// Layouts probed by default, in probe order.
pub const DEFAULT_LAYOUTS: [HeaderLayout; 2] = [HeaderLayout::NOMINAL, HeaderLayout::SHIFTED];

/// Tunables for header location.
#[derive(Clone, Debug)]
pub struct LocatorOptions {
    layouts: Vec<HeaderLayout>,
    required_code: Option<char>,
    require_magic: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        LocatorOptions {
            layouts: DEFAULT_LAYOUTS.to_vec(),
            required_code: Some(Peripheral::RomCartridge.code()),
            require_magic: false,
        }
    }
}

impl LocatorOptions {
    /// Append a layout to the end of the probe list.
    pub fn with_layout(mut self, layout: HeaderLayout) -> Self {
        self.layouts.push(layout);
        self
    }

    /// Set the code that must appear in a plausible peripheral field, or None to accept any
    /// string of known codes. Defaults to 'R' (ROM Cartridge).
    pub fn required_code(mut self, code: Option<char>) -> Self {
        self.required_code = code;
        self
    }

    /// Require the "SEGA SEGASATURN " hardware id at the start of a candidate block.
    pub fn require_magic(mut self, state: bool) -> Self {
        self.require_magic = state;
        self
    }

    pub fn layouts(&self) -> &[HeaderLayout] {
        &self.layouts
    }
}

#[derive(Clone, Debug, Default)]
pub struct HeaderLocator {
    options: LocatorOptions,
}

impl HeaderLocator {
    pub fn new(options: LocatorOptions) -> Self {
        HeaderLocator { options }
    }

    pub fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// The minimum image size able to hold a block at every configured layout.
    pub fn required_len(&self) -> usize {
        self.options
            .layouts
            .iter()
            .map(|layout| layout.base_offset.saturating_add(HEADER_LEN))
            .max()
            .unwrap_or(HEADER_LEN)
    }

    /// Probe the configured layouts in order and return the first plausible one.
    pub fn locate(&self, image: &[u8]) -> Result<HeaderLayout, ScanError> {
        let required = self.required_len();
        if image.len() < required {
            return Err(ScanError::ImageTooSmall {
                size: image.len(),
                required,
            });
        }

        for layout in self.options.layouts.iter() {
            if !self.is_plausible(image, layout) {
                continue;
            }
            if !has_magic(image, layout) {
                log::warn!(
                    "locate(): Selected layout {} at {:#X} has no Saturn hardware id",
                    layout.name,
                    layout.base_offset
                );
            }
            log::debug!("locate(): Selected layout {} at {:#X}", layout.name, layout.base_offset);
            return Ok(*layout);
        }

        Err(ScanError::HeaderNotFound)
    }

    /// Return true if the peripheral field at `layout` holds a plausible code string: non-empty,
    /// made only of known codes, and containing the required code if one is configured.
    pub fn is_plausible(&self, image: &[u8], layout: &HeaderLayout) -> bool {
        let start = layout.base_offset.saturating_add(PERIPHERAL_OFFSET);
        let Some(field) = image.get(start..start.saturating_add(PERIPHERAL_LEN)) else {
            return false;
        };

        let codes = latin1_field(field);
        if codes.is_empty() {
            log::trace!("is_plausible(): {}: empty peripheral field", layout.name);
            return false;
        }
        if let Some(bad) = codes.chars().find(|&c| !is_known_code(c)) {
            log::trace!("is_plausible(): {}: unknown code {:?} in {:?}", layout.name, bad, codes);
            return false;
        }
        if let Some(required) = self.options.required_code {
            if !codes.contains(required) {
                log::trace!("is_plausible(): {}: {:?} lacks required code {}", layout.name, codes, required);
                return false;
            }
        }
        if self.options.require_magic && !has_magic(image, layout) {
            log::trace!("is_plausible(): {}: hardware id mismatch", layout.name);
            return false;
        }
        true
    }
}

fn has_magic(image: &[u8], layout: &HeaderLayout) -> bool {
    let start = layout.base_offset;
    image.get(start..start.saturating_add(SATURN_MAGIC.len())) == Some(&SATURN_MAGIC[..])
}

/// Locate the base offset of the System ID block using the default layouts and plausibility rules.
pub fn locate(image: &[u8]) -> Result<usize, ScanError> {
    HeaderLocator::default()
        .locate(image)
        .map(|layout| layout.base_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::AREA_CODES_OFFSET;

    const IMAGE_LEN: usize = 0x800;

    fn image_with_codes(base: usize, codes: &[u8]) -> Vec<u8> {
        let mut image = vec![0u8; IMAGE_LEN];
        image[base..base + 16].copy_from_slice(SATURN_MAGIC);
        image[base + AREA_CODES_OFFSET..base + AREA_CODES_OFFSET + 4].copy_from_slice(b"JTUE");
        let field = &mut image[base + PERIPHERAL_OFFSET..base + PERIPHERAL_OFFSET + PERIPHERAL_LEN];
        field.fill(b' ');
        field[..codes.len()].copy_from_slice(codes);
        image
    }

    #[test]
    fn locate_nominal_offset() {
        let image = image_with_codes(0, b"JR");
        assert_eq!(locate(&image), Ok(0));
    }

    #[test]
    fn locate_shifted_offset() {
        let image = image_with_codes(0x10, b"JAR");
        assert_eq!(locate(&image), Ok(0x10));
        assert_eq!(HeaderLocator::default().locate(&image), Ok(HeaderLayout::SHIFTED));
    }

    #[test]
    fn locate_rejects_all_zero_field() {
        let image = vec![0u8; IMAGE_LEN];
        assert_eq!(locate(&image), Err(ScanError::HeaderNotFound));
    }

    #[test]
    fn locate_rejects_all_ff_field() {
        let image = vec![0xFFu8; IMAGE_LEN];
        assert_eq!(locate(&image), Err(ScanError::HeaderNotFound));
    }

    #[test]
    fn locate_too_small() {
        let image = vec![0u8; 0x40];
        assert_eq!(
            locate(&image),
            Err(ScanError::ImageTooSmall {
                size: 0x40,
                required: 0x10 + HEADER_LEN,
            })
        );
    }

    #[test]
    fn locate_requires_rom_cartridge_by_default() {
        let image = image_with_codes(0, b"JW");
        assert_eq!(locate(&image), Err(ScanError::HeaderNotFound));

        let locator = HeaderLocator::new(LocatorOptions::default().required_code(None));
        assert_eq!(locator.locate(&image), Ok(HeaderLayout::NOMINAL));
    }

    #[test]
    fn locate_rejects_unknown_codes() {
        let image = image_with_codes(0, b"JRZ");
        assert_eq!(locate(&image), Err(ScanError::HeaderNotFound));
    }

    #[test]
    fn locate_require_magic() {
        let mut image = image_with_codes(0, b"JR");
        let locator = HeaderLocator::new(LocatorOptions::default().require_magic(true));
        assert_eq!(locator.locate(&image), Ok(HeaderLayout::NOMINAL));

        image[0..16].fill(0);
        assert_eq!(locator.locate(&image), Err(ScanError::HeaderNotFound));
        // Without the magic requirement the code field alone is enough.
        assert_eq!(locate(&image), Ok(0));
    }

    #[test]
    fn locate_with_extra_layout() {
        let base = 0x400;
        let image = image_with_codes(base, b"JR");
        assert_eq!(locate(&image), Err(ScanError::HeaderNotFound));

        let locator = HeaderLocator::new(LocatorOptions::default().with_layout(HeaderLayout::new("test", base)));
        assert_eq!(locator.required_len(), base + HEADER_LEN);
        assert_eq!(locator.locate(&image), Ok(HeaderLayout::new("test", base)));
    }
}
