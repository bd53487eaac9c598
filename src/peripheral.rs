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

    src/peripheral.rs

    The peripheral code table. Each code is a single uppercase ASCII letter
    declared in the System ID header's peripheral field.
*/

use std::fmt::{self, Display, Formatter};

use strum::IntoEnumIterator;

/// A peripheral class a disc may declare support for.
/// Variants are declared in code order; `Peripheral::iter()` yields the legend order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, strum::EnumIter)]
pub enum Peripheral {
    AnalogController,
    LinkCable,
    DirectLinkCable,
    AnalogController3d,
    FloppyDiskDrive,
    VirtuaGun,
    ControlPad,
    Keyboard,
    Mouse,
    VideoCdCard,
    PachinkoController,
    RomCartridge,
    SteeringController,
    Multitap,
    RamCartridge,
    NetlinkModem,
}

impl Peripheral {
    /// The single character code used in the header field.
    pub fn code(&self) -> char {
        match self {
            Peripheral::AnalogController => 'A',
            Peripheral::LinkCable => 'C',
            Peripheral::DirectLinkCable => 'D',
            Peripheral::AnalogController3d => 'E',
            Peripheral::FloppyDiskDrive => 'F',
            Peripheral::VirtuaGun => 'G',
            Peripheral::ControlPad => 'J',
            Peripheral::Keyboard => 'K',
            Peripheral::Mouse => 'M',
            Peripheral::VideoCdCard => 'P',
            Peripheral::PachinkoController => 'Q',
            Peripheral::RomCartridge => 'R',
            Peripheral::SteeringController => 'S',
            Peripheral::Multitap => 'T',
            Peripheral::RamCartridge => 'W',
            Peripheral::NetlinkModem => 'X',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Peripheral::AnalogController => "Analog Controller",
            Peripheral::LinkCable => "Link Cable (JP)",
            Peripheral::DirectLinkCable => "DirectLink Cable (US)",
            Peripheral::AnalogController3d => "3D Analog Controller",
            Peripheral::FloppyDiskDrive => "Floppy Disk Drive",
            Peripheral::VirtuaGun => "Virtua Gun",
            Peripheral::ControlPad => "Control Pad",
            Peripheral::Keyboard => "Keyboard",
            Peripheral::Mouse => "Mouse",
            Peripheral::VideoCdCard => "Video CD Card",
            Peripheral::PachinkoController => "Pachinko Controller",
            Peripheral::RomCartridge => "ROM Cartridge",
            Peripheral::SteeringController => "Steering Controller",
            Peripheral::Multitap => "Multitap",
            Peripheral::RamCartridge => "RAM Cartridge",
            Peripheral::NetlinkModem => "Netlink Modem",
        }
    }

    /// Look up a peripheral by its code. Lookup is case-sensitive; lowercase codes are not recognized.
    pub fn from_code(code: char) -> Option<Peripheral> {
        Peripheral::iter().find(|p| p.code() == code)
    }
}

impl Display for Peripheral {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Return true if `code` appears in the peripheral code table.
pub fn is_known_code(code: char) -> bool {
    Peripheral::from_code(code).is_some()
}

/// Expand a peripheral code string into human-readable names.
///
/// Order follows the input and duplicate codes expand once per occurrence. Characters not in the
/// table are kept as an "Unknown code" entry so the anomaly shows up in the report.
pub fn expand(codes: &str) -> Vec<String> {
    codes
        .chars()
        .map(|c| match Peripheral::from_code(c) {
            Some(p) => p.name().to_string(),
            None => format!("Unknown code '{}'", c),
        })
        .collect()
}
