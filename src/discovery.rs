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

    src/discovery.rs

    Find disc images on the native filesystem.
*/

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

/// File extensions recognized as raw sector disc images. Comparison is case-insensitive.
pub const IMAGE_EXTENSIONS: [&str; 2] = ["iso", "bin"];

/// Return true if `path` has a recognized disc image extension.
pub fn is_disc_image(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// List the disc images under `path`.
///
/// Entries are visited in file name order so repeated runs over an unchanged tree produce the
/// same sequence. When `recursive` is set, subdirectories are descended into after the files
/// that sort before them; symlinked directories already visited are not entered again.
///
/// Only a failure to read `path` itself is an error. An entry that cannot be inspected is
/// logged and passed over, except for one named like a disc image, which is still listed so
/// that scanning it records why it could not be read.
pub fn discover_images(path: impl AsRef<Path>, recursive: bool) -> Result<Vec<PathBuf>, std::io::Error> {
    let root = fs::read_dir(path.as_ref())?;
    let mut images = Vec::new();
    let mut visited_dirs = HashSet::new();
    visited_dirs.insert(path.as_ref().canonicalize()?);
    discover_recursive(root, recursive, &mut images, &mut visited_dirs);
    Ok(images)
}

fn discover_recursive(
    dir: fs::ReadDir,
    recursive: bool,
    images: &mut Vec<PathBuf>,
    visited_dirs: &mut HashSet<PathBuf>,
) {
    let mut entries: Vec<fs::DirEntry> = dir
        .filter_map(|entry_res| match entry_res {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("discover_images(): Unreadable directory entry: {}", e);
                None
            }
        })
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        // Follow symlinks so a linked image or directory is treated like its target.
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if is_disc_image(&path) => {
                log::warn!("discover_images(): Listing unreadable image {}: {}", path.display(), e);
                images.push(path);
                continue;
            }
            Err(e) => {
                log::warn!("discover_images(): Passing over {}: {}", path.display(), e);
                continue;
            }
        };

        if metadata.is_dir() {
            if !recursive {
                continue;
            }
            let real_path = match path.canonicalize() {
                Ok(real_path) => real_path,
                Err(e) => {
                    log::warn!("discover_images(): Passing over directory {}: {}", path.display(), e);
                    continue;
                }
            };
            if !visited_dirs.insert(real_path) {
                log::debug!("discover_images(): Skipping already visited directory {}", path.display());
                continue;
            }
            match fs::read_dir(&path) {
                Ok(sub_dir) => discover_recursive(sub_dir, recursive, images, visited_dirs),
                Err(e) => log::warn!("discover_images(): Unable to read directory {}: {}", path.display(), e),
            }
        }
        else if metadata.is_file() && is_disc_image(&path) {
            log::trace!("discover_images(): Adding image: {}", path.display());
            images.push(path);
        }
    }
}
