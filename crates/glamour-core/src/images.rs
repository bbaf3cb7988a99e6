//! Reference images named `<bundle id>;<display name>.<ext>`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Bundle, BundleId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleImage {
    pub bundle_id: BundleId,
    pub name: String,
    pub path: PathBuf,
}

/// Splits a file stem into its bundle id and display name.
pub fn parse_image_stem(stem: &str) -> Option<(BundleId, String)> {
    let mut parts = stem.split(';');
    let id = parts.next()?.trim().parse::<BundleId>().ok()?;
    let name = parts.next()?.trim().to_string();
    if parts.next().is_some() {
        return None;
    }
    Some((id, name))
}

/// Lists the files in `dir` whose names follow the image convention, ordered
/// by file name. A missing directory has no images.
pub fn scan_images(dir: &Path) -> Result<Vec<BundleImage>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(dir = %dir.display(), "Image directory not found");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let images = paths
        .into_iter()
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?;
            let Some((bundle_id, name)) = parse_image_stem(stem) else {
                debug!(path = %path.display(), "Ignoring file outside the image naming scheme");
                return None;
            };
            Some(BundleImage {
                bundle_id,
                name,
                path,
            })
        })
        .collect();

    Ok(images)
}

/// Attaches each image to the first bundle sharing its id and renames that
/// bundle after the file. Returns how many images found a bundle.
pub fn associate_images(bundles: &mut [Bundle], images: &[BundleImage]) -> usize {
    let mut applied = 0;
    for image in images {
        let Some(bundle) = bundles.iter_mut().find(|b| b.id == image.bundle_id) else {
            debug!(bundle = image.bundle_id, "No bundle for image");
            continue;
        };
        bundle.image = Some(image.path.clone());
        if !image.name.is_empty() {
            bundle.name = image.name.clone();
        }
        applied += 1;
    }
    applied
}
