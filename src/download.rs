/*
 * Copyright (c) 2025 the bloomz-rs Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::client::Client;
use crate::errors::BloomzError;
use bytes::Bytes;
use futures::StreamExt;
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// What to do when the target filename already exists on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum DuplicatePolicy {
    Overwrite,
    #[default]
    Rename,
    Skip,
}

/// Outcome of collision resolution for a single download
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The requested path is free, or the policy overwrites it
    Save(PathBuf),

    /// The requested path exists; a numbered candidate was chosen instead
    Renamed { requested: PathBuf, path: PathBuf },

    /// The requested path exists and the policy skips the download
    Skip(PathBuf),
}

impl Resolution {
    /// The path to write to, or `None` when the download is skipped
    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Resolution::Save(path) | Resolution::Renamed { path, .. } => Some(path),
            Resolution::Skip(_) => None,
        }
    }
}

/// Decides the final on-disk path for a download.
///
/// Joins `out_dir` and `filename`, then applies the duplicate policy against
/// the filesystem. A returned path is non-existent at the moment of the check
/// (unless the policy is overwrite); races with concurrent external writers
/// are out of scope.
pub fn resolve(filename: &str, out_dir: Option<&Path>, policy: DuplicatePolicy) -> Resolution {
    let requested = match out_dir {
        Some(dir) => dir.join(filename),
        None => PathBuf::from(filename),
    };

    if !requested.exists() {
        return Resolution::Save(requested);
    }

    match policy {
        DuplicatePolicy::Overwrite => Resolution::Save(requested),
        DuplicatePolicy::Skip => Resolution::Skip(requested),
        DuplicatePolicy::Rename => {
            let path = next_free_path(&requested);
            Resolution::Renamed { requested, path }
        }
    }
}

// Probes root_1.ext, root_2.ext, ... until an unused name is found. The
// suffix goes before the final extension only.
fn next_free_path(requested: &Path) -> PathBuf {
    let stem = requested
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let ext = requested.extension().and_then(|e| e.to_str());
    let parent = requested.parent();

    let mut n = 1u32;
    loop {
        let name = match ext {
            Some(ext) => format!("{stem}_{n}.{ext}"),
            None => format!("{stem}_{n}"),
        };
        let candidate = match parent {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        };
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Extracts the `filename` parameter from a `Content-Disposition` header
/// value, accepting quoted, bare, and RFC 5987 `filename*` forms.
pub fn filename_from_content_disposition(value: &str) -> Option<String> {
    let mut plain = None;
    for part in value.split(';') {
        let Some((key, val)) = part.trim().split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            // charset'lang'percent-encoded; takes precedence over filename=
            "filename*" => {
                if let Some(idx) = val.rfind('\'')
                    && let Ok(decoded) = urlencoding::decode(&val[idx + 1..])
                {
                    return Some(decoded.into_owned());
                }
            }
            "filename" => plain = Some(val.trim().trim_matches('"').to_string()),
            _ => {}
        }
    }
    plain
}

/// Downloads a single photo to disk.
///
/// The target filename comes from the `Content-Disposition` header of the
/// download response, never from the photo id. The body is streamed to the
/// resolved path chunk by chunk; the file handle is closed on every exit
/// path. Returns the written path, or `None` when the duplicate policy
/// skipped the file.
pub async fn fetch_photo(
    client: &Client,
    photo_id: &str,
    out_dir: Option<&Path>,
    policy: DuplicatePolicy,
) -> Result<Option<PathBuf>, BloomzError> {
    let resp = client.get_raw(&format!("download/{photo_id}")).await?;

    let filename = resp
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(filename_from_content_disposition)
        .ok_or_else(|| BloomzError::ContentDispositionMissing(photo_id.to_string()))?;

    let path = match resolve(&filename, out_dir, policy) {
        Resolution::Save(path) => {
            info!("Saving {}", path.display());
            path
        }
        Resolution::Renamed { requested, path } => {
            info!("{} exists; saving as {}", requested.display(), path.display());
            path
        }
        Resolution::Skip(path) => {
            info!("{} exists; skipped", path.display());
            return Ok(None);
        }
    };

    let mut file = std::fs::File::create(&path)?;
    let mut body = resp.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk: Bytes = chunk?;
        file.write_all(&chunk)?;
    }
    Ok(Some(path))
}
