use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use anyhow::Context;

use crate::foundation::error::{FilmError, FilmResult};
use crate::manifest::Manifest;

/// File extensions (lowercase) accepted as frames.
pub const FRAME_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Return `true` when `name` carries a frame image extension (case-insensitive).
pub fn is_frame_file(name: &str) -> bool {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    !stem.is_empty()
        && FRAME_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
}

/// Natural, case-insensitive ordering: digit runs compare by numeric value, so `frame2` sorts
/// before `frame10`.
///
/// Names equal under that ordering fall back to plain byte order so the result is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_cmp_base(a, b).then_with(|| a.cmp(b))
}

fn natural_cmp_base(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();
    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let da = take_digits(&mut ai);
                let db = take_digits(&mut bi);
                let ord = cmp_digit_runs(&da, &db);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(ca), Some(cb)) => {
                let ord = ca.to_lowercase().cmp(cb.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_digits(it: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = it.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Scan `dir` for frame images and return them as a naturally ordered manifest.
///
/// Subdirectories and files with other extensions are ignored, as are names that are not valid
/// UTF-8.
#[tracing::instrument]
pub fn scan_frames_dir(dir: &Path) -> FilmResult<Manifest> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read frames dir '{}'", dir.display()))?;

    let mut names = Vec::<String>::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("list frames dir '{}'", dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if is_frame_file(&name) {
            names.push(name);
        }
    }

    names.sort_by(|a, b| natural_cmp(a, b));
    tracing::debug!(frames = names.len(), "scanned frames dir");
    Ok(Manifest::new(names))
}

/// Write `manifest` as pretty-printed JSON, creating parent directories as needed.
pub fn write_manifest(manifest: &Manifest, out: &Path) -> FilmResult<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create manifest dir '{}'", parent.display()))?;
    }
    let json = manifest.to_json_pretty()?;
    std::fs::write(out, json)
        .map_err(|e| FilmError::manifest(format!("write manifest '{}': {e}", out.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/generate.rs"]
mod tests;
