//! Input discovery: single files, directories, glob patterns, ZIP archives.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, warn};

use invx_core::models::InputConfig;
use invx_core::source::{load_text, text_from_bytes};
use invx_core::Document;

/// Base name of a path, for display and the `File Name` column.
pub fn display_name(path: &str) -> String {
    path.replace('\\', "/")
        .rsplit('/')
        .next()
        .unwrap_or(path)
        .to_string()
}

/// Whether `path` names a ZIP archive.
pub fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

/// Files selected by a directory, a glob pattern or a single path.
pub fn expand_paths(input: &str, config: &InputConfig) -> anyhow::Result<Vec<PathBuf>> {
    let path = Path::new(input);
    let pattern = if path.is_dir() {
        format!("{}/**/*", input.trim_end_matches('/'))
    } else {
        input.to_string()
    };

    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .filter(|p| {
            let name = p.to_string_lossy();
            // archives are unpacked later, their entries filtered there
            !config.is_junk(&name) && (is_zip(p) || config.accepts(&name))
        })
        .collect();
    files.sort();

    debug!("{} matched {} files", pattern, files.len());
    Ok(files)
}

/// Read every accepted document in a ZIP archive.
///
/// An unreadable archive is fatal; an unreadable entry becomes an error
/// marker for that entry only.
pub fn read_zip(path: &Path, config: &InputConfig) -> anyhow::Result<Vec<Document>> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))?;

    let mut documents = Vec::new();
    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry {} in {}: {}", i, path.display(), e);
                continue;
            }
        };

        if entry.is_dir() {
            continue;
        }

        let entry_name = entry.name().to_string();
        if !config.accepts(&entry_name) {
            debug!("Skipping {}", entry_name);
            continue;
        }

        let mut data = Vec::new();
        let text = match entry.read_to_end(&mut data) {
            Ok(_) => text_from_bytes(&entry_name, &data).map_err(anyhow::Error::from),
            Err(e) => Err(anyhow::Error::from(e)),
        };
        documents.push(Document::from_result(display_name(&entry_name), text));
    }

    Ok(documents)
}

/// Load the documents named by `input`.
pub fn collect_documents(input: &str, config: &InputConfig) -> anyhow::Result<Vec<Document>> {
    let path = Path::new(input);
    if path.is_file() && is_zip(path) {
        return read_zip(path, config);
    }

    let mut documents = Vec::new();
    for file in expand_paths(input, config)? {
        if is_zip(&file) {
            documents.extend(read_zip(&file, config)?);
            continue;
        }
        let name = display_name(&file.to_string_lossy());
        documents.push(Document::from_result(name, load_text(&file)));
    }
    Ok(documents)
}
