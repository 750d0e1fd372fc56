use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// Configuration for corpus discovery
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Prefix of site directory names under the dataset root
    pub site_prefix: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            site_prefix: "PH".to_string(),
        }
    }
}

/// One annotation file selected for scanning
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    pub path: PathBuf,
    pub doc_id: String,
}

/// Walk the dataset root and select one TextGrid per speaker.
///
/// Layout: `<root>/<site>/<speaker>/<speaker-stem>-*.TextGrid`, where site
/// directories carry the configured prefix. Speakers with no valid TextGrid,
/// or with several and no unique `_fixed` revision, are skipped with a
/// warning. Entries come back path-sorted so batch order is deterministic.
pub fn discover_documents(root: &Path, config: &CorpusConfig) -> Result<Vec<CorpusEntry>> {
    let mut entries = Vec::new();

    for site in find_site_dirs(root, &config.site_prefix)? {
        for speaker in subdirectories(&site)? {
            if let Some(path) = find_speaker_textgrid(&speaker)? {
                let doc_id = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| doc_id_for(name, &config.site_prefix))
                    .unwrap_or_default();
                entries.push(CorpusEntry { path, doc_id });
            }
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

/// Immediate subdirectories of the root whose names carry the site prefix
pub fn find_site_dirs(root: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let dirs = subdirectories(root)?
        .into_iter()
        .filter(|dir| {
            dir.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(prefix))
        })
        .collect();
    Ok(dirs)
}

/// Pick the TextGrid to scan for one speaker directory.
///
/// A candidate is valid when its name is the speaker stem followed by an
/// optional session-letter group, an alphabetic recording name, and an
/// optional `_fixed` marker. Among several candidates a unique `_fixed`
/// revision wins.
pub fn find_speaker_textgrid(speaker_dir: &Path) -> Result<Option<PathBuf>> {
    let dir_name = speaker_dir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let stem = speaker_stem(dir_name);

    let mut candidates = Vec::new();
    let read = fs::read_dir(speaker_dir)
        .with_context(|| format!("Failed to read speaker directory: {:?}", speaker_dir))?;
    for entry in read {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if is_valid_textgrid(file_name, stem) {
            candidates.push(path);
        }
    }
    candidates.sort();

    if candidates.len() <= 1 {
        return Ok(candidates.pop());
    }

    let fixed: Vec<&PathBuf> = candidates
        .iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.contains("_fixed"))
        })
        .collect();

    if let [revision] = fixed.as_slice() {
        Ok(Some((*revision).clone()))
    } else {
        warn!("Too many TextGrids in {:?}, skipping speaker", speaker_dir);
        Ok(None)
    }
}

/// The speaker directory basename minus its trailing `-<letters>` suffix
pub fn speaker_stem(dir_name: &str) -> &str {
    match dir_name.rfind('-') {
        Some(pos) if is_alphabetic(&dir_name[pos + 1..]) => &dir_name[..pos],
        _ => dir_name,
    }
}

/// Leading `<prefix><digits>-<digits>-<digits>-` portion of a TextGrid
/// basename, or the full basename when the name does not follow that scheme.
pub fn doc_id_for(file_name: &str, site_prefix: &str) -> String {
    let parts: Vec<&str> = file_name.split('-').collect();
    if parts.len() >= 4 {
        let leading_digits = parts[0]
            .strip_prefix(site_prefix)
            .is_some_and(|rest| is_numeric(rest));
        if leading_digits && is_numeric(parts[1]) && is_numeric(parts[2]) {
            return format!("{}-{}-{}-", parts[0], parts[1], parts[2]);
        }
    }
    file_name.to_string()
}

fn is_valid_textgrid(file_name: &str, stem: &str) -> bool {
    let Some(rest) = file_name
        .strip_prefix(stem)
        .and_then(|rest| rest.strip_prefix('-'))
    else {
        return false;
    };
    let Some(middle) = rest.strip_suffix(".TextGrid") else {
        return false;
    };
    let middle = middle.strip_suffix("_fixed").unwrap_or(middle);

    match middle.split('-').collect::<Vec<_>>().as_slice() {
        [name] => is_alphabetic(name),
        [session, name] => {
            !session.is_empty()
                && session.chars().all(|c| c.is_ascii_uppercase())
                && is_alphabetic(name)
        }
        _ => false,
    }
}

fn is_alphabetic(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    let read =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?;
    for entry in read {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
