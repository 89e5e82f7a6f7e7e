use crate::error::{invalid_input, not_found};
use anyhow::Result;
use contactsift_config::AppConfig;
use contactsift_core::{parse_strategy_list, StrategyName, Upload};
use contactsift_sources::CommandRecognizer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tiff", "webp"];

pub fn recognizer_from_config(config: &AppConfig) -> Result<CommandRecognizer> {
    let recognizer = config.recognizer.as_ref().ok_or_else(|| {
        invalid_input("no recognizer configured; set [recognizer] command in config.toml")
    })?;
    Ok(CommandRecognizer::new(
        recognizer.command.clone(),
        recognizer.args.clone(),
    ))
}

/// Strategies from `--strategy` flags, or the configured list when none were given.
pub fn resolve_strategies(
    flags: &[String],
    configured: &[StrategyName],
) -> Result<Vec<StrategyName>> {
    if flags.is_empty() {
        return Ok(configured.to_vec());
    }
    Ok(parse_strategy_list(flags)?)
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads a file into an upload; read failures travel with the upload.
pub fn read_upload(path: &Path) -> Upload {
    let filename = display_name(path);
    match fs::read(path) {
        Ok(bytes) => Upload::new(filename, bytes),
        Err(err) => Upload::failed(filename, format!("failed to read file: {err}")),
    }
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

/// Image files directly inside `dir`, sorted by file name.
pub fn image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(not_found(format!("directory {}", dir.display())));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(dir = %dir.display(), count = files.len(), "image files found");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::{is_image_file, resolve_strategies};
    use contactsift_core::default_strategies;
    use std::path::Path;

    #[test]
    fn image_extensions_are_case_insensitive() {
        assert!(is_image_file(Path::new("scan.PNG")));
        assert!(is_image_file(Path::new("photo.jpeg")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("README")));
    }

    #[test]
    fn strategy_flags_override_config() {
        let configured = default_strategies();
        let resolved = resolve_strategies(&[], &configured).expect("resolve");
        assert_eq!(resolved, configured);

        let flags = vec!["enhanced".to_string(), "enhanced".to_string()];
        let resolved = resolve_strategies(&flags, &configured).expect("resolve");
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].as_str(), "enhanced");

        assert!(resolve_strategies(&["Bad Name".to_string()], &configured).is_err());
    }
}
