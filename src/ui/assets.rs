//! Filesystem-based asset source for loading piece SVGs.

use gpui::{AssetSource, SharedString};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

/// Looks for assets under a configured directory, then next to the
/// executable, then relative to the working directory.
pub struct FileAssets {
    search_paths: Vec<PathBuf>,
}

impl FileAssets {
    pub fn new(assets_dir: Option<PathBuf>) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));
        let search_paths = assets_dir
            .into_iter()
            .chain(exe_dir)
            .chain(std::env::current_dir().ok())
            .collect();
        Self { search_paths }
    }
}

impl AssetSource for FileAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        for base in &self.search_paths {
            if let Ok(data) = fs::read(base.join(path)) {
                return Ok(Some(Cow::Owned(data)));
            }
        }
        Ok(None)
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let mut results = Vec::new();

        for base in &self.search_paths {
            if let Ok(entries) = fs::read_dir(base.join(path)) {
                for entry in entries.flatten() {
                    if let Some(name) = entry.file_name().to_str() {
                        results.push(SharedString::from(name.to_string()));
                    }
                }
                break;
            }
        }
        Ok(results)
    }
}
