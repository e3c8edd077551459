//! Clipper configuration and input discovery.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

/// Runtime configuration for a batch clipping run.
#[derive(Debug, Clone)]
pub struct ClipperConfig {
    /// Directory scanned (non-recursively) for input rasters
    pub input_dir: PathBuf,

    /// GeoJSON file holding the clip boundary
    pub vector_path: PathBuf,

    /// Directory clipped rasters are written to (created if missing)
    pub output_dir: PathBuf,

    /// File extension of input rasters, without the dot
    pub extension: String,

    /// Worker threads; 1 means sequential
    pub jobs: usize,
}

impl ClipperConfig {
    /// Check that the configuration can actually be run.
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            bail!(
                "input directory {} does not exist or is not a directory",
                self.input_dir.display()
            );
        }
        if !self.vector_path.is_file() {
            bail!("vector file {} does not exist", self.vector_path.display());
        }
        if self.extension.is_empty() {
            bail!("extension must not be empty");
        }
        if self.jobs == 0 {
            bail!("jobs must be at least 1");
        }
        Ok(())
    }

    /// Rasters in the input directory with the configured extension,
    /// sorted by path for a deterministic batch order.
    pub fn collect_inputs(&self) -> Result<Vec<PathBuf>> {
        let wanted = self.extension.trim_start_matches('.');
        let mut inputs = Vec::new();

        for entry in WalkDir::new(&self.input_dir).max_depth(1) {
            let entry = entry.with_context(|| {
                format!("failed to scan input directory {}", self.input_dir.display())
            })?;
            if entry.file_type().is_file() && has_extension(entry.path(), wanted) {
                inputs.push(entry.into_path());
            }
        }

        inputs.sort();
        Ok(inputs)
    }
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_for(dir: &Path) -> ClipperConfig {
        ClipperConfig {
            input_dir: dir.to_path_buf(),
            vector_path: dir.join("boundary.geojson"),
            output_dir: dir.join("out"),
            extension: "asc".to_string(),
            jobs: 1,
        }
    }

    #[test]
    fn test_collect_inputs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.asc"), "").unwrap();
        fs::write(dir.path().join("a.ASC"), "").unwrap();
        fs::write(dir.path().join("readme.txt"), "").unwrap();
        fs::write(dir.path().join("boundary.geojson"), "{}").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.asc"), "").unwrap();

        let inputs = config_for(dir.path()).collect_inputs().unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        // Case-insensitive extension match, no recursion into subdirs
        assert_eq!(names, vec!["a.ASC", "b.asc"]);
    }

    #[test]
    fn test_validate_rejects_missing_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path());
        // Vector file does not exist yet
        assert!(config.validate().is_err());

        fs::write(&config.vector_path, "{}").unwrap();
        assert!(config.validate().is_ok());

        config.jobs = 0;
        assert!(config.validate().is_err());
    }
}
