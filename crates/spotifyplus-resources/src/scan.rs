//! Listing of response documents in a language directory

use crate::error::{ResolveError, ResolveResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Which files of a language directory are response documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DocumentFilter {
    /// Only files whose name starts with this prefix (case-insensitive)
    pub prefix: Option<String>,
}

impl DocumentFilter {
    /// Every YAML file
    pub fn all() -> Self {
        Self { prefix: None }
    }

    /// YAML files whose name starts with `platform`, ignoring case
    pub fn platform(platform: &str) -> Self {
        Self {
            prefix: Some(platform.to_lowercase()),
        }
    }

    /// Filter for a request
    pub fn for_request(platform: Option<&str>, platform_files_only: bool) -> Self {
        match platform {
            Some(platform) if platform_files_only => Self::platform(platform),
            _ => Self::all(),
        }
    }

    /// True for a `.yaml`/`.yml` file name that passes the prefix, if any
    fn accepts(&self, file_name: &str) -> bool {
        if !has_yaml_extension(file_name) {
            return false;
        }
        match &self.prefix {
            Some(prefix) => file_name.to_lowercase().starts_with(prefix.as_str()),
            None => true,
        }
    }
}

fn has_yaml_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

/// Response documents in `dir`, sorted by file name
///
/// Only the top level of `dir` is listed; subdirectories are ignored.
pub fn list_documents(dir: &Path, filter: &DocumentFilter) -> ResolveResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ResolveError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files: Vec<(String, PathBuf)> = fs::read_dir(dir)
        .map_err(|e| ResolveError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            filter.accepts(&name).then(|| (name, entry.path()))
        })
        .collect();

    files.sort_by(|a, b| a.0.cmp(&b.0));
    trace!(dir = %dir.display(), count = files.len(), "listed response documents");

    Ok(files.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_extension_and_order() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "b.yml", "");
        write_file(dir.path(), "a.YAML", "");
        write_file(dir.path(), "c.json", "");
        write_file(dir.path(), "readme", "");
        fs::create_dir(dir.path().join("nested.yaml")).unwrap();

        let files = list_documents(dir.path(), &DocumentFilter::all()).unwrap();
        assert_eq!(names(&files), vec!["a.YAML", "b.yml"]);
    }

    #[test]
    fn test_platform_prefix_ignores_case() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "SpotifyPlus_Responses.yaml", "");
        write_file(dir.path(), "spotifyplus_extra.yaml", "");
        write_file(dir.path(), "other.yaml", "");

        let files = list_documents(dir.path(), &DocumentFilter::platform("spotifyplus")).unwrap();
        assert_eq!(names(&files), vec!["SpotifyPlus_Responses.yaml", "spotifyplus_extra.yaml"]);

        let files = list_documents(dir.path(), &DocumentFilter::for_request(Some("spotifyplus"), false)).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("xx");
        let err = list_documents(&missing, &DocumentFilter::all()).unwrap_err();
        assert!(matches!(err, ResolveError::DirectoryNotFound { ref path } if *path == missing));
    }
}
