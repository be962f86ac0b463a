//! Path utilities for user-supplied file paths

use crate::error::{RemuxError, RemuxResult};
use std::path::{Component, Path, PathBuf};

/// Path utilities for cleaning up pasted or typed paths
pub struct PathUtils;

impl PathUtils {
    /// Create a new path utils instance
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PathUtils {
    fn default() -> Self {
        Self::new()
    }
}

impl PathUtils {
    /// Normalize a path as typed by a user: trim, unquote, expand `~`, and
    /// resolve `.`/`..` lexically
    pub fn normalize_user_path(&self, raw: &str) -> RemuxResult<PathBuf> {
        let cleaned = self.strip_quotes(raw);
        if cleaned.is_empty() {
            return Err(RemuxError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path is empty",
            )));
        }

        let expanded = self.expand_home(cleaned);
        Ok(self.normalize_lexically(&expanded))
    }

    /// Trim whitespace and one layer of matching quotes
    pub fn strip_quotes<'a>(&self, raw: &'a str) -> &'a str {
        let trimmed = raw.trim();
        for quote in ['"', '\''] {
            if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
                return trimmed[1..trimmed.len() - 1].trim();
            }
        }
        trimmed
    }

    /// Expand a leading `~` to the user's home directory
    pub fn expand_home(&self, path: &str) -> PathBuf {
        let rest = if path == "~" {
            Some("")
        } else {
            path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\"))
        };

        match (rest, home_dir()) {
            (Some(rest), Some(home)) if rest.is_empty() => home,
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        }
    }

    /// Drop `.` components and fold `..` into the preceding component
    pub fn normalize_lexically(&self, path: &Path) -> PathBuf {
        let mut out = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    let can_pop = matches!(
                        out.components().next_back(),
                        Some(Component::Normal(_))
                    );
                    if can_pop {
                        out.pop();
                    } else if !matches!(
                        out.components().next_back(),
                        Some(Component::RootDir) | Some(Component::Prefix(_))
                    ) {
                        out.push("..");
                    }
                }
                other => out.push(other.as_os_str()),
            }
        }

        if out.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            out
        }
    }

    /// Get file extension from path
    pub fn get_extension(&self, path: &Path) -> Option<String> {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Derive `<stem>.<tag>.<ext>` next to the input
    pub fn sibling_with_tag(&self, input: &Path, tag: &str) -> RemuxResult<PathBuf> {
        let stem = input.file_stem().ok_or_else(|| {
            RemuxError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Input path has no file name: {}", input.display()),
            ))
        })?;
        let extension = self
            .get_extension(input)
            .unwrap_or_else(|| "mkv".to_string());

        let file_name = format!("{}.{}.{}", stem.to_string_lossy(), tag, extension);
        Ok(input.with_file_name(file_name))
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|val| !val.is_empty())
        .or_else(|| std::env::var_os("USERPROFILE").filter(|val| !val.is_empty()))
        .map(PathBuf::from)
}
