use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment override for the backing index file location.
pub const INDEX_ENV_VAR: &str = "PKGINDEX_SEARCH_INDEX";

const INDEX_FILENAME: &str = "index.json";

/// Resolve the backing index file location.
///
/// Honors the `PKGINDEX_SEARCH_INDEX` environment override, else falls back
/// to `index.json` inside the platform cache directory, creating the
/// directory if missing.
pub fn index_file_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(INDEX_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    let cache_base = dirs::cache_dir().context("Failed to get platform cache directory")?;
    let cache_dir = cache_base.join("pkgindex");
    if !cache_dir.exists() {
        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;
    }

    Ok(cache_dir.join(INDEX_FILENAME))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_env_override_wins() {
        let original = env::var(INDEX_ENV_VAR).ok();

        // SAFETY: Setting environment variables in tests is safe as long as:
        // 1. Tests don't run in parallel accessing the same env var (we restore it)
        // 2. No other threads are reading this variable concurrently
        // 3. We restore the original value afterwards
        unsafe {
            env::set_var(INDEX_ENV_VAR, "/tmp/custom-index.json");
        }

        let path = index_file_path().unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom-index.json"));

        unsafe {
            match original {
                Some(value) => env::set_var(INDEX_ENV_VAR, value),
                None => env::remove_var(INDEX_ENV_VAR),
            }
        }
    }
}
