use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use tempfile::NamedTempFile;

use crate::sitedb::SiteDbError;

const CACHE_DIR_NAME: &str = ".cms_sitedbcache";

/// Cache directory from the environment:
/// `$CMS_SITEDB_CACHE_DIR/.cms_sitedbcache`, `$HOME/.cms_sitedbcache`,
/// then a per-user directory under the system temp dir.
pub fn default_cache_dir() -> PathBuf {
    cache_dir_from(|name| env::var_os(name))
}

fn cache_dir_from<F: Fn(&str) -> Option<OsString>>(var: F) -> PathBuf {
    if let Some(dir) = var("CMS_SITEDB_CACHE_DIR") {
        return PathBuf::from(dir).join(CACHE_DIR_NAME);
    }
    if let Some(home) = var("HOME") {
        return PathBuf::from(home).join(CACHE_DIR_NAME);
    }

    let user = var("USER")
        .or_else(|| var("USERNAME"))
        .map(|u| u.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string());
    env::temp_dir().join(format!("sitedbjson_{}", user))
}

/// Replies stored one file per call, served until they are older than
/// `max_age`.
pub struct ResponseCache {
    dir: PathBuf,
    max_age: Duration,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>, max_age: Duration) -> Result<Self, SiteDbError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(ResponseCache { dir, max_age })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn is_fresh(&self, path: &Path) -> Result<bool, SiteDbError> {
        if self.max_age.is_zero() {
            return Ok(false);
        }
        match fs::metadata(path) {
            // A timestamp from the future counts as fresh
            Ok(meta) => Ok(meta
                .modified()?
                .elapsed()
                .map(|age| age < self.max_age)
                .unwrap_or(true)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Cached content of `file` if fresh, otherwise whatever `fetch` returns,
    /// which is stored for the next call.
    pub fn refresh<F>(&self, file: &str, fetch: F) -> Result<String, SiteDbError>
    where
        F: FnOnce() -> Result<String, SiteDbError>,
    {
        let path = self.path(file);
        if self.is_fresh(&path)? {
            debug!("Cache hit: {}", path.display());
            return Ok(fs::read_to_string(&path)?);
        }

        debug!("Cache miss: {}", path.display());
        let content = fetch()?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(content)
    }

    pub fn clear(&self, file: &str) -> Result<(), SiteDbError> {
        let path = self.path(file);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Cache cleared: {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
