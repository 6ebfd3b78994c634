use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, IoResultExt, Result};

/// name of the marker directory inside the working directory
pub const SPRIG_DIR: &str = ".sprig";

/// a sprig repository
///
/// every path the store touches is derived from the working directory
/// held here; nothing is process-wide.
pub struct Repo {
    work_dir: PathBuf,
    path: PathBuf,
    config: Config,
}

impl Repo {
    /// create the on-disk layout for a new repository under `work_dir`
    ///
    /// this only lays out directories and config; `ops::init` also writes
    /// the root commit, default branch, HEAD and staging area.
    pub fn init(work_dir: &Path) -> Result<Self> {
        Self::init_with_config(work_dir, Config::default())
    }

    /// like `init`, with explicit configuration
    pub fn init_with_config(work_dir: &Path, config: Config) -> Result<Self> {
        let path = work_dir.join(SPRIG_DIR);
        if path.exists() {
            return Err(Error::RepoExists(work_dir.to_path_buf()));
        }

        std::fs::create_dir_all(path.join("objects")).with_path(&path)?;
        std::fs::create_dir_all(path.join("refs/heads")).with_path(&path)?;
        std::fs::create_dir_all(path.join("tmp")).with_path(&path)?;

        let repo = Self {
            work_dir: work_dir.to_path_buf(),
            path,
            config,
        };
        repo.config.save(&repo.config_path())?;

        Ok(repo)
    }

    /// open an existing repository rooted at `work_dir`
    pub fn open(work_dir: &Path) -> Result<Self> {
        let path = work_dir.join(SPRIG_DIR);
        let config_path = path.join("config.toml");
        if !config_path.exists() {
            return Err(Error::NoRepo(work_dir.to_path_buf()));
        }

        let config = Config::load(&config_path)?;

        Ok(Self {
            work_dir: work_dir.to_path_buf(),
            path,
            config,
        })
    }

    /// working directory whose files are tracked
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// marker directory (`<work_dir>/.sprig`)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// repository configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// path to config.toml
    pub fn config_path(&self) -> PathBuf {
        self.path.join("config.toml")
    }

    /// path to objects directory
    pub fn objects_path(&self) -> PathBuf {
        self.path.join("objects")
    }

    /// path to branch refs directory
    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs/heads")
    }

    /// path to the HEAD file
    pub fn head_path(&self) -> PathBuf {
        self.path.join("HEAD")
    }

    /// path to the serialized staging area
    pub fn staging_path(&self) -> PathBuf {
        self.path.join("staging")
    }

    /// path to tmp directory (for atomic writes)
    pub fn tmp_path(&self) -> PathBuf {
        self.path.join("tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_repo_init() {
        let dir = tempdir().unwrap();

        let repo = Repo::init(dir.path()).unwrap();

        let marker = dir.path().join(SPRIG_DIR);
        assert!(marker.join("objects").is_dir());
        assert!(marker.join("refs/heads").is_dir());
        assert!(marker.join("tmp").is_dir());
        assert!(marker.join("config.toml").is_file());
        assert_eq!(repo.config().default_branch, "master");
    }

    #[test]
    fn test_repo_init_already_exists() {
        let dir = tempdir().unwrap();

        Repo::init(dir.path()).unwrap();
        let result = Repo::init(dir.path());

        assert!(matches!(result, Err(Error::RepoExists(_))));
    }

    #[test]
    fn test_repo_open() {
        let dir = tempdir().unwrap();

        let config = Config {
            default_branch: "main".to_string(),
            ..Config::default()
        };
        Repo::init_with_config(dir.path(), config).unwrap();
        let repo = Repo::open(dir.path()).unwrap();

        assert_eq!(repo.work_dir(), dir.path());
        assert_eq!(repo.config().default_branch, "main");
    }

    #[test]
    fn test_repo_open_not_found() {
        let dir = tempdir().unwrap();

        let result = Repo::open(dir.path());
        assert!(matches!(result, Err(Error::NoRepo(_))));
    }

    #[test]
    fn test_repo_paths() {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let marker = dir.path().join(SPRIG_DIR);

        assert_eq!(repo.objects_path(), marker.join("objects"));
        assert_eq!(repo.heads_path(), marker.join("refs/heads"));
        assert_eq!(repo.head_path(), marker.join("HEAD"));
        assert_eq!(repo.staging_path(), marker.join("staging"));
        assert_eq!(repo.tmp_path(), marker.join("tmp"));
    }
}
