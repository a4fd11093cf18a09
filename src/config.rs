use anyhow::Result;
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backup::BACKUP_FOLDER;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_decoder")]
    pub decoder: String,
    #[serde(default = "default_codepage")]
    pub codepage: String,
    #[serde(default = "default_backup_folder")]
    pub backup_folder: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub search_root: Option<PathBuf>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_decoder() -> String { "lnkinfo".to_string() }
fn default_codepage() -> String { "windows-1251".to_string() }
fn default_backup_folder() -> String { BACKUP_FOLDER.to_string() }
fn default_locale() -> String { "ru".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            decoder: default_decoder(),
            codepage: default_codepage(),
            backup_folder: default_backup_folder(),
            locale: default_locale(),
            search_root: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Root of the local-target search, the home directory unless overridden.
    pub fn search_root(&self, home: &Path) -> PathBuf {
        self.search_root.clone().unwrap_or_else(|| home.to_path_buf())
    }

    pub fn backup_dir(&self, home: &Path) -> PathBuf {
        home.join(&self.backup_folder)
    }

    pub fn log_path(&self) -> PathBuf {
        if let Some(path) = &self.log_file {
            return path.clone();
        }
        match project_dirs() {
            Some(dirs) => dirs.data_dir().join("lnk2desktop.log"),
            None => PathBuf::from("lnk2desktop.log"),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "lnk2desktop", "lnk2desktop")
}

pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

pub fn load_config() -> Result<Config> {
    let config_path = if let Some(dirs) = project_dirs() {
        dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    };

    load_config_from(&config_path)
}

pub fn load_config_from(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.decoder, "lnkinfo");
        assert_eq!(config.codepage, "windows-1251");
        assert_eq!(config.backup_dir(Path::new("/home/bob")), PathBuf::from("/home/bob/backups_link"));
        assert_eq!(config.search_root(Path::new("/home/bob")), PathBuf::from("/home/bob"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "codepage = \"cp866\"\nsearch_root = \"/srv/share\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.codepage, "cp866");
        assert_eq!(config.locale, "ru");
        assert_eq!(config.search_root(Path::new("/home/bob")), PathBuf::from("/srv/share"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = \"dark\"\n").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
