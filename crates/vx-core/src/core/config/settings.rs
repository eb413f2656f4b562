use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Flags shared by every command, captured once by the CLI.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub quiet: bool,
    pub verbose: u8,
    pub trace: bool,
    pub json: bool,
    /// Environment root override from `--env`.
    pub env_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub(crate) struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub(crate) fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub(crate) fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

pub const DEFAULT_ENV_DIR: &str = "venv";
pub const MANIFEST_FILE: &str = "vx.toml";

/// On-disk manifest (`vx.toml`): the configured target list plus optional
/// environment overrides. A missing file is an empty manifest, which makes
/// the whole pipeline a provision-only no-op.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub targets: Vec<PathBuf>,
    #[serde(default)]
    pub env: EnvTable,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvTable {
    pub path: Option<PathBuf>,
}

impl Manifest {
    /// Loads `vx.toml` from `root`, tolerating its absence.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        toml_edit::de::from_str(&text)
            .with_context(|| format!("{} is not valid TOML", path.display()))
    }
}

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub env_dir: PathBuf,
    pub targets: Vec<PathBuf>,
}

impl Config {
    /// Precedence for the env dir: `--env`, then `VX_ENV_DIR`, then the
    /// manifest, then `venv`.
    pub(crate) fn resolve(
        global: &GlobalOptions,
        snapshot: &EnvSnapshot,
        manifest: &Manifest,
    ) -> Self {
        let env_dir = global
            .env_dir
            .clone()
            .or_else(|| snapshot.var("VX_ENV_DIR").map(PathBuf::from))
            .or_else(|| manifest.env.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_DIR));
        Self {
            env_dir,
            targets: manifest.targets.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_manifest_is_empty() -> Result<()> {
        let temp = tempfile::tempdir().expect("tempdir");
        let manifest = Manifest::load(temp.path())?;
        assert!(manifest.targets.is_empty());
        assert!(manifest.env.path.is_none());
        Ok(())
    }

    #[test]
    fn manifest_parses_targets_and_env_path() -> Result<()> {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp.path().join(MANIFEST_FILE),
            "targets = [\"a.py\", \"jobs/b.py\"]\n\n[env]\npath = \".venv\"\n",
        )?;
        let manifest = Manifest::load(temp.path())?;
        assert_eq!(
            manifest.targets,
            vec![PathBuf::from("a.py"), PathBuf::from("jobs/b.py")]
        );
        assert_eq!(manifest.env.path, Some(PathBuf::from(".venv")));
        Ok(())
    }

    #[test]
    fn invalid_manifest_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join(MANIFEST_FILE), "targets = not-toml").expect("write");
        let err = Manifest::load(temp.path()).unwrap_err();
        assert!(err.to_string().contains("not valid TOML"), "got: {err}");
    }

    #[test]
    fn env_dir_precedence_is_flag_env_manifest_default() {
        let manifest = Manifest {
            env: EnvTable {
                path: Some(PathBuf::from("from-manifest")),
            },
            ..Manifest::default()
        };
        let snapshot = EnvSnapshot::testing(&[("VX_ENV_DIR", "from-env")]);

        let flag = GlobalOptions {
            env_dir: Some(PathBuf::from("from-flag")),
            ..GlobalOptions::default()
        };
        assert_eq!(
            Config::resolve(&flag, &snapshot, &manifest).env_dir,
            PathBuf::from("from-flag")
        );

        let no_flag = GlobalOptions::default();
        assert_eq!(
            Config::resolve(&no_flag, &snapshot, &manifest).env_dir,
            PathBuf::from("from-env")
        );

        let bare = EnvSnapshot::testing(&[]);
        assert_eq!(
            Config::resolve(&no_flag, &bare, &manifest).env_dir,
            PathBuf::from("from-manifest")
        );
        assert_eq!(
            Config::resolve(&no_flag, &bare, &Manifest::default()).env_dir,
            PathBuf::from(DEFAULT_ENV_DIR)
        );
    }
}
