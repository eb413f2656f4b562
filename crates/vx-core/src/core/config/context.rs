use std::path::{Path, PathBuf};

use anyhow::Result;
use vx_domain::EnvHandle;

use crate::core::cancel::CancelToken;
use crate::core::config::{Config, EnvSnapshot, GlobalOptions, Manifest};

pub struct CommandContext<'a> {
    pub global: &'a GlobalOptions,
    config: Config,
    cancel: CancelToken,
}

impl<'a> CommandContext<'a> {
    /// Creates a command context from the process environment and `vx.toml`.
    ///
    /// # Errors
    /// Returns an error when the manifest exists but cannot be read or
    /// parsed.
    pub fn new(global: &'a GlobalOptions, cancel: CancelToken) -> Result<Self> {
        let snapshot = EnvSnapshot::capture();
        let manifest = Manifest::load(Path::new("."))?;
        let config = Config::resolve(global, &snapshot, &manifest);
        Ok(Self {
            global,
            config,
            cancel,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn cancel(&self) -> &CancelToken {
        &self.cancel
    }

    #[must_use]
    pub fn env_handle(&self) -> EnvHandle {
        EnvHandle::new(self.config.env_dir.clone())
    }

    /// Targets from the CLI when given, otherwise the manifest list.
    #[must_use]
    pub fn resolve_targets(&self, cli: &[PathBuf]) -> Vec<PathBuf> {
        if cli.is_empty() {
            self.config.targets.clone()
        } else {
            cli.to_vec()
        }
    }

    #[cfg(test)]
    pub(crate) fn testing(global: &'a GlobalOptions, config: Config, cancel: CancelToken) -> Self {
        Self {
            global,
            config,
            cancel,
        }
    }
}
