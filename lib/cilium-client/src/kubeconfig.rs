//! Kubeconfig resolution
//!
//! Precedence is the provider's `kube_config` attribute, then the
//! `KUBECONFIG` environment variable, then `$HOME/.kube/config`. The first
//! two may hold several paths joined by the platform path separator, which
//! are merged in order the same way kubectl does.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use dirs::home_dir;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Config;
use tracing::debug;

use crate::{ClientError, Result};

pub const KUBECONFIG: &str = "KUBECONFIG";

/// Where the kubeconfig was found
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KubeconfigSource {
    /// Paths given in the provider configuration
    Explicit(Vec<PathBuf>),
    /// Paths taken from `KUBECONFIG`
    Environment(Vec<PathBuf>),
    /// `$HOME/.kube/config`
    Default(PathBuf),
}

impl KubeconfigSource {
    /// Resolve against the process environment.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        Self::resolve_from(explicit, env::var_os(KUBECONFIG), home_dir())
    }

    /// Resolve against explicit environment values.
    ///
    /// Empty values count as unset. The default path is only chosen when the
    /// file exists, so a missing kubeconfig fails here rather than at the
    /// first API call.
    pub fn resolve_from(
        explicit: Option<&str>,
        env_value: Option<OsString>,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(value) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
            let paths = split(OsStr::new(value))
                .into_iter()
                .map(|p| expand_home(p, home.as_deref()))
                .collect::<Vec<_>>();
            if !paths.is_empty() {
                return Ok(Self::Explicit(paths));
            }
        }

        if let Some(value) = env_value {
            let paths = split(&value);
            if !paths.is_empty() {
                return Ok(Self::Environment(paths));
            }
        }

        match home.map(|h| h.join(".kube").join("config")) {
            Some(path) if path.is_file() => Ok(Self::Default(path)),
            Some(path) => Err(ClientError::KubeconfigNotFound(path.display().to_string())),
            None => Err(ClientError::KubeconfigNotFound("$HOME/.kube/config".to_string())),
        }
    }

    /// Paths that make up this kubeconfig, in merge order
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Self::Explicit(paths) | Self::Environment(paths) => paths,
            Self::Default(path) => std::slice::from_ref(path),
        }
    }

    /// Read and merge every file of this source.
    pub fn load(&self) -> Result<Kubeconfig> {
        let mut merged: Option<Kubeconfig> = None;
        for path in self.paths() {
            let next = Kubeconfig::read_from(path).map_err(|source| ClientError::KubeconfigRead {
                path: path.display().to_string(),
                source,
            })?;
            debug!("Read kubeconfig from {}", path.display());
            merged = Some(match merged {
                Some(current) => current.merge(next)?,
                None => next,
            });
        }
        merged.ok_or_else(|| ClientError::KubeconfigNotFound(self.to_string()))
    }

    /// Build a client configuration for `context`, or the current context
    /// when `None`. Returns the configuration and the effective context name.
    pub async fn client_config(&self, context: Option<&str>) -> Result<(Config, String)> {
        let kubeconfig = self.load()?;
        let effective = context
            .map(str::to_string)
            .or_else(|| kubeconfig.current_context.clone())
            .unwrap_or_default();

        let options = KubeConfigOptions {
            context: context.map(str::to_string),
            ..Default::default()
        };
        let config = Config::from_custom_kubeconfig(kubeconfig, &options).await?;
        Ok((config, effective))
    }
}

impl fmt::Display for KubeconfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = match self {
            Self::Explicit(_) => "kube_config",
            Self::Environment(_) => KUBECONFIG,
            Self::Default(_) => "default",
        };
        let paths = self
            .paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} ({})", paths, origin)
    }
}

fn split(value: &OsStr) -> Vec<PathBuf> {
    env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

fn expand_home(path: PathBuf, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path,
    }
}
