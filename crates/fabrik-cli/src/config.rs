//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`HelmSettings`]
//! derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `FABRIK_<SECTION>__<KEY>`, e.g. `FABRIK_HELM__IMAGE`
//! 3. Config file: `--config FILE` / `FABRIK_CONFIG`, else [`AppConfig::config_path`]
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use fabrik_core::application::{GitSettings, HelmSettings, ReleaseNameStyle, RenderSettings};

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "FABRIK";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Source acquisition.
    pub git: GitConfig,
    /// Containerized rendering.
    pub helm: HelmConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub program: String,
    /// Zero disables the timeout.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HelmConfig {
    pub docker_program: String,
    pub image: String,
    pub mount_point: String,
    pub release_name_style: ReleaseNameStyle,
    /// Zero disables the timeout.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` takes precedence.
    pub format: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        let git = GitSettings::default();
        Self {
            program: git.program,
            timeout_secs: git.timeout.as_secs(),
        }
    }
}

impl Default for HelmConfig {
    fn default() -> Self {
        let render = RenderSettings::default();
        Self {
            docker_program: render.docker_program,
            image: render.image,
            mount_point: render.mount_point,
            release_name_style: render.release_name_style,
            timeout_secs: render.timeout.as_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file, then environment.
    ///
    /// An explicitly given `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("failed to encode built-in defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Tool settings handed to the core services.
    pub fn helm_settings(&self) -> HelmSettings {
        HelmSettings {
            git: GitSettings {
                program: self.git.program.clone(),
                timeout: Duration::from_secs(self.git.timeout_secs),
            },
            render: RenderSettings {
                docker_program: self.helm.docker_program.clone(),
                image: self.helm.image.clone(),
                mount_point: self.helm.mount_point.clone(),
                release_name_style: self.helm.release_name_style,
                timeout: Duration::from_secs(self.helm.timeout_secs),
            },
        }
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.fabrik.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "fabrik", "fabrik")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".fabrik.toml"))
    }
}
