//! Tunables for the external tools the services drive.
//!
//! The CLI builds these from its layered configuration; library users can
//! start from [`HelmSettings::default`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// How the release name is passed to `helm template`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseNameStyle {
    /// `helm template <release> <chart>` (helm 3).
    #[default]
    Positional,
    /// `helm template <chart> --name <release>` (helm 2).
    Flag,
}

impl fmt::Display for ReleaseNameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional => write!(f, "positional"),
            Self::Flag => write!(f, "flag"),
        }
    }
}

/// Source acquisition settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSettings {
    pub program: String,
    /// Zero disables the limit.
    pub timeout: Duration,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            program: "git".into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Containerized renderer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub docker_program: String,
    pub image: String,
    /// Where the chart directory is mounted inside the container.
    pub mount_point: String,
    pub release_name_style: ReleaseNameStyle,
    /// Zero disables the limit.
    pub timeout: Duration,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            docker_program: "docker".into(),
            image: "alpine/helm:latest".into(),
            mount_point: "/app/chart".into(),
            release_name_style: ReleaseNameStyle::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HelmSettings {
    pub git: GitSettings,
    pub render: RenderSettings,
}
