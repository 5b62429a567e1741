//! Fabrik Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers that turn a helm
//! backed component into a namespaced Kubernetes manifest stream, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            fabrik-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (SourceService, RenderService,         │
//! │   ComponentPipeline)                    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Filesystem, CommandRunner)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    fabrik-adapters (Infrastructure)     │
//! │  (LocalFilesystem, ProcessRunner, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Component, CommandSpec, manifest      │
//! │   namespace normalization)              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fabrik_core::prelude::*;
//!
//! # fn run(runner: Arc<dyn CommandRunner>, fs: Arc<dyn Filesystem>) -> FabrikResult<()> {
//! let component = Component::builder()
//!     .name("grafana")
//!     .source("https://github.com/helm/charts")
//!     .path("stable/grafana")
//!     .physical_path("./components/grafana")
//!     .build()?;
//!
//! let pipeline = ComponentPipeline::new(runner, fs, HelmSettings::default());
//! let manifests = pipeline.materialize(&component)?;
//! println!("{manifests}");
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ComponentPipeline, RenderService, SourceService,
        ports::{CommandRunner, Filesystem},
        settings::{GitSettings, HelmSettings, ReleaseNameStyle, RenderSettings},
    };
    pub use crate::domain::{
        CommandOutput, CommandSpec, Component, ComponentBuilder, ComponentConfig,
        acquired_source_path, inject_namespace,
    };
    pub use crate::error::{FabrikError, FabrikResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
