//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "acquire a chart" or "render a component".

pub mod pipeline_service;
pub mod render_service;
pub mod source_service;

pub use pipeline_service::ComponentPipeline;
pub use render_service::RenderService;
pub use source_service::SourceService;
