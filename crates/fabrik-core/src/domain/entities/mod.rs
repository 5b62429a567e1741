pub mod command;
pub mod common;
pub mod component;

pub use crate::domain::DomainError;
pub use command::{CommandOutput, CommandSpec};
pub use component::{Component, ComponentBuilder, ComponentConfig};
