//! Domains module containing business logic organized by bounded contexts.
//!
//! - `build`: locating MSBuild, parsing solutions and running builds
//! - `tools`: the MCP tool surface over the build domain

pub mod build;
pub mod tools;
