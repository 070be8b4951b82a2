//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

mod common;

pub mod build_info;
pub mod build_project;
pub mod build_solution;
pub mod list_projects;
pub mod set_build_path;

pub use build_info::{GetBuildInfoParams, GetBuildInfoTool};
pub use build_project::{BuildProjectParams, BuildProjectTool};
pub use build_solution::{BuildSolutionParams, BuildSolutionTool};
pub use list_projects::{ListProjectsParams, ListProjectsTool};
pub use set_build_path::{SetBuildPathParams, SetBuildPathTool};
