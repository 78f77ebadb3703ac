//! Core domain concepts shared across all subdomains.
//!
//! - [`backend::Backend`]: symbolic model backend names (gpt5, claude, ...)
//! - [`verbosity::Verbosity`]: closed set of verbosity levels
//! - [`task_type::TaskType`]: open routing label for model selection
//! - [`error::DomainError`]: domain-level errors

pub mod backend;
pub mod error;
pub mod string;
pub mod task_type;
pub mod verbosity;
