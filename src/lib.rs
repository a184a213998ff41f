//! Client for browsing and editing repositories on a GitHub-compatible REST API.

pub mod codec;
pub mod model;
pub mod nav;
pub mod remote;
pub mod shell;
pub mod store;
pub mod upload;
