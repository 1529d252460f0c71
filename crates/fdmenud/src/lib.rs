//! fdmenu daemon library - exposes modules for testing.

pub mod cache;
pub mod config;
pub mod extract;
pub mod fallback;
pub mod normalize;
pub mod routes;
pub mod schedule;
pub mod server;
pub mod service;
pub mod upstream;
