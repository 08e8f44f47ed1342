//! HomeValueIQ server: the estimator page and its HTTP API

pub mod api;
pub mod config;
pub mod page;
