//! Orchestration: product-line catalog, launch pipeline, and the `bizforge` commands.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod orchestrator;
pub mod output;
