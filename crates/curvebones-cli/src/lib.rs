//! curvebones CLI library.
//!
//! This crate provides the command implementations behind the `curvebones`
//! binary: scene loading, option resolution, and the `build` and `rename`
//! commands.

pub mod commands;
pub mod config;
pub mod input;
