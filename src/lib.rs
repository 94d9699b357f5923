//! Christmas Card Library
//!
//! This library provides the card customizer: the template and color
//! catalogs, the composition state, the raster renderer, the PNG export, and
//! the terminal editor built on top of them.

// Module declarations
pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod logging;
pub mod models;
pub mod render;
pub mod tui;
