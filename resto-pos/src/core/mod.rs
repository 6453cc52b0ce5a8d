//! 核心模块

pub mod config;

pub use config::Config;
