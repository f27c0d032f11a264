//! 日志模块

pub mod setup;

pub use setup::{setup_logging, LogConfig};
