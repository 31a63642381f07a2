pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod source;

pub use heartnotes_common as common;
