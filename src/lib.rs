#![forbid(unsafe_code)]

pub mod browse;
pub mod carousel;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod export;
pub mod filter;
pub mod list;
pub mod logging;
pub mod render;
pub mod router;
pub mod serve;
pub mod session;
pub mod show;
pub mod video;
pub mod view;
