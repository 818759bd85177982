//! Command handlers, one module per command group

pub mod catalog;
pub mod config;
pub mod snippet;
pub mod status;
pub mod tag;
pub mod theme;
pub mod transfer;
