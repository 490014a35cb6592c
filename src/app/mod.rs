pub mod api;
pub mod batch;
pub mod cli;
pub mod commands;
