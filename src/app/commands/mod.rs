pub mod consolidate;
pub mod init;
pub mod placeholders;
pub mod prepare;
pub mod render;
pub mod run;
