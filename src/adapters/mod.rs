pub mod archive;
pub mod completion_client;
pub mod csv_table;
pub mod documents;
pub mod scaffold_assets;
