//! CLI command implementations.

pub mod download;
pub mod extract;
pub mod products;
pub mod show;

pub use download::DownloadCommand;
pub use extract::ExtractCommand;
pub use products::ProductsCommand;
pub use show::ShowCommand;
