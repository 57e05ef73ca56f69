//! Kernel module - server infrastructure and dependencies.

pub mod database;
pub mod deps;
pub mod page_fetcher;
pub mod test_dependencies;
pub mod traits;

pub use database::{connect_pool, MIGRATOR};
pub use deps::ServerDeps;
pub use page_fetcher::{HttpPageFetcher, DEFAULT_FETCH_TIMEOUT};
pub use test_dependencies::{MockPageFetcher, TestDependencies};
pub use traits::*;
