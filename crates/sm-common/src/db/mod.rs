pub mod directory;
pub mod pool;
pub mod util;

pub use directory::{DirectoryError, PgDirectory};
pub use pool::{create_pool_from_url, create_pool_from_url_checked, DbPoolError, PgPool};
