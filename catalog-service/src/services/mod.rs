pub mod bundle;
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod metrics;
pub mod store;

pub use bundle::{assemble, parse_ids};
pub use catalog::Catalog;
pub use defaults::StaticCatalog;
pub use error::CatalogError;
pub use self::metrics::{get_metrics, init_metrics};
pub use store::{DefinitionStore, MemoryStore, RedisStore};
