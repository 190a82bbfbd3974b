pub mod bundle;
pub mod service;

pub use bundle::{BUNDLE_VERSION, ConfigBundle};
pub use service::{
    Category, EnvDefaults, NetworkCatalog, NetworkDefinition, ServiceCatalog, ServiceDefinition,
};
