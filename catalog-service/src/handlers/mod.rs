pub mod bundle;
pub mod health;
pub mod pages;
pub mod services;

pub use bundle::get_bundle;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use pages::{admin, index};
pub use services::{
    add_service, delete_service, init_services, list_services, method_not_allowed, update_service,
};
