pub mod services;

pub use services::{
    BundleParams, DeleteParams, MutationResponse, SeedResponse, ServicePayload, ServiceSummary,
};
