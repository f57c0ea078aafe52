//! Service catalog for the AREA platform.
//!
//! This crate provides:
//! - The `about.json` document model (`AboutResponse` and its parts)
//! - The compiled-in catalog of services with their actions and reactions

pub mod services;
pub mod types;

pub use services::services;
pub use types::{
    AboutResponse, ActionDescriptor, ClientInfo, ReactionDescriptor, ServerInfo,
    ServiceCatalogEntry,
};
