// Infrastructure
pub mod config;
pub mod error;
pub mod metrics;

// Domain layer (business logic)
pub mod notification;
pub mod template;
pub mod transport;

// Application layer
pub mod api;
pub mod server;
