// Application layer - Client use cases and the transport boundary
pub mod client;
pub mod factory;
pub mod transport;
