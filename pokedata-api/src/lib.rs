//! Blocking client for the PokeAPI catalog service.

pub mod client;
pub mod error;
pub mod retry;
pub mod transport;
pub mod types;

pub use client::{DEFAULT_BASE_URL, PokeApiClient, ResourceKind};
pub use error::ApiError;
pub use retry::{Backoff, RetryPolicy, TransientFault};
pub use transport::{FaultKind, HttpResponse, MemoryTransport, ReqwestTransport, Transport, TransportFault};
