// odlctl-api: async RESTCONF transport for OpenDaylight controllers

pub mod client;
pub mod error;
pub mod transport;

pub use client::RestconfClient;
pub use error::Error;
pub use transport::{
    HttpResponse, HttpTrace, RequestBody, RestconfPath, TlsMode, Transport, TransportConfig,
};
