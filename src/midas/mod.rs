pub mod client;
pub mod errors;
pub mod response;

pub use client::{MidasApi, MidasClient, RetryPolicy, Session};
pub use errors::MidasClientError;
