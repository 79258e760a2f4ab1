//! staffqa common library
//!
//! Configuration, test data generators, backend envelope types and the
//! route/endpoint tables shared by the API and browser suites.

pub mod config;
pub mod constants;
pub mod error;
pub mod generators;
pub mod logging;
pub mod types;

pub use config::{CredentialSets, Credentials, EnvConfig};
pub use error::{Error, Result};
pub use logging::init_tracing;
pub use types::{ApiEnvelope, CreatedData, ErrorEnvelope, PageMeta, PaginatedEnvelope, TokenData};

/// staffqa version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
