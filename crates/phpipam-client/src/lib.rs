//! phpIPAM REST API Client
//!
//! A Rust client library for the phpIPAM REST API.
//! Provides typed records and controllers for sections, subnets, addresses,
//! VLANs and L2 domains, and normalizes phpIPAM's loosely typed JSON
//! (numbers and flags sent as strings) on the way in and out.
//!
//! # Example
//!
//! ```no_run
//! use phpipam_client::{Config, PhpIpamClient};
//! use phpipam_client::controllers::{SectionsController, SubnetsController};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Log in with the API application's credentials
//! let config = Config::new("https://ipam.example.com/api", "automation")
//!     .with_credentials("svc-ipam", "secret");
//! let transport = PhpIpamClient::connect(config).await?.into_transport();
//!
//! // List sections
//! let sections = SectionsController::new(transport.clone());
//! for section in sections.list_sections().await? {
//!     println!("{} {}", section.id, section.name);
//! }
//!
//! // Pick the next free address in a subnet
//! let subnets = SubnetsController::new(transport);
//! let ip = subnets.get_first_free_address(8).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Controllers**: Sections, subnets, addresses, VLANs, L2 domains
//! - **Custom Fields**: Schema lookup, value retrieval and updates
//! - **Lenient Decoding**: `"12"`, `12` and `null` all decode as integers
//! - **Mockable Transport**: `test-util` feature exposes [`MockTransport`]

pub mod client;
pub mod common;
pub mod config;
pub mod controllers;
pub mod custom_fields;
pub mod error;
pub mod scalar;
pub mod session;
#[path = "trait.rs"]
pub mod transport;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
#[cfg(test)]
mod test_utils;

pub use client::PhpIpamClient;
pub use common::{ApiResponse, HttpClient};
pub use config::Config;
pub use custom_fields::{CustomField, CustomFieldSchema, CustomFields};
pub use error::PhpIpamError;
pub use scalar::{BoolInt, JsonInt, ScalarError};
pub use session::Session;
pub use transport::PhpIpamTransport;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockTransport, RecordedRequest};
