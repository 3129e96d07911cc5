// SPDX-License-Identifier: PMPL-1.0-or-later
//! # Atlan Client
//!
//! Async HTTP client for the Atlan metadata catalog.
//!
//! ```rust,no_run
//! use atlan_client::{AssetOps, AtlanClient};
//! use atlan_model::{ApiObject, CertificateStatus};
//!
//! #[tokio::main]
//! async fn main() -> atlan_client::Result<()> {
//!     let client = AtlanClient::from_env()?;
//!     let object = ApiObject::creator("orders", "default/api/1700000000")?
//!         .description("All customer orders")
//!         .build();
//!     let response = object.save(&client).await?;
//!     println!("created {:?}", response.result_for(&object).and_then(|o| o.header.guid));
//!
//!     ApiObject::update_certificate(
//!         &client,
//!         "default/api/1700000000/orders",
//!         CertificateStatus::Verified,
//!         Some("Reviewed by the data team"),
//!     )
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`]: configuration, authentication, retries and HTTP transport.
//! - [`entity`]: entity retrieve, bulk save, delete and Atlan tag endpoints.
//! - [`search`]: index search and [`FluentSearch`].
//! - [`ops`]: [`AssetOps`], typed operations for every asset type.
//! - [`error`]: [`AtlanError`] and the crate-level `Result` alias.

pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod ops;
pub mod search;

pub use client::{AtlanClient, Auth};
pub use config::ClientConfig;
pub use entity::{AssetMutationResponse, DeleteType, EntityWithExtInfo, MutatedEntities};
pub use error::{AtlanError, Result};
pub use ops::AssetOps;
pub use search::{FluentSearch, IndexSearchResponse};
