// SPDX-License-Identifier: PMPL-1.0-or-later
//! Atlan Model
//!
//! Typed assets for the Atlan metadata catalog.
//! Every asset type is an [`Asset<K>`] over its own attribute set `K`;
//! builders assemble new or partial assets offline, and [`Entity`] is the
//! JSON wire form exchanged with the catalog's REST API.

pub mod asset;
pub mod assets;
pub mod builder;
pub mod common;
pub mod entity;
pub mod enums;
pub mod error;
pub mod identity;
pub mod reference;

pub use asset::{Asset, AssetKind, EntityHeader};
pub use builder::AssetBuilder;
pub use common::CommonAttributes;
pub use entity::{AtlanTag, Entity};
pub use enums::{AnnouncementType, CertificateStatus, EntityStatus};
pub use error::{ModelError, Result};
pub use identity::{
    child_qualified_name, connection_qualified_name, connector_name, is_guid,
    is_placeholder_guid, placeholder_guid,
};
pub use reference::{AssetRef, UniqueAttributes};

pub use assets::api::{ApiField, ApiFieldParent, ApiObject, ApiPath, ApiQuery, ApiSpec};
pub use assets::business_policy::BusinessPolicy;
pub use assets::connection::Connection;
pub use assets::fabric::{FabricPage, FabricReport, FabricWorkspace};
pub use assets::glossary::GlossaryTerm;
pub use assets::qlik::{QlikApp, QlikSpace};
pub use assets::workflow::{Workflow, WorkflowRun, WorkflowRunStatus};
