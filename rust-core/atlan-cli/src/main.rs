// SPDX-License-Identifier: PMPL-1.0-or-later
//!
//! atlan: command-line access to the Atlan metadata catalog.
//!
//! Retrieves, searches, certifies, tags, archives and restores assets of any
//! type the SDK models. Connection settings come from flags or from the
//! `ATLAN_BASE_URL` and `ATLAN_API_KEY` environment variables.

mod formatter;

use anyhow::{bail, Context};
use atlan_client::{AssetOps, AtlanClient, ClientConfig};
use atlan_model::assets::api::{
    ApiFieldAttributes, ApiObjectAttributes, ApiPathAttributes, ApiQueryAttributes,
    ApiSpecAttributes,
};
use atlan_model::assets::business_policy::BusinessPolicyAttributes;
use atlan_model::assets::connection::ConnectionAttributes;
use atlan_model::assets::fabric::{
    FabricPageAttributes, FabricReportAttributes, FabricWorkspaceAttributes,
};
use atlan_model::assets::glossary::GlossaryTermAttributes;
use atlan_model::assets::qlik::{QlikAppAttributes, QlikSpaceAttributes};
use atlan_model::assets::workflow::{WorkflowAttributes, WorkflowRunAttributes};
use atlan_model::{Asset, AssetKind, AtlanTag, CertificateStatus, Entity};
use atlan_search::asset;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use formatter::{format_entities, format_entity, OutputFormat};

/// Asset type names this tool can operate on.
const TYPE_NAMES: [&str; 15] = [
    "APISpec",
    "APIPath",
    "APIObject",
    "APIQuery",
    "APIField",
    "BusinessPolicy",
    "Connection",
    "FabricWorkspace",
    "FabricReport",
    "FabricPage",
    "AtlasGlossaryTerm",
    "QlikSpace",
    "QlikApp",
    "Workflow",
    "WorkflowRun",
];

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

/// atlan: command-line access to the Atlan metadata catalog.
#[derive(Parser, Debug)]
#[command(name = "atlan", version, about = "Command-line tool for the Atlan metadata catalog")]
struct Cli {
    /// Base URL of the Atlan tenant.
    #[arg(long, env = "ATLAN_BASE_URL")]
    base_url: Option<String>,

    /// API token sent as a bearer token.
    #[arg(long, env = "ATLAN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Output format: table, json or csv.
    #[arg(long, default_value = "table")]
    format: OutputFormat,

    /// Retries for rate-limited or unavailable requests.
    #[arg(long, default_value_t = 3)]
    max_retries: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the asset types this tool understands.
    Types,

    /// Retrieve one asset by GUID or qualified name.
    Get {
        #[arg(long = "type")]
        type_name: String,
        /// GUID or qualified name.
        id: String,
        /// Also return relationship attributes.
        #[arg(long)]
        relationships: bool,
    },

    /// Search assets of one type.
    Search {
        #[arg(long = "type")]
        type_name: String,
        /// Only assets whose qualified name starts with this prefix.
        #[arg(long)]
        prefix: Option<String>,
        /// Only assets with this certificate.
        #[arg(long)]
        certificate: Option<CertificateStatus>,
        /// Include archived assets.
        #[arg(long)]
        archived: bool,
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long, default_value_t = 100)]
        page_size: usize,
    },

    /// Count assets of one type.
    Count {
        #[arg(long = "type")]
        type_name: String,
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        archived: bool,
    },

    /// Set or clear the certificate on an asset.
    Certify {
        #[arg(long = "type")]
        type_name: String,
        qualified_name: String,
        /// VERIFIED, DRAFT or DEPRECATED. Omit to clear the certificate.
        status: Option<CertificateStatus>,
        #[arg(long)]
        message: Option<String>,
        /// Asset name; needed only when clearing.
        #[arg(long)]
        name: Option<String>,
    },

    /// Attach or detach an Atlan tag.
    Tag {
        #[arg(long = "type")]
        type_name: String,
        qualified_name: String,
        tag: String,
        /// Detach instead of attach.
        #[arg(long)]
        remove: bool,
        /// Propagate the tag to child and downstream assets.
        #[arg(long)]
        propagate: bool,
    },

    /// Archive an asset, or remove it permanently with --purge.
    Delete {
        #[arg(long = "type")]
        type_name: String,
        guid: String,
        #[arg(long)]
        purge: bool,
    },

    /// Re-activate an archived asset.
    Restore {
        #[arg(long = "type")]
        type_name: String,
        qualified_name: String,
    },
}

impl Command {
    fn type_name(&self) -> Option<&str> {
        match self {
            Command::Types => None,
            Command::Get { type_name, .. }
            | Command::Search { type_name, .. }
            | Command::Count { type_name, .. }
            | Command::Certify { type_name, .. }
            | Command::Tag { type_name, .. }
            | Command::Delete { type_name, .. }
            | Command::Restore { type_name, .. } => Some(type_name),
        }
    }
}

/// Run `$body` with `$k` bound to the attribute set of `$type_name`.
macro_rules! with_asset_kind {
    ($type_name:expr, $k:ident => $body:expr) => {
        match $type_name {
            "APISpec" => { type $k = ApiSpecAttributes; $body }
            "APIPath" => { type $k = ApiPathAttributes; $body }
            "APIObject" => { type $k = ApiObjectAttributes; $body }
            "APIQuery" => { type $k = ApiQueryAttributes; $body }
            "APIField" => { type $k = ApiFieldAttributes; $body }
            "BusinessPolicy" => { type $k = BusinessPolicyAttributes; $body }
            "Connection" => { type $k = ConnectionAttributes; $body }
            "FabricWorkspace" => { type $k = FabricWorkspaceAttributes; $body }
            "FabricReport" => { type $k = FabricReportAttributes; $body }
            "FabricPage" => { type $k = FabricPageAttributes; $body }
            "AtlasGlossaryTerm" => { type $k = GlossaryTermAttributes; $body }
            "QlikSpace" => { type $k = QlikSpaceAttributes; $body }
            "QlikApp" => { type $k = QlikAppAttributes; $body }
            "Workflow" => { type $k = WorkflowAttributes; $body }
            "WorkflowRun" => { type $k = WorkflowRunAttributes; $body }
            other => bail!(
                "Unknown asset type '{other}'. Valid types: {}",
                TYPE_NAMES.join(", ")
            ),
        }
    };
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let Some(type_name) = cli.command.type_name() else {
        for name in TYPE_NAMES {
            println!("{name}");
        }
        return Ok(());
    };

    let base_url = cli
        .base_url
        .clone()
        .context("--base-url or ATLAN_BASE_URL is required")?;
    let mut config = ClientConfig::new(base_url);
    config.api_token = cli.api_key.clone();
    config.max_retries = cli.max_retries;
    let client = AtlanClient::from_config(config).context("invalid client configuration")?;
    debug!(base_url = %client.base_url(), "client ready");

    let output = with_asset_kind!(type_name, K => run::<K>(&client, &cli.command, cli.format).await?);
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Execute one command against assets of type `K`, returning what to print.
async fn run<K: AssetKind>(
    client: &AtlanClient,
    command: &Command,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match command {
        Command::Types => Ok(TYPE_NAMES.join("\n")),

        Command::Get { id, relationships, .. } => {
            let found = Asset::<K>::get(client, id, *relationships)
                .await
                .with_context(|| format!("could not retrieve {} {id}", K::TYPE_NAME))?;
            Ok(format_entity(&found.to_entity()?, format))
        }

        Command::Search {
            prefix,
            certificate,
            archived,
            limit,
            page_size,
            ..
        } => {
            let mut search = Asset::<K>::select(client, *archived).page_size(*page_size);
            if let Some(prefix) = prefix {
                search = search.where_(asset::QUALIFIED_NAME.starts_with(prefix.as_str(), false));
            }
            if let Some(status) = certificate {
                search = search
                    .where_(asset::CERTIFICATE_STATUS.eq(status.as_str()))
                    .include_on_results(&asset::CERTIFICATE_STATUS);
            }
            let found: Vec<Entity> = search.to_list(Some(*limit)).await?;
            Ok(format_entities(&found, format))
        }

        Command::Count { prefix, archived, .. } => {
            let mut search = Asset::<K>::select(client, *archived);
            if let Some(prefix) = prefix {
                search = search.where_(asset::QUALIFIED_NAME.starts_with(prefix.as_str(), false));
            }
            Ok(search.count().await?.to_string())
        }

        Command::Certify {
            qualified_name,
            status,
            message,
            name,
            ..
        } => {
            let updated = match status {
                Some(status) => {
                    Asset::<K>::update_certificate(client, qualified_name, *status, message.as_deref())
                        .await?
                }
                None => {
                    let name = name
                        .as_deref()
                        .context("--name is required to clear a certificate")?;
                    Asset::<K>::remove_certificate(client, qualified_name, name).await?
                }
            };
            match updated {
                Some(asset) => Ok(format_entity(&asset.to_entity()?, format)),
                None => bail!("catalog did not report {qualified_name} as updated"),
            }
        }

        Command::Tag {
            qualified_name,
            tag,
            remove,
            propagate,
            ..
        } => {
            if *remove {
                Asset::<K>::remove_atlan_tag(client, qualified_name, tag).await?;
                info!(%qualified_name, %tag, "tag removed");
                return Ok(String::new());
            }
            let tag = AtlanTag::with_propagation(tag.as_str(), *propagate, true, false);
            let tagged = Asset::<K>::append_atlan_tags(client, qualified_name, vec![tag]).await?;
            Ok(format_entity(&tagged.to_entity()?, format))
        }

        Command::Delete { guid, purge, .. } => {
            let response = if *purge {
                Asset::<K>::purge(client, guid).await?
            } else {
                Asset::<K>::delete(client, guid).await?
            };
            let removed = response.deleted();
            if removed.is_empty() {
                bail!("catalog deleted nothing for {guid}");
            }
            Ok(format_entities(removed, format))
        }

        Command::Restore { qualified_name, .. } => {
            if !Asset::<K>::restore(client, qualified_name).await? {
                bail!("catalog did not restore {qualified_name}");
            }
            Ok(format!("{qualified_name} is active"))
        }
    }
}
