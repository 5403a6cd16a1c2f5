//! Gitea implementation of the `gitprovider` traits.
//!
//! The adapter translates between the provider-neutral model (references,
//! [`gitprovider::RepositoryInfo`], sentinel errors) and the Gitea REST API
//! exposed by `gitea_api`. It covers:
//!   * organizations: get, list, children (unsupported)
//!   * organization and user repositories: get, list, create, reconcile
//!   * repository handles: get/set/update/reconcile and gated delete.
//!
//! ```no_run
//! use gitea_provider::new_client;
//! use gitprovider::prelude::*;
//! use gitprovider::{ClientOptions, OrgRepositoryRef, OrganizationRef, RepositoryInfo};
//!
//! # async fn run() -> gitprovider::GitProviderResult<()> {
//! let client = new_client("token", ClientOptions::new())?;
//! let org = OrganizationRef::new(client.supported_domain(), "fluxcd");
//! let r = OrgRepositoryRef::new(org, "flux2");
//! let (_repo, changed) = client
//!     .org_repositories()
//!     .reconcile(&r, RepositoryInfo::default(), Default::default())
//!     .await?;
//! # let _ = changed;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
mod errors;
pub mod organizations;
mod pagination;
pub mod repositories;
pub mod repository;
mod validation;

#[cfg(test)]
mod testing;

pub use client::{Client, DEFAULT_DOMAIN, PROVIDER_ID, new_client};
pub use config::{ConfigError, GiteaConfig};
pub use organizations::{GiteaOrganization, OrganizationsClient};
pub use repositories::{OrgRepositoriesClient, UserRepositoriesClient, license_template_name};
pub use repository::{GiteaRepository, OrgRepository, UserRepository};
