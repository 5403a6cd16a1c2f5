//! Top-level Gitea client: builds the SDK client and hands out the scoped
//! clients that share one context.

use std::sync::Arc;

use gitea_api::{GiteaApi, GiteaClient};
use gitprovider::{ClientOptions, GitProviderError, GitProviderResult, ProviderId, TokenPermission};
use tracing::{debug, info};

use crate::errors::handle_http_error;
use crate::organizations::OrganizationsClient;
use crate::repositories::{OrgRepositoriesClient, UserRepositoriesClient};

/// Domain used when [`ClientOptions::domain`] is not set.
pub const DEFAULT_DOMAIN: &str = "gitea.com";

pub const PROVIDER_ID: ProviderId = ProviderId::new("gitea");

/// State shared read-only by every scoped client and handle of one client.
#[derive(Debug)]
pub(crate) struct ClientContext<A> {
    pub(crate) api: A,
    pub(crate) domain: String,
    pub(crate) destructive_actions: bool,
}

/// Creates a client for the Gitea server named by `options.domain`
/// (`gitea.com` by default).
///
/// A domain without a scheme is reached over `https://{domain}/`; pass e.g.
/// `http://localhost:3000` to talk to a local server. The domain is kept
/// verbatim as [`gitprovider::Client::supported_domain`], so references must
/// carry the same string. Destructive calls stay off unless enabled.
pub fn new_client(token: &str, options: ClientOptions) -> GitProviderResult<Client> {
    options.validate()?;
    let http = options.build_http_client()?;

    let domain = options
        .domain
        .clone()
        .unwrap_or_else(|| DEFAULT_DOMAIN.to_string());
    let base_url = if domain.contains("://") {
        domain.clone()
    } else {
        format!("https://{domain}/")
    };

    let api = GiteaClient::new(http, &base_url, token).map_err(handle_http_error)?;
    let destructive_actions = options.destructive_api_calls_enabled();
    info!(%domain, destructive_actions, "gitea client created");

    Ok(Client::with_api(api, domain, destructive_actions))
}

/// Gitea implementation of [`gitprovider::Client`].
#[derive(Debug)]
pub struct Client<A = GiteaClient> {
    ctx: Arc<ClientContext<A>>,
    organizations: OrganizationsClient<A>,
    org_repositories: OrgRepositoriesClient<A>,
    user_repositories: UserRepositoriesClient<A>,
}

impl<A> Client<A> {
    /// Assembles a client over an existing API implementation.
    pub fn with_api(api: A, domain: impl Into<String>, destructive_actions: bool) -> Self {
        let ctx = Arc::new(ClientContext {
            api,
            domain: domain.into(),
            destructive_actions,
        });
        Self {
            organizations: OrganizationsClient::new(ctx.clone()),
            org_repositories: OrgRepositoriesClient::new(ctx.clone()),
            user_repositories: UserRepositoriesClient::new(ctx.clone()),
            ctx,
        }
    }
}

impl<A: GiteaApi> gitprovider::Client for Client<A> {
    type Organizations = OrganizationsClient<A>;
    type OrgRepositories = OrgRepositoriesClient<A>;
    type UserRepositories = UserRepositoriesClient<A>;
    type Raw = A;

    fn supported_domain(&self) -> &str {
        &self.ctx.domain
    }

    fn provider_id(&self) -> ProviderId {
        PROVIDER_ID
    }

    fn raw(&self) -> &A {
        &self.ctx.api
    }

    fn organizations(&self) -> &OrganizationsClient<A> {
        &self.organizations
    }

    fn org_repositories(&self) -> &OrgRepositoriesClient<A> {
        &self.org_repositories
    }

    fn user_repositories(&self) -> &UserRepositoriesClient<A> {
        &self.user_repositories
    }

    /// Gitea has no endpoint to introspect token scopes.
    async fn has_token_permission(&self, permission: TokenPermission) -> GitProviderResult<bool> {
        debug!(?permission, "token permission check requested");
        Err(GitProviderError::NoProviderSupport)
    }
}
