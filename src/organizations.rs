//! Organizations visible to the authenticated user.

use std::sync::Arc;

use gitea_api::{GiteaApi, GiteaClient, Organization};
use gitprovider::{GitProviderError, GitProviderResult, OrganizationInfo, OrganizationRef};
use tracing::debug;

use crate::client::ClientContext;
use crate::errors::handle_http_error;
use crate::pagination::all_pages;
use crate::validation::{
    validate_organization_api, validate_organization_objects, validate_organization_ref,
};

/// Handle to a Gitea organization.
#[derive(Debug, Clone)]
pub struct GiteaOrganization {
    api_obj: Organization,
    reference: OrganizationRef,
}

impl GiteaOrganization {
    fn new(api_obj: Organization, reference: OrganizationRef) -> Self {
        Self { api_obj, reference }
    }
}

impl gitprovider::Organization for GiteaOrganization {
    type ApiObject = Organization;

    fn api_object(&self) -> &Organization {
        &self.api_obj
    }

    fn organization(&self) -> &OrganizationRef {
        &self.reference
    }

    fn get(&self) -> OrganizationInfo {
        organization_from_api(&self.api_obj)
    }
}

fn organization_from_api(api_obj: &Organization) -> OrganizationInfo {
    OrganizationInfo {
        name: (!api_obj.full_name.is_empty()).then(|| api_obj.full_name.clone()),
        description: Some(api_obj.description.clone()),
    }
}

/// Looks up and lists organizations.
#[derive(Debug)]
pub struct OrganizationsClient<A = GiteaClient> {
    ctx: Arc<ClientContext<A>>,
}

impl<A> OrganizationsClient<A> {
    pub(crate) fn new(ctx: Arc<ClientContext<A>>) -> Self {
        Self { ctx }
    }
}

impl<A: GiteaApi> gitprovider::OrganizationsClient for OrganizationsClient<A> {
    type Organization = GiteaOrganization;

    async fn get(&self, org: &OrganizationRef) -> GitProviderResult<GiteaOrganization> {
        validate_organization_ref(org, &self.ctx.domain)?;
        debug!(org = %org, "get organization");

        let (api_obj, _) = self
            .ctx
            .api
            .get_org(&org.organization)
            .await
            .map_err(handle_http_error)?;
        validate_organization_api(&api_obj)?;
        Ok(GiteaOrganization::new(api_obj, org.clone()))
    }

    /// Organizations the authenticated user is a member of.
    async fn list(&self) -> GitProviderResult<Vec<GiteaOrganization>> {
        let api = &self.ctx.api;
        let api_objs = all_pages(|opts| api.list_my_orgs(opts)).await?;
        let api_objs = validate_organization_objects(api_objs)?;
        debug!(count = api_objs.len(), "listed organizations");

        Ok(api_objs
            .into_iter()
            .map(|api_obj| {
                let reference = OrganizationRef::new(&self.ctx.domain, &api_obj.username);
                GiteaOrganization::new(api_obj, reference)
            })
            .collect())
    }

    /// Gitea organizations are flat.
    async fn children(&self, org: &OrganizationRef) -> GitProviderResult<Vec<GiteaOrganization>> {
        debug!(org = %org, "sub-organizations requested");
        Err(GitProviderError::NoProviderSupport)
    }
}
