//! Validation of references against Gitea's naming rules and of objects
//! returned by the Gitea API.

use std::sync::LazyLock;

use gitea_api::{ApiResult, Organization, Repository, Response};
use gitprovider::{
    GitProviderResult, IdentityRef, OrgRepositoryRef, OrganizationRef, RepositoryRef, UserRef,
    UserRepositoryRef, Validator,
};
use regex::Regex;

use crate::errors::handle_http_error;

const MAX_OWNER_NAME_LEN: usize = 40;
const MAX_REPOSITORY_NAME_LEN: usize = 100;

static OWNER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").unwrap());
static REPOSITORY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

pub(crate) fn validate_organization_ref(
    r: &OrganizationRef,
    expected_domain: &str,
) -> GitProviderResult<()> {
    r.validate_fields()?;
    let mut v = Validator::new("OrganizationRef");
    check_domain(&mut v, r.domain(), expected_domain);
    check_owner_name(&mut v, "organization", &r.organization);
    if !r.sub_organizations.is_empty() {
        v.invalid("sub_organizations", "gitea has no sub-organizations");
    }
    v.finish()
}

pub(crate) fn validate_user_ref(r: &UserRef, expected_domain: &str) -> GitProviderResult<()> {
    r.validate_fields()?;
    let mut v = Validator::new("UserRef");
    check_domain(&mut v, r.domain(), expected_domain);
    check_owner_name(&mut v, "user_login", &r.user_login);
    v.finish()
}

pub(crate) fn validate_org_repository_ref(
    r: &OrgRepositoryRef,
    expected_domain: &str,
) -> GitProviderResult<()> {
    validate_organization_ref(&r.organization, expected_domain)?;
    r.validate_fields()?;
    let mut v = Validator::new("OrgRepositoryRef");
    check_repository_name(&mut v, &r.repository_name);
    v.finish()
}

pub(crate) fn validate_user_repository_ref(
    r: &UserRepositoryRef,
    expected_domain: &str,
) -> GitProviderResult<()> {
    validate_user_ref(&r.user, expected_domain)?;
    r.validate_fields()?;
    let mut v = Validator::new("UserRepositoryRef");
    check_repository_name(&mut v, &r.repository_name);
    v.finish()
}

/// Repository references the adapter can check against Gitea's rules and
/// the client's domain.
pub trait GiteaRepositoryRef: RepositoryRef {
    fn validate_for_domain(&self, expected_domain: &str) -> GitProviderResult<()>;
}

impl GiteaRepositoryRef for OrgRepositoryRef {
    fn validate_for_domain(&self, expected_domain: &str) -> GitProviderResult<()> {
        validate_org_repository_ref(self, expected_domain)
    }
}

impl GiteaRepositoryRef for UserRepositoryRef {
    fn validate_for_domain(&self, expected_domain: &str) -> GitProviderResult<()> {
        validate_user_repository_ref(self, expected_domain)
    }
}

fn check_domain(v: &mut Validator, domain: &str, expected: &str) {
    if domain != expected {
        v.invalid(
            "domain",
            format!("'{domain}' does not match the client domain '{expected}'"),
        );
    }
}

fn check_owner_name(v: &mut Validator, field: &str, name: &str) {
    if name.len() > MAX_OWNER_NAME_LEN {
        v.invalid(field, format!("longer than {MAX_OWNER_NAME_LEN} characters"));
    } else if !OWNER_NAME.is_match(name) {
        v.invalid(field, format!("'{name}' is not a valid gitea user or organization name"));
    }
}

fn check_repository_name(v: &mut Validator, name: &str) {
    if name.len() > MAX_REPOSITORY_NAME_LEN {
        v.invalid(
            "repository_name",
            format!("longer than {MAX_REPOSITORY_NAME_LEN} characters"),
        );
    } else if name == "." || name == ".." || !REPOSITORY_NAME.is_match(name) {
        v.invalid(
            "repository_name",
            format!("'{name}' is not a valid gitea repository name"),
        );
    }
}

/// Checks the fields every repository object from Gitea must carry.
pub(crate) fn validate_repository_api(api_obj: &Repository) -> GitProviderResult<()> {
    let mut v = Validator::new("gitea.Repository");
    v.required("name", &api_obj.name);
    match &api_obj.owner {
        Some(owner) => {
            v.required("owner.login", &owner.login);
        }
        None => {
            v.invalid("owner", "missing");
        }
    }
    v.finish()
}

pub(crate) fn validate_organization_api(api_obj: &Organization) -> GitProviderResult<()> {
    let mut v = Validator::new("gitea.Organization");
    v.required("username", &api_obj.username);
    v.finish()
}

/// Classifies a failed call, or validates the returned repository.
pub(crate) fn validate_repository_api_resp(
    res: ApiResult<(Repository, Response)>,
) -> GitProviderResult<Repository> {
    let (api_obj, _) = res.map_err(handle_http_error)?;
    validate_repository_api(&api_obj)?;
    Ok(api_obj)
}

pub(crate) fn validate_repository_objects(
    api_objs: Vec<Repository>,
) -> GitProviderResult<Vec<Repository>> {
    for api_obj in &api_objs {
        validate_repository_api(api_obj)?;
    }
    Ok(api_objs)
}

pub(crate) fn validate_organization_objects(
    api_objs: Vec<Organization>,
) -> GitProviderResult<Vec<Organization>> {
    for api_obj in &api_objs {
        validate_organization_api(api_obj)?;
    }
    Ok(api_objs)
}
