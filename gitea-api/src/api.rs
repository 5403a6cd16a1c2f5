//! The API surface the provider adapter is written against.

use std::future::Future;

use crate::errors::ApiResult;
use crate::types::{
    CreateRepoOption, EditRepoOption, ListOptions, Organization, Repository, Response,
};

/// Calls of the Gitea REST API, each returning the decoded object together
/// with the response metadata.
///
/// [`crate::GiteaClient`] is the HTTP implementation; in-memory doubles
/// implement it in tests.
pub trait GiteaApi: Send + Sync {
    /// `GET /repos/{owner}/{repo}`
    fn get_repo(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = ApiResult<(Repository, Response)>> + Send;

    /// `GET /orgs/{org}/repos`, one page.
    fn list_org_repos(
        &self,
        org: &str,
        opts: ListOptions,
    ) -> impl Future<Output = ApiResult<(Vec<Repository>, Response)>> + Send;

    /// `GET /users/{user}/repos`, one page.
    fn list_user_repos(
        &self,
        user: &str,
        opts: ListOptions,
    ) -> impl Future<Output = ApiResult<(Vec<Repository>, Response)>> + Send;

    /// `POST /orgs/{org}/repos`
    fn create_org_repo(
        &self,
        org: &str,
        opt: CreateRepoOption,
    ) -> impl Future<Output = ApiResult<(Repository, Response)>> + Send;

    /// `POST /user/repos`, owned by the authenticated user.
    fn create_repo(
        &self,
        opt: CreateRepoOption,
    ) -> impl Future<Output = ApiResult<(Repository, Response)>> + Send;

    /// `PATCH /repos/{owner}/{repo}`
    fn edit_repo(
        &self,
        owner: &str,
        repo: &str,
        opt: EditRepoOption,
    ) -> impl Future<Output = ApiResult<(Repository, Response)>> + Send;

    /// `DELETE /repos/{owner}/{repo}`
    fn delete_repo(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = ApiResult<Response>> + Send;

    /// `GET /orgs/{org}`
    fn get_org(&self, org: &str) -> impl Future<Output = ApiResult<(Organization, Response)>> + Send;

    /// `GET /user/orgs`, one page.
    fn list_my_orgs(
        &self,
        opts: ListOptions,
    ) -> impl Future<Output = ApiResult<(Vec<Organization>, Response)>> + Send;
}
