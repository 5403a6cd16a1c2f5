//! Gitea HTTP client (REST v1) for repositories and organizations.
//!
//! Endpoints used:
//!   * GET    /repos/{owner}/{repo}
//!   * PATCH  /repos/{owner}/{repo}
//!   * DELETE /repos/{owner}/{repo}
//!   * GET    /orgs/{org}/repos
//!   * POST   /orgs/{org}/repos
//!   * GET    /users/{user}/repos
//!   * POST   /user/repos
//!   * GET    /orgs/{org}
//!   * GET    /user/orgs

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use urlencoding::encode;

use crate::api::GiteaApi;
use crate::errors::{ApiError, ApiResult};
use crate::types::*;

/// Gitea HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct GiteaClient {
    http: Client,
    base_api: String, // "https://gitea.com/api/v1"
    token: Option<String>,
}

impl GiteaClient {
    /// Constructs a Gitea client for the server at `base_url`
    /// (e.g. "https://gitea.com/") using a shared HTTP instance.
    ///
    /// An empty token means anonymous access.
    pub fn new(http: Client, base_url: &str, token: impl Into<String>) -> ApiResult<Self> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{base_url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let base_api = format!("{}/api/v1", base_url.trim_end_matches('/'));
        debug!("Creating GiteaClient with base_api={}", base_api);

        let token: String = token.into();
        Ok(Self {
            http,
            base_api,
            token: (!token.is_empty()).then_some(token),
        })
    }

    pub fn base_api(&self) -> &str {
        &self.base_api
    }

    /// Starts a request against `{base_api}{path}` with auth headers set.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_api, path);
        debug!("Gitea {} {}", method, url);

        let req = self
            .http
            .request(method, url)
            .header("Accept", "application/json");
        match &self.token {
            Some(token) => req.header("Authorization", format!("token {token}")),
            None => req,
        }
    }
}

impl GiteaApi for GiteaClient {
    async fn get_repo(&self, owner: &str, repo: &str) -> ApiResult<(Repository, Response)> {
        let path = format!("/repos/{}/{}", encode(owner), encode(repo));
        send_json(self.request(Method::GET, &path)).await
    }

    async fn list_org_repos(
        &self,
        org: &str,
        opts: ListOptions,
    ) -> ApiResult<(Vec<Repository>, Response)> {
        let path = format!("/orgs/{}/repos", encode(org));
        send_json(self.request(Method::GET, &path).query(&opts.query())).await
    }

    async fn list_user_repos(
        &self,
        user: &str,
        opts: ListOptions,
    ) -> ApiResult<(Vec<Repository>, Response)> {
        let path = format!("/users/{}/repos", encode(user));
        send_json(self.request(Method::GET, &path).query(&opts.query())).await
    }

    async fn create_org_repo(
        &self,
        org: &str,
        opt: CreateRepoOption,
    ) -> ApiResult<(Repository, Response)> {
        let path = format!("/orgs/{}/repos", encode(org));
        send_json(self.request(Method::POST, &path).json(&opt)).await
    }

    async fn create_repo(&self, opt: CreateRepoOption) -> ApiResult<(Repository, Response)> {
        send_json(self.request(Method::POST, "/user/repos").json(&opt)).await
    }

    async fn edit_repo(
        &self,
        owner: &str,
        repo: &str,
        opt: EditRepoOption,
    ) -> ApiResult<(Repository, Response)> {
        let path = format!("/repos/{}/{}", encode(owner), encode(repo));
        send_json(self.request(Method::PATCH, &path).json(&opt)).await
    }

    async fn delete_repo(&self, owner: &str, repo: &str) -> ApiResult<Response> {
        let path = format!("/repos/{}/{}", encode(owner), encode(repo));
        let resp = self.request(Method::DELETE, &path).send().await?;
        let (_, meta) = check_status(resp).await?;
        Ok(meta)
    }

    async fn get_org(&self, org: &str) -> ApiResult<(Organization, Response)> {
        let path = format!("/orgs/{}", encode(org));
        send_json(self.request(Method::GET, &path)).await
    }

    async fn list_my_orgs(&self, opts: ListOptions) -> ApiResult<(Vec<Organization>, Response)> {
        send_json(self.request(Method::GET, "/user/orgs").query(&opts.query())).await
    }
}

/// Sends the request and decodes a JSON body on success.
async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> ApiResult<(T, Response)> {
    let resp = req.send().await?;
    let (resp, meta) = check_status(resp).await?;
    let body = resp
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok((body, meta))
}

/// Splits a response into success metadata or a status error carrying the
/// server's message.
async fn check_status(resp: reqwest::Response) -> ApiResult<(reqwest::Response, Response)> {
    let status = resp.status();
    if status.is_success() {
        let total_count = resp
            .headers()
            .get("x-total-count")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let meta = Response {
            status: status.as_u16(),
            total_count,
        };
        return Ok((resp, meta));
    }

    let body = resp.text().await.unwrap_or_default();
    debug!("Gitea request failed: status={}", status);
    Err(ApiError::from_body(status.as_u16(), &body))
}
