//! Minimal Gitea REST v1 client.
//!
//! Covers the repository and organization endpoints needed by the provider
//! adapter. Every call returns the decoded object plus [`Response`] metadata,
//! and non-2xx answers are surfaced as [`ApiError::Status`] with the server's
//! message.

mod api;
mod client;
mod errors;
pub mod types;

pub use api::GiteaApi;
pub use client::GiteaClient;
pub use errors::{ApiError, ApiResult};
pub use types::{
    CreateRepoOption, DEFAULT_PAGE_SIZE, EditRepoOption, ListOptions, Organization, Repository,
    Response, User,
};
