//! Classification of Gitea API failures into the neutral error taxonomy.

use gitea_api::ApiError;
use gitprovider::GitProviderError;

/// Maps a failed Gitea call onto a [`GitProviderError`].
///
/// Every SDK error goes through here exactly once, right at the call site.
pub(crate) fn handle_http_error(err: ApiError) -> GitProviderError {
    match err {
        ApiError::Status { status: 404, .. } => GitProviderError::NotFound,
        ApiError::Status { status: 409, .. } => GitProviderError::AlreadyExists,
        ApiError::Status {
            status: status @ (401 | 403),
            message,
            ..
        } => GitProviderError::InvalidCredentials { status, message },
        ApiError::Status {
            status,
            message,
            url,
        } => GitProviderError::Http {
            status,
            message: match url {
                Some(url) => format!("{message} ({url})"),
                None => message,
            },
        },
        ApiError::Transport(msg) => GitProviderError::Transport(msg),
        ApiError::Decode(msg) => GitProviderError::InvalidResponse(msg),
        ApiError::InvalidBaseUrl(msg) => GitProviderError::InvalidOptions(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> ApiError {
        ApiError::Status {
            status,
            message: "boom".into(),
            url: None,
        }
    }

    #[test]
    fn sentinel_statuses() {
        assert!(handle_http_error(status(404)).is_not_found());
        assert!(handle_http_error(status(409)).is_already_exists());
    }

    #[test]
    fn auth_failures_are_invalid_credentials() {
        for code in [401, 403] {
            match handle_http_error(status(code)) {
                GitProviderError::InvalidCredentials { status, message } => {
                    assert_eq!(status, code);
                    assert_eq!(message, "boom");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn other_statuses_keep_message_and_docs_link() {
        let err = handle_http_error(ApiError::Status {
            status: 422,
            message: "invalid default branch".into(),
            url: Some("https://gitea.com/api/swagger".into()),
        });
        match err {
            GitProviderError::Http { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "invalid default branch (https://gitea.com/api/swagger)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_status_failures() {
        assert!(matches!(
            handle_http_error(ApiError::Transport("reset".into())),
            GitProviderError::Transport(_)
        ));
        assert!(matches!(
            handle_http_error(ApiError::Decode("eof".into())),
            GitProviderError::InvalidResponse(_)
        ));
        assert!(matches!(
            handle_http_error(ApiError::InvalidBaseUrl("x".into())),
            GitProviderError::InvalidOptions(_)
        ));
    }
}
