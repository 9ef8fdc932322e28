use entity::{Credentials, LoginResponse, SessionUser};
use tracing::instrument;

use crate::client::{BackendClient, BackendError};

/// Session endpoints of the backend; tokens are issued and checked there.
#[derive(Clone, Debug)]
pub struct AuthApi {
    client: BackendClient,
}

impl AuthApi {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    #[instrument(name = "auth.login", skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError> {
        // Credential login must not carry the service identity.
        self.client.post_anonymous("/auth/login", credentials).await
    }

    #[instrument(name = "auth.me", skip_all)]
    pub async fn me(&self, token: &str) -> Result<SessionUser, BackendError> {
        self.client.get_json("/auth/me", Some(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;

    #[tokio::test]
    async fn login_returns_token_and_user() {
        let mock = MockBackend::start().await;
        let auth = AuthApi::new(mock.client());
        let response = auth
            .login(&Credentials {
                username: "asha".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.token, "token-asha");
        assert_eq!(response.user.username, "asha");

        let me = auth.me(&response.token).await.unwrap();
        assert_eq!(me.username, "asha");
    }

    #[tokio::test]
    async fn login_never_sends_the_service_token() {
        let mock = MockBackend::start().await;
        let auth = AuthApi::new(mock.client_with_service_token("svc"));
        auth.login(&Credentials {
            username: "asha".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/auth/login");
        assert_eq!(calls[0].authorization, None);
    }

    #[tokio::test]
    async fn wrong_password_surfaces_status() {
        let mock = MockBackend::start().await;
        let err = AuthApi::new(mock.client())
            .login(&Credentials {
                username: "asha".into(),
                password: "nope".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 401, .. }));
    }
}
