use paydash_core::{Credential, FailureKind, FetchFailure};
use paydash_logging::dash_info;
use serde::Deserialize;

use crate::fetch::{parse_url, ReqwestFetcher};

#[derive(Debug, Deserialize)]
struct LoginResponse {
    username: String,
    bear_token: String,
}

impl ReqwestFetcher {
    /// Exchanges a username and password for a credential via `GET {base}/login`.
    pub async fn login(
        &self,
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Credential, FetchFailure> {
        let mut url = parse_url(&format!("{}/login", base_url.trim_end_matches('/')))?;
        url.query_pairs_mut()
            .append_pair("username", username)
            .append_pair("password", password);

        let payload = self.get_json(url).await?;
        let response: LoginResponse = serde_json::from_value(payload).map_err(|err| {
            FetchFailure::new(FailureKind::MalformedPayload, format!("login response: {err}"))
        })?;
        if response.bear_token.trim().is_empty() {
            return Err(FetchFailure::new(
                FailureKind::MalformedPayload,
                "login response carried an empty token",
            ));
        }
        dash_info!("logged in as {}", response.username);
        Ok(Credential::new(response.bear_token, response.username))
    }
}
