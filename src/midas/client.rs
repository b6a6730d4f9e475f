use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, COOKIE, SET_COOKIE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::errors::MidasClientError;
use super::response::{
    PlayResult, ReferralReward, ReferralStatus, StreakInfo, StreakReward, UserInfo,
};

const API_BASE: &str = "https://api-tg-app.midas.app";
const ACCEPT_VALUE: &str = "application/json, text/plain, */*";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Retry configuration for API requests
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// Per-account session obtained from the register endpoint. Dropped at the
/// end of each account pass, never persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: String,
    pub cookies: String,
}

impl Session {
    fn headers(&self) -> Result<HeaderMap, MidasClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", self.token)
                .parse()
                .map_err(|_| MidasClientError::InvalidHeader)?,
        );
        if !self.cookies.is_empty() {
            headers.insert(
                COOKIE,
                self.cookies
                    .parse()
                    .map_err(|_| MidasClientError::InvalidHeader)?,
            );
        }
        Ok(headers)
    }
}

/// Serialize `Set-Cookie` response headers into a cookie header value,
/// keeping only the `name=value` pair of each cookie.
fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run `op` until it succeeds, retrying after a fixed delay up to
/// `policy.max_retries` additional attempts. All failures are treated alike.
async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, MidasClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MidasClientError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= policy.max_retries {
                    log::error!("Request failed after {} retries: {e}", policy.max_retries);
                    return Err(e);
                }
                attempt += 1;
                log::warn!(
                    "Request failed: {e}. Retrying in {}s (attempt {attempt}/{})",
                    policy.retry_delay.as_secs(),
                    policy.max_retries
                );
                tokio::time::sleep(policy.retry_delay).await;
            }
        }
    }
}

/// The operations a workflow needs from the Midas API, behind a trait so the
/// workflow can be exercised without network access.
#[async_trait]
pub trait MidasApi {
    async fn authenticate(&self, init_data: &str) -> Result<Session, MidasClientError>;
    async fn streak_info(&self, session: &Session) -> Result<StreakInfo, MidasClientError>;
    async fn claim_streak(&self, session: &Session) -> Result<StreakReward, MidasClientError>;
    async fn referral_status(&self, session: &Session) -> Result<ReferralStatus, MidasClientError>;
    async fn claim_referral(&self, session: &Session) -> Result<ReferralReward, MidasClientError>;
    async fn user_info(&self, session: &Session) -> Result<UserInfo, MidasClientError>;
    async fn play(&self, session: &Session) -> Result<PlayResult, MidasClientError>;
}

/// `MidasClient` is thread safe
pub struct MidasClient {
    client: Client,
    policy: RetryPolicy,
}

impl MidasClient {
    pub fn new(policy: RetryPolicy) -> Result<Self, MidasClientError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, policy })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
    ) -> Result<T, MidasClientError> {
        let url = format!("{API_BASE}{path}");
        let headers = session.headers()?;
        with_retry(&self.policy, || {
            let request = self.client.get(&url).headers(headers.clone());
            async move {
                let resp = request.send().await?;
                if !resp.status().is_success() {
                    return Err(MidasClientError::InvalidResponseStatus {
                        status: resp.status(),
                    });
                }
                Ok(resp.json::<T>().await?)
            }
        })
        .await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
    ) -> Result<T, MidasClientError> {
        let url = format!("{API_BASE}{path}");
        let headers = session.headers()?;
        with_retry(&self.policy, || {
            let request = self.client.post(&url).headers(headers.clone());
            async move {
                let resp = request.send().await?;
                if !resp.status().is_success() {
                    return Err(MidasClientError::InvalidResponseStatus {
                        status: resp.status(),
                    });
                }
                Ok(resp.json::<T>().await?)
            }
        })
        .await
    }
}

#[async_trait]
impl MidasApi for MidasClient {
    /// Exchange an init-data credential for a bearer token and session
    /// cookies. The register endpoint returns the token as plain body text.
    async fn authenticate(&self, init_data: &str) -> Result<Session, MidasClientError> {
        let url = format!("{API_BASE}/api/auth/register");
        let payload = json!({ "initData": init_data });
        let (token, cookies) = with_retry(&self.policy, || {
            let request = self
                .client
                .post(&url)
                .header(ACCEPT, ACCEPT_VALUE)
                .json(&payload);
            async move {
                let resp = request.send().await?;
                if !resp.status().is_success() {
                    return Err(MidasClientError::InvalidResponseStatus {
                        status: resp.status(),
                    });
                }
                let cookies = cookie_header(resp.headers());
                let token = resp.text().await?;
                Ok((token, cookies))
            }
        })
        .await?;
        if token.is_empty() {
            return Err(MidasClientError::EmptyToken);
        }
        Ok(Session { token, cookies })
    }

    async fn streak_info(&self, session: &Session) -> Result<StreakInfo, MidasClientError> {
        self.get_json("/api/streak", session).await
    }

    async fn claim_streak(&self, session: &Session) -> Result<StreakReward, MidasClientError> {
        self.post_json("/api/streak", session).await
    }

    async fn referral_status(&self, session: &Session) -> Result<ReferralStatus, MidasClientError> {
        self.get_json("/api/referral/status", session).await
    }

    async fn claim_referral(&self, session: &Session) -> Result<ReferralReward, MidasClientError> {
        self.post_json("/api/referral/claim", session).await
    }

    async fn user_info(&self, session: &Session) -> Result<UserInfo, MidasClientError> {
        self.get_json("/api/user", session).await
    }

    async fn play(&self, session: &Session) -> Result<PlayResult, MidasClientError> {
        self.post_json("/api/game/play", session).await
    }
}
