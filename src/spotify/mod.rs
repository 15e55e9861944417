//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API this tool needs:
//!
//! - [`auth`] - OAuth 2.0 authorization code flow with PKCE, token refresh
//! - [`library`] - the user's saved tracks (`GET /me/tracks`), offset paginated
//! - [`artists`] - artist metadata and genres (`GET /artists?ids=`), batched
//!
//! All requests go through [`get_with_retry`], which retries `502 Bad Gateway`
//! after ten seconds and honours `Retry-After` on `429 Too Many Requests` for
//! waits up to two minutes. Other error statuses are returned to the caller.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tokio::time::sleep;

use crate::warning;

pub mod artists;
pub mod auth;
pub mod library;

/// Page size used for every paginated endpoint; the API maximum.
pub const PAGE_LIMIT: u64 = 50;

const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_DELAY_SECS: u64 = 10;

pub async fn get_with_retry(
    client: &Client,
    url: &str,
    token: &str,
) -> Result<Response, reqwest::Error> {
    loop {
        let response = client.get(url).bearer_auth(token).send().await?;

        match response.status() {
            StatusCode::BAD_GATEWAY => {
                sleep(Duration::from_secs(BAD_GATEWAY_DELAY_SECS)).await;
                continue; // retry
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);

                if retry_after > MAX_RETRY_AFTER_SECS {
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again later.",
                        retry_after
                    );
                    return response.error_for_status();
                }

                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }
            _ => return response.error_for_status(),
        }
    }
}
