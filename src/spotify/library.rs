use reqwest::Client;

use crate::{
    config,
    spotify::{PAGE_LIMIT, get_with_retry},
    types::{SavedTrack, SavedTracksResponse},
};

/// Retrieves one page of the user's saved tracks.
///
/// Uses offset pagination on `GET /me/tracks`; `limit` is capped at 50 by the
/// API. Returns the items together with the library total reported by the
/// same response.
///
/// # Example
///
/// ```
/// let (tracks, total) = get_saved_tracks(&client, token, 50, 0).await?;
/// ```
pub async fn get_saved_tracks(
    client: &Client,
    token: &str,
    limit: u64,
    offset: u64,
) -> Result<(Vec<SavedTrack>, u64), reqwest::Error> {
    let api_url = format!(
        "{uri}/me/tracks?limit={limit}&offset={offset}",
        uri = &config::spotify_apiurl(),
        limit = limit.min(PAGE_LIMIT),
        offset = offset
    );

    let response = get_with_retry(client, &api_url, token).await?;
    let res = response.json::<SavedTracksResponse>().await?;

    Ok((res.items, res.total))
}

/// Returns the number of saved tracks with a minimal one-item request.
pub async fn get_total_saved_tracks(client: &Client, token: &str) -> Result<u64, reqwest::Error> {
    let (_, total) = get_saved_tracks(client, token, 1, 0).await?;
    Ok(total)
}

/// Offsets of every page needed to read `total` items in pages of `limit`.
pub fn page_offsets(total: u64, limit: u64) -> Vec<u64> {
    if limit == 0 {
        return Vec::new();
    }
    (0..total).step_by(limit as usize).collect()
}
