use reqwest::Client;

use crate::{
    config,
    spotify::{PAGE_LIMIT, get_with_retry},
    types::{Artist, SeveralArtistsResponse},
};

/// Retrieves full artist objects, including genres, for up to 50 ids.
///
/// Unknown ids come back as `null` from the API and are dropped.
///
/// # Example
///
/// ```
/// let artists = get_several_artists(&client, token, &ids[..50]).await?;
/// ```
pub async fn get_several_artists(
    client: &Client,
    token: &str,
    ids: &[String],
) -> Result<Vec<Artist>, reqwest::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let api_url = format!(
        "{uri}/artists?ids={ids}",
        uri = &config::spotify_apiurl(),
        ids = ids
            .iter()
            .take(PAGE_LIMIT as usize)
            .cloned()
            .collect::<Vec<String>>()
            .join(",")
    );

    let response = get_with_retry(client, &api_url, token).await?;
    let res = response.json::<SeveralArtistsResponse>().await?;

    Ok(res.artists.into_iter().flatten().collect())
}
