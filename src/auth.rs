use std::fs;
use std::path::Path;
use anyhow::Result;

use rspotify::{prelude::*, AuthCodePkceSpotify, Config, Credentials, OAuth};

const SPOTIFY_CLIENT_ID: &str = "492e1e45ea814fa3ac555fe1576aaf5b";
const SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:8898/login";
pub const SCOPES: &str =
    "user-read-playback-state user-modify-playback-state user-read-currently-playing user-read-playback-position user-library-modify user-library-read";

const CACHE: &str = ".cache";
const TOKEN_CACHE_FILE: &str = ".cache/token.json";

/// Authorize against Spotify with the PKCE auth-code flow.
///
/// A cached token is reused (and refreshed) when present; otherwise
/// the browser flow runs. This happens before the TUI takes over the
/// terminal, so prompting on stdin is fine here.
pub async fn perform_oauth_flow() -> Result<AuthCodePkceSpotify> {
    fs::create_dir_all(CACHE)?;

    let creds = Credentials::new_pkce(SPOTIFY_CLIENT_ID);
    let oauth = OAuth {
        redirect_uri: SPOTIFY_REDIRECT_URI.to_string(),
        scopes: SCOPES.split_whitespace().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    let config = Config {
        token_cached: true,
        cache_path: TOKEN_CACHE_FILE.into(),
        token_refreshing: false,
        ..Default::default()
    };

    let mut client = AuthCodePkceSpotify::with_config(creds, oauth, config);

    match client.read_token_cache(true).await {
        Ok(Some(token)) => {
            tracing::info!("Found cached Spotify token");
            *client.token.lock().await.unwrap() = Some(token);

            if let Err(e) = client.refresh_token().await {
                tracing::warn!(error = %e, "Cached token refresh failed, re-authenticating");
                perform_browser_auth(&mut client).await?;
            } else {
                tracing::debug!("Token refreshed successfully");
            }
        }
        _ => {
            tracing::info!("No cached token found, starting browser authentication");
            perform_browser_auth(&mut client).await?;
        }
    }

    Ok(client)
}

async fn perform_browser_auth(client: &mut AuthCodePkceSpotify) -> Result<()> {
    tracing::info!("Starting browser-based OAuth flow");
    let url = client.get_authorize_url(None)?;
    client.prompt_for_token(&url).await?;
    tracing::info!("Browser authentication completed successfully");
    Ok(())
}

/// Logout: drop the cached token so the next launch re-authenticates
pub fn clear_session() -> Result<()> {
    let path = Path::new(TOKEN_CACHE_FILE);
    if path.exists() {
        fs::remove_file(path)?;
        tracing::info!("Cached Spotify token removed");
    }
    Ok(())
}
