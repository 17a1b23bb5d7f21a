#[cfg(feature = "debug-dumps")]
use std::env;

/// Read the response body as text.
/// With `debug-dumps`, if `IS_DEBUG=1`, the body is also written to the temp dir.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _slug: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "debug-dumps")]
    {
        if env::var("IS_DEBUG").ok().as_deref() == Some("1") {
            let path = env::temp_dir().join(format!("insider_screener-{_slug}.html"));
            match std::fs::write(&path, &text) {
                Ok(()) => tracing::debug!("IS_DEBUG: wrote page to {}", path.display()),
                Err(e) => tracing::warn!("IS_DEBUG: failed to dump page for {_slug}: {e}"),
            }
        }
    }

    Ok(text)
}
