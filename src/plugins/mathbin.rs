//! Mathbin formula preview plugin.
//!
//! `!mathbin <latex>` asks mathbin for a rendered preview and replies with
//! the image URL. Failures become the reply text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Trigger prefix, including the separating space.
pub const PREFIX: &str = "!mathbin ";

static IMAGE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"equation_previews/[\d_]+\.png").expect("valid regex"));

/// Fetch a preview for `code` and return the text to reply with.
///
/// `base` is the service root, e.g. `http://mathbin.net/`.
pub async fn render(http: &reqwest::Client, base: &str, code: &str) -> String {
    match fetch_image_path(http, base, code).await {
        Ok(path) => format!("{}{}", base, path),
        Err(e) => {
            warn!("Mathbin preview failed: {:#}", e);
            format!("mathbin error: {}", e)
        }
    }
}

async fn fetch_image_path(
    http: &reqwest::Client,
    base: &str,
    code: &str,
) -> anyhow::Result<String> {
    let url = preview_url(base, code);
    debug!("Requesting mathbin preview: {}", url);

    let body = http.get(&url).send().await?.error_for_status()?.text().await?;

    extract_image_path(&body)
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("no preview image in response"))
}

fn preview_url(base: &str, code: &str) -> String {
    let body = format!("[EQ]{}[/EQ]", code);
    let encoded: String = url::form_urlencoded::byte_serialize(body.as_bytes()).collect();
    format!("{}preview.cgi?body={}", base, encoded)
}

/// Find the preview image path in a response body.
pub fn extract_image_path(body: &str) -> Option<&str> {
    IMAGE_PATH.find(body).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP response with `body`.
    async fn serve_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[test]
    fn test_extract_image_path() {
        let body = r#"<img src="/equation_previews/1234_56.png" alt="">"#;
        assert_eq!(extract_image_path(body), Some("equation_previews/1234_56.png"));
        assert_eq!(extract_image_path("<p>nothing</p>"), None);
    }

    #[test]
    fn test_preview_url_wraps_and_escapes() {
        assert_eq!(
            preview_url("http://mathbin.net/", "x^2"),
            "http://mathbin.net/preview.cgi?body=%5BEQ%5Dx%5E2%5B%2FEQ%5D"
        );
    }

    #[tokio::test]
    async fn test_render_success() {
        let base = serve_once(r#"<img src="equation_previews/42_1.png">"#).await;
        let http = reqwest::Client::new();

        let reply = render(&http, &base, "a+b").await;
        assert_eq!(reply, format!("{}equation_previews/42_1.png", base));
    }

    #[tokio::test]
    async fn test_render_reports_missing_image() {
        let base = serve_once("<html>oops</html>").await;
        let http = reqwest::Client::new();

        let reply = render(&http, &base, "a+b").await;
        assert_eq!(reply, "mathbin error: no preview image in response");
    }

    #[tokio::test]
    async fn test_render_reports_connection_error() {
        // Bind and drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let http = reqwest::Client::new();
        let reply = render(&http, &format!("http://{}/", addr), "x").await;
        assert!(reply.starts_with("mathbin error: "));
    }
}
