// src/fetch/mod.rs

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;

/// Raw markup retrieved from a results page.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub status: u16,
    pub body: String,
}

/// One GET against `url`. Transport failures and non-2xx statuses are both
/// `FetchError`s; nothing is retried.
#[instrument(level = "info", skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<Page, FetchError> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let resp = client
        .get(parsed.clone())
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = resp.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })?;
    debug!(status = status.as_u16(), bytes = body.len(), "fetched page");

    Ok(Page {
        url: parsed,
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
pub(crate) mod testserver {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    /// Serves `response` verbatim to every connection; returns the base URL.
    pub async fn serve(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut sock, _)) = listener.accept().await else {
                    return;
                };
                let response = response.clone();
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = sock.read(&mut buf).await;
                    let _ = sock.write_all(response.as_bytes()).await;
                    let _ = sock.shutdown().await;
                });
            }
        });
        format!("http://{}/index.htm", addr)
    }

    /// Client that never routes through an env-configured proxy.
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    pub fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }
}
