// src/core/net.rs

// HTTP GET over reqwest's blocking client. The `Fetch` seam lets the
// pipeline run against canned responses offline.

use log::debug;
use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::config::options::NetOptions;
use crate::error::{Result, ScrapeError};

/// Anything that can turn a URL into a response body.
/// Implementations must be shareable across the worker threads.
pub trait Fetch: Send + Sync {
    /// GET `url` and return the body as text. Non-2xx is an error.
    fn get_text(&self, url: &str) -> Result<String>;
}

pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(net: &NetOptions) -> Result<Self> {
        let inner = Client::builder()
            .timeout(net.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { inner })
    }
}

impl Fetch for HttpClient {
    fn get_text(&self, url: &str) -> Result<String> {
        let http_err = |source: reqwest::Error| ScrapeError::Http { url: url.to_string(), source };

        debug!("GET {url}");
        let resp = self.inner.get(url).send().map_err(http_err)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = resp.text().map_err(http_err)?;
        debug!("{url}: {} bytes", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves one canned response on a local port; returns the base URL.
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut req = Vec::new();
            let mut buf = [0u8; 1024];
            while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                req.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn server_error_is_a_status_error() {
        let (base, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let client = HttpClient::new(&NetOptions::default()).unwrap();
        let url = format!("{base}/advent-calendar/2015/foo");

        let err = client.get_text(&url).unwrap_err();
        server.join().unwrap();
        match err {
            ScrapeError::Status { url: got, status } => {
                assert_eq!(status, 500);
                assert_eq!(got, url);
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[test]
    fn success_returns_the_body() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]",
        );
        let client = HttpClient::new(&NetOptions::default()).unwrap();

        let body = client.get_text(&format!("{base}/api/v1/users/alice/items")).unwrap();
        server.join().unwrap();
        assert_eq!(body, "[]");
    }

    #[test]
    fn refused_connection_is_an_http_error() {
        // Bind then drop so the port is very likely closed.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let client = HttpClient::new(&NetOptions::default()).unwrap();

        let err = client.get_text(&format!("http://127.0.0.1:{port}/")).unwrap_err();
        assert!(matches!(err, ScrapeError::Http { .. }), "{err:?}");
    }
}
