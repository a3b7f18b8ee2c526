//! Best-effort reachability check for the scoring service

use crate::config::ApiConfig;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Liveness probe bound to one endpoint
pub struct LivenessProbe {
    client: Client,
    url: String,
}

impl LivenessProbe {
    /// Create a probe with an explicit request timeout
    pub fn new(url: &str, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build HTTP client with timeout, using defaults");
            Client::new()
        });
        Self::with_client(url, client)
    }

    /// Create a probe from the API configuration
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.url, Duration::from_millis(config.timeout_ms))
    }

    /// Create a probe around an existing client
    pub fn with_client(url: &str, client: Client) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one plain GET. Any HTTP response, whatever its status, counts as
    /// online. Transport failures are logged and reported as `false`.
    pub fn is_online(&self) -> bool {
        match self.client.get(&self.url).send() {
            Ok(response) => {
                debug!(url = %self.url, status = %response.status(), "Scoring service reachable");
                true
            }
            Err(e) => {
                warn!(
                    url = %self.url,
                    kind = failure_kind(&e),
                    error = %e,
                    "Scoring service unreachable"
                );
                false
            }
        }
    }
}

fn failure_kind(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else if e.is_builder() {
        "invalid_url"
    } else if e.is_request() {
        "request"
    } else {
        "other"
    }
}

/// Check whether `url` answers at all, using the HTTP client's default timeout
pub fn test_server_online(url: &str) -> bool {
    LivenessProbe::with_client(url, Client::new()).is_online()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn local_client() -> Client {
        Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    /// Answer a single request with `status_line` and return the base URL
    fn serve_once(status_line: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                status_line
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        (url, handle)
    }

    #[test]
    fn test_online_when_server_answers() {
        let (url, handle) = serve_once("HTTP/1.1 200 OK");
        let probe = LivenessProbe::with_client(&url, local_client());

        assert!(probe.is_online());
        handle.join().unwrap();
    }

    #[test]
    fn test_error_status_still_counts_as_online() {
        let (url, handle) = serve_once("HTTP/1.1 500 Internal Server Error");
        let probe = LivenessProbe::with_client(&url, local_client());

        assert!(probe.is_online());
        handle.join().unwrap();
    }

    #[test]
    fn test_offline_when_connection_refused() {
        let url = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };
        let probe = LivenessProbe::with_client(&url, local_client());

        assert!(!probe.is_online());
    }

    #[test]
    fn test_offline_for_invalid_url() {
        assert!(!test_server_online("not a url"));
    }

    #[test]
    fn test_probe_from_config() {
        let config = ApiConfig {
            url: "http://localhost:5000".to_string(),
            timeout_ms: 250,
        };
        let probe = LivenessProbe::from_config(&config);
        assert_eq!(probe.url(), "http://localhost:5000");
    }
}
