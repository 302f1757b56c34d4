//! Download-link liveness probe.

use reqwest::blocking::Client;

use crate::error::Result;
use crate::models::HttpConfig;
use crate::utils::http;

/// Outcome of probing a download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// The server answered with this status code
    Status(u16),
    /// No answer at all (DNS, connection, timeout, ...)
    Unreachable(String),
}

impl LinkStatus {
    /// Only a plain 200 counts as alive; redirects included, anything else is dead.
    pub fn is_alive(&self) -> bool {
        matches!(self, LinkStatus::Status(200))
    }
}

/// Something that can tell whether a download link still works.
pub trait LinkChecker {
    fn probe(&self, url: &str) -> LinkStatus;
}

/// Probes links with a single HTTP HEAD request.
pub struct HttpLinkChecker {
    client: Client,
}

impl HttpLinkChecker {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_probe_client(config)?,
        })
    }
}

impl LinkChecker for HttpLinkChecker {
    fn probe(&self, url: &str) -> LinkStatus {
        match self.client.head(url).send() {
            Ok(response) => {
                let status = response.status().as_u16();
                log::debug!("HEAD {url} -> {status}");
                LinkStatus::Status(status)
            }
            Err(e) => {
                log::warn!("HEAD {url} failed: {e}");
                LinkStatus::Unreachable(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Answer a single request on a local port with `status_line`.
    fn serve_once(status_line: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nLocation: http://{addr}/moved.zip\r\n\
                 Content-Length: 0\r\nConnection: close\r\n\r\n"
            );
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            request_line
        });
        (format!("http://{addr}/file.zip"), handle)
    }

    #[test]
    fn test_only_200_is_alive() {
        assert!(LinkStatus::Status(200).is_alive());
        for code in [201, 204, 301, 302, 304, 403, 404, 410, 500, 503] {
            assert!(!LinkStatus::Status(code).is_alive(), "{code} should be dead");
        }
        assert!(!LinkStatus::Unreachable("timed out".into()).is_alive());
    }

    #[test]
    fn test_redirect_is_not_followed() {
        let (url, server) = serve_once("302 Found");
        let checker = HttpLinkChecker::new(&HttpConfig::default()).unwrap();

        let status = checker.probe(&url);
        assert_eq!(status, LinkStatus::Status(302));
        assert!(!status.is_alive());
        assert!(server.join().unwrap().starts_with("HEAD /file.zip "));
    }

    #[test]
    fn test_plain_200_is_alive() {
        let (url, server) = serve_once("200 OK");
        let checker = HttpLinkChecker::new(&HttpConfig::default()).unwrap();

        assert!(checker.probe(&url).is_alive());
        server.join().unwrap();
    }

    #[test]
    fn test_refused_connection_is_unreachable() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let checker = HttpLinkChecker::new(&HttpConfig::default()).unwrap();

        let status = checker.probe(&format!("http://{addr}/file.zip"));
        assert!(matches!(status, LinkStatus::Unreachable(_)));
    }
}
