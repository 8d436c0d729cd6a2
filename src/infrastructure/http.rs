use reqwest::blocking::Client;

use crate::domain::{CreatureRecord, CreatureSource, LookupError, LookupResult, Query};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Maps an HTTP status to the lookup failure it represents, if any.
pub fn classify_status(status: u16) -> Option<LookupError> {
    match status {
        200..=299 => None,
        404 => Some(LookupError::NotFound),
        other => Some(LookupError::FetchFailed(format!("HTTP {}", other))),
    }
}

/// Fetches creature records with one `GET <base_url>/<query>` per lookup.
#[derive(Debug, Clone)]
pub struct HttpCreatureSource {
    client: Client,
    base_url: String,
}

impl HttpCreatureSource {
    /// Builds a source with its own client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Endpoint root; trailing slashes are trimmed
    ///
    /// # Errors
    ///
    /// Returns the reqwest error if the TLS backend cannot be initialised.
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("dexcard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Builds a source around an already configured client.
    ///
    /// # Examples
    ///
    /// ```
    /// use dexcard::infrastructure::HttpCreatureSource;
    ///
    /// let client = reqwest::blocking::Client::new();
    /// let source = HttpCreatureSource::with_client(client, "https://example.test/api/");
    /// assert_eq!(source.base_url(), "https://example.test/api");
    /// ```
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Endpoint root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a query: `<base_url>/<query>`.
    pub fn endpoint(&self, query: &Query) -> String {
        format!("{}/{}", self.base_url, query)
    }
}

impl CreatureSource for HttpCreatureSource {
    fn fetch(&self, query: &Query) -> LookupResult<CreatureRecord> {
        let url = self.endpoint(query);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| LookupError::FetchFailed(e.to_string()))?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "response received");
        if let Some(err) = classify_status(status.as_u16()) {
            return Err(err);
        }

        let body = response
            .text()
            .map_err(|e| LookupError::FetchFailed(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| LookupError::ParseFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serves a single canned response and hands back the request line.
    fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 8192];
            let n = stream.read(&mut buf).unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request.lines().next().unwrap_or_default().to_string()
        });

        (format!("http://{}/api/v2/pokemon/", addr), handle)
    }

    fn create_test_source(base_url: &str) -> HttpCreatureSource {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpCreatureSource::with_client(client, base_url)
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(200), None);
        assert_eq!(classify_status(204), None);
        assert_eq!(classify_status(404), Some(LookupError::NotFound));
        assert!(matches!(classify_status(500), Some(LookupError::FetchFailed(_))));
        assert!(matches!(classify_status(301), Some(LookupError::FetchFailed(_))));
        assert!(matches!(classify_status(429), Some(LookupError::FetchFailed(_))));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let source = create_test_source("https://example.test/api/v2/pokemon///");
        assert_eq!(source.base_url(), "https://example.test/api/v2/pokemon");
        assert_eq!(
            source.endpoint(&Query::normalize("Pikachu")),
            "https://example.test/api/v2/pokemon/pikachu"
        );
    }

    #[test]
    fn test_fetch_success() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"id":25,"name":"pikachu","height":4,"weight":60,"base_experience":112,
                "sprites":{"front_default":null,
                    "other":{"official-artwork":{"front_default":"https://img/25.png"}}},
                "types":[{"slot":1,"type":{"name":"electric","url":""}}],
                "abilities":[],
                "stats":[{"base_stat":90,"effort":2,"stat":{"name":"speed","url":""}}],
                "moves":[]}"#,
        );
        let source = create_test_source(&base_url);

        let record = source.fetch(&Query::normalize("pikachu")).unwrap();
        assert_eq!(record.id, 25);
        assert_eq!(record.image_url(), Some("https://img/25.png"));
        assert_eq!(record.stats[0].base_stat, 90);

        let request_line = server.join().unwrap();
        assert_eq!(request_line, "GET /api/v2/pokemon/pikachu HTTP/1.1");
    }

    #[test]
    fn test_fetch_not_found() {
        let (base_url, server) = serve_once("HTTP/1.1 404 Not Found", "Not Found");
        let source = create_test_source(&base_url);

        let err = source.fetch(&Query::normalize("notapokemon")).unwrap_err();
        assert_eq!(err, LookupError::NotFound);
        server.join().unwrap();
    }

    #[test]
    fn test_fetch_server_error() {
        let (base_url, server) = serve_once("HTTP/1.1 500 Internal Server Error", "");
        let source = create_test_source(&base_url);

        let err = source.fetch(&Query::normalize("25")).unwrap_err();
        assert_eq!(err, LookupError::FetchFailed("HTTP 500".to_string()));
        server.join().unwrap();
    }

    #[test]
    fn test_fetch_malformed_body() {
        let (base_url, server) = serve_once("HTTP/1.1 200 OK", "<html>maintenance</html>");
        let source = create_test_source(&base_url);

        let err = source.fetch(&Query::normalize("25")).unwrap_err();
        assert!(matches!(err, LookupError::ParseFailed(_)));
        server.join().unwrap();
    }

    #[test]
    fn test_fetch_connection_refused() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let source = create_test_source(&format!("http://{}", addr));

        let err = source.fetch(&Query::normalize("25")).unwrap_err();
        assert!(matches!(err, LookupError::FetchFailed(_)));
    }
}
