//! HTTP client for the account backend.
//!
//! The dialog never calls the backend directly: the effect executor goes
//! through the [`UserApi`] trait, which [`HttpUserApi`] implements with
//! `reqwest`.

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{AreaKind, AreaReference, SubmissionPayload};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::future::Future;

/// User agent string for backend requests.
const USER_AGENT_VALUE: &str = concat!("account-console/", env!("CARGO_PKG_VERSION"));

/// Path of the user creation endpoint, relative to the base URL.
pub const CREATE_USER_PATH: &str = "user/add";

/// Backend operations needed by the Add User dialog.
pub trait UserApi: Send + Sync + 'static {
    /// Fetches the `{id, name}` list of one lookup collection.
    fn lookup(&self, kind: AreaKind) -> impl Future<Output = Result<Vec<AreaReference>>> + Send;

    /// Creates a new user. Only success or failure is reported.
    fn create_user(&self, payload: &SubmissionPayload) -> impl Future<Output = Result<()>> + Send;
}

/// Path of a lookup collection, relative to the base URL.
pub fn lookup_path(kind: AreaKind) -> String {
    format!("{}/getIdAndName", kind.collection())
}

/// `reqwest` backed implementation of [`UserApi`].
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserApi {
    /// Builds a client for the backend named in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Joins `path` onto the configured base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn check_status(response: &reqwest::Response, url: &str) -> Result<()> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }
}

impl UserApi for HttpUserApi {
    async fn lookup(&self, kind: AreaKind) -> Result<Vec<AreaReference>> {
        let url = self.endpoint(&lookup_path(kind));
        tracing::debug!(%url, "fetching lookup collection");

        let response = self.client.get(&url).send().await?;
        Self::check_status(&response, &url)?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
            url,
            message: e.to_string(),
        })
    }

    async fn create_user(&self, payload: &SubmissionPayload) -> Result<()> {
        let url = self.endpoint(CREATE_USER_PATH);
        tracing::debug!(%url, usertype = %payload.usertype, "posting new user");

        let response = self.client.post(&url).json(payload).send().await?;
        Self::check_status(&response, &url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    fn api(base: &str) -> HttpUserApi {
        let config = Config {
            base_url: base.to_string(),
            timeout: Duration::from_secs(1),
        };
        HttpUserApi::new(&config).unwrap()
    }

    #[test]
    fn lookup_paths_follow_collection_names() {
        let paths: Vec<_> = AreaKind::ALL.into_iter().map(lookup_path).collect();
        assert_eq!(
            paths,
            vec![
                "tehsil/getIdAndName",
                "division/getIdAndName",
                "district/getIdAndName",
                "province/getIdAndName",
                "hospital/getIdAndName",
            ]
        );
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let api = api("http://localhost:8080/api");
        assert_eq!(
            api.endpoint(CREATE_USER_PATH),
            "http://localhost:8080/api/user/add"
        );
        assert_eq!(
            api.endpoint("/tehsil/getIdAndName"),
            "http://localhost:8080/api/tehsil/getIdAndName"
        );
    }

    /// Answers a single request with `status` and `body`, then hands back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        });
        (base, server)
    }

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            first_name: "Zara".into(),
            last_name: "Malik".into(),
            cnic: "35202-1".into(),
            email: "zara@health.pk".into(),
            contact: "0300".into(),
            password: "hunter2".into(),
            usertype: UserType::SuperAdministrator,
            tehsil: None,
            division: None,
            district: None,
            province: None,
            hospital: None,
        }
    }

    #[tokio::test]
    async fn lookup_decodes_id_and_name_list() {
        let (base, server) = serve_once("200 OK", r#"[{"id":7,"name":"Chakwal"}]"#).await;

        let areas = api(&base).lookup(AreaKind::District).await.unwrap();
        assert_eq!(areas, vec![AreaReference::new(7, "Chakwal")]);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /district/getIdAndName "), "{request}");
    }

    #[tokio::test]
    async fn lookup_reports_error_status() {
        let (base, _server) = serve_once("500 Internal Server Error", "").await;

        match api(&base).lookup(AreaKind::Tehsil).await {
            Err(ApiError::Status { status, url }) => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/tehsil/getIdAndName"), "{url}");
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lookup_rejects_body_that_is_not_json() {
        let (base, _server) = serve_once("200 OK", "nope!").await;

        let result = api(&base).lookup(AreaKind::Hospital).await;
        assert!(
            matches!(result, Err(ApiError::Decode { ref url, .. }) if url.ends_with("/hospital/getIdAndName")),
            "{result:?}"
        );
    }

    #[tokio::test]
    async fn create_user_posts_camel_case_json() {
        let (base, server) = serve_once("201 Created", "").await;

        api(&base).create_user(&payload()).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /user/add "), "{request}");
        assert!(request.contains(r#""firstName":"Zara""#), "{request}");
        assert!(request.contains(r#""usertype":"Super Administrator""#), "{request}");
    }

    #[tokio::test]
    async fn create_user_fails_on_rejection() {
        for (status, code) in [("400 Bad Request", 400), ("500 Internal Server Error", 500)] {
            let (base, _server) = serve_once(status, r#"{"message":"duplicate cnic"}"#).await;

            let result = api(&base).create_user(&payload()).await;
            assert!(
                matches!(result, Err(ApiError::Status { status, .. }) if status == code),
                "{result:?}"
            );
        }
    }
}
