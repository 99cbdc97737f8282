//! HTTP transport backed by reqwest.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use super::request::{ApiRequest, FormPart, RawResponse, RequestBody};

/// Sends one request and hands back whatever the server answered.
///
/// Only transport problems are errors; a 4xx or 5xx status is a normal
/// response. Dropping the returned future aborts the request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse>;
}

#[derive(Clone, Default)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        debug!("{} {}...", request.method, request.url);

        let mut builder = self.client.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            None => builder,
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            Some(RequestBody::Multipart(parts)) => builder.multipart(build_form(parts)?),
        };

        let response = builder.send().await.context("Failed to send request")?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .context("Failed to read response body")?;

        debug!("{} {} -> {} ({} bytes)", request.method, request.url, status, body.len());

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

/// Rebuilds the multipart form; reqwest forms are consumed by each send.
fn build_form(parts: &[FormPart]) -> Result<Form> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let file = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(content_type)
                    .with_context(|| format!("Invalid content type {:?}", content_type))?;
                form.part(name.clone(), file)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use reqwest::{Method, StatusCode};

    #[tokio::test]
    async fn test_send_get_with_headers() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/123/quota")
            .match_header("x-authorization", "secret")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let request = ApiRequest::new(Method::GET, format!("{}/123/quota", url))
            .header("x-authorization", "secret")
            .header("Content-Type", "application/json");

        let response = client.send(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, br#"{"success": true}"#);
    }

    #[tokio::test]
    async fn test_send_passes_error_status_through() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/123/quota")
            .with_status(401)
            .with_body(r#"{"success": false, "code": 1002}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let request = ApiRequest::new(Method::GET, format!("{}/123/quota", url));

        let response = client.send(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, br#"{"success": false, "code": 1002}"#);
    }

    #[tokio::test]
    async fn test_send_multipart() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/123")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="data""#.to_string()),
                Matcher::Regex("0041000600000101".to_string()),
                Matcher::Regex(r#"name="files"; filename="slip.png""#.to_string()),
                Matcher::Regex("image/png".to_string()),
            ]))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let request = ApiRequest::new(Method::POST, format!("{}/123", url)).body(
            RequestBody::Multipart(vec![
                FormPart::Text {
                    name: "data".to_string(),
                    value: "0041000600000101".to_string(),
                },
                FormPart::File {
                    name: "files".to_string(),
                    file_name: "slip.png".to_string(),
                    content_type: "image/png".to_string(),
                    bytes: b"png-bytes".to_vec(),
                },
            ]),
        );

        let response = client.send(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_send_text_body() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/echo")
            .match_body("hello")
            .with_status(204)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let request = ApiRequest::new(Method::POST, format!("{}/echo", url))
            .body(RequestBody::Text("hello".to_string()));

        let response = client.send(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn test_send_connection_refused() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::new(Client::new());
        let request = ApiRequest::new(Method::GET, format!("http://{}/quota", addr));

        let result = client.send(&request).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_build_form_rejects_bad_content_type() {
        let parts = vec![FormPart::File {
            name: "files".to_string(),
            file_name: "slip".to_string(),
            content_type: "not a mime".to_string(),
            bytes: Vec::new(),
        }];
        assert!(build_form(&parts).is_err());
    }
}
