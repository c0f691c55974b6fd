//! [`client::Transport`] over [`reqwest`].

use std::sync::Arc;

use async_trait::async_trait;
use client::{
    ApiRequest, ClientConfig, ClientError, Method, MultipartForm, PartValue, RequestBody,
    Transport, TransportError, TransportResponse,
};
use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::query::encode_query;

/// Sends API requests with a shared reqwest client.
///
/// Response cookies land in the jar given at construction; share it with a
/// [`crate::JarCookieStore`] so rotated CSRF tokens are picked up.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig, jar: Arc<Jar>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().cookie_provider(jar);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ClientError::Configuration {
            message: format!("failed to build HTTP client: {e}"),
        })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<TransportResponse, TransportError> {
        let url = self.config.url_for(&request.path);
        let mut builder = self.client.request(to_reqwest_method(request.method), &url);

        let query = encode_query(&request.query);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Multipart(form) => builder.multipart(to_reqwest_form(form)?),
        };

        debug!(%url, "Sending request");
        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(classify_body)?;

        let body = if bytes.is_empty() {
            None
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(body) => Some(body),
                Err(e) => {
                    debug!(status, error = %e, "Response body is not JSON");
                    None
                }
            }
        };
        Ok(TransportResponse::new(status, body))
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_reqwest_form(form: &MultipartForm) -> Result<Form, TransportError> {
    let mut out = Form::new();
    for part in form.parts() {
        let name = part.name.clone();
        out = match &part.value {
            PartValue::Text(text) => out.text(name, text.clone()),
            PartValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let mut file = Part::bytes(bytes.clone()).file_name(file_name.clone());
                if let Some(content_type) = content_type {
                    file = file.mime_str(content_type).map_err(bad_part(&name))?;
                }
                out.part(name, file)
            }
        };
    }
    Ok(out)
}

fn bad_part(name: &str) -> impl FnOnce(reqwest::Error) -> TransportError + '_ {
    move |error| TransportError::InvalidRequest {
        message: format!("content type of '{name}': {error}"),
    }
}

/// Maps a send failure onto the transport error taxonomy.
fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_builder() {
        TransportError::InvalidRequest {
            message: error.to_string(),
        }
    } else if error.is_body() || error.is_decode() {
        TransportError::Body {
            message: error.to_string(),
        }
    } else {
        TransportError::Connect {
            message: error.to_string(),
        }
    }
}

fn classify_body(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Body {
            message: error.to_string(),
        }
    }
}
