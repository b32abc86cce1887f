use crate::application::action::Action;
use crate::application::builders::request_builder::RequestBuilder;
use crate::domain::entities::{AliasEntry, Request, Response};
use crate::domain::errors::AppError;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

/// Trait for HTTP clients to enable mocking and dependency inversion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

/// Lookup of alias entries by exact name.
#[cfg_attr(test, mockall::automock)]
pub trait AliasSource {
    fn resolve(&self, alias: &str) -> Result<AliasEntry, AppError>;
}

/// Application service for orchestrating HTTP request workflows
pub struct HttpRequestService {
    http_client: Box<dyn HttpClient>,
}

impl HttpRequestService {
    pub fn new(http_client: Box<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Resolves the action's alias, builds the request and sends it.
    ///
    /// `extra_headers` are applied after the alias's default headers.
    pub async fn execute_action(
        &self,
        action: &Action,
        aliases: &dyn AliasSource,
        extra_headers: &[(String, String)],
    ) -> Result<Response> {
        let entry = aliases.resolve(&action.alias)?;
        debug!(alias = %entry.alias, base_url = %entry.base_url, "resolved alias");

        let request = RequestBuilder::new()
            .method(action.method)
            .url(
                &entry.base_url,
                &action.path_components,
                Some(&action.options),
            )?
            .headers(&entry.default_headers)?
            .headers(extra_headers.iter().map(|(k, v)| (k, v)))?
            .build()?;

        self.send_request(request).await
    }

    /// Sends a simple HTTP request
    pub async fn send_request(&self, request: Request) -> Result<Response> {
        self.validate_request(&request)?;
        info!(method = %request.method, url = %request.url.as_str(), "sending request");
        self.http_client.send(request).await
    }

    fn validate_request(&self, request: &Request) -> Result<(), AppError> {
        RequestValidator::validate(request)
    }
}

/// Domain service for request validation
pub struct RequestValidator;

impl RequestValidator {
    pub fn validate(request: &Request) -> Result<(), AppError> {
        Self::validate_url(&request.url)
    }

    fn validate_url(url: &crate::domain::value_objects::Url) -> Result<(), AppError> {
        match url.0.scheme_str() {
            Some("http") | Some("https") => {}
            _ => {
                return Err(AppError::RequestBuild(format!(
                    "URL must start with http:// or https://, got '{}'",
                    url.as_str()
                )));
            }
        }
        if url.0.host().is_none_or(str::is_empty) {
            return Err(AppError::RequestBuild(format!(
                "URL has no host: '{}'",
                url.as_str()
            )));
        }
        Ok(())
    }
}
