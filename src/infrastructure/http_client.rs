use crate::application::services::{HttpClient, HttpRequestService};
use crate::domain::entities::{Method as DomainMethod, Request, Response};
use crate::domain::errors::AppError;

use anyhow::Result;
use async_trait::async_trait;
use http_body_util::{BodyExt, Empty};
use hyper::body::{Bytes, Incoming};
use hyper::client::conn::http1;
use hyper::header::{HeaderValue, HOST};
use hyper::{Method, Request as HyperRequest, Uri};
use hyper_util::rt::TokioIo;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_native_tls::native_tls;
use tracing::{debug, warn};

/// Infrastructure implementation of HttpClient using Hyper
///
/// Opens one HTTP/1.1 connection per request, TLS-wrapped for `https`.
/// No pooling, retries, redirects or timeouts beyond the OS defaults.
pub struct HyperHttpClient;

impl HyperHttpClient {
    pub fn new() -> Self {
        Self
    }

    /// Creates a configured HTTP request service using this client
    pub fn create_request_service(self) -> HttpRequestService {
        HttpRequestService::new(Box::new(self))
    }
}

impl Default for HyperHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for HyperHttpClient {
    async fn send(&self, request: Request) -> Result<Response> {
        let target = Target::from_uri(&request.url.0)?;
        let hyper_request = RequestAdapter::to_hyper_request(request, &target)?;
        let hyper_response = self.execute_http_request(&target, hyper_request).await?;
        ResponseAdapter::to_domain_response(hyper_response).await
    }
}

impl HyperHttpClient {
    async fn execute_http_request(
        &self,
        target: &Target,
        request: HyperRequest<Empty<Bytes>>,
    ) -> Result<hyper::Response<Incoming>, AppError> {
        debug!(host = %target.host, port = target.port, tls = target.tls, "connecting");
        let stream = TcpStream::connect((target.host.as_str(), target.port))
            .await
            .map_err(|e| network_error("failed to connect", e))?;

        if target.tls {
            let connector = native_tls::TlsConnector::new()
                .map(tokio_native_tls::TlsConnector::from)
                .map_err(|e| network_error("failed to initialise TLS", e))?;
            let stream = connector
                .connect(&target.host, stream)
                .await
                .map_err(|e| network_error("TLS handshake failed", e))?;
            Self::send_over(stream, request).await
        } else {
            Self::send_over(stream, request).await
        }
    }

    async fn send_over<S>(
        stream: S,
        request: HyperRequest<Empty<Bytes>>,
    ) -> Result<hyper::Response<Incoming>, AppError>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (mut sender, connection) = http1::handshake(TokioIo::new(stream))
            .await
            .map_err(|e| network_error("HTTP handshake failed", e))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!(error = %e, "connection closed with error");
            }
        });

        sender
            .send_request(request)
            .await
            .map_err(|e| network_error("HTTP request execution failed", e))
    }
}

fn network_error(context: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Network(format!("{}: {}", context, err))
}

/// Where to connect, derived from the request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    host: String,
    port: u16,
    tls: bool,
    host_header: String,
}

impl Target {
    fn from_uri(uri: &Uri) -> Result<Self, AppError> {
        let tls = match uri.scheme_str() {
            Some("https") => true,
            Some("http") => false,
            other => {
                return Err(AppError::RequestBuild(format!(
                    "unsupported URL scheme: {:?}",
                    other
                )));
            }
        };
        let authority = uri
            .authority()
            .ok_or_else(|| AppError::RequestBuild(format!("URL has no host: '{}'", uri)))?;
        let host = authority.host().trim_start_matches('[').trim_end_matches(']');
        let port = authority.port_u16().unwrap_or(if tls { 443 } else { 80 });

        Ok(Self {
            host: host.to_string(),
            port,
            tls,
            host_header: authority.as_str().to_string(),
        })
    }
}

/// Adapter for converting domain requests to Hyper requests
struct RequestAdapter;

impl RequestAdapter {
    fn to_hyper_request(
        domain_request: Request,
        target: &Target,
    ) -> Result<HyperRequest<Empty<Bytes>>, AppError> {
        let method = MethodAdapter::to_hyper_method(domain_request.method);
        let uri = UriAdapter::to_origin_form(&domain_request.url.0);

        let mut builder = HyperRequest::builder().method(method).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(domain_request.headers);
            if !headers.contains_key(HOST) {
                let host = HeaderValue::from_str(&target.host_header)
                    .map_err(|e| AppError::RequestBuild(format!("invalid host: {}", e)))?;
                headers.insert(HOST, host);
            }
        }

        builder
            .body(Empty::new())
            .map_err(|e| AppError::RequestBuild(format!("failed to build HTTP request: {}", e)))
    }
}

/// Adapter for converting domain responses from Hyper responses
struct ResponseAdapter;

impl ResponseAdapter {
    async fn to_domain_response(hyper_response: hyper::Response<Incoming>) -> Result<Response> {
        let status = hyper_response.status();
        debug!(%status, "received response");
        let body = Self::extract_response_body(hyper_response).await?;

        Ok(Response { status, body })
    }

    async fn extract_response_body(response: hyper::Response<Incoming>) -> Result<Bytes, AppError> {
        Ok(response
            .into_body()
            .collect()
            .await
            .map_err(|e| network_error("failed to read response body", e))?
            .to_bytes())
    }
}

/// Adapter for converting domain HTTP methods to Hyper methods
struct MethodAdapter;

impl MethodAdapter {
    fn to_hyper_method(domain_method: DomainMethod) -> Method {
        match domain_method {
            DomainMethod::Get => Method::GET,
            DomainMethod::Delete => Method::DELETE,
        }
    }
}

/// Adapter for converting absolute URLs to the request target sent on the wire
struct UriAdapter;

impl UriAdapter {
    fn to_origin_form(domain_url: &Uri) -> Uri {
        domain_url
            .path_and_query()
            .map(|pq| Uri::from(pq.clone()))
            .unwrap_or_else(|| Uri::from_static("/"))
    }
}
