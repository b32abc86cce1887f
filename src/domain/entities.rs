use crate::domain::errors::AppError;
use crate::domain::value_objects::Url;
use http::{HeaderMap, StatusCode};
use hyper::body::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Methods the tool accepts. Only read/inspect-style calls are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Delete,
}

impl Method {
    pub const ACCEPTED: [Method; 2] = [Method::Get, Method::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Delete => "DELETE",
        }
    }

    /// Comma separated list of accepted method names, lowercase as typed on the command line.
    pub fn accepted_list() -> String {
        Self::ACCEPTED
            .iter()
            .map(|m| m.as_str().to_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Method {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "DELETE" => Ok(Method::Delete),
            _ => Err(AppError::UnsupportedMethod {
                method: s.to_string(),
                accepted: Self::accepted_list(),
            }),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured endpoint: base URL plus headers sent with every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub alias: String,
    pub base_url: String,
    pub default_headers: HashMap<String, String>,
}

/// A fully resolved outbound request, ready for the transport.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

/// Represents an HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub body: Bytes,
}
