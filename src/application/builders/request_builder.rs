use crate::domain::entities::{Method, Request};
use crate::domain::errors::AppError;
use crate::domain::value_objects::{compose, PathComponents, QueryString, Url};
use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::debug;

/// Characters escaped inside a path segment. `/` and `%` pass through so
/// callers can give nested or pre-encoded segments.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Assembles a [`Request`] from a resolved alias and the parsed action.
///
/// Headers start with `Content-Type: application/json`; every later
/// `headers` call overwrites entries with the same name.
pub struct RequestBuilder {
    method: Option<Method>,
    url: Option<Url>,
    headers: HeaderMap,
}

impl RequestBuilder {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            method: None,
            url: None,
            headers,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URL to `<base_url>/<path>[?<query>]`.
    ///
    /// Path segments are percent-encoded; query values are written as given.
    pub fn url(
        mut self,
        base_url: &str,
        path: &PathComponents,
        query: Option<&QueryString>,
    ) -> Result<Self, AppError> {
        let base = base_url.strip_suffix('/').unwrap_or(base_url);
        let encoded = PathComponents(
            path.0
                .iter()
                .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
                .collect(),
        );
        let raw = format!("{}/{}", base, compose(&encoded, query));
        debug!(url = %raw, "composed request url");
        self.url = Some(Url::new(&raw)?);
        Ok(self)
    }

    pub fn headers<'a, I>(mut self, headers: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                AppError::RequestBuild(format!("invalid header name '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                AppError::RequestBuild(format!("invalid value for header '{}': {}", name, e))
            })?;
            self.headers.insert(name, value);
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Request, AppError> {
        let method = self
            .method
            .ok_or_else(|| AppError::RequestBuild("method is required".to_string()))?;
        let url = self
            .url
            .ok_or_else(|| AppError::RequestBuild("URL is required".to_string()))?;

        Ok(Request {
            method,
            url,
            headers: self.headers,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `Key: Value` strings given on the command line.
pub fn parse_raw_headers(raw_headers: &[String]) -> Result<Vec<(String, String)>, AppError> {
    raw_headers
        .iter()
        .map(|raw| {
            raw.split_once(':')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| AppError::InvalidHeader(raw.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn path(parts: &[&str]) -> PathComponents {
        PathComponents(parts.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn header_merge_is_right_biased() {
        let config = map(&[("A", "1"), ("B", "2")]);
        let request = map(&[("B", "3"), ("C", "4")]);

        let req = RequestBuilder::new()
            .method(Method::Get)
            .url("https://api.example.com", &path(&[]), None)
            .unwrap()
            .headers(&config)
            .unwrap()
            .headers(&request)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(req.headers.len(), 4);
        assert_eq!(req.headers["content-type"], "application/json");
        assert_eq!(req.headers["a"], "1");
        assert_eq!(req.headers["b"], "3");
        assert_eq!(req.headers["c"], "4");
    }

    #[test]
    fn config_can_override_content_type() {
        let config = map(&[("Content-Type", "text/plain")]);
        let req = RequestBuilder::new()
            .method(Method::Get)
            .url("https://api.example.com", &path(&["x"]), None)
            .unwrap()
            .headers(&config)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(req.headers.get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(req.headers[CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn builds_url_with_path_and_query() {
        let query = QueryString(map(&[("include", "posts,comments")]));
        let req = RequestBuilder::new()
            .method(Method::Get)
            .url(
                "https://httpbin.dev/anything",
                &path(&["users", "456", "profile"]),
                Some(&query),
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            req.url.as_str(),
            "https://httpbin.dev/anything/users/456/profile?include=posts,comments"
        );
    }

    #[test]
    fn empty_path_leaves_single_trailing_slash() {
        let req = RequestBuilder::new()
            .method(Method::Delete)
            .url("https://httpbin.dev/anything", &path(&[]), None)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(req.url.as_str(), "https://httpbin.dev/anything/");

        let req = RequestBuilder::new()
            .method(Method::Delete)
            .url("https://httpbin.dev/anything/", &path(&[]), None)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(req.url.as_str(), "https://httpbin.dev/anything/");
    }

    fn url_of(path_parts: &[&str], query: Option<&QueryString>) -> String {
        RequestBuilder::new()
            .method(Method::Get)
            .url("https://httpbin.dev/anything", &path(path_parts), query)
            .unwrap()
            .build()
            .unwrap()
            .url
            .as_str()
    }

    #[test]
    fn percent_encodes_path_segments() {
        assert_eq!(
            url_of(&["hello world"], None),
            "https://httpbin.dev/anything/hello%20world"
        );
        assert_eq!(
            url_of(&["caf\u{e9}", "<id>", "a?b"], None),
            "https://httpbin.dev/anything/caf%C3%A9/%3Cid%3E/a%3Fb"
        );
    }

    #[test]
    fn keeps_slashes_and_empty_segments_in_path() {
        assert_eq!(
            url_of(&["api", "", "v1/users"], None),
            "https://httpbin.dev/anything/api//v1/users"
        );
    }

    #[test]
    fn fragment_marker_in_query_value_ends_the_url() {
        let query = QueryString(map(&[("q", "a#b")]));
        assert_eq!(
            url_of(&["search"], Some(&query)),
            "https://httpbin.dev/anything/search?q=a"
        );
    }

    #[test]
    fn invalid_header_name_is_a_build_error() {
        let result = RequestBuilder::new().headers(&map(&[("bad header", "x")]));
        assert!(matches!(result, Err(AppError::RequestBuild(_))));
    }

    #[test]
    fn build_without_url_fails() {
        let result = RequestBuilder::new().method(Method::Get).build();
        assert!(matches!(result, Err(AppError::RequestBuild(_))));
    }

    #[test]
    fn parses_raw_headers() {
        let parsed = parse_raw_headers(&["X-Trace: abc".to_string(), "Accept:text/html".to_string()])
            .unwrap();
        assert_eq!(
            parsed,
            vec![
                ("X-Trace".to_string(), "abc".to_string()),
                ("Accept".to_string(), "text/html".to_string())
            ]
        );
    }

    #[test]
    fn rejects_raw_header_without_colon() {
        let err = parse_raw_headers(&["X-Trace abc".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::InvalidHeader(h) if h == "X-Trace abc"));
    }
}
