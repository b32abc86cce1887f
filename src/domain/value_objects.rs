use crate::domain::errors::AppError;
use hyper::http::Uri;
use std::collections::HashMap;

/// Represents a validated URL
#[derive(Debug, Clone)]
pub struct Url(pub Uri);

impl Url {
    /// Creates a new Url with validation
    ///
    /// # Arguments
    /// * `url` - The URL string to parse
    ///
    /// # Returns
    /// * `Ok(Url)` - Validated URL
    /// * `Err(AppError::RequestBuild)` - If the URL is invalid
    pub fn new(url: &str) -> Result<Self, AppError> {
        let uri = url
            .parse::<Uri>()
            .map_err(|e| AppError::RequestBuild(format!("invalid URL '{}': {}", url, e)))?;
        Ok(Url(uri))
    }

    /// Returns the URL as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

/// Ordered URL path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathComponents(pub Vec<String>);

impl PathComponents {
    /// Joins the segments with `/`. Empty segments are kept, so
    /// `["api", "", "users"]` becomes `api//users`.
    pub fn to_path(&self) -> String {
        self.0.join("/")
    }
}

/// Flag/value pairs rendered as a query string.
///
/// Values are written as-is, without percent-encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString(pub HashMap<String, String>);

impl QueryString {
    /// Renders `key=value` pairs joined by `&`, in map iteration order.
    pub fn to_query(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Builds the relative part of a request URL: path, then `?query` when any flags are set.
pub fn compose(path: &PathComponents, query: Option<&QueryString>) -> String {
    let path = path.to_path();
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q.to_query()),
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn components(parts: &[&str]) -> PathComponents {
        PathComponents(parts.iter().map(|p| p.to_string()).collect())
    }

    fn query(pairs: &[(&str, &str)]) -> QueryString {
        QueryString(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn joins_path_components_with_slash() {
        assert_eq!(components(&["users", "456", "profile"]).to_path(), "users/456/profile");
    }

    #[test]
    fn keeps_empty_components_as_adjacent_slashes() {
        assert_eq!(components(&["api", "", "users"]).to_path(), "api//users");
    }

    #[test]
    fn empty_components_compose_to_empty_path() {
        assert_eq!(compose(&PathComponents::default(), None), "");
        assert_eq!(compose(&PathComponents::default(), Some(&QueryString::default())), "");
    }

    #[test]
    fn empty_or_absent_query_adds_no_question_mark() {
        let path = components(&["status"]);
        assert_eq!(compose(&path, None), "status");
        assert_eq!(compose(&path, Some(&QueryString::default())), "status");
    }

    #[test]
    fn appends_single_flag_after_question_mark() {
        let path = components(&["users", "456", "profile"]);
        let q = query(&[("include", "posts,comments")]);
        assert_eq!(compose(&path, Some(&q)), "users/456/profile?include=posts,comments");
    }

    #[test]
    fn query_splits_back_into_the_same_pairs() {
        let q = query(&[("page", "2"), ("limit", "50"), ("sort", "desc"), ("empty", "")]);
        let rendered = q.to_query();

        let recovered: HashSet<(String, String)> = rendered
            .split('&')
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap();
                (k.to_string(), v.to_string())
            })
            .collect();
        let expected: HashSet<(String, String)> = q.0.into_iter().collect();

        assert_eq!(recovered, expected);
    }

    #[test]
    fn values_are_not_percent_encoded() {
        let q = query(&[("filter", "a b&c")]);
        assert_eq!(q.to_query(), "filter=a b&c");
    }

    #[test]
    fn url_rejects_unparseable_input() {
        assert!(Url::new("https://httpbin.dev/anything/users").is_ok());
        assert!(matches!(
            Url::new("https://exa mple.com"),
            Err(AppError::RequestBuild(_))
        ));
    }
}
