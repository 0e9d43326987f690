//! Metric name derivation.
//!
//! A route template such as `/pixel/:app/:batchId/:userId.png` is turned into
//! two names: a coarse one keyed by the first path segment (the resource) and
//! a detailed one that also carries the remaining segments joined with `_`.
//! Parameter markers are rewritten from `:name` to `~name`, so only the
//! parameter *name* ever reaches the collector, never a runtime value.

/// Prefix placed in front of every derived name unless configured otherwise.
pub const DEFAULT_PREFIX: &str = "express.http";
/// Substituted when the route carries no HTTP method.
pub const UNKNOWN_METHOD: &str = "unknown_method";
/// Substituted when the response has no status code.
pub const UNKNOWN_STATUS: &str = "unknown_status";

/// Matched route as reported by the host router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Path template, e.g. `/resources/:model`.
    pub path: String,
    /// HTTP method, any case.
    pub method: Option<String>,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Some(method.into()),
        }
    }
}

/// The pair of names emitted for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatNames {
    /// `<prefix>.<method>.<resource>`
    pub base: String,
    /// `<base>.<resourcePath>`; ends with `.` when the route has one segment.
    pub detail: String,
}

impl StatNames {
    /// Base first, then detail.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.base.as_str(), self.detail.as_str()].into_iter()
    }
}

/// Derive the base and detail names for a route.
///
/// Pure and deterministic. The template is expected to start with `/`; the
/// segment after it is the resource. A template with no resource segment
/// yields an empty resource rather than failing.
pub fn derive_stat_names(prefix: &str, route: &RouteDescriptor) -> StatNames {
    let method = route
        .method
        .as_deref()
        .unwrap_or(UNKNOWN_METHOD)
        .to_lowercase();

    let path = route.path.replace(':', "~");
    let parts: Vec<&str> = path.split('/').collect();
    let resource = parts.get(1).copied().unwrap_or_default();
    let resource_path = parts.get(2..).map(|rest| rest.join("_")).unwrap_or_default();

    let base = format!("{prefix}.{method}.{resource}");
    let detail = format!("{base}.{resource_path}");
    StatNames { base, detail }
}

/// `<name>.status_code.<code>`
pub fn status_stat(name: &str, status: Option<u16>) -> String {
    match status {
        Some(code) => format!("{name}.status_code.{code}"),
        None => format!("{name}.status_code.{UNKNOWN_STATUS}"),
    }
}

/// `<name>.response_time`
pub fn timing_stat(name: &str) -> String {
    format!("{name}.response_time")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(path: &str, method: &str) -> StatNames {
        derive_stat_names(DEFAULT_PREFIX, &RouteDescriptor::new(path, method))
    }

    #[test]
    fn parameters_collapse_to_their_names() {
        let n = names("/pixel/:app/:batchId/:userId.png", "GET");
        assert_eq!(n.base, "express.http.get.pixel");
        assert_eq!(n.detail, "express.http.get.pixel.~app_~batchId_~userId.png");
    }

    #[test]
    fn single_segment_keeps_trailing_separator() {
        let n = names("/resources", "POST");
        assert_eq!(n.base, "express.http.post.resources");
        assert_eq!(n.detail, "express.http.post.resources.");
    }

    #[test]
    fn missing_method_is_substituted() {
        let route = RouteDescriptor {
            path: "/resources/:model".into(),
            method: None,
        };
        let n = derive_stat_names(DEFAULT_PREFIX, &route);
        assert_eq!(n.base, "express.http.unknown_method.resources");
        assert_eq!(n.detail, "express.http.unknown_method.resources.~model");
    }

    #[test]
    fn template_without_leading_slash_degrades() {
        let n = names("*", "get");
        assert_eq!(n.base, "express.http.get.");
        assert_eq!(n.detail, "express.http.get..");
    }

    #[test]
    fn custom_prefix() {
        let n = derive_stat_names("api", &RouteDescriptor::new("/users/:id", "DELETE"));
        assert_eq!(n.base, "api.delete.users");
        assert_eq!(n.detail, "api.delete.users.~id");
    }

    #[test]
    fn suffixes() {
        assert_eq!(status_stat("a.b", Some(204)), "a.b.status_code.204");
        assert_eq!(status_stat("a.b", None), "a.b.status_code.unknown_status");
        assert_eq!(timing_stat("a.b"), "a.b.response_time");
    }

    #[test]
    fn iter_order_is_base_then_detail() {
        let n = names("/resources/:model", "GET");
        let all: Vec<&str> = n.iter().collect();
        assert_eq!(all, vec!["express.http.get.resources", "express.http.get.resources.~model"]);
    }
}
