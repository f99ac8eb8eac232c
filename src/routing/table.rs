//! Static route table.
//!
//! Each external path is bound to the upstream path with the leading slash
//! removed. The table is compiled in; nothing is resolved at request time.

/// One relayed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteBinding {
    /// Path exposed by the relay, e.g. `/twin/list`.
    pub external: &'static str,

    /// Path appended to the upstream base URL, e.g. `twin/list`.
    pub upstream: &'static str,
}

impl RouteBinding {
    const fn new(external: &'static str, upstream: &'static str) -> Self {
        Self { external, upstream }
    }

    /// Product family, the first path segment (`creator`, `edit`, `twin`).
    pub fn family(&self) -> &'static str {
        self.upstream.split('/').next().unwrap_or(self.upstream)
    }
}

/// Every route the relay exposes.
pub const ROUTES: &[RouteBinding] = &[
    // AI Creator
    RouteBinding::new("/creator/list", "creator/list"),
    RouteBinding::new("/creator/submit", "creator/submit"),
    RouteBinding::new("/creator/poll", "creator/poll"),
    // AI Edit
    RouteBinding::new("/edit/styles", "edit/styles"),
    RouteBinding::new("/edit/submit", "edit/submit"),
    RouteBinding::new("/edit/poll", "edit/poll"),
    // AI Twin
    RouteBinding::new("/twin/supported-languages", "twin/supported-languages"),
    RouteBinding::new("/twin/list", "twin/list"),
    RouteBinding::new("/twin/create", "twin/create"),
    RouteBinding::new("/twin/script", "twin/script"),
    RouteBinding::new("/twin/status", "twin/status"),
    RouteBinding::new("/twin/delete", "twin/delete"),
];

/// Look up a binding by external path. A missing leading slash is tolerated.
pub fn find_route(path: &str) -> Option<&'static RouteBinding> {
    let path = path.trim_start_matches('/');
    ROUTES.iter().find(|route| route.upstream == path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_has_twelve_unique_routes() {
        let paths: HashSet<_> = ROUTES.iter().map(|r| r.external).collect();
        assert_eq!(ROUTES.len(), 12);
        assert_eq!(paths.len(), 12);
    }

    #[test]
    fn test_upstream_is_external_without_slash() {
        for route in ROUTES {
            assert!(route.external.starts_with('/'));
            assert_eq!(format!("/{}", route.upstream), route.external);
        }
    }

    #[test]
    fn test_find_route() {
        let route = find_route("/twin/supported-languages").unwrap();
        assert_eq!(route.upstream, "twin/supported-languages");
        assert_eq!(route.family(), "twin");

        assert_eq!(find_route("edit/poll").map(|r| r.external), Some("/edit/poll"));
        assert!(find_route("/twin").is_none());
        assert!(find_route("/twin/list/extra").is_none());
    }

    #[test]
    fn test_families() {
        let families: HashSet<_> = ROUTES.iter().map(|r| r.family()).collect();
        assert_eq!(families, HashSet::from(["creator", "edit", "twin"]));
    }
}
