//! Routes addressed by the session history (the "URL" of the app).

use std::fmt;

use crate::model::resource::ResourceKey;

pub const RESOURCE_PREFIX: &str = "/resource/";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Listing,
    Resource(ResourceKey),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Listing => "/".to_string(),
            Self::Resource(key) => format!("{RESOURCE_PREFIX}{key}"),
        }
    }

    /// Parse a path or a bare identity. Returns `None` for paths that do not
    /// name a route.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() || input == "/" {
            return Some(Self::Listing);
        }

        if let Some(rest) = input.strip_prefix(RESOURCE_PREFIX) {
            let key = rest.trim_end_matches('/');
            if key.is_empty() || key.contains('/') {
                return None;
            }
            return Some(Self::Resource(ResourceKey::from(key)));
        }

        if input.contains('/') {
            return None;
        }
        Some(Self::Resource(ResourceKey::from(input)))
    }

    pub fn resource_key(&self) -> Option<&ResourceKey> {
        match self {
            Self::Resource(key) => Some(key),
            Self::Listing => None,
        }
    }

    /// Absolute share link for this route.
    pub fn share_url(&self, site_origin: &str) -> String {
        format!("{}{}", site_origin.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_print_and_parse() {
        let route = Route::Resource(ResourceKey::from("media-widgets"));
        assert_eq!(route.path(), "/resource/media-widgets");
        assert_eq!(Route::parse(&route.path()), Some(route));
        assert_eq!(Route::parse("/"), Some(Route::Listing));
        assert_eq!(Route::parse(""), Some(Route::Listing));
    }

    #[test]
    fn bare_keys_are_resource_routes() {
        assert_eq!(
            Route::parse("abc123"),
            Some(Route::Resource(ResourceKey::from("abc123")))
        );
        assert_eq!(
            Route::parse("/resource/abc123/"),
            Some(Route::Resource(ResourceKey::from("abc123")))
        );
    }

    #[test]
    fn malformed_paths_are_rejected() {
        assert_eq!(Route::parse("/resource/"), None);
        assert_eq!(Route::parse("/resource/a/b"), None);
        assert_eq!(Route::parse("/about/x"), None);
    }

    #[test]
    fn share_url_joins_origin() {
        let route = Route::Resource(ResourceKey::from("x"));
        assert_eq!(
            route.share_url("https://remixed.design/"),
            "https://remixed.design/resource/x"
        );
    }
}
