//! Deployment base path for the catalog URL and the router.
//!
//! `PUBLIC_URL` is read at compile time. A page served from a subdirectory
//! (`/sleepdex` on GitHub Pages, say) builds with it set; a local `trunk serve`
//! leaves it unset and everything hangs off `/`.

/// Path prefix the page is served under, without a trailing slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DeployBase<'a>(&'a str);

impl<'a> DeployBase<'a> {
    fn compiled() -> DeployBase<'static> {
        DeployBase::new(option_env!("PUBLIC_URL").unwrap_or(""))
    }

    fn new(raw: &'a str) -> Self {
        Self(raw.trim().trim_end_matches('/'))
    }

    fn url_for(self, file: &str) -> String {
        format!("{}/{}", self.0, file.trim_start_matches('/'))
    }

    fn prefix(self) -> Option<&'a str> {
        (!self.0.is_empty()).then_some(self.0)
    }
}

/// `basename` for the browser router; `None` when served from the root.
#[must_use]
pub fn router_base() -> Option<String> {
    DeployBase::compiled().prefix().map(str::to_owned)
}

/// Where the static catalog document is fetched from.
#[must_use]
pub fn catalog_url() -> String {
    DeployBase::compiled().url_for(sleepdex_core::constants::DEFAULT_CATALOG_PATH)
}
