#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Entry,
    Feed,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/feed" => Route::Feed,
            _ => Route::Entry,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Feed => "/feed",
        }
    }

    /// The feed needs an active user; without one the visitor goes to the entry view.
    pub fn resolve(self, active_user: Option<&str>) -> Route {
        match (self, active_user) {
            (Route::Feed, None) => Route::Entry,
            (route, _) => route,
        }
    }
}

/// Current route from the address bar.
pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Entry)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryMode {
    /// New entry; Back returns to the previous view.
    Push,
    /// Overwrite the current entry, for redirects.
    Replace,
}

/// Record `route` in the browser history without reloading the page.
pub fn push_history(route: Route) {
    update_history(route, HistoryMode::Push);
}

/// Rewrite the current history entry, for redirects.
pub fn replace_history(route: Route) {
    update_history(route, HistoryMode::Replace);
}

pub fn update_history(route: Route, mode: HistoryMode) {
    let updated = web_sys::window()
        .and_then(|w| w.history().ok())
        .map(|history| {
            let state = wasm_bindgen::JsValue::NULL;
            match mode {
                HistoryMode::Replace => history.replace_state_with_url(&state, "", Some(route.path())),
                HistoryMode::Push => history.push_state_with_url(&state, "", Some(route.path())),
            }
        });
    if !matches!(updated, Some(Ok(()))) {
        tracing::warn!(path = route.path(), "Failed to update browser history");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::from_path("/"), Route::Entry);
        assert_eq!(Route::from_path("/feed"), Route::Feed);
        assert_eq!(Route::from_path("/feed/"), Route::Feed);
        assert_eq!(Route::from_path("/nowhere"), Route::Entry);
        assert_eq!(Route::from_path(Route::Feed.path()), Route::Feed);
    }

    #[test]
    fn test_feed_requires_user() {
        assert_eq!(Route::Feed.resolve(None), Route::Entry);
        assert_eq!(Route::Feed.resolve(Some("Alice")), Route::Feed);
        assert_eq!(Route::Entry.resolve(None), Route::Entry);
    }
}
