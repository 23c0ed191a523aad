use serde::Serialize;
use std::fmt;

/// Pages of the portfolio, in navigation-bar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Interior,
    Graphic,
    Contact,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Interior, Route::Graphic, Route::Contact];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Interior => "/interior",
            Route::Graphic => "/graphic",
            Route::Contact => "/contact",
        }
    }

    /// Navigation bar label
    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Interior => "Interior",
            Route::Graphic => "Graphic",
            Route::Contact => "Contact",
        }
    }

    /// Exact path match; anything else has no page
    pub fn from_path(path: &str) -> Option<Route> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} {}", self.label(), self.path())
    }
}

/// Current page plus scroll offset
///
/// Every successful navigation scrolls back to the top, including a
/// navigation to the page already shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Navigator {
    current: Route,
    scroll_y: f32,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Route::Home,
            scroll_y: 0.0,
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y.max(0.0);
    }

    pub fn navigate(&mut self, route: Route) {
        log::debug!("Navigating to {}", route.path());
        self.current = route;
        self.scroll_y = 0.0;
    }

    /// Navigate by path; unknown paths leave the navigator untouched
    pub fn navigate_path(&mut self, path: &str) -> Option<Route> {
        let route = Route::from_path(path)?;
        self.navigate(route);
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(Route::from_path("/about"), None);
        assert_eq!(Route::from_path("/interior/"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn test_navigation_resets_scroll() {
        let mut nav = Navigator::new();
        nav.scroll_to(840.0);
        nav.navigate(Route::Graphic);

        assert_eq!(nav.current(), Route::Graphic);
        assert_eq!(nav.scroll_y(), 0.0);
    }

    #[test]
    fn test_unknown_path_keeps_scroll() {
        let mut nav = Navigator::new();
        nav.scroll_to(120.0);
        assert_eq!(nav.navigate_path("/nowhere"), None);
        assert_eq!(nav.current(), Route::Home);
        assert_eq!(nav.scroll_y(), 120.0);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = Route::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(labels, ["Home", "Interior", "Graphic", "Contact"]);
    }
}
