use crate::SessionStore;

use ma_core::{Route, RouteDecision, RouteGuard};

use serde::Serialize;

/// Outcome of a navigation against the current session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "route", rename_all = "snake_case")]
pub enum Navigation {
    /// Startup resolution still running; show a neutral loading state.
    Pending,
    Render(Route),
    Redirect(Route),
}

impl From<RouteDecision> for Navigation {
    fn from(decision: RouteDecision) -> Self {
        match decision {
            RouteDecision::Render(route) => Self::Render(route),
            RouteDecision::Redirect(route) => Self::Redirect(route),
        }
    }
}

/// Route guard bound to a session store. Reads a fresh snapshot on every call.
#[derive(Clone)]
pub struct Navigator {
    store: SessionStore,
}

impl Navigator {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        self.navigate_to(&Route::parse(path))
    }

    pub fn navigate_to(&self, route: &Route) -> Navigation {
        let snapshot = self.store.current();
        if snapshot.loading {
            return Navigation::Pending;
        }

        RouteGuard::resolve(snapshot.user.as_ref(), route).into()
    }

    /// Route finally rendered for `path` after following redirects;
    /// `None` while loading.
    pub fn settle(&self, path: &str) -> Option<Route> {
        let snapshot = self.store.current();
        if snapshot.loading {
            return None;
        }

        Some(RouteGuard::settle(
            snapshot.user.as_ref(),
            &Route::parse(path),
        ))
    }
}
