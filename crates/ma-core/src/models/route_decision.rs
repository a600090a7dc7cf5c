use crate::Route;

use serde::Serialize;

/// Outcome of a route guard decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "route", rename_all = "snake_case")]
pub enum RouteDecision {
    Render(Route),
    Redirect(Route),
}

impl RouteDecision {
    /// Route the visitor ends up on after this single step.
    pub fn target(&self) -> &Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}
