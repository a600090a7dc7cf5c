//! Route access policy.
//!
//! Pure and stateless: callers pass the identity snapshot current at the time
//! of navigation, never a decision cached from an earlier render.

use crate::{IdentityState, Route, RouteClass, RouteDecision, User};

pub struct RouteGuard;

impl RouteGuard {
    /// Decide whether `requested` renders or redirects for `user`.
    ///
    /// | class      | anonymous         | not onboarded         | onboarded            |
    /// |------------|-------------------|-----------------------|----------------------|
    /// | landing    | render            | → dashboard           | → dashboard          |
    /// | login/up   | render            | → onboarding          | → dashboard          |
    /// | onboarding | → login           | render                | → dashboard          |
    /// | protected  | → login           | → onboarding          | render               |
    /// | unknown    | render not-found  | render not-found      | render not-found     |
    pub fn resolve(user: Option<&User>, requested: &Route) -> RouteDecision {
        use IdentityState::{Anonymous, Onboarded, Unonboarded};

        let state = IdentityState::of(user);

        match (requested.class(), state) {
            (RouteClass::Unknown, _) => RouteDecision::Render(requested.clone()),

            (RouteClass::Landing, Anonymous) => RouteDecision::Render(Route::Landing),
            (RouteClass::Landing, Unonboarded | Onboarded) => {
                RouteDecision::Redirect(Route::Dashboard)
            }

            (RouteClass::Anonymous, Anonymous) => RouteDecision::Render(requested.clone()),
            (RouteClass::Anonymous, Unonboarded) => RouteDecision::Redirect(Route::Onboarding),
            (RouteClass::Anonymous, Onboarded) => RouteDecision::Redirect(Route::Dashboard),

            (RouteClass::Onboarding, Anonymous) => RouteDecision::Redirect(Route::Login),
            (RouteClass::Onboarding, Unonboarded) => RouteDecision::Render(Route::Onboarding),
            (RouteClass::Onboarding, Onboarded) => RouteDecision::Redirect(Route::Dashboard),

            (RouteClass::Protected, Anonymous) => RouteDecision::Redirect(Route::Login),
            (RouteClass::Protected, Unonboarded) => RouteDecision::Redirect(Route::Onboarding),
            (RouteClass::Protected, Onboarded) => RouteDecision::Render(requested.clone()),
        }
    }

    /// Parse `path` and resolve it.
    pub fn resolve_path(user: Option<&User>, path: &str) -> RouteDecision {
        Self::resolve(user, &Route::parse(path))
    }

    /// Follow redirects until a route renders.
    ///
    /// The table never redirects more than twice (landing → dashboard → onboarding).
    pub fn settle(user: Option<&User>, requested: &Route) -> Route {
        let mut current = requested.clone();

        for _ in 0..Route::ALL.len() {
            match Self::resolve(user, &current) {
                RouteDecision::Render(route) => return route,
                RouteDecision::Redirect(route) => current = route,
            }
        }

        current
    }
}
