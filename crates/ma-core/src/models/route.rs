//! Application routes and their access classes.

use std::fmt;

use serde::{Serialize, Serializer};

/// A page the client can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Signup,
    Onboarding,
    Dashboard,
    Companion,
    Exercises,
    Progress,
    Help,
    /// Any path that doesn't name a page (holds the normalized path)
    NotFound(String),
}

/// Access class a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    Landing,
    /// Login and signup: only useful to visitors without a session
    Anonymous,
    Onboarding,
    Protected,
    Unknown,
}

impl Route {
    /// Every named page, in navigation order.
    pub const ALL: [Route; 9] = [
        Route::Landing,
        Route::Login,
        Route::Signup,
        Route::Onboarding,
        Route::Dashboard,
        Route::Companion,
        Route::Exercises,
        Route::Progress,
        Route::Help,
    ];

    /// Parse a requested path. Query string, fragment and a trailing slash are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => Self::Landing,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/onboarding" => Self::Onboarding,
            "/dashboard" => Self::Dashboard,
            "/companion" => Self::Companion,
            "/exercises" => Self::Exercises,
            "/progress" => Self::Progress,
            "/help" => Self::Help,
            other => Self::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Onboarding => "/onboarding",
            Self::Dashboard => "/dashboard",
            Self::Companion => "/companion",
            Self::Exercises => "/exercises",
            Self::Progress => "/progress",
            Self::Help => "/help",
            Self::NotFound(path) => path,
        }
    }

    pub fn class(&self) -> RouteClass {
        match self {
            Self::Landing => RouteClass::Landing,
            Self::Login | Self::Signup => RouteClass::Anonymous,
            Self::Onboarding => RouteClass::Onboarding,
            Self::Dashboard | Self::Companion | Self::Exercises | Self::Progress | Self::Help => {
                RouteClass::Protected
            }
            Self::NotFound(_) => RouteClass::Unknown,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.class() == RouteClass::Protected
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Serialize for Route {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.path())
    }
}
