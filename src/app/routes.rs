//! Route table and navigation. Two routes exist: the protected page at `/` and
//! the login form at `/login`. Controllers navigate through the [`Navigator`]
//! trait so tests can observe where they went and how.

use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`, guarded.
    Home,
    /// `/login`.
    Login,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.path())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("no route matches {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        match normalized {
            "" => Ok(Self::Home),
            "/login" | "login" => Ok(Self::Login),
            _ => Err(UnknownRoute(trimmed.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    #[must_use]
    pub const fn replace() -> Self {
        Self { replace: true }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route, options: NavigateOptions);
}

/// In-process history stack; the last entry is the current route.
#[derive(Debug)]
pub struct History {
    entries: Mutex<Vec<Route>>,
}

impl History {
    #[must_use]
    pub fn new(initial: Route) -> Self {
        Self {
            entries: Mutex::new(vec![initial]),
        }
    }

    fn entries_mut(&self) -> MutexGuard<'_, Vec<Route>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn current(&self) -> Route {
        self.entries_mut().last().copied().unwrap_or(Route::Home)
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Route> {
        self.entries_mut().clone()
    }

    /// Steps back one entry; `None` when there is nothing to go back to.
    pub fn back(&self) -> Option<Route> {
        let mut entries = self.entries_mut();
        if entries.len() < 2 {
            return None;
        }
        entries.pop();
        entries.last().copied()
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route, options: NavigateOptions) {
        let mut entries = self.entries_mut();
        if options.replace {
            entries.pop();
        }
        entries.push(route);
        debug!(route = %route, replace = options.replace, "navigated");
    }
}
