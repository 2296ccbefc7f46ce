//! History-based router over a `RouteTable`.
//!
//! # Design
//! Before the first navigation no route is active. Each navigation resolves
//! the target against the table, loads the matched view (first activation
//! only), records the location in `WebHistory`, makes it current and then
//! runs every `after_each` hook in registration order. A location that
//! matches no route still completes, with no matched route, so hooks always
//! observe the outcome.

use crate::error::RouteError;
use crate::history::WebHistory;
use crate::route::{RouteEntry, RouteTable};

/// The route a navigation resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    pub path: String,
    pub name: String,
    pub title: Option<String>,
}

/// Where the router is, or is going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLocation {
    /// The full location navigated to, including any query or fragment.
    pub location: String,
    pub matched: Option<MatchedRoute>,
}

impl RouteLocation {
    pub fn name(&self) -> Option<&str> {
        self.matched.as_ref().map(|m| m.name.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.matched.as_ref().and_then(|m| m.title.as_deref())
    }
}

/// Called after each completed navigation with the new and previous locations.
pub type AfterEach = Box<dyn Fn(&RouteLocation, Option<&RouteLocation>) + Send + Sync>;

pub struct Router<V> {
    table: RouteTable<V>,
    history: WebHistory,
    current: Option<RouteLocation>,
    after_each: Vec<AfterEach>,
}

impl<V> Router<V> {
    pub fn new(table: RouteTable<V>) -> Self {
        Self {
            table,
            history: WebHistory::new(),
            current: None,
            after_each: Vec::new(),
        }
    }

    pub fn after_each<F>(&mut self, hook: F)
    where
        F: Fn(&RouteLocation, Option<&RouteLocation>) + Send + Sync + 'static,
    {
        self.after_each.push(Box::new(hook));
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    pub fn history(&self) -> &WebHistory {
        &self.history
    }

    /// The active location; `None` until the first navigation completes.
    pub fn current(&self) -> Option<&RouteLocation> {
        self.current.as_ref()
    }

    /// The active route's view, once loaded.
    pub fn current_view(&self) -> Option<&V> {
        let name = self.current.as_ref()?.name()?;
        let index = self.table.by_name(name)?;
        self.table.get(index)?.loader.get()
    }

    /// Navigate to `location`, pushing a history entry.
    pub async fn navigate(&mut self, location: &str) -> Result<RouteLocation, RouteError> {
        if !location.starts_with('/') {
            return Err(RouteError::InvalidLocation(location.to_string()));
        }
        self.history.push(location);
        Ok(self.complete(location.to_string()).await)
    }

    /// Navigate to `location`, replacing the current history entry.
    pub async fn replace(&mut self, location: &str) -> Result<RouteLocation, RouteError> {
        if !location.starts_with('/') {
            return Err(RouteError::InvalidLocation(location.to_string()));
        }
        self.history.replace(location);
        Ok(self.complete(location.to_string()).await)
    }

    /// Navigate to the route called `name`.
    pub async fn navigate_by_name(&mut self, name: &str) -> Result<RouteLocation, RouteError> {
        let index = self
            .table
            .by_name(name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?;
        let path = self.table.get(index).map(|e| e.path.clone()).unwrap_or_default();
        self.navigate(&path).await
    }

    /// Step back in history; `None` when already at the oldest entry.
    pub async fn back(&mut self) -> Option<RouteLocation> {
        let location = self.history.back()?.to_string();
        Some(self.complete(location).await)
    }

    /// Step forward in history; `None` when already at the newest entry.
    pub async fn forward(&mut self) -> Option<RouteLocation> {
        let location = self.history.forward()?.to_string();
        Some(self.complete(location).await)
    }

    async fn complete(&mut self, location: String) -> RouteLocation {
        let matched = match self.table.resolve(&location).and_then(|i| self.table.get(i)) {
            Some(entry) => {
                entry.loader.load().await;
                Some(matched_route(entry))
            }
            None => {
                tracing::warn!(%location, "no route matches location");
                None
            }
        };
        let to = RouteLocation { location, matched };
        tracing::debug!(location = %to.location, route = ?to.name(), "navigation complete");

        let from = self.current.replace(to.clone());
        for hook in &self.after_each {
            hook(&to, from.as_ref());
        }
        to
    }
}

fn matched_route<V>(entry: &RouteEntry<V>) -> MatchedRoute {
    MatchedRoute {
        path: entry.path.clone(),
        name: entry.name.clone(),
        title: entry.title.clone(),
    }
}
