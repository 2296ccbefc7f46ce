//! Route entries and the ordered table they live in.
//!
//! # Design
//! A route's view is produced by a deferred async factory. Nothing is built
//! until the route first activates; the result is then cached in a
//! `OnceCell` so later activations reuse it. The table is validated once at
//! construction and never mutated afterwards.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::error::RouteError;

type BoxFuture<V> = Pin<Box<dyn Future<Output = V> + Send>>;
type Factory<V> = Arc<dyn Fn() -> BoxFuture<V> + Send + Sync>;

/// Lazily loads and caches the view for one route.
pub struct ViewLoader<V> {
    factory: Factory<V>,
    view: OnceCell<V>,
}

impl<V> ViewLoader<V> {
    pub fn new<F, Fut>(factory: F) -> Self
    where
        V: 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = V> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || Box::pin(factory()) as BoxFuture<V>),
            view: OnceCell::new(),
        }
    }

    /// Run the factory on first use; return the cached view afterwards.
    pub async fn load(&self) -> &V {
        self.view.get_or_init(|| (self.factory)()).await
    }

    /// The view, if it has been loaded.
    pub fn get(&self) -> Option<&V> {
        self.view.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.view.initialized()
    }
}

/// A navigable path with its name, title and view.
pub struct RouteEntry<V> {
    pub path: String,
    pub name: String,
    pub title: Option<String>,
    pub loader: ViewLoader<V>,
}

impl<V> RouteEntry<V> {
    pub fn new<F, Fut>(path: &str, name: &str, factory: F) -> Self
    where
        V: 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = V> + Send + 'static,
    {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            title: None,
            loader: ViewLoader::new(factory),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

impl<V> fmt::Debug for RouteEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("title", &self.title)
            .field("loaded", &self.loader.is_loaded())
            .finish()
    }
}

/// Ordered, immutable list of routes; first match wins.
#[derive(Debug)]
pub struct RouteTable<V> {
    entries: Vec<RouteEntry<V>>,
}

impl<V> RouteTable<V> {
    /// Validate and freeze `entries`.
    ///
    /// Paths must be non-empty and start with `/`; paths and names must be
    /// unique.
    pub fn new(entries: Vec<RouteEntry<V>>) -> Result<Self, RouteError> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();
        for entry in &entries {
            if entry.path.is_empty() {
                return Err(RouteError::EmptyPath {
                    name: entry.name.clone(),
                });
            }
            if !entry.path.starts_with('/') {
                return Err(RouteError::InvalidLocation(entry.path.clone()));
            }
            if !paths.insert(normalize(&entry.path)) {
                return Err(RouteError::DuplicatePath(entry.path.clone()));
            }
            if !names.insert(entry.name.as_str()) {
                return Err(RouteError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Index of the first route whose path matches `location`.
    pub fn resolve(&self, location: &str) -> Option<usize> {
        let path = normalize(location);
        self.entries.iter().position(|e| normalize(&e.path) == path)
    }

    pub fn by_name(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&RouteEntry<V>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<V>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Path component of `location`, without query, fragment or trailing `/`.
pub(crate) fn normalize(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
