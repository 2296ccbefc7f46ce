//! The application's declared routes.

use std::sync::Arc;

use crate::error::RouteError;
use crate::route::{RouteEntry, RouteTable};
use crate::router::Router;
use crate::title::{install_title_observer, Document};

/// Top-level views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Search,
    Rag,
}

/// Routes in match order.
pub fn routes() -> Vec<RouteEntry<View>> {
    vec![
        RouteEntry::new("/", "Dashboard", || async { View::Dashboard }).title("Дашборд"),
        RouteEntry::new("/search", "Search", || async { View::Search }).title("Поиск"),
        RouteEntry::new("/rag", "Rag", || async { View::Rag }).title("RAG контекст"),
    ]
}

/// The application router with the title observer installed.
pub fn router<D>(document: Arc<D>) -> Result<Router<View>, RouteError>
where
    D: Document + 'static,
{
    let mut router = Router::new(RouteTable::new(routes())?);
    install_title_observer(&mut router, document);
    Ok(router)
}
