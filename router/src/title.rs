//! Keeps the document title in step with the active route.

use std::sync::{Arc, Mutex};

use crate::router::Router;

/// Application name shown in every page title.
pub const APP_NAME: &str = "RAG HH";

/// Something with a settable title, like a browser document.
pub trait Document: Send + Sync {
    fn set_title(&self, title: &str);
}

/// In-memory `Document`.
#[derive(Debug, Default)]
pub struct TitleDocument {
    title: Mutex<String>,
}

impl TitleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> String {
        self.title.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl Document for TitleDocument {
    fn set_title(&self, title: &str) {
        if let Ok(mut current) = self.title.lock() {
            *current = title.to_string();
        }
    }
}

/// `"<title> — RAG HH"`, or just the app name without a non-empty route title.
pub fn page_title(route_title: Option<&str>) -> String {
    match route_title {
        Some(title) if !title.is_empty() => format!("{title} — {APP_NAME}"),
        _ => APP_NAME.to_string(),
    }
}

/// Register an `after_each` hook that writes the page title to `document`.
pub fn install_title_observer<V, D>(router: &mut Router<V>, document: Arc<D>)
where
    D: Document + 'static,
{
    router.after_each(move |to, _| document.set_title(&page_title(to.title())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_with_route_title() {
        assert_eq!(page_title(Some("Поиск")), "Поиск — RAG HH");
    }

    #[test]
    fn title_without_route_title() {
        assert_eq!(page_title(None), "RAG HH");
    }

    #[test]
    fn empty_title_counts_as_none() {
        assert_eq!(page_title(Some("")), "RAG HH");
    }

    #[test]
    fn document_starts_untitled() {
        let document = TitleDocument::new();
        assert_eq!(document.title(), "");
        document.set_title("x");
        assert_eq!(document.title(), "x");
    }
}
