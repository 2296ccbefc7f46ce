//! Client-side route table for the RAG HH web app.
//!
//! # Overview
//! An ordered list of routes, each pairing a path and name with a lazily
//! loaded view and an optional title, driven by a history-based `Router`.
//! `install_title_observer` keeps the document title in step with the active
//! route.
//!
//! # Design
//! - The table is validated once and immutable afterwards.
//! - Views load on first activation and are cached.
//! - Unmatched locations complete without a route; hooks still run.

pub mod app;
pub mod error;
pub mod history;
pub mod route;
pub mod router;
pub mod title;

pub use app::{routes, View};
pub use error::RouteError;
pub use history::WebHistory;
pub use route::{RouteEntry, RouteTable, ViewLoader};
pub use router::{AfterEach, MatchedRoute, RouteLocation, Router};
pub use title::{install_title_observer, page_title, Document, TitleDocument, APP_NAME};
