use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rag_hh_router::{app, install_title_observer, RouteEntry, RouteTable, Router, TitleDocument, View};

#[tokio::test]
async fn search_route_sets_title() {
    let document = Arc::new(TitleDocument::new());
    let mut router = app::router(document.clone()).unwrap();

    router.navigate("/search").await.unwrap();
    assert_eq!(document.title(), "Поиск — RAG HH");
    assert_eq!(router.current_view(), Some(&View::Search));
}

#[tokio::test]
async fn every_declared_route_sets_its_title() {
    let document = Arc::new(TitleDocument::new());
    let mut router = app::router(document.clone()).unwrap();

    router.navigate_by_name("Dashboard").await.unwrap();
    assert_eq!(document.title(), "Дашборд — RAG HH");

    router.navigate_by_name("Rag").await.unwrap();
    assert_eq!(document.title(), "RAG контекст — RAG HH");

    router.back().await.unwrap();
    assert_eq!(document.title(), "Дашборд — RAG HH");
}

#[tokio::test]
async fn unmatched_path_falls_back_to_app_name() {
    let document = Arc::new(TitleDocument::new());
    let mut router = app::router(document.clone()).unwrap();

    router.navigate("/search").await.unwrap();
    let to = router.navigate("/does-not-exist").await.unwrap();
    assert!(to.matched.is_none());
    assert_eq!(document.title(), "RAG HH");
}

#[tokio::test]
async fn untitled_route_falls_back_to_app_name() {
    let table = RouteTable::new(vec![RouteEntry::new("/plain", "Plain", || async {})]).unwrap();
    let mut router = Router::new(table);
    let document = Arc::new(TitleDocument::new());
    install_title_observer(&mut router, document.clone());

    router.navigate("/plain").await.unwrap();
    assert_eq!(document.title(), "RAG HH");
}

#[tokio::test]
async fn views_load_lazily_and_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();
    let table = RouteTable::new(vec![
        RouteEntry::new("/", "Home", || async { "home" }),
        RouteEntry::new("/heavy", "Heavy", move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                "heavy"
            }
        }),
    ])
    .unwrap();
    let mut router = Router::new(table);

    router.navigate("/").await.unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 0);

    router.navigate("/heavy").await.unwrap();
    router.navigate("/").await.unwrap();
    router.navigate("/heavy").await.unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(router.current_view(), Some(&"heavy"));
}
