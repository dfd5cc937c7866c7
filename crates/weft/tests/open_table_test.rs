//! Tests for opening tables against a local search service.

use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use weft::{
    ClientConfigBuilder, ColumnConfig, DataTableConfig, LoadMode, MemoryPreferenceStore,
    PageConfig, ScrollMetrics, SortSpec, TablePreferences, open_page, open_table,
};

/// Serves 100 rows; records every request body.
async fn serve(requests: Arc<Mutex<Vec<Value>>>) -> String {
    let app = Router::new().route(
        "/search",
        post(move |Json(body): Json<Value>| {
            let requests = requests.clone();
            async move {
                requests.lock().unwrap().push(body.clone());
                let offset = body["pagination"]["offset"].as_u64().unwrap_or(0);
                let size = body["pagination"]["size"].as_u64().unwrap_or(20);
                let items: Vec<Value> = (offset..(offset + size).min(100))
                    .map(|n| json!({ "_id": format!("row-{n}") }))
                    .collect();
                Json(json!({ "items": items, "total": 100, "took": 2 }))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_table_pages_through_http_backend() {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let base_url = serve(requests.clone()).await;
    let client = ClientConfigBuilder::default().base_url(base_url).build().unwrap();

    let table = open_table(&client, DataTableConfig::new("material")).unwrap();
    table.set_query("twill").await;
    table.load_page(2, LoadMode::Forward).await.unwrap();

    // 40 rows of 25px with the viewport at the bottom
    let outcome = table.on_scroll(ScrollMetrics::new(600.0, 1000.0, 400.0)).await;

    assert_eq!(*outcome.forward(), Some(3));
    assert_eq!(table.cached_pages(), vec![1, 2, 3]);
    assert_eq!(table.total_count(), 100);
    assert_eq!(table.rows()[40].id().as_deref(), Some("row-40"));

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0]["query"], json!("twill"));
    assert_eq!(requests[2]["pagination"]["offset"], json!(40));
}

#[tokio::test]
async fn test_open_page_applies_stored_default_sort() {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let base_url = serve(requests.clone()).await;
    let client = ClientConfigBuilder::default().base_url(base_url).build().unwrap();
    let columns = vec![ColumnConfig::new("code", "Code")];
    let page = PageConfig::new("material", "material", columns.clone(), 25);
    let preferences = TablePreferences::new(
        "material",
        columns,
        Arc::new(MemoryPreferenceStore::new()),
    );
    preferences
        .set_default_sort(Some(SortSpec::desc("created_at")))
        .unwrap();

    let table = open_page(&client, &page, &preferences).await.unwrap();

    assert_eq!(table.cached_pages(), vec![1]);
    assert_eq!(table.rows().len(), 25);
    assert_eq!(table.query_state().sort(), &vec![SortSpec::desc("created_at")]);
    let requests = requests.lock().unwrap();
    assert_eq!(
        requests[0]["sort"],
        json!([{ "field": "created_at", "order": "desc" }])
    );
}

#[tokio::test]
async fn test_open_page_without_preferences_loads_first_page() {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let base_url = serve(requests.clone()).await;
    let client = ClientConfigBuilder::default().base_url(base_url).build().unwrap();
    let columns = vec![ColumnConfig::new("code", "Code")];
    let page = PageConfig::new("order", "order", columns.clone(), 20);
    let preferences =
        TablePreferences::new("order", columns, Arc::new(MemoryPreferenceStore::new()));

    let table = open_page(&client, &page, &preferences).await.unwrap();

    assert_eq!(table.cached_pages(), vec![1]);
    assert!(requests.lock().unwrap()[0].get("sort").is_none());
}
