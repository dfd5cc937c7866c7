//! Tests for the search request wire format.

use serde_json::{Map, json};
use std::collections::BTreeMap;
use weft_core::{QueryState, SearchRequest, SearchResponse, SortSpec};

#[test]
fn test_empty_state_omits_optional_fields() {
    let request = SearchRequest::for_page("material", &QueryState::new(), 1, 20);

    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(
        body,
        json!({ "index": "material", "pagination": { "offset": 0, "size": 20 } })
    );
}

#[test]
fn test_full_state_uses_camel_case() {
    let state = QueryState::new()
        .with_query("cotton")
        .with_filter("status", "active")
        .with_sort(vec![SortSpec::desc("created_at")]);
    let mut aggs = Map::new();
    aggs.insert("status".to_string(), json!({ "terms": { "field": "status" } }));

    let request =
        SearchRequest::for_page("material", &state, 3, 25).with_agg_requests(Some(aggs));
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["query"], json!("cotton"));
    assert_eq!(body["filters"], json!({ "status": "active" }));
    assert_eq!(body["sort"], json!([{ "field": "created_at", "order": "desc" }]));
    assert_eq!(body["aggRequests"]["status"]["terms"]["field"], json!("status"));
    assert_eq!(body["pagination"], json!({ "offset": 50, "size": 25 }));
}

#[test]
fn test_builder_matches_for_page() {
    let state = QueryState::new().with_query("cotton");
    let built = SearchRequest::builder()
        .index("material")
        .query(Some("cotton".to_string()))
        .pagination(weft_core::Pagination::for_page(2, 20))
        .build()
        .unwrap();

    assert_eq!(built, SearchRequest::for_page("material", &state, 2, 20));
}

#[test]
fn test_response_tolerates_missing_fields() {
    let response: SearchResponse =
        serde_json::from_value(json!({ "items": [{ "_id": "a" }] })).unwrap();

    let (items, total, took, aggregations) = response.into_parts();
    assert_eq!(items.len(), 1);
    assert_eq!(total, 0);
    assert_eq!(took, 0);
    assert!(aggregations.is_none());
}

#[test]
fn test_query_state_url_round_trip_preserves_filters() {
    let state = QueryState::new()
        .with_query("red")
        .with_filter("supplier", json!(["acme", "globex"]))
        .with_sort(vec![SortSpec::asc("name")]);

    let restored = QueryState::from_url_params(&state.to_url_params());

    assert_eq!(restored, state);
}

#[test]
fn test_malformed_url_params_are_ignored() {
    let params: BTreeMap<String, String> = [
        ("q".to_string(), "red".to_string()),
        ("filters".to_string(), "{not json".to_string()),
    ]
    .into_iter()
    .collect();

    let state = QueryState::from_url_params(&params);

    assert_eq!(state.query(), "red");
    assert!(state.filters().is_empty());
}
