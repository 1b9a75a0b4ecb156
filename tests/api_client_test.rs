use httpmock::prelude::*;
use internmatch::domain::{RecommendationRequest, SubmitError, FALLBACK_ERROR_MESSAGE};
use internmatch::infrastructure::{
    HttpRecommendationClient, RecommendationService, LOCATIONS_PATH, RECOMMENDATIONS_PATH, SECTORS_PATH,
};
use serde_json::json;
use std::time::Duration;

fn request() -> RecommendationRequest {
    RecommendationRequest {
        education: "BTech".to_string(),
        skills: vec!["Python".to_string(), "SQL".to_string()],
        sector: "Information Technology".to_string(),
        location: "Bangalore".to_string(),
    }
}

#[test]
fn test_recommend_posts_json_body_once() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(RECOMMENDATIONS_PATH)
            .header("content-type", "application/json")
            .json_body(json!({
                "education": "BTech",
                "skills": ["Python", "SQL"],
                "sector": "Information Technology",
                "location": "Bangalore"
            }));
        then.status(200).json_body(json!({
            "recommendations": [
                {"title": "Data Analyst Intern", "company": "Acme", "match_score": 12, "rating": 4.5},
                {"title": "Backend Intern", "company": "Globex", "stipend": 15000}
            ],
            "total_count": 2
        }));
    });

    let client = HttpRecommendationClient::new(server.base_url()).unwrap();
    let items = client.recommend(&request()).unwrap();

    mock.assert();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Data Analyst Intern");
    assert_eq!(items[0].rating, 4.5);
    assert_eq!(items[1].stipend, "15000");
}

#[test]
fn test_error_status_carries_server_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(RECOMMENDATIONS_PATH);
        then.status(400).json_body(json!({"error": "no matches"}));
    });

    let client = HttpRecommendationClient::new(server.base_url()).unwrap();
    let err = client.recommend(&request()).unwrap_err();

    assert_eq!(err, SubmitError::Request("no matches".to_string()));
}

#[test]
fn test_error_status_without_message_uses_fallback() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(RECOMMENDATIONS_PATH);
        then.status(500).json_body(json!({"detail": "crash"}));
    });

    let client = HttpRecommendationClient::new(server.base_url()).unwrap();
    let err = client.recommend(&request()).unwrap_err();

    assert_eq!(err.to_string(), FALLBACK_ERROR_MESSAGE);
}

#[test]
fn test_non_string_error_is_shown_as_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(RECOMMENDATIONS_PATH);
        then.status(422).json_body(json!({"error": 5}));
    });

    let client = HttpRecommendationClient::new(server.base_url()).unwrap();
    let err = client.recommend(&request()).unwrap_err();

    assert_eq!(err, SubmitError::Request("5".to_string()));
}

#[test]
fn test_non_json_body_is_network_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(RECOMMENDATIONS_PATH);
        then.status(502).body("<html>Bad Gateway</html>");
    });

    let client = HttpRecommendationClient::new(server.base_url()).unwrap();
    let err = client.recommend(&request()).unwrap_err();

    assert_eq!(err, SubmitError::network());
}

#[test]
fn test_unreachable_server_is_network_error() {
    // nothing listens on port 9 locally
    let client = HttpRecommendationClient::new("http://127.0.0.1:9").unwrap();
    let err = client.recommend(&request()).unwrap_err();

    assert!(matches!(err, SubmitError::Network(_)));
    assert_eq!(err.to_string(), FALLBACK_ERROR_MESSAGE);
}

#[test]
fn test_empty_recommendations() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(RECOMMENDATIONS_PATH);
        then.status(200).json_body(json!({"recommendations": [], "total_count": 0}));
    });

    let client = HttpRecommendationClient::new(server.base_url()).unwrap();
    assert!(client.recommend(&request()).unwrap().is_empty());
}

#[test]
fn test_catalog_endpoints() {
    let server = MockServer::start();
    let sectors = server.mock(|when, then| {
        when.method(GET).path(SECTORS_PATH);
        then.status(200).json_body(json!({"sectors": ["Finance", "Media"]}));
    });
    let locations = server.mock(|when, then| {
        when.method(GET).path(LOCATIONS_PATH);
        then.status(200).json_body(json!({"locations": ["Remote"]}));
    });

    let client = HttpRecommendationClient::new(format!("{}/", server.base_url())).unwrap();

    assert_eq!(client.sectors().unwrap(), vec!["Finance".to_string(), "Media".to_string()]);
    assert_eq!(client.locations().unwrap(), vec!["Remote".to_string()]);
    sectors.assert();
    locations.assert();
}

#[test]
fn test_stalled_catalog_request_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(SECTORS_PATH);
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(json!({"sectors": ["Finance"]}));
    });

    let client = HttpRecommendationClient::new(server.base_url())
        .unwrap()
        .with_catalog_timeout(Duration::from_millis(200));

    assert_eq!(client.sectors().unwrap_err(), SubmitError::network());
}
