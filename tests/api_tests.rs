use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use movie_recs::api::{create_router, AppState, ResultLimits};
use movie_recs::catalog::Catalog;
use movie_recs::models::RecommendationResponse;

const CATALOG: &str = "\
title,director,genre,poster,rating,year,duration,language
Inception,Christopher Nolan,\"Action,Sci-Fi\",[Poster](https://img.example/inception.jpg),8.8,2010,148,English
Interstellar,Christopher Nolan,\"Sci-Fi,Drama\",https://img.example/interstellar.jpg,8.7,2014,169,English
Heat,Michael Mann,\"Crime,Drama\",,8.3,1995,170,English
The Matrix,Lana Wachowski,\"Action,Sci-Fi\",,8.7,1999,136,English
Amelie,Jean-Pierre Jeunet,\"Comedy,Romance\",,8.3,2001,122,French
Untagged,Nobody,,,,,,
";

fn create_test_server() -> TestServer {
    let catalog = Catalog::from_reader(CATALOG.as_bytes(), ',').unwrap();
    let state = AppState::new(catalog, ResultLimits { default: 5, max: 3 });
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn titles(response: &RecommendationResponse) -> Vec<&str> {
    response.movies.iter().map(|m| m.title.as_str()).collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["movies"], 6);
}

#[tokio::test]
async fn test_title_lookup() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("type", "movie title")
        .add_query_param("query", "Inception")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert_eq!(titles(&body), ["Interstellar", "The Matrix"]);
}

#[tokio::test]
async fn test_title_lookup_response_shape() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("type", "movie title")
        .add_query_param("query", "the matrix")
        .add_query_param("n", "1")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 1);

    let inception = movies[0].as_object().unwrap();
    assert_eq!(inception["title"], "Inception");
    assert_eq!(inception["poster"], "https://img.example/inception.jpg");
    assert_eq!(inception["genre"], "Action,Sci-Fi");
    assert_eq!(inception["year"], "2010");
    assert!(!inception.contains_key("similarity"));
    let mut keys: Vec<&str> = inception.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["director", "duration", "genre", "language", "poster", "rating", "title", "year"]
    );
}

#[tokio::test]
async fn test_director_lookup_mixed_case() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("type", "director")
        .add_query_param("query", "christopher nolan")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert_eq!(titles(&body), ["Inception", "Interstellar"]);
}

#[tokio::test]
async fn test_unknown_title_returns_empty_list() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("type", "movie title")
        .add_query_param("query", "Tenet")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, serde_json::json!({ "movies": [] }));
}

#[tokio::test]
async fn test_unknown_type_returns_empty_list() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("type", "actor")
        .add_query_param("query", "Leonardo DiCaprio")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert!(body.movies.is_empty());
}

#[tokio::test]
async fn test_n_zero_returns_empty_list() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("type", "director")
        .add_query_param("query", "Christopher Nolan")
        .add_query_param("n", "0")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert!(body.movies.is_empty());
}

#[tokio::test]
async fn test_n_is_clamped_to_max() {
    let server = create_test_server();
    let response = server
        .get("/recommend/similar")
        .add_query_param("query", "Heat")
        .add_query_param("n", "100")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert_eq!(body.movies.len(), 3);
}

#[tokio::test]
async fn test_blank_query_returns_empty_list() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("type", "director")
        .add_query_param("query", "   ")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, serde_json::json!({ "movies": [] }));

    let response = server
        .get("/recommend/similar")
        .add_query_param("query", "")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, serde_json::json!({ "movies": [] }));
}

#[tokio::test]
async fn test_unknown_type_with_blank_query_returns_empty_list() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("type", "actor")
        .add_query_param("query", "")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, serde_json::json!({ "movies": [] }));
}

#[tokio::test]
async fn test_negative_n_is_rejected() {
    let server = create_test_server();
    let response = server
        .get("/recommend")
        .add_query_param("type", "director")
        .add_query_param("query", "Christopher Nolan")
        .add_query_param("n", "-1")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_similar_endpoint_scores_results() {
    let server = create_test_server();
    let response = server
        .get("/recommend/similar")
        .add_query_param("query", "inception")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert_eq!(titles(&body), ["The Matrix", "Interstellar", "Heat"]);
    let scores: Vec<Option<f64>> = body.movies.iter().map(|m| m.similarity).collect();
    assert_eq!(scores, [Some(1.0), Some(0.5), Some(0.0)]);
}

#[tokio::test]
async fn test_similar_endpoint_unknown_title() {
    let server = create_test_server();
    let response = server
        .get("/recommend/similar")
        .add_query_param("query", "Tenet")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert!(body.movies.is_empty());
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let server = create_test_server();
    let response = server.get("/health").await;

    let header = response.headers().get("x-request-id").unwrap();
    assert!(uuid_like(header.to_str().unwrap()));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = create_test_server();
    let response = server
        .get("/health")
        .add_header(
            axum::http::header::ORIGIN,
            axum::http::HeaderValue::from_static("http://localhost:8501"),
        )
        .await;
    response.assert_status_ok();

    let allow_origin = response
        .headers()
        .get(axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .unwrap();
    assert_eq!(allow_origin, "*");
}

fn uuid_like(value: &str) -> bool {
    value.len() == 36 && value.chars().filter(|c| *c == '-').count() == 4
}
