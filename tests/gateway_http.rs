//! Drives the real HTTP gateway against an in-process stub server.

use std::collections::HashMap;

use axum::extract::Form;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use starboard::error::AppError;
use starboard::models::Rating;
use starboard::services::gateway::{HttpGateway, RecommenderGateway};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn rating(value: u8) -> Rating {
    Rating::new(value).unwrap()
}

#[tokio::test]
async fn test_save_rating_posts_json_body() {
    let app = Router::new().route(
        "/rate_movie",
        post(|Json(body): Json<Value>| async move {
            // echo back whether the payload matched what the server expects
            if body["movie_id"] == "7" && body["rating"] == 4 {
                Json(json!({"success": true, "message": "saved"}))
            } else {
                Json(json!({"success": false, "message": "bad payload"}))
            }
        }),
    );

    let gateway = HttpGateway::new(spawn(app).await);
    gateway.save_rating("7", rating(4)).await.unwrap();
}

#[tokio::test]
async fn test_save_rating_rejection_is_not_transport() {
    let app = Router::new().route(
        "/rate_movie",
        post(|| async { Json(json!({"success": false, "message": "ratings are closed"})) }),
    );

    let gateway = HttpGateway::new(spawn(app).await);
    let err = gateway.save_rating("7", rating(4)).await.unwrap_err();

    assert!(matches!(err, AppError::Rejected(ref msg) if msg == "ratings are closed"));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_save_rating_server_error_is_transport() {
    let app = Router::new().route(
        "/rate_movie",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );

    let gateway = HttpGateway::new(spawn(app).await);
    let err = gateway.save_rating("7", rating(4)).await.unwrap_err();

    assert!(err.is_transport());
    match err {
        AppError::BadStatus { status, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("expected BadStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_failure_is_transport() {
    // nothing listens here
    let gateway = HttpGateway::new("http://127.0.0.1:1");
    let err = gateway.save_rating("7", rating(4)).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_delete_rating_posts_form_field() {
    let app = Router::new().route(
        "/delete_rating",
        post(|Form(fields): Form<HashMap<String, String>>| async move {
            if fields.get("movie_id").map(String::as_str) == Some("7") {
                Json(json!({"success": true, "message": "deleted"}))
            } else {
                Json(json!({"success": false, "message": "missing movie_id"}))
            }
        }),
    );

    let gateway = HttpGateway::new(spawn(app).await);
    gateway.delete_rating("7").await.unwrap();
}

#[tokio::test]
async fn test_delete_rating_surfaces_server_message() {
    let app = Router::new().route(
        "/delete_rating",
        post(|| async { Json(json!({"success": false, "message": "not found"})) }),
    );

    let gateway = HttpGateway::new(spawn(app).await);
    let err = gateway.delete_rating("7").await.unwrap_err();

    assert!(matches!(err, AppError::Rejected(ref msg) if msg == "not found"));
}

#[tokio::test]
async fn test_search_sends_form_and_reads_mixed_field_types() {
    let app = Router::new().route(
        "/search_movies",
        post(|Form(fields): Form<HashMap<String, String>>| async move {
            assert_eq!(fields.get("query").map(String::as_str), Some("up"));
            assert_eq!(fields.get("genre").map(String::as_str), Some("Animation"));
            // ids and ratings arrive as numbers on some paths, strings on others
            Json(json!({
                "movies": [
                    {"movieId": "7", "title": "Up", "genres": "Animation", "user_rating": "4"},
                    {"movieId": 2355, "title": "A Bug's Life", "genres": "Animation", "user_rating": 3.0},
                    {"movieId": 4886, "title": "Monsters, Inc.", "genres": "Animation"}
                ]
            }))
        }),
    );

    let gateway = HttpGateway::new(spawn(app).await);
    let movies = gateway.search_movies("up", "Animation").await.unwrap();

    assert_eq!(movies.len(), 3);
    assert_eq!(movies[0].movie_id, "7");
    assert_eq!(movies[0].user_rating, Rating::new(4));
    assert_eq!(movies[1].movie_id, "2355");
    assert_eq!(movies[1].user_rating, Rating::new(3));
    assert_eq!(movies[2].user_rating, None);
}

#[tokio::test]
async fn test_search_with_no_hits() {
    let app = Router::new().route(
        "/search_movies",
        post(|| async { Json(json!({"movies": []})) }),
    );

    let gateway = HttpGateway::new(spawn(app).await);
    let movies = gateway.search_movies("zzzz", "all").await.unwrap();
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_recommendations_submit_one_pair_per_rating() {
    let app = Router::new().route(
        "/get_recommendations",
        post(|Form(fields): Form<HashMap<String, String>>| async move {
            if fields.get("rating_1").map(String::as_str) == Some("5")
                && fields.get("rating_3").map(String::as_str) == Some("3")
                && fields.len() == 2
            {
                Json(json!({
                    "success": true,
                    "recommendations": [
                        {"title": "Up", "genres": "Animation", "score": 4.567}
                    ]
                }))
            } else {
                Json(json!({"success": false, "message": "unexpected form fields"}))
            }
        }),
    );

    let gateway = HttpGateway::new(spawn(app).await);
    let ratings = vec![
        ("1".to_string(), rating(5)),
        ("3".to_string(), rating(3)),
    ];
    let recommendations = gateway.get_recommendations(&ratings).await.unwrap();

    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].title, "Up");
    assert!((recommendations[0].score - 4.567).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_successful_reply_without_recommendations_is_empty() {
    let app = Router::new().route(
        "/get_recommendations",
        post(|| async { Json(json!({"success": true})) }),
    );

    let gateway = HttpGateway::new(spawn(app).await);
    let recommendations = gateway
        .get_recommendations(&[("1".to_string(), rating(4))])
        .await
        .unwrap();

    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn test_recommendations_rejection_carries_message() {
    let app = Router::new().route(
        "/get_recommendations",
        post(|| async { Json(json!({"success": false, "message": "Please rate at least one movie."})) }),
    );

    let gateway = HttpGateway::new(spawn(app).await);
    let err = gateway
        .get_recommendations(&[("1".to_string(), rating(4))])
        .await
        .unwrap_err();

    assert!(
        matches!(err, AppError::Rejected(ref msg) if msg == "Please rate at least one movie.")
    );
}
