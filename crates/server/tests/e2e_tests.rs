//! End-to-end tests with mocked external dependencies.
//!
//! These tests run the full server stack in-process against a temp SQLite
//! database, with mock implementations for the token issuer and the playlist
//! search.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use beerparty_core::playlist::{CatalogTrackEntry, UpstreamError};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use common::{fixtures, TestConfig, TestFixture};

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/config").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["database"]["path"].is_string());
    assert!(response.body.get("spotify").is_none());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("IPA", -7.0, 10.0).await;

    let response = fixture
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("beerparty_http_requests_total"));
    assert!(text.contains("beerparty_beers_in_catalog"));
    // Unlabelled histogram is exported before any party request
    assert!(text.contains("beerparty_candidates_found_count"));
}

// =============================================================================
// Beer CRUD Tests
// =============================================================================

#[tokio::test]
async fn test_create_beer() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post(
            "/beer",
            json!({"beerStyle": "Dunkel", "minTemp": -8, "maxTemp": 2}),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["_id"].is_string());
    assert_eq!(response.body["beerStyle"], "Dunkel");
    assert_eq!(response.body["minTemp"], -8.0);
    assert_eq!(response.body["maxTemp"], 2.0);
    assert!(response.body["createdAt"].is_string());
}

#[tokio::test]
async fn test_list_beers_sorted_by_style() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("Weissbier", -1.0, 3.0).await;
    fixture.create_beer("Brown ale", 0.0, 14.0).await;
    fixture.create_beer("IPA", -7.0, 10.0).await;

    let response = fixture.get("/beer").await;
    assert_eq!(response.status, StatusCode::OK);

    let styles: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["beerStyle"].as_str().unwrap())
        .collect();
    assert_eq!(styles, vec!["Brown ale", "IPA", "Weissbier"]);
}

#[tokio::test]
async fn test_list_beers_empty() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/beer").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_get_beer() {
    let fixture = TestFixture::new().await;
    let id = fixture.create_beer("Pilsens", -2.0, 4.0).await;

    let response = fixture.get(&format!("/beer/{}", id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["_id"], id.as_str());
    assert_eq!(response.body["beerStyle"], "Pilsens");
}

#[tokio::test]
async fn test_get_unknown_beer() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .get("/beer/550e8400-e29b-41d4-a716-446655440000")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Cerveja não encontrada");
}

#[tokio::test]
async fn test_update_beer() {
    let fixture = TestFixture::new().await;
    let id = fixture.create_beer("Red ale", -5.0, 5.0).await;

    let response = fixture
        .put(&format!("/beer/{}", id), json!({"maxTemp": 6}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["beerStyle"], "Red ale");
    assert_eq!(response.body["minTemp"], -5.0);
    assert_eq!(response.body["maxTemp"], 6.0);

    let response = fixture.get(&format!("/beer/{}", id)).await;
    assert_eq!(response.body["maxTemp"], 6.0);
}

#[tokio::test]
async fn test_update_unknown_beer() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .put("/beer/missing", json!({"beerStyle": "Ghost"}))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Cerveja não encontrada");
}

#[tokio::test]
async fn test_update_beer_rejects_unknown_key() {
    let fixture = TestFixture::new().await;
    let id = fixture.create_beer("Red ale", -5.0, 5.0).await;

    let response = fixture
        .put(&format!("/beer/{}", id), json!({"color": "red"}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Chave inválida: color");
}

#[tokio::test]
async fn test_delete_beer() {
    let fixture = TestFixture::new().await;
    let id = fixture.create_beer("Weizenbier", -4.0, 6.0).await;

    let response = fixture.delete(&format!("/beer/{}", id)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = fixture.get(&format!("/beer/{}", id)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = fixture.delete(&format!("/beer/{}", id)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_duplicate_style_fails() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("IPA", -7.0, 10.0).await;

    let response = fixture
        .post("/beer", json!({"beerStyle": "IPA", "minTemp": 0, "maxTemp": 1}))
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Erro ao criar cerveja");
}

// =============================================================================
// Beer Validation Tests
// =============================================================================

#[tokio::test]
async fn test_create_beer_missing_key() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .post("/beer", json!({"beerStyle": "IPA", "minTemp": 5}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Quantidade de chaves inválida");
}

#[tokio::test]
async fn test_create_beer_extra_key() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .post(
            "/beer",
            json!({"beerStyle": "IPA", "minTemp": 5, "maxTemp": 7, "extraKey": "value"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Quantidade de chaves inválida");
}

#[tokio::test]
async fn test_create_beer_wrong_type() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .post("/beer", json!({"beerStyle": "IPA", "minTemp": "5", "maxTemp": 7}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Tipo inválido da chave: minTemp");
}

#[tokio::test]
async fn test_create_beer_malformed_json() {
    let fixture = TestFixture::new().await;
    let response = fixture.post_raw("/beer", "{not json").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}

// =============================================================================
// Party Tests
// =============================================================================

#[tokio::test]
async fn test_party_returns_style_and_playlist() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("IPA", -7.0, 10.0).await;
    fixture.create_beer("Dunkel", -8.0, 2.0).await;
    fixture
        .search
        .add_playlist(
            "IPA",
            "IPA Party",
            vec![fixtures::track_entry(1), fixtures::track_entry(2)],
        )
        .await;

    let response = fixture.post("/party", json!({"temperature": 5})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "beerStyle": "IPA",
            "playlist": {
                "name": "IPA Party",
                "tracks": [
                    {"name": "Track 1", "artist": "Artist 1", "link": "https://open.spotify.com/artist/1"},
                    {"name": "Track 2", "artist": "Artist 2", "link": "https://open.spotify.com/artist/2"}
                ]
            }
        })
    );
}

#[tokio::test]
async fn test_party_tie_picks_first_style() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("Lager", -1.0, 3.0).await;
    fixture.create_beer("IPA", -1.0, 3.0).await;
    fixture.search.add_playlist("IPA", "IPA", vec![]).await;
    fixture.search.add_playlist("Lager", "Lager", vec![]).await;

    let response = fixture.post("/party", json!({"temperature": 2})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["beerStyle"], "IPA");
}

#[tokio::test]
async fn test_party_no_beer() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("IPA", -2.0, 3.0).await;

    let response = fixture.post("/party", json!({"temperature": 10})).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Nenhuma cerveja encontrada");
}

#[tokio::test]
async fn test_party_no_playlist() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("IPA", -2.0, 3.0).await;

    let response = fixture.post("/party", json!({"temperature": 1})).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Nenhuma playlist encontrada para: IPA");
}

#[tokio::test]
async fn test_party_token_failure_is_generic_error() {
    let fixture = TestFixture::with_config(TestConfig::failing_token()).await;
    fixture.create_beer("IPA", -2.0, 3.0).await;
    fixture.search.add_playlist("IPA", "IPA", vec![]).await;

    let response = fixture.post("/party", json!({"temperature": 1})).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"error": "Erro ao buscar cerveja"}));
    assert!(fixture.search.recorded_calls().await.is_empty());
}

#[tokio::test]
async fn test_party_search_failure_hides_detail() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("IPA", -2.0, 3.0).await;
    fixture
        .search
        .set_next_error(UpstreamError::ApiError {
            status: 503,
            message: "upstream secret detail".to_string(),
        })
        .await;

    let response = fixture.post("/party", json!({"temperature": 1})).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"error": "Erro ao buscar cerveja"}));
}

#[tokio::test]
async fn test_party_malformed_track_is_generic_error() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("IPA", -2.0, 3.0).await;
    fixture
        .search
        .add_playlist("IPA", "Broken", vec![CatalogTrackEntry { track: None }])
        .await;

    let response = fixture.post("/party", json!({"temperature": 1})).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Erro ao buscar cerveja");
}

#[tokio::test]
async fn test_party_uses_issued_token() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("IPA", -2.0, 3.0).await;
    fixture.search.add_playlist("IPA", "IPA", vec![]).await;

    fixture.post("/party", json!({"temperature": 1})).await;

    let authorizer = fixture.authorizer.as_ref().unwrap();
    assert_eq!(authorizer.calls().await, 1);
    let calls = fixture.search.recorded_calls().await;
    assert_eq!(calls.len(), 2);
}

#[tokio::test]
async fn test_party_without_playlist_service() {
    let fixture = TestFixture::with_config(TestConfig::without_playlists()).await;
    fixture.create_beer("IPA", -2.0, 3.0).await;

    let response = fixture.post("/party", json!({"temperature": 1})).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.body["error"].is_string());
}

// =============================================================================
// Party Validation Tests
// =============================================================================

#[tokio::test]
async fn test_party_missing_temperature() {
    let fixture = TestFixture::new().await;
    let response = fixture.post("/party", json!({})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Dados inválidos");
}

#[tokio::test]
async fn test_party_temperature_not_number() {
    let fixture = TestFixture::new().await;
    let response = fixture.post("/party", json!({"temperature": "25"})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Temperature deve ser um número");
}

#[tokio::test]
async fn test_party_zero_temperature_is_valid() {
    let fixture = TestFixture::new().await;
    fixture.create_beer("Weissbier", -1.0, 3.0).await;
    fixture.search.add_playlist("Weissbier", "Wheat", vec![]).await;

    let response = fixture.post("/party", json!({"temperature": 0})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["beerStyle"], "Weissbier");
}
