use axum_test::TestServer;
use serde_json::{json, Value};
use watchlog_server::routes::build_router;
use watchlog_server::state::AppState;

/// Create a test server with an in-memory SQLite database.
async fn test_app() -> TestServer {
    let pool = watchlog_db::connect(":memory:").await.unwrap();
    watchlog_db::migrate::run(&pool).await.unwrap();

    let state = AppState { db: pool };
    let app = build_router(state);
    TestServer::new(app).unwrap()
}

/// Helper: create a media row and return its id.
async fn create_media(server: &TestServer, kind: &str, title: &str) -> i64 {
    let resp = server
        .post("/api/v1/media")
        .json(&json!({ "type": kind, "original_title": title }))
        .await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = resp.json();
    body["id"].as_i64().unwrap()
}

/// Helper: create a channel and return its id.
async fn create_channel(server: &TestServer, id: &str, name: &str) -> String {
    let resp = server
        .post("/api/v1/youtube/channels")
        .json(&json!({
            "id": id,
            "name": name,
            "url": format!("https://youtube.com/channel/{id}"),
        }))
        .await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    id.to_string()
}

/// Helper: create a video under a channel and return its id.
async fn create_video(server: &TestServer, id: &str, channel_id: &str, title: &str) -> String {
    let resp = server
        .post("/api/v1/youtube/videos")
        .json(&json!({ "id": id, "channel_id": channel_id, "title": title }))
        .await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    id.to_string()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = test_app().await;
    let resp = server.get("/health").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let pool = watchlog_db::connect(":memory:").await.unwrap();
    watchlog_db::migrate::run(&pool).await.unwrap();
    watchlog_db::migrate::run(&pool).await.unwrap();
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

#[tokio::test]
async fn media_create_and_get_round_trip() {
    let server = test_app().await;
    let resp = server
        .post("/api/v1/media")
        .json(&json!({
            "type": "movie",
            "original_title": "Arrival",
            "tmdb_id": 329865,
            "release_date": "2016-11-11",
        }))
        .await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    let created: Value = resp.json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["type"], "movie");
    assert_eq!(created["original_title"], "Arrival");

    let resp = server.get(&format!("/api/v1/media/{id}")).await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["id"].as_i64().unwrap(), id);
    assert_eq!(body["type"], "movie");
    assert_eq!(body["tmdb_id"].as_i64().unwrap(), 329865);
    assert_eq!(body["release_date"], "2016-11-11");
    // basic view carries no nested collections
    assert!(body.get("translations").is_none());
    assert!(body.get("visualizations").is_none());
}

#[tokio::test]
async fn media_basic_and_full_views() {
    let server = test_app().await;
    let id = create_media(&server, "movie", "Arrival").await;

    server
        .post("/api/v1/media/translations")
        .json(&json!({ "media_id": id, "language_code": "es", "title": "La llegada" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    server
        .post("/api/v1/media/visualizations")
        .json(&json!({ "media_id": id, "visualization_date": "2024-03-01" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let resp = server.get(&format!("/api/v1/media/{id}?view=full")).await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["original_title"], "Arrival");
    let translations = body["translations"].as_array().unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0]["language_code"], "es");
    assert_eq!(translations[0]["title"], "La llegada");
    let visualizations = body["visualizations"].as_array().unwrap();
    assert_eq!(visualizations.len(), 1);
    assert_eq!(visualizations[0]["visualization_date"], "2024-03-01");

    // with_translations view carries only translations
    let resp = server
        .get(&format!("/api/v1/media/{id}?view=with_translations"))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert!(body.get("translations").is_some());
    assert!(body.get("visualizations").is_none());
}

#[tokio::test]
async fn media_full_with_tv_show_episodes_view() {
    let server = test_app().await;
    let show_id = create_media(&server, "tv_show", "Severance").await;

    server
        .post("/api/v1/media/tv_show_episodes")
        .json(&json!({
            "tv_show_id": show_id,
            "season_num": 1,
            "episode_num": 1,
            "original_title": "Good News About Hell",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let resp = server
        .get(&format!(
            "/api/v1/media/{show_id}?view=full_with_tv_show_episodes"
        ))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    let episodes = body["tv_show_episodes"].as_array().unwrap();
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0]["original_title"], "Good News About Hell");
}

#[tokio::test]
async fn media_list_filters_by_type_and_paginates() {
    let server = test_app().await;
    for i in 0..5 {
        create_media(&server, "movie", &format!("Movie {i}")).await;
    }
    create_media(&server, "tv_show", "Some Show").await;

    let resp = server.get("/api/v1/media?media_type=movie").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body.as_array().unwrap().len(), 5);

    let resp = server.get("/api/v1/media?offset=2&limit=2").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    let page = body.as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["original_title"], "Movie 2");
    assert_eq!(page[1]["original_title"], "Movie 3");
}

#[tokio::test]
async fn media_partial_update_preserves_other_fields() {
    let server = test_app().await;
    let resp = server
        .post("/api/v1/media")
        .json(&json!({
            "type": "movie",
            "original_title": "Dune",
            "tmdb_id": 438631,
            "release_date": "2021-10-22",
        }))
        .await;
    let id = resp.json::<Value>()["id"].as_i64().unwrap();

    let resp = server
        .put(&format!("/api/v1/media/{id}"))
        .json(&json!({ "original_title": "Dune: Part One" }))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["original_title"], "Dune: Part One");
    assert_eq!(body["tmdb_id"].as_i64().unwrap(), 438631);
    assert_eq!(body["release_date"], "2021-10-22");
    assert_eq!(body["type"], "movie");
}

#[tokio::test]
async fn update_with_explicit_null_clears_nullable_fields() {
    let server = test_app().await;
    let resp = server
        .post("/api/v1/media")
        .json(&json!({
            "type": "movie",
            "original_title": "Dune",
            "tmdb_id": 438631,
            "release_date": "2021-10-22",
        }))
        .await;
    let id = resp.json::<Value>()["id"].as_i64().unwrap();

    // absent field: untouched
    let resp = server
        .put(&format!("/api/v1/media/{id}"))
        .json(&json!({ "original_title": "Dune: Part One" }))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["release_date"], "2021-10-22");

    // explicit null: cleared, other fields untouched
    let resp = server
        .put(&format!("/api/v1/media/{id}"))
        .json(&json!({ "release_date": null }))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert!(body["release_date"].is_null());
    assert_eq!(body["tmdb_id"].as_i64().unwrap(), 438631);
    assert_eq!(body["original_title"], "Dune: Part One");
}

#[tokio::test]
async fn update_with_null_resume_marks_fully_watched() {
    let server = test_app().await;
    let id = create_media(&server, "movie", "Arrival").await;
    let resp = server
        .post("/api/v1/media/visualizations")
        .json(&json!({ "media_id": id, "visualization_date": "2024-03-01", "resume": 120 }))
        .await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    let viz_id = resp.json::<Value>()["id"].as_i64().unwrap();

    // updating another field leaves the resume point alone
    let resp = server
        .put(&format!("/api/v1/media/visualizations/{viz_id}"))
        .json(&json!({ "visualization_date": "2024-03-02" }))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["resume"].as_i64().unwrap(), 120);

    // an explicit null persists NULL: watched to the end
    let resp = server
        .put(&format!("/api/v1/media/visualizations/{viz_id}"))
        .json(&json!({ "resume": null }))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert!(body["resume"].is_null());
}

#[tokio::test]
async fn update_with_null_position_unpins_playlist_link() {
    let server = test_app().await;
    let channel = create_channel(&server, "UC9", "Maker").await;
    create_video(&server, "v1", &channel, "One").await;
    server
        .post("/api/v1/youtube/playlists")
        .json(&json!({
            "id": "PL1",
            "channel_id": channel,
            "title": "Pinned",
            "url": "https://youtube.com/playlist?list=PL1",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    let resp = server
        .post("/api/v1/youtube/playlists_videos")
        .json(&json!({ "playlist_id": "PL1", "video_id": "v1", "position": 3 }))
        .await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    let link_id = resp.json::<Value>()["id"].as_i64().unwrap();

    let resp = server
        .put(&format!("/api/v1/youtube/playlists_videos/{link_id}"))
        .json(&json!({ "position": null }))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert!(body["position"].is_null());
}

#[tokio::test]
async fn media_delete_then_get_returns_not_found() {
    let server = test_app().await;
    let id = create_media(&server, "movie", "Ephemeral").await;

    server
        .delete(&format!("/api/v1/media/{id}"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    let resp = server.get(&format!("/api/v1/media/{id}")).await;
    resp.assert_status(axum::http::StatusCode::NOT_FOUND);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn unknown_media_id_returns_not_found() {
    let server = test_app().await;
    let resp = server.get("/api/v1/media/9999").await;
    resp.assert_status(axum::http::StatusCode::NOT_FOUND);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "not_found");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("9999"));
}

#[tokio::test]
async fn negative_offset_is_rejected() {
    let server = test_app().await;
    let resp = server.get("/api/v1/media?offset=-1").await;
    resp.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn invalid_release_date_is_rejected() {
    let server = test_app().await;
    let resp = server
        .post("/api/v1/media")
        .json(&json!({
            "type": "movie",
            "original_title": "Bad Date",
            "release_date": "not-a-date",
        }))
        .await;
    resp.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

// ---------------------------------------------------------------------------
// Media translations and visualizations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn translation_with_media_view_nests_parent() {
    let server = test_app().await;
    let id = create_media(&server, "movie", "Arrival").await;
    server
        .post("/api/v1/media/translations")
        .json(&json!({ "media_id": id, "language_code": "it", "title": "Arrival" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let resp = server
        .get(&format!(
            "/api/v1/media/translations/{id}?language_code=it&view=with_media"
        ))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["language_code"], "it");
    assert_eq!(body["media"]["original_title"], "Arrival");
}

#[tokio::test]
async fn translation_get_without_language_code_matches_any() {
    let server = test_app().await;
    let id = create_media(&server, "movie", "Arrival").await;
    server
        .post("/api/v1/media/translations")
        .json(&json!({ "media_id": id, "language_code": "fr", "title": "Premier contact" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let resp = server.get(&format!("/api/v1/media/translations/{id}")).await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["media_id"].as_i64().unwrap(), id);
    assert_eq!(body["language_code"], "fr");
}

#[tokio::test]
async fn translation_update_and_delete_address_composite_key() {
    let server = test_app().await;
    let id = create_media(&server, "movie", "Arrival").await;
    server
        .post("/api/v1/media/translations")
        .json(&json!({ "media_id": id, "language_code": "de", "title": "Arrival" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let resp = server
        .put(&format!(
            "/api/v1/media/translations/{id}?language_code=de"
        ))
        .json(&json!({ "title": "Die Ankunft" }))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["title"], "Die Ankunft");
    assert_eq!(body["language_code"], "de");

    server
        .delete(&format!(
            "/api/v1/media/translations/{id}?language_code=de"
        ))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    let resp = server
        .get(&format!(
            "/api/v1/media/translations/{id}?language_code=de"
        ))
        .await;
    resp.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn visualization_resume_below_one_is_rejected() {
    let server = test_app().await;
    let id = create_media(&server, "movie", "Arrival").await;
    let resp = server
        .post("/api/v1/media/visualizations")
        .json(&json!({ "media_id": id, "visualization_date": "2024-03-01", "resume": 0 }))
        .await;
    resp.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn visualization_with_media_view() {
    let server = test_app().await;
    let id = create_media(&server, "movie", "Arrival").await;
    let resp = server
        .post("/api/v1/media/visualizations")
        .json(&json!({ "media_id": id, "visualization_date": "2024-03-01", "resume": 42 }))
        .await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    let viz_id = resp.json::<Value>()["id"].as_i64().unwrap();

    let resp = server
        .get(&format!(
            "/api/v1/media/visualizations/{viz_id}?view=with_media"
        ))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["resume"].as_i64().unwrap(), 42);
    assert_eq!(body["media"]["original_title"], "Arrival");
}

// ---------------------------------------------------------------------------
// TV show episodes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn episode_full_view_nests_everything() {
    let server = test_app().await;
    let show_id = create_media(&server, "tv_show", "Severance").await;

    let resp = server
        .post("/api/v1/media/tv_show_episodes")
        .json(&json!({
            "tv_show_id": show_id,
            "season_num": 1,
            "episode_num": 2,
            "original_title": "Half Loop",
        }))
        .await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    let episode_id = resp.json::<Value>()["id"].as_i64().unwrap();

    server
        .post("/api/v1/media/tv_show_episodes/translations")
        .json(&json!({ "episode_id": episode_id, "language_code": "es", "title": "Medio bucle" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    server
        .post("/api/v1/media/tv_show_episodes/visualizations")
        .json(&json!({ "episode_id": episode_id, "visualization_date": "2024-04-05" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let resp = server
        .get(&format!(
            "/api/v1/media/tv_show_episodes/{episode_id}?view=full"
        ))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["original_title"], "Half Loop");
    assert_eq!(body["translations"].as_array().unwrap().len(), 1);
    assert_eq!(body["visualizations"].as_array().unwrap().len(), 1);

    let resp = server
        .get(&format!(
            "/api/v1/media/tv_show_episodes/{episode_id}?view=with_tv_show"
        ))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["tv_show"]["original_title"], "Severance");
}

#[tokio::test]
async fn episode_list_paginates_in_insertion_order() {
    let server = test_app().await;
    let show = create_media(&server, "tv_show", "Show A").await;
    for n in 1..=4 {
        server
            .post("/api/v1/media/tv_show_episodes")
            .json(&json!({
                "tv_show_id": show,
                "episode_num": n,
                "original_title": format!("Episode {n}"),
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let resp = server
        .get("/api/v1/media/tv_show_episodes?offset=1&limit=2")
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    let page = body.as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["original_title"], "Episode 2");
    assert_eq!(page[1]["original_title"], "Episode 3");
}

// ---------------------------------------------------------------------------
// YouTube
// ---------------------------------------------------------------------------

#[tokio::test]
async fn channel_full_view_nests_videos_and_playlists() {
    let server = test_app().await;
    let channel = create_channel(&server, "UC123", "Test Channel").await;
    create_video(&server, "vid1", &channel, "First Video").await;
    server
        .post("/api/v1/youtube/playlists")
        .json(&json!({
            "id": "PL1",
            "channel_id": channel,
            "title": "Favorites",
            "url": "https://youtube.com/playlist?list=PL1",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let resp = server
        .get(&format!("/api/v1/youtube/channels/{channel}?view=full"))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["name"], "Test Channel");
    assert_eq!(body["videos"].as_array().unwrap().len(), 1);
    assert_eq!(body["playlists"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn videos_sort_by_title_in_both_directions() {
    let server = test_app().await;
    let channel = create_channel(&server, "UC123", "Test Channel").await;
    create_video(&server, "v1", &channel, "Banana").await;
    create_video(&server, "v2", &channel, "Apple").await;
    create_video(&server, "v3", &channel, "Cherry").await;

    let resp = server.get("/api/v1/youtube/videos").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Apple", "Banana", "Cherry"]);

    let resp = server.get("/api/v1/youtube/videos?order=desc").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Cherry", "Banana", "Apple"]);
}

#[tokio::test]
async fn video_with_channel_view() {
    let server = test_app().await;
    let channel = create_channel(&server, "UC9", "Maker").await;
    create_video(&server, "vX", &channel, "Build Log").await;

    let resp = server
        .get("/api/v1/youtube/videos/vX?view=with_channel")
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["title"], "Build Log");
    assert_eq!(body["channel"]["name"], "Maker");
}

#[tokio::test]
async fn video_visualization_round_trip() {
    let server = test_app().await;
    let channel = create_channel(&server, "UC9", "Maker").await;
    create_video(&server, "vX", &channel, "Build Log").await;

    let resp = server
        .post("/api/v1/youtube/videos/visualizations")
        .json(&json!({ "video_id": "vX", "visualization_date": "2024-05-20", "resume": 90 }))
        .await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    let viz_id = resp.json::<Value>()["id"].as_i64().unwrap();

    let resp = server
        .get(&format!(
            "/api/v1/youtube/videos/visualizations/{viz_id}?view=with_video"
        ))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["resume"].as_i64().unwrap(), 90);
    assert_eq!(body["video"]["title"], "Build Log");

    let resp = server
        .get("/api/v1/youtube/videos/vX?view=with_visualizations")
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["visualizations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn playlist_videos_order_by_position() {
    let server = test_app().await;
    let channel = create_channel(&server, "UC9", "Maker").await;
    create_video(&server, "v1", &channel, "Zeta").await;
    create_video(&server, "v2", &channel, "Alpha").await;
    server
        .post("/api/v1/youtube/playlists")
        .json(&json!({
            "id": "PL1",
            "channel_id": channel,
            "title": "Ordered",
            "url": "https://youtube.com/playlist?list=PL1",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    server
        .post("/api/v1/youtube/playlists_videos")
        .json(&json!({ "playlist_id": "PL1", "video_id": "v1", "position": 2 }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    server
        .post("/api/v1/youtube/playlists_videos")
        .json(&json!({ "playlist_id": "PL1", "video_id": "v2", "position": 1 }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let resp = server
        .get("/api/v1/youtube/playlists/PL1?view=with_videos")
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    let videos = body["videos"].as_array().unwrap();
    assert_eq!(videos[0]["video"]["title"], "Alpha");
    assert_eq!(videos[0]["position"].as_i64().unwrap(), 1);
    assert_eq!(videos[1]["video"]["title"], "Zeta");
}

#[tokio::test]
async fn duplicate_playlist_position_is_a_storage_error() {
    let server = test_app().await;
    let channel = create_channel(&server, "UC9", "Maker").await;
    create_video(&server, "v1", &channel, "One").await;
    create_video(&server, "v2", &channel, "Two").await;
    server
        .post("/api/v1/youtube/playlists")
        .json(&json!({
            "id": "PL1",
            "channel_id": channel,
            "title": "Clashing",
            "url": "https://youtube.com/playlist?list=PL1",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    server
        .post("/api/v1/youtube/playlists_videos")
        .json(&json!({ "playlist_id": "PL1", "video_id": "v1", "position": 1 }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let resp = server
        .post("/api/v1/youtube/playlists_videos")
        .json(&json!({ "playlist_id": "PL1", "video_id": "v2", "position": 1 }))
        .await;
    resp.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "storage_error");
}

#[tokio::test]
async fn unpositioned_playlist_links_are_allowed_in_bulk() {
    let server = test_app().await;
    let channel = create_channel(&server, "UC9", "Maker").await;
    create_video(&server, "v1", &channel, "One").await;
    create_video(&server, "v2", &channel, "Two").await;
    server
        .post("/api/v1/youtube/playlists")
        .json(&json!({
            "id": "PL1",
            "channel_id": channel,
            "title": "Loose",
            "url": "https://youtube.com/playlist?list=PL1",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    // several NULL positions must not trip the uniqueness constraint
    for video in ["v1", "v2"] {
        server
            .post("/api/v1/youtube/playlists_videos")
            .json(&json!({ "playlist_id": "PL1", "video_id": video }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }
}

#[tokio::test]
async fn channel_delete_with_videos_is_a_storage_error() {
    let server = test_app().await;
    let channel = create_channel(&server, "UCgone", "Short Lived").await;
    create_video(&server, "vgone", &channel, "Orphan").await;

    // foreign_keys is ON and videos still reference the channel
    let resp = server
        .delete(&format!("/api/v1/youtube/channels/{channel}"))
        .await;
    resp.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "storage_error");

    // after removing the video the channel can go
    server
        .delete("/api/v1/youtube/videos/vgone")
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);
    server
        .delete(&format!("/api/v1/youtube/channels/{channel}"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);
}
