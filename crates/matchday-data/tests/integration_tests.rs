//! End-to-end tests for the mutation gateway and the REST backend.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use matchday_cache::TagCache;
use matchday_data::entities::{
    Club, Event, Game, GamePatch, NewClub, NewEvent, NewGame, NewNews, NewPlayer, News, Player,
};
use matchday_data::{
    BackendConfig, DataError, HttpBackend, MemoryBackend, MutationGateway, MutationOp, ReadStore,
    SelectQuery, TableBackend,
};

fn gateway_with_cache() -> (MutationGateway, Arc<MemoryBackend>, Arc<TagCache>) {
    let backend = Arc::new(MemoryBackend::new());
    let cache = Arc::new(TagCache::in_memory());
    let gateway = MutationGateway::new(
        Arc::clone(&backend) as Arc<dyn TableBackend>,
        Arc::clone(&cache),
    );
    (gateway, backend, cache)
}

async fn prime(cache: &TagCache, keys: &[&str]) {
    for key in keys {
        cache.set(key, &json!([])).await.unwrap();
    }
}

#[tokio::test]
async fn created_news_gets_an_id_and_keeps_its_fields() {
    let (gateway, _, _) = gateway_with_cache();
    let article: News = gateway
        .create(&NewNews::new("Cup final set", "The final will be played in May."))
        .await
        .unwrap();
    assert!(!article.id.is_nil());
    assert_eq!(article.title, "Cup final set");
    assert_eq!(article.content, "The final will be played in May.");
}

#[tokio::test]
async fn removing_a_missing_club_reports_the_table() {
    let (gateway, _, _) = gateway_with_cache();
    let err = gateway.remove::<Club>(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.table(), Some("clubs"));
    assert!(matches!(
        err,
        DataError::Mutation {
            op: MutationOp::Delete,
            ..
        }
    ));
}

#[tokio::test]
async fn game_result_invalidates_games_and_competitions_only() {
    let (gateway, backend, cache) = gateway_with_cache();
    let game_id = Uuid::new_v4();
    backend
        .seed(
            "games",
            vec![json!({
                "id": game_id,
                "competition_id": Uuid::new_v4(),
                "home_team_id": Uuid::new_v4(),
                "away_team_id": Uuid::new_v4(),
                "kickoff_at": Utc::now(),
                "home_score": null,
                "away_score": null,
                "status": "live",
                "created_at": Utc::now(),
            })],
        )
        .await;
    prime(&cache, &["games", "competitions", "news", "teams", "clubs"]).await;

    let updated: Game = gateway
        .update(game_id, &GamePatch::result(3, 1))
        .await
        .unwrap();
    assert_eq!(updated.home_score, Some(3));

    assert!(!cache.contains("games").await.unwrap());
    assert!(!cache.contains("competitions").await.unwrap());
    assert!(cache.contains("news").await.unwrap());
    assert!(cache.contains("teams").await.unwrap());
    assert!(cache.contains("clubs").await.unwrap());
}

#[tokio::test]
async fn player_creation_invalidates_players_and_teams_only() {
    let (gateway, _, cache) = gateway_with_cache();
    prime(&cache, &["players", "teams", "games", "competitions"]).await;

    let _: Player = gateway.create(&NewPlayer::new("Ana", "Silva")).await.unwrap();

    assert!(!cache.contains("players").await.unwrap());
    assert!(!cache.contains("teams").await.unwrap());
    assert!(cache.contains("games").await.unwrap());
    assert!(cache.contains("competitions").await.unwrap());
}

#[tokio::test]
async fn event_creation_invalidates_only_events() {
    let (gateway, _, cache) = gateway_with_cache();
    prime(&cache, &["events", "news", "games"]).await;

    let _: Event = gateway
        .create(&NewEvent::new("AGM", "Annual general meeting", Utc::now()))
        .await
        .unwrap();

    assert!(!cache.contains("events").await.unwrap());
    assert!(cache.contains("news").await.unwrap());
    assert!(cache.contains("games").await.unwrap());
}

#[tokio::test]
async fn mutation_that_exceeds_the_deadline_times_out() {
    struct StallingBackend;

    #[async_trait::async_trait]
    impl TableBackend for StallingBackend {
        async fn select(
            &self,
            _table: &str,
            _query: &SelectQuery,
        ) -> matchday_data::BackendResult<Vec<serde_json::Value>> {
            Ok(vec![])
        }
        async fn insert(
            &self,
            _table: &str,
            _row: serde_json::Value,
        ) -> matchday_data::BackendResult<serde_json::Value> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(json!({}))
        }
        async fn update_by_id(
            &self,
            table: &str,
            id: &str,
            _patch: serde_json::Value,
        ) -> matchday_data::BackendResult<serde_json::Value> {
            Err(matchday_data::BackendError::not_found(table, id))
        }
        async fn delete_by_id(
            &self,
            table: &str,
            id: &str,
        ) -> matchday_data::BackendResult<()> {
            Err(matchday_data::BackendError::not_found(table, id))
        }
    }

    let gateway = MutationGateway::new(Arc::new(StallingBackend), Arc::new(TagCache::in_memory()))
        .with_deadline(Duration::from_millis(20));

    let err = gateway
        .create::<Club>(&NewClub::new("FC Example", "Capital"))
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::Timeout { table: "clubs", .. }));
}

#[tokio::test]
async fn cancelling_mid_flight_aborts_the_mutation() {
    let (gateway, _, cache) = gateway_with_cache();
    prime(&cache, &["clubs"]).await;
    let token = CancellationToken::new();
    let gateway = gateway.with_cancellation(token.clone());

    token.cancel();
    let err = gateway
        .create::<Club>(&NewClub::new("FC Example", "Capital"))
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::Cancelled { table: "clubs" }));
    assert!(cache.contains("clubs").await.unwrap());
}

#[tokio::test]
async fn gateway_and_reads_share_invalidation() {
    let backend = Arc::new(MemoryBackend::new());
    let cache = Arc::new(TagCache::in_memory());
    let gateway = MutationGateway::new(
        Arc::clone(&backend) as Arc<dyn TableBackend>,
        Arc::clone(&cache),
    );
    let reads = ReadStore::new(
        Arc::clone(&backend) as Arc<dyn TableBackend>,
        Arc::clone(&cache),
    );

    let _: News = gateway
        .create(&NewNews::new("First", "Body one"))
        .await
        .unwrap();
    let listed: Vec<News> = reads.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(cache.contains("news").await.unwrap());

    let _: News = gateway
        .create(&NewNews::new("Second", "Body two"))
        .await
        .unwrap();
    assert!(!cache.contains("news").await.unwrap());
    let refreshed: Vec<News> = reads.list().await.unwrap();
    assert_eq!(refreshed.len(), 2);
}

// REST backend against a mock server.

fn http_backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(
        BackendConfig::new(server.uri() + "/")
            .with_api_key("service-key")
            .with_retry_count(0),
    )
    .unwrap()
}

#[tokio::test]
async fn http_select_sends_filters_and_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/news"))
        .and(query_param("status", "eq.published"))
        .and(header("apikey", "service-key"))
        .and(header("authorization", "Bearer service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "1"}])))
        .mount(&server)
        .await;

    let backend = http_backend(&server);
    let rows = backend
        .select("news", &SelectQuery::new().filter("status", "published"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn http_insert_returns_the_stored_representation() {
    let server = MockServer::start().await;
    let stored = json!({"id": Uuid::new_v4(), "name": "FC Example", "city": "Capital"});
    Mock::given(method("POST"))
        .and(path("/rest/clubs"))
        .and(header("prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([stored])))
        .mount(&server)
        .await;

    let backend = http_backend(&server);
    let row = backend
        .insert("clubs", json!({"name": "FC Example", "city": "Capital"}))
        .await
        .unwrap();
    assert_eq!(row["name"], "FC Example");
}

#[tokio::test]
async fn http_update_of_missing_row_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/clubs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let backend = http_backend(&server);
    let err = backend
        .update_by_id("clubs", "missing", json!({"city": "New Town"}))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn http_server_error_carries_the_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/news"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let backend = http_backend(&server);
    let err = backend.select("news", &SelectQuery::new()).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.code.as_deref(), Some("503"));
}

#[tokio::test]
async fn http_retries_transient_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/news"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut config = BackendConfig::new(server.uri() + "/")
        .with_retry_count(2)
        .with_timeout(Duration::from_secs(5));
    config.retry_delay = Duration::from_millis(10);
    let backend = HttpBackend::new(config).unwrap();
    let rows = backend.select("news", &SelectQuery::new()).await.unwrap();
    assert!(rows.is_empty());
}
