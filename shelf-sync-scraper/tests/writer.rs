mod common;

use common::{ADD_PATH, mount_add_form, mount_login_ok, settings_for};
use shelf_sync_core::{Game, Region};
use shelf_sync_scraper::{BackloggerySession, Credentials, GameWriter, Settings, SyncError};
use tokio::time::{Duration, Instant};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn session_for(server: &MockServer) -> (Settings, BackloggerySession) {
    mount_login_ok(server).await;
    mount_add_form(server).await;
    let settings = settings_for(server);
    let session =
        BackloggerySession::login(&settings, Credentials::new("shelfie", "hunter2".to_string()))
            .await
            .unwrap();
    (settings, session)
}

fn games() -> Vec<Game> {
    vec![
        Game::new("Chrono Trigger", "Super Nintendo Entertainment System", Region::Na),
        Game::new("Sin & Punishment", "Nintendo 64", Region::Japan),
        Game::new("Portal", "Steam", Region::Na),
    ]
}

#[tokio::test]
async fn every_game_is_stealth_saved_once() {
    let server = MockServer::start().await;
    let (settings, session) = session_for(&server).await;

    Mock::given(method("POST"))
        .and(path(ADD_PATH))
        .and(body_string_contains("submit=Stealth+Save"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let mut seen = Vec::new();
    let added = GameWriter::new(&settings)
        .add_games_with_progress(&session, &games(), |i, g| seen.push((i, g.name.clone())))
        .await
        .unwrap();

    assert_eq!(added, 3);
    assert_eq!(
        seen,
        vec![
            (0, "Chrono Trigger".to_string()),
            (1, "Sin & Punishment".to_string()),
            (2, "Portal".to_string()),
        ]
    );
}

#[tokio::test]
async fn form_fields_use_option_values_and_region_codes() {
    let server = MockServer::start().await;
    let (settings, session) = session_for(&server).await;

    Mock::given(method("POST"))
        .and(path(ADD_PATH))
        .and(body_string_contains("name=Sin+%26+Punishment"))
        .and(body_string_contains("console=N64"))
        .and(body_string_contains("region=3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let one = vec![Game::new("Sin & Punishment", "Nintendo 64", Region::Japan)];
    let added = GameWriter::new(&settings)
        .add_games(&session, &one)
        .await
        .unwrap();
    assert_eq!(added, 1);
}

#[tokio::test]
async fn empty_batch_makes_no_requests() {
    let server = MockServer::start().await;
    let (settings, session) = session_for(&server).await;

    Mock::given(method("POST"))
        .and(path(ADD_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let added = GameWriter::new(&settings)
        .add_games(&session, &[])
        .await
        .unwrap();
    assert_eq!(added, 0);
}

#[tokio::test]
async fn failed_submission_stops_the_batch() {
    let server = MockServer::start().await;
    let (settings, session) = session_for(&server).await;

    Mock::given(method("POST"))
        .and(path(ADD_PATH))
        .and(body_string_contains("name=Chrono+Trigger"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ADD_PATH))
        .and(body_string_contains("console=N64"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ADD_PATH))
        .and(body_string_contains("name=Portal"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = GameWriter::new(&settings)
        .add_games(&session, &games())
        .await
        .unwrap_err();

    match &err {
        SyncError::Submission { index, game, reason } => {
            assert_eq!(*index, 1);
            assert_eq!(game.name, "Sin & Punishment");
            assert!(reason.contains("500"));
        }
        other => panic!("expected a submission error, got {other}"),
    }
    assert_eq!(err.added_before_failure(), Some(1));
}

#[tokio::test]
async fn console_missing_from_the_form_is_a_submission_error() {
    let server = MockServer::start().await;
    let (settings, session) = session_for(&server).await;

    Mock::given(method("POST"))
        .and(path(ADD_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let games = vec![Game::new("Tempest 2000", "Atari Jaguar", Region::Na)];
    let err = GameWriter::new(&settings)
        .add_games(&session, &games)
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Submission { index: 0, .. }));
}

#[tokio::test]
async fn submissions_are_paced() {
    let server = MockServer::start().await;
    let (_, session) = session_for(&server).await;

    Mock::given(method("POST"))
        .and(path(ADD_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let start = Instant::now();
    GameWriter::with_delay(Duration::from_millis(100))
        .add_games(&session, &games())
        .await
        .unwrap();
    // Two gaps for three games; none before the first.
    assert!(start.elapsed() >= Duration::from_millis(200));
}
