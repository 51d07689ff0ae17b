mod common;

use std::sync::atomic::Ordering;

use common::{PagedResponder, offer, offers_page, settings_for};
use shelf_sync_scraper::{PricingClient, Settings, SyncError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn two_pages_follow_the_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/offers"))
        .and(query_param("seller", "s1"))
        .and(query_param("status", "collection"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offers_page(
            vec![offer("Super Metroid", "Super Nintendo")],
            Some("abc"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/offers"))
        .and(query_param("seller", "s1"))
        .and(query_param("cursor", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offers_page(
            vec![offer("Halo", "Xbox")],
            None,
        )))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let client = PricingClient::new(&settings_for(&server)).unwrap();
    let offers = client.fetch_all_offers("s1").await.unwrap();

    let names: Vec<&str> = offers.iter().map(|o| o.product_name.as_str()).collect();
    assert_eq!(names, vec!["Super Metroid", "Halo"]);
}

#[tokio::test]
async fn one_request_per_page() {
    let server = MockServer::start().await;
    let pages = vec![
        offers_page(vec![offer("A", "NES")], Some("p2")),
        offers_page(vec![offer("B", "NES"), offer("C", "NES")], Some("p3")),
        offers_page(vec![], Some("p4")),
        offers_page(vec![offer("D", "Wii")], None),
    ];
    let (responder, served) = PagedResponder::new(pages);

    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(responder)
        .expect(4)
        .mount(&server)
        .await;

    let client = PricingClient::new(&settings_for(&server)).unwrap();
    let mut progress = Vec::new();
    let offers = client
        .fetch_all_offers_with_progress("s1", |page, total| progress.push((page, total)))
        .await
        .unwrap();

    assert_eq!(offers.len(), 4);
    assert_eq!(served.load(Ordering::SeqCst), 4);
    assert_eq!(progress, vec![(1, 1), (2, 3), (3, 3), (4, 4)]);
}

#[tokio::test]
async fn empty_string_cursor_ends_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(offers_page(vec![offer("Zelda", "NES")], Some(""))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = PricingClient::new(&settings_for(&server)).unwrap();
    let offers = client.fetch_all_offers("s1").await.unwrap();
    assert_eq!(offers.len(), 1);
}

#[tokio::test]
async fn endless_cursor_hits_the_page_ceiling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(offers_page(vec![], Some("again"))),
        )
        .expect(3)
        .mount(&server)
        .await;

    let settings = Settings {
        max_pages: 3,
        ..settings_for(&server)
    };
    let client = PricingClient::new(&settings).unwrap();
    let err = client.fetch_all_offers("s1").await.unwrap_err();

    assert!(matches!(err, SyncError::Network(ref m) if m.contains("page ceiling")));
}

#[tokio::test]
async fn non_json_body_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = PricingClient::new(&settings_for(&server)).unwrap();
    let err = client.fetch_all_offers("s1").await.unwrap_err();
    assert!(err.is_network(), "unexpected error: {err}");
}

#[tokio::test]
async fn server_error_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let client = PricingClient::new(&settings_for(&server)).unwrap();
    let err = client.fetch_all_offers("s1").await.unwrap_err();
    assert!(matches!(err, SyncError::Network(_)), "unexpected error: {err}");
}
