//! Shared fixtures for the wiremock-backed integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use shelf_sync_scraper::Settings;
use tokio::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const LOGIN_PATH: &str = "/!/login";
pub const ADD_PATH: &str = "/!/add";

/// Settings pointing both sites at the mock server, with no pacing delay.
pub fn settings_for(server: &MockServer) -> Settings {
    Settings {
        pricecharting_url: server.uri(),
        backloggery_url: server.uri(),
        submit_delay: Duration::ZERO,
        login_timeout: Duration::from_secs(2),
        ..Settings::default()
    }
}

pub fn offer(name: &str, console: &str) -> Value {
    json!({ "product-name": name, "console-name": console, "price": "12.00" })
}

pub fn offers_page(offers: Vec<Value>, cursor: Option<&str>) -> Value {
    json!({ "offers": offers, "cursor": cursor })
}

pub fn library_payload(entries: &[(&str, &str)]) -> Value {
    let payload: Vec<Value> = entries
        .iter()
        .map(|(title, platform)| json!({ "title": title, "platform_title": platform, "status": 1 }))
        .collect();
    json!({ "payload": payload })
}

/// Serves canned pages in order; requests past the end get an empty last page.
pub struct PagedResponder {
    pages: Vec<Value>,
    served: Arc<AtomicUsize>,
}

impl PagedResponder {
    pub fn new(pages: Vec<Value>) -> (Self, Arc<AtomicUsize>) {
        let served = Arc::new(AtomicUsize::new(0));
        (
            Self {
                pages,
                served: served.clone(),
            },
            served,
        )
    }
}

impl Respond for PagedResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let i = self.served.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(i) {
            Some(page) => ResponseTemplate::new(200).set_body_json(page.clone()),
            None => ResponseTemplate::new(200).set_body_json(offers_page(vec![], None)),
        }
    }
}

/// Login that redirects to the user's page.
pub async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(303).insert_header("Location", "/shelfie"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/shelfie"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>shelfie's games</h1>"))
        .mount(server)
        .await;
}

/// Login that re-renders the login page.
pub async fn mount_login_rejected(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Invalid login</p>"))
        .mount(server)
        .await;
}

pub const ADD_FORM: &str = r#"
<form method="post">
  <input type="text" name="name">
  <select name="console">
    <option value="">Choose a console</option>
    <option value="SNES">Super Nintendo Entertainment System</option>
    <option value="N64">Nintendo 64</option>
    <option value="Steam">Steam</option>
    <option value="Xbox">Xbox</option>
  </select>
  <select name="region">
    <option value="1">Free</option>
    <option value="2">NA</option>
    <option value="3">Japan</option>
    <option value="4">PAL</option>
  </select>
  <button name="submit" value="Stealth Save">Stealth Save</button>
</form>
"#;

pub async fn mount_add_form(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(ADD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(ADD_FORM))
        .mount(server)
        .await;
}
