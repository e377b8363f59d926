#![allow(dead_code)]
use hackernews_client::{ClientConfig, HackerNewsClient, HackerNewsClientImpl};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A request as one of the test servers saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub path: String,
    pub cookie: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    fn from_wiremock(request: &wiremock::Request) -> Self {
        Self {
            method: request.method.to_string(),
            // wiremock fills in `http://localhost` for origin-form requests;
            // restore the authority the client actually addressed.
            url: match request.headers.get("host").and_then(|v| v.to_str().ok()) {
                Some(host) => format!(
                    "{}://{}{}{}",
                    request.url.scheme(),
                    host,
                    request.url.path(),
                    request.url.query().map(|q| format!("?{q}")).unwrap_or_default()
                ),
                None => request.url.to_string(),
            },
            path: request.url.path().to_string(),
            cookie: request
                .headers
                .get("cookie")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            body: String::from_utf8_lossy(&request.body).into_owned(),
        }
    }

    /// Decode a urlencoded form body into ordered pairs
    pub fn form(&self) -> Vec<(String, String)> {
        self.body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (
                    urlencoding::decode(key).unwrap().into_owned(),
                    urlencoding::decode(value).unwrap().into_owned(),
                )
            })
            .collect()
    }

    pub fn form_value(&self, name: &str) -> Option<String> {
        self.form()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// A local stand-in for the site: one server for pages and forms, one for the JSON API.
///
/// Every mounted response answers exactly one request, in mount order; anything
/// unscripted gets wiremock's 404.
pub struct TestSite {
    pub web: MockServer,
    pub api: MockServer,
}

impl TestSite {
    pub async fn start() -> Self {
        Self {
            web: MockServer::start().await,
            api: MockServer::start().await,
        }
    }

    pub fn web_url(&self) -> String {
        self.web.uri()
    }

    pub fn api_url(&self) -> String {
        format!("{}/v0", self.api.uri())
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_web_base_url(self.web_url())
            .with_api_base_url(self.api_url())
            .with_debug_save_responses(false)
    }

    pub fn client(&self) -> HackerNewsClientImpl {
        HackerNewsClientImpl::with_config(
            Box::new(http_client::native::NativeClient::new()),
            self.config(),
        )
    }

    /// A client that already logged in as `alice`
    pub async fn logged_in_client(&self) -> HackerNewsClientImpl {
        self.mount_login("alice", login_ok("user=alice&s3ss10n")).await;
        let mut client = self.client();
        client
            .login("alice", "goodpw")
            .await
            .expect("login against the test site should succeed");
        client
    }

    /// Answer the next login attempt for `username`
    pub async fn mount_login(&self, username: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_string_contains(format!("acct={username}")))
            .respond_with(response)
            .up_to_n_times(1)
            .mount(&self.web)
            .await;
    }

    /// Answer the next GET of `page`
    pub async fn mount_page(&self, page: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(response)
            .up_to_n_times(1)
            .mount(&self.web)
            .await;
    }

    /// Answer the next GET of `/item?id={id}`
    pub async fn mount_item_page(&self, id: u64, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/item"))
            .and(query_param("id", id.to_string()))
            .respond_with(response)
            .up_to_n_times(1)
            .mount(&self.web)
            .await;
    }

    /// Answer the next form POST to `target`
    pub async fn mount_post(&self, target: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(target))
            .respond_with(response)
            .up_to_n_times(1)
            .mount(&self.web)
            .await;
    }

    /// Answer the next GET of an API resource such as `/item/1.json`
    pub async fn mount_json(&self, resource: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/v0{resource}")))
            .respond_with(response)
            .up_to_n_times(1)
            .mount(&self.api)
            .await;
    }

    pub async fn web_requests(&self) -> Vec<RecordedRequest> {
        recorded(&self.web).await
    }

    pub async fn api_requests(&self) -> Vec<RecordedRequest> {
        recorded(&self.api).await
    }
}

pub async fn recorded(server: &MockServer) -> Vec<RecordedRequest> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(RecordedRequest::from_wiremock)
        .collect()
}

pub fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "text/html; charset=utf-8")
        .set_body_string(body)
}

pub fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "application/json")
        .set_body_string(body)
}

pub fn redirect(location: &str) -> ResponseTemplate {
    ResponseTemplate::new(302).insert_header("Location", location)
}

pub fn login_ok(cookie: &str) -> ResponseTemplate {
    redirect("news").insert_header(
        "Set-Cookie",
        format!("{cookie}; expires=Fri, 01 Jan 2100 00:00:00 GMT; path=/").as_str(),
    )
}

pub fn submit_page(token: &str) -> String {
    format!(
        r#"<html><body><form action="r" method="post">
        <input type="hidden" name="fnid" value="{token}">
        <input type="hidden" name="fnop" value="submit-page">
        <input type="text" name="title"><input type="url" name="url">
        <textarea name="text"></textarea>
        </form></body></html>"#
    )
}

pub fn item_page(id: u64, token: Option<&str>, vote_href: Option<&str>) -> String {
    let vote = vote_href
        .map(|href| format!(r#"<a id="up_{id}" href="{href}"><div class="votearrow"></div></a>"#))
        .unwrap_or_default();
    let form = token
        .map(|token| {
            format!(
                r#"<form action="comment" method="post">
                <input type="hidden" name="parent" value="{id}">
                <input type="hidden" name="fnid" value="{token}">
                <textarea name="text"></textarea></form>"#
            )
        })
        .unwrap_or_default();
    format!(
        r#"<html><body><table><tr class="athing" id="{id}"><td>{vote}</td>
        <td class="title">Example</td></tr></table>{form}</body></html>"#
    )
}
