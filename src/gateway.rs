use crate::events::{ClientEvent, RequestInfo, SharedEventBroadcaster};
use crate::headers;
use crate::session::SessionStore;
use crate::{HackerNewsError, Result};
use http_client::HttpClient;
use http_types::{Method, Request, Url};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// A fully read response.
///
/// Redirects are never followed, so a `302` with its `Location` arrives here
/// as-is. For the form posts of this site that redirect is usually the only
/// sign of success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    /// The URL that was requested
    pub url: String,
    pub status: u16,
    pub body: String,
    /// `Location` header, if any
    pub location: Option<String>,
    /// Every `Set-Cookie` header value, in order
    pub set_cookies: Vec<String>,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// Transport for one site: pages, form posts and JSON resources under a base URL.
///
/// The gateway owns the [`SessionStore`] and attaches its credential as the
/// `Cookie` header of every request to its own origin while one is held.
pub struct HttpGateway {
    client: Arc<dyn HttpClient + Send + Sync>,
    base_url: String,
    session: SessionStore,
    broadcaster: Arc<SharedEventBroadcaster>,
    debug_save_responses: bool,
}

impl HttpGateway {
    pub fn new(
        client: Arc<dyn HttpClient + Send + Sync>,
        base_url: impl Into<String>,
        broadcaster: Arc<SharedEventBroadcaster>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: SessionStore::new(),
            broadcaster,
            debug_save_responses: false,
        }
    }

    pub fn with_debug_save_responses(mut self, enabled: bool) -> Self {
        self.debug_save_responses = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    /// Resolve a site-relative path (`/submit`, `vote?id=1`) or pass an absolute URL through.
    pub fn resolve_url(&self, path: &str) -> Result<Url> {
        let full = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        };
        Url::parse(&full).map_err(|e| HackerNewsError::Parse(format!("invalid URL {full}: {e}")))
    }

    /// Fetch a page and return its body.
    ///
    /// Any non-2xx status, redirects included, fails with
    /// [`HackerNewsError::Transport`]: the page could not be retrieved.
    pub async fn get(&self, path: &str) -> Result<String> {
        let url = self.resolve_url(path)?;
        let mut request = Request::new(Method::Get, url);
        headers::add_page_headers(&mut request, Some(&self.base_url));

        let response = self.send(request).await?;
        if !response.is_success() {
            log::debug!("GET {} failed with status {}", response.url, response.status);
            return Err(HackerNewsError::Transport {
                url: response.url,
                status: response.status,
            });
        }
        Ok(response.body)
    }

    /// Follow a link with a GET and hand back whatever comes back, unclassified.
    pub async fn follow(&self, path: &str, referer: &str) -> Result<GatewayResponse> {
        let url = self.resolve_url(path)?;
        let referer = self.resolve_url(referer)?;
        let mut request = Request::new(Method::Get, url);
        headers::add_page_headers(&mut request, Some(referer.as_str()));
        self.send(request).await
    }

    /// Submit a urlencoded form. Any status is returned to the caller.
    pub async fn post(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        referer: &str,
    ) -> Result<GatewayResponse> {
        let url = self.resolve_url(path)?;
        let referer = self.resolve_url(referer)?;
        let mut request = Request::new(Method::Post, url);
        headers::add_form_headers(&mut request, &self.base_url, referer.as_str());
        request.set_body(encode_form(fields));
        self.send(request).await
    }

    /// Fetch a JSON resource. A literal `null` body yields `None`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = self.resolve_url(path)?;
        let mut request = Request::new(Method::Get, url);
        headers::add_json_headers(&mut request);

        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(HackerNewsError::Transport {
                url: response.url,
                status: response.status,
            });
        }

        serde_json::from_str::<Option<T>>(&response.body)
            .map_err(|e| HackerNewsError::Parse(format!("{}: {e}", response.url)))
    }

    /// Whether `url` shares scheme, host and port with the base URL.
    pub fn is_same_site(&self, url: &Url) -> bool {
        same_origin(&self.base_url, url)
    }

    async fn send(&self, mut request: Request) -> Result<GatewayResponse> {
        // The session only ever goes back to the site that issued it
        let credential = self
            .session
            .get()
            .filter(|_| self.is_same_site(request.url()));
        if credential.is_none() && self.session.is_active() {
            log::debug!(
                "Not sending session cookie to {}",
                request.url().host_str().unwrap_or_default()
            );
        }
        headers::add_session_cookie(&mut request, credential);

        let url = request.url().to_string();
        let request_info =
            RequestInfo::from_url_and_method(request.url(), request.method().as_ref());
        let request_start = Instant::now();

        log::debug!(
            "{} (session cookie: {})",
            request_info.short_description(),
            self.session.is_active()
        );
        self.broadcaster.broadcast_event(ClientEvent::RequestStarted {
            request: request_info.clone(),
        });

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| HackerNewsError::Http(e.to_string()))?;

        let status: u16 = response.status().into();
        let location = response
            .header("location")
            .map(|values| values.last().as_str().to_string());
        let set_cookies: Vec<String> = response
            .header("set-cookie")
            .map(|values| values.iter().map(|v| v.as_str().to_string()).collect())
            .unwrap_or_default();
        let body = response
            .body_string()
            .await
            .map_err(|e| HackerNewsError::Http(e.to_string()))?;

        self.broadcaster.broadcast_event(ClientEvent::RequestCompleted {
            request: request_info.clone(),
            status_code: status,
            duration_ms: request_start.elapsed().as_millis() as u64,
        });
        log::debug!("Response status: {status}, {} body bytes", body.len());
        log::trace!("Received {} Set-Cookie headers", set_cookies.len());

        if self.debug_save_responses {
            self.save_debug_response(&request_info, status, &body);
        }

        Ok(GatewayResponse {
            url,
            status,
            body,
            location,
            set_cookies,
        })
    }

    /// Save response to debug directory (optional debug feature)
    fn save_debug_response(&self, request: &RequestInfo, status_code: u16, body: &str) {
        if let Err(e) = self.try_save_debug_response(request, status_code, body) {
            log::warn!("Failed to save debug response: {e}");
        }
    }

    fn try_save_debug_response(
        &self,
        request: &RequestInfo,
        status_code: u16,
        body: &str,
    ) -> Result<()> {
        let debug_dir = Path::new("debug_responses");
        fs::create_dir_all(debug_dir)?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let file_name = format!(
            "{timestamp}_{}_status{status_code}.html",
            debug_file_stem(&self.base_url, request)
        );
        let file_path = debug_dir.join(file_name);
        fs::write(&file_path, body)?;

        log::debug!("Saved HTTP response to {file_path:?} (status: {status_code})");
        Ok(())
    }
}

fn same_origin(base_url: &str, url: &Url) -> bool {
    Url::parse(base_url)
        .map(|base| base.origin() == url.origin())
        .unwrap_or(false)
}

/// File-name-safe form of the redacted request URI, relative to the base URL
fn debug_file_stem(base_url: &str, request: &RequestInfo) -> String {
    let url_path = request.uri.strip_prefix(base_url).unwrap_or(&request.uri);
    url_path.replace(['/', '?', '&', '=', '%', '+', ':', '<', '>'], "_")
}

/// Encode form fields as `application/x-www-form-urlencoded`, preserving order.
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
