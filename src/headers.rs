use http_types::Request;

/// Common Chrome user agent string for all requests
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

const HTML_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Add headers shared by every request
pub fn add_common_headers(request: &mut Request) {
    let _ = request.insert_header("User-Agent", USER_AGENT);
    let _ = request.insert_header("Accept-Language", "en-US,en;q=0.9");
    let _ = request.insert_header("DNT", "1");
}

/// Add headers for regular page navigation (item pages, submit page, vote links)
pub fn add_page_headers(request: &mut Request, referer_url: Option<&str>) {
    add_common_headers(request);
    let _ = request.insert_header("Accept", HTML_ACCEPT);
    let _ = request.insert_header("Upgrade-Insecure-Requests", "1");

    if let Some(referer) = referer_url {
        let _ = request.insert_header("Referer", referer);
    }
}

/// Add headers for a urlencoded form submission
pub fn add_form_headers(request: &mut Request, origin: &str, referer_url: &str) {
    add_page_headers(request, Some(referer_url));
    let _ = request.insert_header("Content-Type", "application/x-www-form-urlencoded");
    let _ = request.insert_header("Origin", origin);
}

/// Add headers for read API requests
pub fn add_json_headers(request: &mut Request) {
    add_common_headers(request);
    let _ = request.insert_header("Accept", "application/json");
}

/// Attach the session cookie if there is one
pub fn add_session_cookie(request: &mut Request, credential: Option<&str>) {
    if let Some(cookie) = credential {
        let _ = request.insert_header("Cookie", cookie);
    }
}
