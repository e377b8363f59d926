//! HTML parsing for Hacker News pages.
//!
//! Pure functions over served HTML: locating the per-page anti-forgery token
//! and the per-item vote link. Nothing here is cached; callers parse the page
//! they just fetched.

use crate::{HackerNewsError, Result};
use scraper::{ElementRef, Html, Selector};

/// Name of the hidden form field carrying the action token.
pub const TOKEN_FIELD: &str = "fnid";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| HackerNewsError::Parse(format!("invalid selector {css}: {e}")))
}

/// Current value of a form control, as the browser would submit it.
fn control_value(element: &ElementRef) -> Option<String> {
    match element.value().name() {
        "textarea" => Some(element.text().collect::<String>()),
        _ => element.value().attr("value").map(str::to_string),
    }
}

/// Extract the value of the first form control named `field_name`.
///
/// Fails with [`HackerNewsError::TokenNotFound`] when no such control exists or
/// its value is empty. That covers a changed page layout, a page served to a
/// logged-out session and a block page alike.
///
/// # Examples
///
/// ```rust
/// use hackernews_client::parsing::{extract_token, TOKEN_FIELD};
///
/// let html = r#"<form action="r"><input type="hidden" name="fnid" value="Xy12"></form>"#;
/// assert_eq!(extract_token(html, TOKEN_FIELD).unwrap(), "Xy12");
/// ```
pub fn extract_token(html: &str, field_name: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let controls = selector("input, textarea, select")?;

    let token = document
        .select(&controls)
        .find(|element| element.value().attr("name") == Some(field_name))
        .and_then(|element| control_value(&element))
        .filter(|value| !value.trim().is_empty());

    match token {
        Some(token) => {
            log::trace!("Extracted {field_name} token ({} chars)", token.len());
            Ok(token)
        }
        None => {
            log::debug!("No usable {field_name} control found in page");
            Err(HackerNewsError::TokenNotFound {
                field: field_name.to_string(),
            })
        }
    }
}

/// The `href` of the upvote link for `item_id`, if the page offers one.
///
/// The link is the anchor with id `up_<item_id>`. Pages omit it when the
/// session already voted, cannot vote, or is looking at its own item.
pub fn find_vote_link(html: &str, item_id: u64) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let anchors = selector("a[id]")?;
    let wanted = format!("up_{item_id}");

    Ok(document
        .select(&anchors)
        .find(|anchor| anchor.value().attr("id") == Some(wanted.as_str()))
        .and_then(|anchor| anchor.value().attr("href"))
        .filter(|href| !href.trim().is_empty())
        .map(str::to_string))
}
