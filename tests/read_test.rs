use hackernews_client::{HackerNewsClient, HackerNewsError, StoryFeed};
use wiremock::ResponseTemplate;

mod common;
use common::{html, json, TestSite};

#[test_log::test(tokio::test)]
async fn test_get_item() {
    let site = TestSite::start().await;
    site.mount_json(
        "/item/8863.json",
        json(
            r#"{"by":"dhouston","descendants":71,"id":8863,"kids":[9224,8917],"score":104,
            "time":1175714200,"title":"My YC app: Dropbox","type":"story",
            "url":"http://www.getdropbox.com/u/2/screencast.html"}"#,
        ),
    )
    .await;
    let client = site.client();

    let item = client.get_item(8863).await.unwrap();

    assert_eq!(item.id, 8863);
    assert_eq!(item.kind.as_deref(), Some("story"));
    assert_eq!(item.by.as_deref(), Some("dhouston"));
    assert_eq!(item.kids, Some(vec![9224, 8917]));
    assert!(item.text.is_none());

    let requests = site.api_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, format!("{}/item/8863.json", site.api_url()));
    assert!(site.web_requests().await.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_get_missing_item_is_not_found() {
    let site = TestSite::start().await;
    site.mount_json("/item/999999999.json", json("null")).await;
    let client = site.client();

    let err = client.get_item(999_999_999).await.unwrap_err();

    assert!(matches!(err, HackerNewsError::NotFound(ref what) if what.contains("999999999")));
}

#[test_log::test(tokio::test)]
async fn test_get_user() {
    let site = TestSite::start().await;
    site.mount_json(
        "/user/jl.json",
        json(r#"{"about":"This is a test","created":1173923446,"id":"jl","karma":2937,"submitted":[8265435,8168423]}"#),
    )
    .await;
    let client = site.client();

    let user = client.get_user("jl").await.unwrap();

    assert_eq!(user.id, "jl");
    assert_eq!(user.karma, 2937);
    assert_eq!(user.submitted, Some(vec![8265435, 8168423]));
}

#[test_log::test(tokio::test)]
async fn test_get_missing_user_is_not_found() {
    let site = TestSite::start().await;
    site.mount_json("/user/nobody_here.json", json("null")).await;
    let client = site.client();

    assert!(matches!(
        client.get_user("nobody_here").await,
        Err(HackerNewsError::NotFound(_))
    ));
}

#[test_log::test(tokio::test)]
async fn test_get_stories_truncates_to_limit() {
    let site = TestSite::start().await;
    site.mount_json("/beststories.json", json("[9, 8, 7, 6, 5, 4]")).await;
    site.mount_json("/jobstories.json", json("[3, 2]")).await;
    let client = site.client();

    let ids = client.get_stories(StoryFeed::Best, 3).await.unwrap();
    assert_eq!(ids, vec![9, 8, 7]);

    let ids = client.get_stories(StoryFeed::Job, 10).await.unwrap();
    assert_eq!(ids, vec![3, 2]);
}

#[test_log::test(tokio::test)]
async fn test_api_error_status_is_transport_error() {
    let site = TestSite::start().await;
    site.mount_json(
        "/topstories.json",
        ResponseTemplate::new(502).set_body_string("Bad Gateway"),
    )
    .await;
    let client = site.client();

    let err = client.get_stories(StoryFeed::Top, 30).await.unwrap_err();

    assert!(matches!(err, HackerNewsError::Transport { status: 502, .. }));
}

#[test_log::test(tokio::test)]
async fn test_malformed_json_is_parse_error() {
    let site = TestSite::start().await;
    site.mount_json("/item/1.json", html("<html>not json</html>")).await;
    let client = site.client();

    assert!(matches!(
        client.get_item(1).await,
        Err(HackerNewsError::Parse(_))
    ));
}

#[test_log::test(tokio::test)]
async fn test_reads_never_send_session_cookie() {
    let site = TestSite::start().await;
    let client = site.logged_in_client().await;
    site.mount_json("/item/1.json", json(r#"{"id":1,"type":"story"}"#))
        .await;

    client.get_item(1).await.unwrap();

    let reads = site.api_requests().await;
    assert_eq!(reads.len(), 1);
    assert!(reads[0].cookie.is_none());
    assert_eq!(site.web_requests().await.len(), 1);
}
