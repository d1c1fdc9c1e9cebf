//! Data source tests against a local HTTP server.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use hyper::StatusCode;
use roster_lib::UsersClient;
use roster_lib::source::LoadState;
use roster_lib::source::UserSource;

use common::Reply;
use common::TWO_USERS;
use common::serve;

fn source(url: &str, delay: Duration) -> UserSource {
    let client = UsersClient::builder().url(url).build().unwrap();
    UserSource::new(client, delay)
}

#[tokio::test]
async fn test_load_after_delay() {
    let (url, _) = serve(vec![Reply::ok(TWO_USERS)]).await;
    let mut source = source(&url, Duration::from_millis(20));

    source.start();
    assert!(source.state().is_loading());

    let outcome = source.recv().await.expect("fetch should deliver");
    source.apply(outcome);

    let users = source.state().users().expect("users loaded");
    assert_eq!(users.len(), 2);
    assert!(!source.is_pending());
}

#[tokio::test]
async fn test_failure_is_a_state_not_a_panic() {
    let (url, _) = serve(vec![Reply::status(StatusCode::SERVICE_UNAVAILABLE, "down")]).await;
    let mut source = source(&url, Duration::ZERO);

    source.start();
    let outcome = source.recv().await.expect("fetch should deliver");
    source.apply(outcome);

    assert_eq!(source.state().error(), Some("HTTP 503: down"));
}

#[tokio::test]
async fn test_refetch_recovers_after_failure() {
    let (url, hits) = serve(vec![
        Reply::status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
        Reply::ok(TWO_USERS),
    ])
    .await;
    let mut source = source(&url, Duration::ZERO);

    source.start();
    let outcome = source.recv().await.unwrap();
    source.apply(outcome);
    assert!(source.state().error().is_some());

    source.refetch();
    assert!(matches!(source.state(), LoadState::Loading));
    let outcome = source.recv().await.unwrap();
    source.apply(outcome);

    assert_eq!(source.state().users().map(|u| u.len()), Some(2));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cancel_during_delay_never_requests() {
    let (url, hits) = serve(vec![Reply::ok(TWO_USERS)]).await;
    let mut source = source(&url, Duration::from_millis(200));

    source.start();
    source.cancel();
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(!source.poll());
    assert!(matches!(source.state(), LoadState::Idle));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_dropping_source_cancels_fetch() {
    let (url, hits) = serve(vec![Reply::ok(TWO_USERS)]).await;
    let mut source = source(&url, Duration::from_millis(100));

    source.start();
    drop(source);
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
