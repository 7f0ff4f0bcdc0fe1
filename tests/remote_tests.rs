use doc_link_guardian::checker::{check_urls, RemoteOptions};
use doc_link_guardian::report::UnreachableCause;
use doc_link_guardian::{CheckError, CheckKind, Config, FailureReason, Outcome};
use httpmock::prelude::*;
use std::time::{Duration, Instant};

// Mock servers live on 127.0.0.1, which the default config denies
fn options() -> RemoteOptions {
    RemoteOptions {
        denied_hosts: Vec::new(),
        pacing_delay: Duration::ZERO,
        request_timeout: Duration::from_secs(5),
        ..RemoteOptions::from(&Config::default())
    }
}

#[tokio::test]
async fn test_not_found_is_recorded_and_others_still_checked() {
    let server = MockServer::start_async().await;
    let ok = server
        .mock_async(|when, then| {
            when.method(GET).path("/ok");
            then.status(200);
        })
        .await;
    let gone = server
        .mock_async(|when, then| {
            when.method(GET).path("/gone");
            then.status(404);
        })
        .await;
    let moved = server
        .mock_async(|when, then| {
            when.method(GET).path("/moved");
            then.status(301).header("Location", "/elsewhere");
        })
        .await;

    let urls = vec![server.url("/gone"), server.url("/ok"), server.url("/moved")];
    let report = check_urls(&urls, &options()).await.unwrap();

    assert_eq!(report.results.len(), 3);
    gone.assert_async().await;
    ok.assert_async().await;
    moved.assert_async().await;

    let gone_result = report
        .results
        .iter()
        .find(|r| r.target == server.url("/gone"))
        .unwrap();
    assert_eq!(gone_result.check, CheckKind::Remote);
    assert_eq!(gone_result.status, Some(404));
    assert_eq!(
        gone_result.outcome,
        Outcome::Fail(FailureReason::RemoteBadStatus { status: 404 })
    );

    // 3xx is not followed and counts as success
    let passed: Vec<_> = report.results.iter().filter(|r| r.is_ok()).collect();
    assert_eq!(passed.len(), 2);
}

#[tokio::test]
async fn test_server_error_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/boom");
            then.status(503);
        })
        .await;

    let report = check_urls(&[server.url("/boom")], &options()).await.unwrap();
    assert!(!report.results[0].is_ok());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_secs(3));
        })
        .await;

    let options = RemoteOptions {
        request_timeout: Duration::from_millis(300),
        ..options()
    };
    let report = check_urls(&[server.url("/slow")], &options).await.unwrap();
    assert!(matches!(
        report.results[0].outcome,
        Outcome::Fail(FailureReason::RemoteUnreachable {
            cause: UnreachableCause::Timeout,
            ..
        })
    ));
}

#[tokio::test]
async fn test_denied_hosts_are_skipped_not_failed() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/never");
            then.status(500);
        })
        .await;

    let options = RemoteOptions {
        denied_hosts: vec!["127.0.0.1".into()],
        ..options()
    };
    let urls = vec![server.url("/never")];
    let report = check_urls(&urls, &options).await.unwrap();

    assert!(report.results.is_empty());
    assert_eq!(report.skipped, urls);
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_requests_within_a_wave_run_concurrently() {
    let server = MockServer::start_async().await;
    for path in ["/a", "/b", "/c"] {
        server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).delay(Duration::from_millis(500));
            })
            .await;
    }

    // a long key keeps the three paths in distinct buckets, so one wave
    let options = RemoteOptions {
        domain_key_length: 200,
        ..options()
    };
    let urls = vec![server.url("/a"), server.url("/b"), server.url("/c")];

    let started = Instant::now();
    let report = check_urls(&urls, &options).await.unwrap();
    assert!(report.results.iter().all(|r| r.is_ok()));
    assert!(started.elapsed() < Duration::from_millis(1500));
}

#[tokio::test]
async fn test_same_domain_urls_are_sequential_and_paced() {
    let server = MockServer::start_async().await;
    for path in ["/a", "/b", "/c"] {
        server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).delay(Duration::from_millis(100));
            })
            .await;
    }

    // all three share the "127.0.0" key: three waves, two pauses
    let options = RemoteOptions {
        pacing_delay: Duration::from_millis(200),
        ..options()
    };
    let urls = vec![server.url("/a"), server.url("/b"), server.url("/c")];

    let started = Instant::now();
    let report = check_urls(&urls, &options).await.unwrap();
    assert_eq!(report.results.len(), 3);
    assert!(started.elapsed() >= Duration::from_millis(3 * 100 + 2 * 200));

    // results follow wave order
    let targets: Vec<_> = report.results.iter().map(|r| r.target.clone()).collect();
    assert_eq!(targets, urls);
}

#[tokio::test]
async fn test_wave_cap_limits_fan_out() {
    let server = MockServer::start_async().await;
    let paths: Vec<String> = (0..6).map(|i| format!("/p{i}")).collect();
    for path in &paths {
        server
            .mock_async(|when, then| {
                when.method(GET).path(path.as_str());
                then.status(200).delay(Duration::from_millis(300));
            })
            .await;
    }

    // six distinct keys, cap 3: two waves of three
    let options = RemoteOptions {
        domain_key_length: 200,
        max_wave_size: 3,
        ..options()
    };
    let urls: Vec<String> = paths.iter().map(|p| server.url(p)).collect();

    let started = Instant::now();
    let report = check_urls(&urls, &options).await.unwrap();
    assert_eq!(report.results.len(), 6);
    assert!(started.elapsed() >= Duration::from_millis(600));
}

#[tokio::test]
async fn test_phase_over_budget_aborts() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/slow");
            then.status(200).delay(Duration::from_millis(800));
        })
        .await;

    // one host, so two waves of 800ms each against a 1s phase budget
    let options = RemoteOptions {
        request_timeout: Duration::from_secs(1),
        phase_timeout: Duration::from_millis(100),
        ..options()
    };
    let urls = vec![server.url("/slow/1"), server.url("/slow/2")];

    let err = check_urls(&urls, &options).await.unwrap_err();
    assert!(matches!(err, CheckError::RemoteTimeout(t) if t == Duration::from_secs(1)));
}

#[tokio::test]
async fn test_unbuildable_request_aborts() {
    let url = "http://exa mple.com/".to_string();
    let err = check_urls(&[url.clone()], &options()).await.unwrap_err();
    match err {
        CheckError::Dispatch { url: failed, .. } => assert_eq!(failed, url),
        other => panic!("expected a dispatch error, got {other:?}"),
    }
}
