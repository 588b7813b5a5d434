// tests/search_integration.rs

use riskmap_rs::{Coordinate, SearchOutcome, SearchState, SearchViewModel};
use std::time::Duration;


use test_utils::shared::{nagpur_place, pune_place, stub_resolver, StubGeocoder, StubReply};

#[tokio::test]
async fn test_successful_search_resolves_with_six_points() {
    let (stub, resolver) = stub_resolver(
        StubGeocoder::new().with_reply("Nagpur, India", StubReply::Places(vec![nagpur_place()])),
    );
    let view_model = SearchViewModel::new(resolver);

    view_model.set_query("Nagpur");
    let outcome = view_model.search().await;

    assert_eq!(outcome, SearchOutcome::Resolved);
    let snapshot = view_model.snapshot();
    assert!(!snapshot.is_loading());
    match &snapshot.state {
        SearchState::Resolved(result) => {
            assert_eq!(result.label, "Nagpur, Maharashtra");
            assert_eq!(result.center, Coordinate::new(21.1458, 79.0882).unwrap());
            assert_eq!(result.points.len(), 6);
            assert_eq!(result.points[0].coordinate, result.center);
            assert_eq!(result.points[0].intensity, 0.85);
            assert_eq!(snapshot.displayed.as_ref(), Some(result));
        }
        other => panic!("Expected Resolved, got {:?}", other),
    }
    assert_eq!(stub.call_count(), 1);
}

#[tokio::test]
async fn test_empty_query_is_a_no_op() {
    let (stub, resolver) = stub_resolver(StubGeocoder::new());
    let view_model = SearchViewModel::new(resolver);

    assert_eq!(view_model.search().await, SearchOutcome::Skipped);
    view_model.set_query("   ");
    assert_eq!(view_model.search().await, SearchOutcome::Skipped);

    let snapshot = view_model.snapshot();
    assert_eq!(snapshot.state, SearchState::Idle);
    assert!(snapshot.displayed.is_none());
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_set_query_does_not_search() {
    let (stub, resolver) = stub_resolver(StubGeocoder::new());
    let view_model = SearchViewModel::new(resolver);

    view_model.set_query("Nagpur");

    let snapshot = view_model.snapshot();
    assert_eq!(snapshot.query, "Nagpur");
    assert_eq!(snapshot.state, SearchState::Idle);
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_not_found_keeps_previous_result() {
    let (_stub, resolver) = stub_resolver(
        StubGeocoder::new()
            .with_reply("Nagpur, India", StubReply::Places(vec![nagpur_place()]))
            .with_reply("Atlantis, India", StubReply::Places(Vec::new())),
    );
    let view_model = SearchViewModel::new(resolver);

    view_model.set_query("Nagpur");
    assert_eq!(view_model.search().await, SearchOutcome::Resolved);
    let before = view_model
        .snapshot()
        .displayed
        .expect("Nagpur should be displayed");

    view_model.set_query("Atlantis");
    let outcome = view_model.search().await;

    let snapshot = view_model.snapshot();
    match outcome {
        SearchOutcome::Failed(err) => assert!(err.is_not_found()),
        other => panic!("Expected Failed, got {:?}", other),
    }
    assert!(matches!(&snapshot.state, SearchState::Failed(err) if err.is_not_found()));
    assert!(!snapshot.is_loading());
    assert_eq!(snapshot.displayed.as_ref(), Some(&before));
    assert_eq!(snapshot.displayed.unwrap().points, before.points);
}

#[tokio::test]
async fn test_transport_failure_fails_and_clears_loading() {
    let (stub, resolver) = stub_resolver(
        StubGeocoder::new().with_reply("Nagpur, India", StubReply::TransportFailure),
    );
    let view_model = SearchViewModel::new(resolver);

    view_model.set_query("Nagpur");
    let outcome = view_model.search().await;

    assert!(matches!(outcome, SearchOutcome::Failed(ref err) if err.is_unreachable()));
    let snapshot = view_model.snapshot();
    assert!(!snapshot.is_loading());
    assert!(snapshot.error().map(|e| e.is_unreachable()).unwrap_or(false));
    assert!(snapshot.displayed.is_none());
    assert_eq!(stub.call_count(), 1);
}

#[tokio::test]
async fn test_each_search_issues_one_lookup() {
    let (stub, resolver) = stub_resolver(
        StubGeocoder::new().with_reply("Nagpur, India", StubReply::Places(vec![nagpur_place()])),
    );
    let view_model = SearchViewModel::new(resolver);

    view_model.set_query("Nagpur");
    view_model.search().await;
    view_model.search().await;

    assert_eq!(
        stub.calls(),
        vec!["Nagpur, India".to_string(), "Nagpur, India".to_string()]
    );
}

#[tokio::test]
async fn test_latest_search_wins_when_older_completes_last() {
    let (stub, resolver) = stub_resolver(
        StubGeocoder::new()
            .with_reply(
                "Nagpur, India",
                StubReply::Delayed(
                    Duration::from_millis(300),
                    Box::new(StubReply::Places(vec![nagpur_place()])),
                ),
            )
            .with_reply(
                "Pune, India",
                StubReply::Delayed(
                    Duration::from_millis(10),
                    Box::new(StubReply::Places(vec![pune_place()])),
                ),
            ),
    );
    let view_model = SearchViewModel::new(resolver);

    let first = async {
        view_model.set_query("Nagpur");
        view_model.search().await
    };
    let second = async {
        // Let the first search pick up its query before replacing it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        view_model.set_query("Pune");
        view_model.search().await
    };
    let (first_outcome, second_outcome) = tokio::join!(first, second);

    assert_eq!(first_outcome, SearchOutcome::Stale { request_id: 1 });
    assert_eq!(second_outcome, SearchOutcome::Resolved);
    assert_eq!(stub.call_count(), 2);

    let snapshot = view_model.snapshot();
    match &snapshot.state {
        SearchState::Resolved(result) => assert_eq!(result.label, "Pune, Pune District"),
        other => panic!("Expected Resolved, got {:?}", other),
    }
}

#[tokio::test]
async fn test_latest_search_wins_when_it_completes_last() {
    let (_stub, resolver) = stub_resolver(
        StubGeocoder::new()
            .with_reply(
                "Nagpur, India",
                StubReply::Delayed(
                    Duration::from_millis(10),
                    Box::new(StubReply::Places(vec![nagpur_place()])),
                ),
            )
            .with_reply(
                "Pune, India",
                StubReply::Delayed(
                    Duration::from_millis(200),
                    Box::new(StubReply::Places(vec![pune_place()])),
                ),
            ),
    );
    let view_model = SearchViewModel::new(resolver);

    let first = async {
        view_model.set_query("Nagpur");
        view_model.search().await
    };
    let second = async {
        tokio::task::yield_now().await;
        view_model.set_query("Pune");
        view_model.search().await
    };
    let (first_outcome, second_outcome) = tokio::join!(first, second);

    // The older search finishes first but a newer one is already pending.
    assert_eq!(first_outcome, SearchOutcome::Stale { request_id: 1 });
    assert_eq!(second_outcome, SearchOutcome::Resolved);
    let snapshot = view_model.snapshot();
    assert_eq!(
        snapshot.displayed.map(|r| r.label),
        Some("Pune, Pune District".to_string())
    );
}

#[tokio::test]
async fn test_subscribers_see_loading_then_result() {
    let (_stub, resolver) = stub_resolver(StubGeocoder::new().with_reply(
        "Nagpur, India",
        StubReply::Delayed(
            Duration::from_millis(100),
            Box::new(StubReply::Places(vec![nagpur_place()])),
        ),
    ));
    let view_model = SearchViewModel::new(resolver);
    let mut receiver = view_model.subscribe();

    view_model.set_query("Nagpur");
    receiver.borrow_and_update();

    let observer = async {
        receiver.changed().await.expect("Sender dropped");
        let loading = receiver.borrow_and_update().is_loading();
        receiver.changed().await.expect("Sender dropped");
        let resolved = matches!(receiver.borrow_and_update().state, SearchState::Resolved(_));
        (loading, resolved)
    };
    let (_, (saw_loading, saw_resolved)) = tokio::join!(view_model.search(), observer);

    assert!(saw_loading, "Observer should see the Loading state");
    assert!(saw_resolved, "Observer should see the Resolved state");
}
