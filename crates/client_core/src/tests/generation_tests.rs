use super::*;
use crate::test_support::{logs_response, malformed, points, rejected, ScriptedLabApi};
use shared::error::ErrorKind;

#[test]
fn count_is_stored_verbatim() {
    let mut generation = GenerationController::default();
    assert_eq!(generation.count(), "1000");

    generation.set_count("  -3e2 ");
    assert_eq!(generation.count(), "  -3e2 ");
    assert_eq!(generation.begin().query().count, "  -3e2 ");
}

#[tokio::test]
async fn generate_replaces_points_and_loads_first_log_page() {
    let api = ScriptedLabApi::with_log_total(42);
    let mut generation = GenerationController::new("500");
    let mut logs = LogPaginator::new();

    let completion = generation
        .generate(&api, &mut logs)
        .await
        .expect("generate");

    assert_eq!(completion, Completion::Applied);
    assert_eq!(generation.points().len(), 500);
    assert!(!generation.is_busy());
    assert_eq!(api.log_starts(), vec![0]);
    assert_eq!(logs.offset(), 0);
    assert_eq!(logs.records().len(), 10);
    assert_eq!(logs.total(), Some(42));
}

#[tokio::test]
async fn generate_resets_paginator_from_a_later_page() {
    let api = ScriptedLabApi::with_log_total(42);
    let mut generation = GenerationController::new("3");
    let mut logs = LogPaginator::new();
    logs.load_page(&api, 30).await.expect("page");

    generation
        .generate(&api, &mut logs)
        .await
        .expect("generate");

    assert_eq!(logs.offset(), 0);
    assert!(!logs.can_previous());
}

#[tokio::test]
async fn failed_generate_leaves_points_and_logs_untouched() {
    let api = ScriptedLabApi::with_log_total(23);
    let mut generation = GenerationController::new("4");
    let mut logs = LogPaginator::new();
    generation
        .generate(&api, &mut logs)
        .await
        .expect("first generate");
    logs.next(&api).await.expect("next");

    let points_before = generation.points().clone();
    let page_before = logs.page().clone();
    let log_calls_before = api.log_starts().len();

    api.push_hello(Err(rejected("MongoDB is not connected")));
    let err = generation
        .generate(&api, &mut logs)
        .await
        .expect_err("should fail");

    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    assert_eq!(generation.points(), &points_before);
    assert_eq!(logs.page(), &page_before);
    assert_eq!(api.log_starts().len(), log_calls_before);
    assert!(!generation.is_busy());
}

#[tokio::test]
async fn malformed_count_is_still_sent() {
    let api = ScriptedLabApi::with_log_total(0);
    let mut generation = GenerationController::new("lots");
    let mut logs = LogPaginator::new();

    let result = generation.generate(&api, &mut logs).await;

    assert!(result.is_err());
    let calls = api.hello_calls.lock().expect("calls");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].count, "lots");
    assert!(generation.points().is_empty());
}

#[tokio::test]
async fn response_without_points_clears_the_set() {
    let api = ScriptedLabApi::with_log_total(1);
    let mut generation = GenerationController::new("2");
    let mut logs = LogPaginator::new();
    generation
        .generate(&api, &mut logs)
        .await
        .expect("generate");
    assert_eq!(generation.points().len(), 2);

    api.push_hello(Ok(HelloResponse::default()));
    generation
        .generate(&api, &mut logs)
        .await
        .expect("generate");

    assert!(generation.points().is_empty());
}

#[tokio::test]
async fn log_reload_failure_does_not_fail_generation() {
    let api = ScriptedLabApi::with_log_total(5);
    api.fail_logs(true);
    let mut generation = GenerationController::new("8");
    let mut logs = LogPaginator::new();

    let completion = generation
        .generate(&api, &mut logs)
        .await
        .expect("generate");

    assert_eq!(completion, Completion::Applied);
    assert_eq!(generation.points().len(), 8);
    assert_eq!(logs.total(), Some(0));
}

#[test]
fn overlapping_requests_keep_busy_until_all_return_and_newest_wins() {
    let mut generation = GenerationController::new("1");
    let first = generation.begin();
    generation.set_count("2");
    let second = generation.begin();
    assert!(generation.is_busy());

    let newest = generation
        .finish(
            second,
            Ok(HelloResponse {
                points: points(2),
                ..HelloResponse::default()
            }),
        )
        .expect("second");
    assert_eq!(newest, Completion::Applied);
    assert!(generation.is_busy());

    let stale = generation
        .finish(
            first,
            Ok(HelloResponse {
                points: points(1),
                ..HelloResponse::default()
            }),
        )
        .expect("first");
    assert_eq!(stale, Completion::Superseded);
    assert_eq!(generation.points().len(), 2);
    assert!(!generation.is_busy());
}

#[test]
fn malformed_body_is_tagged() {
    let mut generation = GenerationController::default();
    let ticket = generation.begin();
    let err = generation
        .finish(ticket, Err(malformed()))
        .expect_err("malformed");
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert!(generation.points().is_empty());
    assert!(!generation.is_busy());
}

#[test]
fn first_page_after_generation_matches_scenario() {
    let mut generation = GenerationController::new("500");
    let mut logs = LogPaginator::new();

    let ticket = generation.begin();
    let completion = generation
        .finish(
            ticket,
            Ok(HelloResponse {
                points: points(500),
                ..HelloResponse::default()
            }),
        )
        .expect("generate");
    assert!(completion.is_applied());

    let page = logs.begin_load(0);
    logs.finish(page, Ok(logs_response(0, 10, 57)))
        .expect("page");

    assert_eq!(generation.points().len(), 500);
    assert_eq!(logs.offset(), 0);
    assert!(logs.records().len() <= 10);
}
