//! Tests for engine.rs

use intake_agent::{DialogueEngine, FakeTicketSubmitter, RecordingNotices};
use intake_common::replies;
use intake_common::{Category, DraftTicket, Phase, Sender, SubmitError};
use std::sync::Arc;
use std::time::Duration;

fn engine_with(fake: &FakeTicketSubmitter) -> (DialogueEngine, RecordingNotices) {
    let notices = RecordingNotices::new();
    let engine = DialogueEngine::new(Arc::new(fake.clone())).with_notices(Arc::new(notices.clone()));
    (engine, notices)
}

/// Drive an engine to AWAITING_DESCRIPTION with a water report
async fn water_report_until_description(engine: &mut DialogueEngine) {
    engine.handle_turn("water leaking in bathroom").await;
    engine.handle_turn("Bathroom 2nd Floor").await;
    assert_eq!(engine.state().phase(), Phase::AwaitingDescription);
}

#[tokio::test]
async fn test_new_engine_is_idle_with_greeting() {
    let fake = FakeTicketSubmitter::new();
    let (engine, _) = engine_with(&fake);

    assert_eq!(engine.state().phase(), Phase::Idle);
    assert!(engine.state().draft().is_empty());
    let history = engine.state().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history.messages()[0].sender, Sender::Bot);
    assert_eq!(history.messages()[0].text, replies::welcome());
}

#[tokio::test]
async fn test_scenario_a_water_fast_path() {
    let fake = FakeTicketSubmitter::new();
    let (mut engine, _) = engine_with(&fake);

    let reply = engine.handle_turn("water leaking in bathroom").await;

    assert_eq!(engine.state().phase(), Phase::AwaitingLocation);
    assert_eq!(engine.state().draft().category, Some(Category::Water));
    assert!(reply.contains("Water issue"));
    assert!(reply.contains("Where is the leakage/wastage?"));
}

#[tokio::test]
async fn test_scenario_b_report_without_category() {
    let fake = FakeTicketSubmitter::new();
    let (mut engine, _) = engine_with(&fake);

    let reply = engine.handle_turn("I want to report something").await;

    assert_eq!(engine.state().phase(), Phase::AwaitingCategory);
    assert!(engine.state().draft().is_empty());
    for name in ["Food", "Cleanliness", "Water", "Electricity", "Other"] {
        assert!(reply.contains(name), "reply should list {}: {}", name, reply);
    }
}

#[tokio::test]
async fn test_scenario_c_successful_submission() {
    let fake = FakeTicketSubmitter::new();
    let (mut engine, notices) = engine_with(&fake);
    water_report_until_description(&mut engine).await;

    let reply = engine.handle_turn("tap is broken").await;

    assert_eq!(notices.notices(), vec![replies::SUBMITTING.to_string()]);
    assert!(reply.contains("Complaint Registered"));
    assert!(reply.contains("Water"));
    assert!(reply.contains("Bathroom 2nd Floor"));
    assert_eq!(engine.state().phase(), Phase::Idle);
    assert_eq!(engine.state().draft(), &DraftTicket::default());

    let submitted = fake.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].category, Category::Water);
    assert_eq!(submitted[0].title, "Bathroom 2nd Floor");
    assert_eq!(submitted[0].description, "tap is broken");
}

#[tokio::test]
async fn test_scenario_d_failed_submission_resets() {
    let fake = FakeTicketSubmitter::failing(SubmitError::Status {
        status: 500,
        body: "boom".to_string(),
    });
    let (mut engine, notices) = engine_with(&fake);
    water_report_until_description(&mut engine).await;

    let reply = engine.handle_turn("tap is broken").await;

    assert_eq!(notices.notices(), vec![replies::SUBMITTING.to_string()]);
    assert_eq!(reply, replies::SUBMIT_FAILED);
    assert_eq!(engine.state().phase(), Phase::Idle);
    assert!(engine.state().draft().is_empty());
    assert_eq!(fake.call_count(), 1);
}

#[tokio::test]
async fn test_scenario_e_greeting_is_not_nudge() {
    let fake = FakeTicketSubmitter::new();
    let (mut engine, _) = engine_with(&fake);

    let reply = engine.handle_turn("hello").await;

    assert_eq!(engine.state().phase(), Phase::Idle);
    assert_eq!(reply, "Hello! 👋 Type an issue to report it instantly.");
    assert_ne!(reply, replies::NUDGE);
}

#[tokio::test]
async fn test_unmatched_idle_stays_idle_with_nudge() {
    let fake = FakeTicketSubmitter::new();
    let (mut engine, _) = engine_with(&fake);

    for text in ["what time is it", "42", "ok"] {
        let reply = engine.handle_turn(text).await;
        assert_eq!(reply, replies::NUDGE, "text: {}", text);
        assert_eq!(engine.state().phase(), Phase::Idle);
        assert!(engine.state().draft().is_empty());
    }
}

#[tokio::test]
async fn test_fast_path_sets_category_for_every_rule() {
    let cases = [
        ("the food is stale", Category::FoodHygiene),
        ("garbage in corridor", Category::Cleanliness),
        ("leak near the stairs", Category::Water),
        ("fan is broken", Category::Electricity),
    ];

    for (text, expected) in cases {
        let fake = FakeTicketSubmitter::new();
        let (mut engine, _) = engine_with(&fake);
        engine.handle_turn(text).await;
        assert_eq!(engine.state().phase(), Phase::AwaitingLocation, "text: {}", text);
        assert_eq!(engine.state().draft().category, Some(expected), "text: {}", text);
    }
}

#[tokio::test]
async fn test_clarification_resolves_category() {
    let fake = FakeTicketSubmitter::new();
    let (mut engine, _) = engine_with(&fake);

    engine.handle_turn("I want to complain").await;
    let reply = engine.handle_turn("Electricity").await;

    assert_eq!(engine.state().phase(), Phase::AwaitingLocation);
    assert_eq!(engine.state().draft().category, Some(Category::Electricity));
    assert!(reply.starts_with("Okay, reporting: Electricity."));
}

#[tokio::test]
async fn test_clarification_defaults_to_other() {
    let fake = FakeTicketSubmitter::new();
    let (mut engine, _) = engine_with(&fake);

    engine.handle_turn("there is an issue").await;
    let reply = engine.handle_turn("the wifi is down").await;

    assert_eq!(engine.state().draft().category, Some(Category::Other));
    assert!(reply.contains("Other"));
}

#[tokio::test]
async fn test_location_and_description_taken_verbatim() {
    let fake = FakeTicketSubmitter::new();
    let (mut engine, _) = engine_with(&fake);

    engine.handle_turn("report").await;
    engine.handle_turn("clean").await;
    // Keywords in the location must not be re-classified
    let reply = engine.handle_turn("  hello water room  ").await;
    assert_eq!(reply, replies::ASK_DESCRIPTION);
    assert_eq!(
        engine.state().draft().location.as_deref(),
        Some("  hello water room  ")
    );

    engine.handle_turn("report the fan").await;
    let submitted = fake.submitted();
    assert_eq!(submitted[0].category, Category::Cleanliness);
    assert_eq!(submitted[0].description, "report the fan");
}

#[tokio::test]
async fn test_exactly_one_submission_per_pass() {
    let fake = FakeTicketSubmitter::new();
    let (mut engine, notices) = engine_with(&fake);

    engine.handle_turn("hello").await;
    engine.handle_turn("mess food is bad").await;
    assert_eq!(fake.call_count(), 0);
    engine.handle_turn("Canteen").await;
    assert_eq!(fake.call_count(), 0);
    engine.handle_turn("Stale food served").await;
    assert_eq!(fake.call_count(), 1);

    // Back to idle: chatter does not resubmit
    engine.handle_turn("thanks").await;
    engine.handle_turn("hello").await;
    assert_eq!(fake.call_count(), 1);

    // A second full pass submits once more
    engine.handle_turn("light broken").await;
    engine.handle_turn("Room 102").await;
    engine.handle_turn("flickers").await;
    assert_eq!(fake.call_count(), 2);
    assert_eq!(notices.len(), 2);
}

#[tokio::test]
async fn test_failed_draft_is_not_retried() {
    let fake = FakeTicketSubmitter::failing(SubmitError::Timeout(15));
    let (mut engine, _) = engine_with(&fake);
    water_report_until_description(&mut engine).await;
    engine.handle_turn("tap is broken").await;

    // Next turn starts from scratch
    let reply = engine.handle_turn("Bathroom 2nd Floor").await;
    assert_eq!(reply, replies::NUDGE);
    assert_eq!(engine.state().phase(), Phase::Idle);
    assert_eq!(fake.call_count(), 1);
}

#[tokio::test]
async fn test_history_records_every_exchange_in_order() {
    let fake = FakeTicketSubmitter::new();
    let (mut engine, _) = engine_with(&fake);
    water_report_until_description(&mut engine).await;
    engine.handle_turn("tap is broken").await;

    let history = engine.state().history();
    let senders: Vec<_> = history.messages().iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        vec![
            Sender::Bot, // welcome
            Sender::User,
            Sender::Bot,
            Sender::User,
            Sender::Bot,
            Sender::User,
            Sender::Bot, // submitting
            Sender::Bot, // confirmation
        ]
    );
    let bot = history.bot_texts();
    assert_eq!(bot[bot.len() - 2], replies::SUBMITTING);
    assert!(bot[bot.len() - 1].contains("Complaint Registered"));
}

#[tokio::test]
async fn test_abandoned_submission_is_not_resent() {
    let fake = FakeTicketSubmitter::new().with_latency(Duration::from_millis(500));
    let (mut engine, _) = engine_with(&fake);
    water_report_until_description(&mut engine).await;

    // Caller gives up while the submitter is still working
    let dropped =
        tokio::time::timeout(Duration::from_millis(20), engine.handle_turn("tap is broken")).await;
    assert!(dropped.is_err());
    assert_eq!(engine.state().phase(), Phase::Submitting);

    let reply = engine.handle_turn("hello?").await;
    assert_eq!(reply, replies::submission_interrupted());
    assert_eq!(engine.state().phase(), Phase::Idle);
    assert!(engine.state().draft().is_empty());
    assert_eq!(fake.call_count(), 1);
}

#[tokio::test]
async fn test_custom_rules_replace_campus_tables() {
    use intake_common::intent::CategoryRule;
    use intake_common::IntentRules;

    let mut rules = IntentRules::campus();
    rules.detect = vec![CategoryRule::new(Category::Other, &["wifi", "network"])
        .with_prompt("Network trouble noted. Which building?")];

    let fake = FakeTicketSubmitter::new();
    let (engine, _) = engine_with(&fake);
    let mut engine = engine.with_rules(rules);
    assert_eq!(engine.rules().detect.len(), 1);

    let reply = engine.handle_turn("WiFi keeps dropping").await;
    assert_eq!(reply, "Network trouble noted. Which building?");
    assert_eq!(engine.state().draft().category, Some(Category::Other));

    // The old water rule is gone, so this is just report wording
    engine.handle_turn("Library").await;
    engine.handle_turn("drops every few minutes").await;
    let reply = engine.handle_turn("water leak issue").await;
    assert_eq!(reply, replies::ask_category());
    assert_eq!(fake.call_count(), 1);
}
