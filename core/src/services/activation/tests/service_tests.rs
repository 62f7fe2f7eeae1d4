//! Unit tests for [`TokenEngine`]

use std::sync::Arc;

use crate::domain::entities::ActivationToken;
use crate::domain::value_objects::ActionKind;
use crate::errors::{DomainError, ResendDenial};
use crate::repositories::store::{KeyValueStore, MemoryStore};
use crate::services::activation::TokenEngine;
use crate::services::clock::MockClock;
use crate::services::random::MockRandom;

const EMAIL: &str = "user@example.com";
const PRIMARY_KEY: &str = "activation:token:mock-uuid-0";
const INDEX_KEY: &str = "activation:email:user@example.com:registration";

fn engine_at(
    start: i64,
) -> (
    Arc<MockClock>,
    Arc<MemoryStore>,
    TokenEngine<MemoryStore, MockClock, MockRandom>,
) {
    let clock = Arc::new(MockClock::new(start));
    let store = Arc::new(MemoryStore::with_clock(clock.clone()));
    let random = Arc::new(MockRandom::new());
    let engine = TokenEngine::new(store.clone(), clock.clone(), random);
    (clock, store, engine)
}

#[tokio::test]
async fn test_generate_creates_fresh_token_with_dual_keys() {
    let (_, store, engine) = engine_at(1_000);

    let generated = engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();

    assert!(generated.freshly_created);
    assert_eq!(generated.token.token, "mock-uuid-0");
    assert_eq!(generated.token.send_count, 1);
    assert_eq!(generated.token.expires_at, 1_000 + 30 * 60);

    // Primary record and email index land together.
    assert!(store.get(PRIMARY_KEY).await.unwrap().is_some());
    assert_eq!(
        store.get(INDEX_KEY).await.unwrap(),
        Some("mock-uuid-0".to_string())
    );
    assert_eq!(store.ttl_remaining(PRIMARY_KEY).await.unwrap(), Some(1_800));
    assert_eq!(store.ttl_remaining(INDEX_KEY).await.unwrap(), Some(1_800));
}

#[tokio::test]
async fn test_generate_reuses_live_token() {
    let (clock, _, engine) = engine_at(1_000);

    let first = engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();

    clock.advance(61);
    let second = engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();

    assert!(!second.freshly_created);
    assert_eq!(second.token.token, first.token.token);
    assert_eq!(second.token.expires_at, first.token.expires_at);
    assert_eq!(second.token.send_count, 2);
    assert_eq!(second.token.last_sent_at, 1_061);
}

#[tokio::test]
async fn test_generate_respects_cooldown() {
    let (clock, _, engine) = engine_at(1_000);

    engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();

    clock.advance(10);
    match engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap_err()
    {
        DomainError::ResendDenied(ResendDenial::Cooldown { next_allowed_at }) => {
            assert_eq!(next_allowed_at, 1_060);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_cooldown_boundary_is_exactly_sixty_seconds() {
    let (clock, _, engine) = engine_at(1_000);

    engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();

    clock.set(1_059);
    assert!(matches!(
        engine.resend(EMAIL, &ActionKind::Registration).await,
        Err(DomainError::ResendDenied(ResendDenial::Cooldown { .. }))
    ));

    clock.set(1_060);
    let token = engine
        .resend(EMAIL, &ActionKind::Registration)
        .await
        .unwrap();
    assert_eq!(token.send_count, 2);
}

#[tokio::test]
async fn test_exhaustion_beats_cooldown_and_blocks_both_paths() {
    let (clock, _, engine) = engine_at(1_000);

    engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();
    clock.advance(61);
    engine
        .resend(EMAIL, &ActionKind::Registration)
        .await
        .unwrap();
    clock.advance(61);
    let third = engine
        .resend(EMAIL, &ActionKind::Registration)
        .await
        .unwrap();
    assert_eq!(third.send_count, 3);

    // Cap reached: denied immediately (inside a cooldown window) and
    // still denied long after the cooldown has passed.
    for wait in [1, 600] {
        clock.advance(wait);
        for result in [
            engine
                .generate(EMAIL, &ActionKind::Registration, "MailGate")
                .await
                .map(|_| ()),
            engine
                .resend(EMAIL, &ActionKind::Registration)
                .await
                .map(|_| ()),
        ] {
            match result.unwrap_err() {
                DomainError::ResendDenied(ResendDenial::MaxSendsReached {
                    send_count,
                    max_sends,
                }) => {
                    assert_eq!(send_count, 3);
                    assert_eq!(max_sends, 3);
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }
}

#[tokio::test]
async fn test_expired_slot_frees_up_for_a_fresh_token() {
    let (clock, _, engine) = engine_at(1_000);

    // Exhaust the token, then let the TTL evict it.
    engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();
    clock.advance(61);
    engine
        .resend(EMAIL, &ActionKind::Registration)
        .await
        .unwrap();
    clock.advance(61);
    engine
        .resend(EMAIL, &ActionKind::Registration)
        .await
        .unwrap();

    clock.set(1_000 + 30 * 60);
    let fresh = engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();
    assert!(fresh.freshly_created);
    assert_eq!(fresh.token.token, "mock-uuid-1");
    assert_eq!(fresh.token.send_count, 1);
}

#[tokio::test]
async fn test_actions_are_independent_slots() {
    let (_, _, engine) = engine_at(1_000);

    let registration = engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();
    let reset = engine
        .generate(EMAIL, &ActionKind::PasswordReset, "MailGate")
        .await
        .unwrap();

    assert!(registration.freshly_created);
    assert!(reset.freshly_created);
    assert_ne!(registration.token.token, reset.token.token);
}

#[tokio::test]
async fn test_resend_without_live_token_is_not_found() {
    let (_, _, engine) = engine_at(1_000);

    assert!(matches!(
        engine.resend(EMAIL, &ActionKind::Registration).await,
        Err(DomainError::NotFoundOrExpired { .. })
    ));
}

#[tokio::test]
async fn test_resend_preserves_identifier_and_expiry() {
    let (clock, store, engine) = engine_at(1_000);

    let first = engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();

    clock.advance(61);
    let resent = engine
        .resend(EMAIL, &ActionKind::Registration)
        .await
        .unwrap();

    assert_eq!(resent.token, first.token.token);
    assert_eq!(resent.expires_at, first.token.expires_at);

    // The rewrite kept the remaining TTL instead of restarting it.
    assert_eq!(store.ttl_remaining(PRIMARY_KEY).await.unwrap(), Some(1_739));
}

#[tokio::test]
async fn test_redeem_is_single_use() {
    let (_, store, engine) = engine_at(1_000);

    engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();

    let claims = engine.redeem("mock-uuid-0").await.unwrap();
    assert_eq!(claims.email, EMAIL);
    assert_eq!(claims.action, ActionKind::Registration);
    assert_eq!(claims.system, "MailGate");

    assert_eq!(store.get(PRIMARY_KEY).await.unwrap(), None);
    assert_eq!(store.get(INDEX_KEY).await.unwrap(), None);
    assert!(matches!(
        engine.redeem("mock-uuid-0").await,
        Err(DomainError::NotFoundOrExpired { .. })
    ));
}

#[tokio::test]
async fn test_redeem_unknown_token_is_not_found() {
    let (_, _, engine) = engine_at(1_000);

    assert!(matches!(
        engine.redeem("no-such-token").await,
        Err(DomainError::NotFoundOrExpired { .. })
    ));
}

#[tokio::test]
async fn test_redeem_past_expiry_purges_record() {
    let (clock, store, engine) = engine_at(1_000);

    // Plant a record whose store TTL outlives its absolute expiry, as
    // happens when the store clock lags the application clock.
    let token = ActivationToken::new(
        "mock-uuid-0",
        EMAIL,
        ActionKind::Registration,
        "MailGate",
        1_000,
    );
    store
        .set_pair(
            PRIMARY_KEY,
            &serde_json::to_string(&token).unwrap(),
            INDEX_KEY,
            "mock-uuid-0",
            100_000,
        )
        .await
        .unwrap();

    clock.set(1_000 + 30 * 60 + 1);
    assert!(matches!(
        engine.redeem("mock-uuid-0").await,
        Err(DomainError::TokenExpired)
    ));

    assert_eq!(store.get(PRIMARY_KEY).await.unwrap(), None);
    assert_eq!(store.get(INDEX_KEY).await.unwrap(), None);
    assert!(matches!(
        engine.redeem("mock-uuid-0").await,
        Err(DomainError::NotFoundOrExpired { .. })
    ));
}

#[tokio::test]
async fn test_redeem_survives_delete_failure() {
    let (_, store, engine) = engine_at(1_000);

    engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();
    store.set_fail_deletes(true);

    let claims = engine.redeem("mock-uuid-0").await.unwrap();
    assert_eq!(claims.email, EMAIL);

    // Cleanup failed; the record stays until the TTL collects it.
    store.set_fail_deletes(false);
    assert!(store.get(PRIMARY_KEY).await.unwrap().is_some());
}

#[tokio::test]
async fn test_discard_frees_the_slot() {
    let (_, store, engine) = engine_at(1_000);

    let generated = engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();
    engine.discard(&generated.token).await.unwrap();

    assert_eq!(store.get(PRIMARY_KEY).await.unwrap(), None);
    assert_eq!(store.get(INDEX_KEY).await.unwrap(), None);

    // The next request is first-time generation again.
    let next = engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();
    assert!(next.freshly_created);
    assert_eq!(next.token.token, "mock-uuid-1");
    assert_eq!(next.token.send_count, 1);
}

#[tokio::test]
async fn test_eligibility_reports_free_slot_and_live_token() {
    let (clock, _, engine) = engine_at(1_000);

    assert!(engine
        .check_resend_eligibility(EMAIL, &ActionKind::Registration)
        .await
        .unwrap()
        .is_none());

    engine
        .generate(EMAIL, &ActionKind::Registration, "MailGate")
        .await
        .unwrap();
    clock.advance(60);

    let live = engine
        .check_resend_eligibility(EMAIL, &ActionKind::Registration)
        .await
        .unwrap()
        .expect("live token");
    assert_eq!(live.token, "mock-uuid-0");
    assert_eq!(live.send_count, 1);
}
