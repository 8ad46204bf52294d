//! Tests for MatchmakerService

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use super::*;
use crate::adapters::{RandomIdentitySource, TokioRoundTimer};
use crate::domain::{EntryId, JoinRequest, MatchError, MatchOutcome, NatType, RoundConfig};
use crate::ports::MatchmakerApi;
use crate::test_utils::{ManualRoundTimer, ScriptedIdentitySource};

fn make_request(n: u8) -> JoinRequest {
    JoinRequest::new(
        NatType::FullCone,
        format!("203.0.113.{n}:4000"),
        format!("10.0.0.{n}:4000"),
    )
}

/// Service with a manual timer and scripted `(id, key)` pairs.
fn make_service(
    capacity: usize,
    identities: impl IntoIterator<Item = (u32, u32)>,
) -> (MatchmakerService, Arc<ManualRoundTimer>) {
    let timer = Arc::new(ManualRoundTimer::new());
    let service = MatchmakerService::new(
        RoundConfig::new(capacity, Duration::from_millis(50)),
        timer.clone(),
        Arc::new(ScriptedIdentitySource::new(identities)),
    )
    .unwrap();
    (service, timer)
}

fn take(pending: &mut PendingMatch) -> MatchOutcome {
    pending.try_outcome().expect("outcome delivered")
}

fn peer_ids(outcome: &MatchOutcome) -> Vec<u32> {
    outcome
        .as_ref()
        .expect("success outcome")
        .peers
        .iter()
        .map(|p| p.id.get())
        .collect()
}

#[test]
fn test_new_rejects_invalid_config() {
    let result = MatchmakerService::new(
        RoundConfig::new(0, Duration::from_secs(1)),
        Arc::new(ManualRoundTimer::new()),
        Arc::new(RandomIdentitySource::new()),
    );
    assert!(result.is_err());
}

#[test]
fn test_pair_scenario_tokens_match_on_both_sides() {
    let (service, timer) = make_service(2, [(1, 10), (2, 20)]);

    let mut a = service.submit(make_request(1));
    assert_eq!(timer.armed_count(), 1);
    let mut b = service.submit(make_request(2));

    let outcome_a = take(&mut a).unwrap();
    let outcome_b = take(&mut b).unwrap();

    let mut input = Vec::new();
    for word in [20u32, 2, 10, 1] {
        input.extend_from_slice(&word.to_le_bytes());
    }
    let expected = STANDARD.encode(&Sha256::digest(&input)[..22]);

    let a_in_b = outcome_b.peer(EntryId::new(1)).unwrap();
    let b_in_a = outcome_a.peer(EntryId::new(2)).unwrap();
    assert_eq!(a_in_b.token.as_str(), expected);
    assert_eq!(b_in_a.token.as_str(), expected);
    assert_eq!(a_in_b.public_endpoint, "203.0.113.1:4000");
    assert_eq!(b_in_a.local_endpoint, "10.0.0.2:4000");
    assert_eq!(outcome_a.id, EntryId::new(1));
    assert_eq!(outcome_b.id, EntryId::new(2));
}

#[test]
fn test_capacity_arrival_resolves_before_submit_returns() {
    let (service, timer) = make_service(4, [(1, 10), (2, 20), (3, 30), (4, 40)]);

    let mut pending: Vec<_> = (1..=3).map(|n| service.submit(make_request(n))).collect();
    assert_eq!(timer.armed_count(), 3);
    assert!(pending.iter_mut().all(|p| p.try_outcome().is_none()));

    let mut last = service.submit(make_request(4));

    // No timer for the last arrival, and everyone already has a result.
    assert_eq!(timer.armed_count(), 3);
    assert_eq!(peer_ids(&take(&mut last)), vec![1, 2, 3, 4]);
    for p in &mut pending {
        assert_eq!(peer_ids(&take(p)), vec![1, 2, 3, 4]);
    }
    assert_eq!(service.pool().waiting, 0);
    assert_eq!(service.stats().rounds_full, 1);
}

#[test]
fn test_stale_timers_after_full_round_are_ignored() {
    let (service, timer) = make_service(3, []);

    let mut pending: Vec<_> = (1..=3).map(|n| service.submit(make_request(n))).collect();
    for p in &mut pending {
        assert!(take(p).is_ok());
    }

    // Next round has started before the old timers fire.
    let mut next = service.submit(make_request(9));
    assert_eq!(timer.armed_count(), 3);

    assert!(timer.fire_next());
    assert!(timer.fire_next());

    assert!(next.try_outcome().is_none());
    assert_eq!(service.pool().waiting, 1);
    let stats = service.stats();
    assert_eq!(stats.stale_timers, 2);
    assert_eq!(stats.solo_timeouts, 0);

    // The remaining timer belongs to the new entry and times it out.
    assert!(timer.fire_next());
    assert_eq!(take(&mut next), Err(MatchError::Timeout));
}

#[test]
fn test_solo_entry_times_out() {
    let (service, timer) = make_service(4, []);
    let mut alone = service.submit(make_request(1));

    assert_eq!(timer.pending_waits(), vec![Duration::from_millis(50)]);
    assert!(timer.fire_next());

    assert_eq!(take(&mut alone), Err(MatchError::Timeout));
    assert_eq!(service.pool().waiting, 0);
    assert_eq!(service.stats().solo_timeouts, 1);
}

#[test]
fn test_partial_round_closes_on_first_timer() {
    let (service, timer) = make_service(4, [(1, 10), (2, 20)]);
    let mut a = service.submit(make_request(1));
    let mut b = service.submit(make_request(2));

    assert!(timer.fire_next());

    assert_eq!(peer_ids(&take(&mut a)), vec![1, 2]);
    assert_eq!(peer_ids(&take(&mut b)), vec![1, 2]);
    assert_eq!(service.pool().waiting, 0);

    // B's own timer fires later and changes nothing.
    assert!(timer.fire_next());
    let stats = service.stats();
    assert_eq!(stats.rounds_partial, 1);
    assert_eq!(stats.stale_timers, 1);
}

#[test]
fn test_try_outcome_hands_out_result_once() {
    let (service, _timer) = make_service(2, [(1, 10), (2, 20)]);
    let mut a = service.submit(make_request(1));
    let _b = service.submit(make_request(2));

    assert!(take(&mut a).is_ok());
    assert_eq!(a.try_outcome(), None);
    assert_eq!(a.try_outcome(), None);
}

#[test]
fn test_dropped_receiver_does_not_block_round() {
    let (service, timer) = make_service(3, []);
    let gone = service.submit(make_request(1));
    let mut b = service.submit(make_request(2));
    drop(gone);

    let mut c = service.submit(make_request(3));

    assert_eq!(peer_ids(&take(&mut b)).len(), 3);
    assert_eq!(peer_ids(&take(&mut c)).len(), 3);
    assert_eq!(service.stats().undelivered, 1);
    assert_eq!(timer.fire_all(), 2);
}

#[test]
fn test_dropping_service_abandons_waiting_entries() {
    let (service, timer) = make_service(4, []);
    let mut waiting = service.submit(make_request(1));
    drop(service);

    assert_eq!(take(&mut waiting), Err(MatchError::Abandoned));
    // Timer callback finds no coordinator and does nothing.
    assert!(timer.fire_next());
}

#[test]
fn test_counters_track_joins() {
    let (service, _timer) = make_service(2, []);
    let _a = service.submit(make_request(1));
    let _b = service.submit(make_request(2));
    let _c = service.submit(make_request(3));

    let stats = service.stats();
    assert_eq!(stats.joined, 3);
    assert_eq!(stats.rounds_full, 1);
    assert_eq!(service.pool().waiting, 1);
    assert_eq!(service.pool().rounds_closed, 1);
}

#[tokio::test(start_paused = true)]
async fn test_join_pair_with_tokio_timer() {
    let service = MatchmakerService::new(
        RoundConfig::new(2, Duration::from_millis(50)),
        Arc::new(TokioRoundTimer::try_current().unwrap()),
        Arc::new(RandomIdentitySource::new()),
    )
    .unwrap();

    let (a, b) = tokio::join!(service.join(make_request(1)), service.join(make_request(2)));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.peers.len(), 2);
    assert_eq!(a.peer(b.id).unwrap().token, b.peer(a.id).unwrap().token);
}

#[tokio::test(start_paused = true)]
async fn test_join_alone_times_out_with_tokio_timer() {
    let service = MatchmakerService::new(
        RoundConfig::for_testing(),
        Arc::new(TokioRoundTimer::try_current().unwrap()),
        Arc::new(RandomIdentitySource::new()),
    )
    .unwrap();

    let started = tokio::time::Instant::now();
    let outcome = service.join(make_request(1)).await;

    assert_eq!(outcome, Err(MatchError::Timeout));
    assert!(started.elapsed() >= Duration::from_millis(50));
    assert_eq!(service.pool().waiting, 0);
}

#[tokio::test(start_paused = true)]
async fn test_late_joiner_closes_partial_round_with_tokio_timer() {
    let service = MatchmakerService::new(
        RoundConfig::new(4, Duration::from_millis(100)),
        Arc::new(TokioRoundTimer::try_current().unwrap()),
        Arc::new(RandomIdentitySource::new()),
    )
    .unwrap();

    let first = service.submit(make_request(1));
    tokio::time::sleep(Duration::from_millis(40)).await;
    let second = service.submit(make_request(2));

    let (a, b) = tokio::join!(first.wait(), second.wait());

    assert_eq!(a.unwrap().peers.len(), 2);
    assert_eq!(b.unwrap().peers.len(), 2);
    assert_eq!(service.stats().rounds_partial, 1);

    // Let the second timer fire; it must be a no-op.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(service.stats().stale_timers, 1);
}
