// ABOUTME: Tests for the arbiter event loop, driven one message at a time.
// ABOUTME: Covers the admission cap, completion priority, bookkeeping, and shutdown.

use std::sync::Arc;

use tokio_test::task::spawn;
use tokio_test::{assert_pending, assert_ready};

use super::*;
use crate::hook::{DinnerEvent, HookRegistry, MemoryJournal};

fn arbiter(agents: usize, cap: usize) -> (ArbiterClient, Arbiter) {
    let (client, inbox) = channel(agents);
    let arbiter = Arbiter::new(agents, cap, inbox, Arc::new(HookRegistry::new()));
    (client, arbiter)
}

async fn admit(client: &ArbiterClient, arbiter: &mut Arbiter, agent: usize) {
    let mut request = spawn(client.request(agent));
    assert_pending!(request.poll());
    assert!(arbiter.step().await);
    let decision = assert_ready!(request.poll()).unwrap();
    assert_eq!(decision, Decision::Granted, "agent {} should be admitted", agent);
}

#[tokio::test]
async fn test_grants_until_cap_then_denies() {
    let (client, mut arbiter) = arbiter(5, 2);

    admit(&client, &mut arbiter, 0).await;
    admit(&client, &mut arbiter, 2).await;

    let mut request = spawn(client.request(4));
    assert_pending!(request.poll());
    assert!(arbiter.step().await);
    assert_eq!(assert_ready!(request.poll()).unwrap(), Decision::Denied);

    assert_eq!(arbiter.book().admitted(), 2);
    assert!(!arbiter.book().is_admitted(4));

    let report = arbiter.report();
    assert_eq!(report.grants, 2);
    assert_eq!(report.denials, 1);
    assert_eq!(report.peak_admitted, 2);
}

#[tokio::test]
async fn test_completion_processed_before_pending_request() {
    let (client, inbox) = channel(5);
    let hooks = Arc::new(HookRegistry::new());
    let journal = MemoryJournal::shared();
    hooks.register_arc(journal.clone()).await;
    let mut arbiter = Arbiter::new(5, 2, inbox, hooks);

    admit(&client, &mut arbiter, 0).await;
    admit(&client, &mut arbiter, 2).await;

    // The request is queued first, then the completion; both are ready.
    let mut request = spawn(client.request(3));
    assert_pending!(request.poll());
    let mut completion = spawn(client.complete(0));
    assert_pending!(completion.poll());

    assert!(arbiter.step().await);
    assert!(!arbiter.book().is_admitted(0));
    assert_eq!(arbiter.book().admitted(), 1);
    assert_ready!(completion.poll()).unwrap();
    assert_pending!(request.poll());

    assert!(arbiter.step().await);
    assert_eq!(assert_ready!(request.poll()).unwrap(), Decision::Granted);

    let events = journal.events().await;
    assert_eq!(
        &events[2..],
        &[
            DinnerEvent::Released {
                agent: 0,
                admitted: 1
            },
            DinnerEvent::Granted {
                agent: 3,
                admitted: 2
            },
        ]
    );
}

#[tokio::test]
async fn test_completion_clears_book_before_ack() {
    let (client, mut arbiter) = arbiter(5, 2);
    admit(&client, &mut arbiter, 1).await;

    let mut completion = spawn(client.complete(1));
    assert_pending!(completion.poll());
    assert!(arbiter.book().is_admitted(1));

    assert!(arbiter.step().await);
    assert!(!arbiter.book().is_admitted(1));
    assert_ready!(completion.poll()).unwrap();
    assert_eq!(arbiter.report().completions, 1);
}

#[tokio::test]
async fn test_abandoned_grant_is_rolled_back() {
    let (client, mut arbiter) = arbiter(5, 2);

    let mut request = spawn(client.request(2));
    assert_pending!(request.poll());
    drop(request);

    assert!(arbiter.step().await);
    assert!(arbiter.book().is_empty());
    assert_eq!(arbiter.report().grants, 1);
}

#[tokio::test]
async fn test_run_exits_when_clients_dropped() {
    let (client, arbiter) = arbiter(5, 2);
    drop(client);

    let report = arbiter.run().await;
    assert_eq!(report, ArbiterReport::default());
}

#[tokio::test]
async fn test_run_serves_clients_until_dropped() {
    let (client, arbiter) = arbiter(3, 1);
    let handle = tokio::spawn(arbiter.run());

    for agent in 0..3 {
        assert_eq!(client.request(agent).await.unwrap(), Decision::Granted);
        client.complete(agent).await.unwrap();
    }
    drop(client);

    let report = handle.await.unwrap();
    assert_eq!(report.grants, 3);
    assert_eq!(report.completions, 3);
    assert_eq!(report.peak_admitted, 1);
}

#[tokio::test]
async fn test_client_errors_when_arbiter_gone() {
    let (client, arbiter) = arbiter(2, 1);
    drop(arbiter);

    let err = client.request(1).await.unwrap_err();
    assert!(matches!(
        err,
        crate::error::DiningError::ArbiterUnavailable { agent: 1 }
    ));
}

#[tokio::test]
#[should_panic(expected = "still admitted")]
async fn test_run_panics_if_agent_left_admitted() {
    let (client, mut arbiter) = arbiter(5, 2);
    admit(&client, &mut arbiter, 0).await;
    drop(client);

    arbiter.run().await;
}

#[tokio::test]
#[should_panic(expected = "without being admitted")]
async fn test_completion_without_grant_panics() {
    let (client, mut arbiter) = arbiter(5, 2);

    let mut completion = spawn(client.complete(3));
    assert_pending!(completion.poll());
    arbiter.step().await;
}

#[tokio::test]
#[should_panic(expected = "requested while already admitted")]
async fn test_request_while_admitted_panics() {
    let (client, mut arbiter) = arbiter(5, 2);
    admit(&client, &mut arbiter, 0).await;

    let mut request = spawn(client.request(0));
    assert_pending!(request.poll());
    arbiter.step().await;
}

#[tokio::test]
#[should_panic(expected = "unknown agent")]
async fn test_unknown_agent_panics() {
    let (client, mut arbiter) = arbiter(2, 1);

    let mut request = spawn(client.request(7));
    assert_pending!(request.poll());
    arbiter.step().await;
}
