//! Retry Tests
//!
//! Transport failures, connection invalidation and the retry bound.

mod common;

use std::io::ErrorKind;

use bloomd_client::BloomError;
use common::{scripted_client, scripted_client_with_retries, sleeps, Session};

fn assert_reset(err: BloomError) {
    match err {
        BloomError::ConnectionFailed(io) => assert_eq!(io.kind(), ErrorKind::ConnectionReset),
        other => panic!("expected connection reset, got {other:?}"),
    }
}

#[test]
fn test_retry_after_reset() {
    let (mut client, log) = scripted_client(vec![
        Session::Fail("", ErrorKind::ConnectionReset),
        Session::Serve("No\n"),
    ]);

    assert!(!client.set("foobar", "fookey").unwrap());

    let log = log.borrow();
    assert_eq!(log.sent(), vec!["s foobar fookey", "s foobar fookey"]);
    assert_eq!(log.connects, 2);
    assert_eq!(sleeps(), 1);
}

#[test]
fn test_raise_after_five_attempts() {
    let sessions = vec![Session::Fail("", ErrorKind::ConnectionReset); 5];
    let (mut client, log) = scripted_client(sessions);

    assert_reset(client.set("foobar", "fookey").unwrap_err());
    assert_eq!(log.borrow().sent().len(), 5);
    assert_eq!(log.borrow().connects, 5);
    assert_eq!(sleeps(), 4);
    assert!(!client.is_connected());
}

#[test]
fn test_zero_retries_raise_immediately() {
    let (mut client, log) = scripted_client_with_retries(
        vec![
            Session::Fail("", ErrorKind::ConnectionReset),
            Session::Serve("Yes\n"),
        ],
        0,
    );

    assert_reset(client.check("foobar", "fookey").unwrap_err());
    assert_eq!(log.borrow().connects, 1);
    assert_eq!(sleeps(), 0);
}

#[test]
fn test_broken_pipe_on_write_is_retried() {
    let (mut client, log) = scripted_client(vec![
        Session::FailWrite(ErrorKind::BrokenPipe),
        Session::Serve("Done\n"),
    ]);

    assert!(client.drop_filter("foobar").unwrap());
    assert_eq!(log.borrow().sent(), vec!["drop foobar"]);
    assert_eq!(sleeps(), 1);
}

#[test]
fn test_refused_connect_counts_as_attempt() {
    let (mut client, log) = scripted_client_with_retries(
        vec![Session::Refuse, Session::Refuse, Session::Serve("Done\n")],
        3,
    );

    assert!(client.flush(None).unwrap());
    assert_eq!(log.borrow().connects, 3);
    assert_eq!(sleeps(), 2);
}

#[test]
fn test_connect_timeout_is_not_retried() {
    let (mut client, log) =
        scripted_client(vec![Session::Timeout, Session::Serve("Done\n")]);

    let err = client.flush(None).unwrap_err();
    assert!(matches!(err, BloomError::ConnectionTimeout { .. }));
    assert_eq!(log.borrow().connects, 1);
    assert_eq!(sleeps(), 0);
}

#[test]
fn test_closed_mid_block_is_retried() {
    let (mut client, log) = scripted_client(vec![
        Session::Serve("START\nfoobar 0.001 1797211 1000000 0\n"),
        Session::Serve("START\nfoobar 0.001 1797211 1000000 0\nEND\n"),
    ]);

    let filters = client.list().unwrap();
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].name, "foobar");
    assert_eq!(log.borrow().connects, 2);
    assert_eq!(sleeps(), 1);
}

#[test]
fn test_closed_stream_surfaces_after_exhaustion() {
    let sessions = vec![Session::Serve("START\nfoobar 0.001 1797211 1000000 0\n"); 5];
    let (mut client, log) = scripted_client(sessions);

    let err = client.list().unwrap_err();
    assert!(matches!(err, BloomError::ConnectionClosed));
    assert_eq!(log.borrow().connects, 5);
    assert_eq!(sleeps(), 4);
}

#[test]
fn test_dropped_connection_after_reuse() {
    // First session answers once, then the server goes away
    let (mut client, log) = scripted_client(vec![
        Session::Serve("Done\n"),
        Session::Serve("Yes\n"),
    ]);

    assert!(client.flush(None).unwrap());
    assert!(client.check("foobar", "fookey").unwrap());

    let log = log.borrow();
    assert_eq!(log.connects, 2);
    assert_eq!(log.sent(), vec!["flush", "c foobar fookey", "c foobar fookey"]);
    assert_eq!(sleeps(), 1);
}

#[test]
fn test_retry_budget_is_per_operation() {
    let (mut client, log) = scripted_client_with_retries(
        vec![
            Session::Fail("", ErrorKind::ConnectionReset),
            Session::Fail("Done\n", ErrorKind::ConnectionReset),
            Session::Serve("Done\n"),
        ],
        2,
    );

    // Attempt 1 resets, attempt 2 succeeds: the whole budget is used
    assert!(client.flush(None).unwrap());
    // The reused connection resets; this operation starts with a fresh budget
    assert!(client.flush(None).unwrap());
    assert_eq!(log.borrow().connects, 3);
    assert_eq!(sleeps(), 2);
}

#[test]
fn test_truncated_line_is_retried() {
    // The stream ends partway through "Yes\n"
    let (mut client, log) =
        scripted_client(vec![Session::Serve("Ye"), Session::Serve("Yes\n")]);

    assert!(client.check("foobar", "fookey").unwrap());
    assert_eq!(log.borrow().connects, 2);
    assert_eq!(sleeps(), 1);
}

#[test]
fn test_truncated_end_sentinel_is_retried() {
    let (mut client, log) = scripted_client(vec![
        Session::Serve("START\nfoobar 0.001 1797211 1000000 0\nEN"),
        Session::Serve("START\nEND\n"),
    ]);

    assert!(client.list().unwrap().is_empty());
    assert_eq!(log.borrow().connects, 2);
    assert_eq!(sleeps(), 1);
}
