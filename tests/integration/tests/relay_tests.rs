//! End-to-end tests for the chat relay gateway
//!
//! Each test spawns its own gateway over a fresh in-memory store, so
//! message ids always start at 1.
//!
//! Ordering discipline: a client proves its own membership by sending a
//! probe message and receiving it back - the connection's event stream
//! is FIFO, so anything the client sends after that is handled with the
//! membership in place. Tests sequence cross-client assertions on those
//! probes instead of sleeping.

use anyhow::Result;
use integration_tests::helpers::TestServer;
use relay_core::value_objects::MessageId;

#[tokio::test]
async fn username_assigned_once_at_connect() -> Result<()> {
    let server = TestServer::start().await?;

    let client = server.client().await?;
    assert!(!client.username.is_empty());
    // "Adjective Noun" shape
    assert_eq!(client.username.split(' ').count(), 2);

    Ok(())
}

#[tokio::test]
async fn join_empty_room_then_send_delivers_id_one() -> Result<()> {
    let server = TestServer::start().await?;

    let mut client = server.client().await?;
    client.join("lobby").await?;
    client.send_chat("hi", Some("S-0")).await?;

    let event = client.expect_chat().await?;
    assert_eq!(event.message, format!("{}: hi", client.username));
    assert_eq!(event.id, MessageId::new(1));

    Ok(())
}

#[tokio::test]
async fn broadcast_reaches_every_member_including_sender() -> Result<()> {
    let server = TestServer::start().await?;

    let mut s1 = server.client().await?;
    s1.join("lobby").await?;
    s1.send_chat("p1", Some("pr-1")).await?;
    s1.expect_chat().await?;

    let mut s2 = server.client().await?;
    s2.join("lobby").await?;
    // History replay hands s2 the probe it missed
    assert_eq!(s2.expect_chat().await?.id, MessageId::new(1));
    s2.send_chat("p2", Some("pr-2")).await?;
    s2.expect_chat().await?;
    s1.expect_chat().await?;

    s1.send_chat("hello", Some("s1-0")).await?;
    let e1 = s1.expect_chat().await?;
    let e2 = s2.expect_chat().await?;

    assert_eq!(e1.message, format!("{}: hello", s1.username));
    assert_eq!(e1.message, e2.message);
    assert_eq!(e1.id, e2.id);

    Ok(())
}

#[tokio::test]
async fn broadcast_is_isolated_per_room() -> Result<()> {
    let server = TestServer::start().await?;

    let mut s1 = server.client().await?;
    let mut s2 = server.client().await?;
    s1.join("room-a").await?;
    s2.join("room-b").await?;

    s1.send_chat("only for a", Some("s1-0")).await?;

    // Sender gets its own broadcast; the other room hears nothing
    s1.expect_chat().await?;
    s2.expect_silence().await?;

    Ok(())
}

#[tokio::test]
async fn duplicate_offset_stores_once_and_broadcasts_once() -> Result<()> {
    let server = TestServer::start().await?;

    let mut s1 = server.client().await?;
    s1.join("lobby").await?;
    s1.send_chat("p1", Some("pr-1")).await?;
    s1.expect_chat().await?;

    let mut s2 = server.client().await?;
    s2.join("lobby").await?;
    s2.expect_chat().await?;
    s2.send_chat("p2", Some("pr-2")).await?;
    let probe = s2.expect_chat().await?;
    s1.expect_chat().await?;

    // s1 sends and the room sees it once
    s1.send_chat("hi", Some("S1-0")).await?;
    let e1 = s1.expect_chat().await?;
    let e2 = s2.expect_chat().await?;
    assert_eq!(e1.id, e2.id);
    assert_eq!(e1.message, format!("{}: hi", s1.username));
    assert_eq!(e1.id, MessageId::new(probe.id.into_inner() + 1));

    // s2 replays the same network call (dropped-ack retry): the store
    // keeps one row and nothing is re-broadcast
    s2.send_chat("hi", Some("S1-0")).await?;
    s1.expect_silence().await?;
    s2.expect_silence().await?;

    Ok(())
}

#[tokio::test]
async fn send_without_room_has_no_side_effect() -> Result<()> {
    let server = TestServer::start().await?;

    let mut client = server.client().await?;
    client.send_chat("dropped", Some("x-0")).await?;
    client.expect_silence().await?;

    // The dropped send left no row behind: the first persisted message
    // still gets id 1, and the join replays no history
    client.join("lobby").await?;
    client.send_chat("first", Some("x-1")).await?;

    let event = client.expect_chat().await?;
    assert_eq!(event.id, MessageId::new(1));
    assert_eq!(event.message, format!("{}: first", client.username));

    Ok(())
}

#[tokio::test]
async fn join_replays_full_history_in_order() -> Result<()> {
    let server = TestServer::start().await?;

    let mut s1 = server.client().await?;
    s1.join("lobby").await?;
    for n in 0..3 {
        s1.send_chat(&format!("msg {n}"), Some(&format!("s1-{n}"))).await?;
        s1.expect_chat().await?;
    }

    // A later join sees the same three lines, ascending, before anything live
    let mut s2 = server.client().await?;
    s2.join("lobby").await?;

    let history = s2.expect_chats(3).await?;
    for (n, event) in history.iter().enumerate() {
        assert_eq!(event.id, MessageId::new(n as i64 + 1));
        assert_eq!(event.message, format!("{}: msg {n}", s1.username));
    }

    Ok(())
}

#[tokio::test]
async fn rejoining_same_room_replays_history_again() -> Result<()> {
    let server = TestServer::start().await?;

    let mut client = server.client().await?;
    client.join("lobby").await?;
    client.send_chat("hi", Some("c-0")).await?;
    client.expect_chat().await?;

    client.join("lobby").await?;

    let replay = client.expect_chat().await?;
    assert_eq!(replay.id, MessageId::new(1));

    Ok(())
}

#[tokio::test]
async fn resume_replays_exactly_the_missed_messages() -> Result<()> {
    let server = TestServer::start().await?;

    // First session: five messages, then gone
    let mut s1 = server.client().await?;
    s1.join("lobby").await?;
    let mut last_seen = MessageId::ZERO;
    for n in 0..5 {
        s1.send_chat(&format!("early {n}"), Some(&format!("s1-{n}"))).await?;
        last_seen = s1.expect_chat().await?.id;
    }
    assert_eq!(last_seen, MessageId::new(5));
    drop(s1);

    // Another member keeps talking while the first is away
    let mut s2 = server.client().await?;
    s2.join("lobby").await?;
    s2.expect_chats(5).await?;
    for n in 0..2 {
        s2.send_chat(&format!("while away {n}"), Some(&format!("s2-{n}"))).await?;
        s2.expect_chat().await?;
    }

    // Reconnect and resume from the last id actually received
    let mut s1b = server.client().await?;
    s1b.resume("lobby", last_seen).await?;

    let missed = s1b.expect_chats(2).await?;
    assert_eq!(missed[0].id, MessageId::new(6));
    assert_eq!(missed[1].id, MessageId::new(7));
    assert_eq!(missed[0].message, format!("{}: while away 0", s2.username));

    // Resumed session is a live member again: its own send is accepted
    // and broadcast, continuing the id sequence
    s1b.send_chat("i am back", Some("s1b-0")).await?;
    let back = s1b.expect_chat().await?;
    assert_eq!(back.id, MessageId::new(8));
    s2.expect_chat().await?;

    // And live delivery flows the other way too
    s2.send_chat("welcome back", Some("s2-2")).await?;
    let live = s1b.expect_chat().await?;
    assert_eq!(live.id, MessageId::new(9));
    s2.expect_chat().await?;

    s1b.expect_silence().await?;

    Ok(())
}

#[tokio::test]
async fn resume_from_zero_replays_everything() -> Result<()> {
    let server = TestServer::start().await?;

    let mut s1 = server.client().await?;
    s1.join("lobby").await?;
    for n in 0..3 {
        s1.send_chat(&format!("msg {n}"), Some(&format!("s1-{n}"))).await?;
        s1.expect_chat().await?;
    }
    drop(s1);

    let mut s2 = server.client().await?;
    s2.resume("lobby", MessageId::ZERO).await?;

    let replay = s2.expect_chats(3).await?;
    assert_eq!(replay[0].id, MessageId::new(1));
    assert_eq!(replay[2].id, MessageId::new(3));

    Ok(())
}

#[tokio::test]
async fn blank_room_join_is_ignored_silently() -> Result<()> {
    let server = TestServer::start().await?;

    let mut client = server.client().await?;
    client.join("  ").await?;
    client.send_chat("dropped", Some("x-0")).await?;
    client.expect_silence().await?;

    // The connection stays usable
    client.join("lobby").await?;
    client.send_chat("works", Some("x-1")).await?;
    let event = client.expect_chat().await?;
    assert_eq!(event.id, MessageId::new(1));

    Ok(())
}

#[tokio::test]
async fn leaving_stops_live_delivery() -> Result<()> {
    let server = TestServer::start().await?;

    let mut s1 = server.client().await?;
    s1.join("lobby").await?;
    s1.send_chat("p1", Some("pr-1")).await?;
    s1.expect_chat().await?;

    let mut s2 = server.client().await?;
    s2.join("lobby").await?;
    s2.expect_chat().await?;
    s2.send_chat("p2", Some("pr-2")).await?;
    s2.expect_chat().await?;
    s1.expect_chat().await?;

    // Leave, then prove it took effect: the next send on the same
    // connection is handled after the leave and gets dropped
    s2.leave("lobby").await?;
    s2.send_chat("should drop", Some("s2-x")).await?;
    s2.expect_silence().await?;

    s1.send_chat("after leave", Some("s1-0")).await?;
    s1.expect_chat().await?;
    s2.expect_silence().await?;

    Ok(())
}

#[tokio::test]
async fn join_while_in_a_room_requires_explicit_leave() -> Result<()> {
    let server = TestServer::start().await?;

    let mut s1 = server.client().await?;
    s1.join("lobby").await?;
    s1.send_chat("p1", Some("pr-1")).await?;
    s1.expect_chat().await?;

    let mut s2 = server.client().await?;
    s2.join("lobby").await?;
    s2.expect_chat().await?;
    s2.send_chat("p2", Some("pr-2")).await?;
    s2.expect_chat().await?;
    s1.expect_chat().await?;

    // Refused: s1 stays a lobby member, so lobby still hears it
    s1.join("den").await?;
    s1.send_chat("still in lobby", Some("s1-0")).await?;
    let e1 = s1.expect_chat().await?;
    let e2 = s2.expect_chat().await?;
    assert_eq!(e1.message, format!("{}: still in lobby", s1.username));
    assert_eq!(e1.id, e2.id);

    // After an explicit leave the move goes through
    s1.leave("lobby").await?;
    s1.join("den").await?;
    s1.send_chat("in den now", Some("s1-1")).await?;
    let den_event = s1.expect_chat().await?;
    assert_eq!(den_event.message, format!("{}: in den now", s1.username));
    s2.expect_silence().await?;

    Ok(())
}
