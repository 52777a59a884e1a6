use tictac::transport::in_memory::InMemoryTransport;
use tictac::transport::Transport;
use tictac::{ConnectionEvent, ConnectionManager, MoveIntent, MoveOutbox};
use tokio::time::{timeout, Duration};

#[tokio::test]
async fn test_in_memory_round_trip() {
    let (mut a, mut b) = InMemoryTransport::pair();
    a.send("hello".to_string()).await.unwrap();
    assert_eq!(b.recv().await.unwrap(), Some("hello".to_string()));

    b.send("world".to_string()).await.unwrap();
    assert_eq!(a.recv().await.unwrap(), Some("world".to_string()));
}

#[tokio::test]
async fn test_in_memory_close_drains_then_ends() {
    let (mut a, mut b) = InMemoryTransport::pair();
    a.send("one".to_string()).await.unwrap();
    a.send("two".to_string()).await.unwrap();
    a.close();

    assert_eq!(b.recv().await.unwrap(), Some("one".to_string()));
    assert_eq!(b.recv().await.unwrap(), Some("two".to_string()));
    assert_eq!(b.recv().await.unwrap(), None);

    assert!(a.send("three".to_string()).await.is_err());
}

#[tokio::test]
async fn test_in_memory_dropped_peer_ends_stream() {
    let (a, mut b) = InMemoryTransport::pair();
    drop(a);
    assert_eq!(b.recv().await.unwrap(), None);
}

#[tokio::test]
async fn test_manager_emits_opened_first() {
    let (client_half, _server_half) = InMemoryTransport::pair();
    let mut manager = ConnectionManager::spawn(Box::new(client_half));
    assert_eq!(manager.next_event().await, Some(ConnectionEvent::Opened));
}

#[tokio::test]
async fn test_manager_delivers_messages_in_arrival_order() {
    let (client_half, mut server_half) = InMemoryTransport::pair();
    let mut manager = ConnectionManager::spawn(Box::new(client_half));

    server_half.send("first".to_string()).await.unwrap();
    server_half.send("second".to_string()).await.unwrap();

    assert_eq!(manager.next_event().await, Some(ConnectionEvent::Opened));
    assert_eq!(
        manager.next_event().await,
        Some(ConnectionEvent::Message("first".to_string()))
    );
    assert_eq!(
        manager.next_event().await,
        Some(ConnectionEvent::Message("second".to_string()))
    );
}

#[tokio::test]
async fn test_manager_reports_close_once_and_last() {
    let (client_half, mut server_half) = InMemoryTransport::pair();
    let mut manager = ConnectionManager::spawn(Box::new(client_half));

    server_half.send("state".to_string()).await.unwrap();
    server_half.close();

    assert_eq!(manager.next_event().await, Some(ConnectionEvent::Opened));
    assert_eq!(
        manager.next_event().await,
        Some(ConnectionEvent::Message("state".to_string()))
    );
    assert_eq!(manager.next_event().await, Some(ConnectionEvent::Closed));
    // Nothing after Closed: the stream ends.
    assert_eq!(manager.next_event().await, None);
}

#[tokio::test]
async fn test_sender_is_fire_and_forget() {
    let (client_half, mut server_half) = InMemoryTransport::pair();
    let manager = ConnectionManager::spawn(Box::new(client_half));

    let sender = manager.sender();
    sender.send_move(&MoveIntent { row: 1, column: 1 });

    let wire = timeout(Duration::from_secs(1), server_half.recv())
        .await
        .expect("move should be pumped promptly")
        .unwrap();
    assert_eq!(wire, Some(r#"{"Row":1,"Column":1}"#.to_string()));
}

#[tokio::test]
async fn test_sender_survives_closed_connection() {
    let (client_half, server_half) = InMemoryTransport::pair();
    let mut manager = ConnectionManager::spawn(Box::new(client_half));

    server_half.close();
    assert_eq!(manager.next_event().await, Some(ConnectionEvent::Opened));
    assert_eq!(manager.next_event().await, Some(ConnectionEvent::Closed));

    // Delivery failure never propagates to the caller.
    let sender = manager.sender();
    sender.send_move(&MoveIntent { row: 0, column: 0 });
}
