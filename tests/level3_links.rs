//! Level 3: Connection Legality Tests
//!
//! Tests the full connection rule set end to end, both through the graph
//! API and through pointer-driven connection drawing.

mod common;

use common::{at, EditorHarness};
use pretty_assertions::assert_eq;
use room_node_graph::{ConnectionError, Effect, EditorState, PointerButton};

#[test]
fn test_room_corridor_room_chain_connects() {
    let mut h = EditorHarness::new();
    let room_a = h.spawn(0, h.small_room);
    let corridor = h.spawn(1, h.corridor);
    let room_b = h.spawn(2, h.large_room);

    assert!(h.graph.try_connect(room_a, corridor));
    assert!(h.graph.try_connect(corridor, room_b));

    assert_eq!(h.graph.lookup(room_a).unwrap().child_ids(), &[corridor]);
    assert_eq!(h.graph.lookup(corridor).unwrap().parent_ids(), &[room_a]);
    assert_eq!(h.graph.lookup(corridor).unwrap().child_ids(), &[room_b]);
    assert_eq!(h.graph.lookup(room_b).unwrap().parent_ids(), &[corridor]);
}

#[test]
fn test_room_to_room_needs_a_corridor() {
    let mut h = EditorHarness::new();
    let a = h.spawn(0, h.small_room);
    let b = h.spawn(1, h.large_room);
    assert_eq!(h.graph.connect(a, b), Err(ConnectionError::AdjacentRooms));
}

#[test]
fn test_corridor_to_corridor_is_rejected() {
    let mut h = EditorHarness::new();
    let a = h.spawn(0, h.corridor);
    let b = h.spawn(1, h.corridor);
    assert_eq!(h.graph.connect(a, b), Err(ConnectionError::AdjacentCorridors));
}

#[test]
fn test_self_loop_is_rejected_first() {
    let mut h = EditorHarness::new();
    let a = h.spawn(0, h.corridor);
    // Self loops take precedence over the corridor adjacency rule.
    assert_eq!(h.graph.connect(a, a), Err(ConnectionError::SelfLoop));
}

#[test]
fn test_duplicate_edge_is_rejected() {
    let mut h = EditorHarness::new();
    let room = h.spawn(0, h.small_room);
    let corridor = h.spawn(1, h.corridor);
    assert!(h.graph.try_connect(room, corridor));
    assert_eq!(
        h.graph.connect(room, corridor),
        Err(ConnectionError::DuplicateEdge)
    );
    // The existing edge is untouched.
    assert_eq!(h.graph.lookup(room).unwrap().child_ids(), &[corridor]);
}

#[test]
fn test_unassigned_node_cannot_be_a_child() {
    let mut h = EditorHarness::new();
    let room = h.spawn(0, h.small_room);
    let blank = h.spawn(1, h.none);
    assert_eq!(
        h.graph.connect(room, blank),
        Err(ConnectionError::ChildUnassigned)
    );
}

#[test]
fn test_entrance_cannot_be_a_child() {
    let mut h = EditorHarness::new();
    let corridor = h.spawn(0, h.corridor);
    let entrance = h.spawn(1, h.entrance);
    assert_eq!(
        h.graph.connect(corridor, entrance),
        Err(ConnectionError::ChildIsEntrance)
    );
}

#[test]
fn test_child_with_a_parent_is_rejected() {
    let mut h = EditorHarness::new();
    let room_a = h.spawn(0, h.small_room);
    let room_b = h.spawn(1, h.large_room);
    let corridor = h.spawn(2, h.corridor);
    assert!(h.graph.try_connect(room_a, corridor));
    assert_eq!(
        h.graph.connect(room_b, corridor),
        Err(ConnectionError::ChildAlreadyParented)
    );
    // In-degree stays at most one everywhere.
    assert!(h.graph.all_nodes().all(|n| n.parent_ids().len() <= 1));
}

#[test]
fn test_corridor_fan_out_is_capped() {
    let mut h = EditorHarness::new();
    let room = h.spawn(0, h.small_room);
    let c1 = h.spawn(1, h.corridor);
    let c2 = h.spawn(2, h.corridor);
    let c3 = h.spawn(3, h.corridor);
    let c4 = h.spawn(4, h.corridor);

    assert!(h.graph.try_connect(room, c1));
    assert!(h.graph.try_connect(room, c2));
    assert!(h.graph.try_connect(room, c3));
    assert_eq!(
        h.graph.connect(room, c4),
        Err(ConnectionError::CorridorLimitReached { max: 3 })
    );
    assert_eq!(h.graph.lookup(room).unwrap().child_ids().len(), 3);
}

#[test]
fn test_corridor_leads_to_one_room_only() {
    let mut h = EditorHarness::new();
    let room_a = h.spawn(0, h.small_room);
    let corridor = h.spawn(1, h.corridor);
    let room_b = h.spawn(2, h.large_room);
    let room_c = h.spawn(3, h.small_room);

    assert!(h.graph.try_connect(room_a, corridor));
    assert!(h.graph.try_connect(corridor, room_b));
    assert_eq!(
        h.graph.connect(corridor, room_c),
        Err(ConnectionError::CorridorAlreadyOccupied)
    );
}

#[test]
fn test_only_one_boss_room_joins_the_dungeon() {
    let mut h = EditorHarness::new();
    let room = h.spawn(0, h.small_room);
    let c1 = h.spawn(1, h.corridor);
    let c2 = h.spawn(2, h.corridor);
    let boss_a = h.spawn(3, h.boss_room);
    let boss_b = h.spawn(4, h.boss_room);

    assert!(h.graph.try_connect(room, c1));
    assert!(h.graph.try_connect(room, c2));
    assert!(h.graph.try_connect(c1, boss_a));
    assert_eq!(
        h.graph.connect(c2, boss_b),
        Err(ConnectionError::BossRoomAlreadyConnected)
    );

    // Disconnecting the first boss frees the slot.
    h.graph.disconnect(c1, boss_a);
    assert!(h.graph.try_connect(c2, boss_b));
}

#[test]
fn test_unconnected_boss_rooms_do_not_block() {
    let mut h = EditorHarness::new();
    // A boss room merely existing on the canvas is fine.
    let _idle_boss = h.spawn(0, h.boss_room);
    let corridor = h.spawn(1, h.corridor);
    let boss = h.spawn(2, h.boss_room);
    // Parent the corridor first so the layout is realistic.
    let room = h.spawn(3, h.small_room);
    assert!(h.graph.try_connect(room, corridor));
    assert!(h.graph.try_connect(corridor, boss));
}

#[test]
fn test_unknown_ids_reject_without_panicking() {
    let mut h = EditorHarness::new();
    let mut other = EditorHarness::new();
    let local = h.spawn(0, h.small_room);
    let foreign = other.spawn(0, other.corridor);

    assert_eq!(
        h.graph.connect(local, foreign),
        Err(ConnectionError::UnknownNode(foreign))
    );
    assert_eq!(
        h.graph.connect(foreign, local),
        Err(ConnectionError::UnknownNode(foreign))
    );
    assert!(!h.graph.try_connect(foreign, local));
}

#[test]
fn test_drawing_a_connection_with_the_pointer() {
    let mut h = EditorHarness::new();
    let room = h.spawn(0, h.small_room);
    let corridor = h.spawn(2, h.corridor);

    let effects = h.press(PointerButton::Secondary, h.center_of(room));
    assert_eq!(effects, vec![Effect::ConnectionStarted(room)]);
    assert_eq!(h.controller.state(), EditorState::DrawingConnection(room));
    assert_eq!(h.graph.pending_connection().unwrap().source, room);

    let effects = h.release(PointerButton::Secondary, h.center_of(corridor));
    assert_eq!(
        effects,
        vec![Effect::ConnectionMade {
            parent: room,
            child: corridor
        }]
    );
    assert!(h.graph.pending_connection().is_none());
}

#[test]
fn test_dropping_on_an_illegal_target_reports_the_reason() {
    let mut h = EditorHarness::new();
    let room_a = h.spawn(0, h.small_room);
    let room_b = h.spawn(2, h.large_room);

    let effects = h.draw_connection(room_a, room_b);
    assert_eq!(
        effects,
        vec![Effect::ConnectionRejected {
            parent: room_a,
            child: room_b,
            reason: ConnectionError::AdjacentRooms,
        }]
    );
    assert!(h.graph.lookup(room_a).unwrap().child_ids().is_empty());
}

#[test]
fn test_dropping_on_empty_canvas_cancels() {
    let mut h = EditorHarness::new();
    let room = h.spawn(0, h.small_room);

    h.press(PointerButton::Secondary, h.center_of(room));
    let effects = h.release(PointerButton::Secondary, at(4000.0, 4000.0));
    assert_eq!(effects, vec![Effect::ConnectionCancelled]);
    assert!(h.graph.pending_connection().is_none());
}

#[test]
fn test_rejection_messages_read_well() {
    let mut h = EditorHarness::new();
    let a = h.spawn(0, h.small_room);
    let b = h.spawn(1, h.large_room);
    let err = h.graph.connect(a, b).unwrap_err();
    assert_eq!(err.to_string(), "two rooms must be bridged by a corridor");
}
