//! The connection-legality engine.
//!
//! [`can_connect`] is a pure decision function over the current graph state:
//! it answers whether a parent node may gain a given child, and with which
//! reason it may not. The rules encode the dungeon-design constraints (the
//! graph is a forest rooted at the entrance, corridors alternate with rooms,
//! at most one connected boss room, bounded corridor fan-out).
//!
//! Rules are evaluated in a fixed order and short-circuit on the first
//! failure, so the reported [`ConnectionError`] is deterministic: a child
//! that already has a parent is rejected as such even when a type rule
//! would also apply.

use crate::graph::RoomNodeGraph;
use crate::node::NodeId;
use thiserror::Error;

/// Why a proposed parent→child connection was rejected.
///
/// All of these are benign from the editor's point of view:
/// [`RoomNodeGraph::try_connect`] maps them to `false` and the UI simply
/// does not draw the edge. The `Display` text is suitable for a status bar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("node {0} does not exist in this graph")]
    UnknownNode(NodeId),
    #[error("a node cannot connect to itself")]
    SelfLoop,
    #[error("these nodes are already connected")]
    DuplicateEdge,
    #[error("unassigned nodes cannot be connection targets")]
    ChildUnassigned,
    #[error("the entrance is always the root and cannot become a child")]
    ChildIsEntrance,
    #[error("node already has a parent")]
    ChildAlreadyParented,
    #[error("the graph already has a connected boss room")]
    BossRoomAlreadyConnected,
    #[error("a corridor cannot lead to another corridor")]
    AdjacentCorridors,
    #[error("two rooms must be bridged by a corridor")]
    AdjacentRooms,
    #[error("room already has the maximum of {max} child corridors")]
    CorridorLimitReached { max: usize },
    #[error("a corridor can lead to at most one room")]
    CorridorAlreadyOccupied,
}

/// Decide whether `parent_id` may gain `child_id` as a child.
///
/// Pure with respect to the graph: no mutation, no interior state. Unknown
/// ids are reported as [`ConnectionError::UnknownNode`] rather than
/// panicking, so callers can feed raw hit-test results straight in.
pub fn can_connect(
    graph: &RoomNodeGraph,
    parent_id: NodeId,
    child_id: NodeId,
) -> Result<(), ConnectionError> {
    if parent_id == child_id {
        return Err(ConnectionError::SelfLoop);
    }

    let parent = graph
        .lookup(parent_id)
        .ok_or(ConnectionError::UnknownNode(parent_id))?;
    let child = graph
        .lookup(child_id)
        .ok_or(ConnectionError::UnknownNode(child_id))?;

    if parent.child_ids().contains(&child_id) {
        return Err(ConnectionError::DuplicateEdge);
    }

    let catalog = graph.catalog();
    if catalog.is_none_type(child.room_type()) {
        return Err(ConnectionError::ChildUnassigned);
    }
    if catalog.is_entrance(child.room_type()) {
        return Err(ConnectionError::ChildIsEntrance);
    }

    // Single incoming edge per node: the graph is a forest, not a DAG.
    if !child.parent_ids().is_empty() {
        return Err(ConnectionError::ChildAlreadyParented);
    }

    // Only a *connected* boss room counts towards uniqueness; an unwired
    // boss-typed node sitting on the canvas does not.
    if catalog.is_boss_room(child.room_type()) {
        let connected_boss_exists = graph.all_nodes().any(|node| {
            catalog.is_boss_room(node.room_type()) && !node.parent_ids().is_empty()
        });
        if connected_boss_exists {
            return Err(ConnectionError::BossRoomAlreadyConnected);
        }
    }

    let parent_is_corridor = catalog.is_corridor(parent.room_type());
    let child_is_corridor = catalog.is_corridor(child.room_type());
    if parent_is_corridor && child_is_corridor {
        return Err(ConnectionError::AdjacentCorridors);
    }
    if !parent_is_corridor && !child_is_corridor {
        return Err(ConnectionError::AdjacentRooms);
    }

    if child_is_corridor {
        let max = graph.max_child_corridors();
        if parent.child_ids().len() >= max {
            return Err(ConnectionError::CorridorLimitReached { max });
        }
    } else if !parent.child_ids().is_empty() {
        return Err(ConnectionError::CorridorAlreadyOccupied);
    }

    Ok(())
}
