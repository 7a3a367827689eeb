//! A single room-node: one vertex of the dungeon layout graph.

use crate::catalog::{RoomTypeCatalog, RoomTypeId};
use crate::geometry::Rect;
use std::fmt;
use uuid::Uuid;

/// Unique, immutable identifier of a room node.
///
/// Ids are the only cross-reference between nodes; the graph's id→node map
/// is the single owner of every [`RoomNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One graph vertex: identity, type reference, edge lists, and transient
/// editor state (placement rectangle, selection and drag flags).
///
/// Edge lists keep insertion order and never contain duplicates; the pairing
/// of `parent_ids`/`child_ids` across nodes is maintained by
/// [`RoomNodeGraph`](crate::graph::RoomNodeGraph), which is also the only
/// way to mutate them.
#[derive(Clone, Debug)]
pub struct RoomNode {
    id: NodeId,
    room_type: RoomTypeId,
    parent_ids: Vec<NodeId>,
    child_ids: Vec<NodeId>,
    rect: Rect,
    selected: bool,
    dragging: bool,
}

impl RoomNode {
    pub(crate) fn new(room_type: RoomTypeId, rect: Rect) -> Self {
        Self {
            id: NodeId::fresh(),
            room_type,
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
            rect,
            selected: false,
            dragging: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn room_type(&self) -> RoomTypeId {
        self.room_type
    }

    /// Parents in connection order. In-degree is at most one for every
    /// graph reachable through the public API.
    pub fn parent_ids(&self) -> &[NodeId] {
        &self.parent_ids
    }

    /// Children in connection order.
    pub fn child_ids(&self) -> &[NodeId] {
        &self.child_ids
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Translate the node's rectangle. Pure movement, no validation.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.rect.translate(dx, dy);
    }

    /// Change the node's type.
    ///
    /// Fails (returns `false`, no mutation) if the node is already wired
    /// under a parent, is the entrance, or `new_type` is not in the catalog.
    pub fn retype(&mut self, catalog: &RoomTypeCatalog, new_type: RoomTypeId) -> bool {
        if !self.parent_ids.is_empty() || catalog.is_entrance(self.room_type) {
            return false;
        }
        if catalog.get(new_type).is_none() {
            return false;
        }
        self.room_type = new_type;
        true
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub(crate) fn add_parent(&mut self, id: NodeId) {
        debug_assert!(!self.parent_ids.contains(&id));
        self.parent_ids.push(id);
    }

    pub(crate) fn add_child(&mut self, id: NodeId) {
        debug_assert!(!self.child_ids.contains(&id));
        self.child_ids.push(id);
    }

    /// Remove a parent reference if present; reports whether it was there.
    pub(crate) fn remove_parent(&mut self, id: NodeId) -> bool {
        let before = self.parent_ids.len();
        self.parent_ids.retain(|&p| p != id);
        self.parent_ids.len() != before
    }

    /// Remove a child reference if present; reports whether it was there.
    pub(crate) fn remove_child(&mut self, id: NodeId) -> bool {
        let before = self.child_ids.len();
        self.child_ids.retain(|&c| c != id);
        self.child_ids.len() != before
    }
}
