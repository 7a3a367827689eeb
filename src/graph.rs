//! The room-node graph: the authoritative store for one dungeon layout.
//!
//! A [`RoomNodeGraph`] owns every [`RoomNode`] of a layout and is the only
//! legal way to change graph state. All structural mutation funnels through
//! the connection validator and keeps the edge lists consistent: no dangling
//! references, no asymmetric edges. Hosts subscribe to structural changes
//! through [`set_change_listener`](RoomNodeGraph::set_change_listener) to
//! drive persistence.
//!
//! Illegal requests (bad connection, deleting the entrance, disconnecting an
//! absent edge) are benign: signalled by `bool`/no-op returns, never a panic.
//! A referential-integrity breach, on the other hand, would be a bug in this
//! module, and debug builds assert against it after every mutation.

use crate::catalog::{RoomTypeCatalog, RoomTypeId};
use crate::geometry::{Point, Rect};
use crate::node::{NodeId, RoomNode};
use crate::validator::{can_connect, ConnectionError};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Default bound on how many corridors may branch out of a single room.
pub const DEFAULT_MAX_CHILD_CORRIDORS: usize = 3;

/// A connection drag in flight: the source node and the live cursor
/// position, exposed so hosts can draw the preview line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingConnection {
    pub source: NodeId,
    pub cursor: Point,
}

type ChangeListener = Box<dyn Fn()>;

/// Owns the set of room nodes for one dungeon layout.
///
/// Nodes are stored in an insertion-ordered id→node map; ids are the only
/// cross-reference between nodes. One graph instance exists per layout
/// asset and lives for the editing session.
pub struct RoomNodeGraph {
    catalog: Rc<RoomTypeCatalog>,
    nodes: IndexMap<NodeId, RoomNode>,
    pending_connection: Option<PendingConnection>,
    max_child_corridors: usize,
    change_listener: Option<ChangeListener>,
}

impl fmt::Debug for RoomNodeGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomNodeGraph")
            .field("nodes", &self.nodes.len())
            .field("pending_connection", &self.pending_connection)
            .field("max_child_corridors", &self.max_child_corridors)
            .finish_non_exhaustive()
    }
}

impl RoomNodeGraph {
    /// Create an empty graph over a shared, read-only type catalog.
    pub fn new(catalog: Rc<RoomTypeCatalog>) -> Self {
        Self::with_max_child_corridors(catalog, DEFAULT_MAX_CHILD_CORRIDORS)
    }

    /// Create an empty graph with a custom corridor fan-out bound.
    pub fn with_max_child_corridors(catalog: Rc<RoomTypeCatalog>, max: usize) -> Self {
        Self {
            catalog,
            nodes: IndexMap::new(),
            pending_connection: None,
            max_child_corridors: max,
            change_listener: None,
        }
    }

    pub fn catalog(&self) -> &RoomTypeCatalog {
        &self.catalog
    }

    pub fn max_child_corridors(&self) -> usize {
        self.max_child_corridors
    }

    /// Register the persistence collaborator.
    ///
    /// The callback fires after every successful structural mutation
    /// (create, connect, disconnect, delete, retype); the collaborator
    /// re-reads graph state through the read API. Selection and drag
    /// changes are transient and do not fire it.
    pub fn set_change_listener(&mut self, listener: impl Fn() + 'static) {
        self.change_listener = Some(Box::new(listener));
    }

    fn notify_changed(&self) {
        if let Some(listener) = &self.change_listener {
            listener();
        }
    }

    // === Read access ===

    pub fn lookup(&self, id: NodeId) -> Option<&RoomNode> {
        self.nodes.get(&id)
    }

    /// All nodes in insertion order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &RoomNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Topmost node whose rectangle contains the point.
    ///
    /// Later-created nodes draw on top, so the scan runs newest-first.
    pub fn node_at(&self, position: Point) -> Option<NodeId> {
        self.nodes
            .values()
            .rev()
            .find(|node| node.rect().contains(position))
            .map(RoomNode::id)
    }

    // === Structural mutation ===

    /// Allocate a new node with a fresh id and the default node-sized
    /// rectangle at `position`. Always succeeds; type policy (entrance
    /// first, "none" for ad-hoc nodes) belongs to the caller.
    pub fn create_node(&mut self, position: Point, room_type: RoomTypeId) -> NodeId {
        debug_assert!(
            self.catalog.get(room_type).is_some(),
            "room type {} is not in the catalog",
            room_type.index()
        );
        let node = RoomNode::new(room_type, Rect::at_node_size(position));
        let id = node.id();
        debug!(node = %id, room_type = room_type.index(), "created room node");
        self.nodes.insert(id, node);
        self.notify_changed();
        id
    }

    /// Connect `parent_id` → `child_id`, reporting the rejection reason on
    /// failure. The edge is recorded on both endpoints or not at all.
    pub fn connect(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), ConnectionError> {
        can_connect(self, parent_id, child_id)?;
        // Both ids were resolved by the validator.
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.add_child(child_id);
        }
        if let Some(child) = self.nodes.get_mut(&child_id) {
            child.add_parent(parent_id);
        }
        debug!(parent = %parent_id, child = %child_id, "connected room nodes");
        self.debug_assert_consistent();
        self.notify_changed();
        Ok(())
    }

    /// Validator-gated connect. Returns `false` on any rejection, including
    /// unknown ids; never panics for a structurally invalid pair.
    pub fn try_connect(&mut self, parent_id: NodeId, child_id: NodeId) -> bool {
        match self.connect(parent_id, child_id) {
            Ok(()) => true,
            Err(reason) => {
                debug!(parent = %parent_id, child = %child_id, %reason, "connection rejected");
                false
            }
        }
    }

    /// Remove the edge in both directions if present; no-op if absent.
    pub fn disconnect(&mut self, parent_id: NodeId, child_id: NodeId) {
        let removed = self
            .nodes
            .get_mut(&parent_id)
            .map_or(false, |parent| parent.remove_child(child_id));
        if let Some(child) = self.nodes.get_mut(&child_id) {
            child.remove_parent(parent_id);
        }
        if removed {
            debug!(parent = %parent_id, child = %child_id, "disconnected room nodes");
            self.debug_assert_consistent();
            self.notify_changed();
        }
    }

    /// Delete a node, pruning it from every neighbor's edge list first.
    ///
    /// Entrance-typed nodes are permanent for the session: deleting one is
    /// a no-op, as is deleting an unknown id.
    pub fn delete_node(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if self.catalog.is_entrance(node.room_type()) {
            debug!(node = %id, "refusing to delete entrance node");
            return;
        }
        self.detach_and_remove(id);
        self.debug_assert_consistent();
        self.notify_changed();
    }

    /// Delete every selected, non-entrance node.
    ///
    /// The deletion set is computed against one snapshot of the graph
    /// before any node is removed, so cross-references among nodes deleted
    /// together resolve correctly.
    pub fn delete_selected(&mut self) {
        let doomed: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|node| node.is_selected() && !self.catalog.is_entrance(node.room_type()))
            .map(RoomNode::id)
            .collect();
        if doomed.is_empty() {
            return;
        }
        for id in doomed {
            self.detach_and_remove(id);
        }
        self.debug_assert_consistent();
        self.notify_changed();
    }

    /// Remove every edge whose **both** endpoints are selected, then clear
    /// the selection. Edges from a selected node to an unselected one are
    /// left alone.
    pub fn disconnect_selected(&mut self) {
        let pairs: Vec<(NodeId, NodeId)> = self
            .nodes
            .values()
            .filter(|parent| parent.is_selected())
            .flat_map(|parent| {
                parent
                    .child_ids()
                    .iter()
                    .filter(|&&child_id| {
                        self.nodes
                            .get(&child_id)
                            .map_or(false, RoomNode::is_selected)
                    })
                    .map(|&child_id| (parent.id(), child_id))
                    .collect::<Vec<_>>()
            })
            .collect();

        for &(parent_id, child_id) in &pairs {
            if let Some(parent) = self.nodes.get_mut(&parent_id) {
                parent.remove_child(child_id);
            }
            if let Some(child) = self.nodes.get_mut(&child_id) {
                child.remove_parent(parent_id);
            }
        }
        self.clear_selection();
        if !pairs.is_empty() {
            debug!(edges = pairs.len(), "removed links between selected nodes");
            self.debug_assert_consistent();
            self.notify_changed();
        }
    }

    /// Change a node's type through [`RoomNode::retype`]; fires the change
    /// notification when the retype succeeds.
    pub fn retype_node(&mut self, id: NodeId, new_type: RoomTypeId) -> bool {
        let catalog = Rc::clone(&self.catalog);
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.retype(&catalog, new_type) {
            debug!(node = %id, room_type = new_type.index(), "retyped room node");
            self.notify_changed();
            true
        } else {
            false
        }
    }

    fn detach_and_remove(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let parents: Vec<NodeId> = node.parent_ids().to_vec();
        let children: Vec<NodeId> = node.child_ids().to_vec();
        for parent_id in parents {
            if let Some(parent) = self.nodes.get_mut(&parent_id) {
                parent.remove_child(id);
            }
        }
        for child_id in children {
            if let Some(child) = self.nodes.get_mut(&child_id) {
                child.remove_parent(id);
            }
        }
        // A connection drag from the removed node would dangle.
        if self.pending_connection.map(|p| p.source) == Some(id) {
            self.pending_connection = None;
        }
        self.nodes.shift_remove(&id);
        debug!(node = %id, "deleted room node");
    }

    // === Transient editor state ===

    /// Translate a node by a pointer delta. Transient; no notification.
    pub fn translate_node(&mut self, id: NodeId, dx: f32, dy: f32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            trace!(node = %id, dx, dy, "dragging room node");
            node.translate(dx, dy);
        }
    }

    /// Translate every node by the same delta (canvas panning).
    pub fn pan_all(&mut self, dx: f32, dy: f32) {
        for node in self.nodes.values_mut() {
            node.translate(dx, dy);
        }
    }

    pub fn set_dragging(&mut self, id: NodeId, dragging: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_dragging(dragging);
        }
    }

    /// Toggle a node's selection flag; returns the new state
    /// (`false` for unknown ids).
    pub fn toggle_selected(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                let now = !node.is_selected();
                node.set_selected(now);
                now
            }
            None => false,
        }
    }

    pub fn select_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.set_selected(true);
        }
    }

    pub fn clear_selection(&mut self) {
        for node in self.nodes.values_mut() {
            node.set_selected(false);
        }
    }

    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.is_selected())
            .map(RoomNode::id)
            .collect()
    }

    // === Connection drag ===

    /// Start a connection drag from a node; `false` for unknown ids.
    pub fn begin_connection_from(&mut self, source: NodeId, cursor: Point) -> bool {
        if !self.nodes.contains_key(&source) {
            return false;
        }
        self.pending_connection = Some(PendingConnection { source, cursor });
        true
    }

    /// Move the live cursor of the drag; no-op when no drag is active.
    pub fn update_connection_cursor(&mut self, cursor: Point) {
        if let Some(pending) = &mut self.pending_connection {
            trace!(source = %pending.source, "connection preview moved");
            pending.cursor = cursor;
        }
    }

    /// Finish or cancel the connection drag. No graph mutation.
    pub fn end_connection(&mut self) {
        self.pending_connection = None;
    }

    pub fn pending_connection(&self) -> Option<&PendingConnection> {
        self.pending_connection.as_ref()
    }

    // === Invariant checking ===

    /// Assert referential integrity and edge symmetry.
    ///
    /// A failure here is a bug in this module's mutation operations, not a
    /// recoverable condition; the check runs in debug builds only.
    pub fn debug_assert_consistent(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        for (id, node) in &self.nodes {
            for parent_id in node.parent_ids() {
                let parent = self.nodes.get(parent_id).unwrap_or_else(|| {
                    panic!("room node {id} references missing parent {parent_id}")
                });
                assert!(
                    parent.child_ids().contains(id),
                    "edge {parent_id} -> {id} is missing its child record"
                );
            }
            for child_id in node.child_ids() {
                let child = self
                    .nodes
                    .get(child_id)
                    .unwrap_or_else(|| panic!("room node {id} references missing child {child_id}"));
                assert!(
                    child.parent_ids().contains(id),
                    "edge {id} -> {child_id} is missing its parent record"
                );
            }
        }
    }
}
