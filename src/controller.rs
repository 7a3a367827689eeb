//! Pointer-driven interaction layer over the room-node graph.
//!
//! The [`InteractionController`] is a small state machine that turns raw
//! pointer events from the host shell into graph operations: selecting and
//! dragging nodes, panning the canvas, drawing connections, and running
//! context-menu actions. It owns no graph data itself, only the current
//! interaction mode, so the graph stays the single source of truth.
//!
//! Every handled event returns a list of [`Effect`]s telling the host what
//! changed and what to redraw or surface (for example a rejected
//! connection, or a request to open the context menu).

use crate::geometry::Point;
use crate::graph::RoomNodeGraph;
use crate::node::NodeId;
use crate::validator::ConnectionError;
use tracing::debug;

/// Where the entrance node is placed when the first node of an empty
/// graph is created.
pub const ENTRANCE_SPAWN: Point = Point { x: 200.0, y: 200.0 };

/// Which pointer button an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button: selection, node dragging, canvas panning.
    Primary,
    /// Right button: connection drawing and the context menu.
    Secondary,
}

/// A raw pointer event as delivered by the host shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    ButtonDown {
        button: PointerButton,
        position: Point,
    },
    ButtonUp {
        button: PointerButton,
        position: Point,
    },
    Drag {
        button: PointerButton,
        position: Point,
        dx: f32,
        dy: f32,
    },
}

/// The controller's interaction mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Idle,
    /// A node is being moved with the primary button held.
    DraggingNode(NodeId),
    /// The empty canvas is being dragged; all nodes pan together.
    DraggingCanvas,
    /// A connection preview line is being drawn from this source node.
    DrawingConnection(NodeId),
}

/// What an event changed, for the host to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SelectionChanged,
    NodeMoved(NodeId),
    CanvasPanned,
    NodeCreated(NodeId),
    ConnectionStarted(NodeId),
    ConnectionMade {
        parent: NodeId,
        child: NodeId,
    },
    ConnectionRejected {
        parent: NodeId,
        child: NodeId,
        reason: ConnectionError,
    },
    ConnectionCancelled,
    /// The host should open its context menu at this position.
    ContextMenuRequested(Point),
}

/// An action chosen from the host's context menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextAction {
    /// Create a node at the menu position ("none" typed until assigned).
    CreateNode,
    SelectAll,
    DisconnectSelected,
    DeleteSelected,
}

/// Translates pointer events and menu actions into graph operations.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: EditorState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Feed one pointer event through the state machine.
    ///
    /// While a connection is being drawn the drag captures all input:
    /// releasing the secondary button completes or cancels it, and any
    /// primary press cancels it outright.
    pub fn handle_event(&mut self, graph: &mut RoomNodeGraph, event: PointerEvent) -> Vec<Effect> {
        match self.state {
            EditorState::DrawingConnection(source) => self.on_connection_event(graph, source, event),
            EditorState::DraggingNode(id) => self.on_node_drag_event(graph, id, event),
            EditorState::DraggingCanvas => self.on_canvas_drag_event(graph, event),
            EditorState::Idle => self.on_idle_event(graph, event),
        }
    }

    fn on_idle_event(&mut self, graph: &mut RoomNodeGraph, event: PointerEvent) -> Vec<Effect> {
        match event {
            PointerEvent::ButtonDown {
                button: PointerButton::Primary,
                position,
            } => match graph.node_at(position) {
                Some(id) => {
                    graph.toggle_selected(id);
                    graph.set_dragging(id, true);
                    self.state = EditorState::DraggingNode(id);
                    vec![Effect::SelectionChanged]
                }
                None => {
                    graph.clear_selection();
                    self.state = EditorState::DraggingCanvas;
                    vec![Effect::SelectionChanged]
                }
            },
            PointerEvent::ButtonDown {
                button: PointerButton::Secondary,
                position,
            } => match graph.node_at(position) {
                Some(id) => {
                    graph.begin_connection_from(id, position);
                    self.state = EditorState::DrawingConnection(id);
                    vec![Effect::ConnectionStarted(id)]
                }
                None => vec![Effect::ContextMenuRequested(position)],
            },
            // Unpaired releases and drags arrive when a press happened
            // outside the canvas; ignore them.
            PointerEvent::ButtonUp { .. } | PointerEvent::Drag { .. } => Vec::new(),
        }
    }

    fn on_node_drag_event(
        &mut self,
        graph: &mut RoomNodeGraph,
        id: NodeId,
        event: PointerEvent,
    ) -> Vec<Effect> {
        match event {
            PointerEvent::Drag { dx, dy, .. } => {
                graph.translate_node(id, dx, dy);
                vec![Effect::NodeMoved(id)]
            }
            PointerEvent::ButtonUp {
                button: PointerButton::Primary,
                ..
            } => {
                graph.set_dragging(id, false);
                self.state = EditorState::Idle;
                Vec::new()
            }
            PointerEvent::ButtonDown {
                button: PointerButton::Secondary,
                position,
            } => secondary_press_while_dragging(graph, position),
            _ => Vec::new(),
        }
    }

    fn on_canvas_drag_event(&mut self, graph: &mut RoomNodeGraph, event: PointerEvent) -> Vec<Effect> {
        match event {
            PointerEvent::Drag { dx, dy, .. } => {
                graph.pan_all(dx, dy);
                vec![Effect::CanvasPanned]
            }
            PointerEvent::ButtonUp {
                button: PointerButton::Primary,
                ..
            } => {
                self.state = EditorState::Idle;
                Vec::new()
            }
            PointerEvent::ButtonDown {
                button: PointerButton::Secondary,
                position,
            } => secondary_press_while_dragging(graph, position),
            _ => Vec::new(),
        }
    }

    fn on_connection_event(
        &mut self,
        graph: &mut RoomNodeGraph,
        source: NodeId,
        event: PointerEvent,
    ) -> Vec<Effect> {
        match event {
            PointerEvent::Drag { position, .. } => {
                graph.update_connection_cursor(position);
                Vec::new()
            }
            PointerEvent::ButtonUp {
                button: PointerButton::Secondary,
                position,
            } => {
                self.state = EditorState::Idle;
                graph.end_connection();
                let Some(target) = graph.node_at(position) else {
                    return vec![Effect::ConnectionCancelled];
                };
                match graph.connect(source, target) {
                    Ok(()) => vec![Effect::ConnectionMade {
                        parent: source,
                        child: target,
                    }],
                    Err(reason) => {
                        debug!(parent = %source, child = %target, %reason, "connection drop rejected");
                        vec![Effect::ConnectionRejected {
                            parent: source,
                            child: target,
                            reason,
                        }]
                    }
                }
            }
            PointerEvent::ButtonDown {
                button: PointerButton::Primary,
                ..
            } => {
                self.state = EditorState::Idle;
                graph.end_connection();
                vec![Effect::ConnectionCancelled]
            }
            _ => Vec::new(),
        }
    }

    /// Run a context-menu action at the position the menu was opened.
    ///
    /// The first node ever created in an empty graph is the entrance,
    /// placed at [`ENTRANCE_SPAWN`] regardless of the menu position; the
    /// requested node is then created at the position as usual.
    pub fn apply_context_action(
        &mut self,
        graph: &mut RoomNodeGraph,
        action: ContextAction,
        position: Point,
    ) -> Vec<Effect> {
        match action {
            ContextAction::CreateNode => {
                let mut effects = Vec::new();
                if graph.is_empty() {
                    let entrance = graph.create_node(ENTRANCE_SPAWN, graph.catalog().entrance_type());
                    effects.push(Effect::NodeCreated(entrance));
                }
                let node = graph.create_node(position, graph.catalog().none_type());
                effects.push(Effect::NodeCreated(node));
                effects
            }
            ContextAction::SelectAll => {
                graph.select_all();
                vec![Effect::SelectionChanged]
            }
            ContextAction::DisconnectSelected => {
                graph.disconnect_selected();
                vec![Effect::SelectionChanged]
            }
            ContextAction::DeleteSelected => {
                graph.delete_selected();
                vec![Effect::SelectionChanged]
            }
        }
    }
}

/// A secondary press mid-drag still opens the context menu over empty
/// canvas; the drag itself continues, so the state is left alone. Presses
/// over a node are swallowed, as the primary button is already committed.
fn secondary_press_while_dragging(graph: &RoomNodeGraph, position: Point) -> Vec<Effect> {
    match graph.node_at(position) {
        Some(_) => Vec::new(),
        None => vec![Effect::ContextMenuRequested(position)],
    }
}
