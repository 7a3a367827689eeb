//! # Room Node Graph
//!
//! The headless core of a dungeon layout editor: a graph of room nodes
//! connected according to dungeon-design rules, plus the pointer-driven
//! interaction machinery a visual editor shell needs on top of it.
//!
//! ## Features
//!
//! - **Typed Room Catalog** - Rooms are classified by a host-supplied
//!   catalog (entrance, corridors, boss rooms, unassigned placeholders)
//! - **Rule-Checked Connections** - Every edge passes a fixed sequence of
//!   legality rules before it is recorded; illegal requests are rejected
//!   with a precise reason, never a panic
//! - **Consistent by Construction** - Edges are stored on both endpoints
//!   and kept symmetric across connects, disconnects, and deletions
//! - **Headless** - No rendering or windowing; a host shell feeds pointer
//!   events in and draws from the read API
//!
//! ## Quick Start
//!
//! ```
//! use room_node_graph::{
//!     ContextAction, InteractionController, Point, RoomNodeGraph, RoomTypeCatalog,
//! };
//! use std::rc::Rc;
//!
//! let catalog = Rc::new(RoomTypeCatalog::from_json(include_str!(
//!     "../demos/room_types.json"
//! ))?);
//! let mut graph = RoomNodeGraph::new(catalog);
//! let mut controller = InteractionController::new();
//!
//! // The first create seeds the entrance, then places the requested node.
//! controller.apply_context_action(&mut graph, ContextAction::CreateNode, Point::new(480.0, 120.0));
//! assert_eq!(graph.len(), 2);
//! # Ok::<(), room_node_graph::CatalogError>(())
//! ```
//!
//! ## Core Components
//!
//! - [`RoomTypeCatalog`] - Immutable room-type definitions and flag queries
//! - [`RoomNodeGraph`] - Owns the nodes; all mutation goes through here
//! - [`RoomNode`] - One room placement: type, rectangle, edge lists
//! - [`can_connect`] - The connection legality engine
//! - [`InteractionController`] - Pointer-event state machine for shells

pub mod catalog;
pub mod controller;
pub mod geometry;
pub mod graph;
pub mod node;
pub mod validator;

pub use catalog::{CatalogError, RoomTypeCatalog, RoomTypeDefinition, RoomTypeId};
pub use controller::{
    ContextAction, EditorState, Effect, InteractionController, PointerButton, PointerEvent,
    ENTRANCE_SPAWN,
};
pub use geometry::{Point, Rect, NODE_HEIGHT, NODE_WIDTH};
pub use graph::{PendingConnection, RoomNodeGraph, DEFAULT_MAX_CHILD_CORRIDORS};
pub use node::{NodeId, RoomNode};
pub use validator::{can_connect, ConnectionError};
