//! Common test utilities for integration tests.

#![allow(dead_code)]

use room_node_graph::{
    Effect, InteractionController, NodeId, Point, PointerButton, PointerEvent, RoomNodeGraph,
    RoomTypeCatalog, RoomTypeId,
};
use std::cell::Cell;
use std::rc::Rc;

/// The demo room-type catalog shipped with the crate.
pub fn demo_catalog() -> Rc<RoomTypeCatalog> {
    let json = include_str!("../../demos/room_types.json");
    Rc::new(RoomTypeCatalog::from_json(json).expect("demo catalog should be valid"))
}

/// A graph plus controller plus resolved type ids for the demo catalog.
pub struct EditorHarness {
    pub graph: RoomNodeGraph,
    pub controller: InteractionController,
    pub entrance: RoomTypeId,
    pub none: RoomTypeId,
    pub corridor: RoomTypeId,
    pub small_room: RoomTypeId,
    pub large_room: RoomTypeId,
    pub boss_room: RoomTypeId,
}

impl EditorHarness {
    pub fn new() -> Self {
        let catalog = demo_catalog();
        let entrance = catalog.entrance_type();
        let none = catalog.none_type();
        let corridor = catalog.find(|d| d.is_corridor).expect("corridor type");
        let small_room = catalog.find(|d| d.name == "Small Room").expect("small room");
        let large_room = catalog.find(|d| d.name == "Large Room").expect("large room");
        let boss_room = catalog.find(|d| d.is_boss_room).expect("boss room");
        Self {
            graph: RoomNodeGraph::new(catalog),
            controller: InteractionController::new(),
            entrance,
            none,
            corridor,
            small_room,
            large_room,
            boss_room,
        }
    }

    /// Spread nodes out so their rectangles never overlap.
    pub fn spawn(&mut self, index: usize, room_type: RoomTypeId) -> NodeId {
        self.graph
            .create_node(at(index as f32 * 250.0, 0.0), room_type)
    }

    /// Center of a node's rectangle (a guaranteed hit for `node_at`).
    pub fn center_of(&self, id: NodeId) -> Point {
        self.graph
            .lookup(id)
            .expect("node should exist")
            .rect()
            .center()
    }

    pub fn press(&mut self, button: PointerButton, position: Point) -> Vec<Effect> {
        self.controller
            .handle_event(&mut self.graph, PointerEvent::ButtonDown { button, position })
    }

    pub fn release(&mut self, button: PointerButton, position: Point) -> Vec<Effect> {
        self.controller
            .handle_event(&mut self.graph, PointerEvent::ButtonUp { button, position })
    }

    pub fn drag(&mut self, button: PointerButton, position: Point, dx: f32, dy: f32) -> Vec<Effect> {
        self.controller.handle_event(
            &mut self.graph,
            PointerEvent::Drag {
                button,
                position,
                dx,
                dy,
            },
        )
    }

    /// Draw a connection with the pointer: secondary press on the parent,
    /// release over the child.
    pub fn draw_connection(&mut self, parent: NodeId, child: NodeId) -> Vec<Effect> {
        let from = self.center_of(parent);
        let to = self.center_of(child);
        self.press(PointerButton::Secondary, from);
        self.release(PointerButton::Secondary, to)
    }
}

/// Counts change-listener invocations (persistence triggers).
#[derive(Clone, Default)]
pub struct ChangeCounter(Rc<Cell<usize>>);

impl ChangeCounter {
    pub fn attach(graph: &mut RoomNodeGraph) -> Self {
        let counter = Self::default();
        let inner = Rc::clone(&counter.0);
        graph.set_change_listener(move || inner.set(inner.get() + 1));
        counter
    }

    pub fn count(&self) -> usize {
        self.0.get()
    }
}

pub fn at(x: f32, y: f32) -> Point {
    Point::new(x, y)
}
