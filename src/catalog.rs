//! Room-type catalog: the externally supplied, immutable list of room-type
//! definitions.
//!
//! The catalog is injected configuration. It is loaded once before any graph
//! operation runs and never mutated afterwards, so shared read access from
//! every component is safe. Construction validates the two structural
//! requirements the connection validator depends on: exactly one entrance
//! type and exactly one "none" (unassigned placeholder) type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index into a [`RoomTypeCatalog`]'s ordered type list.
///
/// Room nodes store a `RoomTypeId` rather than a copy of the definition;
/// flags are resolved through the catalog at the point of use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomTypeId(usize);

impl RoomTypeId {
    /// Position of the definition in the catalog's ordered list.
    pub fn index(self) -> usize {
        self.0
    }
}

fn default_display() -> bool {
    true
}

/// One room-type definition: a name plus the flags the connection rules
/// are written against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTypeDefinition {
    pub name: String,
    /// The unique always-root type where the player spawns.
    #[serde(default)]
    pub is_entrance: bool,
    /// At most one *connected* node of a boss-room type is permitted.
    #[serde(default)]
    pub is_boss_room: bool,
    /// Connective passage, subject to alternation and fan-out rules.
    #[serde(default)]
    pub is_corridor: bool,
    /// The unassigned placeholder given to freshly placed nodes.
    #[serde(default)]
    pub is_none: bool,
    /// Whether the type appears in the editor's type picker.
    #[serde(default = "default_display")]
    pub display_in_editor: bool,
}

impl RoomTypeDefinition {
    /// A plain room type with the given name and no flags set.
    pub fn room(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_entrance: false,
            is_boss_room: false,
            is_corridor: false,
            is_none: false,
            display_in_editor: true,
        }
    }
}

/// Why a catalog failed validation at startup.
///
/// These are fatal for the host: the validator's correctness depends on the
/// entrance and "none" types existing and being unique.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("room type catalog is empty")]
    Empty,
    #[error("room type catalog has no entrance type")]
    MissingEntrance,
    #[error("room type catalog has more than one entrance type")]
    DuplicateEntrance,
    #[error("room type catalog has no unassigned (none) type")]
    MissingNone,
    #[error("room type catalog has more than one unassigned (none) type")]
    DuplicateNone,
    #[error("failed to parse room type catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable ordered list of room-type definitions.
#[derive(Debug, Clone)]
pub struct RoomTypeCatalog {
    types: Vec<RoomTypeDefinition>,
    entrance: RoomTypeId,
    none: RoomTypeId,
}

impl RoomTypeCatalog {
    /// Validate and wrap an ordered list of definitions.
    pub fn new(types: Vec<RoomTypeDefinition>) -> Result<Self, CatalogError> {
        if types.is_empty() {
            return Err(CatalogError::Empty);
        }
        let entrance = Self::unique_flag(
            &types,
            |d| d.is_entrance,
            CatalogError::MissingEntrance,
            CatalogError::DuplicateEntrance,
        )?;
        let none = Self::unique_flag(
            &types,
            |d| d.is_none,
            CatalogError::MissingNone,
            CatalogError::DuplicateNone,
        )?;
        Ok(Self { types, entrance, none })
    }

    /// Load a catalog from its JSON representation (an array of definitions).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let types: Vec<RoomTypeDefinition> = serde_json::from_str(json)?;
        Self::new(types)
    }

    fn unique_flag(
        types: &[RoomTypeDefinition],
        flag: impl Fn(&RoomTypeDefinition) -> bool,
        missing: CatalogError,
        duplicate: CatalogError,
    ) -> Result<RoomTypeId, CatalogError> {
        let mut found = None;
        for (i, def) in types.iter().enumerate() {
            if flag(def) {
                if found.is_some() {
                    return Err(duplicate);
                }
                found = Some(RoomTypeId(i));
            }
        }
        found.ok_or(missing)
    }

    /// Look up a definition; `None` for an out-of-range id.
    pub fn get(&self, id: RoomTypeId) -> Option<&RoomTypeDefinition> {
        self.types.get(id.0)
    }

    /// Id of the unique entrance type.
    pub fn entrance_type(&self) -> RoomTypeId {
        self.entrance
    }

    /// Id of the unique unassigned placeholder type.
    pub fn none_type(&self) -> RoomTypeId {
        self.none
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate definitions with their ids, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (RoomTypeId, &RoomTypeDefinition)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, def)| (RoomTypeId(i), def))
    }

    /// Find the first type matching a predicate.
    pub fn find(&self, predicate: impl Fn(&RoomTypeDefinition) -> bool) -> Option<RoomTypeId> {
        self.types.iter().position(predicate).map(RoomTypeId)
    }

    /// Names of the types shown in the editor's type picker, catalog order.
    pub fn display_names(&self) -> Vec<&str> {
        self.types
            .iter()
            .filter(|d| d.display_in_editor)
            .map(|d| d.name.as_str())
            .collect()
    }

    // Flag accessors tolerate out-of-range ids so validator code can stay
    // flat; the graph never stores an id it did not get from this catalog.

    pub fn is_entrance(&self, id: RoomTypeId) -> bool {
        self.get(id).map_or(false, |d| d.is_entrance)
    }

    pub fn is_boss_room(&self, id: RoomTypeId) -> bool {
        self.get(id).map_or(false, |d| d.is_boss_room)
    }

    pub fn is_corridor(&self, id: RoomTypeId) -> bool {
        self.get(id).map_or(false, |d| d.is_corridor)
    }

    pub fn is_none_type(&self, id: RoomTypeId) -> bool {
        self.get(id).map_or(false, |d| d.is_none)
    }
}
