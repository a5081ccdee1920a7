//! Lights — the entities this system restores.
//!
//! The platform hands out arbitrary attribute maps. The only thing the
//! restore logic needs from them is whether a light is really a group of
//! other lights, so the map is reduced to [`GroupMarkers`] at the adapter
//! boundary.

use serde_json::{Map, Value};

/// Attribute key listing the members of a light group.
pub const MEMBER_LIST_ATTRIBUTE: &str = "entity_id";

/// Attribute key set by the Hue integration on room/zone lights.
pub const HUE_GROUP_ATTRIBUTE: &str = "is_hue_group";

/// Entity-id prefix of the light domain.
pub const LIGHT_DOMAIN_PREFIX: &str = "light.";

/// The two facts about a light's attributes that mark it as a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupMarkers {
    /// The attributes carry a list of member entities.
    pub has_member_list: bool,
    /// A vendor integration flags the light as an aggregate.
    pub is_vendor_aggregate: bool,
}

impl GroupMarkers {
    /// Derive the markers from a raw attribute map.
    ///
    /// Missing keys mean "not a group".
    #[must_use]
    pub fn from_attributes(attributes: &Map<String, Value>) -> Self {
        Self {
            has_member_list: attributes.contains_key(MEMBER_LIST_ATTRIBUTE),
            is_vendor_aggregate: attributes
                .get(HUE_GROUP_ATTRIBUTE)
                .is_some_and(is_truthy),
        }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        self.has_member_list || self.is_vendor_aggregate
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// A light entity snapshot, as needed to decide whether to restore it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightEntity {
    pub entity_id: String,
    pub group: GroupMarkers,
}

impl LightEntity {
    /// An individually controllable light (no group markers).
    #[must_use]
    pub fn fixture(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            group: GroupMarkers::default(),
        }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        self.group.is_group()
    }
}

/// The object id: the part after the domain prefix (`kitchen` for
/// `light.kitchen`).
#[must_use]
pub fn object_id(entity_id: &str) -> &str {
    entity_id
        .split_once('.')
        .map_or(entity_id, |(_, name)| name)
}

/// Whether an entity id belongs to the light domain.
#[must_use]
pub fn is_light_entity_id(entity_id: &str) -> bool {
    entity_id.starts_with(LIGHT_DOMAIN_PREFIX)
}
