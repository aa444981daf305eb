use crate::Error;

/// Tag identifying the kind of an extended expression node.
///
/// The tag uniquely determines the payload type of the node. The numeric
/// representation is stable so that tags can be stored in compiled plan
/// caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ExtendedType {
    Projection = 0,
    Field = 1,
    StructureField = 2,
    Key = 3,
    Entity = 4,
    EntityField = 5,
    EntitySet = 6,
    Column = 7,
    ItemProjector = 8,
    Marker = 9,
    SubQuery = 10,
    Grouping = 11,
    LocalCollection = 12,
    Structure = 13,
    Constructor = 14,
    FullText = 15,
}

impl ExtendedType {
    pub const ALL: [ExtendedType; 16] = [
        ExtendedType::Projection,
        ExtendedType::Field,
        ExtendedType::StructureField,
        ExtendedType::Key,
        ExtendedType::Entity,
        ExtendedType::EntityField,
        ExtendedType::EntitySet,
        ExtendedType::Column,
        ExtendedType::ItemProjector,
        ExtendedType::Marker,
        ExtendedType::SubQuery,
        ExtendedType::Grouping,
        ExtendedType::LocalCollection,
        ExtendedType::Structure,
        ExtendedType::Constructor,
        ExtendedType::FullText,
    ];

    /// Returns `true` for tags whose nodes describe persistent data that owns
    /// columns in a flat row.
    pub fn is_persistent_field(self) -> bool {
        matches!(
            self,
            ExtendedType::Field
                | ExtendedType::StructureField
                | ExtendedType::Key
                | ExtendedType::EntityField
                | ExtendedType::Column
        )
    }

    /// Returns `true` for tags that can only be interpreted with the
    /// surrounding query plan at hand.
    pub fn requires_query_context(self) -> bool {
        matches!(self, ExtendedType::Projection | ExtendedType::ItemProjector)
    }
}

impl TryFrom<u8> for ExtendedType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ExtendedType::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| Error::unknown_node(format!("extended type tag {value}")))
    }
}

impl core::fmt::Display for ExtendedType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}
