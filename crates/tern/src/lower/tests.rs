use std::sync::Arc;
use tern_core::{
    expr::{
        EntityExpression, EntityFieldExpression, FieldExpression, ItemProjectorExpression,
        KeyExpression, StructureFieldExpression, Type,
    },
    provider::IndexProvider,
    schema::{FieldInfo, PersistentType},
    Expr, Provider,
};

mod column_gatherer;
mod generic_visitor;
mod owner_remover;
mod replacer;

pub fn field(name: &str, ty: Type, offset: usize) -> Expr {
    FieldExpression::new(FieldInfo::new(name, ty), offset).into()
}

/// `Bar { Key(0), Name(1), Count(2) }`
pub fn bar() -> Arc<EntityExpression> {
    let ty = PersistentType::new("Bar")
        .with_field(FieldInfo::new("Name", Type::String))
        .with_field(FieldInfo::new("Count", Type::I32));

    let entity = EntityExpression::new(
        ty,
        vec![
            KeyExpression::new("Bar", 0).into(),
            field("Name", Type::String, 1),
            field("Count", Type::I32, 2),
        ],
    )
    .expect("valid entity");

    Arc::new(entity)
}

/// `Bar { Key(0), Name(1), Count(2), TypeId(3) }` with `TypeId` as
/// discriminator.
pub fn bar_with_type_id() -> Arc<EntityExpression> {
    let ty = PersistentType::new("Bar")
        .with_discriminator("TypeId")
        .with_field(FieldInfo::new("Name", Type::String))
        .with_field(FieldInfo::new("Count", Type::I32))
        .with_field(FieldInfo::new("TypeId", Type::I32));

    let entity = EntityExpression::new(
        ty,
        vec![
            KeyExpression::new("Bar", 0).into(),
            field("Name", Type::String, 1),
            field("Count", Type::I32, 2),
            field("TypeId", Type::I32, 3),
        ],
    )
    .expect("valid entity");

    Arc::new(entity)
}

/// ```text
/// Person {
///     Key(0),
///     Name(1),
///     Address { City(2), Street(3) },
///     Bio(4, lazy),
///     Manager -> Person(5),
///     TypeId(6),
/// }
/// ```
pub fn person() -> Arc<EntityExpression> {
    let ty = PersistentType::new("Person")
        .with_discriminator("TypeId")
        .with_field(FieldInfo::new("Name", Type::String))
        .with_field(FieldInfo::new("Address", Type::Structure("Address".into())))
        .with_field(FieldInfo::new("Bio", Type::String).lazy())
        .with_field(FieldInfo::new("Manager", Type::Entity("Person".into())))
        .with_field(FieldInfo::new("TypeId", Type::I32));

    let address = StructureFieldExpression::new(
        FieldInfo::new("Address", Type::Structure("Address".into())),
        vec![
            field("City", Type::String, 2),
            field("Street", Type::String, 3),
        ],
    )
    .expect("valid structure");

    let manager = EntityFieldExpression::new(
        FieldInfo::new("Manager", Type::Entity("Person".into())),
        KeyExpression::new("Person", 5),
    );

    let entity = EntityExpression::new(
        ty,
        vec![
            KeyExpression::new("Person", 0).into(),
            field("Name", Type::String, 1),
            address.into(),
            FieldExpression::new(FieldInfo::new("Bio", Type::String).lazy(), 4).into(),
            manager.into(),
            field("TypeId", Type::I32, 6),
        ],
    )
    .expect("valid entity");

    Arc::new(entity)
}

/// An index scan producing `width` integer columns.
pub fn index(name: &str, width: usize) -> Provider {
    IndexProvider::new(name, (0..width).map(|i| (format!("c{i}"), Type::I32))).into()
}

pub fn item_projector(item: impl Into<Expr>, width: usize) -> Arc<ItemProjectorExpression> {
    Arc::new(ItemProjectorExpression::new(item, index("Source", width)))
}
