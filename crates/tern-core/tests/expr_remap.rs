use pretty_assertions::assert_eq;
use std::sync::Arc;
use tern_core::expr::{
    ColumnExpression, EntityExpression, EntityFieldExpression, ExprParameter, FieldExpression,
    KeyExpression, Mapping, Owner, Remap, RemapScope, Type,
};
use tern_core::schema::{FieldInfo, PersistentType};
use tern_core::Expr;

fn field(name: &str, offset: usize) -> Expr {
    FieldExpression::new(FieldInfo::new(name, Type::String), offset).into()
}

/// `Bar { Key(0), Name(1), Count(2) }`
fn bar() -> Arc<EntityExpression> {
    Arc::new(
        EntityExpression::new(
            PersistentType::new("Bar"),
            vec![
                KeyExpression::new("Bar", 0).into(),
                field("Name", 1),
                field("Count", 2),
            ],
        )
        .unwrap(),
    )
}

fn as_entity(expr: &Expr) -> &Arc<EntityExpression> {
    expr.as_entity().expect("entity")
}

#[test]
fn shift_moves_every_mapping() {
    let mut scope = RemapScope::new();
    let shifted = Expr::from(bar()).remap(Remap::Shift(4), &mut scope).unwrap();

    let entity = as_entity(&shifted);
    assert_eq!(entity.mapping, Mapping::new(4, 3));
    assert_eq!(entity.key.mapping, Mapping::single(4));

    let offsets: Vec<_> = entity
        .fields
        .iter()
        .map(|member| member.mapping().unwrap().offset)
        .collect();
    assert_eq!(offsets, vec![4, 5, 6]);
}

#[test]
fn shift_by_zero_is_identity() {
    let expr: Expr = bar().into();

    let shifted = expr.remap(Remap::Shift(0), &mut RemapScope::new()).unwrap();

    assert!(shifted.ptr_eq(&expr));
}

#[test]
fn shared_key_stays_shared() {
    let bar = bar();
    let shifted = Expr::from(bar).remap(Remap::Shift(2), &mut RemapScope::new()).unwrap();

    let entity = as_entity(&shifted);
    let Expr::Key(member_key) = &entity.fields[0] else {
        panic!("first member is the key");
    };
    assert!(Arc::ptr_eq(member_key, &entity.key));
}

#[test]
fn owner_is_remapped_with_its_field() {
    let bar = bar();
    let name = bar.member("Name").unwrap();

    let mut scope = RemapScope::new();
    let shifted_name = name.remap(Remap::Shift(10), &mut scope).unwrap();
    let shifted_bar = Expr::from(bar).remap(Remap::Shift(10), &mut scope).unwrap();

    let Expr::Field(shifted_name) = &shifted_name else {
        panic!("expected field");
    };
    assert_eq!(shifted_name.mapping, Mapping::single(11));

    // Both remaps went through the same scope, so the owner is the entity
    // produced by remapping `bar` directly
    let Some(Owner::Entity(owner)) = &shifted_name.owner else {
        panic!("expected entity owner");
    };
    assert!(Arc::ptr_eq(owner, as_entity(&shifted_bar)));
}

#[test]
fn separate_scopes_do_not_share() {
    let expr: Expr = bar().into();

    let first = expr.remap(Remap::Shift(1), &mut RemapScope::new()).unwrap();
    let second = expr.remap(Remap::Shift(1), &mut RemapScope::new()).unwrap();

    assert_eq!(first, second);
    assert!(!first.ptr_eq(&second));
}

#[test]
fn different_operations_share_a_scope() {
    let expr: Expr = bar().into();
    let mut scope = RemapScope::new();

    let by_one = expr.remap(Remap::Shift(1), &mut scope).unwrap();
    let by_two = expr.remap(Remap::Shift(2), &mut scope).unwrap();

    assert_eq!(as_entity(&by_one).mapping.offset, 1);
    assert_eq!(as_entity(&by_two).mapping.offset, 2);
}

#[test]
fn column_map() {
    // new row = old columns [9, 0, 1, 2]
    let map = [9, 0, 1, 2];
    let remapped = Expr::from(bar())
        .remap(Remap::Columns(&map), &mut RemapScope::new())
        .unwrap();

    assert_eq!(as_entity(&remapped).mapping, Mapping::new(1, 3));
}

#[test]
fn column_map_must_keep_runs_contiguous() {
    let map = [0, 2, 1];
    let err = Expr::from(bar())
        .remap(Remap::Columns(&map), &mut RemapScope::new())
        .unwrap_err();
    assert!(err.is_invalid_expression());

    let map = [0, 1];
    let err = Expr::from(bar())
        .remap(Remap::Columns(&map), &mut RemapScope::new())
        .unwrap_err();
    assert!(err.is_invalid_expression());
}

#[test]
fn entity_reference_is_remapped_with_key() {
    let reference: Expr = EntityFieldExpression::new(
        FieldInfo::new("Bar", Type::Entity("Bar".into())),
        KeyExpression::new("Bar", 5),
    )
    .with_entity(bar())
    .into();

    let shifted = reference.remap(Remap::Shift(1), &mut RemapScope::new()).unwrap();

    let Expr::EntityField(shifted) = &shifted else {
        panic!("expected entity field");
    };
    assert_eq!(shifted.mapping(), Mapping::single(6));
    assert_eq!(shifted.entity.as_ref().unwrap().mapping, Mapping::new(1, 3));
}

#[test]
fn bind_outer_parameter() {
    let param = ExprParameter::new("outer", Type::Entity("Bar".into()));
    let mut scope = RemapScope::new();

    let bound = Expr::from(bar())
        .bind_outer_parameter(Some(&param), &mut scope)
        .unwrap();

    let entity = as_entity(&bound);
    assert_eq!(entity.outer_parameter.as_ref(), Some(&param));
    assert_eq!(entity.key.outer_parameter.as_ref(), Some(&param));
    assert!(entity.fields.iter().all(|member| member.outer_parameter() == Some(&param)));

    // Mappings are left alone
    assert_eq!(entity.mapping, Mapping::new(0, 3));

    let unbound = bound.bind_outer_parameter(None, &mut scope).unwrap();
    assert_eq!(unbound.outer_parameter(), None);
}

#[test]
fn non_persistent_nodes_pass_through() {
    let column: Expr = ColumnExpression::new(Type::I32, 2).into();
    let expr = Expr::eq(column, Expr::constant(1));

    let shifted = expr.remap(Remap::Shift(3), &mut RemapScope::new()).unwrap();

    let Expr::Binary(binary) = &shifted else {
        panic!("expected binary");
    };
    assert_eq!(binary.lhs.mapping(), Some(Mapping::single(5)));
    assert!(binary.rhs.is_constant());
}
