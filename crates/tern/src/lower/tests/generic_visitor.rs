use super::{bar, field};
use crate::lower::GenericExpressionVisitor;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tern_core::{
    expr::{
        ColumnExpression, ConstructorExpression, EntityExpression, FieldExpression,
        KeyExpression, MarkerType, Remap, RemapScope, Type,
    },
    Error, Expr, Result,
};

fn object(args: Vec<Expr>) -> Expr {
    ConstructorExpression::new(Type::object("Dto"), args).into()
}

fn field_to_column(field: &Arc<FieldExpression>, _: &mut RemapScope) -> Result<Expr> {
    Ok(ColumnExpression::new(field.field.ty.clone(), field.mapping.offset).into())
}

#[test]
fn callback_sees_each_node_of_kind() {
    let item = object(vec![
        field("Name", Type::String, 1),
        Expr::eq(field("Count", Type::I32, 2), Expr::constant(3)),
        bar().into(),
    ]);

    let mut seen = vec![];
    let rewritten = GenericExpressionVisitor::<FieldExpression, _>::new(
        |field: &Arc<FieldExpression>, scope: &mut RemapScope| {
            seen.push(field.name().to_string());
            field_to_column(field, scope)
        },
    )
    .process(&item)
    .unwrap();

    // Fields stored inside the entity are not part of the traversal
    assert_eq!(seen, vec!["Name", "Count"]);

    let Expr::Constructor(constructor) = &rewritten else {
        panic!("expected constructor; actual={rewritten:?}");
    };
    assert!(matches!(constructor.arguments[0], Expr::Column(_)));
    let Expr::Binary(binary) = &constructor.arguments[1] else {
        panic!("expected binary");
    };
    assert!(matches!(binary.lhs, Expr::Column(_)));
    assert!(matches!(constructor.arguments[2], Expr::Entity(_)));
}

#[test]
fn markers_are_looked_through() {
    let expr = Expr::marker(field("Name", Type::String, 1), MarkerType::Single);

    let rewritten = GenericExpressionVisitor::<FieldExpression, _>::new(field_to_column)
        .process(&expr)
        .unwrap();

    let Expr::Marker(marker) = &rewritten else {
        panic!("expected marker; actual={rewritten:?}");
    };
    assert_eq!(marker.marker, MarkerType::Single);
    assert_eq!(marker.target.mapping().map(|mapping| mapping.offset), Some(1));
    assert!(matches!(marker.target, Expr::Column(_)));
}

#[test]
fn untouched_tree_is_shared() {
    let item = object(vec![ColumnExpression::new(Type::I32, 0).into()]);

    let rewritten = GenericExpressionVisitor::<FieldExpression, _>::new(field_to_column)
        .process(&item)
        .unwrap();

    assert!(rewritten.ptr_eq(&item));
}

#[test]
fn nested_visitors_share_the_scope() {
    let bar = bar();
    let item = object(vec![bar.clone().into(), bar.clone().into()]);

    let mut keys = vec![];
    let mut scope = RemapScope::new();

    let rewritten = GenericExpressionVisitor::<EntityExpression, _>::new(
        |entity: &Arc<EntityExpression>, scope: &mut RemapScope| {
            let remapped = Expr::Entity(entity.clone()).remap(Remap::Shift(3), scope)?;

            let key = GenericExpressionVisitor::<KeyExpression, _>::new(
                |key: &Arc<KeyExpression>, scope: &mut RemapScope| {
                    Expr::Key(key.clone()).remap(Remap::Shift(3), scope)
                },
            )
            .process_in(scope, &Expr::Key(entity.key.clone()))?;

            keys.push(key);
            Ok(remapped)
        },
    )
    .process_in(&mut scope, &item)
    .unwrap();

    assert!(!scope.is_empty());

    let Expr::Constructor(constructor) = &rewritten else {
        panic!("expected constructor");
    };

    // The same entity is remapped to the same node
    assert!(constructor.arguments[0].ptr_eq(&constructor.arguments[1]));

    let entity = constructor.arguments[0].as_entity().unwrap();
    assert_eq!(entity.key.mapping.offset, 3);

    // The inner visitor found the key the entity remap already produced
    assert_eq!(keys.len(), 2);
    for key in &keys {
        assert!(key.ptr_eq(&Expr::Key(entity.key.clone())));
    }
}

#[test]
fn callback_errors_propagate() {
    let err = GenericExpressionVisitor::<FieldExpression, _>::new(
        |field: &Arc<FieldExpression>, _: &mut RemapScope| {
            Err(Error::unsupported_operation(format!("field `{}`", field.name())))
        },
    )
    .process(&object(vec![field("Name", Type::String, 1)]))
    .unwrap_err();

    assert!(err.is_unsupported_operation());
}
