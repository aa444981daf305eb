use super::{bar, field, person};
use crate::lower::OwnerRemover;
use pretty_assertions::assert_eq;
use tern_core::{
    expr::{
        ApplyParameter, ConstructorExpression, EntitySetExpression, ExprParameter,
        ItemProjectorExpression, Mapping, ProjectionExpression, SubQueryExpression, Type,
    },
    schema::FieldInfo,
    Expr,
};

fn object(args: Vec<Expr>) -> Expr {
    ConstructorExpression::new(Type::object("Dto"), args).into()
}

#[test]
fn field_owner_is_cleared() {
    let bar = bar();
    let name = bar.member("Name").unwrap();
    assert!(name.owner().is_some());

    let removed = OwnerRemover::remove_owner(&name).unwrap();

    assert!(removed.owner().is_none());
    assert_eq!(removed.mapping(), Some(Mapping::single(1)));
    assert!(matches!(removed, Expr::Field(_)));
}

#[test]
fn structure_and_reference_owners_are_cleared() {
    let person = person();

    for name in ["Address", "Manager"] {
        let member = person.member(name).unwrap();
        let removed = OwnerRemover::remove_owner(&member).unwrap();

        assert!(removed.owner().is_none(), "{name} still owned");
        assert_eq!(removed.mapping(), member.mapping());
    }
}

#[test]
fn unowned_nodes_are_untouched() {
    let name = field("Name", Type::String, 1);
    let item = object(vec![name.clone(), bar().into()]);

    let removed = OwnerRemover::remove_owner(&item).unwrap();

    assert!(removed.ptr_eq(&item));
}

#[test]
fn owners_removed_inside_constructor() {
    let bar = bar();
    let owned = bar.member("Count").unwrap();
    let plain = field("Name", Type::String, 1);

    let removed = OwnerRemover::remove_owner(&object(vec![owned, plain.clone()])).unwrap();

    let Expr::Constructor(constructor) = &removed else {
        panic!("expected constructor; actual={removed:?}");
    };

    assert!(constructor.arguments[0].owner().is_none());
    assert_eq!(constructor.arguments[0].mapping(), Some(Mapping::single(2)));
    assert!(constructor.arguments[1].ptr_eq(&plain));
}

#[test]
fn entity_set_keeps_owner() {
    let set: Expr = EntitySetExpression::new(
        FieldInfo::new("Children", Type::sequence(Type::Entity("Bar".into()))),
        bar(),
    )
    .into();

    let removed = OwnerRemover::remove_owner(&set).unwrap();

    assert!(removed.ptr_eq(&set));
}

#[test]
fn sub_query_is_opaque() {
    let bar = bar();
    let outer = ExprParameter::new("outer", Type::Entity("Bar".into()));

    let projection = ProjectionExpression::new(
        Type::sequence(Type::String),
        ItemProjectorExpression::new(bar.member("Name").unwrap(), super::index("Bar", 3)),
    );
    let sub_query: Expr = SubQueryExpression::new(
        Type::sequence(Type::String),
        outer,
        projection,
        ApplyParameter::new("apply"),
    )
    .into();

    let removed = OwnerRemover::remove_owner(&sub_query).unwrap();

    assert!(removed.ptr_eq(&sub_query));
}

#[test]
fn projection_is_rejected() {
    let projection: Expr = ProjectionExpression::new(
        Type::sequence(Type::Entity("Bar".into())),
        super::item_projector(bar(), 3),
    )
    .into();

    let err = OwnerRemover::remove_owner(&projection).unwrap_err();
    assert!(err.is_unsupported_operation());
}
