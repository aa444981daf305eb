use super::{bar, bar_with_type_id, field, index, item_projector, person};
use crate::lower::{ColumnExtractionModes as Modes, ColumnGatherer};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tern_core::{
    expr::{
        ApplyParameter, ColumnExpression, ConstructorExpression, EntitySetExpression,
        ExprParameter, FieldExpression, FullTextExpression, GroupingExpression,
        ItemProjectorExpression, LocalCollectionExpression, MarkerType, ProjectionExpression,
        StructureFieldExpression, SubQueryExpression, Type,
    },
    provider::{CalculateProvider, CalculatedColumn, FilterProvider},
    schema::FieldInfo,
    Expr,
};

fn columns(expr: impl Into<Expr>, modes: Modes) -> Vec<usize> {
    ColumnGatherer::columns(&expr.into(), modes).expect("gather columns")
}

fn object(args: Vec<Expr>) -> Expr {
    ConstructorExpression::new(Type::object("Dto"), args).into()
}

/// A sub-query over `Child` whose data source reads `outer[5]` in its filter
/// and `outer[2]` in a calculated column.
fn sub_query(
    outer: &ExprParameter,
    apply: &ApplyParameter,
    item: impl Into<Expr>,
) -> SubQueryExpression {
    let row = ExprParameter::new("row", Type::Tuple);

    let filter = FilterProvider::new(
        index("Child", 3),
        Expr::lambda(
            vec![row.clone()],
            Expr::eq(
                Expr::tuple_access(Expr::parameter(&row), 1, Type::I32),
                Expr::apply_parameter_access(apply, 5, Type::I32),
            ),
        ),
    );

    let calculate = CalculateProvider::new(
        filter,
        vec![CalculatedColumn::new(
            "OuterName",
            Type::String,
            Expr::lambda(
                vec![row.clone()],
                Expr::apply_parameter_access(apply, 2, Type::String),
            ),
        )],
    );

    let projection = ProjectionExpression::new(
        Type::sequence(Type::object("Dto")),
        ItemProjectorExpression::new(item, calculate),
    );

    SubQueryExpression::new(
        Type::sequence(Type::object("Dto")),
        outer.clone(),
        projection,
        apply.clone(),
    )
}

fn outer_field(name: &str, offset: usize, outer: &ExprParameter) -> Expr {
    FieldExpression::new(FieldInfo::new(name, Type::String), offset)
        .with_outer_parameter(Some(outer.clone()))
        .into()
}

#[test]
fn entity_reads_every_member() {
    assert_eq!(columns(bar(), Modes::DEFAULT), vec![0, 1, 2]);
}

#[test]
fn entity_as_key() {
    assert_eq!(columns(bar(), Modes::TREAT_ENTITY_AS_KEY), vec![0]);
    assert_eq!(
        columns(
            bar_with_type_id(),
            Modes::TREAT_ENTITY_AS_KEY | Modes::KEEP_TYPE_ID
        ),
        vec![0, 3]
    );
}

#[test]
fn keep_type_id_requires_discriminator() {
    let err = ColumnGatherer::columns(
        &bar().into(),
        Modes::TREAT_ENTITY_AS_KEY | Modes::KEEP_TYPE_ID,
    )
    .unwrap_err();

    assert!(err.is_invalid_expression());
}

#[test]
fn structure_and_reference_members() {
    assert_eq!(columns(person(), Modes::DEFAULT), vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn lazy_load_fields_omitted() {
    assert_eq!(
        columns(person(), Modes::OMIT_LAZY_LOAD),
        vec![0, 1, 2, 3, 5, 6]
    );
}

#[test]
fn owned_field_keeps_owner_key_and_type_id() {
    let person = person();
    let Some(Expr::StructureField(address)) = person.member("Address") else {
        panic!("Address is a structure field");
    };
    let city = address.member("City").expect("City member");

    assert_eq!(columns(city.clone(), Modes::DEFAULT), vec![0, 6, 2]);
    assert_eq!(
        columns(city.clone(), Modes::DISTINCT | Modes::ORDERED),
        vec![0, 2, 6]
    );
    assert_eq!(columns(city, Modes::TREAT_ENTITY_AS_KEY), vec![2]);
}

#[test]
fn owned_field_without_discriminator() {
    let bar = bar();
    let name = bar.member("Name").expect("Name member");

    assert_eq!(columns(name, Modes::DEFAULT), vec![0, 1]);
}

#[test]
fn detached_structure_owner_fails() {
    let address = Arc::new(
        StructureFieldExpression::new(
            FieldInfo::new("Address", Type::Structure("Address".into())),
            vec![
                field("City", Type::String, 2),
                field("Street", Type::String, 3),
            ],
        )
        .unwrap(),
    );
    let city = address.member("City").unwrap();

    let err = ColumnGatherer::columns(&city, Modes::DEFAULT).unwrap_err();
    assert!(err.is_owner_resolution());

    // Owners are not consulted when entities are reduced to their keys
    assert_eq!(columns(city, Modes::TREAT_ENTITY_AS_KEY), vec![2]);
}

#[test]
fn distinct_and_ordered() {
    let item = || {
        object(vec![
            field("Name", Type::String, 1),
            field("Key", Type::I32, 0),
            field("Name", Type::String, 1),
        ])
    };

    assert_eq!(columns(item(), Modes::DEFAULT), vec![1, 0, 1]);
    assert_eq!(columns(item(), Modes::DISTINCT), vec![1, 0]);
    assert_eq!(columns(item(), Modes::ORDERED), vec![0, 1, 1]);
    assert_eq!(columns(item(), Modes::DISTINCT | Modes::ORDERED), vec![0, 1]);
}

#[test]
fn gathering_is_deterministic() {
    let expr: Expr = person().into();

    let first = ColumnGatherer::columns(&expr, Modes::DEFAULT).unwrap();
    let second = ColumnGatherer::columns(&expr, Modes::DEFAULT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn expressions_are_returned_with_columns() {
    let name = field("Name", Type::String, 1);
    let item = object(vec![name.clone(), ColumnExpression::new(Type::I32, 4).into()]);

    let gathered = ColumnGatherer::columns_and_expressions(&item, Modes::DEFAULT).unwrap();

    assert_eq!(gathered.len(), 2);
    assert_eq!(gathered[0].0, 1);
    assert!(gathered[0].1.ptr_eq(&name));
    assert_eq!(gathered[1].0, 4);
    assert!(matches!(gathered[1].1, Expr::Column(_)));
}

#[test]
fn sub_query_gathers_outer_scope_only() {
    let outer = ExprParameter::new("outer", Type::Entity("Bar".into()));
    let other = ExprParameter::new("other", Type::Entity("Baz".into()));
    let apply = ApplyParameter::new("apply");

    let item = object(vec![
        // the inner row; belongs to the sub-query's own data source
        field("Inner", Type::String, 0),
        outer_field("Name", 1, &outer),
        outer_field("Unrelated", 7, &other),
    ]);

    let sub_query = sub_query(&outer, &apply, item);

    assert_eq!(columns(sub_query, Modes::DEFAULT), vec![1, 5, 2]);
}

#[test]
fn top_level_nodes_with_outer_parameter_are_skipped() {
    let outer = ExprParameter::new("outer", Type::Entity("Bar".into()));

    let item = object(vec![
        field("Name", Type::String, 1),
        outer_field("Other", 3, &outer),
    ]);

    assert_eq!(columns(item, Modes::DEFAULT), vec![1]);
}

#[test]
fn sub_query_next_to_top_level_fields() {
    let outer = ExprParameter::new("outer", Type::Entity("Bar".into()));
    let apply = ApplyParameter::new("apply");

    let sub_query = sub_query(&outer, &apply, outer_field("Name", 1, &outer));
    let item = object(vec![field("Id", Type::I32, 8), sub_query.into()]);

    assert_eq!(columns(item, Modes::DEFAULT), vec![8, 1, 5, 2]);
}

#[test]
fn nested_sub_query_uses_outermost_scope() {
    let outer = ExprParameter::new("outer", Type::Entity("Bar".into()));
    let middle = ExprParameter::new("middle", Type::Entity("Child".into()));
    let apply = ApplyParameter::new("apply");
    let inner_apply = ApplyParameter::new("inner_apply");

    let inner = sub_query(
        &middle,
        &inner_apply,
        object(vec![
            outer_field("FromMiddle", 3, &middle),
            outer_field("FromOuter", 4, &outer),
        ]),
    );

    let top = sub_query(&outer, &apply, object(vec![inner.into()]));

    // The inner sub-query's reads of its own apply parameter are not part of
    // the outermost correlation.
    assert_eq!(columns(top, Modes::DEFAULT), vec![4, 5, 2]);
}

#[test]
fn grouping_key_is_gathered_before_the_group() {
    let outer = ExprParameter::new("outer", Type::Entity("Bar".into()));
    let apply = ApplyParameter::new("apply");

    let grouping = GroupingExpression::new(
        sub_query(&outer, &apply, outer_field("Name", 1, &outer)),
        field("Key", Type::I32, 9),
    );

    assert_eq!(columns(grouping, Modes::DEFAULT), vec![9, 1, 5, 2]);
}

#[test]
fn entity_set_reads_its_owner() {
    let set = EntitySetExpression::new(
        FieldInfo::new("Children", Type::sequence(Type::Entity("Bar".into()))),
        bar(),
    );

    assert_eq!(columns(set, Modes::DEFAULT), vec![0, 1, 2]);
}

#[test]
fn full_text_reads_entity_then_rank() {
    let full_text = FullTextExpression::new("ft_bar", bar(), ColumnExpression::new(Type::F64, 3));

    assert_eq!(columns(full_text.clone(), Modes::DEFAULT), vec![0, 1, 2, 3]);
    assert_eq!(columns(full_text, Modes::TREAT_ENTITY_AS_KEY), vec![0, 3]);
}

#[test]
fn markers_are_transparent() {
    let expr = Expr::marker(field("Name", Type::String, 1), MarkerType::First);
    assert_eq!(columns(expr, Modes::DEFAULT), vec![1]);
}

#[test]
fn local_collection_members() {
    let mut fields: IndexMap<Arc<str>, Expr> = IndexMap::new();
    fields.insert("A".into(), field("A", Type::I32, 4));
    fields.insert("B".into(), ColumnExpression::new(Type::I32, 2).into());

    let collection = LocalCollectionExpression::new(Type::object("Local"), fields);

    assert_eq!(columns(collection, Modes::DEFAULT), vec![4, 2]);
}

#[test]
fn projection_is_rejected() {
    let projection = ProjectionExpression::new(
        Type::sequence(Type::Entity("Bar".into())),
        item_projector(bar(), 3),
    );

    let err = ColumnGatherer::columns(&projection.into(), Modes::DEFAULT).unwrap_err();
    assert!(err.is_unsupported_operation());
}

#[test]
fn modes_combine() {
    let mut modes = Modes::DISTINCT;
    modes |= Modes::ORDERED;

    assert!(modes.contains(Modes::DISTINCT));
    assert!(modes.contains(Modes::ORDERED));
    assert!(modes.contains(Modes::DISTINCT | Modes::ORDERED));
    assert!(!modes.contains(Modes::TREAT_ENTITY_AS_KEY));
    assert!(modes.contains(Modes::DEFAULT));
}
