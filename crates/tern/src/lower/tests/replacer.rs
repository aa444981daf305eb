use super::{bar, field, index};
use crate::lower::ExtendedExpressionReplacer;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tern_core::{
    expr::{
        ApplyParameter, ColumnExpression, ConstructorExpression, ExprParameter,
        FullTextExpression, GroupingExpression, ItemProjectorExpression, ProjectionExpression,
        SubQueryExpression, Type, Value,
    },
    provider::FilterProvider,
    Error, Expr, Provider, Result,
};

fn object(args: Vec<Expr>) -> Expr {
    ConstructorExpression::new(Type::object("Dto"), args).into()
}

fn is_field(expr: &Expr, name: &str) -> bool {
    matches!(expr, Expr::Field(field) if field.name() == name)
}

/// Replaces every `Name` field with column 7.
fn name_to_column(expr: &Expr) -> Result<Option<Expr>> {
    Ok(is_field(expr, "Name").then(|| ColumnExpression::new(Type::String, 7).into()))
}

#[test]
fn no_replacement_keeps_tree() {
    let item = object(vec![
        field("Name", Type::String, 1),
        Expr::eq(field("Count", Type::I32, 2), Expr::constant(3)),
    ]);

    let replaced = ExtendedExpressionReplacer::replace_with(&item, |_: &Expr| Ok(None)).unwrap();

    assert!(replaced.ptr_eq(&item));
}

#[test]
fn replaces_matching_nodes() {
    let count = field("Count", Type::I32, 2);
    let item = object(vec![field("Name", Type::String, 1), count.clone()]);

    let replaced = ExtendedExpressionReplacer::replace_with(&item, name_to_column).unwrap();

    let Expr::Constructor(constructor) = &replaced else {
        panic!("expected constructor; actual={replaced:?}");
    };
    assert!(matches!(&constructor.arguments[0], Expr::Column(column) if column.mapping.offset == 7));
    assert!(constructor.arguments[1].ptr_eq(&count));
}

#[test]
fn replacements_are_not_revisited() {
    let name = field("Name", Type::String, 1);

    let replaced = ExtendedExpressionReplacer::replace_with(&name, |expr: &Expr| {
        Ok(is_field(expr, "Name").then(|| object(vec![expr.clone()])))
    })
    .unwrap();

    let Expr::Constructor(constructor) = &replaced else {
        panic!("expected constructor");
    };
    assert!(constructor.arguments[0].ptr_eq(&name));
}

#[test]
fn projection_item_and_data_source_are_rewritten() {
    let row = ExprParameter::new("row", Type::Tuple);
    let predicate = Expr::lambda(
        vec![row.clone()],
        Expr::eq(
            Expr::tuple_access(Expr::parameter(&row), 1, Type::I32),
            Expr::constant(5),
        ),
    );

    let projection: Expr = ProjectionExpression::new(
        Type::sequence(Type::String),
        ItemProjectorExpression::new(
            field("Name", Type::String, 1),
            FilterProvider::new(index("Bar", 3), predicate),
        ),
    )
    .into();

    let mut replacer = ExtendedExpressionReplacer::new(|expr: &Expr| {
        if expr.as_constant() == Some(&Value::I32(5)) {
            return Ok(Some(Expr::constant(6)));
        }
        name_to_column(expr)
    });
    let replaced = replacer.replace(&projection).unwrap();

    let Expr::Projection(projection) = &replaced else {
        panic!("expected projection");
    };
    let projector = &projection.item_projector;
    assert!(matches!(projector.item, Expr::Column(_)));

    let Provider::Filter(filter) = &projector.data_source else {
        panic!("expected filter");
    };
    let Expr::Lambda(lambda) = &filter.predicate else {
        panic!("expected lambda");
    };
    let Expr::Binary(binary) = &lambda.body else {
        panic!("expected binary");
    };
    assert_eq!(binary.rhs.as_constant(), Some(&Value::I32(6)));
}

#[test]
fn sub_query_is_not_entered() {
    let outer = ExprParameter::new("outer", Type::Entity("Bar".into()));
    let sub_query: Expr = SubQueryExpression::new(
        Type::sequence(Type::String),
        outer,
        ProjectionExpression::new(
            Type::sequence(Type::String),
            ItemProjectorExpression::new(field("Name", Type::String, 1), index("Bar", 3)),
        ),
        ApplyParameter::new("apply"),
    )
    .into();

    let replaced = ExtendedExpressionReplacer::replace_with(&sub_query, name_to_column).unwrap();

    assert!(replaced.ptr_eq(&sub_query));
}

#[test]
fn grouping_key_is_rewritten() {
    let outer = ExprParameter::new("outer", Type::Entity("Bar".into()));
    let sub_query = SubQueryExpression::new(
        Type::sequence(Type::String),
        outer,
        ProjectionExpression::new(
            Type::sequence(Type::String),
            ItemProjectorExpression::new(field("Name", Type::String, 1), index("Bar", 3)),
        ),
        ApplyParameter::new("apply"),
    );
    let grouping: Expr = GroupingExpression::new(sub_query, field("Name", Type::String, 1)).into();

    let replaced = ExtendedExpressionReplacer::replace_with(&grouping, name_to_column).unwrap();

    let (Expr::Grouping(before), Expr::Grouping(after)) = (&grouping, &replaced) else {
        panic!("expected grouping");
    };
    assert!(matches!(after.key, Expr::Column(_)));
    assert!(Arc::ptr_eq(
        &before.sub_query.projection,
        &after.sub_query.projection
    ));
}

#[test]
fn full_text_parts_are_offered() {
    let full_text: Expr =
        FullTextExpression::new("ft_bar", bar(), ColumnExpression::new(Type::F64, 3)).into();

    let replaced = ExtendedExpressionReplacer::replace_with(&full_text, |expr: &Expr| {
        Ok(match expr {
            Expr::Column(_) => Some(ColumnExpression::new(Type::F64, 9).into()),
            _ => None,
        })
    })
    .unwrap();

    let Expr::FullText(replaced) = &replaced else {
        panic!("expected full-text");
    };
    assert_eq!(replaced.rank.mapping.offset, 9);
}

#[test]
fn full_text_entity_must_stay_an_entity() {
    let full_text: Expr =
        FullTextExpression::new("ft_bar", bar(), ColumnExpression::new(Type::F64, 3)).into();

    let err = ExtendedExpressionReplacer::replace_with(&full_text, |expr: &Expr| {
        Ok(expr
            .as_entity()
            .map(|_| ColumnExpression::new(Type::I32, 0).into()))
    })
    .unwrap_err();

    assert!(err.is_unsupported_operation());
}

#[test]
fn delegate_errors_propagate() {
    let item = object(vec![field("Name", Type::String, 1)]);

    let err = ExtendedExpressionReplacer::replace_with(&item, |expr: &Expr| {
        if is_field(expr, "Name") {
            return Err(Error::invalid_expression("no names"));
        }
        Ok(None)
    })
    .unwrap_err();

    assert!(err.is_invalid_expression());
}
