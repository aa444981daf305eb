#![allow(unused_variables)]

use super::{
    ColumnExpression, ConstructorExpression, EntityExpression, EntityFieldExpression,
    EntitySetExpression, Expr, ExprBinary, ExprCall, ExprConditional, ExprConstant, ExprConvert,
    ExprLambda, ExprMember, ExprParameter, ExprUnary, FieldExpression, FullTextExpression,
    GroupingExpression, ItemProjectorExpression, KeyExpression, LocalCollectionExpression,
    MarkerExpression, ProjectionExpression, StructureExpression, StructureFieldExpression,
    SubQueryExpression,
};
use crate::Result;
use indexmap::IndexMap;
use std::sync::Arc;

/// Rewriting traversal over an expression tree.
///
/// [`visit`](ExtendedExpressionVisitor::visit) dispatches on the node kind to
/// one method per variant. Every method returns the node to put in place of
/// its input; returning a clone of the input keeps the sub-tree shared.
///
/// The default methods recurse through standard nodes, markers and
/// constructors, rebuilding a node only when one of its children changed.
/// Every other extended node is returned as is.
pub trait ExtendedExpressionVisitor {
    fn visit(&mut self, expr: &Expr) -> Result<Expr> {
        visit(self, expr)
    }

    fn visit_binary(&mut self, node: &Arc<ExprBinary>) -> Result<Expr> {
        visit_binary(self, node)
    }

    fn visit_call(&mut self, node: &Arc<ExprCall>) -> Result<Expr> {
        visit_call(self, node)
    }

    fn visit_conditional(&mut self, node: &Arc<ExprConditional>) -> Result<Expr> {
        visit_conditional(self, node)
    }

    fn visit_constant(&mut self, node: &Arc<ExprConstant>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_convert(&mut self, node: &Arc<ExprConvert>) -> Result<Expr> {
        visit_convert(self, node)
    }

    fn visit_lambda(&mut self, node: &Arc<ExprLambda>) -> Result<Expr> {
        visit_lambda(self, node)
    }

    fn visit_member(&mut self, node: &Arc<ExprMember>) -> Result<Expr> {
        visit_member(self, node)
    }

    fn visit_parameter(&mut self, node: &Arc<ExprParameter>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_unary(&mut self, node: &Arc<ExprUnary>) -> Result<Expr> {
        visit_unary(self, node)
    }

    fn visit_projection(&mut self, node: &Arc<ProjectionExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_field(&mut self, node: &Arc<FieldExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_structure_field(&mut self, node: &Arc<StructureFieldExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_key(&mut self, node: &Arc<KeyExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_entity(&mut self, node: &Arc<EntityExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_entity_field(&mut self, node: &Arc<EntityFieldExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_entity_set(&mut self, node: &Arc<EntitySetExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_column(&mut self, node: &Arc<ColumnExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_item_projector(&mut self, node: &Arc<ItemProjectorExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_marker(&mut self, node: &Arc<MarkerExpression>) -> Result<Expr> {
        visit_marker(self, node)
    }

    fn visit_sub_query(&mut self, node: &Arc<SubQueryExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_grouping(&mut self, node: &Arc<GroupingExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_local_collection(&mut self, node: &Arc<LocalCollectionExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_structure(&mut self, node: &Arc<StructureExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }

    fn visit_constructor(&mut self, node: &Arc<ConstructorExpression>) -> Result<Expr> {
        visit_constructor(self, node)
    }

    fn visit_full_text(&mut self, node: &Arc<FullTextExpression>) -> Result<Expr> {
        Ok(node.clone().into())
    }
}

pub fn visit<V>(v: &mut V, node: &Expr) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    match node {
        Expr::Binary(e) => v.visit_binary(e),
        Expr::Call(e) => v.visit_call(e),
        Expr::Conditional(e) => v.visit_conditional(e),
        Expr::Constant(e) => v.visit_constant(e),
        Expr::Convert(e) => v.visit_convert(e),
        Expr::Lambda(e) => v.visit_lambda(e),
        Expr::Member(e) => v.visit_member(e),
        Expr::Parameter(e) => v.visit_parameter(e),
        Expr::Unary(e) => v.visit_unary(e),
        Expr::Projection(e) => v.visit_projection(e),
        Expr::Field(e) => v.visit_field(e),
        Expr::StructureField(e) => v.visit_structure_field(e),
        Expr::Key(e) => v.visit_key(e),
        Expr::Entity(e) => v.visit_entity(e),
        Expr::EntityField(e) => v.visit_entity_field(e),
        Expr::EntitySet(e) => v.visit_entity_set(e),
        Expr::Column(e) => v.visit_column(e),
        Expr::ItemProjector(e) => v.visit_item_projector(e),
        Expr::Marker(e) => v.visit_marker(e),
        Expr::SubQuery(e) => v.visit_sub_query(e),
        Expr::Grouping(e) => v.visit_grouping(e),
        Expr::LocalCollection(e) => v.visit_local_collection(e),
        Expr::Structure(e) => v.visit_structure(e),
        Expr::Constructor(e) => v.visit_constructor(e),
        Expr::FullText(e) => v.visit_full_text(e),
    }
}

pub fn visit_binary<V>(v: &mut V, node: &Arc<ExprBinary>) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let lhs = v.visit(&node.lhs)?;
    let rhs = v.visit(&node.rhs)?;

    if lhs.ptr_eq(&node.lhs) && rhs.ptr_eq(&node.rhs) {
        return Ok(node.clone().into());
    }

    Ok(ExprBinary {
        op: node.op,
        lhs,
        rhs,
        ty: node.ty.clone(),
    }
    .into())
}

pub fn visit_call<V>(v: &mut V, node: &Arc<ExprCall>) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let object = node.object.as_ref().map(|object| v.visit(object)).transpose()?;
    let args = visit_all(v, &node.args)?;

    let object_changed = match (&object, &node.object) {
        (Some(after), Some(before)) => !after.ptr_eq(before),
        _ => false,
    };

    if !object_changed && args.is_none() {
        return Ok(node.clone().into());
    }

    Ok(ExprCall {
        object,
        method: node.method.clone(),
        args: args.unwrap_or_else(|| node.args.clone()),
        ty: node.ty.clone(),
    }
    .into())
}

pub fn visit_conditional<V>(v: &mut V, node: &Arc<ExprConditional>) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let test = v.visit(&node.test)?;
    let if_true = v.visit(&node.if_true)?;
    let if_false = v.visit(&node.if_false)?;

    if test.ptr_eq(&node.test) && if_true.ptr_eq(&node.if_true) && if_false.ptr_eq(&node.if_false) {
        return Ok(node.clone().into());
    }

    Ok(ExprConditional {
        test,
        if_true,
        if_false,
    }
    .into())
}

pub fn visit_convert<V>(v: &mut V, node: &Arc<ExprConvert>) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let expr = v.visit(&node.expr)?;

    if expr.ptr_eq(&node.expr) {
        return Ok(node.clone().into());
    }

    Ok(ExprConvert {
        expr,
        ty: node.ty.clone(),
    }
    .into())
}

/// Visits the body only; formal parameters are declarations, not uses.
pub fn visit_lambda<V>(v: &mut V, node: &Arc<ExprLambda>) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let body = v.visit(&node.body)?;

    if body.ptr_eq(&node.body) {
        return Ok(node.clone().into());
    }

    Ok(ExprLambda {
        params: node.params.clone(),
        body,
    }
    .into())
}

pub fn visit_member<V>(v: &mut V, node: &Arc<ExprMember>) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let expr = v.visit(&node.expr)?;

    if expr.ptr_eq(&node.expr) {
        return Ok(node.clone().into());
    }

    Ok(ExprMember {
        expr,
        member: node.member.clone(),
        ty: node.ty.clone(),
    }
    .into())
}

pub fn visit_unary<V>(v: &mut V, node: &Arc<ExprUnary>) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let operand = v.visit(&node.operand)?;

    if operand.ptr_eq(&node.operand) {
        return Ok(node.clone().into());
    }

    Ok(ExprUnary {
        op: node.op,
        operand,
        ty: node.ty.clone(),
    }
    .into())
}

pub fn visit_marker<V>(v: &mut V, node: &Arc<MarkerExpression>) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let target = v.visit(&node.target)?;

    if target.ptr_eq(&node.target) {
        return Ok(node.clone().into());
    }

    Ok(MarkerExpression {
        target,
        marker: node.marker,
    }
    .into())
}

pub fn visit_constructor<V>(v: &mut V, node: &Arc<ConstructorExpression>) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let arguments = visit_all(v, &node.arguments)?;
    let bindings = visit_map(v, &node.bindings)?;
    let native_bindings = visit_map(v, &node.native_bindings)?;

    if arguments.is_none() && bindings.is_none() && native_bindings.is_none() {
        return Ok(node.clone().into());
    }

    Ok(ConstructorExpression {
        ty: node.ty.clone(),
        bindings: bindings.unwrap_or_else(|| node.bindings.clone()),
        native_bindings: native_bindings.unwrap_or_else(|| node.native_bindings.clone()),
        arguments: arguments.unwrap_or_else(|| node.arguments.clone()),
    }
    .into())
}

/// Rebuilds a local collection from its visited field values.
pub fn visit_local_collection<V>(v: &mut V, node: &Arc<LocalCollectionExpression>) -> Result<Expr>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    match visit_map(v, &node.fields)? {
        None => Ok(node.clone().into()),
        Some(fields) => Ok(LocalCollectionExpression {
            ty: node.ty.clone(),
            fields,
            outer_parameter: node.outer_parameter.clone(),
        }
        .into()),
    }
}

/// Visits every expression in order. Returns `None` when none of them
/// changed.
pub fn visit_all<V>(v: &mut V, exprs: &[Expr]) -> Result<Option<Vec<Expr>>>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let mut changed = false;
    let mut result = Vec::with_capacity(exprs.len());

    for expr in exprs {
        let visited = v.visit(expr)?;
        changed |= !visited.ptr_eq(expr);
        result.push(visited);
    }

    Ok(changed.then_some(result))
}

/// Visits every value of a member map, keeping the keys. Returns `None` when
/// none of the values changed.
pub fn visit_map<V>(v: &mut V, exprs: &IndexMap<Arc<str>, Expr>) -> Result<Option<IndexMap<Arc<str>, Expr>>>
where
    V: ExtendedExpressionVisitor + ?Sized,
{
    let mut changed = false;
    let mut result = IndexMap::with_capacity(exprs.len());

    for (name, expr) in exprs {
        let visited = v.visit(expr)?;
        changed |= !visited.ptr_eq(expr);
        result.insert(name.clone(), visited);
    }

    Ok(changed.then_some(result))
}

/// Calls `f` on every node of the tree, parents before children. Does not
/// descend into projections, item projectors or sub-queries.
pub fn for_each_expr<F>(expr: &Expr, f: F) -> Result<()>
where
    F: FnMut(&Expr),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F> ExtendedExpressionVisitor for ForEach<F>
    where
        F: FnMut(&Expr),
    {
        fn visit(&mut self, expr: &Expr) -> Result<Expr> {
            (self.f)(expr);
            visit(self, expr)
        }
    }

    ForEach { f }.visit(expr)?;
    Ok(())
}
