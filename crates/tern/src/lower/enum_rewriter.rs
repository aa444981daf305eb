use std::sync::Arc;
use tern_core::{
    expr::{visit, ExprBinary, ExprConstant, ExprConvert, ExtendedExpressionVisitor, Value},
    Error, Expr, Result,
};

/// Replaces enum values with their underlying integral representation, as
/// the relational layer has no enums.
///
/// An enum constant `c: E` becomes `Convert(Constant(n: U), E)` where `n` is
/// the numeric value of `c` and `U` the underlying type of `E`; nullability
/// carries over. A conversion of such a node back to `U` collapses to the
/// inner constant. Comparisons between enum operands compare the underlying
/// values.
pub struct EnumRewriter;

impl EnumRewriter {
    pub fn rewrite(expr: &Expr) -> Result<Expr> {
        EnumRewriter.visit(expr)
    }

    /// `expr` as its underlying type, undoing a conversion to the enum if
    /// there is one.
    fn to_underlying(expr: Expr) -> Expr {
        let ty = expr.ty();
        let underlying = ty.underlying();

        if let Expr::Convert(convert) = &expr {
            if convert.ty == ty && convert.expr.ty() == underlying {
                return convert.expr.clone();
            }
        }

        Expr::convert(expr, underlying)
    }
}

impl ExtendedExpressionVisitor for EnumRewriter {
    fn visit_constant(&mut self, node: &Arc<ExprConstant>) -> Result<Expr> {
        let Some(enum_ty) = node.ty.as_enum() else {
            return Ok(node.clone().into());
        };

        let underlying = node.ty.underlying();

        let value = match &node.value {
            Value::Null => Value::Null,
            Value::Enum(value) if value.ty == *enum_ty => {
                Value::from_integer(value.value as i128, &underlying)?
            }
            value => {
                return Err(Error::invalid_expression(format!(
                    "constant {value:?} typed as enum `{}`",
                    enum_ty.name
                )))
            }
        };

        Ok(Expr::convert(
            Expr::constant_typed(value, underlying),
            node.ty.clone(),
        ))
    }

    fn visit_convert(&mut self, node: &Arc<ExprConvert>) -> Result<Expr> {
        let expr = self.visit(&node.expr)?;

        // `Convert(Convert(n: U, E), U)` is `n`
        if let Expr::Convert(inner) = &expr {
            let operand_ty = expr.ty();

            if operand_ty.is_enum()
                && operand_ty.underlying() == node.ty
                && inner.expr.ty() == node.ty
            {
                return Ok(inner.expr.clone());
            }
        }

        if expr.ptr_eq(&node.expr) {
            return Ok(node.clone().into());
        }

        Ok(Expr::convert(expr, node.ty.clone()))
    }

    fn visit_binary(&mut self, node: &Arc<ExprBinary>) -> Result<Expr> {
        let rewritten = visit::visit_binary(self, node)?;

        let Expr::Binary(binary) = &rewritten else {
            return Ok(rewritten);
        };

        if !(binary.op.is_comparison() && binary.lhs.ty().is_enum() && binary.rhs.ty().is_enum()) {
            return Ok(rewritten);
        }

        Ok(ExprBinary {
            op: binary.op,
            lhs: Self::to_underlying(binary.lhs.clone()),
            rhs: Self::to_underlying(binary.rhs.clone()),
            ty: binary.ty.clone(),
        }
        .into())
    }
}
