use super::{Expr, Type};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnary {
    pub op: UnaryOp,
    pub operand: Expr,
    pub ty: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Negate,
}

impl Expr {
    pub fn not(operand: impl Into<Expr>) -> Expr {
        ExprUnary {
            op: UnaryOp::Not,
            operand: operand.into(),
            ty: Type::Bool,
        }
        .into()
    }

    pub fn negate(operand: impl Into<Expr>) -> Expr {
        let operand = operand.into();
        let ty = operand.ty();

        ExprUnary {
            op: UnaryOp::Negate,
            operand,
            ty,
        }
        .into()
    }
}
