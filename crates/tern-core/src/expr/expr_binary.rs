use super::{Expr, Type};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinary {
    pub op: BinaryOp,
    pub lhs: Expr,
    pub rhs: Expr,
    pub ty: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    AndAlso,
    OrElse,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::LessThan
                | BinaryOp::LessThanOrEqual
                | BinaryOp::GreaterThan
                | BinaryOp::GreaterThanOrEqual
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::AndAlso | BinaryOp::OrElse)
    }

    pub fn is_arithmetic(self) -> bool {
        !self.is_comparison() && !self.is_logical()
    }
}

impl Expr {
    /// Builds a binary expression. Comparisons and logical operators are
    /// typed `bool`; arithmetic takes the type of the left operand.
    pub fn binary(op: BinaryOp, lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        let lhs = lhs.into();
        let rhs = rhs.into();
        let ty = if op.is_arithmetic() {
            lhs.ty()
        } else {
            Type::Bool
        };

        ExprBinary { op, lhs, rhs, ty }.into()
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Equal, lhs, rhs)
    }

    pub fn and(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::AndAlso, lhs, rhs)
    }

    pub fn or(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::OrElse, lhs, rhs)
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Expr::Binary(_))
    }
}
