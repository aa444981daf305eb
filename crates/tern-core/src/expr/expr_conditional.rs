use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprConditional {
    pub test: Expr,
    pub if_true: Expr,
    pub if_false: Expr,
}

impl Expr {
    pub fn conditional(
        test: impl Into<Expr>,
        if_true: impl Into<Expr>,
        if_false: impl Into<Expr>,
    ) -> Expr {
        ExprConditional {
            test: test.into(),
            if_true: if_true.into(),
            if_false: if_false.into(),
        }
        .into()
    }
}
