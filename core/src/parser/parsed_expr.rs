use crate::parser::{
    BinaryOp, BoolOp, ComparisonOp, PrimFun, Span, UnaryOp, syntax::AnnotatedSource,
};

#[derive(Debug)]
pub struct ParsedExpr<'a> {
    pub expr: &'a Expr<'a>,
    pub ann: &'a AnnotatedSource<'a, Expr<'a>>,
}

impl<'a> ParsedExpr<'a> {
    pub fn span_of(&self, expr: &Expr<'a>) -> Option<Span> {
        self.ann.span_of(expr)
    }
}

/// Surface syntax tree. Names are still plain text; the analyzer resolves them.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Binary {
        op: BinaryOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Boolean {
        op: BoolOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Comparison {
        op: ComparisonOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Unary {
        op: UnaryOp,
        expr: &'a Expr<'a>,
    },
    Call {
        callable: &'a Expr<'a>,
        args: &'a [&'a Expr<'a>],
    },
    Lambda {
        params: &'a [&'a str],
        body: &'a Expr<'a>,
    },
    If {
        cond: &'a Expr<'a>,
        then_branch: &'a Expr<'a>,
        else_branch: &'a Expr<'a>,
    },
    Let {
        bindings: &'a [(&'a str, &'a Expr<'a>)],
        body: &'a Expr<'a>,
    },
    Literal(Literal),
    Prim(PrimFun),
    Ident(&'a str),
}

impl<'a> Expr<'a> {
    pub fn as_ptr(&self) -> *const Self {
        self as *const _
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Empty,
}
