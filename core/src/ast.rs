//! Resolved abstract syntax tree consumed by the evaluator.
//!
//! Unlike [`crate::parser::Expr`], variables here are not names: every binding
//! occurrence owns one arena-allocated [`Variable`] and every use points at it.
//! Lookups compare [`Variable`] addresses, so two distinct binders that share a
//! name never alias.

use core::fmt;
use core::ptr;

pub use crate::parser::{BinaryOp, BoolOp, ComparisonOp, PrimFun, UnaryOp};

/// A binding occurrence. Identity is the address of this value.
#[derive(Debug)]
pub struct Variable<'a> {
    pub name: &'a str,
}

impl<'a> Variable<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }

    /// Whether `self` and `other` are the same binder.
    pub fn same(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

/// A function literal: `map x, y to body`.
#[derive(Debug)]
pub struct Lambda<'a> {
    pub params: &'a [&'a Variable<'a>],
    pub body: &'a Expr<'a>,
}

impl<'a> Lambda<'a> {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The `map x,y` head, used to name a closure in error messages.
    pub fn head(&self) -> LambdaHead<'_, 'a> {
        LambdaHead(self)
    }
}

pub struct LambdaHead<'l, 'a>(&'l Lambda<'a>);

impl fmt::Display for LambdaHead<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("map ")?;
        for (i, param) in self.0.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(param.name)?;
        }
        Ok(())
    }
}

/// One `name := rhs;` definition of a `let`.
#[derive(Debug)]
pub struct Def<'a> {
    pub var: &'a Variable<'a>,
    pub rhs: &'a Expr<'a>,
}

#[derive(Debug)]
pub enum Expr<'a> {
    Int(i64),
    Bool(bool),
    Empty,
    Var(&'a Variable<'a>),
    Prim(PrimFun),
    Map(&'a Lambda<'a>),
    App {
        rator: &'a Expr<'a>,
        args: &'a [&'a Expr<'a>],
    },
    If {
        test: &'a Expr<'a>,
        conseq: &'a Expr<'a>,
        alt: &'a Expr<'a>,
    },
    Let {
        defs: &'a [Def<'a>],
        body: &'a Expr<'a>,
    },
    Unary {
        op: UnaryOp,
        arg: &'a Expr<'a>,
    },
    Binary {
        op: BinaryOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Comparison {
        op: ComparisonOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Boolean {
        op: BoolOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
}

impl fmt::Display for Lambda<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.head(), self.body)
    }
}

// Unparser. Binary applications are fully parenthesised so the output never
// depends on precedence.
impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(n) => write!(f, "{}", n),
            Expr::Bool(b) => write!(f, "{}", b),
            Expr::Empty => f.write_str("empty"),
            Expr::Var(var) => f.write_str(var.name),
            Expr::Prim(prim) => write!(f, "{}", prim),
            Expr::Map(lambda) => write!(f, "{}", lambda),
            Expr::App { rator, args } => {
                match rator {
                    Expr::Map(_) | Expr::If { .. } | Expr::Let { .. } | Expr::Unary { .. } => {
                        write!(f, "({})", rator)?
                    }
                    _ => write!(f, "{}", rator)?,
                }
                f.write_str("(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::If { test, conseq, alt } => {
                write!(f, "if {} then {} else {}", test, conseq, alt)
            }
            Expr::Let { defs, body } => {
                f.write_str("let ")?;
                for def in defs.iter() {
                    write!(f, "{} := {}; ", def.var.name, def.rhs)?;
                }
                write!(f, "in {}", body)
            }
            Expr::Unary { op, arg } => match arg {
                Expr::Int(_) | Expr::Bool(_) | Expr::Var(_) | Expr::App { .. } => {
                    write!(f, "{}{}", op.symbol(), arg)
                }
                _ => write!(f, "{}({})", op.symbol(), arg),
            },
            Expr::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Comparison { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Boolean { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
        }
    }
}
