use core::cell::Cell;

use bumpalo::Bump;
use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use crate::parser::error::{ParseError, ParseErrorKind, convert_pest_error};
use crate::parser::parsed_expr::{Expr, Literal, ParsedExpr};
use crate::parser::syntax::{
    AnnotatedSource, BinaryOp, BoolOp, ComparisonOp, PrimFun, Span, UnaryOp,
};
use crate::{ToString, Vec, format};

/// Nesting limit used by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 500;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        // Binding forms extend as far to the right as possible.
        .op(
            Op::prefix(Rule::if_op) |
            Op::prefix(Rule::let_op) |
            Op::prefix(Rule::lambda_op)
        )                                               // `if`, `let`, `map`

        // Logical operators.
        .op(Op::infix(Rule::or, Assoc::Left))            // `|`
        .op(Op::infix(Rule::and, Assoc::Left))           // `&`

        // Comparison operators.
        .op(
            Op::infix(Rule::eq, Assoc::Left) |
            Op::infix(Rule::neq, Assoc::Left)
        )                                               // `=`, `!=`
        .op(
            Op::infix(Rule::lt, Assoc::Left) |
            Op::infix(Rule::gt, Assoc::Left) |
            Op::infix(Rule::le, Assoc::Left) |
            Op::infix(Rule::ge, Assoc::Left)
        )                                               // `<`, `>`, `<=`, `>=`

        // Arithmetic operators.
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                               // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left)
        )                                               // `*`, `/`
        .op(
            Op::prefix(Rule::pos) |
            Op::prefix(Rule::neg) |
            Op::prefix(Rule::not)
        )                                               // `+`, `-`, `~`

        // Application.
        .op(Op::postfix(Rule::call_op))                  // `()`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/jam.pest"]
pub struct ExpressionParser;

/// Parse `source` into an arena-allocated tree, with the default nesting limit.
pub fn parse<'a>(arena: &'a Bump, source: &'a str) -> Result<ParsedExpr<'a>, ParseError> {
    parse_with_max_depth(arena, source, DEFAULT_MAX_DEPTH)
}

pub fn parse_with_max_depth<'a>(
    arena: &'a Bump,
    source: &'a str,
    max_depth: usize,
) -> Result<ParsedExpr<'a>, ParseError> {
    let mut pairs =
        ExpressionParser::parse(Rule::main, source).map_err(|e| convert_pest_error(e, source))?;
    let ann: &'a AnnotatedSource<'a, Expr<'a>> = arena.alloc(AnnotatedSource::new(source));
    let builder = TreeBuilder {
        arena,
        source,
        ann,
        depth: Cell::new(0),
        max_depth,
    };
    let main = builder.expect(pairs.next(), "program", &Span::new(0, source.len()))?;
    let expr = builder.parse_expr(main)?;
    Ok(ParsedExpr { expr, ann })
}

/// Turns Pest pairs into arena nodes, recording a span for every node.
struct TreeBuilder<'a> {
    arena: &'a Bump,
    source: &'a str,
    ann: &'a AnnotatedSource<'a, Expr<'a>>,
    depth: Cell<usize>,
    max_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    fn parse_expr(&self, pair: Pair<'a, Rule>) -> Result<&'a Expr<'a>, ParseError> {
        let span: Span = pair.as_span().into();
        match pair.as_rule() {
            Rule::main | Rule::grouped => {
                let inner = self.expect(pair.into_inner().next(), "expression", &span)?;
                self.parse_expr(inner)
            }

            Rule::expression => {
                let depth = self.depth.get() + 1;
                if depth > self.max_depth {
                    return Err(self.error(
                        ParseErrorKind::MaxDepthExceeded {
                            depth,
                            max_depth: self.max_depth,
                        },
                        span,
                    ));
                }
                self.depth.set(depth);
                let result = self.parse_operators(pair);
                self.depth.set(depth - 1);
                result
            }

            Rule::integer => {
                let text = pair.as_str();
                let value = text.parse::<i64>().map_err(|_| {
                    self.error(
                        ParseErrorKind::InvalidNumber {
                            text: text.to_string(),
                        },
                        span.clone(),
                    )
                })?;
                Ok(self.alloc(Expr::Literal(Literal::Int(value)), span))
            }

            Rule::boolean => {
                let value = pair.as_str() == "true";
                Ok(self.alloc(Expr::Literal(Literal::Bool(value)), span))
            }

            Rule::empty => Ok(self.alloc(Expr::Literal(Literal::Empty), span)),

            Rule::prim => {
                let prim = PrimFun::from_name(pair.as_str()).ok_or_else(|| {
                    self.error(
                        ParseErrorKind::Other {
                            message: format!("Unknown primitive '{}'", pair.as_str()),
                        },
                        span.clone(),
                    )
                })?;
                Ok(self.alloc(Expr::Prim(prim), span))
            }

            Rule::ident => Ok(self.alloc(Expr::Ident(pair.as_str()), span)),

            rule => Err(self.error(
                ParseErrorKind::Other {
                    message: format!("Unhandled rule: {:?}", rule),
                },
                span,
            )),
        }
    }

    fn parse_operators(&self, pair: Pair<'a, Rule>) -> Result<&'a Expr<'a>, ParseError> {
        PRATT_PARSER
            .map_primary(|primary| self.parse_expr(primary))
            .map_prefix(|op, rhs| self.parse_prefix(op, rhs?))
            .map_postfix(|lhs, op| self.parse_postfix(lhs?, op))
            .map_infix(|lhs, op, rhs| self.parse_infix(lhs?, op, rhs?))
            .parse(pair.into_inner())
    }

    fn parse_prefix(
        &self,
        op: Pair<'a, Rule>,
        rhs: &'a Expr<'a>,
    ) -> Result<&'a Expr<'a>, ParseError> {
        let op_span: Span = op.as_span().into();
        let span = Span::combine(&op_span, &self.span_of(rhs));
        let expr = match op.as_rule() {
            Rule::pos => Expr::Unary {
                op: UnaryOp::Plus,
                expr: rhs,
            },
            Rule::neg => Expr::Unary {
                op: UnaryOp::Neg,
                expr: rhs,
            },
            Rule::not => Expr::Unary {
                op: UnaryOp::Not,
                expr: rhs,
            },
            Rule::if_op => {
                let mut parts = op.into_inner().filter(|p| p.as_rule() == Rule::expression);
                let cond = self.parse_expr(self.expect(parts.next(), "condition", &op_span)?)?;
                let then_branch =
                    self.parse_expr(self.expect(parts.next(), "then branch", &op_span)?)?;
                Expr::If {
                    cond,
                    then_branch,
                    else_branch: rhs,
                }
            }
            Rule::let_op => {
                let bindings = op
                    .into_inner()
                    .filter(|p| p.as_rule() == Rule::definition)
                    .map(|def| self.parse_definition(def))
                    .collect::<Result<Vec<_>, _>>()?;
                Expr::Let {
                    bindings: self.arena.alloc_slice_copy(&bindings),
                    body: rhs,
                }
            }
            Rule::lambda_op => {
                let params: Vec<&'a str> = op
                    .into_inner()
                    .filter(|p| p.as_rule() == Rule::params)
                    .flat_map(|p| p.into_inner())
                    .map(|p| p.as_str())
                    .collect();
                Expr::Lambda {
                    params: self.arena.alloc_slice_copy(&params),
                    body: rhs,
                }
            }
            rule => {
                return Err(self.error(
                    ParseErrorKind::Other {
                        message: format!("Unknown prefix operator: {:?}", rule),
                    },
                    op_span,
                ));
            }
        };
        Ok(self.alloc(expr, span))
    }

    fn parse_postfix(
        &self,
        lhs: &'a Expr<'a>,
        op: Pair<'a, Rule>,
    ) -> Result<&'a Expr<'a>, ParseError> {
        let op_span: Span = op.as_span().into();
        let span = Span::combine(&self.span_of(lhs), &op_span);
        match op.as_rule() {
            Rule::call_op => {
                let args = op
                    .into_inner()
                    .map(|arg| self.parse_expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let expr = Expr::Call {
                    callable: lhs,
                    args: self.arena.alloc_slice_copy(&args),
                };
                Ok(self.alloc(expr, span))
            }
            rule => Err(self.error(
                ParseErrorKind::Other {
                    message: format!("Unknown postfix operator: {:?}", rule),
                },
                op_span,
            )),
        }
    }

    fn parse_infix(
        &self,
        left: &'a Expr<'a>,
        op: Pair<'a, Rule>,
        right: &'a Expr<'a>,
    ) -> Result<&'a Expr<'a>, ParseError> {
        let span = Span::combine(&self.span_of(left), &self.span_of(right));
        let expr = match op.as_rule() {
            Rule::add => self.binary(BinaryOp::Add, left, right),
            Rule::sub => self.binary(BinaryOp::Sub, left, right),
            Rule::mul => self.binary(BinaryOp::Mul, left, right),
            Rule::div => self.binary(BinaryOp::Div, left, right),
            Rule::and => self.boolean(BoolOp::And, left, right),
            Rule::or => self.boolean(BoolOp::Or, left, right),
            Rule::eq => self.comparison(ComparisonOp::Eq, left, right),
            Rule::neq => self.comparison(ComparisonOp::Neq, left, right),
            Rule::lt => self.comparison(ComparisonOp::Lt, left, right),
            Rule::gt => self.comparison(ComparisonOp::Gt, left, right),
            Rule::le => self.comparison(ComparisonOp::Le, left, right),
            Rule::ge => self.comparison(ComparisonOp::Ge, left, right),
            rule => {
                return Err(self.error(
                    ParseErrorKind::Other {
                        message: format!("Unknown binary operator: {:?}", rule),
                    },
                    op.as_span().into(),
                ));
            }
        };
        Ok(self.alloc(expr, span))
    }

    fn binary(&self, op: BinaryOp, left: &'a Expr<'a>, right: &'a Expr<'a>) -> Expr<'a> {
        Expr::Binary { op, left, right }
    }

    fn boolean(&self, op: BoolOp, left: &'a Expr<'a>, right: &'a Expr<'a>) -> Expr<'a> {
        Expr::Boolean { op, left, right }
    }

    fn comparison(&self, op: ComparisonOp, left: &'a Expr<'a>, right: &'a Expr<'a>) -> Expr<'a> {
        Expr::Comparison { op, left, right }
    }

    fn parse_definition(
        &self,
        pair: Pair<'a, Rule>,
    ) -> Result<(&'a str, &'a Expr<'a>), ParseError> {
        let span: Span = pair.as_span().into();
        let mut inner = pair.into_inner();
        let name = self.expect(inner.next(), "definition name", &span)?.as_str();
        let value = self.parse_expr(self.expect(inner.next(), "definition value", &span)?)?;
        Ok((name, value))
    }

    fn alloc(&self, expr: Expr<'a>, span: Span) -> &'a Expr<'a> {
        let expr = self.arena.alloc(expr);
        self.ann.add_span(expr, span);
        expr
    }

    fn span_of(&self, expr: &Expr<'a>) -> Span {
        self.ann.span_of(expr).unwrap_or_else(|| Span::new(0, 0))
    }

    fn expect(
        &self,
        pair: Option<Pair<'a, Rule>>,
        what: &str,
        span: &Span,
    ) -> Result<Pair<'a, Rule>, ParseError> {
        pair.ok_or_else(|| {
            self.error(
                ParseErrorKind::Other {
                    message: format!("missing {} in parse tree", what),
                },
                span.clone(),
            )
        })
    }

    fn error(&self, kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError::new(kind, self.source.to_string(), span)
    }
}
