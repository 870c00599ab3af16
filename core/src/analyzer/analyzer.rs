use alloc::string::ToString;
use bumpalo::Bump;
use tracing::debug;

use crate::{
    Vec,
    analyzer::error::{SyntaxError, SyntaxErrorKind},
    ast::{Def, Expr, Lambda, Variable},
    parser::{self, Literal, ParsedExpr, Span},
    scope_stack::{CompleteScope, ScopeStack},
};

/// Resolve every name in `parsed` to the [`Variable`] that binds it.
///
/// The result is the tree the evaluator runs. Nothing is evaluated here.
pub fn analyze<'a>(arena: &'a Bump, parsed: &ParsedExpr<'a>) -> Result<&'a Expr<'a>, SyntaxError> {
    let mut analyzer = Analyzer {
        arena,
        parsed,
        scopes: ScopeStack::new(),
    };
    let expr = analyzer.analyze(parsed.expr)?;
    debug!(source = parsed.ann.source, "resolved program");
    Ok(expr)
}

struct Analyzer<'a, 'p> {
    arena: &'a Bump,
    parsed: &'p ParsedExpr<'a>,
    scopes: ScopeStack<'a, &'a Variable<'a>>,
}

impl<'a, 'p> Analyzer<'a, 'p> {
    fn alloc(&self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.arena.alloc(expr)
    }

    fn span_of(&self, expr: &parser::Expr<'a>) -> Span {
        self.parsed.span_of(expr).unwrap_or(Span(0..0))
    }

    fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.parsed.ann.source.to_string())
    }

    /// One fresh binder per name, pushed as a single scope for the duration of `f`.
    fn with_binders<R>(
        &mut self,
        names: impl Iterator<Item = &'a str>,
        on_duplicate: impl FnOnce(&Self, &str) -> SyntaxError,
        f: impl FnOnce(&mut Self, &[&'a Variable<'a>]) -> Result<R, SyntaxError>,
    ) -> Result<R, SyntaxError> {
        let arena = self.arena;
        let vars: Vec<&'a Variable<'a>> = names
            .map(|name| &*arena.alloc(Variable::new(name)))
            .collect();
        let scope = CompleteScope::new(arena, vars.iter().map(|var| (var.name, *var)))
            .map_err(|dup| on_duplicate(self, &dup.0))?;

        self.scopes.push(scope);
        let result = f(self, &vars);
        // Balanced with the push above.
        let _ = self.scopes.pop();
        result
    }

    fn analyze(&mut self, expr: &'a parser::Expr<'a>) -> Result<&'a Expr<'a>, SyntaxError> {
        let resolved = match *expr {
            parser::Expr::Literal(Literal::Int(n)) => Expr::Int(n),
            parser::Expr::Literal(Literal::Bool(b)) => Expr::Bool(b),
            parser::Expr::Literal(Literal::Empty) => Expr::Empty,
            parser::Expr::Prim(prim) => Expr::Prim(prim),

            parser::Expr::Ident(name) => match self.scopes.lookup(name) {
                Some(var) => Expr::Var(var),
                None => {
                    return Err(self.error(SyntaxErrorKind::FreeVariable {
                        name: name.to_string(),
                        span: self.span_of(expr),
                    }));
                }
            },

            parser::Expr::Unary { op, expr: operand } => Expr::Unary {
                op,
                arg: self.analyze(operand)?,
            },
            parser::Expr::Binary { op, left, right } => Expr::Binary {
                op,
                left: self.analyze(left)?,
                right: self.analyze(right)?,
            },
            parser::Expr::Comparison { op, left, right } => Expr::Comparison {
                op,
                left: self.analyze(left)?,
                right: self.analyze(right)?,
            },
            parser::Expr::Boolean { op, left, right } => Expr::Boolean {
                op,
                left: self.analyze(left)?,
                right: self.analyze(right)?,
            },

            parser::Expr::Call { callable, args } => {
                let rator = self.analyze(callable)?;
                let args = args
                    .iter()
                    .map(|&arg| self.analyze(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Expr::App {
                    rator,
                    args: self.arena.alloc_slice_copy(&args),
                }
            }

            parser::Expr::If {
                cond,
                then_branch,
                else_branch,
            } => Expr::If {
                test: self.analyze(cond)?,
                conseq: self.analyze(then_branch)?,
                alt: self.analyze(else_branch)?,
            },

            parser::Expr::Lambda { params, body } => {
                let on_duplicate = |this: &Self, name: &str| {
                    this.error(SyntaxErrorKind::DuplicateParameter {
                        name: name.to_string(),
                        span: this.span_of(expr),
                    })
                };
                let lambda = self.with_binders(
                    params.iter().copied(),
                    on_duplicate,
                    |this, vars| {
                        let body = this.analyze(body)?;
                        Ok(Lambda {
                            params: this.arena.alloc_slice_copy(vars),
                            body,
                        })
                    },
                )?;
                Expr::Map(self.arena.alloc(lambda))
            }

            // Recursive: the definitions are in scope in every right-hand side.
            parser::Expr::Let { bindings, body } => {
                let on_duplicate = |this: &Self, name: &str| {
                    let mut rhs = bindings.iter().filter(|(n, _)| *n == name).map(|(_, rhs)| *rhs);
                    let first = rhs.next().map(|rhs| this.span_of(rhs));
                    let span = rhs.next().map_or_else(|| this.span_of(expr), |rhs| this.span_of(rhs));
                    this.error(SyntaxErrorKind::DuplicateDefinition {
                        name: name.to_string(),
                        span,
                        first,
                    })
                };
                self.with_binders(
                    bindings.iter().map(|(name, _)| *name),
                    on_duplicate,
                    |this, vars| {
                        let defs = vars
                            .iter()
                            .zip(bindings.iter())
                            .map(|(&var, &(_, rhs))| {
                                Ok(Def {
                                    var,
                                    rhs: this.analyze(rhs)?,
                                })
                            })
                            .collect::<Result<Vec<_>, SyntaxError>>()?;
                        let body = this.analyze(body)?;
                        Ok(Expr::Let {
                            defs: this.arena.alloc_slice_fill_iter(defs),
                            body,
                        })
                    },
                )?
            }
        };
        Ok(self.alloc(resolved))
    }
}
