//! The nine evaluation entry points.

use bumpalo::Bump;
use tracing::debug;

use super::Error;
use crate::{
    analyzer,
    ast::Expr,
    evaluator::{Evaluator, EvaluatorOptions, Strategy},
    parser,
    values::Value,
};

/// A checked Jam program, ready to run under any strategy.
///
/// # Lifetimes
///
/// - `'arena`: Lifetime of the arena holding the program and every value it
///   produces. Results borrow from this arena.
///
/// # Example
///
/// ```
/// use jam_core::api::Interpreter;
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let program = Interpreter::new(&arena, "let x := 2 * 3; in x + 12").unwrap();
///
/// assert_eq!(program.value_value().unwrap().as_int(), Some(18));
/// assert_eq!(program.need_need().unwrap().as_int(), Some(18));
/// ```
pub struct Interpreter<'arena> {
    arena: &'arena Bump,
    expr: &'arena Expr<'arena>,
    options: EvaluatorOptions,
}

impl<'arena> Interpreter<'arena> {
    /// Parse and check `source`.
    pub fn new(arena: &'arena Bump, source: &str) -> Result<Self, Error> {
        let source = arena.alloc_str(source);
        let parsed = parser::parse(arena, source)?;
        let expr = analyzer::analyze(arena, &parsed)?;
        Ok(Self::from_expr(arena, expr))
    }

    /// Wrap an AST built without the parser.
    ///
    /// Variables must still be resolved to their binders; an unresolved one
    /// raises `UnboundVariable` when it is reached.
    pub fn from_expr(arena: &'arena Bump, expr: &'arena Expr<'arena>) -> Self {
        Self {
            arena,
            expr,
            options: EvaluatorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EvaluatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn expr(&self) -> &'arena Expr<'arena> {
        self.expr
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    /// A fresh evaluator for this program, for callers that want its
    /// statistics or lower-level access.
    pub fn evaluator(&self, strategy: Strategy) -> Evaluator<'arena> {
        Evaluator::new(self.arena, strategy, self.options)
    }

    /// Run the program under any binding/cons pair, built-in or not.
    pub fn eval_with(&self, strategy: Strategy) -> Result<Value<'arena>, Error> {
        debug!(%strategy, "running program");
        self.evaluator(strategy).eval(self.expr).map_err(Error::from)
    }

    pub fn value_value(&self) -> Result<Value<'arena>, Error> {
        self.eval_with(Strategy::VALUE_VALUE)
    }

    pub fn value_name(&self) -> Result<Value<'arena>, Error> {
        self.eval_with(Strategy::VALUE_NAME)
    }

    pub fn value_need(&self) -> Result<Value<'arena>, Error> {
        self.eval_with(Strategy::VALUE_NEED)
    }

    pub fn name_value(&self) -> Result<Value<'arena>, Error> {
        self.eval_with(Strategy::NAME_VALUE)
    }

    pub fn name_name(&self) -> Result<Value<'arena>, Error> {
        self.eval_with(Strategy::NAME_NAME)
    }

    pub fn name_need(&self) -> Result<Value<'arena>, Error> {
        self.eval_with(Strategy::NAME_NEED)
    }

    pub fn need_value(&self) -> Result<Value<'arena>, Error> {
        self.eval_with(Strategy::NEED_VALUE)
    }

    pub fn need_name(&self) -> Result<Value<'arena>, Error> {
        self.eval_with(Strategy::NEED_NAME)
    }

    pub fn need_need(&self) -> Result<Value<'arena>, Error> {
        self.eval_with(Strategy::NEED_NEED)
    }

    /// Call-by-value with eager `cons`.
    pub fn call_by_value(&self) -> Result<Value<'arena>, Error> {
        self.value_value()
    }

    /// Call-by-name with eager `cons`.
    pub fn call_by_name(&self) -> Result<Value<'arena>, Error> {
        self.name_value()
    }

    /// Call-by-need with eager `cons`.
    pub fn call_by_need(&self) -> Result<Value<'arena>, Error> {
        self.need_value()
    }
}
