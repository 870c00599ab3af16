//! Core evaluation logic.

use core::ptr;

use bumpalo::Bump;
use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::{
    ToString, Vec,
    ast::{BoolOp, ComparisonOp, Def, Expr, Lambda, Variable},
    evaluator::{
        Env, ExecutionError,
        ResourceExceededError::{IterationLimit, StackOverflow},
        RuntimeError, Strategy, operators, primitives,
    },
    values::{Closure, ConsCell, Value},
};

/// Run `f` with enough native stack left for one more level of evaluation,
/// so deep programs stop at `max_depth` instead of at the end of the thread's
/// stack.
#[cfg(any(feature = "std", test))]
fn grow_stack<R>(f: impl FnOnce() -> R) -> R {
    const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
    const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, f)
}

// Without std there is no new segment to move to; size `max_depth` for the
// caller's stack.
#[cfg(not(any(feature = "std", test)))]
fn grow_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Resource limits for one evaluation.
///
/// # Example
///
/// ```
/// use jam_core::evaluator::EvaluatorOptions;
///
/// let options = EvaluatorOptions {
///     max_depth: 500,
///     ..Default::default()
/// };
/// assert_eq!(options.max_iterations, Some(1_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Maximum evaluation recursion depth.
    ///
    /// Default: 10 000
    pub max_depth: usize,

    /// Maximum number of list cells forced while materialising a result, and
    /// the maximum number of spine steps of a single equality test.
    ///
    /// `None` removes the limit; infinite lists then never finish.
    ///
    /// Default: 1 000 000
    pub max_iterations: Option<usize>,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: 10_000,
            max_iterations: Some(1_000_000),
        }
    }
}

/// Work counters, reset by nothing: one evaluator, one set of numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Expression nodes evaluated.
    pub nodes: usize,
    /// Suspensions forced, by-name re-forcing included.
    pub forces: usize,
    /// Deepest recursion reached.
    pub max_depth: usize,
}

/// Tree-walking evaluator parameterised by a [`Strategy`].
pub struct Evaluator<'a> {
    arena: &'a Bump,
    strategy: Strategy,
    options: EvaluatorOptions,
    depth: usize,
    stats: EvalStats,
}

impl<'a> Evaluator<'a> {
    pub fn new(arena: &'a Bump, strategy: Strategy, options: EvaluatorOptions) -> Self {
        Self {
            arena,
            strategy,
            options,
            depth: 0,
            stats: EvalStats::default(),
        }
    }

    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    /// Move `value` into the arena.
    pub fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    pub fn stats(&self) -> EvalStats {
        self.stats
    }

    pub(crate) fn record_force(&mut self) {
        self.stats.forces += 1;
    }

    /// Evaluate a closed program and force every list cell of the result.
    pub fn eval(&mut self, expr: &'a Expr<'a>) -> Result<Value<'a>, ExecutionError> {
        debug!(strategy = %self.strategy, "evaluating program");
        let result = self
            .eval_in(expr, Env::EMPTY)
            .and_then(|value| self.materialize(value));
        debug!(
            strategy = %self.strategy,
            ok = result.is_ok(),
            nodes = self.stats.nodes,
            forces = self.stats.forces,
            max_depth = self.stats.max_depth,
            "evaluation finished"
        );
        result
    }

    /// Evaluate a closed program to weak head normal form. Lazy list cells of
    /// the result are left as they are.
    pub fn eval_lazy(&mut self, expr: &'a Expr<'a>) -> Result<Value<'a>, ExecutionError> {
        self.eval_in(expr, Env::EMPTY)
    }

    /// Evaluate `expr` in `env`.
    pub fn eval_in(&mut self, expr: &'a Expr<'a>, env: Env<'a>) -> Result<Value<'a>, ExecutionError> {
        self.enter()?;
        self.stats.nodes += 1;
        let result = grow_stack(|| self.eval_node(expr, env));
        self.depth -= 1;
        result
    }

    // Check depth before recursing.
    fn enter(&mut self) -> Result<(), ExecutionError> {
        if self.depth >= self.options.max_depth {
            return Err(StackOverflow {
                depth: self.depth,
                max_depth: self.options.max_depth,
            }
            .into());
        }
        self.depth += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        Ok(())
    }

    fn eval_node(&mut self, expr: &'a Expr<'a>, env: Env<'a>) -> Result<Value<'a>, ExecutionError> {
        match *expr {
            Expr::Int(n) => Ok(Value::Int(n)),
            Expr::Bool(b) => Ok(Value::Bool(b)),
            Expr::Empty => Ok(Value::Empty),
            Expr::Prim(prim) => Ok(Value::Prim(prim)),
            Expr::Var(var) => self.lookup(var, env),
            Expr::Map(lambda) => Ok(self.make_closure(lambda, env)),
            Expr::If { test, conseq, alt } => {
                let test = self.eval_in(test, env)?;
                if operators::expect_bool("if", test)? {
                    self.eval_in(conseq, env)
                } else {
                    self.eval_in(alt, env)
                }
            }
            Expr::Let { defs, body } => self.eval_let(defs, body, env),
            Expr::App { rator, args } => self.eval_app(rator, args, env),
            Expr::Unary { op, arg } => {
                let value = self.eval_in(arg, env)?;
                Ok(operators::eval_unary(op, value)?)
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval_in(left, env)?;
                let right = self.eval_in(right, env)?;
                let l = operators::expect_int(op.symbol(), left)?;
                let r = operators::expect_int(op.symbol(), right)?;
                Ok(Value::Int(operators::eval_binary_int(op, l, r)?))
            }
            Expr::Comparison { op, left, right } => {
                let left = self.eval_in(left, env)?;
                let right = self.eval_in(right, env)?;
                let result = match op {
                    ComparisonOp::Eq => self.values_equal(left, right)?,
                    ComparisonOp::Neq => !self.values_equal(left, right)?,
                    _ => {
                        let l = operators::expect_int(op.symbol(), left)?;
                        let r = operators::expect_int(op.symbol(), right)?;
                        operators::eval_comparison_int(op, l, r)
                    }
                };
                Ok(Value::bool(result))
            }
            Expr::Boolean { op, left, right } => {
                let left = self.eval_in(left, env)?;
                let left = operators::expect_bool(op.symbol(), left)?;

                // Short-circuit evaluation
                match (op, left) {
                    (BoolOp::And, false) => Ok(Value::bool(false)),
                    (BoolOp::Or, true) => Ok(Value::bool(true)),
                    _ => {
                        let right = self.eval_in(right, env)?;
                        Ok(Value::bool(operators::expect_bool(op.symbol(), right)?))
                    }
                }
            }
        }
    }

    fn lookup(&mut self, var: &'a Variable<'a>, env: Env<'a>) -> Result<Value<'a>, ExecutionError> {
        match env.find(var) {
            Some(binding) => binding.thunk.force(self, var.name),
            // The analyzer rejects free variables; only hand-built trees get here.
            None => Err(RuntimeError::UnboundVariable {
                name: var.name.to_string(),
            }
            .into()),
        }
    }

    fn make_closure(&self, lambda: &'a Lambda<'a>, env: Env<'a>) -> Value<'a> {
        Value::Closure(self.alloc(Closure::new(lambda, env)))
    }

    /// Recursive `let`: every definition sees every sibling. Placeholders go
    /// in first and are filled in source order, so a call-by-value right-hand
    /// side that reads a later sibling hits an unset placeholder.
    fn eval_let(
        &mut self,
        defs: &'a [Def<'a>],
        body: &'a Expr<'a>,
        env: Env<'a>,
    ) -> Result<Value<'a>, ExecutionError> {
        let policy = self.strategy.binding;

        let mut placeholders = Vec::with_capacity(defs.len());
        let mut scope = env;
        for def in defs {
            let dummy = policy.new_dummy_binding(self, def.var);
            scope = scope.extend(self.arena, dummy);
            placeholders.push(dummy);
        }

        for (def, dummy) in defs.iter().zip(placeholders) {
            let binding = policy.new_binding(self, def.var, def.rhs, scope)?;
            dummy.install(binding);
        }

        self.eval_in(body, scope)
    }

    fn eval_app(
        &mut self,
        rator: &'a Expr<'a>,
        args: &'a [&'a Expr<'a>],
        env: Env<'a>,
    ) -> Result<Value<'a>, ExecutionError> {
        match self.eval_in(rator, env)? {
            Value::Closure(closure) => self.apply_closure(closure, args, env),
            Value::Prim(prim) => primitives::apply_prim(self, prim, args, env),
            other => Err(RuntimeError::TypeError {
                operation: "application".to_string(),
                expected: "function",
                found: other.kind(),
            }
            .into()),
        }
    }

    /// Bind the parameters on top of the closure's captured environment.
    /// Argument expressions belong to the caller, so they are bound (and, under
    /// call-by-value, evaluated) in `env`.
    fn apply_closure(
        &mut self,
        closure: &'a Closure<'a>,
        args: &'a [&'a Expr<'a>],
        env: Env<'a>,
    ) -> Result<Value<'a>, ExecutionError> {
        let lambda = closure.lambda;
        if lambda.arity() != args.len() {
            return Err(RuntimeError::ArityError {
                function: lambda.head().to_string(),
                expected: lambda.arity(),
                found: args.len(),
            }
            .into());
        }
        trace!(closure = %lambda.head(), depth = self.depth, "applying closure");

        let policy = self.strategy.binding;
        let mut callee_env = closure.env;
        for (&param, &arg) in lambda.params.iter().zip(args) {
            let binding = policy.new_binding(self, param, arg, env)?;
            callee_env = callee_env.extend(self.arena, binding);
        }
        self.eval_in(lambda.body, callee_env)
    }

    /// Structural equality behind `=` and `!=`.
    ///
    /// Cons cells compare element-wise, forcing lazy components; the spine is
    /// walked iteratively so long lists do not consume recursion depth.
    /// Closures compare by identity, primitives by which primitive they are.
    pub fn values_equal(
        &mut self,
        left: Value<'a>,
        right: Value<'a>,
    ) -> Result<bool, ExecutionError> {
        self.enter()?;
        let result = grow_stack(|| self.spine_equal(left, right));
        self.depth -= 1;
        result
    }

    fn spine_equal(&mut self, mut left: Value<'a>, mut right: Value<'a>) -> Result<bool, ExecutionError> {
        let mut steps = 0usize;
        loop {
            let (a, b) = match (left, right) {
                (Value::Cons(a), Value::Cons(b)) => (a, b),
                _ => return Ok(left == right),
            };
            if ptr::eq(a, b) {
                return Ok(true);
            }
            if let Some(limit) = self.options.max_iterations {
                if steps >= limit {
                    return Err(IterationLimit { limit }.into());
                }
            }
            steps += 1;

            let first_a = a.first(self)?;
            let first_b = b.first(self)?;
            if !self.values_equal(first_a, first_b)? {
                return Ok(false);
            }
            left = a.rest(self)?;
            right = b.rest(self)?;
        }
    }

    /// Force every list cell reachable from `value` and store the results in
    /// place, so the value can be rendered without an evaluator. Shared and
    /// cyclic structure is visited once.
    fn materialize(&mut self, value: Value<'a>) -> Result<Value<'a>, ExecutionError> {
        let mut pending: Vec<&'a ConsCell<'a>> = Vec::new();
        let mut seen: HashSet<*const ConsCell<'a>> = HashSet::new();
        if let Value::Cons(cell) = value {
            pending.push(cell);
        }

        while let Some(cell) = pending.pop() {
            if !seen.insert(cell as *const ConsCell<'a>) {
                continue;
            }
            if let Some(limit) = self.options.max_iterations {
                if seen.len() > limit {
                    return Err(IterationLimit { limit }.into());
                }
            }

            let first = cell.first(self)?;
            cell.first_thunk().settle(first);
            let rest = cell.rest(self)?;
            cell.rest_thunk().settle(rest);

            if let Value::Cons(next) = rest {
                pending.push(next);
            }
            if let Value::Cons(nested) = first {
                pending.push(nested);
            }
        }
        Ok(value)
    }
}
