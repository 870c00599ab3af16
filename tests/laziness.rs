//! Infinite and cyclic structures, and how much work each strategy does.

#[macro_use]
mod cases;

use bumpalo::Bump;
use cases::{cycle, diverges, forward_reference, run_with_options};
use indoc::indoc;
use jam::{Error, EvaluatorOptions, Interpreter, ResourceExceededError, Strategy};
use pretty_assertions::assert_eq;

test_case!(
    prefix_of_infinite_list,
    input: indoc! {"
        let nats := map n to cons(n, nats(n + 1));
            take := map n, l to if n = 0 then empty else cons(first(l), take(n - 1, rest(l)));
        in take(3, nats(0))
    "},
    VALUE_VALUE: Err(diverges()),
    NAME_VALUE: Err(diverges()),
    NEED_VALUE: Err(diverges()),
    VALUE_NAME: Ok("(0 1 2)"),
    VALUE_NEED: Ok("(0 1 2)"),
    NAME_NAME: Ok("(0 1 2)"),
    NAME_NEED: Ok("(0 1 2)"),
    NEED_NAME: Ok("(0 1 2)"),
    NEED_NEED: Ok("(0 1 2)"),
);

test_case!(
    sieve_of_eratosthenes,
    input: indoc! {"
        let from := map n to cons(n, from(n + 1));
            rem := map a, b to a - (a / b) * b;
            filter := map p, l to
                if p(first(l)) then cons(first(l), filter(p, rest(l))) else filter(p, rest(l));
            sieve := map l to
                cons(first(l), sieve(filter(map x to rem(x, first(l)) != 0, rest(l))));
            take := map n, l to if n = 0 then empty else cons(first(l), take(n - 1, rest(l)));
        in take(5, sieve(from(2)))
    "},
    VALUE_VALUE: Err(diverges()),
    VALUE_NEED: Ok("(2 3 5 7 11)"),
    NEED_NEED: Ok("(2 3 5 7 11)"),
);

test_case!(
    self_referential_list,
    input: "let ones := cons(1, ones); in ones",
    VALUE_VALUE: Err(forward_reference("ones")),
    NAME_VALUE: Err(diverges()),
    NEED_VALUE: Err(cycle("ones")),
    VALUE_NAME: Ok("(1 ...)"),
    VALUE_NEED: Ok("(1 ...)"),
    NEED_NAME: Ok("(1 ...)"),
    NEED_NEED: Ok("(1 ...)"),
);
// A shared binding ties the knot; the printer stops at the repeat

#[test]
fn test_unshared_infinite_list_hits_iteration_limit() {
    let options = EvaluatorOptions {
        max_iterations: Some(50),
        ..EvaluatorOptions::default()
    };
    for strategy in [Strategy::NAME_NAME, Strategy::NAME_NEED] {
        assert_eq!(
            run_with_options("let ones := cons(1, ones); in ones", strategy, options),
            Err(Error::ResourceExceeded(ResourceExceededError::IterationLimit { limit: 50 })),
            "strategy {}",
            strategy
        );
    }
}

#[test]
fn test_equality_of_infinite_lists_is_bounded() {
    let options = EvaluatorOptions {
        max_iterations: Some(100),
        ..EvaluatorOptions::default()
    };
    assert_eq!(
        run_with_options(
            "let a := cons(1, a); b := cons(1, b); in a = b",
            Strategy::VALUE_NEED,
            options
        ),
        Err(Error::ResourceExceeded(ResourceExceededError::IterationLimit { limit: 100 }))
    );
    assert_eq!(
        run_with_options("let a := cons(1, a); in a = a", Strategy::VALUE_NEED, options),
        Ok("true".to_string())
    );
}

#[test]
fn test_forces_per_strategy() {
    let arena = Bump::new();
    let program =
        Interpreter::new(&arena, "let l := cons(2 * 3, empty); in first(l) * first(l)").unwrap();

    let forces: Vec<(String, usize)> = Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let mut evaluator = program.evaluator(strategy);
            let value = evaluator.eval(program.expr()).unwrap();
            assert_eq!(value.as_int(), Some(36));
            (strategy.to_string(), evaluator.stats().forces)
        })
        .collect();

    let expected = [
        ("value/value", 0),
        ("value/name", 2),
        ("value/need", 1),
        ("name/value", 2),
        ("name/name", 4),
        ("name/need", 4),
        ("need/value", 1),
        ("need/name", 3),
        ("need/need", 2),
    ];
    assert_eq!(
        forces,
        expected
            .iter()
            .map(|&(name, n)| (name.to_string(), n))
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_need_evaluates_each_definition_once() {
    let arena = Bump::new();
    let source = indoc! {"
        let sum := map n to if n = 0 then 0 else n + sum(n - 1);
            big := sum(20);
        in big + big + big
    "};
    let program = Interpreter::new(&arena, source).unwrap();

    let mut by_name = program.evaluator(Strategy::NAME_VALUE);
    let mut by_need = program.evaluator(Strategy::NEED_VALUE);
    assert_eq!(by_name.eval(program.expr()).unwrap().as_int(), Some(630));
    assert_eq!(by_need.eval(program.expr()).unwrap().as_int(), Some(630));
    assert!(by_need.stats().nodes * 2 < by_name.stats().nodes);
}

#[test]
fn test_lazy_result_is_left_unforced_by_eval_lazy() {
    let arena = Bump::new();
    let program = Interpreter::new(&arena, "cons(1 + 1, cons(2, empty))").unwrap();
    let mut evaluator = program.evaluator(Strategy::VALUE_NEED);

    let value = evaluator.eval_lazy(program.expr()).unwrap();
    assert_eq!(value.to_string(), "(... ...)");
    assert_eq!(evaluator.stats().forces, 0);
}
