#![allow(dead_code)]

use bumpalo::Bump;
use jam::{Error, EvaluatorOptions, Interpreter, ResourceExceededError, RuntimeError, Strategy};

/// Run `source` to a printed value.
pub fn run(source: &'static str, strategy: Strategy) -> Result<String, Error> {
    run_with_options(source, strategy, EvaluatorOptions::default())
}

pub fn run_with_options(
    source: &'static str,
    strategy: Strategy,
    options: EvaluatorOptions,
) -> Result<String, Error> {
    let arena = Bump::new();
    let program = Interpreter::new(&arena, source)?.with_options(options);
    program.eval_with(strategy).map(|value| value.to_string())
}

pub fn check(source: &'static str, strategy: Strategy, expected: Result<&str, Error>) {
    let actual = run(source, strategy);
    pretty_assertions::assert_eq!(
        actual.as_deref().map_err(Clone::clone),
        expected,
        "strategy {} on {:?}",
        strategy,
        source
    );
}

/// The default depth limit being hit, which is how divergence shows up.
pub fn diverges() -> Error {
    Error::ResourceExceeded(ResourceExceededError::StackOverflow {
        depth: 10_000,
        max_depth: 10_000,
    })
}

pub fn type_error(operation: &str, expected: &'static str, found: &'static str) -> Error {
    Error::Runtime(RuntimeError::TypeError {
        operation: operation.to_string(),
        expected,
        found,
    })
}

pub fn arity_error(function: &str, expected: usize, found: usize) -> Error {
    Error::Runtime(RuntimeError::ArityError {
        function: function.to_string(),
        expected,
        found,
    })
}

pub fn forward_reference(name: &str) -> Error {
    Error::Runtime(RuntimeError::IllegalForwardReference {
        name: name.to_string(),
    })
}

pub fn cycle(name: &str) -> Error {
    Error::Runtime(RuntimeError::EvaluationCycle {
        name: name.to_string(),
    })
}

/// A program checked under every strategy.
///
/// `all:` expects the same outcome everywhere; otherwise list the outcome per
/// strategy constant.
macro_rules! test_case {
    ($name:ident, input: $input:expr, all: $expected:expr $(,)?) => {
        #[test]
        fn $name() {
            for strategy in jam::Strategy::ALL {
                cases::check($input, strategy, $expected);
            }
        }
    };
    ($name:ident, input: $input:expr, $($strategy:ident: $expected:expr),+ $(,)?) => {
        #[test]
        fn $name() {
            $( cases::check($input, jam::Strategy::$strategy, $expected); )+
        }
    };
}
