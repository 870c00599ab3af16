mod parsed_expr;
pub mod parser;
mod syntax;
pub mod error;

// Re-export the parser and rule enum for external use
pub use parser::ExpressionParser;
pub use parser::Rule;
pub use parser::{DEFAULT_MAX_DEPTH, parse, parse_with_max_depth};

pub use parsed_expr::{Expr, Literal, ParsedExpr};
pub use syntax::AnnotatedSource;
pub use syntax::{BinaryOp, BoolOp, ComparisonOp, PrimFun, Span, UnaryOp};
pub use error::{ParseError, ParseErrorKind};
