// These are common syntax structures used in ParsedExpr and the resolved AST.

use core::{cell::RefCell, fmt, ops::Range};

use hashbrown::HashMap;

#[derive(Debug)]
pub struct AnnotatedSource<'a, T> {
    pub source: &'a str,
    spans: RefCell<HashMap<*const T, Span>>,
}

impl<'a, T> AnnotatedSource<'a, T> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            spans: RefCell::new(HashMap::new()),
        }
    }
    pub fn add_span(&self, expr: &T, span: Span) {
        let p = expr as *const _;
        self.spans.borrow_mut().insert(p, span);
    }
    pub fn span_of(&self, expr: &T) -> Option<Span> {
        let p = expr as *const _;
        self.spans.borrow().get(&p).cloned()
    }
    pub fn snippet(&self, span: Span) -> &str {
        &self.source[span.0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
    pub fn combine(a: &Span, b: &Span) -> Span {
        Span::new(a.0.start, b.0.end)
    }
    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        &source[self.0.start..self.0.end]
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(s: pest::Span<'_>) -> Self {
        Self(s.start()..s.end())
    }
}

/// Integer arithmetic operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// Short-circuiting logical operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BoolOp::And => "&",
            BoolOp::Or => "|",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl ComparisonOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Neq => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
            ComparisonOp::Le => "<=",
            ComparisonOp::Ge => ">=",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "~",
        }
    }
}

/// The fixed set of primitive functions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrimFun {
    FunctionP,
    NumberP,
    ListP,
    ConsP,
    EmptyP,
    Cons,
    Arity,
    First,
    Rest,
}

impl PrimFun {
    pub const ALL: [PrimFun; 9] = [
        PrimFun::FunctionP,
        PrimFun::NumberP,
        PrimFun::ListP,
        PrimFun::ConsP,
        PrimFun::EmptyP,
        PrimFun::Cons,
        PrimFun::Arity,
        PrimFun::First,
        PrimFun::Rest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimFun::FunctionP => "function?",
            PrimFun::NumberP => "number?",
            PrimFun::ListP => "list?",
            PrimFun::ConsP => "cons?",
            PrimFun::EmptyP => "empty?",
            PrimFun::Cons => "cons",
            PrimFun::Arity => "arity",
            PrimFun::First => "first",
            PrimFun::Rest => "rest",
        }
    }

    pub fn from_name(name: &str) -> Option<PrimFun> {
        PrimFun::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Number of arguments the primitive accepts (2 for `cons`, 1 otherwise).
    pub fn arity(self) -> usize {
        match self {
            PrimFun::Cons => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for PrimFun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
