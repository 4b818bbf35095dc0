use std::fmt::{self, Write};

use crate::interpreter::semantic::scope::{ScopeId, SymbolId};

/// Identifies a declaration node.
///
/// The parser hands out one id per `let` and `function` declaration, in
/// source order. Symbols refer back to their declaration through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub usize);

/// A reference from a use site to the symbol it names.
///
/// Starts unresolved and is written at most once, by the resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binding(Option<SymbolId>);

impl Binding {
    /// An empty binding, as produced by the parser.
    #[must_use]
    pub const fn unresolved() -> Self {
        Self(None)
    }

    /// Records the symbol this reference resolves to.
    ///
    /// Resolving the same reference twice is a logic error in the caller.
    pub fn bind(&mut self, symbol: SymbolId) {
        debug_assert!(self.0.is_none(), "reference resolved twice");
        self.0 = Some(symbol);
    }

    /// The bound symbol, if resolution found one.
    #[must_use]
    pub const fn symbol(self) -> Option<SymbolId> {
        self.0
    }

    /// Reports whether resolution bound this reference.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        self.0.is_some()
    }
}

/// A constant written directly in source.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// An integer literal such as `42`.
    Integer(i64),
    /// A decimal literal such as `1.5` or `.5`.
    Decimal(f64),
    /// A string literal, without its quotes.
    String(String),
    /// `true` or `false`.
    Bool(bool),
    /// `null`
    Null,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(r) => write!(f, "{r}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// Binary operators the parser understands, with their binding strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    ModAssign,
    /// `&=`
    BitAndAssign,
    /// `|=`
    BitOrAssign,
    /// `^=`
    BitXorAssign,
    /// `<<=`
    ShlAssign,
    /// `>>=`
    ShrAssign,
    /// `>>>=`
    UShrAssign,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `==`
    Equal,
    /// `===`
    StrictEqual,
    /// `!=`
    NotEqual,
    /// `!==`
    StrictNotEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    UShr,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
}

impl BinaryOperator {
    /// Maps operator text to an operator, or `None` if `text` is not a binary
    /// operator.
    ///
    /// # Example
    /// ```
    /// use playscript::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_symbol(">>>="), Some(BinaryOperator::UShrAssign));
    /// assert_eq!(BinaryOperator::from_symbol("++"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(text: &str) -> Option<Self> {
        let op = match text {
            "=" => Self::Assign,
            "+=" => Self::AddAssign,
            "-=" => Self::SubAssign,
            "*=" => Self::MulAssign,
            "/=" => Self::DivAssign,
            "%=" => Self::ModAssign,
            "&=" => Self::BitAndAssign,
            "|=" => Self::BitOrAssign,
            "^=" => Self::BitXorAssign,
            "<<=" => Self::ShlAssign,
            ">>=" => Self::ShrAssign,
            ">>>=" => Self::UShrAssign,
            "||" => Self::Or,
            "&&" => Self::And,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "&" => Self::BitAnd,
            "==" => Self::Equal,
            "===" => Self::StrictEqual,
            "!=" => Self::NotEqual,
            "!==" => Self::StrictNotEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            "<" => Self::Less,
            "<=" => Self::LessEqual,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            ">>>" => Self::UShr,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            _ => return None,
        };
        Some(op)
    }

    /// The source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::BitAndAssign => "&=",
            Self::BitOrAssign => "|=",
            Self::BitXorAssign => "^=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::UShrAssign => ">>>=",
            Self::Or => "||",
            Self::And => "&&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Equal => "==",
            Self::StrictEqual => "===",
            Self::NotEqual => "!=",
            Self::StrictNotEqual => "!==",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }

    /// Binding strength used by precedence climbing. Higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> i32 {
        match self {
            Self::Assign
            | Self::AddAssign
            | Self::SubAssign
            | Self::MulAssign
            | Self::DivAssign
            | Self::ModAssign
            | Self::BitAndAssign
            | Self::BitOrAssign
            | Self::BitXorAssign
            | Self::ShlAssign
            | Self::ShrAssign
            | Self::UShrAssign => 2,
            Self::Or => 4,
            Self::And => 5,
            Self::BitOr => 6,
            Self::BitXor => 7,
            Self::BitAnd => 8,
            Self::Equal | Self::StrictEqual | Self::NotEqual | Self::StrictNotEqual => 9,
            Self::Greater | Self::GreaterEqual | Self::Less | Self::LessEqual => 10,
            Self::Shl | Self::Shr | Self::UShr => 11,
            Self::Add | Self::Sub => 12,
            Self::Mul | Self::Div | Self::Mod => 13,
        }
    }

    /// Reports whether the operator stores into its left operand.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        self.precedence() == 2
    }

    /// For a compound assignment, the operator applied before storing, such
    /// as `+` for `+=`. `None` for plain `=` and for non-assignments.
    #[must_use]
    pub const fn compound_base(self) -> Option<Self> {
        match self {
            Self::AddAssign => Some(Self::Add),
            Self::SubAssign => Some(Self::Sub),
            Self::MulAssign => Some(Self::Mul),
            Self::DivAssign => Some(Self::Div),
            Self::ModAssign => Some(Self::Mod),
            Self::BitAndAssign => Some(Self::BitAnd),
            Self::BitOrAssign => Some(Self::BitOr),
            Self::BitXorAssign => Some(Self::BitXor),
            Self::ShlAssign => Some(Self::Shl),
            Self::ShrAssign => Some(Self::Shr),
            Self::UShrAssign => Some(Self::UShr),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A reference to a variable by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Name of the variable.
    pub name:        String,
    /// Symbol of the `let` declaration this name resolves to.
    pub declaration: Binding,
    /// Line number in the source code.
    pub line:        usize,
}

/// A call such as `println(x, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Name of the function being called.
    pub name:       String,
    /// Arguments in source order.
    pub arguments:  Vec<Expr>,
    /// Symbol of the function declaration this call resolves to.
    pub definition: Binding,
    /// Line number in the source code.
    pub line:       usize,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean or null).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable(Variable),
    /// A function call.
    FunctionCall(FunctionCall),
    /// A binary operation, assignments included.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Line of the operator.
        line:  usize,
    },
}

impl Expr {
    /// Line of the expression, for diagnostics.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Literal { line, .. } | Self::Binary { line, .. } => *line,
            Self::Variable(variable) => variable.line,
            Self::FunctionCall(call) => call.line,
        }
    }
}

/// `let name (: type)? (= initializer)? ;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    /// Declaration id handed out by the parser.
    pub id:          DeclId,
    /// Name of the variable.
    pub name:        String,
    /// Declared type name. Stored but never checked; `any` when omitted.
    pub type_name:   String,
    /// Optional initial value.
    pub initializer: Option<Expr>,
    /// Scope the variable was entered into by the declaration pass.
    pub scope:       Option<ScopeId>,
    /// Line number in the source code.
    pub line:        usize,
}

/// `function name() { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Declaration id handed out by the parser.
    pub id:    DeclId,
    /// Name of the function.
    pub name:  String,
    /// The function body.
    pub body:  Block,
    /// The scope the function body runs in, created by the declaration pass.
    pub scope: Option<ScopeId>,
    /// Line number in the source code.
    pub line:  usize,
}

/// A braced statement list.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements in source order.
    pub statements: Vec<Statement>,
    /// Line of the opening brace.
    pub line:       usize,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A variable declaration.
    VariableDecl(VariableDecl),
    /// A function declaration.
    FunctionDecl(FunctionDecl),
    /// An expression followed by `;`.
    Expression {
        /// The expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}

/// The root of a parsed compilation unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
    /// The root scope, created by the declaration pass.
    pub scope:      Option<ScopeId>,
}

impl Program {
    /// Renders the tree as indented text, one node per line.
    ///
    /// Variables and calls show whether resolution has bound them, so dumping
    /// before and after the semantic passes shows what changed.
    ///
    /// # Example
    /// ```
    /// let (program, _) = playscript::parse("let x = 1 + 2;");
    /// assert_eq!(program.dump(),
    ///            "Prog\n\tVariableDecl x, type: any\n\t\tBinary:+\n\t\t\t1\n\t\t\t2\n");
    /// ```
    #[must_use]
    pub fn dump(&self) -> String {
        self.to_string()
    }

    /// Collects every function declaration in the tree, nested ones included,
    /// in source order.
    #[must_use]
    pub fn functions(&self) -> Vec<&FunctionDecl> {
        fn collect<'a>(statements: &'a [Statement], out: &mut Vec<&'a FunctionDecl>) {
            for statement in statements {
                if let Statement::FunctionDecl(function) = statement {
                    out.push(function);
                    collect(&function.body.statements, out);
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.statements, &mut out);
        out
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prog")?;
        for statement in &self.statements {
            dump_statement(f, statement, 1)?;
        }
        Ok(())
    }
}

fn indent(out: &mut impl Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_char('\t')?;
    }
    Ok(())
}

fn dump_statement(out: &mut impl Write, statement: &Statement, depth: usize) -> fmt::Result {
    match statement {
        Statement::VariableDecl(decl) => {
            indent(out, depth)?;
            writeln!(out, "VariableDecl {}, type: {}", decl.name, decl.type_name)?;
            match &decl.initializer {
                Some(init) => dump_expr(out, init, depth + 1),
                None => {
                    indent(out, depth + 1)?;
                    writeln!(out, "no initialization")
                },
            }
        },
        Statement::FunctionDecl(function) => {
            indent(out, depth)?;
            writeln!(out, "FunctionDecl {}", function.name)?;
            dump_block(out, &function.body, depth + 1)
        },
        Statement::Expression { expr, .. } => {
            indent(out, depth)?;
            writeln!(out, "ExpressionStatement")?;
            dump_expr(out, expr, depth + 1)
        },
    }
}

fn dump_block(out: &mut impl Write, block: &Block, depth: usize) -> fmt::Result {
    indent(out, depth)?;
    writeln!(out, "Block")?;
    for statement in &block.statements {
        dump_statement(out, statement, depth + 1)?;
    }
    Ok(())
}

fn resolution(binding: Binding) -> &'static str {
    if binding.is_resolved() { "resolved" } else { "not resolved" }
}

fn dump_expr(out: &mut impl Write, expr: &Expr, depth: usize) -> fmt::Result {
    indent(out, depth)?;
    match expr {
        Expr::Literal { value, .. } => writeln!(out, "{value}"),
        Expr::Variable(variable) => {
            writeln!(out, "Variable: {}, {}", variable.name, resolution(variable.declaration))
        },
        Expr::FunctionCall(call) => {
            writeln!(out, "FunctionCall {}, {}", call.name, resolution(call.definition))?;
            for argument in &call.arguments {
                dump_expr(out, argument, depth + 1)?;
            }
            Ok(())
        },
        Expr::Binary { op, left, right, .. } => {
            writeln!(out, "Binary:{op}")?;
            dump_expr(out, left, depth + 1)?;
            dump_expr(out, right, depth + 1)
        },
    }
}
