//! Abstract Syntax Tree node definitions
//!
//! Node kinds and field names follow ESTree; variant names are the ESTree
//! `type` strings. Every node carries a [`Span`]. Shapes that occur in
//! more than one position (functions, classes, member expressions,
//! identifiers, literals) are standalone structs.

use core_types::Span;
use num_bigint::BigInt;

/// Root of a parsed source text
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Source range (the whole input)
    pub span: Span,
    /// Top-level statements and module declarations
    pub body: Vec<Statement>,
    /// Goal symbol the source was parsed with
    pub source_type: SourceType,
}

/// Script or module goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Classic script
    Script,
    /// ECMAScript module
    Module,
}

impl SourceType {
    /// ESTree spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Script => "script",
            SourceType::Module => "module",
        }
    }
}

/// Identifier reference, binding or property name
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// Source range
    pub span: Span,
    /// Name with escapes decoded
    pub name: String,
}

/// `#name` in a class body or member access
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateIdentifier {
    /// Source range
    pub span: Span,
    /// Name without the `#`
    pub name: String,
}

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// null
    Null,
    /// true / false
    Boolean(bool),
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
    /// BigInt literal
    BigInt(BigInt),
    /// Regular expression literal
    RegExp {
        /// Body between the slashes
        pattern: String,
        /// Flags
        flags: String,
    },
}

/// Literal expression
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Source range
    pub span: Span,
    /// Decoded value
    pub value: LiteralValue,
    /// Source text of the literal
    pub raw: String,
}

impl Literal {
    /// The string value, for string literals
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            LiteralValue::String(value) => Some(value),
            _ => None,
        }
    }
}

/// JavaScript statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Expression statement; `directive` is set for directive prologue entries
    ExpressionStatement {
        /// Source range
        span: Span,
        /// The expression
        expression: Expression,
        /// Raw directive text without quotes
        directive: Option<String>,
    },
    /// `{ ... }`
    BlockStatement(BlockStatement),
    /// `;`
    EmptyStatement {
        /// Source range
        span: Span,
    },
    /// `debugger;`
    DebuggerStatement {
        /// Source range
        span: Span,
    },
    /// `with (object) body`
    WithStatement {
        /// Source range
        span: Span,
        /// Scope object
        object: Expression,
        /// Body
        body: Box<Statement>,
    },
    /// `return argument;`
    ReturnStatement {
        /// Source range
        span: Span,
        /// Return value
        argument: Option<Expression>,
    },
    /// `label: body`
    LabeledStatement {
        /// Source range
        span: Span,
        /// Label
        label: Identifier,
        /// Labelled statement
        body: Box<Statement>,
    },
    /// `break label;`
    BreakStatement {
        /// Source range
        span: Span,
        /// Target label
        label: Option<Identifier>,
    },
    /// `continue label;`
    ContinueStatement {
        /// Source range
        span: Span,
        /// Target label
        label: Option<Identifier>,
    },
    /// If statement
    IfStatement {
        /// Source range
        span: Span,
        /// Condition
        test: Expression,
        /// Consequent block
        consequent: Box<Statement>,
        /// Alternate block
        alternate: Option<Box<Statement>>,
    },
    /// Switch statement
    SwitchStatement {
        /// Source range
        span: Span,
        /// Value being switched on
        discriminant: Expression,
        /// Cases in source order
        cases: Vec<SwitchCase>,
    },
    /// `throw argument;`
    ThrowStatement {
        /// Source range
        span: Span,
        /// Thrown value
        argument: Expression,
    },
    /// Try statement
    TryStatement {
        /// Source range
        span: Span,
        /// Protected block
        block: BlockStatement,
        /// Catch clause
        handler: Option<CatchClause>,
        /// Finally block
        finalizer: Option<BlockStatement>,
    },
    /// While loop
    WhileStatement {
        /// Source range
        span: Span,
        /// Condition
        test: Expression,
        /// Body
        body: Box<Statement>,
    },
    /// Do-while loop
    DoWhileStatement {
        /// Source range
        span: Span,
        /// Body
        body: Box<Statement>,
        /// Condition
        test: Expression,
    },
    /// C-style for loop
    ForStatement {
        /// Source range
        span: Span,
        /// Initializer
        init: Option<ForInit>,
        /// Condition
        test: Option<Expression>,
        /// Update
        update: Option<Expression>,
        /// Body
        body: Box<Statement>,
    },
    /// For-in loop
    ForInStatement {
        /// Source range
        span: Span,
        /// Binding or assignment target
        left: ForInOfLeft,
        /// Object being enumerated
        right: Expression,
        /// Body
        body: Box<Statement>,
    },
    /// For-of loop (`for await` when `is_await`)
    ForOfStatement {
        /// Source range
        span: Span,
        /// Binding or assignment target
        left: ForInOfLeft,
        /// Iterable
        right: Expression,
        /// Body
        body: Box<Statement>,
        /// `for await`
        is_await: bool,
    },
    /// Function declaration
    FunctionDeclaration(Box<Function>),
    /// Variable declaration (let, const, var)
    VariableDeclaration(VariableDeclaration),
    /// Class declaration
    ClassDeclaration(Box<Class>),
    /// `import ... from "m"`
    ImportDeclaration(ImportDeclaration),
    /// `export { ... }`, `export <declaration>`
    ExportNamedDeclaration(ExportNamedDeclaration),
    /// `export default ...`
    ExportDefaultDeclaration {
        /// Source range
        span: Span,
        /// Exported declaration or expression
        declaration: ExportDefaultKind,
    },
    /// `export * from "m"`, `export * as ns from "m"`
    ExportAllDeclaration {
        /// Source range
        span: Span,
        /// Namespace export name
        exported: Option<ModuleExportName>,
        /// Module specifier
        source: Literal,
        /// Import attributes
        attributes: Vec<ImportAttribute>,
    },
}

/// `{ ... }`, also used for function bodies
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// Source range
    pub span: Span,
    /// Statements
    pub body: Vec<Statement>,
}

/// `case test:` or `default:` clause
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Source range
    pub span: Span,
    /// Case value; None for default
    pub test: Option<Expression>,
    /// Statements
    pub consequent: Vec<Statement>,
}

/// Catch clause
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// Source range
    pub span: Span,
    /// Parameter; None for `catch {`
    pub param: Option<Pattern>,
    /// Body
    pub body: BlockStatement,
}

/// For loop initialization
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// Variable declaration
    VariableDeclaration(VariableDeclaration),
    /// Expression
    Expression(Expression),
}

/// Left side of for-in/for-of loop
#[derive(Debug, Clone, PartialEq)]
pub enum ForInOfLeft {
    /// Variable declaration (let x, const x, var x)
    VariableDeclaration(VariableDeclaration),
    /// Assignment target
    Pattern(Pattern),
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// var
    Var,
    /// let
    Let,
    /// const
    Const,
}

impl VariableKind {
    /// Source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// `var`/`let`/`const` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Source range
    pub span: Span,
    /// Declaration kind
    pub kind: VariableKind,
    /// Declarators
    pub declarations: Vec<VariableDeclarator>,
}

/// Variable declarator
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    /// Source range
    pub span: Span,
    /// Binding pattern
    pub id: Pattern,
    /// Initializer
    pub init: Option<Expression>,
}

/// Function declaration, expression, or method value
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Source range
    pub span: Span,
    /// Name
    pub id: Option<Identifier>,
    /// Formal parameters
    pub params: Vec<Pattern>,
    /// Body
    pub body: BlockStatement,
    /// `async function`
    pub is_async: bool,
    /// `function*`
    pub generator: bool,
}

/// Arrow function
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    /// Source range
    pub span: Span,
    /// Formal parameters
    pub params: Vec<Pattern>,
    /// Body
    pub body: ArrowFunctionBody,
    /// `async` arrow
    pub is_async: bool,
}

/// Arrow function body
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowFunctionBody {
    /// Expression body
    Expression(Box<Expression>),
    /// Block body
    Block(BlockStatement),
}

/// Class declaration or expression
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// Source range
    pub span: Span,
    /// Name
    pub id: Option<Identifier>,
    /// `extends` clause
    pub super_class: Option<Expression>,
    /// Body
    pub body: ClassBody,
    /// Decorators (staged syntax)
    pub decorators: Vec<Decorator>,
}

/// `{ ... }` of a class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBody {
    /// Source range
    pub span: Span,
    /// Members
    pub body: Vec<ClassElement>,
}

/// Class element
#[derive(Debug, Clone, PartialEq)]
pub enum ClassElement {
    /// Method, getter, setter or constructor
    MethodDefinition {
        /// Source range
        span: Span,
        /// Method name
        key: PropertyKey,
        /// Function value
        value: Box<Function>,
        /// Method kind
        kind: MethodKind,
        /// Is static
        is_static: bool,
        /// Decorators
        decorators: Vec<Decorator>,
    },
    /// Field
    PropertyDefinition {
        /// Source range
        span: Span,
        /// Property key
        key: PropertyKey,
        /// Initial value
        value: Option<Expression>,
        /// Is static
        is_static: bool,
        /// Decorators
        decorators: Vec<Decorator>,
    },
    /// `accessor` field (staged syntax)
    AccessorProperty {
        /// Source range
        span: Span,
        /// Property key
        key: PropertyKey,
        /// Initial value
        value: Option<Expression>,
        /// Is static
        is_static: bool,
        /// Decorators
        decorators: Vec<Decorator>,
    },
    /// `static { ... }`
    StaticBlock {
        /// Source range
        span: Span,
        /// Statements
        body: Vec<Statement>,
    },
}

/// Method kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Regular method
    Method,
    /// Getter
    Get,
    /// Setter
    Set,
    /// Constructor
    Constructor,
}

impl MethodKind {
    /// ESTree spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Method => "method",
            MethodKind::Get => "get",
            MethodKind::Set => "set",
            MethodKind::Constructor => "constructor",
        }
    }
}

/// `@expression` (staged syntax)
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    /// Source range
    pub span: Span,
    /// Decorator expression
    pub expression: Expression,
}

/// Property key of an object member, class member or pattern property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    /// Identifier name key (any IdentifierName, including reserved words)
    Identifier(Identifier),
    /// String or numeric literal key
    Literal(Literal),
    /// `#name` key of a class member
    PrivateIdentifier(PrivateIdentifier),
    /// `[expression]` key
    Computed(Expression),
}

impl PropertyKey {
    /// Source range of the key itself
    pub fn span(&self) -> Span {
        match self {
            PropertyKey::Identifier(id) => id.span,
            PropertyKey::Literal(lit) => lit.span,
            PropertyKey::PrivateIdentifier(id) => id.span,
            PropertyKey::Computed(expr) => expr.span(),
        }
    }

    /// Whether the key is `[expression]`
    pub fn is_computed(&self) -> bool {
        matches!(self, PropertyKey::Computed(_))
    }

    /// Static name of a non-computed identifier or string key
    pub fn static_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Identifier(id) => Some(&id.name),
            PropertyKey::Literal(lit) => lit.as_str(),
            _ => None,
        }
    }
}

/// Object literal property kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// `key: value`, shorthand and methods
    Init,
    /// `get key() {}`
    Get,
    /// `set key(v) {}`
    Set,
}

impl PropertyKind {
    /// ESTree spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Init => "init",
            PropertyKind::Get => "get",
            PropertyKind::Set => "set",
        }
    }
}

/// Object literal member
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectProperty {
    /// Property with key and value
    Property(Property),
    /// `...argument`
    SpreadElement(SpreadElement),
}

/// Object literal property
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Source range
    pub span: Span,
    /// Key
    pub key: PropertyKey,
    /// Value (a function expression for methods and accessors)
    pub value: Expression,
    /// init / get / set
    pub kind: PropertyKind,
    /// `key() {}`
    pub method: bool,
    /// `{ key }`
    pub shorthand: bool,
}

/// `...argument` in arrays, objects and arguments
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadElement {
    /// Source range
    pub span: Span,
    /// Spread expression
    pub argument: Expression,
}

/// Array element or call argument (for spread support)
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElement {
    /// Normal element
    Expression(Expression),
    /// Spread element
    Spread(SpreadElement),
}

impl ArrayElement {
    /// Source range
    pub fn span(&self) -> Span {
        match self {
            ArrayElement::Expression(expr) => expr.span(),
            ArrayElement::Spread(spread) => spread.span,
        }
    }
}

/// Template literal
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    /// Source range
    pub span: Span,
    /// Text parts; always one more than `expressions`
    pub quasis: Vec<TemplateElement>,
    /// Substitutions
    pub expressions: Vec<Expression>,
}

/// Template literal element
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    /// Source range of the text (without delimiters)
    pub span: Span,
    /// Raw string value
    pub raw: String,
    /// Cooked string value; None for invalid escapes in tagged templates
    pub cooked: Option<String>,
    /// Is tail element
    pub tail: bool,
}

/// `object.property`, `object[property]`, `object?.property`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    /// Source range
    pub span: Span,
    /// Object
    pub object: Box<Expression>,
    /// Property
    pub property: MemberProperty,
    /// `?.` access
    pub optional: bool,
}

/// Property part of a member expression
#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// `.name`
    Identifier(Identifier),
    /// `.#name`
    PrivateIdentifier(PrivateIdentifier),
    /// `[expression]`
    Computed(Box<Expression>),
}

/// JavaScript expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Identifier reference
    Identifier(Identifier),
    /// `#x` on the left of `in`
    PrivateIdentifier(PrivateIdentifier),
    /// Literal value
    Literal(Literal),
    /// this
    ThisExpression {
        /// Source range
        span: Span,
    },
    /// `super` as the object of a member access or callee of a call
    Super {
        /// Source range
        span: Span,
    },
    /// Array literal; `None` elements are holes
    ArrayExpression {
        /// Source range
        span: Span,
        /// Elements
        elements: Vec<Option<ArrayElement>>,
    },
    /// Object literal
    ObjectExpression {
        /// Source range
        span: Span,
        /// Members
        properties: Vec<ObjectProperty>,
    },
    /// Function expression
    FunctionExpression(Box<Function>),
    /// Arrow function
    ArrowFunctionExpression(Box<ArrowFunction>),
    /// Class expression
    ClassExpression(Box<Class>),
    /// Untagged template literal
    TemplateLiteral(TemplateLiteral),
    /// tag`...`
    TaggedTemplateExpression {
        /// Source range
        span: Span,
        /// Tag function
        tag: Box<Expression>,
        /// Template
        quasi: TemplateLiteral,
    },
    /// Prefix unary operation
    UnaryExpression {
        /// Source range
        span: Span,
        /// Operator
        operator: UnaryOperator,
        /// Operand
        argument: Box<Expression>,
    },
    /// `++`/`--`
    UpdateExpression {
        /// Source range
        span: Span,
        /// Operator
        operator: UpdateOperator,
        /// Prefix form
        prefix: bool,
        /// Operand
        argument: Box<Expression>,
    },
    /// Binary operation
    BinaryExpression {
        /// Source range
        span: Span,
        /// Operator
        operator: BinaryOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },
    /// `&&`, `||`, `??`
    LogicalExpression {
        /// Source range
        span: Span,
        /// Operator
        operator: LogicalOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },
    /// Assignment
    AssignmentExpression {
        /// Source range
        span: Span,
        /// Operator
        operator: AssignmentOperator,
        /// Target
        left: Box<Pattern>,
        /// Value
        right: Box<Expression>,
    },
    /// `test ? consequent : alternate`
    ConditionalExpression {
        /// Source range
        span: Span,
        /// Condition
        test: Box<Expression>,
        /// Value when true
        consequent: Box<Expression>,
        /// Value when false
        alternate: Box<Expression>,
    },
    /// Call
    CallExpression {
        /// Source range
        span: Span,
        /// Callee
        callee: Box<Expression>,
        /// Arguments
        arguments: Vec<ArrayElement>,
        /// `f?.()`
        optional: bool,
    },
    /// `new callee(arguments)`
    NewExpression {
        /// Source range
        span: Span,
        /// Constructor
        callee: Box<Expression>,
        /// Arguments
        arguments: Vec<ArrayElement>,
    },
    /// Member access
    MemberExpression(MemberExpression),
    /// Comma-separated expressions
    SequenceExpression {
        /// Source range
        span: Span,
        /// Expressions
        expressions: Vec<Expression>,
    },
    /// `yield`, `yield*`
    YieldExpression {
        /// Source range
        span: Span,
        /// Yielded value
        argument: Option<Box<Expression>>,
        /// `yield*`
        delegate: bool,
    },
    /// `await argument`
    AwaitExpression {
        /// Source range
        span: Span,
        /// Awaited value
        argument: Box<Expression>,
    },
    /// Optional chain wrapper around a member or call expression
    ChainExpression {
        /// Source range
        span: Span,
        /// Chain
        expression: Box<Expression>,
    },
    /// `import(source, options)`
    ImportExpression {
        /// Source range
        span: Span,
        /// Module specifier
        source: Box<Expression>,
        /// Options argument
        options: Option<Box<Expression>>,
    },
    /// `new.target`, `import.meta`
    MetaProperty {
        /// Source range
        span: Span,
        /// `new` / `import`
        meta: Identifier,
        /// `target` / `meta`
        property: Identifier,
    },
    /// `(expression)`; omitted from ESTree output
    ParenthesizedExpression {
        /// Source range including the parentheses
        span: Span,
        /// Inner expression
        expression: Box<Expression>,
    },
}

/// Binding and assignment targets
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Simple identifier
    Identifier(Identifier),
    /// `{ a, b: c, ...rest }`
    ObjectPattern {
        /// Source range
        span: Span,
        /// Properties
        properties: Vec<ObjectPatternProperty>,
    },
    /// `[a, , b, ...rest]`
    ArrayPattern {
        /// Source range
        span: Span,
        /// Elements; `None` for holes
        elements: Vec<Option<Pattern>>,
    },
    /// `...argument`
    RestElement {
        /// Source range
        span: Span,
        /// Target
        argument: Box<Pattern>,
    },
    /// `left = right` default
    AssignmentPattern {
        /// Source range
        span: Span,
        /// Target
        left: Box<Pattern>,
        /// Default value
        right: Box<Expression>,
    },
    /// Member expression target (assignment patterns only)
    MemberExpression(MemberExpression),
}

/// Member of an object pattern
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProperty {
    /// `key: value` or shorthand
    Property {
        /// Source range
        span: Span,
        /// Key
        key: PropertyKey,
        /// Target
        value: Pattern,
        /// `{ a }` / `{ a = 1 }`
        shorthand: bool,
    },
    /// `...rest`
    RestElement {
        /// Source range
        span: Span,
        /// Target
        argument: Box<Pattern>,
    },
}

/// `import` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    /// Source range
    pub span: Span,
    /// Imported bindings
    pub specifiers: Vec<ImportSpecifier>,
    /// Module specifier
    pub source: Literal,
    /// `with { ... }` attributes
    pub attributes: Vec<ImportAttribute>,
}

/// One imported binding
#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `{ imported as local }`
    ImportSpecifier {
        /// Source range
        span: Span,
        /// Exported name in the source module
        imported: ModuleExportName,
        /// Local binding
        local: Identifier,
    },
    /// `import local from`
    ImportDefaultSpecifier {
        /// Source range
        span: Span,
        /// Local binding
        local: Identifier,
    },
    /// `import * as local from`
    ImportNamespaceSpecifier {
        /// Source range
        span: Span,
        /// Local binding
        local: Identifier,
    },
}

/// Identifier or string naming a module export
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleExportName {
    /// Identifier name
    Identifier(Identifier),
    /// String literal
    Literal(Literal),
}

impl ModuleExportName {
    /// The export name as a string
    pub fn name(&self) -> &str {
        match self {
            ModuleExportName::Identifier(id) => &id.name,
            ModuleExportName::Literal(lit) => lit.as_str().unwrap_or_default(),
        }
    }

    /// Source range
    pub fn span(&self) -> Span {
        match self {
            ModuleExportName::Identifier(id) => id.span,
            ModuleExportName::Literal(lit) => lit.span,
        }
    }
}

/// `key: "value"` in an import attributes clause
#[derive(Debug, Clone, PartialEq)]
pub struct ImportAttribute {
    /// Source range
    pub span: Span,
    /// Attribute key
    pub key: ModuleExportName,
    /// Attribute value
    pub value: Literal,
}

/// `export` with a declaration or a specifier list
#[derive(Debug, Clone, PartialEq)]
pub struct ExportNamedDeclaration {
    /// Source range
    pub span: Span,
    /// Exported declaration
    pub declaration: Option<Box<Statement>>,
    /// `{ local as exported }` list
    pub specifiers: Vec<ExportSpecifier>,
    /// Re-export source
    pub source: Option<Literal>,
    /// `with { ... }` attributes
    pub attributes: Vec<ImportAttribute>,
}

/// `local as exported`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    /// Source range
    pub span: Span,
    /// Local binding, or the name in the source module for re-exports
    pub local: ModuleExportName,
    /// Exported name
    pub exported: ModuleExportName,
}

/// Target of `export default`
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDefaultKind {
    /// Function declaration, possibly anonymous
    FunctionDeclaration(Box<Function>),
    /// Class declaration, possibly anonymous
    ClassDeclaration(Box<Class>),
    /// Any assignment expression
    Expression(Expression),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
    /// Modulo
    Mod,
    /// Exponentiation
    Exp,
    /// Equality
    Eq,
    /// Inequality
    NotEq,
    /// Strict equality
    StrictEq,
    /// Strict inequality
    StrictNotEq,
    /// Less than
    Lt,
    /// Less than or equal
    LtEq,
    /// Greater than
    Gt,
    /// Greater than or equal
    GtEq,
    /// Bitwise AND
    BitwiseAnd,
    /// Bitwise OR
    BitwiseOr,
    /// Bitwise XOR
    BitwiseXor,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Unsigned right shift
    UnsignedRightShift,
    /// Instanceof
    Instanceof,
    /// In
    In,
}

impl BinaryOperator {
    /// Source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Exp => "**",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::StrictEq => "===",
            BinaryOperator::StrictNotEq => "!==",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::UnsignedRightShift => ">>>",
            BinaryOperator::Instanceof => "instanceof",
            BinaryOperator::In => "in",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Negate
    Minus,
    /// Plus (type coercion)
    Plus,
    /// Logical NOT
    Not,
    /// Bitwise NOT
    BitwiseNot,
    /// Typeof
    Typeof,
    /// Void
    Void,
    /// Delete
    Delete,
}

impl UnaryOperator {
    /// Source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Not => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

/// Update operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    /// Increment
    Increment,
    /// Decrement
    Decrement,
}

impl UpdateOperator {
    /// Source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    /// Logical AND
    And,
    /// Logical OR
    Or,
    /// Nullish coalescing
    NullishCoalesce,
}

impl LogicalOperator {
    /// Source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
            LogicalOperator::NullishCoalesce => "??",
        }
    }
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    /// Simple assignment (=)
    Assign,
    /// Addition assignment (+=)
    AddAssign,
    /// Subtraction assignment (-=)
    SubAssign,
    /// Multiplication assignment (*=)
    MulAssign,
    /// Division assignment (/=)
    DivAssign,
    /// Modulo assignment (%=)
    ModAssign,
    /// Exponentiation assignment (**=)
    ExpAssign,
    /// Bitwise AND assignment (&=)
    BitAndAssign,
    /// Bitwise OR assignment (|=)
    BitOrAssign,
    /// Bitwise XOR assignment (^=)
    BitXorAssign,
    /// Left shift assignment (<<=)
    LeftShiftAssign,
    /// Right shift assignment (>>=)
    RightShiftAssign,
    /// Unsigned right shift assignment (>>>=)
    UnsignedRightShiftAssign,
    /// Logical AND assignment (&&=)
    LogicalAndAssign,
    /// Logical OR assignment (||=)
    LogicalOrAssign,
    /// Nullish coalescing assignment (??=)
    NullishCoalesceAssign,
}

impl AssignmentOperator {
    /// Source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubAssign => "-=",
            AssignmentOperator::MulAssign => "*=",
            AssignmentOperator::DivAssign => "/=",
            AssignmentOperator::ModAssign => "%=",
            AssignmentOperator::ExpAssign => "**=",
            AssignmentOperator::BitAndAssign => "&=",
            AssignmentOperator::BitOrAssign => "|=",
            AssignmentOperator::BitXorAssign => "^=",
            AssignmentOperator::LeftShiftAssign => "<<=",
            AssignmentOperator::RightShiftAssign => ">>=",
            AssignmentOperator::UnsignedRightShiftAssign => ">>>=",
            AssignmentOperator::LogicalAndAssign => "&&=",
            AssignmentOperator::LogicalOrAssign => "||=",
            AssignmentOperator::NullishCoalesceAssign => "??=",
        }
    }

    /// `&&=`, `||=`, `??=`
    pub fn is_logical(&self) -> bool {
        matches!(
            self,
            AssignmentOperator::LogicalAndAssign
                | AssignmentOperator::LogicalOrAssign
                | AssignmentOperator::NullishCoalesceAssign
        )
    }
}

impl Statement {
    /// Source range
    pub fn span(&self) -> Span {
        match self {
            Statement::ExpressionStatement { span, .. }
            | Statement::EmptyStatement { span }
            | Statement::DebuggerStatement { span }
            | Statement::WithStatement { span, .. }
            | Statement::ReturnStatement { span, .. }
            | Statement::LabeledStatement { span, .. }
            | Statement::BreakStatement { span, .. }
            | Statement::ContinueStatement { span, .. }
            | Statement::IfStatement { span, .. }
            | Statement::SwitchStatement { span, .. }
            | Statement::ThrowStatement { span, .. }
            | Statement::TryStatement { span, .. }
            | Statement::WhileStatement { span, .. }
            | Statement::DoWhileStatement { span, .. }
            | Statement::ForStatement { span, .. }
            | Statement::ForInStatement { span, .. }
            | Statement::ForOfStatement { span, .. }
            | Statement::ExportDefaultDeclaration { span, .. }
            | Statement::ExportAllDeclaration { span, .. } => *span,
            Statement::BlockStatement(block) => block.span,
            Statement::FunctionDeclaration(function) => function.span,
            Statement::VariableDeclaration(declaration) => declaration.span,
            Statement::ClassDeclaration(class) => class.span,
            Statement::ImportDeclaration(import) => import.span,
            Statement::ExportNamedDeclaration(export) => export.span,
        }
    }
}

impl Expression {
    /// Source range
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(id) => id.span,
            Expression::PrivateIdentifier(id) => id.span,
            Expression::Literal(lit) => lit.span,
            Expression::FunctionExpression(function) => function.span,
            Expression::ArrowFunctionExpression(arrow) => arrow.span,
            Expression::ClassExpression(class) => class.span,
            Expression::TemplateLiteral(template) => template.span,
            Expression::MemberExpression(member) => member.span,
            Expression::ThisExpression { span }
            | Expression::Super { span }
            | Expression::ArrayExpression { span, .. }
            | Expression::ObjectExpression { span, .. }
            | Expression::TaggedTemplateExpression { span, .. }
            | Expression::UnaryExpression { span, .. }
            | Expression::UpdateExpression { span, .. }
            | Expression::BinaryExpression { span, .. }
            | Expression::LogicalExpression { span, .. }
            | Expression::AssignmentExpression { span, .. }
            | Expression::ConditionalExpression { span, .. }
            | Expression::CallExpression { span, .. }
            | Expression::NewExpression { span, .. }
            | Expression::SequenceExpression { span, .. }
            | Expression::YieldExpression { span, .. }
            | Expression::AwaitExpression { span, .. }
            | Expression::ChainExpression { span, .. }
            | Expression::ImportExpression { span, .. }
            | Expression::MetaProperty { span, .. }
            | Expression::ParenthesizedExpression { span, .. } => *span,
        }
    }

    /// The expression with any number of enclosing parentheses removed
    pub fn without_parens(&self) -> &Expression {
        let mut expr = self;
        while let Expression::ParenthesizedExpression { expression, .. } = expr {
            expr = expression;
        }
        expr
    }

    /// Whether the expression is wrapped in parentheses
    pub fn is_parenthesized(&self) -> bool {
        matches!(self, Expression::ParenthesizedExpression { .. })
    }
}

impl Pattern {
    /// Source range
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(id) => id.span,
            Pattern::MemberExpression(member) => member.span,
            Pattern::ObjectPattern { span, .. }
            | Pattern::ArrayPattern { span, .. }
            | Pattern::RestElement { span, .. }
            | Pattern::AssignmentPattern { span, .. } => *span,
        }
    }

    /// A plain identifier binding
    pub fn is_identifier(&self) -> bool {
        matches!(self, Pattern::Identifier(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64, start: usize) -> Expression {
        Expression::Literal(Literal {
            span: Span::new(start, start + 1),
            value: LiteralValue::Number(value),
            raw: value.to_string(),
        })
    }

    #[test]
    fn test_variable_declaration() {
        let decl = Statement::VariableDeclaration(VariableDeclaration {
            span: Span::new(0, 11),
            kind: VariableKind::Let,
            declarations: vec![VariableDeclarator {
                span: Span::new(4, 10),
                id: Pattern::Identifier(Identifier {
                    span: Span::new(4, 5),
                    name: "x".to_string(),
                }),
                init: Some(number(42.0, 8)),
            }],
        });
        assert_eq!(decl.span(), Span::new(0, 11));
        assert!(matches!(decl, Statement::VariableDeclaration(_)));
    }

    #[test]
    fn test_binary_expression_span() {
        let expr = Expression::BinaryExpression {
            span: Span::new(0, 5),
            operator: BinaryOperator::Add,
            left: Box::new(number(1.0, 0)),
            right: Box::new(number(2.0, 4)),
        };
        assert_eq!(expr.span(), Span::new(0, 5));
    }

    #[test]
    fn test_without_parens() {
        let inner = number(1.0, 2);
        let expr = Expression::ParenthesizedExpression {
            span: Span::new(0, 5),
            expression: Box::new(Expression::ParenthesizedExpression {
                span: Span::new(1, 4),
                expression: Box::new(inner.clone()),
            }),
        };
        assert!(expr.is_parenthesized());
        assert_eq!(expr.without_parens(), &inner);
    }

    #[test]
    fn test_property_key_helpers() {
        let key = PropertyKey::Literal(Literal {
            span: Span::new(0, 5),
            value: LiteralValue::String("abc".to_string()),
            raw: "\"abc\"".to_string(),
        });
        assert_eq!(key.static_name(), Some("abc"));
        assert!(!key.is_computed());
        assert!(PropertyKey::Computed(number(1.0, 1)).is_computed());
    }

    #[test]
    fn test_operator_spellings() {
        assert_eq!(BinaryOperator::UnsignedRightShift.as_str(), ">>>");
        assert_eq!(AssignmentOperator::NullishCoalesceAssign.as_str(), "??=");
        assert!(AssignmentOperator::LogicalOrAssign.is_logical());
        assert!(!AssignmentOperator::AddAssign.is_logical());
        assert_eq!(UnaryOperator::Typeof.as_str(), "typeof");
        assert_eq!(LogicalOperator::NullishCoalesce.as_str(), "??");
    }
}
