//! ESTree JSON output
//!
//! Converts the tree to the `serde_json::Value` shape ESTree consumers
//! expect. Keys are emitted in a fixed order: `type`, positions, then the
//! node's fields. Parenthesized expressions are transparent.

use crate::ast::*;
use crate::options::ParseOptions;
use core_types::{Position, Span};
use serde_json::{json, Map, Number, Value};

/// Largest integer a JSON consumer can read back from a double exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Program {
    /// Render the program as an ESTree JSON object
    pub fn to_estree_json(&self, options: &ParseOptions) -> Value {
        let serializer = Serializer { options };
        serializer
            .node("Program", &self.span)
            .field("body", serializer.statements(&self.body))
            .field("sourceType", self.source_type.as_str())
            .build()
    }
}

struct Serializer<'o> {
    options: &'o ParseOptions,
}

/// Object under construction; keeps insertion order
struct Node {
    map: Map<String, Value>,
}

impl Node {
    fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.map.insert(key.to_string(), value.into());
        self
    }

    fn build(self) -> Value {
        Value::Object(self.map)
    }
}

fn position(position: &Position) -> Value {
    json!({ "line": position.line, "column": position.column })
}

fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER && !(value == 0.0 && value.is_sign_negative()) {
        return Value::Number(Number::from(value as i64));
    }
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

impl<'o> Serializer<'o> {
    fn node(&self, kind: &str, span: &Span) -> Node {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::from(kind));
        if self.options.ranges {
            map.insert("start".to_string(), Value::from(span.start));
            map.insert("end".to_string(), Value::from(span.end));
        }
        if self.options.loc {
            if let Some(loc) = &span.loc {
                map.insert(
                    "loc".to_string(),
                    json!({ "start": position(&loc.start), "end": position(&loc.end) }),
                );
            }
        }
        Node { map }
    }

    fn optional<T>(&self, value: Option<&T>, convert: impl FnOnce(&T) -> Value) -> Value {
        value.map_or(Value::Null, convert)
    }

    fn decorators(&self, node: Node, decorators: &[Decorator]) -> Node {
        if !self.options.next {
            return node;
        }
        let list = decorators
            .iter()
            .map(|decorator| {
                self.node("Decorator", &decorator.span)
                    .field("expression", self.expression(&decorator.expression))
                    .build()
            })
            .collect::<Vec<_>>();
        node.field("decorators", list)
    }

    // ---- statements ----

    fn statements(&self, body: &[Statement]) -> Value {
        Value::Array(body.iter().map(|statement| self.statement(statement)).collect())
    }

    fn block(&self, block: &BlockStatement) -> Value {
        self.node("BlockStatement", &block.span)
            .field("body", self.statements(&block.body))
            .build()
    }

    fn statement(&self, statement: &Statement) -> Value {
        match statement {
            Statement::ExpressionStatement {
                span,
                expression,
                directive,
            } => {
                let node = self
                    .node("ExpressionStatement", span)
                    .field("expression", self.expression(expression));
                match directive {
                    Some(directive) => node.field("directive", directive.as_str()).build(),
                    None => node.build(),
                }
            }
            Statement::BlockStatement(block) => self.block(block),
            Statement::EmptyStatement { span } => self.node("EmptyStatement", span).build(),
            Statement::DebuggerStatement { span } => self.node("DebuggerStatement", span).build(),
            Statement::WithStatement { span, object, body } => self
                .node("WithStatement", span)
                .field("object", self.expression(object))
                .field("body", self.statement(body))
                .build(),
            Statement::ReturnStatement { span, argument } => self
                .node("ReturnStatement", span)
                .field("argument", self.optional(argument.as_ref(), |e| self.expression(e)))
                .build(),
            Statement::LabeledStatement { span, label, body } => self
                .node("LabeledStatement", span)
                .field("body", self.statement(body))
                .field("label", self.identifier(label))
                .build(),
            Statement::BreakStatement { span, label } => self
                .node("BreakStatement", span)
                .field("label", self.optional(label.as_ref(), |id| self.identifier(id)))
                .build(),
            Statement::ContinueStatement { span, label } => self
                .node("ContinueStatement", span)
                .field("label", self.optional(label.as_ref(), |id| self.identifier(id)))
                .build(),
            Statement::IfStatement {
                span,
                test,
                consequent,
                alternate,
            } => self
                .node("IfStatement", span)
                .field("test", self.expression(test))
                .field("consequent", self.statement(consequent))
                .field("alternate", self.optional(alternate.as_deref(), |s| self.statement(s)))
                .build(),
            Statement::SwitchStatement {
                span,
                discriminant,
                cases,
            } => {
                let cases = cases
                    .iter()
                    .map(|case| {
                        self.node("SwitchCase", &case.span)
                            .field("consequent", self.statements(&case.consequent))
                            .field("test", self.optional(case.test.as_ref(), |e| self.expression(e)))
                            .build()
                    })
                    .collect::<Vec<_>>();
                self.node("SwitchStatement", span)
                    .field("discriminant", self.expression(discriminant))
                    .field("cases", cases)
                    .build()
            }
            Statement::ThrowStatement { span, argument } => self
                .node("ThrowStatement", span)
                .field("argument", self.expression(argument))
                .build(),
            Statement::TryStatement {
                span,
                block,
                handler,
                finalizer,
            } => {
                let handler = self.optional(handler.as_ref(), |clause| {
                    self.node("CatchClause", &clause.span)
                        .field("param", self.optional(clause.param.as_ref(), |p| self.pattern(p)))
                        .field("body", self.block(&clause.body))
                        .build()
                });
                self.node("TryStatement", span)
                    .field("block", self.block(block))
                    .field("handler", handler)
                    .field("finalizer", self.optional(finalizer.as_ref(), |b| self.block(b)))
                    .build()
            }
            Statement::WhileStatement { span, test, body } => self
                .node("WhileStatement", span)
                .field("test", self.expression(test))
                .field("body", self.statement(body))
                .build(),
            Statement::DoWhileStatement { span, body, test } => self
                .node("DoWhileStatement", span)
                .field("body", self.statement(body))
                .field("test", self.expression(test))
                .build(),
            Statement::ForStatement {
                span,
                init,
                test,
                update,
                body,
            } => {
                let init = self.optional(init.as_ref(), |init| match init {
                    ForInit::VariableDeclaration(declaration) => self.variable_declaration(declaration),
                    ForInit::Expression(expression) => self.expression(expression),
                });
                self.node("ForStatement", span)
                    .field("init", init)
                    .field("test", self.optional(test.as_ref(), |e| self.expression(e)))
                    .field("update", self.optional(update.as_ref(), |e| self.expression(e)))
                    .field("body", self.statement(body))
                    .build()
            }
            Statement::ForInStatement { span, left, right, body } => self
                .node("ForInStatement", span)
                .field("left", self.for_left(left))
                .field("right", self.expression(right))
                .field("body", self.statement(body))
                .build(),
            Statement::ForOfStatement {
                span,
                left,
                right,
                body,
                is_await,
            } => self
                .node("ForOfStatement", span)
                .field("await", *is_await)
                .field("left", self.for_left(left))
                .field("right", self.expression(right))
                .field("body", self.statement(body))
                .build(),
            Statement::FunctionDeclaration(function) => self.function("FunctionDeclaration", function),
            Statement::VariableDeclaration(declaration) => self.variable_declaration(declaration),
            Statement::ClassDeclaration(class) => self.class("ClassDeclaration", class),
            Statement::ImportDeclaration(import) => self.import(import),
            Statement::ExportNamedDeclaration(export) => {
                let specifiers = export
                    .specifiers
                    .iter()
                    .map(|specifier| {
                        self.node("ExportSpecifier", &specifier.span)
                            .field("local", self.module_export_name(&specifier.local))
                            .field("exported", self.module_export_name(&specifier.exported))
                            .build()
                    })
                    .collect::<Vec<_>>();
                self.node("ExportNamedDeclaration", &export.span)
                    .field("declaration", self.optional(export.declaration.as_deref(), |s| self.statement(s)))
                    .field("specifiers", specifiers)
                    .field("source", self.optional(export.source.as_ref(), |l| self.literal(l)))
                    .field("attributes", self.attributes(&export.attributes))
                    .build()
            }
            Statement::ExportDefaultDeclaration { span, declaration } => {
                let declaration = match declaration {
                    ExportDefaultKind::FunctionDeclaration(function) => {
                        self.function("FunctionDeclaration", function)
                    }
                    ExportDefaultKind::ClassDeclaration(class) => self.class("ClassDeclaration", class),
                    ExportDefaultKind::Expression(expression) => self.expression(expression),
                };
                self.node("ExportDefaultDeclaration", span)
                    .field("declaration", declaration)
                    .build()
            }
            Statement::ExportAllDeclaration {
                span,
                exported,
                source,
                attributes,
            } => self
                .node("ExportAllDeclaration", span)
                .field("exported", self.optional(exported.as_ref(), |n| self.module_export_name(n)))
                .field("source", self.literal(source))
                .field("attributes", self.attributes(attributes))
                .build(),
        }
    }

    fn for_left(&self, left: &ForInOfLeft) -> Value {
        match left {
            ForInOfLeft::VariableDeclaration(declaration) => self.variable_declaration(declaration),
            ForInOfLeft::Pattern(pattern) => self.pattern(pattern),
        }
    }

    fn variable_declaration(&self, declaration: &VariableDeclaration) -> Value {
        let declarations = declaration
            .declarations
            .iter()
            .map(|declarator| {
                self.node("VariableDeclarator", &declarator.span)
                    .field("id", self.pattern(&declarator.id))
                    .field("init", self.optional(declarator.init.as_ref(), |e| self.expression(e)))
                    .build()
            })
            .collect::<Vec<_>>();
        self.node("VariableDeclaration", &declaration.span)
            .field("declarations", declarations)
            .field("kind", declaration.kind.as_str())
            .build()
    }

    fn import(&self, import: &ImportDeclaration) -> Value {
        let specifiers = import
            .specifiers
            .iter()
            .map(|specifier| match specifier {
                ImportSpecifier::ImportSpecifier { span, imported, local } => self
                    .node("ImportSpecifier", span)
                    .field("imported", self.module_export_name(imported))
                    .field("local", self.identifier(local))
                    .build(),
                ImportSpecifier::ImportDefaultSpecifier { span, local } => self
                    .node("ImportDefaultSpecifier", span)
                    .field("local", self.identifier(local))
                    .build(),
                ImportSpecifier::ImportNamespaceSpecifier { span, local } => self
                    .node("ImportNamespaceSpecifier", span)
                    .field("local", self.identifier(local))
                    .build(),
            })
            .collect::<Vec<_>>();
        self.node("ImportDeclaration", &import.span)
            .field("specifiers", specifiers)
            .field("source", self.literal(&import.source))
            .field("attributes", self.attributes(&import.attributes))
            .build()
    }

    fn attributes(&self, attributes: &[ImportAttribute]) -> Value {
        Value::Array(
            attributes
                .iter()
                .map(|attribute| {
                    self.node("ImportAttribute", &attribute.span)
                        .field("key", self.module_export_name(&attribute.key))
                        .field("value", self.literal(&attribute.value))
                        .build()
                })
                .collect(),
        )
    }

    fn module_export_name(&self, name: &ModuleExportName) -> Value {
        match name {
            ModuleExportName::Identifier(id) => self.identifier(id),
            ModuleExportName::Literal(literal) => self.literal(literal),
        }
    }

    // ---- functions and classes ----

    fn function(&self, kind: &str, function: &Function) -> Value {
        self.node(kind, &function.span)
            .field("id", self.optional(function.id.as_ref(), |id| self.identifier(id)))
            .field("expression", false)
            .field("generator", function.generator)
            .field("async", function.is_async)
            .field("params", self.patterns(&function.params))
            .field("body", self.block(&function.body))
            .build()
    }

    fn arrow(&self, arrow: &ArrowFunction) -> Value {
        let (expression, body) = match &arrow.body {
            ArrowFunctionBody::Expression(body) => (true, self.expression(body)),
            ArrowFunctionBody::Block(block) => (false, self.block(block)),
        };
        self.node("ArrowFunctionExpression", &arrow.span)
            .field("id", Value::Null)
            .field("expression", expression)
            .field("generator", false)
            .field("async", arrow.is_async)
            .field("params", self.patterns(&arrow.params))
            .field("body", body)
            .build()
    }

    fn class(&self, kind: &str, class: &Class) -> Value {
        let elements = class
            .body
            .body
            .iter()
            .map(|element| self.class_element(element))
            .collect::<Vec<_>>();
        let body = self.node("ClassBody", &class.body.span).field("body", elements).build();
        self.decorators(self.node(kind, &class.span), &class.decorators)
            .field("id", self.optional(class.id.as_ref(), |id| self.identifier(id)))
            .field("superClass", self.optional(class.super_class.as_ref(), |e| self.expression(e)))
            .field("body", body)
            .build()
    }

    fn class_element(&self, element: &ClassElement) -> Value {
        match element {
            ClassElement::MethodDefinition {
                span,
                key,
                value,
                kind,
                is_static,
                decorators,
            } => self
                .decorators(self.node("MethodDefinition", span), decorators)
                .field("static", *is_static)
                .field("computed", key.is_computed())
                .field("key", self.property_key(key))
                .field("kind", kind.as_str())
                .field("value", self.function("FunctionExpression", value))
                .build(),
            ClassElement::PropertyDefinition {
                span,
                key,
                value,
                is_static,
                decorators,
            } => self.field_definition("PropertyDefinition", span, key, value.as_ref(), *is_static, decorators),
            ClassElement::AccessorProperty {
                span,
                key,
                value,
                is_static,
                decorators,
            } => self.field_definition("AccessorProperty", span, key, value.as_ref(), *is_static, decorators),
            ClassElement::StaticBlock { span, body } => self
                .node("StaticBlock", span)
                .field("body", self.statements(body))
                .build(),
        }
    }

    fn field_definition(
        &self,
        kind: &str,
        span: &Span,
        key: &PropertyKey,
        value: Option<&Expression>,
        is_static: bool,
        decorators: &[Decorator],
    ) -> Value {
        self.decorators(self.node(kind, span), decorators)
            .field("static", is_static)
            .field("computed", key.is_computed())
            .field("key", self.property_key(key))
            .field("value", self.optional(value, |e| self.expression(e)))
            .build()
    }

    fn property_key(&self, key: &PropertyKey) -> Value {
        match key {
            PropertyKey::Identifier(id) => self.identifier(id),
            PropertyKey::Literal(literal) => self.literal(literal),
            PropertyKey::PrivateIdentifier(id) => self.private_identifier(id),
            PropertyKey::Computed(expression) => self.expression(expression),
        }
    }

    // ---- expressions ----

    fn identifier(&self, id: &Identifier) -> Value {
        self.node("Identifier", &id.span).field("name", id.name.as_str()).build()
    }

    fn private_identifier(&self, id: &PrivateIdentifier) -> Value {
        self.node("PrivateIdentifier", &id.span)
            .field("name", id.name.as_str())
            .build()
    }

    fn literal(&self, literal: &Literal) -> Value {
        let node = self.node("Literal", &literal.span);
        let node = match &literal.value {
            LiteralValue::Null => node.field("value", Value::Null),
            LiteralValue::Boolean(value) => node.field("value", *value),
            LiteralValue::Number(value) => node.field("value", number(*value)),
            LiteralValue::String(value) => node.field("value", value.as_str()),
            LiteralValue::BigInt(_) | LiteralValue::RegExp { .. } => node.field("value", Value::Null),
        };
        let node = if self.options.raw {
            node.field("raw", literal.raw.as_str())
        } else {
            node
        };
        match &literal.value {
            LiteralValue::RegExp { pattern, flags } => node
                .field("regex", json!({ "pattern": pattern, "flags": flags }))
                .build(),
            LiteralValue::BigInt(value) => node.field("bigint", value.to_string()).build(),
            _ => node.build(),
        }
    }

    fn template(&self, template: &TemplateLiteral) -> Value {
        let quasis = template
            .quasis
            .iter()
            .map(|element| {
                self.node("TemplateElement", &element.span)
                    .field("value", json!({ "raw": element.raw, "cooked": element.cooked }))
                    .field("tail", element.tail)
                    .build()
            })
            .collect::<Vec<_>>();
        self.node("TemplateLiteral", &template.span)
            .field("expressions", self.expressions(&template.expressions))
            .field("quasis", quasis)
            .build()
    }

    fn expressions(&self, expressions: &[Expression]) -> Value {
        Value::Array(expressions.iter().map(|e| self.expression(e)).collect())
    }

    fn elements(&self, elements: &[ArrayElement]) -> Value {
        Value::Array(elements.iter().map(|element| self.element(element)).collect())
    }

    fn element(&self, element: &ArrayElement) -> Value {
        match element {
            ArrayElement::Expression(expression) => self.expression(expression),
            ArrayElement::Spread(spread) => self.spread(spread),
        }
    }

    fn spread(&self, spread: &SpreadElement) -> Value {
        self.node("SpreadElement", &spread.span)
            .field("argument", self.expression(&spread.argument))
            .build()
    }

    fn member(&self, member: &MemberExpression) -> Value {
        let (property, computed) = match &member.property {
            MemberProperty::Identifier(id) => (self.identifier(id), false),
            MemberProperty::PrivateIdentifier(id) => (self.private_identifier(id), false),
            MemberProperty::Computed(expression) => (self.expression(expression), true),
        };
        self.node("MemberExpression", &member.span)
            .field("object", self.expression(&member.object))
            .field("property", property)
            .field("computed", computed)
            .field("optional", member.optional)
            .build()
    }

    fn expression(&self, expression: &Expression) -> Value {
        match expression {
            Expression::Identifier(id) => self.identifier(id),
            Expression::PrivateIdentifier(id) => self.private_identifier(id),
            Expression::Literal(literal) => self.literal(literal),
            Expression::ThisExpression { span } => self.node("ThisExpression", span).build(),
            Expression::Super { span } => self.node("Super", span).build(),
            Expression::ArrayExpression { span, elements } => {
                let elements = elements
                    .iter()
                    .map(|element| self.optional(element.as_ref(), |e| self.element(e)))
                    .collect::<Vec<_>>();
                self.node("ArrayExpression", span).field("elements", elements).build()
            }
            Expression::ObjectExpression { span, properties } => {
                let properties = properties
                    .iter()
                    .map(|property| match property {
                        ObjectProperty::Property(property) => self
                            .node("Property", &property.span)
                            .field("method", property.method)
                            .field("shorthand", property.shorthand)
                            .field("computed", property.key.is_computed())
                            .field("key", self.property_key(&property.key))
                            .field("value", self.expression(&property.value))
                            .field("kind", property.kind.as_str())
                            .build(),
                        ObjectProperty::SpreadElement(spread) => self.spread(spread),
                    })
                    .collect::<Vec<_>>();
                self.node("ObjectExpression", span).field("properties", properties).build()
            }
            Expression::FunctionExpression(function) => self.function("FunctionExpression", function),
            Expression::ArrowFunctionExpression(arrow) => self.arrow(arrow),
            Expression::ClassExpression(class) => self.class("ClassExpression", class),
            Expression::TemplateLiteral(template) => self.template(template),
            Expression::TaggedTemplateExpression { span, tag, quasi } => self
                .node("TaggedTemplateExpression", span)
                .field("tag", self.expression(tag))
                .field("quasi", self.template(quasi))
                .build(),
            Expression::UnaryExpression {
                span,
                operator,
                argument,
            } => self
                .node("UnaryExpression", span)
                .field("operator", operator.as_str())
                .field("prefix", true)
                .field("argument", self.expression(argument))
                .build(),
            Expression::UpdateExpression {
                span,
                operator,
                prefix,
                argument,
            } => self
                .node("UpdateExpression", span)
                .field("operator", operator.as_str())
                .field("prefix", *prefix)
                .field("argument", self.expression(argument))
                .build(),
            Expression::BinaryExpression {
                span,
                operator,
                left,
                right,
            } => self
                .node("BinaryExpression", span)
                .field("left", self.expression(left))
                .field("operator", operator.as_str())
                .field("right", self.expression(right))
                .build(),
            Expression::LogicalExpression {
                span,
                operator,
                left,
                right,
            } => self
                .node("LogicalExpression", span)
                .field("left", self.expression(left))
                .field("operator", operator.as_str())
                .field("right", self.expression(right))
                .build(),
            Expression::AssignmentExpression {
                span,
                operator,
                left,
                right,
            } => self
                .node("AssignmentExpression", span)
                .field("operator", operator.as_str())
                .field("left", self.pattern(left))
                .field("right", self.expression(right))
                .build(),
            Expression::ConditionalExpression {
                span,
                test,
                consequent,
                alternate,
            } => self
                .node("ConditionalExpression", span)
                .field("test", self.expression(test))
                .field("consequent", self.expression(consequent))
                .field("alternate", self.expression(alternate))
                .build(),
            Expression::CallExpression {
                span,
                callee,
                arguments,
                optional,
            } => self
                .node("CallExpression", span)
                .field("callee", self.expression(callee))
                .field("arguments", self.elements(arguments))
                .field("optional", *optional)
                .build(),
            Expression::NewExpression { span, callee, arguments } => self
                .node("NewExpression", span)
                .field("callee", self.expression(callee))
                .field("arguments", self.elements(arguments))
                .build(),
            Expression::MemberExpression(member) => self.member(member),
            Expression::SequenceExpression { span, expressions } => self
                .node("SequenceExpression", span)
                .field("expressions", self.expressions(expressions))
                .build(),
            Expression::YieldExpression {
                span,
                argument,
                delegate,
            } => self
                .node("YieldExpression", span)
                .field("delegate", *delegate)
                .field("argument", self.optional(argument.as_deref(), |e| self.expression(e)))
                .build(),
            Expression::AwaitExpression { span, argument } => self
                .node("AwaitExpression", span)
                .field("argument", self.expression(argument))
                .build(),
            Expression::ChainExpression { span, expression } => self
                .node("ChainExpression", span)
                .field("expression", self.expression(expression))
                .build(),
            Expression::ImportExpression { span, source, options } => self
                .node("ImportExpression", span)
                .field("source", self.expression(source))
                .field("options", self.optional(options.as_deref(), |e| self.expression(e)))
                .build(),
            Expression::MetaProperty { span, meta, property } => self
                .node("MetaProperty", span)
                .field("meta", self.identifier(meta))
                .field("property", self.identifier(property))
                .build(),
            Expression::ParenthesizedExpression { expression, .. } => self.expression(expression),
        }
    }

    // ---- patterns ----

    fn patterns(&self, patterns: &[Pattern]) -> Value {
        Value::Array(patterns.iter().map(|pattern| self.pattern(pattern)).collect())
    }

    fn pattern(&self, pattern: &Pattern) -> Value {
        match pattern {
            Pattern::Identifier(id) => self.identifier(id),
            Pattern::MemberExpression(member) => self.member(member),
            Pattern::ObjectPattern { span, properties } => {
                let properties = properties
                    .iter()
                    .map(|property| match property {
                        ObjectPatternProperty::Property {
                            span,
                            key,
                            value,
                            shorthand,
                        } => self
                            .node("Property", span)
                            .field("method", false)
                            .field("shorthand", *shorthand)
                            .field("computed", key.is_computed())
                            .field("key", self.property_key(key))
                            .field("value", self.pattern(value))
                            .field("kind", "init")
                            .build(),
                        ObjectPatternProperty::RestElement { span, argument } => self
                            .node("RestElement", span)
                            .field("argument", self.pattern(argument))
                            .build(),
                    })
                    .collect::<Vec<_>>();
                self.node("ObjectPattern", span).field("properties", properties).build()
            }
            Pattern::ArrayPattern { span, elements } => {
                let elements = elements
                    .iter()
                    .map(|element| self.optional(element.as_ref(), |p| self.pattern(p)))
                    .collect::<Vec<_>>();
                self.node("ArrayPattern", span).field("elements", elements).build()
            }
            Pattern::RestElement { span, argument } => self
                .node("RestElement", span)
                .field("argument", self.pattern(argument))
                .build(),
            Pattern::AssignmentPattern { span, left, right } => self
                .node("AssignmentPattern", span)
                .field("left", self.pattern(left))
                .field("right", self.expression(right))
                .build(),
        }
    }
}
