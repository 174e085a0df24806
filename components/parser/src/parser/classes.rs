//! Classes
//!
//! Class bodies are strict. Private names are collected per class body
//! and resolved when the body closes, since a method may use a private
//! name declared further down.

use super::Parser;
use crate::ast::*;
use crate::context::Context;
use crate::lexer::{Keyword, Punctuator, TokenKind};
use crate::scope::{BindingKind, PrivateKind, ScopeFlags};
use core_types::ParseResult;
use tracing::trace;

/// Where a `class` keyword was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClassKind {
    /// Declaration, the name is required
    Declaration,
    /// `export default class`, the name is optional
    DefaultExport,
    /// Class expression
    Expression,
}

impl<'a> Parser<'a> {
    /// Parse a class starting at its `class` keyword
    pub(crate) fn parse_class(
        &mut self,
        start: usize,
        kind: ClassKind,
        decorators: Vec<Decorator>,
    ) -> ParseResult<Class> {
        trace!(start = self.token.start, "parsing class");
        self.expect_keyword(Keyword::Class)?;

        self.with_context(self.context | Context::STRICT, |p| {
            let id = if kind == ClassKind::Declaration || p.at_identifier() {
                Some(p.parse_identifier()?)
            } else {
                None
            };
            if kind != ClassKind::Expression {
                if let Some(id) = &id {
                    p.declare_identifier(id, BindingKind::Lexical)?;
                }
            }
            let super_class = if p.eat_keyword(Keyword::Extends)? {
                Some(p.parse_left_hand_side(None)?)
            } else {
                None
            };
            let body = p.parse_class_body(super_class.is_some())?;
            Ok(Class {
                span: p.finish(start),
                id,
                super_class,
                body,
                decorators,
            })
        })
    }

    fn parse_class_body(&mut self, derived: bool) -> ParseResult<ClassBody> {
        let start = self.token.start;
        self.expect_punctuator(Punctuator::LBrace)?;
        self.private_names.enter_class();
        let elements = self.parse_class_elements(derived);
        let resolved = self.private_names.exit_class();
        let body = elements?;
        if let Err((name, offset)) = resolved {
            return Err(self.early(
                offset,
                format!("Private field '#{}' must be declared in an enclosing class", name),
            ));
        }
        Ok(ClassBody {
            span: self.finish(start),
            body,
        })
    }

    fn parse_class_elements(&mut self, derived: bool) -> ParseResult<Vec<ClassElement>> {
        let mut body = Vec::new();
        let mut has_constructor = false;
        while !self.eat_punctuator(Punctuator::RBrace)? {
            if self.eat_punctuator(Punctuator::Semicolon)? {
                continue;
            }
            let element = self.parse_class_element(derived)?;
            if let ClassElement::MethodDefinition {
                kind: MethodKind::Constructor,
                key,
                ..
            } = &element
            {
                if has_constructor {
                    return Err(self.early(key.span().start, "Duplicate constructor in the same class"));
                }
                has_constructor = true;
            }
            body.push(element);
        }
        Ok(body)
    }

    /// Consume `name` used as a modifier. Returns false when it is absent
    /// or written with escapes.
    fn eat_modifier(&mut self, name: &str) -> ParseResult<bool> {
        if self.check_contextual(name) && !self.token.escaped {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn at_class_element_name(&self) -> bool {
        matches!(
            self.token.kind,
            TokenKind::Identifier(_)
                | TokenKind::Keyword(_)
                | TokenKind::PrivateName(_)
                | TokenKind::Number(_)
                | TokenKind::BigInt(_)
                | TokenKind::String(_)
        ) || self.check_punctuator(Punctuator::LBracket)
    }

    fn parse_class_element(&mut self, derived: bool) -> ParseResult<ClassElement> {
        let start = self.token.start;
        let decorators = if self.context.contains(Context::NEXT) && self.check_punctuator(Punctuator::At) {
            self.parse_decorators()?
        } else {
            Vec::new()
        };

        let mut is_static = false;
        let mut is_async = false;
        let mut generator = false;
        let mut accessor = false;
        let mut kind = MethodKind::Method;
        // A modifier keyword that turned out to be the element name
        let mut key_name: Option<(&'static str, usize)> = None;

        let modifier_start = self.token.start;
        if self.eat_modifier("static")? {
            if decorators.is_empty() && self.check_punctuator(Punctuator::LBrace) {
                return self.parse_static_block(start);
            }
            if self.at_class_element_name() || self.check_punctuator(Punctuator::Star) {
                is_static = true;
            } else {
                key_name = Some(("static", modifier_start));
            }
        }

        let modifier_start = self.token.start;
        if key_name.is_none() && self.context.contains(Context::NEXT) && self.eat_modifier("accessor")? {
            if self.at_class_element_name() && !self.token.newline_before {
                accessor = true;
            } else {
                key_name = Some(("accessor", modifier_start));
            }
        }

        let modifier_start = self.token.start;
        if key_name.is_none() && !accessor && self.eat_modifier("async")? {
            if (self.at_class_element_name() || self.check_punctuator(Punctuator::Star)) && !self.token.newline_before {
                is_async = true;
            } else {
                key_name = Some(("async", modifier_start));
            }
        }

        if key_name.is_none() && !accessor && self.eat_punctuator(Punctuator::Star)? {
            generator = true;
        }

        if key_name.is_none() && !accessor && !is_async && !generator {
            let modifier_start = self.token.start;
            for (name, accessor_kind) in [("get", MethodKind::Get), ("set", MethodKind::Set)] {
                if self.eat_modifier(name)? {
                    if self.at_class_element_name() {
                        kind = accessor_kind;
                    } else {
                        key_name = Some((name, modifier_start));
                    }
                    break;
                }
            }
        }

        let key = match key_name {
            Some((name, key_start)) => PropertyKey::Identifier(Identifier {
                span: self.span(key_start, key_start + name.len()),
                name: name.to_string(),
            }),
            None => self.parse_class_element_name()?,
        };

        if kind != MethodKind::Method || generator || is_async || self.check_punctuator(Punctuator::LParen) {
            if accessor {
                return Err(self.unexpected());
            }
            self.parse_class_method(start, key, kind, is_static, is_async, generator, derived, decorators)
        } else {
            self.parse_class_field(start, key, is_static, accessor, decorators)
        }
    }

    fn parse_class_element_name(&mut self) -> ParseResult<PropertyKey> {
        if matches!(self.token.kind, TokenKind::PrivateName(_)) {
            let id = self.parse_private_name()?;
            if id.name == "constructor" {
                return Err(self.early(
                    id.span.start,
                    "Classes can't have an element named '#constructor'",
                ));
            }
            return Ok(PropertyKey::PrivateIdentifier(id));
        }
        self.parse_property_name()
    }

    #[allow(clippy::too_many_arguments)]
    fn parse_class_method(
        &mut self,
        start: usize,
        key: PropertyKey,
        kind: MethodKind,
        is_static: bool,
        is_async: bool,
        generator: bool,
        derived: bool,
        decorators: Vec<Decorator>,
    ) -> ParseResult<ClassElement> {
        let name = if key.is_computed() { None } else { key.static_name() };
        let is_constructor = !is_static && name == Some("constructor");
        let key_start = key.span().start;
        if is_constructor {
            if kind != MethodKind::Method {
                return Err(self.early(key_start, "Constructor can't have get/set modifier"));
            }
            if generator {
                return Err(self.early(key_start, "Constructor can't be a generator"));
            }
            if is_async {
                return Err(self.early(key_start, "Constructor can't be an async method"));
            }
        }
        if is_static && name == Some("prototype") {
            return Err(self.early(key_start, "Classes may not have a static property named prototype"));
        }

        let value = self.parse_method(generator, is_async, is_constructor && derived)?;
        if kind == MethodKind::Get || kind == MethodKind::Set {
            self.check_accessor_params(kind == MethodKind::Get, &value)?;
        }
        if let PropertyKey::PrivateIdentifier(id) = &key {
            let private_kind = match kind {
                MethodKind::Get => PrivateKind::Getter { is_static },
                MethodKind::Set => PrivateKind::Setter { is_static },
                _ => PrivateKind::Plain,
            };
            self.declare_private(id, private_kind)?;
        }

        Ok(ClassElement::MethodDefinition {
            span: self.finish(start),
            key,
            value: Box::new(value),
            kind: if is_constructor { MethodKind::Constructor } else { kind },
            is_static,
            decorators,
        })
    }

    fn parse_class_field(
        &mut self,
        start: usize,
        key: PropertyKey,
        is_static: bool,
        accessor: bool,
        decorators: Vec<Decorator>,
    ) -> ParseResult<ClassElement> {
        let name = if key.is_computed() { None } else { key.static_name() };
        let key_start = key.span().start;
        if name == Some("constructor") {
            return Err(self.early(key_start, "Classes can't have a field named 'constructor'"));
        }
        if is_static && name == Some("prototype") {
            return Err(self.early(key_start, "Classes can't have a static field named 'prototype'"));
        }
        if let PropertyKey::PrivateIdentifier(id) = &key {
            self.declare_private(id, PrivateKind::Plain)?;
        }

        let value = if self.eat_punctuator(Punctuator::Assign)? {
            Some(self.parse_field_initializer()?)
        } else {
            None
        };
        self.consume_semicolon()?;

        let span = self.finish(start);
        Ok(if accessor {
            ClassElement::AccessorProperty {
                span,
                key,
                value,
                is_static,
                decorators,
            }
        } else {
            ClassElement::PropertyDefinition {
                span,
                key,
                value,
                is_static,
                decorators,
            }
        })
    }

    fn declare_private(&mut self, id: &PrivateIdentifier, kind: PrivateKind) -> ParseResult<()> {
        if !self.private_names.declare(&id.name, kind) {
            return Err(self.early(
                id.span.start,
                format!("Identifier '#{}' has already been declared", id.name),
            ));
        }
        Ok(())
    }

    /// Field initializers are evaluated like the body of a method with no
    /// parameters.
    fn parse_field_initializer(&mut self) -> ParseResult<Expression> {
        let saved = self.take_yield_await();
        let labels = std::mem::take(&mut self.labels);
        self.scopes.enter(ScopeFlags::FUNCTION);
        let value = self.with_context(self.context.field_initializer(), |p| p.parse_assignment());
        self.scopes.exit();
        self.labels = labels;
        self.restore_yield_await(saved);
        value
    }

    /// `static { ... }` once `static` has been consumed
    fn parse_static_block(&mut self, start: usize) -> ParseResult<ClassElement> {
        self.expect_punctuator(Punctuator::LBrace)?;
        let saved = self.take_yield_await();
        let labels = std::mem::take(&mut self.labels);
        self.scopes.enter(ScopeFlags::STATIC_BLOCK);
        let body = self.with_context(self.context.static_block(), |p| {
            let mut body = Vec::new();
            while !p.check_punctuator(Punctuator::RBrace) {
                body.push(p.parse_statement_list_item(false)?);
            }
            p.advance()?;
            Ok(body)
        });
        self.scopes.exit();
        self.labels = labels;
        self.restore_yield_await(saved);
        Ok(ClassElement::StaticBlock {
            span: self.finish(start),
            body: body?,
        })
    }

    /// One or more `@decorator`s before a class or class element
    pub(crate) fn parse_decorators(&mut self) -> ParseResult<Vec<Decorator>> {
        let mut decorators = Vec::new();
        while self.check_punctuator(Punctuator::At) {
            let start = self.token.start;
            self.advance()?;
            let expression = if self.check_punctuator(Punctuator::LParen) {
                let paren_start = self.token.start;
                self.advance()?;
                let expression = self.with_context(self.context | Context::IN, |p| p.parse_expression())?;
                self.expect_punctuator(Punctuator::RParen)?;
                Expression::ParenthesizedExpression {
                    span: self.finish(paren_start),
                    expression: Box::new(expression),
                }
            } else {
                self.parse_decorator_member()?
            };
            decorators.push(Decorator {
                span: self.finish(start),
                expression,
            });
        }
        Ok(decorators)
    }

    /// `a.b.#c` with an optional trailing argument list
    fn parse_decorator_member(&mut self) -> ParseResult<Expression> {
        let start = self.token.start;
        let mut expression = Expression::Identifier(self.parse_identifier()?);
        while self.eat_punctuator(Punctuator::Dot)? {
            let property = if matches!(self.token.kind, TokenKind::PrivateName(_)) {
                MemberProperty::PrivateIdentifier(self.parse_private_reference()?)
            } else {
                MemberProperty::Identifier(self.parse_identifier_name()?)
            };
            expression = Expression::MemberExpression(MemberExpression {
                span: self.finish(start),
                object: Box::new(expression),
                property,
                optional: false,
            });
        }
        if self.eat_punctuator(Punctuator::LParen)? {
            let arguments = self.parse_arguments(None)?;
            expression = Expression::CallExpression {
                span: self.finish(start),
                callee: Box::new(expression),
                arguments,
                optional: false,
            };
        }
        Ok(expression)
    }
}
