//! Patterns and bindings
//!
//! Binding patterns in declarations and parameters are parsed directly.
//! Assignment targets and arrow parameters are first parsed as
//! expressions and converted here once the following `=` or `=>` shows
//! what they are.

use super::{CoverGrammar, Parser};
use crate::ast::*;
use crate::context::Context;
use crate::lexer::{is_strict_reserved_word, Keyword, Punctuator};
use crate::scope::BindingKind;
use core_types::ParseResult;
use std::collections::HashSet;

impl<'a> Parser<'a> {
    /// Parse an identifier, object pattern or array pattern
    pub(crate) fn parse_binding_atom(&mut self) -> ParseResult<Pattern> {
        if self.check_punctuator(Punctuator::LBracket) {
            let start = self.token.start;
            self.advance()?;
            let elements = self.parse_binding_list(Punctuator::RBracket, true)?;
            return Ok(Pattern::ArrayPattern {
                span: self.finish(start),
                elements,
            });
        }
        if self.check_punctuator(Punctuator::LBrace) {
            return self.parse_object_binding();
        }
        Ok(Pattern::Identifier(self.parse_identifier()?))
    }

    /// Parse binding elements up to and including `close`.
    ///
    /// Used for array patterns (holes allowed) and formal parameter lists.
    pub(crate) fn parse_binding_list(
        &mut self,
        close: Punctuator,
        allow_holes: bool,
    ) -> ParseResult<Vec<Option<Pattern>>> {
        let mut elements = Vec::new();
        let mut first = true;
        while !self.eat_punctuator(close)? {
            if first {
                first = false;
            } else {
                self.expect_punctuator(Punctuator::Comma)?;
            }

            if allow_holes && self.check_punctuator(Punctuator::Comma) {
                elements.push(None);
            } else if self.eat_punctuator(close)? {
                break;
            } else if self.check_punctuator(Punctuator::Spread) {
                elements.push(Some(self.parse_rest_binding()?));
                if self.check_punctuator(Punctuator::Comma) {
                    return Err(self.early(self.token.start, "Comma is not permitted after the rest element"));
                }
                self.expect_punctuator(close)?;
                break;
            } else {
                elements.push(Some(self.parse_binding_element()?));
            }
        }
        Ok(elements)
    }

    /// A binding atom with an optional default value
    pub(crate) fn parse_binding_element(&mut self) -> ParseResult<Pattern> {
        let start = self.token.start;
        let left = self.parse_binding_atom()?;
        if !self.eat_punctuator(Punctuator::Assign)? {
            return Ok(left);
        }
        let right = self.with_context(self.context | Context::IN, |p| p.parse_assignment())?;
        Ok(Pattern::AssignmentPattern {
            span: self.finish(start),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `...` followed by a binding atom
    pub(crate) fn parse_rest_binding(&mut self) -> ParseResult<Pattern> {
        let start = self.token.start;
        self.expect_punctuator(Punctuator::Spread)?;
        let argument = self.parse_binding_atom()?;
        Ok(Pattern::RestElement {
            span: self.finish(start),
            argument: Box::new(argument),
        })
    }

    fn parse_object_binding(&mut self) -> ParseResult<Pattern> {
        let start = self.token.start;
        self.expect_punctuator(Punctuator::LBrace)?;
        let mut properties = Vec::new();
        let mut first = true;
        while !self.eat_punctuator(Punctuator::RBrace)? {
            if first {
                first = false;
            } else {
                self.expect_punctuator(Punctuator::Comma)?;
                if self.eat_punctuator(Punctuator::RBrace)? {
                    break;
                }
            }

            let property_start = self.token.start;
            if self.eat_punctuator(Punctuator::Spread)? {
                let argument = self.parse_identifier()?;
                if self.check_punctuator(Punctuator::Comma) {
                    return Err(self.early(self.token.start, "Comma is not permitted after the rest element"));
                }
                properties.push(ObjectPatternProperty::RestElement {
                    span: self.finish(property_start),
                    argument: Box::new(Pattern::Identifier(argument)),
                });
                continue;
            }

            let key = self.parse_property_name()?;
            if self.eat_punctuator(Punctuator::Colon)? {
                let value = self.parse_binding_element()?;
                properties.push(ObjectPatternProperty::Property {
                    span: self.finish(property_start),
                    key,
                    value,
                    shorthand: false,
                });
                continue;
            }

            let id = match key {
                PropertyKey::Identifier(id) => id,
                _ => return Err(self.unexpected()),
            };
            self.check_shorthand(&id)?;
            let value = if self.eat_punctuator(Punctuator::Assign)? {
                let right = self.with_context(self.context | Context::IN, |p| p.parse_assignment())?;
                Pattern::AssignmentPattern {
                    span: self.finish(property_start),
                    left: Box::new(Pattern::Identifier(id.clone())),
                    right: Box::new(right),
                }
            } else {
                Pattern::Identifier(id.clone())
            };
            properties.push(ObjectPatternProperty::Property {
                span: self.finish(property_start),
                key: PropertyKey::Identifier(id),
                value,
                shorthand: true,
            });
        }
        Ok(Pattern::ObjectPattern {
            span: self.finish(start),
            properties,
        })
    }

    /// A shorthand property name is a reference, so it must not be a
    /// reserved word.
    pub(crate) fn check_shorthand(&mut self, id: &Identifier) -> ParseResult<()> {
        if let Some(keyword) = Keyword::lookup(&id.name) {
            if !matches!(keyword, Keyword::Await | Keyword::Yield) {
                return Err(self.raise(
                    id.span.start,
                    format!("Unexpected keyword '{}'", keyword.as_str()),
                ));
            }
        }
        self.check_unreserved(id.span.start, &id.name)
    }

    // ---- reinterpretation ----

    /// Convert the left side of `=` (or of a for-in/of head) to a pattern.
    pub(crate) fn to_assignment_target(
        &mut self,
        expression: Expression,
        cover: Option<&CoverGrammar>,
    ) -> ParseResult<Pattern> {
        match expression {
            Expression::ObjectExpression { .. } | Expression::ArrayExpression { .. } => {
                if let Some(cover) = cover {
                    self.check_pattern_errors(cover, false)?;
                }
                self.to_pattern(expression, false)
            }
            other => self.to_simple_target(other),
        }
    }

    /// Convert an arrow parameter to a binding pattern
    pub(crate) fn to_binding_pattern(&mut self, expression: Expression) -> ParseResult<Pattern> {
        self.to_pattern(expression, true)
    }

    /// Convert the target of a compound assignment: an identifier or a
    /// member expression, possibly parenthesized.
    pub(crate) fn to_simple_target(&self, expression: Expression) -> ParseResult<Pattern> {
        let start = expression.span().start;
        self.check_target(&expression, "Invalid left-hand side in assignment")?;
        simple_target(expression).ok_or_else(|| self.early(start, "Invalid left-hand side in assignment"))
    }

    /// Check the operand of `++`/`--`
    pub(crate) fn check_simple_target(&self, expression: &Expression) -> ParseResult<()> {
        self.check_target(expression, "Invalid left-hand side expression in update operation")
    }

    fn check_target(&self, expression: &Expression, message: &str) -> ParseResult<()> {
        match expression.without_parens() {
            Expression::Identifier(id) => self.check_strict_assignment(id),
            Expression::MemberExpression(_) => Ok(()),
            Expression::ChainExpression { span, .. } => Err(self.early(
                span.start,
                "Optional chaining cannot appear in left-hand side",
            )),
            _ => Err(self.early(expression.span().start, message)),
        }
    }

    fn check_strict_assignment(&self, id: &Identifier) -> ParseResult<()> {
        if self.context.is_strict() && (id.name == "eval" || id.name == "arguments") {
            return Err(self.early(
                id.span.start,
                format!("Assigning to {} in strict mode", id.name),
            ));
        }
        Ok(())
    }

    fn to_pattern(&mut self, expression: Expression, binding: bool) -> ParseResult<Pattern> {
        match expression {
            Expression::Identifier(id) => {
                if binding {
                    if self.context.has_await() && id.name == "await" {
                        return Err(self.early(
                            id.span.start,
                            "Cannot use 'await' as identifier inside an async function",
                        ));
                    }
                } else {
                    self.check_strict_assignment(&id)?;
                }
                Ok(Pattern::Identifier(id))
            }
            Expression::MemberExpression(member) => {
                if binding {
                    return Err(self.early(member.span.start, "Invalid destructuring assignment target"));
                }
                Ok(Pattern::MemberExpression(member))
            }
            Expression::ObjectExpression { span, properties } => {
                let count = properties.len();
                let mut converted = Vec::with_capacity(count);
                for (index, property) in properties.into_iter().enumerate() {
                    converted.push(self.to_pattern_property(property, index + 1 == count, binding)?);
                }
                Ok(Pattern::ObjectPattern {
                    span,
                    properties: converted,
                })
            }
            Expression::ArrayExpression { span, elements } => {
                let count = elements.len();
                let mut converted = Vec::with_capacity(count);
                for (index, element) in elements.into_iter().enumerate() {
                    let pattern = match element {
                        None => None,
                        Some(ArrayElement::Expression(expression)) => Some(self.to_pattern(expression, binding)?),
                        Some(ArrayElement::Spread(spread)) => {
                            if index + 1 != count {
                                return Err(self.early(spread.span.start, "Rest element must be last element"));
                            }
                            Some(self.to_rest_element(spread, binding)?)
                        }
                    };
                    converted.push(pattern);
                }
                Ok(Pattern::ArrayPattern {
                    span,
                    elements: converted,
                })
            }
            Expression::AssignmentExpression {
                span,
                operator,
                left,
                right,
            } => {
                if operator != AssignmentOperator::Assign {
                    return Err(self.early(
                        left.span().end,
                        "Only '=' operator can be used for specifying default value.",
                    ));
                }
                if binding {
                    self.check_binding_shape(&left)?;
                }
                Ok(Pattern::AssignmentPattern { span, left, right })
            }
            Expression::ParenthesizedExpression { span, expression } => {
                let simple = matches!(
                    expression.without_parens(),
                    Expression::Identifier(_) | Expression::MemberExpression(_)
                );
                if binding || !simple {
                    return Err(self.early(span.start, "Invalid parenthesized pattern"));
                }
                self.to_pattern(*expression, false)
            }
            Expression::ChainExpression { span, .. } => Err(self.early(
                span.start,
                "Optional chaining cannot appear in left-hand side",
            )),
            other => Err(self.early(other.span().start, "Invalid destructuring assignment target")),
        }
    }

    fn to_pattern_property(
        &mut self,
        property: ObjectProperty,
        last: bool,
        binding: bool,
    ) -> ParseResult<ObjectPatternProperty> {
        match property {
            ObjectProperty::Property(property) => {
                if property.kind != PropertyKind::Init {
                    return Err(self.early(
                        property.key.span().start,
                        "Object pattern can't contain getter or setter",
                    ));
                }
                if property.method {
                    return Err(self.early(property.span.start, "Invalid destructuring assignment target"));
                }
                let value = self.to_pattern(property.value, binding)?;
                Ok(ObjectPatternProperty::Property {
                    span: property.span,
                    key: property.key,
                    value,
                    shorthand: property.shorthand,
                })
            }
            ObjectProperty::SpreadElement(spread) => {
                if !last {
                    return Err(self.early(spread.span.start, "Rest element must be last element"));
                }
                let span = spread.span;
                match self.to_rest_element(spread, binding)? {
                    Pattern::RestElement { argument, .. } => {
                        if matches!(
                            *argument,
                            Pattern::ObjectPattern { .. } | Pattern::ArrayPattern { .. }
                        ) {
                            return Err(self.early(
                                argument.span().start,
                                "`...` must be followed by an assignable reference in assignment contexts",
                            ));
                        }
                        Ok(ObjectPatternProperty::RestElement { span, argument })
                    }
                    other => Err(self.early(other.span().start, "Invalid rest element")),
                }
            }
        }
    }

    fn to_rest_element(&mut self, spread: SpreadElement, binding: bool) -> ParseResult<Pattern> {
        let argument = self.to_pattern(spread.argument, binding)?;
        if let Pattern::AssignmentPattern { span, .. } = &argument {
            return Err(self.early(span.start, "Rest elements cannot have a default value"));
        }
        Ok(Pattern::RestElement {
            span: spread.span,
            argument: Box::new(argument),
        })
    }

    /// A default value's target inside arrow parameters was converted as an
    /// assignment target; binding patterns cannot contain member
    /// expressions.
    fn check_binding_shape(&self, pattern: &Pattern) -> ParseResult<()> {
        match pattern {
            Pattern::Identifier(_) => Ok(()),
            Pattern::MemberExpression(member) => {
                Err(self.early(member.span.start, "Invalid destructuring assignment target"))
            }
            Pattern::ObjectPattern { properties, .. } => properties.iter().try_for_each(|property| match property {
                ObjectPatternProperty::Property { value, .. } => self.check_binding_shape(value),
                ObjectPatternProperty::RestElement { argument, .. } => self.check_binding_shape(argument),
            }),
            Pattern::ArrayPattern { elements, .. } => elements
                .iter()
                .flatten()
                .try_for_each(|element| self.check_binding_shape(element)),
            Pattern::RestElement { argument, .. } => self.check_binding_shape(argument),
            Pattern::AssignmentPattern { left, .. } => self.check_binding_shape(left),
        }
    }

    /// Pattern-only syntax recorded in `cover` is fine in a pattern, except
    /// a comma after a rest element; binding patterns also reject
    /// parenthesized elements.
    pub(crate) fn check_pattern_errors(&self, cover: &CoverGrammar, binding: bool) -> ParseResult<()> {
        if let Some(offset) = cover.trailing_comma {
            return Err(self.early(offset, "Comma is not permitted after the rest element"));
        }
        if binding {
            if let Some(offset) = cover.parenthesized_bind {
                return Err(self.early(offset, "Invalid parenthesized pattern"));
            }
        }
        Ok(())
    }

    /// Arrow parameters may not contain yield or await expressions.
    pub(crate) fn check_yield_await_in_params(&self) -> ParseResult<()> {
        if let Some(offset) = self.yield_pos {
            return Err(self.early(offset, "Yield expression cannot be a default value"));
        }
        if let Some(offset) = self.await_pos {
            return Err(self.early(offset, "Await expression cannot be a default value"));
        }
        Ok(())
    }

    // ---- declarations ----

    /// Declare every name bound by `pattern` in the current scope
    pub(crate) fn declare_pattern(&mut self, pattern: &Pattern, kind: BindingKind) -> ParseResult<()> {
        let mut names = Vec::new();
        collect_bound_names(pattern, &mut names);
        for id in names {
            self.declare_identifier(id, kind)?;
        }
        Ok(())
    }

    pub(crate) fn declare_identifier(&mut self, id: &Identifier, kind: BindingKind) -> ParseResult<()> {
        self.check_strict_binding(id)?;
        if kind == BindingKind::Lexical && id.name == "let" {
            return Err(self.early(id.span.start, "let is disallowed as a lexically bound name"));
        }
        if !self.scopes.declare(&id.name, kind) {
            return Err(self.early(
                id.span.start,
                format!("Identifier '{}' has already been declared", id.name),
            ));
        }
        Ok(())
    }

    /// Names that cannot be bound in strict mode code
    pub(crate) fn check_strict_binding(&self, id: &Identifier) -> ParseResult<()> {
        if !self.context.is_strict() {
            return Ok(());
        }
        if id.name == "eval" || id.name == "arguments" {
            return Err(self.early(id.span.start, format!("Binding {} in strict mode", id.name)));
        }
        if is_strict_reserved_word(&id.name) || id.name == "yield" {
            return Err(self.early(
                id.span.start,
                format!("The keyword '{}' is reserved", id.name),
            ));
        }
        Ok(())
    }

    /// Declare parameters in the function scope. Duplicates are allowed
    /// only for simple parameter lists of sloppy non-arrow functions.
    pub(crate) fn check_params(&mut self, params: &[Pattern], allow_duplicates: bool) -> ParseResult<()> {
        let mut names = Vec::new();
        for param in params {
            collect_bound_names(param, &mut names);
        }
        let mut seen = HashSet::new();
        for id in names {
            if !allow_duplicates && !seen.insert(id.name.as_str()) {
                return Err(self.early(id.span.start, "Argument name clash"));
            }
            self.declare_identifier(id, BindingKind::Var)?;
        }
        Ok(())
    }
}

fn simple_target(expression: Expression) -> Option<Pattern> {
    match expression {
        Expression::Identifier(id) => Some(Pattern::Identifier(id)),
        Expression::MemberExpression(member) => Some(Pattern::MemberExpression(member)),
        Expression::ParenthesizedExpression { expression, .. } => simple_target(*expression),
        _ => None,
    }
}

/// Identifiers bound by a pattern, in source order
pub(crate) fn collect_bound_names<'p>(pattern: &'p Pattern, names: &mut Vec<&'p Identifier>) {
    match pattern {
        Pattern::Identifier(id) => names.push(id),
        Pattern::ObjectPattern { properties, .. } => {
            for property in properties {
                match property {
                    ObjectPatternProperty::Property { value, .. } => collect_bound_names(value, names),
                    ObjectPatternProperty::RestElement { argument, .. } => collect_bound_names(argument, names),
                }
            }
        }
        Pattern::ArrayPattern { elements, .. } => {
            for element in elements.iter().flatten() {
                collect_bound_names(element, names);
            }
        }
        Pattern::RestElement { argument, .. } => collect_bound_names(argument, names),
        Pattern::AssignmentPattern { left, .. } => collect_bound_names(left, names),
        Pattern::MemberExpression(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse(source: &str) -> Program {
        Parser::new(source, &ParseOptions::default())
            .parse_program()
            .unwrap_or_else(|err| panic!("Failed to parse {:?}: {}", source, err))
    }

    fn fails(source: &str) -> String {
        match Parser::new(source, &ParseOptions::default()).parse_program() {
            Ok(program) => panic!("Expected error for {:?}, got {:?}", source, program),
            Err(err) => err.message,
        }
    }

    fn assignment_target(source: &str) -> Pattern {
        match parse(source).body.remove(0) {
            Statement::ExpressionStatement {
                expression: Expression::AssignmentExpression { left, .. },
                ..
            } => *left,
            Statement::ExpressionStatement {
                expression: Expression::ParenthesizedExpression { expression, .. },
                ..
            } => match *expression {
                Expression::AssignmentExpression { left, .. } => *left,
                other => panic!("Expected assignment, got {:?}", other),
            },
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_array_assignment_pattern() {
        match assignment_target("[a, , b = 1, ...c] = d") {
            Pattern::ArrayPattern { elements, .. } => {
                assert_eq!(elements.len(), 4);
                assert!(elements[1].is_none());
                assert!(matches!(elements[2], Some(Pattern::AssignmentPattern { .. })));
                assert!(matches!(elements[3], Some(Pattern::RestElement { .. })));
            }
            other => panic!("Expected array pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_object_assignment_pattern() {
        match assignment_target("({ a, b: c.d, e = 1, ...f } = g)") {
            Pattern::ObjectPattern { properties, .. } => {
                assert_eq!(properties.len(), 4);
                match &properties[1] {
                    ObjectPatternProperty::Property { value, shorthand, .. } => {
                        assert!(!shorthand);
                        assert!(matches!(value, Pattern::MemberExpression(_)));
                    }
                    other => panic!("Expected property, got {:?}", other),
                }
                match &properties[2] {
                    ObjectPatternProperty::Property { value, shorthand, .. } => {
                        assert!(shorthand);
                        assert!(matches!(value, Pattern::AssignmentPattern { .. }));
                    }
                    other => panic!("Expected property, got {:?}", other),
                }
                assert!(matches!(properties[3], ObjectPatternProperty::RestElement { .. }));
            }
            other => panic!("Expected object pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_rest_with_trailing_comma_is_rejected() {
        assert!(fails("[...x,] = [1, 2, 3];").contains("Comma is not permitted"));
        assert!(fails("[...x, y] = z").contains("Comma is not permitted after the rest element"));
        assert!(fails("[...x = 1] = z").contains("Rest elements cannot have a default value"));
    }

    #[test]
    fn test_compound_default_is_rejected() {
        assert!(fails("[a += 1] = b").starts_with("Only '=' operator"));
    }

    #[test]
    fn test_getter_in_pattern_is_rejected() {
        assert!(fails("({ get a() {} } = b)").contains("getter or setter"));
        assert!(fails("({ a() {} } = b)").contains("Invalid destructuring"));
    }

    #[test]
    fn test_parenthesized_targets() {
        assert!(matches!(assignment_target("[(a)] = b"), Pattern::ArrayPattern { .. }));
        assert!(fails("[([a])] = b").contains("parenthesized"));
        assert!(fails("([(a)]) => 1").contains("parenthesized"));
        assert!(fails("((a)) => 1").contains("parenthesized"));
    }

    #[test]
    fn test_object_binding_rest_must_be_identifier() {
        assert!(parse("let { a, ...rest } = b;").body.len() == 1);
        assert!(fails("let {...x = y} = z;").len() > 0);
        assert!(fails("let {...[x]} = z;").len() > 0);
    }

    #[test]
    fn test_binding_patterns_in_declarations() {
        let program = parse("var [a, { b, c: [d] }, ...e] = f;");
        match &program.body[0] {
            Statement::VariableDeclaration(declaration) => {
                assert!(matches!(declaration.declarations[0].id, Pattern::ArrayPattern { .. }));
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_assignment_to_eval() {
        assert!(fails("'use strict'; eval = 1").contains("eval"));
        assert!(fails("'use strict'; [arguments] = []").contains("arguments"));
        assert!(fails("'use strict'; arguments++").contains("arguments"));
    }

    #[test]
    fn test_arrow_params_cannot_contain_members() {
        assert!(fails("([a.b]) => 1").contains("Invalid destructuring"));
        assert!(fails("({ a: b.c }) => 1").contains("Invalid destructuring"));
    }

    #[test]
    fn test_collect_bound_names() {
        let program = parse("let [a, { b, c: d = 1 }, ...e] = f;");
        match &program.body[0] {
            Statement::VariableDeclaration(declaration) => {
                let mut names = Vec::new();
                super::collect_bound_names(&declaration.declarations[0].id, &mut names);
                let names: Vec<_> = names.iter().map(|id| id.name.as_str()).collect();
                assert_eq!(names, vec!["a", "b", "d", "e"]);
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
    }
}
