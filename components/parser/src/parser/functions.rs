//! Functions, methods and arrow functions

use super::{mark_directives, Parser};
use crate::ast::*;
use crate::context::Context;
use crate::lexer::Punctuator;
use crate::scope::{BindingKind, ScopeFlags};
use core_types::ParseResult;
use tracing::trace;

/// Where a `function` keyword was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FunctionKind {
    /// Declaration in a statement list
    Declaration,
    /// Sloppy-mode declaration as the body of `if` or a label
    Hanging,
    /// `export default function`, the name is optional
    DefaultExport,
    /// Function expression
    Expression,
}

impl<'a> Parser<'a> {
    /// Parse a function after its `function` keyword
    pub(crate) fn parse_function(
        &mut self,
        start: usize,
        kind: FunctionKind,
        is_async: bool,
    ) -> ParseResult<Function> {
        let generator = self.eat_punctuator(Punctuator::Star)?;
        if generator && kind == FunctionKind::Hanging {
            return Err(self.unexpected());
        }
        trace!(start, generator, is_async, "parsing function");

        let mut id = None;
        if kind != FunctionKind::Expression && (kind != FunctionKind::DefaultExport || self.at_identifier()) {
            let name = self.parse_identifier()?;
            if kind != FunctionKind::Hanging {
                let binding = if self.context.is_strict() || generator || is_async {
                    if self.scopes.treat_functions_as_var() {
                        BindingKind::Var
                    } else {
                        BindingKind::Lexical
                    }
                } else {
                    BindingKind::Function
                };
                self.declare_identifier(&name, binding)?;
            }
            id = Some(name);
        }

        let saved = self.take_yield_await();
        let context = self.context.function(is_async, generator);
        self.scopes.enter(ScopeFlags::FUNCTION);
        let result = self.with_context(context, |p| {
            if kind == FunctionKind::Expression && p.at_identifier() {
                id = Some(p.parse_identifier()?);
            }
            let params = p.parse_function_params()?;
            let body = p.parse_function_body(&params, id.as_ref(), false, false)?;
            Ok(Function {
                span: p.finish(start),
                id: id.take(),
                params,
                body,
                is_async,
                generator,
            })
        });
        self.scopes.exit();
        self.restore_yield_await(saved);
        result
    }

    /// `( params )` of a function or method
    fn parse_function_params(&mut self) -> ParseResult<Vec<Pattern>> {
        self.expect_punctuator(Punctuator::LParen)?;
        let params = self.with_context(self.context | Context::PARAMETERS, |p| {
            p.parse_binding_list(Punctuator::RParen, false)
        })?;
        Ok(params.into_iter().flatten().collect())
    }

    /// Parse a `{ ... }` function body and declare its parameters.
    ///
    /// A `"use strict"` directive is found by lookahead so the parameters
    /// and the name are checked under the right mode.
    pub(crate) fn parse_function_body(
        &mut self,
        params: &[Pattern],
        id: Option<&Identifier>,
        is_arrow: bool,
        is_method: bool,
    ) -> ParseResult<BlockStatement> {
        let start = self.token.start;
        if !self.check_punctuator(Punctuator::LBrace) {
            return Err(self.unexpected());
        }
        let simple = params.iter().all(Pattern::is_identifier);
        let use_strict = self.use_strict_ahead(true);
        if use_strict && !simple {
            return Err(self.early(
                start,
                "Illegal 'use strict' directive in function with non-simple parameter list",
            ));
        }

        let context = self.context.and(Context::STRICT, use_strict || self.context.is_strict()) - Context::PARAMETERS;
        let labels = std::mem::take(&mut self.labels);
        let result = self.with_context(context, |p| {
            let allow_duplicates = !p.context.is_strict() && simple && !is_arrow && !is_method;
            p.check_params(params, allow_duplicates)?;
            if let Some(id) = id {
                p.check_strict_binding(id)?;
            }

            p.advance()?;
            let mut body = Vec::new();
            while !p.check_punctuator(Punctuator::RBrace) {
                body.push(p.parse_statement_list_item(false)?);
            }
            p.advance()?;
            mark_directives(&mut body);
            Ok(BlockStatement {
                span: p.finish(start),
                body,
            })
        });
        self.labels = labels;
        result
    }

    /// Parse the parameters and body of an object or class method. The
    /// current token is `(`.
    pub(crate) fn parse_method(
        &mut self,
        generator: bool,
        is_async: bool,
        super_call: bool,
    ) -> ParseResult<Function> {
        let start = self.token.start;
        trace!(start, generator, is_async, "parsing method");

        let saved = self.take_yield_await();
        let context = self
            .context
            .function(is_async, generator)
            .and(Context::SUPER_CALL, super_call)
            | Context::SUPER_PROPERTY;
        self.scopes.enter(ScopeFlags::FUNCTION);
        let result = self.with_context(context, |p| {
            let params = p.parse_function_params()?;
            let body = p.parse_function_body(&params, None, false, true)?;
            Ok(Function {
                span: p.finish(start),
                id: None,
                params,
                body,
                is_async,
                generator,
            })
        });
        self.scopes.exit();
        self.restore_yield_await(saved);
        result
    }

    /// Finish an arrow function once `=>` has been consumed. `params` are
    /// the parsed cover elements; `rest` is a `...binding` already parsed
    /// as a pattern.
    pub(crate) fn parse_arrow_function(
        &mut self,
        start: usize,
        params: Vec<ArrayElement>,
        rest: Option<Pattern>,
        is_async: bool,
    ) -> ParseResult<Expression> {
        trace!(start, is_async, "parsing arrow function");

        let outer_in = self.context.has_in();
        let saved = self.take_yield_await();
        let context = self.context.arrow(is_async);
        self.scopes.enter(ScopeFlags::FUNCTION);
        let result = self.with_context(context, |p| {
            let params = p.to_arrow_params(params, rest)?;
            let body = if p.check_punctuator(Punctuator::LBrace) {
                ArrowFunctionBody::Block(p.parse_function_body(&params, None, true, false)?)
            } else {
                p.check_params(&params, false)?;
                let labels = std::mem::take(&mut p.labels);
                let body = p.with_context(p.context.and(Context::IN, outer_in), |p| p.parse_assignment());
                p.labels = labels;
                ArrowFunctionBody::Expression(Box::new(body?))
            };
            Ok(ArrowFunction {
                span: p.finish(start),
                params,
                body,
                is_async,
            })
        });
        self.scopes.exit();
        self.restore_yield_await(saved);
        result.map(|arrow| Expression::ArrowFunctionExpression(Box::new(arrow)))
    }

    fn to_arrow_params(&mut self, params: Vec<ArrayElement>, rest: Option<Pattern>) -> ParseResult<Vec<Pattern>> {
        let count = params.len();
        let mut patterns = Vec::with_capacity(count + 1);
        for (index, param) in params.into_iter().enumerate() {
            let pattern = match param {
                ArrayElement::Expression(expression) => self.to_binding_pattern(expression)?,
                ArrayElement::Spread(spread) => {
                    if index + 1 != count || rest.is_some() {
                        return Err(self.early(spread.span.start, "Rest element must be last element"));
                    }
                    let argument = self.to_binding_pattern(spread.argument)?;
                    if let Pattern::AssignmentPattern { span, .. } = &argument {
                        return Err(self.early(span.start, "Rest elements cannot have a default value"));
                    }
                    Pattern::RestElement {
                        span: spread.span,
                        argument: Box::new(argument),
                    }
                }
            };
            patterns.push(pattern);
        }
        patterns.extend(rest);
        Ok(patterns)
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

    fn function(program: &Program) -> &Function {
        match &program.body[0] {
            Statement::FunctionDeclaration(function) => function,
            other => panic!("Expected function declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_function_declaration() {
        let program = parse("function add(a, b = 1, ...rest) { return a + b; }");
        let function = function(&program);
        assert_eq!(function.id.as_ref().map(|id| id.name.as_str()), Some("add"));
        assert_eq!(function.params.len(), 3);
        assert!(matches!(function.params[1], Pattern::AssignmentPattern { .. }));
        assert!(matches!(function.params[2], Pattern::RestElement { .. }));
        assert_eq!((function.span.start, function.span.end), (0, 49));
        assert_eq!(function.body.span.start, 32);
    }

    #[test]
    fn test_generator_and_async_flags() {
        let program = parse("async function* f() { yield await x; }");
        let function = function(&program);
        assert!(function.is_async && function.generator);
    }

    #[test]
    fn test_body_directives() {
        let program = parse("function f() { 'use strict'; return; }");
        match &function(&program).body.body[0] {
            Statement::ExpressionStatement { directive, .. } => {
                assert_eq!(directive.as_deref(), Some("use strict"));
            }
            other => panic!("Expected directive, got {:?}", other),
        }
    }

    #[test]
    fn test_use_strict_with_non_simple_params() {
        assert!(fails("function f(a = 1) { 'use strict'; }").starts_with("Illegal 'use strict'"));
        assert!(fails("(a = 1) => { 'use strict'; }").starts_with("Illegal 'use strict'"));
    }

    #[test]
    fn test_duplicate_parameters() {
        parse("function f(a, a) {}");
        assert_eq!(fails("'use strict'; function f(a, a) {}"), "Argument name clash");
        assert_eq!(fails("function f(a, [a]) {}"), "Argument name clash");
        assert_eq!(fails("(a, a) => 1"), "Argument name clash");
        assert_eq!(fails("({ m(a, a) {} })"), "Argument name clash");
    }

    #[test]
    fn test_strict_body_checks_name_and_params() {
        assert!(fails("function eval() { 'use strict'; }").contains("eval"));
        assert!(fails("function f(arguments) { 'use strict'; }").contains("arguments"));
    }

    #[test]
    fn test_yield_in_generator_params() {
        assert!(fails("function* g(a = yield) {}").contains("Yield expression"));
        assert!(fails("async function f(a = await 1) {}").len() > 0);
    }

    #[test]
    fn test_parameter_redeclared_by_let() {
        assert!(fails("function f(a) { let a; }").contains("already been declared"));
        parse("function f(a) { var a; }");
    }

    #[test]
    fn test_return_outside_function() {
        assert!(fails("return 1;").contains("'return' outside of function"));
        parse("function f() { return 1; }");
        parse("() => { return 1; }");
    }

    #[test]
    fn test_arrow_expression_body() {
        let program = parse("x => x * 2;");
        match &program.body[0] {
            Statement::ExpressionStatement {
                expression: Expression::ArrowFunctionExpression(arrow),
                ..
            } => {
                assert_eq!(arrow.params.len(), 1);
                assert!(matches!(arrow.body, ArrowFunctionBody::Expression(_)));
                assert_eq!((arrow.span.start, arrow.span.end), (0, 10));
            }
            other => panic!("Expected arrow, got {:?}", other),
        }
    }

    #[test]
    fn test_async_arrow() {
        let program = parse("async (a, ...b) => { await a; };");
        match &program.body[0] {
            Statement::ExpressionStatement {
                expression: Expression::ArrowFunctionExpression(arrow),
                ..
            } => {
                assert!(arrow.is_async);
                assert!(matches!(arrow.params[1], Pattern::RestElement { .. }));
            }
            other => panic!("Expected arrow, got {:?}", other),
        }
        assert!(fails("async (await) => 1").contains("await"));
    }

    #[test]
    fn test_labels_do_not_cross_function_boundaries() {
        assert!(fails("a: { function f() { break a; } }").len() > 0);
    }
}
