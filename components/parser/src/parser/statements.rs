//! Statements and declarations

use super::functions::FunctionKind;
use super::{CoverGrammar, Label, LabelKind, Parser, StatementContext};
use crate::ast::*;
use crate::context::Context;
use crate::lexer::{Keyword, Punctuator, TokenKind};
use crate::scope::{BindingKind, ScopeFlags};
use core_types::ParseResult;

impl<'a> Parser<'a> {
    /// Parse a statement or declaration in a statement list
    pub(crate) fn parse_statement_list_item(&mut self, top_level: bool) -> ParseResult<Statement> {
        self.parse_statement(None, top_level)
    }

    /// Parse a statement. `context` is set when the statement is the body
    /// of another statement, where declarations are not allowed.
    pub(crate) fn parse_statement(
        &mut self,
        context: Option<StatementContext>,
        top_level: bool,
    ) -> ParseResult<Statement> {
        self.enter_nesting()?;
        let result = self.parse_statement_inner(context, top_level);
        self.depth -= 1;
        result
    }

    fn parse_statement_inner(
        &mut self,
        context: Option<StatementContext>,
        top_level: bool,
    ) -> ParseResult<Statement> {
        let start = self.token.start;

        if self.is_let_declaration(context)? {
            if context.is_some() {
                return Err(self.unexpected());
            }
            return self.parse_variable_statement(start, VariableKind::Let);
        }

        if let Some(keyword) = self.keyword() {
            match keyword {
                Keyword::Break => return self.parse_break_continue(start, true),
                Keyword::Continue => return self.parse_break_continue(start, false),
                Keyword::Debugger => {
                    self.advance()?;
                    self.consume_semicolon()?;
                    return Ok(Statement::DebuggerStatement {
                        span: self.finish(start),
                    });
                }
                Keyword::Do => return self.parse_do_while(start),
                Keyword::For => return self.parse_for(start),
                Keyword::Function => {
                    let hanging = match context {
                        None => false,
                        Some(StatementContext::If | StatementContext::Label)
                            if !self.context.is_strict() && self.context.web_compat() =>
                        {
                            true
                        }
                        Some(_) => return Err(self.unexpected()),
                    };
                    self.advance()?;
                    let kind = if hanging {
                        FunctionKind::Hanging
                    } else {
                        FunctionKind::Declaration
                    };
                    let function = self.parse_function(start, kind, false)?;
                    return Ok(Statement::FunctionDeclaration(Box::new(function)));
                }
                Keyword::Class => {
                    if context.is_some() {
                        return Err(self.unexpected());
                    }
                    let class = self.parse_class(start, super::classes::ClassKind::Declaration, Vec::new())?;
                    return Ok(Statement::ClassDeclaration(Box::new(class)));
                }
                Keyword::If => return self.parse_if(start),
                Keyword::Return => return self.parse_return(start),
                Keyword::Switch => return self.parse_switch(start),
                Keyword::Throw => return self.parse_throw(start),
                Keyword::Try => return self.parse_try(start),
                Keyword::Const | Keyword::Var => {
                    if context.is_some() && keyword == Keyword::Const {
                        return Err(self.unexpected());
                    }
                    let kind = if keyword == Keyword::Const {
                        VariableKind::Const
                    } else {
                        VariableKind::Var
                    };
                    return self.parse_variable_statement(start, kind);
                }
                Keyword::While => return self.parse_while(start),
                Keyword::With => return self.parse_with(start),
                Keyword::Import | Keyword::Export => {
                    if keyword == Keyword::Import {
                        let next = self.peek()?;
                        if next.is_punctuator(Punctuator::LParen) || next.is_punctuator(Punctuator::Dot) {
                            return self.parse_expression_statement(start, context);
                        }
                    }
                    if !top_level {
                        return Err(self.raise(start, "'import' and 'export' may only appear at the top level"));
                    }
                    if !self.context.is_module() {
                        return Err(self.raise(
                            start,
                            "'import' and 'export' may appear only with 'sourceType: module'",
                        ));
                    }
                    return if keyword == Keyword::Import {
                        self.parse_import(start)
                    } else {
                        self.parse_export(start)
                    };
                }
                _ => {}
            }
        }

        match self.punctuator() {
            Some(Punctuator::LBrace) => return Ok(Statement::BlockStatement(self.parse_block(true)?)),
            Some(Punctuator::Semicolon) => {
                self.advance()?;
                return Ok(Statement::EmptyStatement {
                    span: self.finish(start),
                });
            }
            Some(Punctuator::At) if self.context.contains(Context::NEXT) => {
                if context.is_some() {
                    return Err(self.unexpected());
                }
                let decorators = self.parse_decorators()?;
                if !self.check_keyword(Keyword::Class) {
                    return Err(self.unexpected());
                }
                let class = self.parse_class(start, super::classes::ClassKind::Declaration, decorators)?;
                return Ok(Statement::ClassDeclaration(Box::new(class)));
            }
            _ => {}
        }

        if self.is_async_function()? {
            if context.is_some() {
                return Err(self.unexpected());
            }
            self.advance()?;
            self.advance()?;
            let function = self.parse_function(start, FunctionKind::Declaration, true)?;
            return Ok(Statement::FunctionDeclaration(Box::new(function)));
        }

        self.parse_expression_statement(start, context)
    }

    /// `let` starts a declaration when followed by a binding. Inside a
    /// single-statement context only `let [` is taken as one, so that
    /// it can be rejected.
    pub(crate) fn is_let_declaration(&mut self, context: Option<StatementContext>) -> ParseResult<bool> {
        if !self.check_contextual("let") {
            return Ok(false);
        }
        let next = self.peek()?;
        if next.is_punctuator(Punctuator::LBracket) {
            return Ok(true);
        }
        if context.is_some() {
            return Ok(false);
        }
        Ok(match next.kind {
            TokenKind::Punctuator(Punctuator::LBrace) | TokenKind::Identifier(_) => true,
            TokenKind::Keyword(keyword) => !matches!(keyword, Keyword::In | Keyword::Instanceof),
            _ => false,
        })
    }

    /// `async function` with no line break in between
    pub(crate) fn is_async_function(&mut self) -> ParseResult<bool> {
        if !self.check_contextual("async") {
            return Ok(false);
        }
        let next = self.peek()?;
        Ok(next.is_keyword(Keyword::Function) && !next.newline_before)
    }

    fn parse_expression_statement(
        &mut self,
        start: usize,
        context: Option<StatementContext>,
    ) -> ParseResult<Statement> {
        let maybe_label = self.at_identifier();
        let expression = self.parse_expression()?;
        if maybe_label {
            if let Expression::Identifier(label) = &expression {
                if self.eat_punctuator(Punctuator::Colon)? {
                    let label = label.clone();
                    return self.parse_labeled(start, label, context);
                }
            }
        }
        self.consume_semicolon()?;
        Ok(Statement::ExpressionStatement {
            span: self.finish(start),
            expression,
            directive: None,
        })
    }

    // ---- declarations ----

    fn parse_variable_statement(&mut self, start: usize, kind: VariableKind) -> ParseResult<Statement> {
        self.advance()?;
        let declarations = self.parse_declarators(kind, false)?;
        self.consume_semicolon()?;
        Ok(Statement::VariableDeclaration(VariableDeclaration {
            span: self.finish(start),
            kind,
            declarations,
        }))
    }

    /// Comma-separated declarators after `var`/`let`/`const`.
    ///
    /// In a for head an initializer may be missing, the in/of check
    /// happens afterwards.
    fn parse_declarators(&mut self, kind: VariableKind, in_for: bool) -> ParseResult<Vec<VariableDeclarator>> {
        let binding = if kind == VariableKind::Var {
            BindingKind::Var
        } else {
            BindingKind::Lexical
        };
        let mut declarations = Vec::new();
        loop {
            let start = self.token.start;
            let id = self.parse_binding_atom()?;
            self.declare_pattern(&id, binding)?;
            let init = if self.eat_punctuator(Punctuator::Assign)? {
                Some(self.parse_assignment()?)
            } else {
                let for_in_of = in_for && (self.check_keyword(Keyword::In) || self.check_contextual("of"));
                if kind == VariableKind::Const && !for_in_of {
                    return Err(self.raise(self.token.start, "Missing initializer in const declaration"));
                }
                if !id.is_identifier() && !for_in_of {
                    return Err(self.raise(
                        self.token.start,
                        "Complex binding patterns require an initialization value",
                    ));
                }
                None
            };
            declarations.push(VariableDeclarator {
                span: self.finish(start),
                id,
                init,
            });
            if !self.eat_punctuator(Punctuator::Comma)? {
                break;
            }
        }
        Ok(declarations)
    }

    // ---- blocks ----

    /// `{ statements }`, in a new block scope unless the caller has
    /// already opened one
    pub(crate) fn parse_block(&mut self, new_scope: bool) -> ParseResult<BlockStatement> {
        let start = self.token.start;
        self.expect_punctuator(Punctuator::LBrace)?;
        if new_scope {
            self.scopes.enter(ScopeFlags::empty());
        }
        let mut body = Vec::new();
        while !self.check_punctuator(Punctuator::RBrace) {
            body.push(self.parse_statement_list_item(false)?);
        }
        self.advance()?;
        if new_scope {
            self.scopes.exit();
        }
        Ok(BlockStatement {
            span: self.finish(start),
            body,
        })
    }

    /// `( expression )` of `if`, `while`, `switch` and `with`
    fn parse_paren_expression(&mut self) -> ParseResult<Expression> {
        self.expect_punctuator(Punctuator::LParen)?;
        let expression = self.with_context(self.context | Context::IN, |p| p.parse_expression())?;
        self.expect_punctuator(Punctuator::RParen)?;
        Ok(expression)
    }

    // ---- control flow ----

    /// `else if` chains are read in a loop, so their length does not count
    /// towards the nesting limit.
    fn parse_if(&mut self, start: usize) -> ParseResult<Statement> {
        let (test, consequent) = self.parse_if_branch()?;
        let mut chain = Vec::new();
        let mut alternate = None;
        while self.eat_keyword(Keyword::Else)? {
            if !self.check_keyword(Keyword::If) {
                alternate = Some(Box::new(self.parse_statement(Some(StatementContext::If), false)?));
                break;
            }
            let branch_start = self.token.start;
            let (test, consequent) = self.parse_if_branch()?;
            chain.push((branch_start, test, consequent));
        }

        for (branch_start, test, consequent) in chain.into_iter().rev() {
            alternate = Some(Box::new(Statement::IfStatement {
                span: self.finish(branch_start),
                test,
                consequent: Box::new(consequent),
                alternate,
            }));
        }
        Ok(Statement::IfStatement {
            span: self.finish(start),
            test,
            consequent: Box::new(consequent),
            alternate,
        })
    }

    /// `if (test) consequent`, starting at `if`
    fn parse_if_branch(&mut self) -> ParseResult<(Expression, Statement)> {
        self.advance()?;
        let test = self.parse_paren_expression()?;
        let consequent = self.parse_statement(Some(StatementContext::If), false)?;
        Ok((test, consequent))
    }

    fn parse_return(&mut self, start: usize) -> ParseResult<Statement> {
        if !self.context.contains(Context::RETURN) {
            return Err(self.raise(start, "'return' outside of function"));
        }
        self.advance()?;
        let argument = if self.eat_punctuator(Punctuator::Semicolon)? || self.can_insert_semicolon() {
            None
        } else {
            let argument = self.parse_expression()?;
            self.consume_semicolon()?;
            Some(argument)
        };
        Ok(Statement::ReturnStatement {
            span: self.finish(start),
            argument,
        })
    }

    fn parse_throw(&mut self, start: usize) -> ParseResult<Statement> {
        self.advance()?;
        if self.token.newline_before {
            return Err(self.raise(self.prev_end, "Illegal newline after throw"));
        }
        let argument = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::ThrowStatement {
            span: self.finish(start),
            argument,
        })
    }

    fn parse_try(&mut self, start: usize) -> ParseResult<Statement> {
        self.advance()?;
        let block = self.parse_block(true)?;

        let handler = if self.check_keyword(Keyword::Catch) {
            let catch_start = self.token.start;
            self.advance()?;
            let param = if self.eat_punctuator(Punctuator::LParen)? {
                let param = self.parse_binding_atom()?;
                let simple = param.is_identifier();
                if simple {
                    self.scopes.enter(ScopeFlags::SIMPLE_CATCH);
                    self.declare_pattern(&param, BindingKind::SimpleCatch)?;
                } else {
                    self.scopes.enter(ScopeFlags::empty());
                    self.declare_pattern(&param, BindingKind::Lexical)?;
                }
                self.expect_punctuator(Punctuator::RParen)?;
                Some(param)
            } else {
                self.scopes.enter(ScopeFlags::empty());
                None
            };
            // The body shares the parameter's scope.
            let body = self.parse_block(false)?;
            self.scopes.exit();
            Some(CatchClause {
                span: self.finish(catch_start),
                param,
                body,
            })
        } else {
            None
        };

        let finalizer = if self.eat_keyword(Keyword::Finally)? {
            Some(self.parse_block(true)?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.raise(self.token.start, "Missing catch or finally after try"));
        }
        Ok(Statement::TryStatement {
            span: self.finish(start),
            block,
            handler,
            finalizer,
        })
    }

    fn parse_switch(&mut self, start: usize) -> ParseResult<Statement> {
        self.advance()?;
        let discriminant = self.parse_paren_expression()?;
        self.expect_punctuator(Punctuator::LBrace)?;
        self.labels.push(Label {
            name: None,
            kind: LabelKind::Switch,
            statement_start: start,
        });
        self.scopes.enter(ScopeFlags::empty());
        let cases = self.parse_switch_cases();
        self.scopes.exit();
        self.labels.pop();
        Ok(Statement::SwitchStatement {
            span: self.finish(start),
            discriminant,
            cases: cases?,
        })
    }

    fn parse_switch_cases(&mut self) -> ParseResult<Vec<SwitchCase>> {
        let mut cases = Vec::new();
        let mut has_default = false;
        while !self.eat_punctuator(Punctuator::RBrace)? {
            let start = self.token.start;
            let test = if self.eat_keyword(Keyword::Case)? {
                Some(self.with_context(self.context | Context::IN, |p| p.parse_expression())?)
            } else if self.check_keyword(Keyword::Default) {
                if has_default {
                    return Err(self.early(start, "Multiple default clauses"));
                }
                has_default = true;
                self.advance()?;
                None
            } else {
                return Err(self.unexpected());
            };
            self.expect_punctuator(Punctuator::Colon)?;

            let mut consequent = Vec::new();
            while !self.check_punctuator(Punctuator::RBrace)
                && !self.check_keyword(Keyword::Case)
                && !self.check_keyword(Keyword::Default)
            {
                consequent.push(self.parse_statement_list_item(false)?);
            }
            cases.push(SwitchCase {
                span: self.finish(start),
                test,
                consequent,
            });
        }
        Ok(cases)
    }

    fn parse_with(&mut self, start: usize) -> ParseResult<Statement> {
        if self.context.is_strict() {
            return Err(self.raise(start, "'with' in strict mode"));
        }
        self.advance()?;
        let object = self.parse_paren_expression()?;
        let body = self.parse_statement(Some(StatementContext::Nested), false)?;
        Ok(Statement::WithStatement {
            span: self.finish(start),
            object,
            body: Box::new(body),
        })
    }

    // ---- loops ----

    /// Parse a loop body with an unnamed loop entry on the label stack
    fn parse_loop_body(&mut self) -> ParseResult<Statement> {
        self.labels.push(Label {
            name: None,
            kind: LabelKind::Loop,
            statement_start: self.token.start,
        });
        let body = self.parse_statement(Some(StatementContext::Nested), false);
        self.labels.pop();
        body
    }

    fn parse_while(&mut self, start: usize) -> ParseResult<Statement> {
        self.advance()?;
        let test = self.parse_paren_expression()?;
        let body = self.parse_loop_body()?;
        Ok(Statement::WhileStatement {
            span: self.finish(start),
            test,
            body: Box::new(body),
        })
    }

    fn parse_do_while(&mut self, start: usize) -> ParseResult<Statement> {
        self.advance()?;
        let body = self.parse_loop_body()?;
        self.expect_keyword(Keyword::While)?;
        let test = self.parse_paren_expression()?;
        self.eat_punctuator(Punctuator::Semicolon)?;
        Ok(Statement::DoWhileStatement {
            span: self.finish(start),
            body: Box::new(body),
            test,
        })
    }

    fn parse_for(&mut self, start: usize) -> ParseResult<Statement> {
        self.advance()?;
        let await_start = self.token.start;
        let is_await = if self.check_keyword(Keyword::Await) && self.context.has_await() {
            if self.token.escaped {
                return Err(self.raise(await_start, "Keyword must not contain escaped characters"));
            }
            self.advance()?;
            true
        } else {
            false
        };
        self.scopes.enter(ScopeFlags::empty());
        let statement = self.parse_for_head(start, is_await, await_start);
        self.scopes.exit();
        statement
    }

    fn parse_for_head(&mut self, start: usize, is_await: bool, await_start: usize) -> ParseResult<Statement> {
        self.expect_punctuator(Punctuator::LParen)?;
        if self.check_punctuator(Punctuator::Semicolon) {
            if is_await {
                return Err(self.raise(await_start, "Unexpected token"));
            }
            return self.parse_for_rest(start, None);
        }

        let is_let = self.is_let_declaration(None)?;
        if is_let || self.check_keyword(Keyword::Var) || self.check_keyword(Keyword::Const) {
            let declaration_start = self.token.start;
            let kind = if is_let {
                VariableKind::Let
            } else if self.check_keyword(Keyword::Var) {
                VariableKind::Var
            } else {
                VariableKind::Const
            };
            self.advance()?;
            let declarations = self.with_context(self.context - Context::IN, |p| p.parse_declarators(kind, true))?;
            let declaration = VariableDeclaration {
                span: self.finish(declaration_start),
                kind,
                declarations,
            };
            let in_of = self.check_keyword(Keyword::In) || self.check_contextual("of");
            if in_of && declaration.declarations.len() == 1 {
                if is_await && self.check_keyword(Keyword::In) {
                    return Err(self.raise(await_start, "Unexpected token"));
                }
                self.check_for_declaration_init(&declaration)?;
                return self.parse_for_in_of(start, ForInOfLeft::VariableDeclaration(declaration), is_await);
            }
            if is_await {
                return Err(self.raise(await_start, "Unexpected token"));
            }
            return self.parse_for_rest(start, Some(ForInit::VariableDeclaration(declaration)));
        }

        let starts_with_let = self.check_contextual("let");
        let escaped = self.token.escaped;
        let init_start = self.token.start;
        let mut cover = CoverGrammar::default();
        let init = self.with_context(self.context - Context::IN, |p| {
            if is_await {
                p.parse_left_hand_side(Some(&mut cover))
            } else {
                p.parse_expression_with(Some(&mut cover))
            }
        })?;

        let is_of = self.check_contextual("of");
        if self.check_keyword(Keyword::In) || is_of {
            if is_await {
                if !is_of {
                    return Err(self.raise(await_start, "Unexpected token"));
                }
            } else if is_of
                && !escaped
                && matches!(&init, Expression::Identifier(id) if id.name == "async" && id.span.start == init_start)
            {
                return Err(self.raise(init_start, "The left-hand side of a for-of loop may not be 'async'."));
            }
            if starts_with_let && is_of {
                return Err(self.raise(init_start, "The left-hand side of a for-of loop may not start with let."));
            }
            let target = self.to_assignment_target(init, Some(&cover))?;
            return self.parse_for_in_of(start, ForInOfLeft::Pattern(target), is_await);
        }
        self.check_expression_errors(&cover)?;
        if is_await {
            return Err(self.raise(await_start, "Unexpected token"));
        }
        self.parse_for_rest(start, Some(ForInit::Expression(init)))
    }

    /// A for-in/of declaration may have an initializer only as the
    /// web-compatible `for (var x = 1 in o)` of sloppy code.
    fn check_for_declaration_init(&self, declaration: &VariableDeclaration) -> ParseResult<()> {
        let declarator = &declaration.declarations[0];
        if declarator.init.is_none() {
            return Ok(());
        }
        let allowed = self.check_keyword(Keyword::In)
            && !self.context.is_strict()
            && self.context.web_compat()
            && declaration.kind == VariableKind::Var
            && declarator.id.is_identifier();
        if allowed {
            return Ok(());
        }
        let loop_kind = if self.check_keyword(Keyword::In) { "for-in" } else { "for-of" };
        Err(self.raise(
            declaration.span.start,
            format!("{} loop variable declaration may not have an initializer", loop_kind),
        ))
    }

    fn parse_for_rest(&mut self, start: usize, init: Option<ForInit>) -> ParseResult<Statement> {
        self.expect_punctuator(Punctuator::Semicolon)?;
        let test = if self.check_punctuator(Punctuator::Semicolon) {
            None
        } else {
            Some(self.with_context(self.context | Context::IN, |p| p.parse_expression())?)
        };
        self.expect_punctuator(Punctuator::Semicolon)?;
        let update = if self.check_punctuator(Punctuator::RParen) {
            None
        } else {
            Some(self.with_context(self.context | Context::IN, |p| p.parse_expression())?)
        };
        self.expect_punctuator(Punctuator::RParen)?;
        let body = self.parse_loop_body()?;
        Ok(Statement::ForStatement {
            span: self.finish(start),
            init,
            test,
            update,
            body: Box::new(body),
        })
    }

    fn parse_for_in_of(&mut self, start: usize, left: ForInOfLeft, is_await: bool) -> ParseResult<Statement> {
        let is_in = self.check_keyword(Keyword::In);
        self.advance()?;
        let right = self.with_context(self.context | Context::IN, |p| {
            if is_in {
                p.parse_expression()
            } else {
                p.parse_assignment()
            }
        })?;
        self.expect_punctuator(Punctuator::RParen)?;
        let body = Box::new(self.parse_loop_body()?);
        let span = self.finish(start);
        Ok(if is_in {
            Statement::ForInStatement { span, left, right, body }
        } else {
            Statement::ForOfStatement {
                span,
                left,
                right,
                body,
                is_await,
            }
        })
    }

    // ---- labels ----

    fn parse_labeled(
        &mut self,
        start: usize,
        label: Identifier,
        context: Option<StatementContext>,
    ) -> ParseResult<Statement> {
        if self.labels.iter().any(|entry| entry.name.as_deref() == Some(label.name.as_str())) {
            return Err(self.early(label.span.start, format!("Label '{}' is already declared", label.name)));
        }
        let kind = match self.keyword() {
            Some(Keyword::Do | Keyword::For | Keyword::While) => LabelKind::Loop,
            Some(Keyword::Switch) => LabelKind::Switch,
            _ => LabelKind::Plain,
        };
        // `a: b: while (...)` makes `a` a loop label too.
        let body_start = self.token.start;
        for entry in self.labels.iter_mut().rev() {
            if entry.statement_start != start {
                break;
            }
            entry.statement_start = body_start;
            entry.kind = kind;
        }
        self.labels.push(Label {
            name: Some(label.name.clone()),
            kind,
            statement_start: body_start,
        });
        let body_context = match context {
            None | Some(StatementContext::Label) => StatementContext::Label,
            Some(_) => StatementContext::Nested,
        };
        let body = self.parse_statement(Some(body_context), false);
        self.labels.pop();
        Ok(Statement::LabeledStatement {
            span: self.finish(start),
            label,
            body: Box::new(body?),
        })
    }

    fn parse_break_continue(&mut self, start: usize, is_break: bool) -> ParseResult<Statement> {
        self.advance()?;
        let label = if self.eat_punctuator(Punctuator::Semicolon)? || self.can_insert_semicolon() {
            None
        } else if !self.at_identifier() {
            return Err(self.unexpected());
        } else {
            let label = self.parse_identifier()?;
            self.consume_semicolon()?;
            Some(label)
        };

        let found = self.labels.iter().any(|entry| {
            let matches = match &label {
                None => true,
                Some(label) => entry.name.as_deref() == Some(label.name.as_str()),
            };
            matches
                && ((entry.kind != LabelKind::Plain && (is_break || entry.kind == LabelKind::Loop))
                    || (label.is_some() && is_break))
        });
        if !found {
            let keyword = if is_break { "break" } else { "continue" };
            return Err(self.raise(start, format!("Unsyntactic {}", keyword)));
        }

        let span = self.finish(start);
        Ok(if is_break {
            Statement::BreakStatement { span, label }
        } else {
            Statement::ContinueStatement { span, label }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse_with(source: &str, options: &ParseOptions) -> Result<Program, String> {
        Parser::new(source, options).parse_program().map_err(|err| err.message)
    }

    fn parse(source: &str) -> Program {
        parse_with(source, &ParseOptions::default())
            .unwrap_or_else(|err| panic!("Failed to parse {:?}: {}", source, err))
    }

    fn fails(source: &str) -> String {
        match parse_with(source, &ParseOptions::default()) {
            Ok(program) => panic!("Expected error for {:?}, got {:?}", source, program),
            Err(message) => message,
        }
    }

    #[test]
    fn test_variable_declarations() {
        let program = parse("var a = 1, b; let [c] = d; const { e } = f;");
        let kinds: Vec<_> = program
            .body
            .iter()
            .map(|statement| match statement {
                Statement::VariableDeclaration(declaration) => declaration.kind,
                other => panic!("Expected declaration, got {:?}", other),
            })
            .collect();
        assert_eq!(kinds, vec![VariableKind::Var, VariableKind::Let, VariableKind::Const]);
    }

    #[test]
    fn test_declaration_errors() {
        assert_eq!(fails("const a;"), "Missing initializer in const declaration");
        assert_eq!(fails("let [a];"), "Complex binding patterns require an initialization value");
        assert!(fails("let a; let a;").contains("already been declared"));
        assert!(fails("let let = 1;").contains("let is disallowed"));
        assert!(fails("var a; let a;").contains("already been declared"));
        parse("var a; var a;");
    }

    #[test]
    fn test_let_as_identifier() {
        let program = parse("let = 1; let\nfoo;");
        assert!(matches!(program.body[0], Statement::ExpressionStatement { .. }));
        assert!(matches!(program.body[1], Statement::VariableDeclaration(_)));
        assert!(fails("if (a) let [b] = c;").len() > 0);
        parse("if (a) let\nb");
    }

    #[test]
    fn test_return_without_newline_argument() {
        let program = parse("function f() { return\n42 }");
        match &program.body[0] {
            Statement::FunctionDeclaration(function) => {
                assert_eq!(function.body.body.len(), 2);
                assert!(matches!(function.body.body[0], Statement::ReturnStatement { argument: None, .. }));
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_throw_newline() {
        assert_eq!(fails("throw\nx;"), "Illegal newline after throw");
    }

    #[test]
    fn test_if_else_and_annex_b_functions() {
        let program = parse("if (a) b; else c;");
        assert!(matches!(program.body[0], Statement::IfStatement { alternate: Some(_), .. }));
        parse("if (a) function f() {}");
        parse("a: function f() {}");
        assert!(fails("'use strict'; if (a) function f() {}").len() > 0);
        assert!(fails("while (a) function f() {}").len() > 0);
        assert!(fails("if (a) function* g() {}").len() > 0);
        assert!(fails("if (a) async function f() {}").len() > 0);
        assert!(fails("if (a) class A {}").len() > 0);
        let strict_web = ParseOptions::default().with_disable_web_compat(true);
        assert!(parse_with("if (a) function f() {}", &strict_web).is_err());
    }

    #[test]
    fn test_else_if_chain() {
        let program = parse("if (a) x; else if (b) y; else z;");
        let Statement::IfStatement { span, alternate, .. } = &program.body[0] else {
            panic!("Expected if statement");
        };
        assert_eq!((span.start, span.end), (0, 32));
        match alternate.as_deref() {
            Some(Statement::IfStatement { span, alternate, .. }) => {
                assert_eq!((span.start, span.end), (15, 32));
                assert!(matches!(alternate.as_deref(), Some(Statement::ExpressionStatement { .. })));
            }
            other => panic!("Expected else if, got {:?}", other),
        }

        assert!(fails("if (a) x; else if (b) function* g() {}").len() > 0);
    }

    #[test]
    fn test_long_else_if_chain_is_not_nesting() {
        let branches = 20_000;
        let source = format!("if (a) x;{} else y;", " else if (a) x;".repeat(branches));
        let depth = std::thread::Builder::new()
            .stack_size(64 * 1024 * 1024)
            .spawn(move || {
                let program = parse(&source);
                let mut depth = 0;
                let mut node = &program.body[0];
                while let Statement::IfStatement { alternate: Some(alternate), .. } = node {
                    depth += 1;
                    node = &**alternate;
                }
                assert!(matches!(node, Statement::ExpressionStatement { .. }));
                depth
            })
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(depth, branches + 1);
    }

    #[test]
    fn test_for_statements() {
        parse("for (;;) break;");
        parse("for (var i = 0, j; i < 10; i++) {}");
        parse("for (let x in o) {}");
        parse("for (const x of xs) {}");
        parse("for ([a, b] of c) {}");
        parse("for (a.b in c) {}");
        parse("for (let in o) {}");
        parse("for (var a = 1 in b) {}");
        parse("for (x of [1, 2]) ;");
    }

    #[test]
    fn test_for_errors() {
        assert!(fails("for (let of x) {}").len() > 0);
        assert!(fails("for (let.x of y) {}").contains("may not start with let"));
        assert!(fails("for (async of x) {}").len() > 0);
        assert!(fails("for (let a = 1 in b) {}").contains("initializer"));
        assert!(fails("'use strict'; for (var a = 1 in b) {}").contains("initializer"));
        assert!(fails("for (var a, b of c) {}").len() > 0);
        assert!(fails("for (const a;;) {}").contains("Missing initializer"));
        assert!(fails("for await (x of y) {}").len() > 0);
    }

    #[test]
    fn test_for_await() {
        let program = parse("async function f() { for await (const x of y) {} }");
        match &program.body[0] {
            Statement::FunctionDeclaration(function) => {
                assert!(matches!(function.body.body[0], Statement::ForOfStatement { is_await: true, .. }));
            }
            other => panic!("Expected function, got {:?}", other),
        }
        parse_with("for await (const x of y) {}", &ParseOptions::default().with_module(true))
            .unwrap_or_else(|err| panic!("{}", err));
        assert!(fails("async function f() { for await (x in y) {} }").len() > 0);
    }

    #[test]
    fn test_do_while_semicolon_is_optional() {
        let program = parse("do x; while (y) z;");
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_switch() {
        let program = parse("switch (x) { case 1: a; break; default: b; case 2: }");
        match &program.body[0] {
            Statement::SwitchStatement { cases, .. } => {
                assert_eq!(cases.len(), 3);
                assert!(cases[1].test.is_none());
                assert!(cases[2].consequent.is_empty());
            }
            other => panic!("Expected switch, got {:?}", other),
        }
        assert_eq!(fails("switch (x) { default: default: }"), "Multiple default clauses");
        assert!(fails("switch (x) { case 1: let a; case 2: let a; }").contains("already been declared"));
    }

    #[test]
    fn test_try_catch() {
        parse("try {} catch {}");
        parse("try {} catch ({ message }) {} finally {}");
        parse("try {} catch (e) { var e; }");
        assert!(fails("try {} catch (e) { let e; }").contains("already been declared"));
        assert!(fails("try {}").contains("Missing catch or finally"));
    }

    #[test]
    fn test_labels() {
        parse("a: while (x) { continue a; }");
        parse("a: b: for (;;) { continue a; }");
        parse("a: { break a; }");
        parse("switch (x) { case 1: break; }");
        assert!(fails("a: a: x;").contains("already declared"));
        assert!(fails("a: { continue a; }").contains("Unsyntactic continue"));
        assert!(fails("break;").contains("Unsyntactic break"));
        assert!(fails("while (x) { break b; }").contains("Unsyntactic break"));
        assert!(fails("switch (x) { case 1: continue; }").contains("Unsyntactic continue"));
    }

    #[test]
    fn test_with_statement() {
        parse("with (a) b;");
        assert_eq!(fails("'use strict'; with (a) b;"), "'with' in strict mode");
    }

    #[test]
    fn test_expression_statement_spans() {
        let program = parse("a = 1;\nb");
        assert_eq!((program.body[0].span().start, program.body[0].span().end), (0, 6));
        assert_eq!((program.body[1].span().start, program.body[1].span().end), (7, 8));
    }

    #[test]
    fn test_asi_required_between_statements() {
        assert!(fails("a b").starts_with("Unexpected token"));
        parse("a\nb");
        parse("{ a } b");
    }

    #[test]
    fn test_block_scoped_functions() {
        parse("{ function f() {} function f() {} }");
        assert!(fails("'use strict'; { function f() {} function f() {} }").contains("already been declared"));
        assert!(fails("{ function f() {} let f; }").contains("already been declared"));
    }

    #[test]
    fn test_import_export_placement() {
        assert!(fails("import a from 'a';").contains("sourceType: module"));
        let module = ParseOptions::default().with_module(true);
        assert!(parse_with("{ export var a; }", &module)
            .unwrap_err()
            .contains("top level"));
        parse("import('a');");
    }
}
