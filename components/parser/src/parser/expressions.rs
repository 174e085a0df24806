//! Expression parsing
//!
//! Precedence climbing for binary operators, recursive descent for the
//! rest. Object and array literals, parenthesized lists and call argument
//! lists may later be reinterpreted as patterns, so the pattern-only
//! syntax they contain is recorded in a [`CoverGrammar`] instead of being
//! rejected on the spot.

use super::{has_expression_errors, CoverGrammar, Parser};
use crate::ast::*;
use crate::context::Context;
use crate::lexer::{is_strict_reserved_word, Keyword, LexGoal, Punctuator, TokenKind};
use core_types::ParseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InfixOperator {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

enum PrefixOperator {
    Unary(UnaryOperator),
    Update(UpdateOperator),
}

impl<'a> Parser<'a> {
    /// Parse an expression, including comma sequences
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression_with(None)
    }

    pub(crate) fn parse_expression_with(
        &mut self,
        mut cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Expression> {
        let start = self.token.start;
        let first = self.parse_assignment_with(cover.as_deref_mut())?;
        if !self.check_punctuator(Punctuator::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat_punctuator(Punctuator::Comma)? {
            expressions.push(self.parse_assignment_with(cover.as_deref_mut())?);
        }
        Ok(Expression::SequenceExpression {
            span: self.finish(start),
            expressions,
        })
    }

    /// Parse an AssignmentExpression
    pub(crate) fn parse_assignment(&mut self) -> ParseResult<Expression> {
        self.parse_assignment_with(None)
    }

    pub(crate) fn parse_assignment_with(
        &mut self,
        cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Expression> {
        self.enter_nesting()?;
        let result = self.parse_assignment_inner(cover);
        self.depth -= 1;
        result
    }

    fn parse_assignment_inner(&mut self, cover: Option<&mut CoverGrammar>) -> ParseResult<Expression> {
        if self.check_keyword(Keyword::Yield) && self.context.has_yield() {
            return self.parse_yield();
        }

        let owned = cover.is_none();
        let mut own = CoverGrammar::default();
        let cover = match cover {
            Some(cover) => cover,
            None => &mut own,
        };
        let old_trailing_comma = cover.trailing_comma.take();
        let old_double_proto = cover.double_proto;

        let start = self.token.start;
        if self.check_punctuator(Punctuator::LParen) || self.at_identifier() {
            self.potential_arrow_at = Some(start);
        }
        let left = self.parse_conditional(Some(&mut *cover))?;

        if let Some(operator) = self.assignment_operator() {
            let target = if operator == AssignmentOperator::Assign {
                self.to_assignment_target(left, Some(&*cover))?
            } else {
                self.to_simple_target(left)?
            };
            if !owned {
                cover.double_proto = None;
                cover.parenthesized_bind = None;
            }
            if cover.shorthand_assign.is_some_and(|offset| offset >= start) {
                cover.shorthand_assign = None;
            }
            self.advance()?;
            let right = self.parse_assignment()?;
            if old_double_proto.is_some() {
                cover.double_proto = old_double_proto;
            }
            if old_trailing_comma.is_some() {
                cover.trailing_comma = old_trailing_comma;
            }
            return Ok(Expression::AssignmentExpression {
                span: self.finish(start),
                operator,
                left: Box::new(target),
                right: Box::new(right),
            });
        }

        if owned {
            self.check_expression_errors(cover)?;
        }
        if old_trailing_comma.is_some() {
            cover.trailing_comma = old_trailing_comma;
        }
        Ok(left)
    }

    fn assignment_operator(&self) -> Option<AssignmentOperator> {
        let operator = match self.punctuator()? {
            Punctuator::Assign => AssignmentOperator::Assign,
            Punctuator::PlusEq => AssignmentOperator::AddAssign,
            Punctuator::MinusEq => AssignmentOperator::SubAssign,
            Punctuator::StarEq => AssignmentOperator::MulAssign,
            Punctuator::SlashEq => AssignmentOperator::DivAssign,
            Punctuator::PercentEq => AssignmentOperator::ModAssign,
            Punctuator::StarStarEq => AssignmentOperator::ExpAssign,
            Punctuator::AndEq => AssignmentOperator::BitAndAssign,
            Punctuator::OrEq => AssignmentOperator::BitOrAssign,
            Punctuator::XorEq => AssignmentOperator::BitXorAssign,
            Punctuator::LtLtEq => AssignmentOperator::LeftShiftAssign,
            Punctuator::GtGtEq => AssignmentOperator::RightShiftAssign,
            Punctuator::GtGtGtEq => AssignmentOperator::UnsignedRightShiftAssign,
            Punctuator::AndAndEq => AssignmentOperator::LogicalAndAssign,
            Punctuator::OrOrEq => AssignmentOperator::LogicalOrAssign,
            Punctuator::NullishCoalesceEq => AssignmentOperator::NullishCoalesceAssign,
            _ => return None,
        };
        Some(operator)
    }

    fn parse_yield(&mut self) -> ParseResult<Expression> {
        let start = self.token.start;
        if self.token.escaped {
            return Err(self.raise(start, "Keyword must not contain escaped characters"));
        }
        if self.context.contains(Context::PARAMETERS) {
            return Err(self.early(start, "Yield expression cannot be a default value"));
        }
        if self.yield_pos.is_none() {
            self.yield_pos = Some(start);
        }
        self.advance()?;

        let no_argument = self.check_punctuator(Punctuator::Semicolon)
            || self.can_insert_semicolon()
            || (!self.check_punctuator(Punctuator::Star) && !self.starts_expression());
        let (delegate, argument) = if no_argument {
            (false, None)
        } else {
            let delegate = self.eat_punctuator(Punctuator::Star)?;
            (delegate, Some(Box::new(self.parse_assignment()?)))
        };
        Ok(Expression::YieldExpression {
            span: self.finish(start),
            argument,
            delegate,
        })
    }

    fn parse_conditional(&mut self, mut cover: Option<&mut CoverGrammar>) -> ParseResult<Expression> {
        let start = self.token.start;
        let test = self.parse_binary(cover.as_deref_mut())?;
        if has_expression_errors(&cover) || matches!(test, Expression::ArrowFunctionExpression(_)) {
            return Ok(test);
        }
        if !self.eat_punctuator(Punctuator::Question)? {
            return Ok(test);
        }
        let consequent = self.with_context(self.context | Context::IN, |p| p.parse_assignment())?;
        self.expect_punctuator(Punctuator::Colon)?;
        let alternate = self.parse_assignment()?;
        Ok(Expression::ConditionalExpression {
            span: self.finish(start),
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    fn parse_binary(&mut self, mut cover: Option<&mut CoverGrammar>) -> ParseResult<Expression> {
        let start = self.token.start;
        let left = self.parse_unary(cover.as_deref_mut(), false, false)?;
        if has_expression_errors(&cover) {
            return Ok(left);
        }
        if matches!(left, Expression::ArrowFunctionExpression(_)) {
            return Ok(left);
        }
        self.parse_binary_operator(left, start, 0)
    }

    fn infix_operator(&self) -> Option<(InfixOperator, u8)> {
        use BinaryOperator as B;
        use InfixOperator::{Binary, Logical};
        if self.check_keyword(Keyword::In) {
            return self.context.has_in().then_some((Binary(B::In), 7));
        }
        if self.check_keyword(Keyword::Instanceof) {
            return Some((Binary(B::Instanceof), 7));
        }
        let operator = match self.punctuator()? {
            Punctuator::NullishCoalesce => (Logical(LogicalOperator::NullishCoalesce), 1),
            Punctuator::OrOr => (Logical(LogicalOperator::Or), 1),
            Punctuator::AndAnd => (Logical(LogicalOperator::And), 2),
            Punctuator::Or => (Binary(B::BitwiseOr), 3),
            Punctuator::Xor => (Binary(B::BitwiseXor), 4),
            Punctuator::And => (Binary(B::BitwiseAnd), 5),
            Punctuator::EqEq => (Binary(B::Eq), 6),
            Punctuator::NotEq => (Binary(B::NotEq), 6),
            Punctuator::EqEqEq => (Binary(B::StrictEq), 6),
            Punctuator::NotEqEq => (Binary(B::StrictNotEq), 6),
            Punctuator::Lt => (Binary(B::Lt), 7),
            Punctuator::Gt => (Binary(B::Gt), 7),
            Punctuator::LtEq => (Binary(B::LtEq), 7),
            Punctuator::GtEq => (Binary(B::GtEq), 7),
            Punctuator::LtLt => (Binary(B::LeftShift), 8),
            Punctuator::GtGt => (Binary(B::RightShift), 8),
            Punctuator::GtGtGt => (Binary(B::UnsignedRightShift), 8),
            Punctuator::Plus => (Binary(B::Add), 9),
            Punctuator::Minus => (Binary(B::Sub), 9),
            Punctuator::Star => (Binary(B::Mul), 10),
            Punctuator::Slash => (Binary(B::Div), 10),
            Punctuator::Percent => (Binary(B::Mod), 10),
            _ => return None,
        };
        Some(operator)
    }

    /// Folds operators binding tighter than `min_precedence` into `left`.
    /// Left-associative chains loop; only a tighter right operand recurses.
    fn parse_binary_operator(
        &mut self,
        mut left: Expression,
        left_start: usize,
        min_precedence: u8,
    ) -> ParseResult<Expression> {
        loop {
            let Some((operator, precedence)) = self.infix_operator() else {
                return Ok(left);
            };
            if precedence <= min_precedence {
                return Ok(left);
            }

            let coalesce = operator == InfixOperator::Logical(LogicalOperator::NullishCoalesce);
            let logical = matches!(
                operator,
                InfixOperator::Logical(LogicalOperator::And | LogicalOperator::Or)
            );
            // `??` binds its right operand at the level of `&&`
            let right_precedence = if coalesce { 2 } else { precedence };

            self.advance()?;
            let right_start = self.token.start;
            let operand = self.parse_unary(None, false, false)?;
            let right = self.parse_binary_operator(operand, right_start, right_precedence)?;
            if let Expression::PrivateIdentifier(id) = &right {
                return Err(self.raise(
                    id.span.start,
                    "Private identifier can only be left side of binary expression",
                ));
            }

            let span = self.finish(left_start);
            let node = match operator {
                InfixOperator::Binary(operator) => Expression::BinaryExpression {
                    span,
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                InfixOperator::Logical(operator) => Expression::LogicalExpression {
                    span,
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            };

            let mixed = (logical && self.check_punctuator(Punctuator::NullishCoalesce))
                || (coalesce
                    && (self.check_punctuator(Punctuator::AndAnd) || self.check_punctuator(Punctuator::OrOr)));
            if mixed {
                return Err(self.raise(
                    self.token.start,
                    "Logical expressions and coalesce expressions cannot be mixed. Wrap either by parentheses",
                ));
            }
            left = node;
        }
    }

    fn prefix_operator(&self) -> Option<PrefixOperator> {
        if let Some(keyword) = self.keyword() {
            let operator = match keyword {
                Keyword::Typeof => UnaryOperator::Typeof,
                Keyword::Void => UnaryOperator::Void,
                Keyword::Delete => UnaryOperator::Delete,
                _ => return None,
            };
            return Some(PrefixOperator::Unary(operator));
        }
        let operator = match self.punctuator()? {
            Punctuator::Minus => PrefixOperator::Unary(UnaryOperator::Minus),
            Punctuator::Plus => PrefixOperator::Unary(UnaryOperator::Plus),
            Punctuator::Not => PrefixOperator::Unary(UnaryOperator::Not),
            Punctuator::Tilde => PrefixOperator::Unary(UnaryOperator::BitwiseNot),
            Punctuator::PlusPlus => PrefixOperator::Update(UpdateOperator::Increment),
            Punctuator::MinusMinus => PrefixOperator::Update(UpdateOperator::Decrement),
            _ => return None,
        };
        Some(operator)
    }

    fn postfix_operator(&self) -> Option<UpdateOperator> {
        if self.token.newline_before {
            return None;
        }
        match self.punctuator()? {
            Punctuator::PlusPlus => Some(UpdateOperator::Increment),
            Punctuator::MinusMinus => Some(UpdateOperator::Decrement),
            _ => None,
        }
    }

    /// Parse a unary expression, an update expression or `**`.
    ///
    /// `update_operand` is set for the operand of a prefix `++`/`--`,
    /// which must not swallow a following `**`.
    pub(crate) fn parse_unary(
        &mut self,
        cover: Option<&mut CoverGrammar>,
        saw_unary: bool,
        update_operand: bool,
    ) -> ParseResult<Expression> {
        self.enter_nesting()?;
        let result = self.parse_unary_inner(cover, saw_unary, update_operand);
        self.depth -= 1;
        result
    }

    fn parse_unary_inner(
        &mut self,
        mut cover: Option<&mut CoverGrammar>,
        mut saw_unary: bool,
        update_operand: bool,
    ) -> ParseResult<Expression> {
        let start = self.token.start;
        let expression = if self.check_keyword(Keyword::Await) && self.context.has_await() {
            saw_unary = true;
            self.parse_await()?
        } else if let Some(prefix) = self.prefix_operator() {
            self.advance()?;
            match prefix {
                PrefixOperator::Update(operator) => {
                    let argument = self.parse_unary(None, true, true)?;
                    self.check_simple_target(&argument)?;
                    Expression::UpdateExpression {
                        span: self.finish(start),
                        operator,
                        prefix: true,
                        argument: Box::new(argument),
                    }
                }
                PrefixOperator::Unary(operator) => {
                    let argument = self.parse_unary(None, true, false)?;
                    if operator == UnaryOperator::Delete {
                        self.check_delete(start, &argument)?;
                    }
                    saw_unary = true;
                    Expression::UnaryExpression {
                        span: self.finish(start),
                        operator,
                        argument: Box::new(argument),
                    }
                }
            }
        } else if matches!(self.token.kind, TokenKind::PrivateName(_)) {
            // `#x in obj`
            let id = self.parse_private_reference()?;
            if !self.check_keyword(Keyword::In) || !self.context.has_in() || saw_unary {
                return Err(self.unexpected());
            }
            Expression::PrivateIdentifier(id)
        } else {
            let mut expression = self.parse_left_hand_side(cover.as_deref_mut())?;
            if has_expression_errors(&cover) {
                return Ok(expression);
            }
            while let Some(operator) = self.postfix_operator() {
                self.check_simple_target(&expression)?;
                self.advance()?;
                expression = Expression::UpdateExpression {
                    span: self.finish(start),
                    operator,
                    prefix: false,
                    argument: Box::new(expression),
                };
            }
            expression
        };

        if !update_operand && self.check_punctuator(Punctuator::StarStar) {
            if saw_unary {
                return Err(self.raise(
                    self.token.start,
                    "Unary operator used immediately before exponentiation expression. \
                     Parenthesis must be used to disambiguate operator precedence",
                ));
            }
            self.advance()?;
            let right = self.parse_unary(None, false, false)?;
            return Ok(Expression::BinaryExpression {
                span: self.finish(start),
                operator: BinaryOperator::Exp,
                left: Box::new(expression),
                right: Box::new(right),
            });
        }
        Ok(expression)
    }

    fn check_delete(&self, start: usize, argument: &Expression) -> ParseResult<()> {
        if self.context.is_strict() && matches!(argument.without_parens(), Expression::Identifier(_)) {
            return Err(self.early(start, "Deleting local variable in strict mode"));
        }
        if is_private_field_access(argument) {
            return Err(self.early(start, "Private fields can not be deleted"));
        }
        Ok(())
    }

    fn parse_await(&mut self) -> ParseResult<Expression> {
        let start = self.token.start;
        if self.token.escaped {
            return Err(self.raise(start, "Keyword must not contain escaped characters"));
        }
        if self.context.contains(Context::PARAMETERS) {
            return Err(self.early(start, "Await expression cannot be a default value"));
        }
        if self.await_pos.is_none() {
            self.await_pos = Some(start);
        }
        self.advance()?;
        let argument = self.parse_unary(None, true, false)?;
        Ok(Expression::AwaitExpression {
            span: self.finish(start),
            argument: Box::new(argument),
        })
    }

    /// Parse a LeftHandSideExpression: a primary expression with its
    /// member accesses, calls and tagged templates.
    pub(crate) fn parse_left_hand_side(
        &mut self,
        mut cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Expression> {
        let start = self.token.start;
        let expression = self.parse_primary(cover.as_deref_mut(), false)?;
        if matches!(expression, Expression::ArrowFunctionExpression(_)) {
            return Ok(expression);
        }
        let result = self.parse_subscripts(expression, start, false)?;
        if let (Some(cover), Expression::MemberExpression(member)) = (cover, &result) {
            if cover.trailing_comma.is_some_and(|offset| offset >= member.span.start) {
                cover.trailing_comma = None;
            }
            if cover.parenthesized_bind.is_some_and(|offset| offset >= member.span.start) {
                cover.parenthesized_bind = None;
            }
        }
        Ok(result)
    }

    fn parse_subscripts(
        &mut self,
        mut base: Expression,
        start: usize,
        no_calls: bool,
    ) -> ParseResult<Expression> {
        let maybe_async_arrow = matches!(
            &base,
            Expression::Identifier(id)
                if id.name == "async" && id.span.len() == 5 && id.span.end == self.prev_end
        ) && !self.can_insert_semicolon()
            && self.potential_arrow_at == Some(start);
        let mut chained = false;

        loop {
            let optional_start = self.token.start;
            let optional = self.eat_punctuator(Punctuator::OptionalChain)?;
            if optional {
                if no_calls {
                    return Err(self.raise(
                        optional_start,
                        "Optional chaining cannot appear in the callee of new expressions",
                    ));
                }
                chained = true;
            }

            let computed = self.eat_punctuator(Punctuator::LBracket)?;
            let member = computed
                || (optional && !self.check_punctuator(Punctuator::LParen) && !self.check_template())
                || self.eat_punctuator(Punctuator::Dot)?;
            if member {
                let property = if computed {
                    let property = self.with_context(self.context | Context::IN, |p| p.parse_expression())?;
                    self.expect_punctuator(Punctuator::RBracket)?;
                    MemberProperty::Computed(Box::new(property))
                } else if matches!(self.token.kind, TokenKind::PrivateName(_))
                    && !matches!(base, Expression::Super { .. })
                {
                    MemberProperty::PrivateIdentifier(self.parse_private_reference()?)
                } else {
                    MemberProperty::Identifier(self.parse_identifier_name()?)
                };
                base = Expression::MemberExpression(MemberExpression {
                    span: self.finish(start),
                    object: Box::new(base),
                    property,
                    optional,
                });
            } else if !no_calls && self.check_punctuator(Punctuator::LParen) {
                self.advance()?;
                let mut arguments_cover = CoverGrammar::default();
                let saved = self.take_yield_await();
                let arguments = self.parse_arguments(Some(&mut arguments_cover))?;
                if maybe_async_arrow
                    && !optional
                    && !chained
                    && !self.can_insert_semicolon()
                    && self.check_punctuator(Punctuator::Arrow)
                {
                    self.check_pattern_errors(&arguments_cover, true)?;
                    self.check_yield_await_in_params()?;
                    if let Some(offset) = self.await_ident_pos {
                        return Err(self.early(
                            offset,
                            "Cannot use 'await' as identifier inside an async function",
                        ));
                    }
                    self.restore_yield_await(saved);
                    self.advance()?;
                    return self.parse_arrow_function(start, arguments, None, true);
                }
                self.check_expression_errors(&arguments_cover)?;
                let (yield_pos, await_pos, await_ident_pos) = saved;
                self.yield_pos = yield_pos.or(self.yield_pos);
                self.await_pos = await_pos.or(self.await_pos);
                self.await_ident_pos = await_ident_pos.or(self.await_ident_pos);
                base = Expression::CallExpression {
                    span: self.finish(start),
                    callee: Box::new(base),
                    arguments,
                    optional,
                };
            } else if self.check_template() {
                if chained {
                    return Err(self.raise(
                        self.token.start,
                        "Optional chaining cannot appear in the tag of tagged template expressions",
                    ));
                }
                let quasi = self.parse_template(true)?;
                base = Expression::TaggedTemplateExpression {
                    span: self.finish(start),
                    tag: Box::new(base),
                    quasi,
                };
            } else {
                break;
            }
        }

        if chained {
            base = Expression::ChainExpression {
                span: self.finish(start),
                expression: Box::new(base),
            };
        }
        Ok(base)
    }

    /// Parse call arguments after the opening parenthesis
    pub(crate) fn parse_arguments(
        &mut self,
        cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Vec<ArrayElement>> {
        let elements = self.with_context(self.context | Context::IN, |p| {
            p.parse_expression_list(Punctuator::RParen, false, cover)
        })?;
        Ok(elements.into_iter().flatten().collect())
    }

    /// Comma-separated elements up to `close`, which is consumed. Holes are
    /// only produced when `allow_holes` is set.
    fn parse_expression_list(
        &mut self,
        close: Punctuator,
        allow_holes: bool,
        mut cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Vec<Option<ArrayElement>>> {
        let mut elements = Vec::new();
        let mut first = true;
        while !self.eat_punctuator(close)? {
            if first {
                first = false;
            } else {
                self.expect_punctuator(Punctuator::Comma)?;
                if self.eat_punctuator(close)? {
                    break;
                }
            }

            if allow_holes && self.check_punctuator(Punctuator::Comma) {
                elements.push(None);
                continue;
            }
            if self.check_punctuator(Punctuator::Spread) {
                let spread = self.parse_spread(cover.as_deref_mut())?;
                elements.push(Some(ArrayElement::Spread(spread)));
            } else {
                let element = self.parse_assignment_with(cover.as_deref_mut())?;
                elements.push(Some(ArrayElement::Expression(element)));
            }
        }
        Ok(elements)
    }

    fn parse_spread(&mut self, mut cover: Option<&mut CoverGrammar>) -> ParseResult<SpreadElement> {
        let start = self.token.start;
        self.advance()?;
        let argument = self.parse_assignment_with(cover.as_deref_mut())?;
        if let Some(cover) = cover {
            if self.check_punctuator(Punctuator::Comma) && cover.trailing_comma.is_none() {
                cover.trailing_comma = Some(self.token.start);
            }
        }
        Ok(SpreadElement {
            span: self.finish(start),
            argument,
        })
    }

    fn parse_primary(
        &mut self,
        cover: Option<&mut CoverGrammar>,
        for_new: bool,
    ) -> ParseResult<Expression> {
        let start = self.token.start;
        let can_be_arrow = self.potential_arrow_at == Some(start);

        if let Some(keyword) = self.keyword() {
            match keyword {
                Keyword::Super => return self.parse_super(),
                Keyword::This => {
                    self.advance()?;
                    return Ok(Expression::ThisExpression {
                        span: self.finish(start),
                    });
                }
                Keyword::Null | Keyword::True | Keyword::False => {
                    return Ok(Expression::Literal(self.parse_literal()?));
                }
                Keyword::Function => {
                    self.advance()?;
                    let function = self.parse_function(start, super::functions::FunctionKind::Expression, false)?;
                    return Ok(Expression::FunctionExpression(Box::new(function)));
                }
                Keyword::Class => {
                    let class = self.parse_class(start, super::classes::ClassKind::Expression, Vec::new())?;
                    return Ok(Expression::ClassExpression(Box::new(class)));
                }
                Keyword::New => return self.parse_new(),
                Keyword::Import => return self.parse_import_call_or_meta(for_new),
                Keyword::Await | Keyword::Yield => {
                    return self.parse_identifier_expression(can_be_arrow);
                }
                _ => return Err(self.unexpected()),
            }
        }

        if let Some(punctuator) = self.punctuator() {
            match punctuator {
                Punctuator::Slash | Punctuator::SlashEq => {
                    self.token = self.lexer.rescan(&self.token, LexGoal::RegExp)?;
                    return Ok(Expression::Literal(self.parse_literal()?));
                }
                Punctuator::LParen => {
                    if let Some(cover) = cover {
                        if cover.parenthesized_bind.is_none() {
                            cover.parenthesized_bind = Some(start);
                        }
                    }
                    return self.parse_paren_or_arrow(can_be_arrow);
                }
                Punctuator::LBracket => return self.parse_array_literal(cover),
                Punctuator::LBrace => return self.parse_object_literal(cover),
                Punctuator::At if self.context.contains(Context::NEXT) => {
                    let decorators = self.parse_decorators()?;
                    if !self.check_keyword(Keyword::Class) {
                        return Err(self.unexpected());
                    }
                    let class = self.parse_class(start, super::classes::ClassKind::Expression, decorators)?;
                    return Ok(Expression::ClassExpression(Box::new(class)));
                }
                _ => return Err(self.unexpected()),
            }
        }

        match self.token.kind {
            TokenKind::Identifier(_) => self.parse_identifier_expression(can_be_arrow),
            TokenKind::Number(_) | TokenKind::BigInt(_) | TokenKind::String(_) => {
                Ok(Expression::Literal(self.parse_literal()?))
            }
            TokenKind::Template(_) => Ok(Expression::TemplateLiteral(self.parse_template(false)?)),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_identifier_expression(&mut self, can_be_arrow: bool) -> ParseResult<Expression> {
        let start = self.token.start;
        let escaped = self.token.escaped;
        let id = self.parse_identifier()?;
        let is_async = !escaped && id.name == "async";

        if is_async && !self.can_insert_semicolon() && self.check_keyword(Keyword::Function) {
            self.advance()?;
            let function = self.parse_function(start, super::functions::FunctionKind::Expression, true)?;
            return Ok(Expression::FunctionExpression(Box::new(function)));
        }

        if can_be_arrow && !self.can_insert_semicolon() {
            if self.check_punctuator(Punctuator::Arrow) {
                self.advance()?;
                let params = vec![ArrayElement::Expression(Expression::Identifier(id))];
                return self.parse_arrow_function(start, params, None, false);
            }
            if is_async && self.at_identifier() {
                let param = self.parse_identifier()?;
                if self.can_insert_semicolon() || !self.check_punctuator(Punctuator::Arrow) {
                    return Err(self.unexpected());
                }
                self.advance()?;
                let params = vec![ArrayElement::Expression(Expression::Identifier(param))];
                return self.parse_arrow_function(start, params, None, true);
            }
        }
        Ok(Expression::Identifier(id))
    }

    /// Parse an identifier in a reference or binding position and check
    /// that the name is not reserved here.
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        let start = self.token.start;
        let name = match &self.token.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(keyword @ (Keyword::Await | Keyword::Yield)) => keyword.as_str().to_string(),
            TokenKind::Keyword(keyword) => {
                return Err(self.raise(start, format!("Unexpected keyword '{}'", keyword.as_str())));
            }
            _ => return Err(self.unexpected()),
        };
        self.check_unreserved(start, &name)?;
        self.advance()?;
        Ok(Identifier {
            span: self.finish(start),
            name,
        })
    }

    /// Reject identifiers that are reserved in the current context.
    pub(crate) fn check_unreserved(&mut self, start: usize, name: &str) -> ParseResult<()> {
        match name {
            "yield" if self.context.has_yield() => {
                return Err(self.early(start, "Cannot use 'yield' as identifier inside a generator"));
            }
            "await" if self.context.has_await() => {
                return Err(self.early(
                    start,
                    "Cannot use 'await' as identifier inside an async function",
                ));
            }
            "arguments" if self.context.contains(Context::CLASS_FIELD_INIT) => {
                return Err(self.early(start, "Cannot use 'arguments' in class field initializer"));
            }
            "arguments" | "await" if self.context.contains(Context::STATIC_BLOCK) => {
                return Err(self.early(
                    start,
                    format!("Cannot use {} in class static initialization block", name),
                ));
            }
            _ => {}
        }
        if self.context.is_strict() && (is_strict_reserved_word(name) || name == "yield") {
            return Err(self.early(start, format!("The keyword '{}' is reserved", name)));
        }
        if name == "await" {
            if self.context.reserves_await() {
                return Err(self.early(start, "Cannot use keyword 'await' outside an async function"));
            }
            if self.await_ident_pos.is_none() {
                self.await_ident_pos = Some(start);
            }
        }
        if name == "yield" && self.context.reserves_yield() {
            return Err(self.early(start, "The keyword 'yield' is reserved"));
        }
        Ok(())
    }

    /// Parse any IdentifierName, reserved words included
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<Identifier> {
        let start = self.token.start;
        let name = match self.token.identifier_name() {
            Some(name) => name.to_string(),
            None => return Err(self.unexpected()),
        };
        self.bump_name()?;
        Ok(Identifier {
            span: self.finish(start),
            name,
        })
    }

    /// Parse `#name` where it is used (not declared)
    pub(crate) fn parse_private_reference(&mut self) -> ParseResult<PrivateIdentifier> {
        let id = self.parse_private_name()?;
        if !self.private_names.reference(&id.name, id.span.start) {
            return Err(self.early(
                id.span.start,
                format!("Private field '#{}' must be declared in an enclosing class", id.name),
            ));
        }
        Ok(id)
    }

    pub(crate) fn parse_private_name(&mut self) -> ParseResult<PrivateIdentifier> {
        let start = self.token.start;
        let name = match &self.token.kind {
            TokenKind::PrivateName(name) => name.clone(),
            _ => return Err(self.unexpected()),
        };
        self.advance()?;
        Ok(PrivateIdentifier {
            span: self.finish(start),
            name,
        })
    }

    /// Parse a numeric, string, regular expression, boolean or null literal
    pub(crate) fn parse_literal(&mut self) -> ParseResult<Literal> {
        let start = self.token.start;
        if self.token.legacy_octal && self.context.is_strict() {
            let message = if matches!(self.token.kind, TokenKind::String(_)) {
                "Octal escape sequences are not allowed in strict mode"
            } else {
                "Octal literals are not allowed in strict mode"
            };
            return Err(self.early(start, message));
        }
        let raw = self.source[start..self.token.end].to_string();
        let token = self.bump()?;
        let value = match token.kind {
            TokenKind::Number(value) => LiteralValue::Number(value),
            TokenKind::BigInt(value) => LiteralValue::BigInt(value),
            TokenKind::String(value) => LiteralValue::String(value),
            TokenKind::RegExp { pattern, flags } => LiteralValue::RegExp { pattern, flags },
            TokenKind::Keyword(Keyword::Null) => LiteralValue::Null,
            TokenKind::Keyword(Keyword::True) => LiteralValue::Boolean(true),
            TokenKind::Keyword(Keyword::False) => LiteralValue::Boolean(false),
            other => return Err(crate::error::unexpected_token(self.source, start, &other)),
        };
        Ok(Literal {
            span: self.finish(start),
            value,
            raw,
        })
    }

    fn parse_super(&mut self) -> ParseResult<Expression> {
        let start = self.token.start;
        self.advance()?;
        if self.check_punctuator(Punctuator::LParen) {
            if !self.context.contains(Context::SUPER_CALL) {
                return Err(self.early(start, "super() call outside constructor of a subclass"));
            }
        } else if self.check_punctuator(Punctuator::Dot) || self.check_punctuator(Punctuator::LBracket) {
            if !self.context.contains(Context::SUPER_PROPERTY) {
                return Err(self.early(start, "'super' keyword outside a method"));
            }
        } else {
            return Err(self.unexpected());
        }
        Ok(Expression::Super {
            span: self.finish(start),
        })
    }

    fn parse_new(&mut self) -> ParseResult<Expression> {
        let start = self.token.start;
        let new_token = self.bump()?;
        if self.eat_punctuator(Punctuator::Dot)? {
            let meta = Identifier {
                span: self.span(start, new_token.end),
                name: "new".to_string(),
            };
            let escaped = self.token.escaped;
            let property = self.parse_identifier_name()?;
            if property.name != "target" {
                return Err(self.raise(
                    property.span.start,
                    "The only valid meta property for new is 'new.target'",
                ));
            }
            if escaped {
                return Err(self.raise(
                    property.span.start,
                    "'new.target' must not contain escaped characters",
                ));
            }
            if !self.context.contains(Context::NEW_TARGET) {
                return Err(self.early(start, "'new.target' can only be used in functions and class static block"));
            }
            return Ok(Expression::MetaProperty {
                span: self.finish(start),
                meta,
                property,
            });
        }

        let callee_start = self.token.start;
        let callee = self.parse_primary(None, true)?;
        let callee = self.parse_subscripts(callee, callee_start, true)?;
        let arguments = if self.eat_punctuator(Punctuator::LParen)? {
            self.parse_arguments(None)?
        } else {
            Vec::new()
        };
        Ok(Expression::NewExpression {
            span: self.finish(start),
            callee: Box::new(callee),
            arguments,
        })
    }

    fn parse_import_call_or_meta(&mut self, for_new: bool) -> ParseResult<Expression> {
        let start = self.token.start;
        let import_token = self.bump()?;

        if self.check_punctuator(Punctuator::LParen) && !for_new {
            self.advance()?;
            let (source, options) = self.with_context(self.context | Context::IN, |p| {
                let source = p.parse_assignment()?;
                let mut options = None;
                if p.eat_punctuator(Punctuator::Comma)? && !p.check_punctuator(Punctuator::RParen) {
                    options = Some(Box::new(p.parse_assignment()?));
                    p.eat_punctuator(Punctuator::Comma)?;
                }
                p.expect_punctuator(Punctuator::RParen)?;
                Ok((source, options))
            })?;
            return Ok(Expression::ImportExpression {
                span: self.finish(start),
                source: Box::new(source),
                options,
            });
        }

        if self.eat_punctuator(Punctuator::Dot)? {
            let meta = Identifier {
                span: self.span(start, import_token.end),
                name: "import".to_string(),
            };
            let escaped = self.token.escaped;
            let property = self.parse_identifier_name()?;
            if property.name != "meta" {
                return Err(self.raise(
                    property.span.start,
                    "The only valid meta property for import is 'import.meta'",
                ));
            }
            if escaped {
                return Err(self.raise(
                    property.span.start,
                    "'import.meta' must not contain escaped characters",
                ));
            }
            if !self.context.is_module() {
                return Err(self.early(start, "Cannot use 'import.meta' outside a module"));
            }
            return Ok(Expression::MetaProperty {
                span: self.finish(start),
                meta,
                property,
            });
        }
        Err(self.unexpected())
    }

    /// Parse a template literal starting at the current template token.
    ///
    /// Invalid escapes are allowed only in tagged templates, where the
    /// element's cooked value becomes `None`.
    pub(crate) fn parse_template(&mut self, tagged: bool) -> ParseResult<TemplateLiteral> {
        let start = self.token.start;
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let token = self.bump()?;
            let part = match token.kind {
                TokenKind::Template(part) => part,
                other => return Err(crate::error::unexpected_token(self.source, token.start, &other)),
            };
            if part.cooked.is_none() && !tagged {
                return Err(self.raise(
                    part.invalid_escape.unwrap_or(token.start),
                    "Bad escape sequence in untagged template literal",
                ));
            }
            // Element spans exclude the delimiters: "`" or "}" before,
            // "`" or "${" after.
            let end = token.end - if part.tail { 1 } else { 2 };
            quasis.push(TemplateElement {
                span: self.span(token.start + 1, end),
                raw: part.raw,
                cooked: part.cooked,
                tail: part.tail,
            });
            if part.tail {
                break;
            }

            let expression = self.with_context(self.context | Context::IN, |p| p.parse_expression())?;
            expressions.push(expression);
            if !self.check_punctuator(Punctuator::RBrace) {
                return Err(self.unexpected());
            }
            self.token = self.lexer.rescan(&self.token, LexGoal::TemplateTail)?;
        }
        Ok(TemplateLiteral {
            span: self.finish(start),
            quasis,
            expressions,
        })
    }

    fn parse_paren_or_arrow(&mut self, can_be_arrow: bool) -> ParseResult<Expression> {
        let start = self.token.start;
        self.advance()?;
        let inner_start = self.token.start;
        let mut items = Vec::new();
        let mut rest = None;
        let mut rest_start = None;
        let mut trailing_comma = None;
        let mut cover = CoverGrammar::default();
        let saved_yield = self.yield_pos.take();
        let saved_await = self.await_pos.take();

        self.with_context(self.context | Context::IN, |p| {
            let mut first = true;
            while !p.check_punctuator(Punctuator::RParen) {
                if first {
                    first = false;
                } else {
                    p.expect_punctuator(Punctuator::Comma)?;
                    if p.check_punctuator(Punctuator::RParen) {
                        trailing_comma = Some(p.prev_end - 1);
                        break;
                    }
                }
                if p.check_punctuator(Punctuator::Spread) {
                    rest_start = Some(p.token.start);
                    rest = Some(p.parse_rest_binding()?);
                    if p.check_punctuator(Punctuator::Comma) {
                        return Err(p.early(p.token.start, "Comma is not permitted after the rest element"));
                    }
                    break;
                }
                items.push(p.parse_assignment_with(Some(&mut cover))?);
            }
            Ok(())
        })?;
        let inner_end = self.prev_end;
        let close = self.token.start;
        self.expect_punctuator(Punctuator::RParen)?;

        if can_be_arrow && !self.can_insert_semicolon() && self.check_punctuator(Punctuator::Arrow) {
            self.check_pattern_errors(&cover, true)?;
            self.check_yield_await_in_params()?;
            self.yield_pos = saved_yield;
            self.await_pos = saved_await;
            self.advance()?;
            let params = items.into_iter().map(ArrayElement::Expression).collect();
            return self.parse_arrow_function(start, params, rest, false);
        }

        if items.is_empty() {
            return Err(self.raise(close, "Unexpected token"));
        }
        if let Some(offset) = trailing_comma.or(rest_start) {
            return Err(self.raise(offset, "Unexpected token"));
        }
        self.check_expression_errors(&cover)?;
        self.yield_pos = saved_yield.or(self.yield_pos);
        self.await_pos = saved_await.or(self.await_pos);

        let expression = if items.len() > 1 {
            Expression::SequenceExpression {
                span: self.span(inner_start, inner_end),
                expressions: items,
            }
        } else {
            items.remove(0)
        };
        Ok(Expression::ParenthesizedExpression {
            span: self.finish(start),
            expression: Box::new(expression),
        })
    }

    fn parse_array_literal(&mut self, cover: Option<&mut CoverGrammar>) -> ParseResult<Expression> {
        let start = self.token.start;
        self.advance()?;
        let elements = self.with_context(self.context | Context::IN, |p| {
            p.parse_expression_list(Punctuator::RBracket, true, cover)
        })?;
        Ok(Expression::ArrayExpression {
            span: self.finish(start),
            elements,
        })
    }

    fn parse_object_literal(&mut self, mut cover: Option<&mut CoverGrammar>) -> ParseResult<Expression> {
        let start = self.token.start;
        self.advance()?;
        let mut properties = Vec::new();
        let mut has_proto = false;
        self.with_context(self.context | Context::IN, |p| {
            let mut first = true;
            while !p.eat_punctuator(Punctuator::RBrace)? {
                if first {
                    first = false;
                } else {
                    p.expect_punctuator(Punctuator::Comma)?;
                    if p.eat_punctuator(Punctuator::RBrace)? {
                        break;
                    }
                }
                let property = p.parse_object_member(cover.as_deref_mut())?;
                if let ObjectProperty::Property(property) = &property {
                    p.check_proto(property, &mut has_proto, cover.as_deref_mut())?;
                }
                properties.push(property);
            }
            Ok(())
        })?;
        Ok(Expression::ObjectExpression {
            span: self.finish(start),
            properties,
        })
    }

    fn check_proto(
        &self,
        property: &Property,
        has_proto: &mut bool,
        cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<()> {
        if property.method || property.shorthand || property.kind != PropertyKind::Init {
            return Ok(());
        }
        if property.key.static_name() != Some("__proto__") {
            return Ok(());
        }
        if *has_proto {
            let offset = property.key.span().start;
            match cover {
                Some(cover) => {
                    if cover.double_proto.is_none() {
                        cover.double_proto = Some(offset);
                    }
                }
                None => return Err(self.early(offset, "Redefinition of __proto__ property")),
            }
        }
        *has_proto = true;
        Ok(())
    }

    fn parse_object_member(&mut self, cover: Option<&mut CoverGrammar>) -> ParseResult<ObjectProperty> {
        let start = self.token.start;
        if self.check_punctuator(Punctuator::Spread) {
            return Ok(ObjectProperty::SpreadElement(self.parse_spread(cover)?));
        }

        let mut generator = self.eat_punctuator(Punctuator::Star)?;
        let escaped = self.token.escaped;
        let mut key = self.parse_property_name()?;
        let mut is_async = false;
        if !generator && !escaped && self.is_async_modifier(&key) {
            is_async = true;
            generator = self.eat_punctuator(Punctuator::Star)?;
            key = self.parse_property_name()?;
        }
        self.parse_property_value(start, key, generator, is_async, escaped, cover)
            .map(ObjectProperty::Property)
    }

    /// `async` followed on the same line by something that can start a
    /// property name.
    fn is_async_modifier(&self, key: &PropertyKey) -> bool {
        let is_async = matches!(key, PropertyKey::Identifier(id) if id.name == "async");
        is_async
            && !self.token.newline_before
            && (matches!(
                self.token.kind,
                TokenKind::Identifier(_)
                    | TokenKind::Keyword(_)
                    | TokenKind::Number(_)
                    | TokenKind::BigInt(_)
                    | TokenKind::String(_)
                    | TokenKind::PrivateName(_)
            ) || self.check_punctuator(Punctuator::LBracket)
                || self.check_punctuator(Punctuator::Star))
    }

    /// Parse a property key: identifier name, string, number or `[expr]`
    pub(crate) fn parse_property_name(&mut self) -> ParseResult<PropertyKey> {
        if self.eat_punctuator(Punctuator::LBracket)? {
            let key = self.with_context(self.context | Context::IN, |p| p.parse_assignment())?;
            self.expect_punctuator(Punctuator::RBracket)?;
            return Ok(PropertyKey::Computed(key));
        }
        match self.token.kind {
            TokenKind::Number(_) | TokenKind::BigInt(_) | TokenKind::String(_) => {
                Ok(PropertyKey::Literal(self.parse_literal()?))
            }
            TokenKind::Identifier(_) | TokenKind::Keyword(_) => {
                Ok(PropertyKey::Identifier(self.parse_identifier_name()?))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_property_value(
        &mut self,
        start: usize,
        key: PropertyKey,
        generator: bool,
        is_async: bool,
        escaped: bool,
        cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Property> {
        if (generator || is_async) && self.check_punctuator(Punctuator::Colon) {
            return Err(self.unexpected());
        }

        if self.eat_punctuator(Punctuator::Colon)? {
            let value = self.parse_assignment_with(cover)?;
            return Ok(Property {
                span: self.finish(start),
                key,
                value,
                kind: PropertyKind::Init,
                method: false,
                shorthand: false,
            });
        }

        if self.check_punctuator(Punctuator::LParen) {
            let function = self.parse_method(generator, is_async, false)?;
            return Ok(Property {
                span: self.finish(start),
                key,
                value: Expression::FunctionExpression(Box::new(function)),
                kind: PropertyKind::Init,
                method: true,
                shorthand: false,
            });
        }

        let accessor = match &key {
            PropertyKey::Identifier(id) if !escaped && (id.name == "get" || id.name == "set") => {
                !self.check_punctuator(Punctuator::Comma)
                    && !self.check_punctuator(Punctuator::RBrace)
                    && !self.check_punctuator(Punctuator::Assign)
            }
            _ => false,
        };
        if accessor {
            if generator || is_async {
                return Err(self.unexpected());
            }
            let kind = match &key {
                PropertyKey::Identifier(id) if id.name == "get" => PropertyKind::Get,
                _ => PropertyKind::Set,
            };
            let key = self.parse_property_name()?;
            let function = self.parse_method(false, false, false)?;
            self.check_accessor_params(kind == PropertyKind::Get, &function)?;
            return Ok(Property {
                span: self.finish(start),
                key,
                value: Expression::FunctionExpression(Box::new(function)),
                kind,
                method: false,
                shorthand: false,
            });
        }

        let id = match key {
            PropertyKey::Identifier(id) if !generator && !is_async => id,
            _ => return Err(self.unexpected()),
        };
        self.check_shorthand(&id)?;

        let value = match cover {
            Some(cover) if self.check_punctuator(Punctuator::Assign) => {
                if cover.shorthand_assign.is_none() {
                    cover.shorthand_assign = Some(self.token.start);
                }
                self.advance()?;
                let right = self.parse_assignment()?;
                Expression::AssignmentExpression {
                    span: self.finish(start),
                    operator: AssignmentOperator::Assign,
                    left: Box::new(Pattern::Identifier(id.clone())),
                    right: Box::new(right),
                }
            }
            _ => Expression::Identifier(id.clone()),
        };
        Ok(Property {
            span: self.finish(start),
            key: PropertyKey::Identifier(id),
            value,
            kind: PropertyKind::Init,
            method: false,
            shorthand: true,
        })
    }

    /// Getters take no parameters; setters exactly one, which is not a rest
    /// element.
    pub(crate) fn check_accessor_params(&self, getter: bool, function: &Function) -> ParseResult<()> {
        let start = function.span.start;
        if getter {
            if !function.params.is_empty() {
                return Err(self.early(start, "Getter must not have any formal parameters"));
            }
        } else {
            if function.params.len() != 1 {
                return Err(self.early(start, "Setter must have exactly one formal parameter"));
            }
            if matches!(function.params[0], Pattern::RestElement { .. }) {
                return Err(self.early(start, "Setter function argument must not be a rest parameter"));
            }
        }
        Ok(())
    }

    /// Record pattern errors as expression errors now that the cover is
    /// known to be an expression.
    pub(crate) fn check_expression_errors(&self, cover: &CoverGrammar) -> ParseResult<()> {
        if let Some(offset) = cover.shorthand_assign {
            return Err(self.raise(
                offset,
                "Shorthand property assignments are valid only in destructuring patterns",
            ));
        }
        if let Some(offset) = cover.double_proto {
            return Err(self.early(offset, "Redefinition of __proto__ property"));
        }
        Ok(())
    }
}

/// `a.#x`, `a?.#x` or either in parentheses
fn is_private_field_access(expression: &Expression) -> bool {
    match expression {
        Expression::MemberExpression(member) => {
            matches!(member.property, MemberProperty::PrivateIdentifier(_))
        }
        Expression::ChainExpression { expression, .. } => is_private_field_access(expression),
        Expression::ParenthesizedExpression { expression, .. } => is_private_field_access(expression),
        _ => false,
    }
}
