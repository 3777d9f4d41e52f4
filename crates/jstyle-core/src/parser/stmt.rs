//! Blocks and statements.

use super::{PResult, Parser};
use crate::token_types::TokenType;

/// How a `case`/`default` label was terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelEnd {
    Colon,
    Arrow,
}

impl Parser<'_> {
    /// `{ ... }` as an `SLIST` anchored at the brace.
    pub(super) fn block(&mut self) -> PResult {
        if !self.at(TokenType::LCurly) {
            return Err(self.error("{"));
        }
        self.start_anchored(TokenType::Slist);
        while !self.at(TokenType::RCurly) {
            if self.at(TokenType::Eof) {
                return Err(self.error("}"));
            }
            self.block_statement()?;
        }
        self.bump();
        self.finish();
        Ok(())
    }

    fn block_statement(&mut self) -> PResult {
        if self.at(TokenType::LiteralSynchronized) && self.nth(1) == TokenType::LParen {
            return self.statement();
        }
        let after_modifiers = self.scan_modifiers(0);
        if self.type_declaration_at(after_modifiers) && self.peek() != TokenType::LiteralDefault {
            let checkpoint = self.checkpoint();
            self.modifiers()?;
            return self.type_declaration(checkpoint);
        }
        if after_modifiers > 0 || self.local_variable_ahead() {
            return self.local_variable_declaration();
        }
        self.statement()
    }

    fn local_variable_ahead(&self) -> bool {
        if self.at_word("yield") && self.yield_ahead() {
            return false;
        }
        self.scan_type(0)
            .is_some_and(|end| self.nth(end) == TokenType::Ident)
    }

    fn yield_ahead(&self) -> bool {
        !matches!(
            self.nth(1),
            TokenType::Assign
                | TokenType::Dot
                | TokenType::LBrack
                | TokenType::Inc
                | TokenType::Dec
                | TokenType::Lambda
                | TokenType::Semi
                | TokenType::Colon
                | TokenType::Eof
        ) && !self.nth(1).is_assignment()
    }

    /// A local variable declaration followed by its `;` as a sibling.
    fn local_variable_declaration(&mut self) -> PResult {
        self.start(TokenType::VariableDef);
        self.modifiers()?;
        self.type_node()?;
        self.variable_declarators(false)?;
        self.expect(TokenType::Semi)
    }

    fn statement(&mut self) -> PResult {
        self.nested(|p| {
            match p.peek() {
                TokenType::LCurly => p.block(),
                TokenType::Semi => {
                    p.start_anchored(TokenType::EmptyStat);
                    p.finish();
                    Ok(())
                }
                TokenType::LiteralIf => p.if_statement(),
                TokenType::LiteralFor => p.for_statement(),
                TokenType::LiteralWhile => {
                    p.start_anchored(TokenType::LiteralWhile);
                    p.par_expression()?;
                    p.statement()?;
                    p.finish();
                    Ok(())
                }
                TokenType::LiteralDo => {
                    p.start_anchored(TokenType::LiteralDo);
                    p.statement()?;
                    if !p.at(TokenType::LiteralWhile) {
                        return Err(p.error("while"));
                    }
                    p.bump_as(TokenType::DoWhile);
                    p.par_expression()?;
                    p.expect(TokenType::Semi)?;
                    p.finish();
                    Ok(())
                }
                TokenType::LiteralTry => p.try_statement(),
                TokenType::LiteralSwitch => p.switch_construct(),
                TokenType::LiteralSynchronized => {
                    p.start_anchored(TokenType::LiteralSynchronized);
                    p.par_expression()?;
                    p.block()?;
                    p.finish();
                    Ok(())
                }
                TokenType::LiteralReturn | TokenType::LiteralThrow => {
                    let kind = p.peek();
                    p.start_anchored(kind);
                    if !p.at(TokenType::Semi) {
                        p.expr()?;
                    }
                    p.expect(TokenType::Semi)?;
                    p.finish();
                    Ok(())
                }
                TokenType::LiteralBreak | TokenType::LiteralContinue => {
                    let kind = p.peek();
                    p.start_anchored(kind);
                    p.eat(TokenType::Ident);
                    p.expect(TokenType::Semi)?;
                    p.finish();
                    Ok(())
                }
                TokenType::LiteralAssert => {
                    p.start_anchored(TokenType::LiteralAssert);
                    p.expr()?;
                    if p.eat(TokenType::Colon) {
                        p.expr()?;
                    }
                    p.expect(TokenType::Semi)?;
                    p.finish();
                    Ok(())
                }
                TokenType::Ident if p.nth(1) == TokenType::Colon => {
                    p.start(TokenType::LabeledStat);
                    p.bump();
                    p.anchor(1);
                    p.statement()?;
                    p.finish();
                    Ok(())
                }
                TokenType::Ident if p.at_word("yield") && p.yield_ahead() => {
                    p.start_anchored(TokenType::LiteralYield);
                    p.expr()?;
                    p.expect(TokenType::Semi)?;
                    p.finish();
                    Ok(())
                }
                TokenType::LiteralThis | TokenType::LiteralSuper
                    if p.nth(1) == TokenType::LParen =>
                {
                    p.constructor_call()
                }
                TokenType::Lt => p.constructor_call(),
                _ => {
                    p.expr()?;
                    p.expect(TokenType::Semi)
                }
            }
        })
    }

    /// `this(...)` / `super(...)` with optional explicit type arguments.
    fn constructor_call(&mut self) -> PResult {
        let type_arguments_end = self.scan_type_arguments(0).unwrap_or(0);
        let kind = match self.nth(type_arguments_end) {
            TokenType::LiteralThis => TokenType::CtorCall,
            TokenType::LiteralSuper => TokenType::SuperCtorCall,
            _ => return Err(self.error("this or super")),
        };
        self.start(kind);
        self.type_arguments_opt()?;
        self.anchor(1);
        self.expect(TokenType::LParen)?;
        self.argument_list()?;
        self.expect(TokenType::RParen)?;
        self.expect(TokenType::Semi)?;
        self.finish();
        Ok(())
    }

    /// `( EXPR )` as three siblings.
    fn par_expression(&mut self) -> PResult {
        self.expect(TokenType::LParen)?;
        self.expr()?;
        self.expect(TokenType::RParen)
    }

    fn if_statement(&mut self) -> PResult {
        self.start_anchored(TokenType::LiteralIf);
        self.par_expression()?;
        self.statement()?;
        if self.at(TokenType::LiteralElse) {
            self.start_anchored(TokenType::LiteralElse);
            self.statement()?;
            self.finish();
        }
        self.finish();
        Ok(())
    }

    fn for_statement(&mut self) -> PResult {
        self.start_anchored(TokenType::LiteralFor);
        self.expect(TokenType::LParen)?;
        if self.for_each_ahead() {
            self.start(TokenType::ForEachClause);
            self.start(TokenType::VariableDef);
            self.modifiers()?;
            self.type_node()?;
            self.expect_ident()?;
            self.finish();
            self.expect(TokenType::Colon)?;
            self.expr()?;
            self.finish();
        } else {
            self.start(TokenType::ForInit);
            if !self.at(TokenType::Semi) {
                if self.scan_modifiers(0) > 0 || self.local_variable_ahead() {
                    self.start(TokenType::VariableDef);
                    self.modifiers()?;
                    self.type_node()?;
                    self.variable_declarators(false)?;
                } else {
                    self.expression_list()?;
                }
            }
            self.finish();
            self.expect(TokenType::Semi)?;
            self.start(TokenType::ForCondition);
            if !self.at(TokenType::Semi) {
                self.expr()?;
            }
            self.finish();
            self.expect(TokenType::Semi)?;
            self.start(TokenType::ForIterator);
            if !self.at(TokenType::RParen) {
                self.expression_list()?;
            }
            self.finish();
        }
        self.expect(TokenType::RParen)?;
        self.statement()?;
        self.finish();
        Ok(())
    }

    fn for_each_ahead(&self) -> bool {
        let start = self.scan_modifiers(0);
        self.scan_type(start).is_some_and(|end| {
            self.nth(end) == TokenType::Ident && self.nth(end + 1) == TokenType::Colon
        })
    }

    /// Comma separated expressions in an `ELIST`.
    fn expression_list(&mut self) -> PResult {
        self.start(TokenType::Elist);
        self.expr()?;
        while self.eat(TokenType::Comma) {
            self.expr()?;
        }
        self.finish();
        Ok(())
    }

    fn try_statement(&mut self) -> PResult {
        self.start_anchored(TokenType::LiteralTry);
        if self.at(TokenType::LParen) {
            self.start(TokenType::ResourceSpecification);
            self.bump();
            self.start(TokenType::Resources);
            while !self.at(TokenType::RParen) {
                self.resource()?;
                if !self.eat(TokenType::Semi) {
                    break;
                }
            }
            self.finish();
            self.expect(TokenType::RParen)?;
            self.finish();
        }
        self.block()?;
        while self.at(TokenType::LiteralCatch) {
            self.start_anchored(TokenType::LiteralCatch);
            self.expect(TokenType::LParen)?;
            self.start(TokenType::ParameterDef);
            self.modifiers()?;
            self.start(TokenType::Type);
            self.type_body()?;
            while self.at(TokenType::Bor) {
                self.bump();
                self.type_body()?;
            }
            self.finish();
            self.expect_ident()?;
            self.finish();
            self.expect(TokenType::RParen)?;
            self.block()?;
            self.finish();
        }
        if self.at(TokenType::LiteralFinally) {
            self.start_anchored(TokenType::LiteralFinally);
            self.block()?;
            self.finish();
        }
        self.finish();
        Ok(())
    }

    fn resource(&mut self) -> PResult {
        self.start(TokenType::Resource);
        if self.scan_modifiers(0) > 0 || self.local_variable_ahead() {
            self.modifiers()?;
            self.type_node()?;
            self.expect_ident()?;
            if self.at(TokenType::Assign) {
                self.start_anchored(TokenType::Assign);
                self.expr()?;
                self.finish();
            }
        } else {
            self.conditional_expr()?;
        }
        self.finish();
        Ok(())
    }

    /// A `switch` statement or expression.
    pub(super) fn switch_construct(&mut self) -> PResult {
        self.start_anchored(TokenType::LiteralSwitch);
        self.par_expression()?;
        self.expect(TokenType::LCurly)?;
        while !self.at(TokenType::RCurly) {
            if self.at(TokenType::Eof) {
                return Err(self.error("}"));
            }
            self.switch_block_entry()?;
        }
        self.bump();
        self.finish();
        Ok(())
    }

    /// One `CASE_GROUP` or `SWITCH_RULE`.
    fn switch_block_entry(&mut self) -> PResult {
        let checkpoint = self.checkpoint();
        if self.switch_label()? == LabelEnd::Arrow {
            self.bump_as(TokenType::Lambda);
            match self.peek() {
                TokenType::LCurly => self.block()?,
                TokenType::LiteralThrow => self.statement()?,
                _ => {
                    self.expr()?;
                    self.expect(TokenType::Semi)?;
                }
            }
            self.start_at(checkpoint, TokenType::SwitchRule);
            self.finish();
            return Ok(());
        }
        while matches!(
            self.peek(),
            TokenType::LiteralCase | TokenType::LiteralDefault
        ) {
            if self.switch_label()? == LabelEnd::Arrow {
                return Err(self.error(":"));
            }
        }
        if !matches!(self.peek(), TokenType::RCurly | TokenType::Eof) {
            self.start(TokenType::Slist);
            while !matches!(
                self.peek(),
                TokenType::LiteralCase | TokenType::LiteralDefault | TokenType::RCurly | TokenType::Eof
            ) {
                self.block_statement()?;
            }
            self.finish();
        }
        self.start_at(checkpoint, TokenType::CaseGroup);
        self.finish();
        Ok(())
    }

    /// A `case ...` or `default` label, including a `:` terminator.
    fn switch_label(&mut self) -> PResult<LabelEnd> {
        match self.peek() {
            TokenType::LiteralDefault => self.start_anchored(TokenType::LiteralDefault),
            TokenType::LiteralCase => {
                self.start_anchored(TokenType::LiteralCase);
                loop {
                    self.case_item()?;
                    if !self.eat(TokenType::Comma) {
                        break;
                    }
                }
            }
            _ => return Err(self.error("case or default")),
        }
        let end = match self.peek() {
            TokenType::Colon => {
                self.bump();
                LabelEnd::Colon
            }
            TokenType::Lambda => LabelEnd::Arrow,
            _ => return Err(self.error(": or ->")),
        };
        self.finish();
        Ok(end)
    }

    fn case_item(&mut self) -> PResult {
        if self.at(TokenType::LiteralDefault) {
            self.bump();
            return Ok(());
        }
        if self.pattern_ahead(0) {
            let checkpoint = self.checkpoint();
            self.pattern()?;
            if self.at_word("when") {
                self.start_anchored(TokenType::LiteralWhen);
                self.conditional_expr()?;
                self.finish();
                self.start_at(checkpoint, TokenType::PatternDef);
                self.finish();
            }
            return Ok(());
        }
        self.conditional_expr()
    }
}
