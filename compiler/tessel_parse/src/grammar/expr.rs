//! Expressions: assignment, arithmetic, invocations and atoms.

use tessel_ir::{NodeId, NodeKind, NodeSpec, Role, Span};
use tessel_lexer::{Token, TokenKind};

use super::{Children, Parser};
use crate::ParseError;

impl Parser<'_, '_> {
    pub(super) fn expression(&mut self) -> Result<NodeId, ParseError> {
        let target = self.additive()?;
        if self.tree.kind(target) == NodeKind::VariableRead
            && self.cursor.eat(TokenKind::Eq).is_some()
        {
            let value = self.expression()?;
            let span = self.span_of(target).merge(self.span_of(value));
            let spec = NodeSpec::new(NodeKind::Assignment).position(self.plain(span));
            return Ok(self.finish(
                spec,
                vec![(Role::Assigned, target), (Role::Assignment, value)],
            ));
        }
        Ok(target)
    }

    fn additive(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.multiplicative()?;
        while matches!(
            self.cursor.peek_kind(),
            Some(TokenKind::Plus | TokenKind::Minus)
        ) {
            let Some(op) = self.cursor.bump() else { break };
            let right = self.multiplicative()?;
            left = self.binary(left, op, right);
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.primary()?;
        while matches!(
            self.cursor.peek_kind(),
            Some(TokenKind::Star | TokenKind::Slash)
        ) {
            let Some(op) = self.cursor.bump() else { break };
            let right = self.primary()?;
            left = self.binary(left, op, right);
        }
        Ok(left)
    }

    fn binary(&mut self, left: NodeId, op: Token, right: NodeId) -> NodeId {
        let span = self.span_of(left).merge(self.span_of(right));
        let spec = NodeSpec::new(NodeKind::BinaryOperator)
            .position(self.plain(span))
            .text(self.cursor.slice(op.span));
        self.finish(
            spec,
            vec![(Role::LeftOperand, left), (Role::RightOperand, right)],
        )
    }

    fn primary(&mut self) -> Result<NodeId, ParseError> {
        match self.cursor.peek_kind() {
            Some(kind) if kind.is_literal() => {
                let Some(token) = self.cursor.bump() else {
                    return Err(self.cursor.unexpected("expression"));
                };
                let spec = NodeSpec::new(NodeKind::Literal)
                    .position(self.plain(token.span))
                    .text(self.cursor.slice(token.span));
                Ok(self.tree.alloc(spec))
            }
            Some(TokenKind::Ident) => {
                let name = self.cursor.expect(TokenKind::Ident)?;
                let mut expr = if self.cursor.check(TokenKind::LParen) {
                    self.invocation(None, name)?
                } else {
                    let spec = NodeSpec::new(NodeKind::VariableRead)
                        .position(self.plain(name.span))
                        .name(self.cursor.slice(name.span));
                    self.tree.alloc(spec)
                };
                while self.cursor.eat(TokenKind::Dot).is_some() {
                    let name = self.cursor.expect(TokenKind::Ident)?;
                    expr = self.invocation(Some(expr), name)?;
                }
                Ok(expr)
            }
            _ => Err(self.cursor.unexpected("expression")),
        }
    }

    /// `name(args)`, or `target.name(args)` when `target` is given.
    fn invocation(&mut self, target: Option<NodeId>, name: Token) -> Result<NodeId, ParseError> {
        let mut children = Children::new();
        let start = match target {
            Some(target) => {
                children.push((Role::Expression, target));
                self.span_of(target).start
            }
            None => name.span.start,
        };
        self.cursor.expect(TokenKind::LParen)?;
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                children.push((Role::Argument, self.expression()?));
                if self.cursor.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        let close = self.cursor.expect(TokenKind::RParen)?;
        let spec = NodeSpec::new(NodeKind::Invocation)
            .position(self.plain(Span::new(start, close.span.end)))
            .name(self.cursor.slice(name.span));
        Ok(self.finish(spec, children))
    }
}
