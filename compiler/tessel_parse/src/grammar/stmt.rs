//! Blocks and statements.

use tessel_ir::{NodeId, NodeKind, NodeSpec, Role, Span};
use tessel_lexer::TokenKind;

use super::{Children, Parser};
use crate::ParseError;

impl Parser<'_, '_> {
    pub(super) fn block(&mut self) -> Result<NodeId, ParseError> {
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut children = Children::new();
        loop {
            self.comments_into(&mut children);
            if self.cursor.check(TokenKind::RBrace) {
                break;
            }
            children.push((Role::Statement, self.statement()?));
        }
        let close = self.cursor.expect(TokenKind::RBrace)?;
        let spec = NodeSpec::new(NodeKind::Block)
            .position(self.plain(Span::new(open.span.start, close.span.end)));
        Ok(self.finish(spec, children))
    }

    /// Statement; an expression statement's span excludes its `;`.
    fn statement(&mut self) -> Result<NodeId, ParseError> {
        match self.cursor.peek_kind() {
            Some(TokenKind::Return) => self.return_statement(),
            Some(TokenKind::LBrace) => self.block(),
            _ if self.at_local_variable() => {
                let header = self.header()?;
                let ty = self.type_reference()?;
                let name = self.cursor.expect(TokenKind::Ident)?;
                self.variable(header, NodeKind::LocalVariable, ty, name, true)
            }
            _ => {
                let expr = self.expression()?;
                self.cursor.expect(TokenKind::Semicolon)?;
                Ok(expr)
            }
        }
    }

    fn return_statement(&mut self) -> Result<NodeId, ParseError> {
        let keyword = self.cursor.expect(TokenKind::Return)?;
        let mut children = Children::new();
        if !self.cursor.check(TokenKind::Semicolon) {
            children.push((Role::Expression, self.expression()?));
        }
        let semi = self.cursor.expect(TokenKind::Semicolon)?;
        let spec = NodeSpec::new(NodeKind::Return)
            .position(self.plain(Span::new(keyword.span.start, semi.span.end)));
        Ok(self.finish(spec, children))
    }

    /// Lookahead for `[modifiers] Type<Args> name`.
    fn at_local_variable(&self) -> bool {
        let mut n = 0;
        loop {
            match self.cursor.peek_nth_kind(n) {
                Some(kind) if kind.modifier().is_some() => n += 1,
                Some(TokenKind::At) => n += 2,
                _ => break,
            }
        }
        if self.cursor.peek_nth_kind(n) != Some(TokenKind::Ident) {
            return false;
        }
        n += 1;
        if self.cursor.peek_nth_kind(n) == Some(TokenKind::Lt) {
            let mut depth = 0usize;
            loop {
                match self.cursor.peek_nth_kind(n) {
                    Some(TokenKind::Lt) => depth += 1,
                    Some(TokenKind::Gt) => {
                        depth -= 1;
                        if depth == 0 {
                            n += 1;
                            break;
                        }
                    }
                    Some(TokenKind::Ident | TokenKind::Comma) => {}
                    _ => return false,
                }
                n += 1;
            }
        }
        self.cursor.peek_nth_kind(n) == Some(TokenKind::Ident)
    }
}
