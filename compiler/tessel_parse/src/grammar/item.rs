//! Declarations: types, members and parameters.

use tessel_ir::{NodeId, NodeKind, NodeSpec, Role, SourcePosition, Span};
use tessel_lexer::{Token, TokenKind};

use super::{Children, Header, Parser};
use crate::ParseError;

impl Parser<'_, '_> {
    pub(super) fn type_declaration(&mut self) -> Result<NodeId, ParseError> {
        let header = self.header()?;
        self.type_declaration_rest(header)
    }

    fn type_declaration_rest(&mut self, header: Header) -> Result<NodeId, ParseError> {
        let kind = if self.cursor.eat(TokenKind::Class).is_some() {
            NodeKind::Class
        } else if self.cursor.eat(TokenKind::Interface).is_some() {
            NodeKind::Interface
        } else {
            return Err(self.cursor.unexpected("`class` or `interface`"));
        };
        let name = self.cursor.expect(TokenKind::Ident)?;

        let mut children = header.annotation_children();
        if self.cursor.check(TokenKind::Lt) {
            for param in self.type_parameters()? {
                children.push((Role::TypeParameter, param));
            }
        }
        // An interface extends other interfaces; a class extends one class.
        let extends_role = match kind {
            NodeKind::Interface => Role::Interface,
            _ => Role::SuperType,
        };
        if self.cursor.eat(TokenKind::Extends).is_some() {
            self.type_list(extends_role, &mut children)?;
        }
        if kind == NodeKind::Class && self.cursor.eat(TokenKind::Implements).is_some() {
            self.type_list(Role::Interface, &mut children)?;
        }

        let open = self.cursor.expect(TokenKind::LBrace)?;
        loop {
            self.comments_into(&mut children);
            if self.cursor.check(TokenKind::RBrace) {
                break;
            }
            children.push((Role::TypeMember, self.member()?));
        }
        let close = self.cursor.expect(TokenKind::RBrace)?;

        let position = SourcePosition::BodyHolder {
            file: self.file,
            span: Span::new(header.start, close.span.end),
            modifiers: header.span,
            name: name.span,
            body: Span::new(open.span.start, close.span.end),
        };
        let spec = NodeSpec::new(kind)
            .position(position)
            .name(self.cursor.slice(name.span))
            .modifiers(header.modifiers.iter().copied());
        Ok(self.finish(spec, children))
    }

    fn type_list(&mut self, role: Role, children: &mut Children) -> Result<(), ParseError> {
        loop {
            children.push((role, self.type_reference()?));
            if self.cursor.eat(TokenKind::Comma).is_none() {
                return Ok(());
            }
        }
    }

    fn member(&mut self) -> Result<NodeId, ParseError> {
        let header = self.header()?;
        if matches!(
            self.cursor.peek_kind(),
            Some(TokenKind::Class | TokenKind::Interface)
        ) {
            return self.type_declaration_rest(header);
        }

        let type_params = if self.cursor.check(TokenKind::Lt) {
            self.type_parameters()?
        } else {
            Vec::new()
        };

        if self.cursor.check(TokenKind::Ident)
            && self.cursor.peek_nth_kind(1) == Some(TokenKind::LParen)
        {
            let name = self.cursor.expect(TokenKind::Ident)?;
            return self.executable(header, NodeKind::Constructor, type_params, None, name);
        }

        let ty = self.type_reference()?;
        let name = self.cursor.expect(TokenKind::Ident)?;
        if self.cursor.check(TokenKind::LParen) {
            return self.executable(header, NodeKind::Method, type_params, Some(ty), name);
        }
        if !type_params.is_empty() {
            return Err(self.cursor.unexpected("`(`"));
        }
        self.variable(header, NodeKind::Field, ty, name, true)
    }

    fn executable(
        &mut self,
        header: Header,
        kind: NodeKind,
        type_params: Vec<NodeId>,
        ty: Option<NodeId>,
        name: Token,
    ) -> Result<NodeId, ParseError> {
        let mut children = header.annotation_children();
        children.extend(type_params.into_iter().map(|p| (Role::TypeParameter, p)));
        if let Some(ty) = ty {
            children.push((Role::Type, ty));
        }

        self.cursor.expect(TokenKind::LParen)?;
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                children.push((Role::Parameter, self.parameter()?));
                if self.cursor.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.cursor.expect(TokenKind::RParen)?;
        if self.cursor.eat(TokenKind::Throws).is_some() {
            self.type_list(Role::Thrown, &mut children)?;
        }

        let position = if self.cursor.check(TokenKind::LBrace) {
            let body = self.block()?;
            let body_span = self.span_of(body);
            children.push((Role::Body, body));
            SourcePosition::BodyHolder {
                file: self.file,
                span: Span::new(header.start, body_span.end),
                modifiers: header.span,
                name: name.span,
                body: body_span,
            }
        } else {
            let semi = self.cursor.expect(TokenKind::Semicolon)?;
            SourcePosition::Declaration {
                file: self.file,
                span: Span::new(header.start, semi.span.end),
                modifiers: header.span,
                name: name.span,
            }
        };

        let spec = NodeSpec::new(kind)
            .position(position)
            .name(self.cursor.slice(name.span))
            .modifiers(header.modifiers.iter().copied());
        Ok(self.finish(spec, children))
    }

    fn parameter(&mut self) -> Result<NodeId, ParseError> {
        let header = self.header()?;
        let ty = self.type_reference()?;
        let name = self.cursor.expect(TokenKind::Ident)?;
        self.variable(header, NodeKind::Parameter, ty, name, false)
    }

    /// Rest of a field, parameter or local variable after its name.
    ///
    /// A `terminated` declaration ends with `;`, which its span includes.
    pub(super) fn variable(
        &mut self,
        header: Header,
        kind: NodeKind,
        ty: NodeId,
        name: Token,
        terminated: bool,
    ) -> Result<NodeId, ParseError> {
        let mut children = header.annotation_children();
        children.push((Role::Type, ty));

        let mut end = name.span.end;
        if self.cursor.eat(TokenKind::Eq).is_some() {
            let value = self.expression()?;
            end = self.span_of(value).end;
            children.push((Role::DefaultExpression, value));
        }
        if terminated {
            end = self.cursor.expect(TokenKind::Semicolon)?.span.end;
        }

        let position = SourcePosition::Declaration {
            file: self.file,
            span: Span::new(header.start, end),
            modifiers: header.span,
            name: name.span,
        };
        let spec = NodeSpec::new(kind)
            .position(position)
            .name(self.cursor.slice(name.span))
            .modifiers(header.modifiers.iter().copied());
        Ok(self.finish(spec, children))
    }
}
