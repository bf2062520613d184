//! Type references, type parameters, annotations and declaration headers.

use tessel_ir::{Modifiers, NodeId, NodeKind, NodeSpec, Role, Span};
use tessel_lexer::TokenKind;

use super::{Children, Header, Parser};
use crate::ParseError;

impl Parser<'_, '_> {
    /// `Name` or `Name<Arg, ...>`.
    pub(super) fn type_reference(&mut self) -> Result<NodeId, ParseError> {
        let name = self.cursor.expect(TokenKind::Ident)?;
        let mut end = name.span.end;
        let mut children = Children::new();
        if self.cursor.eat(TokenKind::Lt).is_some() {
            loop {
                children.push((Role::TypeArgument, self.type_reference()?));
                if self.cursor.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            end = self.cursor.expect(TokenKind::Gt)?.span.end;
        }
        let spec = NodeSpec::new(NodeKind::TypeReference)
            .position(self.plain(Span::new(name.span.start, end)))
            .name(self.cursor.slice(name.span));
        Ok(self.finish(spec, children))
    }

    /// `<T, U>`
    pub(super) fn type_parameters(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.cursor.expect(TokenKind::Lt)?;
        let mut params = Vec::new();
        loop {
            let name = self.cursor.expect(TokenKind::Ident)?;
            let spec = NodeSpec::new(NodeKind::TypeParameter)
                .position(self.plain(name.span))
                .name(self.cursor.slice(name.span));
            params.push(self.tree.alloc(spec));
            if self.cursor.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.cursor.expect(TokenKind::Gt)?;
        Ok(params)
    }

    fn annotation(&mut self) -> Result<NodeId, ParseError> {
        let at = self.cursor.expect(TokenKind::At)?;
        let name = self.cursor.expect(TokenKind::Ident)?;
        let spec = NodeSpec::new(NodeKind::Annotation)
            .position(self.plain(Span::new(at.span.start, name.span.end)))
            .name(self.cursor.slice(name.span));
        Ok(self.tree.alloc(spec))
    }

    pub(super) fn header(&mut self) -> Result<Header, ParseError> {
        let start = self.cursor.next_start();
        let mut end = start;
        let mut modifiers = Modifiers::new();
        let mut annotations = Vec::new();
        loop {
            if self.cursor.check(TokenKind::At) {
                let annotation = self.annotation()?;
                end = self.span_of(annotation).end;
                annotations.push(annotation);
            } else if let Some(modifier) = self.cursor.peek_kind().and_then(TokenKind::modifier) {
                if let Some(token) = self.cursor.bump() {
                    end = token.span.end;
                }
                modifiers.push(modifier);
            } else {
                break;
            }
        }
        Ok(Header {
            start,
            span: Span::new(start, end),
            modifiers,
            annotations,
        })
    }
}

impl Header {
    /// Annotation children, first in source order.
    pub(super) fn annotation_children(&self) -> Children {
        self.annotations
            .iter()
            .map(|&annotation| (Role::Annotation, annotation))
            .collect()
    }
}
