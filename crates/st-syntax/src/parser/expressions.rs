//! Expression parsing by precedence climbing.
//!
//! Binding powers come from the operator table the grammar derives from
//! `Expression`: a level `p` operator binds with `(2p, 2p + 1)` when it is
//! left-associative and `(2p + 1, 2p)` when it is right-associative, so
//! `**` groups to the right and everything else to the left. Prefix
//! operators only carry a right power.
//!
//! Operands and their postfix selectors (`.field`, `(args)`, `[index]`,
//! `^`) are parsed here directly; selectors bind tighter than any operator.

use crate::grammar::Production;
use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::parser::{CompletedMarker, Parser};

impl Parser<'_, '_> {
    /// Parses one expression. Returns `false` without consuming anything
    /// when the current token cannot start one.
    pub(crate) fn expr(&mut self) -> bool {
        let current = self.current();
        if !self.grammar.first(Production::Expression).contains(current) && !current.is_error() {
            return false;
        }
        if self.expr_bp(0).is_none() {
            self.missing("expression");
        }
        true
    }

    fn expr_bp(&mut self, min_bp: u8) -> Option<CompletedMarker> {
        let current = self.current();
        if self.too_deep() {
            if !self.grammar.first(Production::Expression).contains(current) {
                return None;
            }
            return self.skip_too_deep(true);
        }

        let mut lhs = match self.grammar.prefix_operator(current).copied() {
            Some(op) => {
                let (_, r_bp) = op.binding_power();
                let m = self.start();
                self.bump();
                if self.expr_bp(r_bp).is_none() {
                    self.missing("expression");
                }
                m.complete(self, op.node)
            }
            None => self.primary()?,
        };

        // Left-nested chains deepen the tree without recursing, so they
        // share the nesting limit through this count.
        let mut wrapped = 0usize;
        loop {
            let Some(op) = self.grammar.infix_operator(self.current()).copied() else {
                break;
            };
            let (l_bp, r_bp) = op.binding_power();
            if l_bp < min_bp {
                break;
            }
            if wrapped >= self.depth_left() {
                self.skip_too_deep(true);
                break;
            }

            let m = lhs.precede(self);
            self.bump();
            if self.expr_bp(r_bp).is_none() {
                self.missing("expression");
            }
            lhs = m.complete(self, op.node);
            wrapped += 1;
        }

        Some(lhs)
    }

    /// Parses an operand followed by any number of postfix selectors.
    pub(crate) fn primary(&mut self) -> Option<CompletedMarker> {
        let mut lhs = self.atom()?;
        let mut wrapped = 0usize;
        while matches!(
            self.current(),
            TokenKind::Dot | TokenKind::LParen | TokenKind::LBracket | TokenKind::Caret
        ) {
            if wrapped >= self.depth_left() {
                self.skip_too_deep(true);
                break;
            }
            lhs = self.postfix(lhs);
            wrapped += 1;
        }
        Some(lhs)
    }

    fn atom(&mut self) -> Option<CompletedMarker> {
        let kind = self.current();
        let node = match kind {
            _ if kind.is_literal() => {
                let m = self.start();
                self.bump();
                m.complete(self, SyntaxKind::Literal)
            }
            TokenKind::TypedLiteralPrefix => self.typed_literal(),
            _ if kind.is_name() => self.name_ref(),
            TokenKind::DirectAddress
            | TokenKind::KwNew
            | TokenKind::KwNewDunder
            | TokenKind::KwDeleteDunder => self.name_ref(),
            TokenKind::KwRef if self.peek_kind_n(1) != TokenKind::LParen => self.name_ref(),
            TokenKind::LParen => {
                let m = self.start();
                self.bump();
                if !self.expr() {
                    self.missing("expression");
                }
                self.expect(TokenKind::RParen);
                m.complete(self, SyntaxKind::ParenExpr)
            }
            TokenKind::KwThis => {
                let m = self.start();
                self.bump();
                m.complete(self, SyntaxKind::ThisExpr)
            }
            TokenKind::KwSuper => {
                let m = self.start();
                self.bump();
                m.complete(self, SyntaxKind::SuperExpr)
            }
            TokenKind::KwAdr | TokenKind::KwRef => {
                let m = self.start();
                self.bump();
                self.expect(TokenKind::LParen);
                if !self.expr() {
                    self.missing("expression");
                }
                self.expect(TokenKind::RParen);
                m.complete(self, SyntaxKind::AddrExpr)
            }
            TokenKind::KwSizeOf => self.size_of(),
            _ if kind.is_error() => {
                let m = self.start();
                self.bump();
                m.complete(self, SyntaxKind::Error)
            }
            _ => return None,
        };
        Some(node)
    }

    fn name_ref(&mut self) -> CompletedMarker {
        let m = self.start();
        self.bump();
        m.complete(self, SyntaxKind::NameRef)
    }

    /// `INT#5`, `REAL#-1.5`, `E_Color#Red`.
    fn typed_literal(&mut self) -> CompletedMarker {
        let m = self.start();
        self.bump();
        let signed = matches!(self.current(), TokenKind::Plus | TokenKind::Minus);
        if signed {
            self.bump();
        }
        let value = self.current();
        let numeric = matches!(value, TokenKind::IntLiteral | TokenKind::RealLiteral);
        if numeric || (!signed && (value.is_literal() || value.is_name())) {
            self.bump();
        } else if signed {
            self.missing("numeric literal");
        } else {
            self.missing("typed literal value");
        }
        m.complete(self, SyntaxKind::Literal)
    }

    /// `SIZEOF(type)` or `SIZEOF(expression)`. Names are taken as
    /// expressions; the two readings only differ for type syntax.
    fn size_of(&mut self) -> CompletedMarker {
        let m = self.start();
        self.bump();
        self.expect(TokenKind::LParen);
        let current = self.current();
        let type_syntax = current.is_type_keyword()
            || matches!(
                current,
                TokenKind::KwArray | TokenKind::KwPointer | TokenKind::KwRefTo
            );
        if type_syntax {
            self.production(Production::TypeRef);
        } else if !self.expr() {
            self.missing("type or expression");
        }
        self.expect(TokenKind::RParen);
        m.complete(self, SyntaxKind::SizeOfExpr)
    }

    fn postfix(&mut self, lhs: CompletedMarker) -> CompletedMarker {
        let m = lhs.precede(self);
        match self.current() {
            TokenKind::Dot => {
                self.bump();
                let current = self.current();
                if current.is_name() {
                    self.production(Production::Name);
                } else if matches!(current, TokenKind::IntLiteral | TokenKind::DirectAddress) {
                    // Bit access `x.3` and partial access `x.%X3`.
                    let field = self.start();
                    self.bump();
                    field.complete(self, SyntaxKind::Literal);
                } else {
                    self.missing("field name");
                }
                m.complete(self, SyntaxKind::FieldExpr)
            }
            TokenKind::LParen => {
                self.production(Production::ArgList);
                m.complete(self, SyntaxKind::CallExpr)
            }
            TokenKind::LBracket => {
                self.bump();
                if !self.expr() {
                    self.missing("expression");
                }
                while self.eat(TokenKind::Comma) {
                    if !self.expr() {
                        self.missing("expression");
                    }
                }
                self.expect(TokenKind::RBracket);
                m.complete(self, SyntaxKind::IndexExpr)
            }
            _ => {
                self.bump();
                m.complete(self, SyntaxKind::DerefExpr)
            }
        }
    }
}
