//! Recursive-descent parser.
//!
//! Parses the token stream into the range-annotated AST. Statements that
//! begin with `{` are blocks, never object literals, and a statement may
//! not begin with the `function` keyword unless it is a declaration —
//! both following the usual C-style script grammar. Semicolons are
//! required except immediately before `}` or end of input.

use rebind_core::Span;

use crate::ast::{
    ArrayLit, AssignExpr, AssignOp, BinaryExpr, BinaryOp, Block, BoolLit, CallExpr, CondExpr,
    DeclKind, Declarator, Expr, ExprStmt, ForInit, ForStmt, Function, Ident, IfStmt, MemberExpr,
    MemberProp, NumberLit, ObjectLit, Program, PropKey, Property, ReturnStmt, Stmt, StrLit,
    UnaryExpr, UnaryOp, VarDecl, WhileStmt,
};
use crate::error::ParseError;
use crate::token::{string_value, tokenize, Keyword, Punct, Token, TokenKind};

/// Parse script source into a [`Program`].
///
/// # Errors
///
/// Returns the first tokenizer or grammar error encountered; nothing is
/// returned for partially parsed input.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
    };
    parser.parse_program()
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'src> Parser<'src> {
    // ------------------------------------------------------------------
    // Token helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn lexeme(&self, span: Span) -> &'src str {
        &self.source[span.start..span.end]
    }

    fn at_punct(&self, punct: Punct) -> bool {
        matches!(self.peek(), Some(t) if t.kind == TokenKind::Punct(punct))
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        matches!(self.peek(), Some(t) if t.kind == TokenKind::Keyword(kw))
    }

    fn eat_punct(&mut self, punct: Punct) -> Option<Span> {
        if self.at_punct(punct) {
            self.advance().map(|t| t.span)
        } else {
            None
        }
    }

    fn eat_keyword(&mut self, kw: Keyword) -> Option<Span> {
        if self.at_keyword(kw) {
            self.advance().map(|t| t.span)
        } else {
            None
        }
    }

    fn expect_punct(&mut self, punct: Punct) -> Result<Span, ParseError> {
        self.eat_punct(punct)
            .ok_or_else(|| self.unexpected(&format!("'{}'", punct.as_str())))
    }

    fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Ident => {
                self.advance();
                Ok(Ident::new(self.lexeme(t.span), t.span))
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(t) => ParseError::UnexpectedToken {
                found: self.lexeme(t.span).to_string(),
                expected: expected.to_string(),
                span: t.span,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }

    /// Consume a statement terminator.
    ///
    /// A real `;` is consumed and returned; `}` and end of input are
    /// accepted without consuming anything.
    fn eat_semi(&mut self) -> Result<Option<Span>, ParseError> {
        if let Some(span) = self.eat_punct(Punct::Semi) {
            return Ok(Some(span));
        }
        match self.peek() {
            None => Ok(None),
            Some(t) if t.kind == TokenKind::Punct(Punct::RBrace) => Ok(None),
            Some(_) => Err(self.unexpected("';'")),
        }
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        while self.peek().is_some() {
            body.push(self.parse_stmt()?);
        }
        Ok(Program {
            body,
            span: Span::new(0, self.source.len()),
        })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("a statement"));
        };
        match token.kind {
            TokenKind::Keyword(Keyword::Var) => self.parse_var_decl_stmt(DeclKind::Var),
            TokenKind::Keyword(Keyword::Let) => self.parse_var_decl_stmt(DeclKind::Let),
            TokenKind::Keyword(Keyword::Const) => self.parse_var_decl_stmt(DeclKind::Const),
            TokenKind::Keyword(Keyword::Function) => self.parse_function_decl(),
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::While) => self.parse_while(),
            TokenKind::Keyword(Keyword::For) => self.parse_for(),
            TokenKind::Keyword(Keyword::Return) => self.parse_return(),
            TokenKind::Keyword(Keyword::Break) => self.parse_jump(Keyword::Break),
            TokenKind::Keyword(Keyword::Continue) => self.parse_jump(Keyword::Continue),
            TokenKind::Punct(Punct::LBrace) => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::Punct(Punct::Semi) => {
                self.advance();
                Ok(Stmt::Empty(token.span))
            }
            _ => {
                let expr = self.parse_expr()?;
                let mut span = expr.span();
                if let Some(semi) = self.eat_semi()? {
                    span.end = semi.end;
                }
                Ok(Stmt::Expr(ExprStmt { expr, span }))
            }
        }
    }

    fn parse_var_decl(&mut self, kind: DeclKind) -> Result<VarDecl, ParseError> {
        // Caller has checked the keyword.
        let start = match self.advance() {
            Some(t) => t.span.start,
            None => return Err(self.unexpected(kind.as_str())),
        };
        let mut declarators = Vec::new();
        loop {
            let name = self.expect_ident()?;
            let mut span = name.span;
            let init = if self.eat_punct(Punct::Assign).is_some() {
                let value = self.parse_assignment()?;
                span = span.to(&value.span());
                Some(value)
            } else {
                None
            };
            declarators.push(Declarator { name, init, span });
            if self.eat_punct(Punct::Comma).is_none() {
                break;
            }
        }
        let end = declarators
            .last()
            .map(|d| d.span.end)
            .unwrap_or(start);
        Ok(VarDecl {
            kind,
            declarators,
            span: Span::new(start, end),
        })
    }

    fn parse_var_decl_stmt(&mut self, kind: DeclKind) -> Result<Stmt, ParseError> {
        let mut decl = self.parse_var_decl(kind)?;
        if let Some(semi) = self.eat_semi()? {
            decl.span.end = semi.end;
        }
        Ok(Stmt::VarDecl(decl))
    }

    fn parse_function_decl(&mut self) -> Result<Stmt, ParseError> {
        let start = match self.advance() {
            Some(t) => t.span.start,
            None => return Err(self.unexpected("'function'")),
        };
        let name = self.expect_ident()?;
        let (params, body) = self.parse_function_rest()?;
        let span = Span::new(start, body.span.end);
        Ok(Stmt::FunctionDecl(Function {
            name: Some(name),
            params,
            body,
            span,
        }))
    }

    fn parse_function_rest(&mut self) -> Result<(Vec<Ident>, Block), ParseError> {
        self.expect_punct(Punct::LParen)?;
        let mut params = Vec::new();
        if !self.at_punct(Punct::RParen) {
            loop {
                params.push(self.expect_ident()?);
                if self.eat_punct(Punct::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect_punct(Punct::RParen)?;
        let body = self.parse_block()?;
        Ok((params, body))
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.expect_punct(Punct::LBrace)?;
        let mut body = Vec::new();
        while self.peek().is_some() && !self.at_punct(Punct::RBrace) {
            body.push(self.parse_stmt()?);
        }
        let close = self.expect_punct(Punct::RBrace)?;
        Ok(Block {
            body,
            span: Span::new(open.start, close.end),
        })
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = match self.advance() {
            Some(t) => t.span.start,
            None => return Err(self.unexpected("'if'")),
        };
        self.expect_punct(Punct::LParen)?;
        let test = self.parse_expr()?;
        self.expect_punct(Punct::RParen)?;
        let consequent = Box::new(self.parse_stmt()?);
        let mut end = consequent.span().end;
        let alternate = if self.eat_keyword(Keyword::Else).is_some() {
            let stmt = Box::new(self.parse_stmt()?);
            end = stmt.span().end;
            Some(stmt)
        } else {
            None
        };
        Ok(Stmt::If(IfStmt {
            test,
            consequent,
            alternate,
            span: Span::new(start, end),
        }))
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = match self.advance() {
            Some(t) => t.span.start,
            None => return Err(self.unexpected("'while'")),
        };
        self.expect_punct(Punct::LParen)?;
        let test = self.parse_expr()?;
        self.expect_punct(Punct::RParen)?;
        let body = Box::new(self.parse_stmt()?);
        let span = Span::new(start, body.span().end);
        Ok(Stmt::While(WhileStmt { test, body, span }))
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = match self.advance() {
            Some(t) => t.span.start,
            None => return Err(self.unexpected("'for'")),
        };
        self.expect_punct(Punct::LParen)?;
        let init = if self.at_punct(Punct::Semi) {
            None
        } else if self.at_keyword(Keyword::Var) {
            Some(ForInit::VarDecl(self.parse_var_decl(DeclKind::Var)?))
        } else if self.at_keyword(Keyword::Let) {
            Some(ForInit::VarDecl(self.parse_var_decl(DeclKind::Let)?))
        } else if self.at_keyword(Keyword::Const) {
            Some(ForInit::VarDecl(self.parse_var_decl(DeclKind::Const)?))
        } else {
            Some(ForInit::Expr(self.parse_expr()?))
        };
        self.expect_punct(Punct::Semi)?;
        let test = if self.at_punct(Punct::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect_punct(Punct::Semi)?;
        let update = if self.at_punct(Punct::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect_punct(Punct::RParen)?;
        let body = Box::new(self.parse_stmt()?);
        let span = Span::new(start, body.span().end);
        Ok(Stmt::For(ForStmt {
            init,
            test,
            update,
            body,
            span,
        }))
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let kw = match self.advance() {
            Some(t) => t.span,
            None => return Err(self.unexpected("'return'")),
        };
        let mut end = kw.end;
        let argument = if self.at_punct(Punct::Semi) || self.at_punct(Punct::RBrace) || self.peek().is_none() {
            None
        } else {
            let expr = self.parse_expr()?;
            end = expr.span().end;
            Some(expr)
        };
        if let Some(semi) = self.eat_semi()? {
            end = semi.end;
        }
        Ok(Stmt::Return(ReturnStmt {
            argument,
            span: Span::new(kw.start, end),
        }))
    }

    fn parse_jump(&mut self, kw: Keyword) -> Result<Stmt, ParseError> {
        let span = match self.advance() {
            Some(t) => t.span,
            None => return Err(self.unexpected(kw.as_str())),
        };
        let end = self.eat_semi()?.map(|s| s.end).unwrap_or(span.end);
        let span = Span::new(span.start, end);
        Ok(match kw {
            Keyword::Continue => Stmt::Continue(span),
            _ => Stmt::Break(span),
        })
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_conditional()?;
        let op = match self.peek().map(|t| t.kind) {
            Some(TokenKind::Punct(Punct::Assign)) => Some(AssignOp::Assign),
            Some(TokenKind::Punct(Punct::PlusAssign)) => Some(AssignOp::AddAssign),
            Some(TokenKind::Punct(Punct::MinusAssign)) => Some(AssignOp::SubAssign),
            Some(TokenKind::Punct(Punct::StarAssign)) => Some(AssignOp::MulAssign),
            Some(TokenKind::Punct(Punct::SlashAssign)) => Some(AssignOp::DivAssign),
            _ => None,
        };
        let Some(op) = op else {
            return Ok(expr);
        };
        if !matches!(expr, Expr::Ident(_) | Expr::Member(_)) {
            return Err(ParseError::InvalidAssignmentTarget { span: expr.span() });
        }
        self.advance();
        let value = self.parse_assignment()?;
        let span = expr.span().to(&value.span());
        Ok(Expr::Assign(Box::new(AssignExpr {
            op,
            target: expr,
            value,
            span,
        })))
    }

    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let test = self.parse_binary(0)?;
        if self.eat_punct(Punct::Question).is_none() {
            return Ok(test);
        }
        let consequent = self.parse_assignment()?;
        self.expect_punct(Punct::Colon)?;
        let alternate = self.parse_assignment()?;
        let span = test.span().to(&alternate.span());
        Ok(Expr::Conditional(Box::new(CondExpr {
            test,
            consequent,
            alternate,
            span,
        })))
    }

    fn peek_binary_op(&self) -> Option<(BinaryOp, u8)> {
        let TokenKind::Punct(punct) = self.peek()?.kind else {
            return None;
        };
        Some(match punct {
            Punct::OrOr => (BinaryOp::Or, 1),
            Punct::AndAnd => (BinaryOp::And, 2),
            Punct::EqEq => (BinaryOp::EqEq, 3),
            Punct::NotEq => (BinaryOp::NotEq, 3),
            Punct::StrictEq => (BinaryOp::StrictEq, 3),
            Punct::StrictNotEq => (BinaryOp::StrictNotEq, 3),
            Punct::Lt => (BinaryOp::Lt, 4),
            Punct::Gt => (BinaryOp::Gt, 4),
            Punct::Le => (BinaryOp::Le, 4),
            Punct::Ge => (BinaryOp::Ge, 4),
            Punct::Plus => (BinaryOp::Add, 5),
            Punct::Minus => (BinaryOp::Sub, 5),
            Punct::Star => (BinaryOp::Mul, 6),
            Punct::Slash => (BinaryOp::Div, 6),
            Punct::Percent => (BinaryOp::Rem, 6),
            _ => return None,
        })
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some((op, prec)) = self.peek_binary_op() {
            if prec < min_prec {
                break;
            }
            self.advance();
            let right = self.parse_binary(prec + 1)?;
            let span = left.span().to(&right.span());
            left = Expr::Binary(Box::new(BinaryExpr {
                op,
                left,
                right,
                span,
            }));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek().map(|t| t.kind) {
            Some(TokenKind::Punct(Punct::Minus)) => Some(UnaryOp::Neg),
            Some(TokenKind::Punct(Punct::Plus)) => Some(UnaryOp::Pos),
            Some(TokenKind::Punct(Punct::Bang)) => Some(UnaryOp::Not),
            Some(TokenKind::Keyword(Keyword::Typeof)) => Some(UnaryOp::Typeof),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_postfix();
        };
        let start = match self.advance() {
            Some(t) => t.span.start,
            None => return Err(self.unexpected("an expression")),
        };
        let argument = self.parse_unary()?;
        let span = Span::new(start, argument.span().end);
        Ok(Expr::Unary(Box::new(UnaryExpr { op, argument, span })))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat_punct(Punct::LParen).is_some() {
                let mut args = Vec::new();
                if !self.at_punct(Punct::RParen) {
                    loop {
                        args.push(self.parse_assignment()?);
                        if self.eat_punct(Punct::Comma).is_none() {
                            break;
                        }
                    }
                }
                let close = self.expect_punct(Punct::RParen)?;
                let span = Span::new(expr.span().start, close.end);
                expr = Expr::Call(Box::new(CallExpr {
                    callee: expr,
                    args,
                    span,
                }));
            } else if self.eat_punct(Punct::Dot).is_some() {
                let property = self.expect_ident()?;
                let span = Span::new(expr.span().start, property.span.end);
                expr = Expr::Member(Box::new(MemberExpr {
                    object: expr,
                    property: MemberProp::Dot(property),
                    span,
                }));
            } else if self.eat_punct(Punct::LBracket).is_some() {
                let index = self.parse_expr()?;
                let close = self.expect_punct(Punct::RBracket)?;
                let span = Span::new(expr.span().start, close.end);
                expr = Expr::Member(Box::new(MemberExpr {
                    object: expr,
                    property: MemberProp::Computed(index),
                    span,
                }));
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("an expression"));
        };
        match token.kind {
            TokenKind::Ident => {
                self.advance();
                Ok(Expr::Ident(Ident::new(self.lexeme(token.span), token.span)))
            }
            TokenKind::Number => {
                self.advance();
                let value = self
                    .lexeme(token.span)
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumber { span: token.span })?;
                Ok(Expr::Number(NumberLit {
                    value,
                    span: token.span,
                }))
            }
            TokenKind::Str => {
                self.advance();
                Ok(Expr::Str(StrLit {
                    value: string_value(self.lexeme(token.span)),
                    span: token.span,
                }))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::Bool(BoolLit {
                    value: true,
                    span: token.span,
                }))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::Bool(BoolLit {
                    value: false,
                    span: token.span,
                }))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::Null(token.span))
            }
            TokenKind::Keyword(Keyword::Function) => {
                self.advance();
                let name = if matches!(self.peek(), Some(t) if t.kind == TokenKind::Ident) {
                    Some(self.expect_ident()?)
                } else {
                    None
                };
                let (params, body) = self.parse_function_rest()?;
                let span = Span::new(token.span.start, body.span.end);
                Ok(Expr::Function(Box::new(Function {
                    name,
                    params,
                    body,
                    span,
                })))
            }
            TokenKind::Punct(Punct::LParen) => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect_punct(Punct::RParen)?;
                Ok(expr)
            }
            TokenKind::Punct(Punct::LBracket) => {
                self.advance();
                let mut elements = Vec::new();
                if !self.at_punct(Punct::RBracket) {
                    loop {
                        elements.push(self.parse_assignment()?);
                        if self.eat_punct(Punct::Comma).is_none() {
                            break;
                        }
                    }
                }
                let close = self.expect_punct(Punct::RBracket)?;
                Ok(Expr::Array(ArrayLit {
                    elements,
                    span: Span::new(token.span.start, close.end),
                }))
            }
            TokenKind::Punct(Punct::LBrace) => {
                self.advance();
                let mut properties = Vec::new();
                if !self.at_punct(Punct::RBrace) {
                    loop {
                        properties.push(self.parse_property()?);
                        if self.eat_punct(Punct::Comma).is_none() {
                            break;
                        }
                    }
                }
                let close = self.expect_punct(Punct::RBrace)?;
                Ok(Expr::Object(ObjectLit {
                    properties,
                    span: Span::new(token.span.start, close.end),
                }))
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_property(&mut self) -> Result<Property, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("a property key"));
        };
        let key = match token.kind {
            TokenKind::Ident => {
                self.advance();
                PropKey::Ident(Ident::new(self.lexeme(token.span), token.span))
            }
            TokenKind::Str => {
                self.advance();
                PropKey::Str(StrLit {
                    value: string_value(self.lexeme(token.span)),
                    span: token.span,
                })
            }
            TokenKind::Number => {
                self.advance();
                let value = self
                    .lexeme(token.span)
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumber { span: token.span })?;
                PropKey::Number(NumberLit {
                    value,
                    span: token.span,
                })
            }
            _ => return Err(self.unexpected("a property key")),
        };
        self.expect_punct(Punct::Colon)?;
        let value = self.parse_assignment()?;
        let span = Span::new(token.span.start, value.span().end);
        Ok(Property { key, value, span })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_statement_spans() {
        let program = parse("var x; x; x = 42").unwrap();
        assert_eq!(program.span, Span::new(0, 16));
        assert_eq!(program.body.len(), 3);

        let Stmt::VarDecl(decl) = &program.body[0] else {
            panic!("expected var declaration");
        };
        assert_eq!(decl.kind, DeclKind::Var);
        assert_eq!(decl.declarators[0].name.name, "x");
        assert_eq!(decl.declarators[0].name.span, Span::new(4, 5));

        let Stmt::Expr(read) = &program.body[1] else {
            panic!("expected expression statement");
        };
        assert_eq!(read.expr.span(), Span::new(7, 8));

        let Stmt::Expr(write) = &program.body[2] else {
            panic!("expected expression statement");
        };
        let Expr::Assign(assign) = &write.expr else {
            panic!("expected assignment");
        };
        assert_eq!(assign.target.span(), Span::new(10, 11));
    }

    #[test]
    fn function_declaration() {
        let program = parse("function add(a, b) { return a + b; }").unwrap();
        let Stmt::FunctionDecl(func) = &program.body[0] else {
            panic!("expected function declaration");
        };
        let name = func.name.as_ref().unwrap();
        assert_eq!(name.name, "add");
        assert_eq!(name.span, Span::new(9, 12));
        assert_eq!(func.params.len(), 2);
        assert_eq!(func.span, Span::new(0, 36));
        assert_eq!(func.body.body.len(), 1);
    }

    #[test]
    fn named_function_expression() {
        let program = parse("var f = function inner() {};").unwrap();
        let Stmt::VarDecl(decl) = &program.body[0] else {
            panic!("expected var declaration");
        };
        let Some(Expr::Function(func)) = &decl.declarators[0].init else {
            panic!("expected function expression initializer");
        };
        assert_eq!(func.name.as_ref().unwrap().name, "inner");
    }

    #[test]
    fn statement_brace_is_a_block() {
        let program = parse("{ let a = 1; }").unwrap();
        let Stmt::Block(block) = &program.body[0] else {
            panic!("expected block statement");
        };
        assert_eq!(block.span, Span::new(0, 14));
        assert_eq!(block.body.len(), 1);
    }

    #[test]
    fn object_literal_in_expression_position() {
        let program = parse("var o = { a: 1, 'b': 2, 3: c };").unwrap();
        let Stmt::VarDecl(decl) = &program.body[0] else {
            panic!("expected var declaration");
        };
        let Some(Expr::Object(object)) = &decl.declarators[0].init else {
            panic!("expected object literal");
        };
        assert_eq!(object.properties.len(), 3);
        assert!(matches!(object.properties[0].key, PropKey::Ident(_)));
        assert!(matches!(object.properties[1].key, PropKey::Str(_)));
        assert!(matches!(object.properties[2].key, PropKey::Number(_)));
    }

    #[test]
    fn member_and_call_chains() {
        let program = parse("a.b[c](d);").unwrap();
        let Stmt::Expr(stmt) = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expr::Call(call) = &stmt.expr else {
            panic!("expected call");
        };
        assert_eq!(call.args.len(), 1);
        let Expr::Member(computed) = &call.callee else {
            panic!("expected member callee");
        };
        assert!(matches!(computed.property, MemberProp::Computed(_)));
        let Expr::Member(dot) = &computed.object else {
            panic!("expected dot member");
        };
        assert!(matches!(dot.property, MemberProp::Dot(_)));
    }

    #[test]
    fn precedence_and_associativity() {
        let program = parse("x = 1 + 2 * 3 < 4 && y;").unwrap();
        let Stmt::Expr(stmt) = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expr::Assign(assign) = &stmt.expr else {
            panic!("expected assignment");
        };
        let Expr::Binary(and) = &assign.value else {
            panic!("expected binary expression");
        };
        assert_eq!(and.op, BinaryOp::And);
        let Expr::Binary(cmp) = &and.left else {
            panic!("expected comparison");
        };
        assert_eq!(cmp.op, BinaryOp::Lt);
    }

    #[test]
    fn for_with_let_init() {
        let program = parse("for (let i = 0; i < 10; i += 1) { i; }").unwrap();
        let Stmt::For(stmt) = &program.body[0] else {
            panic!("expected for statement");
        };
        let Some(ForInit::VarDecl(decl)) = &stmt.init else {
            panic!("expected let init");
        };
        assert_eq!(decl.kind, DeclKind::Let);
        assert!(stmt.test.is_some());
        assert!(stmt.update.is_some());
    }

    #[test]
    fn missing_semicolon_is_an_error() {
        let err = parse("var x = 1 var y = 2").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn semicolon_optional_before_brace_and_eof() {
        assert!(parse("x = 1").is_ok());
        assert!(parse("function f() { return 1 }").is_ok());
    }

    #[test]
    fn invalid_assignment_target() {
        let err = parse("1 = x;").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidAssignmentTarget {
                span: Span::new(0, 1)
            }
        );
    }

    #[test]
    fn unexpected_eof() {
        let err = parse("function f(").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn conditional_expression() {
        let program = parse("y = a ? b : c;").unwrap();
        let Stmt::Expr(stmt) = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expr::Assign(assign) = &stmt.expr else {
            panic!("expected assignment");
        };
        assert!(matches!(assign.value, Expr::Conditional(_)));
    }

    #[test]
    fn grouping_keeps_inner_span() {
        let program = parse("(x);").unwrap();
        let Stmt::Expr(stmt) = &program.body[0] else {
            panic!("expected expression statement");
        };
        assert_eq!(stmt.expr.span(), Span::new(1, 2));
    }
}
