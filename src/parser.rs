use std::collections::VecDeque;

use crate::ast::{BlockStatement, Expression, Identifier, Program, Statement};
use crate::{
    ast,
    lexer::Lexer,
    token::{Token, TokenType},
};

pub struct Parser {
    tokens: VecDeque<Token>,
    error_msgs: Vec<String>,
}

#[derive(Debug, PartialEq, PartialOrd)]
enum Precedence {
    Lowest,
    Equals,      // ==
    LessGreater, // > or <
    Sum,         // + or -
    Product,     // * or /
    Prefix,      // -x or !x
    Call,        // my_function(x)
    Index,       // my_array[x]
}

fn token_type_precedence(t: &Token) -> Option<Precedence> {
    use Precedence::*;
    use TokenType::*;
    let p = match t.token_type {
        EQ => Equals,
        NOT_EQ => Equals,
        LT => LessGreater,
        GT => LessGreater,
        PLUS => Sum,
        MINUS => Sum,
        SLASH => Product,
        ASTERISK => Product,
        LPAREN => Call,
        LBRACKET => Index,
        _ => return None,
    };
    Some(p)
}

#[derive(Debug)]
pub struct ParserError {
    errors: Vec<String>,
}

impl ParserError {
    pub fn messages(&self) -> &[String] {
        &self.errors
    }
}

impl std::error::Error for ParserError {}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parser Error:\n")?;
        for e in &self.errors {
            write!(f, "- {}\n", e)?
        }
        Ok(())
    }
}

impl Parser {
    pub fn parse(input: &str) -> Result<ast::Program, ParserError> {
        // init parser
        let lexer = Lexer::new(input);
        let tokens = lexer.collect::<VecDeque<_>>();
        let mut parser = Parser {
            tokens,
            error_msgs: Vec::new(),
        };

        // do parsing
        let mut statements = Vec::<Statement>::new();
        loop {
            if parser.tokens.is_empty() || parser.peek_token_is(TokenType::EOF) {
                let _ = parser.tokens.pop_front();
                break;
            }
            if let Some(statement) = parser.parse_statement() {
                statements.push(statement)
            } else {
                // error occured, skip ahead so the remaining statements
                // still get a chance to report their own errors
                if !parser.peek_token_is(TokenType::EOF) {
                    let _ = parser.tokens.pop_front();
                }
            }
        }
        let program = Program { statements };
        if parser.error_msgs.is_empty() {
            Ok(program)
        } else {
            Err(ParserError {
                errors: parser.error_msgs,
            })
        }
    }

    fn peek_precedence(&self) -> Precedence {
        self.tokens
            .front()
            .and_then(token_type_precedence)
            .unwrap_or(Precedence::Lowest)
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        use TokenType::*;
        match self.tokens.front()?.token_type {
            LET => self.parse_let_statement(),
            RETURN => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.tokens.front()?.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        let stmt = Statement::ExpressionStmt {
            token,
            value: expression,
        };

        if self.peek_token_is(TokenType::SEMICOLON) {
            let _ = self.tokens.pop_front();
        }

        Some(stmt)
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let token_type = self.tokens.front()?.token_type;

        use TokenType::*;
        // handle prefix
        let mut left_expression: Expression = match token_type {
            IDENT => self.parse_identifier(),
            INT => self.parse_integer_literal(),
            BANG | MINUS => self.parse_prefix_expression(),
            TRUE | FALSE => self.parse_boolean(),
            LPAREN => self.parse_grouped_expression(),
            LBRACKET => self.parse_array_literal(),
            LBRACE => self.parse_hash_literal(),
            FUNCTION => self.parse_function_literal(),
            STRING => self.parse_string_literal(),
            IF => self.parse_if_expression(),
            _ => {
                self.error_msgs.push(format!(
                    "no prefix parse function for {:?} found",
                    token_type
                ));
                None
            }
        }?;

        // handle infix: keep folding while the next operator binds tighter
        while precedence < self.peek_precedence() && !self.peek_token_is(TokenType::SEMICOLON) {
            left_expression = match self.tokens.front()?.token_type {
                PLUS | MINUS | SLASH | ASTERISK | EQ | NOT_EQ | LT | GT => {
                    self.parse_infix_expression(left_expression)
                }
                LPAREN => self.parse_call_expression(left_expression),
                LBRACKET => self.parse_index_expression(left_expression),
                _ => return Some(left_expression),
            }?;
        }
        Some(left_expression)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let lparen_token = self.tokens.pop_front()?;
        assert_eq!(TokenType::LPAREN, lparen_token.token_type);
        let arguments = self.parse_expression_list(TokenType::RPAREN)?;
        Some(Expression::CallExpression {
            token: lparen_token,
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let lbracket_token = self.tokens.pop_front()?;
        assert_eq!(TokenType::LBRACKET, lbracket_token.token_type);
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.peek_expect_or_set_err(TokenType::RBRACKET) {
            return None;
        }
        let _ = self.tokens.pop_front();
        Some(Expression::IndexExpression {
            token: lbracket_token,
            left: Box::new(left),
            index: Box::new(index),
        })
    }

    // Comma-separated expressions up to (and consuming) the end delimiter.
    // Shared by call arguments and array literals.
    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut items = Vec::new();
        // handle empty list
        if self.peek_token_is(end) {
            let _ = self.tokens.pop_front();
            return Some(items);
        }
        // handle first item
        items.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_token_is(TokenType::COMMA) {
            let _ = self.tokens.pop_front();
            items.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.peek_expect_or_set_err(end) {
            return None;
        }
        let _ = self.tokens.pop_front();
        Some(items)
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator_token = self.tokens.pop_front()?;
        let tt = operator_token.token_type;
        assert!(tt == TokenType::BANG || tt == TokenType::MINUS);
        let right = Box::new(self.parse_expression(Precedence::Prefix)?);
        let operator = operator_token.literal.clone();
        Some(Expression::PrefixExpression {
            token: operator_token,
            operator,
            right,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        // fn token
        let fn_token = self.tokens.pop_front()?;
        assert!(fn_token.token_type == TokenType::FUNCTION);
        let parameters = self.parse_function_parameters()?;
        let body = self.parse_block_statement()?;
        Some(Expression::FunctionLiteral {
            token: fn_token,
            parameters,
            body,
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        // lparen
        if !self.peek_expect_or_set_err(TokenType::LPAREN) {
            return None;
        }
        let _ = self.tokens.pop_front();

        let mut identifiers = Vec::new();

        // handle empty parameter list
        if self.peek_token_is(TokenType::RPAREN) {
            let _ = self.tokens.pop_front();
            return Some(identifiers);
        }

        // helper function
        let get_identifier = |p: &mut Parser| {
            if !p.peek_expect_or_set_err(TokenType::IDENT) {
                return None;
            }
            let ident_token = p.tokens.pop_front()?;
            let value = ident_token.literal.clone();
            Some(Identifier {
                token: ident_token,
                value,
            })
        };

        // handle first param
        identifiers.push(get_identifier(self)?);

        // handle rest of params
        while self.peek_token_is(TokenType::COMMA) {
            let _ = self.tokens.pop_front();
            identifiers.push(get_identifier(self)?);
        }

        if !self.peek_expect_or_set_err(TokenType::RPAREN) {
            return None;
        }
        let _ = self.tokens.pop_front();
        Some(identifiers)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        // if token
        let if_token = self.tokens.pop_front()?;
        assert!(if_token.token_type == TokenType::IF);

        // lparen token
        if !self.peek_expect_or_set_err(TokenType::LPAREN) {
            return None;
        }
        let _ = self.tokens.pop_front();

        // condition
        let condition = self.parse_expression(Precedence::Lowest)?;

        // rparen token
        if !self.peek_expect_or_set_err(TokenType::RPAREN) {
            return None;
        }
        let _ = self.tokens.pop_front();

        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token_is(TokenType::ELSE) {
            let _ = self.tokens.pop_front();
            let block = self.parse_block_statement()?;
            Some(block)
        } else {
            None
        };

        Some(Expression::IfExpression {
            token: if_token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        let l_paren_token = self.tokens.pop_front()?;
        assert!(l_paren_token.token_type == TokenType::LPAREN);
        let exp = self.parse_expression(Precedence::Lowest);
        if !self.peek_expect_or_set_err(TokenType::RPAREN) {
            return None;
        }
        let _ = self.tokens.pop_front();
        exp
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator_token = self.tokens.pop_front()?;
        use TokenType::*;
        assert!(
            [PLUS, MINUS, SLASH, ASTERISK, EQ, NOT_EQ, LT, GT].contains(&operator_token.token_type)
        );
        let operator = operator_token.literal.clone();
        let curr_precedence = token_type_precedence(&operator_token).unwrap_or(Precedence::Lowest);
        let right = Box::new(self.parse_expression(curr_precedence)?);
        Some(Expression::InfixExpression {
            token: operator_token,
            left: Box::new(left),
            operator,
            right,
        })
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        let ident_token = self.tokens.pop_front()?;
        assert!(ident_token.token_type == TokenType::IDENT);
        let value = ident_token.literal.clone();
        let id = Identifier {
            token: ident_token,
            value,
        };
        Some(Expression::Identifier(id))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        let bool_token = self.tokens.pop_front()?;
        let value = match bool_token.token_type {
            TokenType::TRUE => true,
            TokenType::FALSE => false,
            _ => panic!("parse_boolean should only be called on a bool token type"),
        };
        Some(Expression::Boolean {
            token: bool_token,
            value,
        })
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let int_token = self.tokens.pop_front()?;
        assert!(int_token.token_type == TokenType::INT);
        let value = match int_token.literal.parse::<i64>() {
            Ok(v) => v,
            Err(e) => {
                self.error_msgs.push(format!(
                    "could not parse {} as integer: {}",
                    int_token.literal, e
                ));
                return None;
            }
        };
        Some(Expression::IntegerLiteral {
            value,
            token: int_token,
        })
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        let str_token = self.tokens.pop_front()?;
        assert!(str_token.token_type == TokenType::STRING);
        let value = str_token.literal.clone();
        Some(Expression::StringLiteral {
            token: str_token,
            value,
        })
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let lbracket_token = self.tokens.pop_front()?;
        assert!(lbracket_token.token_type == TokenType::LBRACKET);
        let elements = self.parse_expression_list(TokenType::RBRACKET)?;
        Some(Expression::ArrayLiteral {
            token: lbracket_token,
            elements,
        })
    }

    // Keys are arbitrary expressions here; hashability is checked at
    // evaluation time.
    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let lbrace_token = self.tokens.pop_front()?;
        assert!(lbrace_token.token_type == TokenType::LBRACE);

        let mut entries = Vec::new();
        // handle empty hash
        if self.peek_token_is(TokenType::RBRACE) {
            let _ = self.tokens.pop_front();
            return Some(Expression::HashLiteral {
                token: lbrace_token,
                entries,
            });
        }

        loop {
            let key = self.parse_expression(Precedence::Lowest)?;
            if !self.peek_expect_or_set_err(TokenType::COLON) {
                return None;
            }
            let _ = self.tokens.pop_front();
            let value = self.parse_expression(Precedence::Lowest)?;
            entries.push((key, value));

            if !self.peek_token_is(TokenType::COMMA) {
                break;
            }
            let _ = self.tokens.pop_front();
        }

        if !self.peek_expect_or_set_err(TokenType::RBRACE) {
            return None;
        }
        let _ = self.tokens.pop_front();
        Some(Expression::HashLiteral {
            token: lbrace_token,
            entries,
        })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        // first token should be return
        let return_token = self.tokens.pop_front()?;
        assert!(return_token.token_type == TokenType::RETURN);

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenType::SEMICOLON) {
            let _ = self.tokens.pop_front();
        }

        Some(Statement::ReturnStmt {
            token: return_token,
            value,
        })
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        // should be a let statement
        let let_token = self.tokens.pop_front()?;
        assert!(let_token.token_type == TokenType::LET);

        // after the let token, we should have an identifier
        if !self.peek_expect_or_set_err(TokenType::IDENT) {
            return None;
        }
        let ident_token = self.tokens.pop_front()?;
        let ident_value = ident_token.literal.clone();
        let identifier = Identifier {
            token: ident_token,
            value: ident_value,
        };

        // after ident token we should get an assign token
        if !self.peek_expect_or_set_err(TokenType::ASSIGN) {
            return None;
        }
        let _ = self.tokens.pop_front();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenType::SEMICOLON) {
            let _ = self.tokens.pop_front();
        }

        Some(Statement::LetStmt {
            token: let_token,
            name: identifier,
            value,
        })
    }

    fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        // lbrace
        if !self.peek_expect_or_set_err(TokenType::LBRACE) {
            return None;
        }
        let lbrace_token = self.tokens.pop_front()?;

        let mut statements = Vec::new();
        use TokenType::{EOF, RBRACE};
        loop {
            if self.peek_token_is(EOF) || self.tokens.is_empty() {
                self.error_msgs
                    .push("unexpected end of block statement while parsing".into());
                return None;
            }
            // rbrace
            if self.peek_token_is(RBRACE) {
                let _ = self.tokens.pop_front();
                break;
            }
            let statement = self.parse_statement()?;
            statements.push(statement);
        }

        Some(BlockStatement {
            token: lbrace_token,
            statements,
        })
    }

    fn peek_token_is(&self, expected: TokenType) -> bool {
        match self.tokens.front() {
            Some(t) => t.token_type == expected,
            None => false,
        }
    }

    fn peek_expect_or_set_err(&mut self, expected: TokenType) -> bool {
        let is_match = self.peek_token_is(expected);
        if !is_match {
            let got = self
                .tokens
                .front()
                .map(|t| t.token_type)
                .unwrap_or(TokenType::EOF);
            self.error_msgs.push(format!(
                "expected next token to be {:?}, got {:?} instead",
                expected, got
            ));
        }
        return is_match;
    }
}
