use crate::ast::*;
use crate::error::{Error, Result};
use crate::tokenizer::{Token, Tokenizer};

/// Parses one tokenized command line into a [Statement].
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Tokenizes and parses `line` in one step.
    pub fn parse_line(line: &str) -> Result<Statement> {
        let tokens = Tokenizer::new(line).tokenize()?;
        Parser::new(tokens).parse()
    }

    pub fn parse(&mut self) -> Result<Statement> {
        let statement = match self.current_token() {
            Token::CreateTable => self.parse_create_table(),
            Token::DropTable => self.parse_drop_table(),
            Token::ListTables => {
                self.advance();
                Ok(Statement::ListTables)
            }
            Token::Info => self.parse_info(),
            Token::Insert => self.parse_insert(),
            Token::Select => self.parse_select(),
            Token::Update => self.parse_update(),
            Token::Delete => self.parse_delete(),
            Token::Ident(word) => Err(Error::UnknownCommand(word.clone())),
            Token::Eof => Err(Error::Parse("empty command".into())),
            other => Err(Error::Parse(format!("unexpected token {other:?}"))),
        }?;

        // Check we are at the end of the statement
        if !self.is_at_end() {
            return Err(Error::Parse(format!(
                "unexpected token after {}: {:?}",
                statement.name(),
                self.current_token()
            )));
        }

        Ok(statement)
    }

    //helpers
    fn current_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current_token(), Token::Eof)
    }

    fn consume(&mut self, expected: Token) -> Result<()> {
        if *self.current_token() == expected {
            self.advance();
            Ok(())
        } else {
            Err(Error::Parse(format!(
                "expected {:?}, found {:?}",
                expected,
                self.current_token()
            )))
        }
    }

    /// Reads a table, column or type name. Keywords are accepted here and
    /// name themselves in lowercase.
    fn consume_ident(&mut self) -> Result<String> {
        let name = match self.current_token() {
            Token::Ident(string) => string.clone(),
            token => match token.keyword() {
                Some(word) => word.to_string(),
                None => {
                    return Err(Error::Parse(format!(
                        "expected identifier, found {token:?}"
                    )));
                }
            },
        };
        self.advance();
        Ok(name)
    }

    fn consume_literal(&mut self) -> Result<Literal> {
        let literal = match self.current_token() {
            Token::Number(i) => Literal::Int(*i),
            Token::String(s) => Literal::Str(s.clone()),
            Token::True => Literal::Bool(true),
            Token::False => Literal::Bool(false),
            Token::Ident(word) => Literal::Bare(word.clone()),
            other => {
                return Err(Error::Parse(format!("expected a value, found {other:?}")));
            }
        };
        self.advance();
        Ok(literal)
    }

    /// `<col> = <val>`
    fn parse_condition(&mut self) -> Result<(String, Literal)> {
        let column = self.consume_ident()?;
        self.consume(Token::Equal)?;
        let value = self.consume_literal()?;
        Ok((column, value))
    }

    fn parse_predicate(&mut self) -> Result<Predicate> {
        self.consume(Token::Where)?;
        let (column, value) = self.parse_condition()?;
        Ok(Predicate { column, value })
    }

    fn parse_column_spec(&mut self) -> Result<ColumnSpec> {
        let name = self.consume_ident()?;
        self.consume(Token::Colon)?;
        let type_name = self.consume_ident()?;

        Ok(ColumnSpec { name, type_name })
    }

    fn parse_create_table(&mut self) -> Result<Statement> {
        self.consume(Token::CreateTable)?;
        let name = self.consume_ident()?;
        let mut columns = vec![];
        while !self.is_at_end() {
            columns.push(self.parse_column_spec()?);
        }
        Ok(Statement::CreateTable(CreateTable { name, columns }))
    }

    fn parse_drop_table(&mut self) -> Result<Statement> {
        self.consume(Token::DropTable)?;
        Ok(Statement::DropTable(self.consume_ident()?))
    }

    fn parse_info(&mut self) -> Result<Statement> {
        self.consume(Token::Info)?;
        Ok(Statement::Info(self.consume_ident()?))
    }

    fn parse_insert(&mut self) -> Result<Statement> {
        self.consume(Token::Insert)?;
        self.consume(Token::Into)?;
        let table = self.consume_ident()?;
        self.consume(Token::Values)?;
        self.consume(Token::LeftParen)?;

        let mut values = vec![];
        if matches!(self.current_token(), Token::RightParen) {
            self.advance();
            return Ok(Statement::Insert(Insert { table, values }));
        }
        loop {
            values.push(self.consume_literal()?);
            match self.current_token() {
                Token::RightParen => {
                    self.advance();
                    break;
                }
                Token::Comma => {
                    self.advance();
                    continue;
                }
                _ => return Err(Error::Parse("expected ',' or ')'".into())),
            }
        }
        Ok(Statement::Insert(Insert { table, values }))
    }

    fn parse_select(&mut self) -> Result<Statement> {
        self.consume(Token::Select)?;
        self.consume(Token::From)?;
        let table = self.consume_ident()?;
        let predicate = match self.current_token() {
            Token::Where => Some(self.parse_predicate()?),
            _ => None,
        };
        Ok(Statement::Select(Select { table, predicate }))
    }

    fn parse_update(&mut self) -> Result<Statement> {
        self.consume(Token::Update)?;
        let table = self.consume_ident()?;
        self.consume(Token::Set)?;
        let (column, value) = self.parse_condition()?;
        let predicate = self.parse_predicate()?;
        Ok(Statement::Update(Update {
            table,
            assignment: Assignment { column, value },
            predicate,
        }))
    }

    fn parse_delete(&mut self) -> Result<Statement> {
        self.consume(Token::Delete)?;
        self.consume(Token::From)?;
        let table = self.consume_ident()?;
        let predicate = self.parse_predicate()?;
        Ok(Statement::Delete(Delete { table, predicate }))
    }
}
