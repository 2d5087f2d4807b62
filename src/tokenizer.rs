use crate::error::{Error, Result};

/// Represents the smallest meaningful units (atoms) of the command language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- Command words ---
    CreateTable,
    DropTable,
    ListTables,
    Info,
    Insert,
    Into,
    Values,
    Select,
    From,
    Where,
    Update,
    Set,
    Delete,

    // --- Identifiers & Literals ---
    /// A name representing a table, a column or a type (e.g., `users`, `int`).
    Ident(String),
    /// A 64-bit integer literal (e.g., `42`, `-7`).
    Number(i64),
    /// A string literal between double or single quotes (e.g., `"Alice"`).
    String(String),
    /// The boolean literal `true`.
    True,
    /// The boolean literal `false`.
    False,

    // --- Symbols ---
    /// Left parenthesis `(`
    LeftParen,
    /// Right parenthesis `)`
    RightParen,
    /// Comma `,`
    Comma,
    /// Colon `:` between a column name and its type
    Colon,
    /// Equal to
    Equal,

    // --- Special ---
    /// Represents the end of the input line.
    Eof,
}

impl Token {
    /// The canonical spelling of a keyword token.
    ///
    /// Keywords are only reserved where the grammar expects them; in name
    /// positions the parser reads them back as identifiers through this.
    pub fn keyword(&self) -> Option<&'static str> {
        let word = match self {
            Token::CreateTable => "create_table",
            Token::DropTable => "drop_table",
            Token::ListTables => "list_tables",
            Token::Info => "info",
            Token::Insert => "insert",
            Token::Into => "into",
            Token::Values => "values",
            Token::Select => "select",
            Token::From => "from",
            Token::Where => "where",
            Token::Update => "update",
            Token::Set => "set",
            Token::Delete => "delete",
            Token::True => "true",
            Token::False => "false",
            _ => return None,
        };
        Some(word)
    }
}

/// A lexical scanner (lexer) that converts one command line into a sequence of [Token]s.
pub struct Tokenizer {
    /// The input string stored as a vector of characters for easy iteration.
    input: Vec<char>,
    /// The current position in the character vector.
    position: usize,
}

impl Tokenizer {
    /// Creates a new Tokenizer for the given input string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Processes the entire input and returns a vector of tokens.
    ///
    /// # Errors
    /// Returns [Error::Parse] if an invalid character is encountered or if a literal
    /// (like a string) is malformed.
    ///
    /// # Example
    /// ```
    /// # use primdb::tokenizer::{Tokenizer, Token};
    /// let mut t = Tokenizer::new("select from users");
    /// let tokens = t.tokenize().unwrap();
    /// assert_eq!(tokens[0], Token::Select);
    /// assert_eq!(tokens[2], Token::Ident("users".into()));
    /// ```
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            let token = self.next_token()?;
            tokens.push(token);
        }

        tokens.push(Token::Eof);
        Ok(tokens)
    }

    /// Identifies the next token based on the character at the current position.
    fn next_token(&mut self) -> Result<Token> {
        let ch = self.current_char();

        match ch {
            '(' => {
                self.advance();
                Ok(Token::LeftParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RightParen)
            }
            ',' => {
                self.advance();
                Ok(Token::Comma)
            }
            ':' => {
                self.advance();
                Ok(Token::Colon)
            }
            '=' => {
                self.advance();
                Ok(Token::Equal)
            }
            '-' if self.peek_char().is_some_and(|c| c.is_ascii_digit()) => self.read_number(),
            c if c.is_alphabetic() || c == '_' => Ok(self.read_identifier()),
            c if c.is_ascii_digit() => self.read_number(),
            '"' | '\'' => self.read_string(ch),
            _ => Err(Error::Parse(format!("character {ch:?} is not supported"))),
        }
    }

    // --- Navigation Helpers ---

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    // --- Extraction Logic ---

    /// Reads a word and determines if it's a command keyword or a
    /// user-defined identifier.
    ///
    /// Keywords are matched case-insensitively; identifiers keep their case.
    fn read_identifier(&mut self) -> Token {
        let mut ident = String::new();

        while !self.is_at_end()
            && (self.current_char().is_alphanumeric() || self.current_char() == '_')
        {
            ident.push(self.current_char());
            self.advance();
        }

        match ident.to_lowercase().as_str() {
            "create_table" => Token::CreateTable,
            "drop_table" => Token::DropTable,
            "list_tables" => Token::ListTables,
            "info" => Token::Info,
            "insert" => Token::Insert,
            "into" => Token::Into,
            "values" => Token::Values,
            "select" => Token::Select,
            "from" => Token::From,
            "where" => Token::Where,
            "update" => Token::Update,
            "set" => Token::Set,
            "delete" => Token::Delete,
            "true" => Token::True,
            "false" => Token::False,
            _ => Token::Ident(ident),
        }
    }

    /// Reads an optionally negative integer literal.
    fn read_number(&mut self) -> Result<Token> {
        let mut number = String::new();

        if self.current_char() == '-' {
            number.push('-');
            self.advance();
        }

        while !self.is_at_end() && self.current_char().is_ascii_digit() {
            number.push(self.current_char());
            self.advance();
        }

        // `12abc` or `1.5` are not integers
        if !self.is_at_end()
            && (self.current_char().is_alphanumeric()
                || self.current_char() == '_'
                || self.current_char() == '.')
        {
            return Err(Error::Parse(format!(
                "invalid number literal starting with {number:?}"
            )));
        }

        number
            .parse::<i64>()
            .map(Token::Number)
            .map_err(|e| Error::Parse(format!("invalid number {number:?}: {e}")))
    }

    /// Reads a string literal enclosed in `quote` characters.
    fn read_string(&mut self, quote: char) -> Result<Token> {
        self.advance(); // Skip the opening quote

        let mut string = String::new();
        while !self.is_at_end() && self.current_char() != quote {
            string.push(self.current_char());
            self.advance();
        }

        if self.is_at_end() {
            return Err(Error::Parse("unterminated string".into()));
        }

        // Skip the closing quote
        self.advance();

        Ok(Token::String(string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_create_table() {
        let mut tokenizer = Tokenizer::new("create_table users name:str active:bool");
        let tokens = tokenizer.tokenize().unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::CreateTable,
                Token::Ident("users".into()),
                Token::Ident("name".into()),
                Token::Colon,
                Token::Ident("str".into()),
                Token::Ident("active".into()),
                Token::Colon,
                Token::Ident("bool".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let mut tokenizer = Tokenizer::new("SELECT From Users WHERE Active = TRUE");
        let tokens = tokenizer.tokenize().unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Select,
                Token::From,
                Token::Ident("Users".into()),
                Token::Where,
                Token::Ident("Active".into()),
                Token::Equal,
                Token::True,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_spelling() {
        let mut tokenizer = Tokenizer::new("FROM Set true users 7");
        let words: Vec<_> = tokenizer
            .tokenize()
            .unwrap()
            .iter()
            .map(Token::keyword)
            .collect();

        assert_eq!(
            words,
            vec![Some("from"), Some("set"), Some("true"), None, None, None]
        );
    }

    #[test]
    fn test_tokenize_values_list() {
        let mut tokenizer = Tokenizer::new("values (1, \"Sergei\", true)");
        let tokens = tokenizer.tokenize().unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Values,
                Token::LeftParen,
                Token::Number(1),
                Token::Comma,
                Token::String("Sergei".into()),
                Token::Comma,
                Token::True,
                Token::RightParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        let mut tokenizer = Tokenizer::new("42, -7, 0");
        let tokens = tokenizer.tokenize().unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Number(42),
                Token::Comma,
                Token::Number(-7),
                Token::Comma,
                Token::Number(0),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_reject_malformed_numbers() {
        assert!(Tokenizer::new("1.5").tokenize().is_err());
        assert!(Tokenizer::new("12abc").tokenize().is_err());
        assert!(Tokenizer::new("99999999999999999999").tokenize().is_err());
    }

    #[test]
    fn test_tokenize_strings() {
        let mut tokenizer = Tokenizer::new("'Alice', \"Bob Dylan\", \"it's\", ''");
        let tokens = tokenizer.tokenize().unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::String("Alice".into()),
                Token::Comma,
                Token::String("Bob Dylan".into()),
                Token::Comma,
                Token::String("it's".into()),
                Token::Comma,
                Token::String(String::new()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let result = Tokenizer::new("\"hello").tokenize();

        assert_eq!(result, Err(Error::Parse("unterminated string".into())));
    }

    #[test]
    fn test_unsupported_character() {
        assert!(Tokenizer::new("select * from users").tokenize().is_err());
    }
}
