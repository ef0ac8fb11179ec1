//! Template syntax parser
//!
//! Recognizes three placeholder forms between `{{` and `}}` delimiters:
//! a named-argument reference (`{{key}}`), a 0-based positional reference
//! into the current group (`{{1}}`), and a named-constant reference
//! (`{{@key}}`). A backslash escapes the following character, which is how
//! generated text gets to contain a literal `{{`.

use crate::error::SpecError;

/// One element of a compiled template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    /// Plain text, emitted verbatim
    Text(String),
    /// Named-argument reference by declared key
    Argument(String),
    /// Positional reference into the current group, 0-based
    Position(usize),
    /// Named-constant reference by key
    Constant(String),
}

/// A template string compiled into its token stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    tokens: Vec<TemplateToken>,
}

impl Template {
    /// Compile a template string.
    ///
    /// # Errors
    /// Returns [`SpecError::Syntax`] for an unterminated placeholder, an
    /// empty reference, or a trailing lone backslash.
    pub fn parse(content: &str) -> Result<Self, SpecError> {
        let mut parser = Parser::new(content);
        let tokens = parser.parse()?;
        Ok(Self { tokens })
    }

    /// The compiled token stream, in source order.
    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }
}

/// Internal parser state
struct Parser {
    chars: Vec<char>,
    position: usize,
    line: usize,
}

impl Parser {
    fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            position: 0,
            line: 1,
        }
    }

    fn parse(&mut self) -> Result<Vec<TemplateToken>, SpecError> {
        let mut tokens = Vec::new();
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch == '\\' {
                self.advance();
                match self.peek() {
                    Some(escaped) => {
                        text.push(escaped);
                        self.advance();
                    }
                    None => {
                        return Err(self.syntax("trailing `\\` escapes nothing"));
                    }
                }
            } else if ch == '{' && self.peek_ahead(1) == Some('{') {
                if !text.is_empty() {
                    tokens.push(TemplateToken::Text(std::mem::take(&mut text)));
                }
                tokens.push(self.parse_placeholder()?);
            } else {
                text.push(ch);
                self.advance();
            }
        }

        if !text.is_empty() {
            tokens.push(TemplateToken::Text(text));
        }

        Ok(tokens)
    }

    fn parse_placeholder(&mut self) -> Result<TemplateToken, SpecError> {
        self.advance(); // {
        self.advance(); // {

        let mut inner = String::new();
        loop {
            match self.peek() {
                Some('}') if self.peek_ahead(1) == Some('}') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(ch) => {
                    inner.push(ch);
                    self.advance();
                }
                None => {
                    return Err(self.syntax("unterminated placeholder, expected `}}`"));
                }
            }
        }

        let inner = inner.trim();
        if let Some(key) = inner.strip_prefix('@') {
            let key = key.trim_start();
            if key.is_empty() {
                return Err(self.syntax("empty constant reference `{{@}}`"));
            }
            return Ok(TemplateToken::Constant(key.to_string()));
        }
        if inner.is_empty() {
            return Err(self.syntax("empty placeholder `{{}}`"));
        }
        if inner.chars().all(|c| c.is_ascii_digit()) {
            let index = inner.parse::<usize>().map_err(|_| {
                self.syntax(&format!("positional reference `{inner}` does not fit"))
            })?;
            return Ok(TemplateToken::Position(index));
        }
        Ok(TemplateToken::Argument(inner.to_string()))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if self.peek() == Some('\n') {
            self.line += 1;
        }
        self.position += 1;
    }

    fn syntax(&self, message: &str) -> SpecError {
        SpecError::Syntax {
            line: self.line,
            message: message.to_string(),
        }
    }
}
