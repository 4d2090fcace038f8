use std::fmt;
use std::io::BufRead;

use thiserror::Error;

use super::gate::GateKind;

/// One normalized line of a circuit description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Input(String),
    Output(String),
    Gate {
        result: String,
        kind: GateKind,
        operands: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
    },
    #[error("unsupported operator '{0}'")]
    UnknownOperator(String),
    #[error("{op} expects {expected} operand(s), got {got}")]
    Arity {
        op: GateKind,
        expected: &'static str,
        got: usize,
    },
    #[error("wire '{0}' is already driven by an earlier gate")]
    Redefinition(String),
    #[error("failed to read line: {0}")]
    Read(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Parses a whole description, failing on the first bad line. Statements are
/// paired with their 1-based line numbers.
pub fn parse_bench_str(s: &str) -> Result<Vec<(usize, Statement)>, ParseError> {
    parse_bench_reader(std::io::Cursor::new(s.as_bytes()))
}

pub fn parse_bench_reader<R: BufRead>(r: R) -> Result<Vec<(usize, Statement)>, ParseError> {
    let mut out = Vec::new();
    for (idx, line) in r.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| ParseError::new(line_no, ParseErrorKind::Read(e.to_string())))?;
        if let Some(stmt) = parse_line(&line).map_err(|kind| ParseError::new(line_no, kind))? {
            out.push((line_no, stmt));
        }
    }
    Ok(out)
}

/// Parses one line. Blank and comment-only lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Statement>, ParseErrorKind> {
    let clean = strip_comment(line).trim();
    if clean.is_empty() {
        return Ok(None);
    }
    parse_statement(clean).map(Some)
}

fn parse_statement(s: &str) -> Result<Statement, ParseErrorKind> {
    let mut cur = Cursor::new(tokenize(s)?);
    let head = cur.word("a wire name or declaration")?;

    if cur.peek() == Some(&Token::Eq) {
        cur.bump();
        let op = cur.word("an operator")?;
        let kind =
            GateKind::from_keyword(op).ok_or_else(|| ParseErrorKind::UnknownOperator(op.to_owned()))?;
        let operands = parse_operands(&mut cur)?;
        cur.finish()?;
        check_arity(kind, operands.len())?;
        return Ok(Statement::Gate {
            result: head.to_owned(),
            kind,
            operands,
        });
    }

    match head {
        "INPUT" | "OUTPUT" => {
            cur.expect(Token::LParen, "'('")?;
            let name = cur.word("a wire name")?.to_owned();
            cur.expect(Token::RParen, "')'")?;
            cur.finish()?;
            if head == "INPUT" {
                Ok(Statement::Input(name))
            } else {
                Ok(Statement::Output(name))
            }
        }
        _ => Err(ParseErrorKind::Expected {
            expected: "'='",
            found: describe(cur.peek()),
        }),
    }
}

fn parse_operands(cur: &mut Cursor<'_>) -> Result<Vec<String>, ParseErrorKind> {
    cur.expect(Token::LParen, "'('")?;
    let mut operands = Vec::new();
    loop {
        operands.push(cur.word("an operand name")?.to_owned());
        match cur.bump() {
            Some(Token::Comma) => {}
            Some(Token::RParen) => return Ok(operands),
            other => {
                return Err(ParseErrorKind::Expected {
                    expected: "',' or ')'",
                    found: describe(other.as_ref()),
                });
            }
        }
    }
}

fn check_arity(kind: GateKind, got: usize) -> Result<(), ParseErrorKind> {
    let too_few = got < kind.min_arity();
    let too_many = kind.max_arity().is_some_and(|max| got > max);
    if too_few || too_many {
        let expected = match kind.max_arity() {
            Some(_) => "exactly 1",
            None => "at least 2",
        };
        return Err(ParseErrorKind::Arity {
            op: kind,
            expected,
            got,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    LParen,
    RParen,
    Comma,
    Eq,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "'{}'", w),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
            Token::Eq => f.write_str("'='"),
        }
    }
}

fn describe(tok: Option<&Token<'_>>) -> String {
    match tok {
        Some(t) => t.to_string(),
        None => "end of line".to_owned(),
    }
}

fn tokenize(s: &str) -> Result<Vec<Token<'_>>, ParseErrorKind> {
    let mut out = Vec::new();
    let mut chars = s.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        match c {
            '(' => out.push(Token::LParen),
            ')' => out.push(Token::RParen),
            ',' => out.push(Token::Comma),
            '=' => out.push(Token::Eq),
            c if c.is_whitespace() => {}
            c if is_word_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some(&(idx, next)) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    end = idx + next.len_utf8();
                    chars.next();
                }
                out.push(Token::Word(&s[start..end]));
            }
            other => return Err(ParseErrorKind::UnexpectedChar(other)),
        }
    }
    Ok(out)
}

struct Cursor<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let tok = self.tokens.get(self.pos).copied();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn word(&mut self, expected: &'static str) -> Result<&'a str, ParseErrorKind> {
        match self.bump() {
            Some(Token::Word(w)) => Ok(w),
            other => Err(ParseErrorKind::Expected {
                expected,
                found: describe(other.as_ref()),
            }),
        }
    }

    fn expect(&mut self, want: Token<'a>, expected: &'static str) -> Result<(), ParseErrorKind> {
        match self.bump() {
            Some(tok) if tok == want => Ok(()),
            other => Err(ParseErrorKind::Expected {
                expected,
                found: describe(other.as_ref()),
            }),
        }
    }

    fn finish(&self) -> Result<(), ParseErrorKind> {
        match self.peek() {
            None => Ok(()),
            Some(tok) => Err(ParseErrorKind::Expected {
                expected: "end of line",
                found: tok.to_string(),
            }),
        }
    }
}

fn strip_comment(s: &str) -> &str {
    if let Some(idx) = s.find('#') {
        &s[..idx]
    } else {
        s
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::{ParseErrorKind, Statement, Token, parse_line, tokenize};
    use crate::circuit::gate::GateKind;

    #[test]
    fn tokenize_gate_line() {
        let toks = tokenize("n1 = AND( a,b_2 )").expect("tokenize");
        assert_eq!(
            toks,
            vec![
                Token::Word("n1"),
                Token::Eq,
                Token::Word("AND"),
                Token::LParen,
                Token::Word("a"),
                Token::Comma,
                Token::Word("b_2"),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn tokenize_rejects_punctuation() {
        assert_eq!(tokenize("a.b"), Err(ParseErrorKind::UnexpectedChar('.')));
    }

    #[test]
    fn parse_line_with_spaces_and_comment() {
        let stmt = parse_line("  out = OR( a , b ) # logic ");
        assert_eq!(
            stmt,
            Ok(Some(Statement::Gate {
                result: "out".to_owned(),
                kind: GateKind::Or,
                operands: vec!["a".to_owned(), "b".to_owned()],
            }))
        );
    }

    #[test]
    fn input_named_like_keyword_can_be_assigned() {
        let stmt = parse_line("INPUT = NOT(OUTPUT)");
        assert_eq!(
            stmt,
            Ok(Some(Statement::Gate {
                result: "INPUT".to_owned(),
                kind: GateKind::Not,
                operands: vec!["OUTPUT".to_owned()],
            }))
        );
    }

    #[test]
    fn nxor_is_xnor() {
        match parse_line("x = NXOR(a, b, c)") {
            Ok(Some(Statement::Gate { kind, operands, .. })) => {
                assert_eq!(kind, GateKind::Xnor);
                assert_eq!(operands.len(), 3);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert!(matches!(
            parse_line("input(a)"),
            Err(ParseErrorKind::Expected { .. })
        ));
        assert!(matches!(
            parse_line("x = and(a, b)"),
            Err(ParseErrorKind::UnknownOperator(_))
        ));
    }

    #[test]
    fn arity_is_checked() {
        assert!(matches!(
            parse_line("x = NOT(a, b)"),
            Err(ParseErrorKind::Arity { got: 2, .. })
        ));
        assert!(matches!(
            parse_line("x = AND(a)"),
            Err(ParseErrorKind::Arity { got: 1, .. })
        ));
    }

    #[test]
    fn trailing_tokens_rejected() {
        assert!(parse_line("INPUT(a) b").is_err());
        assert!(parse_line("x = AND(a, b))").is_err());
        assert!(parse_line("x = AND(a, , b)").is_err());
    }
}
