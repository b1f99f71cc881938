//! A small Pratt parser reading stringified expressions back into trees.
//!
//! Understands the host-style infix syntax the formatter emits: the
//! operator set of `symbol.*`, calls to library functions by dotted path,
//! `pow(x, y, z)`, indexing, attribute access, integer and float literals
//! and free symbols.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use symbolite::{library, Op, Symbol, Value};

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    Int(i64),
    Float(f64),
    Punct(&'static str),
}

const PUNCTUATION: &[&str] = &[
    "**", "//", "<<", ">>", "<=", ">=", "==", "!=", "<", ">", "+", "-", "*", "/", "%", "@", "&",
    "|", "^", "~", "(", ")", "[", "]", ",", "=", ".",
];

fn tokenize(text: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            tokens.push(if literal.contains('.') {
                Token::Float(literal.parse().map_err(|e| format!("{e}"))?)
            } else {
                Token::Int(literal.parse().map_err(|e| format!("{e}"))?)
            });
        } else if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
        } else {
            let rest: String = chars[i..].iter().take(2).collect();
            let punct = PUNCTUATION
                .iter()
                .find(|p| rest.starts_with(**p))
                .copied()
                .ok_or_else(|| format!("unexpected character {c:?}"))?;
            tokens.push(Token::Punct(punct));
            i += punct.len();
        }
    }
    Ok(tokens)
}

fn infix(punct: &str) -> Option<(Op, u8)> {
    let entry = match punct {
        "==" => (Op::Eq, 1),
        "!=" => (Op::Ne, 1),
        "<" => (Op::Lt, 1),
        "<=" => (Op::Le, 1),
        ">" => (Op::Gt, 1),
        ">=" => (Op::Ge, 1),
        "|" => (Op::Or, 3),
        "^" => (Op::Xor, 5),
        "&" => (Op::And, 7),
        "<<" => (Op::LShift, 9),
        ">>" => (Op::RShift, 9),
        "+" => (Op::Add, 11),
        "-" => (Op::Sub, 11),
        "*" => (Op::Mul, 13),
        "@" => (Op::MatMul, 13),
        "/" => (Op::TrueDiv, 13),
        "//" => (Op::FloorDiv, 13),
        "%" => (Op::Mod, 13),
        "**" => (Op::Pow, 17),
        _ => return None,
    };
    Some(entry)
}

const UNARY_BP: u8 = 15;
const POSTFIX_BP: u8 = 19;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, String> {
        let token = self.peek().cloned().ok_or("unexpected end of input")?;
        self.pos += 1;
        Ok(token)
    }

    fn eat(&mut self, punct: &str) -> bool {
        if matches!(self.peek(), Some(Token::Punct(p)) if *p == punct) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, punct: &str) -> Result<(), String> {
        if self.eat(punct) {
            Ok(())
        } else {
            Err(format!("expected {punct:?}, found {:?}", self.peek()))
        }
    }

    fn expr(&mut self, min_bp: u8) -> Result<Value, String> {
        let mut lhs = self.prefix()?;
        loop {
            let Some(Token::Punct(punct)) = self.peek().cloned() else {
                break;
            };
            if punct == "[" || punct == "." {
                if POSTFIX_BP < min_bp {
                    break;
                }
                self.pos += 1;
                lhs = if punct == "[" {
                    let index = self.expr(0)?;
                    self.expect("]")?;
                    apply(Op::GetItem, vec![lhs, index])?
                } else {
                    let Token::Ident(name) = self.next()? else {
                        return Err("expected attribute name".into());
                    };
                    apply(Op::GetAttr, vec![lhs, Value::from(name)])?
                };
                continue;
            }
            let Some((op, bp)) = infix(punct) else {
                break;
            };
            if bp < min_bp {
                break;
            }
            self.pos += 1;
            let rhs_bp = if op == Op::Pow { bp } else { bp + 1 };
            let rhs = self.expr(rhs_bp)?;
            lhs = apply(op, vec![lhs, rhs])?;
        }
        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<Value, String> {
        match self.next()? {
            Token::Int(n) => Ok(Value::from(n)),
            Token::Float(x) => Ok(Value::from(x)),
            Token::Punct("(") => {
                let inner = self.expr(0)?;
                self.expect(")")?;
                Ok(inner)
            }
            Token::Punct(punct @ ("-" | "+" | "~")) => {
                let op = match punct {
                    "-" => Op::Neg,
                    "+" => Op::Pos,
                    _ => Op::Invert,
                };
                let operand = self.expr(UNARY_BP)?;
                apply(op, vec![operand])
            }
            Token::Ident(first) => self.name(first),
            other => Err(format!("unexpected token {other:?}")),
        }
    }

    /// A symbol, a library constant, or a call.
    fn name(&mut self, first: String) -> Result<Value, String> {
        let mut path = first;
        if library().namespace(&path).is_empty() || !self.eat(".") {
            return self.call_or_symbol(path);
        }
        let Token::Ident(member) = self.next()? else {
            return Err("expected a name after the namespace".into());
        };
        path = format!("{path}.{member}");
        if let Some(constant) = library().constant(&path) {
            return Ok(Value::from(constant));
        }
        self.call_or_symbol(path)
    }

    fn call_or_symbol(&mut self, path: String) -> Result<Value, String> {
        if !self.eat("(") {
            return Ok(Value::from(Symbol::new(path)));
        }
        let mut args = Vec::new();
        while !self.eat(")") {
            args.push(self.expr(0)?);
            if !self.eat(",") {
                self.expect(")")?;
                break;
            }
        }
        if path == "pow" {
            return apply(Op::Pow3, args);
        }
        let function = library()
            .function(&path)
            .ok_or_else(|| format!("unknown function {path}"))?;
        function
            .call(args)
            .map(Value::from)
            .map_err(|e| e.to_string())
    }
}

fn apply(op: Op, args: Vec<Value>) -> Result<Value, String> {
    op.function()
        .call(args)
        .map(Value::from)
        .map_err(|e| e.to_string())
}

/// Parse `text` into an expression tree.
pub fn parse(text: &str) -> Result<Value, String> {
    let mut parser = Parser {
        tokens: tokenize(text)?,
        pos: 0,
    };
    let value = parser.expr(0)?;
    match parser.peek() {
        None => Ok(value),
        Some(token) => Err(format!("trailing token {token:?}")),
    }
}
