//! Rendering expression trees as host-syntax strings.
//!
//! Operators are printed infix/prefix/postfix with the fewest parentheses
//! that keep the call tree intact when the text is parsed back. Other
//! functions print through their template or as `name(args, key=value)`.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::expression::Expression;
use crate::function::Function;
use crate::native::Native;
use crate::operator::Precedence;
use crate::symbol::Symbol;
use crate::value::Value;
use crate::visitor::{visit_all, Visitor};

/// Rendered text of a node plus how tightly its top-level operator binds.
///
/// `binding` is `None` for atoms (names, calls, brackets), which never
/// need parentheses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub binding: Option<Precedence>,
}

impl Rendered {
    fn atom(text: String) -> Self {
        Rendered {
            text,
            binding: None,
        }
    }
}

/// The formatting visitor.
#[derive(Default)]
pub struct Stringify;

impl Visitor for Stringify {
    type Output = Rendered;
    type Error = Infallible;

    fn visit_expression(&mut self, expression: &Expression) -> Result<Rendered, Infallible> {
        let args = visit_all(self, expression.args())?;
        let kwargs: Vec<String> = expression
            .kwargs_items()
            .iter()
            .map(|(key, value)| Ok(format!("{key}={}", self.visit(value)?.text)))
            .collect::<Result<_, Infallible>>()?;
        Ok(render_call(expression.function(), args, kwargs))
    }

    fn visit_function(&mut self, function: &Function) -> Result<Rendered, Infallible> {
        Ok(Rendered::atom(function.to_string()))
    }

    fn visit_symbol(&mut self, symbol: &Symbol) -> Result<Rendered, Infallible> {
        match symbol.expression() {
            Some(expression) => self.visit_expression(expression),
            None => Ok(Rendered::atom(symbol.named().to_string())),
        }
    }

    fn visit_list(&mut self, items: &[Value]) -> Result<Rendered, Infallible> {
        let items = visit_all(self, items)?;
        Ok(Rendered::atom(format!("[{}]", join(&items))))
    }

    fn visit_tuple(&mut self, items: &[Value]) -> Result<Rendered, Infallible> {
        let rendered = visit_all(self, items)?;
        let text = match rendered.as_slice() {
            [single] => format!("({},)", single.text),
            _ => format!("({})", join(&rendered)),
        };
        Ok(Rendered::atom(text))
    }

    fn visit_map(&mut self, entries: &[(Arc<str>, Value)]) -> Result<Rendered, Infallible> {
        let mut parts = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            parts.push(format!("'{key}': {}", self.visit(value)?.text));
        }
        Ok(Rendered::atom(format!("{{{}}}", parts.join(", "))))
    }

    fn visit_native(&mut self, native: &Native) -> Result<Rendered, Infallible> {
        let binding = native.is_negative_number().then_some(Precedence::Unary);
        Ok(Rendered {
            text: native.to_string(),
            binding,
        })
    }
}

fn join(items: &[Rendered]) -> String {
    items
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_call(function: &Function, args: Vec<Rendered>, kwargs: Vec<String>) -> Rendered {
    if let (Some(spec), Some(template)) = (function.operator_spec(), function.format_template()) {
        let operands: Vec<String> = args
            .into_iter()
            .enumerate()
            .map(|(position, operand)| match operand.binding {
                Some(child) if spec.needs_parens(child, position) => {
                    format!("({})", operand.text)
                }
                _ => operand.text,
            })
            .collect();
        return Rendered {
            text: fill_template(template, &operands),
            binding: Some(spec.precedence),
        };
    }

    let mut operands: Vec<String> = args.into_iter().map(|operand| operand.text).collect();
    operands.extend(kwargs);
    let text = match function.format_template() {
        Some(template) => fill_template(template, &operands),
        None => format!("{function}({})", operands.join(", ")),
    };
    Rendered::atom(text)
}

/// Fill `{}` (next operand) and `{N}` (operand N) placeholders.
/// `{{` and `}}` are literal braces.
pub fn fill_template(template: &str, operands: &[String]) -> String {
    let capacity = template.len() + operands.iter().map(String::len).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut next = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut index = String::new();
                for d in chars.by_ref() {
                    if d == '}' {
                        break;
                    }
                    index.push(d);
                }
                let position = if index.is_empty() {
                    next += 1;
                    next - 1
                } else {
                    index.parse().unwrap_or(usize::MAX)
                };
                out.push_str(operands.get(position).map_or("", String::as_str));
            }
            _ => out.push(c),
        }
    }
    out
}

/// Render any node.
pub fn stringify(value: &Value) -> String {
    match Stringify.visit(value) {
        Ok(rendered) => rendered.text,
        Err(never) => match never {},
    }
}

fn render_with<T>(
    f: &mut fmt::Formatter<'_>,
    node: T,
    visit: impl FnOnce(&mut Stringify, T) -> Result<Rendered, Infallible>,
) -> fmt::Result {
    match visit(&mut Stringify, node) {
        Ok(rendered) => f.write_str(&rendered.text),
        Err(never) => match never {},
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_with(f, self, |v, node| v.visit(node))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_with(f, self, |v, node| v.visit_expression(node))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_with(f, self, |v, node| v.visit_symbol(node))
    }
}
