use crate::encode::DEFLATED_ATTRS;
use crate::opcodes::Opcode;
use crate::statements::*;

use serde::de::{Deserialize, Deserializer, Error as _};
use serde_json::Value as Json;

use std::convert::TryFrom;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    UnknownOpcode(u64),
    /// A known opcode in a position where it cannot appear.
    UnexpectedOpcode(Opcode),
    Malformed(&'static str),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownOpcode(code) => write!(f, "unknown opcode {}", code),
            DecodeError::UnexpectedOpcode(opcode) => write!(f, "unexpected opcode {:?}", opcode),
            DecodeError::Malformed(message) => write!(f, "malformed wire format: {}", message),
        }
    }
}

impl std::error::Error for DecodeError {}

type Result<T> = std::result::Result<T, DecodeError>;

struct Operands<'a> {
    items: std::slice::Iter<'a, Json>,
}

impl<'a> Operands<'a> {
    fn next(&mut self) -> Result<&'a Json> {
        self.items
            .next()
            .ok_or(DecodeError::Malformed("missing operand"))
    }

    fn optional(&mut self) -> Option<&'a Json> {
        self.items.next()
    }

    fn symbol(&mut self) -> Result<u32> {
        as_u32(self.next()?)
    }

    fn string(&mut self) -> Result<String> {
        as_string(self.next()?)
    }

    fn expr(&mut self) -> Result<Expression> {
        decode_expression(self.next()?)
    }

    fn params(&mut self) -> Result<Params> {
        decode_params(self.next()?)
    }

    fn hash(&mut self) -> Result<Hash> {
        decode_hash(self.next()?)
    }

    fn symbols(&mut self) -> Result<Vec<u32>> {
        self.next()?
            .as_array()
            .ok_or(DecodeError::Malformed("expected a list of symbols"))?
            .iter()
            .map(as_u32)
            .collect()
    }

    fn finish<T>(mut self, value: T) -> Result<T> {
        match self.items.next() {
            Some(_) => Err(DecodeError::Malformed("too many operands")),
            None => Ok(value),
        }
    }
}

fn as_u32(json: &Json) -> Result<u32> {
    json.as_u64()
        .and_then(|value| u32::try_from(value).ok())
        .ok_or(DecodeError::Malformed("expected a symbol"))
}

fn as_string(json: &Json) -> Result<String> {
    json.as_str()
        .map(String::from)
        .ok_or(DecodeError::Malformed("expected a string"))
}

fn tuple(json: &Json) -> Result<(Opcode, Operands<'_>)> {
    let items = json
        .as_array()
        .ok_or(DecodeError::Malformed("expected an opcode tuple"))?;
    let (first, rest) = items
        .split_first()
        .ok_or(DecodeError::Malformed("empty opcode tuple"))?;
    let code = first
        .as_u64()
        .ok_or(DecodeError::Malformed("opcodes are integers"))?;
    let opcode = Opcode::from_code(code).ok_or(DecodeError::UnknownOpcode(code))?;
    Ok((opcode, Operands { items: rest.iter() }))
}

pub fn decode_params(json: &Json) -> Result<Params> {
    match json {
        Json::Null => Ok(vec![]),
        Json::Array(items) => items.iter().map(decode_expression).collect(),
        _ => Err(DecodeError::Malformed("expected params")),
    }
}

pub fn decode_hash(json: &Json) -> Result<Hash> {
    if json.is_null() {
        return Ok(vec![]);
    }
    let (keys, values) = pair_of_lists(json, "expected a hash")?;
    keys.iter()
        .zip(values)
        .map(|(key, value)| Ok((as_string(key)?, decode_expression(value)?)))
        .collect()
}

fn decode_blocks(json: &Json) -> Result<NamedBlocks> {
    let (names, blocks) = pair_of_lists(json, "expected a block table")?;
    names
        .iter()
        .zip(blocks)
        .map(|(name, block)| Ok((as_string(name)?, decode_inline_block(block)?)))
        .collect()
}

fn pair_of_lists<'a>(json: &'a Json, message: &'static str) -> Result<(&'a [Json], &'a [Json])> {
    match json.as_array().map(Vec::as_slice) {
        Some([Json::Array(keys), Json::Array(values)]) if keys.len() == values.len() => {
            Ok((keys.as_slice(), values.as_slice()))
        }
        _ => Err(DecodeError::Malformed(message)),
    }
}

pub fn decode_inline_block(json: &Json) -> Result<InlineBlock> {
    let statements = json
        .get("statements")
        .and_then(Json::as_array)
        .ok_or(DecodeError::Malformed("blocks have statements"))?
        .iter()
        .map(decode_statement)
        .collect::<Result<Vec<_>>>()?;
    let parameters = json
        .get("parameters")
        .and_then(Json::as_array)
        .ok_or(DecodeError::Malformed("blocks have parameters"))?
        .iter()
        .map(as_u32)
        .collect::<Result<Vec<_>>>()?;
    Ok(InlineBlock {
        statements,
        parameters,
    })
}

fn inflate_attr_name(json: &Json) -> Result<String> {
    match json {
        Json::Number(index) => index
            .as_u64()
            .and_then(|index| DEFLATED_ATTRS.get(usize::try_from(index).ok()?))
            .map(|name| (*name).to_string())
            .ok_or(DecodeError::Malformed("unknown attribute index")),
        _ => as_string(json),
    }
}

pub fn decode_expression(json: &Json) -> Result<Expression> {
    let value = match json {
        Json::Array(_) => return decode_expression_tuple(json),
        Json::Null => Value::Null,
        Json::Bool(value) => Value::Boolean(*value),
        Json::String(value) => Value::String(value.clone()),
        Json::Number(number) => Value::Number(
            number
                .as_f64()
                .ok_or(DecodeError::Malformed("number out of range"))?,
        ),
        Json::Object(_) => return Err(DecodeError::Malformed("objects are not expressions")),
    };
    Ok(Expression::Value(value))
}

fn decode_expression_tuple(json: &Json) -> Result<Expression> {
    let (opcode, mut operands) = tuple(json)?;
    let expr = match opcode {
        Opcode::Undefined => Expression::Undefined,
        Opcode::GetSymbol => Expression::GetSymbol(operands.symbol()?),
        Opcode::GetFree => Expression::GetFree(operands.symbol()?),
        Opcode::GetPath => {
            let head = operands.expr()?;
            let tail = operands
                .next()?
                .as_array()
                .ok_or(DecodeError::Malformed("expected a path tail"))?
                .iter()
                .map(as_string)
                .collect::<Result<Vec<_>>>()?;
            Expression::GetPath(Box::new(head), tail)
        }
        Opcode::Concat => Expression::Concat(operands.params()?),
        Opcode::Call => Expression::Call {
            head: Box::new(operands.expr()?),
            params: operands.params()?,
            hash: operands.hash()?,
        },
        Opcode::HasBlock => Expression::HasBlock(Box::new(operands.expr()?)),
        Opcode::HasBlockParams => Expression::HasBlockParams(Box::new(operands.expr()?)),
        other => match other.free_context() {
            Some(context) => Expression::GetContextualFree(operands.symbol()?, context),
            None => return Err(DecodeError::UnexpectedOpcode(other)),
        },
    };
    operands.finish(expr)
}

pub fn decode_statement(json: &Json) -> Result<Statement> {
    let (opcode, mut operands) = tuple(json)?;
    let statement = match opcode {
        Opcode::Append => Statement::Append(operands.expr()?),
        Opcode::TrustingAppend => Statement::TrustingAppend(operands.expr()?),
        Opcode::Comment => Statement::Comment(operands.string()?),
        Opcode::Modifier => Statement::Modifier {
            head: operands.expr()?,
            params: operands.params()?,
            hash: operands.hash()?,
        },
        Opcode::Block => Statement::Block {
            head: operands.expr()?,
            params: operands.params()?,
            hash: operands.hash()?,
            blocks: decode_blocks(operands.next()?)?,
        },
        Opcode::Component => {
            let tag = operands.expr()?;
            let attrs = operands
                .next()?
                .as_array()
                .ok_or(DecodeError::Malformed("expected component attributes"))?
                .iter()
                .map(decode_statement)
                .collect::<Result<Vec<_>>>()?;
            let args = operands.hash()?;
            let blocks = match operands.next()? {
                Json::Null => None,
                blocks => Some(decode_blocks(blocks)?),
            };
            Statement::Component {
                tag,
                attrs,
                args,
                blocks,
            }
        }
        Opcode::OpenElement => Statement::OpenElement(operands.string()?),
        Opcode::OpenElementWithSplat => Statement::OpenElementWithSplat(operands.string()?),
        Opcode::FlushElement => Statement::FlushElement,
        Opcode::CloseElement => Statement::CloseElement,
        Opcode::StaticArg => Statement::StaticArg {
            name: operands.string()?,
            value: operands.expr()?,
        },
        Opcode::DynamicArg => Statement::DynamicArg {
            name: operands.string()?,
            value: operands.expr()?,
        },
        Opcode::AttrSplat => Statement::AttrSplat(operands.symbol()?),
        Opcode::Yield => Statement::Yield {
            to: operands.symbol()?,
            params: operands.params()?,
        },
        Opcode::Partial => Statement::Partial {
            expr: operands.expr()?,
            eval_info: operands.symbols()?,
        },
        Opcode::Debugger => Statement::Debugger(operands.symbols()?),
        Opcode::InElement => Statement::InElement {
            block: decode_inline_block(operands.next()?)?,
            guid: operands.string()?,
            destination: operands.expr()?,
            insert_before: operands.optional().map(decode_expression).transpose()?,
        },
        other => match AttrKind::from_opcode(other) {
            Some(kind) => Statement::Attr {
                kind,
                name: inflate_attr_name(operands.next()?)?,
                value: operands.expr()?,
                namespace: operands.optional().map(as_string).transpose()?,
            },
            None => return Err(DecodeError::UnexpectedOpcode(other)),
        },
    };
    operands.finish(statement)
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        decode_statement(&json).map_err(D::Error::custom)
    }
}

impl SerializedTemplateBlock {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
