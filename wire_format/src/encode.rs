use crate::opcodes::Opcode;
use crate::statements::*;

use serde::{Serialize, Serializer};
use serde_json::{json, Value as Json};

/// Attribute names common enough to be sent as their index in this list.
pub const DEFLATED_ATTRS: [&str; 7] = ["class", "id", "value", "name", "type", "style", "href"];

pub fn deflate_attr_name(name: &str) -> Json {
    match DEFLATED_ATTRS.iter().position(|attr| *attr == name) {
        Some(index) => json!(index),
        None => json!(name),
    }
}

fn op(opcode: Opcode) -> Json {
    json!(opcode.code())
}

impl Value {
    pub fn encode(&self) -> Json {
        match self {
            Value::String(value) => json!(value),
            Value::Boolean(value) => json!(value),
            Value::Null => Json::Null,
            Value::Number(value) => encode_number(*value),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn encode_number(value: f64) -> Json {
    // Integral numbers are sent without a fraction.
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        json!(value as i64)
    } else {
        serde_json::Number::from_f64(value).map_or(Json::Null, Json::Number)
    }
}

pub fn encode_params(params: &[Expression]) -> Json {
    if params.is_empty() {
        Json::Null
    } else {
        Json::Array(params.iter().map(Expression::encode).collect())
    }
}

pub fn encode_hash(hash: &[(String, Expression)]) -> Json {
    if hash.is_empty() {
        return Json::Null;
    }
    let keys: Vec<Json> = hash.iter().map(|(key, _)| json!(key)).collect();
    let values: Vec<Json> = hash.iter().map(|(_, value)| value.encode()).collect();
    json!([keys, values])
}

pub fn encode_blocks(blocks: &[(String, InlineBlock)]) -> Json {
    let names: Vec<Json> = blocks.iter().map(|(name, _)| json!(name)).collect();
    let bodies: Vec<Json> = blocks.iter().map(|(_, block)| block.encode()).collect();
    json!([names, bodies])
}

impl Expression {
    pub fn encode(&self) -> Json {
        match self {
            Expression::Undefined => json!([op(Opcode::Undefined)]),
            Expression::Value(value) => value.encode(),
            Expression::GetSymbol(symbol) => json!([op(Opcode::GetSymbol), symbol]),
            Expression::GetFree(symbol) => json!([op(Opcode::GetFree), symbol]),
            Expression::GetContextualFree(symbol, context) => {
                json!([op(context.free_opcode()), symbol])
            }
            Expression::GetPath(head, tail) => json!([op(Opcode::GetPath), head.encode(), tail]),
            Expression::Concat(parts) => json!([op(Opcode::Concat), encode_params(parts)]),
            Expression::Call { head, params, hash } => json!([
                op(Opcode::Call),
                head.encode(),
                encode_params(params),
                encode_hash(hash)
            ]),
            Expression::HasBlock(block) => json!([op(Opcode::HasBlock), block.encode()]),
            Expression::HasBlockParams(block) => {
                json!([op(Opcode::HasBlockParams), block.encode()])
            }
        }
    }
}

impl InlineBlock {
    pub fn encode(&self) -> Json {
        let statements: Vec<Json> = self.statements.iter().map(Statement::encode).collect();
        json!({ "statements": statements, "parameters": self.parameters })
    }
}

impl Statement {
    pub fn encode(&self) -> Json {
        match self {
            Statement::Append(value) => json!([op(Opcode::Append), value.encode()]),
            Statement::TrustingAppend(value) => json!([op(Opcode::TrustingAppend), value.encode()]),
            Statement::Comment(value) => json!([op(Opcode::Comment), value]),
            Statement::Modifier { head, params, hash } => json!([
                op(Opcode::Modifier),
                head.encode(),
                encode_params(params),
                encode_hash(hash)
            ]),
            Statement::Block {
                head,
                params,
                hash,
                blocks,
            } => json!([
                op(Opcode::Block),
                head.encode(),
                encode_params(params),
                encode_hash(hash),
                encode_blocks(blocks)
            ]),
            Statement::Component {
                tag,
                attrs,
                args,
                blocks,
            } => {
                let attrs: Vec<Json> = attrs.iter().map(Statement::encode).collect();
                let blocks = blocks.as_ref().map_or(Json::Null, |blocks| encode_blocks(blocks));
                json!([op(Opcode::Component), tag.encode(), attrs, encode_hash(args), blocks])
            }
            Statement::OpenElement(tag) => json!([op(Opcode::OpenElement), tag]),
            Statement::OpenElementWithSplat(tag) => json!([op(Opcode::OpenElementWithSplat), tag]),
            Statement::FlushElement => json!([op(Opcode::FlushElement)]),
            Statement::CloseElement => json!([op(Opcode::CloseElement)]),
            Statement::Attr {
                kind,
                name,
                value,
                namespace,
            } => {
                let mut out = vec![op(kind.opcode()), deflate_attr_name(name), value.encode()];
                if let Some(namespace) = namespace {
                    out.push(json!(namespace));
                }
                Json::Array(out)
            }
            Statement::StaticArg { name, value } => json!([op(Opcode::StaticArg), name, value.encode()]),
            Statement::DynamicArg { name, value } => {
                json!([op(Opcode::DynamicArg), name, value.encode()])
            }
            Statement::AttrSplat(symbol) => json!([op(Opcode::AttrSplat), symbol]),
            Statement::Yield { to, params } => json!([op(Opcode::Yield), to, encode_params(params)]),
            Statement::Partial { expr, eval_info } => {
                json!([op(Opcode::Partial), expr.encode(), eval_info])
            }
            Statement::Debugger(eval_info) => json!([op(Opcode::Debugger), eval_info]),
            Statement::InElement {
                block,
                guid,
                destination,
                insert_before,
            } => {
                let mut out = vec![
                    op(Opcode::InElement),
                    block.encode(),
                    json!(guid),
                    destination.encode(),
                ];
                if let Some(insert_before) = insert_before {
                    out.push(insert_before.encode());
                }
                Json::Array(out)
            }
        }
    }
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode().serialize(serializer)
    }
}

impl SerializedTemplateBlock {
    /// The JSON text handed to the runtime.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
