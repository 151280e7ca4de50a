use compiler::{compile, SerializedTemplateBlock};
use serde_json::Value as Json;
use syntax::ast;
use syntax::builders as b;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn compile_body(body: Vec<ast::Statement>) -> SerializedTemplateBlock {
    init_logger();
    compile(&b::template(body), "").unwrap()
}

/// The compiled template as the runtime would receive it.
pub fn compile_to_json(body: Vec<ast::Statement>) -> Json {
    serde_json::to_value(&compile_body(body)).unwrap()
}
