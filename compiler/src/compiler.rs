#![warn(
    clippy::all,
    clippy::pedantic,
)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

use diagnostics::CompileResult as Result;
use lowering::LoweringOptions;
use log::debug;
use resolution::ResolveOptions;
use syntax::ast;

use std::fmt;

pub use diagnostics::{CompileResult, Diagnostic};
pub use wire_format::SerializedTemplateBlock;

/// Type of the hook that renames static component tags.
pub type CustomizeComponentName = Box<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Default)]
pub struct CompileOptions {
    /// Applied to `<Foo>`-style tags before they become free variables.
    pub customize_component_name: Option<CustomizeComponentName>,
    /// Emit free variables without a resolution context.
    pub strict_mode: bool,
}

impl fmt::Debug for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("customize_component_name", &self.customize_component_name.is_some())
            .field("strict_mode", &self.strict_mode)
            .finish()
    }
}

pub fn compile(ast: &ast::Template, source: &str) -> Result<SerializedTemplateBlock> {
    compile_with_options(ast, source, &CompileOptions::default())
}

/// Compiles a parsed template. `source` is the text the template was
/// parsed from, used to render errors.
pub fn compile_with_options(
    ast: &ast::Template,
    source: &str,
    options: &CompileOptions,
) -> Result<SerializedTemplateBlock> {
    debug!("compiling template ({} bytes, {:?})", source.len(), options);
    let lowering_options = LoweringOptions {
        customize_component_name: options.customize_component_name.as_deref(),
    };
    let template = lowering::lower_template(ast, lowering_options).map_err(|diagnostic| {
        debug!("compilation failed\n{}", diagnostic.render("template", source));
        diagnostic
    })?;

    let program = resolution::resolve(
        template,
        ResolveOptions {
            strict_mode: options.strict_mode,
        },
    );
    Ok(codegen::codegen(program))
}

/// The wire-format JSON of a compiled template.
pub fn encode(block: &SerializedTemplateBlock) -> serde_json::Result<String> {
    block.to_json()
}
