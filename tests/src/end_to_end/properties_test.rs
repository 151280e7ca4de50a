#[cfg(test)]
mod tests {
    use crate::fuzz::ArbitraryTemplate;
    use crate::support::init_logger;

    use compiler::{compile, encode, SerializedTemplateBlock};
    use lowering::{lower_template, LoweringOptions};
    use quickcheck_macros::quickcheck;
    use resolution::{resolve, OpKind, ResolveOptions};

    use std::collections::HashSet;

    fn compile_fuzzed(template: &ArbitraryTemplate) -> SerializedTemplateBlock {
        init_logger();
        compile(&template.0, "").unwrap()
    }

    #[quickcheck]
    fn compilation_is_deterministic(template: ArbitraryTemplate) -> bool {
        compile_fuzzed(&template) == compile_fuzzed(&template)
    }

    #[quickcheck]
    fn upvars_are_deduplicated(template: ArbitraryTemplate) -> bool {
        let block = compile_fuzzed(&template);
        let unique: HashSet<&String> = block.upvars.iter().collect();
        unique.len() == block.upvars.len()
    }

    #[quickcheck]
    fn template_symbols_are_unique(template: ArbitraryTemplate) -> bool {
        let block = compile_fuzzed(&template);
        let named: Vec<&String> = block
            .symbols
            .iter()
            .filter(|symbol| symbol.starts_with('@') || symbol.starts_with('&'))
            .collect();
        let unique: HashSet<&&String> = named.iter().collect();
        unique.len() == named.len()
    }

    #[quickcheck]
    fn resolved_ops_are_balanced(template: ArbitraryTemplate) -> bool {
        init_logger();
        let hir = lower_template(&template.0, LoweringOptions::default()).unwrap();
        let program = resolve(hir, ResolveOptions::default());
        let mut depth: i64 = 0;
        for op in &program.ops {
            match op.kind {
                OpKind::OpenElement(_)
                | OpKind::OpenElementWithSplat(_)
                | OpKind::OpenComponent { .. }
                | OpKind::OpenNamedBlock { .. }
                | OpKind::StartBlock { .. } => depth += 1,
                OpKind::CloseElement | OpKind::CloseComponent | OpKind::CloseNamedBlock | OpKind::EndBlock => {
                    depth -= 1;
                }
                _ => {}
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0
    }

    #[quickcheck]
    fn wire_format_decodes_to_the_same_block(template: ArbitraryTemplate) -> bool {
        let block = compile_fuzzed(&template);
        let json = encode(&block).unwrap();
        SerializedTemplateBlock::from_json(&json).unwrap() == block
    }
}
