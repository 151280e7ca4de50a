use crate::diagnostics::Diagnostic;

pub type CompileResult<T> = std::result::Result<T, Diagnostic>;
