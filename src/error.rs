//! 编译过程中对外可见的错误
//!
//! 内部不变量（操作符、IR值的种类）由封闭的枚举保证，不会出现在这里。

use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("syntax error: {0}")]
    Parse(String),

    // Koopa前端已把带位置的诊断信息打印到stderr
    #[error("malformed IR text")]
    IrSyntax,

    #[error("unsupported IR: {0}")]
    UnsupportedIr(String),

    #[error("usage: {0}")]
    Usage(String),
}
