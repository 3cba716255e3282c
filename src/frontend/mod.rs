pub mod ir;
pub mod ir2string;
pub mod irgen;
pub mod lalrpop;

use log::debug;

use crate::error::{CompileError, CompileResult};
use irgen::IrGen;
use lalrpop::ast::CompUnit;

/// 源码解析为AST
pub fn parse(src: &str) -> CompileResult<CompUnit> {
    crate::sysy::CompUnitParser::new()
        .parse(src)
        .map_err(|err| CompileError::Parse(err.to_string()))
}

/// AST生成IR文本
pub fn irgen(ast: &CompUnit) -> String {
    let mut irgen = irgen::IrGenContext::default();
    ast.irgen(&mut irgen);
    debug!("allocated {} IR temporaries", irgen.temps_allocated());
    irgen.ir()
}
