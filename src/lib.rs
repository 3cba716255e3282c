use lalrpop_util::lalrpop_mod;
use log::{debug, trace};

pub mod backend;
pub mod config;
pub mod error;
pub mod frontend;
pub mod utils;

//指定生成的代码的位置
lalrpop_mod!(#[allow(clippy::all)] pub sysy, "/frontend/lalrpop/sysy.rs");

use error::CompileResult;

/// 源码编译为IR文本
pub fn compile_to_ir(src: &str) -> CompileResult<String> {
    let ast = frontend::parse(src)?;
    let ir = frontend::irgen(&ast);
    debug!("generated {} lines of IR", ir.lines().count());
    Ok(ir)
}

/// IR文本编译为RISC-V汇编
pub fn ir_to_riscv(ir: &str) -> CompileResult<String> {
    let ctx = frontend::ir::reader::parse(ir)?;
    trace!("IR model:\n{}", ctx.get_ir_string());
    let mut codegen = backend::codegen::CodegenContext::new(&ctx);
    codegen.codegen();
    Ok(codegen.get_asm())
}

/// 源码编译为RISC-V汇编，中间经过IR文本
pub fn compile_to_riscv(src: &str) -> CompileResult<String> {
    let ir = compile_to_ir(src)?;
    ir_to_riscv(&ir)
}
