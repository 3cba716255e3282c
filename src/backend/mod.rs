pub mod asm2string;
pub mod codegen;
pub mod mir_inst;
pub mod reg_alloc;
pub mod regs;
pub mod visit;
