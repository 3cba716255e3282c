use log::{debug, trace};
use rustc_hash::FxHashMap as HashMap;

use super::{
    asm2string,
    mir_inst::{AsmItem, MirInst},
    reg_alloc::{RegAllocator, RoundRobinAllocator},
    regs::{PReg, RETURN_REG},
    visit::CodeGen,
};
use crate::frontend::ir::{
    context::Context,
    function::Function,
    instruction::BinaryOp,
    value::Value,
};

/// 汇编生成状态
///
/// 寄存器表与分配器的游标只在单个函数内有效，进入新函数时清空。
pub struct CodegenContext<'s, A: RegAllocator = RoundRobinAllocator> {
    pub(super) ctx: &'s Context,
    // IR值到物理寄存器的映射，按需填充
    table: HashMap<Value, PReg>,
    allocator: A,
    items: Vec<AsmItem>,
}

impl<'s> CodegenContext<'s> {
    pub fn new(ctx: &'s Context) -> Self {
        Self::with_allocator(ctx, RoundRobinAllocator::default())
    }
}

impl<'s, A: RegAllocator> CodegenContext<'s, A> {
    pub fn with_allocator(ctx: &'s Context, allocator: A) -> Self {
        Self {
            ctx,
            table: HashMap::default(),
            allocator,
            items: Vec::new(),
        }
    }

    /// 为整个程序生成汇编
    pub fn codegen(&mut self) {
        self.items.push(AsmItem::Directive(".text".to_string()));
        let ctx = self.ctx;
        ctx.codegen(self);
    }

    pub fn items(&self) -> &[AsmItem] {
        &self.items
    }

    pub fn get_asm(&self) -> String {
        asm2string::get_asm(self.items())
    }

    fn push(&mut self, inst: MirInst) {
        trace!("emit `{inst}`");
        self.items.push(AsmItem::Inst(inst));
    }

    /// 进入新函数：清空寄存器表和分配游标，输出符号与标号
    pub fn begin_function(&mut self, func: Function) {
        self.table.clear();
        self.allocator.reset();
        let name = func.get_id(self.ctx);
        debug!("generating assembly for function `{name}`");
        self.items.push(AsmItem::Directive(format!(".globl {name}")));
        self.items.push(AsmItem::Label(name.to_string()));
    }

    /// 分配寄存器；寄存器被再次分出时，原先装在里面的常量作废，下次使用时重新 `li`
    fn alloc_reg(&mut self) -> PReg {
        let reg = self.allocator.alloc();
        let ctx = self.ctx;
        self.table
            .retain(|value, held| *held != reg || !value.is_constant(ctx));
        reg
    }

    /// 取得值所在的寄存器
    ///
    /// 已经分配过的直接返回；否则分配新寄存器，常量用 `li` 装入。
    pub fn resolve_operand(&mut self, value: Value) -> PReg {
        if let Some(&reg) = self.table.get(&value) {
            return reg;
        }
        let reg = self.alloc_reg();
        if let Some(imm) = value.get_int_const_value(self.ctx) {
            self.push(MirInst::Li { rd: reg, imm });
        }
        self.table.insert(value, reg);
        reg
    }

    /// 先左后右解析操作数，再分配目标寄存器
    pub fn emit_binary(&mut self, op: BinaryOp, lhs: Value, rhs: Value, result: Value) {
        let rs1 = self.resolve_operand(lhs);
        let rs2 = self.resolve_operand(rhs);
        let rd = self.alloc_reg();
        match op {
            BinaryOp::Add => self.push(MirInst::Add { rd, rs1, rs2 }),
            BinaryOp::Sub => self.push(MirInst::Sub { rd, rs1, rs2 }),
            BinaryOp::Mul => self.push(MirInst::Mul { rd, rs1, rs2 }),
            BinaryOp::Div => self.push(MirInst::Div { rd, rs1, rs2 }),
            BinaryOp::Mod => self.push(MirInst::Rem { rd, rs1, rs2 }),
            BinaryOp::And => self.push(MirInst::And { rd, rs1, rs2 }),
            BinaryOp::Or => self.push(MirInst::Or { rd, rs1, rs2 }),
            BinaryOp::Xor => self.push(MirInst::Xor { rd, rs1, rs2 }),
            BinaryOp::Eq => {
                self.push(MirInst::Xor { rd, rs1, rs2 });
                self.push(MirInst::Seqz { rd, rs: rd });
            }
            BinaryOp::NotEq => {
                self.push(MirInst::Xor { rd, rs1, rs2 });
                self.push(MirInst::Snez { rd, rs: rd });
            }
            BinaryOp::Lt => self.push(MirInst::Slt { rd, rs1, rs2 }),
            // a > b 即 b < a
            BinaryOp::Gt => self.push(MirInst::Slt { rd, rs1: rs2, rs2: rs1 }),
            // a <= b 即 !(a > b)
            BinaryOp::Le => {
                self.push(MirInst::Sgt { rd, rs1, rs2 });
                self.push(MirInst::Seqz { rd, rs: rd });
            }
            // a >= b 即 !(a < b)
            BinaryOp::Ge => {
                self.push(MirInst::Slt { rd, rs1, rs2 });
                self.push(MirInst::Seqz { rd, rs: rd });
            }
        }
        self.table.insert(result, rd);
    }

    /// 返回值放入 `a0` 后返回
    pub fn emit_return(&mut self, value: Option<Value>) {
        if let Some(value) = value {
            let reg = self.resolve_operand(value);
            if reg != RETURN_REG {
                self.push(MirInst::Mv { rd: RETURN_REG, rs: reg });
            }
        }
        self.push(MirInst::Ret);
    }
}
