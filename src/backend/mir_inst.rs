use super::regs::PReg;

/// 目标机器指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirInst {
    // 加载立即数
    Li { rd: PReg, imm: i32 },
    // 算术运算
    Add { rd: PReg, rs1: PReg, rs2: PReg },
    Sub { rd: PReg, rs1: PReg, rs2: PReg },
    Mul { rd: PReg, rs1: PReg, rs2: PReg },
    Div { rd: PReg, rs1: PReg, rs2: PReg },
    Rem { rd: PReg, rs1: PReg, rs2: PReg },
    // 逻辑运算
    And { rd: PReg, rs1: PReg, rs2: PReg },
    Or { rd: PReg, rs1: PReg, rs2: PReg },
    Xor { rd: PReg, rs1: PReg, rs2: PReg },
    // 比较
    Slt { rd: PReg, rs1: PReg, rs2: PReg },
    Sgt { rd: PReg, rs1: PReg, rs2: PReg },
    Seqz { rd: PReg, rs: PReg },
    Snez { rd: PReg, rs: PReg },
    // 寄存器移动
    Mv { rd: PReg, rs: PReg },
    // 函数返回
    Ret,
}

impl MirInst {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            MirInst::Li { .. } => "li",
            MirInst::Add { .. } => "add",
            MirInst::Sub { .. } => "sub",
            MirInst::Mul { .. } => "mul",
            MirInst::Div { .. } => "div",
            MirInst::Rem { .. } => "rem",
            MirInst::And { .. } => "and",
            MirInst::Or { .. } => "or",
            MirInst::Xor { .. } => "xor",
            MirInst::Slt { .. } => "slt",
            MirInst::Sgt { .. } => "sgt",
            MirInst::Seqz { .. } => "seqz",
            MirInst::Snez { .. } => "snez",
            MirInst::Mv { .. } => "mv",
            MirInst::Ret => "ret",
        }
    }
}

/// 汇编输出中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmItem {
    // 汇编伪指令，如 `.text`
    Directive(String),
    Label(String),
    Inst(MirInst),
}
