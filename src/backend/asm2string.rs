use std::fmt;

use super::mir_inst::{AsmItem, MirInst};

impl fmt::Display for MirInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.mnemonic();
        match self {
            MirInst::Li { rd, imm } => write!(f, "{op} {rd}, {imm}"),
            MirInst::Add { rd, rs1, rs2 }
            | MirInst::Sub { rd, rs1, rs2 }
            | MirInst::Mul { rd, rs1, rs2 }
            | MirInst::Div { rd, rs1, rs2 }
            | MirInst::Rem { rd, rs1, rs2 }
            | MirInst::And { rd, rs1, rs2 }
            | MirInst::Or { rd, rs1, rs2 }
            | MirInst::Xor { rd, rs1, rs2 }
            | MirInst::Slt { rd, rs1, rs2 }
            | MirInst::Sgt { rd, rs1, rs2 } => write!(f, "{op} {rd}, {rs1}, {rs2}"),
            MirInst::Seqz { rd, rs } | MirInst::Snez { rd, rs } | MirInst::Mv { rd, rs } => {
                write!(f, "{op} {rd}, {rs}")
            }
            MirInst::Ret => f.write_str(op),
        }
    }
}

impl fmt::Display for AsmItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmItem::Directive(directive) => write!(f, "  {directive}"),
            AsmItem::Label(label) => write!(f, "{label}:"),
            AsmItem::Inst(inst) => write!(f, "  {inst}"),
        }
    }
}

/// 逐行拼接汇编文本
pub fn get_asm(items: &[AsmItem]) -> String {
    let mut asm = String::new();
    for item in items {
        asm += &format!("{item}\n");
    }
    asm
}
