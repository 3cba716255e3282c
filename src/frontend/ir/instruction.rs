use std::fmt;

use koopa::ir::BinaryOp as KoopaBinaryOp;

/// IR中的二元运算
///
/// 文本形式统一为 `<result> = <op> <op1>, <op2>`，结果恒为i32。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // 算术运算
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // 比较运算，结果为0或1
    Eq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    // 按位运算
    And,
    Or,
    Xor,
}

impl BinaryOp {
    /// IR文本中的助记符
    pub fn mnemonic(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Mod => "mod",
            BinaryOp::Eq => "eq",
            BinaryOp::NotEq => "ne",
            BinaryOp::Lt => "lt",
            BinaryOp::Gt => "gt",
            BinaryOp::Le => "le",
            BinaryOp::Ge => "ge",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Koopa中有、这里不支持的运算（移位）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedOp(pub KoopaBinaryOp);

impl TryFrom<KoopaBinaryOp> for BinaryOp {
    type Error = UnsupportedOp;

    fn try_from(op: KoopaBinaryOp) -> Result<Self, Self::Error> {
        Ok(match op {
            KoopaBinaryOp::Add => BinaryOp::Add,
            KoopaBinaryOp::Sub => BinaryOp::Sub,
            KoopaBinaryOp::Mul => BinaryOp::Mul,
            KoopaBinaryOp::Div => BinaryOp::Div,
            KoopaBinaryOp::Mod => BinaryOp::Mod,
            KoopaBinaryOp::Eq => BinaryOp::Eq,
            KoopaBinaryOp::NotEq => BinaryOp::NotEq,
            KoopaBinaryOp::Lt => BinaryOp::Lt,
            KoopaBinaryOp::Gt => BinaryOp::Gt,
            KoopaBinaryOp::Le => BinaryOp::Le,
            KoopaBinaryOp::Ge => BinaryOp::Ge,
            KoopaBinaryOp::And => BinaryOp::And,
            KoopaBinaryOp::Or => BinaryOp::Or,
            KoopaBinaryOp::Xor => BinaryOp::Xor,
            KoopaBinaryOp::Shl | KoopaBinaryOp::Shr | KoopaBinaryOp::Sar => {
                return Err(UnsupportedOp(op))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn koopa_operators_map_by_mnemonic() {
        let table = [
            (KoopaBinaryOp::Add, "add"),
            (KoopaBinaryOp::Mod, "mod"),
            (KoopaBinaryOp::NotEq, "ne"),
            (KoopaBinaryOp::Ge, "ge"),
            (KoopaBinaryOp::Xor, "xor"),
        ];
        for (op, mnemonic) in table {
            assert_eq!(BinaryOp::try_from(op).unwrap().to_string(), mnemonic);
        }
    }

    #[test]
    fn shifts_are_rejected() {
        assert_eq!(
            BinaryOp::try_from(KoopaBinaryOp::Shl),
            Err(UnsupportedOp(KoopaBinaryOp::Shl))
        );
        assert!(BinaryOp::try_from(KoopaBinaryOp::Sar).is_err());
    }
}
