use std::fmt;

/// RISC-V 整数物理寄存器，编号即 `x0`..`x31`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PReg(pub u8);

impl PReg {
    pub const fn new(num: u8) -> Self {
        Self(num)
    }

    /// ABI名
    pub fn name(&self) -> &'static str {
        ABI_NAMES.get(self.0 as usize).copied().unwrap_or("<invalid>")
    }
}

impl fmt::Display for PReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[rustfmt::skip]
const ABI_NAMES: [&str; 32] = [
    "x0", "ra", "sp", "gp", "tp", "t0", "t1", "t2",
    "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5",
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7",
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6",
];

// RISC-V 临时寄存器
pub const fn t0() -> PReg { PReg::new(5) }
pub const fn t1() -> PReg { PReg::new(6) }
pub const fn t2() -> PReg { PReg::new(7) }
pub const fn t3() -> PReg { PReg::new(28) }
pub const fn t4() -> PReg { PReg::new(29) }
pub const fn t5() -> PReg { PReg::new(30) }
pub const fn t6() -> PReg { PReg::new(31) }
// RISC-V 参数寄存器
pub const fn a0() -> PReg { PReg::new(10) }
pub const fn a1() -> PReg { PReg::new(11) }
pub const fn a2() -> PReg { PReg::new(12) }
pub const fn a3() -> PReg { PReg::new(13) }
pub const fn a4() -> PReg { PReg::new(14) }
pub const fn a5() -> PReg { PReg::new(15) }
pub const fn a6() -> PReg { PReg::new(16) }
pub const fn a7() -> PReg { PReg::new(17) }

/// 返回值寄存器
pub const RETURN_REG: PReg = a0();

/// 轮转分配使用的寄存器池：7个临时寄存器之后是8个参数寄存器
pub const TEMP_POOL: [PReg; 15] = [
    t0(), t1(), t2(), t3(), t4(), t5(), t6(),
    a0(), a1(), a2(), a3(), a4(), a5(), a6(), a7(),
];
