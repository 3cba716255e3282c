use std::fmt;

use super::{
    ir::instruction::BinaryOp as IBinaryOp,
    lalrpop::ast::{
        BinaryOp as ABinaryOp, Block, CompUnit, Exp, FuncDef, FuncType, Return, Stmt,
        UnaryOp as AUnaryOp,
    },
};

/// 表达式的结果在IR中的写法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    // 字面量直接内联，不生成临时变量
    Const(i32),
    // `%N`
    Temp(u32),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Const(val) => write!(f, "{val}"),
            Operand::Temp(id) => write!(f, "%{id}"),
        }
    }
}

/// 一次编译的IR生成状态
///
/// 临时变量编号在整个编译单元内单调递增，只在开始编译一个 `CompUnit` 时清零，
/// 因此同一单元内的名字全局唯一。
#[derive(Debug, Default)]
pub struct IrGenContext {
    ir: String,
    next_temp: u32,
}

impl IrGenContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出生成的IR文本
    pub fn ir(self) -> String {
        self.ir
    }

    /// 清空输出并把临时变量编号归零
    pub fn reset(&mut self) {
        self.ir.clear();
        self.next_temp = 0;
    }

    /// 到目前为止分配过的临时变量个数
    pub fn temps_allocated(&self) -> u32 {
        self.next_temp
    }

    fn new_temp(&mut self) -> Operand {
        let temp = Operand::Temp(self.next_temp);
        self.next_temp += 1;
        temp
    }

    /// 生成一条 `%N = op lhs, rhs`，返回结果
    fn emit(&mut self, ir: &mut String, op: IBinaryOp, lhs: Operand, rhs: Operand) -> Operand {
        let dest = self.new_temp();
        ir.push_str(&format!("  {dest} = {op} {lhs}, {rhs}\n"));
        dest
    }

    /// return语句降级为指令序列加上末尾的 `ret`
    pub fn lower_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Return(Return { exp }) => {
                let (mut ir, result) = self.ast2ir_exp(exp);
                ir.push_str(&format!("  ret {result}\n"));
                ir
            }
        }
    }

    /// AST表达式后序遍历（先操作数后运算符），返回生成的指令和表达式结果
    pub fn ast2ir_exp(&mut self, exp: &Exp) -> (String, Operand) {
        match exp {
            Exp::Number(val) => (String::new(), Operand::Const(*val)),
            Exp::Unary(op, operand) => self.ast2ir_unary(*op, operand),
            Exp::Binary(op, lhs, rhs) => self.ast2ir_binary(*op, lhs, rhs),
        }
    }

    fn ast2ir_unary(&mut self, op: AUnaryOp, operand: &Exp) -> (String, Operand) {
        let (mut ir, val) = self.ast2ir_exp(operand);
        let zero = Operand::Const(0);
        let result = match op {
            AUnaryOp::Pos => self.emit(&mut ir, IBinaryOp::Add, zero, val),
            AUnaryOp::Neg => self.emit(&mut ir, IBinaryOp::Sub, zero, val),
            AUnaryOp::Not => self.emit(&mut ir, IBinaryOp::Eq, val, zero),
        };
        (ir, result)
    }

    fn ast2ir_binary(&mut self, op: ABinaryOp, lhs: &Exp, rhs: &Exp) -> (String, Operand) {
        // 先左后右
        let (mut ir, lhs_val) = self.ast2ir_exp(lhs);
        let (rhs_ir, rhs_val) = self.ast2ir_exp(rhs);
        ir.push_str(&rhs_ir);

        let zero = Operand::Const(0);
        let opcode = match op {
            ABinaryOp::Add => IBinaryOp::Add,
            ABinaryOp::Sub => IBinaryOp::Sub,
            ABinaryOp::Mul => IBinaryOp::Mul,
            ABinaryOp::Div => IBinaryOp::Div,
            ABinaryOp::Mod => IBinaryOp::Mod,
            ABinaryOp::Lt => IBinaryOp::Lt,
            ABinaryOp::Gt => IBinaryOp::Gt,
            ABinaryOp::Le => IBinaryOp::Le,
            ABinaryOp::Ge => IBinaryOp::Ge,
            ABinaryOp::Eq => IBinaryOp::Eq,
            ABinaryOp::Ne => IBinaryOp::NotEq,
            // 两侧都求值，各自转成布尔值后按位与。
            // 逻辑运算先占用一个不出现在输出里的编号，`1 && 2` 的结果从 `%1` 开始
            ABinaryOp::And => {
                self.new_temp();
                let lhs_bool = self.emit(&mut ir, IBinaryOp::NotEq, lhs_val, zero);
                let rhs_bool = self.emit(&mut ir, IBinaryOp::NotEq, rhs_val, zero);
                let result = self.emit(&mut ir, IBinaryOp::And, lhs_bool, rhs_bool);
                return (ir, result);
            }
            // 先按位或，再整体转成布尔值
            ABinaryOp::Or => {
                self.new_temp();
                let or_val = self.emit(&mut ir, IBinaryOp::Or, lhs_val, rhs_val);
                let result = self.emit(&mut ir, IBinaryOp::NotEq, or_val, zero);
                return (ir, result);
            }
        };
        let result = self.emit(&mut ir, opcode, lhs_val, rhs_val);
        (ir, result)
    }
}

pub trait IrGen {
    fn irgen(&self, irgen: &mut IrGenContext);
}

impl IrGen for CompUnit {
    /// 为编译单元生成IR，临时变量从 `%0` 重新开始
    fn irgen(&self, irgen: &mut IrGenContext) {
        irgen.reset();
        self.func_def.irgen(irgen);
    }
}

impl IrGen for FuncDef {
    fn irgen(&self, irgen: &mut IrGenContext) {
        let ret_type = match self.typ {
            FuncType::Int => "i32",
        };
        irgen.ir += &format!("fun @{}(): {} {{\n", self.id, ret_type);
        irgen.ir += "%entry:\n";
        self.block.irgen(irgen);
        irgen.ir += "}\n";
    }
}

impl IrGen for Block {
    fn irgen(&self, irgen: &mut IrGenContext) {
        self.stmt.irgen(irgen);
    }
}

impl IrGen for Stmt {
    fn irgen(&self, irgen: &mut IrGenContext) {
        let ir = irgen.lower_stmt(self);
        irgen.ir += &ir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(val: i32) -> Exp {
        Exp::number(val)
    }

    fn lower(exp: Exp) -> (String, u32) {
        let mut irgen = IrGenContext::new();
        let ir = irgen.lower_stmt(&Stmt::Return(Return { exp }));
        (ir, irgen.temps_allocated())
    }

    #[test]
    fn literal_return_allocates_nothing() {
        for n in [0, 1, -7, i32::MAX, i32::MIN] {
            assert_eq!(lower(num(n)), (format!("  ret {n}\n"), 0));
        }
    }

    #[test]
    fn unary_operators() {
        assert_eq!(
            lower(Exp::unary(AUnaryOp::Pos, num(4))).0,
            "  %0 = add 0, 4\n  ret %0\n"
        );
        assert_eq!(
            lower(Exp::unary(AUnaryOp::Neg, num(4))).0,
            "  %0 = sub 0, 4\n  ret %0\n"
        );
        assert_eq!(
            lower(Exp::unary(AUnaryOp::Not, num(4))).0,
            "  %0 = eq 4, 0\n  ret %0\n"
        );
    }

    #[test]
    fn simple_binary_operators_keep_literal_operands() {
        let table = [
            (ABinaryOp::Add, "add"),
            (ABinaryOp::Sub, "sub"),
            (ABinaryOp::Mul, "mul"),
            (ABinaryOp::Div, "div"),
            (ABinaryOp::Mod, "mod"),
            (ABinaryOp::Lt, "lt"),
            (ABinaryOp::Gt, "gt"),
            (ABinaryOp::Le, "le"),
            (ABinaryOp::Ge, "ge"),
            (ABinaryOp::Eq, "eq"),
            (ABinaryOp::Ne, "ne"),
        ];
        for (op, mnemonic) in table {
            let (ir, temps) = lower(Exp::binary(op, num(5), num(9)));
            assert_eq!(ir, format!("  %0 = {mnemonic} 5, 9\n  ret %0\n"));
            assert_eq!(temps, 1);
        }
    }

    #[test]
    fn logical_and_is_three_instructions() {
        let (ir, temps) = lower(Exp::binary(ABinaryOp::And, num(2), num(0)));
        assert_eq!(
            ir,
            "  %1 = ne 2, 0\n  %2 = ne 0, 0\n  %3 = and %1, %2\n  ret %3\n"
        );
        assert_eq!(temps, 4);
    }

    #[test]
    fn logical_or_is_two_instructions() {
        let (ir, temps) = lower(Exp::binary(ABinaryOp::Or, num(2), num(0)));
        assert_eq!(ir, "  %1 = or 2, 0\n  %2 = ne %1, 0\n  ret %2\n");
        assert_eq!(temps, 3);
    }

    #[test]
    fn logical_operator_skips_one_name_after_its_operands() {
        // (1+2) && 3：左操作数占 %0，%1 被跳过
        let exp = Exp::binary(
            ABinaryOp::And,
            Exp::binary(ABinaryOp::Add, num(1), num(2)),
            num(3),
        );
        assert_eq!(
            lower(exp).0,
            "  %0 = add 1, 2\n  %2 = ne %0, 0\n  %3 = ne 3, 0\n  %4 = and %2, %3\n  ret %4\n"
        );
    }

    #[test]
    fn logical_shapes_do_not_depend_on_operands() {
        let nested = Exp::binary(ABinaryOp::Add, num(1), num(2));
        let (ir, _) = lower(Exp::binary(ABinaryOp::And, nested.clone(), nested));
        // 两个add，再加上固定的三条
        assert_eq!(ir.lines().count(), 2 + 3 + 1);

        let nested = Exp::unary(AUnaryOp::Neg, num(3));
        let (ir, _) = lower(Exp::binary(ABinaryOp::Or, num(1), nested));
        assert_eq!(ir.lines().count(), 1 + 2 + 1);
    }

    #[test]
    fn temporaries_follow_post_order() {
        // (1+2)*3
        let exp = Exp::binary(
            ABinaryOp::Mul,
            Exp::binary(ABinaryOp::Add, num(1), num(2)),
            num(3),
        );
        assert_eq!(lower(exp).0, "  %0 = add 1, 2\n  %1 = mul %0, 3\n  ret %1\n");

        // 1+2*3
        let exp = Exp::binary(
            ABinaryOp::Add,
            num(1),
            Exp::binary(ABinaryOp::Mul, num(2), num(3)),
        );
        assert_eq!(lower(exp).0, "  %0 = mul 2, 3\n  %1 = add 1, %0\n  ret %1\n");
    }

    #[test]
    fn left_operand_is_lowered_first() {
        let exp = Exp::binary(
            ABinaryOp::Sub,
            Exp::unary(AUnaryOp::Neg, num(1)),
            Exp::unary(AUnaryOp::Not, num(2)),
        );
        assert_eq!(
            lower(exp).0,
            "  %0 = sub 0, 1\n  %1 = eq 2, 0\n  %2 = sub %0, %1\n  ret %2\n"
        );
    }

    #[test]
    fn counter_is_shared_until_reset() {
        let mut irgen = IrGenContext::new();
        let stmt = Stmt::Return(Return {
            exp: Exp::unary(AUnaryOp::Neg, num(1)),
        });
        irgen.lower_stmt(&stmt);
        assert_eq!(irgen.lower_stmt(&stmt), "  %1 = sub 0, 1\n  ret %1\n");

        let unit = CompUnit::return_only("main", Exp::unary(AUnaryOp::Neg, num(1)));
        unit.irgen(&mut irgen);
        assert_eq!(
            irgen.ir(),
            "fun @main(): i32 {\n%entry:\n  %0 = sub 0, 1\n  ret %0\n}\n"
        );
    }

    #[test]
    fn operand_display() {
        assert_eq!(Operand::Const(-3).to_string(), "-3");
        assert_eq!(Operand::Temp(12).to_string(), "%12");
    }
}
