use super::ir::{
    basicblock::BasicBlock,
    context::Context,
    function::Function,
    value::{Value, ValueKind},
};

pub trait Display {
    fn display(self, ctx: &Context) -> String;
}

impl Context {
    /// 把整个程序重新输出为IR文本，格式与IR生成器的输出一致
    pub fn get_ir_string(&self) -> String {
        let mut ir = String::new();
        for (i, func) in self.get_functions().iter().enumerate() {
            if i != 0 {
                ir += "\n";
            }
            ir += &func.display(self);
        }
        ir
    }
}

impl Display for Function {
    fn display(self, ctx: &Context) -> String {
        let mut ir = String::new();
        ir += &format!("fun @{}(): i32 {{\n", self.get_id(ctx));
        for bbk in self.get_basicblocks(ctx) {
            ir += &bbk.display(ctx);
        }
        ir += "}\n";
        ir
    }
}

impl Display for BasicBlock {
    fn display(self, ctx: &Context) -> String {
        let mut ir = String::new();
        ir += &format!("{}:\n", self.get_name(ctx));
        for inst in self.get_insts(ctx) {
            ir += &format!("  {}\n", inst.display(ctx));
        }
        ir
    }
}

impl Display for Value {
    fn display(self, ctx: &Context) -> String {
        match self.kind(ctx) {
            ValueKind::Integer { value } => value.to_string(),
            ValueKind::Binary { op, lhs, rhs } => format!(
                "{} = {} {}, {}",
                self.operand_string(ctx),
                op,
                lhs.operand_string(ctx),
                rhs.operand_string(ctx)
            ),
            ValueKind::Return { value: Some(value) } => {
                format!("ret {}", value.operand_string(ctx))
            }
            ValueKind::Return { value: None } => "ret".to_string(),
        }
    }
}
