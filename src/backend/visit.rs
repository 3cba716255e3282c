use super::{codegen::CodegenContext, reg_alloc::RegAllocator};
use crate::frontend::ir::{
    basicblock::BasicBlock,
    context::{Context, RawSlice},
    function::Function,
    value::{Value, ValueKind},
};

/// 遍历IR，把每个节点交给汇编生成器
pub trait CodeGen {
    fn codegen<A: RegAllocator>(&self, codegen: &mut CodegenContext<'_, A>);
}

impl CodeGen for Context {
    /// 先全局值，后函数
    fn codegen<A: RegAllocator>(&self, codegen: &mut CodegenContext<'_, A>) {
        self.values().codegen(codegen);
        self.funcs().codegen(codegen);
    }
}

impl CodeGen for RawSlice<'_> {
    fn codegen<A: RegAllocator>(&self, codegen: &mut CodegenContext<'_, A>) {
        match *self {
            RawSlice::Function(funcs) => funcs.iter().for_each(|func| func.codegen(codegen)),
            RawSlice::BasicBlock(bbs) => bbs.iter().for_each(|bbk| bbk.codegen(codegen)),
            RawSlice::Value(values) => values.iter().for_each(|value| value.codegen(codegen)),
        }
    }
}

impl CodeGen for Function {
    fn codegen<A: RegAllocator>(&self, codegen: &mut CodegenContext<'_, A>) {
        let ctx = codegen.ctx;
        codegen.begin_function(*self);
        self.bbs(ctx).codegen(codegen);
    }
}

impl CodeGen for BasicBlock {
    fn codegen<A: RegAllocator>(&self, codegen: &mut CodegenContext<'_, A>) {
        let ctx = codegen.ctx;
        self.insts(ctx).codegen(codegen);
    }
}

impl CodeGen for Value {
    fn codegen<A: RegAllocator>(&self, codegen: &mut CodegenContext<'_, A>) {
        let ctx = codegen.ctx;
        match *self.kind(ctx) {
            ValueKind::Return { value } => codegen.emit_return(value),
            ValueKind::Binary { op, lhs, rhs } => codegen.emit_binary(op, lhs, rhs, *self),
            // 常量由使用它的指令按需装入
            ValueKind::Integer { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mir_inst::{AsmItem, MirInst};
    use crate::frontend::ir::instruction::BinaryOp;

    #[test]
    fn integer_values_emit_nothing() {
        let mut ctx = Context::new();
        let func = Function::new(&mut ctx, "main");
        let entry = BasicBlock::new(&mut ctx, func, "%entry");
        let one = Value::integer(&mut ctx, 1);
        entry.push_back(&mut ctx, one);
        ctx.add_global_value(one);

        let mut codegen = CodegenContext::new(&ctx);
        ctx.codegen(&mut codegen);
        assert_eq!(
            codegen.items(),
            &[
                AsmItem::Directive(".globl main".into()),
                AsmItem::Label("main".into())
            ]
        );
    }

    #[test]
    fn blocks_and_instructions_in_stored_order() {
        let mut ctx = Context::new();
        let func = Function::new(&mut ctx, "f");
        let first = BasicBlock::new(&mut ctx, func, "%entry");
        let second = BasicBlock::new(&mut ctx, func, "%next");
        let one = Value::integer(&mut ctx, 1);
        let sum = Value::binary(&mut ctx, "%0", BinaryOp::Add, one, one);
        first.push_back(&mut ctx, sum);
        let ret = Value::ret(&mut ctx, Some(sum));
        second.push_back(&mut ctx, ret);

        let mut codegen = CodegenContext::new(&ctx);
        func.codegen(&mut codegen);
        let insts: Vec<&str> = codegen
            .items()
            .iter()
            .filter_map(|item| match item {
                AsmItem::Inst(inst) => Some(inst.mnemonic()),
                _ => None,
            })
            .collect();
        assert_eq!(insts, ["li", "add", "mv", "ret"]);
        assert!(matches!(
            codegen.items().last(),
            Some(AsmItem::Inst(MirInst::Ret))
        ));
    }
}
