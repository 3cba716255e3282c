//! 把Koopa IR文本读回内存中的IR模型
//!
//! 文本由 `koopa` 前端解析和类型检查，这里只把结果搬进自己的Arena。
//! Koopa为每次出现的字面量单独建值，转换时保持一一对应。

use koopa::front::Driver;
use koopa::ir::{
    dfg::DataFlowGraph, FunctionData as KoopaFunction, Program, TypeKind, Value as KoopaValue,
    ValueKind as KoopaValueKind,
};
use log::{debug, trace};
use rustc_hash::FxHashMap as HashMap;

use super::{
    basicblock::BasicBlock, context::Context, function::Function, instruction::BinaryOp,
    value::Value,
};
use crate::error::{CompileError, CompileResult};

/// 解析IR文本
pub fn parse(text: &str) -> CompileResult<Context> {
    let driver = Driver::from(text.to_string());
    let program = driver
        .generate_program()
        .map_err(|_| CompileError::IrSyntax)?;
    from_program(&program)
}

/// 由Koopa程序构建IR模型
pub fn from_program(program: &Program) -> CompileResult<Context> {
    if !program.inst_layout().is_empty() {
        return Err(unsupported("global values"));
    }

    let mut ctx = Context::new();
    for &func in program.func_layout() {
        let data = program.func(func);
        // 只有声明没有函数体
        if data.layout().entry_bb().is_none() {
            trace!("skipping declaration {}", data.name());
            continue;
        }
        FunctionReader::new(&mut ctx, data).read()?;
    }
    debug!(
        "read {} function(s), {} value(s) from IR text",
        ctx.get_functions().len(),
        ctx.values.len()
    );
    Ok(ctx)
}

fn unsupported(what: impl Into<String>) -> CompileError {
    CompileError::UnsupportedIr(what.into())
}

struct FunctionReader<'a> {
    ctx: &'a mut Context,
    func: &'a KoopaFunction,
    // Koopa值到本地值
    values: HashMap<KoopaValue, Value>,
}

impl<'a> FunctionReader<'a> {
    fn new(ctx: &'a mut Context, func: &'a KoopaFunction) -> Self {
        Self {
            ctx,
            func,
            values: HashMap::default(),
        }
    }

    fn read(mut self) -> CompileResult<()> {
        let koopa_func = self.func;
        let id = koopa_func.name().trim_start_matches('@');
        match koopa_func.ty().kind() {
            TypeKind::Function(params, ret) if params.is_empty() && ret.is_i32() => {}
            _ => {
                return Err(unsupported(format!(
                    "function `{id}` must take no parameters and return i32"
                )))
            }
        }

        let func = Function::new(self.ctx, id);
        let dfg = koopa_func.dfg();
        for (&bb, node) in koopa_func.layout().bbs() {
            let name = match dfg.bb(bb).name() {
                Some(name) => name.clone(),
                None => format!("%bb{}", func.get_basicblocks(self.ctx).len()),
            };
            let bbk = BasicBlock::new(self.ctx, func, name);
            for (&inst, _) in node.insts() {
                let value = self.read_value(dfg, inst)?;
                bbk.push_back(self.ctx, value);
            }
        }
        Ok(())
    }

    fn read_value(&mut self, dfg: &DataFlowGraph, value: KoopaValue) -> CompileResult<Value> {
        if let Some(&local) = self.values.get(&value) {
            return Ok(local);
        }
        let data = dfg.value(value);
        let local = match data.kind() {
            KoopaValueKind::Integer(int) => Value::integer(self.ctx, int.value()),
            KoopaValueKind::Binary(bin) => {
                let op = BinaryOp::try_from(bin.op())
                    .map_err(|err| unsupported(format!("operator {:?}", err.0)))?;
                let lhs = self.read_value(dfg, bin.lhs())?;
                let rhs = self.read_value(dfg, bin.rhs())?;
                let name = data
                    .name()
                    .clone()
                    .unwrap_or_else(|| format!("%v{}", self.values.len()));
                Value::binary(self.ctx, name, op, lhs, rhs)
            }
            KoopaValueKind::Return(ret) => {
                let operand = match ret.value() {
                    Some(operand) => Some(self.read_value(dfg, operand)?),
                    None => None,
                };
                Value::ret(self.ctx, operand)
            }
            _ => {
                let name = data.name().as_deref().unwrap_or("<unnamed>");
                return Err(unsupported(format!("instruction `{name}`")));
            }
        };
        self.values.insert(value, local);
        Ok(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ir::value::ValueKind;

    fn only_block_insts(ctx: &Context) -> &[Value] {
        ctx.get_functions()[0].get_basicblocks(ctx)[0].get_insts(ctx)
    }

    #[test]
    fn reads_emitter_output() {
        let ctx = parse("fun @main(): i32 {\n%entry:\n  %0 = mul 2, 3\n  %1 = add 1, %0\n  ret %1\n}\n")
            .unwrap();
        let func = ctx.get_functions()[0];
        assert_eq!(func.get_id(&ctx), "main");
        let entry = func.get_basicblocks(&ctx)[0];
        assert_eq!(entry.get_name(&ctx), "%entry");

        let insts = entry.get_insts(&ctx);
        assert_eq!(insts.len(), 3);
        let ValueKind::Binary { op, lhs, rhs } = insts[1].kind(&ctx) else {
            panic!("expected a binary value");
        };
        assert_eq!(*op, BinaryOp::Add);
        assert_eq!(lhs.get_int_const_value(&ctx), Some(1));
        assert_eq!(*rhs, insts[0]);
        assert_eq!(insts[1].name(&ctx), Some("%1"));
        assert_eq!(insts[2].kind(&ctx), &ValueKind::Return { value: Some(insts[1]) });
    }

    #[test]
    fn each_literal_occurrence_is_its_own_value() {
        let ctx = parse("fun @main(): i32 {\n%entry:\n  %0 = eq 0, 0\n  ret %0\n}\n").unwrap();
        let ValueKind::Binary { lhs, rhs, .. } = only_block_insts(&ctx)[0].kind(&ctx) else {
            panic!("expected a binary value");
        };
        assert_ne!(lhs, rhs);
        assert_eq!(lhs.get_int_const_value(&ctx), Some(0));
        assert_eq!(rhs.get_int_const_value(&ctx), Some(0));
    }

    #[test]
    fn functions_keep_program_order() {
        let ctx = parse(
            "fun @f(): i32 {\n%entry:\n  ret 7\n}\n\nfun @g(): i32 {\n%entry:\n  ret 8\n}\n",
        )
        .unwrap();
        let ids: Vec<&str> = ctx
            .get_functions()
            .iter()
            .map(|func| func.get_id(&ctx))
            .collect();
        assert_eq!(ids, ["f", "g"]);
    }

    #[test]
    fn malformed_text() {
        for text in [
            "fun @main(): i32 {\n%entry:\n  ret %9\n}\n",
            "fun @main(): i32 {\n  ret 0\n}\n",
            "fun @main(): i32 {\n%entry:\n  ret 0\n",
        ] {
            assert!(
                matches!(parse(text), Err(CompileError::IrSyntax)),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn unsupported_constructs() {
        for text in [
            "fun @main(): i32 {\n%entry:\n  %0 = shl 1, 2\n  ret %0\n}\n",
            "global @x = alloc i32, 0\n\nfun @main(): i32 {\n%entry:\n  ret 0\n}\n",
            "fun @main(): i32 {\n%entry:\n  %x = alloc i32\n  ret 0\n}\n",
        ] {
            assert!(
                matches!(parse(text), Err(CompileError::UnsupportedIr(_))),
                "{text:?} should be unsupported"
            );
        }
    }
}
