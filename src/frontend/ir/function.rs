use super::basicblock::BasicBlock;
use super::context::{Context, RawSlice};
use crate::utils::storage::{Arena, ArenaPtr, GenericPtr};

pub struct FunctionData {
    id: String,
    bbs: Vec<BasicBlock>,
}

#[derive(Debug, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Function(pub GenericPtr<FunctionData>);

impl ArenaPtr for Function {
    type Data = FunctionData;
    type Arena = Context;
}

impl Function {
    /// 创建一个新的函数并登记到程序中，返回类型恒为i32
    pub fn new(ctx: &mut Context, id: impl Into<String>) -> Self {
        let id = id.into();
        let func: Function = ctx.alloc(FunctionData {
            id,
            bbs: Vec::new(),
        });
        ctx.push_function(func);
        func
    }

    /// 获取函数名(不含 `@`)
    pub fn get_id(self, ctx: &Context) -> &str {
        &self
            .deref(ctx)
            .expect("Failed to deref `functions` in struct Context")
            .id
    }

    pub(super) fn push_basicblock(self, ctx: &mut Context, bbk: BasicBlock) {
        self.deref_mut(ctx)
            .expect("Failed to deref `functions` in struct Context")
            .bbs
            .push(bbk);
    }

    /// 按顺序获取全部基本块
    pub fn get_basicblocks(self, ctx: &Context) -> &[BasicBlock] {
        &self
            .deref(ctx)
            .expect("Failed to deref `functions` in struct Context")
            .bbs
    }

    pub fn bbs(self, ctx: &Context) -> RawSlice<'_> {
        RawSlice::BasicBlock(self.get_basicblocks(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ir::value::Value;

    #[test]
    fn blocks_keep_insertion_order() {
        let mut ctx = Context::new();
        let func = Function::new(&mut ctx, "main");
        let entry = BasicBlock::new(&mut ctx, func, "%entry");
        let exit = BasicBlock::new(&mut ctx, func, "%exit");
        let ret = Value::ret(&mut ctx, None);
        exit.push_back(&mut ctx, ret);

        assert_eq!(func.get_id(&ctx), "main");
        assert_eq!(func.get_basicblocks(&ctx), &[entry, exit]);
        assert_eq!(exit.get_insts(&ctx), &[ret]);
        assert!(entry.get_insts(&ctx).is_empty());
        assert_eq!(ctx.get_functions(), &[func]);
    }
}
