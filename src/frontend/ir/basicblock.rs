use super::context::{Context, RawSlice};
use super::function::Function;
use super::value::Value;
use crate::utils::storage::{Arena, ArenaPtr, GenericPtr};

pub struct BasicBlockData {
    name: String,
    // 基本块内按顺序存放的指令
    insts: Vec<Value>,
}

#[derive(Debug, Clone, Copy, Hash, PartialOrd, Ord, PartialEq, Eq)]
pub struct BasicBlock(pub GenericPtr<BasicBlockData>);

impl ArenaPtr for BasicBlock {
    type Arena = Context;
    type Data = BasicBlockData;
}

impl BasicBlock {
    /// 创建基本块并追加到函数末尾
    pub fn new(ctx: &mut Context, function: Function, name: impl Into<String>) -> Self {
        let name = name.into();
        let bbk: BasicBlock = ctx.alloc(BasicBlockData {
            name,
            insts: Vec::new(),
        });
        function.push_basicblock(ctx, bbk);
        bbk
    }

    /// 基本块名，如 `%entry`
    pub fn get_name(self, ctx: &Context) -> &str {
        &self
            .deref(ctx)
            .expect("Failed to deref `basicblocks` in struct Context")
            .name
    }

    /// 追加一条指令
    pub fn push_back(self, ctx: &mut Context, inst: Value) {
        self.deref_mut(ctx)
            .expect("Failed to deref `basicblocks` in struct Context")
            .insts
            .push(inst);
    }

    pub fn get_insts(self, ctx: &Context) -> &[Value] {
        &self
            .deref(ctx)
            .expect("Failed to deref `basicblocks` in struct Context")
            .insts
    }

    pub fn insts(self, ctx: &Context) -> RawSlice<'_> {
        RawSlice::Value(self.get_insts(ctx))
    }
}
