use super::context::Context;
use super::instruction::BinaryOp;
use crate::utils::storage::{Arena, ArenaPtr, GenericPtr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    // 整数常量
    Integer {
        value: i32,
    },
    // 二元运算，操作数引用产生它的值，因此构成DAG
    Binary {
        op: BinaryOp,
        lhs: Value,
        rhs: Value,
    },
    // 函数返回
    Return {
        value: Option<Value>,
    },
}

#[derive(Debug)]
pub struct ValueData {
    // 值类型的种类
    pub kind: ValueKind,
    // IR文本中的名字，如 `%0`；常量与ret没有名字
    pub name: Option<String>,
}

/// 值的句柄，相等即同一个值
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, Copy, PartialOrd)]
pub struct Value(pub GenericPtr<ValueData>);

impl ArenaPtr for Value {
    type Arena = Context;
    type Data = ValueData;
}

impl Value {
    pub fn new(ctx: &mut Context, kind: ValueKind, name: Option<String>) -> Self {
        ctx.alloc(ValueData { kind, name })
    }

    /// 创建整数常量
    pub fn integer(ctx: &mut Context, value: i32) -> Self {
        Self::new(ctx, ValueKind::Integer { value }, None)
    }

    /// 创建二元运算
    pub fn binary(
        ctx: &mut Context,
        name: impl Into<String>,
        op: BinaryOp,
        lhs: Value,
        rhs: Value,
    ) -> Self {
        Self::new(ctx, ValueKind::Binary { op, lhs, rhs }, Some(name.into()))
    }

    /// 创建返回指令
    pub fn ret(ctx: &mut Context, value: Option<Value>) -> Self {
        Self::new(ctx, ValueKind::Return { value }, None)
    }

    pub fn kind(self, ctx: &Context) -> &ValueKind {
        &self
            .deref(ctx)
            .expect("Failed to deref `values` in struct Context")
            .kind
    }

    pub fn name(self, ctx: &Context) -> Option<&str> {
        self.deref(ctx)
            .expect("Failed to deref `values` in struct Context")
            .name
            .as_deref()
    }

    pub fn is_constant(self, ctx: &Context) -> bool {
        matches!(self.kind(ctx), ValueKind::Integer { .. })
    }

    pub fn get_int_const_value(self, ctx: &Context) -> Option<i32> {
        match self.kind(ctx) {
            ValueKind::Integer { value } => Some(*value),
            _ => None,
        }
    }

    /// 作为操作数时在IR文本中的写法
    pub fn operand_string(self, ctx: &Context) -> String {
        match self.kind(ctx) {
            ValueKind::Integer { value } => value.to_string(),
            _ => self.name(ctx).unwrap_or("%?").to_string(),
        }
    }
}
