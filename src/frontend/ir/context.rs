use super::basicblock::{BasicBlock, BasicBlockData};
use super::function::{Function, FunctionData};
use super::value::{Value, ValueData};
use crate::utils::storage::{Arena, GenericArena, GenericPtr};

/// 整个程序：全局值与按顺序排列的函数，同时持有所有IR对象的Arena
#[derive(Default)]
pub struct Context {
    pub values: GenericArena<ValueData>,
    pub basicblocks: GenericArena<BasicBlockData>,
    pub functions: GenericArena<FunctionData>,
    // 程序中的全局值，目前的文法不会产生
    global_values: Vec<Value>,
    // 函数在程序中的顺序
    funcs: Vec<Function>,
}

/// 同构对象的切片，标明元素种类
///
/// 遍历时按 `kind` 把元素交还给对应的处理函数，恢复静态类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSlice<'a> {
    Function(&'a [Function]),
    BasicBlock(&'a [BasicBlock]),
    Value(&'a [Value]),
}

impl Context {
    /// 创建一个空程序
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn push_function(&mut self, func: Function) {
        self.funcs.push(func);
    }

    /// 登记一个全局值
    pub fn add_global_value(&mut self, value: Value) {
        self.global_values.push(value);
    }

    /// 获取所有函数
    pub fn get_functions(&self) -> &[Function] {
        &self.funcs
    }

    pub fn funcs(&self) -> RawSlice<'_> {
        RawSlice::Function(&self.funcs)
    }

    pub fn values(&self) -> RawSlice<'_> {
        RawSlice::Value(&self.global_values)
    }
}

impl Arena<Value> for Context {
    /// 申请一个新的值，并用f初始化该值，f是一个函数闭包（闭包要求传入一个Value作为参数，并返回一个ValueData）
    fn alloc_with<F>(&mut self, f: F) -> Value
    where
        F: FnOnce(Value) -> ValueData,
    {
        Value(
            self.values
                .alloc_with(|ptr: GenericPtr<ValueData>| f(Value(ptr))),
        )
    }

    fn deref(&self, ptr: Value) -> Option<&ValueData> {
        self.values.deref(ptr.0)
    }

    fn deref_mut(&mut self, ptr: Value) -> Option<&mut ValueData> {
        self.values.deref_mut(ptr.0)
    }
}

impl Arena<BasicBlock> for Context {
    fn alloc_with<F>(&mut self, f: F) -> BasicBlock
    where
        F: FnOnce(BasicBlock) -> BasicBlockData,
    {
        BasicBlock(
            self.basicblocks
                .alloc_with(|ptr: GenericPtr<BasicBlockData>| f(BasicBlock(ptr))),
        )
    }

    fn deref(&self, ptr: BasicBlock) -> Option<&BasicBlockData> {
        self.basicblocks.deref(ptr.0)
    }

    fn deref_mut(&mut self, ptr: BasicBlock) -> Option<&mut BasicBlockData> {
        self.basicblocks.deref_mut(ptr.0)
    }
}

impl Arena<Function> for Context {
    fn alloc_with<F>(&mut self, f: F) -> Function
    where
        F: FnOnce(Function) -> FunctionData,
    {
        Function(
            self.functions
                .alloc_with(|ptr: GenericPtr<FunctionData>| f(Function(ptr))),
        )
    }

    fn deref(&self, ptr: Function) -> Option<&FunctionData> {
        self.functions.deref(ptr.0)
    }

    fn deref_mut(&mut self, ptr: Function) -> Option<&mut FunctionData> {
        self.functions.deref_mut(ptr.0)
    }
}
