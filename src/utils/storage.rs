use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Arena的指针特性
pub trait ArenaPtr: Copy + Eq + Hash {
    type Arena: Arena<Self>;
    /// 内部数据
    type Data;

    /// 通过Arena解引用
    /// # 返回值
    /// - `Some(&Self::Data)`: 如果指针有效，则返回指向数据的引用。
    /// - `None`: 如果指针无效，则返回None。
    fn deref(self, arena: &Self::Arena) -> Option<&Self::Data> {
        arena.deref(self)
    }

    /// 通过Arena解引用，返回可变引用
    fn deref_mut(self, arena: &mut Self::Arena) -> Option<&mut Self::Data> {
        arena.deref_mut(self)
    }
}

/// Arena的存储数据和分配指针特性
/// # 参数类型
/// - `Ptr`: Arena支持的指针类型
///
/// IR在后端遍历期间是只读的，所以这里不提供释放操作，指针在整个Arena生命周期内保持有效。
pub trait Arena<Ptr: ArenaPtr<Arena = Self>> {
    /// 为数据分配指针并存储到Arena中
    /// # 参数列表
    /// - `f`: 接收分配的指针返回数据类型的函数
    ///
    /// # 返回值
    /// 存储数据的指针
    fn alloc_with<F>(&mut self, f: F) -> Ptr
    where
        F: FnOnce(Ptr) -> Ptr::Data;

    /// 将数据存储到arena中并返回指针
    fn alloc(&mut self, data: Ptr::Data) -> Ptr {
        self.alloc_with(|_| data)
    }

    /// 解引用一个指针
    fn deref(&self, ptr: Ptr) -> Option<&Ptr::Data>;

    /// 解引用一个指针，返回数据的可变引用
    fn deref_mut(&mut self, ptr: Ptr) -> Option<&mut Ptr::Data>;
}

/// Arena的泛型指针，指针的相等性即数据的身份
/// # 参数类型
/// - `Data`: 与存储的数据的类型一致
pub struct GenericPtr<Data> {
    /// 指针的原始索引
    index: usize,
    _phantom: PhantomData<Data>,
}

impl<Data> GenericPtr<Data> {
    fn from_index(index: usize) -> Self {
        Self {
            index,
            _phantom: PhantomData,
        }
    }
}

impl<Data> Clone for GenericPtr<Data> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Data> Copy for GenericPtr<Data> {}

impl<Data> Hash for GenericPtr<Data> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state)
    }
}

impl<Data> PartialEq for GenericPtr<Data> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<Data> Eq for GenericPtr<Data> {}

impl<Data> PartialOrd for GenericPtr<Data> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Data> Ord for GenericPtr<Data> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<Data> fmt::Debug for GenericPtr<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "*{}", self.index)
    }
}

impl<Data> fmt::Display for GenericPtr<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "*{}", self.index)
    }
}

/// 一个只增不减的泛型Arena
/// # 参数类型
/// - `Data`: 存储数据的类型
pub struct GenericArena<Data> {
    /// Arena中的所有条目，下标即指针
    entries: Vec<Data>,
}

impl<Data> Default for GenericArena<Data> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<Data> GenericArena<Data> {
    /// 已分配的条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<Data> ArenaPtr for GenericPtr<Data> {
    type Arena = GenericArena<Data>;
    type Data = Data;
}

impl<Data> Arena<GenericPtr<Data>> for GenericArena<Data> {
    fn alloc_with<F>(&mut self, f: F) -> GenericPtr<Data>
    where
        F: FnOnce(GenericPtr<Data>) -> Data,
    {
        let ptr = GenericPtr::from_index(self.entries.len());
        self.entries.push(f(ptr));
        ptr
    }

    fn deref(&self, ptr: GenericPtr<Data>) -> Option<&Data> {
        self.entries.get(ptr.index)
    }

    fn deref_mut(&mut self, ptr: GenericPtr<Data>) -> Option<&mut Data> {
        self.entries.get_mut(ptr.index)
    }
}
