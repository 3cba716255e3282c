pub mod basicblock;
pub mod context;
pub mod function;
pub mod instruction;
pub mod reader;
pub mod value;
