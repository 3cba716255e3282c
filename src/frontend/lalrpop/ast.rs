/// 解析整数字面量，超出 `i32::MAX` 即报错。`-2147483648` 由文法单独处理
pub fn parse_int_literal(text: &str, radix: u32) -> Result<i32, String> {
    i32::from_str_radix(text, radix)
        .map_err(|_| format!("integer literal `{text}` is out of range"))
}

// CompUnit -> FuncDef
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompUnit {
    pub func_def: FuncDef,
}

// FuncDef -> FuncType Ident '(' ')' Block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDef {
    pub typ: FuncType,
    pub id: String,
    pub block: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuncType {
    Int,
}

// Block -> '{' Stmt '}'
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub stmt: Stmt,
}

// Stmt -> 'return' Exp ';'
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Return(Return),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return {
    pub exp: Exp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exp {
    Number(i32),
    Unary(UnaryOp, Box<Exp>),
    Binary(BinaryOp, Box<Exp>, Box<Exp>),
}

impl Exp {
    pub fn number(val: i32) -> Self {
        Exp::Number(val)
    }

    pub fn unary(op: UnaryOp, expr: Exp) -> Self {
        Exp::Unary(op, Box::new(expr))
    }

    pub fn binary(op: BinaryOp, lhs: Exp, rhs: Exp) -> Self {
        Exp::Binary(op, Box::new(lhs), Box::new(rhs))
    }
}

impl CompUnit {
    /// `int <id>() { return <exp>; }`
    pub fn return_only(id: impl Into<String>, exp: Exp) -> Self {
        CompUnit {
            func_def: FuncDef {
                typ: FuncType::Int,
                id: id.into(),
                block: Block {
                    stmt: Stmt::Return(Return { exp }),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add, //add
    Sub, //substraction
    Mul, //multiplication
    Div, //division
    Mod, //modulus
    Lt,  //less than
    Gt,  //greater than
    Le,  //less than or equal to
    Ge,  //greater than or equal to
    Eq,  //equal to
    Ne,  //not equal to
    And, //logical and
    Or,  //logical or
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Pos, //identity
    Neg, //negation
    Not, //logical not
}
