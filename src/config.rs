use crate::error::{CompileError, CompileResult};

pub const USAGE: &str = "\
Usage:
    sysyc -koopa <source> -o <output>
    sysyc -riscv <source> -o <output>
Options:
    -koopa       : Output the IR
    -riscv       : Output the RISC-V assembly
    -o <file>    : Output file
    -ast <file>  : Also dump the AST to a file
    -h           : Print this message";

/// 输出的目标形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Koopa,
    Riscv,
}

/// 一次编译的命令行选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub source: String,
    pub output: String,
    pub ast: Option<String>,
}

/// 解析命令行参数（不含程序名），给出 `-h` 时返回 `None`
pub fn parse_arguments(args: &[String]) -> CompileResult<Option<Options>> {
    let mut mode = None;
    let mut source = None;
    let mut output = None;
    let mut ast = None;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" => return Ok(None),
            "-koopa" | "-riscv" => {
                if mode.is_some() {
                    return Err(usage("only one of `-koopa` and `-riscv` may be given"));
                }
                mode = Some(if arg == "-koopa" { Mode::Koopa } else { Mode::Riscv });
            }
            "-o" | "-ast" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| usage(format!("`{arg}` needs a file name")))?
                    .clone();
                if arg == "-o" {
                    output = Some(value);
                } else {
                    ast = Some(value);
                }
                i += 1;
            }
            _ if arg.starts_with('-') => return Err(usage(format!("unknown option `{arg}`"))),
            _ => {
                if source.replace(arg.to_string()).is_some() {
                    return Err(usage("more than one source file"));
                }
            }
        }
        i += 1;
    }

    Ok(Some(Options {
        mode: mode.ok_or_else(|| usage("one of `-koopa` and `-riscv` is required"))?,
        source: source.ok_or_else(|| usage("source file not specified"))?,
        output: output.ok_or_else(|| usage("output file not specified"))?,
        ast,
    }))
}

fn usage(message: impl Into<String>) -> CompileError {
    CompileError::Usage(message.into())
}
