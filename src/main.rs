use std::process::ExitCode;

use log::{error, info};
use sysyc::{
    config::{self, Mode, Options},
    error::CompileResult,
    frontend,
};

fn run(opts: &Options) -> CompileResult<()> {
    let src = std::fs::read_to_string(&opts.source)?; // 读取源文件内容

    let ast = frontend::parse(&src)?;
    if let Some(ast_file) = &opts.ast {
        std::fs::write(ast_file, format!("{:#?}", ast))?;
    }

    let ir = frontend::irgen(&ast);
    let out = match opts.mode {
        Mode::Koopa => ir,
        Mode::Riscv => sysyc::ir_to_riscv(&ir)?,
    };
    std::fs::write(&opts.output, out)?;
    info!("wrote {:?} output to `{}`", opts.mode, opts.output);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    // 参数解析与检查
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match config::parse_arguments(&args) {
        Ok(Some(opts)) => opts,
        Ok(None) => {
            println!("{}", config::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n{}", config::USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("compiling `{}` failed", opts.source);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
