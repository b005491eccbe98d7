//! 命令行辅助模块

mod printer;

pub use printer::Printer;
