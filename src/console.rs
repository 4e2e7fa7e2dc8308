// 控制台输出模块
// 所有输出都写到已注册的诊断控制台；未注册时丢弃

use core::fmt;
use spin::Once;
use crate::trap::DiagnosticConsole;

static BACKEND: Once<&'static dyn DiagnosticConsole> = Once::new();

/// 注册全局诊断控制台（只有第一次注册生效）
///
/// 调试处理程序和下面的输出宏都使用这个控制台。
pub fn register(console: &'static dyn DiagnosticConsole) {
    BACKEND.call_once(|| console);
}

/// 当前可用的控制台
pub fn backend() -> Option<&'static dyn DiagnosticConsole> {
    BACKEND.get().copied().filter(|console| console.is_available())
}

/// 格式化输出函数
pub fn print(args: fmt::Arguments) {
    use core::fmt::Write;
    let _ = Stdout.write_fmt(args);
}

/// 直接输出字符串
pub fn print_str(s: &str) {
    if let Some(console) = backend() {
        console.puts(s);
    }
}

/// 输出单个字符
pub fn print_char(ch: char) {
    let mut buf = [0u8; 4];
    print_str(ch.encode_utf8(&mut buf));
}

/// 输出十六进制数字（8 位，带 0x 前缀）
pub fn print_hex(num: u32) {
    print(format_args!("{:#010X}", num));
}

/// 标准输出结构体，实现Write trait以支持格式化输出
struct Stdout;

impl core::fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        print_str(s);
        Ok(())
    }
}

/// print宏 - 格式化输出
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::console::print(format_args!($($arg)*))
    };
}

/// println宏 - 格式化输出并换行
#[macro_export]
macro_rules! println {
    () => {
        $crate::print!("\n")
    };
    ($($arg:tt)*) => {
        $crate::print!("{}\n", format_args!($($arg)*))
    };
}

/// 调试输出宏 - 带有文件和行号信息
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {{
        $crate::print!("[{}:{}] ", file!(), line!());
        $crate::println!($($arg)*);
    }};
}

/// 错误输出宏 - 红色高亮显示
#[macro_export]
macro_rules! error_print {
    ($($arg:tt)*) => {{
        $crate::print!("\x1b[31m[ERROR] ");
        $crate::print!($($arg)*);
        $crate::print!("\x1b[0m\n");
    }};
}

/// 警告输出宏 - 黄色高亮显示
#[macro_export]
macro_rules! warn_print {
    ($($arg:tt)*) => {{
        $crate::print!("\x1b[33m[WARN] ");
        $crate::print!($($arg)*);
        $crate::print!("\x1b[0m\n");
    }};
}

/// 信息输出宏 - 绿色高亮显示
#[macro_export]
macro_rules! info_print {
    ($($arg:tt)*) => {{
        $crate::print!("\x1b[32m[INFO] ");
        $crate::print!($($arg)*);
        $crate::print!("\x1b[0m\n");
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::CaptureConsole;

    static CONSOLE: CaptureConsole<256> = CaptureConsole::new();

    #[test]
    fn macros_write_through_the_registered_backend() {
        register(&CONSOLE);
        crate::info_print!("hart {} ready", 0);
        print_hex(0xbeef);
        assert!(CONSOLE.contains("\x1b[32m[INFO] hart 0 ready\x1b[0m\n"));
        assert!(CONSOLE.contains("0x0000BEEF"));
    }
}
