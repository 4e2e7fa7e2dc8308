// 控制台功能测试模块

use super::{TestCase, TestResult, TestRunner};
use crate::trap::{ConsoleWriter, DiagnosticConsole};
use crate::util::CaptureConsole;
use crate::{console, println, debug_print};
use core::fmt::Write;

static CAPTURE: CaptureConsole<128> = CaptureConsole::new();

/// 测试后端是否已注册
fn test_backend_registered() -> TestResult {
    if console::backend().is_some() {
        TestResult::Pass
    } else {
        TestResult::Skip
    }
}

/// 测试字符和字符串输出
fn test_string_output() -> TestResult {
    console::print_char('A');
    console::print_char('\n');
    console::print_str("Hello from string output test\n");
    TestResult::Pass
}

/// 测试十六进制输出
fn test_hex_output() -> TestResult {
    console::print_str("Hex numbers: ");
    console::print_hex(0);
    console::print_str(", ");
    console::print_hex(0xDEADBEEF);
    console::print_str("\n");
    TestResult::Pass
}

/// 测试格式化输出宏
fn test_format_macros() -> TestResult {
    use crate::{info_print, warn_print, error_print};

    println!("Numbers: {} {:#x}", 42, 0xFF);
    info_print!("This is an info message from test");
    warn_print!("This is a warning message from test");
    error_print!("This is an error message from test");
    debug_print!("Debug message with line info");
    TestResult::Pass
}

/// 测试格式化写入捕获控制台
fn test_console_writer() -> TestResult {
    CAPTURE.clear();
    let _ = write!(ConsoleWriter(&CAPTURE), "PC={:#010X}", 0x8000_0000u32);
    CAPTURE.putc(b'!');
    if CAPTURE.contains("PC=0x80000000!") {
        TestResult::Pass
    } else {
        TestResult::Fail
    }
}

/// 控制台测试用例列表
const CONSOLE_TESTS: &[TestCase] = &[
    TestCase {
        name: "backend_registered",
        func: test_backend_registered,
        description: "Test that a diagnostic console is registered",
    },
    TestCase {
        name: "string_output",
        func: test_string_output,
        description: "Test character and string output",
    },
    TestCase {
        name: "hex_output",
        func: test_hex_output,
        description: "Test 8-digit hexadecimal output",
    },
    TestCase {
        name: "format_macros",
        func: test_format_macros,
        description: "Test formatting and log level macros",
    },
    TestCase {
        name: "console_writer",
        func: test_console_writer,
        description: "Test fmt::Write adapter over a capture console",
    },
];

/// 运行所有控制台测试
pub fn run_console_tests(runner: &mut TestRunner) {
    runner.run_suite("Console", CONSOLE_TESTS);
}
