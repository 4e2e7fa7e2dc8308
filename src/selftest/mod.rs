// 目标板自检模块入口
// 这些测试需要真实的陷阱硬件，只在 riscv32 目标上编译

pub mod console_test;

use crate::{println, info_print, warn_print, error_print};
use spin::Once;

/// 自检配置
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfTestConfig {
    /// CLINT 基地址；为 `None` 时跳过定时器测试
    pub clint_base: Option<usize>,
}

static CONFIG: Once<SelfTestConfig> = Once::new();

/// 当前自检配置（未设置时使用默认值）
pub(crate) fn config() -> SelfTestConfig {
    CONFIG.get().copied().unwrap_or_default()
}

/// 测试结果枚举
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

/// 测试用例结构体
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
    pub description: &'static str,
}

/// 测试运行器
#[derive(Default)]
pub struct TestRunner {
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
}

impl TestRunner {
    /// 创建新的测试运行器
    pub fn new() -> Self {
        Self::default()
    }

    /// 运行单个测试用例
    pub fn run_test(&mut self, test: &TestCase) {
        self.total += 1;

        println!("Running test: {} - {}", test.name, test.description);

        match (test.func)() {
            TestResult::Pass => {
                self.passed += 1;
                info_print!("  [PASS] {}", test.name);
            }
            TestResult::Fail => {
                self.failed += 1;
                error_print!("  [FAIL] {}", test.name);
            }
            TestResult::Skip => {
                self.skipped += 1;
                warn_print!("  [SKIP] {}", test.name);
            }
        }
    }

    /// 运行测试套件
    pub fn run_suite(&mut self, suite_name: &str, tests: &[TestCase]) {
        println!("=== {} Test Suite ===", suite_name);

        for test in tests {
            self.run_test(test);
        }

        println!("=== {} Test Suite Complete ===", suite_name);
    }

    /// 打印测试总结
    pub fn print_summary(&self) {
        println!("=== Test Summary ===");
        println!("Total tests: {}", self.total);
        info_print!("Passed: {}", self.passed);
        if self.failed > 0 {
            error_print!("Failed: {}", self.failed);
        } else {
            info_print!("Failed: {}", self.failed);
        }
        if self.skipped > 0 {
            warn_print!("Skipped: {}", self.skipped);
        } else {
            info_print!("Skipped: {}", self.skipped);
        }
        println!("==================");
    }

    /// 没有失败且至少运行了一个测试
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.total > 0
    }
}

/// 运行所有自检，返回是否全部通过
///
/// 必须在主 hart 上、`trap::setup` 之后调用。
pub fn run_all_tests(config: SelfTestConfig) -> bool {
    CONFIG.call_once(|| config);
    let mut runner = TestRunner::new();

    // 控制台测试
    console_test::run_console_tests(&mut runner);

    // 陷阱运行时测试
    rte_test::run_rte_tests(&mut runner);

    runner.print_summary();

    if runner.all_passed() {
        info_print!("All test suites completed successfully!");
    } else {
        warn_print!("Some tests failed");
    }
    runner.all_passed()
}
