// 演示固件：QEMU virt 风格的双 hart 板子，直接在 M 模式下运行（-bios none）

#![no_std]
#![no_main]

use core::arch::{asm, global_asm};
use core::panic::PanicInfo;
use core::sync::atomic::{AtomicU32, Ordering};

use rv32_rte::selftest::{self, SelfTestConfig};
use rv32_rte::trap::{self, TrapCode};
use rv32_rte::util::Uart16550Console;
use rv32_rte::{console, error_print, info_print, warn_print};

// 每个 hart 的启动栈大小 (16KB)
const STACK_SIZE: usize = 4096 * 4;
// 参与演示的 hart 数量，其余 hart 直接停住
const HARTS: usize = 2;

const UART_BASE: usize = 0x1000_0000;
const CLINT_BASE: usize = 0x0200_0000;

// 主 hart 放行从 hart 时写入的值（避免 BSS 清零前的旧值被误读）
const RELEASE_MAGIC: u32 = 0x5254_4531;

#[repr(C, align(16))]
struct BootStacks([[u8; STACK_SIZE]; HARTS]);

// 用于存放栈的内存区域，不在 BSS 清零范围内
#[link_section = ".bss.stack"]
static mut BOOT_STACKS: BootStacks = BootStacks([[0; STACK_SIZE]; HARTS]);

static UART: Uart16550Console = unsafe { Uart16550Console::new(UART_BASE) };

static SECONDARY_RELEASE: AtomicU32 = AtomicU32::new(0);
static SECONDARY_DONE: AtomicU32 = AtomicU32::new(0);

// 程序入口点：按 mhartid 选择栈，然后跳到 rust_main(hartid)
global_asm!(
    ".section .text.entry",
    ".globl _start",
    "_start:",
    "    csrr  a0, mhartid",
    "    li    t0, {harts}",
    "    bgeu  a0, t0, 2f",
    "    la    sp, {stacks}",
    "    li    t0, {size}",
    "    addi  t1, a0, 1",
    "1:  add   sp, sp, t0",
    "    addi  t1, t1, -1",
    "    bnez  t1, 1b",
    "    call  {main}",
    "2:  wfi",
    "    j     2b",
    harts = const HARTS,
    stacks = sym BOOT_STACKS,
    size = const STACK_SIZE,
    main = sym rust_main,
);

/// Panic处理器 - 当发生panic时调用
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    error_print!("Firmware panic: {}", info);
    park()
}

/// 清除BSS段
unsafe fn clear_bss() {
    extern "C" {
        fn sbss();
        fn ebss();
    }

    let sbss_addr = sbss as usize;
    let ebss_addr = ebss as usize;

    for addr in sbss_addr..ebss_addr {
        core::ptr::write_volatile(addr as *mut u8, 0);
    }
}

/// 等待中断，永不返回
fn park() -> ! {
    loop {
        unsafe { asm!("wfi") };
    }
}

/// Rust主函数 - 汇编入口跳转到这里
extern "C" fn rust_main(hartid: usize) -> ! {
    if hartid == 0 {
        primary_main()
    } else {
        secondary_main(hartid)
    }
}

fn primary_main() -> ! {
    unsafe { clear_bss() };

    UART.init();
    console::register(&UART);
    info_print!("rv32_rte demo starting on hart 0");

    trap::setup();

    let passed = selftest::run_all_tests(SelfTestConfig {
        clint_base: Some(CLINT_BASE),
    });

    SECONDARY_RELEASE.store(RELEASE_MAGIC, Ordering::Release);
    while SECONDARY_DONE.load(Ordering::Acquire) != RELEASE_MAGIC {
        core::hint::spin_loop();
    }

    if passed {
        info_print!("Demo finished");
    } else {
        warn_print!("Demo finished with failures");
    }
    park()
}

fn secondary_main(hartid: usize) -> ! {
    while SECONDARY_RELEASE.load(Ordering::Acquire) != RELEASE_MAGIC {
        core::hint::spin_loop();
    }

    trap::setup();
    info_print!("hart {} online", hartid);

    // 表由主 hart 填好，这里的断点由默认调试处理程序报告
    unsafe { asm!("ebreak") };
    if trap::handler(TrapCode::BREAKPOINT).is_none() {
        error_print!("hart {} sees an empty vector table", hartid);
    }

    SECONDARY_DONE.store(RELEASE_MAGIC, Ordering::Release);
    park()
}
