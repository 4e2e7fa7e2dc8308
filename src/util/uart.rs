// 16550 兼容 MMIO 串口后端

use crate::trap::DiagnosticConsole;
use core::sync::atomic::{AtomicBool, Ordering};
use uart_16550::MmioSerialPort;

/// 基于 `uart_16550` 的诊断控制台
///
/// 不加锁：每次输出只做一次寄存器轮询和一次写入，可以在陷阱处理程序中直接使用。
pub struct Uart16550Console {
    base: usize,
    ready: AtomicBool,
}

impl Uart16550Console {
    /// 创建串口控制台，调用 `init` 之前不可用
    ///
    /// # Safety
    /// `base` 必须是一个 16550 兼容串口的寄存器基地址
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            base,
            ready: AtomicBool::new(false),
        }
    }

    fn port(&self) -> MmioSerialPort {
        // Safety: `new` 的调用者保证了基地址有效
        unsafe { MmioSerialPort::new(self.base) }
    }

    /// 初始化串口硬件并标记为可用
    pub fn init(&self) {
        self.port().init();
        self.ready.store(true, Ordering::Release);
    }
}

impl DiagnosticConsole for Uart16550Console {
    fn is_available(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn putc(&self, byte: u8) {
        if self.is_available() {
            self.port().send(byte);
        }
    }
}
