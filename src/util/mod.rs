// 诊断输出后端

pub mod capture;
pub mod uart;

pub use self::capture::CaptureConsole;
pub use self::uart::Uart16550Console;
