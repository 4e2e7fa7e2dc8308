// 捕获型控制台 - 把输出记录到环形缓冲区，供测试检查诊断文本

use crate::trap::collections::RingBuffer;
use crate::trap::DiagnosticConsole;
use spin::Mutex;

/// 记录最近 `N` 个输出字节的控制台
pub struct CaptureConsole<const N: usize> {
    buffer: Mutex<RingBuffer<u8, N>>,
}

impl<const N: usize> CaptureConsole<N> {
    pub const fn new() -> Self {
        Self {
            buffer: Mutex::new(RingBuffer::new()),
        }
    }

    /// 清空已捕获的输出
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    /// 已捕获的字节数
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    /// 检查捕获的输出中是否包含 `needle`
    pub fn contains(&self, needle: &str) -> bool {
        let mut bytes = [0u8; N];
        let len = self.buffer.lock().copy_to(&mut bytes);
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return true;
        }
        bytes[..len].windows(needle.len()).any(|window| window == needle)
    }

    /// 以字符串形式取出捕获内容（仅测试）
    #[cfg(test)]
    pub fn text(&self) -> std::string::String {
        let bytes: std::vec::Vec<u8> = self.buffer.lock().iter().collect();
        std::string::String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl<const N: usize> Default for CaptureConsole<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DiagnosticConsole for CaptureConsole<N> {
    fn is_available(&self) -> bool {
        true
    }

    fn putc(&self, byte: u8) {
        self.buffer.lock().push(byte);
    }
}
