use std::env;

fn main() {
    println!("cargo:rerun-if-changed=firmware/linker.ld");

    // 仅在构建演示固件时使用链接脚本
    let firmware = env::var_os("CARGO_FEATURE_FIRMWARE").is_some();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if firmware && target_arch == "riscv32" {
        let dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
        println!("cargo:rustc-link-arg-bins=-T{}/firmware/linker.ld", dir);
    }
}
