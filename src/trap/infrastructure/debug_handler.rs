// rv32_rte/src/trap/infrastructure/debug_handler.rs

//! # Debug Handler
//!
//! The default second-level handler for every slot. Prints one diagnostic
//! line, shuts off interrupt sources nobody handles, and halts the hart on
//! faults that cannot be resumed.

use super::di::container::{TrapRuntime, MSTATUS_MPP_MACHINE};
use super::di::traits::{Csr, DiagnosticConsole, Hart};
use crate::trap::ds::{TrapCause, TrapClass};
use core::fmt::{self, Write};

const INTRO: &str = "<RTE> ";
const OUTRO: &str = " </RTE>\n";
const FATAL: &str = " !!FATAL EXCEPTION!! Halting CPU </RTE>\n";

/// `core::fmt` adapter over a diagnostic console.
pub struct ConsoleWriter<'a>(pub &'a dyn DiagnosticConsole);

impl Write for ConsoleWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.puts(s);
        Ok(())
    }
}

impl<H: Hart> TrapRuntime<'_, H> {
    /// Reports the current trap on `console` and applies the default policy
    /// for its class. Returns without doing anything if the console is missing
    /// or unavailable. Does not return for fatal exceptions.
    pub fn debug_report(&self, console: Option<&dyn DiagnosticConsole>) {
        let Some(console) = console.filter(|c| c.is_available()) else {
            return;
        };
        let hart = self.hart();
        let mut out = ConsoleWriter(console);

        let cause = TrapCause::from_bits(hart.read_csr(Csr::Cause));
        let privilege = if hart.read_csr(Csr::Status) & MSTATUS_MPP_MACHINE != 0 { 'M' } else { 'U' };

        let epc = hart.read_csr(Csr::ResumeAddress);
        let tinst = if self.config().has_mtinst || cause.class() == TrapClass::RecoverableException {
            self.trapped_instruction(epc)
        } else {
            0
        };

        console.puts(INTRO);
        let _ = write!(
            out,
            "[cpu{}|{}] {} @ PC={:#010X}, MTINST={:#010X}, MTVAL={:#010X}",
            hart.read_csr(Csr::HartId),
            privilege,
            cause.name(),
            epc,
            tinst,
            hart.read_csr(Csr::TrapValue),
        );

        match cause.class() {
            TrapClass::UnhandledInterrupt => {
                console.puts(" Disabling IRQ source");
                hart.clear_csr_bits(Csr::InterruptEnable, 1 << cause.code().index());
            }
            TrapClass::FatalException => {
                console.puts(FATAL);
                hart.write_csr(Csr::InterruptEnable, 0);
                hart.halt();
            }
            TrapClass::RecoverableException => {}
        }

        console.puts(OUTRO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RteConfig;
    use crate::trap::ds::TrapCode;
    use crate::trap::infrastructure::mock::{MockHart, HALT_MARKER};
    use crate::trap::infrastructure::vector_table::VectorTable;
    use crate::util::capture::CaptureConsole;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    struct Offline;

    impl DiagnosticConsole for Offline {
        fn is_available(&self) -> bool {
            false
        }
        fn putc(&self, _byte: u8) {
            panic!("offline console must not be written");
        }
    }

    fn runtime(table: &VectorTable, hart_id: u32) -> TrapRuntime<'_, MockHart> {
        let config = RteConfig { has_mtinst: true, ..RteConfig::DEFAULT };
        let rt = TrapRuntime::new(MockHart::new(hart_id), table, config);
        rt.hart().set(Csr::Status, MSTATUS_MPP_MACHINE);
        rt
    }

    #[test]
    fn illegal_instruction_line() {
        let table = VectorTable::new();
        let rt = runtime(&table, 0);
        let console = CaptureConsole::<256>::new();
        rt.hart().raise(TrapCode::ILLEGAL_INSTRUCTION.bits(), 0x8000_0124);
        rt.hart().set(Csr::TrappedInstruction, 0x0000_0000);
        rt.hart().set(Csr::TrapValue, 0xc000_1073);

        rt.debug_report(Some(&console));

        assert_eq!(
            console.text().as_str(),
            "<RTE> [cpu0|M] Illegal instruction @ PC=0x80000124, MTINST=0x00000000, MTVAL=0xC0001073 </RTE>\n"
        );
    }

    #[test]
    fn user_mode_and_second_hart_are_reported() {
        let table = VectorTable::new();
        let rt = runtime(&table, 1);
        let console = CaptureConsole::<256>::new();
        rt.hart().set(Csr::Status, 0);
        rt.hart().raise(TrapCode::USER_ENV_CALL.bits(), 0x400);

        rt.debug_report(Some(&console));

        let text = console.text();
        assert!(text.starts_with("<RTE> [cpu1|U] Environment call from U-mode @ PC=0x00000400"));
        assert!(text.ends_with(" </RTE>\n"));
    }

    #[test]
    fn unhandled_interrupt_clears_only_its_enable_bit() {
        let table = VectorTable::new();
        let rt = runtime(&table, 0);
        let console = CaptureConsole::<256>::new();
        rt.hart().set(Csr::InterruptEnable, 0xffff_ffff);
        rt.hart().raise(TrapCode::fast_irq(4).bits(), 0x500);

        rt.debug_report(Some(&console));

        assert_eq!(rt.hart().get(Csr::InterruptEnable), !(1 << 20));
        assert!(console.contains("Fast IRQ 0x4"));
        assert!(console.contains(" Disabling IRQ source </RTE>\n"));
    }

    #[test]
    fn fatal_exceptions_disable_interrupts_and_halt() {
        for code in [TrapCode::INSTRUCTION_ACCESS_FAULT, TrapCode::INSTRUCTION_MISALIGNED, TrapCode::DOUBLE_TRAP] {
            let table = VectorTable::new();
            let rt = runtime(&table, 0);
            let console = CaptureConsole::<256>::new();
            rt.hart().set(Csr::InterruptEnable, 0x0000_0888);
            rt.hart().raise(code.bits(), 0x600);

            let result = catch_unwind(AssertUnwindSafe(|| rt.debug_report(Some(&console))));

            let payload = result.expect_err("fatal exception must not return");
            assert_eq!(payload.downcast_ref::<&str>(), Some(&HALT_MARKER));
            assert_eq!(rt.hart().get(Csr::InterruptEnable), 0);
            assert!(console.text().ends_with(" !!FATAL EXCEPTION!! Halting CPU </RTE>\n"));
        }
    }

    #[test]
    fn without_mtinst_the_faulting_word_is_printed() {
        let table = VectorTable::new();
        let config = RteConfig { has_mtinst: false, ..RteConfig::DEFAULT };
        let rt = TrapRuntime::new(MockHart::new(0), &table, config);
        let console = CaptureConsole::<256>::new();
        rt.hart().set(Csr::Status, MSTATUS_MPP_MACHINE);
        unsafe { rt.hart().store_word(0x900, 0x0010_0073) };
        rt.hart().raise(TrapCode::BREAKPOINT.bits(), 0x900);

        rt.debug_report(Some(&console));

        assert!(console.contains("Environment breakpoint @ PC=0x00000900, MTINST=0x00100073,"));
    }

    #[test]
    fn unknown_cause_prints_raw_value() {
        let table = VectorTable::new();
        let rt = runtime(&table, 0);
        let console = CaptureConsole::<256>::new();
        rt.hart().raise(0x0000_0018, 0x700);

        rt.debug_report(Some(&console));

        assert!(console.contains("Unknown trap cause 0x00000018 @ PC=0x00000700"));
    }

    #[test]
    fn missing_console_is_a_silent_no_op() {
        let table = VectorTable::new();
        let rt = runtime(&table, 0);
        rt.hart().set(Csr::InterruptEnable, 1 << 7);
        rt.hart().raise(TrapCode::MACHINE_TIMER.bits(), 0x800);

        rt.debug_report(None);
        rt.debug_report(Some(&Offline));

        assert_eq!(rt.hart().get(Csr::InterruptEnable), 1 << 7);
    }
}
