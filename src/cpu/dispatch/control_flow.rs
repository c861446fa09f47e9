//! Control-flow family: JMP, JSR/RTS, RTI, and BRK.
//!
//! Stack conventions on the 6502 are off by one in both directions: JSR
//! pushes the address of its *last operand byte* (RTS adds one on the way
//! back), while BRK pushes the address of the byte *after* its padding byte
//! and returns through RTI without adjustment.

use crate::bus::Bus;
use crate::cpu::addressing::{Resolved, Target};
use crate::cpu::interrupt::IRQ_VECTOR;
use crate::cpu::state::{CpuState, IRQ_DISABLE};
use crate::cpu::table::Mnemonic;

pub(crate) fn exec(cpu: &mut CpuState, bus: &mut Bus, m: Mnemonic, operand: &Resolved) {
    match m {
        Mnemonic::Jmp => {
            // Absolute or indirect; the resolver already chased the pointer
            // (reproducing the page-wrap quirk for the indirect form).
            if let Target::Address(addr) = operand.target {
                cpu.pc = addr;
            }
        }
        Mnemonic::Jsr => {
            if let Target::Address(addr) = operand.target {
                let ret = cpu.pc.wrapping_sub(1);
                cpu.push_u16(bus, ret);
                cpu.pc = addr;
            }
        }
        Mnemonic::Rts => {
            let ret = cpu.pop_u16(bus);
            cpu.pc = ret.wrapping_add(1);
        }
        Mnemonic::Rti => {
            let status = cpu.pop_u8(bus);
            cpu.restore_status(status);
            let ret = cpu.pop_u16(bus);
            cpu.pc = ret;
        }
        Mnemonic::Brk => {
            // Software interrupt: skip the padding byte, push status with B
            // set, then enter through the IRQ vector.
            let ret = cpu.pc.wrapping_add(1);
            cpu.push_u16(bus, ret);
            let status = cpu.compose_status_for_push(true);
            cpu.push_u8(bus, status);
            cpu.assign_flag(IRQ_DISABLE, true);
            let handler = bus.read_word(IRQ_VECTOR);
            cpu.pc = handler;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::{BREAK, CARRY, UNUSED};
    use crate::test_utils::bus_with_program;

    fn setup(prg: &[u8]) -> (CpuState, Bus) {
        let mut bus = bus_with_program(prg, 0x8000);
        let mut cpu = CpuState::new();
        cpu.reset(&mut bus);
        (cpu, bus)
    }

    #[test]
    fn jsr_rts_round_trip() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        // Simulate having fetched JSR $9000 at $8000: PC sits past the operand.
        cpu.pc = 0x8003;
        let operand = Resolved {
            target: Target::Address(0x9000),
            page_crossed: false,
        };
        exec(&mut cpu, &mut bus, Mnemonic::Jsr, &operand);
        assert_eq!(cpu.pc, 0x9000);

        let implied = Resolved {
            target: Target::None,
            page_crossed: false,
        };
        exec(&mut cpu, &mut bus, Mnemonic::Rts, &implied);
        assert_eq!(cpu.pc, 0x8003, "RTS resumes at the instruction after JSR");
    }

    #[test]
    fn brk_pushes_break_set_and_rti_restores() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.status = CARRY | UNUSED;
        cpu.pc = 0x8001; // past the BRK opcode byte
        let implied = Resolved {
            target: Target::None,
            page_crossed: false,
        };
        exec(&mut cpu, &mut bus, Mnemonic::Brk, &implied);
        assert!(cpu.is_flag_set(IRQ_DISABLE));
        assert_eq!(cpu.pc, 0x8000, "IRQ vector in the test image");

        // The pushed copy carries B; the live register never does.
        let pushed = bus.read(0x0100 | cpu.sp.wrapping_add(1) as u16);
        assert_ne!(pushed & BREAK, 0);

        exec(&mut cpu, &mut bus, Mnemonic::Rti, &implied);
        assert_eq!(cpu.pc, 0x8002, "BRK returns past its padding byte");
        assert_eq!(cpu.status, CARRY | UNUSED);
    }
}
