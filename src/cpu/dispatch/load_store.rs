//! Load/store family: LDA/LDX/LDY and STA/STX/STY.
//!
//! Loads funnel through `update_zn`; stores touch no flags at all. A store
//! writes straight through the bus, so storing to a device register fires
//! its side effects synchronously.

use crate::bus::Bus;
use crate::cpu::addressing::{Resolved, Target};
use crate::cpu::state::CpuState;
use crate::cpu::table::Mnemonic;

pub(crate) fn exec(cpu: &mut CpuState, bus: &mut Bus, m: Mnemonic, operand: &Resolved) {
    match m {
        Mnemonic::Lda => {
            let v = operand.value(cpu, bus);
            cpu.a = v;
            cpu.update_zn(v);
        }
        Mnemonic::Ldx => {
            let v = operand.value(cpu, bus);
            cpu.x = v;
            cpu.update_zn(v);
        }
        Mnemonic::Ldy => {
            let v = operand.value(cpu, bus);
            cpu.y = v;
            cpu.update_zn(v);
        }
        Mnemonic::Sta => store(bus, operand, cpu.a),
        Mnemonic::Stx => store(bus, operand, cpu.x),
        Mnemonic::Sty => store(bus, operand, cpu.y),
        _ => {}
    }
}

#[inline]
fn store(bus: &mut Bus, operand: &Resolved, value: u8) {
    if let Target::Address(addr) = operand.target {
        bus.write(addr, value);
    }
}
