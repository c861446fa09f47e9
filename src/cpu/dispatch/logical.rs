//! Logical family: AND/ORA/EOR against the accumulator, plus BIT.

use crate::bus::Bus;
use crate::cpu::addressing::Resolved;
use crate::cpu::execute;
use crate::cpu::state::CpuState;
use crate::cpu::table::Mnemonic;

pub(crate) fn exec(cpu: &mut CpuState, bus: &mut Bus, m: Mnemonic, operand: &Resolved) {
    let v = operand.value(cpu, bus);
    match m {
        Mnemonic::And => execute::and(cpu, v),
        Mnemonic::Ora => execute::ora(cpu, v),
        Mnemonic::Eor => execute::eor(cpu, v),
        Mnemonic::Bit => execute::bit(cpu, v),
        _ => {}
    }
}
