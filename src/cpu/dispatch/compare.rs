//! Compare family: CMP/CPX/CPY. Subtraction that only sets flags.

use crate::bus::Bus;
use crate::cpu::addressing::Resolved;
use crate::cpu::execute;
use crate::cpu::state::CpuState;
use crate::cpu::table::Mnemonic;

pub(crate) fn exec(cpu: &mut CpuState, bus: &mut Bus, m: Mnemonic, operand: &Resolved) {
    let v = operand.value(cpu, bus);
    let reg = match m {
        Mnemonic::Cmp => cpu.a,
        Mnemonic::Cpx => cpu.x,
        Mnemonic::Cpy => cpu.y,
        _ => return,
    };
    execute::compare(cpu, reg, v);
}
