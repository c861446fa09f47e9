//! Arithmetic family: ADC and SBC. The flag rules live in `execute`.

use crate::bus::Bus;
use crate::cpu::addressing::Resolved;
use crate::cpu::execute;
use crate::cpu::state::CpuState;
use crate::cpu::table::Mnemonic;

pub(crate) fn exec(cpu: &mut CpuState, bus: &mut Bus, m: Mnemonic, operand: &Resolved) {
    let v = operand.value(cpu, bus);
    match m {
        Mnemonic::Adc => execute::adc(cpu, v),
        Mnemonic::Sbc => execute::sbc(cpu, v),
        _ => {}
    }
}
