use crate::instr::{Instr, Word};
use crate::tape::Tape;

/// Format one execution step as `[ip:dp]: cell, instr`.
/// The argument follows the operator when it is not 1, e.g. `+3` or `[4`.
pub fn log(tape: &Tape, ip: usize, data_ptr: Word, instr: &Instr) -> String {
    format!("[{ip}:{data_ptr}]: {}, {instr}", tape.get(data_ptr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_pointers_cell_and_operator() {
        let mut tape = Tape::new();
        *tape.cell_mut(2) = 65;
        assert_eq!(log(&tape, 14, 2, &Instr::unit('.')), "[14:2]: 65, .");
        assert_eq!(log(&tape, 0, 3, &Instr::new('+', 3)), "[0:3]: 0, +3");
    }
}
