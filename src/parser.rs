use crate::instr::Instr;

/// Map every character of `source` to a count-of-one instruction.
///
/// Nothing is rejected here: comment characters become instructions too and
/// are only dropped later by [`crate::reduce::reduce`].
pub fn parse(source: &str) -> Vec<Instr> {
    source.chars().map(Instr::unit).collect()
}
