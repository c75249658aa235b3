use std::fmt;

/// Width of a tape cell and of the data pointer.
///
/// Every arithmetic operation on a `Word` wraps, so the tape behaves like a
/// finite 65,536-cell ring of 16-bit cells.
pub type Word = u16;

/// The eight recognized operators, in the order they are usually listed.
pub const OPERATORS: [char; 8] = ['+', '-', '<', '>', '.', ',', '[', ']'];

/// A single instruction: an operator tag and its argument.
///
/// The meaning of `arg` depends on the pipeline stage:
/// - after parsing, every argument is 1;
/// - after reduction, `+ - < > .` carry their run length;
/// - after resolution, `[` and `]` carry the distance to their partner in slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instr {
    pub op: char,
    pub arg: usize,
}

impl Instr {
    pub fn new(op: char, arg: usize) -> Self {
        Self { op, arg }
    }

    /// A count-of-one instruction, as produced by the parser.
    pub fn unit(op: char) -> Self {
        Self { op, arg: 1 }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arg == 1 {
            write!(f, "{}", self.op)
        } else {
            write!(f, "{}{}", self.op, self.arg)
        }
    }
}

/// Whether `ch` belongs to the operator alphabet.
pub fn is_operator(ch: char) -> bool {
    OPERATORS.contains(&ch)
}

/// Loop brackets are never merged and carry jump distances instead of counts.
pub fn is_bracket(ch: char) -> bool {
    matches!(ch, '[' | ']')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_membership() {
        for op in OPERATORS {
            assert!(is_operator(op));
        }
        assert!(!is_operator('a'));
        assert!(!is_operator(' '));
        assert!(is_bracket('['));
        assert!(!is_bracket('+'));
    }

    #[test]
    fn display_hides_unit_argument() {
        assert_eq!(Instr::unit('+').to_string(), "+");
        assert_eq!(Instr::new('>', 12).to_string(), ">12");
    }
}
