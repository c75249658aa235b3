use crate::instr::Instr;

/// Scan direction for [`linear_scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Count slots from `from` (exclusive) until the `target` operator that closes the current nesting level.
///
/// Every `nested` operator seen on the way opens one more level that a later
/// `target` has to close first. When no partner exists the scan runs to the
/// edge of the program and returns the number of slots it visited; the
/// caller applies that distance unchanged.
pub fn linear_scan(
    program: &[Instr],
    from: usize,
    target: char,
    nested: char,
    direction: Direction,
) -> usize {
    let mut skip = 0usize;
    let mut visited = 0usize;
    let mut pos = from;

    loop {
        let next = match direction {
            Direction::Forward => pos.checked_add(1),
            Direction::Backward => pos.checked_sub(1),
        };
        let Some((p, instr)) = next.and_then(|p| program.get(p).map(|instr| (p, instr))) else {
            break;
        };
        pos = p;
        visited += 1;

        if instr.op == target {
            if skip == 0 {
                return visited;
            }
            skip -= 1;
        } else if instr.op == nested {
            skip += 1;
        }
    }

    visited
}

/// Replace the argument of every `[` and `]` with the distance to its partner.
///
/// Each bracket is scanned on its own against the finished program, so the
/// result depends only on the instruction sequence.
pub fn resolve(mut program: Vec<Instr>) -> Vec<Instr> {
    for i in 0..program.len() {
        let distance = match program[i].op {
            '[' => linear_scan(&program, i, ']', '[', Direction::Forward),
            ']' => linear_scan(&program, i, '[', ']', Direction::Backward),
            _ => continue,
        };
        program[i].arg = distance;
    }

    program
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::reduce::reduce;

    fn resolved(source: &str) -> Vec<Instr> {
        resolve(reduce(parse(source)))
    }

    /// Bracket partners found with a stack, independent of `linear_scan`.
    fn partners(program: &[Instr]) -> Vec<(usize, usize)> {
        let mut open = Vec::new();
        let mut pairs = Vec::new();
        for (i, instr) in program.iter().enumerate() {
            match instr.op {
                '[' => open.push(i),
                ']' => pairs.push((open.pop().expect("balanced"), i)),
                _ => {}
            }
        }
        pairs
    }

    #[test]
    fn simple_loop_distances() {
        // [ - ]
        let program = resolved("[-]");
        assert_eq!(program[0].arg, 2);
        assert_eq!(program[2].arg, 2);
        assert_eq!(program[1].arg, 1);
    }

    #[test]
    fn non_bracket_arguments_untouched() {
        let program = resolved("+++[->>+<<]");
        assert_eq!(program[0], Instr::new('+', 3));
        assert_eq!(program[3], Instr::new('>', 2));
    }

    #[test]
    fn nested_pairs_point_at_each_other() {
        for source in ["[[]]", "+[>[-]<[[]]-]", "[[[[[-]]]]]", "[][][[]]", ">[<[>+<-]>[-]]"] {
            let program = resolved(source);
            for (open, close) in partners(&program) {
                assert_eq!(program[open].arg, close - open, "open at {open} in {source}");
                assert_eq!(program[close].arg, close - open, "close at {close} in {source}");
            }
        }
    }

    #[test]
    fn unmatched_open_runs_to_end() {
        // [ + > : scan visits the two slots after the bracket
        let program = resolved("[+>");
        assert_eq!(program[0].arg, 2);
    }

    #[test]
    fn unmatched_close_runs_to_start() {
        let program = resolved("+>]");
        assert_eq!(program[2].arg, 2);
    }

    #[test]
    fn backward_scan_reaches_index_zero() {
        assert_eq!(linear_scan(&resolved("[+]"), 2, '[', ']', Direction::Backward), 2);
    }

    #[test]
    fn empty_program_resolves_to_empty() {
        assert!(resolve(Vec::new()).is_empty());
    }
}
