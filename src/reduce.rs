use crate::instr::{is_bracket, is_operator, Instr};

/// Collapse runs of identical instructions into one instruction carrying the run length.
///
/// - `+ - < > . ,` merge with an immediately preceding instruction of the same operator.
/// - `[` and `]` always start a new instruction, even when repeated.
/// - Anything outside the operator alphabet is dropped.
///
/// An empty input yields an empty program.
pub fn reduce(program: Vec<Instr>) -> Vec<Instr> {
    let mut reduced: Vec<Instr> = Vec::with_capacity(program.len());

    for instr in program {
        match reduced.last_mut() {
            Some(top) if top.op == instr.op && !is_bracket(instr.op) => {
                top.arg += instr.arg;
            }
            _ if is_operator(instr.op) => reduced.push(instr),
            _ => {}
        }
    }

    reduced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn reduced(source: &str) -> Vec<Instr> {
        reduce(parse(source))
    }

    #[test]
    fn runs_collapse_into_counts() {
        assert_eq!(
            reduced("+++>>-..<"),
            vec![
                Instr::new('+', 3),
                Instr::new('>', 2),
                Instr::new('-', 1),
                Instr::new('.', 2),
                Instr::new('<', 1),
            ]
        );
    }

    #[test]
    fn brackets_stay_one_to_one() {
        let program = reduced("[[]]");
        assert_eq!(program.len(), 4);
        assert!(program.iter().all(|i| i.arg == 1));
    }

    #[test]
    fn leading_bracket_is_not_duplicated() {
        assert_eq!(reduced("[-]").len(), 3);
    }

    #[test]
    fn comments_vanish() {
        assert_eq!(reduced("+hi+."), reduced("++."));
        assert!(reduced("just a comment").is_empty());
    }

    #[test]
    fn comment_between_runs_joins_them() {
        // Comments are dropped before they can break a run.
        assert_eq!(reduced("+ +"), vec![Instr::new('+', 2)]);
    }

    #[test]
    fn input_instruction_is_kept() {
        assert_eq!(reduced(",,"), vec![Instr::new(',', 2)]);
    }

    #[test]
    fn empty_program_reduces_to_empty() {
        assert!(reduce(Vec::new()).is_empty());
    }

    #[test]
    fn reducing_twice_changes_nothing() {
        let once = reduced("++[->+++<]>..comment--");
        let twice = reduce(once.clone());
        assert_eq!(once, twice);
    }
}
