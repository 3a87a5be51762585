//! DIMACS Bridge (spec §4.5, §6): bit-exact CNF export, and import of an
//! external SAT solver's assignment.

use std::io::{BufRead, Write};

use crate::clause::Clause;
use crate::error::{Result, SolveError};
use crate::variable::Variable;

/// Write `p cnf <nvars> <nclauses>` followed by one line per clause, each
/// literal a signed 1-based ordinal in variable-table order, terminated by
/// `0`.
pub fn export<W: Write>(variables: &[Variable], clauses: &[Clause], mut sink: W) -> std::io::Result<()> {
    writeln!(sink, "p cnf {} {}", variables.len(), clauses.len())?;
    for clause in clauses {
        let mut line = String::new();
        for lit in &clause.literals {
            let ordinal = lit.var as i64 + 1;
            let signed = if lit.inverted { -ordinal } else { ordinal };
            line.push_str(&signed.to_string());
            line.push(' ');
        }
        line.push('0');
        writeln!(sink, "{line}")?;
    }
    Ok(())
}

/// Parse an external solver's stdout. Accepts `SAT`-prefixed output
/// followed by assignment lines, or `v `-prefixed DIMACS-convention lines,
/// terminated by a `0` token. A bare `UNSAT` line is reported distinctly
/// rather than falling through to a generic parse error.
pub fn import_assignment<R: BufRead>(variables: &mut [Variable], mut source: R) -> Result<()> {
    let mut line = String::new();
    let mut terminated = false;

    loop {
        line.clear();
        let read = source.read_line(&mut line).map_err(|_| SolveError::DimacsParse)?;
        if read == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "UNSAT" {
            return Err(SolveError::ExternalUnsat);
        }

        let rest = if let Some(stripped) = trimmed.strip_prefix("v ") {
            stripped
        } else if trimmed == "SAT" {
            continue;
        } else if let Some(stripped) = trimmed.strip_prefix("SAT ") {
            stripped
        } else {
            trimmed
        };

        for token in rest.split_whitespace() {
            let Ok(value) = token.parse::<i64>() else {
                continue;
            };
            if value == 0 {
                terminated = true;
                break;
            }
            let ordinal = value.unsigned_abs() as usize;
            if ordinal == 0 || ordinal > variables.len() {
                continue;
            }
            let var = &mut variables[ordinal - 1];
            var.to_install = value > 0;
            var.resolved = true;
        }
        if terminated {
            break;
        }
    }

    if !terminated {
        return Err(SolveError::DimacsParse);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{ClauseKind, Literal};
    use crate::unit::Unit;

    fn vars(n: usize) -> Vec<Variable> {
        (0..n).map(|i| Variable::new(Unit::new(format!("u{i}"), "d", false))).collect()
    }

    #[test]
    fn export_writes_header_and_literals() {
        let vs = vars(2);
        let clauses = vec![Clause::new(vec![Literal::positive(0), Literal::negative(1)], ClauseKind::Dependency)];
        let mut buf = Vec::new();
        export(&vs, &clauses, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "p cnf 2 1\n1 -2 0\n");
    }

    #[test]
    fn import_v_prefixed_lines() {
        let mut vs = vars(2);
        let input = "v 1 -2 0\n";
        import_assignment(&mut vs, input.as_bytes()).unwrap();
        assert!(vs[0].to_install && vs[0].resolved);
        assert!(!vs[1].to_install && vs[1].resolved);
    }

    #[test]
    fn import_sat_prefixed_lines() {
        let mut vs = vars(1);
        let input = "SAT\n1 0\n";
        import_assignment(&mut vs, input.as_bytes()).unwrap();
        assert!(vs[0].to_install);
    }

    #[test]
    fn import_unsat_line_is_distinct_error() {
        let mut vs = vars(1);
        let result = import_assignment(&mut vs, "UNSAT\n".as_bytes());
        assert!(matches!(result, Err(SolveError::ExternalUnsat)));
    }

    #[test]
    fn import_missing_terminator_is_parse_error() {
        let mut vs = vars(1);
        let result = import_assignment(&mut vs, "v 1\n".as_bytes());
        assert!(matches!(result, Err(SolveError::DimacsParse)));
    }
}
