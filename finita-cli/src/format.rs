//! Reader and writer for the line-oriented automaton interchange format.
//!
//! ```text
//! states:
//! A S
//! B F
//! C
//! transitions:
//! A x B
//! B y C
//! ```
//!
//! A state line is a name optionally followed by `S` (initial), `F` (final)
//! or `SF`/`FS` (both). Blank lines and lines starting with `#` are ignored
//! everywhere. The alphabet is not declared explicitly; symbols are
//! collected from the transition lines in first-appearance order.

use anyhow::{bail, ensure, Result};
use log::debug;

use finita::{Automaton, Builder};

/// Meaningful lines: trimmed, comments and blanks skipped.
fn lines(input: &str) -> impl Iterator<Item = &str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Parses a description into an automaton over string states and symbols.
pub fn parse(input: &str) -> Result<Automaton<String, String>> {
    let mut lines = lines(input);

    match lines.next() {
        None => bail!("empty input"),
        Some(header) if header.eq_ignore_ascii_case("states:") => {}
        Some(header) => bail!("expected \"states:\", got {header:?}"),
    }

    let mut builder: Builder<String, String> = Builder::new();
    let mut states: Vec<String> = Vec::new();
    let mut finals: Vec<String> = Vec::new();
    let mut initial: Option<String> = None;

    let mut saw_transitions_header = false;
    for line in lines.by_ref() {
        if line.eq_ignore_ascii_case("transitions:") {
            saw_transitions_header = true;
            break;
        }
        let mut fields = line.split_whitespace();
        let name = fields.next().unwrap_or_default().to_string();
        match fields.next() {
            Some("S") | Some("SF") | Some("FS") if initial.is_some() => {
                bail!("duplicate initial state marker on {name:?}")
            }
            Some("S") => initial = Some(name.clone()),
            Some("SF") | Some("FS") => {
                initial = Some(name.clone());
                finals.push(name.clone());
            }
            Some("F") => finals.push(name.clone()),
            Some(marker) => bail!("unknown marker {marker:?} on state {name:?}"),
            None => {}
        }
        states.push(name);
    }
    ensure!(saw_transitions_header, "missing \"transitions:\" section");
    let initial = match initial {
        Some(state) => state,
        None => bail!("no initial state was marked with S"),
    };

    let mut symbols: Vec<String> = Vec::new();
    for line in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        ensure!(
            fields.len() >= 3,
            "expected <from state> <symbol> <to state>, got {line:?}"
        );
        let (from, symbol, to) = (fields[0], fields[1], fields[2]);
        for endpoint in [from, to] {
            ensure!(
                states.iter().any(|s| s == endpoint),
                "transition references undeclared state {endpoint:?}"
            );
        }
        if !symbols.iter().any(|s| s == symbol) {
            symbols.push(symbol.to_string());
        }
        builder.transition(from.to_string(), symbol.to_string(), to.to_string());
    }

    debug!(
        "parsed {} state lines, {} symbols",
        states.len(),
        symbols.len()
    );

    builder
        .states(states)
        .symbols(symbols)
        .add_final_states(finals)
        .initial_state(initial);
    Ok(builder.build()?)
}

/// Re-serializes an automaton to the interchange format.
pub fn write(automaton: &Automaton<String, String>) -> String {
    let mut out = String::from("states:\n");
    for state in automaton.states() {
        out.push_str(state);
        match (automaton.is_initial(state), automaton.is_final(state)) {
            (true, true) => out.push_str(" SF"),
            (true, false) => out.push_str(" S"),
            (false, true) => out.push_str(" F"),
            (false, false) => {}
        }
        out.push('\n');
    }
    out.push_str("transitions:\n");
    for t in automaton.transitions() {
        out.push_str(&t.from);
        out.push(' ');
        out.push_str(&t.symbol);
        out.push(' ');
        out.push_str(&t.to);
        out.push('\n');
    }
    out
}

// MARK: Tests
#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "\
# the example machine
states:
A S
B F

C
D F
transitions:
A x A
A y D
A z D
D x B
B y D
B z A
";

    #[test]
    fn test_parse_sample() {
        let a = parse(SAMPLE).unwrap();
        assert_eq!(a.states(), &["A", "B", "C", "D"]);
        assert_eq!(a.symbols(), &["x", "y", "z"]);
        assert_eq!(*a.initial_state(), "A");
        assert_eq!(
            a.final_states().cloned().collect::<Vec<_>>(),
            ["B", "D"]
        );
        assert_eq!(a.transitions().len(), 6);
        assert!(a.accept(&["x".into(), "y".into()]));
        assert!(!a.accept(&["x".into()]));
    }

    #[test]
    fn test_initial_and_final_marker() {
        for marker in ["SF", "FS"] {
            let a = parse(&format!("states:\nA {marker}\nB\ntransitions:\nA x B\n")).unwrap();
            assert_eq!(*a.initial_state(), "A");
            assert!(a.is_final(&"A".to_string()));
            assert!(a.accept(&[]));
            // The writer folds both markers back into SF.
            assert!(write(&a).contains("A SF\n"));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("").is_err());
        assert!(parse("# only a comment\n").is_err());
        assert!(parse("transitions:\n").is_err());
        // no transitions section
        assert!(parse("states:\nA S\n").is_err());
        // no initial state
        assert!(parse("states:\nA\nB F\ntransitions:\nA x B\n").is_err());
        // two initial states
        assert!(parse("states:\nA S\nB S\ntransitions:\nA x B\n").is_err());
        // unknown marker
        assert!(parse("states:\nA S\nB Q\ntransitions:\nA x B\n").is_err());
        // short transition line
        assert!(parse("states:\nA S\ntransitions:\nA x\n").is_err());
        // undeclared endpoints
        assert!(parse("states:\nA S\ntransitions:\nA x B\n").is_err());
        assert!(parse("states:\nA S\ntransitions:\nB x A\n").is_err());
    }

    #[test]
    fn test_write_round_trips() {
        let a = parse(SAMPLE).unwrap();
        let b = parse(&write(&a)).unwrap();
        assert_eq!(a.states(), b.states());
        assert_eq!(a.symbols(), b.symbols());
        assert_eq!(a.initial_state(), b.initial_state());
        assert_eq!(
            a.final_states().collect::<Vec<_>>(),
            b.final_states().collect::<Vec<_>>()
        );
        assert_eq!(a.transitions(), b.transitions());
    }

    #[test]
    fn test_determinized_output_round_trips_behaviorally() {
        let source = parse(
            "states:\nA S\nB\nC F\ntransitions:\nA x B\nA x C\nB y C\nC y C\n",
        )
        .unwrap();
        let dfa = source.determinize_joined(",");
        let reparsed = parse(&write(&dfa)).unwrap();

        let x = || "x".to_string();
        let y = || "y".to_string();
        let sequences: Vec<Vec<String>> = vec![
            vec![],
            vec![x()],
            vec![y()],
            vec![x(), y()],
            vec![x(), x()],
            vec![x(), y(), y()],
            vec![y(), x(), y()],
        ];
        for seq in &sequences {
            assert_eq!(
                source.accept_nondeterministic(seq),
                reparsed.accept(seq),
                "disagreement on {seq:?}"
            );
        }
    }
}
