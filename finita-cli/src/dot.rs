//! DOT graph rendering of an automaton.

use finita::Automaton;

/// Escapes a label for use inside a double-quoted DOT identifier.
fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Renders the automaton as a DOT digraph: one line per edge grouped by
/// from-state in declaration order, a borderless pseudo-node pointing at the
/// initial state, and `peripheries=2` on final states.
pub fn render(automaton: &Automaton<String, String>) -> String {
    let mut out = String::from("digraph {\n");
    for state in automaton.states() {
        for t in automaton.transitions().iter().filter(|t| t.from == *state) {
            out.push_str(&format!(
                "    \"{}\" -> \"{}\" [label=\"{}\"]\n",
                escape(&t.from),
                escape(&t.to),
                escape(&t.symbol)
            ));
        }
    }
    out.push_str("    \"\" [shape=none]\n");
    out.push_str(&format!(
        "    \"\" -> \"{}\"\n",
        escape(automaton.initial_state())
    ));
    for state in automaton.final_states() {
        out.push_str(&format!("    \"{}\" [peripheries=2]\n", escape(state)));
    }
    out.push('}');
    out
}

// MARK: Tests
#[cfg(test)]
mod test {
    use super::*;
    use crate::format;

    #[test]
    fn test_render_sample() {
        let a = format::parse(
            "states:\nA S\nB F\ntransitions:\nA x B\nB y A\nB x B\n",
        )
        .unwrap();
        let dot = render(&a);

        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.ends_with('}'));
        assert!(dot.contains("    \"A\" -> \"B\" [label=\"x\"]\n"));
        assert!(dot.contains("    \"B\" -> \"A\" [label=\"y\"]\n"));
        assert!(dot.contains("    \"\" [shape=none]\n"));
        assert!(dot.contains("    \"\" -> \"A\"\n"));
        assert!(dot.contains("    \"B\" [peripheries=2]\n"));
        assert!(!dot.contains("\"A\" [peripheries=2]"));
    }

    #[test]
    fn test_edges_grouped_by_from_state_order() {
        let a = format::parse(
            "states:\nB S\nA F\ntransitions:\nA x B\nB x A\n",
        )
        .unwrap();
        let dot = render(&a);
        let b_edge = dot.find("\"B\" -> \"A\"").unwrap();
        let a_edge = dot.find("\"A\" -> \"B\"").unwrap();
        assert!(b_edge < a_edge, "B was declared first");
    }

    #[test]
    fn test_nondeterministic_edges_all_rendered() {
        // Two edges share (A, x); both must show up, not just the last one.
        let a = format::parse(
            "states:\nA S\nB\nC F\ntransitions:\nA x B\nA x C\n",
        )
        .unwrap();
        let dot = render(&a);
        assert!(dot.contains("    \"A\" -> \"B\" [label=\"x\"]\n"));
        assert!(dot.contains("    \"A\" -> \"C\" [label=\"x\"]\n"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape(r#"a"b\c"#), r#"a\"b\\c"#);
    }
}
