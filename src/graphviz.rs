use std::collections::HashSet;

use super::*;

impl<S, A> Dfa<S, A>
where
    S: std::fmt::Debug + Clone + Eq + std::hash::Hash,
    A: std::fmt::Debug + Clone + Eq + std::hash::Hash,
{
    #[tracing::instrument(skip_all)]
    pub fn graphviz_file(&self, filename: &str, label: &str) {
        use std::io::Write;
        let g = graphviz_wrap(self.graphviz(), label);
        let mut output = std::fs::File::create(filename).unwrap();
        assert!(output.write_all(g.as_bytes()).is_ok());
    }

    #[tracing::instrument(skip_all)]
    pub fn graphviz(&self) -> String {
        let mut ret = "".to_string();
        let mut ids: HashSet<&S> = HashSet::new();
        ids.insert(self.initial_state());
        ids.extend(self.accepting_states());

        for ((from, symbol), to) in self.transition_table().iter() {
            ids.insert(from);
            ids.insert(to);
            ret = format!(
                r#"{ret}
  {} -> {} [label="{}" fontsize="20pt"];"#,
                nodename(from),
                nodename(to),
                edgelabel(symbol)
            );
        }

        for id in ids {
            let nodelabel = if self.initial_state() == id {
                "enter".to_string()
            } else {
                edgelabel(id)
            };
            ret = format!(
                r#"{ret}
  {} [label="{}", shape="{}"]"#,
                nodename(id),
                nodelabel,
                match self.accepting_states().contains(id) {
                    true => "doublecircle",
                    false => "circle",
                }
            );
        }
        ret
    }
}

impl<S, A> Nfa<S, A>
where
    S: std::fmt::Debug + Clone + Eq + std::hash::Hash,
    A: std::fmt::Debug + Clone + Eq + std::hash::Hash,
{
    #[tracing::instrument(skip_all)]
    pub fn graphviz_file(&self, filename: &str, label: &str) {
        use std::io::Write;
        let g = graphviz_wrap(self.graphviz(), label);
        let mut output = std::fs::File::create(filename).unwrap();
        assert!(output.write_all(g.as_bytes()).is_ok());
    }

    #[tracing::instrument(skip_all)]
    pub fn graphviz(&self) -> String {
        let mut ret = "".to_string();
        let mut ids: HashSet<&S> = HashSet::new();
        ids.insert(self.initial_state());
        ids.extend(self.accepting_states());

        for ((from, symbol), destinations) in self.transition_table().iter() {
            ids.insert(from);
            for to in destinations {
                ids.insert(to);
                ret = format!(
                    r#"{ret}
  {} -> {} [label="{}" fontsize="20pt"];"#,
                    nodename(from),
                    nodename(to),
                    edgelabel(symbol)
                );
            }
        }

        for (from, destinations) in self.epsilon_moves() {
            ids.insert(from);
            for to in destinations {
                ids.insert(to);
                ret = format!(
                    r#"{ret}
  {} -> {} [label="ε" fontsize="20pt"];"#,
                    nodename(from),
                    nodename(to)
                );
            }
        }

        for id in ids {
            let nodelabel = if self.initial_state() == id {
                "enter".to_string()
            } else {
                edgelabel(id)
            };
            ret = format!(
                r#"{ret}
  {} [label="{}", shape="{}"]"#,
                nodename(id),
                nodelabel,
                match self.accepting_states().contains(id) {
                    true => "doublecircle",
                    false => "circle",
                }
            );
        }
        ret
    }
}

fn nodename<S: std::fmt::Debug>(s: &S) -> String {
    let mut name = "node_".to_string();
    for c in format!("{s:?}").chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c);
        } else {
            name.push('_');
        }
    }
    name
}

fn edgelabel<T: std::fmt::Debug>(t: &T) -> String {
    format!("{t:?}").replace('"', "\\\"")
}

/// Wraps rendered nodes and edges in a digraph shell.
pub fn graphviz_wrap(s: String, label: &str) -> String {
    format!(
        r##"
digraph G {{
    rankdir = TB;
    remincross = true;
    splines = true;
    fontsize="40";

    bgcolor = "#555555";
    node[color = "#FFFFFF"];
    node[fontcolor = "#FFFFFF"];
    edge[color = "#FFFFFF", fontcolor="#FFFFFF"];

    label = "{label}";
    {}
}}
"##,
        s
    )
}
