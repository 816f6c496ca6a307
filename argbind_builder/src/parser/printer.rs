use crate::constant::*;
use crate::model::Cardinality;
use crate::parser::base::*;
use crate::parser::interface::*;

/// One line of the help, before column layout.
#[derive(Debug, PartialEq, Eq)]
enum Entry {
    Blank,
    Heading { indent: usize, text: String },
    Row { indent: usize, left: String, middle: String },
}

pub(crate) struct Printer {
    terminal_width: Option<usize>,
}

impl Printer {
    pub(crate) fn terminal() -> Self {
        Self::new(terminal_width())
    }

    pub(crate) fn new(terminal_width: Option<usize>) -> Self {
        Self { terminal_width }
    }

    /// The single line usage of the command, ex: `usage: program [-o O] p [p] {a, b}`.
    pub(crate) fn usage(&self, tree: &ParserTree, id: NodeId) -> String {
        let node = tree.node(id);
        let mut summary = vec![USAGE_PREFIX.to_string(), node.name.clone()];

        for spec in node.optionals.iter().map(|slot| &node.specs[*slot]) {
            let grammar = option_grammar(&spec.identifiers[0], spec, tree.prefix_chars());

            if spec.required {
                summary.push(grammar);
            } else {
                summary.push(format!("[{grammar}]"));
            }
        }

        for spec in node.positionals.iter().map(|slot| &node.specs[*slot]) {
            let grammar = values_grammar(&spec.identifiers[0], &spec.cardinality);

            if !grammar.is_empty() {
                summary.push(grammar);
            }
        }

        if !node.sub_commands.is_empty() {
            summary.push(choices(tree, id));
        }

        summary.join(" ")
    }

    /// The full help of the command, optionally nesting the help of every sub-command.
    pub(crate) fn help(
        &self,
        tree: &ParserTree,
        id: NodeId,
        about: Option<&str>,
        recursive: bool,
    ) -> String {
        let total_width = self.terminal_width.unwrap_or(DEFAULT_TOTAL_WIDTH);
        let mut out = vec![self.usage(tree, id)];

        if let Some(about) = about {
            out.push(String::default());
            out.extend(chunk(about, std::cmp::max(total_width, MINIMUM_MIDDLE_WIDTH)));
        }

        let mut entries = Vec::default();
        sections(tree, id, 0, recursive, &mut entries);
        let widest = entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Row { indent, left, .. } => Some(indent + left.chars().count()),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        let renderer =
            ColumnRenderer::guided(std::cmp::min(widest, MAXIMUM_LEFT_WIDTH), total_width);

        for entry in entries {
            match entry {
                Entry::Blank => out.push(String::default()),
                Entry::Heading { indent, text } => out.push(format!("{:indent$}{text}", "")),
                Entry::Row {
                    indent,
                    left,
                    middle,
                } => out.extend(renderer.render(indent, &left, &middle)),
            }
        }

        out.join("\n")
    }
}

fn sections(tree: &ParserTree, id: NodeId, indent: usize, recursive: bool, entries: &mut Vec<Entry>) {
    let node = tree.node(id);
    let row_indent = indent + HELP_INDENT;

    if !node.positionals.is_empty() || !node.sub_commands.is_empty() {
        if indent == 0 {
            entries.push(Entry::Blank);
        }

        entries.push(Entry::Heading {
            indent,
            text: POSITIONAL_SECTION.to_string(),
        });

        for spec in node.positionals.iter().map(|slot| &node.specs[*slot]) {
            entries.push(Entry::Row {
                indent: row_indent,
                left: spec.identifiers[0].clone(),
                middle: spec.help.clone().unwrap_or_default(),
            });
        }

        if !node.sub_commands.is_empty() {
            entries.push(Entry::Row {
                indent: row_indent,
                left: choices(tree, id),
                middle: String::default(),
            });

            for child in &node.sub_commands {
                let child_node = tree.node(*child);
                entries.push(Entry::Row {
                    indent: row_indent + HELP_INDENT,
                    left: child_node.name.clone(),
                    middle: child_node.help.clone().unwrap_or_default(),
                });

                if recursive {
                    sections(tree, *child, row_indent + HELP_INDENT * 2, recursive, entries);
                }
            }
        }
    }

    if !node.optionals.is_empty() {
        if indent == 0 {
            entries.push(Entry::Blank);
        }

        entries.push(Entry::Heading {
            indent,
            text: OPTIONAL_SECTION.to_string(),
        });

        for spec in node.optionals.iter().map(|slot| &node.specs[*slot]) {
            let left = spec
                .identifiers
                .iter()
                .map(|identifier| option_grammar(identifier, spec, tree.prefix_chars()))
                .collect::<Vec<String>>()
                .join(", ");
            entries.push(Entry::Row {
                indent: row_indent,
                left,
                middle: spec.help.clone().unwrap_or_default(),
            });
        }
    }
}

fn choices(tree: &ParserTree, id: NodeId) -> String {
    format!("{{{}}}", tree.child_names(id).join(", "))
}

fn option_grammar(identifier: &str, spec: &ArgumentSpec, prefix_chars: &str) -> String {
    let grammar = values_grammar(&metavar(&spec.identifiers, prefix_chars), &spec.cardinality);

    if grammar.is_empty() {
        identifier.to_string()
    } else {
        format!("{identifier} {grammar}")
    }
}

/// Ex: `--file-name` -> `FILE_NAME`.
fn metavar(identifiers: &[String], prefix_chars: &str) -> String {
    let longest = identifiers
        .iter()
        .max_by_key(|identifier| identifier.chars().count())
        .expect("internal error - an optional must have an identifier");
    let mut stripped = longest.as_str();

    for _ in 0..2 {
        if let Some(c) = stripped.chars().next() {
            if prefix_chars.contains(c) {
                stripped = &stripped[c.len_utf8()..];
            }
        }
    }

    stripped.to_uppercase().replace('-', "_")
}

/// Ex: `2..3` -> `M M [M]`, `1..∞` -> `M [...]`, `0..∞` -> `[M ...]`, `8` -> `M{8}`.
fn values_grammar(metavar: &str, cardinality: &Cardinality) -> String {
    let mut grammar: Vec<String> = if cardinality.min() > MAXIMUM_LISTED_VALUES {
        vec![format!("{metavar}{{{}}}", cardinality.min())]
    } else {
        (0..cardinality.min())
            .map(|_| metavar.to_string())
            .collect()
    };
    let extra = cardinality.max() - cardinality.min();

    if cardinality.is_unbounded() || extra > MAXIMUM_LISTED_EXTRAS {
        if cardinality.min() == 0 {
            grammar.push(format!("[{metavar} ...]"));
        } else {
            grammar.push("[...]".to_string());
        }
    } else {
        grammar.extend((0..extra).map(|_| format!("[{metavar}]")));
    }

    grammar.join(" ")
}
