use std::collections::HashMap;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{AnonymousBindable, BindError, Convertible, TypedBinding};
use crate::matcher::*;
use crate::model::{ArgumentKind, Cardinality};
use crate::parser::error::*;

/// Index of a command in the [`ParserTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

pub(crate) const ROOT: NodeId = NodeId(0);

/// Address of one argument: its command, its slot in that command, and the registration generation of the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ArgKey {
    node: NodeId,
    slot: usize,
    generation: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParameterClass {
    Opt,
    Arg,
}

/// Whether `token` looks like an option identifier.
///
/// At least two characters, starting with a prefix character and not followed by a digit (so `-5` is a value).
pub(crate) fn is_option_like(token: &str, prefix_chars: &str) -> bool {
    let mut chars = token.chars();

    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) => prefix_chars.contains(first) && !second.is_ascii_digit(),
        _ => false,
    }
}

pub(crate) struct ArgumentSpec {
    pub(crate) class: ParameterClass,
    pub(crate) identifiers: Vec<String>,
    pub(crate) cardinality: Cardinality,
    pub(crate) required: bool,
    pub(crate) exists: bool,
    pub(crate) help: Option<String>,
    // We need a (dyn .. [ignoring T] ..) here in order to put the arguments of varying types T under one collection.
    // In other words, we want the bottom of the object graph to include the types T, but up here we want to work across all T.
    pub(crate) binding: Box<dyn AnonymousBindable>,
}

impl std::fmt::Debug for ArgumentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentSpec")
            .field("class", &self.class)
            .field("identifiers", &self.identifiers)
            .field("cardinality", &self.cardinality)
            .field("required", &self.required)
            .field("exists", &self.exists)
            .finish()
    }
}

impl ArgumentSpec {
    pub(crate) fn name(&self) -> String {
        self.identifiers.join("/")
    }

    /// Positionals are required by their cardinality, optionals by configuration.
    pub(crate) fn is_required(&self) -> bool {
        match self.class {
            ParameterClass::Arg => self.cardinality.min() > 0,
            ParameterClass::Opt => self.required,
        }
    }

    pub(crate) fn kind(&self) -> ArgumentKind {
        ArgumentKind::new(self.binding.group(), self.cardinality.value_kind())
    }

    pub(crate) fn info(&self) -> ArgumentInfo {
        ArgumentInfo {
            name: self.name(),
            identifiers: self.identifiers.clone(),
            cardinality: self.cardinality,
            type_name: self.binding.type_name(),
            kind: self.kind(),
        }
    }

    fn bind(&mut self, token: &str) -> Result<(), ParseError> {
        self.binding.bind(token).map_err(|error| match error {
            BindError::InvalidArgument => ParseError::InvalidArgument {
                argument: self.info(),
                token: token.to_string(),
                type_name: self.binding.type_name(),
            },
            BindError::OutOfRange { lo, hi } => ParseError::OutOfRange {
                argument: self.info(),
                token: token.to_string(),
                lo,
                hi,
            },
            BindError::LengthError { lo, hi } => ParseError::LengthError {
                argument: self.info(),
                token: token.to_string(),
                lo,
                hi,
            },
        })
    }

    fn reset(&mut self) {
        self.exists = false;
        self.binding.clear();
    }
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) help: Option<String>,
    pub(crate) exists: bool,
    // Set once the command is removed from its parent; the arena slot is never reused.
    detached: bool,
    // Bumped whenever the arguments are removed, invalidating outstanding argument handles.
    generation: usize,
    pub(crate) specs: Vec<ArgumentSpec>,
    pub(crate) positionals: Vec<usize>,
    pub(crate) optionals: Vec<usize>,
    identifiers: HashMap<String, usize>,
    pub(crate) sub_commands: Vec<NodeId>,
}

impl Node {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: None,
            exists: false,
            detached: false,
            generation: 0,
            specs: Vec::default(),
            positionals: Vec::default(),
            optionals: Vec::default(),
            identifiers: HashMap::default(),
            sub_commands: Vec::default(),
        }
    }

    fn optional_slot(&self, token: &str) -> Option<usize> {
        self.identifiers
            .get(token)
            .copied()
            .filter(|slot| self.specs[*slot].class == ParameterClass::Opt)
    }
}

/// The arena of commands, with the root command at [`ROOT`].
#[derive(Debug)]
pub(crate) struct ParserTree {
    nodes: Vec<Node>,
    prefix_chars: String,
}

impl ParserTree {
    pub(crate) fn new(program: impl Into<String>, prefix_chars: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix_chars = prefix_chars.into();

        if prefix_chars.is_empty() || prefix_chars.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidPrefixChars(prefix_chars));
        }

        Ok(Self {
            nodes: vec![Node::new(program)],
            prefix_chars,
        })
    }

    pub(crate) fn prefix_chars(&self) -> &str {
        &self.prefix_chars
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        let node = &self.nodes[id.0];
        assert!(
            !node.detached,
            "stale command handle - '{}' was removed from its parent",
            node.name
        );
        node
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        let node = &mut self.nodes[id.0];
        assert!(
            !node.detached,
            "stale command handle - '{}' was removed from its parent",
            node.name
        );
        node
    }

    pub(crate) fn spec(&self, key: &ArgKey) -> &ArgumentSpec {
        let node = self.node(key.node);
        assert_eq!(
            node.generation, key.generation,
            "stale argument handle - the arguments of '{}' were removed",
            node.name
        );
        &node.specs[key.slot]
    }

    pub(crate) fn spec_mut(&mut self, key: &ArgKey) -> &mut ArgumentSpec {
        let node = self.node_mut(key.node);
        assert_eq!(
            node.generation, key.generation,
            "stale argument handle - the arguments of '{}' were removed",
            node.name
        );
        &mut node.specs[key.slot]
    }

    pub(crate) fn binding<T: Convertible>(&self, key: &ArgKey) -> &TypedBinding<T> {
        self.spec(key)
            .binding
            .as_any()
            .downcast_ref::<TypedBinding<T>>()
            .expect("internal error - argument handle type must match its binding")
    }

    pub(crate) fn binding_mut<T: Convertible>(&mut self, key: &ArgKey) -> &mut TypedBinding<T> {
        self.spec_mut(key)
            .binding
            .as_any_mut()
            .downcast_mut::<TypedBinding<T>>()
            .expect("internal error - argument handle type must match its binding")
    }

    pub(crate) fn add_argument<T: Convertible>(
        &mut self,
        id: NodeId,
        class: ParameterClass,
        identifiers: &[&str],
        cardinality: Cardinality,
    ) -> Result<ArgKey, ConfigError> {
        match class {
            ParameterClass::Arg => {
                let name = identifiers
                    .first()
                    .ok_or(ConfigError::MissingIdentifier)?;

                if identifiers.len() != 1
                    || name.is_empty()
                    || is_option_like(name, &self.prefix_chars)
                {
                    return Err(ConfigError::InvalidIdentifier(identifiers.join("/")));
                }
            }
            ParameterClass::Opt => {
                if identifiers.is_empty() {
                    return Err(ConfigError::MissingIdentifier);
                }

                if let Some(invalid) = identifiers
                    .iter()
                    .find(|i| !is_option_like(i, &self.prefix_chars))
                {
                    return Err(ConfigError::InvalidIdentifier(invalid.to_string()));
                }
            }
        }

        let node = self.node_mut(id);

        for (i, identifier) in identifiers.iter().enumerate() {
            if node.identifiers.contains_key(*identifier) || identifiers[..i].contains(identifier) {
                return Err(ConfigError::DuplicateIdentifier(identifier.to_string()));
            }
        }

        let slot = node.specs.len();

        for identifier in identifiers {
            node.identifiers.insert(identifier.to_string(), slot);
        }

        match class {
            ParameterClass::Arg => node.positionals.push(slot),
            ParameterClass::Opt => node.optionals.push(slot),
        }

        node.specs.push(ArgumentSpec {
            class,
            identifiers: identifiers.iter().map(|i| i.to_string()).collect(),
            cardinality,
            required: false,
            exists: false,
            help: None,
            binding: Box::new(TypedBinding::<T>::new(cardinality.value_kind())),
        });

        Ok(ArgKey {
            node: id,
            slot,
            generation: node.generation,
        })
    }

    pub(crate) fn add_sub_command(&mut self, id: NodeId, name: &str) -> Result<NodeId, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::InvalidIdentifier(name.to_string()));
        }

        if self.child_named(id, name).is_some() {
            return Err(ConfigError::DuplicateSubCommand(name.to_string()));
        }

        let child = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name));
        self.node_mut(id).sub_commands.push(child);
        Ok(child)
    }

    fn child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id)
            .sub_commands
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].name == name)
    }

    pub(crate) fn child_names(&self, id: NodeId) -> Vec<String> {
        self.node(id)
            .sub_commands
            .iter()
            .map(|child| self.nodes[child.0].name.clone())
            .collect()
    }

    pub(crate) fn remove_all_arguments(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        node.specs.clear();
        node.positionals.clear();
        node.optionals.clear();
        node.identifiers.clear();
        node.generation += 1;
    }

    pub(crate) fn remove_sub_commands(&mut self, id: NodeId) {
        let mut pending = std::mem::take(&mut self.node_mut(id).sub_commands);

        while let Some(child) = pending.pop() {
            let node = &mut self.nodes[child.0];
            node.detached = true;
            pending.append(&mut node.sub_commands);
        }
    }

    pub(crate) fn clear(&mut self, id: NodeId) {
        self.remove_all_arguments(id);
        self.remove_sub_commands(id);
    }

    /// Drop every bound value and existence flag reachable from `id`, keeping the registrations.
    pub(crate) fn reset(&mut self, id: NodeId) {
        let mut pending = vec![id];

        while let Some(current) = pending.pop() {
            let node = self.node_mut(current);
            node.exists = false;
            node.specs.iter_mut().for_each(ArgumentSpec::reset);
            pending.extend(node.sub_commands.iter().copied());
        }
    }

    /// Parse `tokens` against the root command, descending into sub-commands as they are found.
    pub(crate) fn parse(&mut self, tokens: &[&str]) -> Result<(), ParseError> {
        let mut current = ROOT;
        let mut first = 0;
        self.node_mut(ROOT).exists = true;

        loop {
            match self.parse_node(current, &tokens[first..])? {
                Some((child, consumed)) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!(
                            "Dispatching to sub-command '{}' at token {}.",
                            self.nodes[child.0].name,
                            first + consumed - 1
                        );
                    }

                    self.node_mut(child).exists = true;
                    current = child;
                    first += consumed;
                }
                None => return Ok(()),
            }
        }
    }

    /// Parse the arguments of one command.
    /// Returns the sub-command to continue with, and the number of tokens consumed including the sub-command token.
    fn parse_node(&mut self, id: NodeId, tokens: &[&str]) -> Result<Option<(NodeId, usize)>, ParseError> {
        // 1. Find the sub-command boundary (anywhere in the remaining tokens).
        let boundary = tokens
            .iter()
            .enumerate()
            .find_map(|(i, token)| self.child_named(id, token).map(|child| (i, child)));
        let end = boundary.map(|(i, _)| i).unwrap_or(tokens.len());
        // Leftovers are an invalid sub-command choice only when there was a choice to make.
        let choices = if boundary.is_none() && !self.node(id).sub_commands.is_empty() {
            Some(self.child_names(id))
        } else {
            None
        };
        let leftovers = |rest: &[&str]| -> ParseError {
            match &choices {
                Some(valid) => ParseError::InvalidChoice {
                    given: rest[0].to_string(),
                    valid: valid.clone(),
                },
                None => ParseError::UnrecognizedArguments {
                    tokens: rest.iter().map(|t| t.to_string()).collect(),
                },
            }
        };

        // 2. Split the positional run from the optional run.
        let split = tokens[..end]
            .iter()
            .position(|token| is_option_like(token, &self.prefix_chars))
            .unwrap_or(end);

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Command '{}': positional run [0, {split}), optional run [{split}, {end}), {} token(s).",
                self.node(id).name,
                tokens.len()
            );
        }

        let prefix_chars = &self.prefix_chars;
        let node = &mut self.nodes[id.0];

        // 3. Distribute & bind the positional run.
        let unconsumed = node.bind_positionals(&tokens[..split])?;

        if unconsumed < split {
            return Err(leftovers(&tokens[unconsumed..split]));
        }

        // 4. Scan the optional run.
        let cursor = node.scan_optionals(&tokens[..end], split, prefix_chars)?;

        if let Some(missing) = node
            .optionals
            .iter()
            .map(|slot| &node.specs[*slot])
            .find(|spec| spec.required && !spec.exists)
        {
            return Err(ParseError::ArgumentRequired {
                argument: missing.info(),
            });
        }

        if cursor < end {
            return Err(leftovers(&tokens[cursor..end]));
        }

        // 5. Hand the remainder to the sub-command.
        Ok(boundary.map(|(i, child)| (child, i + 1)))
    }
}

impl Node {
    /// Bind the positional run, in declaration order.
    /// Returns the offset of the first unconsumed token.
    fn bind_positionals(&mut self, run: &[&str]) -> Result<usize, ParseError> {
        let cardinalities: Vec<Cardinality> = self
            .positionals
            .iter()
            .map(|slot| self.specs[*slot].cardinality)
            .collect();
        let allocation = allocate(&cardinalities, run.len());

        for (slot, assignment) in self.positionals.iter().zip(allocation.assignments.iter()) {
            let spec = &mut self.specs[*slot];
            spec.exists = true;

            if assignment.deficient {
                return Err(ParseError::CardinalityMismatch {
                    argument: spec.info(),
                    actual: assignment.count(),
                });
            }

            for token in &run[assignment.range.clone()] {
                spec.bind(token)?;
            }
        }

        Ok(allocation.unconsumed.start)
    }

    /// Bind the optionals found from `start`, stopping at the first unknown token.
    /// Returns the offset of that token (or the end of `tokens`).
    fn scan_optionals(&mut self, tokens: &[&str], start: usize, prefix_chars: &str) -> Result<usize, ParseError> {
        let mut cursor = start;

        while cursor < tokens.len() {
            let slot = match self.optional_slot(tokens[cursor]) {
                Some(slot) => slot,
                None => break,
            };
            cursor += 1;
            let available = tokens[cursor..]
                .iter()
                .take_while(|token| !is_option_like(token, prefix_chars))
                .count();
            let spec = &mut self.specs[slot];
            let count = count_values(&spec.cardinality, available);
            spec.exists = true;

            if count < spec.cardinality.min() {
                return Err(ParseError::CardinalityMismatch {
                    argument: spec.info(),
                    actual: count,
                });
            }

            for token in &tokens[cursor..cursor + count] {
                spec.bind(token)?;
            }

            cursor += count;
        }

        Ok(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::DEFAULT_PREFIX_CHARS;
    use crate::model::{Nargs, UNBOUNDED};
    use rstest::rstest;

    fn tree() -> ParserTree {
        ParserTree::new("program", DEFAULT_PREFIX_CHARS).unwrap()
    }

    fn nargs(nargs: Nargs) -> Cardinality {
        Cardinality::try_from(nargs).unwrap()
    }

    fn values<T: Convertible>(tree: &ParserTree, key: &ArgKey) -> Vec<T> {
        tree.binding::<T>(key).values().to_vec()
    }

    #[rstest]
    #[case("-o", true)]
    #[case("--opt", true)]
    #[case("/o", true)]
    #[case("-5", false)]
    #[case("-.5", true)]
    #[case("-", false)]
    #[case("o", false)]
    #[case("", false)]
    #[case("+o", false)]
    fn option_like(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_option_like(token, DEFAULT_PREFIX_CHARS), expected);
    }

    #[rstest]
    #[case("")]
    #[case("-1")]
    #[case("1-")]
    fn prefix_chars_invalid(#[case] prefix_chars: &str) {
        assert_matches!(
            ParserTree::new("program", prefix_chars),
            Err(ConfigError::InvalidPrefixChars(_))
        );
    }

    #[test]
    fn add_argument_invalid() {
        let mut tree = tree();
        let one = nargs(Nargs::Precisely(1));

        assert_matches!(
            tree.add_argument::<i32>(ROOT, ParameterClass::Arg, &[""], one),
            Err(ConfigError::InvalidIdentifier(_))
        );
        assert_matches!(
            tree.add_argument::<i32>(ROOT, ParameterClass::Arg, &["--p"], one),
            Err(ConfigError::InvalidIdentifier(_))
        );
        assert_matches!(
            tree.add_argument::<i32>(ROOT, ParameterClass::Opt, &[], one),
            Err(ConfigError::MissingIdentifier)
        );
        assert_matches!(
            tree.add_argument::<i32>(ROOT, ParameterClass::Opt, &["-o", "opt"], one),
            Err(ConfigError::InvalidIdentifier(identifier)) if identifier == "opt"
        );
        assert_matches!(
            tree.add_argument::<i32>(ROOT, ParameterClass::Opt, &["-o", "-o"], one),
            Err(ConfigError::DuplicateIdentifier(identifier)) if identifier == "-o"
        );
        assert!(tree.node(ROOT).specs.is_empty());
    }

    #[test]
    fn add_argument_duplicate() {
        let mut tree = tree();
        let one = nargs(Nargs::Precisely(1));
        tree.add_argument::<i32>(ROOT, ParameterClass::Opt, &["-o", "--opt"], one)
            .unwrap();
        tree.add_argument::<i32>(ROOT, ParameterClass::Arg, &["p"], one)
            .unwrap();

        assert_matches!(
            tree.add_argument::<i32>(ROOT, ParameterClass::Opt, &["--opt"], one),
            Err(ConfigError::DuplicateIdentifier(_))
        );
        assert_matches!(
            tree.add_argument::<String>(ROOT, ParameterClass::Arg, &["p"], one),
            Err(ConfigError::DuplicateIdentifier(_))
        );
    }

    #[test]
    fn add_sub_command_invalid() {
        let mut tree = tree();
        tree.add_sub_command(ROOT, "cmd1").unwrap();

        assert_matches!(
            tree.add_sub_command(ROOT, "cmd1"),
            Err(ConfigError::DuplicateSubCommand(_))
        );
        assert_matches!(
            tree.add_sub_command(ROOT, ""),
            Err(ConfigError::InvalidIdentifier(_))
        );
    }

    #[test]
    fn parse_empty() {
        let mut tree = tree();
        tree.parse(&[]).unwrap();
        assert!(tree.node(ROOT).exists);
    }

    #[test]
    fn parse_positionals() {
        // Setup
        let mut tree = tree();
        let p1 = tree
            .add_argument::<u32>(ROOT, ParameterClass::Arg, &["p1"], nargs(Nargs::Any))
            .unwrap();
        let p2 = tree
            .add_argument::<u32>(ROOT, ParameterClass::Arg, &["p2"], nargs(Nargs::Any))
            .unwrap();
        let p3 = tree
            .add_argument::<u32>(ROOT, ParameterClass::Arg, &["p3"], nargs(Nargs::AtLeastOne))
            .unwrap();

        // Execute
        tree.parse(&["1", "2", "3", "4", "5"]).unwrap();

        // Verify
        assert_eq!(values::<u32>(&tree, &p1), vec![1, 2, 3, 4]);
        assert_eq!(values::<u32>(&tree, &p2), vec![]);
        assert_eq!(values::<u32>(&tree, &p3), vec![5]);
        assert!(tree.spec(&p2).exists);
    }

    #[test]
    fn parse_positionals_deficient() {
        // Setup
        let mut tree = tree();
        for name in ["p1", "p2", "p3"] {
            tree.add_argument::<u32>(ROOT, ParameterClass::Arg, &[name], nargs(Nargs::AtLeastOne))
                .unwrap();
        }

        // Execute
        let error = tree.parse(&["1"]).unwrap_err();

        // Verify
        assert_matches!(
            error,
            ParseError::CardinalityMismatch { argument, actual: 0 } if argument.name == "p2"
        );
    }

    #[test]
    fn parse_positionals_leftover() {
        let mut tree = tree();
        tree.add_argument::<u32>(ROOT, ParameterClass::Arg, &["p"], nargs(Nargs::Optional))
            .unwrap();

        let error = tree.parse(&["1", "2", "3"]).unwrap_err();

        assert_eq!(
            error,
            ParseError::UnrecognizedArguments {
                tokens: vec!["2".to_string(), "3".to_string()]
            }
        );
    }

    #[test]
    fn parse_positionals_leftover_before_optionals() {
        // Setup
        let mut tree = tree();
        tree.add_argument::<String>(ROOT, ParameterClass::Arg, &["p"], nargs(Nargs::Range(2, 3)))
            .unwrap();
        tree.add_argument::<i32>(ROOT, ParameterClass::Opt, &["-o", "--opt"], nargs(Nargs::Precisely(1)))
            .unwrap();
        tree.add_sub_command(ROOT, "cmd1").unwrap();
        tree.add_sub_command(ROOT, "cmd2").unwrap();

        // Execute
        let error = tree
            .parse(&["a", "b", "c", "d", "e", "-o", "10", "cmd1"])
            .unwrap_err();

        // Verify
        assert_eq!(
            error,
            ParseError::UnrecognizedArguments {
                tokens: vec!["d".to_string(), "e".to_string()]
            }
        );
    }

    #[test]
    fn parse_negative_positional() {
        let mut tree = tree();
        let p = tree
            .add_argument::<i32>(ROOT, ParameterClass::Arg, &["p"], nargs(Nargs::AtLeastOne))
            .unwrap();

        tree.parse(&["-5", "3", "-1"]).unwrap();

        assert_eq!(values::<i32>(&tree, &p), vec![-5, 3, -1]);
    }

    #[test]
    fn parse_optionals() {
        // Setup
        let mut tree = tree();
        let flag = tree
            .add_argument::<bool>(ROOT, ParameterClass::Opt, &["-f", "--flag"], nargs(Nargs::Precisely(0)))
            .unwrap();
        let many = tree
            .add_argument::<i32>(ROOT, ParameterClass::Opt, &["-m"], nargs(Nargs::Any))
            .unwrap();
        let unused = tree
            .add_argument::<i32>(ROOT, ParameterClass::Opt, &["-u"], nargs(Nargs::Optional))
            .unwrap();

        // Execute
        tree.parse(&["-m", "1", "-2", "3", "--flag"]).unwrap();

        // Verify
        assert!(tree.spec(&flag).exists);
        assert!(!tree.binding::<bool>(&flag).has_value());
        assert_eq!(values::<i32>(&tree, &many), vec![1, -2, 3]);
        assert!(!tree.spec(&unused).exists);
    }

    #[test]
    fn parse_optional_repeated() {
        let mut tree = tree();
        let scalar = tree
            .add_argument::<i32>(ROOT, ParameterClass::Opt, &["-s"], nargs(Nargs::Precisely(1)))
            .unwrap();
        let sequence = tree
            .add_argument::<i32>(ROOT, ParameterClass::Opt, &["-q"], nargs(Nargs::AtLeastOne))
            .unwrap();

        tree.parse(&["-s", "1", "-q", "1", "-s", "2", "-q", "2"])
            .unwrap();

        assert_eq!(values::<i32>(&tree, &scalar), vec![2]);
        assert_eq!(values::<i32>(&tree, &sequence), vec![1, 2]);
    }

    #[test]
    fn parse_optional_deficient() {
        let mut tree = tree();
        tree.add_argument::<i32>(ROOT, ParameterClass::Opt, &["-o"], nargs(Nargs::Precisely(2)))
            .unwrap();

        let error = tree.parse(&["-o", "1", "--other"]).unwrap_err();

        assert_matches!(
            error,
            ParseError::CardinalityMismatch { argument, actual: 1 } if argument.name == "-o"
        );
    }

    #[test]
    fn parse_optional_unknown() {
        let mut tree = tree();
        tree.add_argument::<i32>(ROOT, ParameterClass::Opt, &["-o"], nargs(Nargs::Precisely(1)))
            .unwrap();

        let error = tree.parse(&["-o", "1", "--other", "2"]).unwrap_err();

        assert_eq!(
            error,
            ParseError::UnrecognizedArguments {
                tokens: vec!["--other".to_string(), "2".to_string()]
            }
        );
    }

    #[test]
    fn parse_required() {
        // Setup
        let mut tree = tree();
        let key = tree
            .add_argument::<i32>(ROOT, ParameterClass::Opt, &["--req"], nargs(Nargs::Optional))
            .unwrap();
        tree.spec_mut(&key).required = true;

        // Execute
        let error = tree.parse(&[]).unwrap_err();

        // Verify
        assert_matches!(
            error,
            ParseError::ArgumentRequired { argument } if argument.name == "--req"
        );

        tree.reset(ROOT);
        tree.parse(&["--req"]).unwrap();
        assert!(tree.spec(&key).exists);
    }

    #[test]
    fn parse_sub_command() {
        // Setup
        let mut tree = tree();
        let p = tree
            .add_argument::<String>(ROOT, ParameterClass::Arg, &["p"], nargs(Nargs::Any))
            .unwrap();
        let cmd1 = tree.add_sub_command(ROOT, "cmd1").unwrap();
        let cmd2 = tree.add_sub_command(ROOT, "cmd2").unwrap();
        let q = tree
            .add_argument::<String>(cmd1, ParameterClass::Arg, &["q"], nargs(Nargs::Any))
            .unwrap();

        // Execute
        tree.parse(&["a", "b", "cmd1", "c", "cmd2"]).unwrap();

        // Verify
        assert_eq!(values::<String>(&tree, &p), vec!["a", "b"]);
        assert_eq!(values::<String>(&tree, &q), vec!["c", "cmd2"]);
        assert!(tree.node(cmd1).exists);
        assert!(!tree.node(cmd2).exists);
    }

    #[test]
    fn parse_invalid_choice() {
        let mut tree = tree();
        tree.add_argument::<String>(ROOT, ParameterClass::Arg, &["p"], nargs(Nargs::Precisely(1)))
            .unwrap();
        tree.add_sub_command(ROOT, "cmd1").unwrap();
        tree.add_sub_command(ROOT, "cmd2").unwrap();

        let error = tree.parse(&["a", "wrongCmd"]).unwrap_err();

        assert_eq!(
            error,
            ParseError::InvalidChoice {
                given: "wrongCmd".to_string(),
                valid: vec!["cmd1".to_string(), "cmd2".to_string()],
            }
        );
    }

    #[test]
    fn parse_sub_command_error() {
        let mut tree = tree();
        let cmd = tree.add_sub_command(ROOT, "cmd").unwrap();
        tree.add_argument::<u8>(cmd, ParameterClass::Arg, &["n"], nargs(Nargs::Precisely(1)))
            .unwrap();

        let error = tree.parse(&["cmd", "300"]).unwrap_err();

        assert_matches!(
            error,
            ParseError::OutOfRange { argument, token, lo, hi }
                if argument.name == "n" && token == "300" && lo == "0" && hi == "255"
        );
    }

    #[test]
    fn reset() {
        // Setup
        let mut tree = tree();
        let p = tree
            .add_argument::<u32>(ROOT, ParameterClass::Arg, &["p"], nargs(Nargs::Range(1, UNBOUNDED)))
            .unwrap();
        let cmd = tree.add_sub_command(ROOT, "cmd").unwrap();
        let o = tree
            .add_argument::<u32>(cmd, ParameterClass::Opt, &["-o"], nargs(Nargs::Precisely(1)))
            .unwrap();
        tree.parse(&["1", "2", "cmd", "-o", "3"]).unwrap();

        // Execute
        tree.reset(ROOT);

        // Verify
        assert!(!tree.node(ROOT).exists);
        assert!(!tree.node(cmd).exists);
        assert!(!tree.spec(&p).exists);
        assert!(!tree.spec(&o).exists);
        assert!(!tree.binding::<u32>(&p).has_value());
        assert!(!tree.binding::<u32>(&o).has_value());

        tree.parse(&["1", "2", "cmd", "-o", "3"]).unwrap();
        assert_eq!(values::<u32>(&tree, &p), vec![1, 2]);
        assert_eq!(values::<u32>(&tree, &o), vec![3]);
    }

    #[test]
    fn remove_all_arguments() {
        let mut tree = tree();
        tree.add_argument::<u32>(ROOT, ParameterClass::Arg, &["p"], nargs(Nargs::Any))
            .unwrap();

        tree.remove_all_arguments(ROOT);

        assert!(tree.node(ROOT).specs.is_empty());
        tree.add_argument::<u32>(ROOT, ParameterClass::Arg, &["p"], nargs(Nargs::Any))
            .unwrap();
    }

    #[test]
    #[should_panic(expected = "stale argument handle")]
    fn stale_argument() {
        let mut tree = tree();
        let key = tree
            .add_argument::<u32>(ROOT, ParameterClass::Arg, &["p"], nargs(Nargs::Any))
            .unwrap();
        tree.clear(ROOT);

        tree.spec(&key);
    }

    #[test]
    #[should_panic(expected = "stale command handle")]
    fn stale_command() {
        let mut tree = tree();
        let cmd = tree.add_sub_command(ROOT, "cmd").unwrap();
        let nested = tree.add_sub_command(cmd, "nested").unwrap();
        tree.remove_sub_commands(ROOT);

        tree.node(nested);
    }
}
