use crate::api::capture::Convertible;
use crate::api::parameter::*;
use crate::constant::*;
use crate::model::{Cardinality, Nargs};
use crate::parser::{
    split_command_line, ConfigError, ConsoleInterface, Node, NodeId, ParameterClass, ParseError,
    ParserTree, Printer, UserInterface, ROOT,
};

/// The argument parser: the root command, its arguments and its sub-commands.
///
/// Registration returns typed handles ([`Arg`], [`Command`]), which resolve against the parser once it has parsed.
///
/// ### Example
/// ```
/// # use argbind_builder as argbind;
/// use argbind::{ArgumentParser, Nargs};
///
/// let mut ap = ArgumentParser::new("program");
/// let items = ap.add_positional::<u32>("items", Nargs::AtLeastOne).unwrap();
/// let verbose = ap.add_optional::<bool>(&["-v", "--verbose"], Nargs::Precisely(0)).unwrap();
///
/// ap.parse_tokens(&["1", "2", "-v"]).unwrap();
///
/// assert_eq!(ap.get(items).values(), &[1, 2]);
/// assert!(ap.get(verbose).exists());
/// ```
pub struct ArgumentParser {
    tree: ParserTree,
    about: Option<String>,
    user_interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for ArgumentParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentParser")
            .field("program", &self.tree.node(ROOT).name)
            .field("about", &self.about)
            .finish()
    }
}

impl ArgumentParser {
    /// Create an argument parser, with the prefix characters `-` and `/`.
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_prefix_chars(program, DEFAULT_PREFIX_CHARS)
            .expect("internal error - the default prefix characters must be valid")
    }

    /// Create an argument parser which recognizes options by the `prefix_chars`.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::ArgumentParser;
    ///
    /// assert!(ArgumentParser::with_prefix_chars("program", "+").is_ok());
    /// assert!(ArgumentParser::with_prefix_chars("program", "").is_err());
    /// ```
    pub fn with_prefix_chars(
        program: impl Into<String>,
        prefix_chars: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            tree: ParserTree::new(program, prefix_chars)?,
            about: None,
            user_interface: Box::new(ConsoleInterface::default()),
        })
    }

    #[cfg(test)]
    pub(crate) fn set_interface(&mut self, user_interface: Box<dyn UserInterface>) {
        self.user_interface = user_interface;
    }

    /// Document the about message for this parser.
    /// If repeated, only the final message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add a positional argument to the root command.
    /// The order of positionals corresponds to their order during parsing.
    pub fn add_positional<T: Convertible>(
        &mut self,
        name: &str,
        nargs: Nargs,
    ) -> Result<Arg<T>, ConfigError> {
        self.root_mut().add_positional(name, nargs)
    }

    /// Add an optional argument to the root command, recognized by any of its `identifiers`.
    pub fn add_optional<T: Convertible>(
        &mut self,
        identifiers: &[&str],
        nargs: Nargs,
    ) -> Result<Arg<T>, ConfigError> {
        self.root_mut().add_optional(identifiers, nargs)
    }

    /// Add a sub-command to the root command.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{ArgumentParser, Nargs};
    ///
    /// let mut ap = ArgumentParser::new("program");
    /// let build = ap.add_sub_command("build").unwrap();
    /// let release = ap
    ///     .sub_command_mut(build)
    ///     .add_optional::<bool>(&["--release"], Nargs::Precisely(0))
    ///     .unwrap();
    ///
    /// ap.parse_tokens(&["build", "--release"]).unwrap();
    ///
    /// assert!(ap.sub_command(build).exists());
    /// assert!(ap.get(release).exists());
    /// ```
    pub fn add_sub_command(&mut self, name: &str) -> Result<Command, ConfigError> {
        self.root_mut().add_sub_command(name)
    }

    /// Configure the root command.
    pub fn root_mut(&mut self) -> CommandMut<'_> {
        CommandMut {
            tree: &mut self.tree,
            id: ROOT,
        }
    }

    /// Configure a sub-command.
    pub fn sub_command_mut(&mut self, command: Command) -> CommandMut<'_> {
        self.tree.node(command.0);
        CommandMut {
            tree: &mut self.tree,
            id: command.0,
        }
    }

    /// Inspect a sub-command.
    pub fn sub_command(&self, command: Command) -> CommandRef<'_> {
        CommandRef {
            node: self.tree.node(command.0),
        }
    }

    /// Inspect an argument and its bound values.
    pub fn get<T: Convertible>(&self, arg: Arg<T>) -> ArgRef<'_, T> {
        ArgRef::new(&self.tree, &arg)
    }

    /// Configure an argument.
    pub fn arg_mut<T: Convertible>(&mut self, arg: Arg<T>) -> ArgMut<'_, T> {
        ArgMut::new(&mut self.tree, &arg)
    }

    /// Parse the `tokens`, binding values into the registered arguments.
    ///
    /// Values accumulate across parses; call [`reset`](Self::reset) before parsing again.
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<(), ParseError> {
        self.tree.parse(tokens)
    }

    /// Parse owned tokens, such as those of [`std::env::args`].
    pub fn parse_args<I, S>(&mut self, args: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let tokens: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
        self.parse_tokens(&tokens)
    }

    /// Split the `command_line` (see [`split_command_line`]) and parse the result.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{ArgumentParser, Nargs};
    ///
    /// let mut ap = ArgumentParser::new("program");
    /// let names = ap.add_positional::<String>("names", Nargs::Any).unwrap();
    ///
    /// ap.parse_cmd_line(r#"alice "bob smith""#).unwrap();
    ///
    /// assert_eq!(ap.get(names).values(), &["alice", "bob smith"]);
    /// ```
    pub fn parse_cmd_line(&mut self, command_line: &str) -> Result<(), ParseError> {
        self.parse_args(split_command_line(command_line))
    }

    /// Parse the `tokens`, printing the usage and the error on failure.
    /// The error is the exit code for the process.
    pub fn run_tokens(&mut self, tokens: &[&str]) -> Result<(), i32> {
        match self.parse_tokens(tokens) {
            Ok(()) => Ok(()),
            Err(error) => {
                self.user_interface.print(self.usage());
                self.user_interface.print_error(error);
                Err(EXIT_FAILURE)
            }
        }
    }

    /// Parse the Cli arguments of this process (see [`std::env::args`], skipping the program name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn parse(&mut self) {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let tokens: Vec<&str> = args.iter().map(|arg| arg.as_str()).collect();

        if let Err(exit_code) = self.run_tokens(&tokens) {
            std::process::exit(exit_code);
        }
    }

    /// Clear every bound value and existence flag, keeping the registrations.
    pub fn reset(&mut self) {
        self.tree.reset(ROOT);
    }

    /// Remove every argument and sub-command; outstanding handles become stale.
    pub fn clear(&mut self) {
        self.root_mut().clear();
    }

    /// Remove every argument of the root command; outstanding handles of those arguments become stale.
    pub fn remove_all_arguments(&mut self) {
        self.root_mut().remove_all_arguments();
    }

    /// Remove every sub-command; outstanding handles of those sub-commands become stale.
    pub fn remove_sub_commands(&mut self) {
        self.root_mut().remove_sub_commands();
    }

    /// The single line usage of the root command.
    pub fn usage(&self) -> String {
        Printer::terminal().usage(&self.tree, ROOT)
    }

    /// The help message, optionally nesting the help of every sub-command.
    pub fn help(&self, recursive: bool) -> String {
        Printer::terminal().help(&self.tree, ROOT, self.about.as_deref(), recursive)
    }

    /// Print the help message.
    pub fn print_help(&self, recursive: bool) {
        self.user_interface.print(self.help(recursive));
    }
}

/// A handle to a registered sub-command.
///
/// A handle becomes stale once the sub-command is removed; resolving a stale handle panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command(NodeId);

/// A read-only view of a sub-command.
#[derive(Debug)]
pub struct CommandRef<'p> {
    node: &'p Node,
}

impl<'p> CommandRef<'p> {
    /// Whether the sub-command was selected during the last parse.
    pub fn exists(&self) -> bool {
        self.node.exists
    }

    /// The name of the sub-command.
    pub fn name(&self) -> &'p str {
        &self.node.name
    }

    /// The help message, if any.
    pub fn help(&self) -> Option<&'p str> {
        self.node.help.as_deref()
    }
}

/// A mutable view of a command (the root command, or a sub-command), for registration.
#[derive(Debug)]
pub struct CommandMut<'p> {
    tree: &'p mut ParserTree,
    id: NodeId,
}

impl<'p> CommandMut<'p> {
    /// The handle of this command.
    pub fn command(&self) -> Command {
        Command(self.id)
    }

    /// Document the command in the help message of its parent.
    pub fn help(self, description: impl Into<String>) -> Self {
        self.tree.node_mut(self.id).help = Some(description.into());
        self
    }

    /// Add a positional argument.
    /// The order of positionals corresponds to their order during parsing.
    pub fn add_positional<T: Convertible>(
        &mut self,
        name: &str,
        nargs: Nargs,
    ) -> Result<Arg<T>, ConfigError> {
        let cardinality = Cardinality::try_from(nargs)?;
        let key = self
            .tree
            .add_argument::<T>(self.id, ParameterClass::Arg, &[name], cardinality)?;
        Ok(Arg::new(key))
    }

    /// Add an optional argument, recognized by any of its `identifiers`.
    pub fn add_optional<T: Convertible>(
        &mut self,
        identifiers: &[&str],
        nargs: Nargs,
    ) -> Result<Arg<T>, ConfigError> {
        let cardinality = Cardinality::try_from(nargs)?;
        let key = self
            .tree
            .add_argument::<T>(self.id, ParameterClass::Opt, identifiers, cardinality)?;
        Ok(Arg::new(key))
    }

    /// Add a nested sub-command.
    pub fn add_sub_command(&mut self, name: &str) -> Result<Command, ConfigError> {
        self.tree.add_sub_command(self.id, name).map(Command)
    }

    /// Remove every argument of this command.
    pub fn remove_all_arguments(&mut self) {
        self.tree.remove_all_arguments(self.id);
    }

    /// Remove every sub-command of this command.
    pub fn remove_sub_commands(&mut self) {
        self.tree.remove_sub_commands(self.id);
    }

    /// Remove every argument and sub-command of this command.
    pub fn clear(&mut self) {
        self.tree.clear(self.id);
    }
}
