/// Split a command line into tokens.
///
/// Tokens are separated by unquoted whitespace (runs of whitespace collapse).
/// A `"` toggles quoting and is itself dropped, so adjacent quoted and unquoted text join into one token.
///
/// ### Example
/// ```
/// # use argbind_builder as argbind;
/// use argbind::split_command_line;
///
/// assert_eq!(
///     split_command_line(r#"run "a b" c"#),
///     vec!["run", "a b", "c"]
/// );
/// ```
pub fn split_command_line(command_line: &str) -> Vec<String> {
    let mut tokens = Vec::default();
    let mut current = String::default();
    let mut quoted = false;
    // Distinguishes an empty quoted token ("") from no token at all.
    let mut started = false;

    for c in command_line.chars() {
        if c == '"' {
            quoted = !quoted;
            started = true;
        } else if c.is_whitespace() && !quoted {
            if started {
                tokens.push(std::mem::take(&mut current));
                started = false;
            }
        } else {
            current.push(c);
            started = true;
        }
    }

    if started {
        tokens.push(current);
    }

    tokens
}
