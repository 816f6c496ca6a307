use argbind::{ArgumentParser, Nargs};

fn main() {
    let mut ap = ArgumentParser::new("sub-command");
    let verbose = ap
        .add_optional::<bool>(&["-v", "--verbose"], Nargs::Precisely(0))
        .expect("Invalid argument parser configuration");

    let add = ap
        .add_sub_command("add")
        .expect("Invalid argument parser configuration");
    let mut add_mut = ap.sub_command_mut(add).help("Add the values.");
    let values = add_mut
        .add_positional::<i64>("values", Nargs::Any)
        .expect("Invalid argument parser configuration");

    let echo = ap
        .add_sub_command("echo")
        .expect("Invalid argument parser configuration");
    let mut echo_mut = ap.sub_command_mut(echo).help("Echo the words.");
    let words = echo_mut
        .add_positional::<String>("words", Nargs::AtLeastOne)
        .expect("Invalid argument parser configuration");
    let upper = echo_mut
        .add_optional::<bool>(&["--upper"], Nargs::Precisely(0))
        .expect("Invalid argument parser configuration");

    ap.parse();

    if ap.get(verbose).exists() {
        println!("{}", ap.help(true));
    }

    if ap.sub_command(add).exists() {
        let total: i64 = ap.get(values).values().iter().sum();
        println!("{total}");
    } else if ap.sub_command(echo).exists() {
        let line = ap.get(words).values().join(" ");

        if ap.get(upper).exists() {
            println!("{}", line.to_uppercase());
        } else {
            println!("{line}");
        }
    } else {
        println!("{}", ap.usage());
    }
}
