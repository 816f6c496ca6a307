use argbind::{ArgumentParser, Nargs};

fn main() {
    let mut ap = ArgumentParser::new("constraints");
    let level = ap
        .add_optional::<u8>(&["-l", "--level"], Nargs::Precisely(1))
        .expect("Invalid argument parser configuration");
    ap.arg_mut(level)
        .set_required(true)
        .help("The level, between 1 and 5.")
        .set_range(1, 5)
        .expect("Invalid argument parser configuration");
    let name = ap
        .add_positional::<String>("name", Nargs::Precisely(1))
        .expect("Invalid argument parser configuration");
    ap.arg_mut(name)
        .help("A name of at most 8 characters.")
        .set_length_range(1, 8)
        .expect("Invalid argument parser configuration");
    let scale = ap
        .add_optional::<f64>(&["--scale"], Nargs::Optional)
        .expect("Invalid argument parser configuration");
    ap.arg_mut(scale)
        .set_range(0.0, 1.0)
        .expect("Invalid argument parser configuration");

    ap.parse();

    let level = ap.get(level).value().copied().unwrap_or_default();
    let scale = ap.get(scale).value().copied().unwrap_or(1.0);
    println!(
        "{}: level {level}, scaled {}",
        ap.get(name).values().join(""),
        f64::from(level) * scale
    );
}
