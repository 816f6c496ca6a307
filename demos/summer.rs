use argbind::{ArgumentParser, Nargs};

fn main() {
    let mut ap = ArgumentParser::new("summer").about("Sums the items.");
    let items = ap
        .add_positional::<u32>("items", Nargs::AtLeastOne)
        .expect("Invalid argument parser configuration");
    ap.arg_mut(items).help("The items to sum.");

    ap.parse();
    let sum: u32 = ap.get(items).values().iter().sum();
    println!("Sum: {sum}");
}
