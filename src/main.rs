fn main() {
    if let Err(err) = kwebbel::cli::main() {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
