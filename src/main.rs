fn main() {
    if let Err(err) = permcsv::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
