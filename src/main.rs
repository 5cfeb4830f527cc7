fn main() {
    if let Err(error) = markupkit::init_logging() {
        eprintln!("{error:#}");
    }
    if let Err(error) = markupkit::cli::run(std::env::args_os()) {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}
