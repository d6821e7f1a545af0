#![forbid(unsafe_code)]

fn main() {
    std::process::exit(range_list_cli::run());
}
