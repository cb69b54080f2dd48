fn main() {
  if let Err(e) = maternal_log_lib::run() {
    eprintln!("{}", e);
    std::process::exit(1);
  }
}
