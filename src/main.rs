fn main() {
    if let Err(err) = nps_card_renderer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
