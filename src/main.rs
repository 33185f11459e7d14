fn main() {
    // Diagnostics go to stderr; stdout carries only UCI protocol output.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    cobalt::uci::run_uci_loop();
}
