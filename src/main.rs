fn main() -> std::process::ExitCode {
    game_feed::run()
}
