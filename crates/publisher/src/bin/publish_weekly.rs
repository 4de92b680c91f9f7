use std::process::ExitCode;

fn main() -> ExitCode {
    swingsignal_publisher::run(&swingsignal_publisher::WEEKLY)
}
