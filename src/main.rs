use std::process::ExitCode;

fn main() -> ExitCode {
    workout_mailer_lib::run()
}
