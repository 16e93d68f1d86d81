use std::process::ExitCode;

fn main() -> ExitCode {
    agent_studio_cli::cli::cli_main()
}
