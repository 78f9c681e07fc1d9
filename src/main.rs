use std::process::ExitCode;

fn main() -> ExitCode {
    // `.env` may carry RUST_LOG; load it before the logger reads the environment.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match bias_map::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
