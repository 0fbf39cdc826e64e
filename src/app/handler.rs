use {
    crate::app::runner::{ProbeRunner, RunReport},
    crate::libs::config::{load_env, Config},
    crate::libs::sol::HeliusClient,
    crate::libs::writing::{cc, Printer},
    crate::log,
    anyhow::Result,
    std::process::ExitCode,
};

/// Process entry: env, config, one full run. Diagnostics go to stdout.
pub async fn init() -> Result<ExitCode> {
    load_env();
    let cfg = Config::from_env()?;
    let client = HeliusClient::new(&cfg)?;

    let mut runner = ProbeRunner::new(client, &cfg, Printer::stdout(cfg.color));
    let report = runner.run().await;
    log!(cc::CYAN, "run finished in state {:?}", runner.state());

    Ok(exit_code(&report, cfg.strict_exit))
}

/// Always 0 unless strict mode asks for failures to surface.
pub fn exit_code(report: &RunReport, strict: bool) -> ExitCode {
    if strict && !report.succeeded() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
