use atty::Stream;
use b2w_core::{self, CommandStatus, Config, ExecutionOutcome};
use clap::Parser;
use color_eyre::Result;

mod cli;
mod style;

use cli::B2wCli;
use style::Style;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = B2wCli::parse();
    init_tracing(cli.trace, cli.verbose);

    let config = Config::from_env();
    let request = cli.wrap_request();
    let outcome = b2w_core::wrap_binary(&config, &request);
    let code = emit_output(&cli, &outcome)?;

    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code);
    }
}

fn init_tracing(trace: bool, verbose: u8) {
    let level = if trace {
        "trace"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = format!("bin_to_wheel={level},b2w_core={level},b2w_domain={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn emit_output(cli: &B2wCli, outcome: &ExecutionOutcome) -> Result<i32> {
    let code = outcome.exit_code();

    if cli.json {
        let payload = b2w_core::to_json_response(outcome);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(code);
    }

    let message = b2w_core::format_status_message(&outcome.message);
    if outcome.status == CommandStatus::Ok {
        if !cli.quiet {
            let style = Style::new(cli.no_color, atty::is(Stream::Stdout));
            println!("{}", style.status(outcome.status, &message));
        }
    } else {
        let style = Style::new(cli.no_color, atty::is(Stream::Stderr));
        eprintln!("{}", style.status(outcome.status, &message));
        if let Some(hint) = outcome.hint() {
            eprintln!("{}", style.hint(hint));
        }
    }

    Ok(code)
}
