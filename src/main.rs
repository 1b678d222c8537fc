//! CLI entry point for logbook.

mod cli;
mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io;
use std::process::ExitCode;

use cli::{CalcCommands, Cli, Commands};
use cmd::ui::{Output, OutputMode};

fn init_tracing(verbose: bool) {
    let default = if verbose { "logbook=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let out = Output::new(OutputMode::from_flags(cli.json, cli.quiet));

    match run(cli, &out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let tag = e
                .downcast_ref::<logbook::Error>()
                .map(logbook::Error::tag)
                .unwrap_or("error");
            out.error(tag, &format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, out: &Output) -> Result<()> {
    let user = cli.user.as_deref();

    match cli.command {
        Commands::Init { site, name, force } => cmd::init::cmd_init(out, &site, name, force),
        Commands::Calc { command } => match command {
            CalcCommands::Chemical {
                chemical,
                stock,
                target,
                volume,
            } => cmd::calc::cmd_calc_chemical(out, chemical.as_deref(), stock, target, volume),
            CalcCommands::Air(args) => cmd::calc::cmd_calc_air(out, &args),
        },
        Commands::Completion { shell } => {
            let mut app = Cli::command();
            generate(shell, &mut app, "logbook", &mut io::stdout());
            Ok(())
        }
        Commands::Log { command } => {
            cmd::log::cmd_log(out, &cmd::open_workspace()?, user, &command)
        }
        Commands::Recompute(args) => {
            cmd::review::cmd_recompute(out, &cmd::open_workspace()?, user, &args)
        }
        Commands::Submit { id } => cmd::review::cmd_submit(out, &cmd::open_workspace()?, user, &id),
        Commands::Approve { id, remarks } => cmd::review::cmd_approve(
            out,
            &cmd::open_workspace()?,
            user,
            &id,
            remarks.as_deref(),
        ),
        Commands::Reject { id, remarks } => {
            cmd::review::cmd_reject(out, &cmd::open_workspace()?, user, &id, &remarks)
        }
        Commands::List {
            status,
            kind,
            report_type,
            search,
        } => cmd::query::cmd_list(
            out,
            &cmd::open_workspace()?,
            user,
            status,
            kind,
            report_type,
            search,
        ),
        Commands::Show { id } => cmd::query::cmd_show(out, &cmd::open_workspace()?, user, &id),
        Commands::Summary => cmd::query::cmd_summary(out, &cmd::open_workspace()?, user),
        Commands::Instruments => cmd::site::cmd_instruments(out, &cmd::open_workspace()?, user),
        Commands::Users => cmd::site::cmd_users(out, &cmd::open_workspace()?, user),
        Commands::Routes => cmd::site::cmd_routes(out, &cmd::open_workspace()?, user),
    }
}
