//! Command handlers

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;
use std::rc::Rc;

use log::info;

use crate::cli::{Cli, Commands, SessionArgs};
use crate::output::Printer;
use crate::shell::{RunOptions, Shell};
use parking_app::app::ParkingService;
use parking_app::config::Config;
use parking_domain::{Clock, ManualClock, SystemClock};
use parking_types::{Error, OutputFormat, Result};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config_path = match cli.config_file {
        Some(ref path) => path.clone(),
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    let output_format = cli.format.unwrap_or(config.output_format);
    let currency = cli
        .currency
        .clone()
        .unwrap_or_else(|| config.currency_symbol.clone());
    let printer = Printer::new(output_format, currency);

    match cli.command {
        None => cmd_shell(&config, &SessionArgs::default(), printer),
        Some(Commands::Shell { ref session }) => cmd_shell(&config, session, printer),
        Some(Commands::Run {
            ref script,
            ref session,
            keep_going,
            manual_clock,
        }) => cmd_run(&config, session, printer, script, keep_going, manual_clock),
        Some(Commands::Config {
            show,
            set_rate,
            set_spaces,
            set_output,
            ref set_currency,
        }) => cmd_config(
            &mut config,
            &config_path,
            show,
            set_rate,
            set_spaces,
            set_output,
            set_currency.clone(),
        ),
    }
}

/// Build a session from config values overridden by command-line values
fn build_service(config: &Config, session: &SessionArgs, clock: Box<dyn Clock>) -> Result<ParkingService> {
    let mut effective = config.clone();
    if let Some(rate) = session.rate {
        effective.hourly_rate = rate;
    }
    if let Some(spaces) = session.spaces {
        effective.total_spaces = spaces;
    }
    let service = ParkingService::from_config(&effective, clock)?;
    info!(
        "session started: rate {}, {} spaces",
        service.hourly_rate(),
        service.total_spaces()
    );
    Ok(service)
}

fn cmd_shell(config: &Config, session: &SessionArgs, printer: Printer) -> Result<()> {
    let service = build_service(config, session, Box::new(SystemClock))?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut shell = Shell::new(service, None, printer, io::stdout());

    if interactive {
        println!("Parking Management System (type \"help\" for commands)");
    }
    shell.run(
        stdin.lock(),
        RunOptions {
            prompt: interactive,
            stop_on_error: false,
        },
    )
}

fn cmd_run(
    config: &Config,
    session: &SessionArgs,
    printer: Printer,
    script: &Path,
    keep_going: bool,
    manual_clock: bool,
) -> Result<()> {
    let file = File::open(script)
        .map_err(|e| Error::Command(format!("cannot open {}: {}", script.display(), e)))?;

    let (clock, shared): (Box<dyn Clock>, Option<Rc<ManualClock>>) = if manual_clock {
        let shared = Rc::new(ManualClock::starting_now());
        (Box::new(Rc::clone(&shared)), Some(shared))
    } else {
        (Box::new(SystemClock), None)
    };

    let service = build_service(config, session, clock)?;
    let mut shell = Shell::new(service, shared, printer, io::stdout());
    shell.run(
        BufReader::new(file),
        RunOptions {
            prompt: false,
            stop_on_error: !keep_going,
        },
    )
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    config: &mut Config,
    config_path: &Path,
    show: bool,
    set_rate: Option<f64>,
    set_spaces: Option<u32>,
    set_output: Option<OutputFormat>,
    set_currency: Option<String>,
) -> Result<()> {
    let mut modified = false;

    if let Some(rate) = set_rate {
        config.hourly_rate = rate;
        modified = true;
    }

    if let Some(spaces) = set_spaces {
        config.total_spaces = spaces;
        modified = true;
    }

    if let Some(format) = set_output {
        config.output_format = format;
        modified = true;
    }

    if let Some(currency) = set_currency {
        config.currency_symbol = currency;
        modified = true;
    }

    if modified {
        config.save_to(config_path)?;
        println!("Configuration saved to {}", config_path.display());
    }

    if show || !modified {
        println!("{}", config);
        println!("Config file:    {}", config_path.display());
    }

    Ok(())
}
