use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use parmsets_cli::cli_args::Args;
use parmsets_cli::declarations::{get_declarations, ProgramDeclaration};
use parmsets_cli::error::Result;
use parmsets_cli::prompt::TerminalPrompter;
use parmsets_cli::{config, help, report, suggest};
use parmsets_core::{ErrorKind, HelpRequest, Parameters, Resolution};

fn print_help(request: HelpRequest, declaration: &ProgramDeclaration, parameters: &Parameters, padding: usize) {
    if request.is_detailed() {
        print!("{}", help::detailed_help(declaration, parameters));
    } else {
        print!("{}", help::usage_string(declaration, parameters, padding));
    }
}

/// Prints a resolution failure with whatever hints apply to it.
fn report_failure(error: &parmsets_core::Error, parameters: &Parameters) {
    eprintln!("{error}");
    if let Some(hint) = suggest::did_you_mean(error, parameters) {
        eprintln!("{hint}");
    }
    if !matches!(error.kind(), ErrorKind::NoMatchingSet | ErrorKind::AbortedInput) {
        eprintln!("Use '-?' for help.");
    }
}

fn execute() -> Result<ExitCode> {
    let args = Args::parse();

    let declarations_path = config::get_declarations_path(&args.declarations);
    debug!("Declarations path: `{}`", declarations_path);

    let declaration = get_declarations(&declarations_path)?;
    let parameters = declaration.build_parameters()?;

    let mut prompter = TerminalPrompter;
    let resolution = match parameters.resolve_with(args.tokens.as_slice(), &mut prompter) {
        Ok(resolution) => resolution,
        Err(error) => {
            report_failure(&error, &parameters);
            return Ok(ExitCode::FAILURE);
        }
    };

    match resolution {
        Resolution::Help(request) => {
            info!("Help requested: {:?}", request);
            print_help(request, &declaration, &parameters, args.padding);
        }
        Resolution::Version => println!("{}", help::version_string(&declaration)),
        Resolution::Bound(bound) => print!("{}", report::report(&bound)),
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            if let Some(error) = e.resolution() {
                debug!("Declarations rejected: {:?}", error.kind());
            }
            ExitCode::FAILURE
        }
    }
}
