use std::io;

use clap::{CommandFactory, FromArgMatches};
use clap_complete::generate;

use poolq::client::commands::pool::{command_pool_info, exit_code};
use poolq::client::globalsettings::GlobalSettings;
use poolq::client::output::cli::CliOutput;
use poolq::client::output::json::JsonOutput;
use poolq::client::output::outputs::{Output, Outputs};
use poolq::client::output::quiet::Quiet;
use poolq::common::cli::{
    CommonOpts, GenerateCompletionOpts, PoolCommand, PoolOpts, RootOptions, SubCommand,
};
use poolq::common::config::ClientConfig;
use poolq::common::setup::setup_logging;
use vmobj::InventoryScope;

fn make_printer(output_mode: &Outputs) -> Box<dyn Output> {
    match output_mode {
        Outputs::CLI => Box::<CliOutput>::default(),
        Outputs::JSON => Box::<JsonOutput>::default(),
        Outputs::Quiet => Box::<Quiet>::default(),
    }
}

fn make_global_settings(opts: CommonOpts) -> anyhow::Result<GlobalSettings> {
    let config = ClientConfig::load_explicit_or_default(opts.config.as_deref())?
        .merge(opts.inventory, opts.datacenter);
    log::debug!("Using client configuration {config:?}");

    Ok(GlobalSettings::new(
        config.inventory,
        InventoryScope::new(config.datacenter),
        make_printer(&opts.output_mode),
    ))
}

fn generate_completion(opts: GenerateCompletionOpts) -> anyhow::Result<()> {
    let generator = opts.shell;

    let mut app = RootOptions::command();
    eprintln!("Generating completion file for {generator}...");
    generate(generator, &mut app, "poolq".to_string(), &mut io::stdout());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = RootOptions::command().get_matches();
    let top_opts = match RootOptions::from_arg_matches(&matches) {
        Ok(opts) => opts,
        Err(error) => error.exit(),
    };

    setup_logging(top_opts.common.debug);

    let printer = make_printer(&top_opts.common.output_mode);
    let gsettings = match make_global_settings(top_opts.common) {
        Ok(gsettings) => gsettings,
        Err(error) => {
            printer.print_error(error);
            std::process::exit(1);
        }
    };

    let result = match top_opts.subcmd {
        SubCommand::Pool(PoolOpts {
            subcmd: PoolCommand::Info(opts),
        }) => command_pool_info(&gsettings, opts).await,
        SubCommand::GenerateCompletion(opts) => generate_completion(opts),
    };

    if let Err(e) = result {
        let code = exit_code(&e);
        gsettings.printer().print_error(e);
        std::process::exit(code);
    }
}
