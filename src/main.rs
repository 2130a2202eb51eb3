// Research Tracker Engine - Main executable
// Author: Gabriel Demetrios Lafis

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::info;

use research_tracker_engine::{
    api::Server,
    data::EntityTables,
    export::{self, FILTERED_PROJECTS_FILENAME},
    processing::{self, DashboardReport, FilterOptions, Selection},
    utils::{init_logging, Config},
};

fn cli() -> Command<'static> {
    Command::new("research-tracker")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Filter, aggregate and export research project data")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .subcommand(
            Command::new("server")
                .about("Run the API server")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("Sets the server host")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Sets the server port")
                        .takes_value(true),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Print the dashboard report as JSON")
                .arg(selection_arg())
                .arg(
                    Arg::new("top")
                        .short('n')
                        .long("top")
                        .value_name("N")
                        .help("Number of supervisors on each leaderboard")
                        .takes_value(true),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write the filtered projects as CSV")
                .arg(selection_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Output file, defaults to the suggested download name")
                        .takes_value(true),
                ),
        )
}

fn selection_arg() -> Arg<'static> {
    Arg::new("selection")
        .short('s')
        .long("selection")
        .value_name("FILE")
        .help("JSON or YAML file with the filter selection")
        .takes_value(true)
}

fn load_selection(matches: &ArgMatches) -> Result<Selection> {
    let path = match matches.value_of("selection") {
        Some(path) => Path::new(path),
        None => return Ok(Selection::default()),
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Cannot read selection file {}", path.display()))?;

    let selection: Selection = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
        _ => serde_json::from_str(&contents)?,
    };

    Ok(selection)
}

fn load_tables(config: &Config) -> Result<EntityTables> {
    let source = config.source.csv_source();
    EntityTables::load(&source)
        .with_context(|| format!("Cannot load tables from {}", config.source.path.display()))
}

#[actix_web::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    // Load configuration
    let config = match matches.value_of("config") {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Error loading config file {}", path))?,
        None => Config::default(),
    };

    init_logging(config.log_level_filter(), config.logging.file.as_deref())?;

    match matches.subcommand() {
        Some(("server", sub)) => {
            let mut server_config = config.server.clone();
            if let Some(host) = sub.value_of("host") {
                server_config.host = host.to_string();
            }
            if let Some(port) = sub.value_of("port") {
                server_config.port = port
                    .parse()
                    .with_context(|| format!("Invalid port: {}", port))?;
            }

            let tables = Arc::new(load_tables(&config)?);
            let server = Server::new(tables, config.report_options(), server_config);
            server.run().await?;
        }
        Some(("summary", sub)) => {
            let selection = load_selection(sub)?;
            let mut options = config.report_options();
            if let Some(top) = sub.value_of("top") {
                options.top_n = top
                    .parse()
                    .with_context(|| format!("Invalid leaderboard size: {}", top))?;
            }
            if options.top_n == 0 {
                bail!("Leaderboard size must be at least 1");
            }

            let tables = load_tables(&config)?;
            let report = DashboardReport::build(&tables, &selection, &options);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some(("export", sub)) => {
            let selection = load_selection(sub)?;
            let tables = load_tables(&config)?;
            let options = FilterOptions::from_tables(&tables, config.dashboard.default_year_range);
            let projects = processing::filter_projects(&tables, &options, &selection);

            let payload = export::export_projects(&projects)?;
            let output = sub.value_of("output").unwrap_or(FILTERED_PROJECTS_FILENAME);
            fs::write(output, &payload.bytes)
                .with_context(|| format!("Cannot write {}", output))?;

            info!("Wrote {} project(s) to {}", projects.len(), output);
        }
        _ => {
            println!("No subcommand specified. Use --help for usage information.");
        }
    }

    Ok(())
}
