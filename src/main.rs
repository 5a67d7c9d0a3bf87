//! highlight - render source code as HTML, RTF, XML or ANSI

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use highlight::encoding::clean_input;
use highlight::{Config, HighlightError, Highlighter, OutputFormat, Result};

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("highlight")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Highlight source code using declarative definitions")
        .arg(
            Arg::new("definition")
                .required_unless_present("list")
                .help("Name of the definition to use, e.g. C#, HTML, SQL"),
        )
        .arg(
            Arg::new("file")
                .value_parser(value_parser!(PathBuf))
                .help("File to highlight; standard input when omitted"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format: html, html-css, rtf, xml or ansi"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("Definitions file to load on top of the built-ins"),
        )
        .arg(
            Arg::new("clean")
                .long("clean")
                .action(ArgAction::SetTrue)
                .help("Normalize pasted web input (line break tags, entities) first"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("List the available definitions and exit"),
        )
        .arg(
            Arg::new("stylesheet")
                .long("stylesheet")
                .action(ArgAction::SetTrue)
                .help("Print the CSS for the definition's class names and exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("More logging on stderr; repeat for more"),
        )
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let mut config = Config::load();
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        config.definitions = Some(path.clone());
    }

    let mut highlighter = Highlighter::from_config(&config)?;
    if let Some(format) = matches.get_one::<String>("format") {
        highlighter.set_format(format.parse::<OutputFormat>()?);
    }

    if matches.get_flag("list") {
        for name in highlighter.definition_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let definition = matches
        .get_one::<String>("definition")
        .ok_or_else(|| HighlightError::Config("no definition given".to_string()))?;

    if matches.get_flag("stylesheet") {
        print!("{}", highlighter.stylesheet(definition)?);
        return Ok(());
    }

    let mut input = match matches.get_one::<PathBuf>("file") {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if matches.get_flag("clean") {
        input = clean_input(&input);
    }

    debug!("Highlighting {} bytes as {} ({})", input.len(), definition, highlighter.format());
    let output = highlighter.highlight(definition, &input)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if highlighter.format() == OutputFormat::Terminal && !output.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}
