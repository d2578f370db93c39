use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use cotscraper::{download, notes, DownloadOptions, HttpFetcher, Table};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "\
usage: cotscraper [--json] [--no-store] [--dir <path>] <command>

commands:
  types                            list registered report types
  year <report_type> <year>        download one year
  range <report_type> <from> <to>  download an inclusive year range
  bundle <report_type>             download the historical bundle
  notes                            scrape the explanatory-notes glossary

Tables are written to stdout as CSV, or as JSON with --json.";

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let json = take_flag(&mut args, "--json");
    let no_store = take_flag(&mut args, "--no-store");
    let dir = take_value(&mut args, "--dir")?;

    let mut opts = DownloadOptions::default();
    opts.store_zip = !no_store;
    if let Some(dir) = dir {
        opts.dest_dir = PathBuf::from(dir);
    }

    let Some(command) = args.first().cloned() else {
        bail!("{USAGE}");
    };

    let table = match command.as_str() {
        "types" => {
            for t in cotscraper::report_types() {
                println!("{t}");
            }
            return Ok(());
        }
        "year" => {
            let report_type = arg(&args, 1, "report type")?;
            let year = parse_year(&args, 2, "year")?;
            download::download_year(&report_type, year, &opts)?
        }
        "range" => {
            let report_type = arg(&args, 1, "report type")?;
            let start = parse_year(&args, 2, "start year")?;
            let end = parse_year(&args, 3, "end year")?;
            download::download_year_range(&report_type, start, end, &opts)?
        }
        "bundle" => {
            let report_type = arg(&args, 1, "report type")?;
            download::download_bundle(&report_type, &opts)?
        }
        "notes" => {
            let fetcher = HttpFetcher::new(opts.timeout)?;
            notes::explanatory_notes(&fetcher)?
        }
        other => bail!("unknown command '{other}'\n\n{USAGE}"),
    };

    info!(rows = table.len(), "loaded");
    emit(&table, json)
}

fn emit(table: &Table, json: bool) -> Result<()> {
    let stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(stdout, table)?;
        println!();
    } else {
        table.write_csv(stdout)?;
    }
    Ok(())
}

fn arg(args: &[String], idx: usize, what: &str) -> Result<String> {
    args.get(idx)
        .cloned()
        .with_context(|| format!("missing {what}\n\n{USAGE}"))
}

fn parse_year(args: &[String], idx: usize, what: &str) -> Result<i32> {
    arg(args, idx, what)?
        .parse::<i32>()
        .with_context(|| format!("{what} must be an integer"))
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    if let Some(pos) = args.iter().position(|a| a == flag) {
        args.remove(pos);
        true
    } else {
        false
    }
}

fn take_value(args: &mut Vec<String>, flag: &str) -> Result<Option<String>> {
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        bail!("{flag} requires a value");
    }
    args.remove(pos);
    Ok(Some(args.remove(pos)))
}
