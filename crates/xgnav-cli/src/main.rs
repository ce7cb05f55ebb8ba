//! `xgnav` - build, search and check a static navigation site

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use xgnav_catalog::FsSource;
use xgnav_core::{
    init_logging, LogFormat, Navigator, RenderedView, SearchSession, ViewKind, DEFAULT_DELAY,
};

fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .default_value(".")
        .value_parser(value_parser!(PathBuf))
        .help("Site directory holding config.json and data/")
}

fn cli() -> Command {
    Command::new("xgnav")
        .version(xgnav_core::VERSION)
        .about("XG-Nav static navigation page builder")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("pretty")
                .value_parser(value_parser!(LogFormat))
                .help("Log output format (pretty or json)"),
        )
        .subcommand(
            Command::new("build")
                .about("Render the static page")
                .arg(root_arg())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output file (default: <root>/index.html)"),
                )
                .arg(
                    Arg::new("query")
                        .long("query")
                        .help("Pre-filter the page with a search query"),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Print the view filtered by a query")
                .arg(root_arg())
                .arg(Arg::new("query").required(true).help("Search query")),
        )
        .subcommand(
            Command::new("check")
                .about("Report configuration and catalog load status")
                .arg(root_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Search interactively; one query per stdin line")
                .arg(root_arg())
                .arg(
                    Arg::new("delay-ms")
                        .long("delay-ms")
                        .default_value("300")
                        .value_parser(value_parser!(u64))
                        .help("Debounce delay in milliseconds"),
                ),
        )
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();
    let format = matches
        .get_one::<LogFormat>("log-format")
        .copied()
        .unwrap_or_default();
    init_logging(format);

    let result = match matches.subcommand() {
        Some(("build", args)) => build(args).await,
        Some(("search", args)) => search(args).await,
        Some(("check", args)) => check(args).await,
        Some(("watch", args)) => watch(args).await,
        _ => Ok(ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn root(args: &ArgMatches) -> PathBuf {
    args.get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."))
}

async fn load(args: &ArgMatches) -> (Navigator, bool) {
    let source = FsSource::new(root(args));
    let mut navigator = Navigator::new();
    let report = navigator.load(&source).await;
    (navigator, report.is_ok())
}

async fn build(args: &ArgMatches) -> Result<ExitCode> {
    let (navigator, loaded) = load(args).await;
    let out = args
        .get_one::<PathBuf>("out")
        .cloned()
        .unwrap_or_else(|| root(args).join("index.html"));
    let query = args.get_one::<String>("query").map(String::as_str);

    navigator
        .write_page(&out, query)
        .await
        .with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {}", out.display());

    Ok(if loaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn search(args: &ArgMatches) -> Result<ExitCode> {
    let query = args
        .get_one::<String>("query")
        .context("missing search query")?;
    let (navigator, loaded) = load(args).await;
    println!("{}", describe(&navigator.search(query)));

    Ok(if loaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn check(args: &ArgMatches) -> Result<ExitCode> {
    let source = FsSource::new(root(args));
    let mut navigator = Navigator::new();
    let report = navigator.load(&source).await;

    if args.get_flag("json") {
        let config = match &report.config_error {
            None => json!({ "ok": true, "title": navigator.config().site_title }),
            Some(e) => json!({ "ok": false, "error": e.to_string() }),
        };
        let catalog = match &report.catalog {
            Ok(summary) => json!({
                "ok": true,
                "format": summary.format,
                "path": summary.path,
                "links": summary.links,
                "skipped": summary.skipped,
            }),
            Err(e) => json!({ "ok": false, "error": e.to_string() }),
        };
        let output = json!({ "version": xgnav_core::VERSION, "config": config, "catalog": catalog });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("XG-Nav Site Report");
        println!("==================");
        println!("Root: {}", source.root().display());
        println!();
        match &report.config_error {
            None => println!("Config: OK ({})", navigator.config().site_title),
            Some(e) => println!("Config: defaults in use ({e})"),
        }
        match &report.catalog {
            Ok(summary) => {
                println!(
                    "Catalog: OK, {} links from {} ({})",
                    summary.links, summary.path, summary.format
                );
                for reason in &summary.skipped {
                    println!("  skipped: {reason}");
                }
            }
            Err(e) => println!("Catalog: FAILED ({e})"),
        }
    }

    Ok(if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn watch(args: &ArgMatches) -> Result<ExitCode> {
    let delay = args
        .get_one::<u64>("delay-ms")
        .map_or(DEFAULT_DELAY, |ms| Duration::from_millis(*ms));
    let (navigator, loaded) = load(args).await;
    let session = navigator.search_session(delay);

    let mut rx = session.subscribe();
    println!("{}", describe(&rx.borrow_and_update()));
    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            println!("{}", describe(&rx.borrow_and_update()));
        }
    });

    feed_queries(&session, BufReader::new(tokio::io::stdin())).await?;
    drop(session);
    printer.await.context("printer task")?;

    Ok(if loaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Send each line to the session as a keystroke; a blank line clears
///
/// Returns once input is exhausted and the last query has been published.
async fn feed_queries<R>(session: &SearchSession, reader: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.context("reading queries")? {
        let query = line.trim();
        if query.is_empty() {
            session.clear();
        } else {
            session.on_input(query);
        }
    }
    session.flush().await;
    Ok(())
}

/// One-line summary of a view
fn describe(view: &RenderedView) -> String {
    let summary = match &view.kind {
        ViewKind::Links { shown, categories } => {
            format!("{shown} links: {}", categories.join(", "))
        }
        ViewKind::NoData => "no links yet".to_string(),
        ViewKind::NoResults { query } => format!("no results for '{query}'"),
        ViewKind::LoadFailed { message } => format!("failed to load: {message}"),
    };
    match (&view.query, view.count.is_visible()) {
        (Some(query), true) => format!("[{query}] {summary} ({})", view.count),
        (Some(query), false) => format!("[{query}] {summary}"),
        (None, _) => summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn parses_global_log_format() {
        let matches = cli()
            .try_get_matches_from(["xgnav", "check", "--root", "site", "--log-format", "json"])
            .unwrap();
        assert_eq!(
            matches.get_one::<LogFormat>("log-format").copied(),
            Some(LogFormat::Json)
        );
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "check");
        assert_eq!(root(args), PathBuf::from("site"));
        assert!(!args.get_flag("json"));
    }

    #[test]
    fn search_requires_query() {
        assert!(cli().try_get_matches_from(["xgnav", "search"]).is_err());
    }

    fn sample() -> Navigator {
        Navigator::from_parts(
            xgnav_core::SiteConfig::default(),
            xgnav_catalog::Catalog::new(vec![
                xgnav_catalog::LinkRecord::new("Site", "Desc", "example.com", Some("Tools"))
                    .unwrap(),
                xgnav_catalog::LinkRecord::new("Blog", "My blog", "blog.io", Some("Tools"))
                    .unwrap(),
            ]),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn last_query_published_before_input_ends() {
        let session = sample().search_session(Duration::from_millis(300));
        let mut rx = session.subscribe();

        feed_queries(&session, &b"b\nbl\nblog\n"[..]).await.unwrap();

        assert!(rx.has_changed().unwrap());
        let view = rx.borrow_and_update().clone();
        assert_eq!(view.query.as_deref(), Some("blog"));
        assert_eq!(describe(&view), "[blog] 1 links: Tools (found 1 of 2 links)");
    }

    #[tokio::test(start_paused = true)]
    async fn trailing_blank_line_clears() {
        let session = sample().search_session(Duration::from_millis(300));

        feed_queries(&session, &b"blog\n\n"[..]).await.unwrap();

        assert_eq!(session.current().query, None);
        assert_eq!(session.current().count.shown, 2);
    }

    #[test]
    fn describe_filtered_view() {
        let navigator = sample();
        assert_eq!(
            describe(&navigator.search("blog")),
            "[blog] 1 links: Tools (found 1 of 2 links)"
        );
        assert_eq!(describe(&navigator.view()), "2 links: Tools");
        assert_eq!(
            describe(&navigator.search("zzz")),
            "[zzz] no results for 'zzz' (found 0 of 2 links)"
        );
    }
}
