//! Keycoding CLI: inspect and edit language dashboard documents.
//!
//! Usage:
//!   keycoding languages
//!   keycoding show <slug> [--json]
//!   keycoding apply <slug> <action> [-f key=value]... [--json-payload '<json>']
//!   keycoding normalize
//!   keycoding actions

use clap::{Parser, Subcommand};
use keycoding::{
    Access, Action, ApiError, Config, JsonFileStore, LangDataApi, NormalizeStatus, Payload,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "keycoding",
    version,
    about = "Language-learning dashboard content tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Directory holding the language JSON documents
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the language catalog by category
    Languages,
    /// List every editing action
    Actions,
    /// Print a language document in canonical form
    Show {
        /// Language slug, e.g. `python` or `cpp`
        slug: String,
        /// Print the full document as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Apply one editing action and save the document
    Apply {
        /// Language slug
        slug: String,
        /// Action identifier, e.g. `add_glossary`
        action: String,
        /// Form field as key=value (repeatable)
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Form fields as a JSON object, merged under --field values
        #[arg(long = "json-payload")]
        payload: Option<String>,
    },
    /// Rewrite every stored document in canonical form
    Normalize,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn init_tracing(config: &Config, verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("keycoding=debug")
        } else {
            EnvFilter::new(&config.log_filter)
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_api(config: &Config) -> LangDataApi {
    tracing::debug!(dir = %config.langdata_dir.display(), "opening language documents");
    LangDataApi::new(Arc::new(JsonFileStore::new(&config.langdata_dir)))
}

fn cmd_languages(api: &LangDataApi) -> i32 {
    for category in api.catalog().categories() {
        println!("{}", category.name);
        for language in category.languages {
            println!("  {:<24}  {}", language.name, language.slug);
        }
    }
    0
}

fn cmd_actions() -> i32 {
    for action in Action::ALL {
        println!("{}", action);
    }
    0
}

fn cmd_show(api: &LangDataApi, slug: &str, json: bool) -> i32 {
    let view = match api.view(slug) {
        Ok(view) => view,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if json {
        return match view.document.to_pretty_json() {
            Ok(text) => {
                print!("{}", text);
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        };
    }

    let doc = &view.document;
    let summary = doc.summary();
    println!("{} ({})", doc.name, doc.slug);
    if !doc.version.is_empty() {
        println!("Version:      {}", doc.version);
    }
    println!("Categories:   {}", view.categories.join(", "));
    println!("{}", "-".repeat(40));
    println!("{:<14}{:>6}", "Quick Start", summary.quick_start);
    println!("{:<14}{:>6}", "Concepts", summary.concepts);
    println!("{:<14}{:>6}  ({} tasks)", "Task groups", summary.common_tasks, summary.tasks);
    println!("{:<14}{:>6}", "Projects", summary.projects);
    println!("{:<14}{:>6}", "Glossary", summary.glossary);
    println!("{:<14}{:>6}", "Tips", summary.tips);
    println!("{:<14}{:>6}", "Built-ins", summary.builtins);
    println!("{:<14}{:>6}", "Stdlib", summary.stdlib);
    println!("{:<14}{:>6}", "Tools", summary.tools);
    println!("{:<14}{:>6}", "Links", summary.links);
    0
}

fn cmd_apply(
    api: &LangDataApi,
    slug: &str,
    action: &str,
    fields: Vec<(String, String)>,
    payload_json: Option<&str>,
) -> i32 {
    let mut payload = match payload_json {
        Some(text) => match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => Payload::from_json(&value),
            Err(e) => {
                eprintln!("Error: invalid --json-payload JSON: {}", e);
                return 1;
            }
        },
        None => Payload::new(),
    };
    for (key, value) in fields {
        payload.insert(key, value);
    }

    match api.edit(slug, Access::Manage, action, &payload) {
        Ok(message) => {
            println!("{}", message);
            0
        }
        Err(ApiError::Validation(e)) => {
            eprintln!("Not saved: {}", e);
            2
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_normalize(api: &LangDataApi) -> i32 {
    let reports = match api.normalize_all() {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let mut any_changed = false;
    let mut any_skipped = false;
    for report in &reports {
        match (report.status, &report.summary) {
            (NormalizeStatus::Skipped, _) | (_, None) => {
                println!("SKIPPED {}.json (not valid JSON, left as is)", report.slug);
                any_skipped = true;
            }
            (status, Some(summary)) => {
                let flag = if status == NormalizeStatus::Rewritten { "UPDATED" } else { "ok" };
                println!("{:<7} {}.json -> {}", flag, report.slug, summary);
            }
        }
        any_changed |= report.changed();
    }
    println!("Done.{}", if any_changed { " (changes written)" } else { "" });
    if any_skipped {
        1
    } else {
        0
    }
}

fn main() {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(dir) = cli.dir {
        config = config.with_langdata_dir(dir);
    }
    init_tracing(&config, cli.verbose);

    let api = open_api(&config);
    let code = match cli.command {
        Commands::Languages => cmd_languages(&api),
        Commands::Actions => cmd_actions(),
        Commands::Show { slug, json } => cmd_show(&api, &slug, json),
        Commands::Apply {
            slug,
            action,
            fields,
            payload,
        } => cmd_apply(&api, &slug, &action, fields, payload.as_deref()),
        Commands::Normalize => cmd_normalize(&api),
    };
    std::process::exit(code);
}
