use std::env;
use std::fs;

use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgGroup, ArgMatches, SubCommand};

use billet::build;
use billet::config::Config;
use billet::manuscript;
use billet::post::Payload;

fn main() {
    pretty_env_logger::init();

    let matches = App::new("billet")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds blog posts from JSON payloads and compiles manuscript drafts")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("build")
                .about("Builds one blog post from a JSON payload")
                .arg(
                    Arg::with_name("INPUT")
                        .help("Path to a JSON payload file")
                        .index(1),
                )
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .value_name("JSON")
                        .takes_value(true)
                        .help("A literal JSON payload instead of a file"),
                )
                .group(
                    ArgGroup::with_name("payload")
                        .args(&["INPUT", "json"])
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("manuscript")
                .about("Concatenates the chapter drafts into one manuscript document"),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("build", Some(matches)) => run_build(matches),
        ("manuscript", _) => run_manuscript(),
        _ => unreachable!("clap enforces a subcommand"),
    };

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}

fn run_build(matches: &ArgMatches) -> Result<()> {
    let raw = match matches.value_of("json") {
        Some(raw) => raw.to_owned(),
        // The argument group guarantees INPUT is present otherwise.
        None => {
            let path = matches.value_of("INPUT").unwrap();
            fs::read_to_string(path)
                .with_context(|| format!("reading payload file `{}`", path))?
        }
    };
    let payload: Payload =
        serde_json::from_str(&raw).context("parsing the payload JSON")?;

    let config = Config::from_directory(&env::current_dir()?)?;
    let report = build::build_post(&config, &payload)?;

    println!("Créé: {}", report.page_path.display());
    println!("Mis à jour: {}", report.index_path.display());
    println!();
    println!("Article créé: {}/", report.slug);
    println!(
        "N'oubliez pas d'ajouter l'image: {}/featured.jpg",
        report.slug
    );
    Ok(())
}

fn run_manuscript() -> Result<()> {
    let config = Config::from_directory(&env::current_dir()?)?;
    let compiled = manuscript::compile(&config.manuscript)?;

    for chapter in &compiled.included {
        println!(
            "Added {}: {} words",
            chapter.label,
            manuscript::group_thousands(chapter.words)
        );
    }
    for (label, path) in &compiled.missing {
        println!("WARNING: {} not found at {}", label, path.display());
    }

    println!();
    println!("{}", "=".repeat(50));
    println!("Manuscript compiled successfully!");
    println!("Output: {}", compiled.output_path.display());
    println!(
        "Total: {} chapters, ~{} words (~{} pages)",
        compiled.included.len(),
        manuscript::group_thousands(compiled.total_words),
        compiled.estimated_pages()
    );
    println!("{}", "=".repeat(50));
    Ok(())
}
