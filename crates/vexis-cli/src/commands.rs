use std::io::Write;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use vexis_sdk::{
    ChangeKind, Commit, CommitDiff, FileChange, InitOutcome, ObjectId, RepoConfig, Vexis,
};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = RepoConfig::load(&cli.repo)
        .with_context(|| format!("failed to load config for {}", cli.repo.display()))?;

    match cli.command {
        Command::Init => cmd_init(config),
        Command::Add(args) => cmd_add(&open(config)?, args),
        Command::Commit(args) => cmd_commit(&open(config)?, args),
        Command::Log(args) => cmd_log(&open(config)?, args, &cli.format),
        Command::Show(args) => cmd_show(&open(config)?, args, &cli.format),
        Command::CatFile(args) => cmd_cat_file(&open(config)?, args),
    }
}

fn open(config: RepoConfig) -> anyhow::Result<Vexis> {
    Ok(Vexis::open(config)?)
}

fn cmd_init(config: RepoConfig) -> anyhow::Result<()> {
    let path = config.meta_dir();
    let (_, outcome) = Vexis::init(config)?;
    match outcome {
        InitOutcome::Created => println!(
            "{} Initialized empty Vexis repository in {}",
            "✓".green().bold(),
            path.display().to_string().bold()
        ),
        InitOutcome::AlreadyInitialized => {
            println!("Already initialized the {} folder", path.display().to_string().bold())
        }
    }
    Ok(())
}

fn cmd_add(repo: &Vexis, args: AddArgs) -> anyhow::Result<()> {
    for path in &args.paths {
        let staged = repo
            .stage_path(path)
            .with_context(|| format!("failed to add {}", path.display()))?;
        for (name, id) in staged {
            println!("{}", id.to_hex().yellow());
            println!("Added {}", name);
        }
    }
    Ok(())
}

fn cmd_commit(repo: &Vexis, args: CommitArgs) -> anyhow::Result<()> {
    let id = repo.commit(&args.message)?;
    println!("Successfully created commit: {}", id.to_hex().yellow());
    Ok(())
}

#[derive(Serialize)]
struct LogEntry<'a> {
    id: ObjectId,
    #[serde(flatten)]
    commit: &'a Commit,
}

fn cmd_log(repo: &Vexis, args: LogArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let commits = repo.log(args.limit)?;

    if let OutputFormat::Json = format {
        let entries: Vec<_> = commits
            .iter()
            .map(|(id, commit)| LogEntry { id: *id, commit })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if commits.is_empty() {
        println!("No commits yet.");
        return Ok(());
    }

    for (id, commit) in &commits {
        if args.oneline {
            println!("{} {}", id.short_hex().yellow(), commit.message);
        } else {
            println!("{}", "-------------------------------".dimmed());
            println!("Commit: {}", id.to_hex().yellow().bold());
            println!("Date:   {}", commit.timestamp.to_rfc3339());
            println!();
            println!("    {}", commit.message);
            println!();
        }
    }
    Ok(())
}

fn cmd_show(repo: &Vexis, args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    print!("{}", show_output(repo, &args, format)?);
    Ok(())
}

/// Everything `show` prints, built before any of it is written.
fn show_output(repo: &Vexis, args: &ShowArgs, format: &OutputFormat) -> anyhow::Result<String> {
    let id = repo.resolve_commit(&args.commit)?;
    let report = repo.show_commit_diff(&id)?;

    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => render_commit_diff(&report),
    })
}

fn cmd_cat_file(repo: &Vexis, args: CatFileArgs) -> anyhow::Result<()> {
    let id = ObjectId::from_hex(args.object.trim())
        .with_context(|| format!("not an object digest: {}", args.object))?;
    let data = repo.read_object(&id)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&data)?;
    stdout.flush()?;
    Ok(())
}

/// Text form of a commit diff: each file's content, then its diff.
pub fn render_commit_diff(report: &CommitDiff) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Commit {}  {}\n",
        report.id.to_hex().yellow().bold(),
        report.commit.message
    ));

    if report.files.is_empty() {
        out.push_str(&format!("{}\n", "No files in this commit.".dimmed()));
        return out;
    }

    for file in &report.files {
        out.push('\n');
        out.push_str(&format!("File: {}\n", file.path.bold()));
        out.push_str(&file.content);
        if !file.content.is_empty() && !file.content.ends_with('\n') {
            out.push('\n');
        }

        match &file.change {
            FileChange::FirstCommit => {
                out.push_str(&format!("{}\n", "First commit".cyan()));
            }
            FileChange::NewFile => {
                out.push_str(&format!("{}\n", "New file in this commit".cyan()));
            }
            FileChange::Compared(diff) => {
                out.push_str(&format!(
                    "\nDiff: {} {}\n",
                    format!("+{}", diff.additions()).green(),
                    format!("-{}", diff.deletions()).red()
                ));
                for run in &diff.runs {
                    for line in run.iter_lines() {
                        let marked = format!("{}{}", run.kind.marker(), line.trim_end_matches('\n'));
                        let styled = match run.kind {
                            ChangeKind::Added => marked.green(),
                            ChangeKind::Removed => marked.red(),
                            ChangeKind::Unchanged => marked.dimmed(),
                        };
                        out.push_str(&format!("{styled}\n"));
                    }
                }
            }
        }
    }
    out
}
