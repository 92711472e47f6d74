//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::DocumentReport;
use crate::cli::args::{Cli, Commands, ConfigCommands, OutputFormat};
use crate::cli::output;
use crate::cli::tree::{recipe_tree, TreeConvert};
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, project_config_path, Settings};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::util::path::display_relative;

/// Run the selected command; returns the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    match &cli.command {
        Commands::Check { paths, format } => cmd_check(cli, paths, *format),
        Commands::Recipe { name } => cmd_recipe(cli, name),
        Commands::Inspect { file } => cmd_inspect(cli, file),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cmd_config_show(cli),
            ConfigCommands::Path => cmd_config_path(cli),
        },
        Commands::Completion { shell } => cmd_completion(*shell),
    }
}

fn project_root(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("determine current directory", e))),
    }
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let root = project_root(cli)?;
    let settings = Settings::load(Some(&root))?;
    debug!("project_root={}, settings={:?}", root.display(), settings);
    Ok(ServiceContainer::new(settings, root))
}

#[instrument(skip(cli))]
fn cmd_check(cli: &Cli, paths: &[PathBuf], format: OutputFormat) -> CliResult<i32> {
    let container = container(cli)?;
    let content = &container.content;

    let documents = if paths.is_empty() {
        content.discover()?
    } else {
        for path in paths {
            if !container.fs.is_file(path) {
                return Err(CliError::InvalidArgs(format!(
                    "not a document: {}",
                    path.display()
                )));
            }
        }
        paths.to_vec()
    };

    let reports = content.check_all(&documents)?;

    match format {
        OutputFormat::Text => print_reports(&reports, content.project_root()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports).map_err(InfraError::from)?;
            output::info(&json);
        }
    }

    Ok(check_exit_code(&reports))
}

/// `FINDINGS` when any document has a fail-severity finding.
fn check_exit_code(reports: &[DocumentReport]) -> i32 {
    if reports.iter().any(DocumentReport::has_failures) {
        exitcode::FINDINGS
    } else {
        exitcode::OK
    }
}

fn print_reports(reports: &[DocumentReport], root: &Path) {
    let failing: Vec<&DocumentReport> = reports.iter().filter(|r| r.has_findings()).collect();

    for report in &failing {
        output::header(&display_relative(&report.path, root).display());
        for finding in &report.findings {
            output::finding(finding);
        }
    }

    if failing.is_empty() {
        output::success(&format!("{} documents checked, no findings", reports.len()));
    } else {
        let total: usize = failing.iter().map(|r| r.findings.len()).sum();
        output::info(&format!(
            "{} of {} documents have findings ({} total)",
            failing.len(),
            reports.len(),
            total
        ));
    }
}

fn cmd_recipe(cli: &Cli, name: &str) -> CliResult<i32> {
    let container = container(cli)?;
    let recipe = container.content.load_recipe(name)?;
    output::info(&recipe_tree(name, &recipe));
    Ok(exitcode::OK)
}

fn cmd_inspect(cli: &Cli, file: &Path) -> CliResult<i32> {
    let container = container(cli)?;
    let doc = container.content.load_document(file)?;

    let keys: Vec<&str> = doc.metadata.keys().map(String::as_str).collect();
    output::action("front matter", &keys.join(", "));
    if let Some(recipe) = doc.recipe_name() {
        output::action("recipe", recipe);
    }
    output::info(&doc.prose.to_tree_string());
    Ok(exitcode::OK)
}

fn cmd_config_show(cli: &Cli) -> CliResult<i32> {
    let root = project_root(cli)?;
    let settings = Settings::load(Some(&root))?;
    output::info(&settings.to_toml()?);
    Ok(exitcode::OK)
}

fn cmd_config_path(cli: &Cli) -> CliResult<i32> {
    let root = project_root(cli)?;
    output::header("Config files (lowest to highest precedence)");

    let mut candidates: Vec<PathBuf> = global_config_path().into_iter().collect();
    candidates.push(project_config_path(&root));
    for path in candidates {
        if path.exists() {
            output::success_detail(&path.display());
        } else {
            output::failure(&format!("{} (not found)", path.display()));
        }
    }
    Ok(exitcode::OK)
}

fn cmd_completion(shell: Shell) -> CliResult<i32> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(exitcode::OK)
}
