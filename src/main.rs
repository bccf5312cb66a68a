use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use gitli::commands;
use gitli::config::{ColorMode, Settings};
use gitli::error::GitliError;
use gitli::git::{self, GitConfig};
use gitli::model::IssueType;
use gitli::output::{Format, Printer, Style};
use gitli::prompt::{Prompter, TerminalPrompter};
use gitli::store::files::IssueStore;

#[derive(Parser)]
#[command(
    name = "gitli",
    version,
    about = "Git-native issue tracker storing issues as plain text files"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    /// Store directory, relative to the current directory (overrides gitli.path)
    #[arg(long, global = true)]
    path: Option<PathBuf>,
    /// Disable colored output regardless of gitli.color
    #[arg(long, global = true)]
    no_color: bool,
    /// Log store and config activity to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the .gitli store in the repository
    Init,
    /// Create a new open issue
    #[command(visible_aliases = ["add", "open"])]
    New {
        /// Issue title
        title: String,
        /// Ask for the issue type and milestone
        #[arg(long, short)]
        edit: bool,
        /// Issue type (default: task)
        #[arg(long = "type", value_enum)]
        issue_type: Option<IssueType>,
        /// Milestone (default: the current milestone)
        #[arg(long)]
        milestone: Option<String>,
    },
    /// Close an issue
    Close {
        /// Issue ID
        id: String,
    },
    /// List issues matching all filters: open, close, task, bug, enhancement, all, or a milestone
    List {
        /// Filter tokens (default: gitli.list.option, else "all")
        filters: Vec<String>,
    },
    /// Reopen a closed issue
    Reopen {
        /// Issue ID
        id: String,
    },
    /// Display an issue and the commits mentioning it
    Show {
        /// Issue ID
        id: String,
    },
    /// Edit an issue; prompts for every field when no flag is given
    Edit {
        /// Issue ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New issue type
        #[arg(long = "type", value_enum)]
        issue_type: Option<IssueType>,
        /// New milestone
        #[arg(long)]
        milestone: Option<String>,
    },
    /// Remove an issue entirely
    #[command(visible_alias = "delete")]
    Remove {
        /// Issue ID
        id: String,
    },
    /// Print the current milestone
    Current,
    /// Print or change the current milestone
    Milestone {
        /// New current milestone
        value: Option<String>,
        /// Also move every open issue to the new milestone
        #[arg(long, short)]
        up: bool,
    },
}

fn run(cli: Cli, command: Commands) -> gitli::error::Result<()> {
    let cwd = std::env::current_dir()?;
    let repo_root = git::find_repo_root(&cwd).ok_or(GitliError::NotGitRepository)?;

    let settings = Settings::resolve(&GitConfig::discover(&repo_root));
    let color = !cli.no_color && settings.color.enabled();
    if color && settings.color == ColorMode::Always {
        colored::control::set_override(true);
    }
    let printer = Printer::new(cli.format, Style { color });

    let store_root = gitli::store::resolve_root(
        &repo_root,
        &cwd,
        cli.path.as_deref(),
        settings.store_path.as_deref(),
    );
    let open = || IssueStore::open(&store_root);

    match command {
        Commands::Init => {
            commands::init::run(&store_root)?;
        }
        Commands::New {
            title,
            edit,
            issue_type,
            milestone,
        } => {
            let mut terminal = TerminalPrompter::default();
            let prompter = if edit {
                Some(&mut terminal as &mut dyn Prompter)
            } else {
                None
            };
            commands::create::run(
                &open()?,
                &settings.id_scheme,
                &title,
                issue_type,
                milestone,
                prompter,
                &printer,
            )?;
        }
        Commands::Close { id } => commands::lifecycle::close(&open()?, id.trim(), &printer)?,
        Commands::List { filters } => {
            commands::list::run(
                &open()?,
                filters.as_slice(),
                &settings.default_filter,
                &printer,
            )?;
        }
        Commands::Reopen { id } => commands::lifecycle::reopen(&open()?, id.trim(), &printer)?,
        Commands::Show { id } => {
            commands::show::run(
                &open()?,
                id.trim(),
                &repo_root,
                settings.commit_style,
                &printer,
            )?;
        }
        Commands::Edit {
            id,
            title,
            issue_type,
            milestone,
        } => {
            let changes = commands::edit::Changes {
                title,
                issue_type,
                milestone,
            };
            commands::edit::run(
                &open()?,
                id.trim(),
                changes,
                &mut TerminalPrompter::default(),
                &printer,
            )?;
        }
        Commands::Remove { id } => {
            commands::delete::run(&open()?, id.trim(), &printer)?;
        }
        Commands::Current | Commands::Milestone { value: None, .. } => {
            commands::milestone::show(&open()?, &printer)?;
        }
        Commands::Milestone {
            value: Some(value),
            up,
        } => {
            commands::milestone::set(&open()?, &value, up, &printer)?;
        }
    }
    Ok(())
}

fn main() {
    let mut cli = Cli::parse();
    gitli::logging::init(cli.verbose);

    let Some(command) = cli.command.take() else {
        let _ = Cli::command().print_help();
        std::process::exit(1);
    };
    let format = cli.format;
    if let Err(e) = run(cli, command) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            Format::Pretty => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
