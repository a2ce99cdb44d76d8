use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use prioritask::{
    config::DEFAULT_CONFIG_FILE,
    ui::{run_app, App},
    Config, Priority, TaskError, TaskManager,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs, io, path::PathBuf, process::ExitCode, sync::Mutex};
use tracing_subscriber::EnvFilter;

/// To-do list with a "what should I do next" recommendation.
#[derive(Parser)]
#[command(name = "prioritask", version, about)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the CSV task file from the configuration.
    #[arg(long)]
    tasks_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive form (default).
    Ui,
    /// Add a task.
    Add {
        description: String,
        /// Low, Medium or High; defaults to the configured priority.
        #[arg(short, long)]
        priority: Option<Priority>,
    },
    /// Remove every task with exactly this description.
    Remove { description: String },
    /// List all tasks.
    List,
    /// Show the task most likely to deserve High priority.
    Recommend,
    /// Write a default configuration file.
    Init,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;
    if let Some(path) = cli.tasks_file {
        config.tasks_file = path;
    }

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => {
            init_logging(&config, true)?;
            run_ui(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Init => {
            init_logging(&config, false)?;
            if cli.config.exists() {
                println!("Config already exists at {}", cli.config.display());
            } else {
                config.save(&cli.config)?;
                println!("Wrote {}", cli.config.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        command => {
            init_logging(&config, false)?;
            let mut manager = TaskManager::open(&config)?;
            Ok(report(run_command(&mut manager, command, &config)))
        }
    }
}

fn run_command(
    manager: &mut TaskManager,
    command: Command,
    config: &Config,
) -> prioritask::Result<()> {
    match command {
        Command::Add {
            description,
            priority,
        } => {
            manager.add(&description, priority.unwrap_or(config.default_priority))?;
            println!("Task added successfully.");
        }
        Command::Remove { description } => {
            let removed = manager.remove(&description)?;
            println!("Removed {removed} task(s).");
        }
        Command::List => {
            let tasks = manager.list()?;
            let width = tasks
                .iter()
                .map(|t| t.description.chars().count())
                .max()
                .unwrap_or(0)
                .max("description".len());
            println!("{:<width$}  priority", "description");
            for task in tasks {
                println!("{:<width$}  {}", task.description, task.priority);
            }
        }
        Command::Recommend => {
            let pick = manager.recommend()?;
            println!(
                "Recommended task: {} - Priority: High ({:.0}% likely)",
                pick.task.description,
                pick.probability * 100.0
            );
        }
        Command::Ui | Command::Init => {}
    }
    Ok(())
}

/// Turns an action error into a user-facing line and an exit status.
fn report(result: prioritask::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.is_informational() {
                println!("{err}");
            } else {
                eprintln!("Error: {err}");
            }
            ExitCode::from(err.exit_status())
        }
    }
}

fn run_ui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let manager = TaskManager::open(config)?;
    let mut app = App::new(manager, config.default_priority);

    enable_raw_mode()?;
    let result = run_terminal(&mut app);

    // Restore terminal, even when setup or the event loop failed
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;

    result?;
    Ok(())
}

fn run_terminal(app: &mut App) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, app);
    terminal.show_cursor()?;
    result
}

/// The form owns the terminal, so it only logs when a log file is configured.
fn init_logging(config: &Config, interactive: bool) -> Result<(), TaskError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prioritask=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match (&config.log_file, interactive) {
        (Some(path), _) => {
            let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, false) => builder.with_writer(io::stderr).init(),
        (None, true) => {}
    }
    Ok(())
}
