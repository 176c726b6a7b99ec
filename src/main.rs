use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use co_calc::config::Config;
use co_calc::exam::ExamSetup;
use co_calc::marks::{MarkingSession, StudentRecord};
use co_calc::store;
use co_calc::wizard::Prompter;
use co_calc::{MarksError, SetupError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_VALIDATION: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Define the exam from a YAML/JSON file, or interactively
    Setup {
        /// Exam setup file (.yaml/.yml or .json)
        #[arg(required_unless_present = "interactive")]
        file: Option<PathBuf>,

        /// Prompt for the exam details instead of reading a file
        #[arg(short, long, conflicts_with = "file")]
        interactive: bool,
    },
    /// Show the active exam setup
    Show,
    /// Calculate CO-wise marks from QUESTION=MARK pairs
    Calc {
        /// Obtained marks, e.g. `1=5 2=3`; questions left out score 0
        #[arg(value_name = "QUESTION=MARK")]
        marks: Vec<String>,

        /// Store the result as a student record with this id
        #[arg(long, value_name = "ID")]
        save: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Enter obtained marks question by question
    Enter {
        /// Store the result as a student record with this id
        #[arg(long, value_name = "ID")]
        save: Option<String>,
    },
    /// Manage stored student records
    Records {
        #[command(subcommand)]
        command: RecordsCommand,
    },
    /// Export stored records as CSV
    Export {
        /// Output file, `-` for stdout (defaults to <exam name>_results.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum RecordsCommand {
    /// List stored records
    List,
    /// Delete a stored record by id
    Delete { id: String },
}

#[derive(Parser, Debug)]
#[command(name = "co-calc")]
#[command(about = "Course Outcome attainment calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/co-calc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the exam setup and student records
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Everything a command needs, resolved once at startup
struct AppContext {
    config: Config,
    data_dir: PathBuf,
    use_colors: bool,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    if let Err(e) = co_calc::logging::init_tracing(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = match co_calc::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let data_dir = match co_calc::config::resolve_data_dir(cli.data_dir.as_deref(), &config) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    let ctx = AppContext {
        use_colors: co_calc::output::use_colors(config.color),
        config,
        data_dir,
    };

    let result = match cli.command {
        Commands::Setup { file, interactive } => run_setup(&ctx, file.as_deref(), interactive),
        Commands::Show => run_show(&ctx),
        Commands::Calc { marks, save, json } => run_calc(&ctx, &marks, save, json),
        Commands::Enter { save } => run_enter(&ctx, save),
        Commands::Records { command } => match command {
            RecordsCommand::List => run_records_list(&ctx),
            RecordsCommand::Delete { id } => run_records_delete(&ctx, &id),
        },
        Commands::Export { output } => run_export(&ctx, output),
    };

    tracing::debug!(elapsed = ?start_time.elapsed(), "finished");

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        let is_validation =
            e.downcast_ref::<SetupError>().is_some() || e.downcast_ref::<MarksError>().is_some();
        std::process::exit(if is_validation {
            EXIT_VALIDATION
        } else {
            EXIT_FAILURE
        });
    }

    std::process::exit(EXIT_SUCCESS);
}

fn require_setup(ctx: &AppContext) -> Result<ExamSetup> {
    let path = store::exam_path(&ctx.data_dir);
    store::load_exam_setup(&path)?.with_context(|| {
        format!(
            "No exam setup found in {}. Run `co-calc setup` first.",
            ctx.data_dir.display()
        )
    })
}

fn run_setup(ctx: &AppContext, file: Option<&Path>, interactive: bool) -> Result<()> {
    let exam_path = store::exam_path(&ctx.data_dir);

    let validated = if interactive {
        let existing = match store::load_exam_setup(&exam_path) {
            Ok(setup) => setup,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "ignoring unreadable saved setup");
                None
            }
        };
        co_calc::wizard::run_setup_wizard(&mut Prompter::stdio(), existing.as_ref())?
    } else {
        let file = file.context("An exam setup file is required unless --interactive is given")?;
        let raw = store::read_raw_setup(file)?;
        co_calc::exam::validate_with_report(&raw)?
    };

    for warning in &validated.warnings {
        eprintln!("Warning: {}", warning);
    }

    let setup = validated.setup;
    store::save_exam_setup(&exam_path, &setup)?;

    println!(
        "Saved exam setup '{}' ({} COs, {} questions, {} marks) to {}",
        setup.name(),
        setup.cos().len(),
        setup.questions().len(),
        co_calc::output::format_mark(setup.total_marks()),
        exam_path.display()
    );

    let book = store::load_record_book(&store::records_path(&ctx.data_dir))?;
    if !book.is_empty() {
        eprintln!(
            "Note: {} stored record(s) were calculated against the previous setup.",
            book.len()
        );
    }

    Ok(())
}

fn run_show(ctx: &AppContext) -> Result<()> {
    let setup = require_setup(ctx)?;
    println!("{}", co_calc::output::format_setup(&setup, ctx.use_colors));
    Ok(())
}

fn run_calc(ctx: &AppContext, entries: &[String], save: Option<String>, json: bool) -> Result<()> {
    let setup = require_setup(ctx)?;
    let obtained = co_calc::marks::parse_mark_entries(entries)?;
    let calculated = co_calc::marks::aggregate(&setup, &obtained)?;

    if json {
        let out = serde_json::to_string_pretty(&calculated).context("Failed to serialize result")?;
        println!("{}", out);
    } else {
        println!(
            "{}",
            co_calc::output::format_results(
                &setup,
                &calculated,
                ctx.config.precision,
                ctx.use_colors
            )
        );
    }

    if let Some(id) = save {
        save_record(ctx, StudentRecord::from_calculated(id, &calculated))?;
    }

    Ok(())
}

fn run_enter(ctx: &AppContext, save: Option<String>) -> Result<()> {
    let setup = require_setup(ctx)?;
    let mut session = MarkingSession::new(setup);

    let calculated =
        co_calc::wizard::run_marks_entry(&mut Prompter::stdio(), &mut session)?.clone();
    println!();
    println!(
        "{}",
        co_calc::output::format_results(
            session.setup(),
            &calculated,
            ctx.config.precision,
            ctx.use_colors
        )
    );

    if let Some(id) = save {
        save_record(ctx, session.to_record(id)?)?;
    }

    Ok(())
}

fn save_record(ctx: &AppContext, record: StudentRecord) -> Result<()> {
    let path = store::records_path(&ctx.data_dir);
    let mut book = store::load_record_book(&path)?;
    let id = record.id.clone();
    let replaced = book.upsert(record);
    store::save_record_book(&path, &book)?;

    if replaced {
        println!("Updated record {}", id);
    } else {
        println!("Saved record {}", id);
    }
    Ok(())
}

fn run_records_list(ctx: &AppContext) -> Result<()> {
    let setup = require_setup(ctx)?;
    let book = store::load_record_book(&store::records_path(&ctx.data_dir))?;
    println!(
        "{}",
        co_calc::output::format_records_table(&setup, &book.records, ctx.use_colors)
    );
    Ok(())
}

fn run_records_delete(ctx: &AppContext, id: &str) -> Result<()> {
    let path = store::records_path(&ctx.data_dir);
    let mut book = store::load_record_book(&path)?;
    if !book.delete(id) {
        anyhow::bail!("No record with id {}", id);
    }
    store::save_record_book(&path, &book)?;
    println!("Deleted record {}", id);
    Ok(())
}

fn run_export(ctx: &AppContext, output: Option<PathBuf>) -> Result<()> {
    let setup = require_setup(ctx)?;
    let book = store::load_record_book(&store::records_path(&ctx.data_dir))?;
    let csv = co_calc::export::export_csv(&setup, &book.records)?;

    let path = output.unwrap_or_else(|| PathBuf::from(co_calc::export::default_file_name(&setup)));
    if path.as_os_str() == "-" {
        print!("{}", csv);
        return Ok(());
    }

    std::fs::write(&path, csv)
        .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
    println!("Exported {} record(s) to {}", book.len(), path.display());
    Ok(())
}
