//! K-map minimizer - Command Line Interface

use clap::{Parser, ValueEnum};
use kmap_logic::{
    cells_from_expressions, explain_latest, parse_cells, read_cells, Engine, Expr, KmapConfig,
    KmapView, Minimization, Mode, PromptExplainer, ResultSlot, SimplifyRequest,
};
use log::{info, Level, LevelFilter, Log, Metadata, Record};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Form {
    /// Sum of products over the 1 cells
    Sop,
    /// Product of sums over the 0 cells
    Pos,
}

impl From<Form> for Mode {
    fn from(val: Form) -> Self {
        match val {
            Form::Sop => Mode::Sop,
            Form::Pos => Mode::Pos,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "kmap")]
#[command(about = "Karnaugh map minimizer for 1-4 variables", long_about = None)]
#[command(version)]
struct Args {
    /// Cells in minterm order, e.g. "1,0,X,1" or "10X1"
    #[arg(value_name = "CELLS")]
    cells: Option<String>,

    /// Read cells from a file (`#` starts a comment)
    #[arg(short = 'f', long = "file", conflicts_with = "cells")]
    file: Option<PathBuf>,

    /// Build the map from a Boolean expression, e.g. "A'B + CD"
    #[arg(short = 'e', long = "expr", conflicts_with_all = ["cells", "file"])]
    expr: Option<String>,

    /// Expression marking the don't-care cells
    #[arg(short = 'd', long = "dont-care", requires = "expr")]
    dont_care: Option<String>,

    /// Number of variables for --expr (default: the highest variable used, at least 2)
    #[arg(short = 'n', long = "vars", requires = "expr")]
    vars: Option<usize>,

    /// Read a JSON request {"map": [...], "type": "SOP"}
    #[arg(short = 'r', long = "request", conflicts_with_all = ["cells", "file", "expr"])]
    request: Option<PathBuf>,

    /// Output form
    #[arg(short = 'm', long = "mode", value_enum, default_value = "sop")]
    mode: Form,

    /// Print the result as JSON
    #[arg(long = "json")]
    json: bool,

    /// Print the K-map grid with group ids
    #[arg(long = "map")]
    map: bool,

    /// Print the explanation prompt for the result
    #[arg(long = "explain-prompt")]
    explain_prompt: bool,

    /// Treat unusual cell counts as a 4-variable map
    #[arg(long = "lenient")]
    lenient: bool,

    /// Provide execution summary
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Log every minimization step
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            match record.level() {
                Level::Error | Level::Warn => {
                    eprintln!("{}: {}", record.level(), record.args())
                }
                _ => eprintln!("{}", record.args()),
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(args: &Args) {
    let level = if args.verbose {
        LevelFilter::Debug
    } else if args.summary {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn minimize(args: &Args, engine: &Engine) -> io::Result<Minimization> {
    let mode = Mode::from(args.mode);

    if let Some(ref path) = args.request {
        let text = fs::read_to_string(path)?;
        let request: SimplifyRequest = serde_json::from_str(&text)?;
        info!("request from {}", path.display());
        return Ok(engine.simplify_request(&request)?);
    }

    let cells = if let Some(ref text) = args.expr {
        let num_vars = match args.vars {
            Some(n) => n,
            None => Expr::parse(text)?.required_vars().max(2),
        };
        cells_from_expressions(text, args.dont_care.as_deref(), num_vars)?
    } else if let Some(ref path) = args.file {
        let file = File::open(path).map_err(|e| {
            io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;
        read_cells(BufReader::new(file))?
    } else if let Some(ref text) = args.cells {
        parse_cells(text)?
    } else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no input given (pass CELLS, --file, --expr or --request)",
        ));
    };

    if let Some(ref text) = args.expr {
        info!("cells for {}: {}", text, cells.iter().map(|c| c.as_char()).collect::<String>());
    }
    Ok(engine.simplify(&cells, mode)?)
}

fn print_result(result: &Minimization) {
    println!("Simplified ({}): {}", result.mode, result.simplified_expression);
    println!("Original:        {}", result.original_expression);
    println!("Minterms:        {:?}", result.minterms);
    println!("Maxterms:        {:?}", result.maxterms);
    println!("Don't-cares:     {:?}", result.dontcares);
    if result.implicants.is_empty() {
        return;
    }
    println!("Groups:");
    for (rank, implicant) in result.implicants.iter().enumerate() {
        let group_id = rank + 1;
        let rects: Vec<String> = result
            .rects_for(group_id)
            .map(|g| {
                format!(
                    "({},{})-({},{})",
                    g.row_start, g.col_start, g.row_end, g.col_end
                )
            })
            .collect();
        let colour = result
            .rects_for(group_id)
            .next()
            .map(|g| g.color_tag.as_str())
            .unwrap_or("-");
        println!(
            "  {}. {} eliminates [{}] {} {}",
            group_id,
            implicant,
            result.eliminated_variables(group_id).join(", "),
            colour,
            rects.join(" ")
        );
    }
}

fn run(args: &Args) -> io::Result<()> {
    let config = KmapConfig::default().with_lenient_variable_count(args.lenient);
    let engine = Engine::new(config);

    let result = minimize(args, &engine)?;

    if args.json {
        println!("{}", result.to_json()?);
    } else {
        print_result(&result);
    }

    if args.map {
        match KmapView::new(&result) {
            Some(view) => {
                println!();
                print!("{}", view);
            }
            None => eprintln!("No grid layout for a {}-variable map", result.num_vars),
        }
    }

    if args.explain_prompt {
        let mut slot = ResultSlot::new();
        slot.store(result);
        let prompt = explain_latest(&slot, &PromptExplainer)?;
        println!();
        print!("{}", prompt);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if args.summary {
        eprintln!("Done.");
    }
}
