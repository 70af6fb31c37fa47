// ctrans: C-subset to Java/Python transpiler with a pipeline viewer

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use ctrans::codegen::Dialect;
use ctrans::run_pipeline;
use ctrans::ui::App;

/// Command-line options
struct Options {
    input: String,
    dialect: Dialect,
    print: bool,
    strict: bool,
}

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} <file.c> [--java | --python | --dialect <name>] [--print] [--strict]",
        program_name
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --java, --python   Output dialect (default: Java)");
    eprintln!("  --dialect <name>   Same, by name: java, python");
    eprintln!("  --print            Write the translation to stdout instead of opening the viewer");
    eprintln!("  --strict           Fail if any part of the input was skipped");
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} demos/showcase.c            # Explore the pipeline in the viewer",
        program_name
    );
    eprintln!(
        "  {} prog.c --python --print     # Translate to Python on stdout",
        program_name
    );
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut input = None;
    let mut dialect = Dialect::default();
    let mut print = false;
    let mut strict = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--java" => dialect = Dialect::Java,
            "--python" => dialect = Dialect::Python,
            "--dialect" => {
                let name = iter
                    .next()
                    .ok_or_else(|| "--dialect requires a value".to_string())?;
                dialect = name.parse()?;
            }
            "--print" => print = true,
            "--strict" => strict = true,
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option '{}'", flag));
            }
            path => {
                if input.replace(path.to_string()).is_some() {
                    return Err("Only one input file may be given".to_string());
                }
            }
        }
    }

    let input = input.ok_or_else(|| "No input file provided".to_string())?;
    Ok(Options {
        input,
        dialect,
        print,
        strict,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("ctrans");

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    if !Path::new(&options.input).exists() {
        eprintln!("Error: File '{}' not found", options.input);
        print_usage(program_name);
        std::process::exit(1);
    }

    let source = fs::read_to_string(&options.input)?;

    eprintln!("Transpiling {} to {}...", options.input, options.dialect);
    let run = run_pipeline(&source, options.dialect);
    let top_level = match &run.program {
        ctrans::parser::ast::AstNode::Program { body } => body.len(),
        _ => 0,
    };
    eprintln!(
        "Read {} tokens, {} top-level declarations.",
        run.tokens.len(),
        top_level
    );

    for diagnostic in &run.diagnostics {
        eprintln!("  {}", diagnostic);
    }

    if options.strict && !run.diagnostics.is_empty() {
        eprintln!(
            "Strict mode: {} diagnostic(s), no output written.",
            run.diagnostics.len()
        );
        std::process::exit(1);
    }

    if options.print {
        let mut stdout = io::stdout();
        stdout.write_all(run.output.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(&options.input, source, options.dialect);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
