use clap::Parser;
use log::info;
use std::error::Error;
use std::fmt;
use std::process;
use tur_zipper::{
    ProgramManager, Tape, DEFAULT_BLANK_SYMBOL, DEFAULT_INIT_MARGIN, MAX_EXECUTION_STEPS,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The built-in program to execute
    #[clap(short, long, required_unless_present = "list")]
    program: Option<String>,

    /// The initial tape content; the head starts on its first symbol
    #[clap(short, long, default_value = "")]
    input: String,

    /// The blank symbol filling every unexplored cell
    #[clap(short, long, default_value_t = DEFAULT_BLANK_SYMBOL)]
    blank: char,

    /// Blank cells to pre-allocate on each side of the tape
    #[clap(short, long, default_value_t = DEFAULT_INIT_MARGIN)]
    margin: usize,

    /// Abort the run after this many steps
    #[clap(long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the final tape as JSON
    #[clap(long)]
    json: bool,

    /// List the built-in programs
    #[clap(short, long)]
    list: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list {
        for index in 0..ProgramManager::get_program_count() {
            match ProgramManager::get_program_info(index) {
                Ok(info) => println!("{:<12} {}", info.name, info.description),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let name = cli.program.as_deref().unwrap_or_default();
    let highlight = atty::is(atty::Stream::Stdout);
    let tape = Tape::with_input(cli.blank, cli.margin, cli.input.chars());

    info!(
        "Running '{}' on {} input symbols (budget {} steps)",
        name,
        cli.input.chars().count(),
        cli.max_steps
    );

    let tape = ProgramManager::run_program(
        name,
        tape,
        cli.max_steps,
        &mut |tape: &Tape<char>, state: &dyn fmt::Debug, step: usize| {
            if cli.debug {
                println!("Step: {}, State: {:?}", step, state);
                print_tape(tape, highlight);
            }

            Ok(())
        },
    )?;

    if cli.json {
        println!("{}", serde_json::to_string(&tape)?);
    } else {
        if cli.debug {
            println!("\nFinal tape:");
        }
        print_tape(&tape, highlight);
    }

    Ok(())
}

fn print_tape(tape: &Tape<char>, highlight: bool) {
    if highlight {
        println!("{}", tape);
    } else {
        println!("{:#}", tape);
    }
}
