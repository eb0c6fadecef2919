use clap::Parser;
use crossword_csp::{render_grid, solve, Crossword, FillFailure, SolverConfig};
use log::info;
use std::fmt::{Debug, Formatter};
use std::fs;
use std::path::PathBuf;

/// crossword-csp: Fill a crossword structure with words from a word list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the structure file, with _ representing open cells and anything else a block
    structure: PathBuf,

    /// Path to the word list, one word per line
    words: PathBuf,

    /// Path to write the rendered fill to, in addition to printing it
    output: Option<PathBuf>,

    /// Propagate each choice to crossing slots during search
    #[arg(long)]
    inference: bool,
}

struct Error(String);

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0) // Print error unquoted
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let crossword = Crossword::from_files(&args.structure, &args.words)
        .map_err(|error| Error(error.to_string()))?;

    info!(
        "loaded {} slots and {} words",
        crossword.variables().len(),
        crossword.words().len()
    );

    let config = SolverConfig {
        maintain_arc_consistency: args.inference,
    };

    match solve(&crossword, &config) {
        Ok(result) => {
            info!("{:?}", result.statistics);

            let display_grid = render_grid(&crossword, &result.assignment);
            println!("{}", display_grid);

            if let Some(output) = args.output {
                fs::write(&output, display_grid + "\n").map_err(|_| {
                    Error(format!("Couldn't write file '{}'", output.display()))
                })?;
            }
        }
        Err(FillFailure::UnsatisfiableByPropagation { variable_id }) => {
            info!(
                "no words left for {} after propagation",
                crossword.variable(variable_id)
            );
            println!("No solution.");
        }
        Err(FillFailure::NoSolutionFound { statistics }) => {
            info!("{:?}", statistics);
            println!("No solution.");
        }
    }

    Ok(())
}
