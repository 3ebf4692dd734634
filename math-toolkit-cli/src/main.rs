use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use math_toolkit::calculator::{Calculator, Key};
use math_toolkit::converter;
use math_toolkit::interpreter::scientific::{evaluate_scientific, AngleMode, ScientificFunction};
use math_toolkit::interpreter::{convert, evaluate, format_number, normalize};
use math_toolkit::quiz::{
    questions_or_fallback, Difficulty, FallbackGenerator, JsonFileProvider, MathQuestion,
    QuestionProvider, QuizGame,
};
use std::io;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Evaluates arithmetic, converts units and plays a math quiz
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluates an arithmetic expression
    Eval {
        /// The expression to evaluate, e.g. "2 + 3 * 4"
        #[clap(allow_hyphen_values = true)]
        expression: String,

        /// Also print the expression tree
        #[clap(long)]
        tree: bool,
    },
    /// Applies a scientific function to the value of an expression
    Sci {
        /// One of sin, cos, tan, sqrt, log, ln, square
        function: ScientificFunction,

        #[clap(allow_hyphen_values = true)]
        expression: String,

        /// Interpret angles in degrees instead of radians
        #[clap(long)]
        degrees: bool,
    },
    /// Converts an amount between two units of a category
    Convert {
        /// Length, Weight or Data
        category: String,
        #[clap(allow_hyphen_values = true)]
        amount: String,
        from: String,
        to: String,
    },
    /// Presses keypad keys in order and shows the calculator display
    Keys {
        /// Keys such as 7 . + x = esc backspace neg % mode sqrt
        #[clap(required = true, allow_hyphen_values = true)]
        keys: Vec<Key>,

        /// Start the calculator in degree mode
        #[clap(long)]
        degrees: bool,
    },
    /// Plays a multiple choice quiz on the terminal
    Quiz {
        #[clap(long, default_value = "easy")]
        difficulty: Difficulty,

        /// JSON file with a question set, used instead of generated questions
        #[clap(long, env = "MATH_TOOLKIT_QUESTIONS")]
        questions: Option<PathBuf>,

        /// Seed for reproducible generated questions
        #[clap(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(
            args.verbose
                .log_level()
                .map_or(LevelFilter::Off, |level| level.to_level_filter()),
        )
        .init();
    debug!("{:?}", args.command);

    match args.command {
        Command::Eval { expression, tree } => run_eval(&expression, tree),
        Command::Sci {
            function,
            expression,
            degrees,
        } => run_scientific(function, &expression, angle_mode(degrees)),
        Command::Convert {
            category,
            amount,
            from,
            to,
        } => run_convert(&category, &amount, &from, &to),
        Command::Keys { keys, degrees } => run_keys(&keys, degrees),
        Command::Quiz {
            difficulty,
            questions,
            seed,
        } => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_quiz(difficulty, questions, seed, stdin.lock(), stdout.lock())
        }
    }
}

fn angle_mode(degrees: bool) -> AngleMode {
    if degrees {
        AngleMode::Degrees
    } else {
        AngleMode::Radians
    }
}

fn run_eval(expression: &str, tree: bool) -> Result<()> {
    let value =
        evaluate(expression).with_context(|| format!("Failed to evaluate '{}'", expression))?;
    let normalized = normalize(expression)?;
    println!("{} = {}", normalized, format_number(value));
    if tree {
        let tree = convert(expression)?;
        print!("{}", tree);
    }
    Ok(())
}

fn run_scientific(function: ScientificFunction, expression: &str, mode: AngleMode) -> Result<()> {
    let value = evaluate_scientific(expression, function, mode)
        .with_context(|| format!("Failed to calculate {}({})", function, expression))?;
    println!("{}({}) = {} [{}]", function, expression, format_number(value), mode);
    Ok(())
}

fn run_convert(category: &str, amount: &str, from: &str, to: &str) -> Result<()> {
    let category = converter::category(category)?;
    let amount = converter::parse_amount(amount)?;
    let converted = converter::convert(category, amount, from, to)
        .with_context(|| format!("Failed to convert {} {} to {}", amount, from, to))?;
    println!(
        "{} {} = {} {}",
        converter::format_conversion(amount),
        from,
        converter::format_conversion(converted),
        to
    );
    Ok(())
}

fn run_keys(keys: &[Key], degrees: bool) -> Result<()> {
    let mut calculator = Calculator::new();
    if degrees {
        calculator.toggle_angle_mode();
    }
    for key in keys {
        calculator.press(*key);
    }
    println!("[{}] {}", calculator.angle_mode(), calculator.expression_line());
    println!("{}", calculator.display());
    if let Some(error) = calculator.last_error() {
        eprintln!("{}", error);
    }
    Ok(())
}

fn run_quiz(
    difficulty: Difficulty,
    questions_file: Option<PathBuf>,
    seed: Option<u64>,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    let mut fallback = match seed {
        Some(seed) => FallbackGenerator::with_seed(seed),
        None => FallbackGenerator::new(),
    };
    let mut file_provider = questions_file.map(JsonFileProvider::new);
    let provider = file_provider
        .as_mut()
        .map(|provider| provider as &mut dyn QuestionProvider);

    let mut game = QuizGame::new(difficulty);
    game.start(questions_or_fallback(provider, &mut fallback, difficulty))?;
    writeln!(output, "{} quiz", difficulty)?;

    while let Some(question) = game.current_question().cloned() {
        let (number, total) = game.progress();
        writeln!(output, "\nQuestion {} of {}: {}", number, total, question.question)?;
        for (index, option) in question.options.iter().enumerate() {
            writeln!(output, "  {}) {}", index + 1, format_number(*option))?;
        }

        let choice = read_choice(&question, &mut input, &mut output)?;
        let outcome = game.answer(choice)?;
        if outcome.correct {
            writeln!(output, "Correct!")?;
        } else {
            writeln!(output, "Wrong, the answer is {}.", format_number(outcome.answer))?;
        }
        writeln!(output, "{}", outcome.explanation)?;
        game.next_question()?;
    }

    writeln!(output, "\nScore: {} / {}", game.score(), game.max_score())?;
    writeln!(output, "{}", game.summary())?;
    Ok(())
}

/// Reads an option number until a valid one is entered.
fn read_choice(
    question: &MathQuestion,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<f64> {
    loop {
        write!(output, "Your answer (1-{}): ", question.options.len())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read answer")? == 0 {
            bail!("Quiz ended before every question was answered");
        }
        let chosen = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| question.options.get(index));
        match chosen {
            Some(option) => return Ok(*option),
            None => writeln!(output, "'{}' is not an option number.", line.trim())?,
        }
    }
}
