use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sentaku::codec;
use sentaku::prelude::*;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt};

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Full,
    WithoutExpression,
    Compact,
    Minimal,
}

impl From<FormatCli> for AnswerFormat {
    fn from(format: FormatCli) -> Self {
        match format {
            FormatCli::Full => AnswerFormat::Full,
            FormatCli::WithoutExpression => AnswerFormat::WithoutExpression,
            FormatCli::Compact => AnswerFormat::Compact,
            FormatCli::Minimal => AnswerFormat::Minimal,
        }
    }
}

/// Validate and play templated roll expressions with staged parameter selection
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional path to a limits JSON file; missing keys use the defaults
    #[arg(short, long, global = true)]
    limits: Option<String>,

    /// How the answer is presented
    #[arg(short, long, value_enum, global = true)]
    format: Option<FormatCli>,

    /// Channel id the answer is routed to
    #[arg(short, long, global = true)]
    target: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Explore every corner-case path of a template and report the first problem
    Validate { template: String },
    /// Select the parameters of a template interactively, then roll it
    Play {
        template: String,
        /// Name the selection is locked for
        #[arg(short, long, default_value = "cli")]
        user: String,
        /// Seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let limits = match &cli.limits {
        Some(path) => Limits::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load limits from '{}': {}", path, e))
        }),
        None => Limits::default(),
    };

    match cli.command {
        Command::Validate { ref template } => {
            let config = build_config(template, &cli);
            run_validate(&config, &limits);
        }
        Command::Play {
            ref template,
            ref user,
            seed,
        } => {
            let config = build_config(template, &cli);
            run_play(config, &limits, user, seed);
        }
    }
}

fn build_config(template: &str, cli: &Cli) -> Config {
    let mut config = Config::new(template);
    if let Some(format) = cli.format {
        config = config.with_answer_format(format.into());
    }
    if let Some(target) = cli.target {
        config = config.with_answer_target(target);
    }
    config
}

fn run_validate(config: &Config, limits: &Limits) {
    let start = Instant::now();
    let result = Validator::new(limits.clone()).validate(config, &DiceEvaluator::new());
    let duration = start.elapsed();

    match result {
        Ok(()) => println!("Template is valid (checked in {:?})", duration),
        Err(e) => exit_with_error(&format!("Template is invalid: {}", e)),
    }
}

fn run_play(config: Config, limits: &Limits, user: &str, seed: Option<u64>) {
    let evaluator = DiceEvaluator::new();
    if let Err(e) = Validator::new(limits.clone()).validate(&config, &evaluator) {
        exit_with_error(&format!("Template is invalid: {}", e));
    }
    let flow = ParameterFlow::new(config, limits)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));

    let mut state = FlowState::default();
    let roll = loop {
        let prompt = flow.render_prompt(&state);
        println!("\n{}", prompt.text);
        let buttons: Vec<_> = prompt.buttons().collect();
        for (i, button) in buttons.iter().enumerate() {
            println!("  {:>2}: {}", i + 1, button.label);
        }

        let choice = prompt_for_input("Select a button", None);
        let Some(button) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| buttons.get(i))
        else {
            println!("Invalid choice. Please enter 1 to {}.", buttons.len());
            continue;
        };

        // Handle the click the way the platform delivers it: from the button id.
        let wire = codec::decode(&button.id)
            .unwrap_or_else(|e| exit_with_error(&format!("Button id is corrupt: {}", e)));
        let clicked_state = FlowState {
            selections: wire.selections,
            locked_user_name: state.locked_user_name.clone(),
        };
        match flow.on_click(&clicked_state, &wire.click_value, user) {
            ClickOutcome::Complete { roll, .. } => break roll,
            ClickOutcome::Continue(next) | ClickOutcome::Cleared(next) => state = next,
            ClickOutcome::Ignored { reason, .. } => println!("Click ignored: {}", reason),
        }
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let result = evaluator
        .roll_with(&roll.expression, &mut rng)
        .unwrap_or_else(|e| exit_with_error(&format!("Roll failed: {}", e)));

    println!();
    if let Some(label) = &roll.label {
        println!("{}", label);
    }
    println!("  -> {}", result.details);
    println!("  -> Total: {}", result.total);
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to write prompt: {}", e));
    }
    match io::stdin().read_line(&mut line) {
        Ok(0) => exit_with_error("Input closed before the selection was complete"),
        Ok(_) => {}
        Err(e) => exit_with_error(&format!("Failed to read line: {}", e)),
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
