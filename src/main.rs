use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use wordnav::{
    Config, Direction, GestureKey, NavigationOutcome, Navigator, PolicyKind, TextBuffer,
    assignment::ASSIGNMENTS, boundaries, document::LineView, logging,
};

/// Word, fine-word and bulky-word navigation over plain text
#[derive(Parser)]
#[command(name = "wordnav")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log navigation decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the unit boundaries of a line of text
    Boundaries {
        text: String,

        #[arg(short, long, value_enum, default_value_t = PolicyArg::Word)]
        policy: PolicyArg,

        /// Print each unit instead of the offsets
        #[arg(short, long)]
        segments: bool,
    },
    /// Move a caret through a file and print every unit it lands on
    Navigate {
        file: PathBuf,

        /// Starting line (0-indexed)
        #[arg(long, default_value_t = 0)]
        line: usize,

        /// Starting column in chars (0-indexed)
        #[arg(long, default_value_t = 0)]
        column: usize,

        #[arg(short, long, value_enum, default_value_t = DirectionArg::Right)]
        direction: DirectionArg,

        /// Policy to navigate by; overrides --key
        #[arg(short, long, value_enum)]
        policy: Option<PolicyArg>,

        /// Gesture family whose configured policy is used
        #[arg(short, long, value_enum, default_value_t = KeyArg::RightControl)]
        key: KeyArg,

        /// Number of moves (0 walks until the document is exhausted)
        #[arg(short, long, default_value_t = 1)]
        repeat: usize,
    },
    /// Initialize default configuration file
    InitConfig,
    /// List the command assignment presets
    ListAssignments,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Word,
    Fine,
    Bulky,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Word => PolicyKind::Word,
            PolicyArg::Fine => PolicyKind::FineWord,
            PolicyArg::Bulky => PolicyKind::BulkyWord,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Left,
    Right,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Left => Direction::Backward,
            DirectionArg::Right => Direction::Forward,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KeyArg {
    LeftControl,
    RightControl,
    ControlWindows,
}

impl From<KeyArg> for GestureKey {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::LeftControl => GestureKey::LeftControl,
            KeyArg::RightControl => GestureKey::RightControl,
            KeyArg::ControlWindows => GestureKey::ControlWindows,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Commands::InitConfig = cli.command {
        return init_config(cli.config);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default(),
    };

    match cli.command {
        Commands::Boundaries {
            text,
            policy,
            segments,
        } => print_boundaries(&config, &text, policy, segments),
        Commands::Navigate {
            file,
            line,
            column,
            direction,
            policy,
            key,
            repeat,
        } => navigate(
            &config,
            NavigateArgs {
                file,
                line,
                column,
                direction: direction.into(),
                policy,
                key: key.into(),
                repeat,
            },
        ),
        Commands::ListAssignments => {
            list_assignments(&config);
            Ok(())
        }
        Commands::InitConfig => unreachable!("handled before the config is loaded"),
    }
}

fn print_boundaries(config: &Config, text: &str, policy: PolicyArg, segments: bool) -> Result<()> {
    let policy = PolicyKind::from(policy).compile(&config.navigation.bulky_word_punctuation)?;
    let offsets = boundaries(text, &policy);

    if segments {
        let line = LineView::new(0, text);
        for window in offsets.windows(2) {
            println!("{}\t{:?}", window[0], line.slice(window[0], window[1]));
        }
    } else {
        let offsets: Vec<String> = offsets.iter().map(|o| o.to_string()).collect();
        println!("{}", offsets.join(" "));
    }

    Ok(())
}

struct NavigateArgs {
    file: PathBuf,
    line: usize,
    column: usize,
    direction: Direction,
    policy: Option<PolicyArg>,
    key: GestureKey,
    repeat: usize,
}

fn navigate(config: &Config, args: NavigateArgs) -> Result<()> {
    let mut buffer = TextBuffer::from_file(&args.file)?;
    buffer.set_caret(args.line, args.column);

    let navigation = &config.navigation;
    let policies = navigation.key_policies()?;
    let explicit = args
        .policy
        .map(|arg| PolicyKind::from(arg).compile(&navigation.bulky_word_punctuation))
        .transpose()?;

    let navigator = match &explicit {
        Some(policy) => Navigator::new(policy)
            .with_max_paragraph_crossings(policies.max_paragraph_crossings()),
        None => policies
            .navigator(args.key)
            .ok_or_else(|| miette::miette!("No policy is assigned to {:?}", args.key))?,
    };

    let mut moves = 0;
    while args.repeat == 0 || moves < args.repeat {
        match navigator.move_by_unit(&mut buffer, args.direction) {
            NavigationOutcome::Moved(span) if span.is_empty() => {
                println!("{}:{}\t<end of line>", span.paragraph, span.start);
            }
            NavigationOutcome::Moved(span) => {
                let text = buffer
                    .last_announcement()
                    .map(|(_, text)| text.as_str())
                    .unwrap_or_default();
                println!("{}:{}-{}\t{:?}", span.paragraph, span.start, span.end, text);
            }
            NavigationOutcome::BoundaryExhausted => {
                println!("exhausted");
                break;
            }
        }
        moves += 1;
    }

    Ok(())
}

fn init_config(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(Config::default_config_path);

    if config_path.exists() {
        eprintln!("Config file already exists at: {}", config_path.display());
        eprintln!("Remove it first or edit it manually.");
        return Ok(());
    }

    Config::default().save_to_file(&config_path)?;
    println!("Created default config file at: {}", config_path.display());

    let written = std::fs::read_to_string(&config_path).into_diagnostic()?;
    print!("{written}");
    Ok(())
}

fn list_assignments(config: &Config) {
    for (index, assignment) in ASSIGNMENTS.iter().enumerate() {
        let marker = if index == config.navigation.assignment_index {
            "*"
        } else {
            " "
        };
        println!("{marker} {index:>2}  {assignment}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_writes_to_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cli = Cli::try_parse_from([
            "wordnav",
            "init-config",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::InitConfig));
        init_config(cli.config).unwrap();

        let written = Config::load_from_file(&path).unwrap();
        assert_eq!(written.navigation.assignment_index, 9);
    }
}
