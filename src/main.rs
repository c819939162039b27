//! nkv - interactive command translator
//!
//! Reads shell lines from stdin and prints the wire command each one
//! translates to. Nothing is sent anywhere; the output can be piped into
//! any client that speaks the target protocol.

use nkv::keys::DEFAULT_NS_SEPARATOR;
use bytes::BytesMut;
use nkv::shell::{decode_line, parse_line, split_line, Shell, ShellCommand};
use nkv::translator::RedisTranslator;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Shell configuration
struct Config {
    /// Namespace separator used by `ns`
    separator: String,
    /// Log at debug level
    verbose: bool,
    /// Print a prompt before each line
    prompt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DEFAULT_NS_SEPARATOR.to_string(),
            verbose: false,
            prompt: true,
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--separator" | "-s" => {
                    if i + 1 < args.len() {
                        config.separator = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --separator requires a value");
                        std::process::exit(1);
                    }
                }
                "--verbose" => {
                    config.verbose = true;
                    i += 1;
                }
                "--no-prompt" => {
                    config.prompt = false;
                    i += 1;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("nkv version {}", nkv::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        config
    }
}

fn print_help() {
    println!(
        r#"
nkv - Key/Value Command Translator

USAGE:
    nkv [OPTIONS]

OPTIONS:
    -s, --separator <SEP>    Namespace separator (default: ":")
        --verbose            Log translation details to stderr
        --no-prompt          Do not print a prompt (for piped input)
    -v, --version            Print version information
    -h, --help               Print this help message

EXAMPLES:
    $ nkv
    nkv> create user:1 hash name Ariz city Paris
    HMSET user:1 name Ariz city Paris
    nkv> load user:1 hash
    HGETALL user:1
    nkv> ttl user:1 none
    PERSIST user:1

    $ echo "delete a\x00b" | nkv --no-prompt
    DEL \x61\x00\x62
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_args();

    // Logs go to stderr so stdout carries only commands
    let default_level = if config.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let shell = Shell::new(RedisTranslator::default(), config.separator.clone());
    info!(separator = %config.separator, "Shell started");

    run(shell, config.prompt).await?;

    info!("Shell stopped");
    Ok(())
}

/// Initial capacity of the input line buffer
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Main read-translate-print loop.
///
/// Input is read as raw bytes so a line that is not UTF-8 is reported like
/// any other bad line instead of ending the shell.
async fn run(shell: Shell, prompt: bool) -> anyhow::Result<()> {
    let mut stdin = tokio::io::stdin();
    let mut buffer = BytesMut::with_capacity(INITIAL_BUFFER_SIZE);
    let mut stdout = tokio::io::stdout();

    loop {
        if prompt {
            stdout.write_all(b"nkv> ").await?;
            stdout.flush().await?;
        }

        let line = loop {
            if let Some(line) = split_line(&mut buffer) {
                break Some(line);
            }
            if stdin.read_buf(&mut buffer).await? == 0 {
                // Last line may lack a trailing newline
                break (!buffer.is_empty()).then(|| buffer.split().freeze());
            }
        };

        let Some(line) = line else {
            debug!("End of input");
            break;
        };

        let output = match decode_line(&line).and_then(parse_line) {
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(cmd)) => shell.execute(&cmd).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };

        match output {
            Ok(Some(text)) => {
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Line rejected");
                stdout.write_all(format!("(error) {}\n", e).as_bytes()).await?;
            }
        }
        stdout.flush().await?;
    }

    Ok(())
}
