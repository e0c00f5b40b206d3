use anyhow::Context;
use clap::Parser;
use otpick::account::AccountStore;
use otpick::clipboard::{ClipboardSink, CommandClipboard};
use otpick::hotp::OtpParams;
use otpick::matcher::{self, Resolution};
use otpick::output::{self, CodeEntry, CodeSet};
use otpick::resolver::{self, ResolverError, SecretResolver};
use otpick::{config, totp};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;
use tracing::warn;

/// One-time password generator with fuzzy account picking
#[derive(Debug, Parser)]
#[command(name = "otpick", version, about)]
struct Cli {
    /// Account to pick: an identifier fragment, a pattern, or an index
    /// from the listing. Omit to list codes for every account.
    query: Option<String>,

    /// Print only the bare code of the best match
    #[arg(short, long)]
    quiet: bool,

    /// Accounts file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let path = match args.config {
        Some(path) => path,
        None => config::default_path()?,
    };
    let mut store = config::load(&path)?;
    anyhow::ensure!(
        !store.is_empty(),
        "no accounts configured in {}",
        path.display()
    );

    // Discharge empty secrets before validation; a newly learned secret
    // goes back into the accounts file.
    if resolver::fill_missing(&mut store, &PromptResolver)? {
        config::save(&path, &store)?;
    }
    store.validate()?;

    let params = OtpParams::default();
    let now = SystemTime::now();
    let set = match matcher::resolve(args.query.as_deref(), &store)? {
        Resolution::ListAll => CodeSet::Listing(code_entries(&store, 0..store.len(), now, &params)?),
        Resolution::Index(index) => CodeSet::Ranked(code_entries(&store, [index], now, &params)?),
        Resolution::Matched(candidates) => CodeSet::Ranked(code_entries(
            &store,
            candidates.iter().map(|c| c.index),
            now,
            &params,
        )?),
        Resolution::NoMatch => return Ok(()),
    };

    let rendered = output::render(&set, args.quiet);
    let mut stdout = io::stdout().lock();
    for line in &rendered.lines {
        writeln!(stdout, "{line}")?;
    }
    if let Some(code) = rendered.clipboard {
        if let Err(error) = CommandClipboard.copy(&code) {
            warn!(%error, "could not copy the code to the clipboard");
        }
    }
    Ok(())
}

fn code_entries(
    store: &AccountStore,
    indices: impl IntoIterator<Item = usize>,
    now: SystemTime,
    params: &OtpParams,
) -> anyhow::Result<Vec<CodeEntry>> {
    indices
        .into_iter()
        .filter_map(|index| store.get(index).map(|account| (index, account)))
        .map(|(index, account)| {
            let secret = account
                .decoded_secret()
                .with_context(|| format!("secret for {} failed to decode", account.identifier))?;
            let code = totp::generate_at(&secret, now, params);
            Ok(CodeEntry {
                code: output::format_code(code, params.digits),
                index,
                identifier: account.identifier.clone(),
            })
        })
        .collect()
}

/// Asks for missing secrets on the terminal. Persisting the answer is the
/// caller's job (it rewrites the accounts file), so `persist` here only
/// leaves a trace.
struct PromptResolver;

impl SecretResolver for PromptResolver {
    fn resolve(&self, identifier: &str) -> Result<Option<String>, ResolverError> {
        eprint!("Secret for {identifier}: ");
        io::stderr().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let secret = line.trim().to_string();
        Ok((!secret.is_empty()).then_some(secret))
    }

    fn persist(&self, identifier: &str, _secret: &str) {
        tracing::debug!(identifier, "secret will be written to the accounts file");
    }
}
