//! secret-santa: draw gift assignments for a group and email each gifter.

mod config;

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use santa_notify::{
    ConsoleMailer, DeliveryReport, Dispatcher, Envelope, Mailer, MailgunMailer, MessageTemplate,
};
use santa_pairing::{PairingEngine, SeededRandom};
use santa_roster::CsvLoader;

use crate::config::SantaConfig;

#[derive(Debug, Parser)]
#[command(
    name = "secret-santa",
    version,
    about = "Draw secret santa assignments and email them to every participant"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "./config.toml", env = "SANTA_CONFIG")]
    config: PathBuf,

    /// Path to the participants CSV (Name,Email,Partner,Interests).
    #[arg(
        short,
        long,
        default_value = "./participants.csv",
        env = "SANTA_PARTICIPANTS"
    )]
    participants: PathBuf,

    /// Custom message template (Jinja syntax). Defaults to the built-in letter.
    #[arg(short, long, env = "SANTA_EMAIL_TEMPLATE")]
    email_template: Option<PathBuf>,

    /// Print every message instead of sending it.
    #[arg(short, long)]
    dry_run: bool,

    /// Seed the draw so a run can be reproduced.
    #[arg(long)]
    seed: Option<u64>,

    /// Mailgun API key. Overrides `[mailgun] api_key` in the config file.
    #[arg(long, env = "SANTA_MAILGUN_API_KEY", hide_env_values = true)]
    mailgun_api_key: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Defaults to `[log] level` in the config file.
    #[arg(long, env = "SANTA_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    check_inputs(&cli)?;

    let config = SantaConfig::from_toml_file(&cli.config)?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.log.level.clone());
    santa_utils::init_logging(config.log.format, &level);

    match run(&cli, &config).await {
        Ok(report) => {
            tracing::info!(
                delivered = report.delivered,
                backend = %report.backend,
                "secret santa run complete"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "secret santa run failed");
            Err(e)
        }
    }
}

/// Both input files must exist before any work starts.
fn check_inputs(cli: &Cli) -> anyhow::Result<()> {
    for (what, path) in [("config", &cli.config), ("participants", &cli.participants)] {
        if !path.is_file() {
            bail!("{what} file not found: {}", path.display());
        }
    }
    Ok(())
}

async fn run(cli: &Cli, config: &SantaConfig) -> anyhow::Result<DeliveryReport> {
    let dispatcher = build_dispatcher(cli, config)?;
    tracing::info!(
        participants = %cli.participants.display(),
        dry_run = cli.dry_run,
        seed = ?cli.seed,
        "starting secret santa run"
    );
    Ok(dispatcher.run(&cli.participants).await?)
}

fn build_dispatcher(cli: &Cli, config: &SantaConfig) -> anyhow::Result<Dispatcher> {
    let domain = config.require_domain()?;
    let envelope = Envelope {
        subject: config.email.subject.clone(),
        sender_name: config.email.sender.name.clone(),
        sender_address: config.sender_address()?,
    };

    let template = match &cli.email_template {
        Some(path) => MessageTemplate::from_file(path, envelope)?,
        None => MessageTemplate::default_body(envelope)?,
    };

    let mailer: Box<dyn Mailer> = if cli.dry_run {
        Box::new(ConsoleMailer::stdout())
    } else {
        let api_key = config.mailgun_api_key(cli.mailgun_api_key.as_deref())?;
        Box::new(MailgunMailer::new(domain, api_key).with_base_url(&config.mailgun.base_url))
    };

    let mut dispatcher = Dispatcher::new(Box::new(CsvLoader::new()), template, mailer)
        .with_engine(PairingEngine::with_max_attempts(config.pairing.max_attempts));
    if let Some(seed) = cli.seed {
        dispatcher = dispatcher.with_random(Box::new(SeededRandom::new(seed)));
    }
    Ok(dispatcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use santa_notify::NotifyError;
    use std::path::Path;

    const BEDROCK: &str = "\
Name,Email,Partner,Interests
Barney,barney@bedrock.com,Betty,\"Bowling,Jokes,Movies\"
Fred,fred@bedrock.com,Wilma,\"Bowling,Dinosaurs,Golf\"
Wilma,wilma@bedrock.com,Fred,\"Cooking,Gardening,Shopping\"
Betty,betty@bedrock.com,Barney,\"Reading,Music,Crafts\"
Pebbles,pebbles@bedrock.com,,\"Exploring,Drawing,Sports\"
BamBam,bambam@bedrock.com,,\"Rock Music,Cave Painting,Athletics\"
";

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("secret-santa").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn short_flags_parse() {
        let cli = cli(&["-c", "c.toml", "-p", "p.csv", "-e", "letter.txt", "-d", "--seed", "7"]);
        assert_eq!(cli.config, PathBuf::from("c.toml"));
        assert_eq!(cli.participants, PathBuf::from("p.csv"));
        assert_eq!(cli.email_template, Some(PathBuf::from("letter.txt")));
        assert!(cli.dry_run);
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn defaults_point_at_working_directory() {
        let cli = cli(&["--dry-run"]);
        assert_eq!(cli.config, PathBuf::from("./config.toml"));
        assert_eq!(cli.participants, PathBuf::from("./participants.csv"));
        assert!(cli.email_template.is_none());
    }

    #[test]
    fn bad_seed_is_rejected() {
        assert!(Cli::try_parse_from(["secret-santa", "--seed", "many"]).is_err());
    }

    #[test]
    fn missing_participants_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = write(dir.path(), "config.toml", "[email]\ndomain = \"bedrock.com\"\n");
        let missing = dir.path().join("participants.csv");
        let cli = cli(&[
            "-c",
            config.to_str().unwrap(),
            "-p",
            missing.to_str().unwrap(),
        ]);

        let err = check_inputs(&cli).unwrap_err();
        assert!(err.to_string().starts_with("participants file not found"));
    }

    #[test]
    fn live_run_needs_api_key() {
        let config = SantaConfig::from_toml_str("[email]\ndomain = \"bedrock.com\"").unwrap();
        let err = build_dispatcher(&cli(&[]), &config).err().unwrap();
        assert!(err.to_string().contains("mailgun.api_key"));

        // Dry runs do not send, so no key is needed.
        assert!(build_dispatcher(&cli(&["--dry-run"]), &config).is_ok());
    }

    #[test]
    fn every_run_needs_domain() {
        let config = SantaConfig::default();
        let err = build_dispatcher(&cli(&["--dry-run"]), &config).err().unwrap();
        assert!(err.to_string().contains("email.domain"));
    }

    #[tokio::test]
    async fn seeded_dry_run_prints_every_assignment() {
        let dir = tempfile::tempdir().unwrap();
        let participants = write(dir.path(), "participants.csv", BEDROCK);
        let config = SantaConfig::from_toml_str("[email]\ndomain = \"bedrock.com\"").unwrap();
        let cli = cli(&["-d", "--seed", "42", "-p", participants.to_str().unwrap()]);

        let report = run(&cli, &config).await.unwrap();
        assert_eq!(report.delivered, 6);
        assert_eq!(report.backend, "console");
    }

    #[tokio::test]
    async fn custom_template_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let participants = write(dir.path(), "participants.csv", BEDROCK);
        let letter = write(dir.path(), "letter.txt", "{{ gifter.name }} -> {{ giftee.name }}");
        let config = SantaConfig::from_toml_str("[email]\ndomain = \"bedrock.com\"").unwrap();
        let cli = cli(&[
            "-d",
            "-p",
            participants.to_str().unwrap(),
            "-e",
            letter.to_str().unwrap(),
        ]);

        let report = run(&cli, &config).await.unwrap();
        assert_eq!(report.delivered, 6);
    }

    #[tokio::test]
    async fn unreachable_mailgun_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let participants = write(dir.path(), "participants.csv", BEDROCK);
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = SantaConfig::from_toml_str(&format!(
            "[email]\ndomain = \"bedrock.com\"\n[mailgun]\napi_key = \"key\"\nbase_url = \"http://{addr}\"\n"
        ))
        .unwrap();
        let cli = cli(&["-p", participants.to_str().unwrap()]);

        let err = run(&cli, &config).await.unwrap_err();
        match err.downcast_ref::<NotifyError>() {
            Some(NotifyError::Delivery { failed, total, .. }) => {
                assert_eq!(*failed, 6);
                assert_eq!(*total, 6);
            }
            other => panic!("expected delivery failure, got {other:?}"),
        }
    }
}
