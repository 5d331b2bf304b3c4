mod change;
mod config;
mod error;
mod inventory;
mod provider;
mod session;
mod submit;
mod zone;

#[cfg(test)]
mod testing;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::change::ChangeAction;
use crate::config::Config;
use crate::provider::{DnsZoneApi, InstanceSource};
use crate::session::Session;
use crate::submit::SubmitOutcome;

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "ec2-to-r53")]
#[command(
    about = "Reads all EC2 instance names in an account and writes an A record with the instance name and private IP into a Route 53 zone"
)]
struct Args {
    /// Route 53 change action applied to every record
    #[arg(value_enum)]
    action: ChangeAction,

    /// Dry run. Print the change batch, apply nothing
    #[arg(long)]
    dry_run: bool,

    /// AWS cli profile
    #[arg(long, value_name = "PROFILE")]
    profile: Option<String>,

    /// Route 53 zone name or zone id
    #[arg(long, value_name = "ZONE")]
    zone: String,

    /// AWS region, overrides the profile's region
    #[arg(long, value_name = "REGION")]
    region: Option<String>,

    /// Path to an optional configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{:#}", e);
                return ExitCode::from(EXIT_FAILURE);
            }
        },
        None => Config::default(),
    };

    init_logger(&config.log_level);

    if let Some(path) = &args.config {
        info!("Loaded configuration from: {}", path.display());
    }

    let session_config = config.session(args.profile.clone(), args.region.clone());
    let session = Session::load(&session_config).await;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = sync(&session.ec2(), &session.route53(), &args, &mut out).await;

    ExitCode::from(report(result, &mut out, &mut io::stderr()))
}

/// List instances, resolve the zone, build the batch, then submit or print it
async fn sync<S, A, W>(
    ec2: &S,
    route53: &A,
    args: &Args,
    out: &mut W,
) -> error::Result<SubmitOutcome>
where
    S: InstanceSource + ?Sized,
    A: DnsZoneApi + ?Sized,
    W: Write,
{
    let records = inventory::list_instances(ec2).await?;
    let zone = zone::resolve_zone(route53, &args.zone).await?;
    let batch = change::build_batch(&records, args.action, &zone.name);

    let outcome = submit::submit(route53, &zone, &batch, args.dry_run, out).await?;
    out.flush()?;

    Ok(outcome)
}

/// Print the final message or diagnostic and pick the process exit status
fn report<W, E>(result: error::Result<SubmitOutcome>, out: &mut W, err: &mut E) -> u8
where
    W: Write,
    E: Write,
{
    match result {
        Ok(SubmitOutcome::Applied { change_id, status }) => {
            info!("Route 53 change {} is {}", change_id, status);
            let _ = writeln!(out, "All records applied.");
            EXIT_SUCCESS
        }
        Ok(SubmitOutcome::DryRun) => EXIT_SUCCESS,
        Err(e) => {
            debug!("{:?}", e);
            let _ = writeln!(err, "{}", e);
            EXIT_FAILURE
        }
    }
}

fn init_logger(default_level: &str) {
    // Env var takes precedence over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
            let now = OffsetDateTime::now_utc()
                .format(format)
                .unwrap_or_default();
            writeln!(buf, "{} {:<5} {}", now, record.level(), record.args())
        })
        .init();
}
