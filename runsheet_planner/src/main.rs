use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use runsheet_planner::{create_form, parse_plan, Plan};
use runsheet_roster::clients::{FileClient, SampleClient};
use runsheet_roster::RosterList;
use runsheet_rs::form::{ServiceForm, SetListCategory};
use runsheet_rs::http::{Credentials, Spotify, Track};
use runsheet_rs::search::SetListSearch;
use runsheet_rs::{InstrumentType, Roster, RosterKind, SlotId};
use tracing_subscriber::EnvFilter;

/// Service run-sheet planner
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a schedule from a plan and print the run-sheet
    Build {
        /// ex. --plan res/plan.toml
        #[arg(short, long)]
        plan: PathBuf,

        #[command(flatten)]
        roster: RosterArgs,

        /// Write the schedule JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the loaded rosters
    Roster {
        #[command(flatten)]
        roster: RosterArgs,

        /// ex. --instrument Drums --instrument Keyboard
        #[arg(short, long = "instrument")]
        instruments: Vec<String>,
    },

    /// List the candidates each slot can still take
    Eligible {
        #[arg(short, long)]
        plan: Option<PathBuf>,

        #[command(flatten)]
        roster: RosterArgs,

        /// ex. --slot vocal:0 --slot musician:Drums (all slots when omitted)
        #[arg(short, long = "slot")]
        slots: Vec<String>,
    },

    /// Search the music catalog
    Search {
        /// ex. "amazing grace" "goodness of god"
        #[arg(required = true)]
        queries: Vec<String>,

        #[arg(short, long, default_value_t = runsheet_rs::search::DEFAULT_LIMIT)]
        limit: u32,

        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Type queries into a set-list field and print the debounced suggestions
    Suggest {
        /// praise / worship / altarCall / revival
        #[arg(short, long, default_value = "praise")]
        category: String,

        /// ex. am ama amazing
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Milliseconds between inputs
        #[arg(long, default_value_t = 100)]
        interval: u64,

        /// Debounce delay in milliseconds
        #[arg(long, default_value_t = 500)]
        delay: u64,

        #[arg(short, long, default_value_t = runsheet_rs::search::DEFAULT_LIMIT)]
        limit: u32,

        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

#[derive(clap::Args, Debug)]
struct RosterArgs {
    /// CSV with `table,id,name,category` (the bundled sample when omitted)
    #[arg(short, long)]
    roster: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct CredentialArgs {
    #[arg(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    client_id: String,

    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,
}

impl CredentialArgs {
    fn create_client(&self) -> anyhow::Result<Spotify> {
        let credentials = Credentials::new(&self.client_id, &self.client_secret);
        Ok(Spotify::new(credentials)?)
    }
}

fn load_roster(args: &RosterArgs) -> anyhow::Result<Roster> {
    let roster = match &args.roster {
        Some(path) => runsheet_roster::load(&mut FileClient::new(path))
            .with_context(|| format!("failed to load roster {}", path.display()))?,
        None => runsheet_roster::load(&mut SampleClient)?,
    };
    log::info!("loaded {} candidates", roster.len());
    Ok(roster)
}

fn load_plan(path: &Path) -> anyhow::Result<Plan> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan {}", path.display()))?;
    let plan = parse_plan(&data).with_context(|| format!("invalid plan {}", path.display()))?;
    Ok(plan)
}

fn build_form(plan: Option<&Path>, roster: Roster) -> anyhow::Result<ServiceForm> {
    let form = match plan {
        Some(path) => create_form(&load_plan(path)?, roster)?,
        None => ServiceForm::new(roster),
    };

    // 逆転した項目は合計に入らない
    if let Err(error) = form.programme.validate() {
        log::warn!("{error}");
    }
    Ok(form)
}

fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        println!("(no results)");
    }

    for (index, track) in tracks.iter().enumerate() {
        println!(
            "{}. {} - {} [{}] {}",
            index + 1,
            track.title(),
            track.artist(),
            track.album(),
            track.url()
        );
    }
}

fn build(plan: &Path, roster: &RosterArgs, output: Option<&Path>) -> anyhow::Result<()> {
    let form = build_form(Some(plan), load_roster(roster)?)?;
    let schedule = form.to_schedule();
    print!("{}", schedule.summary());

    if let Some(output) = output {
        std::fs::write(output, schedule.to_json()?)
            .with_context(|| format!("failed to write {}", output.display()))?;
        log::info!("wrote schedule {} to {}", schedule.token, output.display());
    }

    Ok(())
}

fn roster(roster: &RosterArgs, instruments: &[String]) -> anyhow::Result<()> {
    let mut list = RosterList::new(load_roster(roster)?);
    for instrument in instruments {
        let filter = InstrumentType::from_label(instrument)
            .ok_or_else(|| anyhow!("unknown instrument `{instrument}`"))?;
        list.add_filter(filter);
    }

    if !instruments.is_empty() {
        for candidate in list.musicians() {
            println!(
                "{}\t{}\t{}",
                candidate.id(),
                candidate.name(),
                candidate.category().unwrap_or_default()
            );
        }
        return Ok(());
    }

    for kind in RosterKind::ALL {
        println!("[{}]", kind.table_name());
        for candidate in list.roster().candidates(kind) {
            match candidate.category() {
                Some(category) => println!("{}\t{}\t{}", candidate.id(), candidate.name(), category),
                None => println!("{}\t{}", candidate.id(), candidate.name()),
            }
        }
    }
    Ok(())
}

fn eligible(plan: Option<&Path>, roster: &RosterArgs, slots: &[String]) -> anyhow::Result<()> {
    let form = build_form(plan, load_roster(roster)?)?;
    let slots = if slots.is_empty() {
        form.team().slots()
    } else {
        slots
            .iter()
            .map(|slot| SlotId::parse(slot))
            .collect::<runsheet_rs::Result<Vec<_>>>()?
    };

    for slot in slots {
        let label = form.team().slot_label(slot).unwrap_or_default().to_string();
        let names: Vec<String> = form
            .eligible(slot)?
            .iter()
            .map(|candidate| match form.selected(slot) {
                Some(selected) if selected.id() == candidate.id() => {
                    format!("*{}", candidate.name())
                }
                _ => candidate.name().to_string(),
            })
            .collect();
        println!("{slot} ({label}): {}", names.join(", "));
    }
    Ok(())
}

async fn search(queries: &[String], limit: u32, credentials: &CredentialArgs) -> anyhow::Result<()> {
    let client = credentials.create_client()?;

    // トークンを先に取っておけば各検索で使い回せる
    client.ensure_authenticated().await?;

    let results = join_all(
        queries
            .iter()
            .map(|query| client.search_tracks(query, limit)),
    )
    .await;

    for (query, result) in queries.iter().zip(results) {
        println!("# {query}");
        match result {
            Ok(tracks) => print_tracks(&tracks),
            Err(error) => log::error!("search for `{query}` failed: {error}"),
        }
    }
    Ok(())
}

async fn suggest(
    category: &str,
    inputs: &[String],
    interval: Duration,
    delay: Duration,
    limit: u32,
    credentials: &CredentialArgs,
) -> anyhow::Result<()> {
    let category = SetListCategory::from_key(category)
        .ok_or_else(|| anyhow!("unknown set list category `{category}`"))?;
    let search = SetListSearch::with_options(credentials.create_client()?, delay, limit);

    for input in inputs {
        log::debug!("input `{input}`");
        search.input(category, input);
        tokio::time::sleep(interval).await;
    }

    // 最後の入力から待って、検索が終わるまで見る
    tokio::time::sleep(delay).await;
    let finished = tokio::time::timeout(Duration::from_secs(10), async {
        while search.is_loading(category) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await;
    if finished.is_err() {
        log::warn!("search did not finish in time");
    }

    print_tracks(&search.tracks(category));
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Build {
            plan,
            roster,
            output,
        } => build(&plan, &roster, output.as_deref()),
        Command::Roster {
            roster: roster_args,
            instruments,
        } => roster(&roster_args, &instruments),
        Command::Eligible {
            plan,
            roster,
            slots,
        } => eligible(plan.as_deref(), &roster, &slots),
        Command::Search {
            queries,
            limit,
            credentials,
        } => search(&queries, limit, &credentials).await,
        Command::Suggest {
            category,
            inputs,
            interval,
            delay,
            limit,
            credentials,
        } => {
            suggest(
                &category,
                &inputs,
                Duration::from_millis(interval),
                Duration::from_millis(delay),
                limit,
                &credentials,
            )
            .await
        }
    }
}

// ex. runsheet_planner build --plan runsheet_planner/res/plan.toml --output schedule.json
// ログは RUST_LOG=debug などで
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run().await
}
