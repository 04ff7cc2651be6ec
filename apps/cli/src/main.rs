use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use adressbook_config::{load as load_config, AppConfig};
use adressbook_database::seed_demo_data;
use adressbook_members::{CreateMemberRequest, Member, MemberFilter, UpdateMemberRequest};
use adressbook_runtime::{telemetry, BackendServices};
use tracing::info;

#[derive(Parser)]
#[command(name = "adressbook")]
#[command(about = "Manage the members of the adressbook")]
struct Cli {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search members by exact field values (no filter lists everyone)
    Search(MemberFields),
    /// Create a new member
    Create(MemberFields),
    /// Show a single member
    Show { id: String },
    /// Overwrite the given fields of a member
    Update {
        id: String,
        #[command(flatten)]
        fields: MemberFields,
    },
    /// Delete a member
    Delete { id: String },
    /// Insert the demo members if the collection is empty
    Seed,
}

#[derive(Args, Debug, Default, Clone)]
struct MemberFields {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    member_number: Option<String>,
}

impl From<MemberFields> for MemberFilter {
    fn from(fields: MemberFields) -> Self {
        Self {
            first_name: fields.first_name,
            last_name: fields.last_name,
            member_number: fields.member_number,
        }
    }
}

impl From<MemberFields> for CreateMemberRequest {
    fn from(fields: MemberFields) -> Self {
        Self {
            first_name: fields.first_name,
            last_name: fields.last_name,
            member_number: fields.member_number,
        }
    }
}

impl From<MemberFields> for UpdateMemberRequest {
    fn from(fields: MemberFields) -> Self {
        Self {
            first_name: fields.first_name,
            last_name: fields.last_name,
            member_number: fields.member_number,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;
    let config = prepare_config(&cli.command, config);

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let members = &services.members;
    match cli.command {
        Commands::Search(fields) => {
            let found = members
                .search(&fields.into())
                .await
                .context("failed to search members")?;
            print_members(&found, cli.json)?;
        }
        Commands::Create(fields) => {
            let created = members
                .create(fields.into())
                .await
                .context("failed to create member")?;
            print_members(std::slice::from_ref(&created), cli.json)?;
        }
        Commands::Show { id } => {
            let member = members
                .read(&id)
                .await
                .with_context(|| format!("failed to read member {id}"))?;
            print_optional_member(&id, member, cli.json)?;
        }
        Commands::Update { id, fields } => {
            let member = members
                .update(&id, &fields.into())
                .await
                .with_context(|| format!("failed to update member {id}"))?;
            print_optional_member(&id, member, cli.json)?;
        }
        Commands::Delete { id } => {
            let deleted = members
                .delete(&id)
                .await
                .with_context(|| format!("failed to delete member {id}"))?;
            println!("deleted {deleted} member(s)");
        }
        Commands::Seed => {
            let inserted = seed_demo_data(&services.connection.members())
                .await
                .context("failed to seed demo members")?;
            info!(inserted, "seed finished");
            println!("inserted {inserted} demo member(s)");
        }
    }

    services.connection.close().await;
    Ok(())
}

/// `seed` does its own seeding so it can report how many members were inserted
fn prepare_config(command: &Commands, mut config: AppConfig) -> AppConfig {
    if matches!(command, Commands::Seed) {
        config.database.seed_demo_data = false;
    }
    config
}

fn print_optional_member(id: &str, member: Option<Member>, json: bool) -> anyhow::Result<()> {
    match member {
        Some(member) => print_members(std::slice::from_ref(&member), json),
        None => {
            println!("no member with id {id}");
            Ok(())
        }
    }
}

fn print_members(members: &[Member], json: bool) -> anyhow::Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(members).context("failed to serialise members")?;
        println!("{rendered}");
    } else {
        print!("{}", format_table(members));
    }
    Ok(())
}

fn format_table(members: &[Member]) -> String {
    if members.is_empty() {
        return "No members found\n".to_string();
    }

    let mut table = format!(
        "{:<26} {:<20} {:<20} {:<15}\n",
        "ID", "First Name", "Last Name", "Member Number"
    );
    table.push_str(&"-".repeat(84));
    table.push('\n');

    for member in members {
        table.push_str(&format!(
            "{:<26} {:<20} {:<20} {:<15}\n",
            member.id.to_hex(),
            member.first_name,
            member.last_name,
            member.member_number
        ));
    }
    table
}
