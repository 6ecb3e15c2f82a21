use crate::domain::model::ContactForm;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "agency-site")]
#[command(about = "Content lookup and contact handling for the agency website")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List services, or show one by slug
    Services { slug: Option<String> },

    /// List case studies, or show one by slug
    CaseStudies { slug: Option<String> },

    /// Submit a contact inquiry through the configured notifier
    Contact(ContactArgs),

    /// Run the HTTP API
    Serve,

    /// Load and validate the configuration and content
    CheckConfig,
}

#[derive(Debug, Clone, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long, help = "websites | apps | m365 | hosting | marketing | other")]
    pub service: String,

    #[arg(long, help = "under-10k | 10k-25k | 25k-50k | 50k-100k | over-100k")]
    pub budget: String,

    #[arg(long, help = "asap | 1-3-months | 3-6-months | 6-12-months | flexible")]
    pub timeline: String,

    #[arg(long)]
    pub message: String,
}

impl From<ContactArgs> for ContactForm {
    fn from(args: ContactArgs) -> Self {
        ContactForm {
            name: args.name,
            email: args.email,
            company: args.company,
            phone: args.phone,
            service: args.service,
            budget: args.budget,
            timeline: args.timeline,
            message: args.message,
        }
    }
}
