use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(about = "File-backed record management for people, offerings, and links")]
pub struct Cli {
    /// Directory holding the backing documents
    #[arg(long, default_value = "data", global = true)]
    pub data_dir: PathBuf,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage person records
    #[command(subcommand)]
    Person(PersonCommand),

    /// Manage offering records
    #[command(subcommand)]
    Offering(OfferingCommand),

    /// Manage links between people and offerings
    #[command(subcommand)]
    Link(LinkCommand),

    /// Copy a collection's backing document to a timestamped .bak file
    Backup { collection: String },
}

#[derive(Debug, Subcommand)]
pub enum PersonCommand {
    /// Add a new person
    Add {
        id: String,
        name: String,
        email: String,
        program: String,
    },
    /// Show one person by id
    Get { id: String },
    /// List all people in insertion order
    List,
    /// Update the given fields of a person
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        program: Option<String>,
    },
    /// Remove a person
    Remove { id: String },
    /// Search by name substring and/or exact program
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        program: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum OfferingCommand {
    /// Add a new offering
    Add {
        code: String,
        title: String,
        credits: i64,
        instructor: String,
    },
    /// Show one offering by code
    Get { code: String },
    /// List all offerings in insertion order
    List,
    /// Update the given fields of an offering
    Update {
        code: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        credits: Option<i64>,
        #[arg(long)]
        instructor: Option<String>,
    },
    /// Remove an offering
    Remove { code: String },
    /// Search by code, title, and/or instructor substrings
    Search {
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        instructor: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum LinkCommand {
    /// Link a person to an offering
    Add {
        person_id: String,
        offering_code: String,
    },
    /// Remove a link
    Remove {
        person_id: String,
        offering_code: String,
    },
    /// Assign a score to an existing link
    Grade {
        person_id: String,
        offering_code: String,
        score: f64,
    },
    /// List all links for a person
    ForPerson { person_id: String },
    /// List all links for an offering
    ForOffering { offering_code: String },
    /// Average score for a person
    PersonAverage { person_id: String },
    /// Average score for an offering
    OfferingAverage { offering_code: String },
}
