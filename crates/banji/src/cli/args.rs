//! Clap argument definitions for the `banji` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "banji")]
#[command(about = "School records and class question analytics")]
pub struct Cli {
    /// Path to a banji.toml config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported `banji` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create banji.toml and an empty school database
    Init(InitCommand),

    /// Seed a sample classroom to try the reports on
    Demo,

    /// Add a record
    Add {
        /// What to add
        #[command(subcommand)]
        what: AddWhat,
    },

    /// Enroll a student in a class
    Enroll {
        /// Student id
        student: i64,
        /// Class id
        class: i64,
    },

    /// List records
    Ls {
        /// What to list
        #[command(subcommand)]
        what: LsWhat,
    },

    /// Per-student statistics
    Stats {
        /// Which statistic
        #[command(subcommand)]
        what: StatsWhat,
    },

    /// Generate keyword report images for a class
    Report {
        /// Which report
        #[command(subcommand)]
        what: ReportWhat,
    },
}

/// Arguments for `banji init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// What to add with `banji add`.
#[derive(Subcommand, Debug, Clone)]
pub enum AddWhat {
    /// Add a student
    Student {
        /// Full name
        name: String,

        /// School-issued student number
        #[arg(long)]
        number: Option<String>,

        /// Age in years
        #[arg(long)]
        age: Option<i64>,

        /// Contact email
        #[arg(long)]
        email: Option<String>,

        /// Grade level label
        #[arg(long)]
        grade: Option<String>,
    },

    /// Add a teacher
    Teacher {
        /// Full name
        name: String,

        /// Subject taught
        #[arg(long)]
        subject: Option<String>,

        /// Office or classroom
        #[arg(long)]
        room: Option<String>,
    },

    /// Add a class
    Class {
        /// Class name
        name: String,

        /// Teacher in charge, by id
        #[arg(long)]
        teacher: Option<i64>,

        /// Subject label
        #[arg(long)]
        subject: Option<String>,

        /// Term label
        #[arg(long)]
        term: Option<String>,
    },

    /// Record a student question
    Query {
        /// Asking student, by id
        student: i64,

        /// Question text
        question: String,

        /// Class context, by id
        #[arg(long)]
        class: Option<i64>,

        /// Teacher the question was directed at, by id
        #[arg(long)]
        teacher: Option<i64>,

        /// Recorded answer
        #[arg(long)]
        answer: Option<String>,
    },
}

/// What to list with `banji ls`.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum LsWhat {
    /// List all students
    Students,
    /// List all classes
    Classes,
}

/// Which statistic for `banji stats`.
#[derive(Subcommand, Debug, Clone)]
pub enum StatsWhat {
    /// Question counts per enrolled student
    Counts {
        /// Restrict to one class
        #[arg(long)]
        class: Option<i64>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Score totals and averages per enrolled student
    Scores {
        /// Restrict to one class
        #[arg(long)]
        class: Option<i64>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Which report for `banji report`.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ReportWhat {
    /// Keyword frequency bar chart
    Hist {
        /// Class id
        class: i64,
    },

    /// Weighted keyword word cloud
    Cloud {
        /// Class id
        class: i64,
    },

    /// Both report images
    All {
        /// Class id
        class: i64,
    },
}
