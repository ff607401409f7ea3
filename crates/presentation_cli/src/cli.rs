//! Command-line definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use domain::{Page, Role};

/// WaterOps CLI
#[derive(Debug, Parser)]
#[command(name = "waterops-cli")]
#[command(author, version, about = "WaterOps water utility client", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./waterops.toml when present)
    #[arg(short, long, env = "WATEROPS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long, env = "WATEROPS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create a regular user account, then log in with it
    Register {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Contact email
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(long)]
        full_name: Option<String>,

        /// Password, at least six characters
        #[arg(short, long, env = "WATEROPS_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the session state and identity
    Whoami,

    /// List the views available to the current role
    Routes,

    /// Show dashboard counters
    Dashboard,

    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Water infrastructure and leaks
    Infrastructure {
        #[command(subcommand)]
        action: InfrastructureAction,
    },

    /// Water quality samples and alerts
    Quality {
        #[command(subcommand)]
        action: QualityAction,
    },

    /// Citizen complaints
    Complaints {
        #[command(subcommand)]
        action: ComplaintsAction,
    },

    /// Assets and maintenance
    Assets {
        #[command(subcommand)]
        action: AssetsAction,
    },

    /// Demand records, forecasts and plans
    Demand {
        #[command(subcommand)]
        action: DemandAction,
    },

    /// Notifications
    Notifications {
        #[command(subcommand)]
        action: NotificationsAction,
    },
}

impl Commands {
    /// View a command belongs to; `None` for session commands
    pub const fn route(&self) -> Option<&'static str> {
        match self {
            Self::Login { .. }
            | Self::Register { .. }
            | Self::Logout
            | Self::Whoami
            | Self::Routes => None,
            Self::Dashboard => Some("/dashboard"),
            Self::Users { .. } => Some("/admin/users"),
            Self::Infrastructure { .. } => Some("/water-infrastructure"),
            Self::Quality { .. } => Some("/water-quality"),
            Self::Complaints { .. } => Some("/complaints"),
            Self::Assets { .. } => Some("/assets"),
            Self::Demand { .. } => Some("/demand-forecasting"),
            Self::Notifications { .. } => Some("/notifications"),
        }
    }
}

/// Paging window for list commands
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Records to skip
    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    /// Maximum records to return
    #[arg(long, default_value_t = Page::DEFAULT_LIMIT)]
    pub limit: u32,
}

impl PageArgs {
    /// Window as a domain page
    pub const fn page(self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List users
    List(PageArgs),
    /// Show one user
    Get { id: i64 },
    /// Register a user
    Create {
        #[arg(long)]
        username: String,
        #[arg(long, env = "WATEROPS_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },
    /// Change a user
    Update {
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a user
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum InfrastructureAction {
    /// List infrastructure objects
    List(PageArgs),
    /// Show one object
    Get { id: i64 },
    /// Leaks recorded for one object
    Leaks { id: i64 },
    /// Every recorded leak
    AllLeaks(PageArgs),
}

#[derive(Debug, Subcommand)]
pub enum QualityAction {
    /// List samples
    List(PageArgs),
    /// Show one sample
    Get { id: i64 },
    /// List alerts
    Alerts(PageArgs),
    /// Acknowledge an alert
    Acknowledge { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ComplaintsAction {
    /// List complaints
    List(PageArgs),
    /// Show one complaint
    Get { id: i64 },
    /// Assign a complaint to a user
    Assign {
        id: i64,
        /// Assignee user id
        #[arg(long = "to")]
        assigned_to: i64,
    },
    /// Mark a complaint resolved
    Resolve { id: i64 },
    /// List complaint categories
    Categories,
}

#[derive(Debug, Subcommand)]
pub enum AssetsAction {
    /// List assets
    List(PageArgs),
    /// Show one asset
    Get { id: i64 },
    /// Maintenance history of one asset
    Maintenance {
        asset_id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Assets with maintenance due
    Due,
}

#[derive(Debug, Subcommand)]
pub enum DemandAction {
    /// List demand records
    List(PageArgs),
    /// Show one record
    Get { id: i64 },
    /// Demand forecast
    Forecast {
        #[arg(long)]
        location: Option<String>,
        /// Lower date bound, e.g. 2024-01-01
        #[arg(long)]
        from: Option<String>,
        /// Upper date bound
        #[arg(long)]
        to: Option<String>,
    },
    /// Distribution plans
    DistributionPlans(PageArgs),
    /// Investment plans
    InvestmentPlans(PageArgs),
}

#[derive(Debug, Subcommand)]
pub enum NotificationsAction {
    /// Notifications of the current user
    List(PageArgs),
    /// Mark one notification read
    Read { id: i64 },
    /// Mark all notifications read
    ReadAll,
    /// Delivery settings of a user
    Settings { user_id: i64 },
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
