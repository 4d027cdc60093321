use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for moodcoach
#[derive(Parser)]
#[command(
    name = "moodcoach",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check in by text or voice: detect your mood and get two small goals to act on",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of ~/.moodcoach/moodcoach.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override history file path (useful for tests or a separate journal)
    #[arg(global = true, long = "history", value_name = "FILE")]
    pub history: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and an empty history
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Tell the coach how you feel and get goals back
    #[command(group(ArgGroup::new("input").required(true).args(["text", "voice"])))]
    Checkin {
        /// What you feel, as text
        #[arg(long, short = 't')]
        text: Option<String>,

        /// A WAV recording of what you feel
        #[arg(long, short = 'v', value_name = "FILE")]
        voice: Option<String>,

        /// Also write the response as speech
        #[arg(long)]
        speak: bool,
    },

    /// Show recent check-ins
    History {
        #[arg(long, short = 'n', help = "How many rows to show (default from config)")]
        limit: Option<usize>,
    },

    /// Show how your mood was distributed recently
    Mood {
        #[arg(long, short = 'd', help = "Window in days (default from config)")]
        days: Option<i64>,
    },

    /// List pending goals
    Goals {
        #[arg(long, help = "Include completed goals")]
        all: bool,
    },

    /// Mark goals as completed
    #[command(group(ArgGroup::new("target").required(true).args(["ids", "index"])))]
    Done {
        /// Goal ids (or unique prefixes) as shown by `goals`
        ids: Vec<String>,

        /// Row positions in the history file (0-based)
        #[arg(long = "index", num_args = 1.., value_name = "N")]
        index: Vec<usize>,
    },

    /// Interactive session (text or voice)
    Session {
        #[arg(long, help = "Start in voice mode")]
        voice: bool,

        #[arg(long, help = "Speak coach responses")]
        speak: bool,
    },
}
