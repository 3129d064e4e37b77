use clap::Parser;

/// Lock In - A focus dashboard for your terminal 🔒
#[derive(Parser, Debug)]
#[command(name = "lockin", version, about)]
pub struct Args {
    /// Start with this playback volume (0-100)
    #[arg(long, short = 'v')]
    pub volume: Option<u8>,

    /// Start with the video surface hidden (audio only)
    #[arg(long)]
    pub hidden: bool,

    /// Focus session length in minutes (default: 25)
    #[arg(long, short = 'f')]
    pub focus_minutes: Option<u32>,

    /// Player binary to spawn (default: mpv)
    #[arg(long)]
    pub mpv_binary: Option<String>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
