// Commandline argument parser using clap for the Quimikey host.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Host-side companion for the Quimikey periodic-table device.
#[derive(Debug, Parser, Clone)]
#[clap(version, about)]
pub struct QuimikeyArgs {
    /// Path of the configuration file; created with defaults if missing
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    /// Which task to perform
    pub command: CommandTask,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CommandTask {
    /// Attach to the device and track element selections
    #[command(about)]
    Listen(ListenCommand),

    /// Look up a single element by symbol or name and print it
    #[command(about)]
    Lookup(LookupCommand),

    /// List the serial devices present on this machine
    #[command(about)]
    Ports,
}

#[derive(Debug, Args, Clone)]
#[command(version, about)]
pub struct ListenCommand {
    /// Serial device path, overriding the configuration file
    #[arg(short, long)]
    pub device: Option<PathBuf>,

    /// Baud rate, overriding the configuration file
    #[arg(short, long)]
    pub baudrate: Option<u32>,

    /// Element data file, overriding the configuration file
    #[arg(short, long)]
    pub elements: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
#[command(version, about)]
pub struct LookupCommand {
    /// Element symbol or full name, case-insensitive
    pub identifier: String,

    /// Element data file, overriding the configuration file
    #[arg(short, long)]
    pub elements: Option<PathBuf>,
}
