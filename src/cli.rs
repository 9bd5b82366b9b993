// CLI definitions using clap

use clap::{Args, Parser, Subcommand};
use klc_driver::preset::{parse_color, parse_wave, Preset, PresetKind};
use klc_keyboard::{Color, Model, Region, WaveDirection};
use klc_transport::PacketFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "klc_driver")]
#[command(author, version, about = "Per-key RGB keyboard lighting driver")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print every packet sent to the device
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Show a full hex dump of monitored packets
    #[arg(long, global = true)]
    pub hex: bool,

    /// Filter monitored packets (all, feat, writes, id=0e)
    #[arg(long, global = true)]
    pub filter: Option<PacketFilter>,

    /// Config file (default: ~/.config/klc-driver/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Effect applied uniformly to every selected key
#[derive(Args, Clone)]
pub struct EffectArgs {
    /// steady, breathing, shift, reactive or off
    #[arg(short, long, default_value = "steady")]
    pub effect: PresetKind,

    /// Main color (#RRGGBB or a name)
    #[arg(short, long, default_value = "white", value_parser = parse_color)]
    pub color: Color,

    /// Second stop for breathing/shift, press color for reactive
    #[arg(long, value_parser = parse_color)]
    pub color2: Option<Color>,

    /// Effect duration in controller ticks
    #[arg(short, long, default_value_t = 1000)]
    pub duration: u16,

    /// Wave direction for color shifts (xy, x, y)
    #[arg(long, value_parser = parse_wave)]
    pub wave: Option<WaveDirection>,
}

impl EffectArgs {
    pub fn preset(&self) -> Preset {
        Preset {
            kind: self.effect,
            color: self.color,
            color2: self.color2,
            duration: self.duration,
            wave: self.wave,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported models
    #[command(visible_alias = "m")]
    Models,

    /// Print the physical layout of a model
    #[command(visible_alias = "k")]
    Keys {
        /// Keyboard model (full-size, compact)
        #[arg(short, long)]
        model: Option<Model>,
    },

    /// Print the packets of a uniform lighting program without a device
    #[command(visible_alias = "d")]
    Dump {
        #[arg(short, long)]
        model: Option<Model>,

        #[command(flatten)]
        effect: EffectArgs,

        /// Only push these regions (repeatable)
        #[arg(short, long = "region")]
        regions: Vec<Region>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Print whole packets instead of trimming trailing zeros
        #[arg(long)]
        full: bool,
    },

    /// Push a uniform lighting program to a device
    #[command(visible_alias = "a")]
    Apply {
        /// hidraw device path, e.g. /dev/hidraw3
        #[arg(short = 'D', long)]
        device: String,

        #[arg(short, long)]
        model: Option<Model>,

        #[command(flatten)]
        effect: EffectArgs,

        /// Only push these regions (repeatable)
        #[arg(short, long = "region")]
        regions: Vec<Region>,
    },

    /// Turn every key off
    Off {
        #[arg(short = 'D', long)]
        device: String,

        #[arg(short, long)]
        model: Option<Model>,
    },

    /// Read effect lines from stdin and apply them, debounced
    ///
    /// Each line takes the same options as `apply`, e.g. `-e breathing -c red`.
    Live {
        #[arg(short = 'D', long)]
        device: String,

        #[arg(short, long)]
        model: Option<Model>,
    },
}

/// One line of `live` input
#[derive(Parser)]
#[command(name = "live", no_binary_name = true)]
pub struct LiveLine {
    #[command(flatten)]
    pub effect: EffectArgs,

    #[arg(short, long = "region")]
    pub regions: Vec<Region>,
}
