use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::runtime::config::{parse_difficulty, parse_speed};
use crate::runtime::SessionConfig;

pub const USAGE: &str = "\
usage: tilerise [options]

  --width <n>          grid columns (default 6)
  --height <n>         grid rows (default 12)
  --speed <label|ms>   slowest, slow, normal, fast, fastest or a tick interval
  --difficulty <label|rows>
                       beginner, easy, normal, hard, expert, impossible or a row count
  --seed <n>           row generator seed
  --headless           resolve animations inline
  --anim-ms <n>        simulated animation length (default 120)
  --swap-ms <n>        autoplayer swap interval (default 250)
  --max-ticks <n>      stop after this many ticks
  --watch              draw the board instead of printing JSON lines
  -h, --help           print this help";

/// Command line overrides; anything left `None` keeps the environment's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub width: Option<u8>,
    pub height: Option<u8>,
    pub speed_ms: Option<u32>,
    pub starting_rows: Option<u8>,
    pub seed: Option<u32>,
    pub headless: bool,
    pub anim_ms: Option<u64>,
    pub swap_ms: Option<u64>,
    pub max_ticks: Option<u64>,
    pub watch: bool,
    pub help: bool,
}

impl CliOptions {
    pub fn apply(&self, config: &mut SessionConfig) {
        if let Some(width) = self.width {
            config.settings.width = width;
        }
        if let Some(height) = self.height {
            config.settings.height = height;
        }
        if let Some(speed_ms) = self.speed_ms {
            config.settings.speed_ms = speed_ms;
        }
        if let Some(rows) = self.starting_rows {
            config.settings.starting_rows = rows;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.headless {
            config.headless = true;
        }
        if self.max_ticks.is_some() {
            config.max_ticks = self.max_ticks;
        }
    }

    pub fn animation_delay(&self) -> Duration {
        Duration::from_millis(self.anim_ms.unwrap_or(120))
    }

    pub fn swap_interval(&self) -> Duration {
        Duration::from_millis(self.swap_ms.unwrap_or(250).max(1))
    }
}

pub fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => options.help = true,
            "--headless" => options.headless = true,
            "--watch" => options.watch = true,
            "--width" => options.width = Some(number(args, &mut i, flag)?),
            "--height" => options.height = Some(number(args, &mut i, flag)?),
            "--seed" => options.seed = Some(number(args, &mut i, flag)?),
            "--anim-ms" => options.anim_ms = Some(number(args, &mut i, flag)?),
            "--swap-ms" => options.swap_ms = Some(number(args, &mut i, flag)?),
            "--max-ticks" => options.max_ticks = Some(number(args, &mut i, flag)?),
            "--speed" => {
                let v = value(args, &mut i, flag)?;
                options.speed_ms =
                    Some(parse_speed(v).ok_or_else(|| anyhow!("invalid --speed value: {}", v))?);
            }
            "--difficulty" => {
                let v = value(args, &mut i, flag)?;
                options.starting_rows = Some(
                    parse_difficulty(v)
                        .ok_or_else(|| anyhow!("invalid --difficulty value: {}", v))?,
                );
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(options)
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn number<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T> {
    let v = value(args, i, flag)?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}
