use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ember::profile::Variant;
use ember::window::{self, ShellConfig};

/// Fire, smoke and spray particle effects.
#[derive(Parser, Debug)]
#[command(name = "ember", version, about)]
struct Cli {
    /// Effect to run
    #[arg(long, value_enum, default_value_t = VariantArg::Fire)]
    variant: VariantArg,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Where the S key writes screenshots
    #[arg(long, default_value = "screenshot.png")]
    screenshot_path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// Flames turning into smoke
    Fire,
    /// A water fountain
    Spray,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Fire => Variant::FireSmoke,
            VariantArg::Spray => Variant::Spray,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ShellConfig {
        variant: cli.variant.into(),
        seed: cli.seed,
        screenshot_path: cli.screenshot_path,
    };

    if let Err(e) = window::run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from(["ember", "--variant", "spray", "--seed", "42"]);
        assert_eq!(Variant::from(cli.variant), Variant::Spray);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.screenshot_path, PathBuf::from("screenshot.png"));

        let cli = Cli::parse_from(["ember"]);
        assert_eq!(Variant::from(cli.variant), Variant::FireSmoke);
        assert_eq!(cli.seed, None);
    }
}
