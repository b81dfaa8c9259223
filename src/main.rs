// SPDX-License-Identifier: MPL-2.0
use framemark::app::{self, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
FrameMark - video player with timestamp bookmarks

USAGE:
  framemark [OPTIONS] [URL...]

OPTIONS:
  --lang LANG         Interface language (e.g. en-US, fr)
  --config-dir DIR    Directory holding settings.toml
  -h, --help          Print this help

ARGS:
  URL...              Media files or URLs replacing the configured playlist
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let lang = args.opt_value_from_str("--lang").unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring invalid --lang value");
        None
    });
    let config_dir = args.opt_value_from_str("--config-dir").unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring invalid --config-dir value");
        None
    });
    let tracks = args
        .finish()
        .into_iter()
        .filter_map(|arg| arg.into_string().ok())
        .collect();

    app::run(Flags {
        lang,
        config_dir,
        tracks,
    })
}
