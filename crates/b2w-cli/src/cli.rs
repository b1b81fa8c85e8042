use std::path::PathBuf;

use b2w_core::{LongDescription, PlatformChoice, WrapRequest};
use clap::{ArgAction, ArgGroup, Parser};

pub const B2W_AFTER_HELP: &str = concat!(
    "Platforms:\n",
    "  linux-x86_64   -> manylinux_2_17_x86_64\n",
    "  macos-arm64    -> macosx_11_0_arm64\n",
    "  macos-x86_64   -> macosx_10_15_x86_64\n",
    "  windows-x64    -> win_amd64\n",
    "  Canonical wheel platform tags are accepted as-is.\n\n",
    "Examples:\n",
    "  bin-to-wheel --name erpl-adt --version 2026.2.14 --binary build/erpl-adt \\\n",
    "      --platform linux-x86_64 --entry-point erpl-adt\n",
    "  bin-to-wheel --name my-tool --version 0.1.0 --binary my-tool --auto-platform\n",
);

#[derive(Parser, Debug)]
#[command(
    name = "bin-to-wheel",
    author,
    version,
    about = "Wrap a native executable into an installable Python wheel.",
    disable_version_flag = true,
    after_help = B2W_AFTER_HELP,
    group(
        ArgGroup::new("target_platform")
            .required(true)
            .args(["platform", "auto_platform"])
    )
)]
#[allow(clippy::struct_excessive_bools)]
pub struct B2wCli {
    #[arg(long, help = "Package name as published (hyphens allowed)")]
    pub name: String,
    #[arg(
        long = "version",
        id = "package_version",
        value_name = "VERSION",
        help = "Package version, used verbatim"
    )]
    pub package_version: String,
    #[arg(long, value_name = "PATH", help = "Native executable to wrap")]
    pub binary: PathBuf,
    #[arg(long, value_name = "TAG", help = "Target platform alias or canonical tag")]
    pub platform: Option<String>,
    #[arg(long, help = "Use the platform tag of the running host")]
    pub auto_platform: bool,
    #[arg(
        long,
        value_name = "DIR",
        help = "Directory for the wheel (default: $BIN_TO_WHEEL_OUT_DIR or dist)"
    )]
    pub output_dir: Option<PathBuf>,
    #[arg(long, value_name = "NAME", help = "Console command to install")]
    pub entry_point: Option<String>,
    #[arg(long, help = "One-line summary")]
    pub description: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long, value_name = "LICENSE")]
    pub license: Option<String>,
    #[arg(long, help = "Project home page")]
    pub url: Option<String>,
    #[arg(
        long,
        value_name = "MARKDOWN",
        conflicts_with = "readme",
        help = "Long description (Markdown)"
    )]
    pub long_description: Option<String>,
    #[arg(long, value_name = "PATH", help = "Read the long description from a Markdown file")]
    pub readme: Option<PathBuf>,
    #[arg(short, long, help = "Suppress human output (errors still print to stderr)")]
    pub quiet: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vv reaches debug)")]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q")]
    pub trace: bool,
    #[arg(long, help = "Emit {status,message,details} JSON envelopes")]
    pub json: bool,
    #[arg(long, help = "Disable colored human output")]
    pub no_color: bool,
}

impl B2wCli {
    pub fn wrap_request(&self) -> WrapRequest {
        let platform = match &self.platform {
            Some(tag) => PlatformChoice::Explicit(tag.clone()),
            None => PlatformChoice::Detect,
        };
        let long_description = match (&self.long_description, &self.readme) {
            (Some(text), _) => Some(LongDescription::Inline(text.clone())),
            (None, Some(path)) => Some(LongDescription::Readme(path.clone())),
            (None, None) => None,
        };
        WrapRequest {
            name: self.name.clone(),
            version: self.package_version.clone(),
            binary: self.binary.clone(),
            platform,
            output_dir: self.output_dir.clone(),
            entry_point: self.entry_point.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            license: self.license.clone(),
            url: self.url.clone(),
            long_description,
        }
    }
}
