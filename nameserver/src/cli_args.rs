use std::path::PathBuf;
use argh::FromArgs;

fn default_config_path() -> PathBuf {
    PathBuf::from("./nameserver.toml")
}

#[derive(Debug, FromArgs)]
#[argh(description = "Authoritative DNS server answering from a static zone over UDP")]
pub struct CliArgs {
    #[argh(
        option,
        description = "config file path, default: './nameserver.toml'",
        default = "default_config_path()"
    )]
    pub config: PathBuf,
}
