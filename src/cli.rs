use crate::domain::constants::DEFAULT_PORT;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "add-models",
    version,
    about = "Copy exported Qwirkle Counter models into models/pretrained"
)]
pub struct AddModelsCli {
    #[arg(
        long,
        default_value = ".",
        help = "Repository root that receives models/pretrained"
    )]
    pub root: PathBuf,
}

#[derive(Parser, Debug)]
#[command(
    name = "serve",
    version,
    about = "Serve a directory for local testing of the Qwirkle Counter app"
)]
pub struct ServeCli {
    #[arg(long, default_value_t = DEFAULT_PORT, help = "TCP port to listen on")]
    pub port: u16,
    #[arg(
        long,
        default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        help = "Interface address to bind"
    )]
    pub bind: IpAddr,
    #[arg(long, default_value = ".", help = "Directory to serve")]
    pub dir: PathBuf,
}
