use lazy_static::lazy_static;
use std::net::IpAddr;
use std::net::SocketAddr;
use structopt::clap::AppSettings;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "Items API, an in-memory CRUD service for JSON items.",
    setting = AppSettings::DeriveDisplayOrder,
    setting = AppSettings::UnifiedHelpMessage,
    version = VERSION.as_ref(),
)]
pub struct CliOptions {
    /// Port to listen to.
    #[structopt(short, long, default_value = "3000", env = "ITEMS_PORT")]
    pub port: u16,

    /// Network interface to listen on.
    /// The default "0.0.0.0" accepts connections from any network;
    /// use "127.0.0.1" to only serve apps on the same computer.
    #[structopt(short, long, default_value = "0.0.0.0", env = "ITEMS_ADDRESS")]
    pub address: IpAddr,
}

impl CliOptions {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

lazy_static! {
    pub static ref VERSION: String = crate::internal_api::get_project_version().to_string();
}

lazy_static! {
    pub static ref PARSED: CliOptions = CliOptions::from_args();
}
