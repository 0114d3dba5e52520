use chrono::Utc;
use env_logger::Env;
use items_api::command_line_interface;
use items_api::item_repository::ItemRepository;
use items_api::warp_api;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().filter_or("RUST_LOG", "info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli_options = &*command_line_interface::PARSED;
    // Volatile storage: everything is lost when the process exits.
    let repository = Arc::new(Mutex::new(ItemRepository::new()));

    // Start web framework
    warp_api::run_server(cli_options, repository).await;
}
