use salescope_dashboard::{wait_for_shutdown, DashboardConfig, DashboardServer};
use tokio::signal;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,salescope_dashboard=info,tower_http=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let config = DashboardConfig::load();
    let server = match DashboardServer::from_config(config) {
        Ok(server) => server,
        Err(e) => {
            error!(target: "dashboard", error = %e, "Failed to load sales data");
            std::process::exit(1);
        }
    };

    server.serve(wait_for_shutdown(signal::ctrl_c())).await?;
    Ok(())
}
