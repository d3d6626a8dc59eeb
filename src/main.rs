use anyhow::Result;
use tracing::info;

fn main() -> Result<()> {
    // stdout belongs to the UCI protocol.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!("gambit starting");
    gambit_core::init();
    gambit_uci::UciEngine::new().run()?;
    Ok(())
}
