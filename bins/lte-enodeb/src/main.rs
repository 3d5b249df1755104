use clap::Parser;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lte_config::{toml_config, SharedConfig};
use lte_core::debug;
use lte_entities::{Gw, TimerMgr, UserMgr};
use lte_msgq::{DestLayer, LayerMsgInner, Msgq};

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> SharedConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            println!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "LTE FDD eNodeB core",
    long_about = "Runs the LTE FDD eNodeB core (IP gateway, timer manager) using the provided TOML configuration file"
)]
struct Args {
    /// Config file (required)
    #[arg(help = "TOML config with network/gateway parameters")]
    config: String,
}

fn main() {
    eprintln!("LTE FDD eNodeB core ({})", lte_core::STACK_VERSION);

    let args = Args::parse();
    let cfg = load_config_from_toml(&args.config);
    let _log_guard = debug::setup_logging_default(cfg.config().debug_log.clone());

    tracing::info!(
        "starting stack for PLMN {}/{}",
        cfg.config().net.mcc,
        cfg.config().net.mnc
    );

    let user_mgr = Arc::new(UserMgr::new());

    // Timer manager fed by a 1 ms tick source (the MAC layer in the full
    // stack topology)
    let mut mac_to_timer = Msgq::new("mac-timer");
    let tick_tx = mac_to_timer.sender();
    let timer_mgr = TimerMgr::new();
    timer_mgr.start(&mut mac_to_timer);

    // Gateway with its PDCP-facing queues. Until the radio side attaches,
    // uplink notifications are drained by a logging sink.
    let mut pdcp_to_gw = Msgq::new("pdcp-gw");
    let mut gw_to_pdcp = Msgq::new("gw-pdcp");
    gw_to_pdcp.attach_rx(|msg| {
        tracing::debug!("pdcp sink: {}", msg.msg);
    });

    let gw = Gw::new(cfg.clone(), user_mgr.clone());
    if let Err(e) = gw.start(&mut pdcp_to_gw, gw_to_pdcp.sender()) {
        tracing::error!("gateway failed to start: {:?}", e);
        std::process::exit(1);
    }

    // Set up Ctrl+C handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("failed to set Ctrl+C handler");

    // Millisecond tick thread
    let tick_running = running.clone();
    let tick_thread = thread::Builder::new()
        .name("timer-tick".to_string())
        .spawn(move || {
            while tick_running.load(Ordering::SeqCst) {
                tick_tx.send(DestLayer::TimerMgr, LayerMsgInner::TimerTick);
                thread::sleep(Duration::from_millis(1));
            }
        })
        .expect("failed to spawn tick thread");

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(100));
    }

    tracing::info!("shutting down");
    gw.stop();
    let _ = tick_thread.join();
}
