//! Tilt Herd entry point
//!
//! Runs a headless session against the in-process broker: a scripted pointer
//! sweeps around the controller canvas on a delivery thread while the frame
//! loop steps the simulation at ~60 Hz.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tilt_herd::controller::PointerController;
use tilt_herd::messaging::{LoopbackGateway, MessagingGateway, SampleCell};
use tilt_herd::sim::Simulation;
use tilt_herd::{GatewayError, Settings, SettingsError};

/// Frame period of the headless loop
const FRAME: Duration = Duration::from_millis(16);
/// Session gives up after this many frames
const MAX_FRAMES: u32 = 60 * 30;

fn load_settings() -> Result<Settings, SettingsError> {
    match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => {
            log::info!("No settings file given, using defaults");
            Ok(Settings::default())
        }
    }
}

fn run(settings: Settings) -> Result<(), GatewayError> {
    let mut gateway = LoopbackGateway::new(settings.broker.clone());
    gateway.connect()?;

    let cell = Arc::new(SampleCell::default());
    gateway.subscribe(Arc::clone(&cell))?;
    let Some(subscription) = gateway.subscription() else {
        return Err(GatewayError::NotConnected(settings.broker.uri()));
    };

    let mut sim = Simulation::new(&settings.sim, gateway);
    log::info!(
        "Session started: {} balls, hole radius {}",
        sim.active_count(),
        sim.target().radius
    );

    let stop = AtomicBool::new(false);
    let controller = PointerController::default();

    thread::scope(|s| {
        // Delivery thread: pointer circles the canvas
        s.spawn(|| {
            let mut angle: f32 = 0.0;
            while !stop.load(Ordering::Relaxed) {
                let r = controller.canvas_size * 0.4;
                let c = controller.canvas_size / 2.0;
                let payload = controller.payload_at(c + r * angle.cos(), c + r * angle.sin());
                if let Err(e) = subscription.deliver(payload.as_bytes()) {
                    log::warn!("Malformed payload on {}: {}", subscription.topic(), e);
                }
                angle += 0.02;
                thread::sleep(Duration::from_millis(5));
            }
        });

        let start = Instant::now();
        for _ in 0..MAX_FRAMES {
            let now = start.elapsed().as_millis() as u64;
            if let Some(event) = sim.update_from(&cell, now).scored {
                log::info!("{}", event.payload());
            }
            if sim.state().is_cleared() {
                break;
            }
            thread::sleep(FRAME);
        }
        stop.store(true, Ordering::Relaxed);
    });

    log::info!(
        "Session over: scored {} of {}",
        sim.score(),
        sim.state().initial_count()
    );

    let mut gateway = sim.into_sink();
    log::info!("{} score events published", gateway.published().len());
    gateway.disconnect()
}

fn main() {
    env_logger::init();
    log::info!("Tilt Herd starting...");

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(settings) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
