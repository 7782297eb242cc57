// Example runner for the `hue_lock` library.
//
// Sweeps a green square across a synthetic scene, locating it on every frame
// with a `HueTracker` while a separate task samples the tracker's telemetry
// the way a persistence collector would.

use std::time::Duration;

use anyhow::Context;
use hue_lock::{
    BEST_AREA, CANDIDATES, Frame, Hsv, HueTrackerConfig, ObjectTracker, TelemetryChannel,
    TrackerConfig,
};
use image::{Rgb, RgbImage};
use log::{debug, info};
use tokio::sync::watch;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;
const SQUARE: u32 = 40;
const FRAMES: u32 = 60;

fn scene(step: u32) -> RgbImage {
    let left = (step * 4) % (WIDTH - SQUARE);
    let top = HEIGHT / 2 - SQUARE / 2;
    RgbImage::from_fn(WIDTH, HEIGHT, |x, y| {
        if (left..left + SQUARE).contains(&x) && (top..top + SQUARE).contains(&y) {
            Rgb([0, 255, 0])
        } else {
            Rgb([30, 30, 60])
        }
    })
}

async fn collect(telemetry: TelemetryChannel, mut stop: watch::Receiver<bool>) -> usize {
    let mut ticker = tokio::time::interval(Duration::from_millis(5));
    let mut samples = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let record = telemetry.snapshot();
                let reading = (record.get(BEST_AREA), record.get(CANDIDATES));
                if let (Some(area), Some(candidates)) = reading {
                    samples += 1;
                    debug!(
                        "telemetry at {}: best_area={} candidates={}",
                        area.timestamp,
                        area.value.as_f64(),
                        candidates.value.as_f64()
                    );
                }
            }
            _ = stop.changed() => break,
        }
    }
    samples
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrackerConfig::Hue(HueTrackerConfig::new(
        Hsv::from_opencv(50, 128, 128),
        Hsv::from_opencv(70, 255, 255),
        500.0,
    ));
    let mut tracker = config.build().context("invalid tracker configuration")?;
    let telemetry = tracker.telemetry().context("hue tracker publishes telemetry")?;
    info!("Hue Lock - Example Runner ({} tracker)", tracker.kind());

    let (stop_tx, stop_rx) = watch::channel(false);
    let collector = tokio::spawn(collect(telemetry, stop_rx));

    let tracker = tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
        tracker.start();
        let mut locked = 0;
        for step in 0..FRAMES {
            let image = scene(step);
            let mut overlay = image.clone();
            let frame = Frame::try_from(&image)?;
            let position = tracker.locate(&frame, Some(&mut overlay))?;
            if let Some(position) = position {
                locked += 1;
                info!("frame {step}: target at ({:.1}, {:.1})", position.x, position.y);
            } else {
                info!("frame {step}: no target");
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        tracker.stop();
        info!("locked on {locked} of {FRAMES} frames");
        Ok(tracker)
    })
    .await??;

    stop_tx.send(true)?;
    let samples = collector.await?;
    info!("collector took {samples} telemetry samples; final lock state {}", tracker.is_locked());
    Ok(())
}
