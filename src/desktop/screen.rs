use crate::capture::{MonitorShot, ScreenSource, compose_to_gray};
use crate::error::{BotError, BotResult};
use crate::geometry::{Point, Region};
use image::{GrayImage, RgbaImage};
use xcap::Monitor;

/// Captures the region from every monitor it overlaps
#[derive(Debug, Default, Clone, Copy)]
pub struct MonitorScreen;

impl MonitorScreen {
    pub fn new() -> Self {
        Self
    }
}

fn capture_failed(e: impl std::fmt::Display) -> BotError {
    BotError::CaptureFailed {
        description: e.to_string(),
    }
}

fn shoot(monitor: &Monitor) -> BotResult<MonitorShot> {
    let shot = monitor.capture_image().map_err(capture_failed)?;

    // xcap may link a different `image` release, so hand the pixels over raw
    let (width, height) = (shot.width(), shot.height());
    let image = RgbaImage::from_raw(width, height, shot.into_raw())
        .ok_or_else(|| capture_failed(format!("monitor returned a malformed {width}x{height} buffer")))?;

    Ok(MonitorShot {
        origin: Point::new(monitor.x(), monitor.y()),
        image,
    })
}

impl ScreenSource for MonitorScreen {
    fn capture(&self, region: &Region) -> BotResult<GrayImage> {
        let mut shots = Vec::new();
        for monitor in Monitor::all().map_err(capture_failed)? {
            let bounds = Region::new(monitor.x(), monitor.y(), monitor.width(), monitor.height());
            if region.intersection(&bounds).is_some() {
                shots.push(shoot(&monitor)?);
            }
        }
        compose_to_gray(&shots, region)
    }
}
