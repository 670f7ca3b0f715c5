//! Screen capture of the game's client region as grayscale frames

use crate::error::{BotError, BotResult};
use crate::geometry::{Point, Region};
use image::{DynamicImage, GrayImage, RgbaImage};

/// Something that can grab a rectangle of the live display.
pub trait ScreenSource: Send + Sync {
    /// Capture `region` (screen coordinates) as a single-channel image
    fn capture(&self, region: &Region) -> BotResult<GrayImage>;
}

/// Captures one fixed region, checking every frame against its size
pub struct ScreenCapturer<S> {
    source: S,
    region: Region,
    frames: u64,
}

impl<S: ScreenSource> ScreenCapturer<S> {
    pub fn new(source: S, region: Region) -> Self {
        Self {
            source,
            region,
            frames: 0,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Number of frames captured so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Take a fresh screenshot of the region. Never cached.
    pub fn screenshot(&mut self) -> BotResult<GrayImage> {
        let start = std::time::Instant::now();
        let frame = self.source.capture(&self.region)?;

        if frame.width() != self.region.width || frame.height() != self.region.height {
            return Err(BotError::FrameSizeMismatch {
                width: self.region.width,
                height: self.region.height,
                actual_width: frame.width(),
                actual_height: frame.height(),
            });
        }

        self.frames += 1;
        log::trace!(
            "📸 Frame #{} {}x{} ({}ms)",
            self.frames,
            frame.width(),
            frame.height(),
            start.elapsed().as_millis()
        );
        Ok(frame)
    }
}

/// One monitor's capture and where its top-left sits on the virtual screen
pub struct MonitorShot {
    pub origin: Point,
    pub image: RgbaImage,
}

impl MonitorShot {
    pub fn bounds(&self) -> Region {
        Region::new(self.origin.x, self.origin.y, self.image.width(), self.image.height())
    }
}

/// Stitch `region` together from the monitors it overlaps and convert it to grayscale.
///
/// Fails if any part of the region is off every monitor.
pub fn compose_to_gray(shots: &[MonitorShot], region: &Region) -> BotResult<GrayImage> {
    let mut canvas = RgbaImage::new(region.width, region.height);
    let mut covered = 0u64;

    for shot in shots {
        let Some(part) = region.intersection(&shot.bounds()) else {
            continue;
        };
        let piece = image::imageops::crop_imm(
            &shot.image,
            (part.left - shot.origin.x) as u32,
            (part.top - shot.origin.y) as u32,
            part.width,
            part.height,
        )
        .to_image();
        image::imageops::replace(
            &mut canvas,
            &piece,
            (part.left - region.left) as i64,
            (part.top - region.top) as i64,
        );
        covered += part.area();
    }

    if covered < region.area() {
        return Err(BotError::CaptureFailed {
            description: format!(
                "region {}x{} at ({},{}) is only partly on screen ({} of {} pixels across {} monitor(s))",
                region.width,
                region.height,
                region.left,
                region.top,
                covered,
                region.area(),
                shots.len()
            ),
        });
    }

    Ok(DynamicImage::ImageRgba8(canvas).to_luma8())
}
