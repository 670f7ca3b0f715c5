//! Client-to-screen coordinate translation for the capture region

/// A pixel position, either client-local or absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The on-screen rectangle that gets captured, normally the game window's client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: i32,
    pub left: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Screen position of the client's top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Convert client-local coordinates to absolute screen coordinates
    pub fn to_screen(&self, local: Point) -> Point {
        Point::new(local.x + self.left, local.y + self.top)
    }

    /// Convert absolute screen coordinates back to client-local ones
    pub fn to_client(&self, screen: Point) -> Point {
        Point::new(screen.x - self.left, screen.y - self.top)
    }

    /// The overlapping part of two regions in the same coordinate space
    pub fn intersection(&self, other: &Region) -> Option<Region> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left as i64 || bottom <= top as i64 {
            return None;
        }
        Some(Region::new(
            left,
            top,
            (right - left as i64) as u32,
            (bottom - top as i64) as u32,
        ))
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    fn right(&self) -> i64 {
        self.left as i64 + self.width as i64
    }

    fn bottom(&self) -> i64 {
        self.top as i64 + self.height as i64
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A rectangle given as fractions of a frame, so it fits any client size.
///
/// Resolves to client-local pixels, clipped to the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeArea {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl RelativeArea {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn resolve(&self, frame_width: u32, frame_height: u32) -> Region {
        let scale = |fraction: f32, size: u32| (fraction.clamp(0.0, 1.0) * size as f32).round() as u32;
        let left = scale(self.left, frame_width);
        let top = scale(self.top, frame_height);
        let right = scale(self.left + self.width, frame_width);
        let bottom = scale(self.top + self.height, frame_height);
        Region::new(
            left as i32,
            top as i32,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        )
    }
}
