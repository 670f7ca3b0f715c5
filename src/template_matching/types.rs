/// Template matching data types
use crate::error::{BotError, BotResult};
use crate::geometry::{Point, RelativeArea};
use image::GrayImage;
use std::path::Path;
use std::sync::Arc;

/// A named grayscale reference image, loaded once and shared read-only
#[derive(Clone, Debug)]
pub struct Template {
    name: String,
    image: Arc<GrayImage>,
    /// Part of the frame to search; the whole frame when unset
    search_area: Option<RelativeArea>,
}

impl Template {
    pub fn new(name: impl Into<String>, image: GrayImage) -> Self {
        Self {
            name: name.into(),
            image: Arc::new(image),
            search_area: None,
        }
    }

    /// Restrict matching to `area` of the frame
    pub fn with_search_area(mut self, area: Option<RelativeArea>) -> Self {
        self.search_area = area;
        self
    }

    pub fn search_area(&self) -> Option<RelativeArea> {
        self.search_area
    }

    /// Load a template from disk, converting it to grayscale
    pub fn load(name: impl Into<String>, path: &Path) -> BotResult<Self> {
        let name = name.into();
        if !path.is_file() {
            return Err(BotError::TemplateMissing {
                name,
                path: path.to_path_buf(),
            });
        }

        let image = image::open(path).map_err(|source| BotError::TemplateLoadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(name, image.to_luma8()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Center of this template when its top-left corner sits at `top_left`
    pub fn center_at(&self, top_left: Point) -> Point {
        Point::new(
            top_left.x + (self.width() / 2) as i32,
            top_left.y + (self.height() / 2) as i32,
        )
    }
}

/// Best placement of one template in one frame
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    pub name: String,
    /// Correlation score (0.0-1.0)
    pub confidence: f32,
    /// Top-left corner of the placement, capture-local
    pub top_left: Point,
    /// Center of the placement, capture-local
    pub center: Point,
}

impl Match {
    pub fn is_confident(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let confidence_pct = (self.confidence * 100.0) as u32;
        write!(
            f,
            "{} at ({},{}) - {}%",
            self.name, self.center.x, self.center.y, confidence_pct
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_uses_integer_halves() {
        let template = Template::new("play", GrayImage::new(7, 4));
        assert_eq!(template.center_at(Point::new(10, 20)), Point::new(13, 22));
    }

    #[test]
    fn test_load_missing_template() {
        let err = Template::load("ghost", Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, BotError::TemplateMissing { ref name, .. } if name == "ghost"));
    }

    #[test]
    fn test_match_display() {
        let m = Match {
            name: "up".to_string(),
            confidence: 0.934,
            top_left: Point::new(0, 0),
            center: Point::new(5, 6),
        };
        assert_eq!(m.to_string(), "up at (5,6) - 93%");
        assert!(m.is_confident(0.8));
        assert!(!m.is_confident(0.95));
    }
}
