/// Template matching implementation
///
/// Zero-mean normalized cross-correlation, scored the same way as OpenCV's
/// `TM_CCOEFF_NORMED`, built from imageproc's raw cross-correlation and
/// integral images.
use super::types::{Match, Template};
use crate::error::{BotError, BotResult};
use crate::geometry::{Point, Region};
use image::{GrayImage, ImageBuffer, Luma};
use imageproc::definitions::Image;
use imageproc::integral_image::{integral_image, integral_squared_image};
use imageproc::template_matching::{MatchTemplateMethod, find_extremes, match_template_parallel};
use std::sync::Arc;

/// Windows whose per-pixel variance falls below this are treated as flat
const MIN_WINDOW_VARIANCE: f64 = 1.0;

/// Part of `image` searched for `template`, in frame-local pixels
pub fn search_region(image: &GrayImage, template: &Template) -> Region {
    let (width, height) = image.dimensions();
    match template.search_area() {
        Some(area) => area.resolve(width, height),
        None => Region::new(0, 0, width, height),
    }
}

/// Score `template` against every placement in its search region and return the best one.
///
/// The returned location is relative to the whole frame.
pub fn match_template(image: &GrayImage, template: &Template) -> BotResult<Match> {
    let search = search_region(image, template);
    let (template_width, template_height) = template.image().dimensions();

    if template_width == 0
        || template_height == 0
        || template_width > search.width
        || template_height > search.height
    {
        return Err(BotError::TemplateTooLarge {
            name: template.name().to_string(),
            template_width,
            template_height,
            image_width: search.width,
            image_height: search.height,
        });
    }

    let scores = if search.width == image.width() && search.height == image.height() {
        correlation_surface(image, template.image())
    } else {
        let view = image::imageops::crop_imm(
            image,
            search.left as u32,
            search.top as u32,
            search.width,
            search.height,
        )
        .to_image();
        correlation_surface(&view, template.image())
    };

    let extremes = find_extremes(&scores);
    let (x, y) = extremes.max_value_location;
    let top_left = Point::new(search.left + x as i32, search.top + y as i32);

    let result = Match {
        name: template.name().to_string(),
        confidence: extremes.max_value,
        top_left,
        center: template.center_at(top_left),
    };
    log::trace!("🔍 {}", result);
    Ok(result)
}

/// Match one frame against several templates on a bounded pool of blocking workers.
///
/// Results come back in the same order as `templates`, unfiltered.
pub async fn match_all(
    image: Arc<GrayImage>,
    templates: &[Template],
    workers: usize,
) -> BotResult<Vec<Match>> {
    run_batched(templates, workers, move |template: Template| {
        match_template(&image, &template)
    })
    .await
}

/// Run `job` over `items` as blocking tasks, at most `workers` at a time.
///
/// Each batch is joined in order before the next one starts.
async fn run_batched<T, R, F>(items: &[T], workers: usize, job: F) -> BotResult<Vec<R>>
where
    T: Clone + Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> BotResult<R> + Send + Sync + 'static,
{
    let pool_size = workers.clamp(1, items.len().max(1));
    let job = Arc::new(job);
    let mut results = Vec::with_capacity(items.len());

    for batch in items.chunks(pool_size) {
        let handles: Vec<_> = batch
            .iter()
            .cloned()
            .map(|item| {
                let job = Arc::clone(&job);
                tokio::task::spawn_blocking(move || job(item))
            })
            .collect();

        for handle in handles {
            results.push(handle.await??);
        }
    }

    Ok(results)
}

/// Correlation score for every placement of `template`, clamped to 0.0-1.0
fn correlation_surface(image: &GrayImage, template: &GrayImage) -> Image<Luma<f32>> {
    let (template_width, template_height) = template.dimensions();
    let out_width = image.width() - template_width + 1;
    let out_height = image.height() - template_height + 1;
    let n = (template_width as f64) * (template_height as f64);

    let template_mean = template.pixels().map(|p| p[0] as f64).sum::<f64>() / n;
    let template_var: f64 = template
        .pixels()
        .map(|p| {
            let d = p[0] as f64 - template_mean;
            d * d
        })
        .sum();

    // A flat template correlates with nothing
    if template_var == 0.0 {
        return ImageBuffer::new(out_width, out_height);
    }

    let cross = match_template_parallel(image, template, MatchTemplateMethod::CrossCorrelation);
    let sums = integral_image::<_, u64>(image);
    let squares = integral_squared_image::<_, u64>(image);

    ImageBuffer::from_fn(out_width, out_height, |x, y| {
        let sum = window_sum(&sums, x, y, template_width, template_height) as f64;
        let sum_sq = window_sum(&squares, x, y, template_width, template_height) as f64;
        let window_var = sum_sq - sum * sum / n;
        if window_var < n * MIN_WINDOW_VARIANCE {
            return Luma([0.0]);
        }

        // sum((I - mean_I) * (T - mean_T)) == sum(I * T) - mean_T * sum(I)
        let numerator = cross.get_pixel(x, y)[0] as f64 - template_mean * sum;
        let score = numerator / (template_var * window_var).sqrt();
        Luma([score.clamp(0.0, 1.0) as f32])
    })
}

/// Sum of the `width` x `height` window at (x, y), read from an integral image
fn window_sum(integral: &Image<Luma<u64>>, x: u32, y: u32, width: u32, height: u32) -> u64 {
    let a = integral.get_pixel(x, y)[0];
    let b = integral.get_pixel(x + width, y)[0];
    let c = integral.get_pixel(x, y + height)[0];
    let d = integral.get_pixel(x + width, y + height)[0];
    d + a - b - c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RelativeArea;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Deterministic noise so the background never repeats the template
    fn noise_image(width: u32, height: u32, seed: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            let h = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729) ^ seed)
                .wrapping_mul(2_654_435_761);
            Luma([(h >> 24) as u8])
        })
    }

    fn arrow_template() -> GrayImage {
        // A plus-shaped glyph, symmetric about its middle column
        GrayImage::from_fn(9, 9, |x, y| {
            if x == 4 || y == 4 { Luma([240]) } else { Luma([20]) }
        })
    }

    fn paste(target: &mut GrayImage, patch: &GrayImage, ox: u32, oy: u32) {
        image::imageops::replace(target, patch, ox as i64, oy as i64);
    }

    #[test]
    fn test_exact_copy_scores_one_at_offset() {
        let template_img = noise_image(12, 10, 99);
        let template = Template::new("patch", template_img.clone());

        for (ox, oy) in [(0, 0), (17, 5), (52, 38)] {
            let mut frame = noise_image(64, 48, 7);
            paste(&mut frame, &template_img, ox, oy);

            let m = match_template(&frame, &template).unwrap();
            assert!(
                (m.confidence - 1.0).abs() < 1e-3,
                "confidence {} at ({ox},{oy})",
                m.confidence
            );
            assert_eq!(m.top_left, Point::new(ox as i32, oy as i32));
            assert_eq!(m.center, Point::new(ox as i32 + 6, oy as i32 + 5));
        }
    }

    #[test]
    fn test_blank_frame_scores_below_threshold() {
        let template = Template::new("up", arrow_template());
        let frame = GrayImage::from_pixel(40, 30, Luma([128]));

        let m = match_template(&frame, &template).unwrap();
        assert!(m.confidence < 0.8, "confidence {}", m.confidence);
    }

    #[test]
    fn test_horizontal_gradient_scores_below_threshold() {
        let template = Template::new("up", arrow_template());
        let frame = GrayImage::from_fn(60, 30, |x, _| Luma([(x * 4) as u8]));

        let m = match_template(&frame, &template).unwrap();
        assert!(m.confidence < 0.8, "confidence {}", m.confidence);
    }

    #[test]
    fn test_flat_template_never_matches() {
        let template = Template::new("flat", GrayImage::from_pixel(4, 4, Luma([90])));
        let frame = noise_image(20, 20, 3);

        let m = match_template(&frame, &template).unwrap();
        assert_eq!(m.confidence, 0.0);
    }

    #[test]
    fn test_template_larger_than_frame() {
        let template = Template::new("big", GrayImage::new(30, 30));
        let frame = GrayImage::new(20, 40);

        let err = match_template(&frame, &template).unwrap_err();
        assert!(matches!(err, BotError::TemplateTooLarge { .. }));
    }

    #[test]
    fn test_window_sum_matches_direct_sum() {
        let img = noise_image(10, 8, 5);
        let integral = integral_image::<_, u64>(&img);

        let direct: u64 = (2..6)
            .flat_map(|y| (3..8).map(move |x| (x, y)))
            .map(|(x, y)| img.get_pixel(x, y)[0] as u64)
            .sum();
        assert_eq!(window_sum(&integral, 3, 2, 5, 4), direct);
    }

    #[tokio::test]
    async fn test_match_all_keeps_template_order() {
        let up = arrow_template();
        let other = noise_image(9, 9, 42);
        let mut frame = noise_image(80, 60, 11);
        paste(&mut frame, &up, 30, 20);

        let templates = vec![
            Template::new("noise", other),
            Template::new("up", up),
            Template::new("noise-again", noise_image(6, 6, 77)),
        ];

        let results = match_all(Arc::new(frame), &templates, 2).await.unwrap();
        let names: Vec<_> = results.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["noise", "up", "noise-again"]);
        assert!(results[1].confidence > 0.99);
        assert_eq!(results[1].center, Point::new(34, 24));
    }

    #[test]
    fn test_search_area_reports_frame_coordinates() {
        let patch = noise_image(8, 8, 321);
        let mut frame = noise_image(80, 60, 12);
        paste(&mut frame, &patch, 50, 35);

        // Right half, bottom half
        let area = RelativeArea::new(0.5, 0.5, 0.5, 0.5);
        let template = Template::new("up", patch).with_search_area(Some(area));

        let m = match_template(&frame, &template).unwrap();
        assert!(m.confidence > 0.99, "confidence {}", m.confidence);
        assert_eq!(m.top_left, Point::new(50, 35));
        assert_eq!(m.center, Point::new(54, 39));
    }

    #[test]
    fn test_search_area_ignores_content_outside_it() {
        let patch = noise_image(8, 8, 321);
        let mut frame = noise_image(80, 60, 12);
        paste(&mut frame, &patch, 5, 5);

        let area = RelativeArea::new(0.5, 0.5, 0.5, 0.5);
        let template = Template::new("up", patch).with_search_area(Some(area));

        let m = match_template(&frame, &template).unwrap();
        assert!(m.confidence < 0.8, "confidence {}", m.confidence);
        assert!(m.top_left.x >= 40 && m.top_left.y >= 30);
    }

    #[test]
    fn test_search_area_too_small_for_template() {
        let area = RelativeArea::new(0.0, 0.0, 0.1, 0.1);
        let template = Template::new("up", noise_image(8, 8, 1)).with_search_area(Some(area));

        let err = match_template(&noise_image(40, 40, 2), &template).unwrap_err();
        assert!(matches!(
            err,
            BotError::TemplateTooLarge {
                image_width: 4,
                image_height: 4,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_batches_never_exceed_worker_count() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (running, highest) = (Arc::clone(&in_flight), Arc::clone(&peak));

        let results = run_batched(&[1u32, 2, 3, 4, 5], 2, move |n| {
            let now = running.fetch_add(1, Ordering::SeqCst) + 1;
            highest.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            running.fetch_sub(1, Ordering::SeqCst);
            Ok(n * 10)
        })
        .await
        .unwrap();

        assert_eq!(results, [10, 20, 30, 40, 50]);
        let peak = peak.load(Ordering::SeqCst);
        assert!((1..=2).contains(&peak), "peak {peak}");
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_workers_runs_one_at_a_time() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (running, highest) = (Arc::clone(&in_flight), Arc::clone(&peak));

        run_batched(&[(); 3], 0, move |_| {
            let now = running.fetch_add(1, Ordering::SeqCst) + 1;
            highest.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(5));
            running.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_batch_error_is_returned() {
        let result = run_batched(&[1u32, 2, 3], 2, |n| {
            if n == 2 {
                Err(BotError::CaptureFailed {
                    description: "boom".to_string(),
                })
            } else {
                Ok(n)
            }
        })
        .await;
        assert!(matches!(result, Err(BotError::CaptureFailed { .. })));
    }

    #[tokio::test]
    async fn test_match_all_with_no_templates() {
        let results = match_all(Arc::new(GrayImage::new(4, 4)), &[], 2).await.unwrap();
        assert!(results.is_empty());
    }
}
