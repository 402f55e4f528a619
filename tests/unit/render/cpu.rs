use super::*;
use crate::{
    foundation::core::Canvas,
    template::registry::{GradientStop, TemplateId},
};

fn backend(logical_size: u32, density: f32) -> CpuBackend {
    CpuBackend::new(&RenderConfig {
        logical_size,
        render_resolution: density,
        ..RenderConfig::default()
    })
    .unwrap()
}

fn close(a: [u8; 4], b: [u8; 4], tol: u8) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= tol)
}

fn white_plan(size: u32, mut ops: Vec<DrawOp>) -> RenderPlan {
    ops.insert(0, DrawOp::FillBackground(Background::Solid(Rgba8::WHITE)));
    RenderPlan {
        canvas: Canvas::square(size),
        ops,
    }
}

#[test]
fn empty_plan_is_transparent() {
    let mut be = backend(16, 1.0);
    let plan = RenderPlan {
        canvas: Canvas::square(16),
        ops: Vec::new(),
    };
    let (surface, failure) = be.rasterize(&plan, &mut TextShaper::new());
    assert!(failure.is_none());
    assert_eq!((surface.width, surface.height), (16, 16));
    assert!(surface.data.iter().all(|&b| b == 0));
}

#[test]
fn solid_background_covers_every_pixel() {
    let mut be = backend(32, 1.0);
    let (surface, failure) = be.rasterize(&white_plan(32, Vec::new()), &mut TextShaper::new());
    assert!(failure.is_none());
    assert!(surface.data.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn gradient_runs_from_top_left_to_bottom_right() {
    let mut be = backend(100, 1.0);
    let plan = RenderPlan {
        canvas: Canvas::square(100),
        ops: vec![DrawOp::FillBackground(
            TemplateId::Modern.style().background,
        )],
    };
    let (surface, _) = be.rasterize(&plan, &mut TextShaper::new());

    let start = Rgba8::from_hex_rgb(0x0077b5).to_premul();
    let end = Rgba8::from_hex_rgb(0x004182).to_premul();
    assert!(close(surface.pixel(0, 0).unwrap(), start, 3));
    assert!(close(surface.pixel(99, 99).unwrap(), end, 3));
    // Anti-diagonal corners sit halfway along the gradient.
    assert!(close(surface.pixel(99, 0).unwrap(), surface.pixel(0, 99).unwrap(), 1));
}

#[test]
fn single_stop_gradient_is_a_drawing_failure() {
    let mut be = backend(16, 1.0);
    let plan = RenderPlan {
        canvas: Canvas::square(16),
        ops: vec![DrawOp::FillBackground(Background::LinearGradient(vec![
            GradientStop {
                offset: 0.0,
                color: Rgba8::WHITE,
            },
        ]))],
    };
    let (_, failure) = be.rasterize(&plan, &mut TextShaper::new());
    assert!(matches!(failure, Some(QuoteCardError::Drawing(_))));
}

#[test]
fn circles_fill_and_stroke_in_logical_units() {
    let red = Rgba8::from_hex_rgb(0xff0000);
    let blue = Rgba8::from_hex_rgb(0x0000ff);
    let circle = Circle::new((50.0, 50.0), 20.0);
    let plan = white_plan(
        100,
        vec![
            DrawOp::FillCircle { circle, color: red },
            DrawOp::StrokeCircle {
                circle,
                color: blue,
                width: 4.0,
            },
        ],
    );

    let (surface, failure) = backend(100, 1.0).rasterize(&plan, &mut TextShaper::new());
    assert!(failure.is_none());
    assert_eq!(surface.pixel(50, 50), Some([255, 0, 0, 255]));
    assert_eq!(surface.pixel(50, 30), Some([0, 0, 255, 255]));
    assert_eq!(surface.pixel(2, 2), Some([255, 255, 255, 255]));

    // Same plan at density 2 lands on doubled pixel coordinates.
    let (surface, _) = backend(100, 2.0).rasterize(&plan, &mut TextShaper::new());
    assert_eq!((surface.width, surface.height), (200, 200));
    assert_eq!((surface.display_width, surface.display_height), (100, 100));
    assert_eq!(surface.pixel(100, 100), Some([255, 0, 0, 255]));
    assert_eq!(surface.pixel(100, 60), Some([0, 0, 255, 255]));
    assert_eq!(surface.pixel(199, 199), Some([255, 255, 255, 255]));
}

#[test]
fn circle_image_is_scaled_and_clipped() {
    let image = PreparedImage::from_rgba8(2, 2, vec![0, 255, 0, 255].repeat(4)).unwrap();
    let circle = Circle::new((50.0, 50.0), 20.0);
    let plan = white_plan(100, vec![DrawOp::CircleImage { image, circle }]);

    let (surface, failure) = backend(100, 1.0).rasterize(&plan, &mut TextShaper::new());
    assert!(failure.is_none());
    let green = [0, 255, 0, 255];
    assert!(close(surface.pixel(50, 50).unwrap(), green, 2));
    assert!(close(surface.pixel(40, 60).unwrap(), green, 2));
    // Inside the bounding box but outside the circle.
    assert_eq!(surface.pixel(31, 31), Some([255, 255, 255, 255]));
}

#[test]
fn failing_op_stops_execution_and_keeps_partial_surface() {
    let oversized = PreparedImage::from_rgba8(70_000, 1, vec![255; 70_000 * 4]).unwrap();
    let circle = Circle::new((50.0, 50.0), 20.0);
    let plan = white_plan(
        100,
        vec![
            DrawOp::CircleImage {
                image: oversized,
                circle,
            },
            DrawOp::FillCircle {
                circle,
                color: Rgba8::from_hex_rgb(0xff0000),
            },
        ],
    );

    let (surface, failure) = backend(100, 1.0).rasterize(&plan, &mut TextShaper::new());
    assert!(matches!(failure, Some(QuoteCardError::Drawing(_))));
    assert_eq!(surface.pixel(50, 50), Some([255, 255, 255, 255]));
}

#[test]
fn empty_text_draws_nothing() {
    let plan = white_plan(
        32,
        vec![DrawOp::Text {
            text: String::new(),
            font: crate::layout::wrap::FontSpec::regular("sans-serif", 16.0),
            anchor: crate::foundation::core::Point::new(16.0, 16.0),
            align: TextAlign::Center,
            color: Rgba8::from_hex_rgb(0x000000),
        }],
    );
    let (surface, failure) = backend(32, 1.0).rasterize(&plan, &mut TextShaper::new());
    assert!(failure.is_none());
    assert!(surface.data.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn circle_image_rejects_zero_area() {
    let image = PreparedImage {
        width: 0,
        height: 0,
        rgba8_premul: Arc::new(Vec::new()),
    };
    let plan = white_plan(
        16,
        vec![DrawOp::CircleImage {
            image,
            circle: Circle::new((8.0, 8.0), 4.0),
        }],
    );
    let (_, failure) = backend(16, 1.0).rasterize(&plan, &mut TextShaper::new());
    assert!(failure.is_some());
}

#[test]
fn very_wide_avatar_still_draws_and_later_ops_run() {
    let wide = image::RgbaImage::from_raw(70_000, 1, vec![0, 255, 0, 255].repeat(70_000)).unwrap();
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(wide)
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let avatar = crate::assets::decode::decode_avatar(&png).unwrap();

    let plan = white_plan(
        100,
        vec![
            DrawOp::CircleImage {
                image: avatar,
                circle: Circle::new((50.0, 50.0), 20.0),
            },
            DrawOp::Text {
                text: "Ada Lovelace".to_string(),
                font: crate::layout::wrap::FontSpec::regular("sans-serif", 16.0),
                anchor: crate::foundation::core::Point::new(50.0, 85.0),
                align: TextAlign::Center,
                color: Rgba8::from_hex_rgb(0x000000),
            },
            DrawOp::FillCircle {
                circle: Circle::new((10.0, 10.0), 5.0),
                color: Rgba8::from_hex_rgb(0xff0000),
            },
        ],
    );

    let (surface, failure) = backend(100, 1.0).rasterize(&plan, &mut TextShaper::new());
    assert!(failure.is_none());
    assert!(close(surface.pixel(50, 50).unwrap(), [0, 255, 0, 255], 2));
    assert_eq!(surface.pixel(10, 10), Some([255, 0, 0, 255]));
}
