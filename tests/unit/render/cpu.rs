use super::*;
use crate::render::backend::execute_plan;
use crate::compile::plan::{DrawPlan, StrokeOp};

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn horizontal(y: f64, x0: f64, x1: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(Point::new(x0, y));
    p.curve_to(
        Point::new(x0 + (x1 - x0) / 3.0, y),
        Point::new(x0 + 2.0 * (x1 - x0) / 3.0, y),
        Point::new(x1, y),
    );
    p
}

#[test]
fn background_only_canvas_is_uniform_and_opaque() {
    let mut sink = CpuSink::new();
    sink.begin(Canvas::square(32).unwrap(), Rgb8::new(200, 100, 50))
        .unwrap();
    let frame = sink.finish().unwrap();

    assert_eq!((frame.width, frame.height), (32, 32));
    assert!(frame.premultiplied);
    assert!(
        frame
            .data
            .chunks_exact(4)
            .all(|p| p == [200, 100, 50, 255])
    );
}

#[test]
fn stroke_inks_along_the_path_only() {
    let plan = DrawPlan {
        canvas: Canvas::square(64).unwrap(),
        background: Rgb8::WHITE,
        ink: Rgb8::BLACK,
        ops: vec![StrokeOp {
            stroke_index: 0,
            path: horizontal(32.0, 8.0, 56.0),
            width: 6.0,
        }],
    };
    let frame = execute_plan(&mut CpuSink::new(), &plan).unwrap();

    assert_eq!(px(&frame, 32, 32), [0, 0, 0, 255]);
    assert_eq!(px(&frame, 10, 31), [0, 0, 0, 255]);
    // Round caps extend past the endpoints by half the width.
    assert!(px(&frame, 6, 32)[0] < 128);
    assert_eq!(px(&frame, 32, 8), [255, 255, 255, 255]);
    assert_eq!(px(&frame, 32, 40), [255, 255, 255, 255]);
    assert_eq!(px(&frame, 1, 32), [255, 255, 255, 255]);
}

#[test]
fn stroke_before_begin_is_an_error() {
    let mut sink = CpuSink::new();
    assert!(sink.stroke(&horizontal(1.0, 0.0, 2.0), 1.0, Rgb8::BLACK).is_err());
    assert!(sink.finish().is_err());
}

#[test]
fn non_positive_width_is_rejected() {
    let mut sink = CpuSink::new();
    sink.begin(Canvas::square(8).unwrap(), Rgb8::WHITE).unwrap();
    assert!(sink.stroke(&horizontal(4.0, 1.0, 7.0), 0.0, Rgb8::BLACK).is_err());
    assert!(sink.stroke(&horizontal(4.0, 1.0, 7.0), f64::NAN, Rgb8::BLACK).is_err());
}
