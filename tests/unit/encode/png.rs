use super::*;

#[test]
fn png_round_trips_through_decoder() {
    let mut img = RenderedImage::from_pixel(4, 3, image::Rgb([255, 255, 255]));
    img.put_pixel(1, 2, image::Rgb([0, 10, 20]));

    let bytes = encode_png(&img).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded, img);
}
