use super::*;

#[test]
fn hex_literal_round_trips_through_to_hex() {
    let c = Rgba8::from_hex_rgb(0x0077b5);
    assert_eq!((c.r, c.g, c.b, c.a), (0x00, 0x77, 0xb5, 255));
    assert_eq!(c.to_hex(), "#0077b5");

    let translucent = Rgba8 { a: 0x80, ..c };
    assert_eq!(translucent.to_hex(), "#0077b580");
}

#[test]
fn premul_is_identity_for_opaque_colors() {
    let c = Rgba8::from_hex_rgb(0xffd700);
    assert_eq!(c.to_premul(), [0xff, 0xd7, 0x00, 0xff]);

    let half = Rgba8 {
        r: 200,
        g: 100,
        b: 0,
        a: 128,
    };
    assert_eq!(half.to_premul(), [100, 50, 0, 128]);
}

#[test]
fn canvas_center_is_half_width() {
    assert_eq!(Canvas::square(1080).center_x(), 540.0);
}
