use super::*;

fn endpoints(base: &str) -> Endpoints {
    Endpoints::new(&Url::parse(base).unwrap()).unwrap()
}

#[test]
fn endpoints_under_origin() {
    let endpoints = endpoints("http://localhost:8080/");
    assert_eq!(endpoints.events.as_str(), "http://localhost:8080/events");
    assert_eq!(endpoints.canvas.as_str(), "http://localhost:8080/canvas");
    assert_eq!(endpoints.palette.as_str(), "http://localhost:8080/palette");
    assert_eq!(endpoints.pixel.as_str(), "http://localhost:8080/pixel");
}

#[test]
fn endpoints_keep_base_path_without_trailing_slash() {
    let endpoints = endpoints("https://place.example.com/api");
    assert_eq!(endpoints.events.as_str(), "https://place.example.com/api/events");
    assert_eq!(endpoints.pixel.as_str(), "https://place.example.com/api/pixel");
}

#[test]
fn pixel_body_is_flat_json() {
    let body = pixel_body(&Pixel::new(500, 500, PackedColor(0xFF0000FF))).unwrap();
    assert_eq!(body, r#"{"x":500,"y":500,"color":4278190335}"#);
}

#[test]
fn parse_pixel_event() {
    let pixel = parse_pixel(r#"{"x":3,"y":4,"color":255}"#).unwrap();
    assert_eq!(pixel, Pixel::new(3, 4, PackedColor(0xFF)));
}

#[test]
fn parse_pixel_rejects_malformed() {
    assert!(matches!(parse_pixel("{\"x\":3}"), Err(ClientError::Json(_))));
    assert!(matches!(parse_pixel("not json"), Err(ClientError::Json(_))));
}

#[test]
fn parse_palette_array() {
    let palette = parse_palette("[4294967295, 3841982719, 0]").unwrap();
    assert_eq!(
        palette,
        vec![
            PackedColor(0xFFFFFFFF),
            PackedColor(0xE50000FF),
            PackedColor(0)
        ]
    );
}

#[test]
fn parse_palette_rejects_negative_values() {
    assert!(parse_palette("[-1]").is_err());
    assert!(parse_palette("{}").is_err());
}
