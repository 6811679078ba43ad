use std::{
    io::{Cursor, Write},
    net::TcpListener,
    thread,
};

use super::*;

/// Serve a single canned HTTP response on a loopback port and return its URL.
fn serve_once(status_line: &'static str, content_type: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut buf = [0u8; 4096];
        let _ = std::io::Read::read(&mut stream, &mut buf);
        let head = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(&body);
    });
    format!("http://{addr}/icon.png")
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([0, 133, 255, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn fetcher() -> HttpIconFetcher {
    HttpIconFetcher::new(Duration::from_secs(5), 1024 * 1024)
}

#[test]
fn fetches_and_decodes_png() {
    let url = serve_once("200 OK", "image/png", png_bytes(20, 10));
    let icon = fetcher().fetch(&url).unwrap();
    assert_eq!((icon.width, icon.height), (20, 10));
    assert_eq!(&icon.rgba8_premul[..4], &[0, 133, 255, 255]);
}

#[test]
fn non_2xx_is_status_error() {
    let url = serve_once("404 Not Found", "text/plain", b"missing".to_vec());
    let err = fetcher().fetch(&url).unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }), "{err}");
}

#[test]
fn undecodable_body_is_decode_error() {
    let url = serve_once("200 OK", "image/png", b"not really a png".to_vec());
    let err = fetcher().fetch(&url).unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "{err}");
}

#[test]
fn oversized_body_is_rejected() {
    let url = serve_once("200 OK", "image/png", png_bytes(64, 64));
    let err = HttpIconFetcher::new(Duration::from_secs(5), 16)
        .fetch(&url)
        .unwrap_err();
    assert!(matches!(err, FetchError::TooLarge { limit: 16, .. }), "{err}");
}

#[test]
fn refused_connection_is_transport_error() {
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let err = fetcher()
        .fetch(&format!("http://127.0.0.1:{port}/icon.png"))
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "{err}");
}
