use reqwest::header::HeaderValue;
use vercel_runtime::{Body, Response};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

pub fn add_cors(mut resp: Response<Body>) -> Response<Body> {
    let h = resp.headers_mut();
    h.insert("Access-Control-Allow-Origin", HeaderValue::from_static(ALLOW_ORIGIN));
    h.insert("Access-Control-Allow-Methods", HeaderValue::from_static(ALLOW_METHODS));
    h.insert("Access-Control-Allow-Headers", HeaderValue::from_static(ALLOW_HEADERS));
    resp
}
