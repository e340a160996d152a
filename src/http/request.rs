use vercel_runtime::Request;

use crate::models::request::RequestDescriptor;

pub fn descriptor(req: &Request) -> RequestDescriptor {
    RequestDescriptor::new(req.method().as_str(), req.uri().query())
}
