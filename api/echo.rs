use epa_proxy::clients::upstream::HttpUpstream;
use epa_proxy::config::ProxyConfig;
use epa_proxy::http::{cors::add_cors, request::descriptor};
use epa_proxy::services::echo_proxy;
use vercel_runtime::{run, Body, Error, Request, Response};

#[tokio::main]
async fn main() -> Result<(), Error> {
    epa_proxy::logging::init();
    run(handler).await
}

pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    let descriptor = descriptor(&req);
    let config = ProxyConfig::from_env();
    let upstream = HttpUpstream::new()?;
    let reply = echo_proxy::handle(&descriptor, &config, &upstream).await;
    Ok(add_cors(reply.into_response()?))
}
