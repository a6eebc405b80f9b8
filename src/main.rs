use redirect_demo::{environment::HttpEnvironment, router};
use tracing::info;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    redirect_demo::initialize()?;

    let http = HttpEnvironment::from_env()?;

    info!(
        bind = %http.bind,
        base_origin = %http.base_origin,
        host = ?http.host,
        "starting redirect demo",
    );

    router::serve(http).await
}
