#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> std::io::Result<()> {
    school_odds::server::start_server().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
