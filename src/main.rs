use schemac::infrastructure::container::AppContainer;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let container = match AppContainer::new().await {
        Ok(container) => container,
        Err(e) => {
            eprintln!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let server = container.into_http_server();

    if let Err(e) = server.run().await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
