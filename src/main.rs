#[tokio::main]
async fn main() {
    pretriage::run().await;
}
