#[tokio::main]
async fn main() {
    room_booking::run().await;
}
