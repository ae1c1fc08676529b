use webhookflow_rs::BoxError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), BoxError> {
    webhookflow_rs::run().await
}
