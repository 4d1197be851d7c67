use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    posts_lambda::run().await
}
