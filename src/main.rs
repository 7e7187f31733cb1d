use movie_catalog::error::ServiceError;

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    movie_catalog::app::run().await
}
