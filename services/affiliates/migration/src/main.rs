use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(betengine_affiliates_migration::Migrator).await;
}
