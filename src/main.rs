use tripwise::{app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tripwise::init_tracing("tripwise=debug,axum=info,tower_http=info");

    let app_state = AppState::init().await?;
    app::serve(app::build_app(app_state)).await
}
