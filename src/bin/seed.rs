use storefront_api::{
    config::AppConfig,
    state::AppState,
    store::{NewProduct, NewUser, StoreError},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    anyhow::ensure!(
        config.database_url.is_some(),
        "DATABASE_URL must be set, seeding the in-memory store has no effect"
    );
    let state = AppState::connect(&config).await?;

    ensure_user(&state, "demo", "demo123").await?;
    seed_products(&state).await?;

    println!("Seed completed");
    Ok(())
}

async fn ensure_user(state: &AppState, username: &str, password: &str) -> anyhow::Result<()> {
    let password_hash = state.hasher.hash(password)?;
    let created = state
        .users
        .create(NewUser {
            firstname: "Demo".into(),
            lastname: "User".into(),
            username: username.into(),
            password_hash,
        })
        .await;

    match created {
        Ok(user) => println!("Created user {username} (id={})", user.id),
        Err(StoreError::Conflict(_)) => println!("User {username} already exists"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn seed_products(state: &AppState) -> anyhow::Result<()> {
    let products = [("banana", 4), ("apple", 3), ("coffee beans", 12), ("ferris mug", 15)];

    for (name, price) in products {
        match state
            .products
            .create(NewProduct {
                name: name.into(),
                price,
            })
            .await
        {
            Ok(_) | Err(StoreError::Conflict(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }

    println!("Seeded products");
    Ok(())
}
