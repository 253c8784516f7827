//! Postdeck client - composition root binary.
//!
//! Builds the platform, wires the auth adapter into the stores, and runs a
//! short smoke flow so the wiring can be exercised without a UI shell:
//! rehydrate, try a token refresh, report the collection.
//!
//! Set `POSTDECK_OFFLINE=1` to use the in-memory auth stub instead of the
//! HTTP backend at `POSTDECK_API_URL`.

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    use std::sync::Arc;

    use postdeck_client::application::{PostStore, SessionStore};
    use postdeck_client::infrastructure::auth::{HttpAuthApi, StubAuthApi};
    use postdeck_client::infrastructure::platform::create_platform;
    use postdeck_client::ports::outbound::AuthApiPort;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postdeck=debug,postdeck_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Postdeck client");

    let platform = create_platform();

    let api: Arc<dyn AuthApiPort> = if std::env::var("POSTDECK_OFFLINE").is_ok() {
        tracing::info!("Offline mode: using stub auth collaborator");
        Arc::new(StubAuthApi::happy())
    } else {
        Arc::new(HttpAuthApi::from_env())
    };

    let session = SessionStore::new(api, platform.storage_adapter());
    let posts = PostStore::new(platform.storage_adapter(), platform.time_adapter());

    let state = session.state();
    match &state.user {
        Some(user) => tracing::info!(
            "Rehydrated session for {}",
            user.display_name.as_deref().unwrap_or(&user.username)
        ),
        None => tracing::info!("No persisted session"),
    }

    // Rotate the access token if a refresh token survived rehydration.
    // A failed exchange clears the session, which is exactly what a fresh
    // app start should do with an expired session.
    if let Err(e) = session.refresh_access_token().await {
        tracing::warn!("{e}");
    }

    // Optional demo mutation: POSTDECK_DEMO_SCHEDULE=<rfc3339 instant>
    // schedules a post for that instant, going through the same form-side
    // validation a UI would run.
    if let Ok(at) = std::env::var("POSTDECK_DEMO_SCHEDULE") {
        let at = postdeck_domain::common::parse_datetime(&at)?;
        let draft = postdeck_domain::PostDraft::new(
            "Scheduled from the Postdeck smoke flow",
            postdeck_domain::SocialPlatform::X,
        )
        .scheduled_for(at);
        draft.validate()?;
        let post = posts.add_post(draft);
        tracing::info!("Created demo post {} ({:?})", post.id, post.status);
    }

    let all = posts.posts();
    let upcoming = posts.upcoming_scheduled(platform.now());
    tracing::info!(
        "Post collection: {} total, {} upcoming scheduled",
        all.len(),
        upcoming.len()
    );
    for post in upcoming {
        if let Some(at) = post.scheduled_at {
            tracing::info!("  {} -> {} at {}", post.id, post.platform.label(), at);
        }
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("Postdeck client core loaded");
}
