//! Scripted demo session: connect an account, process a video URL through the
//! simulated collaborators, and let auto-publish work through the batch.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clipcast_collab::{SimulatedAnalyst, SimulatedTube};
use clipcast_core::{ClipController, Collaborators, ControllerConfig, SignalLevel};
use clipcast_models::UserAccount;
use clipcast_store::JsonFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("clipcast=info".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(false))
            .with(env_filter)
            .init();
    }

    info!("Starting clipcast-demo");

    let tube = Arc::new(SimulatedTube::new());
    let analyst = Arc::new(SimulatedAnalyst::new());
    let collab = Collaborators {
        fetcher: tube.clone(),
        generator: analyst.clone(),
        publisher: tube,
        localizer: analyst,
    };

    let store = Arc::new(JsonFileStore::from_env());
    let (controller, mut signals) =
        ClipController::new(collab, store, ControllerConfig::from_env()).await?;

    // Mirror signals into the log the way the UI would toast them
    let notifier = tokio::spawn(async move {
        while let Some(signal) = signals.recv().await {
            match signal.level() {
                SignalLevel::Error => warn!(?signal, "signal"),
                _ => info!(?signal, "signal"),
            }
        }
    });

    if !controller.account().is_connected {
        controller
            .connect(UserAccount::linked("FutureTech Daily", Some("@futuretech"), "48K"))
            .await?;
    } else {
        info!(
            channel = %controller.account().channel_name.unwrap_or_default(),
            "Using persisted account"
        );
    }

    let auto = std::env::var("CLIPCAST_AUTO_PUBLISH")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(true);
    controller.set_auto_publish(auto);

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string());
    info!(url = %url, auto_publish = auto, "Processing video");
    controller.process_video(&url).await;

    let clips = controller.clips();
    if clips.is_empty() {
        error!("No clips were produced");
        return Ok(());
    }
    for clip in &clips {
        info!(
            id = %clip.id,
            span = %format!("{} - {}", clip.start_time, clip.end_time),
            score = clip.viral_score,
            title = %clip.title,
            "Candidate"
        );
    }

    if auto {
        // Give the staggered sequence room to finish: one stagger per clip
        // plus the simulated publish latency.
        let stagger = ControllerConfig::from_env().auto_publish_stagger;
        tokio::time::sleep(stagger * clips.len() as u32 + std::time::Duration::from_secs(5)).await;
    } else {
        // Publish the top-ranked clip and schedule the runner-up
        let top = &clips[0].id;
        controller.publish_clip(top).await;
        if let Some(second) = clips.get(1) {
            controller
                .schedule_clip(&second.id, "2026-08-08T09:00:00Z")
                .await;
        }
    }

    for clip in controller.clips() {
        info!(
            id = %clip.id,
            status = %clip.status,
            url = clip.published_url.as_deref().unwrap_or("-"),
            "Final state"
        );
    }

    drop(controller);
    notifier.abort();
    info!("Demo session complete");
    Ok(())
}
