//! # Page Editor Demo
//!
//! Builds a landing page with the editor core, saves it through the HTTP
//! client over the in-process loopback server, then loads it back by slug and
//! prints it as JSON.
//!
//! Reads `page-editor.toml` from the working directory when present.

use std::path::Path;

use page_editor::api::LoopbackServer;
use page_editor::clients::HttpPageStore;
use page_editor::config::EditorConfig;
use page_editor::editor::{panel, EditorSession};
use page_editor::lifecycle::{setup_tracing, PageSystem};
use page_editor::model::{slugify, BlockType, PageStatus};
use tracing::{error, info, Instrument};

const CONFIG_FILE: &str = "page-editor.toml";
const DEMO_TOKEN: &str = "dev-token";

#[tokio::main]
async fn main() -> Result<(), String> {
    let path = Path::new(CONFIG_FILE);
    let config = if path.exists() {
        EditorConfig::load(path).map_err(|e| e.to_string())?
    } else {
        EditorConfig::default()
    }
    .with_env_overrides();

    setup_tracing(&config);
    info!("Starting page editor demo");

    let system = PageSystem::with_config(&config);
    let token = config
        .auth_token
        .clone()
        .unwrap_or_else(|| DEMO_TOKEN.to_string());
    let server = LoopbackServer::new(system.pages.clone(), token.clone());
    let store = HttpPageStore::new(server, Some(token));

    // Build the page
    let mut session = EditorSession::new();
    session.title = "Grow your business in Israel".to_string();
    session.slug = slugify(&session.title);

    let span = tracing::info_span!("editing");
    async {
        let editor = session.editor_mut();
        let hero = editor.add_block(BlockType::Hero);
        editor.add_block(BlockType::Spacer);
        let pricing = editor.add_block(BlockType::Pricing);
        editor.add_block(BlockType::Divider);

        editor.select_block(Some(&pricing));
        if let Err(e) = panel::edit(editor, "price", "€990") {
            error!(error = %e, "Edit rejected");
        }
        editor.duplicate_block(&pricing);
        editor.move_block(&pricing, &hero);
        editor.deselect_block();
        info!(blocks = editor.len(), "Page built");
    }
    .instrument(span)
    .await;

    // Save twice: create, then publish
    let span = tracing::info_span!("saving");
    async {
        session.save(&store).await?;
        session.status = PageStatus::Published;
        session.save(&store).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let slug = session.slug.clone();
    let loaded = EditorSession::load(&store, &slug)
        .instrument(tracing::info_span!("loading"))
        .await
        .map_err(|e| e.to_string())?;

    let page = serde_json::json!({
        "id": loaded.page_id(),
        "title": loaded.title,
        "slug": loaded.slug,
        "status": loaded.status,
        "blocks": loaded.editor().blocks(),
    });
    match serde_json::to_string_pretty(&page) {
        Ok(json) => println!("{}", json),
        Err(e) => error!(error = %e, "Could not render page"),
    }

    drop(store);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
