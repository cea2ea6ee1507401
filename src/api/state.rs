use std::sync::Arc;

use crate::core::{AppConfig, DatabaseKind};
use crate::export::QuotationExporter;
use crate::pdf::TypstCompiler;
use crate::store::{postgres, sqlite, PgQuotationRepository, QuotationRepository, SqliteQuotationRepository};
use crate::templates::PageRenderer;

#[derive(Clone)]
pub struct ApiState {
    pub repo: Arc<dyn QuotationRepository>,
    pub exporter: Arc<QuotationExporter>,
    pub pages: Arc<PageRenderer>,
}

impl ApiState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        // Initialize database
        let backend = config.database_kind()?;
        let repo: Arc<dyn QuotationRepository> = match backend {
            DatabaseKind::Sqlite => {
                let pool = sqlite::connect(&config.database_url, config.db_max_connections).await?;
                let repo = SqliteQuotationRepository::new(pool);
                repo.init_schema().await?;
                Arc::new(repo)
            }
            DatabaseKind::Postgres => {
                let pool = postgres::connect(&config.database_url, config.db_max_connections).await?;
                let repo = PgQuotationRepository::new(pool);
                repo.init_schema().await?;
                Arc::new(repo)
            }
        };
        tracing::info!(?backend, "database ready");

        let compiler = TypstCompiler::new(config.typst_bin.clone(), config.font_path());
        let exporter = QuotationExporter::new(
            config.output_dir(),
            config.output_naming,
            config.pdf_config(),
            Arc::new(compiler),
        );

        Self::from_parts(repo, exporter)
    }

    /// Assembles the state from already-built parts.
    pub fn from_parts(
        repo: Arc<dyn QuotationRepository>,
        exporter: QuotationExporter,
    ) -> anyhow::Result<Self> {
        Ok(ApiState {
            repo,
            exporter: Arc::new(exporter),
            pages: Arc::new(PageRenderer::new()?),
        })
    }
}
