// ==========================================
// Labstock - import CLI
// ==========================================
// Operational entry point: imports one uploaded catalog document
// into the local database and prints the report. The interactive
// catalog UI lives in a separate service.
//
// Usage: labstock-import <file.xlsx|file.csv> [db-path]
// ==========================================

use labstock::api::ImportApi;
use labstock::config::{ConfigManager, ImportConfigReader};
use labstock::db;
use labstock::importer::{
    CatalogImporterImpl, EntityResolver, UniversalFileParser, UpsertEngine,
};
use labstock::repository::{
    ItemRepositoryImpl, ReferenceRepositoryImpl, SupplierItemRepositoryImpl,
};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> ExitCode {
    labstock::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", labstock::APP_NAME);
    tracing::info!("version: {}", labstock::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let Some(file_path) = args.next() else {
        eprintln!("usage: labstock-import <file.xlsx|file.csv> [db-path]");
        return ExitCode::from(2);
    };
    let db_path = args
        .next()
        .unwrap_or_else(|| db::default_db_path().display().to_string());

    tracing::info!(db_path = %db_path, "using database");

    let conn = match db::open_sqlite_connection(&db_path) {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("could not open database {}: {}", db_path, e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = db::init_schema(&conn) {
        eprintln!("could not initialize schema: {}", e);
        return ExitCode::FAILURE;
    }
    let conn = Arc::new(Mutex::new(conn));

    let config = match ConfigManager::from_connection(conn.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("could not read configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Ok(locale) = config.get_report_locale().await {
        labstock::i18n::set_locale(&locale);
    }

    let items = Arc::new(ItemRepositoryImpl::from_connection(conn.clone()));
    let supplier_items = Arc::new(SupplierItemRepositoryImpl::from_connection(conn.clone()));
    let references = Arc::new(ReferenceRepositoryImpl::from_connection(conn));

    let importer = CatalogImporterImpl::new(
        config,
        Box::new(UniversalFileParser),
        EntityResolver::new(references),
        UpsertEngine::new(items, supplier_items),
    );
    let api = ImportApi::new(importer);

    let response = api.import_catalog_file(&file_path).await;

    if let Ok(json) = serde_json::to_string(&response.details) {
        tracing::debug!(details = %json, "import details");
    }

    println!("{}", response.message);
    for error in &response.details.errors {
        println!("  {}", error);
    }

    if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
