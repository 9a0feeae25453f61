use formdesk::infra::logging::init_tracing;
use formdesk::{Config, DocumentStore, PgDocumentStore, RelationalStore, SupabaseStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--require-forms]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL, DB_NAME\n\
         Optional (form submissions):\n\
           SUPABASE_URL, SUPABASE_SERVICE_KEY\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let require_forms = args.iter().any(|a| a == "--require-forms");

    let config = Config::from_env()?;

    println!("> Preflight:");
    println!("  DB_NAME={}", config.db_name);
    println!("  CORS origins: {:?}", config.cors_origins());
    println!("  BIND_ADDR={}", config.bind_addr);

    let documents = PgDocumentStore::connect(&config.database_url, &config.db_name).await?;
    documents.ping().await?;
    println!("  Document store reachable.");
    documents.close().await;

    match config.supabase() {
        Some(settings) => {
            let store = SupabaseStore::new(&settings)?;
            store
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Supabase at {} not reachable: {}", settings.url, e))?;
            println!("  Supabase reachable at {}.", settings.url);
        }
        None if require_forms => {
            return Err(anyhow::anyhow!(
                "SUPABASE_URL and SUPABASE_SERVICE_KEY must be set (--require-forms)"
            ));
        }
        None => {
            eprintln!("  Warning: Supabase not configured; form endpoints will answer 500.");
        }
    }

    println!("> Preflight OK.");
    Ok(())
}
